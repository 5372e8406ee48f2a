//! Conversion context
//!
//! Carries the read-only capabilities every lowering needs plus the two pieces
//! of traversal state: the With-block temporary names currently in scope and
//! the stack of enclosing routines. Both stacks are only ever changed through
//! guards, which restore them when dropped.

use super::clauses::{CatchFinallyConverter, DEFAULT_CATCH_FINALLY_CONVERTER};
use super::declarations::{DeclarationSplitter, DEFAULT_DECLARATION_SPLITTER};
use super::expressions::{ExpressionConverter, SYNTACTIC_EXPRESSION_CONVERTER};
use super::ConversionResult;
use crate::cs::{self, StatementBuilder};
use crate::semantics::SemanticOracle;
use crate::vb::{self, RoutineId, RoutineKind};
use std::ops::{Deref, DerefMut};

/// A routine or lambda whose body is being converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutineFrame {
    pub id: RoutineId,
    pub kind: RoutineKind,
    pub is_iterator: bool,
}

pub struct ConversionContext<'a> {
    pub oracle: &'a dyn SemanticOracle,
    pub expressions: &'a dyn ExpressionConverter,
    pub declarations: &'a dyn DeclarationSplitter,
    pub clauses: &'a dyn CatchFinallyConverter,
    pub builder: StatementBuilder,
    with_block_names: Vec<String>,
    routines: Vec<RoutineFrame>,
}

impl<'a> ConversionContext<'a> {
    /// Context using the default collaborators
    pub fn new(oracle: &'a dyn SemanticOracle) -> Self {
        Self {
            oracle,
            expressions: &SYNTACTIC_EXPRESSION_CONVERTER,
            declarations: &DEFAULT_DECLARATION_SPLITTER,
            clauses: &DEFAULT_CATCH_FINALLY_CONVERTER,
            builder: StatementBuilder::new(),
            with_block_names: Vec::new(),
            routines: Vec::new(),
        }
    }

    pub fn with_expression_converter(mut self, expressions: &'a dyn ExpressionConverter) -> Self {
        self.expressions = expressions;
        self
    }

    pub fn with_declaration_splitter(mut self, declarations: &'a dyn DeclarationSplitter) -> Self {
        self.declarations = declarations;
        self
    }

    pub fn with_catch_finally_converter(mut self, clauses: &'a dyn CatchFinallyConverter) -> Self {
        self.clauses = clauses;
        self
    }

    /// With-block temporaries in scope, outermost first
    pub fn with_block_names(&self) -> &[String] {
        &self.with_block_names
    }

    /// Temporary of the innermost With block
    pub fn current_with_block(&self) -> Option<&str> {
        self.with_block_names.last().map(String::as_str)
    }

    /// Innermost routine or lambda being converted
    pub fn enclosing_routine(&self) -> Option<&RoutineFrame> {
        self.routines.last()
    }

    pub fn is_iterator(&self) -> bool {
        self.enclosing_routine()
            .is_some_and(|routine| routine.is_iterator)
    }

    /// Push a With-block temporary until the returned guard is dropped
    pub fn enter_with_block(&mut self, name: String) -> WithBlockGuard<'_, 'a> {
        self.with_block_names.push(name);
        WithBlockGuard { context: self }
    }

    /// Push a routine frame until the returned guard is dropped
    pub fn enter_routine(&mut self, frame: RoutineFrame) -> RoutineGuard<'_, 'a> {
        self.routines.push(frame);
        RoutineGuard { context: self }
    }

    pub fn convert_expression(&mut self, expression: &vb::Expression) -> ConversionResult<cs::Expression> {
        let converter = self.expressions;
        converter.convert_expression(expression, self)
    }

    pub fn convert_optional_expression(
        &mut self,
        expression: Option<&vb::Expression>,
    ) -> ConversionResult<Option<cs::Expression>> {
        expression.map(|e| self.convert_expression(e)).transpose()
    }

    pub fn convert_arguments(&mut self, arguments: &[vb::Argument]) -> ConversionResult<Vec<cs::Argument>> {
        let converter = self.expressions;
        converter.convert_arguments(arguments, self)
    }

    pub fn convert_type(&self, type_name: &vb::TypeName) -> cs::TypeSyntax {
        self.expressions.convert_type(type_name)
    }

    /// One declaration per declared name, in source order
    pub fn split_declarator(
        &mut self,
        declarator: &vb::VariableDeclarator,
    ) -> ConversionResult<Vec<(String, cs::VariableDeclaration)>> {
        let splitter = self.declarations;
        splitter.split_declarator(declarator, self)
    }

    pub fn convert_catch(&mut self, block: &vb::CatchBlock) -> ConversionResult<cs::CatchClause> {
        let converter = self.clauses;
        converter.convert_catch(block, self)
    }

    pub fn convert_finally(&mut self, block: &vb::FinallyBlock) -> ConversionResult<cs::FinallyClause> {
        let converter = self.clauses;
        converter.convert_finally(block, self)
    }
}

/// Keeps a With-block temporary on the stack while the block body converts
pub struct WithBlockGuard<'c, 'a> {
    context: &'c mut ConversionContext<'a>,
}

impl<'a> Deref for WithBlockGuard<'_, 'a> {
    type Target = ConversionContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for WithBlockGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for WithBlockGuard<'_, '_> {
    fn drop(&mut self) {
        self.context.with_block_names.pop();
    }
}

/// Keeps a routine frame on the stack while its body converts
pub struct RoutineGuard<'c, 'a> {
    context: &'c mut ConversionContext<'a>,
}

impl<'a> Deref for RoutineGuard<'_, 'a> {
    type Target = ConversionContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for RoutineGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for RoutineGuard<'_, '_> {
    fn drop(&mut self) {
        self.context.routines.pop();
    }
}
