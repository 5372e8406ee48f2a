//! Statement builder for the target tree
//!
//! Helpers for the statement shapes the lowering synthesizes itself (guards,
//! temporaries, array copies) rather than mapping 1:1 from the source.

use super::ast::{
    Expression, Literal, Statement, StatementKind, TypeSyntax, VariableDeclaration,
};
use oxc_syntax::operator::{AssignmentOperator, BinaryOperator};

/// Builder for target statements
#[derive(Debug, Default, Clone, Copy)]
pub struct StatementBuilder;

impl StatementBuilder {
    pub fn new() -> Self {
        Self
    }

    /// `expression;`
    pub fn create_expression_statement(&self, expression: Expression) -> Statement {
        Statement::new(StatementKind::Expression(expression))
    }

    /// `T name = init;`
    pub fn create_variable_declaration(
        &self,
        type_syntax: TypeSyntax,
        name: &str,
        initializer: Option<Expression>,
    ) -> Statement {
        Statement::new(StatementKind::LocalDeclaration {
            modifiers: Vec::new(),
            declaration: VariableDeclaration::single(type_syntax, name, initializer),
        })
    }

    /// `target op= value;`
    pub fn create_assignment_statement(
        &self,
        operator: AssignmentOperator,
        target: Expression,
        value: Expression,
    ) -> Statement {
        self.create_expression_statement(Expression::assign(operator, target, value))
    }

    pub fn create_return_statement(&self, value: Option<Expression>) -> Statement {
        Statement::new(StatementKind::Return(value))
    }

    pub fn create_throw_statement(&self, value: Option<Expression>) -> Statement {
        Statement::new(StatementKind::Throw(value))
    }

    pub fn create_break_statement(&self) -> Statement {
        Statement::new(StatementKind::Break)
    }

    pub fn create_block_statement(&self, statements: Vec<Statement>) -> Statement {
        Statement::new(StatementKind::Block(statements))
    }

    pub fn create_if_statement(
        &self,
        condition: Expression,
        then_branch: Statement,
        else_branch: Option<Statement>,
    ) -> Statement {
        Statement::new(StatementKind::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }

    /// `target = new T[sizes];`
    pub fn create_array_allocation(
        &self,
        target: Expression,
        element_type: TypeSyntax,
        sizes: Vec<Expression>,
    ) -> Statement {
        self.create_assignment_statement(
            AssignmentOperator::Assign,
            target,
            Expression::ArrayCreation {
                element_type,
                sizes,
            },
        )
    }

    /// `if (value != null) body`
    pub fn create_not_null_guard(&self, value: Expression, body: Statement) -> Statement {
        let condition = Expression::binary(
            BinaryOperator::Inequality,
            value,
            Expression::Literal(Literal::Null),
        );
        self.create_if_statement(condition, body, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_variable_declaration() {
        let builder = StatementBuilder::new();
        let statement = builder.create_variable_declaration(
            TypeSyntax::Var,
            "withBlock",
            Some(Expression::identifier("form")),
        );

        match statement.kind {
            StatementKind::LocalDeclaration { declaration, .. } => {
                assert_eq!(declaration.type_syntax, TypeSyntax::Var);
                assert_eq!(declaration.variables.len(), 1);
                assert_eq!(declaration.variables[0].name, "withBlock");
            }
            other => panic!("expected a declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_create_not_null_guard() {
        let builder = StatementBuilder::new();
        let guard = builder.create_not_null_guard(
            Expression::identifier("oldArr"),
            builder.create_break_statement(),
        );

        match guard.kind {
            StatementKind::If {
                condition,
                else_branch,
                ..
            } => {
                assert!(else_branch.is_none());
                assert!(matches!(
                    condition,
                    Expression::Binary {
                        operator: BinaryOperator::Inequality,
                        ..
                    }
                ));
            }
            other => panic!("expected an if statement, got {:?}", other),
        }
    }
}
