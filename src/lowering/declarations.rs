//! Declaration splitting
//!
//! A VB declarator can bind several names to one type (`Dim a, b As Integer`).
//! C# lowering wants one declaration per name, so every declarator goes through
//! a [`DeclarationSplitter`] first.

use super::arrays::array_length;
use super::context::ConversionContext;
use super::expressions::escape_identifier;
use super::ConversionResult;
use crate::cs;
use crate::vb::{AsClause, ModifiedIdentifier, VariableDeclarator};

pub static DEFAULT_DECLARATION_SPLITTER: DefaultDeclarationSplitter = DefaultDeclarationSplitter;

/// Splits one multi-name declarator into single-name declarations
pub trait DeclarationSplitter: Send + Sync {
    /// Ordered `(name, declaration)` pairs, one per declared name
    fn split_declarator(
        &self,
        declarator: &VariableDeclarator,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<Vec<(String, cs::VariableDeclaration)>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDeclarationSplitter;

impl DefaultDeclarationSplitter {
    fn declare_name(
        &self,
        name: &ModifiedIdentifier,
        declarator: &VariableDeclarator,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::VariableDeclaration> {
        let identifier = escape_identifier(&name.name);

        let (type_syntax, initializer) = match &declarator.as_clause {
            Some(AsClause::New {
                type_name,
                arguments,
            }) => {
                let type_syntax = ctx.convert_type(type_name);
                let creation = cs::Expression::ObjectCreation {
                    type_syntax: type_syntax.clone(),
                    arguments: ctx.convert_arguments(arguments)?,
                };
                (type_syntax, Some(creation))
            }
            Some(AsClause::Simple { type_name }) => {
                let mut element = ctx.convert_type(type_name);
                if name.nullable {
                    element = cs::TypeSyntax::Named(format!(
                        "{}?",
                        cs::codegen::type_text(&element)
                    ));
                }
                self.typed_declaration(element, name, declarator, ctx)?
            }
            None => match (&name.array_bounds, &declarator.initializer) {
                (Some(_), _) => {
                    self.typed_declaration(cs::TypeSyntax::named("object"), name, declarator, ctx)?
                }
                (None, Some(initializer)) => {
                    (cs::TypeSyntax::Var, Some(ctx.convert_expression(initializer)?))
                }
                (None, None) => (
                    cs::TypeSyntax::named("object"),
                    Some(cs::Expression::null()),
                ),
            },
        };

        Ok(cs::VariableDeclaration::single(type_syntax, identifier, initializer))
    }

    /// `T x = init`, `T[] x = new T[n]` or `T x = default(T)`
    fn typed_declaration(
        &self,
        element: cs::TypeSyntax,
        name: &ModifiedIdentifier,
        declarator: &VariableDeclarator,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<(cs::TypeSyntax, Option<cs::Expression>)> {
        let type_syntax = match &name.array_bounds {
            Some(bounds) => cs::TypeSyntax::array(element.clone(), bounds.len().max(1)),
            None => element.clone(),
        };

        let initializer = match (&declarator.initializer, &name.array_bounds) {
            (Some(initializer), _) => ctx.convert_expression(initializer)?,
            (None, Some(bounds)) if !bounds.is_empty() => cs::Expression::ArrayCreation {
                element_type: element,
                sizes: bounds
                    .iter()
                    .map(|bound| array_length(bound, ctx))
                    .collect::<ConversionResult<_>>()?,
            },
            (None, _) => cs::Expression::Default(type_syntax.clone()),
        };

        Ok((type_syntax, Some(initializer)))
    }
}

impl DeclarationSplitter for DefaultDeclarationSplitter {
    fn split_declarator(
        &self,
        declarator: &VariableDeclarator,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<Vec<(String, cs::VariableDeclaration)>> {
        declarator
            .names
            .iter()
            .map(|name| {
                let declaration = self.declare_name(name, declarator, ctx)?;
                Ok((name.name.clone(), declaration))
            })
            .collect()
    }
}
