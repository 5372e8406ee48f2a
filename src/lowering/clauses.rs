//! Catch and finally clause conversion

use super::context::ConversionContext;
use super::expressions::escape_identifier;
use super::{convert_statement_list, ConversionResult};
use crate::cs;
use crate::vb::{CatchBlock, FinallyBlock};

pub static DEFAULT_CATCH_FINALLY_CONVERTER: DefaultCatchFinallyConverter =
    DefaultCatchFinallyConverter;

/// Converts the clauses of a `Try` block as whole units
pub trait CatchFinallyConverter: Send + Sync {
    fn convert_catch(
        &self,
        block: &CatchBlock,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::CatchClause>;

    fn convert_finally(
        &self,
        block: &FinallyBlock,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::FinallyClause>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCatchFinallyConverter;

impl CatchFinallyConverter for DefaultCatchFinallyConverter {
    fn convert_catch(
        &self,
        block: &CatchBlock,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::CatchClause> {
        // `Catch ex` without `As` catches everything, which C# spells `Exception`
        let exception_type = match (&block.type_name, &block.variable) {
            (Some(type_name), _) => Some(ctx.convert_type(type_name)),
            (None, Some(_)) => Some(cs::TypeSyntax::named("Exception")),
            (None, None) => None,
        };
        let identifier = block.variable.as_deref().map(escape_identifier);
        let filter = ctx.convert_optional_expression(block.when.as_ref())?;

        Ok(cs::CatchClause {
            exception_type,
            identifier,
            filter,
            block: convert_statement_list(&block.statements, ctx)?,
        })
    }

    fn convert_finally(
        &self,
        block: &FinallyBlock,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::FinallyClause> {
        Ok(cs::FinallyClause {
            block: convert_statement_list(&block.statements, ctx)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::SymbolTable;
    use crate::vb::{Expression, StatementKind, StatementNode, TypeName};

    #[test]
    fn test_untyped_catch_variable_catches_exception() {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        let block = CatchBlock {
            variable: Some("ex".to_string()),
            type_name: None,
            when: None,
            statements: vec![StatementNode::new(StatementKind::Throw { expression: None })],
        };

        let clause = ctx.convert_catch(&block).unwrap();
        assert_eq!(clause.exception_type, Some(cs::TypeSyntax::named("Exception")));
        assert_eq!(clause.identifier.as_deref(), Some("ex"));
        assert_eq!(clause.block.len(), 1);
    }

    #[test]
    fn test_catch_filter_is_converted() {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        let block = CatchBlock {
            variable: Some("e".to_string()),
            type_name: Some(TypeName::simple("IOException")),
            when: Some(Expression::identifier("retrying")),
            statements: vec![],
        };

        let clause = ctx.convert_catch(&block).unwrap();
        assert_eq!(clause.exception_type, Some(cs::TypeSyntax::named("IOException")));
        assert_eq!(clause.filter, Some(cs::Expression::identifier("retrying")));
    }
}
