//! `If` statements
//!
//! Both forms convert their parts in source order. `ElseIf` arms are then
//! folded from the back into a chain of nested `if`/`else` statements.

use super::block_unpacking::{unpack_block, UnpackPolicy};
use super::context::ConversionContext;
use super::{convert_statement_list, ConversionResult};
use crate::cs::Statement;
use crate::vb::{MultiLineIfBlock, SingleLineIfStatement, StatementNode};

fn convert_else(
    statements: Option<&Vec<StatementNode>>,
    policy: UnpackPolicy,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Option<Statement>> {
    match statements {
        Some(statements) => {
            let converted = convert_statement_list(statements, ctx)?;
            Ok(Some(unpack_block(converted, policy)))
        }
        None => Ok(None),
    }
}

pub fn lower_single_line_if(
    statement: &SingleLineIfStatement,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let condition = ctx.convert_expression(&statement.condition)?;
    let then_branch = unpack_block(
        convert_statement_list(&statement.statements, ctx)?,
        UnpackPolicy::NonNested,
    );
    let else_branch = convert_else(
        statement.else_statements.as_ref(),
        UnpackPolicy::NonNested,
        ctx,
    )?;

    Ok(vec![ctx
        .builder
        .create_if_statement(condition, then_branch, else_branch)])
}

pub fn lower_multi_line_if(
    block: &MultiLineIfBlock,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let condition = ctx.convert_expression(&block.condition)?;
    let then_branch = unpack_block(
        convert_statement_list(&block.statements, ctx)?,
        UnpackPolicy::NonNested,
    );

    let mut else_ifs = Vec::with_capacity(block.else_ifs.len());
    for else_if in &block.else_ifs {
        let condition = ctx.convert_expression(&else_if.condition)?;
        let body = unpack_block(
            convert_statement_list(&else_if.statements, ctx)?,
            UnpackPolicy::NonNested,
        );
        else_ifs.push((condition, body));
    }

    // The last arm of a full chain cannot capture a dangling else
    let mut else_branch = convert_else(
        block.else_statements.as_ref(),
        UnpackPolicy::PossiblyNested,
        ctx,
    )?;
    for (condition, body) in else_ifs.into_iter().rev() {
        else_branch = Some(ctx.builder.create_if_statement(condition, body, else_branch));
    }

    Ok(vec![ctx
        .builder
        .create_if_statement(condition, then_branch, else_branch)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::codegen::CSharpWriter;
    use crate::lowering::convert_statement;
    use crate::semantics::SymbolTable;
    use crate::vb::{self, BinaryOperator, ElseIfBlock, StatementKind};

    fn call(name: &str) -> StatementNode {
        StatementNode::new(StatementKind::Call {
            invocation: vb::Expression::call(vb::Expression::identifier(name), vec![]),
        })
    }

    fn render(node: &StatementNode) -> String {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        CSharpWriter::emit(&convert_statement(node, &mut ctx).unwrap())
    }

    #[test]
    fn test_single_line_if_with_else() {
        let node = StatementNode::new(StatementKind::SingleLineIf(SingleLineIfStatement {
            condition: vb::Expression::identifier("ready"),
            statements: vec![call("Start")],
            else_statements: Some(vec![call("Wait"), call("Retry")]),
        }));

        assert_eq!(
            render(&node),
            "if (ready)\n    Start();\nelse\n{\n    Wait();\n    Retry();\n}\n"
        );
    }

    #[test]
    fn test_single_line_else_keeps_braces_around_nested_if() {
        let inner = StatementNode::new(StatementKind::SingleLineIf(SingleLineIfStatement {
            condition: vb::Expression::identifier("retry"),
            statements: vec![call("Retry")],
            else_statements: None,
        }));
        let node = StatementNode::new(StatementKind::SingleLineIf(SingleLineIfStatement {
            condition: vb::Expression::identifier("ready"),
            statements: vec![call("Start")],
            else_statements: Some(vec![inner]),
        }));

        assert_eq!(
            render(&node),
            "if (ready)\n    Start();\nelse\n{\n    if (retry)\n        Retry();\n}\n"
        );
    }

    #[test]
    fn test_else_if_chain_is_flat() {
        let compare = |value| {
            vb::Expression::binary(
                BinaryOperator::Equals,
                vb::Expression::identifier("x"),
                vb::Expression::integer(value),
            )
        };
        let node = StatementNode::new(StatementKind::MultiLineIf(MultiLineIfBlock {
            condition: compare(1),
            statements: vec![call("One")],
            else_ifs: vec![
                ElseIfBlock {
                    condition: compare(2),
                    statements: vec![call("Two")],
                },
                ElseIfBlock {
                    condition: compare(3),
                    statements: vec![call("Three")],
                },
            ],
            else_statements: Some(vec![call("Other")]),
        }));

        assert_eq!(
            render(&node),
            "if (x == 1)\n    One();\n\
             else if (x == 2)\n    Two();\n\
             else if (x == 3)\n    Three();\n\
             else\n    Other();\n"
        );
    }

    #[test]
    fn test_nested_if_keeps_braces() {
        let inner = StatementNode::new(StatementKind::SingleLineIf(SingleLineIfStatement {
            condition: vb::Expression::identifier("b"),
            statements: vec![call("Inner")],
            else_statements: None,
        }));
        let node = StatementNode::new(StatementKind::MultiLineIf(MultiLineIfBlock {
            condition: vb::Expression::identifier("a"),
            statements: vec![inner],
            else_ifs: vec![],
            else_statements: Some(vec![call("Outer")]),
        }));

        assert_eq!(
            render(&node),
            "if (a)\n{\n    if (b)\n        Inner();\n}\nelse\n    Outer();\n"
        );
    }
}
