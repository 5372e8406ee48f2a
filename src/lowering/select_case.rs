//! `Select Case`
//!
//! Simple clauses become `case` labels. Relational and range clauses have no
//! constant to switch on, so they become `case object _ when ...` guards that
//! test the subject directly.

use super::context::ConversionContext;
use super::{convert_statement_list, ConversionError, ConversionResult};
use crate::cs::{self, Statement, StatementKind, SwitchLabel, SwitchSection};
use crate::vb::{CaseClause, RelationalOperator, SelectBlock, StatementNode};
use oxc_syntax::operator::{BinaryOperator, LogicalOperator};

fn relational_operator(operator: RelationalOperator) -> BinaryOperator {
    match operator {
        RelationalOperator::Equals => BinaryOperator::Equality,
        RelationalOperator::NotEquals => BinaryOperator::Inequality,
        RelationalOperator::LessThan => BinaryOperator::LessThan,
        RelationalOperator::LessThanOrEqual => BinaryOperator::LessEqualThan,
        RelationalOperator::GreaterThan => BinaryOperator::GreaterThan,
        RelationalOperator::GreaterThanOrEqual => BinaryOperator::GreaterEqualThan,
    }
}

fn convert_label(
    node: &StatementNode,
    clause: &CaseClause,
    subject: &cs::Expression,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<SwitchLabel> {
    Ok(match clause {
        CaseClause::Simple { value } => SwitchLabel::Case(ctx.convert_expression(value)?),
        CaseClause::Else => SwitchLabel::Default,
        CaseClause::Relational { operator, value } => SwitchLabel::Guarded {
            guard: cs::Expression::binary(
                relational_operator(*operator),
                subject.clone(),
                ctx.convert_expression(value)?,
            ),
        },
        CaseClause::Range { lower, upper } => {
            let lower = cs::Expression::binary(
                BinaryOperator::LessEqualThan,
                ctx.convert_expression(lower)?,
                subject.clone(),
            );
            let upper = cs::Expression::binary(
                BinaryOperator::LessEqualThan,
                subject.clone(),
                ctx.convert_expression(upper)?,
            );
            SwitchLabel::Guarded {
                guard: cs::Expression::logical(LogicalOperator::And, lower, upper),
            }
        }
        CaseClause::Unrecognized { .. } => {
            return Err(ConversionError::unimplemented(clause.name(), &node.text))
        }
    })
}

pub fn lower_select_case(
    node: &StatementNode,
    block: &SelectBlock,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let subject = ctx.convert_expression(&block.expression)?;

    let mut sections = Vec::with_capacity(block.case_blocks.len());
    for case_block in &block.case_blocks {
        let labels = case_block
            .clauses
            .iter()
            .map(|clause| convert_label(node, clause, &subject, ctx))
            .collect::<ConversionResult<Vec<_>>>()?;

        // C# forbids falling through to the next section
        let mut statements = convert_statement_list(&case_block.statements, ctx)?;
        if !statements.last().is_some_and(Statement::is_return) {
            statements.push(ctx.builder.create_break_statement());
        }

        sections.push(SwitchSection {
            labels,
            statements: vec![ctx.builder.create_block_statement(statements)],
        });
    }

    Ok(vec![Statement::new(StatementKind::Switch {
        expression: subject,
        sections,
    })])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::codegen::CSharpWriter;
    use crate::lowering::convert_statement;
    use crate::semantics::SymbolTable;
    use crate::vb::{self, CaseBlock, StatementKind as VbKind};

    fn call(name: &str) -> StatementNode {
        StatementNode::new(VbKind::Call {
            invocation: vb::Expression::call(vb::Expression::identifier(name), vec![]),
        })
    }

    fn select(case_blocks: Vec<CaseBlock>) -> StatementNode {
        StatementNode::new(VbKind::SelectCase(SelectBlock {
            expression: vb::Expression::identifier("score"),
            case_blocks,
        }))
        .with_text("Select Case score")
    }

    fn render(node: &StatementNode) -> String {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        CSharpWriter::emit(&convert_statement(node, &mut ctx).unwrap())
    }

    #[test]
    fn test_simple_and_else_clauses() {
        let node = select(vec![
            CaseBlock {
                clauses: vec![
                    CaseClause::Simple {
                        value: vb::Expression::integer(1),
                    },
                    CaseClause::Simple {
                        value: vb::Expression::integer(2),
                    },
                ],
                statements: vec![call("Low")],
            },
            CaseBlock {
                clauses: vec![CaseClause::Else],
                statements: vec![StatementNode::new(VbKind::Return {
                    expression: Some(vb::Expression::integer(0)),
                })],
            },
        ]);

        assert_eq!(
            render(&node),
            "switch (score)\n{\n    case 1:\n    case 2:\n    {\n        Low();\n        break;\n    }\n    default:\n    {\n        return 0;\n    }\n}\n"
        );
    }

    #[test]
    fn test_relational_and_range_clauses_become_guards() {
        let node = select(vec![CaseBlock {
            clauses: vec![
                CaseClause::Relational {
                    operator: RelationalOperator::GreaterThan,
                    value: vb::Expression::integer(90),
                },
                CaseClause::Range {
                    lower: vb::Expression::integer(10),
                    upper: vb::Expression::integer(20),
                },
            ],
            statements: vec![],
        }]);

        assert_eq!(
            render(&node),
            "switch (score)\n{\n    case object _ when score > 90:\n    case object _ when 10 <= score && score <= 20:\n    {\n        break;\n    }\n}\n"
        );
    }

    #[test]
    fn test_unknown_clause_is_unimplemented() {
        let node = select(vec![CaseBlock {
            clauses: vec![CaseClause::Unrecognized {
                kind: "Pattern".to_string(),
            }],
            statements: vec![],
        }]);
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);

        let error = convert_statement(&node, &mut ctx).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Pattern not implemented - cannot convert Select Case ..."
        );
    }
}
