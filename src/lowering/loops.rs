//! Loops
//!
//! `For` becomes a C# `for` with an explicit bound test, `For Each` a
//! `foreach`, and the `Do` family `while` or `do`/`while` depending on where
//! the condition sits.

use super::block_unpacking::{unpack_block, UnpackPolicy};
use super::context::ConversionContext;
use super::{convert_statement_list, ConversionError, ConversionResult};
use crate::cs::{self, Statement, StatementKind};
use crate::vb::{
    self, ControlVariable, DoLoopBlock, ForBlock, ForEachBlock, LoopCondition, LoopConditionKind,
    StatementNode, UnaryOperator, WhileBlock,
};
use log::debug;
use oxc_syntax::operator::{AssignmentOperator, BinaryOperator, UpdateOperator};

fn convert_body(
    statements: &[StatementNode],
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Statement> {
    let converted = convert_statement_list(statements, ctx)?;
    Ok(unpack_block(converted, UnpackPolicy::NonNested))
}

/// A step counts down when it is written as a negation or a negative literal
fn is_descending(step: &vb::Expression) -> bool {
    match step.skip_parens() {
        vb::Expression::Unary {
            operator: UnaryOperator::Minus,
            ..
        } => true,
        vb::Expression::Literal {
            value: vb::Literal::Integer(n),
        } => *n < 0,
        vb::Expression::Literal {
            value: vb::Literal::Double(n),
        } => *n < 0.0,
        _ => false,
    }
}

pub fn lower_for(
    node: &StatementNode,
    block: &ForBlock,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let start = ctx.convert_expression(&block.from)?;

    let (control, declaration, initializers) = match &block.control_variable {
        ControlVariable::Declarator { declarator } => {
            let (_, mut declaration) = ctx
                .split_declarator(declarator)?
                .into_iter()
                .next()
                .ok_or_else(|| {
                    ConversionError::unsupported("For", "control variable declares no name")
                })?;
            if declarator.as_clause.is_none() {
                declaration.type_syntax = cs::TypeSyntax::Var;
            }
            let variable = &mut declaration.variables[0];
            variable.initializer = Some(start);
            let control = cs::Expression::identifier(variable.name.as_str());
            (control, Some(declaration), Vec::new())
        }
        ControlVariable::Expression { expression } => {
            let control = ctx.convert_expression(expression)?;
            let is_bound = expression
                .as_identifier()
                .map_or(true, |name| ctx.oracle.symbol_at(node.span.start, name).is_some());
            let implicit_name = match &control {
                cs::Expression::Identifier(name) if !is_bound => Some(name.clone()),
                _ => None,
            };
            match implicit_name {
                Some(name) => {
                    debug!("Declaring implicit loop variable `{}`", name);
                    let declaration =
                        cs::VariableDeclaration::single(cs::TypeSyntax::Var, name, Some(start));
                    (control, Some(declaration), Vec::new())
                }
                None => {
                    let initializer =
                        cs::Expression::assign(AssignmentOperator::Assign, control.clone(), start);
                    (control, None, vec![initializer])
                }
            }
        }
    };

    let limit = ctx.convert_expression(&block.to)?;
    let comparison = match &block.step {
        Some(step) if is_descending(step) => BinaryOperator::GreaterEqualThan,
        _ => BinaryOperator::LessEqualThan,
    };
    let condition = cs::Expression::binary(comparison, control.clone(), limit);

    let incrementor = match &block.step {
        Some(step) => {
            let step = ctx.convert_expression(step)?;
            cs::Expression::assign(AssignmentOperator::Addition, control, step)
        }
        None => cs::Expression::PostfixUpdate {
            operator: UpdateOperator::Increment,
            operand: Box::new(control),
        },
    };

    let body = convert_body(&block.statements, ctx)?;
    Ok(vec![Statement::new(StatementKind::For {
        declaration,
        initializers,
        condition,
        incrementors: vec![incrementor],
        body: Box::new(body),
    })])
}

pub fn lower_for_each(
    block: &ForEachBlock,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let (type_syntax, identifier) = match &block.control_variable {
        ControlVariable::Declarator { declarator } => {
            let (_, declaration) = ctx
                .split_declarator(declarator)?
                .into_iter()
                .next()
                .ok_or_else(|| {
                    ConversionError::unsupported("For Each", "control variable declares no name")
                })?;
            let type_syntax = match declarator.as_clause {
                Some(_) => declaration.type_syntax,
                None => cs::TypeSyntax::Var,
            };
            let name = declaration.variables[0].name.clone();
            (type_syntax, name)
        }
        ControlVariable::Expression { expression } => match ctx.convert_expression(expression)? {
            cs::Expression::Identifier(name) => (cs::TypeSyntax::Var, name),
            _ => {
                return Err(ConversionError::unsupported(
                    "For Each",
                    format!("control variable `{}` is not a simple name", expression),
                ))
            }
        },
    };

    let expression = ctx.convert_expression(&block.expression)?;
    let body = convert_body(&block.statements, ctx)?;
    Ok(vec![Statement::new(StatementKind::ForEach {
        type_syntax,
        identifier,
        expression,
        body: Box::new(body),
    })])
}

pub fn lower_while(
    block: &WhileBlock,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let condition = ctx.convert_expression(&block.condition)?;
    let body = convert_body(&block.statements, ctx)?;
    Ok(vec![Statement::new(StatementKind::While {
        condition,
        body: Box::new(body),
    })])
}

/// `While c` keeps the condition, `Until c` negates it
fn loop_condition(
    clause: &LoopCondition,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<cs::Expression> {
    let condition = ctx.convert_expression(&clause.condition)?;
    Ok(match clause.kind {
        LoopConditionKind::While => condition,
        LoopConditionKind::Until => cs::Expression::logical_not(condition),
    })
}

pub fn lower_do_loop(
    block: &DoLoopBlock,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    match (&block.do_condition, &block.loop_condition) {
        (Some(clause), None) => {
            let condition = loop_condition(clause, ctx)?;
            let body = convert_body(&block.statements, ctx)?;
            Ok(vec![Statement::new(StatementKind::While {
                condition,
                body: Box::new(body),
            })])
        }
        (None, Some(clause)) => {
            let body = convert_body(&block.statements, ctx)?;
            let condition = loop_condition(clause, ctx)?;
            Ok(vec![Statement::new(StatementKind::Do {
                body: Box::new(body),
                condition,
            })])
        }
        (Some(_), Some(_)) => Err(ConversionError::unsupported(
            "Do ... Loop",
            "a loop with both a Do and a Loop condition",
        )),
        (None, None) => Err(ConversionError::unsupported(
            "Do ... Loop",
            "a loop with neither a Do nor a Loop condition",
        )),
    }
}
