//! Lowering of statements without nested statement lists

use super::context::ConversionContext;
use super::expressions::type_syntax_from_info;
use super::{ConversionError, ConversionResult};
use crate::cs::{self, Statement, StatementKind};
use crate::vb::{
    self, AssignmentStatement, ExitKind, HandlerAction, LocalDeclarationStatement, LocalModifier,
    RoutineKind, StatementNode,
};
use log::{debug, warn};
use oxc_syntax::operator::AssignmentOperator;

pub fn lower_local_declaration(
    declaration: &LocalDeclarationStatement,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let mut modifiers = Vec::new();
    for modifier in &declaration.modifiers {
        match modifier {
            LocalModifier::Const => modifiers.push(cs::LocalModifier::Const),
            LocalModifier::Dim => {}
            LocalModifier::Static => {
                warn!("Static local lowered as an ordinary local; its value no longer persists across calls")
            }
        }
    }

    let mut statements = Vec::new();
    for declarator in &declaration.declarators {
        for (_, split) in ctx.split_declarator(declarator)? {
            statements.push(Statement::new(StatementKind::LocalDeclaration {
                modifiers: modifiers.clone(),
                declaration: split,
            }));
        }
    }
    Ok(statements)
}

fn assignment_operator(operator: vb::AssignmentOperator) -> ConversionResult<AssignmentOperator> {
    Ok(match operator {
        vb::AssignmentOperator::Assign => AssignmentOperator::Assign,
        vb::AssignmentOperator::AddAssign => AssignmentOperator::Addition,
        vb::AssignmentOperator::SubtractAssign => AssignmentOperator::Subtraction,
        vb::AssignmentOperator::MultiplyAssign => AssignmentOperator::Multiplication,
        vb::AssignmentOperator::DivideAssign => AssignmentOperator::Division,
        vb::AssignmentOperator::IntegerDivideAssign => {
            debug!("Integer division assignment lowered to `/=`");
            AssignmentOperator::Division
        }
        vb::AssignmentOperator::ConcatenateAssign => AssignmentOperator::Addition,
        vb::AssignmentOperator::LeftShiftAssign => AssignmentOperator::ShiftLeft,
        vb::AssignmentOperator::RightShiftAssign => AssignmentOperator::ShiftRight,
        vb::AssignmentOperator::PowerAssign => {
            return Err(ConversionError::unsupported(
                "`^=`",
                "C# has no compound power assignment",
            ))
        }
    })
}

pub fn lower_assignment(
    assignment: &AssignmentStatement,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let operator = assignment_operator(assignment.operator)?;
    let left = ctx.convert_expression(&assignment.left)?;
    let right = ctx.convert_expression(&assignment.right)?;
    Ok(vec![ctx
        .builder
        .create_assignment_statement(operator, left, right)])
}

/// Expression statements and `Call` statements
pub fn lower_expression(
    expression: &vb::Expression,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let converted = ctx.convert_expression(expression)?;
    Ok(vec![ctx.builder.create_expression_statement(converted)])
}

/// C# labels cannot start with a digit; VB line numbers can
fn label_name(name: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name.to_string()
    }
}

pub fn lower_label(name: &str) -> Statement {
    Statement::new(StatementKind::Labeled {
        label: label_name(name),
        statement: Box::new(Statement::new(StatementKind::Empty)),
    })
}

pub fn lower_goto(label: &str) -> Statement {
    Statement::new(StatementKind::Goto(label_name(label)))
}

pub fn lower_throw(
    expression: Option<&vb::Expression>,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let value = ctx.convert_optional_expression(expression)?;
    Ok(vec![ctx.builder.create_throw_statement(value)])
}

pub fn lower_return(
    expression: Option<&vb::Expression>,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    if ctx.is_iterator() {
        return Ok(vec![Statement::new(StatementKind::YieldBreak)]);
    }
    let value = ctx.convert_optional_expression(expression)?;
    Ok(vec![ctx.builder.create_return_statement(value)])
}

pub fn lower_yield(
    expression: &vb::Expression,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let value = ctx.convert_expression(expression)?;
    Ok(vec![Statement::new(StatementKind::YieldReturn(value))])
}

pub fn lower_exit(kind: ExitKind, ctx: &mut ConversionContext<'_>) -> ConversionResult<Vec<Statement>> {
    match kind {
        ExitKind::Sub => Ok(vec![ctx.builder.create_return_statement(None)]),
        ExitKind::Function | ExitKind::Property => {
            if ctx.is_iterator() {
                return Ok(vec![Statement::new(StatementKind::YieldBreak)]);
            }
            let value = exit_value(ctx)?;
            Ok(vec![ctx.builder.create_return_statement(value)])
        }
        ExitKind::Do | ExitKind::For | ExitKind::While | ExitKind::Select => {
            Ok(vec![ctx.builder.create_break_statement()])
        }
        ExitKind::Try => Err(ConversionError::unsupported(
            "Exit Try",
            "C# has no statement that leaves a try block",
        )),
    }
}

/// Value an early `Exit Function` returns: the default of the declared type
fn exit_value(ctx: &ConversionContext<'_>) -> ConversionResult<Option<cs::Expression>> {
    let routine = match ctx.enclosing_routine() {
        Some(routine) if routine.kind == RoutineKind::Function => routine,
        _ => return Ok(None),
    };
    let return_type = match ctx.oracle.return_type_of(routine.id) {
        Some(return_type) => return_type,
        None => return Ok(None),
    };

    if return_type.is_reference_type {
        Ok(Some(cs::Expression::null()))
    } else if return_type.can_be_referenced_by_name {
        Ok(Some(cs::Expression::Default(type_syntax_from_info(
            &return_type,
        ))))
    } else {
        Err(ConversionError::unsupported(
            "Exit Function",
            format!("return type `{}` cannot be named in C#", return_type.name),
        ))
    }
}

/// `RaiseEvent E(args)` becomes `E?.Invoke(args)`
pub fn lower_raise_event(
    event: &vb::Expression,
    arguments: &[vb::Argument],
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let target = ctx.convert_expression(event)?;
    let arguments = ctx.convert_arguments(arguments)?;
    let invocation = cs::Expression::ConditionalAccess {
        target: Box::new(target),
        when_not_null: Box::new(cs::Expression::Invocation {
            target: Box::new(cs::Expression::MemberBinding("Invoke".to_string())),
            arguments,
        }),
    };
    Ok(vec![ctx.builder.create_expression_statement(invocation)])
}

pub fn lower_add_remove_handler(
    action: HandlerAction,
    event: &vb::Expression,
    delegate: &vb::Expression,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let operator = match action {
        HandlerAction::Add => AssignmentOperator::Addition,
        HandlerAction::Remove => AssignmentOperator::Subtraction,
    };
    let event = ctx.convert_expression(event)?;
    let delegate = ctx.convert_expression(delegate)?;
    Ok(vec![ctx
        .builder
        .create_assignment_statement(operator, event, delegate)])
}

pub fn lower_stop_or_end(
    node: &StatementNode,
    keyword: &str,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let call = match keyword.to_ascii_lowercase().as_str() {
        "stop" => cs::Expression::invoke(
            cs::Expression::identifier("System.Diagnostics.Debugger.Break"),
            vec![],
        ),
        "end" => cs::Expression::invoke(
            cs::Expression::identifier("System.Environment.Exit"),
            vec![cs::Expression::integer(0)],
        ),
        _ => return Err(ConversionError::unimplemented("StopOrEnd", &node.text)),
    };
    Ok(vec![ctx.builder.create_expression_statement(call)])
}
