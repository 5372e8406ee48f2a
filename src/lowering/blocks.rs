//! `With`, `Try`, `SyncLock` and `Using` blocks

use super::block_unpacking::{unpack_block, UnpackPolicy};
use super::context::ConversionContext;
use super::names::unique_name_in_scope;
use super::{convert_statement_list, ConversionError, ConversionResult};
use crate::cs::{Statement, StatementKind, TypeSyntax};
use crate::vb::{StatementNode, SyncLockBlock, TryBlock, UsingBlock, WithBlock};

/// `With e` evaluates `e` once into a temporary that `.Member` accesses in the
/// body resolve against
pub fn lower_with(
    node: &StatementNode,
    block: &WithBlock,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    // Converted before the new temporary is pushed: `.Member` here belongs to any enclosing With
    let expression = ctx.convert_expression(&block.expression)?;
    let name = unique_name_in_scope(node, "withBlock", ctx);
    let declaration = ctx
        .builder
        .create_variable_declaration(TypeSyntax::Var, &name, Some(expression));

    let mut scope = ctx.enter_with_block(name);
    let mut statements = vec![declaration];
    statements.extend(convert_statement_list(&block.statements, &mut scope)?);
    Ok(vec![scope.builder.create_block_statement(statements)])
}

pub fn lower_try(block: &TryBlock, ctx: &mut ConversionContext<'_>) -> ConversionResult<Vec<Statement>> {
    let body = convert_statement_list(&block.statements, ctx)?;
    let catches = block
        .catch_blocks
        .iter()
        .map(|catch| ctx.convert_catch(catch))
        .collect::<ConversionResult<Vec<_>>>()?;
    let finally = block
        .finally_block
        .as_ref()
        .map(|finally| ctx.convert_finally(finally))
        .transpose()?;

    Ok(vec![Statement::new(StatementKind::Try {
        block: body,
        catches,
        finally,
    })])
}

pub fn lower_sync_lock(
    block: &SyncLockBlock,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let expression = ctx.convert_expression(&block.expression)?;
    let body = unpack_block(
        convert_statement_list(&block.statements, ctx)?,
        UnpackPolicy::NonNested,
    );
    Ok(vec![Statement::new(StatementKind::Lock {
        expression,
        body: Box::new(body),
    })])
}

/// `Using a As New A(), b As New B()` nests one `using` per declared name,
/// outermost first
pub fn lower_using(block: &UsingBlock, ctx: &mut ConversionContext<'_>) -> ConversionResult<Vec<Statement>> {
    if let Some(expression) = &block.expression {
        let expression = ctx.convert_expression(expression)?;
        // Lets consecutive `using`s stack without extra indentation
        let body = unpack_block(
            convert_statement_list(&block.statements, ctx)?,
            UnpackPolicy::PossiblyNested,
        );
        return Ok(vec![Statement::new(StatementKind::Using {
            declaration: None,
            expression: Some(expression),
            body: Box::new(body),
        })]);
    }

    if block.variables.is_empty() {
        return Err(ConversionError::unsupported(
            "Using",
            "neither a resource expression nor resource variables",
        ));
    }

    let mut declarations = Vec::new();
    for declarator in &block.variables {
        declarations.extend(
            ctx.split_declarator(declarator)?
                .into_iter()
                .map(|(_, declaration)| declaration),
        );
    }

    let body = convert_statement_list(&block.statements, ctx)?;
    let mut statement = ctx.builder.create_block_statement(body);
    for declaration in declarations.into_iter().rev() {
        statement = Statement::new(StatementKind::Using {
            declaration: Some(declaration),
            expression: None,
            body: Box::new(statement),
        });
    }
    Ok(vec![statement])
}
