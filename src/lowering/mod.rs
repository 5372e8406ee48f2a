//! Statement lowering
//!
//! Converts each source statement node into zero or more target statements.
//! Every conversion, at every nesting depth, goes through [`convert_statement`],
//! which lowers the node and then moves the node's comments onto the last
//! statement it produced.

pub mod block_unpacking;
pub mod clauses;
pub mod context;
pub mod declarations;
pub mod expressions;
pub mod names;
pub mod trivia;

mod arrays;
mod blocks;
mod conditionals;
mod loops;
mod select_case;
mod simple;

pub use block_unpacking::{unpack_block, UnpackPolicy};
pub use clauses::{CatchFinallyConverter, DefaultCatchFinallyConverter};
pub use context::{ConversionContext, RoutineFrame, RoutineGuard, WithBlockGuard};
pub use declarations::{DeclarationSplitter, DefaultDeclarationSplitter};
pub use expressions::{ExpressionConverter, SyntacticExpressionConverter};

use crate::cs::Statement;
use crate::vb::{StatementKind, StatementNode};
use log::debug;

/// Longest source snippet quoted verbatim in an error message
const SNIPPET_LIMIT: usize = 15;
const SNIPPET_KEEP: usize = 12;

/// Errors that abort conversion of the enclosing routine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    #[error("{kind} not implemented - cannot convert {snippet}")]
    Unimplemented { kind: String, snippet: String },
    #[error("{construct} is not supported: {reason}")]
    Unsupported { construct: String, reason: String },
    /// The oracle had no answer for a query the lowering cannot do without
    #[error("Missing semantic information: {0}")]
    MissingSemantics(String),
}

impl ConversionError {
    /// Unimplemented error quoting at most a short prefix of the source text
    pub fn unimplemented(kind: impl Into<String>, source_text: &str) -> Self {
        let snippet = if source_text.chars().count() > SNIPPET_LIMIT {
            let prefix: String = source_text.chars().take(SNIPPET_KEEP).collect();
            format!("{}...", prefix)
        } else {
            source_text.to_string()
        };
        ConversionError::Unimplemented {
            kind: kind.into(),
            snippet,
        }
    }

    pub fn unsupported(construct: impl Into<String>, reason: impl Into<String>) -> Self {
        ConversionError::Unsupported {
            construct: construct.into(),
            reason: reason.into(),
        }
    }
}

pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convert one statement node, keeping its comments on the last produced statement
pub fn convert_statement(
    node: &StatementNode,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let statements = lower_statement(node, ctx)?;
    Ok(trivia::reattach_trivia(node, statements))
}

/// Convert a statement list, flattening the results in source order
pub fn convert_statement_list(
    nodes: &[StatementNode],
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let mut statements = Vec::with_capacity(nodes.len());
    for node in nodes {
        statements.extend(convert_statement(node, ctx)?);
    }
    Ok(statements)
}

fn lower_statement(
    node: &StatementNode,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    debug!(
        "Lowering {} statement at {}",
        node.kind.name(),
        node.span.start
    );

    match &node.kind {
        StatementKind::LocalDeclaration(declaration) => {
            simple::lower_local_declaration(declaration, ctx)
        }
        StatementKind::Assignment(assignment) => simple::lower_assignment(assignment, ctx),
        StatementKind::Expression { expression } => simple::lower_expression(expression, ctx),
        StatementKind::Call { invocation } => simple::lower_expression(invocation, ctx),
        StatementKind::SingleLineIf(statement) => conditionals::lower_single_line_if(statement, ctx),
        StatementKind::MultiLineIf(block) => conditionals::lower_multi_line_if(block, ctx),
        StatementKind::For(block) => loops::lower_for(node, block, ctx),
        StatementKind::ForEach(block) => loops::lower_for_each(block, ctx),
        StatementKind::SelectCase(block) => select_case::lower_select_case(node, block, ctx),
        StatementKind::With(block) => blocks::lower_with(node, block, ctx),
        StatementKind::Try(block) => blocks::lower_try(block, ctx),
        StatementKind::SyncLock(block) => blocks::lower_sync_lock(block, ctx),
        StatementKind::Using(block) => blocks::lower_using(block, ctx),
        StatementKind::While(block) => loops::lower_while(block, ctx),
        StatementKind::DoLoop(block) => loops::lower_do_loop(block, ctx),
        StatementKind::Label { name } => Ok(vec![simple::lower_label(name)]),
        StatementKind::GoTo { label } => Ok(vec![simple::lower_goto(label)]),
        StatementKind::Throw { expression } => simple::lower_throw(expression.as_ref(), ctx),
        StatementKind::Return { expression } => simple::lower_return(expression.as_ref(), ctx),
        StatementKind::Continue => Ok(vec![Statement::new(crate::cs::StatementKind::Continue)]),
        StatementKind::Yield { expression } => simple::lower_yield(expression, ctx),
        StatementKind::Exit { block } => simple::lower_exit(*block, ctx),
        StatementKind::RaiseEvent { event, arguments } => {
            simple::lower_raise_event(event, arguments, ctx)
        }
        StatementKind::AddRemoveHandler {
            action,
            event,
            delegate,
        } => simple::lower_add_remove_handler(*action, event, delegate, ctx),
        StatementKind::Erase { targets } => arrays::lower_erase(targets, ctx),
        StatementKind::ReDim(statement) => arrays::lower_redim(node, statement, ctx),
        StatementKind::StopOrEnd { keyword } => simple::lower_stop_or_end(node, keyword, ctx),
        StatementKind::Unrecognized { kind } => {
            Err(ConversionError::unimplemented(kind.as_str(), &node.text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::SymbolTable;

    #[test]
    fn test_unimplemented_snippet_is_truncated() {
        let error = ConversionError::unimplemented("OnErrorGoTo", "On Error GoTo Handler");
        assert_eq!(
            error,
            ConversionError::Unimplemented {
                kind: "OnErrorGoTo".to_string(),
                snippet: "On Error GoT...".to_string(),
            }
        );

        let short = ConversionError::unimplemented("Resume", "Resume Next");
        assert_eq!(
            short.to_string(),
            "Resume not implemented - cannot convert Resume Next"
        );
    }

    #[test]
    fn test_unrecognized_kind_is_fatal() {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        let node = StatementNode::new(StatementKind::Unrecognized {
            kind: "OnErrorResumeNext".to_string(),
        })
        .with_text("On Error Resume Next");

        let error = convert_statement(&node, &mut ctx).unwrap_err();
        assert!(matches!(error, ConversionError::Unimplemented { ref kind, .. } if kind == "OnErrorResumeNext"));
    }

    #[test]
    fn test_statement_list_preserves_order() {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        let nodes = vec![
            StatementNode::new(StatementKind::Label {
                name: "first".to_string(),
            }),
            StatementNode::new(StatementKind::Continue),
            StatementNode::new(StatementKind::GoTo {
                label: "first".to_string(),
            }),
        ];

        let statements = convert_statement_list(&nodes, &mut ctx).unwrap();
        assert_eq!(statements.len(), 3);
        assert!(matches!(
            statements[0].kind,
            crate::cs::StatementKind::Labeled { .. }
        ));
        assert!(matches!(statements[1].kind, crate::cs::StatementKind::Continue));
        assert!(matches!(statements[2].kind, crate::cs::StatementKind::Goto(_)));
    }
}
