//! Block unpacking
//!
//! Decides when a one-statement block can be written as the bare statement.

use crate::cs::{Statement, StatementKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnpackPolicy {
    /// Unpack only when the single statement has no statements below it.
    /// `if (a) { if (b) x(); } else y();` must keep its braces, or the `else`
    /// would bind to the inner `if`.
    NonNested,
    /// Unpack any single statement. Only for positions where the grammar
    /// leaves no ambiguity: stacked `using`s and the arms of an else-if chain.
    PossiblyNested,
}

/// Wrap `statements` in a block unless the policy allows the bare statement
pub fn unpack_block(mut statements: Vec<Statement>, policy: UnpackPolicy) -> Statement {
    let unpack = statements.len() == 1
        && match policy {
            UnpackPolicy::NonNested => !statements[0].has_descendant_statement(),
            UnpackPolicy::PossiblyNested => true,
        };

    match statements.pop() {
        Some(single) if unpack => single,
        Some(last) => {
            statements.push(last);
            Statement::new(StatementKind::Block(statements))
        }
        None => Statement::new(StatementKind::Block(statements)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::Expression;

    fn nested_if() -> Statement {
        Statement::new(StatementKind::If {
            condition: Expression::identifier("b"),
            then_branch: Box::new(Statement::new(StatementKind::Break)),
            else_branch: None,
        })
    }

    #[test]
    fn test_single_simple_statement_is_unpacked() {
        let statement = unpack_block(
            vec![Statement::new(StatementKind::Break)],
            UnpackPolicy::NonNested,
        );
        assert_eq!(statement.kind, StatementKind::Break);
    }

    #[test]
    fn test_nested_statement_keeps_block_unless_possibly_nested() {
        let kept = unpack_block(vec![nested_if()], UnpackPolicy::NonNested);
        assert!(matches!(kept.kind, StatementKind::Block(ref inner) if inner.len() == 1));

        let unpacked = unpack_block(vec![nested_if()], UnpackPolicy::PossiblyNested);
        assert!(matches!(unpacked.kind, StatementKind::If { .. }));
    }

    #[test]
    fn test_empty_and_multiple_statements_stay_blocks() {
        let empty = unpack_block(vec![], UnpackPolicy::PossiblyNested);
        assert_eq!(empty.kind, StatementKind::Block(vec![]));

        let two = unpack_block(
            vec![
                Statement::new(StatementKind::Break),
                Statement::new(StatementKind::Continue),
            ],
            UnpackPolicy::PossiblyNested,
        );
        assert!(matches!(two.kind, StatementKind::Block(ref inner) if inner.len() == 2));
    }
}
