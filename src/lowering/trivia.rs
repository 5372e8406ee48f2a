//! Comment reattachment
//!
//! A source statement may lower to several target statements. Its comments are
//! moved as a unit onto the last of them, which is the one that ends up
//! physically last in the output.

use crate::cs::{Comment, Statement, Trivia};
use crate::vb::{SourceTrivia, StatementNode};

pub fn convert_trivia(trivia: &SourceTrivia) -> Trivia {
    let convert = |comments: &[crate::vb::SourceComment]| {
        comments
            .iter()
            .map(|comment| Comment {
                text: comment.text.clone(),
            })
            .collect()
    };
    Trivia {
        leading: convert(&trivia.leading),
        trailing: convert(&trivia.trailing),
    }
}

/// Replace the trivia of the last statement with the trivia of `node`
pub fn reattach_trivia(node: &StatementNode, mut statements: Vec<Statement>) -> Vec<Statement> {
    if let Some(last) = statements.last_mut() {
        last.trivia = convert_trivia(&node.trivia);
    }
    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::StatementKind as CsKind;
    use crate::vb::StatementKind;

    #[test]
    fn test_trivia_lands_on_last_statement() {
        let node = StatementNode::new(StatementKind::Continue)
            .with_leading_comment("grow the buffer")
            .with_trailing_comment("keeps contents");
        let statements = vec![
            Statement::new(CsKind::Break),
            Statement::new(CsKind::Continue),
            Statement::new(CsKind::Empty),
        ];

        let statements = reattach_trivia(&node, statements);
        assert_eq!(statements.len(), 3);
        assert!(statements[0].trivia.is_empty());
        assert!(statements[1].trivia.is_empty());
        assert_eq!(statements[2].trivia.leading[0].text, "grow the buffer");
        assert_eq!(statements[2].trivia.trailing[0].text, "keeps contents");
    }

    #[test]
    fn test_empty_output_is_left_alone() {
        let node = StatementNode::new(StatementKind::Continue).with_leading_comment("dropped");
        assert!(reattach_trivia(&node, Vec::new()).is_empty());
    }
}
