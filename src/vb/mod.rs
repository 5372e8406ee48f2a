//! Source statement tree
//!
//! The engine consumes an already-parsed, already-type-checked Visual Basic
//! statement tree. This module defines that tree as plain data so a front end
//! (or a test) can hand it over as JSON.

pub mod expressions;
pub mod statements;

pub use expressions::{
    Argument, BinaryOperator, CastKind, Expression, LambdaBody, LambdaKind, Literal, RoutineId,
    TypeName, UnaryOperator,
};
pub use statements::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutineKind {
    Sub,
    Function,
}

/// One convertible method, accessor or operator body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineBody {
    pub id: RoutineId,
    pub name: String,
    pub kind: RoutineKind,
    #[serde(default)]
    pub is_iterator: bool,
    pub statements: Vec<StatementNode>,
}
