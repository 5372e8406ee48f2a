//! C# target tree, statement builder and writer

pub mod ast;
pub mod builder;
pub mod codegen;

pub use ast::{
    Argument, CatchClause, Comment, Expression, FinallyClause, LambdaBody, Literal,
    LocalModifier, Statement, StatementKind, SwitchLabel, SwitchSection, Trivia, TypeSyntax,
    VariableDeclaration, VariableDeclarator,
};
pub use builder::StatementBuilder;
pub use codegen::CSharpWriter;
