//! vb2cs-rs: statement-level Visual Basic to C# tree rewriting
//!
//! This library converts already-parsed, already-type-checked Visual Basic
//! routine bodies into C# statements, keeping comments attached, and prints
//! them as C# source text.

pub mod cli;
pub mod converter;
pub mod cs;
pub mod error;
pub mod lowering;
pub mod semantics;
pub mod vb;

pub use converter::{ConversionUnit, ConvertOptions, Converter, ErrorPolicy};
pub use error::{Error as ConverterError, Result as ConverterResult};

// Re-export commonly used types
pub use cs::CSharpWriter;
pub use lowering::{convert_statement, convert_statement_list, ConversionContext, ConversionError};
pub use semantics::{SemanticOracle, SymbolTable};
pub use vb::{RoutineBody, StatementNode};
