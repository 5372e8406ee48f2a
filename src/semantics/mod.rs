//! Semantic oracle
//!
//! The statement engine never resolves types or symbols itself. Everything it
//! needs to know about the source program is asked of a [`SemanticOracle`],
//! which is a read-only capability passed in through the conversion context.

pub mod symbol_table;

pub use symbol_table::SymbolTable;

use crate::vb::{Expression, RoutineId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// What the oracle knows about a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Name as it should be written in C#, e.g. `int` or `List<string>`
    pub name: String,
    #[serde(default)]
    pub is_reference_type: bool,
    /// False for anonymous types and other types C# code cannot spell
    #[serde(default = "default_true")]
    pub can_be_referenced_by_name: bool,
    /// Element type when this is an array type
    #[serde(default)]
    pub element_type: Option<Box<TypeInfo>>,
    /// Array rank; 0 for non-array types
    #[serde(default)]
    pub rank: usize,
}

fn default_true() -> bool {
    true
}

impl TypeInfo {
    pub fn value_type(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_reference_type: false,
            can_be_referenced_by_name: true,
            element_type: None,
            rank: 0,
        }
    }

    pub fn reference_type(name: impl Into<String>) -> Self {
        Self {
            is_reference_type: true,
            ..Self::value_type(name)
        }
    }

    pub fn anonymous() -> Self {
        Self {
            name: "<anonymous type>".to_string(),
            is_reference_type: false,
            can_be_referenced_by_name: false,
            element_type: None,
            rank: 0,
        }
    }

    /// `element[]` for rank 1, `element[,]` for rank 2, and so on
    pub fn array_of(element: TypeInfo, rank: usize) -> Self {
        Self {
            name: format!("{}[{}]", element.name, ",".repeat(rank.saturating_sub(1))),
            is_reference_type: true,
            can_be_referenced_by_name: element.can_be_referenced_by_name,
            element_type: Some(Box::new(element)),
            rank,
        }
    }

    pub fn is_array(&self) -> bool {
        self.element_type.is_some()
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.name.as_str(), "bool" | "Boolean" | "System.Boolean")
    }
}

/// Compile-time constant value of an expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ConstantValue {
    Integer(i64),
    Double(f64),
    Boolean(bool),
    String(String),
    Char(char),
    Nothing,
}

impl ConstantValue {
    /// Integer view of the constant, if it is integral and fits in `i32`
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ConstantValue::Integer(n) => i32::try_from(*n).ok(),
            ConstantValue::Double(n) => {
                let int_val = *n as i32;
                if n.fract() == 0.0 && (int_val as f64) == *n {
                    Some(int_val)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Integer(n) => write!(f, "{}", n),
            ConstantValue::Double(n) => write!(f, "{}", n),
            ConstantValue::Boolean(b) => write!(f, "{}", b),
            ConstantValue::String(s) => write!(f, "{:?}", s),
            ConstantValue::Char(c) => write!(f, "{:?}", c),
            ConstantValue::Nothing => write!(f, "Nothing"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    Local,
    Parameter,
    Field,
    Property,
    Method,
    Event,
    Type,
}

/// What an identifier resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
}

/// Read-only type, symbol and constant information about the source program
pub trait SemanticOracle: Send + Sync {
    /// Type of the expression as the source language sees it
    fn type_of(&self, expression: &Expression) -> Option<TypeInfo>;

    /// Type after implicit conversions, used for array element types
    fn converted_type_of(&self, expression: &Expression) -> Option<TypeInfo>;

    fn constant_value_of(&self, expression: &Expression) -> Option<ConstantValue>;

    /// Resolve `name` as seen from `position`
    fn symbol_at(&self, position: u32, name: &str) -> Option<Symbol>;

    /// Every name in scope at `position`
    fn visible_names_at(&self, position: u32) -> HashSet<String>;

    /// Declared return type of a function, property or lambda
    fn return_type_of(&self, routine: RoutineId) -> Option<TypeInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_as_i32() {
        assert_eq!(ConstantValue::Integer(9).as_i32(), Some(9));
        assert_eq!(ConstantValue::Double(4.0).as_i32(), Some(4));
        assert_eq!(ConstantValue::Double(4.5).as_i32(), None);
        assert_eq!(ConstantValue::Integer(i64::MAX).as_i32(), None);
        assert_eq!(ConstantValue::String("9".into()).as_i32(), None);
    }

    #[test]
    fn test_array_type_names() {
        let vector = TypeInfo::array_of(TypeInfo::value_type("int"), 1);
        assert_eq!(vector.name, "int[]");
        assert!(vector.is_reference_type);

        let grid = TypeInfo::array_of(TypeInfo::value_type("int"), 2);
        assert_eq!(grid.name, "int[,]");
        assert_eq!(grid.rank, 2);
        assert!(!TypeInfo::value_type("int").is_array());
    }
}
