//! Table-backed semantic oracle
//!
//! A front end that has already type-checked the source exports what it knows
//! as a `SymbolTable` alongside the statement tree. Types and constants are
//! keyed by the canonical source text of the expression.

use super::{ConstantValue, SemanticOracle, Symbol, SymbolKind, TypeInfo};
use crate::vb::{BinaryOperator, Expression, Literal, RoutineId, TextSpan, UnaryOperator};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Names declared by one lexical scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub span: TextSpan,
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolTable {
    types: HashMap<String, TypeInfo>,
    /// Overrides for `converted_type_of`; falls back to `types`
    converted_types: HashMap<String, TypeInfo>,
    constants: HashMap<String, ConstantValue>,
    scopes: Vec<Scope>,
    return_types: HashMap<u32, TypeInfo>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_type(mut self, expression: impl Into<String>, type_info: TypeInfo) -> Self {
        self.types.insert(expression.into(), type_info);
        self
    }

    pub fn with_converted_type(
        mut self,
        expression: impl Into<String>,
        type_info: TypeInfo,
    ) -> Self {
        self.converted_types.insert(expression.into(), type_info);
        self
    }

    pub fn with_constant(mut self, expression: impl Into<String>, value: ConstantValue) -> Self {
        self.constants.insert(expression.into(), value);
        self
    }

    pub fn with_scope(mut self, start: u32, end: u32, symbols: &[(&str, SymbolKind)]) -> Self {
        self.scopes.push(Scope {
            span: TextSpan::new(start, end),
            symbols: symbols
                .iter()
                .map(|(name, kind)| Symbol {
                    name: name.to_string(),
                    kind: *kind,
                })
                .collect(),
        });
        self
    }

    pub fn with_return_type(mut self, routine: RoutineId, type_info: TypeInfo) -> Self {
        self.return_types.insert(routine.0, type_info);
        self
    }

    /// Scopes containing `position`, innermost first
    fn scopes_at(&self, position: u32) -> Vec<&Scope> {
        let mut scopes: Vec<&Scope> = self
            .scopes
            .iter()
            .filter(|scope| scope.span.contains(position))
            .collect();
        scopes.sort_by_key(|scope| scope.span.end - scope.span.start);
        scopes
    }

    fn literal_type(literal: &Literal) -> Option<TypeInfo> {
        match literal {
            Literal::Nothing => None,
            Literal::Boolean(_) => Some(TypeInfo::value_type("bool")),
            Literal::Integer(_) => Some(TypeInfo::value_type("int")),
            Literal::Double(_) => Some(TypeInfo::value_type("double")),
            Literal::String(_) => Some(TypeInfo::reference_type("string")),
            Literal::Char(_) => Some(TypeInfo::value_type("char")),
        }
    }
}

/// Folds literal arithmetic the front end did not already record
struct ConstantFolder;

impl ConstantFolder {
    fn fold_literal(literal: &Literal) -> ConstantValue {
        match literal {
            Literal::Nothing => ConstantValue::Nothing,
            Literal::Boolean(b) => ConstantValue::Boolean(*b),
            Literal::Integer(n) => ConstantValue::Integer(*n),
            Literal::Double(n) => ConstantValue::Double(*n),
            Literal::String(s) => ConstantValue::String(s.clone()),
            Literal::Char(c) => ConstantValue::Char(*c),
        }
    }

    fn fold_unary(operator: UnaryOperator, value: ConstantValue) -> Option<ConstantValue> {
        match (operator, value) {
            (UnaryOperator::Minus, ConstantValue::Integer(n)) => n.checked_neg().map(ConstantValue::Integer),
            (UnaryOperator::Minus, ConstantValue::Double(n)) => Some(ConstantValue::Double(-n)),
            (UnaryOperator::Plus, value @ (ConstantValue::Integer(_) | ConstantValue::Double(_))) => {
                Some(value)
            }
            (UnaryOperator::Not, ConstantValue::Boolean(b)) => Some(ConstantValue::Boolean(!b)),
            _ => None,
        }
    }

    fn fold_binary(
        operator: BinaryOperator,
        left: ConstantValue,
        right: ConstantValue,
    ) -> Option<ConstantValue> {
        match (left, right) {
            (ConstantValue::Integer(l), ConstantValue::Integer(r)) => {
                let folded = match operator {
                    BinaryOperator::Add => l.checked_add(r),
                    BinaryOperator::Subtract => l.checked_sub(r),
                    BinaryOperator::Multiply => l.checked_mul(r),
                    _ => None,
                };
                folded.map(ConstantValue::Integer)
            }
            (ConstantValue::Double(l), ConstantValue::Double(r)) => {
                Self::fold_number_operation(operator, l, r)
            }
            (ConstantValue::Integer(l), ConstantValue::Double(r)) => {
                Self::fold_number_operation(operator, l as f64, r)
            }
            (ConstantValue::Double(l), ConstantValue::Integer(r)) => {
                Self::fold_number_operation(operator, l, r as f64)
            }
            _ => None,
        }
    }

    fn fold_number_operation(operator: BinaryOperator, l: f64, r: f64) -> Option<ConstantValue> {
        let folded = match operator {
            BinaryOperator::Add => l + r,
            BinaryOperator::Subtract => l - r,
            BinaryOperator::Multiply => l * r,
            _ => return None,
        };
        Some(ConstantValue::Double(folded))
    }
}

impl SemanticOracle for SymbolTable {
    fn type_of(&self, expression: &Expression) -> Option<TypeInfo> {
        if let Some(type_info) = self.types.get(&expression.to_string()) {
            return Some(type_info.clone());
        }
        match expression {
            Expression::Literal { value } => Self::literal_type(value),
            Expression::Parenthesized { expression } => self.type_of(expression),
            _ => None,
        }
    }

    fn converted_type_of(&self, expression: &Expression) -> Option<TypeInfo> {
        self.converted_types
            .get(&expression.to_string())
            .cloned()
            .or_else(|| self.type_of(expression))
    }

    fn constant_value_of(&self, expression: &Expression) -> Option<ConstantValue> {
        if let Some(value) = self.constants.get(&expression.to_string()) {
            return Some(value.clone());
        }
        match expression {
            Expression::Literal { value } => Some(ConstantFolder::fold_literal(value)),
            Expression::Parenthesized { expression } => self.constant_value_of(expression),
            Expression::Unary { operator, operand } => {
                ConstantFolder::fold_unary(*operator, self.constant_value_of(operand)?)
            }
            Expression::Binary {
                operator,
                left,
                right,
            } => ConstantFolder::fold_binary(
                *operator,
                self.constant_value_of(left)?,
                self.constant_value_of(right)?,
            ),
            _ => None,
        }
    }

    fn symbol_at(&self, position: u32, name: &str) -> Option<Symbol> {
        self.scopes_at(position).into_iter().find_map(|scope| {
            scope
                .symbols
                .iter()
                .find(|symbol| symbol.name.eq_ignore_ascii_case(name))
                .cloned()
        })
    }

    fn visible_names_at(&self, position: u32) -> HashSet<String> {
        self.scopes_at(position)
            .into_iter()
            .flat_map(|scope| scope.symbols.iter().map(|symbol| symbol.name.clone()))
            .collect()
    }

    fn return_type_of(&self, routine: RoutineId) -> Option<TypeInfo> {
        self.return_types.get(&routine.0).cloned()
    }
}
