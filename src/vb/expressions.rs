//! Source expression nodes
//!
//! Expressions are not converted by the statement engine itself; they are handed
//! to an [`ExpressionConverter`](crate::lowering::ExpressionConverter) and to the
//! semantic oracle. The `Display` impl renders canonical source text, which is
//! also what the table-backed oracle keys its answers on.

use super::StatementNode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a routine (method, property accessor or lambda) known to the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutineId(pub u32);

impl fmt::Display for RoutineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A type reference as written in source, e.g. `Integer`, `List(Of String)`, `Byte()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeName {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<TypeName>,
    /// Array rank; 0 for non-array types
    #[serde(default)]
    pub rank: usize,
}

impl TypeName {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            rank: 0,
        }
    }

    pub fn array_of(element: TypeName, rank: usize) -> Self {
        Self { rank, ..element }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.arguments.is_empty() {
            write!(f, "(Of ")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ")")?;
        }
        if self.rank > 0 {
            write!(f, "({})", ",".repeat(self.rank - 1))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Literal {
    Nothing,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    IntegerDivide,
    Modulo,
    Power,
    Concatenate,
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    Xor,
    AndAlso,
    OrElse,
    LeftShift,
    RightShift,
    Is,
    IsNot,
    Like,
}

impl BinaryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::IntegerDivide => "\\",
            Self::Modulo => "Mod",
            Self::Power => "^",
            Self::Concatenate => "&",
            Self::Equals => "=",
            Self::NotEquals => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::And => "And",
            Self::Or => "Or",
            Self::Xor => "Xor",
            Self::AndAlso => "AndAlso",
            Self::OrElse => "OrElse",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Is => "Is",
            Self::IsNot => "IsNot",
            Self::Like => "Like",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastKind {
    CType,
    DirectCast,
    TryCast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub name: Option<String>,
    pub value: Expression,
}

impl Argument {
    pub fn positional(value: Expression) -> Self {
        Self { name: None, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LambdaKind {
    Sub,
    Function,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LambdaBody {
    Expression { expression: Box<Expression> },
    Statements { statements: Vec<StatementNode> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    Identifier {
        name: String,
    },
    Literal {
        value: Literal,
    },
    Me,
    MyBase,
    MyClass,
    /// `target.name`, or `.name` inside a With block when `target` is absent
    MemberAccess {
        #[serde(default)]
        target: Option<Box<Expression>>,
        name: String,
    },
    Invocation {
        target: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    /// Array element access; the front end has already told it apart from a call
    Index {
        target: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    Parenthesized {
        expression: Box<Expression>,
    },
    New {
        type_name: TypeName,
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    Cast {
        kind: CastKind,
        expression: Box<Expression>,
        type_name: TypeName,
    },
    /// `If(condition, whenTrue, whenFalse)`
    TernaryIf {
        condition: Box<Expression>,
        when_true: Box<Expression>,
        when_false: Box<Expression>,
    },
    /// `If(value, fallback)`
    BinaryIf {
        value: Box<Expression>,
        fallback: Box<Expression>,
    },
    AddressOf {
        target: Box<Expression>,
    },
    Lambda {
        id: RoutineId,
        kind: LambdaKind,
        #[serde(default)]
        parameters: Vec<String>,
        #[serde(default)]
        is_iterator: bool,
        body: LambdaBody,
    },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier { name: name.into() }
    }

    pub fn integer(value: i64) -> Self {
        Expression::Literal {
            value: Literal::Integer(value),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::Literal {
            value: Literal::String(value.into()),
        }
    }

    pub fn member(target: Expression, name: impl Into<String>) -> Self {
        Expression::MemberAccess {
            target: Some(Box::new(target)),
            name: name.into(),
        }
    }

    pub fn call(target: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Invocation {
            target: Box::new(target),
            arguments: arguments.into_iter().map(Argument::positional).collect(),
        }
    }

    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn negate(operand: Expression) -> Self {
        Expression::Unary {
            operator: UnaryOperator::Minus,
            operand: Box::new(operand),
        }
    }

    /// Strip any number of enclosing parentheses
    pub fn skip_parens(&self) -> &Expression {
        let mut current = self;
        while let Expression::Parenthesized { expression } = current {
            current = expression;
        }
        current
    }

    /// Name of the identifier this expression is, if it is a bare identifier
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expression::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Bodies of the statement lambdas anywhere inside this expression, outermost first
    pub fn lambda_statement_lists(&self) -> Vec<&[StatementNode]> {
        let mut lists = Vec::new();
        self.collect_lambda_statements(&mut lists);
        lists
    }

    fn collect_lambda_statements<'e>(&'e self, lists: &mut Vec<&'e [StatementNode]>) {
        match self {
            Expression::Identifier { .. }
            | Expression::Literal { .. }
            | Expression::Me
            | Expression::MyBase
            | Expression::MyClass => {}
            Expression::MemberAccess { target, .. } => {
                if let Some(target) = target {
                    target.collect_lambda_statements(lists);
                }
            }
            Expression::Invocation { target, arguments } => {
                target.collect_lambda_statements(lists);
                for argument in arguments {
                    argument.value.collect_lambda_statements(lists);
                }
            }
            Expression::Index { target, arguments } => {
                target.collect_lambda_statements(lists);
                for argument in arguments {
                    argument.collect_lambda_statements(lists);
                }
            }
            Expression::Binary { left, right, .. } => {
                left.collect_lambda_statements(lists);
                right.collect_lambda_statements(lists);
            }
            Expression::Unary { operand, .. } => operand.collect_lambda_statements(lists),
            Expression::Parenthesized { expression } | Expression::Cast { expression, .. } => {
                expression.collect_lambda_statements(lists)
            }
            Expression::New { arguments, .. } => {
                for argument in arguments {
                    argument.value.collect_lambda_statements(lists);
                }
            }
            Expression::TernaryIf {
                condition,
                when_true,
                when_false,
            } => {
                condition.collect_lambda_statements(lists);
                when_true.collect_lambda_statements(lists);
                when_false.collect_lambda_statements(lists);
            }
            Expression::BinaryIf { value, fallback } => {
                value.collect_lambda_statements(lists);
                fallback.collect_lambda_statements(lists);
            }
            Expression::AddressOf { target } => target.collect_lambda_statements(lists),
            Expression::Lambda { body, .. } => match body {
                LambdaBody::Expression { expression } => expression.collect_lambda_statements(lists),
                LambdaBody::Statements { statements } => lists.push(statements.as_slice()),
            },
        }
    }
}

fn write_arguments(f: &mut fmt::Formatter<'_>, arguments: &[Argument]) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in arguments.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        if let Some(name) = &arg.name {
            write!(f, "{}:=", name)?;
        }
        write!(f, "{}", arg.value)?;
    }
    write!(f, ")")
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Nothing => write!(f, "Nothing"),
            Literal::Boolean(true) => write!(f, "True"),
            Literal::Boolean(false) => write!(f, "False"),
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Double(value) => write!(f, "{:?}", value),
            Literal::String(value) => write!(f, "\"{}\"", value.replace('"', "\"\"")),
            Literal::Char(value) => write!(f, "\"{}\"c", value),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier { name } => write!(f, "{}", name),
            Expression::Literal { value } => write!(f, "{}", value),
            Expression::Me => write!(f, "Me"),
            Expression::MyBase => write!(f, "MyBase"),
            Expression::MyClass => write!(f, "MyClass"),
            Expression::MemberAccess { target, name } => match target {
                Some(target) => write!(f, "{}.{}", target, name),
                None => write!(f, ".{}", name),
            },
            Expression::Invocation { target, arguments } => {
                write!(f, "{}", target)?;
                write_arguments(f, arguments)
            }
            Expression::Index { target, arguments } => {
                write!(f, "{}(", target)?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Expression::Binary {
                operator,
                left,
                right,
            } => write!(f, "{} {} {}", left, operator.as_str(), right),
            Expression::Unary { operator, operand } => match operator {
                UnaryOperator::Not => write!(f, "Not {}", operand),
                UnaryOperator::Minus => write!(f, "-{}", operand),
                UnaryOperator::Plus => write!(f, "+{}", operand),
            },
            Expression::Parenthesized { expression } => write!(f, "({})", expression),
            Expression::New {
                type_name,
                arguments,
            } => {
                write!(f, "New {}", type_name)?;
                write_arguments(f, arguments)
            }
            Expression::Cast {
                kind,
                expression,
                type_name,
            } => {
                let keyword = match kind {
                    CastKind::CType => "CType",
                    CastKind::DirectCast => "DirectCast",
                    CastKind::TryCast => "TryCast",
                };
                write!(f, "{}({}, {})", keyword, expression, type_name)
            }
            Expression::TernaryIf {
                condition,
                when_true,
                when_false,
            } => write!(f, "If({}, {}, {})", condition, when_true, when_false),
            Expression::BinaryIf { value, fallback } => write!(f, "If({}, {})", value, fallback),
            Expression::AddressOf { target } => write!(f, "AddressOf {}", target),
            Expression::Lambda {
                kind, parameters, ..
            } => {
                let keyword = match kind {
                    LambdaKind::Sub => "Sub",
                    LambdaKind::Function => "Function",
                };
                write!(f, "{}({}) ...", keyword, parameters.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_renders_source_text() {
        let expr = Expression::binary(
            BinaryOperator::Subtract,
            Expression::member(Expression::Me, "count"),
            Expression::integer(1),
        );
        assert_eq!(expr.to_string(), "Me.count - 1");

        let implicit = Expression::MemberAccess {
            target: None,
            name: "Name".to_string(),
        };
        assert_eq!(implicit.to_string(), ".Name");
    }

    #[test]
    fn test_skip_parens() {
        let inner = Expression::negate(Expression::integer(2));
        let wrapped = Expression::Parenthesized {
            expression: Box::new(Expression::Parenthesized {
                expression: Box::new(inner.clone()),
            }),
        };
        assert_eq!(wrapped.skip_parens(), &inner);
    }

    #[test]
    fn test_type_name_display() {
        let list = TypeName {
            name: "List".to_string(),
            arguments: vec![TypeName::simple("String")],
            rank: 0,
        };
        assert_eq!(list.to_string(), "List(Of String)");
        assert_eq!(TypeName::array_of(TypeName::simple("Integer"), 2).to_string(), "Integer(,)");
    }
}
