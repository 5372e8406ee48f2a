//! Target syntax tree
//!
//! A deliberately small C# statement and expression model: only the shapes the
//! statement lowering and the default expression converter produce. Operators
//! come from `oxc_syntax`, whose spellings coincide with C# for every operator
//! used here.

use oxc_syntax::operator::{
    AssignmentOperator, BinaryOperator, LogicalOperator, UnaryOperator, UpdateOperator,
};

/// A `//` comment carried on a target statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trivia {
    pub leading: Vec<Comment>,
    pub trailing: Vec<Comment>,
}

impl Trivia {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSyntax {
    /// `var`
    Var,
    /// Keyword types such as `int` or `string`, and named types such as `List<int>`
    Named(String),
    Array { element: Box<TypeSyntax>, rank: usize },
}

impl TypeSyntax {
    pub fn named(name: impl Into<String>) -> Self {
        TypeSyntax::Named(name.into())
    }

    pub fn array(element: TypeSyntax, rank: usize) -> Self {
        TypeSyntax::Array {
            element: Box::new(element),
            rank,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Char(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub expression: Expression,
}

impl Argument {
    pub fn positional(expression: Expression) -> Self {
        Self {
            name: None,
            expression,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expression(Box<Expression>),
    Block(Vec<Statement>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    Literal(Literal),
    This,
    Base,
    /// `default(T)`
    Default(TypeSyntax),
    MemberAccess {
        target: Box<Expression>,
        name: String,
    },
    /// `.Name` on the right of a `?`
    MemberBinding(String),
    /// `target?.whenNotNull`
    ConditionalAccess {
        target: Box<Expression>,
        when_not_null: Box<Expression>,
    },
    Invocation {
        target: Box<Expression>,
        arguments: Vec<Argument>,
    },
    ElementAccess {
        target: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Assignment {
        operator: AssignmentOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Logical {
        operator: LogicalOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },
    PostfixUpdate {
        operator: UpdateOperator,
        operand: Box<Expression>,
    },
    Parenthesized(Box<Expression>),
    /// `new T[size, ...]`
    ArrayCreation {
        element_type: TypeSyntax,
        sizes: Vec<Expression>,
    },
    ObjectCreation {
        type_syntax: TypeSyntax,
        arguments: Vec<Argument>,
    },
    Cast {
        type_syntax: TypeSyntax,
        expression: Box<Expression>,
    },
    /// `expression as T`
    As {
        expression: Box<Expression>,
        type_syntax: TypeSyntax,
    },
    Conditional {
        condition: Box<Expression>,
        when_true: Box<Expression>,
        when_false: Box<Expression>,
    },
    Lambda {
        parameters: Vec<String>,
        body: LambdaBody,
    },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    pub fn null() -> Self {
        Expression::Literal(Literal::Null)
    }

    pub fn integer(value: i64) -> Self {
        Expression::Literal(Literal::Integer(value))
    }

    pub fn member(target: Expression, name: impl Into<String>) -> Self {
        Expression::MemberAccess {
            target: Box::new(target),
            name: name.into(),
        }
    }

    pub fn invoke(target: Expression, arguments: Vec<Expression>) -> Self {
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

    pub fn logical(operator: LogicalOperator, left: Expression, right: Expression) -> Self {
        Expression::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assign(operator: AssignmentOperator, left: Expression, right: Expression) -> Self {
        Expression::Assignment {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(operator: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn logical_not(operand: Expression) -> Self {
        Self::unary(UnaryOperator::LogicalNot, operand)
    }

    /// Strip any number of enclosing parentheses
    pub fn skip_parens(&self) -> &Expression {
        let mut current = self;
        while let Expression::Parenthesized(inner) = current {
            current = inner;
        }
        current
    }

    /// Whether a statement-bodied lambda occurs anywhere inside this expression
    pub fn contains_statements(&self) -> bool {
        match self {
            Expression::Identifier(_)
            | Expression::Literal(_)
            | Expression::This
            | Expression::Base
            | Expression::Default(_)
            | Expression::MemberBinding(_) => false,
            Expression::MemberAccess { target, .. } => target.contains_statements(),
            Expression::ConditionalAccess {
                target,
                when_not_null,
            } => target.contains_statements() || when_not_null.contains_statements(),
            Expression::Invocation { target, arguments } => {
                target.contains_statements()
                    || arguments.iter().any(|a| a.expression.contains_statements())
            }
            Expression::ElementAccess { target, arguments } => {
                target.contains_statements() || arguments.iter().any(Expression::contains_statements)
            }
            Expression::Assignment { left, right, .. }
            | Expression::Binary { left, right, .. }
            | Expression::Logical { left, right, .. } => {
                left.contains_statements() || right.contains_statements()
            }
            Expression::Unary { operand, .. } | Expression::PostfixUpdate { operand, .. } => {
                operand.contains_statements()
            }
            Expression::Parenthesized(inner) => inner.contains_statements(),
            Expression::ArrayCreation { sizes, .. } => {
                sizes.iter().any(Expression::contains_statements)
            }
            Expression::ObjectCreation { arguments, .. } => {
                arguments.iter().any(|a| a.expression.contains_statements())
            }
            Expression::Cast { expression, .. } | Expression::As { expression, .. } => {
                expression.contains_statements()
            }
            Expression::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                condition.contains_statements()
                    || when_true.contains_statements()
                    || when_false.contains_statements()
            }
            Expression::Lambda { body, .. } => match body {
                LambdaBody::Expression(expression) => expression.contains_statements(),
                LambdaBody::Block(_) => true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub name: String,
    pub initializer: Option<Expression>,
}

/// `T a = x` - the declaration part shared by locals, `for`, and `using`
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub type_syntax: TypeSyntax,
    pub variables: Vec<VariableDeclarator>,
}

impl VariableDeclaration {
    pub fn single(type_syntax: TypeSyntax, name: impl Into<String>, initializer: Option<Expression>) -> Self {
        Self {
            type_syntax,
            variables: vec![VariableDeclarator {
                name: name.into(),
                initializer,
            }],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalModifier {
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchLabel {
    Case(Expression),
    Default,
    /// `case object _ when guard:`
    Guarded { guard: Expression },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchSection {
    pub labels: Vec<SwitchLabel>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub exception_type: Option<TypeSyntax>,
    pub identifier: Option<String>,
    pub filter: Option<Expression>,
    pub block: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinallyClause {
    pub block: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    LocalDeclaration {
        modifiers: Vec<LocalModifier>,
        declaration: VariableDeclaration,
    },
    Expression(Expression),
    Block(Vec<Statement>),
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    For {
        declaration: Option<VariableDeclaration>,
        initializers: Vec<Expression>,
        condition: Expression,
        incrementors: Vec<Expression>,
        body: Box<Statement>,
    },
    ForEach {
        type_syntax: TypeSyntax,
        identifier: String,
        expression: Expression,
        body: Box<Statement>,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    Do {
        body: Box<Statement>,
        condition: Expression,
    },
    Switch {
        expression: Expression,
        sections: Vec<SwitchSection>,
    },
    Try {
        block: Vec<Statement>,
        catches: Vec<CatchClause>,
        finally: Option<FinallyClause>,
    },
    Lock {
        expression: Expression,
        body: Box<Statement>,
    },
    Using {
        declaration: Option<VariableDeclaration>,
        expression: Option<Expression>,
        body: Box<Statement>,
    },
    Labeled {
        label: String,
        statement: Box<Statement>,
    },
    Goto(String),
    Break,
    Continue,
    Return(Option<Expression>),
    Throw(Option<Expression>),
    YieldReturn(Expression),
    YieldBreak,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub trivia: Trivia,
}

impl Statement {
    pub fn new(kind: StatementKind) -> Self {
        Self {
            kind,
            trivia: Trivia::default(),
        }
    }

    pub fn with_trivia(self, trivia: Trivia) -> Self {
        Self { trivia, ..self }
    }

    pub fn is_return(&self) -> bool {
        matches!(self.kind, StatementKind::Return(_))
    }

    /// Whether any statement appears below this one in the tree
    pub fn has_descendant_statement(&self) -> bool {
        match &self.kind {
            StatementKind::Block(_)
            | StatementKind::If { .. }
            | StatementKind::For { .. }
            | StatementKind::ForEach { .. }
            | StatementKind::While { .. }
            | StatementKind::Do { .. }
            | StatementKind::Lock { .. }
            | StatementKind::Using { .. }
            | StatementKind::Labeled { .. }
            | StatementKind::Try { .. } => true,
            StatementKind::Switch { expression, sections } => {
                expression.contains_statements()
                    || sections.iter().any(|s| !s.statements.is_empty())
            }
            StatementKind::LocalDeclaration { declaration, .. } => declaration
                .variables
                .iter()
                .filter_map(|v| v.initializer.as_ref())
                .any(Expression::contains_statements),
            StatementKind::Expression(expression) | StatementKind::YieldReturn(expression) => {
                expression.contains_statements()
            }
            StatementKind::Return(expression) | StatementKind::Throw(expression) => expression
                .as_ref()
                .is_some_and(Expression::contains_statements),
            StatementKind::Goto(_)
            | StatementKind::Break
            | StatementKind::Continue
            | StatementKind::YieldBreak
            | StatementKind::Empty => false,
        }
    }
}

impl From<StatementKind> for Statement {
    fn from(kind: StatementKind) -> Self {
        Statement::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_statements_have_no_descendants() {
        let call = Statement::new(StatementKind::Expression(Expression::invoke(
            Expression::identifier("Run"),
            vec![],
        )));
        assert!(!call.has_descendant_statement());
        assert!(!Statement::new(StatementKind::Break).has_descendant_statement());
    }

    #[test]
    fn test_compound_statements_have_descendants() {
        let nested_if = Statement::new(StatementKind::If {
            condition: Expression::identifier("ready"),
            then_branch: Box::new(Statement::new(StatementKind::Break)),
            else_branch: None,
        });
        assert!(nested_if.has_descendant_statement());

        let labeled = Statement::new(StatementKind::Labeled {
            label: "retry".to_string(),
            statement: Box::new(Statement::new(StatementKind::Empty)),
        });
        assert!(labeled.has_descendant_statement());
    }

    #[test]
    fn test_statement_lambda_counts_as_descendant() {
        let lambda = Expression::Lambda {
            parameters: vec![],
            body: LambdaBody::Block(vec![Statement::new(StatementKind::Return(None))]),
        };
        let call = Statement::new(StatementKind::Expression(Expression::invoke(
            Expression::identifier("Task.Run"),
            vec![lambda],
        )));
        assert!(call.has_descendant_statement());
    }
}
