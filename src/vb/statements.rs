//! Source statement nodes
//!
//! `StatementKind` is a closed sum type: adding a kind forces every match in the
//! lowering to handle it. The one escape hatch is `Unrecognized`, produced only
//! when an input document names a kind this crate does not know about.

use super::expressions::{Argument, Expression, TypeName};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

/// Byte range of a node in the original source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: u32,
    pub end: u32,
}

impl TextSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, position: u32) -> bool {
        self.start <= position && position <= self.end
    }
}

/// A source comment, without its `'` or `REM` marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceComment {
    pub text: String,
}

/// Comments attached to a statement by the front end
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTrivia {
    #[serde(default)]
    pub leading: Vec<SourceComment>,
    #[serde(default)]
    pub trailing: Vec<SourceComment>,
}

impl SourceTrivia {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementNode {
    #[serde(default)]
    pub span: TextSpan,
    #[serde(default)]
    pub trivia: SourceTrivia,
    /// Original source text, kept for diagnostics only
    #[serde(default)]
    pub text: String,
    #[serde(deserialize_with = "deserialize_statement_kind")]
    pub kind: StatementKind,
}

impl StatementNode {
    pub fn new(kind: StatementKind) -> Self {
        Self {
            span: TextSpan::default(),
            trivia: SourceTrivia::default(),
            text: String::new(),
            kind,
        }
    }

    pub fn with_span(mut self, start: u32, end: u32) -> Self {
        self.span = TextSpan::new(start, end);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_leading_comment(mut self, text: impl Into<String>) -> Self {
        self.trivia.leading.push(SourceComment { text: text.into() });
        self
    }

    pub fn with_trailing_comment(mut self, text: impl Into<String>) -> Self {
        self.trivia.trailing.push(SourceComment { text: text.into() });
        self
    }

    /// Nested statement lists owned directly by this node, in source order
    pub fn child_statement_lists(&self) -> Vec<&[StatementNode]> {
        match &self.kind {
            StatementKind::SingleLineIf(node) => {
                let mut lists = vec![node.statements.as_slice()];
                if let Some(else_statements) = &node.else_statements {
                    lists.push(else_statements);
                }
                lists
            }
            StatementKind::MultiLineIf(node) => {
                let mut lists = vec![node.statements.as_slice()];
                lists.extend(node.else_ifs.iter().map(|b| b.statements.as_slice()));
                if let Some(else_statements) = &node.else_statements {
                    lists.push(else_statements);
                }
                lists
            }
            StatementKind::For(node) => vec![node.statements.as_slice()],
            StatementKind::ForEach(node) => vec![node.statements.as_slice()],
            StatementKind::SelectCase(node) => {
                node.case_blocks.iter().map(|b| b.statements.as_slice()).collect()
            }
            StatementKind::With(node) => vec![node.statements.as_slice()],
            StatementKind::Try(node) => {
                let mut lists = vec![node.statements.as_slice()];
                lists.extend(node.catch_blocks.iter().map(|c| c.statements.as_slice()));
                if let Some(finally) = &node.finally_block {
                    lists.push(&finally.statements);
                }
                lists
            }
            StatementKind::SyncLock(node) => vec![node.statements.as_slice()],
            StatementKind::Using(node) => vec![node.statements.as_slice()],
            StatementKind::While(node) => vec![node.statements.as_slice()],
            StatementKind::DoLoop(node) => vec![node.statements.as_slice()],
            _ => Vec::new(),
        }
    }

    /// Start positions of this node and every statement nested below it, pre-order
    pub fn descendant_positions(&self) -> Vec<u32> {
        let mut positions = Vec::new();
        self.collect_positions(&mut positions);
        positions
    }

    fn collect_positions(&self, positions: &mut Vec<u32>) {
        positions.push(self.span.start);
        let lambda_lists = self
            .expressions()
            .into_iter()
            .flat_map(Expression::lambda_statement_lists);
        for list in lambda_lists.chain(self.child_statement_lists()) {
            for child in list {
                child.collect_positions(positions);
            }
        }
    }

    /// Expressions owned directly by this node, not by its nested statements
    pub fn expressions(&self) -> Vec<&Expression> {
        let mut expressions = Vec::new();
        match &self.kind {
            StatementKind::LocalDeclaration(node) => {
                for declarator in &node.declarators {
                    push_declarator(declarator, &mut expressions);
                }
            }
            StatementKind::Assignment(node) => expressions.extend([&node.left, &node.right]),
            StatementKind::Expression { expression } => expressions.push(expression),
            StatementKind::Call { invocation } => expressions.push(invocation),
            StatementKind::SingleLineIf(node) => expressions.push(&node.condition),
            StatementKind::MultiLineIf(node) => {
                expressions.push(&node.condition);
                expressions.extend(node.else_ifs.iter().map(|b| &b.condition));
            }
            StatementKind::For(node) => {
                push_control_variable(&node.control_variable, &mut expressions);
                expressions.extend([&node.from, &node.to]);
                expressions.extend(node.step.as_ref());
            }
            StatementKind::ForEach(node) => {
                push_control_variable(&node.control_variable, &mut expressions);
                expressions.push(&node.expression);
            }
            StatementKind::SelectCase(node) => {
                expressions.push(&node.expression);
                for clause in node.case_blocks.iter().flat_map(|b| &b.clauses) {
                    match clause {
                        CaseClause::Simple { value } | CaseClause::Relational { value, .. } => {
                            expressions.push(value)
                        }
                        CaseClause::Range { lower, upper } => expressions.extend([lower, upper]),
                        CaseClause::Else | CaseClause::Unrecognized { .. } => {}
                    }
                }
            }
            StatementKind::With(node) => expressions.push(&node.expression),
            StatementKind::Try(node) => {
                expressions.extend(node.catch_blocks.iter().filter_map(|c| c.when.as_ref()))
            }
            StatementKind::SyncLock(node) => expressions.push(&node.expression),
            StatementKind::Using(node) => {
                expressions.extend(node.expression.as_ref());
                for declarator in &node.variables {
                    push_declarator(declarator, &mut expressions);
                }
            }
            StatementKind::While(node) => expressions.push(&node.condition),
            StatementKind::DoLoop(node) => {
                expressions.extend(node.do_condition.iter().map(|c| &c.condition));
                expressions.extend(node.loop_condition.iter().map(|c| &c.condition));
            }
            StatementKind::Throw { expression } | StatementKind::Return { expression } => {
                expressions.extend(expression.as_ref())
            }
            StatementKind::Yield { expression } => expressions.push(expression),
            StatementKind::RaiseEvent { event, arguments } => {
                expressions.push(event);
                expressions.extend(arguments.iter().map(|a| &a.value));
            }
            StatementKind::AddRemoveHandler {
                event, delegate, ..
            } => expressions.extend([event, delegate]),
            StatementKind::Erase { targets } => expressions.extend(targets),
            StatementKind::ReDim(node) => {
                for clause in &node.clauses {
                    expressions.push(&clause.target);
                    expressions.extend(&clause.bounds);
                }
            }
            StatementKind::Label { .. }
            | StatementKind::GoTo { .. }
            | StatementKind::Continue
            | StatementKind::Exit { .. }
            | StatementKind::StopOrEnd { .. }
            | StatementKind::Unrecognized { .. } => {}
        }
        expressions
    }
}

fn push_declarator<'n>(declarator: &'n VariableDeclarator, expressions: &mut Vec<&'n Expression>) {
    for name in &declarator.names {
        expressions.extend(name.array_bounds.iter().flatten());
    }
    if let Some(AsClause::New { arguments, .. }) = &declarator.as_clause {
        expressions.extend(arguments.iter().map(|a| &a.value));
    }
    expressions.extend(declarator.initializer.as_ref());
}

fn push_control_variable<'n>(control: &'n ControlVariable, expressions: &mut Vec<&'n Expression>) {
    match control {
        ControlVariable::Declarator { declarator } => push_declarator(declarator, expressions),
        ControlVariable::Expression { expression } => expressions.push(expression),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalModifier {
    Dim,
    Const,
    Static,
}

/// `name`, `name(upperBound)` or `name?` inside a declarator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedIdentifier {
    pub name: String,
    /// Upper bounds from `name(5, 3)`
    #[serde(default)]
    pub array_bounds: Option<Vec<Expression>>,
    #[serde(default)]
    pub nullable: bool,
}

impl ModifiedIdentifier {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            array_bounds: None,
            nullable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AsClause {
    Simple {
        type_name: TypeName,
    },
    New {
        type_name: TypeName,
        #[serde(default)]
        arguments: Vec<Argument>,
    },
}

/// `a, b As Integer = 0` - one or more names sharing a type and initializer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub names: Vec<ModifiedIdentifier>,
    #[serde(default)]
    pub as_clause: Option<AsClause>,
    #[serde(default)]
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalDeclarationStatement {
    #[serde(default)]
    pub modifiers: Vec<LocalModifier>,
    pub declarators: Vec<VariableDeclarator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    IntegerDivideAssign,
    PowerAssign,
    ConcatenateAssign,
    LeftShiftAssign,
    RightShiftAssign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStatement {
    pub operator: AssignmentOperator,
    pub left: Expression,
    pub right: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleLineIfStatement {
    pub condition: Expression,
    pub statements: Vec<StatementNode>,
    #[serde(default)]
    pub else_statements: Option<Vec<StatementNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseIfBlock {
    pub condition: Expression,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLineIfBlock {
    pub condition: Expression,
    pub statements: Vec<StatementNode>,
    #[serde(default)]
    pub else_ifs: Vec<ElseIfBlock>,
    #[serde(default)]
    pub else_statements: Option<Vec<StatementNode>>,
}

/// Loop control variable: a fresh `i As Integer` declarator or an existing target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ControlVariable {
    Declarator { declarator: VariableDeclarator },
    Expression { expression: Expression },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForBlock {
    pub control_variable: ControlVariable,
    pub from: Expression,
    pub to: Expression,
    #[serde(default)]
    pub step: Option<Expression>,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForEachBlock {
    pub control_variable: ControlVariable,
    pub expression: Expression,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationalOperator {
    Equals,
    NotEquals,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CaseClause {
    /// `Case 1`
    Simple { value: Expression },
    /// `Case Else`
    Else,
    /// `Case Is > 5`
    Relational {
        operator: RelationalOperator,
        value: Expression,
    },
    /// `Case 1 To 5`
    Range { lower: Expression, upper: Expression },
    /// A clause kind this crate has no lowering for
    #[serde(skip)]
    Unrecognized { kind: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseBlock {
    #[serde(deserialize_with = "deserialize_case_clauses")]
    pub clauses: Vec<CaseClause>,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectBlock {
    pub expression: Expression,
    pub case_blocks: Vec<CaseBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithBlock {
    pub expression: Expression,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchBlock {
    #[serde(default)]
    pub variable: Option<String>,
    #[serde(default)]
    pub type_name: Option<TypeName>,
    #[serde(default)]
    pub when: Option<Expression>,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinallyBlock {
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryBlock {
    pub statements: Vec<StatementNode>,
    #[serde(default)]
    pub catch_blocks: Vec<CatchBlock>,
    #[serde(default)]
    pub finally_block: Option<FinallyBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncLockBlock {
    pub expression: Expression,
    pub statements: Vec<StatementNode>,
}

/// `Using expr` or `Using a As New A(), b As New B()`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsingBlock {
    #[serde(default)]
    pub expression: Option<Expression>,
    #[serde(default)]
    pub variables: Vec<VariableDeclarator>,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileBlock {
    pub condition: Expression,
    pub statements: Vec<StatementNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopConditionKind {
    While,
    Until,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopCondition {
    pub kind: LoopConditionKind,
    pub condition: Expression,
}

/// `Do [While|Until c] ... Loop [While|Until c]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoLoopBlock {
    #[serde(default)]
    pub do_condition: Option<LoopCondition>,
    #[serde(default)]
    pub loop_condition: Option<LoopCondition>,
    pub statements: Vec<StatementNode>,
}

/// The block keyword after `Exit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitKind {
    Sub,
    Function,
    Property,
    Do,
    For,
    While,
    Select,
    Try,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerAction {
    Add,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedimClause {
    pub target: Expression,
    /// Upper bounds, one per dimension
    pub bounds: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReDimStatement {
    #[serde(default)]
    pub preserve: bool,
    pub clauses: Vec<RedimClause>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatementKind {
    LocalDeclaration(LocalDeclarationStatement),
    Assignment(AssignmentStatement),
    Expression {
        expression: Expression,
    },
    Call {
        invocation: Expression,
    },
    SingleLineIf(SingleLineIfStatement),
    MultiLineIf(MultiLineIfBlock),
    For(ForBlock),
    ForEach(ForEachBlock),
    SelectCase(SelectBlock),
    With(WithBlock),
    Try(TryBlock),
    SyncLock(SyncLockBlock),
    Using(UsingBlock),
    While(WhileBlock),
    DoLoop(DoLoopBlock),
    Label {
        name: String,
    },
    GoTo {
        label: String,
    },
    Throw {
        #[serde(default)]
        expression: Option<Expression>,
    },
    Return {
        #[serde(default)]
        expression: Option<Expression>,
    },
    Continue,
    Yield {
        expression: Expression,
    },
    Exit {
        block: ExitKind,
    },
    RaiseEvent {
        event: Expression,
        #[serde(default)]
        arguments: Vec<Argument>,
    },
    AddRemoveHandler {
        action: HandlerAction,
        event: Expression,
        delegate: Expression,
    },
    Erase {
        targets: Vec<Expression>,
    },
    ReDim(ReDimStatement),
    /// `Stop` or `End`; the keyword is kept as written
    StopOrEnd {
        keyword: String,
    },
    /// A statement kind this crate has no lowering for
    #[serde(skip)]
    Unrecognized {
        kind: String,
    },
}

const STATEMENT_KINDS: &[&str] = &[
    "LocalDeclaration",
    "Assignment",
    "Expression",
    "Call",
    "SingleLineIf",
    "MultiLineIf",
    "For",
    "ForEach",
    "SelectCase",
    "With",
    "Try",
    "SyncLock",
    "Using",
    "While",
    "DoLoop",
    "Label",
    "GoTo",
    "Throw",
    "Return",
    "Continue",
    "Yield",
    "Exit",
    "RaiseEvent",
    "AddRemoveHandler",
    "Erase",
    "ReDim",
    "StopOrEnd",
];

const CASE_CLAUSE_KINDS: &[&str] = &["Simple", "Else", "Relational", "Range"];

impl StatementKind {
    /// Kind name used in diagnostics
    pub fn name(&self) -> &str {
        match self {
            StatementKind::LocalDeclaration(_) => "LocalDeclaration",
            StatementKind::Assignment(_) => "Assignment",
            StatementKind::Expression { .. } => "Expression",
            StatementKind::Call { .. } => "Call",
            StatementKind::SingleLineIf(_) => "SingleLineIf",
            StatementKind::MultiLineIf(_) => "MultiLineIf",
            StatementKind::For(_) => "For",
            StatementKind::ForEach(_) => "ForEach",
            StatementKind::SelectCase(_) => "SelectCase",
            StatementKind::With(_) => "With",
            StatementKind::Try(_) => "Try",
            StatementKind::SyncLock(_) => "SyncLock",
            StatementKind::Using(_) => "Using",
            StatementKind::While(_) => "While",
            StatementKind::DoLoop(_) => "DoLoop",
            StatementKind::Label { .. } => "Label",
            StatementKind::GoTo { .. } => "GoTo",
            StatementKind::Throw { .. } => "Throw",
            StatementKind::Return { .. } => "Return",
            StatementKind::Continue => "Continue",
            StatementKind::Yield { .. } => "Yield",
            StatementKind::Exit { .. } => "Exit",
            StatementKind::RaiseEvent { .. } => "RaiseEvent",
            StatementKind::AddRemoveHandler { .. } => "AddRemoveHandler",
            StatementKind::Erase { .. } => "Erase",
            StatementKind::ReDim(_) => "ReDim",
            StatementKind::StopOrEnd { .. } => "StopOrEnd",
            StatementKind::Unrecognized { kind } => kind,
        }
    }
}

impl CaseClause {
    pub fn name(&self) -> &str {
        match self {
            CaseClause::Simple { .. } => "Simple",
            CaseClause::Else => "Else",
            CaseClause::Relational { .. } => "Relational",
            CaseClause::Range { .. } => "Range",
            CaseClause::Unrecognized { kind } => kind,
        }
    }
}

/// Deserialize an internally tagged value, mapping unknown tags to a fallback
/// instead of failing the whole document
fn deserialize_tagged_or<T, F>(
    value: serde_json::Value,
    known: &[&str],
    fallback: F,
) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
    F: FnOnce(String) -> T,
{
    let tag = value
        .get("type")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);
    match tag {
        Some(tag) if !known.contains(&tag.as_str()) => Ok(fallback(tag)),
        _ => T::deserialize(value),
    }
}

fn deserialize_statement_kind<'de, D>(deserializer: D) -> Result<StatementKind, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    deserialize_tagged_or(value, STATEMENT_KINDS, |kind| StatementKind::Unrecognized {
        kind,
    })
    .map_err(D::Error::custom)
}

fn deserialize_case_clauses<'de, D>(deserializer: D) -> Result<Vec<CaseClause>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|value| {
            deserialize_tagged_or(value, CASE_CLAUSE_KINDS, |kind| CaseClause::Unrecognized {
                kind,
            })
        })
        .collect::<Result<_, _>>()
        .map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_statement_kind_is_kept() {
        let json = r#"{
            "span": { "start": 4, "end": 20 },
            "text": "OnError GoTo Handler",
            "kind": { "type": "OnErrorGoTo", "label": "Handler" }
        }"#;
        let node: StatementNode = serde_json::from_str(json).unwrap();
        assert_eq!(
            node.kind,
            StatementKind::Unrecognized {
                kind: "OnErrorGoTo".to_string()
            }
        );
        assert_eq!(node.kind.name(), "OnErrorGoTo");
    }

    #[test]
    fn test_malformed_known_kind_is_an_error() {
        let json = r#"{ "kind": { "type": "GoTo" } }"#;
        assert!(serde_json::from_str::<StatementNode>(json).is_err());
    }

    #[test]
    fn test_case_clauses_deserialize() {
        let json = r#"{
            "clauses": [
                { "type": "Simple", "value": { "type": "Literal", "value": { "type": "Integer", "value": 1 } } },
                { "type": "Else" },
                { "type": "Pattern" }
            ],
            "statements": []
        }"#;
        let block: CaseBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.clauses.len(), 3);
        assert_eq!(block.clauses[1], CaseClause::Else);
        assert_eq!(block.clauses[2].name(), "Pattern");
    }

    #[test]
    fn test_descendant_positions_are_pre_order() {
        let inner = StatementNode::new(StatementKind::Continue).with_span(30, 38);
        let body = StatementNode::new(StatementKind::While(WhileBlock {
            condition: Expression::identifier("running"),
            statements: vec![inner],
        }))
        .with_span(10, 50);
        let tail = StatementNode::new(StatementKind::Continue).with_span(60, 68);
        let outer = StatementNode::new(StatementKind::With(WithBlock {
            expression: Expression::identifier("form"),
            statements: vec![body, tail],
        }))
        .with_span(0, 80);

        assert_eq!(outer.descendant_positions(), vec![0, 10, 30, 60]);
    }

    #[test]
    fn test_descendant_positions_enter_statement_lambdas() {
        use crate::vb::{LambdaBody, LambdaKind, RoutineId};

        let lambda = Expression::Lambda {
            id: RoutineId(4),
            kind: LambdaKind::Sub,
            parameters: vec![],
            is_iterator: false,
            body: LambdaBody::Statements {
                statements: vec![StatementNode::new(StatementKind::Continue).with_span(25, 33)],
            },
        };
        let handler = StatementNode::new(StatementKind::AddRemoveHandler {
            action: HandlerAction::Add,
            event: Expression::identifier("Clicked"),
            delegate: Expression::Parenthesized {
                expression: Box::new(lambda),
            },
        })
        .with_span(10, 40);

        assert_eq!(handler.descendant_positions(), vec![10, 25]);
    }
}
