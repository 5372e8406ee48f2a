//! C# writer for the target tree
//!
//! Allman braces, four-space indentation, and parentheses only where operator
//! precedence needs them.

use super::ast::{
    Argument, CatchClause, Comment, Expression, LambdaBody, Literal, Statement, StatementKind,
    SwitchLabel, SwitchSection, TypeSyntax, VariableDeclaration,
};
use oxc_syntax::operator::{BinaryOperator, LogicalOperator, UnaryOperator};

const INDENT: &str = "    ";

/// Emits target statements as C# source text
pub struct CSharpWriter {
    output: String,
    indent: usize,
    include_comments: bool,
}

impl Default for CSharpWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CSharpWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
            include_comments: true,
        }
    }

    pub fn with_comments(mut self, include_comments: bool) -> Self {
        self.include_comments = include_comments;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Emit a statement list, one statement per line group
    pub fn emit(statements: &[Statement]) -> String {
        let mut writer = Self::new();
        writer.write_statements(statements);
        writer.finish()
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn write_statements(&mut self, statements: &[Statement]) {
        for statement in statements {
            self.write_statement(statement);
        }
    }

    /// Write a braced block at the current indentation
    pub fn write_block(&mut self, statements: &[Statement]) {
        self.open_block();
        self.write_statements(statements);
        self.close_block();
    }

    pub fn open_block(&mut self) {
        self.write_line("{");
        self.indent += 1;
    }

    pub fn close_block(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.write_line("}");
    }

    pub fn write_comment_line(&mut self, text: &str) {
        self.write_line(&comment_text(text));
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
    }

    fn write_line(&mut self, line: &str) {
        self.write_indent();
        self.output.push_str(line);
        self.output.push('\n');
    }

    pub fn write_statement(&mut self, statement: &Statement) {
        self.write_statement_with_prefix(statement, "");
    }

    /// `prefix` lets an `else` share the first line of the statement it introduces
    fn write_statement_with_prefix(&mut self, statement: &Statement, prefix: &str) {
        if self.include_comments {
            for comment in &statement.trivia.leading {
                self.write_line(&comment_text(&comment.text));
            }
        }

        self.write_indent();
        self.output.push_str(prefix);
        self.write_statement_kind(&statement.kind);

        if self.include_comments && !statement.trivia.trailing.is_empty() {
            self.attach_trailing(&statement.trivia.trailing);
        }
    }

    /// Move trailing comments onto the last line already written
    fn attach_trailing(&mut self, comments: &[Comment]) {
        if self.output.ends_with('\n') {
            self.output.pop();
        }
        for comment in comments {
            self.output.push(' ');
            self.output.push_str(&comment_text(&comment.text));
        }
        self.output.push('\n');
    }

    /// Writes the statement starting at the current column; always ends with a newline
    fn write_statement_kind(&mut self, kind: &StatementKind) {
        match kind {
            StatementKind::LocalDeclaration {
                modifiers,
                declaration,
            } => {
                if !modifiers.is_empty() {
                    self.output.push_str("const ");
                }
                self.write_declaration(declaration);
                self.output.push_str(";\n");
            }
            StatementKind::Expression(expression) => {
                self.write_expression(expression);
                self.output.push_str(";\n");
            }
            StatementKind::Block(statements) => {
                self.output.push_str("{\n");
                self.indent += 1;
                self.write_statements(statements);
                self.indent -= 1;
                self.write_line("}");
            }
            StatementKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.output.push_str("if (");
                self.write_expression(condition);
                self.output.push_str(")\n");
                self.write_embedded(then_branch);
                if let Some(else_branch) = else_branch {
                    let is_else_if = matches!(else_branch.kind, StatementKind::If { .. })
                        && else_branch.trivia.leading.is_empty();
                    if is_else_if {
                        self.write_statement_with_prefix(else_branch, "else ");
                    } else {
                        self.write_line("else");
                        self.write_embedded(else_branch);
                    }
                }
            }
            StatementKind::For {
                declaration,
                initializers,
                condition,
                incrementors,
                body,
            } => {
                self.output.push_str("for (");
                if let Some(declaration) = declaration {
                    self.write_declaration(declaration);
                } else {
                    self.write_expression_list(initializers);
                }
                self.output.push_str("; ");
                self.write_expression(condition);
                self.output.push_str("; ");
                self.write_expression_list(incrementors);
                self.output.push_str(")\n");
                self.write_embedded(body);
            }
            StatementKind::ForEach {
                type_syntax,
                identifier,
                expression,
                body,
            } => {
                self.output.push_str("foreach (");
                self.write_type(type_syntax);
                self.output.push(' ');
                self.output.push_str(identifier);
                self.output.push_str(" in ");
                self.write_expression(expression);
                self.output.push_str(")\n");
                self.write_embedded(body);
            }
            StatementKind::While { condition, body } => {
                self.output.push_str("while (");
                self.write_expression(condition);
                self.output.push_str(")\n");
                self.write_embedded(body);
            }
            StatementKind::Do { body, condition } => {
                self.output.push_str("do\n");
                self.write_embedded(body);
                self.write_indent();
                self.output.push_str("while (");
                self.write_expression(condition);
                self.output.push_str(");\n");
            }
            StatementKind::Switch {
                expression,
                sections,
            } => {
                self.output.push_str("switch (");
                self.write_expression(expression);
                self.output.push_str(")\n");
                self.write_line("{");
                self.indent += 1;
                for section in sections {
                    self.write_switch_section(section);
                }
                self.indent -= 1;
                self.write_line("}");
            }
            StatementKind::Try {
                block,
                catches,
                finally,
            } => {
                self.output.push_str("try\n");
                self.write_block(block);
                for catch in catches {
                    self.write_catch(catch);
                }
                if let Some(finally) = finally {
                    self.write_line("finally");
                    self.write_block(&finally.block);
                }
            }
            StatementKind::Lock { expression, body } => {
                self.output.push_str("lock (");
                self.write_expression(expression);
                self.output.push_str(")\n");
                self.write_embedded(body);
            }
            StatementKind::Using {
                declaration,
                expression,
                body,
            } => {
                self.output.push_str("using (");
                if let Some(declaration) = declaration {
                    self.write_declaration(declaration);
                } else if let Some(expression) = expression {
                    self.write_expression(expression);
                }
                self.output.push_str(")\n");
                let stacks = matches!(body.kind, StatementKind::Using { .. })
                    && body.trivia.leading.is_empty();
                if stacks {
                    self.write_statement(body);
                } else {
                    self.write_embedded(body);
                }
            }
            StatementKind::Labeled { label, statement } => {
                self.output.push_str(label);
                if matches!(statement.kind, StatementKind::Empty) && statement.trivia.is_empty() {
                    self.output.push_str(": ;\n");
                } else {
                    self.output.push_str(":\n");
                    self.write_statement(statement);
                }
            }
            StatementKind::Goto(label) => {
                self.output.push_str("goto ");
                self.output.push_str(label);
                self.output.push_str(";\n");
            }
            StatementKind::Break => self.output.push_str("break;\n"),
            StatementKind::Continue => self.output.push_str("continue;\n"),
            StatementKind::Return(value) => {
                self.output.push_str("return");
                if let Some(value) = value {
                    self.output.push(' ');
                    self.write_expression(value);
                }
                self.output.push_str(";\n");
            }
            StatementKind::Throw(value) => {
                self.output.push_str("throw");
                if let Some(value) = value {
                    self.output.push(' ');
                    self.write_expression(value);
                }
                self.output.push_str(";\n");
            }
            StatementKind::YieldReturn(value) => {
                self.output.push_str("yield return ");
                self.write_expression(value);
                self.output.push_str(";\n");
            }
            StatementKind::YieldBreak => self.output.push_str("yield break;\n"),
            StatementKind::Empty => self.output.push_str(";\n"),
        }
    }

    /// Body of an `if`, loop, `lock` or `using`: braced blocks stay at this level,
    /// single statements are indented one step
    fn write_embedded(&mut self, statement: &Statement) {
        match &statement.kind {
            StatementKind::Block(statements) if statement.trivia.is_empty() => {
                self.write_block(statements)
            }
            _ => {
                self.indent += 1;
                self.write_statement(statement);
                self.indent -= 1;
            }
        }
    }

    fn write_switch_section(&mut self, section: &SwitchSection) {
        for label in &section.labels {
            self.write_indent();
            match label {
                SwitchLabel::Case(value) => {
                    self.output.push_str("case ");
                    self.write_expression(value);
                    self.output.push_str(":\n");
                }
                SwitchLabel::Default => self.output.push_str("default:\n"),
                SwitchLabel::Guarded { guard } => {
                    self.output.push_str("case object _ when ");
                    self.write_expression(guard);
                    self.output.push_str(":\n");
                }
            }
        }
        match section.statements.as_slice() {
            // A braced section body lines up with its labels
            [body] if body.trivia.is_empty() => {
                if let StatementKind::Block(statements) = &body.kind {
                    self.write_block(statements);
                } else {
                    self.indent += 1;
                    self.write_statement(body);
                    self.indent -= 1;
                }
            }
            statements => {
                self.indent += 1;
                self.write_statements(statements);
                self.indent -= 1;
            }
        }
    }

    fn write_catch(&mut self, catch: &CatchClause) {
        self.write_indent();
        self.output.push_str("catch");
        if let Some(exception_type) = &catch.exception_type {
            self.output.push_str(" (");
            self.write_type(exception_type);
            if let Some(identifier) = &catch.identifier {
                self.output.push(' ');
                self.output.push_str(identifier);
            }
            self.output.push(')');
        }
        if let Some(filter) = &catch.filter {
            self.output.push_str(" when (");
            self.write_expression(filter);
            self.output.push(')');
        }
        self.output.push('\n');
        self.write_block(&catch.block);
    }

    fn write_declaration(&mut self, declaration: &VariableDeclaration) {
        self.write_type(&declaration.type_syntax);
        self.output.push(' ');
        for (i, variable) in declaration.variables.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.output.push_str(&variable.name);
            if let Some(initializer) = &variable.initializer {
                self.output.push_str(" = ");
                self.write_expression(initializer);
            }
        }
    }

    fn write_type(&mut self, type_syntax: &TypeSyntax) {
        self.output.push_str(&type_text(type_syntax));
    }

    fn write_expression_list(&mut self, expressions: &[Expression]) {
        for (i, expression) in expressions.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_expression(expression);
        }
    }

    fn write_arguments(&mut self, arguments: &[Argument]) {
        self.output.push('(');
        for (i, argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            if let Some(name) = &argument.name {
                self.output.push_str(name);
                self.output.push_str(": ");
            }
            self.write_expression(&argument.expression);
        }
        self.output.push(')');
    }

    pub fn write_expression(&mut self, expression: &Expression) {
        self.write_expression_at(expression, Precedence::Assignment);
    }

    fn write_expression_at(&mut self, expression: &Expression, minimum: Precedence) {
        let needs_parens = precedence_of(expression) < minimum;
        if needs_parens {
            self.output.push('(');
        }
        self.write_expression_inner(expression);
        if needs_parens {
            self.output.push(')');
        }
    }

    fn write_expression_inner(&mut self, expression: &Expression) {
        match expression {
            Expression::Identifier(name) => self.output.push_str(name),
            Expression::Literal(literal) => self.output.push_str(&literal_text(literal)),
            Expression::This => self.output.push_str("this"),
            Expression::Base => self.output.push_str("base"),
            Expression::Default(type_syntax) => {
                self.output.push_str("default(");
                self.write_type(type_syntax);
                self.output.push(')');
            }
            Expression::MemberAccess { target, name } => {
                self.write_expression_at(target, Precedence::Primary);
                self.output.push('.');
                self.output.push_str(name);
            }
            Expression::MemberBinding(name) => {
                self.output.push('.');
                self.output.push_str(name);
            }
            Expression::ConditionalAccess {
                target,
                when_not_null,
            } => {
                self.write_expression_at(target, Precedence::Primary);
                self.output.push('?');
                self.write_expression_inner(when_not_null);
            }
            Expression::Invocation { target, arguments } => {
                self.write_expression_at(target, Precedence::Primary);
                self.write_arguments(arguments);
            }
            Expression::ElementAccess { target, arguments } => {
                self.write_expression_at(target, Precedence::Primary);
                self.output.push('[');
                self.write_expression_list(arguments);
                self.output.push(']');
            }
            Expression::Assignment {
                operator,
                left,
                right,
            } => {
                self.write_expression_at(left, Precedence::Unary);
                self.output.push(' ');
                self.output.push_str(operator.as_str());
                self.output.push(' ');
                self.write_expression_at(right, Precedence::Assignment);
            }
            Expression::Binary {
                operator,
                left,
                right,
            } => {
                let precedence = binary_precedence(*operator);
                self.write_expression_at(left, precedence);
                self.output.push(' ');
                self.output.push_str(operator.as_str());
                self.output.push(' ');
                self.write_expression_at(right, precedence.next());
            }
            Expression::Logical {
                operator,
                left,
                right,
            } => {
                let precedence = logical_precedence(*operator);
                // `??` is right associative
                let (left_min, right_min) = if *operator == LogicalOperator::Coalesce {
                    (precedence.next(), precedence)
                } else {
                    (precedence, precedence.next())
                };
                self.write_expression_at(left, left_min);
                self.output.push(' ');
                self.output.push_str(operator.as_str());
                self.output.push(' ');
                self.write_expression_at(right, right_min);
            }
            Expression::Unary { operator, operand } => {
                self.output.push_str(operator.as_str());
                if starts_with_sign(*operator, operand) {
                    self.output.push(' ');
                }
                self.write_expression_at(operand, Precedence::Unary);
            }
            Expression::PostfixUpdate { operator, operand } => {
                self.write_expression_at(operand, Precedence::Primary);
                self.output.push_str(operator.as_str());
            }
            Expression::Parenthesized(inner) => {
                self.output.push('(');
                self.write_expression(inner);
                self.output.push(')');
            }
            Expression::ArrayCreation {
                element_type,
                sizes,
            } => {
                // Jagged suffixes follow the sized dimension: `new int[n][]`
                let mut base = element_type;
                let mut suffixes = Vec::new();
                while let TypeSyntax::Array { element, rank } = base {
                    suffixes.push(*rank);
                    base = element;
                }
                self.output.push_str("new ");
                self.write_type(base);
                self.output.push('[');
                self.write_expression_list(sizes);
                self.output.push(']');
                for rank in suffixes.into_iter().rev() {
                    self.output.push_str(&rank_suffix(rank));
                }
            }
            Expression::ObjectCreation {
                type_syntax,
                arguments,
            } => {
                self.output.push_str("new ");
                self.write_type(type_syntax);
                self.write_arguments(arguments);
            }
            Expression::Cast {
                type_syntax,
                expression,
            } => {
                self.output.push('(');
                self.write_type(type_syntax);
                self.output.push(')');
                self.write_expression_at(expression, Precedence::Unary);
            }
            Expression::As {
                expression,
                type_syntax,
            } => {
                self.write_expression_at(expression, Precedence::Relational);
                self.output.push_str(" as ");
                self.write_type(type_syntax);
            }
            Expression::Conditional {
                condition,
                when_true,
                when_false,
            } => {
                self.write_expression_at(condition, Precedence::Coalesce);
                self.output.push_str(" ? ");
                self.write_expression_at(when_true, Precedence::Conditional);
                self.output.push_str(" : ");
                self.write_expression_at(when_false, Precedence::Conditional);
            }
            Expression::Lambda { parameters, body } => {
                self.output.push('(');
                self.output.push_str(&parameters.join(", "));
                self.output.push_str(") =>");
                match body {
                    LambdaBody::Expression(expression) => {
                        self.output.push(' ');
                        self.write_expression_at(expression, Precedence::Assignment);
                    }
                    LambdaBody::Block(statements) => {
                        self.output.push('\n');
                        self.write_line("{");
                        self.indent += 1;
                        self.write_statements(statements);
                        self.indent -= 1;
                        self.write_indent();
                        self.output.push('}');
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Assignment,
    Conditional,
    Coalesce,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Unary,
    Primary,
}

impl Precedence {
    fn next(self) -> Self {
        match self {
            Precedence::Assignment => Precedence::Conditional,
            Precedence::Conditional => Precedence::Coalesce,
            Precedence::Coalesce => Precedence::LogicalOr,
            Precedence::LogicalOr => Precedence::LogicalAnd,
            Precedence::LogicalAnd => Precedence::BitwiseOr,
            Precedence::BitwiseOr => Precedence::BitwiseXor,
            Precedence::BitwiseXor => Precedence::BitwiseAnd,
            Precedence::BitwiseAnd => Precedence::Equality,
            Precedence::Equality => Precedence::Relational,
            Precedence::Relational => Precedence::Shift,
            Precedence::Shift => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative => Precedence::Unary,
            Precedence::Unary | Precedence::Primary => Precedence::Primary,
        }
    }
}

fn binary_precedence(operator: BinaryOperator) -> Precedence {
    match operator {
        BinaryOperator::Multiplication
        | BinaryOperator::Division
        | BinaryOperator::Remainder
        | BinaryOperator::Exponential => Precedence::Multiplicative,
        BinaryOperator::Addition | BinaryOperator::Subtraction => Precedence::Additive,
        BinaryOperator::ShiftLeft
        | BinaryOperator::ShiftRight
        | BinaryOperator::ShiftRightZeroFill => Precedence::Shift,
        BinaryOperator::LessThan
        | BinaryOperator::LessEqualThan
        | BinaryOperator::GreaterThan
        | BinaryOperator::GreaterEqualThan
        | BinaryOperator::In
        | BinaryOperator::Instanceof => Precedence::Relational,
        BinaryOperator::Equality
        | BinaryOperator::Inequality
        | BinaryOperator::StrictEquality
        | BinaryOperator::StrictInequality => Precedence::Equality,
        BinaryOperator::BitwiseAnd => Precedence::BitwiseAnd,
        BinaryOperator::BitwiseXOR => Precedence::BitwiseXor,
        BinaryOperator::BitwiseOR => Precedence::BitwiseOr,
    }
}

fn logical_precedence(operator: LogicalOperator) -> Precedence {
    match operator {
        LogicalOperator::And => Precedence::LogicalAnd,
        LogicalOperator::Or => Precedence::LogicalOr,
        LogicalOperator::Coalesce => Precedence::Coalesce,
    }
}

fn precedence_of(expression: &Expression) -> Precedence {
    match expression {
        Expression::Assignment { .. } | Expression::Lambda { .. } => Precedence::Assignment,
        Expression::Conditional { .. } => Precedence::Conditional,
        Expression::Logical { operator, .. } => logical_precedence(*operator),
        Expression::Binary { operator, .. } => binary_precedence(*operator),
        Expression::As { .. } => Precedence::Relational,
        Expression::Unary { .. } | Expression::Cast { .. } => Precedence::Unary,
        Expression::Literal(Literal::Integer(value)) if *value < 0 => Precedence::Unary,
        Expression::Literal(Literal::Double(value)) if value.is_sign_negative() => {
            Precedence::Unary
        }
        _ => Precedence::Primary,
    }
}

/// `- -x` must not print as the decrement `--x`
fn starts_with_sign(operator: UnaryOperator, operand: &Expression) -> bool {
    let sign = match operator {
        UnaryOperator::UnaryNegation => '-',
        UnaryOperator::UnaryPlus => '+',
        _ => return false,
    };
    match operand {
        Expression::Unary { operator, .. } => operator.as_str().starts_with(sign),
        Expression::Literal(literal) => literal_text(literal).starts_with(sign),
        _ => false,
    }
}

fn comment_text(text: &str) -> String {
    if text.is_empty() {
        "//".to_string()
    } else if text.starts_with(' ') {
        format!("//{}", text)
    } else {
        format!("// {}", text)
    }
}

fn rank_suffix(rank: usize) -> String {
    format!("[{}]", ",".repeat(rank.saturating_sub(1)))
}

pub fn type_text(type_syntax: &TypeSyntax) -> String {
    match type_syntax {
        TypeSyntax::Var => "var".to_string(),
        TypeSyntax::Named(name) => name.clone(),
        TypeSyntax::Array { element, rank } => {
            format!("{}{}", type_text(element), rank_suffix(*rank))
        }
    }
}

/// Render one expression as C# source text
pub fn expression_text(expression: &Expression) -> String {
    let mut writer = CSharpWriter::new();
    writer.write_expression(expression);
    writer.finish()
}

pub fn literal_text(literal: &Literal) -> String {
    match literal {
        Literal::Null => "null".to_string(),
        Literal::Boolean(value) => value.to_string(),
        Literal::Integer(value) => value.to_string(),
        Literal::Double(value) => {
            if value.fract() == 0.0 && value.is_finite() {
                format!("{:.1}", value)
            } else {
                value.to_string()
            }
        }
        Literal::String(value) => format!("\"{}\"", escape(value, '"')),
        Literal::Char(value) => format!("'{}'", escape(&value.to_string(), '\'')),
    }
}

fn escape(value: &str, quote: char) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            c if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ast::{Trivia, VariableDeclarator};
    use oxc_syntax::operator::{AssignmentOperator, UpdateOperator};

    fn call(name: &str) -> Statement {
        Statement::new(StatementKind::Expression(Expression::invoke(
            Expression::identifier(name),
            vec![],
        )))
    }

    #[test]
    fn test_if_else_chain_prints_flat() {
        let inner = Statement::new(StatementKind::If {
            condition: Expression::identifier("b"),
            then_branch: Box::new(Statement::new(StatementKind::Block(vec![call("Two")]))),
            else_branch: Some(Box::new(Statement::new(StatementKind::Block(vec![call(
                "Three",
            )])))),
        });
        let outer = Statement::new(StatementKind::If {
            condition: Expression::identifier("a"),
            then_branch: Box::new(Statement::new(StatementKind::Block(vec![call("One")]))),
            else_branch: Some(Box::new(inner)),
        });

        let output = CSharpWriter::emit(&[outer]);
        assert_eq!(
            output,
            "if (a)\n{\n    One();\n}\nelse if (b)\n{\n    Two();\n}\nelse\n{\n    Three();\n}\n"
        );
    }

    #[test]
    fn test_embedded_statement_is_indented() {
        let statement = Statement::new(StatementKind::While {
            condition: Expression::identifier("running"),
            body: Box::new(call("Tick")),
        });
        assert_eq!(
            CSharpWriter::emit(&[statement]),
            "while (running)\n    Tick();\n"
        );
    }

    #[test]
    fn test_comments_are_placed() {
        let statement = call("Save").with_trivia(Trivia {
            leading: vec![Comment {
                text: "persist".to_string(),
            }],
            trailing: vec![Comment {
                text: "best effort".to_string(),
            }],
        });
        assert_eq!(
            CSharpWriter::emit(&[statement.clone()]),
            "// persist\nSave(); // best effort\n"
        );

        let mut writer = CSharpWriter::new().with_comments(false);
        writer.write_statement(&statement);
        assert_eq!(writer.finish(), "Save();\n");
    }

    #[test]
    fn test_trailing_comment_lands_after_closing_brace() {
        let guard = Statement::new(StatementKind::If {
            condition: Expression::identifier("ok"),
            then_branch: Box::new(Statement::new(StatementKind::Block(vec![call("Run")]))),
            else_branch: None,
        })
        .with_trivia(Trivia {
            leading: vec![],
            trailing: vec![Comment {
                text: "done".to_string(),
            }],
        });
        assert_eq!(
            CSharpWriter::emit(&[guard]),
            "if (ok)\n{\n    Run();\n} // done\n"
        );
    }

    #[test]
    fn test_precedence_adds_parentheses() {
        let sum = Expression::binary(
            BinaryOperator::Addition,
            Expression::identifier("a"),
            Expression::identifier("b"),
        );
        let product = Expression::binary(
            BinaryOperator::Multiplication,
            sum.clone(),
            Expression::identifier("c"),
        );
        let subtraction = Expression::binary(
            BinaryOperator::Subtraction,
            Expression::identifier("x"),
            sum,
        );
        let mut writer = CSharpWriter::new();
        writer.write_expression(&product);
        assert_eq!(writer.finish(), "(a + b) * c");

        let mut writer = CSharpWriter::new();
        writer.write_expression(&subtraction);
        assert_eq!(writer.finish(), "x - (a + b)");
    }

    #[test]
    fn test_double_negation_keeps_space() {
        let expression = Expression::unary(
            UnaryOperator::UnaryNegation,
            Expression::unary(UnaryOperator::UnaryNegation, Expression::identifier("x")),
        );
        let mut writer = CSharpWriter::new();
        writer.write_expression(&expression);
        assert_eq!(writer.finish(), "- -x");
    }

    #[test]
    fn test_for_loop_header() {
        let statement = Statement::new(StatementKind::For {
            declaration: Some(VariableDeclaration::single(
                TypeSyntax::named("int"),
                "i",
                Some(Expression::integer(0)),
            )),
            initializers: vec![],
            condition: Expression::binary(
                BinaryOperator::LessEqualThan,
                Expression::identifier("i"),
                Expression::integer(9),
            ),
            incrementors: vec![Expression::PostfixUpdate {
                operator: UpdateOperator::Increment,
                operand: Box::new(Expression::identifier("i")),
            }],
            body: Box::new(Statement::new(StatementKind::Block(vec![]))),
        });
        assert_eq!(
            CSharpWriter::emit(&[statement]),
            "for (int i = 0; i <= 9; i++)\n{\n}\n"
        );
    }

    #[test]
    fn test_switch_with_guarded_label() {
        let statement = Statement::new(StatementKind::Switch {
            expression: Expression::identifier("x"),
            sections: vec![
                SwitchSection {
                    labels: vec![
                        SwitchLabel::Case(Expression::integer(1)),
                        SwitchLabel::Guarded {
                            guard: Expression::binary(
                                BinaryOperator::GreaterThan,
                                Expression::identifier("x"),
                                Expression::integer(5),
                            ),
                        },
                    ],
                    statements: vec![Statement::new(StatementKind::Break)],
                },
                SwitchSection {
                    labels: vec![SwitchLabel::Default],
                    statements: vec![Statement::new(StatementKind::Break)],
                },
            ],
        });
        assert_eq!(
            CSharpWriter::emit(&[statement]),
            "switch (x)\n{\n    case 1:\n    case object _ when x > 5:\n        break;\n    default:\n        break;\n}\n"
        );
    }

    #[test]
    fn test_nested_using_statements_stack() {
        let declaration = |name: &str| VariableDeclaration {
            type_syntax: TypeSyntax::Var,
            variables: vec![VariableDeclarator {
                name: name.to_string(),
                initializer: Some(Expression::identifier("Open")),
            }],
        };
        let inner = Statement::new(StatementKind::Using {
            declaration: Some(declaration("b")),
            expression: None,
            body: Box::new(Statement::new(StatementKind::Block(vec![call("Use")]))),
        });
        let outer = Statement::new(StatementKind::Using {
            declaration: Some(declaration("a")),
            expression: None,
            body: Box::new(inner),
        });
        assert_eq!(
            CSharpWriter::emit(&[outer]),
            "using (var a = Open)\nusing (var b = Open)\n{\n    Use();\n}\n"
        );
    }

    #[test]
    fn test_array_creation_and_assignment() {
        let statement = Statement::new(StatementKind::Expression(Expression::assign(
            AssignmentOperator::Assign,
            Expression::identifier("grid"),
            Expression::ArrayCreation {
                element_type: TypeSyntax::array(TypeSyntax::named("int"), 1),
                sizes: vec![Expression::integer(10)],
            },
        )));
        assert_eq!(
            CSharpWriter::emit(&[statement]),
            "grid = new int[10][];\n"
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(literal_text(&Literal::String("say \"hi\"\n".into())), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(literal_text(&Literal::Char('\'')), "'\\''");
        assert_eq!(literal_text(&Literal::Double(2.0)), "2.0");
        assert_eq!(literal_text(&Literal::Double(0.25)), "0.25");
    }
}
