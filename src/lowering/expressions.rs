//! Expression conversion
//!
//! Statement lowering hands every sub-expression to an [`ExpressionConverter`].
//! [`SyntacticExpressionConverter`] is the default: a mostly 1:1 mapping that
//! asks the oracle only where C# needs a decision VB leaves implicit.

use super::context::{ConversionContext, RoutineFrame};
use super::{convert_statement_list, ConversionError, ConversionResult};
use crate::cs;
use crate::semantics::TypeInfo;
use crate::vb::{self, BinaryOperator, CastKind, LambdaBody, LambdaKind, RoutineKind, UnaryOperator};
use log::{debug, warn};
use oxc_syntax::operator::{
    BinaryOperator as CsBinaryOperator, LogicalOperator, UnaryOperator as CsUnaryOperator,
};

pub static SYNTACTIC_EXPRESSION_CONVERTER: SyntacticExpressionConverter =
    SyntacticExpressionConverter;

/// Converts source expressions into target expressions
pub trait ExpressionConverter: Send + Sync {
    fn convert_expression(
        &self,
        expression: &vb::Expression,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::Expression>;

    fn convert_type(&self, type_name: &vb::TypeName) -> cs::TypeSyntax;

    fn convert_arguments(
        &self,
        arguments: &[vb::Argument],
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<Vec<cs::Argument>> {
        arguments
            .iter()
            .map(|argument| {
                Ok(cs::Argument {
                    name: argument.name.as_deref().map(escape_identifier),
                    expression: self.convert_expression(&argument.value, ctx)?,
                })
            })
            .collect()
    }
}

/// Default expression converter
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntacticExpressionConverter;

const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Prefix C# keywords with `@` so they stay usable as identifiers
pub fn escape_identifier(name: &str) -> String {
    if CSHARP_KEYWORDS.contains(&name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

/// C# keyword for a VB intrinsic type name, if it has one
pub fn predefined_type(name: &str) -> Option<&'static str> {
    let keyword = match name.to_ascii_lowercase().as_str() {
        "boolean" => "bool",
        "byte" => "byte",
        "sbyte" => "sbyte",
        "short" => "short",
        "ushort" => "ushort",
        "integer" => "int",
        "uinteger" => "uint",
        "long" => "long",
        "ulong" => "ulong",
        "single" => "float",
        "double" => "double",
        "decimal" => "decimal",
        "char" => "char",
        "string" => "string",
        "object" => "object",
        "date" => "DateTime",
        _ => return None,
    };
    Some(keyword)
}

/// Target type syntax for a type the oracle reported
pub fn type_syntax_from_info(type_info: &TypeInfo) -> cs::TypeSyntax {
    match &type_info.element_type {
        Some(element) => cs::TypeSyntax::array(type_syntax_from_info(element), type_info.rank.max(1)),
        None => cs::TypeSyntax::named(type_info.name.clone()),
    }
}

fn convert_literal(literal: &vb::Literal) -> cs::Literal {
    match literal {
        vb::Literal::Nothing => cs::Literal::Null,
        vb::Literal::Boolean(b) => cs::Literal::Boolean(*b),
        vb::Literal::Integer(n) => cs::Literal::Integer(*n),
        vb::Literal::Double(n) => cs::Literal::Double(*n),
        vb::Literal::String(s) => cs::Literal::String(s.clone()),
        vb::Literal::Char(c) => cs::Literal::Char(*c),
    }
}

/// Whether an operand reads as a boolean without asking the oracle
fn is_syntactically_boolean(expression: &vb::Expression) -> bool {
    match expression.skip_parens() {
        vb::Expression::Literal {
            value: vb::Literal::Boolean(_),
        } => true,
        vb::Expression::Binary { operator, .. } => matches!(
            operator,
            BinaryOperator::Equals
                | BinaryOperator::NotEquals
                | BinaryOperator::LessThan
                | BinaryOperator::LessThanOrEqual
                | BinaryOperator::GreaterThan
                | BinaryOperator::GreaterThanOrEqual
                | BinaryOperator::AndAlso
                | BinaryOperator::OrElse
                | BinaryOperator::Is
                | BinaryOperator::IsNot
        ),
        vb::Expression::Unary {
            operator: UnaryOperator::Not,
            operand,
        } => is_syntactically_boolean(operand),
        _ => false,
    }
}

impl SyntacticExpressionConverter {
    fn convert_binary(
        &self,
        operator: BinaryOperator,
        left: &vb::Expression,
        right: &vb::Expression,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::Expression> {
        let target = match operator {
            BinaryOperator::Add | BinaryOperator::Concatenate => Some(CsBinaryOperator::Addition),
            BinaryOperator::Subtract => Some(CsBinaryOperator::Subtraction),
            BinaryOperator::Multiply => Some(CsBinaryOperator::Multiplication),
            BinaryOperator::Divide => Some(CsBinaryOperator::Division),
            BinaryOperator::IntegerDivide => {
                debug!("Integer division `\\` lowered to `/`");
                Some(CsBinaryOperator::Division)
            }
            BinaryOperator::Modulo => Some(CsBinaryOperator::Remainder),
            BinaryOperator::Equals | BinaryOperator::Is => Some(CsBinaryOperator::Equality),
            BinaryOperator::NotEquals | BinaryOperator::IsNot => {
                Some(CsBinaryOperator::Inequality)
            }
            BinaryOperator::LessThan => Some(CsBinaryOperator::LessThan),
            BinaryOperator::LessThanOrEqual => Some(CsBinaryOperator::LessEqualThan),
            BinaryOperator::GreaterThan => Some(CsBinaryOperator::GreaterThan),
            BinaryOperator::GreaterThanOrEqual => Some(CsBinaryOperator::GreaterEqualThan),
            BinaryOperator::And => Some(CsBinaryOperator::BitwiseAnd),
            BinaryOperator::Or => Some(CsBinaryOperator::BitwiseOR),
            BinaryOperator::Xor => Some(CsBinaryOperator::BitwiseXOR),
            BinaryOperator::LeftShift => Some(CsBinaryOperator::ShiftLeft),
            BinaryOperator::RightShift => Some(CsBinaryOperator::ShiftRight),
            BinaryOperator::AndAlso | BinaryOperator::OrElse | BinaryOperator::Power => None,
            BinaryOperator::Like => {
                return Err(ConversionError::unsupported(
                    "Like operator",
                    "pattern matching has no C# operator equivalent",
                ))
            }
        };

        let left = self.convert_expression(left, ctx)?;
        let right = self.convert_expression(right, ctx)?;
        Ok(match (target, operator) {
            (Some(op), _) => cs::Expression::binary(op, left, right),
            (None, BinaryOperator::AndAlso) => {
                cs::Expression::logical(LogicalOperator::And, left, right)
            }
            (None, BinaryOperator::OrElse) => {
                cs::Expression::logical(LogicalOperator::Or, left, right)
            }
            (None, _) => cs::Expression::invoke(
                cs::Expression::member(cs::Expression::identifier("Math"), "Pow"),
                vec![left, right],
            ),
        })
    }

    fn convert_not(
        &self,
        operand: &vb::Expression,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::Expression> {
        let is_boolean = match ctx.oracle.type_of(operand) {
            Some(type_info) => type_info.is_boolean(),
            None => {
                let syntactic = is_syntactically_boolean(operand);
                if !syntactic {
                    warn!("No type for `{}`; lowering `Not` as logical negation", operand);
                }
                true
            }
        };
        let operator = if is_boolean {
            CsUnaryOperator::LogicalNot
        } else {
            CsUnaryOperator::BitwiseNot
        };
        Ok(cs::Expression::unary(operator, self.convert_expression(operand, ctx)?))
    }

    fn convert_lambda(
        &self,
        id: vb::RoutineId,
        kind: LambdaKind,
        parameters: &[String],
        is_iterator: bool,
        body: &LambdaBody,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::Expression> {
        let parameters = parameters.iter().map(|p| escape_identifier(p)).collect();
        let body = match body {
            LambdaBody::Expression { expression } => {
                cs::LambdaBody::Expression(Box::new(self.convert_expression(expression, ctx)?))
            }
            LambdaBody::Statements { statements } => {
                let kind = match kind {
                    LambdaKind::Sub => RoutineKind::Sub,
                    LambdaKind::Function => RoutineKind::Function,
                };
                let mut scope = ctx.enter_routine(RoutineFrame {
                    id,
                    kind,
                    is_iterator,
                });
                cs::LambdaBody::Block(convert_statement_list(statements, &mut scope)?)
            }
        };
        Ok(cs::Expression::Lambda { parameters, body })
    }
}

impl ExpressionConverter for SyntacticExpressionConverter {
    fn convert_expression(
        &self,
        expression: &vb::Expression,
        ctx: &mut ConversionContext<'_>,
    ) -> ConversionResult<cs::Expression> {
        Ok(match expression {
            vb::Expression::Identifier { name } => cs::Expression::Identifier(escape_identifier(name)),
            vb::Expression::Literal { value } => cs::Expression::Literal(convert_literal(value)),
            vb::Expression::Me | vb::Expression::MyClass => cs::Expression::This,
            vb::Expression::MyBase => cs::Expression::Base,
            vb::Expression::MemberAccess { target, name } => {
                let target = match target {
                    Some(target) => self.convert_expression(target, ctx)?,
                    None => match ctx.current_with_block() {
                        Some(with_name) => cs::Expression::identifier(with_name),
                        None => {
                            return Err(ConversionError::unsupported(
                                format!("member access `.{}`", name),
                                "implicit member access outside a With block",
                            ))
                        }
                    },
                };
                cs::Expression::member(target, name.clone())
            }
            vb::Expression::Invocation { target, arguments } => cs::Expression::Invocation {
                target: Box::new(self.convert_expression(target, ctx)?),
                arguments: self.convert_arguments(arguments, ctx)?,
            },
            vb::Expression::Index { target, arguments } => cs::Expression::ElementAccess {
                target: Box::new(self.convert_expression(target, ctx)?),
                arguments: arguments
                    .iter()
                    .map(|argument| self.convert_expression(argument, ctx))
                    .collect::<ConversionResult<_>>()?,
            },
            vb::Expression::Binary {
                operator,
                left,
                right,
            } => self.convert_binary(*operator, left, right, ctx)?,
            vb::Expression::Unary { operator, operand } => match operator {
                UnaryOperator::Not => self.convert_not(operand, ctx)?,
                UnaryOperator::Minus => cs::Expression::unary(
                    CsUnaryOperator::UnaryNegation,
                    self.convert_expression(operand, ctx)?,
                ),
                UnaryOperator::Plus => cs::Expression::unary(
                    CsUnaryOperator::UnaryPlus,
                    self.convert_expression(operand, ctx)?,
                ),
            },
            vb::Expression::Parenthesized { expression } => {
                cs::Expression::Parenthesized(Box::new(self.convert_expression(expression, ctx)?))
            }
            vb::Expression::New {
                type_name,
                arguments,
            } => cs::Expression::ObjectCreation {
                type_syntax: self.convert_type(type_name),
                arguments: self.convert_arguments(arguments, ctx)?,
            },
            vb::Expression::Cast {
                kind,
                expression,
                type_name,
            } => {
                let type_syntax = self.convert_type(type_name);
                let expression = Box::new(self.convert_expression(expression, ctx)?);
                match kind {
                    CastKind::CType | CastKind::DirectCast => cs::Expression::Cast {
                        type_syntax,
                        expression,
                    },
                    CastKind::TryCast => cs::Expression::As {
                        expression,
                        type_syntax,
                    },
                }
            }
            vb::Expression::TernaryIf {
                condition,
                when_true,
                when_false,
            } => cs::Expression::Conditional {
                condition: Box::new(self.convert_expression(condition, ctx)?),
                when_true: Box::new(self.convert_expression(when_true, ctx)?),
                when_false: Box::new(self.convert_expression(when_false, ctx)?),
            },
            vb::Expression::BinaryIf { value, fallback } => cs::Expression::logical(
                LogicalOperator::Coalesce,
                self.convert_expression(value, ctx)?,
                self.convert_expression(fallback, ctx)?,
            ),
            vb::Expression::AddressOf { target } => self.convert_expression(target, ctx)?,
            vb::Expression::Lambda {
                id,
                kind,
                parameters,
                is_iterator,
                body,
            } => self.convert_lambda(*id, *kind, parameters, *is_iterator, body, ctx)?,
        })
    }

    fn convert_type(&self, type_name: &vb::TypeName) -> cs::TypeSyntax {
        let mut name = match predefined_type(&type_name.name) {
            Some(keyword) => keyword.to_string(),
            None => type_name.name.clone(),
        };
        if !type_name.arguments.is_empty() {
            let arguments: Vec<String> = type_name
                .arguments
                .iter()
                .map(|argument| cs::codegen::type_text(&self.convert_type(argument)))
                .collect();
            name = format!("{}<{}>", name, arguments.join(", "));
        }
        let element = cs::TypeSyntax::Named(name);
        if type_name.rank > 0 {
            cs::TypeSyntax::array(element, type_name.rank)
        } else {
            element
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::codegen::CSharpWriter;
    use crate::semantics::SymbolTable;

    fn render(expression: &vb::Expression, table: &SymbolTable) -> String {
        let mut ctx = ConversionContext::new(table);
        let converted = ctx.convert_expression(expression).unwrap();
        let mut writer = CSharpWriter::new();
        writer.write_expression(&converted);
        writer.finish()
    }

    #[test]
    fn test_operators_map_to_csharp() {
        let table = SymbolTable::new();
        let concat = vb::Expression::binary(
            BinaryOperator::Concatenate,
            vb::Expression::string("a"),
            vb::Expression::identifier("b"),
        );
        assert_eq!(render(&concat, &table), "\"a\" + b");

        let power = vb::Expression::binary(
            BinaryOperator::Power,
            vb::Expression::identifier("x"),
            vb::Expression::integer(2),
        );
        assert_eq!(render(&power, &table), "Math.Pow(x, 2)");

        let short_circuit = vb::Expression::binary(
            BinaryOperator::AndAlso,
            vb::Expression::identifier("a"),
            vb::Expression::binary(
                BinaryOperator::IsNot,
                vb::Expression::identifier("b"),
                vb::Expression::Literal {
                    value: vb::Literal::Nothing,
                },
            ),
        );
        assert_eq!(render(&short_circuit, &table), "a && b != null");
    }

    #[test]
    fn test_not_uses_operand_type() {
        let table = SymbolTable::new()
            .with_type("flags", TypeInfo::value_type("int"))
            .with_type("done", TypeInfo::value_type("bool"));
        let not_flags = vb::Expression::Unary {
            operator: UnaryOperator::Not,
            operand: Box::new(vb::Expression::identifier("flags")),
        };
        let not_done = vb::Expression::Unary {
            operator: UnaryOperator::Not,
            operand: Box::new(vb::Expression::identifier("done")),
        };
        assert_eq!(render(&not_flags, &table), "~flags");
        assert_eq!(render(&not_done, &table), "!done");
    }

    #[test]
    fn test_like_is_unsupported() {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        let like = vb::Expression::binary(
            BinaryOperator::Like,
            vb::Expression::identifier("name"),
            vb::Expression::string("A*"),
        );
        assert!(matches!(
            ctx.convert_expression(&like),
            Err(ConversionError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_implicit_member_access_needs_with_block() {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        let implicit = vb::Expression::MemberAccess {
            target: None,
            name: "Text".to_string(),
        };
        assert!(ctx.convert_expression(&implicit).is_err());

        let mut scope = ctx.enter_with_block("withBlock".to_string());
        let converted = scope.convert_expression(&implicit).unwrap();
        assert_eq!(
            converted,
            cs::Expression::member(cs::Expression::identifier("withBlock"), "Text")
        );
    }

    #[test]
    fn test_types_and_keywords() {
        let converter = SyntacticExpressionConverter;
        let list = vb::TypeName {
            name: "Dictionary".to_string(),
            arguments: vec![vb::TypeName::simple("String"), vb::TypeName::simple("Integer")],
            rank: 0,
        };
        assert_eq!(
            converter.convert_type(&list),
            cs::TypeSyntax::named("Dictionary<string, int>")
        );
        assert_eq!(
            converter.convert_type(&vb::TypeName::array_of(vb::TypeName::simple("Byte"), 1)),
            cs::TypeSyntax::array(cs::TypeSyntax::named("byte"), 1)
        );
        assert_eq!(escape_identifier("string"), "@string");
        assert_eq!(escape_identifier("total"), "total");
    }
}
