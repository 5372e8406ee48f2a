//! `ReDim` and `Erase`

use super::context::ConversionContext;
use super::expressions::type_syntax_from_info;
use super::names::{to_pascal_case, unique_name_in_scope};
use super::{ConversionError, ConversionResult};
use crate::cs::{self, codegen::expression_text, Statement};
use crate::vb::{self, ReDimStatement, StatementNode};
use oxc_syntax::operator::{AssignmentOperator, BinaryOperator};

/// Length of a dimension declared with upper bound `bound`
pub(crate) fn array_length(
    bound: &vb::Expression,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<cs::Expression> {
    if let Some(upper) = ctx
        .oracle
        .constant_value_of(bound)
        .and_then(|value| value.as_i32())
    {
        return Ok(cs::Expression::integer(i64::from(upper) + 1));
    }
    let upper = ctx.convert_expression(bound)?;
    Ok(cs::Expression::binary(
        BinaryOperator::Addition,
        upper,
        cs::Expression::integer(1),
    ))
}

pub fn lower_erase(
    targets: &[vb::Expression],
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    targets
        .iter()
        .map(|target| {
            let target = ctx.convert_expression(target)?;
            Ok(ctx.builder.create_assignment_statement(
                AssignmentOperator::Assign,
                target,
                cs::Expression::null(),
            ))
        })
        .collect()
}

pub fn lower_redim(
    node: &StatementNode,
    statement: &ReDimStatement,
    ctx: &mut ConversionContext<'_>,
) -> ConversionResult<Vec<Statement>> {
    let mut statements = Vec::new();

    for clause in &statement.clauses {
        let element_type = ctx
            .oracle
            .converted_type_of(&clause.target)
            .and_then(|array_type| array_type.element_type)
            .map(|element| type_syntax_from_info(&element))
            .ok_or_else(|| {
                ConversionError::MissingSemantics(format!(
                    "element type of ReDim target `{}`",
                    clause.target
                ))
            })?;

        let target = ctx.convert_expression(&clause.target)?;
        let sizes = clause
            .bounds
            .iter()
            .map(|bound| array_length(bound, ctx))
            .collect::<ConversionResult<Vec<_>>>()?;

        if !statement.preserve {
            statements.push(
                ctx.builder
                    .create_array_allocation(target, element_type, sizes),
            );
            continue;
        }

        if sizes.len() != 1 {
            return Err(ConversionError::unsupported(
                "ReDim Preserve",
                format!(
                    "only one-dimensional arrays can be preserved, `{}` has {}",
                    clause.target,
                    sizes.len()
                ),
            ));
        }

        let base = format!("old{}", to_pascal_case(&expression_text(&target)));
        let old_name = unique_name_in_scope(node, &base, ctx);
        let old = cs::Expression::identifier(old_name.as_str());
        let length = sizes[0].clone();

        statements.push(ctx.builder.create_variable_declaration(
            cs::TypeSyntax::Var,
            &old_name,
            Some(target.clone()),
        ));
        statements.push(
            ctx.builder
                .create_array_allocation(target.clone(), element_type, sizes),
        );

        let copied = cs::Expression::invoke(
            cs::Expression::member(cs::Expression::identifier("Math"), "Min"),
            vec![length, cs::Expression::member(old.clone(), "Length")],
        );
        let copy = ctx.builder.create_expression_statement(cs::Expression::invoke(
            cs::Expression::member(cs::Expression::identifier("Array"), "Copy"),
            vec![old.clone(), target, copied],
        ));
        statements.push(ctx.builder.create_not_null_guard(old, copy));
    }

    Ok(statements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::codegen::CSharpWriter;
    use crate::lowering::convert_statement;
    use crate::semantics::{SymbolKind, SymbolTable, TypeInfo};
    use crate::vb::{RedimClause, StatementKind};

    fn int_array(rank: usize) -> TypeInfo {
        TypeInfo::array_of(TypeInfo::value_type("int"), rank)
    }

    fn redim(preserve: bool, target: &str, bounds: Vec<vb::Expression>) -> StatementNode {
        StatementNode::new(StatementKind::ReDim(ReDimStatement {
            preserve,
            clauses: vec![RedimClause {
                target: vb::Expression::identifier(target),
                bounds,
            }],
        }))
        .with_span(10, 30)
    }

    #[test]
    fn test_redim_allocates_length_from_bounds() {
        let table = SymbolTable::new().with_type("grid", int_array(2));
        let mut ctx = ConversionContext::new(&table);
        let node = redim(
            false,
            "grid",
            vec![vb::Expression::integer(2), vb::Expression::identifier("n")],
        );

        let output = CSharpWriter::emit(&convert_statement(&node, &mut ctx).unwrap());
        assert_eq!(output, "grid = new int[3, n + 1];\n");
    }

    #[test]
    fn test_redim_preserve_copies_old_contents() {
        let table = SymbolTable::new().with_type("arr", int_array(1));
        let mut ctx = ConversionContext::new(&table);
        let node = redim(true, "arr", vec![vb::Expression::integer(4)]);

        let output = CSharpWriter::emit(&convert_statement(&node, &mut ctx).unwrap());
        assert_eq!(
            output,
            "var oldArr = arr;\n\
             arr = new int[5];\n\
             if (oldArr != null)\n    Array.Copy(oldArr, arr, Math.Min(5, oldArr.Length));\n"
        );
    }

    #[test]
    fn test_redim_preserve_avoids_visible_names() {
        let table = SymbolTable::new()
            .with_type("arr", int_array(1))
            .with_scope(0, 100, &[("oldArr", SymbolKind::Local)]);
        let mut ctx = ConversionContext::new(&table);
        let node = redim(true, "arr", vec![vb::Expression::integer(4)]);

        let statements = convert_statement(&node, &mut ctx).unwrap();
        let output = CSharpWriter::emit(&statements[..1]);
        assert_eq!(output, "var oldArr1 = arr;\n");
    }

    #[test]
    fn test_redim_preserve_of_matrix_is_unsupported() {
        let table = SymbolTable::new().with_type("grid", int_array(2));
        let mut ctx = ConversionContext::new(&table);
        let node = redim(
            true,
            "grid",
            vec![vb::Expression::integer(2), vb::Expression::integer(2)],
        );

        assert!(matches!(
            convert_statement(&node, &mut ctx),
            Err(ConversionError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_redim_without_type_information_fails() {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        let node = redim(false, "unknown", vec![vb::Expression::integer(1)]);

        assert!(matches!(
            convert_statement(&node, &mut ctx),
            Err(ConversionError::MissingSemantics(_))
        ));
    }

    #[test]
    fn test_erase_nulls_every_target() {
        let table = SymbolTable::new();
        let mut ctx = ConversionContext::new(&table);
        let node = StatementNode::new(StatementKind::Erase {
            targets: vec![vb::Expression::identifier("a"), vb::Expression::identifier("b")],
        });

        let output = CSharpWriter::emit(&convert_statement(&node, &mut ctx).unwrap());
        assert_eq!(output, "a = null;\nb = null;\n");
    }
}
