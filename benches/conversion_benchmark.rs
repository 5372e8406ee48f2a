use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vb2cs_rs::vb::{
    self, AssignmentOperator, AssignmentStatement, RoutineId, RoutineKind, StatementKind, WhileBlock,
    WithBlock,
};
use vb2cs_rs::{ConversionUnit, Converter, RoutineBody, StatementNode, SymbolTable};

fn routine(id: u32) -> RoutineBody {
    let assign = StatementNode::new(StatementKind::Assignment(AssignmentStatement {
        operator: AssignmentOperator::AddAssign,
        left: vb::Expression::MemberAccess {
            target: None,
            name: "Count".to_string(),
        },
        right: vb::Expression::integer(1),
    }))
    .with_span(20, 40)
    .with_trailing_comment("tick");
    let body = StatementNode::new(StatementKind::While(WhileBlock {
        condition: vb::Expression::identifier("running"),
        statements: vec![assign],
    }))
    .with_span(10, 50);
    let with = StatementNode::new(StatementKind::With(WithBlock {
        expression: vb::Expression::identifier("counter"),
        statements: vec![body],
    }))
    .with_span(0, 60);

    RoutineBody {
        id: RoutineId(id),
        name: format!("Tick{}", id),
        kind: RoutineKind::Sub,
        is_iterator: false,
        statements: vec![with],
    }
}

fn conversion_benchmark(c: &mut Criterion) {
    let unit = ConversionUnit {
        routines: (0..200).map(routine).collect(),
        semantics: SymbolTable::new(),
    };
    let converter = Converter::default();

    c.bench_function("convert_unit_200_routines", |b| {
        b.iter(|| {
            black_box(converter.convert_unit(black_box(&unit)).unwrap());
        });
    });
}

criterion_group!(benches, conversion_benchmark);
criterion_main!(benches);
