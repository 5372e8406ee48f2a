#![allow(dead_code)]

use std::fs;
use std::path::Path;
use vb2cs_rs::vb::{self, StatementKind};
use vb2cs_rs::{
    convert_statement, CSharpWriter, ConversionContext, ConversionUnit, StatementNode, SymbolTable,
};

/// `Name()` as a call statement
pub fn call(name: &str) -> StatementNode {
    StatementNode::new(StatementKind::Call {
        invocation: vb::Expression::call(vb::Expression::identifier(name), vec![]),
    })
}

/// Convert one node in a fresh context and print it
pub fn emit(node: &StatementNode, table: &SymbolTable) -> String {
    let mut ctx = ConversionContext::new(table);
    let statements = convert_statement(node, &mut ctx).expect("statement should convert");
    CSharpWriter::emit(&statements)
}

/// Load a fixture unit, or `None` when the fixture is not present
pub fn load_unit(path: &str) -> Option<ConversionUnit> {
    let path = Path::new(path);
    if !path.exists() {
        eprintln!("missing fixture {:?}; skipping test", path);
        return None;
    }
    let json = fs::read_to_string(path).ok()?;
    Some(ConversionUnit::from_json(&json).expect("fixture should parse"))
}
