use super::utils::read_unit;
use crate::error::{Error as ConverterError, Result as ConverterResult};
use crate::vb::{RoutineKind, StatementKind, StatementNode};
use serde::Serialize;
use std::collections::BTreeMap;

/// Statement statistics for one routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutineSummary {
    pub name: String,
    pub kind: RoutineKind,
    pub is_iterator: bool,
    /// Statements at every nesting depth
    pub statements: usize,
    pub kinds: BTreeMap<String, usize>,
    /// Kinds with no lowering; converting the routine will fail on these
    pub unrecognized: Vec<String>,
}

fn count_statements(nodes: &[StatementNode], summary: &mut RoutineSummary) {
    for node in nodes {
        summary.statements += 1;
        *summary.kinds.entry(node.kind.name().to_string()).or_default() += 1;
        if let StatementKind::Unrecognized { kind } = &node.kind {
            if !summary.unrecognized.contains(kind) {
                summary.unrecognized.push(kind.clone());
            }
        }
        for list in node.child_statement_lists() {
            count_statements(list, summary);
        }
    }
}

/// Summarize every routine of a unit
pub fn summarize(unit: &crate::converter::ConversionUnit) -> Vec<RoutineSummary> {
    unit.routines
        .iter()
        .map(|routine| {
            let mut summary = RoutineSummary {
                name: routine.name.clone(),
                kind: routine.kind,
                is_iterator: routine.is_iterator,
                statements: 0,
                kinds: BTreeMap::new(),
                unrecognized: Vec::new(),
            };
            count_statements(&routine.statements, &mut summary);
            summary
        })
        .collect()
}

/// Run the inspect subcommand
pub fn inspect(input_path: &std::path::Path) -> ConverterResult<()> {
    let unit = read_unit(input_path)?;

    // Output as JSON
    match serde_json::to_string_pretty(&summarize(&unit)) {
        Ok(json) => {
            println!("{}", json);
            Ok(())
        }
        Err(_) => Err(ConverterError::internal(
            "Failed to serialize routine summary to JSON",
        )),
    }
}
