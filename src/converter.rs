//! Conversion orchestration
//!
//! Drives statement lowering over whole routines and prints the result. Every
//! routine gets its own context, so routines convert independently and in
//! parallel.

use crate::cs::{CSharpWriter, Statement};
use crate::error::{Error, Result};
use crate::lowering::{convert_statement_list, ConversionContext, ConversionResult, RoutineFrame};
use crate::semantics::{SemanticOracle, SymbolTable};
use crate::vb::{RoutineBody, RoutineKind};
use log::{debug, error, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// What to do when a routine fails to convert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorPolicy {
    /// Abort on the first failed routine
    #[default]
    Fail,
    /// Emit a `// CONVERSION ERROR` block for the routine and keep going
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub include_comments: bool,
    pub on_error: ErrorPolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            include_comments: true,
            on_error: ErrorPolicy::Fail,
        }
    }
}

/// A whole input document: routine bodies plus what is known about them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionUnit {
    pub routines: Vec<RoutineBody>,
    #[serde(default)]
    pub semantics: SymbolTable,
}

impl ConversionUnit {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Main converter struct
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Lower a routine body with the routine's frame on the context stack
    pub fn lower_routine(
        &self,
        routine: &RoutineBody,
        oracle: &dyn SemanticOracle,
    ) -> ConversionResult<Vec<Statement>> {
        let mut ctx = ConversionContext::new(oracle);
        let mut scope = ctx.enter_routine(RoutineFrame {
            id: routine.id,
            kind: routine.kind,
            is_iterator: routine.is_iterator,
        });
        convert_statement_list(&routine.statements, &mut scope)
    }

    /// Convert one routine body to C# text
    pub fn convert_routine(&self, routine: &RoutineBody, oracle: &dyn SemanticOracle) -> Result<String> {
        debug!(
            "Converting {} `{}` ({} statements)",
            kind_keyword(routine.kind),
            routine.name,
            routine.statements.len()
        );

        match self.lower_routine(routine, oracle) {
            Ok(statements) => Ok(self.render(routine, &statements)),
            Err(err) => match self.options.on_error {
                ErrorPolicy::Fail => Err(Error::conversion(routine.name.as_str(), err)),
                ErrorPolicy::Placeholder => {
                    error!("Failed to convert `{}`: {}", routine.name, err);
                    Ok(self.render_placeholder(routine, &err.to_string()))
                }
            },
        }
    }

    /// Convert every routine of a unit, keeping input order
    pub fn convert_unit(&self, unit: &ConversionUnit) -> Result<String> {
        let oracle: &dyn SemanticOracle = &unit.semantics;
        let start_time = std::time::Instant::now();

        let routines: Vec<String> = unit
            .routines
            .par_iter()
            .map(|routine| self.convert_routine(routine, oracle))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Converted {} routines in {:.2?}",
            routines.len(),
            start_time.elapsed()
        );
        Ok(routines.join("\n"))
    }

    fn header(routine: &RoutineBody) -> String {
        format!("{} {}", kind_keyword(routine.kind), routine.name)
    }

    fn render(&self, routine: &RoutineBody, statements: &[Statement]) -> String {
        let mut writer = CSharpWriter::new().with_comments(self.options.include_comments);
        writer.write_comment_line(&Self::header(routine));
        writer.write_block(statements);
        writer.finish()
    }

    fn render_placeholder(&self, routine: &RoutineBody, message: &str) -> String {
        let mut writer = CSharpWriter::new();
        writer.write_comment_line(&Self::header(routine));
        writer.open_block();
        writer.write_comment_line(&format!("CONVERSION ERROR: {}", message));
        writer.close_block();
        writer.finish()
    }
}

fn kind_keyword(kind: RoutineKind) -> &'static str {
    match kind {
        RoutineKind::Sub => "Sub",
        RoutineKind::Function => "Function",
    }
}
