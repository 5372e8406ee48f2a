//! Command-line interface module
//!
//! This module contains the implementations for the CLI subcommands.

pub mod convert;
pub mod inspect;

/// Common CLI utilities
pub mod utils {
    use crate::converter::ConversionUnit;
    use crate::error::{Error as ConverterError, Result as ConverterResult};
    use std::path::Path;

    /// Read and parse a JSON conversion unit
    pub fn read_unit(path: &Path) -> ConverterResult<ConversionUnit> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            ConverterError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        ConversionUnit::from_json(&json)
    }

    /// Write output to file or stdout
    pub fn write_output(content: &str, output_path: Option<&Path>) -> ConverterResult<()> {
        match output_path {
            Some(path) => std::fs::write(path, content).map_err(ConverterError::from),
            None => {
                print!("{}", content);
                Ok(())
            }
        }
    }
}
