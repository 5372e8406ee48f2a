use super::utils::{read_unit, write_output};
use crate::converter::{ConvertOptions, Converter, ErrorPolicy};
use crate::error::Result as ConverterResult;
use log::info;
use std::path::PathBuf;

/// Arguments for the convert command
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub on_error: ErrorPolicy,
    pub no_comments: bool,
}

impl ConvertArgs {
    /// Convert to ConvertOptions
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            include_comments: !self.no_comments,
            on_error: self.on_error,
        }
    }
}

/// Run the convert subcommand
pub fn convert(args: &ConvertArgs) -> ConverterResult<()> {
    let unit = read_unit(&args.input_path)?;
    info!(
        "Loaded {} routines from {}",
        unit.routines.len(),
        args.input_path.display()
    );

    let converter = Converter::new(args.to_options());
    let output = converter.convert_unit(&unit)?;

    write_output(&output, args.output_path.as_deref())?;
    if let Some(path) = &args.output_path {
        eprintln!("Converted code written to: {}", path.display());
    }
    Ok(())
}
