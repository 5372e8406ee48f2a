use clap::{Parser, Subcommand};
use miette::{miette, Result};
use std::path::PathBuf;

use vb2cs_rs::cli;
use vb2cs_rs::ErrorPolicy;

#[derive(Parser)]
#[command(name = "vb2cs-rs")]
#[command(about = "Statement-level Visual Basic to C# tree rewriting engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON conversion unit to C#
    Convert {
        /// Input conversion unit (JSON)
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// What to do when a routine cannot be converted
        #[arg(long, value_enum, default_value_t = ErrorPolicy::Fail)]
        on_error: ErrorPolicy,

        /// Drop source comments from the output
        #[arg(long)]
        no_comments: bool,
    },

    /// Summarize the statement kinds of every routine as JSON
    Inspect {
        /// Input conversion unit (JSON)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            on_error,
            no_comments,
        } => {
            let args = cli::convert::ConvertArgs {
                input_path: input,
                output_path: output,
                on_error,
                no_comments,
            };
            cli::convert::convert(&args).map_err(|e| miette!("{}", e))
        }
        Commands::Inspect { input } => cli::inspect::inspect(&input).map_err(|e| miette!("{}", e)),
    }
}
