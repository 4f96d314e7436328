//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{CleanConfig, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR, DEFAULT_SENTINEL, DEFAULT_SOURCE};

/// tourclean - Clean the national tourism resource inventory export
#[derive(Parser, Debug)]
#[command(name = "tourclean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Raw delimited input file (encoding and delimiter are detected)
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Directory for the cleaned CSV, XLSX and summary files (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// A delimiter guess is accepted only if it yields MORE than this many columns.
    /// Inputs with this many real columns or fewer cannot be loaded.
    #[arg(long, default_value = "5")]
    pub min_columns: usize,

    /// Placeholder written into missing free-text cells
    #[arg(long, default_value = DEFAULT_SENTINEL)]
    pub sentinel: String,

    /// Source description printed in the summary report
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub source: String,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Skip the XLSX copy of the cleaned dataset
    #[arg(long, default_value = "false")]
    pub no_xlsx: bool,

    /// Also write run statistics as JSON to this path
    #[arg(long)]
    pub stats_json: Option<PathBuf>,
}

impl Cli {
    /// Build the library configuration from parsed arguments.
    pub fn to_config(&self) -> CleanConfig {
        CleanConfig {
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
            min_columns: self.min_columns,
            infer_schema_length: self.infer_schema_length,
            sentinel: self.sentinel.clone(),
            source_description: self.source.clone(),
            write_xlsx: !self.no_xlsx,
            stats_json: self.stats_json.clone(),
        }
    }
}
