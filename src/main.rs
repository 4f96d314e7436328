//! tourclean: Tourism Resource Inventory Cleaner CLI
//!
//! Loads the raw inventory export, cleans it in a single forward pass and
//! writes the cleaned CSV, an XLSX copy and a plain-text summary.

use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use tourclean::cli::Cli;
use tourclean::pipeline::{
    clean_dataset, delimiter_label, estimated_memory_mb, load_dataset, CoordinateColumns,
    RunStatistics, StageObserver, TextNormalization,
};
use tourclean::report::{display_statistics, render_summary, write_outputs, XlsxOutcome};
use tourclean::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_detail, print_info, print_step_header, print_success,
    print_warning,
};

/// Prints a step block after each cleaning stage
struct ConsoleObserver;

impl StageObserver for ConsoleObserver {
    fn columns_normalized(&mut self, count: usize) {
        print_step_header(2, "Column Names");
        print_success(&format!("{} columns standardized", count));
    }

    fn text_normalized(&mut self, report: &TextNormalization) {
        print_step_header(3, "Text Values");
        print_success(&format!("{} text columns cleaned", report.cleaned_count()));
        for (column, reason) in &report.skipped {
            print_warning(&format!("Skipped column '{}': {}", column, reason));
        }
    }

    fn missing_filled(&mut self, before: usize, after: usize, filled: &[String]) {
        print_step_header(4, "Missing Values & Duplicates");
        print_detail("Null values", format!("{} → {}", before, after));
        if filled.is_empty() {
            print_info("No text columns needed filling");
        } else {
            print_success(&format!("Filled {} text column(s)", filled.len()));
        }
    }

    fn duplicates_removed(&mut self, removed: usize) {
        print_detail("Duplicates removed", removed);
    }

    fn enriched(&mut self, coords: Option<&CoordinateColumns>, stats: &RunStatistics) {
        print_step_header(5, "Derived Columns");
        print_success("Column 'id_recurso' created");
        match (coords, stats.records_with_coordinates) {
            (Some(c), Some(n)) => {
                print_success(&format!(
                    "Column 'tiene_coordenadas' created from '{}' / '{}' ({} resources)",
                    c.latitude, c.longitude, n
                ));
            }
            _ => print_info("No latitude/longitude pair found; coordinate flag omitted"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &config.input,
        &config.output_dir,
        config.min_columns,
        &config.sentinel,
    );

    if !config.input.exists() {
        anyhow::bail!("Input file not found: {}", config.input.display());
    }

    let mut stats = RunStatistics::new();

    // Step 1: Load with encoding/delimiter detection
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Trying encodings and delimiters...");
    let outcome = match load_dataset(&config, &mut stats) {
        Ok(outcome) => {
            finish_with_success(&spinner, "Dataset loaded");
            outcome
        }
        Err(e) => {
            finish_with_warning(&spinner, "No encoding/delimiter combination worked");
            return Err(e).context("Load stage failed");
        }
    };

    let (rows, cols) = outcome.df.shape();
    print_detail("Encoding", outcome.trial.encoding.label());
    print_detail("Delimiter", format!("'{}'", delimiter_label(outcome.trial.delimiter)));
    print_detail("Records", rows);
    print_detail("Columns", cols);
    print_detail(
        "Estimated memory",
        format!("{:.2} MB", estimated_memory_mb(&outcome.df)),
    );
    if outcome.skipped_lines > 0 {
        print_warning(&format!("{} malformed line(s) skipped", outcome.skipped_lines));
    }
    print_detail("Elapsed", format!("{:.2?}", step_start.elapsed()));

    // Steps 2-5: cleaning stages
    let mut df = clean_dataset(outcome.df, &config, &mut stats, &mut ConsoleObserver)
        .context("Cleaning stages failed")?;

    // Step 6: Save results
    print_step_header(6, "Save Results");
    let summary_text = render_summary(&stats, &config.source_description, Local::now().naive_local());
    let spinner = create_spinner("Writing output files...");
    let (paths, xlsx) = write_outputs(&mut df, &stats, &config, &summary_text)
        .with_context(|| format!("Failed to write outputs to {}", config.output_dir.display()))?;
    finish_with_success(&spinner, "Outputs written");

    print_success(&format!("CSV saved: {}", paths.csv.display()));
    match xlsx {
        XlsxOutcome::Written(path) => print_success(&format!("Excel saved: {}", path.display())),
        XlsxOutcome::Disabled => print_info("Excel copy skipped (--no-xlsx)"),
        XlsxOutcome::Failed(e) => print_warning(&format!("Could not save Excel copy: {}", e)),
    }
    print_success(&format!("Summary saved: {}", paths.summary.display()));
    if let Some(json) = &paths.stats_json {
        print_success(&format!("Statistics saved: {}", json.display()));
    }

    println!("{}", summary_text);
    display_statistics(&stats);
    print_completion();

    Ok(())
}
