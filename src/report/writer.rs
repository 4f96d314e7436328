//! Output writers for the cleaned dataset and the run summary

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;

use crate::pipeline::{CleanConfig, CleanError, CleanResult, RunStatistics};

/// Where each output landed
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub csv: PathBuf,
    /// `None` when the spreadsheet copy was skipped or failed
    pub xlsx: Option<PathBuf>,
    pub summary: PathBuf,
    pub stats_json: Option<PathBuf>,
}

/// Create the output directory (and parents) if needed.
pub fn ensure_output_dir(dir: &Path) -> CleanResult<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Write the dataset as comma-separated UTF-8 with a byte-order mark and a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> CleanResult<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_bom(true)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;
    Ok(())
}

#[cfg(feature = "xlsx")]
fn write_cell(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: AnyValue,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    match value {
        AnyValue::Null => {}
        AnyValue::Boolean(b) => {
            worksheet.write_boolean(row, col, b)?;
        }
        AnyValue::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
        AnyValue::StringOwned(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
        AnyValue::Int8(_)
        | AnyValue::Int16(_)
        | AnyValue::Int32(_)
        | AnyValue::Int64(_)
        | AnyValue::UInt8(_)
        | AnyValue::UInt16(_)
        | AnyValue::UInt32(_)
        | AnyValue::UInt64(_)
        | AnyValue::Float32(_)
        | AnyValue::Float64(_) => {
            if let Some(n) = value.extract::<f64>() {
                worksheet.write_number(row, col, n)?;
            }
        }
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

/// Write the dataset as a single-sheet XLSX workbook.
#[cfg(feature = "xlsx")]
pub fn write_xlsx(df: &DataFrame, path: &Path) -> CleanResult<()> {
    use rust_xlsxwriter::Workbook;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = col_idx as u16;
        worksheet.write_string(0, col, column.name().as_str())?;

        let series = column.as_materialized_series();
        for row_idx in 0..df.height() {
            let value = series.get(row_idx)?;
            write_cell(worksheet, row_idx as u32 + 1, col, value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Stand-in used when the crate is built without spreadsheet support.
#[cfg(not(feature = "xlsx"))]
pub fn write_xlsx(_df: &DataFrame, _path: &Path) -> CleanResult<()> {
    Err(CleanError::XlsxUnavailable)
}

/// Write the plain-text summary report.
pub fn write_summary(text: &str, path: &Path) -> CleanResult<()> {
    std::fs::write(path, text)?;
    Ok(())
}

/// Write run statistics as pretty-printed JSON.
pub fn write_stats_json(stats: &RunStatistics, path: &Path) -> CleanResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, stats.to_json()?)?;
    Ok(())
}

/// Outcome of the best-effort spreadsheet write
#[derive(Debug)]
pub enum XlsxOutcome {
    Written(PathBuf),
    Disabled,
    Failed(CleanError),
}

/// Write every output for a run.
///
/// The CSV and summary writes are fatal on failure; the spreadsheet copy is
/// best-effort and its outcome is returned for the caller to report.
pub fn write_outputs(
    df: &mut DataFrame,
    stats: &RunStatistics,
    config: &CleanConfig,
    summary_text: &str,
) -> CleanResult<(OutputPaths, XlsxOutcome)> {
    ensure_output_dir(&config.output_dir)?;

    let csv = config.csv_path();
    write_csv(df, &csv)?;

    let xlsx_outcome = if config.write_xlsx {
        let xlsx = config.xlsx_path();
        match write_xlsx(df, &xlsx) {
            Ok(()) => XlsxOutcome::Written(xlsx),
            Err(e) => XlsxOutcome::Failed(e),
        }
    } else {
        XlsxOutcome::Disabled
    };

    let summary = config.summary_path();
    write_summary(summary_text, &summary)?;

    let stats_json = match &config.stats_json {
        Some(path) => {
            write_stats_json(stats, path)?;
            Some(path.clone())
        }
        None => None,
    };

    let paths = OutputPaths {
        csv,
        xlsx: match &xlsx_outcome {
            XlsxOutcome::Written(p) => Some(p.clone()),
            _ => None,
        },
        summary,
        stats_json,
    };

    Ok((paths, xlsx_outcome))
}
