//! Dataset loader with encoding and delimiter detection
//!
//! Government exports arrive with no reliable declaration of their character
//! encoding or field separator, so the loader enumerates a fixed, ordered list
//! of (encoding, delimiter) trials and accepts the first one that yields a
//! table wider than the configured column threshold.

use std::io::Cursor;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};
use polars::prelude::*;

use super::config::CleanConfig;
use super::error::{CleanError, CleanResult};
use super::stats::RunStatistics;

/// Candidate delimiters, in trial order
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b';', b',', b'|', b'\t'];

const BOM: char = '\u{feff}';

/// Candidate text encodings, in trial order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialEncoding {
    Utf8,
    Latin1,
    Iso8859_1,
    Windows1252,
    Utf8Bom,
}

impl TrialEncoding {
    pub const ALL: [TrialEncoding; 5] = [
        TrialEncoding::Utf8,
        TrialEncoding::Latin1,
        TrialEncoding::Iso8859_1,
        TrialEncoding::Windows1252,
        TrialEncoding::Utf8Bom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TrialEncoding::Utf8 => "UTF-8",
            TrialEncoding::Latin1 => "Latin-1",
            TrialEncoding::Iso8859_1 => "ISO-8859-1",
            TrialEncoding::Windows1252 => "Windows-1252",
            TrialEncoding::Utf8Bom => "UTF-8 (BOM)",
        }
    }

    /// Decode raw bytes, or `None` when the bytes are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self {
            TrialEncoding::Utf8 | TrialEncoding::Utf8Bom => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|text| text.strip_prefix(BOM).unwrap_or(&text[..]).to_string()),
            // Latin-1 maps every byte to the code point of the same value
            TrialEncoding::Latin1 | TrialEncoding::Iso8859_1 => {
                Some(bytes.iter().map(|&b| b as char).collect())
            }
            TrialEncoding::Windows1252 => {
                let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
                if had_errors {
                    None
                } else {
                    Some(text.into_owned())
                }
            }
        }
    }
}

/// Printable name for a delimiter byte
pub fn delimiter_label(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}

/// One (encoding, delimiter) pair attempted during load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    pub encoding: TrialEncoding,
    pub delimiter: u8,
}

/// All trials in evaluation order: encoding outer, delimiter inner.
pub fn candidate_trials() -> Vec<Trial> {
    TrialEncoding::ALL
        .iter()
        .flat_map(|&encoding| {
            CANDIDATE_DELIMITERS
                .iter()
                .map(move |&delimiter| Trial { encoding, delimiter })
        })
        .collect()
}

/// Result of evaluating a single trial
#[derive(Debug)]
pub enum TrialOutcome {
    Accepted(LoadOutcome),
    Undecodable,
    TooNarrow { width: usize },
    ParseFailed(String),
}

/// A successfully loaded dataset and how it was read
#[derive(Debug)]
pub struct LoadOutcome {
    pub df: DataFrame,
    pub trial: Trial,
    pub skipped_lines: usize,
}

/// Text with malformed records removed, ready for the CSV parser
#[derive(Debug, PartialEq)]
pub struct FilteredText {
    pub text: String,
    pub header_width: usize,
    pub skipped_lines: usize,
}

/// Cell values read as null in addition to empty fields (the pandas defaults).
pub const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Split text into physical lines, dropping a trailing `\r`.
///
/// Quotes carry no meaning: a `"` is part of the field text.
fn split_records(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.trim_end_matches('\r'))
}

/// Count fields in one record.
pub fn count_fields(record: &str, delimiter: u8) -> usize {
    record.bytes().filter(|&b| b == delimiter).count() + 1
}

/// Drop blank lines and lines with more fields than the header.
///
/// Short lines are kept; the parser pads them with nulls.
pub fn filter_malformed(text: &str, delimiter: u8) -> FilteredText {
    let mut records = split_records(text).filter(|r| !r.trim().is_empty());

    let Some(header) = records.next() else {
        return FilteredText {
            text: String::new(),
            header_width: 0,
            skipped_lines: 0,
        };
    };

    let header_width = count_fields(header, delimiter);
    let mut out = String::with_capacity(text.len());
    out.push_str(header);
    out.push('\n');

    let mut skipped_lines = 0;
    for record in records {
        if count_fields(record, delimiter) > header_width {
            skipped_lines += 1;
            continue;
        }
        out.push_str(record);
        out.push('\n');
    }

    FilteredText {
        text: out,
        header_width,
        skipped_lines,
    }
}

fn parse_delimited(text: &str, delimiter: u8, schema_length: Option<usize>) -> PolarsResult<DataFrame> {
    let null_tokens = NA_TOKENS.iter().map(|&t| PlSmallStr::from(t)).collect();

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(delimiter)
                .with_quote_char(None)
                .with_null_values(Some(NullValues::AllColumns(null_tokens)))
                .with_missing_is_null(true)
                .with_truncate_ragged_lines(true),
        )
        .into_reader_with_file_handle(Cursor::new(text.as_bytes()))
        .finish()
}

/// Parse with type inference, falling back to all-text columns when a value
/// outside the inference window does not fit the inferred type.
fn parse_with_fallback(text: &str, delimiter: u8, schema_length: Option<usize>) -> PolarsResult<DataFrame> {
    match parse_delimited(text, delimiter, schema_length) {
        Ok(df) => Ok(df),
        // An inference length of zero reads every column as String
        Err(_) => parse_delimited(text, delimiter, Some(0)),
    }
}

/// Evaluate one trial against the raw file bytes.
pub fn run_trial(bytes: &[u8], trial: Trial, min_columns: usize, schema_length: Option<usize>) -> TrialOutcome {
    let Some(text) = trial.encoding.decode(bytes) else {
        return TrialOutcome::Undecodable;
    };

    let filtered = filter_malformed(&text, trial.delimiter);
    // Cheap reject before handing the text to the parser
    if filtered.header_width <= min_columns {
        return TrialOutcome::TooNarrow {
            width: filtered.header_width,
        };
    }

    match parse_with_fallback(&filtered.text, trial.delimiter, schema_length) {
        Ok(df) if df.width() > min_columns => TrialOutcome::Accepted(LoadOutcome {
            df,
            trial,
            skipped_lines: filtered.skipped_lines,
        }),
        Ok(df) => TrialOutcome::TooNarrow { width: df.width() },
        Err(e) => TrialOutcome::ParseFailed(e.to_string()),
    }
}

/// Load the input file, trying every candidate (encoding, delimiter) pair in order.
///
/// Records the original row and column counts into `stats` on success.
pub fn load_dataset(config: &CleanConfig, stats: &mut RunStatistics) -> CleanResult<LoadOutcome> {
    let path = config.input.as_path();
    if !path.exists() {
        return Err(CleanError::InputNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;

    let outcome = detect_and_parse(path, &bytes, config.min_columns, config.schema_length())?;
    let (rows, cols) = outcome.df.shape();
    stats.record_load(
        &path.display().to_string(),
        outcome.trial.encoding.label(),
        &delimiter_label(outcome.trial.delimiter),
        rows,
        cols,
        outcome.skipped_lines,
    );

    Ok(outcome)
}

/// Walk the trial list over in-memory bytes and return the first accepted table.
pub fn detect_and_parse(
    path: &Path,
    bytes: &[u8],
    min_columns: usize,
    schema_length: Option<usize>,
) -> CleanResult<LoadOutcome> {
    let trials = candidate_trials();
    let attempts = trials.len();
    let mut best_width = 0;
    let mut last_parse_error = None;
    let mut skip_encoding = None;

    for trial in trials {
        // Decoding does not depend on the delimiter
        if skip_encoding == Some(trial.encoding) {
            continue;
        }
        match run_trial(bytes, trial, min_columns, schema_length) {
            TrialOutcome::Accepted(outcome) => return Ok(outcome),
            TrialOutcome::Undecodable => skip_encoding = Some(trial.encoding),
            TrialOutcome::TooNarrow { width } => best_width = best_width.max(width),
            TrialOutcome::ParseFailed(reason) => last_parse_error = Some(reason),
        }
    }

    Err(CleanError::NoWorkableFormat {
        path: path.to_path_buf(),
        attempts,
        min_columns,
        best_width,
        last_parse_error,
    })
}

/// Estimated in-memory size of a dataset in megabytes
pub fn estimated_memory_mb(df: &DataFrame) -> f64 {
    df.estimated_size() as f64 / (1024.0 * 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_order_is_encoding_outer_delimiter_inner() {
        let trials = candidate_trials();
        assert_eq!(trials.len(), 20);
        assert_eq!(trials[0], Trial { encoding: TrialEncoding::Utf8, delimiter: b';' });
        assert_eq!(trials[1], Trial { encoding: TrialEncoding::Utf8, delimiter: b',' });
        assert_eq!(trials[3], Trial { encoding: TrialEncoding::Utf8, delimiter: b'\t' });
        assert_eq!(trials[4], Trial { encoding: TrialEncoding::Latin1, delimiter: b';' });
        assert_eq!(trials[19], Trial { encoding: TrialEncoding::Utf8Bom, delimiter: b'\t' });
    }

    #[test]
    fn test_utf8_rejects_latin1_bytes() {
        // "Perú" in Latin-1
        let bytes = [b'P', b'e', b'r', 0xFA];
        assert!(TrialEncoding::Utf8.decode(&bytes).is_none());
        assert_eq!(TrialEncoding::Latin1.decode(&bytes).as_deref(), Some("Perú"));
        assert_eq!(TrialEncoding::Windows1252.decode(&bytes).as_deref(), Some("Perú"));
    }

    #[test]
    fn test_utf8_strips_bom() {
        let bytes = "\u{feff}a;b".as_bytes();
        assert_eq!(TrialEncoding::Utf8.decode(bytes).as_deref(), Some("a;b"));
        assert_eq!(TrialEncoding::Utf8Bom.decode(bytes).as_deref(), Some("a;b"));
    }

    #[test]
    fn test_count_fields_treats_quotes_as_text() {
        assert_eq!(count_fields("a,b,c", b','), 3);
        assert_eq!(count_fields("a,\"b,c\",d", b','), 4);
        assert_eq!(count_fields("2;Museo \"El Sol;x", b';'), 3);
        assert_eq!(count_fields("a;b,c", b','), 2);
        assert_eq!(count_fields("", b','), 1);
    }

    #[test]
    fn test_filter_malformed_skips_wide_lines() {
        let text = "a,b,c\n1,2,3\n1,2,3,4\n\n5,6\r\n7,8,9";
        let filtered = filter_malformed(text, b',');
        assert_eq!(filtered.header_width, 3);
        assert_eq!(filtered.skipped_lines, 1);
        assert_eq!(filtered.text, "a,b,c\n1,2,3\n5,6\n7,8,9\n");
    }

    #[test]
    fn test_filter_malformed_unbalanced_quote_stays_on_its_line() {
        let text = "a;b;c\n1;Museo \"El Sol;x\n2;y;z\n";
        let filtered = filter_malformed(text, b';');
        assert_eq!(filtered.skipped_lines, 0);
        assert_eq!(filtered.text, text);
    }

    #[test]
    fn test_parse_keeps_literal_quotes() {
        let df = parse_delimited("a;b\n\"x;Museo \"El Sol\n", b';', Some(100)).unwrap();
        assert_eq!(df.shape(), (1, 2));
        assert_eq!(df.column("a").unwrap().str().unwrap().get(0), Some("\"x"));
        assert_eq!(df.column("b").unwrap().str().unwrap().get(0), Some("Museo \"El Sol"));
    }

    #[test]
    fn test_type_change_past_window_reads_as_text() {
        let text = "n;m\n1;a\n2;b\n3;c\nS/N;d\n";
        assert!(parse_delimited(text, b';', Some(2)).is_err());

        let df = parse_with_fallback(text, b';', Some(2)).unwrap();
        assert_eq!(df.column("n").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("n").unwrap().str().unwrap().get(3), Some("S/N"));
    }

    #[test]
    fn test_na_tokens_parse_as_null() {
        let df = parse_delimited("a;b\nNA;x\nNULL;y\nok;N/A\n", b';', Some(100)).unwrap();
        assert_eq!(df.column("a").unwrap().null_count(), 2);
        assert_eq!(df.column("b").unwrap().null_count(), 1);
    }

    #[test]
    fn test_filter_malformed_empty_text() {
        let filtered = filter_malformed("", b';');
        assert_eq!(filtered.header_width, 0);
        assert!(filtered.text.is_empty());
    }

    #[test]
    fn test_delimiter_label() {
        assert_eq!(delimiter_label(b'\t'), "\\t");
        assert_eq!(delimiter_label(b';'), ";");
    }
}
