//! Run statistics accumulated across the cleaning stages

use serde::Serialize;

/// Counters recorded by each stage and rendered into the summary report.
///
/// Each stage owns its own `record_*` method; a counter that is `None` was never
/// reached (e.g. the run aborted before that stage). The struct is threaded by
/// `&mut` through the pipeline rather than living in any shared state.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunStatistics {
    pub source_path: Option<String>,
    pub encoding: Option<String>,
    pub delimiter: Option<String>,
    pub original_records: Option<usize>,
    pub original_columns: Option<usize>,
    pub malformed_lines_skipped: Option<usize>,
    pub text_columns_cleaned: Option<usize>,
    pub text_columns_skipped: Option<usize>,
    pub original_nulls: Option<usize>,
    pub final_nulls: Option<usize>,
    pub columns_filled: Option<usize>,
    pub duplicates_removed: Option<usize>,
    pub final_records: Option<usize>,
    pub final_columns: Option<usize>,
    pub records_with_coordinates: Option<usize>,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_load(
        &mut self,
        source: &str,
        encoding: &str,
        delimiter: &str,
        rows: usize,
        cols: usize,
        skipped: usize,
    ) {
        self.source_path = Some(source.to_string());
        self.encoding = Some(encoding.to_string());
        self.delimiter = Some(delimiter.to_string());
        self.original_records = Some(rows);
        self.original_columns = Some(cols);
        self.malformed_lines_skipped = Some(skipped);
    }

    pub fn record_text_cleaning(&mut self, cleaned: usize, skipped: usize) {
        self.text_columns_cleaned = Some(cleaned);
        self.text_columns_skipped = Some(skipped);
    }

    pub fn record_nulls(&mut self, before: usize, after: usize, columns_filled: usize) {
        self.original_nulls = Some(before);
        self.final_nulls = Some(after);
        self.columns_filled = Some(columns_filled);
    }

    pub fn record_duplicates(&mut self, removed: usize) {
        self.duplicates_removed = Some(removed);
    }

    pub fn record_final_shape(&mut self, rows: usize, cols: usize) {
        self.final_records = Some(rows);
        self.final_columns = Some(cols);
    }

    pub fn record_coordinates(&mut self, with_coordinates: usize) {
        self.records_with_coordinates = Some(with_coordinates);
    }

    /// Original-minus-final record count, duplicates being the only row drop.
    pub fn records_dropped(&self) -> usize {
        match (self.original_records, self.final_records) {
            (Some(before), Some(after)) => before.saturating_sub(after),
            _ => 0,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
