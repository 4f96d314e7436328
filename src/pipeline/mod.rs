//! Pipeline module - orchestrates the cleaning stages

pub mod columns;
pub mod config;
pub mod enrich;
pub mod error;
pub mod loader;
pub mod missing;
pub mod stats;
pub mod text;

pub use columns::*;
pub use config::*;
pub use enrich::*;
pub use error::*;
pub use loader::*;
pub use missing::*;
pub use stats::*;
pub use text::*;

use polars::prelude::DataFrame;

/// Hooks called after each stage of [`clean_dataset`].
///
/// The CLI uses these to print progress; library callers can ignore them
/// with [`SilentObserver`].
pub trait StageObserver {
    fn columns_normalized(&mut self, _count: usize) {}
    fn text_normalized(&mut self, _report: &TextNormalization) {}
    fn missing_filled(&mut self, _before: usize, _after: usize, _filled: &[String]) {}
    fn duplicates_removed(&mut self, _removed: usize) {}
    fn enriched(&mut self, _coords: Option<&CoordinateColumns>, _stats: &RunStatistics) {}
}

/// Observer that does nothing
pub struct SilentObserver;

impl StageObserver for SilentObserver {}

/// Run every stage after loading, in order: column labels, text cells,
/// missing values, duplicates, derived columns.
pub fn clean_dataset(
    mut df: DataFrame,
    config: &CleanConfig,
    stats: &mut RunStatistics,
    observer: &mut dyn StageObserver,
) -> CleanResult<DataFrame> {
    let count = normalize_column_names(&mut df)?;
    observer.columns_normalized(count);

    let report = normalize_text_columns(&mut df);
    stats.record_text_cleaning(report.cleaned_count(), report.skipped_count());
    observer.text_normalized(&report);

    let before = count_nulls(&df);
    let filled = fill_missing_text(&mut df, &config.sentinel)?;
    let after = count_nulls(&df);
    stats.record_nulls(before, after, filled.len());
    observer.missing_filled(before, after, &filled);

    let (mut df, removed) = remove_duplicates(df)?;
    stats.record_duplicates(removed);
    observer.duplicates_removed(removed);

    let coords = enrich(&mut df, stats)?;
    observer.enriched(coords.as_ref(), stats);

    Ok(df)
}
