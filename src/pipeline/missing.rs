//! Missing value imputation and duplicate removal

use polars::prelude::*;

use super::config::{name_mentions, DATE_MARKERS, URL_MARKERS};
use super::error::CleanResult;

/// Total null cells across every column
pub fn count_nulls(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|c| c.null_count()).sum()
}

/// Null count per column, in column order
pub fn null_counts_by_column(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect()
}

/// Whether a column with nulls should receive the sentinel.
///
/// Only free-text columns qualify, and never ones whose name mentions a URL
/// or a date: a placeholder there would break downstream parsing.
pub fn is_fillable(column: &Column) -> bool {
    let name = column.name().as_str();
    column.dtype() == &DataType::String
        && column.null_count() > 0
        && !name_mentions(name, URL_MARKERS)
        && !name_mentions(name, DATE_MARKERS)
}

/// Replace nulls in every fillable text column with `sentinel`.
///
/// Returns the names of the columns that were filled.
pub fn fill_missing_text(df: &mut DataFrame, sentinel: &str) -> CleanResult<Vec<String>> {
    let targets: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| is_fillable(c))
        .map(|c| c.name().to_string())
        .collect();

    for name in &targets {
        let filled: StringChunked = df
            .column(name)?
            .str()?
            .into_iter()
            .map(|value| Some(value.unwrap_or(sentinel)))
            .collect();
        df.with_column(filled.with_name(name.as_str().into()).into_series())?;
    }

    Ok(targets)
}

/// Drop exact full-row duplicates, keeping the first occurrence in original order.
///
/// Returns the deduplicated dataset and the number of rows removed.
pub fn remove_duplicates(df: DataFrame) -> CleanResult<(DataFrame, usize)> {
    if df.width() == 0 {
        return Ok((df, 0));
    }

    let before = df.height();
    let deduped = df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    let removed = before - deduped.height();

    Ok((deduped, removed))
}
