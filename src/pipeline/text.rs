//! Free-text cell normalization (trim + title case)

use polars::prelude::*;

use super::config::{name_mentions, URL_MARKERS};

fn is_cased(ch: char) -> bool {
    ch.is_uppercase() || ch.is_lowercase()
}

/// True when the value has at least one cased letter and none in lower case.
///
/// Acronyms and codes such as `"CUSCO"` or `"RN-12"` pass; `"123"` does not.
pub fn is_all_upper(value: &str) -> bool {
    value.chars().any(is_cased) && !value.chars().any(char::is_lowercase)
}

/// Capitalize the first letter of every word and lowercase the rest.
///
/// A word starts at any cased letter that follows an uncased character, so
/// `"o'neil"` becomes `"O'Neil"` and `"san-martin"` becomes `"San-Martin"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_cased = false;

    for ch in value.chars() {
        if prev_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_cased = is_cased(ch);
    }

    out
}

/// Trim a value and title-case it unless it is already fully upper case.
pub fn normalize_text(value: &str) -> String {
    let trimmed = value.trim();
    if is_all_upper(trimmed) {
        trimmed.to_string()
    } else {
        title_case(trimmed)
    }
}

/// Outcome of the text stage: which columns were rewritten and which were skipped.
#[derive(Debug, Default)]
pub struct TextNormalization {
    pub cleaned: Vec<String>,
    pub skipped: Vec<(String, String)>,
}

impl TextNormalization {
    pub fn cleaned_count(&self) -> usize {
        self.cleaned.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Columns eligible for text normalization: string dtype, not a URL column.
pub fn text_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| c.name().to_string())
        .filter(|name| !name_mentions(name, URL_MARKERS))
        .collect()
}

fn normalize_column(column: &Column) -> PolarsResult<Column> {
    let ca = column.str()?;
    let out: StringChunked = ca
        .into_iter()
        .map(|value| value.map(normalize_text))
        .collect();
    Ok(Column::from(out.with_name(column.name().clone()).into_series()))
}

/// Normalize every eligible text column in place.
///
/// Each column is processed independently; a failure is recorded in
/// `skipped` and the remaining columns are still processed.
pub fn normalize_text_columns(df: &mut DataFrame) -> TextNormalization {
    let mut report = TextNormalization::default();

    for name in text_columns(df) {
        let result = match df.column(&name).and_then(normalize_column) {
            Ok(column) => df.with_column(column).map(|_| ()),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => report.cleaned.push(name),
            Err(e) => report.skipped.push((name, e.to_string())),
        }
    }

    report
}
