//! Column label normalization

use std::collections::HashSet;

use polars::prelude::*;

use super::error::CleanResult;

/// Accented letters folded to their plain ASCII counterpart
const ACCENT_FOLDS: &[(char, char)] = &[
    ('á', 'a'),
    ('é', 'e'),
    ('í', 'i'),
    ('ó', 'o'),
    ('ú', 'u'),
    ('ñ', 'n'),
];

fn fold_accent(ch: char) -> char {
    ACCENT_FOLDS
        .iter()
        .find(|(accented, _)| *accented == ch)
        .map(|(_, plain)| *plain)
        .unwrap_or(ch)
}

/// Canonical form of a column label: trimmed, lowercase, spaces as underscores,
/// accents folded.
///
/// ```
/// use tourclean::pipeline::normalize_column_name;
///
/// assert_eq!(normalize_column_name("  Nombre del Recurso "), "nombre_del_recurso");
/// assert_eq!(normalize_column_name("Categoría"), "categoria");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|ch| if ch == ' ' { '_' } else { fold_accent(ch) })
        .collect()
}

/// Make every label unique by suffixing `_2`, `_3`, ... onto later repeats.
fn deduplicate_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let mut candidate = name.clone();
        let mut n = 2;
        while seen.contains(&candidate) {
            candidate = format!("{}_{}", name, n);
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

/// Rename every column of the dataset to its canonical label.
///
/// Returns the number of columns processed.
pub fn normalize_column_names(df: &mut DataFrame) -> CleanResult<usize> {
    let normalized: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_column_name(name.as_str()))
        .collect();
    let normalized = deduplicate_names(normalized);
    let count = normalized.len();

    df.set_column_names(normalized)?;

    Ok(count)
}
