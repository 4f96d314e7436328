//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tempfile::TempDir;

pub const INVENTORY_HEADER: [&str; 8] = [
    "Código",
    "Nombre del Recurso",
    "Región",
    "Categoría",
    "Descripción",
    "Latitud",
    "Longitud",
    "URL Ficha",
];

/// One raw inventory row, before any cleaning
#[derive(Debug, Clone)]
pub struct RawRow {
    pub code: usize,
    pub name: String,
    pub region: String,
    pub category: String,
    pub description: Option<String>,
    pub coords: Option<(f64, f64)>,
}

impl RawRow {
    pub fn new(code: usize) -> Self {
        Self {
            code,
            name: format!("recurso turistico {}", code),
            region: if code % 2 == 0 { "CUSCO".into() } else { "arequipa".into() },
            category: "  sitios naturales ".into(),
            description: Some(format!("descripcion del recurso {}", code)),
            coords: Some((-13.0 - code as f64 / 100.0, -72.0 - code as f64 / 100.0)),
        }
    }

    pub fn to_line(&self, delimiter: char) -> String {
        let (lat, lon) = match self.coords {
            Some((lat, lon)) => (lat.to_string(), lon.to_string()),
            None => (String::new(), String::new()),
        };
        [
            self.code.to_string(),
            self.name.clone(),
            self.region.clone(),
            self.category.clone(),
            self.description.clone().unwrap_or_default(),
            lat,
            lon,
            format!("https://inventario.example/ficha/{}", self.code),
        ]
        .join(&delimiter.to_string())
    }
}

/// Render rows as delimited text with the inventory header
pub fn inventory_text(rows: &[RawRow], delimiter: char) -> String {
    let mut text = INVENTORY_HEADER.join(&delimiter.to_string());
    text.push('\n');
    for row in rows {
        text.push_str(&row.to_line(delimiter));
        text.push('\n');
    }
    text
}

/// Encode text as Latin-1; every character must be below U+0100
pub fn to_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(c as u32).expect("character outside Latin-1"))
        .collect()
}

/// The end-to-end fixture: 97 unique rows plus 3 exact duplicates (100 total),
/// 10 missing descriptions, and coordinates on 95 of the 97 unique rows.
pub fn scenario_rows() -> Vec<RawRow> {
    let mut rows: Vec<RawRow> = (1..=97).map(RawRow::new).collect();

    // Rows 96 and 97 carry no coordinates
    rows[95].coords = None;
    rows[96].coords = None;

    // Ten missing descriptions on rows that are never duplicated
    for row in rows.iter_mut().skip(10).take(10) {
        row.description = None;
    }

    // Three exact duplicates, all of coordinate-less rows
    let dup_a = rows[95].clone();
    let dup_b = rows[96].clone();
    rows.insert(40, dup_a.clone());
    rows.push(dup_b);
    rows.push(dup_a);

    rows
}

/// Write bytes to a fresh temp dir and return both
pub fn write_temp_file(name: &str, bytes: &[u8]) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    (temp_dir, path)
}

/// Read a cleaned CSV back (it starts with a UTF-8 BOM)
pub fn read_clean_csv(path: &Path) -> DataFrame {
    let bytes = std::fs::read(path).unwrap();
    let body = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes).to_vec();
    CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(std::io::Cursor::new(body))
        .finish()
        .unwrap()
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
