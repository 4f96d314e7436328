//! Tunables for a cleaning run

use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "data/raw/inventario_recursos_turisticos.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "data/cleaned";
pub const DEFAULT_SENTINEL: &str = "NO ESPECIFICADO";
pub const DEFAULT_SOURCE: &str = "MINCETUR - Inventario Nacional de Recursos Turísticos";

pub const CLEAN_CSV_FILE: &str = "inventario_recursos_turisticos_limpio.csv";
pub const CLEAN_XLSX_FILE: &str = "inventario_recursos_turisticos_limpio.xlsx";
pub const SUMMARY_FILE: &str = "resumen_limpieza.txt";

pub const ID_COLUMN: &str = "id_recurso";
pub const COORDINATE_FLAG_COLUMN: &str = "tiene_coordenadas";

/// Column-name fragments marking URL columns (excluded from casing and filling)
pub const URL_MARKERS: &[&str] = &["url", "http"];

/// Column-name fragments marking date columns (excluded from filling)
pub const DATE_MARKERS: &[&str] = &["fecha", "date"];

/// Everything a run needs to know, built from CLI arguments or by hand in tests.
#[derive(Debug, Clone)]
pub struct CleanConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// A trial is accepted only when it yields strictly more columns than this.
    pub min_columns: usize,
    /// Rows used for schema inference. 0 means full scan.
    pub infer_schema_length: usize,
    pub sentinel: String,
    pub source_description: String,
    pub write_xlsx: bool,
    pub stats_json: Option<PathBuf>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            min_columns: 5,
            infer_schema_length: 10_000,
            sentinel: DEFAULT_SENTINEL.to_string(),
            source_description: DEFAULT_SOURCE.to_string(),
            write_xlsx: true,
            stats_json: None,
        }
    }
}

impl CleanConfig {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(CLEAN_CSV_FILE)
    }

    pub fn xlsx_path(&self) -> PathBuf {
        self.output_dir.join(CLEAN_XLSX_FILE)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE)
    }

    /// Schema inference length in the form polars expects
    pub fn schema_length(&self) -> Option<usize> {
        if self.infer_schema_length == 0 {
            None
        } else {
            Some(self.infer_schema_length)
        }
    }
}

/// Case-insensitive check of a column name against a list of fragments.
pub fn name_mentions(column: &str, markers: &[&str]) -> bool {
    let lower = column.to_lowercase();
    markers.iter().any(|m| lower.contains(m))
}
