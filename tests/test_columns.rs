//! Tests for column label normalization

use polars::prelude::*;
use tourclean::pipeline::{normalize_column_name, normalize_column_names};

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_inventory_header_is_canonical() {
    let expected = [
        "codigo",
        "nombre_del_recurso",
        "region",
        "categoria",
        "descripcion",
        "latitud",
        "longitud",
        "url_ficha",
    ];
    for (raw, want) in INVENTORY_HEADER.iter().zip(expected) {
        assert_eq!(normalize_column_name(raw), want);
    }
}

#[test]
fn test_normalization_is_idempotent() {
    let names = [
        "  Nombre del Recurso  ",
        "CATEGORÍA",
        "Sub Tipo de Recurso",
        "año_registro",
        "Distrito ",
        "",
    ];
    for name in names {
        let once = normalize_column_name(name);
        let twice = normalize_column_name(&once);
        assert_eq!(once, twice, "not idempotent for {:?}", name);
    }
}

#[test]
fn test_output_has_no_spaces_or_uppercase() {
    for name in INVENTORY_HEADER {
        let out = normalize_column_name(name);
        assert!(!out.contains(' '));
        assert_eq!(out, out.to_lowercase());
    }
}

#[test]
fn test_dataframe_columns_renamed_in_place() {
    let mut df = df! {
        " Región " => ["Cusco"],
        "Categoría" => ["Sitios Naturales"],
        "Latitud" => [-13.16f64],
    }
    .unwrap();

    let count = normalize_column_names(&mut df).unwrap();

    assert_eq!(count, 3);
    assert_has_columns(&df, &["region", "categoria", "latitud"]);
    assert_missing_columns(&df, &["Categoría"]);
}
