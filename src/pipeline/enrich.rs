//! Derived columns: sequential identifier and coordinate-presence flag

use polars::prelude::*;

use super::config::{COORDINATE_FLAG_COLUMN, ID_COLUMN};
use super::error::CleanResult;
use super::stats::RunStatistics;

/// Latitude and longitude columns picked for the coordinate flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateColumns {
    pub latitude: String,
    pub longitude: String,
}

/// Append a 1..N integer id in current row order.
pub fn add_sequential_id(df: &mut DataFrame, name: &str) -> CleanResult<()> {
    let ids: Vec<i64> = (1..=df.height() as i64).collect();
    df.with_column(Column::new(name.into(), ids))?;
    Ok(())
}

/// Pick the coordinate columns, if the dataset has them.
///
/// Candidates are columns whose name contains `lat` or `lon`. With fewer than
/// two candidates there is nothing to pair; otherwise the first `lat` column
/// is paired with the first other column containing `lon`.
pub fn detect_coordinate_columns(df: &DataFrame) -> Option<CoordinateColumns> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();

    let candidates: Vec<&String> = names
        .iter()
        .filter(|n| {
            let lower = n.to_lowercase();
            lower.contains("lat") || lower.contains("lon")
        })
        .collect();

    if candidates.len() < 2 {
        return None;
    }

    let latitude = candidates
        .iter()
        .find(|n| n.to_lowercase().contains("lat"))?;
    let longitude = candidates
        .iter()
        .find(|n| *n != latitude && n.to_lowercase().contains("lon"))?;

    Some(CoordinateColumns {
        latitude: (*latitude).clone(),
        longitude: (*longitude).clone(),
    })
}

/// Cast a column to Float64; unparseable values and NaN become null.
fn coerce_numeric(df: &mut DataFrame, name: &str) -> CleanResult<()> {
    let cast = df.column(name)?.cast(&DataType::Float64)?;
    let cleaned: Float64Chunked = cast
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    df.with_column(cleaned.with_name(name.into()).into_series())?;
    Ok(())
}

/// Coerce both coordinate columns to numbers and append the presence flag.
///
/// Returns the number of rows where both coordinates are present.
pub fn add_coordinate_flag(
    df: &mut DataFrame,
    coords: &CoordinateColumns,
    flag_name: &str,
) -> CleanResult<usize> {
    coerce_numeric(df, &coords.latitude)?;
    coerce_numeric(df, &coords.longitude)?;

    let lat_present = df.column(&coords.latitude)?.as_materialized_series().is_not_null();
    let lon_present = df.column(&coords.longitude)?.as_materialized_series().is_not_null();
    let flag = (&lat_present & &lon_present).with_name(flag_name.into());

    let with_coordinates = (&flag).into_iter().filter(|v| *v == Some(true)).count();
    df.with_column(flag.into_series())?;

    Ok(with_coordinates)
}

/// Run the enrichment stage and record the final shape.
pub fn enrich(df: &mut DataFrame, stats: &mut RunStatistics) -> CleanResult<Option<CoordinateColumns>> {
    add_sequential_id(df, ID_COLUMN)?;

    let coords = detect_coordinate_columns(df);
    if let Some(coords) = &coords {
        let with_coordinates = add_coordinate_flag(df, coords, COORDINATE_FLAG_COLUMN)?;
        stats.record_coordinates(with_coordinates);
    }

    let (rows, cols) = df.shape();
    stats.record_final_shape(rows, cols);

    Ok(coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_id() {
        let mut df = df! { "a" => ["x", "y", "z"] }.unwrap();
        add_sequential_id(&mut df, "id_recurso").unwrap();

        let ids: Vec<Option<i64>> = df.column("id_recurso").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_detect_coordinates() {
        let df = df! {
            "nombre" => ["a"],
            "latitud" => ["-13.1"],
            "longitud" => ["-72.5"],
        }
        .unwrap();

        assert_eq!(
            detect_coordinate_columns(&df),
            Some(CoordinateColumns {
                latitude: "latitud".to_string(),
                longitude: "longitud".to_string(),
            })
        );
    }

    #[test]
    fn test_single_coordinate_column_is_not_enough() {
        let df = df! { "nombre" => ["a"], "latitud" => ["-13.1"] }.unwrap();
        assert!(detect_coordinate_columns(&df).is_none());
    }

    #[test]
    fn test_two_latitude_columns_without_longitude() {
        let df = df! { "latitud" => ["1"], "lat_origen" => ["2"] }.unwrap();
        assert!(detect_coordinate_columns(&df).is_none());
    }

    #[test]
    fn test_flag_requires_both_numeric() {
        let mut df = df! {
            "latitud" => [Some("-13.16"), Some("abc"), None, Some("-12.04")],
            "longitud" => [Some("-72.54"), Some("-71.9"), Some("-70.0"), Some("NaN")],
        }
        .unwrap();
        let coords = detect_coordinate_columns(&df).unwrap();

        let count = add_coordinate_flag(&mut df, &coords, "tiene_coordenadas").unwrap();

        assert_eq!(count, 1);
        let flag: Vec<Option<bool>> = df
            .column("tiene_coordenadas")
            .unwrap()
            .bool()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(flag, vec![Some(true), Some(false), Some(false), Some(false)]);
        assert_eq!(df.column("latitud").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_enrich_records_final_shape() {
        let mut df = df! { "a" => ["x", "y"], "b" => [1i64, 2] }.unwrap();
        let mut stats = RunStatistics::new();

        let coords = enrich(&mut df, &mut stats).unwrap();

        assert!(coords.is_none());
        assert_eq!(stats.final_records, Some(2));
        assert_eq!(stats.final_columns, Some(3));
        assert!(stats.records_with_coordinates.is_none());
        assert!(df.column(COORDINATE_FLAG_COLUMN).is_err());
    }
}
