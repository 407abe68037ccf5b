//! Bulletin cleaning: header trimming, whitespace stripping, sentinel
//! replacement and numeric coercion.
//!
//! The upstream feed marks missing readings with `-999` and pads both
//! headers and cells with spaces. After [`clean`] and [`coerce_numeric`] the
//! frame carries a single uniform representation: trimmed headers, nullable
//! `Float64` measurements, and no sentinel anywhere downstream.

use crate::types::cadence::Cadence;
use crate::weather_data::error::WeatherDataError;
use polars::prelude::*;

/// Upstream sentinel for "no reading".
pub(crate) const MISSING_SENTINEL: &str = "-999";

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Trims column headers, strips cell whitespace and nulls the `-999`
/// sentinel across all columns.
pub(crate) fn clean(df: DataFrame) -> PolarsResult<DataFrame> {
    let mut df = df;
    let trimmed_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str().trim().to_string())
        .collect();
    df.set_column_names(trimmed_names.iter().map(|s| s.as_str()))?;

    let dtypes = df.dtypes();
    let exprs: Vec<Expr> = trimmed_names
        .iter()
        .zip(dtypes.iter())
        .map(|(name, dtype)| {
            let name = name.as_str();
            match dtype {
                DataType::String => {
                    let stripped = col(name).str().strip_chars(lit(NULL));
                    when(stripped.clone().eq(lit(MISSING_SENTINEL)))
                        .then(lit(NULL))
                        .otherwise(stripped)
                        .alias(name)
                }
                dt if is_numeric_dtype(dt) => when(col(name).eq(lit(-999.0)))
                    .then(lit(NULL))
                    .otherwise(col(name))
                    .alias(name),
                _ => col(name),
            }
        })
        .collect();

    df.lazy().with_columns(exprs).collect()
}

/// Restricts the frame to the cadence's column whitelist, identity columns
/// first. Fails fast when the upstream schema dropped a required column.
pub(crate) fn select_columns(
    df: DataFrame,
    cadence: Cadence,
) -> Result<DataFrame, WeatherDataError> {
    {
        let names = df.get_column_names();
        for &column in cadence.column_whitelist() {
            if !names.iter().any(|name| name.as_str() == column) {
                return Err(WeatherDataError::MissingColumn {
                    cadence,
                    column: column.to_string(),
                });
            }
        }
    }
    Ok(df.select(cadence.column_whitelist().iter().copied())?)
}

/// Casts the given columns to nullable `Float64`; unparseable values become
/// null, the same fate as the sentinel.
pub(crate) fn coerce_numeric(df: DataFrame, columns: &[&str]) -> PolarsResult<DataFrame> {
    let exprs: Vec<Expr> = columns
        .iter()
        .map(|&column| col(column).cast(DataType::Float64))
        .collect();
    df.lazy().with_columns(exprs).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather_data::fetch::parse_csv;

    #[test]
    fn sentinel_becomes_null_and_headers_lose_whitespace() {
        let csv = " Temperature ; Humidity \n20;60\n-999;70\n25; -999\n";
        let df = parse_csv(csv.as_bytes(), Cadence::Daily).unwrap();

        let df = clean(df).unwrap();
        let df = coerce_numeric(df, &["Temperature", "Humidity"]).unwrap();

        let names: Vec<_> = df.get_column_names().iter().map(|n| n.to_string()).collect();
        assert_eq!(names, ["Temperature", "Humidity"]);

        let temperature = df.column("Temperature").unwrap().f64().unwrap();
        assert_eq!(temperature.get(0), Some(20.0));
        assert_eq!(temperature.get(1), None);
        assert_eq!(temperature.get(2), Some(25.0));

        let humidity = df.column("Humidity").unwrap().f64().unwrap();
        assert_eq!(humidity.get(2), None);
    }

    #[test]
    fn padded_cells_are_stripped_before_coercion() {
        let csv = "t;StationName\n  21.5 ;  Siófok  \n";
        let df = clean(parse_csv(csv.as_bytes(), Cadence::Daily).unwrap()).unwrap();

        let name = df.column("StationName").unwrap().str().unwrap();
        assert_eq!(name.get(0), Some("Siófok"));

        let df = coerce_numeric(df, &["t"]).unwrap();
        assert_eq!(df.column("t").unwrap().f64().unwrap().get(0), Some(21.5));
    }

    #[test]
    fn unparseable_numeric_cells_become_null() {
        let csv = "t\nn/a\n21.0\n";
        let df = clean(parse_csv(csv.as_bytes(), Cadence::Daily).unwrap()).unwrap();
        let df = coerce_numeric(df, &["t"]).unwrap();

        let t = df.column("t").unwrap().f64().unwrap();
        assert_eq!(t.get(0), None);
        assert_eq!(t.get(1), Some(21.0));
    }

    #[test]
    fn missing_whitelist_column_fails_fast() {
        let csv = "Time;StationNumber;StationName;Latitude;Longitude;Elevation\n\
                   20240301;12843;Budapest;47.5;19.0;140\n";
        let df = clean(parse_csv(csv.as_bytes(), Cadence::Daily).unwrap()).unwrap();

        let err = select_columns(df, Cadence::Daily).expect_err("rau column is missing");
        match err {
            WeatherDataError::MissingColumn { column, .. } => assert_eq!(column, "rau"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
