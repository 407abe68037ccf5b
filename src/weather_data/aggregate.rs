//! Proximity filtering and per-column aggregation over cleaned bulletins.

use crate::geo::distance_km;
use crate::hungaromet::LatLon;
use crate::types::cadence::{
    COL_DISTANCE_KM, COL_ELEVATION, COL_LATITUDE, COL_LONGITUDE, COL_STATION_NAME,
    COL_STATION_NUMBER,
};
use crate::types::station::StationInfo;
use crate::weather_data::error::WeatherDataError;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Appends the great-circle distance from `reference` as `distance_km`.
///
/// Coordinates are coerced to numeric first; rows with unparseable
/// coordinates get a null distance, which the radius filter drops.
pub(crate) fn add_distance_column(
    df: DataFrame,
    reference: LatLon,
) -> Result<DataFrame, WeatherDataError> {
    let latitudes = df.column(COL_LATITUDE)?.cast(&DataType::Float64)?;
    let longitudes = df.column(COL_LONGITUDE)?.cast(&DataType::Float64)?;
    let latitudes = latitudes.f64()?;
    let longitudes = longitudes.f64()?;

    let distances: Float64Chunked = latitudes
        .into_iter()
        .zip(longitudes)
        .map(|(lat, lon)| match (lat, lon) {
            (Some(lat), Some(lon)) => Some(distance_km(LatLon(lat, lon), reference)),
            _ => None,
        })
        .collect();

    let mut df = df;
    df.with_column(distances.into_series().with_name(COL_DISTANCE_KM.into()))?;
    Ok(df)
}

/// Sorts ascending by distance and keeps rows within `radius_km` inclusive.
///
/// Null and NaN distances fail the comparison and drop out.
pub(crate) fn filter_by_radius(df: DataFrame, radius_km: f64) -> PolarsResult<DataFrame> {
    df.lazy()
        .sort([COL_DISTANCE_KM], SortMultipleOptions::default())
        .filter(col(COL_DISTANCE_KM).lt_eq(lit(radius_km)))
        .collect()
}

/// Arithmetic mean of each requested column over non-null values.
///
/// A column that is entirely null yields its key with `None`; a column
/// absent from the frame is skipped, tolerating upstream schema drift.
pub(crate) fn mean_values(df: &DataFrame, columns: &[&str]) -> BTreeMap<String, Option<f64>> {
    let mut means = BTreeMap::new();
    for &column in columns {
        let Ok(values) = df.column(column) else {
            continue;
        };
        let mean = values.f64().ok().and_then(|ca| ca.mean());
        means.insert(format!("average_{column}"), mean);
    }
    means
}

/// Most frequent value of a categorical integer column, ignoring nulls.
///
/// Ties are broken by the smallest code; consumers must not rely on any
/// particular tie-break.
pub(crate) fn most_frequent_code(df: &DataFrame, column: &str) -> Option<i64> {
    let codes = df.column(column).ok()?.cast(&DataType::Int64).ok()?;
    let codes = codes.i64().ok()?;

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for code in codes.into_iter().flatten() {
        *counts.entry(code).or_insert(0) += 1;
    }

    let mut best: Option<(i64, usize)> = None;
    for (code, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((code, count));
        }
    }
    best.map(|(code, _)| code)
}

/// Deduplicated station identities in ascending-distance order.
pub(crate) fn station_info_list(df: &DataFrame) -> Result<Vec<StationInfo>, WeatherDataError> {
    let identity = df
        .select([
            COL_STATION_NUMBER,
            COL_STATION_NAME,
            COL_LATITUDE,
            COL_LONGITUDE,
            COL_ELEVATION,
        ])?
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;

    let numbers = identity.column(COL_STATION_NUMBER)?.cast(&DataType::Int64)?;
    let numbers = numbers.i64()?;
    let names = identity.column(COL_STATION_NAME)?.str()?;
    let latitudes = identity.column(COL_LATITUDE)?.f64()?;
    let longitudes = identity.column(COL_LONGITUDE)?.f64()?;
    let elevations = identity.column(COL_ELEVATION)?.f64()?;

    let mut stations = Vec::with_capacity(identity.height());
    for row in 0..identity.height() {
        let (Some(station_number), Some(latitude), Some(longitude)) =
            (numbers.get(row), latitudes.get(row), longitudes.get(row))
        else {
            continue;
        };
        stations.push(StationInfo {
            station_number,
            station_name: names.get(row).unwrap_or_default().to_string(),
            latitude,
            longitude,
            elevation: elevations.get(row),
        });
    }
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cadence::Cadence;
    use crate::weather_data::clean::{clean, coerce_numeric};
    use crate::weather_data::fetch::parse_csv;

    fn coordinate_frame() -> DataFrame {
        let csv = "StationNumber;StationName;Latitude;Longitude;Elevation\n\
                   1;Center;47.5;19.0;120\n\
                   2;North;47.6;19.1;130\n\
                   3;Broken;n/a;18.9;110\n";
        let df = clean(parse_csv(csv.as_bytes(), Cadence::Daily).unwrap()).unwrap();
        coerce_numeric(df, &["Latitude", "Longitude", "Elevation"]).unwrap()
    }

    #[test]
    fn distance_column_added_with_null_for_bad_coordinates() {
        let df = add_distance_column(coordinate_frame(), LatLon(47.5, 19.0)).unwrap();
        let distances = df.column(COL_DISTANCE_KM).unwrap().f64().unwrap();

        assert!(distances.get(0).unwrap() < 0.1);
        assert!(distances.get(1).unwrap() > 0.0);
        assert_eq!(distances.get(2), None);
    }

    #[test]
    fn radius_filter_is_inclusive_and_drops_unlocatable_rows() {
        let df = add_distance_column(coordinate_frame(), LatLon(47.5, 19.0)).unwrap();
        let near = df.clone();

        // Exactly-at-radius rows stay in.
        let distances = near.column(COL_DISTANCE_KM).unwrap().f64().unwrap();
        let second_distance = distances.get(1).unwrap();
        let filtered = filter_by_radius(near, second_distance).unwrap();
        assert_eq!(filtered.height(), 2);

        // A tight radius keeps only the center; the null-distance row never
        // survives any radius.
        let filtered = filter_by_radius(df, 0.5).unwrap();
        assert_eq!(filtered.height(), 1);
    }

    #[test]
    fn means_skip_nulls_and_keep_all_null_columns_as_none() {
        let csv = "t;u;sr\n20;60;-999\n-999;70;-999\n22;;-999\n";
        let df = clean(parse_csv(csv.as_bytes(), Cadence::Daily).unwrap()).unwrap();
        let df = coerce_numeric(df, &["t", "u", "sr"]).unwrap();

        let means = mean_values(&df, &["t", "u", "sr", "not_reported"]);

        assert_eq!(means["average_t"], Some(21.0));
        assert_eq!(means["average_u"], Some(65.0));
        assert_eq!(means["average_sr"], None);
        assert!(!means.contains_key("average_not_reported"));
    }

    #[test]
    fn mode_picks_most_frequent_and_ignores_nulls() {
        let csv = "we\n1\n1\n2\n-999\n";
        let df = clean(parse_csv(csv.as_bytes(), Cadence::Hourly).unwrap()).unwrap();
        assert_eq!(most_frequent_code(&df, "we"), Some(1));
    }

    #[test]
    fn mode_of_all_missing_codes_is_none() {
        let csv = "we\n-999\n-999\n";
        let df = clean(parse_csv(csv.as_bytes(), Cadence::Hourly).unwrap()).unwrap();
        assert_eq!(most_frequent_code(&df, "we"), None);
        assert_eq!(most_frequent_code(&df, "absent"), None);
    }

    #[test]
    fn station_list_deduplicates_and_preserves_order() {
        let csv = "StationNumber;StationName;Latitude;Longitude;Elevation\n\
                   1;Center;47.5;19.0;120\n\
                   1;Center;47.5;19.0;120\n\
                   2;North;47.6;19.1;-999\n";
        let df = clean(parse_csv(csv.as_bytes(), Cadence::Daily).unwrap()).unwrap();
        let df = coerce_numeric(df, &["Latitude", "Longitude", "Elevation"]).unwrap();

        let stations = station_info_list(&df).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].station_number, 1);
        assert_eq!(stations[0].station_name, "Center");
        assert_eq!(stations[1].station_number, 2);
        assert_eq!(stations[1].elevation, None);
    }
}
