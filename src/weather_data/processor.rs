//! The shared four-stage pipeline behind all three cadence processors:
//! fetch → clean → geo-filter → aggregate-and-shape.

use crate::hungaromet::LatLon;
use crate::types::aggregate::{AggregateResult, BulletinTimestamp};
use crate::types::cadence::{Cadence, COL_TIME, COL_WEATHER_CODE};
use crate::types::station::StationInfo;
use crate::weather_data::aggregate::{
    add_distance_column, filter_by_radius, mean_values, most_frequent_code, station_info_list,
};
use crate::weather_data::clean::{clean, coerce_numeric, select_columns};
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::fetch;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use reqwest::Client;
use tokio::task;

/// Fetches the latest bulletin for `cadence` and aggregates it around
/// `reference`.
///
/// The download happens on the async path; ZIP extraction, CSV parsing and
/// the whole aggregation run in one blocking task so the caller's executor
/// is never stalled.
pub(crate) async fn process(
    client: &Client,
    cadence: Cadence,
    reference: LatLon,
    radius_km: f64,
) -> Result<(AggregateResult, Vec<StationInfo>), WeatherDataError> {
    let url = cadence.bulletin_url();
    let zip_bytes = fetch::download(client, url).await?;

    task::spawn_blocking(move || {
        let csv_bytes = fetch::extract_csv(&zip_bytes, url, cadence)?;
        let df = fetch::parse_csv(&csv_bytes, cadence)?;
        process_frame(df, cadence, reference, radius_km)
    })
    .await?
}

/// Aggregates an already-parsed bulletin frame.
pub(crate) fn process_frame(
    df: DataFrame,
    cadence: Cadence,
    reference: LatLon,
    radius_km: f64,
) -> Result<(AggregateResult, Vec<StationInfo>), WeatherDataError> {
    let df = clean(df)?;
    let df = select_columns(df, cadence)?;
    let df = coerce_numeric(df, cadence.measurement_columns())?;
    let df = add_distance_column(df, reference)?;
    let df = filter_by_radius(df, radius_km)?;

    if df.height() == 0 {
        return Err(WeatherDataError::NoStationWithinRadius {
            radius: radius_km,
            lat: reference.0,
            lon: reference.1,
        });
    }

    let timestamp = bulletin_timestamp(&df, cadence)?;
    let mut averages = mean_values(&df, cadence.measurement_columns());

    if cadence == Cadence::Daily {
        let precipitation = averages.get("average_rau").copied().flatten();
        let evapotranspiration = averages.get("average_upe").copied().flatten();
        let water_balance = match (precipitation, evapotranspiration) {
            (Some(rau), Some(upe)) => Some(rau - upe),
            _ => None,
        };
        averages.insert("average_water_balance".to_string(), water_balance);
    }

    // J/cm² to MJ/m².
    let solar = averages.get("average_sr").copied().flatten();
    averages.insert("average_sr_mj".to_string(), solar.map(|sr| sr * 0.01));

    let weather_code = match cadence {
        Cadence::Hourly => most_frequent_code(&df, COL_WEATHER_CODE),
        _ => None,
    };

    let stations = station_info_list(&df)?;

    Ok((
        AggregateResult {
            timestamp,
            averages,
            weather_code,
        },
        stations,
    ))
}

/// Parses the timestamp of the nearest station's row.
fn bulletin_timestamp(
    df: &DataFrame,
    cadence: Cadence,
) -> Result<BulletinTimestamp, WeatherDataError> {
    let raw = df
        .column(COL_TIME)?
        .str()?
        .get(0)
        .ok_or(WeatherDataError::EmptyBulletin { cadence })?;

    let parsed = match cadence {
        Cadence::Daily => NaiveDate::parse_from_str(raw, cadence.timestamp_format())
            .ok()
            .map(BulletinTimestamp::Date),
        Cadence::Hourly | Cadence::TenMinute => {
            NaiveDateTime::parse_from_str(raw, cadence.timestamp_format())
                .ok()
                .map(|naive| BulletinTimestamp::Instant(naive.and_utc()))
        }
    };

    parsed.ok_or_else(|| WeatherDataError::MalformedTimestamp {
        cadence,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather_data::fetch::parse_csv;

    // Reference point used throughout: central Budapest. The "Far" station
    // rows sit ~50 km north, outside the default 20 km radius.
    const REF: LatLon = LatLon(47.4979, 19.0402);

    fn daily_frame(csv: &str) -> DataFrame {
        parse_csv(csv.as_bytes(), Cadence::Daily).unwrap()
    }

    fn daily_csv() -> String {
        let header =
            "Time;StationNumber;StationName;Latitude;Longitude;Elevation;rau;upe;t;tn;tx;sr;et5;et10;et20;et50;et100;tsn24";
        let near =
            "20240301;12843;Budapest;47.4979;19.0402;140;10.0;3.0;5.2;1.0;9.5;800;4;4;5;6;7;0.5";
        let far =
            "20240301;13704;Far;47.9479;19.0402;200;99.0;50.0;-10.0;-20.0;-5.0;100;0;0;0;0;0;-9";
        format!("{header}\n{near}\n{far}\n")
    }

    #[test]
    fn daily_aggregate_reflects_only_in_radius_stations() {
        let (result, stations) =
            process_frame(daily_frame(&daily_csv()), Cadence::Daily, REF, 20.0).unwrap();

        // Only the Budapest station is within 20 km, so every mean equals
        // its reading.
        assert_eq!(result.average("rau"), Some(Some(10.0)));
        assert_eq!(result.average("t"), Some(Some(5.2)));
        assert_eq!(result.timestamp.to_iso8601(), "2024-03-01");

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].station_number, 12843);
        assert_eq!(stations[0].station_name, "Budapest");
    }

    #[test]
    fn water_balance_and_solar_conversion() {
        let (result, _) =
            process_frame(daily_frame(&daily_csv()), Cadence::Daily, REF, 20.0).unwrap();

        // rau 10.0 - upe 3.0
        assert_eq!(result.average("water_balance"), Some(Some(7.0)));
        // sr 800 J/cm² -> 8 MJ/m²
        assert_eq!(result.average("sr_mj"), Some(Some(8.0)));
    }

    #[test]
    fn water_balance_is_none_when_an_operand_is_missing() {
        let csv = daily_csv().replace(";10.0;3.0;", ";10.0;-999;");
        let (result, _) = process_frame(daily_frame(&csv), Cadence::Daily, REF, 20.0).unwrap();

        assert_eq!(result.average("upe"), Some(None));
        assert_eq!(result.average("water_balance"), Some(None));
    }

    #[test]
    fn no_station_in_radius_is_an_error() {
        let err = process_frame(daily_frame(&daily_csv()), Cadence::Daily, LatLon(46.0, 17.0), 5.0)
            .expect_err("no station within 5 km of the southwest border");
        assert!(matches!(err, WeatherDataError::NoStationWithinRadius { .. }));
    }

    #[test]
    fn malformed_timestamp_is_an_error() {
        let csv = daily_csv().replace("20240301;12843", "3rd of March;12843");
        let err = process_frame(daily_frame(&csv), Cadence::Daily, REF, 20.0)
            .expect_err("unparseable timestamp");
        assert!(matches!(err, WeatherDataError::MalformedTimestamp { .. }));
    }

    fn hourly_csv(codes: [&str; 3]) -> String {
        let header = "Time;StationNumber;StationName;Latitude;Longitude;Elevation;\
                      r;t;ta;tn;tx;u;sg;sr;suv;fs;fsd;fx;fxd;f;fd;we;\
                      et5;et10;et20;et50;et100;tsn;tviz";
        let rows: Vec<String> = codes
            .iter()
            .enumerate()
            .map(|(i, code)| {
                format!(
                    "202403011020;{};Station{};47.49;19.04;130;0.2;6;6;2;8;70;90;120;0.1;\
                     3;180;7;190;2.5;170;{};4;4;5;6;7;1;4",
                    12800 + i,
                    i,
                    code
                )
            })
            .collect();
        format!("{header}\n{}\n", rows.join("\n"))
    }

    #[test]
    fn hourly_weather_code_is_the_mode() {
        let df = parse_csv(hourly_csv(["1", "1", "2"]).as_bytes(), Cadence::Hourly).unwrap();
        let (result, stations) = process_frame(df, Cadence::Hourly, REF, 20.0).unwrap();

        assert_eq!(result.weather_code, Some(1));
        assert_eq!(result.timestamp.to_iso8601(), "2024-03-01T10:20:00+00:00");
        assert_eq!(stations.len(), 3);
        // sr 120 J/cm² -> 1.2 MJ/m²
        assert_eq!(result.average("sr_mj"), Some(Some(1.2)));
    }

    #[test]
    fn hourly_weather_code_none_when_all_codes_missing() {
        let df = parse_csv(
            hourly_csv(["-999", "-999", "-999"]).as_bytes(),
            Cadence::Hourly,
        )
        .unwrap();
        let (result, _) = process_frame(df, Cadence::Hourly, REF, 20.0).unwrap();
        assert_eq!(result.weather_code, None);
    }

    #[test]
    fn ten_minute_aggregate_has_instant_timestamp_and_no_weather_code() {
        let header = "Time;StationNumber;StationName;Latitude;Longitude;Elevation;\
                      r;t;ta;tn;tx;u;sg;sr;suv;fs;fsd;fx;fxd;\
                      et5;et10;et20;et50;et100;tsn;tviz";
        let row = "202403011059;12843;Budapest;47.4979;19.0402;140;0.0;6.1;6.0;5.8;6.3;71;88;\
                   40;0.0;2.1;200;4.4;210;4;4;5;6;7;1.2;3.9";
        let df = parse_csv(format!("{header}\n{row}\n").as_bytes(), Cadence::TenMinute).unwrap();

        let (result, _) = process_frame(df, Cadence::TenMinute, REF, 20.0).unwrap();
        assert_eq!(result.timestamp.to_iso8601(), "2024-03-01T10:59:00+00:00");
        assert_eq!(result.weather_code, None);
        assert_eq!(result.average("fs"), Some(Some(2.1)));
    }
}
