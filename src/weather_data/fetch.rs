//! Downloading and parsing of the zipped CSV bulletins.
//!
//! A bulletin is a ZIP archive with a single semicolon-delimited CSV member.
//! Comment lines start with `/`, headers are inconsistently padded with
//! whitespace, and every cell is read as a string; type coercion happens in
//! the cleaning stage so the parser never has to guess at padded numerics.

use crate::types::cadence::Cadence;
use crate::weather_data::error::WeatherDataError;
use log::info;
use polars::prelude::*;
use reqwest::Client;
use std::io::{Cursor, Read, Write};
use tempfile::NamedTempFile;
use zip::ZipArchive;

/// Downloads the full response body for `url`.
///
/// Non-success status codes and connection failures both surface as errors;
/// retry policy lives with the caller.
pub(crate) async fn download(client: &Client, url: &str) -> Result<Vec<u8>, WeatherDataError> {
    info!("Downloading bulletin from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| WeatherDataError::NetworkRequest(url.to_string(), e))?;

    let response = match response.error_for_status() {
        Ok(resp) => resp,
        Err(e) => {
            return Err(if let Some(status) = e.status() {
                WeatherDataError::HttpStatus {
                    url: url.to_string(),
                    status,
                    source: e,
                }
            } else {
                WeatherDataError::NetworkRequest(url.to_string(), e)
            });
        }
    };

    let bytes = response
        .bytes()
        .await
        .map_err(|e| WeatherDataError::NetworkRequest(url.to_string(), e))?;
    info!("Downloaded {} bytes from {}", bytes.len(), url);
    Ok(bytes.to_vec())
}

/// Extracts the first member of the downloaded ZIP archive.
pub(crate) fn extract_csv(
    zip_bytes: &[u8],
    url: &str,
    cadence: Cadence,
) -> Result<Vec<u8>, WeatherDataError> {
    let mut archive =
        ZipArchive::new(Cursor::new(zip_bytes)).map_err(|e| WeatherDataError::ArchiveRead {
            url: url.to_string(),
            source: e,
        })?;

    if archive.is_empty() {
        return Err(WeatherDataError::EmptyArchive(url.to_string()));
    }

    let mut member = archive
        .by_index(0)
        .map_err(|e| WeatherDataError::ArchiveRead {
            url: url.to_string(),
            source: e,
        })?;

    let mut csv_bytes = Vec::with_capacity(member.size() as usize);
    member
        .read_to_end(&mut csv_bytes)
        .map_err(|e| WeatherDataError::CsvReadIo { cadence, source: e })?;
    Ok(csv_bytes)
}

/// Parses raw CSV bytes into a DataFrame with every column as a string.
///
/// Blocking; run inside `spawn_blocking` on the async path.
pub(crate) fn parse_csv(bytes: &[u8], cadence: Cadence) -> Result<DataFrame, WeatherDataError> {
    let mut temp_file =
        NamedTempFile::new().map_err(|e| WeatherDataError::CsvReadIo { cadence, source: e })?;
    temp_file
        .write_all(bytes)
        .map_err(|e| WeatherDataError::CsvReadIo { cadence, source: e })?;
    temp_file
        .flush()
        .map_err(|e| WeatherDataError::CsvReadIo { cadence, source: e })?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(b';')
                .with_comment_prefix(Some("/")),
        )
        .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))
        .map_err(|e| WeatherDataError::CsvReadPolars { cadence, source: e })?
        .finish()
        .map_err(|e| WeatherDataError::CsvReadPolars { cadence, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn zip_with_csv(csv: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("bulletin.csv", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(csv.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn extracts_and_parses_first_member() {
        let csv = "Time;StationNumber;t\n20240301;12843;20.5\n20240301;13704;21.3\n";
        let zip_bytes = zip_with_csv(csv);

        let extracted = extract_csv(&zip_bytes, "http://example.test/data.zip", Cadence::Daily)
            .expect("archive should extract");
        let df = parse_csv(&extracted, Cadence::Daily).expect("csv should parse");

        assert_eq!(df.shape(), (2, 3));
        assert_eq!(
            df.get_column_names()
                .iter()
                .map(|n| n.as_str())
                .collect::<Vec<_>>(),
            ["Time", "StationNumber", "t"]
        );
    }

    #[test]
    fn comment_lines_are_ignored() {
        let csv = "Time;t\n/ source: synoptic network\n20240301;20.5\n";
        let df = parse_csv(csv.as_bytes(), Cadence::Daily).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn empty_archive_is_rejected() {
        let writer = ZipWriter::new(Cursor::new(Vec::new()));
        let zip_bytes = writer.finish().unwrap().into_inner();

        let err = extract_csv(&zip_bytes, "http://example.test/data.zip", Cadence::Daily)
            .expect_err("empty archive must fail");
        assert!(matches!(err, WeatherDataError::EmptyArchive(_)));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = extract_csv(b"not a zip archive", "http://example.test/x.zip", Cadence::Daily)
            .expect_err("garbage must fail");
        assert!(matches!(err, WeatherDataError::ArchiveRead { .. }));
    }
}
