use crate::types::cadence::Cadence;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherDataError {
    #[error("Failed to construct HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read ZIP archive downloaded from {url}")]
    ArchiveRead {
        url: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("ZIP archive downloaded from {0} contains no members")]
    EmptyArchive(String),

    #[error("I/O error processing the {cadence} bulletin")]
    CsvReadIo {
        cadence: Cadence,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error processing the {cadence} bulletin")]
    CsvReadPolars {
        cadence: Cadence,
        #[source]
        source: PolarsError,
    },

    #[error("Required column '{column}' not found in the {cadence} bulletin")]
    MissingColumn { cadence: Cadence, column: String },

    #[error("The {cadence} bulletin is empty after cleaning")]
    EmptyBulletin { cadence: Cadence },

    #[error("Cannot parse '{value}' as a {cadence} bulletin timestamp")]
    MalformedTimestamp { cadence: Cadence, value: String },

    #[error("No station within {radius} km of ({lat}, {lon})")]
    NoStationWithinRadius { radius: f64, lat: f64, lon: f64 },

    #[error("Failed processing DataFrame: {0}")]
    DataFrame(#[from] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
