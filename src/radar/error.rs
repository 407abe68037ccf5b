use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadarError {
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

    #[error("Failed to decode radar frame downloaded from {url}")]
    ImageDecode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode radar animation")]
    GifEncode(#[source] image::ImageError),

    #[error("Failed to write radar animation to '{path}'")]
    OutputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
