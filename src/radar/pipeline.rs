//! End-to-end radar pipeline: scrape the latest snapshots, download them,
//! and assemble the looping composite animation.

use crate::radar::animation::{composite, download_frames};
use crate::radar::error::RadarError;
use crate::radar::scrape::list_latest;
use bon::bon;
use chrono::{DateTime, Utc};
use log::warn;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task;

/// Upstream directory listing of composite reflectivity snapshots.
pub const RADAR_BASE_URL: &str = "https://odp.met.hu/weather/radar/composite/png/refl2D_pscappi/";

/// Number of snapshots assembled into one animation.
const DEFAULT_FRAME_COUNT: usize = 6;

/// Display duration of every frame but the last, in milliseconds.
const DEFAULT_FRAME_DURATION_MS: u32 = 1000;

/// Display duration of the final frame, marking the end of a loop.
const DEFAULT_FINAL_HOLD_MS: u32 = 3000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The current composite animation with its last-modified instant.
#[derive(Debug, Clone)]
pub struct RadarComposite {
    /// Encoded GIF bytes, identical to the file at the output path.
    pub bytes: Vec<u8>,
    /// When this composite was assembled.
    pub updated_at: DateTime<Utc>,
}

/// Why a refresh cycle ended without writing a new composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A previous refresh is still running; this trigger was dropped rather
    /// than allowed to race on the output file.
    RefreshInFlight,
    /// The upstream listing contained no qualifying image links.
    NoImagesListed,
    /// Every listed frame failed to download or decode.
    AllDownloadsFailed,
}

/// Outcome of one [`RadarPipeline::refresh`] cycle.
///
/// Skips are conditions, not errors: the previous composite (if any) stays
/// in place, stale but present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new composite was written with this many frames.
    Updated { frames: usize },
    /// Nothing was written; see the reason.
    Skipped(SkipReason),
}

/// Assembles and owns the radar composite animation.
///
/// The pipeline is the single writer of the output file; consumers read the
/// current bytes through [`RadarPipeline::current`]. Overlapping refreshes
/// are skipped, never run concurrently against the same file.
///
/// # Examples
///
/// ```no_run
/// # use hungaromet::{RadarPipeline, HungarometError};
/// # async fn run() -> Result<(), HungarometError> {
/// let radar = RadarPipeline::builder()
///     .output_path("/config/www/radar_animation.gif".into())
///     .build()?;
///
/// let outcome = radar.refresh().await?;
/// println!("refresh: {outcome:?}");
///
/// if let Some(current) = radar.current().await {
///     println!("{} bytes as of {}", current.bytes.len(), current.updated_at);
/// }
/// # Ok(())
/// # }
/// ```
pub struct RadarPipeline {
    http: reqwest::Client,
    base_url: String,
    output_path: PathBuf,
    frame_count: usize,
    frame_duration_ms: u32,
    final_hold_ms: u32,
    store: RwLock<Option<RadarComposite>>,
    refresh_guard: Mutex<()>,
}

#[bon]
impl RadarPipeline {
    /// Creates a pipeline writing to `output_path`.
    ///
    /// All other knobs default to the upstream service's values: the
    /// HungaroMet composite listing, six frames, one second per frame and a
    /// three-second final hold.
    #[builder]
    pub fn new(
        output_path: PathBuf,
        base_url: Option<String>,
        frame_count: Option<usize>,
        frame_duration_ms: Option<u32>,
        final_hold_ms: Option<u32>,
    ) -> Result<Self, RadarError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(RadarError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: base_url.unwrap_or_else(|| RADAR_BASE_URL.to_string()),
            output_path,
            frame_count: frame_count.unwrap_or(DEFAULT_FRAME_COUNT),
            frame_duration_ms: frame_duration_ms.unwrap_or(DEFAULT_FRAME_DURATION_MS),
            final_hold_ms: final_hold_ms.unwrap_or(DEFAULT_FINAL_HOLD_MS),
            store: RwLock::new(None),
            refresh_guard: Mutex::new(()),
        })
    }

    /// Runs one full refresh cycle: list the latest snapshots, download
    /// them, composite, and publish bytes + file.
    ///
    /// An empty listing or a total download failure skips the cycle with a
    /// warning and leaves the previous composite untouched. Transport
    /// failures on the listing itself are errors.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RadarError> {
        let Ok(_guard) = self.refresh_guard.try_lock() else {
            warn!("Radar refresh already in flight; skipping this trigger");
            return Ok(RefreshOutcome::Skipped(SkipReason::RefreshInFlight));
        };

        let urls = list_latest(&self.http, &self.base_url, self.frame_count).await?;
        if urls.is_empty() {
            warn!("No radar image URLs found; animation not updated");
            return Ok(RefreshOutcome::Skipped(SkipReason::NoImagesListed));
        }

        let frames = download_frames(&self.http, &urls).await;
        if frames.is_empty() {
            warn!(
                "All {} radar frame downloads failed; animation not updated",
                urls.len()
            );
            return Ok(RefreshOutcome::Skipped(SkipReason::AllDownloadsFailed));
        }

        let frame_total = frames.len();
        let output_path = self.output_path.clone();
        let frame_duration_ms = self.frame_duration_ms;
        let final_hold_ms = self.final_hold_ms;
        let written = task::spawn_blocking(move || {
            composite(&frames, &output_path, frame_duration_ms, final_hold_ms)
        })
        .await??;

        if let Some(bytes) = written {
            let mut store = self.store.write().await;
            *store = Some(RadarComposite {
                bytes,
                updated_at: Utc::now(),
            });
        }
        Ok(RefreshOutcome::Updated {
            frames: frame_total,
        })
    }

    /// The most recent composite, if any refresh has succeeded yet.
    pub async fn current(&self) -> Option<RadarComposite> {
        self.store.read().await.clone()
    }

    /// Where the composite animation is written.
    pub fn output_path(&self) -> &std::path::Path {
        &self.output_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_without_a_composite() {
        let dir = tempfile::tempdir().unwrap();
        let radar = RadarPipeline::builder()
            .output_path(dir.path().join("radar_animation.gif"))
            .build()
            .unwrap();

        assert!(radar.current().await.is_none());
        assert_eq!(
            radar.output_path(),
            dir.path().join("radar_animation.gif").as_path()
        );
    }
}
