//! This module provides the main entry point for interacting with the
//! HungaroMet open data service. It fetches the latest bulletin for a given
//! cadence and aggregates it around a reference coordinate supplied by the
//! caller.

use crate::error::HungarometError;
use crate::types::aggregate::AggregateResult;
use crate::types::cadence::Cadence;
use crate::types::station::StationInfo;
use crate::weather_data::error::WeatherDataError;
use crate::weather_data::processor;
use crate::clients::daily_client::DailyClient;
use crate::clients::hourly_client::HourlyClient;
use crate::clients::ten_minute_client::TenMinuteClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout applied to every upstream HTTP request. The pipeline itself has
/// no outer deadline; parse and aggregation are bounded by bulletin size.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are in decimal degrees.
///
/// # Examples
///
/// ```
/// use hungaromet::LatLon;
///
/// let budapest_center = LatLon(47.4979, 19.0402);
/// assert_eq!(budapest_center.0, 47.4979); // Latitude
/// assert_eq!(budapest_center.1, 19.0402); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

/// The main client for the HungaroMet open data service.
///
/// Every aggregation entry point takes the reference coordinate explicitly —
/// the host platform owns its location configuration and passes it in; the
/// client never reads ambient state and never guesses a default location.
///
/// # Examples
///
/// ```no_run
/// # use hungaromet::{Hungaromet, HungarometError, LatLon};
/// # async fn run() -> Result<(), HungarometError> {
/// let client = Hungaromet::new()?;
///
/// // Average the latest daily bulletin over stations within 20 km (the
/// // default radius) of central Budapest.
/// let (aggregate, stations) = client
///     .daily()
///     .reference(LatLon(47.4979, 19.0402))
///     .call()
///     .await?;
///
/// println!(
///     "Mean temperature over {} stations on {}: {:?} °C",
///     stations.len(),
///     aggregate.timestamp.to_iso8601(),
///     aggregate.average("t"),
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Hungaromet {
    http: reqwest::Client,
}

impl Hungaromet {
    /// Creates a new client with a 30-second request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherDataError::ClientBuild`] (wrapped in
    /// [`HungarometError`]) if the underlying HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, HungarometError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(WeatherDataError::ClientBuild)?;
        Ok(Self { http })
    }

    /// Returns a client for the daily bulletin (previous calendar day's
    /// sums, means and extremes; includes the derived water balance).
    pub fn daily(&self) -> DailyClient {
        DailyClient::new(self)
    }

    /// Returns a client for the hourly synoptic bulletin (includes the
    /// most-frequent weather code among in-radius stations).
    pub fn hourly(&self) -> HourlyClient {
        HourlyClient::new(self)
    }

    /// Returns a client for the ten-minute synoptic bulletin.
    pub fn ten_minute(&self) -> TenMinuteClient {
        TenMinuteClient::new(self)
    }

    /// Fetches and aggregates the latest bulletin for an arbitrary cadence.
    pub(crate) async fn process(
        &self,
        cadence: Cadence,
        reference: LatLon,
        radius_km: f64,
    ) -> Result<(AggregateResult, Vec<StationInfo>), WeatherDataError> {
        processor::process(&self.http, cadence, reference, radius_km).await
    }
}
