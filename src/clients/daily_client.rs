//! Provides the `DailyClient` for aggregating the daily HungaroMet bulletin.
//!
//! This client acts as an intermediate builder, obtained via
//! [`Hungaromet::daily()`], allowing the user to specify the reference
//! coordinate and an optional search radius before executing the request.

use crate::config::DEFAULT_RADIUS_KM;
use crate::error::HungarometError;
use crate::hungaromet::{Hungaromet, LatLon};
use crate::types::aggregate::AggregateResult;
use crate::types::cadence::Cadence;
use crate::types::station::StationInfo;
use bon::bon;

/// A client builder specifically for the daily bulletin.
///
/// Instances are created by calling [`Hungaromet::daily()`]. The daily
/// bulletin covers the previous calendar day and is the only cadence with a
/// derived water balance (`average_water_balance`, precipitation minus
/// evapotranspiration). Upstream publishes it with a lag of several hours;
/// see the scheduler's stale-bulletin handling if you need automated
/// retries.
pub struct DailyClient<'a> {
    /// A reference to the main client instance.
    client: &'a Hungaromet,
}

#[bon]
impl<'a> DailyClient<'a> {
    /// Creates a new `DailyClient`.
    ///
    /// This is typically called internally by [`Hungaromet::daily()`] and
    /// not directly by users.
    pub(crate) fn new(client: &'a Hungaromet) -> Self {
        Self { client }
    }

    /// Fetches the latest daily bulletin and averages it over all stations
    /// within the search radius of `reference`.
    ///
    /// # Arguments
    ///
    /// * `reference` - **Required.** The coordinate to search around,
    ///   supplied as the builder's starting call.
    /// * `.radius_km(f64)`: Optional. Search radius in kilometers, boundary
    ///   inclusive. Defaults to `20.0`.
    ///
    /// # Returns
    ///
    /// The shaped [`AggregateResult`] (ISO calendar-date timestamp, one
    /// `average_*` key per measurement) and the in-radius stations ordered
    /// nearest first.
    ///
    /// # Errors
    ///
    /// Returns [`HungarometError::WeatherData`] when the download fails, the
    /// archive or CSV is malformed, or no station lies within the radius.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use hungaromet::{Hungaromet, HungarometError, LatLon};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), HungarometError> {
    /// let client = Hungaromet::new()?;
    ///
    /// let (aggregate, stations) = client
    ///     .daily()
    ///     .reference(LatLon(47.4979, 19.0402))
    ///     .radius_km(35.0)
    ///     .call()
    ///     .await?;
    ///
    /// println!("{} stations, water balance {:?} mm",
    ///     stations.len(),
    ///     aggregate.average("water_balance"));
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = reference)]
    #[doc(hidden)]
    pub async fn build_reference(
        &self,
        #[builder(start_fn)] reference: LatLon,
        radius_km: Option<f64>,
    ) -> Result<(AggregateResult, Vec<StationInfo>), HungarometError> {
        let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
        Ok(self
            .client
            .process(Cadence::Daily, reference, radius_km)
            .await?)
    }
}
