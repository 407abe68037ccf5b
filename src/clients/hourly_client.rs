//! Provides the `HourlyClient` for aggregating the hourly synoptic
//! bulletin, obtained via [`Hungaromet::hourly()`].

use crate::config::DEFAULT_RADIUS_KM;
use crate::error::HungarometError;
use crate::hungaromet::{Hungaromet, LatLon};
use crate::types::aggregate::AggregateResult;
use crate::types::cadence::Cadence;
use crate::types::station::StationInfo;
use bon::bon;

/// A client builder specifically for the hourly bulletin.
///
/// Besides the usual `average_*` means, the hourly result carries
/// [`AggregateResult::weather_code`]: the most frequent present-weather code
/// among in-radius stations, convertible with
/// [`SkyCondition::from_i64`](crate::SkyCondition::from_i64).
pub struct HourlyClient<'a> {
    client: &'a Hungaromet,
}

#[bon]
impl<'a> HourlyClient<'a> {
    pub(crate) fn new(client: &'a Hungaromet) -> Self {
        Self { client }
    }

    /// Fetches the latest hourly bulletin and averages it over all stations
    /// within the search radius of `reference`.
    ///
    /// The timestamp is a UTC instant rendered with an explicit offset;
    /// conversion to local time is left to the caller.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use hungaromet::{Hungaromet, HungarometError, LatLon, SkyCondition};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), HungarometError> {
    /// let client = Hungaromet::new()?;
    /// let (aggregate, _) = client
    ///     .hourly()
    ///     .reference(LatLon(47.4979, 19.0402))
    ///     .call()
    ///     .await?;
    ///
    /// if let Some(condition) = aggregate.weather_code.and_then(SkyCondition::from_i64) {
    ///     println!("Sky around Budapest: {condition:?}");
    /// }
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
            .process(Cadence::Hourly, reference, radius_km)
            .await?)
    }
}
