//! Provides the `TenMinuteClient` for aggregating the ten-minute synoptic
//! bulletin, obtained via [`Hungaromet::ten_minute()`].

use crate::config::DEFAULT_RADIUS_KM;
use crate::error::HungarometError;
use crate::hungaromet::{Hungaromet, LatLon};
use crate::types::aggregate::AggregateResult;
use crate::types::cadence::Cadence;
use crate::types::station::StationInfo;
use bon::bon;

/// A client builder for the ten-minute bulletin, the tightest cadence the
/// service publishes.
pub struct TenMinuteClient<'a> {
    client: &'a Hungaromet,
}

#[bon]
impl<'a> TenMinuteClient<'a> {
    pub(crate) fn new(client: &'a Hungaromet) -> Self {
        Self { client }
    }

    /// Fetches the latest ten-minute bulletin and averages it over all
    /// stations within the search radius of `reference`.
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
            .process(Cadence::TenMinute, reference, radius_km)
            .await?)
    }
}
