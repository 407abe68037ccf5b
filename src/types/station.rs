//! Station identity as reported by the bulletins, used for display and
//! diagnostics by the host platform.

use serde::{Deserialize, Serialize};

/// One weather station that passed the proximity filter.
///
/// The fields mirror the identity columns of the upstream bulletins. A
/// processor returns these deduplicated and ordered by ascending distance
/// from the reference point, so the first entry is always the nearest
/// station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationInfo {
    /// Upstream numeric station identifier.
    pub station_number: i64,
    /// Human-readable station name.
    pub station_name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Elevation above sea level in meters, when reported.
    pub elevation: Option<f64>,
}
