//! Host-facing configuration surface.
//!
//! The host platform owns the reference coordinates and passes them into
//! every aggregation entry point as an explicit [`LatLon`](crate::LatLon);
//! this module only validates the remaining knobs (display name and search
//! radius). There is no ambient fallback: missing or out-of-range values are
//! rejected instead of silently defaulted.

use thiserror::Error;

/// Default display name for entities derived from this integration.
pub const DEFAULT_NAME: &str = "HungaroMet";

/// Default search radius around the reference point, in kilometers.
pub const DEFAULT_RADIUS_KM: f64 = 20.0;

/// Smallest accepted search radius in kilometers.
pub const MIN_RADIUS_KM: f64 = 1.0;

/// Largest accepted search radius in kilometers.
pub const MAX_RADIUS_KM: f64 = 100.0;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("search radius {0} km is outside the accepted range {MIN_RADIUS_KM}..={MAX_RADIUS_KM} km")]
    RadiusOutOfRange(f64),
}

/// Validated integration settings supplied by the host.
///
/// # Examples
///
/// ```
/// use hungaromet::Settings;
///
/// let settings = Settings::new(None, None).unwrap();
/// assert_eq!(settings.name, "HungaroMet");
/// assert_eq!(settings.radius_km, 20.0);
///
/// assert!(Settings::new(Some("Kert".into()), Some(150.0)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Display name used by the host when naming derived entities.
    pub name: String,
    /// Search radius around the reference point, in kilometers.
    pub radius_km: f64,
}

impl Settings {
    /// Builds settings from optional host input, applying defaults and
    /// validating the radius range (inclusive on both ends).
    pub fn new(name: Option<String>, radius_km: Option<f64>) -> Result<Self, ConfigError> {
        let radius_km = radius_km.unwrap_or(DEFAULT_RADIUS_KM);
        if !(MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&radius_km) {
            return Err(ConfigError::RadiusOutOfRange(radius_km));
        }
        Ok(Self {
            name: name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            radius_km,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            radius_km: DEFAULT_RADIUS_KM,
        }
    }
}
