mod clients;
mod config;
mod error;
mod geo;
mod hungaromet;
mod radar;
mod scheduler;
mod types;
mod weather_data;

pub use error::HungarometError;
pub use hungaromet::*;

pub use clients::daily_client::*;
pub use clients::hourly_client::*;
pub use clients::ten_minute_client::*;

pub use config::{
    ConfigError, Settings, DEFAULT_NAME, DEFAULT_RADIUS_KM, MAX_RADIUS_KM, MIN_RADIUS_KM,
};
pub use geo::distance_km;

pub use types::aggregate::{AggregateResult, BulletinTimestamp};
pub use types::cadence::Cadence;
pub use types::sky_condition::SkyCondition;
pub use types::station::StationInfo;
pub use types::units::unit_for;

pub use radar::error::RadarError;
pub use radar::pipeline::{
    RadarComposite, RadarPipeline, RefreshOutcome, SkipReason, RADAR_BASE_URL,
};

pub use scheduler::{CadenceSnapshot, Scheduler};
pub use weather_data::error::WeatherDataError;
