use crate::config::ConfigError;
use crate::radar::error::RadarError;
use crate::weather_data::error::WeatherDataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HungarometError {
    #[error(transparent)]
    WeatherData(#[from] WeatherDataError),

    #[error(transparent)]
    Radar(#[from] RadarError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
