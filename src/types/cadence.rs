//! Defines the bulletin cadences published by the HungaroMet open data
//! service and the per-cadence schema knowledge (URL, column whitelist,
//! measurement columns, timestamp format).

use std::fmt;

const URL_DAILY: &str =
    "https://odp.met.hu/weather/weather_reports/synoptic/hungary/daily/csv/HABP_1D_LATEST.csv.zip";
const URL_HOURLY: &str =
    "https://odp.met.hu/weather/weather_reports/synoptic/hungary/hourly/csv/HABP_1H_SYNOP_LATEST.csv.zip";
const URL_TEN_MINUTES: &str =
    "https://odp.met.hu/weather/weather_reports/synoptic/hungary/10_minutes/csv/HABP_10M_SYNOP_LATEST.csv.zip";

/// Identifier column: upstream station number.
pub const COL_STATION_NUMBER: &str = "StationNumber";
/// Identifier column: upstream station name.
pub const COL_STATION_NAME: &str = "StationName";
/// Coordinate column, degrees north.
pub const COL_LATITUDE: &str = "Latitude";
/// Coordinate column, degrees east.
pub const COL_LONGITUDE: &str = "Longitude";
/// Elevation column, meters above sea level.
pub const COL_ELEVATION: &str = "Elevation";
/// Bulletin timestamp column (`YYYYMMDD` or `YYYYMMDDHHMM`).
pub const COL_TIME: &str = "Time";
/// Categorical weather-code column in the hourly bulletin.
pub const COL_WEATHER_CODE: &str = "we";

/// Derived column appended by the proximity filter, kilometers from the
/// reference point.
pub const COL_DISTANCE_KM: &str = "distance_km";

/// Update frequency class of a HungaroMet bulletin.
///
/// Each cadence maps to one fixed upstream ZIP/CSV snapshot URL and a fixed
/// set of reported measurement columns. The cadence also decides how the
/// bulletin timestamp is parsed and rendered: daily bulletins carry a bare
/// calendar date, hourly and ten-minute bulletins a UTC wall-clock instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    /// One snapshot per day, covering the previous calendar day.
    Daily,
    /// One snapshot per hour.
    Hourly,
    /// One snapshot every ten minutes.
    TenMinute,
}

impl Cadence {
    /// All cadences, in coarse-to-fine order.
    pub const ALL: [Cadence; 3] = [Cadence::Daily, Cadence::Hourly, Cadence::TenMinute];

    /// Fixed upstream URL of the latest bulletin for this cadence.
    pub fn bulletin_url(&self) -> &'static str {
        match self {
            Cadence::Daily => URL_DAILY,
            Cadence::Hourly => URL_HOURLY,
            Cadence::TenMinute => URL_TEN_MINUTES,
        }
    }

    /// Columns selected from the raw bulletin, identity columns first.
    ///
    /// Selection happens before the proximity filter; a bulletin missing any
    /// of these columns is rejected as malformed.
    pub(crate) fn column_whitelist(&self) -> &'static [&'static str] {
        match self {
            Cadence::Daily => &[
                COL_TIME,
                COL_STATION_NUMBER,
                COL_STATION_NAME,
                COL_LATITUDE,
                COL_LONGITUDE,
                COL_ELEVATION,
                "rau",
                "upe",
                "t",
                "tn",
                "tx",
                "sr",
                "et5",
                "et10",
                "et20",
                "et50",
                "et100",
                "tsn24",
            ],
            Cadence::Hourly => &[
                COL_TIME,
                COL_STATION_NUMBER,
                COL_STATION_NAME,
                COL_LATITUDE,
                COL_LONGITUDE,
                COL_ELEVATION,
                "r",
                "t",
                "ta",
                "tn",
                "tx",
                "u",
                "sg",
                "sr",
                "suv",
                "fs",
                "fsd",
                "fx",
                "fxd",
                "f",
                "fd",
                COL_WEATHER_CODE,
                "et5",
                "et10",
                "et20",
                "et50",
                "et100",
                "tsn",
                "tviz",
            ],
            Cadence::TenMinute => &[
                COL_TIME,
                COL_STATION_NUMBER,
                COL_STATION_NAME,
                COL_LATITUDE,
                COL_LONGITUDE,
                COL_ELEVATION,
                "r",
                "t",
                "ta",
                "tn",
                "tx",
                "u",
                "sg",
                "sr",
                "suv",
                "fs",
                "fsd",
                "fx",
                "fxd",
                "et5",
                "et10",
                "et20",
                "et50",
                "et100",
                "tsn",
                "tviz",
            ],
        }
    }

    /// Columns averaged across in-radius stations.
    ///
    /// The categorical weather code (`we`) is deliberately absent: it is
    /// summarized by its most frequent value, not a mean.
    pub(crate) fn measurement_columns(&self) -> &'static [&'static str] {
        match self {
            Cadence::Daily => &[
                COL_LATITUDE,
                COL_LONGITUDE,
                COL_ELEVATION,
                "rau",
                "upe",
                "t",
                "tn",
                "tx",
                "sr",
                "et5",
                "et10",
                "et20",
                "et50",
                "et100",
                "tsn24",
            ],
            Cadence::Hourly => &[
                COL_LATITUDE,
                COL_LONGITUDE,
                COL_ELEVATION,
                "r",
                "t",
                "ta",
                "tn",
                "tx",
                "u",
                "sg",
                "sr",
                "suv",
                "fs",
                "fsd",
                "fx",
                "fxd",
                "f",
                "fd",
                "et5",
                "et10",
                "et20",
                "et50",
                "et100",
                "tsn",
                "tviz",
            ],
            Cadence::TenMinute => &[
                COL_LATITUDE,
                COL_LONGITUDE,
                COL_ELEVATION,
                "r",
                "t",
                "ta",
                "tn",
                "tx",
                "u",
                "sg",
                "sr",
                "suv",
                "fs",
                "fsd",
                "fx",
                "fxd",
                "et5",
                "et10",
                "et20",
                "et50",
                "et100",
                "tsn",
                "tviz",
            ],
        }
    }

    /// `strftime` pattern of the bulletin's `Time` column.
    pub(crate) fn timestamp_format(&self) -> &'static str {
        match self {
            Cadence::Daily => "%Y%m%d",
            Cadence::Hourly | Cadence::TenMinute => "%Y%m%d%H%M",
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Hourly => "hourly",
            Cadence::TenMinute => "ten_minutes",
        }
    }
}

/// Formats a `Cadence` using its wire label.
///
/// # Examples
///
/// ```
/// use hungaromet::Cadence;
///
/// assert_eq!(format!("{}", Cadence::Hourly), "hourly");
/// assert_eq!(Cadence::TenMinute.to_string(), "ten_minutes");
/// ```
impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
