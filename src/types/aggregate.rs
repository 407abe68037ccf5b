//! The shaped output of one aggregation cycle: the bulletin timestamp and
//! the per-measurement means over all in-radius stations.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Timestamp of a bulletin, with cadence-dependent precision.
///
/// Daily bulletins carry a bare calendar date; hourly and ten-minute
/// bulletins carry a UTC wall-clock instant. Rendering to local time is the
/// host's concern — this type never converts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BulletinTimestamp {
    /// Calendar date of a daily bulletin.
    Date(NaiveDate),
    /// UTC instant of an hourly or ten-minute bulletin.
    Instant(DateTime<Utc>),
}

impl BulletinTimestamp {
    /// Renders the timestamp the way the host displays it: `YYYY-MM-DD` for
    /// dates, RFC 3339 with an explicit `+00:00` offset for instants.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{NaiveDate, TimeZone, Utc};
    /// use hungaromet::BulletinTimestamp;
    ///
    /// let date = BulletinTimestamp::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    /// assert_eq!(date.to_iso8601(), "2024-03-01");
    ///
    /// let instant = BulletinTimestamp::Instant(Utc.with_ymd_and_hms(2024, 3, 1, 10, 20, 0).unwrap());
    /// assert_eq!(instant.to_iso8601(), "2024-03-01T10:20:00+00:00");
    /// ```
    pub fn to_iso8601(&self) -> String {
        match self {
            BulletinTimestamp::Date(date) => date.format("%Y-%m-%d").to_string(),
            BulletinTimestamp::Instant(instant) => {
                instant.to_rfc3339_opts(SecondsFormat::Secs, false)
            }
        }
    }

    /// The calendar date of the bulletin (the date component for instants).
    pub fn date(&self) -> NaiveDate {
        match self {
            BulletinTimestamp::Date(date) => *date,
            BulletinTimestamp::Instant(instant) => instant.date_naive(),
        }
    }
}

impl Serialize for BulletinTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

/// Result of one fetch-aggregate cycle for one cadence.
///
/// `averages` maps `average_<column>` to the arithmetic mean over all
/// in-radius stations with a reading for that column. Derived metrics
/// (`average_water_balance`, `average_sr_mj`) use the same key convention,
/// so consumers need exactly one lookup path. A key is present with a `None`
/// value when every in-radius station missed that reading; a key is absent
/// only when the upstream bulletin dropped the column entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Bulletin timestamp, taken from the nearest in-radius station's row.
    pub timestamp: BulletinTimestamp,
    /// Mean of each measurement over in-radius stations with valid readings.
    pub averages: BTreeMap<String, Option<f64>>,
    /// Most frequent categorical weather code among in-radius stations.
    /// Hourly bulletins only; `None` elsewhere and when no station reports
    /// a code.
    pub weather_code: Option<i64>,
}

impl AggregateResult {
    /// Looks up a mean by its bare column name (`"t"`, `"water_balance"`).
    ///
    /// Returns `None` when the key is absent, `Some(None)` when the key is
    /// present but had no valid samples.
    pub fn average(&self, column: &str) -> Option<Option<f64>> {
        self.averages.get(&format!("average_{column}")).copied()
    }
}
