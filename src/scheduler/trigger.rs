//! Wall-clock trigger computation for the per-cadence update loops.
//!
//! Trigger times follow the upstream publication pattern: the daily bulletin
//! shortly after its morning publication, the hourly bulletin at twenty past
//! (second 59, just before the next ten-minute snapshot), and the ten-minute
//! bulletin at the end of every ten-minute slot.

use crate::types::cadence::Cadence;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

/// Hour and minute of the daily trigger, local wall clock.
const DAILY_TRIGGER_HOUR: u32 = 9;
const DAILY_TRIGGER_MINUTE: u32 = 40;

/// Minute of the hourly trigger.
const HOURLY_TRIGGER_MINUTE: u32 = 20;

/// Second of the hourly and ten-minute triggers.
const TRIGGER_SECOND: u32 = 59;

/// The next wall-clock instant strictly after `now` at which `cadence`
/// should fetch.
pub(crate) fn next_trigger(cadence: Cadence, now: NaiveDateTime) -> NaiveDateTime {
    match cadence {
        Cadence::Daily => {
            let candidate = now
                .date()
                .and_hms_opt(DAILY_TRIGGER_HOUR, DAILY_TRIGGER_MINUTE, 0)
                .expect("literal wall-clock time is valid");
            if candidate > now {
                candidate
            } else {
                candidate + Duration::days(1)
            }
        }
        Cadence::Hourly => {
            let candidate = now
                .date()
                .and_hms_opt(now.hour(), HOURLY_TRIGGER_MINUTE, TRIGGER_SECOND)
                .expect("literal wall-clock time is valid");
            if candidate > now {
                candidate
            } else {
                candidate + Duration::hours(1)
            }
        }
        Cadence::TenMinute => {
            let slot_minute = (now.minute() / 10) * 10;
            let candidate = now
                .date()
                .and_hms_opt(now.hour(), slot_minute, TRIGGER_SECOND)
                .expect("literal wall-clock time is valid");
            if candidate > now {
                candidate
            } else {
                candidate + Duration::minutes(10)
            }
        }
    }
}

/// Whether a daily bulletin is older than expected.
///
/// The daily bulletin covers the previous calendar day, so anything not
/// dated yesterday counts as stale and triggers the bounded re-check.
pub(crate) fn is_stale_daily(bulletin_date: NaiveDate, today: NaiveDate) -> bool {
    bulletin_date != today - Duration::days(1)
}
