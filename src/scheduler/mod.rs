//! Scheduling, retry and fan-out for the three bulletin cadences and the
//! radar pipeline.
//!
//! Each cadence fetches once per trigger and distributes the snapshot to
//! every subscriber through a watch channel, so upstream request volume is
//! one per tick regardless of how many values the host displays. The
//! channel retains the last good snapshot: a failed cycle is logged and the
//! previously published values stay visible, never flapping to "unknown".

pub(crate) mod trigger;

use crate::error::HungarometError;
use crate::hungaromet::{Hungaromet, LatLon};
use crate::config::DEFAULT_RADIUS_KM;
use crate::radar::pipeline::RadarPipeline;
use crate::scheduler::trigger::{is_stale_daily, next_trigger};
use crate::types::aggregate::AggregateResult;
use crate::types::cadence::Cadence;
use crate::types::station::StationInfo;
use bon::bon;
use chrono::{DateTime, Local, Utc};
use log::{error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

/// How long to wait before re-checking a stale daily bulletin.
const STALE_RETRY_DELAY: Duration = Duration::from_secs(30 * 60);

/// How many stale re-checks one daily trigger may arm, total. With the
/// 30-minute delay this gives upstream three hours of grace per day.
const MAX_STALE_RETRIES: u32 = 6;

/// One successfully fetched and aggregated bulletin.
#[derive(Debug, Clone)]
pub struct CadenceSnapshot {
    /// The shaped aggregate for this cadence.
    pub result: AggregateResult,
    /// In-radius stations, nearest first.
    pub stations: Vec<StationInfo>,
    /// When the fetch-aggregate cycle completed.
    pub fetched_at: DateTime<Utc>,
}

struct CadenceSlot {
    publisher: watch::Sender<Option<Arc<CadenceSnapshot>>>,
    // Serializes scheduled and on-demand cycles for the same cadence.
    cycle_lock: Mutex<()>,
}

impl CadenceSlot {
    fn new() -> Self {
        let (publisher, _) = watch::channel(None);
        Self {
            publisher,
            cycle_lock: Mutex::new(()),
        }
    }
}

/// Drives periodic updates for all cadences plus the radar pipeline.
///
/// # Examples
///
/// ```no_run
/// # use std::sync::Arc;
/// # use hungaromet::{Cadence, Hungaromet, HungarometError, LatLon, Scheduler};
/// # async fn run() -> Result<(), HungarometError> {
/// let scheduler = Arc::new(
///     Scheduler::builder()
///         .client(Hungaromet::new()?)
///         .reference(LatLon(47.4979, 19.0402))
///         .radius_km(30.0)
///         .build(),
/// );
///
/// // A display entity watches one cadence.
/// let mut hourly = scheduler.subscribe(Cadence::Hourly);
///
/// // Start the periodic loops; handles live as long as the host wants.
/// let _handles = Arc::clone(&scheduler).spawn();
///
/// hourly.changed().await.ok();
/// if let Some(snapshot) = hourly.borrow().as_ref() {
///     println!("hourly mean temperature: {:?}", snapshot.result.average("t"));
/// }
/// # Ok(())
/// # }
/// ```
pub struct Scheduler {
    client: Hungaromet,
    radar: Option<Arc<RadarPipeline>>,
    reference: LatLon,
    radius_km: f64,
    daily: CadenceSlot,
    hourly: CadenceSlot,
    ten_minute: CadenceSlot,
}

#[bon]
impl Scheduler {
    /// Creates a scheduler for the given reference point.
    ///
    /// * `.client(Hungaromet)`: **Required.** The bulletin client.
    /// * `.reference(LatLon)`: **Required.** Coordinates owned by the host.
    /// * `.radius_km(f64)`: Optional. Defaults to `20.0`.
    /// * `.radar(Arc<RadarPipeline>)`: Optional. When set, [`Scheduler::spawn`]
    ///   also drives radar refreshes on the ten-minute grid.
    #[builder]
    pub fn new(
        client: Hungaromet,
        radar: Option<Arc<RadarPipeline>>,
        reference: LatLon,
        radius_km: Option<f64>,
    ) -> Self {
        Self {
            client,
            radar,
            reference,
            radius_km: radius_km.unwrap_or(DEFAULT_RADIUS_KM),
            daily: CadenceSlot::new(),
            hourly: CadenceSlot::new(),
            ten_minute: CadenceSlot::new(),
        }
    }

    fn slot(&self, cadence: Cadence) -> &CadenceSlot {
        match cadence {
            Cadence::Daily => &self.daily,
            Cadence::Hourly => &self.hourly,
            Cadence::TenMinute => &self.ten_minute,
        }
    }

    /// Subscribes to snapshots of one cadence.
    ///
    /// The receiver starts at `None` and then always holds the most recent
    /// successful snapshot.
    pub fn subscribe(&self, cadence: Cadence) -> watch::Receiver<Option<Arc<CadenceSnapshot>>> {
        self.slot(cadence).publisher.subscribe()
    }

    /// Runs one fetch-aggregate cycle immediately and publishes the result.
    ///
    /// Serialized against the scheduled loop of the same cadence: a cycle
    /// already in flight finishes first, this one queues behind it.
    pub async fn run_now(
        &self,
        cadence: Cadence,
    ) -> Result<Arc<CadenceSnapshot>, HungarometError> {
        let slot = self.slot(cadence);
        let _guard = slot.cycle_lock.lock().await;

        let (result, stations) = self
            .client
            .process(cadence, self.reference, self.radius_km)
            .await?;
        let snapshot = Arc::new(CadenceSnapshot {
            result,
            stations,
            fetched_at: Utc::now(),
        });
        slot.publisher.send_replace(Some(Arc::clone(&snapshot)));
        info!(
            "Published {cadence} snapshot dated {}",
            snapshot.result.timestamp.to_iso8601()
        );
        Ok(snapshot)
    }

    /// Spawns the periodic loops: one task per cadence, plus a radar task
    /// when a pipeline was configured.
    pub fn spawn(self: Arc<Self>) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::with_capacity(4);
        for cadence in Cadence::ALL {
            let scheduler = Arc::clone(&self);
            handles.push(tokio::spawn(async move {
                scheduler.run_cadence_loop(cadence).await;
            }));
        }
        if let Some(radar) = self.radar.clone() {
            handles.push(tokio::spawn(async move {
                run_radar_loop(radar).await;
            }));
        }
        handles
    }

    async fn run_cadence_loop(&self, cadence: Cadence) {
        loop {
            let now = Local::now().naive_local();
            let next = next_trigger(cadence, now);
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            tokio::time::sleep(wait).await;
            self.run_cycle(cadence).await;
        }
    }

    /// One scheduled cycle, including the bounded stale re-check for the
    /// daily cadence. At most one retry is pending at any time, and a
    /// trigger arms at most [`MAX_STALE_RETRIES`] of them.
    async fn run_cycle(&self, cadence: Cadence) {
        let mut retries_left = match cadence {
            Cadence::Daily => MAX_STALE_RETRIES,
            _ => 0,
        };

        loop {
            match self.run_now(cadence).await {
                Ok(snapshot) => {
                    if cadence == Cadence::Daily {
                        let today = Local::now().date_naive();
                        let bulletin_date = snapshot.result.timestamp.date();
                        if is_stale_daily(bulletin_date, today) && retries_left > 0 {
                            retries_left -= 1;
                            warn!(
                                "Daily bulletin still dated {bulletin_date}; \
                                 re-checking in 30 minutes ({retries_left} retries left)"
                            );
                            tokio::time::sleep(STALE_RETRY_DELAY).await;
                            continue;
                        }
                    }
                    break;
                }
                Err(e) => {
                    // Previously published values stay in place.
                    error!("{cadence} update failed: {e}");
                    break;
                }
            }
        }
    }
}

async fn run_radar_loop(radar: Arc<RadarPipeline>) {
    loop {
        let now = Local::now().naive_local();
        let next = next_trigger(Cadence::TenMinute, now);
        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        tokio::time::sleep(wait).await;

        match radar.refresh().await {
            Ok(outcome) => info!("Radar refresh finished: {outcome:?}"),
            Err(e) => error!("Radar refresh failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::aggregate::BulletinTimestamp;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn scheduler() -> Scheduler {
        Scheduler::builder()
            .client(Hungaromet::new().unwrap())
            .reference(LatLon(47.4979, 19.0402))
            .build()
    }

    fn snapshot() -> Arc<CadenceSnapshot> {
        Arc::new(CadenceSnapshot {
            result: AggregateResult {
                timestamp: BulletinTimestamp::Date(
                    NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
                ),
                averages: BTreeMap::new(),
                weather_code: None,
            },
            stations: Vec::new(),
            fetched_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn subscribers_start_empty_and_see_published_snapshots() {
        let scheduler = scheduler();
        let mut daily = scheduler.subscribe(Cadence::Daily);
        let hourly = scheduler.subscribe(Cadence::Hourly);

        assert!(daily.borrow().is_none());

        // Fan-out is per cadence: a daily publish reaches every daily
        // subscriber and no one else.
        let other_daily = scheduler.subscribe(Cadence::Daily);
        scheduler.slot(Cadence::Daily).publisher.send_replace(Some(snapshot()));

        assert!(daily.changed().await.is_ok());
        assert!(daily.borrow().is_some());
        assert!(other_daily.borrow().is_some());
        assert!(hourly.borrow().is_none());
    }

    #[tokio::test]
    async fn late_subscribers_get_the_last_snapshot() {
        let scheduler = scheduler();
        scheduler
            .slot(Cadence::TenMinute)
            .publisher
            .send_replace(Some(snapshot()));

        let receiver = scheduler.subscribe(Cadence::TenMinute);
        assert!(receiver.borrow().is_some());
    }

    #[test]
    fn default_radius_matches_config() {
        let scheduler = scheduler();
        assert_eq!(scheduler.radius_km, DEFAULT_RADIUS_KM);
    }
}
