//! Periodic focus sampling into an owned [`ActivityStore`].
//!
//! The sampler is the only writer of the store while it runs. It checks its
//! cancellation token between ticks, never during one, and hands the store
//! back when it stops so the caller can flush it without any locking.

use std::{sync::Arc, time::Duration};

use focus_probe::FocusProbe;
use tokio::{
    task::{self, JoinHandle},
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{normalize::normalize, store::ActivityStore};

/// Default time between samples.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Timing for the sampling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Time between samples.
    pub interval: Duration,
    /// Longest a single focus query may take before the tick counts as empty.
    pub probe_timeout: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::with_interval(DEFAULT_INTERVAL)
    }
}

impl SamplerConfig {
    /// Sample every `interval`, allowing each query the whole interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            probe_timeout: interval,
        }
    }
}

/// Drives the probe on a fixed timer and counts canonical labels.
pub struct Sampler {
    /// Source of focused window titles.
    probe: Arc<dyn FocusProbe>,
    /// Counts accumulated so far, including those loaded from disk.
    store: ActivityStore,
    /// Loop timing.
    config: SamplerConfig,
    /// A query that outlived its tick and has not finished yet.
    in_flight: Option<JoinHandle<String>>,
}

impl Sampler {
    /// Create a sampler that continues counting into `store`.
    pub fn new(probe: Arc<dyn FocusProbe>, store: ActivityStore, config: SamplerConfig) -> Self {
        Self {
            probe,
            store,
            config,
            in_flight: None,
        }
    }

    /// Counts accumulated so far.
    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    /// Give up the sampler and return its store.
    pub fn into_store(self) -> ActivityStore {
        self.store
    }

    /// True while a timed-out query is still blocked in the window system.
    pub fn query_in_flight(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Count one raw title. Returns the canonical label that was incremented,
    /// or `None` if the title is empty.
    ///
    /// A title that normalizes to `""` is counted under the empty label.
    pub fn record(&mut self, raw: &str) -> Option<String> {
        if raw.is_empty() {
            return None;
        }
        let label = normalize(raw);
        self.store.increment(&label);
        Some(label)
    }

    /// Query the probe once and record the result.
    ///
    /// The query runs on the blocking pool and is abandoned after
    /// `probe_timeout`, in which case nothing is recorded for this tick. While
    /// an abandoned query is still blocked no new one is issued; those ticks
    /// record nothing either.
    pub async fn sample_once(&mut self) -> Option<String> {
        if self.query_in_flight() {
            debug!("previous focus query still running; tick skipped");
            return None;
        }
        self.in_flight = None;
        let probe = Arc::clone(&self.probe);
        let mut query = task::spawn_blocking(move || probe.focused_label());
        let raw = match time::timeout(self.config.probe_timeout, &mut query).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => {
                debug!(error = %err, "focus query task failed");
                String::new()
            }
            Err(_) => {
                debug!(
                    timeout_ms = self.config.probe_timeout.as_millis(),
                    "focus query timed out"
                );
                self.in_flight = Some(query);
                String::new()
            }
        };
        let label = self.record(&raw)?;
        trace!(label = %label, count = self.store.get(&label), "sample");
        debug!(
            labels = self.store.len(),
            total = self.store.total(),
            snapshot = %self.store.snapshot(),
            "tally"
        );
        Some(label)
    }

    /// Sample on every tick until `cancel` fires, then return the store.
    ///
    /// The first sample is taken one interval after the call. A tick in
    /// progress when `cancel` fires is completed before returning.
    pub async fn run(mut self, cancel: CancellationToken) -> ActivityStore {
        let interval = self.config.interval;
        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        debug!(interval_ms = interval.as_millis(), "sampler started");
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(labels = self.store.len(), "sampler stopped");
                    return self.store;
                }
                _ = ticker.tick() => {}
            }
            self.sample_once().await;
        }
    }

    /// Run the sampler as a task. Await the handle after cancelling `cancel`
    /// to take the store back.
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<ActivityStore> {
        tokio::spawn(self.run(cancel))
    }
}
