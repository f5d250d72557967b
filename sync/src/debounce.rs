//! Debounced saver.
//!
//! DESIGN
//! ======
//! Every edit hands over the whole collection. Scheduling aborts the pending
//! timer task and spawns a new one, so a burst of edits inside the quiet
//! period produces a single write carrying the latest collection. Since each
//! job is a full snapshot, a superseded job carries nothing the newer one
//! lacks.
//!
//! The pending job is stamped with a generation. A timer task only takes the
//! job of its own generation, so a task that wakes just as a newer edit
//! arrives leaves the newer job for the newer timer.
//!
//! Finished saves are reported on the channel returned by [`DebouncedSaver::new`].

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use plan_canvas::EditElement;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::bridge::{PersistenceBridge, SaveOutcome};
use crate::error::SyncError;

/// Result of one debounced or flushed save.
pub type SaveReport = Result<SaveOutcome, SyncError>;

#[derive(Debug, Clone)]
struct SaveJob {
    run_id: Option<String>,
    elements: Vec<EditElement>,
}

/// The pending job and the generation of the timer that owns it.
#[derive(Debug, Default)]
struct JobSlot {
    generation: u64,
    job: Option<SaveJob>,
}

impl JobSlot {
    /// Store `job` under a new generation and return that generation.
    fn replace(&mut self, job: SaveJob) -> u64 {
        self.generation += 1;
        self.job = Some(job);
        self.generation
    }

    /// Take the job if it still belongs to `generation`.
    fn take_for(&mut self, generation: u64) -> Option<SaveJob> {
        if self.generation == generation { self.job.take() } else { None }
    }
}

pub struct DebouncedSaver {
    bridge: Arc<PersistenceBridge>,
    delay: Duration,
    slot: Arc<Mutex<JobSlot>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    reports: mpsc::UnboundedSender<SaveReport>,
}

impl DebouncedSaver {
    /// Create a saver and the receiver for its save reports.
    #[must_use]
    pub fn new(bridge: Arc<PersistenceBridge>, delay: Duration) -> (Self, mpsc::UnboundedReceiver<SaveReport>) {
        let (reports, rx) = mpsc::unbounded_channel();
        let saver = Self { bridge, delay, slot: Arc::new(Mutex::new(JobSlot::default())), timer: Mutex::new(None), reports };
        (saver, rx)
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether a save is waiting for its timer.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).job.is_some()
    }

    /// Replace the pending job and restart the quiet-period timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, run_id: Option<&str>, elements: Vec<EditElement>) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = timer.take() {
            previous.abort();
        }
        let generation = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(SaveJob { run_id: run_id.map(str::to_owned), elements });

        let bridge = Arc::clone(&self.bridge);
        let slot = Arc::clone(&self.slot);
        let reports = self.reports.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let taken = slot.lock().unwrap_or_else(PoisonError::into_inner).take_for(generation);
            let Some(job) = taken else {
                return;
            };
            let report = bridge.save(job.run_id.as_deref(), &job.elements).await;
            if reports.send(report).is_err() {
                debug!("save report receiver dropped");
            }
        });
        *timer = Some(handle);
    }

    /// Save the pending job now instead of waiting. Returns `None` if nothing was pending.
    ///
    /// A save whose timer already fired is awaited; its report goes to the channel.
    pub async fn flush(&self) -> Option<SaveReport> {
        let timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner).take();
        let job = self.slot.lock().unwrap_or_else(PoisonError::into_inner).job.take();
        match (job, timer) {
            (Some(job), timer) => {
                if let Some(timer) = timer {
                    timer.abort();
                }
                Some(self.bridge.save(job.run_id.as_deref(), &job.elements).await)
            }
            (None, Some(timer)) => {
                if let Err(e) = timer.await {
                    debug!(error = %e, "in-flight save task ended early");
                }
                None
            }
            (None, None) => None,
        }
    }
}

impl Drop for DebouncedSaver {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.lock().unwrap_or_else(PoisonError::into_inner).take() {
            timer.abort();
        }
    }
}
