//! Tick scheduling.
//!
//! A `TickScheduler` stands in for the host's repeating-timer facility.
//! Each scheduled interval is identified by a `TickHandle`; the interval
//! reports every period by sending its handle, and the engine discards
//! ticks from handles it no longer owns.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Identifies one scheduled repeating tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Returns the numeric id of the handle.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Registers and releases repeating ticks.
pub trait TickScheduler {
    /// Starts a repeating tick with the given period.
    fn schedule(&mut self, period: Duration) -> TickHandle;

    /// Stops the repeating tick. Unknown or already cancelled handles are ignored.
    fn cancel(&mut self, handle: TickHandle);
}

// ============================================================================
// IntervalScheduler
// ============================================================================

/// Scheduler backed by `tokio::time::interval` tasks.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct IntervalScheduler {
    tick_tx: mpsc::UnboundedSender<TickHandle>,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
    next_id: u64,
}

impl IntervalScheduler {
    /// Creates a scheduler that reports ticks on `tick_tx`.
    pub fn new(tick_tx: mpsc::UnboundedSender<TickHandle>) -> Self {
        Self {
            tick_tx,
            tasks: HashMap::new(),
            next_id: 1,
        }
    }

    /// Returns the number of interval tasks still registered.
    pub fn active_count(&self) -> usize {
        self.tasks.len()
    }
}

impl TickScheduler for IntervalScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        let handle = TickHandle(self.next_id);
        self.next_id += 1;

        let tx = self.tick_tx.clone();
        let task = tokio::spawn(async move {
            // First tick one full period from now, like a browser interval.
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tx.send(handle).is_err() {
                    trace!(handle = handle.id(), "Tick receiver closed");
                    break;
                }
            }
        });

        debug!(handle = handle.id(), period_ms = period.as_millis() as u64, "Tick scheduled");
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!(handle = handle.id(), "Tick cancelled");
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}

// ============================================================================
// ManualScheduler
// ============================================================================

/// Scheduler that never fires on its own; tests drive ticks by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    active: BTreeSet<TickHandle>,
    next_id: u64,
    scheduled_total: usize,
    last_period: Option<Duration>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of currently registered handles.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns the registered handles.
    #[must_use]
    pub fn active_handles(&self) -> Vec<TickHandle> {
        self.active.iter().copied().collect()
    }

    /// Returns how many handles were ever scheduled.
    #[must_use]
    pub fn scheduled_total(&self) -> usize {
        self.scheduled_total
    }

    /// Returns the period of the most recent schedule call.
    #[must_use]
    pub fn last_period(&self) -> Option<Duration> {
        self.last_period
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.active.insert(handle);
        self.scheduled_total += 1;
        self.last_period = Some(period);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.active.remove(&handle);
    }
}
