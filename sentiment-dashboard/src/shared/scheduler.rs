//! Timers driving auto-refresh and the simulated fetch delay
//!
//! Timers never call back into the controller directly. They post a
//! [`TimerTick`] that the event loop hands to
//! [`ViewStateController::handle_tick`](super::controller::ViewStateController::handle_tick),
//! which keeps all state mutation on the UI loop.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::surface::ControlId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer asks the controller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Periodic auto-refresh
    AutoRefresh,
    /// Simulated fetch finished; re-enable `trigger`
    RefreshDone { trigger: ControlId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub id: TimerId,
    pub tick: Tick,
}

pub trait Scheduler {
    /// Recurring timer; first tick after one full `period`
    fn every(&mut self, period: Duration, tick: Tick) -> TimerId;

    /// One-shot timer
    fn after(&mut self, delay: Duration, tick: Tick) -> TimerId;

    fn cancel(&mut self, id: TimerId);

    /// Forget a one-shot whose tick has been handled
    fn complete(&mut self, id: TimerId);

    /// Timers not yet cancelled or completed
    fn active(&self) -> usize;
}

/// Scheduler backed by tokio tasks posting into an mpsc channel
#[derive(Debug)]
pub struct TokioScheduler {
    tick_tx: mpsc::UnboundedSender<TimerTick>,
    handles: HashMap<TimerId, JoinHandle<()>>,
    next_id: u64,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its ticks arrive on
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerTick>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        (
            Self {
                tick_tx,
                handles: HashMap::new(),
                next_id: 0,
            },
            tick_rx,
        )
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId(self.next_id)
    }
}

impl Scheduler for TokioScheduler {
    fn every(&mut self, period: Duration, tick: Tick) -> TimerId {
        let id = self.allocate();
        let tx = self.tick_tx.clone();
        let handle = tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);
            loop {
                interval.tick().await;
                if tx.send(TimerTick { id, tick }).is_err() {
                    break;
                }
            }
        });
        debug!(?id, ?period, "started recurring timer");
        self.handles.insert(id, handle);
        id
    }

    fn after(&mut self, delay: Duration, tick: Tick) -> TimerId {
        let id = self.allocate();
        let tx = self.tick_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TimerTick { id, tick });
        });
        self.handles.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.handles.remove(&id) {
            handle.abort();
            debug!(?id, "cancelled timer");
        }
    }

    fn complete(&mut self, id: TimerId) {
        self.handles.remove(&id);
    }

    fn active(&self) -> usize {
        self.handles.len()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManualTimer {
    pub tick: Tick,
    pub duration: Duration,
    pub recurring: bool,
}

/// Scheduler that only records timers; ticks are delivered by hand
#[derive(Debug, Default)]
pub struct ManualScheduler {
    timers: BTreeMap<TimerId, ManualTimer>,
    next_id: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timer(&self, id: TimerId) -> Option<&ManualTimer> {
        self.timers.get(&id)
    }

    /// Ticks for every live timer, oldest first
    pub fn pending(&self) -> Vec<TimerTick> {
        self.timers
            .iter()
            .map(|(&id, timer)| TimerTick {
                id,
                tick: timer.tick,
            })
            .collect()
    }

    /// Tick of the first live timer matching `predicate`
    pub fn find(&self, predicate: impl Fn(&Tick) -> bool) -> Option<TimerTick> {
        self.pending().into_iter().find(|t| predicate(&t.tick))
    }

    fn insert(&mut self, duration: Duration, tick: Tick, recurring: bool) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.timers.insert(
            id,
            ManualTimer {
                tick,
                duration,
                recurring,
            },
        );
        id
    }
}

impl Scheduler for ManualScheduler {
    fn every(&mut self, period: Duration, tick: Tick) -> TimerId {
        self.insert(period, tick, true)
    }

    fn after(&mut self, delay: Duration, tick: Tick) -> TimerId {
        self.insert(delay, tick, false)
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn complete(&mut self, id: TimerId) {
        if self.timers.get(&id).is_some_and(|t| !t.recurring) {
            self.timers.remove(&id);
        }
    }

    fn active(&self) -> usize {
        self.timers.len()
    }
}
