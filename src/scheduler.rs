//! Cooperative periodic driver shared by the live (30s) and training (1s)
//! cadences.
//!
//! The scheduler itself is a passive, synchronous state machine: a
//! caller-owned loop (or [`drive`]) sleeps for the interval and then calls
//! [`UpdateScheduler::fire`]. Nothing here preempts an in-flight tick;
//! `pause`/`stop` simply withhold the next firing.

use tokio::time::{sleep, Duration};

/// `Idle -> Running -> {Paused -> Running | Stopped}`. Only `Running`
/// permits tick delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Paused,
    Stopped,
}

/// Result of one firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing delivered.
    Skipped,
    /// One tick delivered; `count` is the progress counter after this fire.
    Deliver { count: u64 },
    /// The firing that reached the configured target. The tick is still
    /// delivered, the terminal outcome occurs exactly once per run, and the
    /// scheduler is `Stopped` afterward.
    Completed { count: u64 },
}

#[derive(Debug, Clone)]
pub struct UpdateScheduler {
    state: SchedulerState,
    interval: Duration,
    count: u64,
    target: Option<u64>,
}

impl UpdateScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: SchedulerState::Idle,
            interval,
            count: 0,
            target: None,
        }
    }

    /// Scheduler that stops itself once `target` firings have been
    /// delivered (the training-simulation specialization).
    pub fn with_target(interval: Duration, target: u64) -> Self {
        Self {
            target: Some(target),
            ..Self::new(interval)
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Progress counter (elapsed ticks / epochs this run).
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Begin (or resume) firing. Idempotent while running: a second `start`
    /// does not create a second tick stream. After `pause` the counter
    /// resumes from its pre-pause value; after `stop` from zero.
    pub fn start(&mut self) {
        match self.state {
            SchedulerState::Running => {}
            SchedulerState::Idle | SchedulerState::Paused | SchedulerState::Stopped => {
                self.state = SchedulerState::Running;
            }
        }
    }

    /// Suspend firing, preserving the progress counter. No-op unless
    /// running.
    pub fn pause(&mut self) {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Paused;
        }
    }

    /// Suspend firing and reset the progress counter. Safe to call in any
    /// state.
    pub fn stop(&mut self) {
        match self.state {
            SchedulerState::Running | SchedulerState::Paused => {
                self.state = SchedulerState::Stopped;
                self.count = 0;
            }
            SchedulerState::Idle | SchedulerState::Stopped => {}
        }
    }

    /// One firing boundary. Call once per elapsed interval.
    ///
    /// Delivers nothing unless running. When a target is configured, the
    /// firing that reaches it yields [`TickOutcome::Completed`] and
    /// transitions to `Stopped`, so a subsequent `start` begins a fresh run
    /// and the terminal outcome cannot repeat.
    pub fn fire(&mut self) -> TickOutcome {
        if self.state != SchedulerState::Running {
            return TickOutcome::Skipped;
        }
        self.count += 1;
        if let Some(target) = self.target {
            if self.count >= target {
                let count = self.count;
                self.state = SchedulerState::Stopped;
                self.count = 0;
                return TickOutcome::Completed { count };
            }
        }
        TickOutcome::Deliver { count: self.count }
    }
}

/// Sleep-and-fire loop for a scheduler.
///
/// `on_tick` runs for every delivered tick, including the completing one;
/// `on_complete` runs at most once, after the completing tick. Returns when
/// the scheduler leaves the `Running` state. Cancellation is cooperative:
/// an in-flight `on_tick` is never interrupted.
pub async fn drive<T, C>(scheduler: &mut UpdateScheduler, mut on_tick: T, mut on_complete: C)
where
    T: FnMut(u64),
    C: FnMut(u64),
{
    loop {
        sleep(scheduler.interval()).await;
        match scheduler.fire() {
            TickOutcome::Deliver { count } => on_tick(count),
            TickOutcome::Completed { count } => {
                on_tick(count);
                on_complete(count);
                return;
            }
            TickOutcome::Skipped => return,
        }
    }
}
