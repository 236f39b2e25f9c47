//! Procedural training-metrics stream.
//!
//! No model is trained: per-epoch loss and accuracy are generated at tick
//! time from a decaying curve plus noise, buffered through the same series
//! machinery as the sensor streams, and driven by a target-bearing
//! [`UpdateScheduler`] that ends the run on its own.

use rand::Rng;
use serde::Serialize;
use tokio::time::Duration;

use crate::scheduler::{SchedulerState, TickOutcome, UpdateScheduler};
use crate::series::{Sample, SeriesBuffer};

/// Accuracy the synthetic curve starts from at epoch zero.
const ACCURACY_START: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub total_epochs: u64,
    pub tick_interval: Duration,
    pub initial_loss: f64,
    /// Per-epoch multiplicative decay of the loss curve.
    pub loss_decay: f64,
    pub accuracy_ceiling: f64,
    pub noise_amplitude: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            total_epochs: 100,
            tick_interval: Duration::from_millis(1_000),
            initial_loss: 2.4,
            loss_decay: 0.96,
            accuracy_ceiling: 0.95,
            noise_amplitude: 0.04,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EpochMetrics {
    pub epoch: u64,
    pub loss: f64,
    pub accuracy: f64,
    pub best_accuracy: f64,
}

/// Result of one driver call against the run.
#[derive(Debug, Clone, Copy)]
pub enum StepOutcome {
    /// Scheduler withheld the tick (not started, paused, or already done).
    Idle,
    Epoch(EpochMetrics),
    /// The final epoch. Delivered exactly once per run.
    Finished(EpochMetrics),
}

/// One simulated training session: an epoch scheduler plus loss/accuracy
/// series. The observed track carries the noisy per-epoch readings, the
/// predicted track the noiseless curve.
pub struct TrainingRun {
    cfg: TrainingConfig,
    scheduler: UpdateScheduler,
    loss: SeriesBuffer,
    accuracy: SeriesBuffer,
    best_accuracy: f64,
}

impl TrainingRun {
    pub fn new(cfg: TrainingConfig) -> Self {
        let cap = cfg.total_epochs.max(1) as usize;
        let scheduler = UpdateScheduler::with_target(cfg.tick_interval, cfg.total_epochs);
        Self {
            cfg,
            scheduler,
            loss: SeriesBuffer::new("loss", cap),
            accuracy: SeriesBuffer::new("accuracy", cap),
            best_accuracy: 0.0,
        }
    }

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Elapsed epochs this run.
    pub fn epoch(&self) -> u64 {
        self.scheduler.count()
    }

    pub fn tick_interval(&self) -> Duration {
        self.scheduler.interval()
    }

    pub fn loss(&self) -> &SeriesBuffer {
        &self.loss
    }

    pub fn accuracy(&self) -> &SeriesBuffer {
        &self.accuracy
    }

    pub fn best_accuracy(&self) -> f64 {
        self.best_accuracy
    }

    /// One driver call: advance an epoch if the scheduler delivers.
    pub fn step(&mut self, now: u64) -> StepOutcome {
        match self.scheduler.fire() {
            TickOutcome::Skipped => StepOutcome::Idle,
            TickOutcome::Deliver { count } => StepOutcome::Epoch(self.advance(count, now)),
            TickOutcome::Completed { count } => StepOutcome::Finished(self.advance(count, now)),
        }
    }

    fn advance(&mut self, epoch: u64, now: u64) -> EpochMetrics {
        let mut rng = rand::thread_rng();
        let decay = self.cfg.loss_decay.powi(epoch as i32);

        let loss_curve = self.cfg.initial_loss * decay;
        let acc_curve = self.cfg.accuracy_ceiling - (self.cfg.accuracy_ceiling - ACCURACY_START) * decay;

        let half = self.cfg.noise_amplitude / 2.0;
        let loss = (loss_curve + noise(&mut rng, half)).max(0.0);
        let accuracy = (acc_curve + noise(&mut rng, half)).clamp(0.0, 1.0);

        self.loss.append(Sample {
            ts: now,
            value: loss,
            predicted: loss_curve,
        });
        self.accuracy.append(Sample {
            ts: now,
            value: accuracy,
            predicted: acc_curve,
        });
        if accuracy > self.best_accuracy {
            self.best_accuracy = accuracy;
        }

        EpochMetrics {
            epoch,
            loss,
            accuracy,
            best_accuracy: self.best_accuracy,
        }
    }
}

fn noise<R: Rng>(rng: &mut R, half: f64) -> f64 {
    if half <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half..=half)
}
