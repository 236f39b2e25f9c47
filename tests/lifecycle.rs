//! Scheduler lifecycle and training-run completion semantics, plus the
//! upstream stats degradation path.

use tokio::time::Duration;

use bluepulse::scheduler::{SchedulerState, TickOutcome, UpdateScheduler};
use bluepulse::stats::{fallback, StatsClient};
use bluepulse::training::{StepOutcome, TrainingConfig, TrainingRun};

fn started(target: Option<u64>) -> UpdateScheduler {
    let interval = Duration::from_millis(1);
    let mut sched = match target {
        Some(t) => UpdateScheduler::with_target(interval, t),
        None => UpdateScheduler::new(interval),
    };
    sched.start();
    sched
}

#[test]
fn double_start_does_not_double_the_tick_stream() {
    let mut sched = started(None);
    sched.start();

    // One firing boundary still delivers exactly one tick.
    assert_eq!(sched.fire(), TickOutcome::Deliver { count: 1 });
    assert_eq!(sched.fire(), TickOutcome::Deliver { count: 2 });
}

#[test]
fn pause_preserves_progress_stop_resets_it() {
    let mut sched = started(None);
    sched.fire();
    sched.fire();
    sched.fire();

    sched.pause();
    assert_eq!(sched.fire(), TickOutcome::Skipped);
    sched.start();
    assert_eq!(sched.fire(), TickOutcome::Deliver { count: 4 });

    sched.stop();
    sched.start();
    assert_eq!(sched.fire(), TickOutcome::Deliver { count: 1 });
}

#[test]
fn target_100_fires_terminal_exactly_once_at_call_100() {
    let mut sched = started(Some(100));

    let mut terminal = Vec::new();
    for call in 1..=120u64 {
        match sched.fire() {
            TickOutcome::Deliver { .. } => assert!(call < 100, "late delivery at {}", call),
            TickOutcome::Completed { count } => terminal.push((call, count)),
            TickOutcome::Skipped => assert!(call > 100, "early skip at {}", call),
        }
    }

    assert_eq!(terminal, vec![(100, 100)]);
    assert_eq!(sched.state(), SchedulerState::Stopped);
}

#[test]
fn training_run_completes_once_and_buffers_every_epoch() {
    let mut run = TrainingRun::new(TrainingConfig {
        total_epochs: 100,
        ..TrainingConfig::default()
    });
    run.start();

    let mut finishes = 0u64;
    for call in 1..=110u64 {
        match run.step(1_700_000_000 + call) {
            StepOutcome::Finished(metrics) => {
                finishes += 1;
                assert_eq!(metrics.epoch, 100);
            }
            StepOutcome::Epoch(_) => assert!(call < 100),
            StepOutcome::Idle => assert!(call > 100),
        }
    }

    assert_eq!(finishes, 1);
    assert_eq!(run.state(), SchedulerState::Stopped);
    assert_eq!(run.loss().len(), 100);
    assert_eq!(run.accuracy().len(), 100);
    assert!(run.best_accuracy() > 0.5);
}

#[test]
fn paused_training_holds_its_counters_across_resume() {
    let mut run = TrainingRun::new(TrainingConfig {
        total_epochs: 10,
        ..TrainingConfig::default()
    });
    run.start();
    run.step(1);
    run.step(2);

    run.pause();
    assert!(matches!(run.step(3), StepOutcome::Idle));
    assert_eq!(run.epoch(), 2);
    assert_eq!(run.loss().len(), 2);

    run.start();
    match run.step(4) {
        StepOutcome::Epoch(metrics) => assert_eq!(metrics.epoch, 3),
        other => panic!("expected epoch 3 after resume, got {:?}", other),
    }
}

#[tokio::test]
async fn stats_failure_falls_back_without_blocking() {
    // Nothing listens on the discard port; the fetch fails fast and the
    // caller proceeds on the mock.
    let client = StatsClient::new("http://127.0.0.1:9");
    let stats = client.fetch_or_fallback().await;
    assert_eq!(stats, fallback());
}
