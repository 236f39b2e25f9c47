//! Training-simulation driver: runs the procedural epoch stream to its
//! target at the fast cadence, with an independently stoppable chart
//! refresh schedule.

use anyhow::Result;
use serde_json::json;
use tokio::time::{sleep, Duration};

use bluepulse::config::Config;
use bluepulse::logging::{json_log, log_epoch, log_scheduler_transition, obj, v_num};
use bluepulse::present::{chart_series, ChartSink, LogSink};
use bluepulse::scheduler::{TickOutcome, UpdateScheduler};
use bluepulse::store::now_ts;
use bluepulse::training::{StepOutcome, TrainingConfig, TrainingRun};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    let mut run = TrainingRun::new(TrainingConfig {
        total_epochs: cfg.total_epochs,
        tick_interval: Duration::from_millis(cfg.training_tick_ms),
        ..TrainingConfig::default()
    });
    run.start();

    // Chart recompute is its own schedule so the display cadence can stop
    // independently of the epoch driver.
    let mut chart = UpdateScheduler::new(Duration::from_millis(cfg.training_tick_ms));
    chart.start();
    let mut sink = LogSink;

    json_log(
        "training_start",
        obj(&[("total_epochs", json!(cfg.total_epochs))]),
    );

    loop {
        sleep(run.tick_interval()).await;
        match run.step(now_ts()) {
            StepOutcome::Epoch(metrics) => log_epoch(&metrics, cfg.total_epochs),
            StepOutcome::Finished(metrics) => {
                log_epoch(&metrics, cfg.total_epochs);
                json_log(
                    "training_complete",
                    obj(&[
                        ("epochs", json!(metrics.epoch)),
                        ("best_accuracy", v_num(metrics.best_accuracy)),
                    ]),
                );
                let before = chart.state();
                chart.stop();
                log_scheduler_transition(
                    "training_chart",
                    &format!("{:?}", before),
                    &format!("{:?}", chart.state()),
                );
            }
            StepOutcome::Idle => break,
        }
        if let TickOutcome::Deliver { .. } = chart.fire() {
            sink.render("loss", &chart_series(&run.loss().snapshot(), 1.0, "loss"));
            sink.render(
                "accuracy",
                &chart_series(&run.accuracy().snapshot(), 1.0, "accuracy"),
            );
        }
    }

    Ok(())
}
