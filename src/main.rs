use anyhow::Result;
use serde_json::json;
use tokio::time::Duration;

use bluepulse::config::{default_profiles, Config};
use bluepulse::logging::{json_log, log_scheduler_transition, log_summary, log_tick, obj};
use bluepulse::present::{chart_series, summary, unit_label, ChartSink, LogSink};
use bluepulse::scheduler::{drive, UpdateScheduler};
use bluepulse::stats::StatsClient;
use bluepulse::store::{now_ts, MultiSeriesStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    json_log(
        "startup",
        obj(&[
            ("live_tick_ms", json!(cfg.live_tick_ms)),
            ("horizon", json!(cfg.default_horizon)),
            ("retention_cap", json!(cfg.retention_cap)),
        ]),
    );

    // Summary stats are cosmetic; a dead upstream degrades to the local
    // mock and startup continues.
    let stats = StatsClient::new(&cfg.stats_base).fetch_or_fallback().await;
    json_log(
        "dashboard_stats",
        obj(&[
            ("total_species", json!(stats.total_species)),
            ("ai_models", json!(stats.ai_models)),
            ("monitoring_stations", json!(stats.monitoring_stations)),
            ("predictions_today", json!(stats.predictions_today)),
        ]),
    );

    let mut store =
        MultiSeriesStore::new(default_profiles(), cfg.retention_cap, cfg.sample_period_secs);
    store.initialize(cfg.default_horizon, now_ts());
    let keys = store.keys();
    json_log(
        "store_init",
        obj(&[
            ("parameters", json!(keys.len())),
            ("horizon", json!(cfg.default_horizon)),
        ]),
    );

    let mut scheduler = UpdateScheduler::new(Duration::from_millis(cfg.live_tick_ms));
    let before = scheduler.state();
    scheduler.start();
    log_scheduler_transition(
        "live",
        &format!("{:?}", before),
        &format!("{:?}", scheduler.state()),
    );
    let mut sink = LogSink;

    drive(
        &mut scheduler,
        |count| {
            let now = now_ts();
            store.tick(now);
            log_tick(count, now, keys.len());
            for key in &keys {
                let Ok(buffer) = store.get(key) else { continue };
                let series = chart_series(&buffer.snapshot(), cfg.split_ratio, unit_label(key));
                sink.render(key, &series);
                log_summary(key, &summary(buffer, cfg.trend_threshold));
            }
        },
        |_| {},
    )
    .await;

    Ok(())
}
