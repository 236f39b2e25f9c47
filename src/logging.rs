//! Structured JSON-line logging for the simulation engine.
//!
//! Every entry is one JSON object on stdout, mirrored into a per-run
//! directory (`LOG_DIR`, default `out/runs`) as `events.jsonl` /
//! `trace.jsonl` for later inspection. Level and domain filtering are
//! controlled via `LOG_LEVEL` and `LOG_DOMAINS`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

// =============================================================================
// Log Domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Series,    // Buffer appends, evictions
    Store,     // Generation, ticks, reconfiguration
    Scheduler, // Lifecycle transitions, firings
    Chart,     // Presentation payloads handed to the sink
    Training,  // Epoch metrics
    Upstream,  // Stats fetches and fallbacks
    System,    // Startup, shutdown
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Series => "series",
            Domain::Store => "store",
            Domain::Scheduler => "scheduler",
            Domain::Chart => "chart",
            Domain::Training => "training",
            Domain::Upstream => "upstream",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // LOG_DOMAINS: comma-separated list or "all"
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Run context
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

struct RunContext {
    run_id: String,
    events: Mutex<BufWriter<File>>,
    trace: Mutex<BufWriter<File>>,
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let base = std::env::var("LOG_DIR").unwrap_or_else(|_| "out/runs".to_string());
        let mut run_dir = PathBuf::from(base);
        run_dir.push(&run_id);
        if let Err(err) = create_dir_all(&run_dir) {
            eprintln!("[log] failed to create run dir: {}", err);
        }

        let _ = std::fs::write(
            run_dir.join("manifest.json"),
            json!({
                "run_id": run_id,
                "ts": ts_now(),
                "pid": process::id(),
                "log_dir": run_dir.to_string_lossy(),
            })
            .to_string(),
        );

        let events = File::create(run_dir.join("events.jsonl")).unwrap_or_else(|err| {
            eprintln!("[log] failed to create events log: {}", err);
            File::create("/tmp/bluepulse-events.jsonl").expect("events fallback")
        });
        let trace = File::create(run_dir.join("trace.jsonl")).unwrap_or_else(|err| {
            eprintln!("[log] failed to create trace log: {}", err);
            File::create("/tmp/bluepulse-trace.jsonl").expect("trace fallback")
        });

        RunContext {
            run_id,
            events: Mutex::new(BufWriter::new(events)),
            trace: Mutex::new(BufWriter::new(trace)),
        }
    })
}

fn write_line(writer: &Mutex<BufWriter<File>>, line: &str) {
    if let Ok(mut w) = writer.lock() {
        let _ = writeln!(w, "{}", line);
        let _ = w.flush();
    }
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Epoch milliseconds
pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    let min_level = Level::from_env();
    if level < min_level || !domain.is_enabled() {
        return;
    }
    emit_record(level, domain.as_str(), event, fields);
}

/// Shorthand: info-level entry under a free-form module name.
pub fn json_log(module: &str, mut fields: Map<String, Value>) {
    fields.insert("ts".to_string(), Value::String(ts_now()));
    fields.insert("module".to_string(), Value::String(module.to_string()));
    emit_record(Level::Info, module, module, fields);
}

fn emit_record(level: Level, component: &str, event: &str, mut fields: Map<String, Value>) {
    let ctx = ensure_run_context();

    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(ctx.run_id.clone()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(component));
    entry.insert("event".to_string(), json!(event));
    if let Some(parameter) = fields.remove("parameter") {
        entry.insert("parameter".to_string(), parameter);
    }
    entry.insert("data".to_string(), Value::Object(fields));

    let line = Value::Object(entry).to_string();
    match level {
        Level::Trace | Level::Debug => write_line(&ctx.trace, &line),
        _ => write_line(&ctx.events, &line),
    }
    println!("{}", line);
}

// =============================================================================
// Domain-specific helpers
// =============================================================================

pub fn log_tick(count: u64, sample_ts: u64, parameters: usize) {
    log(
        Level::Debug,
        Domain::Store,
        "tick",
        obj(&[
            ("count", json!(count)),
            ("sample_ts", json!(sample_ts)),
            ("parameters", json!(parameters)),
        ]),
    );
}

pub fn log_chart(parameter: &str, series: &crate::present::ChartSeries) {
    log(
        Level::Info,
        Domain::Chart,
        "chart_series",
        obj(&[
            ("parameter", v_str(parameter)),
            ("unit", v_str(&series.unit)),
            ("labels", json!(series.labels.len())),
            (
                "payload",
                serde_json::to_value(series).unwrap_or(Value::Null),
            ),
        ]),
    );
}

pub fn log_summary(parameter: &str, summary: &crate::present::Summary) {
    log(
        Level::Info,
        Domain::Chart,
        "summary",
        obj(&[
            ("parameter", v_str(parameter)),
            (
                "latest",
                summary
                    .latest
                    .map(|s| v_num(s.value))
                    .unwrap_or(Value::Null),
            ),
            ("delta", v_num(summary.delta)),
            ("trend", json!(summary.trend)),
        ]),
    );
}

pub fn log_epoch(metrics: &crate::training::EpochMetrics, total_epochs: u64) {
    log(
        Level::Info,
        Domain::Training,
        "epoch",
        obj(&[
            ("epoch", json!(metrics.epoch)),
            ("total_epochs", json!(total_epochs)),
            ("loss", v_num(metrics.loss)),
            ("accuracy", v_num(metrics.accuracy)),
            ("best_accuracy", v_num(metrics.best_accuracy)),
        ]),
    );
}

pub fn log_scheduler_transition(name: &str, from: &str, to: &str) {
    log(
        Level::Debug,
        Domain::Scheduler,
        "transition",
        obj(&[
            ("scheduler", v_str(name)),
            ("from", v_str(from)),
            ("to", v_str(to)),
        ]),
    );
}

// =============================================================================
// Utility functions
// =============================================================================

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn test_domain_names() {
        assert_eq!(Domain::Store.as_str(), "store");
        assert_eq!(Domain::Scheduler.as_str(), "scheduler");
        assert_eq!(Domain::Upstream.as_str(), "upstream");
    }

    #[test]
    fn test_obj_helper() {
        let m = obj(&[("key", v_str("value")), ("num", v_num(42.0))]);
        assert_eq!(m.get("key").unwrap(), "value");
        assert_eq!(m.get("num").unwrap(), 42.0);
    }

    #[test]
    fn test_seq_increments() {
        let s1 = next_seq();
        let s2 = next_seq();
        assert!(s2 > s1);
    }
}
