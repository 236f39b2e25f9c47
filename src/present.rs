//! Chart-ready series descriptions and derived summary figures.
//!
//! This is the boundary to the external chart renderer: everything it needs
//! is in [`ChartSeries`] (labels plus two role-tagged datasets), handed over
//! through the fire-and-forget [`ChartSink`] trait.

use chrono::{TimeZone, Utc};
use serde::Serialize;

use crate::forecast::{partition, Partition};
use crate::series::{Sample, SeriesBuffer};

/// How many samples back the delta/trend comparison reaches.
pub const DELTA_LOOKBACK: usize = 24;

/// Default trend threshold, in the parameter's natural unit.
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesRole {
    Historical,
    Forecast,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub role: SeriesRole,
    pub values: Vec<f64>,
}

/// What the chart renderer consumes. Labels cover the whole snapshot; the
/// historical dataset reads observed values, the forecast dataset predicted
/// ones, overlapping by one point.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Latest reading plus its movement against [`DELTA_LOOKBACK`] samples ago.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub latest: Option<Sample>,
    pub delta: f64,
    pub trend: Trend,
}

/// Display unit for a parameter key; unknown keys degrade to a generic
/// label rather than failing.
pub fn unit_label(key: &str) -> &'static str {
    match key {
        "temperature" => "°C",
        "salinity" => "ppt",
        "chlorophyll" => "mg/m³",
        "ph" => "",
        "oxygen" => "mg/L",
        _ => "Value",
    }
}

fn label_for(ts: u64) -> String {
    match Utc.timestamp_opt(ts as i64, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => ts.to_string(),
    }
}

/// Map a snapshot into the chart renderer's input shape.
pub fn chart_series(snapshot: &[Sample], split_ratio: f64, unit: &str) -> ChartSeries {
    let Partition {
        historical,
        forecast,
    } = partition(snapshot, split_ratio);
    ChartSeries {
        labels: snapshot.iter().map(|s| label_for(s.ts)).collect(),
        datasets: vec![
            Dataset {
                role: SeriesRole::Historical,
                values: historical.iter().map(|s| s.value).collect(),
            },
            Dataset {
                role: SeriesRole::Forecast,
                values: forecast.iter().map(|s| s.predicted).collect(),
            },
        ],
        unit: unit.to_string(),
    }
}

/// Three-way classification of recent movement.
pub fn classify_trend(delta: f64, threshold: f64) -> Trend {
    if delta > threshold {
        Trend::Up
    } else if delta < -threshold {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Summary figures for a buffer. When fewer than [`DELTA_LOOKBACK`] + 1
/// samples exist, the latest value stands in for the look-back sample and
/// the delta collapses to zero.
pub fn summary(buffer: &SeriesBuffer, trend_threshold: f64) -> Summary {
    let latest = buffer.latest();
    let delta = match latest {
        Some(last) => {
            let back = buffer
                .sample_at(DELTA_LOOKBACK)
                .map(|s| s.value)
                .unwrap_or(last.value);
            last.value - back
        }
        None => 0.0,
    };
    Summary {
        latest,
        delta,
        trend: classify_trend(delta, trend_threshold),
    }
}

/// Receives finished chart payloads. Render calls emit nothing back into
/// the core.
pub trait ChartSink {
    fn render(&mut self, key: &str, series: &ChartSeries);
}

/// Demo sink: emits each chart payload as one structured log line.
pub struct LogSink;

impl ChartSink for LogSink {
    fn render(&mut self, key: &str, series: &ChartSeries) {
        crate::logging::log_chart(key, series);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_buffer(len: usize, step: f64) -> SeriesBuffer {
        let mut buf = SeriesBuffer::new("temperature", 1000);
        for i in 0..len {
            buf.append(Sample {
                ts: i as u64 * 3600,
                value: 20.0 + step * i as f64,
                predicted: 20.0 + step * i as f64,
            });
        }
        buf
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(unit_label("temperature"), "°C");
        assert_eq!(unit_label("salinity"), "ppt");
        assert_eq!(unit_label("chlorophyll"), "mg/m³");
        assert_eq!(unit_label("ph"), "");
        assert_eq!(unit_label("oxygen"), "mg/L");
        assert_eq!(unit_label("turbidity"), "Value");
    }

    #[test]
    fn test_trend_classification_thresholds() {
        assert_eq!(classify_trend(0.15, 0.1), Trend::Up);
        assert_eq!(classify_trend(-0.15, 0.1), Trend::Down);
        assert_eq!(classify_trend(0.05, 0.1), Trend::Stable);
        assert_eq!(classify_trend(0.1, 0.1), Trend::Stable);
        assert_eq!(classify_trend(-0.1, 0.1), Trend::Stable);
    }

    #[test]
    fn test_summary_delta_against_24_back() {
        // Strictly rising by 0.01/sample: delta over 24 samples = 0.24.
        let buf = filled_buffer(30, 0.01);
        let s = summary(&buf, DEFAULT_TREND_THRESHOLD);
        assert!((s.delta - 0.24).abs() < 1e-9);
        assert_eq!(s.trend, Trend::Up);
    }

    #[test]
    fn test_summary_fallback_when_history_short() {
        let buf = filled_buffer(5, 1.0);
        let s = summary(&buf, DEFAULT_TREND_THRESHOLD);
        assert_eq!(s.delta, 0.0);
        assert_eq!(s.trend, Trend::Stable);
        assert!(s.latest.is_some());
    }

    #[test]
    fn test_summary_on_empty_buffer() {
        let buf = SeriesBuffer::new("temperature", 10);
        let s = summary(&buf, DEFAULT_TREND_THRESHOLD);
        assert!(s.latest.is_none());
        assert_eq!(s.delta, 0.0);
        assert_eq!(s.trend, Trend::Stable);
    }

    #[test]
    fn test_chart_series_shape() {
        let buf = filled_buffer(10, 0.1);
        let series = chart_series(&buf.snapshot(), 0.7, "°C");

        assert_eq!(series.labels.len(), 10);
        assert_eq!(series.datasets.len(), 2);
        assert_eq!(series.datasets[0].role, SeriesRole::Historical);
        assert_eq!(series.datasets[1].role, SeriesRole::Forecast);
        // floor(10 * 0.7) = 7 historical, forecast overlaps one back.
        assert_eq!(series.datasets[0].values.len(), 7);
        assert_eq!(series.datasets[1].values.len(), 4);
        assert_eq!(series.unit, "°C");
    }

    #[test]
    fn test_chart_series_roles_serialize_lowercase() {
        let buf = filled_buffer(4, 0.1);
        let series = chart_series(&buf.snapshot(), 0.7, "°C");
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["datasets"][0]["role"], "historical");
        assert_eq!(json["datasets"][1]["role"], "forecast");
    }

    #[test]
    fn test_labels_are_utc_minutes() {
        let buf = filled_buffer(1, 0.0);
        let series = chart_series(&buf.snapshot(), 0.7, "°C");
        assert_eq!(series.labels[0], "1970-01-01 00:00");
    }
}
