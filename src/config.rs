//! Runtime configuration and the static parameter tables.

use std::collections::HashMap;

use crate::store::GenerationProfile;

#[derive(Clone, Debug)]
pub struct Config {
    /// Max samples retained per buffer before FIFO eviction kicks in.
    pub retention_cap: usize,
    /// Historical/forecast split point as a fraction of the snapshot.
    pub split_ratio: f64,
    /// Live-environment cadence.
    pub live_tick_ms: u64,
    /// Chart-recompute cadence during the training simulation.
    pub training_tick_ms: u64,
    /// Seconds between consecutive samples in a series.
    pub sample_period_secs: u64,
    /// Samples generated at store initialization (e.g. 24, 168, 720).
    pub default_horizon: usize,
    pub trend_threshold: f64,
    pub total_epochs: u64,
    pub stats_base: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            retention_cap: std::env::var("RETENTION_CAP").ok().and_then(|v| v.parse().ok()).unwrap_or(1000),
            split_ratio: std::env::var("SPLIT_RATIO").ok().and_then(|v| v.parse().ok()).unwrap_or(0.7),
            live_tick_ms: std::env::var("LIVE_TICK_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(30_000),
            training_tick_ms: std::env::var("TRAINING_TICK_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(1_000),
            sample_period_secs: std::env::var("SAMPLE_PERIOD_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(3600),
            default_horizon: std::env::var("HORIZON_SAMPLES").ok().and_then(|v| v.parse().ok()).unwrap_or(168),
            trend_threshold: std::env::var("TREND_TH").ok().and_then(|v| v.parse().ok()).unwrap_or(0.1),
            total_epochs: std::env::var("TOTAL_EPOCHS").ok().and_then(|v| v.parse().ok()).unwrap_or(100),
            stats_base: std::env::var("STATS_BASE").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
        }
    }
}

/// Generation shape per monitored parameter. Daily period is 24 samples,
/// seasonal 720 (one month of hourly samples); bases match the station's
/// published current readings.
pub fn default_profiles() -> HashMap<String, GenerationProfile> {
    let mut profiles = HashMap::new();
    profiles.insert(
        "temperature".to_string(),
        GenerationProfile {
            base: 28.4,
            daily_amplitude: 1.5,
            seasonal_amplitude: 2.0,
            noise_amplitude: 0.8,
            daily_period_samples: 24.0,
            seasonal_period_samples: 720.0,
            floor: None,
        },
    );
    profiles.insert(
        "salinity".to_string(),
        GenerationProfile {
            base: 34.2,
            daily_amplitude: 0.3,
            seasonal_amplitude: 0.8,
            noise_amplitude: 0.4,
            daily_period_samples: 24.0,
            seasonal_period_samples: 720.0,
            floor: None,
        },
    );
    profiles.insert(
        "chlorophyll".to_string(),
        GenerationProfile {
            base: 2.1,
            daily_amplitude: 0.4,
            seasonal_amplitude: 0.9,
            noise_amplitude: 0.6,
            daily_period_samples: 24.0,
            seasonal_period_samples: 720.0,
            floor: Some(0.1),
        },
    );
    profiles.insert(
        "ph".to_string(),
        GenerationProfile {
            base: 8.1,
            daily_amplitude: 0.05,
            seasonal_amplitude: 0.1,
            noise_amplitude: 0.08,
            daily_period_samples: 24.0,
            seasonal_period_samples: 720.0,
            floor: None,
        },
    );
    profiles.insert(
        "oxygen".to_string(),
        GenerationProfile {
            base: 6.8,
            daily_amplitude: 0.5,
            seasonal_amplitude: 0.7,
            noise_amplitude: 0.4,
            daily_period_samples: 24.0,
            seasonal_period_samples: 720.0,
            floor: None,
        },
    );
    profiles
}
