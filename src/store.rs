//! Multi-parameter store: synthetic history generation and live continuation.
//!
//! Two generation paths, kept deliberately separate because they have
//! different observable statistics:
//!
//! - bulk history (`initialize`) evaluates the full sinusoid model
//!   `base + daily + seasonal + noise` at each sample index;
//! - live ticks (`tick`) continue the series as a random walk anchored to
//!   the latest observed value, never re-evaluating the model.

use std::collections::HashMap;
use std::f64::consts::TAU;
use std::fmt;

use rand::Rng;

use crate::series::{Sample, SeriesBuffer};

/// Noise scale for the predicted track relative to the observed one.
const PREDICTED_NOISE_SCALE: f64 = 0.3;

/// Per-parameter generation shape. Pure configuration; drives both the bulk
/// and live paths so the two stay numerically consistent at the seam.
#[derive(Debug, Clone, Copy)]
pub struct GenerationProfile {
    pub base: f64,
    pub daily_amplitude: f64,
    pub seasonal_amplitude: f64,
    pub noise_amplitude: f64,
    pub daily_period_samples: f64,
    pub seasonal_period_samples: f64,
    /// Hard lower bound applied after noise (e.g. chlorophyll >= 0.1).
    pub floor: Option<f64>,
}

impl GenerationProfile {
    /// Deterministic model component at sample index `i` (no noise).
    fn model(&self, i: usize) -> f64 {
        let i = i as f64;
        self.base
            + self.daily_amplitude * (TAU * i / self.daily_period_samples).sin()
            + self.seasonal_amplitude * (TAU * i / self.seasonal_period_samples).sin()
    }

    fn clamp(&self, x: f64) -> f64 {
        match self.floor {
            Some(floor) => x.max(floor),
            None => x,
        }
    }

    /// Uniform noise in `[-noise_amplitude/2, +noise_amplitude/2]`.
    fn noise<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.noise_amplitude <= 0.0 {
            return 0.0;
        }
        let half = self.noise_amplitude / 2.0;
        rng.gen_range(-half..=half)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Lookup under a key that was never configured. Recoverable; callers
    /// typically substitute a default display.
    UnknownParameter(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownParameter(key) => write!(f, "unknown parameter '{}'", key),
        }
    }
}

impl std::error::Error for StoreError {}

/// Owns one [`SeriesBuffer`] per configured parameter key.
///
/// Keys are fixed at construction; every configured key has exactly one
/// buffer for the lifetime of the store. The store is the single writer;
/// readers take snapshots.
pub struct MultiSeriesStore {
    buffers: HashMap<String, SeriesBuffer>,
    profiles: HashMap<String, GenerationProfile>,
    sample_period_secs: u64,
}

impl MultiSeriesStore {
    pub fn new(
        profiles: HashMap<String, GenerationProfile>,
        retention_cap: usize,
        sample_period_secs: u64,
    ) -> Self {
        let buffers = profiles
            .keys()
            .map(|key| (key.clone(), SeriesBuffer::new(key, retention_cap)))
            .collect();
        Self {
            buffers,
            profiles,
            sample_period_secs,
        }
    }

    /// Configured parameter keys, sorted for stable iteration order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.buffers.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn sample_period_secs(&self) -> u64 {
        self.sample_period_secs
    }

    pub fn get(&self, key: &str) -> Result<&SeriesBuffer, StoreError> {
        self.buffers
            .get(key)
            .ok_or_else(|| StoreError::UnknownParameter(key.to_string()))
    }

    /// Seed every buffer with `horizon` synthetic samples ending at `now`.
    ///
    /// Each sample evaluates the sinusoid model at its index plus uniform
    /// noise; the predicted track reuses the same draw scaled down. The
    /// seasonal/daily shape is deterministic, the noise is not — tests
    /// treat it as a tolerance band.
    pub fn initialize(&mut self, horizon: usize, now: u64) {
        let mut rng = rand::thread_rng();
        for (key, buffer) in self.buffers.iter_mut() {
            let profile = &self.profiles[key];
            buffer.clear();
            for i in 0..horizon {
                let age = (horizon - 1 - i) as u64;
                let ts = now.saturating_sub(age * self.sample_period_secs);
                let model = profile.model(i);
                let noise = profile.noise(&mut rng);
                buffer.append(Sample {
                    ts,
                    value: profile.clamp(model + noise),
                    predicted: profile.clamp(model + noise * PREDICTED_NOISE_SCALE),
                });
            }
        }
    }

    /// Append one live sample to every buffer with the same timestamp.
    ///
    /// Continuation is a random walk from the latest observed value; the
    /// sinusoid model is not consulted here. All buffers advance before any
    /// consumer reads, so no cross-parameter time skew is observable.
    pub fn tick(&mut self, now: u64) {
        let mut rng = rand::thread_rng();
        for (key, buffer) in self.buffers.iter_mut() {
            let profile = &self.profiles[key];
            let (anchor_value, anchor_predicted) = match buffer.latest() {
                Some(last) => (last.value, last.predicted),
                None => (profile.base, profile.base),
            };
            let step = profile.noise(&mut rng);
            buffer.append(Sample {
                ts: now,
                value: profile.clamp(anchor_value + step),
                predicted: profile.clamp(anchor_predicted + step * PREDICTED_NOISE_SCALE),
            });
        }
    }

    /// Reset to a new observation window (e.g. "last 24h" -> "last 30d").
    pub fn reconfigure(&mut self, horizon: usize, now: u64) {
        self.initialize(horizon, now);
    }
}

/// Current wall-clock time in epoch seconds.
pub fn now_ts() -> u64 {
    chrono::Utc::now().timestamp() as u64
}
