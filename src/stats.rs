//! Dashboard summary stats: one-shot upstream fetch with a local fallback.
//!
//! The upstream source is optional by design. Any failure (unreachable
//! host, bad status, malformed body) degrades to the fixed fallback tuple
//! and must never block the rest of initialization.

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::logging::{json_log, obj, v_str};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_species: u64,
    pub ai_models: u64,
    pub monitoring_stations: u64,
    pub predictions_today: u64,
}

/// Fixed local stand-in used whenever the upstream source fails.
pub fn fallback() -> DashboardStats {
    DashboardStats {
        total_species: 5_247,
        ai_models: 8,
        monitoring_stations: 15,
        predictions_today: 1_847,
    }
}

pub struct StatsClient {
    client: Client,
    base: String,
}

impl StatsClient {
    pub fn new(base: &str) -> Self {
        Self {
            client: Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch(&self) -> Result<DashboardStats> {
        let url = format!("{}/api/dashboard/stats", self.base);
        let resp = self.client.get(&url).send().await?.error_for_status()?;
        Ok(resp.json().await?)
    }

    /// Fetch with degradation: logs the failure and substitutes the
    /// fallback so callers can proceed unconditionally.
    pub async fn fetch_or_fallback(&self) -> DashboardStats {
        match self.fetch().await {
            Ok(stats) => stats,
            Err(err) => {
                json_log(
                    "stats",
                    obj(&[
                        ("status", v_str("fallback")),
                        ("error", v_str(&err.to_string())),
                    ]),
                );
                fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_tuple() {
        let stats = fallback();
        assert_eq!(stats.total_species, 5_247);
        assert_eq!(stats.ai_models, 8);
        assert_eq!(stats.monitoring_stations, 15);
        assert_eq!(stats.predictions_today, 1_847);
    }

    #[test]
    fn test_decodes_upstream_payload_shape() {
        let body = r#"{
            "totalSpecies": 5247,
            "aiModels": 8,
            "monitoringStations": 15,
            "predictionsToday": 1847,
            "dataQuality": 94.2
        }"#;
        let stats: DashboardStats = serde_json::from_str(body).unwrap();
        assert_eq!(stats, fallback());
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let client = StatsClient::new("http://localhost:8000/");
        assert_eq!(client.base, "http://localhost:8000");
    }
}
