// src/application/mission_stats.rs
use crate::domain::mission::{mock_mission_stats, normalize_mission_stats};
use crate::domain::{DomainError, MissionInfo, MissionStats};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{instrument, warn};

#[async_trait]
pub trait MissionSource {
    /// Raw body of the mission-stats endpoint; shapes vary, see `normalize_mission_stats`
    async fn fetch_mission_stats(&self) -> Result<Value, DomainError>;

    async fn fetch_missions(&self) -> Result<BTreeMap<String, MissionInfo>, DomainError>;
}

/// Normalized stats plus whether they came from the built-in mock data.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub stats: Vec<MissionStats>,
    pub from_fallback: bool,
}

pub struct MissionStatsService<S: MissionSource> {
    source: S,
}

impl<S: MissionSource> MissionStatsService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Always yields data: fetch failures fall back to the mock dataset.
    #[instrument(level = "debug", skip(self))]
    pub async fn load(&self) -> StatsReport {
        let normalized = match self.source.fetch_mission_stats().await {
            Ok(body) => normalize_mission_stats(&body),
            Err(e) => Err(e),
        };

        match normalized {
            Ok(stats) => StatsReport {
                stats,
                from_fallback: false,
            },
            Err(e) => {
                warn!(error = %e, "Mission stats unavailable, using mock data");
                StatsReport {
                    stats: mock_mission_stats(),
                    from_fallback: true,
                }
            }
        }
    }

    pub async fn missions(&self) -> Result<BTreeMap<String, MissionInfo>, DomainError> {
        self.source.fetch_missions().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Mission;
    use crate::util::testing::MockMissionSource;
    use serde_json::json;

    #[tokio::test]
    async fn given_valid_body_when_loading_then_returns_normalized_stats() {
        // Arrange
        let source = MockMissionSource::builder()
            .with_stats(json!({
                "missions": [
                    { "mission": "KEPLER", "totals": { "confirmed": 62, "not_planet": 28, "candidate": 10 } }
                ]
            }))
            .build();
        let service = MissionStatsService::new(source);

        // Act
        let report = service.load().await;

        // Assert
        assert!(!report.from_fallback);
        assert_eq!(report.stats.len(), 1);
        assert_eq!(report.stats[0].mission, Mission::Kepler);
        assert_eq!(report.stats[0].percents.confirmed, 62);
    }

    #[tokio::test]
    async fn given_network_failure_when_loading_then_falls_back_to_mock_data() {
        let source = MockMissionSource::builder()
            .with_stats_error(DomainError::Network("connection refused".to_string()))
            .build();
        let service = MissionStatsService::new(source);

        let report = service.load().await;

        assert!(report.from_fallback);
        assert_eq!(report.stats, mock_mission_stats());
    }

    #[tokio::test]
    async fn given_error_status_when_loading_then_falls_back_to_mock_data() {
        let source = MockMissionSource::builder()
            .with_stats_error(DomainError::Status {
                url: "http://api/mission-stats".to_string(),
                status: 503,
            })
            .build();
        let service = MissionStatsService::new(source);

        let report = service.load().await;

        assert!(report.from_fallback);
        assert_eq!(report.stats.len(), 3);
    }

    #[tokio::test]
    async fn given_unrecognizable_body_when_loading_then_falls_back_to_mock_data() {
        let source = MockMissionSource::builder()
            .with_stats(json!({ "hello": "world" }))
            .build();
        let service = MissionStatsService::new(source);

        let report = service.load().await;

        assert!(report.from_fallback);
    }

    #[tokio::test]
    async fn given_mission_descriptions_when_fetching_then_returns_them_by_key() {
        // Arrange
        let kepler = MissionInfo {
            title: "Kepler".to_string(),
            subtitle: "2009-2013".to_string(),
            summary: String::new(),
            links: vec![],
        };
        let source = MockMissionSource::builder()
            .with_mission("kepler", kepler.clone())
            .build();
        let service = MissionStatsService::new(source);

        // Act
        let missions = service.missions().await.unwrap();

        // Assert
        assert_eq!(missions.len(), 1);
        assert_eq!(missions["kepler"], kepler);
    }
}
