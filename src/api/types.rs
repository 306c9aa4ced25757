//! @acp:module "API Types"
//! @acp:summary "Wire payloads exchanged with the scenario backend"
//! @acp:domain client
//! @acp:layer model

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// @acp:summary "Generation request payload"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRequest {
    pub region: String,
    pub topic: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// One predicted outcome branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioItem {
    pub name: String,
    /// Probability in [0, 1]
    pub probability: f64,
    pub description: String,
    pub key_factors: Vec<String>,
}

/// @acp:summary "Generation response; item order is presentation order"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResponse {
    pub scenario_id: String,
    pub region: String,
    pub topic: String,
    /// Kept exactly as received. An empty list is a valid zero-result answer.
    pub scenarios: Vec<ScenarioItem>,
    /// Aggregate confidence in [0, 1], not tied to a single item
    pub confidence: f64,
    pub sources: Vec<String>,
    pub generated_at: String,
}

impl ScenarioResponse {
    /// Parse `generated_at` for display.
    ///
    /// Accepts RFC 3339 and the offset-less ISO-8601 form; anything else
    /// yields `None` and should be shown verbatim.
    pub fn generated_at_parsed(&self) -> Option<GeneratedAt> {
        parse_timestamp(&self.generated_at)
    }
}

/// Parsed generation timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedAt {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl GeneratedAt {
    pub fn format(&self, fmt: &str) -> String {
        match self {
            GeneratedAt::Zoned(dt) => dt.format(fmt).to_string(),
            GeneratedAt::Naive(dt) => dt.format(fmt).to_string(),
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<GeneratedAt> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(GeneratedAt::Zoned(dt));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(GeneratedAt::Naive)
}

/// Region or topic lookup entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: String,
    pub label: String,
}

/// Liveness probe result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_json() -> &'static str {
        r#"{
            "scenario_id": "a1b2",
            "region": "EU",
            "topic": "energy",
            "scenarios": [
                {"name": "Diversification", "probability": 0.35, "description": "d1", "key_factors": ["LNG", "nuclear"]},
                {"name": "Status quo", "probability": 0.5, "description": "d2", "key_factors": []},
                {"name": "Shock", "probability": 0.15, "description": "d3", "key_factors": ["embargo"]}
            ],
            "confidence": 0.72,
            "sources": ["EU_COMMISSION", "CSIS"],
            "generated_at": "2026-03-01T12:30:00.123456"
        }"#
    }

    #[test]
    fn test_request_omits_absent_optionals() {
        let request = ScenarioRequest {
            region: "EU".to_string(),
            topic: "energy".to_string(),
            timeframe: None,
            context: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"region": "EU", "topic": "energy"}));
    }

    #[test]
    fn test_request_includes_present_optionals() {
        let request = ScenarioRequest {
            region: "USA".to_string(),
            topic: "trade".to_string(),
            timeframe: Some("2030".to_string()),
            context: Some("tariffs".to_string()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["timeframe"], "2030");
        assert_eq!(json["context"], "tariffs");
    }

    #[test]
    fn test_response_preserves_order_and_numbers() {
        let response: ScenarioResponse = serde_json::from_str(sample_json()).unwrap();

        let names: Vec<_> = response.scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Diversification", "Status quo", "Shock"]);

        let probabilities: Vec<_> = response.scenarios.iter().map(|s| s.probability).collect();
        assert_eq!(probabilities, vec![0.35, 0.5, 0.15]);
        assert_eq!(response.confidence, 0.72);
        assert_eq!(response.sources, vec!["EU_COMMISSION", "CSIS"]);
    }

    #[test]
    fn test_response_missing_scenarios_rejected() {
        let json = r#"{
            "scenario_id": "x", "region": "EU", "topic": "energy",
            "confidence": 0.5, "sources": [], "generated_at": "2026-01-01T00:00:00"
        }"#;
        assert!(serde_json::from_str::<ScenarioResponse>(json).is_err());
    }

    #[test]
    fn test_response_empty_scenarios_accepted() {
        let json = r#"{
            "scenario_id": "x", "region": "EU", "topic": "energy", "scenarios": [],
            "confidence": 0.0, "sources": [], "generated_at": "2026-01-01T00:00:00"
        }"#;
        let response: ScenarioResponse = serde_json::from_str(json).unwrap();
        assert!(response.scenarios.is_empty());
    }

    #[test]
    fn test_generated_at_parsing() {
        let mut response: ScenarioResponse = serde_json::from_str(sample_json()).unwrap();
        assert!(matches!(
            response.generated_at_parsed(),
            Some(GeneratedAt::Naive(_))
        ));

        response.generated_at = "2026-03-01T12:30:00+01:00".to_string();
        let parsed = response.generated_at_parsed().unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M"), "2026-03-01 12:30");

        response.generated_at = "yesterday".to_string();
        assert_eq!(response.generated_at_parsed(), None);
    }

    #[test]
    fn test_health_status() {
        let health: HealthStatus = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(health.is_ok());
    }
}
