//! Downloadable risk report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ScoringConfig;
use crate::digest::compute_digest;
use crate::document::AbomDocument;
use crate::error::Result;
use crate::scoring::{threshold_table, RiskAssessment, UartTier, FORMULA};

/// Suggested file name for the downloaded report.
pub const REPORT_FILENAME: &str = "abom_risk_report.json";

/// Assessment section of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportAssessment {
    pub agency: u8,
    pub autonomy: u8,
    pub persistence: u8,
    pub scaffolding_modifier: f64,
    pub score: f64,
    pub tier: UartTier,
    pub tier_description: String,
    pub tier_4_overrides: Option<Vec<String>>,
}

/// Report body returned by `/api/download-report` and `abom report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub generated_at: DateTime<Utc>,
    /// SHA-256 of the canonical JSON of `abom_input`.
    pub input_digest: String,
    pub abom_input: Value,
    pub risk_assessment: ReportAssessment,
    pub formula: String,
    pub tier_thresholds: BTreeMap<String, String>,
}

impl RiskReport {
    pub fn build(
        document: &AbomDocument,
        assessment: &RiskAssessment,
        config: &ScoringConfig,
        generated_at: DateTime<Utc>,
    ) -> Result<Self> {
        let wire = assessment.response();
        let tier_thresholds = threshold_table(&config.thresholds)
            .into_iter()
            .map(|(tier, range)| (format!("Tier {}", tier.number()), range))
            .collect();

        Ok(Self {
            generated_at,
            input_digest: compute_digest(document.raw())?,
            abom_input: document.raw().clone(),
            risk_assessment: ReportAssessment {
                agency: wire.agency,
                autonomy: wire.autonomy,
                persistence: wire.persistence,
                scaffolding_modifier: wire.scaffolding_modifier,
                score: wire.score,
                tier: wire.tier,
                tier_description: assessment.tier.description(),
                tier_4_overrides: wire.tier_4_overrides,
            },
            formula: FORMULA.to_string(),
            tier_thresholds,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::RiskScorer;
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
            .expect("parse RFC3339")
            .with_timezone(&Utc)
    }

    #[test]
    fn test_report_embeds_input_unchanged() {
        let raw = json!({
            "agency_profile": {"tools": ["search"], "vendor_note": {"nested": [1, 2]}},
            "autonomy_leash": {"mode": "hotl"},
            "persistence_layer": {"memory_type": "session", "retention": "session"}
        });
        let doc = AbomDocument::from_value(raw.clone());
        let scorer = RiskScorer::default();
        let assessment = scorer.score(&doc).expect("score");
        let report = RiskReport::build(&doc, &assessment, scorer.config(), fixed_time())
            .expect("report");

        assert_eq!(report.abom_input, raw);
        assert_eq!(report.risk_assessment.tier, UartTier::Tier2);
        assert_eq!(report.risk_assessment.tier_description, "UART Tier 2 (Moderate)");
        assert_eq!(report.formula, "R = A × U × e^P × S");
        assert_eq!(report.tier_thresholds["Tier 2"], "5 ≤ R < 20");
        assert_eq!(report.input_digest.len(), 64);
    }

    #[test]
    fn test_report_json_has_expected_keys() {
        let doc = AbomDocument::from_value(json!({
            "agency_profile": {"tools": []},
            "autonomy_leash": "HITL",
            "persistence_layer": {"memory_type": "none"}
        }));
        let scorer = RiskScorer::default();
        let assessment = scorer.score(&doc).expect("score");
        let report = RiskReport::build(&doc, &assessment, scorer.config(), fixed_time())
            .expect("report");

        let raw: Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
        let obj = raw.as_object().expect("report object");
        for key in [
            "generated_at",
            "input_digest",
            "abom_input",
            "risk_assessment",
            "formula",
            "tier_thresholds",
        ] {
            assert!(obj.contains_key(key), "missing key: {key}");
        }
        assert_eq!(raw["generated_at"], json!("2026-01-01T00:00:00Z"));
        assert_eq!(raw["risk_assessment"]["tier_4_overrides"], Value::Null);
        assert_eq!(raw["tier_thresholds"].as_object().map(|m| m.len()), Some(5));
    }
}
