//! The risk scoring pipeline.
//!
//! ```text
//! document ─┬─ agency ──────┐
//!           ├─ autonomy ────┤ A × U × e^P ── × S ── tier ── overrides ── RiskAssessment
//!           ├─ persistence ─┘                 │
//!           └─ scaffolding ───────────────────┘
//! ```
//!
//! Every stage is a pure function of the document and the immutable
//! [`ScoringConfig`], so a single [`RiskScorer`] can serve any number of
//! concurrent callers.

pub mod agency;
pub mod autonomy;
pub mod overrides;
pub mod persistence;
pub mod scaffolding;
pub mod tier;

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::document::AbomDocument;
use crate::error::{AbomError, Result};

pub use agency::{extract_agency, AgencyLevel};
pub use autonomy::{extract_autonomy, AutonomyMode};
pub use overrides::{evaluate_overrides, Tier4Override};
pub use persistence::{extract_persistence, PersistenceLevel};
pub use scaffolding::scaffolding_modifier;
pub use tier::{classify, threshold_table, UartTier};

/// Display form of the risk formula.
pub const FORMULA: &str = "R = A × U × e^P × S";

/// Full outcome of scoring one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub agency: AgencyLevel,
    pub autonomy: AutonomyMode,
    pub persistence: PersistenceLevel,
    pub scaffolding_modifier: f64,
    /// Unrounded score used for tier comparison.
    pub raw_score: f64,
    /// Tier implied by the score alone.
    pub base_tier: UartTier,
    /// Tier after overrides.
    pub tier: UartTier,
    pub overrides: Vec<Tier4Override>,
}

impl RiskAssessment {
    /// Score rounded to two decimals for reporting.
    pub fn score(&self) -> f64 {
        round_to(self.raw_score, 2)
    }

    /// Override reasons, or `None` when no rule fired.
    pub fn override_reasons(&self) -> Option<Vec<String>> {
        if self.overrides.is_empty() {
            None
        } else {
            Some(self.overrides.iter().map(ToString::to_string).collect())
        }
    }

    /// Wire representation returned by `/api/calculate-risk`.
    pub fn response(&self) -> RiskResponse {
        RiskResponse {
            agency: self.agency.score(),
            autonomy: self.autonomy.score(),
            persistence: self.persistence.score(),
            scaffolding_modifier: round_to(self.scaffolding_modifier, 4),
            score: self.score(),
            tier: self.tier,
            tier_4_overrides: self.override_reasons(),
        }
    }
}

/// Flat result object exposed to HTTP and CLI callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResponse {
    pub agency: u8,
    pub autonomy: u8,
    pub persistence: u8,
    pub scaffolding_modifier: f64,
    pub score: f64,
    pub tier: UartTier,
    pub tier_4_overrides: Option<Vec<String>>,
}

/// Stateless scorer bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    config: ScoringConfig,
}

impl RiskScorer {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Parse, validate and score a raw upload.
    pub fn assess_bytes(&self, bytes: &[u8]) -> Result<(AbomDocument, RiskAssessment)> {
        let document = AbomDocument::from_slice(bytes)?;
        document.validate()?;
        let assessment = self.score(&document)?;
        Ok((document, assessment))
    }

    /// Score an already-validated document.
    pub fn score(&self, document: &AbomDocument) -> Result<RiskAssessment> {
        let profile = document.agency_profile();

        let agency = extract_agency(&profile);
        let autonomy = extract_autonomy(&document.autonomy_leash());
        let persistence = extract_persistence(&document.persistence_layer());
        let modifier = scaffolding_modifier(
            &document.scaffolding_inventory(),
            &self.config.scaffolding,
        );

        let raw_score = combine(agency, autonomy, persistence) * modifier;
        if !raw_score.is_finite() {
            return Err(AbomError::NonFiniteScore(raw_score));
        }

        let base_tier = classify(raw_score, &self.config.thresholds);
        let overrides = evaluate_overrides(
            &document.model_core(),
            &profile,
            self.config.compute_override_flops,
        );
        let tier = if overrides.is_empty() {
            base_tier
        } else {
            UartTier::Tier4
        };

        Ok(RiskAssessment {
            agency,
            autonomy,
            persistence,
            scaffolding_modifier: modifier,
            raw_score,
            base_tier,
            tier,
            overrides,
        })
    }
}

/// Base score `A × U × e^P`.
///
/// An agent without tools cannot act on anything, so its base score is zero.
pub fn combine(agency: AgencyLevel, autonomy: AutonomyMode, persistence: PersistenceLevel) -> f64 {
    if !agency.can_act() {
        return 0.0;
    }
    f64::from(agency.score()) * f64::from(autonomy.score()) * f64::from(persistence.score()).exp()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn score(value: serde_json::Value) -> RiskAssessment {
        RiskScorer::default()
            .score(&AbomDocument::from_value(value))
            .expect("score")
    }

    #[test]
    fn test_combine_exponential_persistence() {
        let base = combine(AgencyLevel::ReadOnly, AutonomyMode::Hotl, PersistenceLevel::Stateless);
        let session = combine(AgencyLevel::ReadOnly, AutonomyMode::Hotl, PersistenceLevel::Session);
        assert_eq!(base, 4.0);
        assert!((session / base - std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_combine_without_tools_is_zero() {
        assert_eq!(
            combine(AgencyLevel::NoTools, AutonomyMode::Hootl, PersistenceLevel::Durable),
            0.0
        );
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(10.873127, 2), 10.87);
        assert_eq!(round_to(0.7649999999, 4), 0.765);
    }

    #[test]
    fn test_response_has_null_overrides_when_none_fire() {
        let a = score(json!({
            "agency_profile": {"tools": ["search"]},
            "autonomy_leash": "HITL",
            "persistence_layer": {"memory_type": "none"}
        }));
        let wire = serde_json::to_value(a.response()).unwrap();
        assert_eq!(wire["tier_4_overrides"], serde_json::Value::Null);
        assert_eq!(wire["score"], json!(2.0));
        assert_eq!(wire["tier"], json!(1));
    }

    #[test]
    fn test_override_keeps_base_tier_for_reporting() {
        let a = score(json!({
            "model_core": {"flops": 5e25},
            "agency_profile": {"tools": ["search"]},
            "autonomy_leash": "HITL",
            "persistence_layer": {"memory_type": "none"}
        }));
        assert_eq!(a.base_tier, UartTier::Tier1);
        assert_eq!(a.tier, UartTier::Tier4);
        assert_eq!(a.override_reasons().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut cfg = ScoringConfig::default();
        cfg.scaffolding.floor = 0.0;
        assert!(RiskScorer::new(cfg).is_err());
    }

    #[test]
    fn test_assess_bytes_validates() {
        let scorer = RiskScorer::default();
        let err = scorer
            .assess_bytes(br#"{"agency_profile": {"tools": []}, "autonomy_leash": "HITL"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing 'persistence_layer' field");
    }
}
