//! Scoring configuration.
//!
//! Built once at startup and shared read-only; nothing here changes while
//! the process runs.

use serde::{Deserialize, Serialize};

use crate::error::{AbomError, Result};

/// Lower bounds of Tiers 2, 3 and 4. Tier 1 covers everything above zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub tier2: f64,
    pub tier3: f64,
    pub tier4: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            tier2: 5.0,
            tier3: 20.0,
            tier4: 50.0,
        }
    }
}

/// Multipliers applied for each scaffolding control that is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldingWeights {
    pub mcp: f64,
    pub sandbox: f64,
    pub circuit_breaker: f64,
    /// The product never drops below this value.
    pub floor: f64,
}

impl Default for ScaffoldingWeights {
    fn default() -> Self {
        Self {
            mcp: 0.9,
            sandbox: 0.85,
            circuit_breaker: 0.9,
            floor: 0.7,
        }
    }
}

/// Immutable parameters of the risk formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub thresholds: TierThresholds,
    pub scaffolding: ScaffoldingWeights,
    /// Training compute at or above which Tier 4 is forced.
    pub compute_override_flops: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            thresholds: TierThresholds::default(),
            scaffolding: ScaffoldingWeights::default(),
            compute_override_flops: 1e25,
        }
    }
}

impl ScoringConfig {
    /// Reject configurations the classifier cannot interpret consistently.
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        if !(t.tier2 > 0.0 && t.tier2 < t.tier3 && t.tier3 < t.tier4) {
            return Err(AbomError::InvalidConfig(format!(
                "tier thresholds must be positive and ascending, got {} / {} / {}",
                t.tier2, t.tier3, t.tier4
            )));
        }

        let s = &self.scaffolding;
        if !(s.floor > 0.0 && s.floor <= 1.0) {
            return Err(AbomError::InvalidConfig(format!(
                "scaffolding floor must be in (0, 1], got {}",
                s.floor
            )));
        }
        for (name, weight) in [
            ("mcp", s.mcp),
            ("sandbox", s.sandbox),
            ("circuit_breaker", s.circuit_breaker),
        ] {
            if !(weight > 0.0 && weight <= 1.0) {
                return Err(AbomError::InvalidConfig(format!(
                    "{name} multiplier must be in (0, 1], got {weight}"
                )));
            }
        }

        if !(self.compute_override_flops.is_finite() && self.compute_override_flops > 0.0) {
            return Err(AbomError::InvalidConfig(format!(
                "compute override threshold must be positive, got {}",
                self.compute_override_flops
            )));
        }
        Ok(())
    }
}
