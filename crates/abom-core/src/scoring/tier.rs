//! UART tier classification.

use serde::{Deserialize, Serialize};

use crate::config::TierThresholds;

/// Discrete risk classification, serialized as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum UartTier {
    Tier0,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
}

impl UartTier {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Tier0 => "Minimal",
            Self::Tier1 => "Low",
            Self::Tier2 => "Moderate",
            Self::Tier3 => "High",
            Self::Tier4 => "Critical",
        }
    }

    pub fn description(self) -> String {
        format!("UART Tier {} ({})", self.number(), self.label())
    }
}

impl From<UartTier> for u8 {
    fn from(tier: UartTier) -> Self {
        tier.number()
    }
}

impl TryFrom<u8> for UartTier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Tier0),
            1 => Ok(Self::Tier1),
            2 => Ok(Self::Tier2),
            3 => Ok(Self::Tier3),
            4 => Ok(Self::Tier4),
            other => Err(format!("no UART tier {other}")),
        }
    }
}

impl std::fmt::Display for UartTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier {}", self.number())
    }
}

/// Map an unrounded score onto half-open tier intervals.
pub fn classify(score: f64, thresholds: &TierThresholds) -> UartTier {
    if score <= 0.0 {
        UartTier::Tier0
    } else if score < thresholds.tier2 {
        UartTier::Tier1
    } else if score < thresholds.tier3 {
        UartTier::Tier2
    } else if score < thresholds.tier4 {
        UartTier::Tier3
    } else {
        UartTier::Tier4
    }
}

/// Human-readable interval for each tier, derived from the live thresholds.
pub fn threshold_table(thresholds: &TierThresholds) -> Vec<(UartTier, String)> {
    let TierThresholds {
        tier2,
        tier3,
        tier4,
    } = *thresholds;
    vec![
        (UartTier::Tier0, "R = 0".to_string()),
        (UartTier::Tier1, format!("0 < R < {tier2}")),
        (UartTier::Tier2, format!("{tier2} ≤ R < {tier3}")),
        (UartTier::Tier3, format!("{tier3} ≤ R < {tier4}")),
        (UartTier::Tier4, format!("R ≥ {tier4}")),
    ]
}
