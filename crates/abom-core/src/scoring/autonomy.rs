//! Autonomy leash extraction.

use serde::{Deserialize, Serialize};

use crate::document::AutonomyLeash;

/// Human-oversight mode. Unknown modes resolve to [`AutonomyMode::Hitl`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AutonomyMode {
    /// Human in the loop.
    #[serde(rename = "HITL")]
    Hitl,
    /// Human on the loop.
    #[serde(rename = "HOTL")]
    Hotl,
    /// Human out of the loop.
    #[serde(rename = "HOOTL")]
    Hootl,
}

impl AutonomyMode {
    pub fn score(self) -> u8 {
        match self {
            Self::Hitl => 1,
            Self::Hotl => 2,
            Self::Hootl => 3,
        }
    }
}

impl std::fmt::Display for AutonomyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hitl => write!(f, "HITL"),
            Self::Hotl => write!(f, "HOTL"),
            Self::Hootl => write!(f, "HOOTL"),
        }
    }
}

pub fn extract_autonomy(leash: &AutonomyLeash) -> AutonomyMode {
    match leash.mode().to_uppercase().as_str() {
        "HOTL" => AutonomyMode::Hotl,
        "HOOTL" => AutonomyMode::Hootl,
        _ => AutonomyMode::Hitl,
    }
}
