//! Rules that force Tier 4 regardless of the computed score.

use serde::{Deserialize, Serialize};

use crate::document::{AgencyProfile, ModelCore};
use crate::keywords::{contains_any, is_one_of, CRITICAL_FLAG_VOCABULARY};

/// A fired Tier 4 override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Tier4Override {
    /// Declared training compute reached the frontier threshold.
    ComputeThreshold { flops: f64, threshold: f64 },
    /// Capability flags or tool names hit the critical vocabulary.
    CriticalCapability { matches: Vec<String> },
}

impl std::fmt::Display for Tier4Override {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ComputeThreshold { flops, threshold } => write!(
                f,
                "Training compute of {flops:e} FLOPs meets or exceeds \
                 the {threshold:e} FLOPs threshold"
            ),
            Self::CriticalCapability { matches } => write!(
                f,
                "Critical capability detected: {}",
                matches.join(", ")
            ),
        }
    }
}

/// Evaluate both override rules. Order is compute first, then capabilities.
pub fn evaluate_overrides(
    model: &ModelCore,
    profile: &AgencyProfile,
    compute_threshold: f64,
) -> Vec<Tier4Override> {
    let mut fired = Vec::new();

    if let Some(flops) = model.training_flops {
        if flops >= compute_threshold {
            fired.push(Tier4Override::ComputeThreshold {
                flops,
                threshold: compute_threshold,
            });
        }
    }

    let matches = critical_capability_matches(profile);
    if !matches.is_empty() {
        fired.push(Tier4Override::CriticalCapability { matches });
    }

    fired
}

/// Flags in the critical vocabulary, then tool names containing a vocabulary
/// entry once separators are stripped.
fn critical_capability_matches(profile: &AgencyProfile) -> Vec<String> {
    let flags = profile
        .capability_flags
        .iter()
        .filter(|flag| is_one_of(flag, CRITICAL_FLAG_VOCABULARY))
        .map(|flag| format!("capability flag '{flag}'"));

    let tools = profile
        .tools
        .iter()
        .map(|tool| tool.name())
        .filter(|name| contains_any(name, CRITICAL_FLAG_VOCABULARY))
        .map(|name| format!("tool '{name}'"));

    flags.chain(tools).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ToolEntry;

    fn flags(flags: &[&str]) -> AgencyProfile {
        AgencyProfile {
            capability_flags: flags.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_compute_threshold_inclusive() {
        let model = ModelCore {
            training_flops: Some(1e25),
        };
        let fired = evaluate_overrides(&model, &AgencyProfile::default(), 1e25);
        assert_eq!(fired.len(), 1);
        assert!(fired[0].to_string().contains("1e25 FLOPs"));
    }

    #[test]
    fn test_compute_below_threshold() {
        let model = ModelCore {
            training_flops: Some(9.9e24),
        };
        assert!(evaluate_overrides(&model, &AgencyProfile::default(), 1e25).is_empty());
        let fired = evaluate_overrides(&ModelCore::default(), &AgencyProfile::default(), 1e25);
        assert!(fired.is_empty());
    }

    #[test]
    fn test_flags_case_insensitive() {
        let fired = evaluate_overrides(&ModelCore::default(), &flags(&["Self-Replication"]), 1e25);
        assert_eq!(
            fired,
            vec![Tier4Override::CriticalCapability {
                matches: vec!["capability flag 'Self-Replication'".into()]
            }]
        );
    }

    #[test]
    fn test_unlisted_flags_ignored() {
        let profile = flags(&["web_browsing", "weapon"]);
        let fired = evaluate_overrides(&ModelCore::default(), &profile, 1e25);
        assert!(fired.is_empty());
    }

    #[test]
    fn test_tool_names_match_stripped_vocabulary() {
        let profile = AgencyProfile {
            tools: vec![
                ToolEntry::PlainName("SelfReplication-Engine".into()),
                ToolEntry::Detailed {
                    name: "search".into(),
                    permission: "read".into(),
                },
            ],
            ..Default::default()
        };
        let fired = evaluate_overrides(&ModelCore::default(), &profile, 1e25);
        assert_eq!(fired.len(), 1);
        assert!(fired[0].to_string().contains("SelfReplication-Engine"));
    }

    #[test]
    fn test_both_rules_fire_separately() {
        let model = ModelCore {
            training_flops: Some(2e25),
        };
        let fired = evaluate_overrides(&model, &flags(&["cbrn_access"]), 1e25);
        assert_eq!(fired.len(), 2);
        assert!(matches!(fired[0], Tier4Override::ComputeThreshold { .. }));
        assert!(matches!(fired[1], Tier4Override::CriticalCapability { .. }));
    }
}
