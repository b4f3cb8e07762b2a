//! Tool agency extraction.

use serde::{Deserialize, Serialize};

use crate::document::{AgencyProfile, ToolEntry};
use crate::keywords::{
    contains_any, is_one_of, mentions_any, CRITICAL_CAPABILITY, CRITICAL_SCOPES, STATE_CHANGING,
    STATE_CHANGING_SCOPES,
};

/// How much an agent can do through its tools, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgencyLevel {
    NoTools,
    ReadOnly,
    StateChanging,
    Critical,
}

impl AgencyLevel {
    pub fn score(self) -> u8 {
        match self {
            Self::NoTools => 1,
            Self::ReadOnly => 2,
            Self::StateChanging => 4,
            Self::Critical => 6,
        }
    }

    /// Whether the agent has any tool through which it can act.
    pub fn can_act(self) -> bool {
        self != Self::NoTools
    }
}

/// Classify an agency profile. Critical signals win over state-changing ones.
pub fn extract_agency(profile: &AgencyProfile) -> AgencyLevel {
    if profile.tools.is_empty() {
        return AgencyLevel::NoTools;
    }

    let critical = mentions_any(&profile.scope, CRITICAL_SCOPES)
        || profile
            .tools
            .iter()
            .any(|tool| contains_any(tool.name(), CRITICAL_CAPABILITY));
    if critical {
        return AgencyLevel::Critical;
    }

    let state_changing = mentions_any(&profile.scope, STATE_CHANGING_SCOPES)
        || profile.tools.iter().any(is_state_changing);
    if state_changing {
        AgencyLevel::StateChanging
    } else {
        AgencyLevel::ReadOnly
    }
}

fn is_state_changing(tool: &ToolEntry) -> bool {
    match tool {
        ToolEntry::PlainName(name) => mentions_any(name, STATE_CHANGING),
        ToolEntry::Detailed { permission, .. } => is_one_of(permission, STATE_CHANGING),
        ToolEntry::Opaque => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(tools: Vec<ToolEntry>, scope: &str) -> AgencyProfile {
        AgencyProfile {
            tools,
            scope: scope.to_string(),
            capability_flags: Vec::new(),
        }
    }

    fn detailed(name: &str, permission: &str) -> ToolEntry {
        ToolEntry::Detailed {
            name: name.into(),
            permission: permission.into(),
        }
    }

    #[test]
    fn test_no_tools() {
        assert_eq!(extract_agency(&profile(vec![], "")), AgencyLevel::NoTools);
        // scope alone does not grant agency
        assert_eq!(
            extract_agency(&profile(vec![], "critical")),
            AgencyLevel::NoTools
        );
    }

    #[test]
    fn test_read_only_tools() {
        let p = profile(
            vec![
                ToolEntry::PlainName("search".into()),
                detailed("fetch", "read"),
            ],
            "",
        );
        assert_eq!(extract_agency(&p), AgencyLevel::ReadOnly);
    }

    #[test]
    fn test_opaque_tools_are_read_only() {
        let p = profile(vec![ToolEntry::Opaque, ToolEntry::Opaque], "");
        assert_eq!(extract_agency(&p), AgencyLevel::ReadOnly);
    }

    #[test]
    fn test_plain_name_substring_is_case_insensitive() {
        let p = profile(vec![ToolEntry::PlainName("File_WRITE".into())], "");
        assert_eq!(extract_agency(&p), AgencyLevel::StateChanging);
    }

    #[test]
    fn test_permission_is_exact_match() {
        let p = profile(vec![detailed("editor", "rewrite")], "");
        assert_eq!(extract_agency(&p), AgencyLevel::ReadOnly);

        let p = profile(vec![detailed("editor", "Exec")], "");
        assert_eq!(extract_agency(&p), AgencyLevel::StateChanging);
    }

    #[test]
    fn test_detailed_name_is_not_scanned_for_state_changes() {
        let p = profile(vec![detailed("file_write", "read")], "");
        assert_eq!(extract_agency(&p), AgencyLevel::ReadOnly);
    }

    #[test]
    fn test_state_changing_scope() {
        let p = profile(vec![detailed("crm", "read")], "State Changing");
        assert_eq!(extract_agency(&p), AgencyLevel::StateChanging);
    }

    #[test]
    fn test_critical_tool_name_overrides_state_changing() {
        let p = profile(
            vec![
                detailed("file_write", "write"),
                detailed("Self-Replicator", "read"),
            ],
            "",
        );
        assert_eq!(extract_agency(&p), AgencyLevel::Critical);

        let p = profile(vec![ToolEntry::PlainName("critical-infra_ctl".into())], "");
        assert_eq!(extract_agency(&p), AgencyLevel::Critical);
    }

    #[test]
    fn test_dangerous_scope_is_critical() {
        let p = profile(vec![ToolEntry::PlainName("search".into())], "Dangerous ops");
        assert_eq!(extract_agency(&p), AgencyLevel::Critical);
    }

    #[test]
    fn test_scores_are_monotonic() {
        let levels = [
            AgencyLevel::NoTools,
            AgencyLevel::ReadOnly,
            AgencyLevel::StateChanging,
            AgencyLevel::Critical,
        ];
        let scores: Vec<u8> = levels.iter().map(|l| l.score()).collect();
        assert_eq!(scores, vec![1, 2, 4, 6]);
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }
}
