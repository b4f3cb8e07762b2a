//! Keyword vocabularies used by the extractors and override rules.
//!
//! Every list is matched after lower-casing. Lists consulted through
//! [`contains_any`] are additionally compared with `_` and `-` removed on
//! both sides, so `critical_infra` matches a tool named `CriticalInfra-Ctl`.

/// Permission values (exact) and tool-name fragments (substring) that mark a
/// tool as able to change external state.
pub const STATE_CHANGING: &[&str] = &[
    "write", "exec", "delete", "modify", "create", "update", "remove",
];

/// Tool-name fragments that mark a tool as a critical capability.
pub const CRITICAL_CAPABILITY: &[&str] = &[
    "replicat",
    "cbrn",
    "bioweapon",
    "nuclear",
    "weapon",
    "critical_infra",
];

/// Scope fragments that mark the whole profile as state-changing.
pub const STATE_CHANGING_SCOPES: &[&str] = &["state-changing", "state changing"];

/// Scope fragments that mark the whole profile as critical.
pub const CRITICAL_SCOPES: &[&str] = &["critical", "dangerous"];

/// Capability flags that force a Tier 4 classification.
pub const CRITICAL_FLAG_VOCABULARY: &[&str] = &[
    "self-replication",
    "self_replication",
    "autonomous_replication",
    "cbrn",
    "cbrn_access",
    "bioweapon",
    "chemical_weapon",
    "nuclear",
    "autonomous_weapons",
    "critical_infrastructure_control",
];

/// Memory types that mean the agent keeps nothing.
pub const NO_MEMORY_TYPES: &[&str] = &["none", "ephemeral", "temporary"];

pub const SHORT_RETENTION: &[&str] = &["session", "session-only", "temporary", "short"];

pub const LONG_RETENTION: &[&str] = &[
    "cross-session",
    "cross_session",
    "long-term",
    "long_term",
    "long",
    "permanent",
];

pub const LONG_MEMORY_TYPES: &[&str] = &[
    "long-term",
    "long_term",
    "long",
    "persistent",
    "vector-db",
    "vector_db",
];

pub const SESSION_MEMORY_TYPES: &[&str] = &["session", "temporary", "ephemeral"];

/// `sandbox_type` values that count as sandboxing.
pub const SANDBOX_TYPES: &[&str] = &["ephemeral", "isolated", "container", "vm"];

/// Orchestrator value that counts as MCP-style orchestration.
pub const MCP_ORCHESTRATOR: &str = "mcp";

/// Lower-case `raw` and drop `_` / `-` separators.
pub fn normalize_token(raw: &str) -> String {
    raw.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Returns `true` when the normalized `haystack` contains any normalized keyword.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    let haystack = normalize_token(haystack);
    keywords
        .iter()
        .map(|k| normalize_token(k))
        .any(|k| !k.is_empty() && haystack.contains(&k))
}

/// Case-insensitive exact membership.
pub fn is_one_of(value: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| value.eq_ignore_ascii_case(k))
}

/// Case-insensitive substring membership, separators kept.
pub fn mentions_any(haystack: &str, fragments: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    fragments.iter().any(|f| haystack.contains(f))
}
