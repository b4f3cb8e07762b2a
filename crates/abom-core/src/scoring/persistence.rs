//! Memory persistence extraction.

use serde::{Deserialize, Serialize};

use crate::document::PersistenceLayer;
use crate::keywords::{
    is_one_of, LONG_MEMORY_TYPES, LONG_RETENTION, NO_MEMORY_TYPES, SESSION_MEMORY_TYPES,
    SHORT_RETENTION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceLevel {
    Stateless,
    Session,
    Durable,
}

impl PersistenceLevel {
    /// Exponent applied in the risk formula.
    pub fn score(self) -> u8 {
        match self {
            Self::Stateless => 0,
            Self::Session => 1,
            Self::Durable => 2,
        }
    }
}

/// Classify a persistence layer.
///
/// A recognized `retention` wins over `memory_type`; `memory_type` is only
/// consulted on its own when retention is unrecognized.
pub fn extract_persistence(layer: &PersistenceLayer) -> PersistenceLevel {
    let memory_type = layer.memory_type.to_lowercase();
    let retention = layer.retention.to_lowercase();

    if memory_type.is_empty() || is_one_of(&memory_type, NO_MEMORY_TYPES) {
        return PersistenceLevel::Stateless;
    }
    if is_one_of(&retention, SHORT_RETENTION) {
        return PersistenceLevel::Session;
    }
    if is_one_of(&retention, LONG_RETENTION) {
        return PersistenceLevel::Durable;
    }

    if is_one_of(&memory_type, LONG_MEMORY_TYPES) {
        PersistenceLevel::Durable
    } else if is_one_of(&memory_type, SESSION_MEMORY_TYPES) {
        PersistenceLevel::Session
    } else {
        PersistenceLevel::Stateless
    }
}
