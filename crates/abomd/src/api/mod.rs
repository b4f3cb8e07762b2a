//! HTTP adapter around [`abom_core::RiskScorer`].

pub mod error;
pub mod handlers;
pub mod router;

use std::sync::Arc;

use abom_core::RiskScorer;

/// State shared by all handlers. The scorer is immutable, so no locking.
#[derive(Clone, Default)]
pub struct AppState {
    pub scorer: Arc<RiskScorer>,
}

impl AppState {
    pub fn new(scorer: RiskScorer) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }
}
