//! Process-wide scoring counters.
//!
//! Handlers record each finished assessment and each rejected request here;
//! [`ScoringMetrics::flush`] writes the totals as one `info!` event on shutdown.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::scoring::{RiskAssessment, UartTier};

pub static METRICS: ScoringMetrics = ScoringMetrics::new();

const TIERS: usize = 5;

pub struct ScoringMetrics {
    by_tier: [AtomicU64; TIERS],
    overrides_fired: AtomicU64,
    client_rejections: AtomicU64,
    server_failures: AtomicU64,
}

impl Default for ScoringMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringMetrics {
    pub const fn new() -> Self {
        Self {
            by_tier: [
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
                AtomicU64::new(0),
            ],
            overrides_fired: AtomicU64::new(0),
            client_rejections: AtomicU64::new(0),
            server_failures: AtomicU64::new(0),
        }
    }

    /// Count one scored document under its final tier.
    pub fn record_assessment(&self, assessment: &RiskAssessment) {
        self.by_tier[usize::from(assessment.tier.number())].fetch_add(1, Ordering::Relaxed);
        self.overrides_fired
            .fetch_add(assessment.overrides.len() as u64, Ordering::Relaxed);
    }

    /// Count a rejected request by HTTP status class.
    pub fn record_rejection(&self, status: u16) {
        let counter = if status >= 500 {
            &self.server_failures
        } else {
            &self.client_rejections
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn assessed_in(&self, tier: UartTier) -> u64 {
        self.by_tier[usize::from(tier.number())].load(Ordering::Relaxed)
    }

    pub fn assessments_scored(&self) -> u64 {
        self.by_tier.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    pub fn overrides_fired(&self) -> u64 {
        self.overrides_fired.load(Ordering::Relaxed)
    }

    pub fn client_rejections(&self) -> u64 {
        self.client_rejections.load(Ordering::Relaxed)
    }

    pub fn server_failures(&self) -> u64 {
        self.server_failures.load(Ordering::Relaxed)
    }

    pub fn flush(&self) {
        tracing::info!(
            event = "metrics.flush",
            assessments_scored = self.assessments_scored(),
            tier0 = self.assessed_in(UartTier::Tier0),
            tier1 = self.assessed_in(UartTier::Tier1),
            tier2 = self.assessed_in(UartTier::Tier2),
            tier3 = self.assessed_in(UartTier::Tier3),
            tier4 = self.assessed_in(UartTier::Tier4),
            overrides_fired = self.overrides_fired(),
            client_rejections = self.client_rejections(),
            server_failures = self.server_failures(),
        );
    }
}
