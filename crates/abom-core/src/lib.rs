//! ABOM risk scoring engine.
//!
//! Maps an Agentic Bill of Materials record onto a bounded risk score
//! `R = A × U × e^P × S` and a UART tier (0–4). See [`scoring`] for the
//! pipeline and [`report`] for the downloadable report format.

pub mod config;
pub mod digest;
pub mod document;
pub mod error;
pub mod keywords;
pub mod metrics;
pub mod obs;
pub mod report;
pub mod scoring;
pub mod telemetry;

pub use config::{ScaffoldingWeights, ScoringConfig, TierThresholds};
pub use digest::{canonical_json, compute_digest};
pub use document::{
    AbomDocument, AgencyProfile, AutonomyLeash, ModelCore, PersistenceLayer,
    ScaffoldingInventory, ToolEntry,
};
pub use error::{AbomError, Result};
pub use metrics::METRICS;
pub use obs::{
    emit_assessment_scored, emit_override_fired, emit_request_rejected, emit_server_started,
    AssessmentSpan,
};
pub use report::{ReportAssessment, RiskReport, REPORT_FILENAME};
pub use scoring::{
    AgencyLevel, AutonomyMode, PersistenceLevel, RiskAssessment, RiskResponse, RiskScorer,
    Tier4Override, UartTier, FORMULA,
};
pub use telemetry::init_tracing;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
