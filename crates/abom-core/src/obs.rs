//! Structured tracing hooks for the assessment lifecycle.
//!
//! Events are emitted at `info!` (rejections at `warn!`) and carry an
//! `event` field so they can be filtered in JSON log pipelines.

use tracing::{info, warn};
use uuid::Uuid;

use crate::scoring::RiskAssessment;

/// RAII guard that enters an assessment-scoped span.
///
/// ```ignore
/// let span = AssessmentSpan::enter("calculate-risk");
/// // every event below is tagged with assessment_id and endpoint
/// ```
pub struct AssessmentSpan {
    _span: tracing::span::EnteredSpan,
}

impl AssessmentSpan {
    pub fn enter(endpoint: &str) -> Self {
        let span = tracing::info_span!(
            "abom.assessment",
            assessment_id = %Uuid::new_v4(),
            endpoint = %endpoint,
        );
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a document was scored.
pub fn emit_assessment_scored(assessment: &RiskAssessment) {
    info!(
        event = "assessment.scored",
        agency = assessment.agency.score(),
        autonomy = %assessment.autonomy,
        persistence = assessment.persistence.score(),
        scaffolding_modifier = assessment.scaffolding_modifier,
        score = assessment.raw_score,
        base_tier = assessment.base_tier.number(),
        tier = assessment.tier.number(),
    );
}

/// Emit event: a Tier 4 override fired.
pub fn emit_override_fired(reason: &dyn std::fmt::Display) {
    info!(event = "assessment.override_fired", reason = %reason);
}

/// Emit event: a request was rejected before or during scoring.
pub fn emit_request_rejected(status: u16, error: &dyn std::fmt::Display) {
    warn!(event = "request.rejected", status = status, error = %error);
}

/// Emit event: the HTTP listener is accepting connections.
pub fn emit_server_started(addr: &dyn std::fmt::Display) {
    info!(event = "server.started", addr = %addr);
}
