//! Endpoint handlers.

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use abom_core::{
    emit_assessment_scored, emit_override_fired, AbomDocument, AssessmentSpan, RiskAssessment,
    RiskReport, RiskResponse, METRICS, REPORT_FILENAME,
};

use super::error::ApiError;
use super::AppState;

/// Multipart field carrying the ABOM document.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

/// `GET /`: liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "ABOM Risk Scoring Engine API",
        status: "running",
        version: abom_core::VERSION,
    })
}

/// `POST /api/calculate-risk`: score an uploaded ABOM document.
pub async fn calculate_risk(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RiskResponse>, ApiError> {
    let bytes = read_upload(multipart).await?;
    let (_, assessment) = assess(&state, &bytes, "calculate-risk")
        .map_err(|e| ApiError::from_abom(e, "Error processing file"))?;
    Ok(Json(assessment.response()))
}

/// `POST /api/download-report`: score and return the full report as an attachment.
pub async fn download_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = read_upload(multipart).await?;
    let context = "Error generating report";
    let (document, assessment) =
        assess(&state, &bytes, "download-report").map_err(|e| ApiError::from_abom(e, context))?;
    let report = RiskReport::build(&document, &assessment, state.scorer.config(), Utc::now())
        .map_err(|e| ApiError::from_abom(e, context))?;

    let disposition = format!("attachment; filename={REPORT_FILENAME}");
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(report)))
}

/// Pull the `file` field out of the multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<Bytes, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            return Ok(field.bytes().await?);
        }
    }
    Err(ApiError::BadRequest(format!(
        "Missing '{UPLOAD_FIELD}' upload field"
    )))
}

/// Score synchronously inside an assessment span.
fn assess(
    state: &AppState,
    bytes: &[u8],
    endpoint: &str,
) -> abom_core::Result<(AbomDocument, RiskAssessment)> {
    let _span = AssessmentSpan::enter(endpoint);
    let (document, assessment) = state.scorer.assess_bytes(bytes)?;

    emit_assessment_scored(&assessment);
    for fired in &assessment.overrides {
        emit_override_fired(fired);
    }
    METRICS.record_assessment(&assessment);

    Ok((document, assessment))
}
