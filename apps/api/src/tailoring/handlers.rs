//! Axum route handlers for the Tailoring API.
//!
//! Every request builds a fresh `TailorRequest`; nothing survives between
//! requests. A missing credential field is filled from the server's default
//! credential, if one is configured, before the pipeline sees it.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppJson, ErrorBody};
use crate::models::{AnalysisReport, Credential, JobDescription, ResumeText, TailoredResume};
use crate::state::AppState;
use crate::tailoring::download::DownloadArtifact;
use crate::tailoring::pipeline::{AnalysisOutcome, TailorOutcome, TailorRequest};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Absent text fields deserialize as empty so they are reported by the
/// pipeline's own validation rather than rejected as malformed JSON.
#[derive(Debug, Deserialize)]
pub struct TailorBody {
    #[serde(default)]
    pub credential: Credential,
    #[serde(default)]
    pub resume: ResumeText,
    #[serde(default)]
    pub job_description: JobDescription,
    #[serde(default)]
    pub include_analysis: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisBody {
    #[serde(default)]
    pub credential: Credential,
    #[serde(default)]
    pub resume: ResumeText,
    #[serde(default)]
    pub job_description: JobDescription,
    #[serde(default)]
    pub tailored_resume: TailoredResume,
}

#[derive(Debug, Deserialize)]
pub struct DownloadBody {
    pub tailored_resume: TailoredResume,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisView {
    Succeeded { report: AnalysisReport },
    Failed { error: ErrorBody },
}

impl From<AnalysisOutcome> for AnalysisView {
    fn from(outcome: AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::Succeeded(report) => AnalysisView::Succeeded { report },
            AnalysisOutcome::Failed(err) => AnalysisView::Failed {
                error: ErrorBody::from(&err),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub run_id: Uuid,
    pub tailored_resume: TailoredResume,
    pub download: DownloadArtifact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisView>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub report: AnalysisReport,
}

fn tailor_request(
    state: &AppState,
    credential: Credential,
    resume: ResumeText,
    job_description: JobDescription,
) -> TailorRequest {
    TailorRequest {
        credential: credential.or_default_from(state.config.default_credential.as_ref()),
        resume,
        job_description,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/tailor
///
/// Tailors the resume. With `include_analysis`, also runs the comparison
/// analysis once tailoring has succeeded; an analysis failure is reported in
/// the `analysis` field and the tailored resume is still returned.
pub async fn handle_tailor(
    State(state): State<AppState>,
    AppJson(body): AppJson<TailorBody>,
) -> Result<Json<TailorResponse>, AppError> {
    let include_analysis = body.include_analysis;
    let request = tailor_request(&state, body.credential, body.resume, body.job_description);

    let session = match state.pipeline.run(request).await {
        TailorOutcome::Succeeded(session) => session,
        TailorOutcome::Failed(err) => return Err(err.into()),
    };

    let analysis = if include_analysis {
        Some(AnalysisView::from(state.pipeline.analyze(&session).await))
    } else {
        None
    };

    Ok(Json(TailorResponse {
        run_id: session.run_id(),
        download: session.download(),
        tailored_resume: session.tailored().clone(),
        analysis,
    }))
}

/// POST /api/v1/tailor/analysis
///
/// Second, caller-initiated action: analyzes a tailored resume returned by an
/// earlier call to `/api/v1/tailor`.
pub async fn handle_analysis(
    State(state): State<AppState>,
    AppJson(body): AppJson<AnalysisBody>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let request = tailor_request(&state, body.credential, body.resume, body.job_description);
    let session = state
        .pipeline
        .resume_session(request, body.tailored_resume)?;

    if session.tailored().is_empty() {
        return Err(AppError::Validation(
            "tailored_resume cannot be empty".to_string(),
        ));
    }

    match state.pipeline.analyze(&session).await {
        AnalysisOutcome::Succeeded(report) => Ok(Json(AnalysisResponse { report })),
        AnalysisOutcome::Failed(err) => Err(err.into()),
    }
}

/// POST /api/v1/tailor/download
///
/// Returns the tailored resume as a plain-text attachment, unchanged.
pub async fn handle_download(
    AppJson(body): AppJson<DownloadBody>,
) -> Result<Response, AppError> {
    let artifact = DownloadArtifact::from_tailored(&body.tailored_resume);
    let content_type = format!("{}; charset=utf-8", artifact.content_type);
    let disposition = artifact.content_disposition();

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.body,
    )
        .into_response())
}
