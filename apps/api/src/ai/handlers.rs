//! Axum route handlers for the résumé AI API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::ai::profile_data::ProfileData;
use crate::ai::resume_data::{BenchmarkReport, ResumeData};
use crate::ai::service::{
    analyze_and_optimize, ats_feedback, benchmark_against_top, generate_markdown, parse_profile,
    parse_raw_text, JobAnalysis,
};
use crate::errors::AppError;
use crate::state::AppState;

pub const DEFAULT_LANGUAGE: &str = "en";

pub fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    #[serde(alias = "raw_text")]
    pub raw_text: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct MarkdownRequest {
    pub resume: ResumeData,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct MarkdownResponse {
    pub markdown: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub resume: ResumeData,
    #[serde(alias = "job_description")]
    pub job_description: String,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct AtsResponse {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkRequest {
    pub resume: ResumeData,
    #[serde(alias = "target_role")]
    pub target_role: String,
    #[serde(default = "default_language")]
    pub language: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ai/parse
///
/// Structures free-form text into résumé data.
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ResumeData>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("rawText cannot be empty".to_string()));
    }
    let data = parse_raw_text(state.llm.as_ref(), &request.raw_text, &request.language).await?;
    Ok(Json(data))
}

/// POST /api/v1/ai/profile
///
/// Builds a user profile (not a résumé) from free-form text.
pub async fn handle_profile(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ProfileData>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("rawText cannot be empty".to_string()));
    }
    let profile = parse_profile(state.llm.as_ref(), &request.raw_text, &request.language).await?;
    Ok(Json(profile))
}

/// POST /api/v1/ai/markdown
pub async fn handle_markdown(
    State(state): State<AppState>,
    Json(request): Json<MarkdownRequest>,
) -> Result<Json<MarkdownResponse>, AppError> {
    require_resume(&request.resume)?;
    let markdown = generate_markdown(state.llm.as_ref(), &request.resume, &request.language).await?;
    Ok(Json(MarkdownResponse { markdown }))
}

/// POST /api/v1/ai/optimize
///
/// ATS feedback and an optimized résumé for one job posting, computed concurrently.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<JobRequest>,
) -> Result<Json<JobAnalysis>, AppError> {
    validate_job_request(&request)?;
    let analysis = analyze_and_optimize(
        state.llm.as_ref(),
        &request.resume,
        &request.job_description,
        &request.language,
    )
    .await?;
    Ok(Json(analysis))
}

/// POST /api/v1/ai/ats-score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(request): Json<JobRequest>,
) -> Result<Json<AtsResponse>, AppError> {
    validate_job_request(&request)?;
    let feedback = ats_feedback(
        state.llm.as_ref(),
        &request.resume,
        &request.job_description,
        &request.language,
    )
    .await?;
    Ok(Json(AtsResponse { feedback }))
}

/// POST /api/v1/ai/benchmark
pub async fn handle_benchmark(
    State(state): State<AppState>,
    Json(request): Json<BenchmarkRequest>,
) -> Result<Json<BenchmarkReport>, AppError> {
    require_resume(&request.resume)?;
    if request.target_role.trim().is_empty() {
        return Err(AppError::Validation("targetRole cannot be empty".to_string()));
    }
    let report = benchmark_against_top(
        state.llm.as_ref(),
        &request.resume,
        &request.target_role,
        &request.language,
    )
    .await?;
    Ok(Json(report))
}

pub(crate) fn require_resume(resume: &ResumeData) -> Result<(), AppError> {
    if resume.is_blank() {
        return Err(AppError::Validation("resume cannot be empty".to_string()));
    }
    Ok(())
}

fn validate_job_request(request: &JobRequest) -> Result<(), AppError> {
    require_resume(&request.resume)?;
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    Ok(())
}
