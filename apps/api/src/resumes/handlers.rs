//! Axum route handlers for stored résumés.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::FullResume;
use crate::resumes::create::{create_full_resume, validate_create_request, CreateResumeRequest};
use crate::resumes::query::{get_resume, list_resumes};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeResponse {
    pub resume_id: Uuid,
}

/// POST /api/v1/resumes?user_id=
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<CreateResumeResponse>), AppError> {
    let problems = validate_create_request(&request);
    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join("; ")));
    }

    let resume_id = create_full_resume(&state.db, params.user_id, &request)
        .await
        .map_err(AppError::Internal)?;

    Ok((StatusCode::CREATED, Json(CreateResumeResponse { resume_id })))
}

/// GET /api/v1/resumes?user_id=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<FullResume>>, AppError> {
    let resumes = list_resumes(&state.db, params.user_id)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(resumes))
}

/// GET /api/v1/resumes/:id?user_id=
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<FullResume>, AppError> {
    get_resume(&state.db, resume_id, params.user_id)
        .await
        .map_err(AppError::Internal)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}
