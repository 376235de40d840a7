pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ai::handlers as ai;
use crate::render::handlers as cv;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Rendering API
        .route("/api/v1/themes", get(cv::handle_list_themes))
        .route("/api/v1/cv/pdf", post(cv::handle_pdf))
        .route("/api/v1/cv/preview", post(cv::handle_preview))
        .route(
            "/api/v1/cv/image-pdf",
            post(cv::handle_image_pdf).layer(DefaultBodyLimit::max(cv::MAX_IMAGE_BYTES)),
        )
        // AI API
        .route("/api/v1/ai/parse", post(ai::handle_parse))
        .route("/api/v1/ai/markdown", post(ai::handle_markdown))
        .route("/api/v1/ai/optimize", post(ai::handle_optimize))
        .route("/api/v1/ai/ats-score", post(ai::handle_ats_score))
        .route("/api/v1/ai/benchmark", post(ai::handle_benchmark))
        .route("/api/v1/ai/profile", post(ai::handle_profile))
        // Resume API
        .route(
            "/api/v1/resumes",
            post(resumes::handle_create_resume).get(resumes::handle_list_resumes),
        )
        .route("/api/v1/resumes/:id", get(resumes::handle_get_resume))
        .with_state(state)
}
