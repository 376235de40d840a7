//! Axum route handlers for rendering résumés.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::ai::handlers::{default_language, require_resume};
use crate::ai::resume_data::ResumeData;
use crate::ai::service::generate_markdown;
use crate::errors::AppError;
use crate::render::image::sniff_image;
use crate::render::Vocabulary;
use crate::state::AppState;

/// Upload cap for `/cv/image-pdf`.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "file";

const PDF_HEADERS: [(header::HeaderName, &str); 2] = [
    (header::CONTENT_TYPE, "application/pdf"),
    (
        header::CONTENT_DISPOSITION,
        "attachment; filename=\"resume.pdf\"",
    ),
];

#[derive(Debug, Deserialize)]
pub struct CvRequest {
    /// Ready markdown. Mutually exclusive with `resume`.
    #[serde(default)]
    pub markdown: Option<String>,
    /// Structured data; markdown is generated from it first.
    #[serde(default)]
    pub resume: Option<ResumeData>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

#[derive(Debug, Serialize)]
pub struct ThemesResponse {
    pub themes: Vec<String>,
    pub default: String,
}

/// POST /api/v1/cv/pdf
pub async fn handle_pdf(
    State(state): State<AppState>,
    Json(request): Json<CvRequest>,
) -> Result<impl IntoResponse, AppError> {
    let markdown = resolve_markdown(&state, &request).await?;
    let vocabulary = Vocabulary::for_language(&request.language);
    let pdf = state
        .renderer
        .render_pdf(markdown, request.theme.as_deref(), vocabulary)
        .await?;

    Ok((PDF_HEADERS, Bytes::from(pdf)))
}

/// POST /api/v1/cv/image-pdf
///
/// Exports an uploaded PNG/JPEG résumé snapshot as a one-page PDF of the image's size.
pub async fn handle_image_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some(IMAGE_FIELD) {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            image = Some(data);
            break;
        }
    }

    let image = image
        .filter(|data| !data.is_empty())
        .ok_or_else(|| AppError::Validation(format!("an image is required in field '{IMAGE_FIELD}'")))?;
    let info = sniff_image(&image).ok_or_else(|| {
        AppError::Validation("unsupported image format (expected PNG or JPEG)".to_string())
    })?;

    let pdf = state.renderer.render_image_pdf(&image, info).await?;
    Ok((PDF_HEADERS, Bytes::from(pdf)))
}

/// POST /api/v1/cv/preview
///
/// The exact HTML document the PDF would be printed from.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<CvRequest>,
) -> Result<Html<String>, AppError> {
    let markdown = resolve_markdown(&state, &request).await?;
    let vocabulary = Vocabulary::for_language(&request.language);
    let html = state
        .renderer
        .compose(markdown, request.theme.as_deref(), vocabulary)
        .await?;
    Ok(Html(html))
}

/// GET /api/v1/themes
pub async fn handle_list_themes(State(state): State<AppState>) -> Json<ThemesResponse> {
    let themes = state.renderer.themes();
    Json(ThemesResponse {
        themes: themes.available(),
        default: themes.default_theme().to_string(),
    })
}

/// Exactly one of `markdown` / `resume` must be given and non-empty.
async fn resolve_markdown(state: &AppState, request: &CvRequest) -> Result<String, AppError> {
    match (&request.markdown, &request.resume) {
        (Some(markdown), None) => {
            if markdown.trim().is_empty() {
                return Err(AppError::Validation("markdown cannot be empty".to_string()));
            }
            Ok(markdown.clone())
        }
        (None, Some(resume)) => {
            require_resume(resume)?;
            generate_markdown(state.llm.as_ref(), resume, &request.language).await
        }
        (Some(_), Some(_)) => Err(AppError::Validation(
            "provide either markdown or resume, not both".to_string(),
        )),
        (None, None) => Err(AppError::Validation(
            "one of markdown or resume is required".to_string(),
        )),
    }
}
