//! Résumé AI operations. Every call goes through a `TextGenerationProvider`;
//! empty or malformed provider output fails the operation.

use serde::Serialize;
use tracing::info;

use crate::ai::prompts::{
    markdown_structure, ATS_PROMPT_TEMPLATE, ATS_SYSTEM, BENCHMARK_PROMPT_TEMPLATE,
    BENCHMARK_SYSTEM_TEMPLATE, MARKDOWN_SYSTEM, OPTIMIZE_PROMPT_TEMPLATE, OPTIMIZE_SYSTEM,
    PARSE_PROMPT_TEMPLATE, PARSE_SYSTEM, PROFILE_PROMPT_TEMPLATE, PROFILE_SYSTEM,
};
use crate::ai::profile_data::{profile_schema, ProfileData};
use crate::ai::resume_data::{benchmark_schema, resume_schema, BenchmarkReport, ResumeData};
use crate::errors::AppError;
use crate::llm_client::{generate_json, GenerationRequest, LlmError, TextGenerationProvider};
use crate::render::Vocabulary;

const PARSE_TEMPERATURE: f32 = 0.3;
const PROFILE_TEMPERATURE: f32 = 0.3;
const MARKDOWN_TEMPERATURE: f32 = 0.4;
const OPTIMIZE_TEMPERATURE: f32 = 0.3;
const ATS_TEMPERATURE: f32 = 0.5;
const BENCHMARK_TEMPERATURE: f32 = 0.4;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysis {
    pub ats_feedback: String,
    pub optimized_resume: ResumeData,
}

/// Turns free-form text (a chat transcript, an old CV) into structured résumé data.
pub async fn parse_raw_text(
    provider: &dyn TextGenerationProvider,
    raw_text: &str,
    language: &str,
) -> Result<ResumeData, AppError> {
    let schema = resume_schema();
    let prompt = PARSE_PROMPT_TEMPLATE.replace("{raw_text}", raw_text);
    info!("Parsing raw resume text ({} chars, language={language})", raw_text.len());
    generate_json(
        provider,
        GenerationRequest {
            system: PARSE_SYSTEM,
            prompt: &prompt,
            schema: Some(&schema),
            language,
            temperature: PARSE_TEMPERATURE,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))
}

/// Writes a markdown résumé laid out with the headings the section router recognizes.
pub async fn generate_markdown(
    provider: &dyn TextGenerationProvider,
    resume: &ResumeData,
    language: &str,
) -> Result<String, AppError> {
    let vocabulary = Vocabulary::for_language(language);
    let system = format!("{MARKDOWN_SYSTEM}\n\n{}", markdown_structure(vocabulary));
    let prompt = format!(
        "Generate a Markdown resume using the following data:\n\n{}",
        to_pretty_json(resume)?
    );

    let text = provider
        .generate(GenerationRequest {
            system: &system,
            prompt: &prompt,
            schema: None,
            language,
            temperature: MARKDOWN_TEMPERATURE,
        })
        .await
        .map_err(|e| AppError::Llm(format!("Markdown generation failed: {e}")))?;

    let markdown = strip_markdown_fences(&text);
    if markdown.is_empty() {
        return Err(AppError::Llm(format!(
            "Markdown generation failed: {}",
            LlmError::EmptyContent
        )));
    }
    Ok(markdown.to_string())
}

/// Rewrites the résumé wording towards a job posting without changing facts.
pub async fn optimize_for_job(
    provider: &dyn TextGenerationProvider,
    resume: &ResumeData,
    job_description: &str,
    language: &str,
) -> Result<ResumeData, AppError> {
    let schema = resume_schema();
    let prompt = OPTIMIZE_PROMPT_TEMPLATE
        .replace("{resume_json}", &to_pretty_json(resume)?)
        .replace("{job_description}", job_description);
    generate_json(
        provider,
        GenerationRequest {
            system: OPTIMIZE_SYSTEM,
            prompt: &prompt,
            schema: Some(&schema),
            language,
            temperature: OPTIMIZE_TEMPERATURE,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("Job optimization failed: {e}")))
}

/// Markdown ATS score and improvement tips for a résumé against a job posting.
pub async fn ats_feedback(
    provider: &dyn TextGenerationProvider,
    resume: &ResumeData,
    job_description: &str,
    language: &str,
) -> Result<String, AppError> {
    let prompt = ATS_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{resume_json}", &to_pretty_json(resume)?);
    let text = provider
        .generate(GenerationRequest {
            system: ATS_SYSTEM,
            prompt: &prompt,
            schema: None,
            language,
            temperature: ATS_TEMPERATURE,
        })
        .await
        .map_err(|e| AppError::Llm(format!("ATS scoring failed: {e}")))?;

    let feedback = strip_markdown_fences(&text);
    if feedback.is_empty() {
        return Err(AppError::Llm(format!(
            "ATS scoring failed: {}",
            LlmError::EmptyContent
        )));
    }
    Ok(feedback.to_string())
}

/// Runs ATS scoring and job optimization concurrently. Fails if either fails.
pub async fn analyze_and_optimize(
    provider: &dyn TextGenerationProvider,
    resume: &ResumeData,
    job_description: &str,
    language: &str,
) -> Result<JobAnalysis, AppError> {
    let (ats_feedback, optimized_resume) = tokio::try_join!(
        ats_feedback(provider, resume, job_description, language),
        optimize_for_job(provider, resume, job_description, language),
    )?;
    Ok(JobAnalysis {
        ats_feedback,
        optimized_resume,
    })
}

/// Compares the résumé with top candidates for a role and proposes an ideal one.
pub async fn benchmark_against_top(
    provider: &dyn TextGenerationProvider,
    resume: &ResumeData,
    target_role: &str,
    language: &str,
) -> Result<BenchmarkReport, AppError> {
    let schema = benchmark_schema();
    let system = BENCHMARK_SYSTEM_TEMPLATE.replace("{target_role}", target_role);
    let prompt = BENCHMARK_PROMPT_TEMPLATE.replace("{resume_json}", &to_pretty_json(resume)?);
    let report: BenchmarkReport = generate_json(
        provider,
        GenerationRequest {
            system: &system,
            prompt: &prompt,
            schema: Some(&schema),
            language,
            temperature: BENCHMARK_TEMPERATURE,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("Benchmark analysis failed: {e}")))?;

    if report.benchmark_summary.trim().is_empty() {
        return Err(AppError::Llm(
            "Benchmark analysis failed: missing benchmarkSummary".to_string(),
        ));
    }
    Ok(report)
}

/// Builds a user profile from free text, filling gaps with plausible values.
pub async fn parse_profile(
    provider: &dyn TextGenerationProvider,
    raw_text: &str,
    language: &str,
) -> Result<ProfileData, AppError> {
    let schema = profile_schema();
    let prompt = PROFILE_PROMPT_TEMPLATE.replace("{raw_text}", raw_text);
    info!("Parsing profile text ({} chars, language={language})", raw_text.len());
    let profile: ProfileData = generate_json(
        provider,
        GenerationRequest {
            system: PROFILE_SYSTEM,
            prompt: &prompt,
            schema: Some(&schema),
            language,
            temperature: PROFILE_TEMPERATURE,
        },
    )
    .await
    .map_err(|e| AppError::Llm(format!("Profile parsing failed: {e}")))?;

    let missing = profile.missing_required();
    if !missing.is_empty() {
        return Err(AppError::Llm(format!(
            "Profile parsing failed: missing {}",
            missing.join(", ")
        )));
    }
    Ok(profile)
}

fn to_pretty_json(resume: &ResumeData) -> Result<String, AppError> {
    serde_json::to_string_pretty(resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))
}

/// Strips a ```markdown / ```md / ``` fence wrapped around the whole answer.
fn strip_markdown_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.trim_end().strip_suffix("```") else {
        return text;
    };
    // Drop the info string ("markdown", "md") on the opening fence line.
    match body.split_once('\n') {
        Some((info, inner)) if !info.trim().contains(' ') => inner.trim(),
        _ => body.trim(),
    }
}
