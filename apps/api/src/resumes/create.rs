//! Creating a full résumé: request validation and the transactional write.

use anyhow::Result;
use serde::Deserialize;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::ai::resume_data::ContactInfo;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub contact: Option<ContactInfo>,
    #[serde(default)]
    pub hobbies: Vec<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub experience: Vec<NewExperience>,
    #[serde(default)]
    pub education: Vec<NewEducation>,
    #[serde(default)]
    pub skills: Vec<NewSkill>,
    #[serde(default)]
    pub languages: Vec<NewLanguage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(alias = "start_date")]
    pub start_date: String,
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
    /// Defaults to the item's index in the request.
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEducation {
    pub institution: String,
    pub degree: String,
    #[serde(alias = "field_of_study")]
    pub field_of_study: String,
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSkill {
    pub category: String,
    pub name: String,
    pub level: i16,
    #[serde(default)]
    pub position: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLanguage {
    pub name: String,
    pub level: String,
    #[serde(default)]
    pub position: Option<i32>,
}

/// Returns every rule the request breaks; empty means valid.
pub fn validate_create_request(request: &CreateResumeRequest) -> Vec<String> {
    let mut problems = Vec::new();
    let blank = |s: &str| s.trim().is_empty();

    if blank(&request.title) {
        problems.push("title cannot be empty".to_string());
    }
    for (i, exp) in request.experience.iter().enumerate() {
        if blank(&exp.company) {
            problems.push(format!("experience[{i}].company cannot be empty"));
        }
        if blank(&exp.title) {
            problems.push(format!("experience[{i}].title cannot be empty"));
        }
        if blank(&exp.start_date) {
            problems.push(format!("experience[{i}].startDate cannot be empty"));
        }
    }
    for (i, edu) in request.education.iter().enumerate() {
        if blank(&edu.institution) {
            problems.push(format!("education[{i}].institution cannot be empty"));
        }
        if blank(&edu.degree) {
            problems.push(format!("education[{i}].degree cannot be empty"));
        }
        if blank(&edu.field_of_study) {
            problems.push(format!("education[{i}].fieldOfStudy cannot be empty"));
        }
    }
    for (i, skill) in request.skills.iter().enumerate() {
        if blank(&skill.name) {
            problems.push(format!("skills[{i}].name cannot be empty"));
        }
        if !(1..=5).contains(&skill.level) {
            problems.push(format!("skills[{i}].level must be between 1 and 5"));
        }
    }
    for (i, lang) in request.languages.iter().enumerate() {
        if blank(&lang.name) {
            problems.push(format!("languages[{i}].name cannot be empty"));
        }
        if blank(&lang.level) {
            problems.push(format!("languages[{i}].level cannot be empty"));
        }
    }
    problems
}

fn position(explicit: Option<i32>, index: usize) -> i32 {
    explicit.unwrap_or(index as i32)
}

/// Writes the résumé and all of its sections in one transaction.
/// Any failed insert rolls the whole résumé back.
pub async fn create_full_resume(
    pool: &PgPool,
    user_id: Uuid,
    request: &CreateResumeRequest,
) -> Result<Uuid> {
    let mut tx = pool.begin().await?;
    let resume_id = Uuid::new_v4();

    // Callers are identified by id only; make sure the owner row exists.
    sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let contact = request
        .contact
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    sqlx::query(
        r#"
        INSERT INTO resumes (id, user_id, title, summary, contact, hobbies, theme)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(resume_id)
    .bind(user_id)
    .bind(request.title.trim())
    .bind(&request.summary)
    .bind(&contact)
    .bind(&request.hobbies)
    .bind(&request.theme)
    .execute(&mut *tx)
    .await?;

    insert_sections(&mut tx, resume_id, request).await?;

    tx.commit().await?;

    info!(
        "Created resume {resume_id} for user {user_id}: {} experience, {} education, {} skills, {} languages",
        request.experience.len(),
        request.education.len(),
        request.skills.len(),
        request.languages.len()
    );
    Ok(resume_id)
}

async fn insert_sections(
    tx: &mut Transaction<'_, Postgres>,
    resume_id: Uuid,
    request: &CreateResumeRequest,
) -> Result<()> {
    for (i, exp) in request.experience.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO experiences
                (id, resume_id, company, title, location, start_date, end_date, description, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(resume_id)
        .bind(&exp.company)
        .bind(&exp.title)
        .bind(&exp.location)
        .bind(&exp.start_date)
        .bind(&exp.end_date)
        .bind(&exp.description)
        .bind(position(exp.position, i))
        .execute(&mut **tx)
        .await?;
    }

    for (i, edu) in request.education.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO educations
                (id, resume_id, institution, degree, field_of_study, start_date, end_date, position)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(resume_id)
        .bind(&edu.institution)
        .bind(&edu.degree)
        .bind(&edu.field_of_study)
        .bind(&edu.start_date)
        .bind(&edu.end_date)
        .bind(position(edu.position, i))
        .execute(&mut **tx)
        .await?;
    }

    for (i, skill) in request.skills.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO skills (id, resume_id, category, name, level, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(resume_id)
        .bind(&skill.category)
        .bind(&skill.name)
        .bind(skill.level)
        .bind(position(skill.position, i))
        .execute(&mut **tx)
        .await?;
    }

    for (i, lang) in request.languages.iter().enumerate() {
        sqlx::query(
            "INSERT INTO languages (id, resume_id, name, level, position) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(resume_id)
        .bind(&lang.name)
        .bind(&lang.level)
        .bind(position(lang.position, i))
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
