use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub contact: Option<Value>,
    pub hobbies: Vec<String>,
    /// Theme id used when this résumé is rendered.
    pub theme: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub company: String,
    pub title: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub description: Vec<String>,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub category: String,
    pub name: String,
    /// 1..=5, enforced by a CHECK constraint.
    pub level: i16,
    pub position: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LanguageRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub name: String,
    pub level: String,
    pub position: i32,
}

/// A résumé with all of its sections, children ordered by `position`.
#[derive(Debug, Clone, Serialize)]
pub struct FullResume {
    #[serde(flatten)]
    pub resume: ResumeRow,
    pub experience: Vec<ExperienceRow>,
    pub education: Vec<EducationRow>,
    pub skills: Vec<SkillRow>,
    pub languages: Vec<LanguageRow>,
}
