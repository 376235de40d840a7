//! Reading full résumés back: newest first, sections ordered by position.

use std::collections::HashMap;

use anyhow::Result;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::resume::{
    EducationRow, ExperienceRow, FullResume, LanguageRow, ResumeRow, SkillRow,
};

/// All résumés owned by a user, newest first.
pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<FullResume>> {
    let resumes = sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC, id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    attach_sections(pool, resumes).await
}

/// One résumé, only if it belongs to the user.
pub async fn get_resume(
    pool: &PgPool,
    resume_id: Uuid,
    user_id: Uuid,
) -> Result<Option<FullResume>> {
    let resume =
        sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    match resume {
        Some(resume) => Ok(attach_sections(pool, vec![resume]).await?.pop()),
        None => Ok(None),
    }
}

async fn attach_sections(pool: &PgPool, resumes: Vec<ResumeRow>) -> Result<Vec<FullResume>> {
    if resumes.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = resumes.iter().map(|r| r.id).collect();

    let experience = fetch_children::<ExperienceRow>(pool, "experiences", &ids).await?;
    let education = fetch_children::<EducationRow>(pool, "educations", &ids).await?;
    let skills = fetch_children::<SkillRow>(pool, "skills", &ids).await?;
    let languages = fetch_children::<LanguageRow>(pool, "languages", &ids).await?;

    let mut experience = by_resume(experience, |r| r.resume_id);
    let mut education = by_resume(education, |r| r.resume_id);
    let mut skills = by_resume(skills, |r| r.resume_id);
    let mut languages = by_resume(languages, |r| r.resume_id);

    Ok(resumes
        .into_iter()
        .map(|resume| FullResume {
            experience: experience.remove(&resume.id).unwrap_or_default(),
            education: education.remove(&resume.id).unwrap_or_default(),
            skills: skills.remove(&resume.id).unwrap_or_default(),
            languages: languages.remove(&resume.id).unwrap_or_default(),
            resume,
        })
        .collect())
}

/// `table` is always one of the fixed section table names above.
async fn fetch_children<T>(pool: &PgPool, table: &'static str, ids: &[Uuid]) -> Result<Vec<T>>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    let sql = format!("SELECT * FROM {table} WHERE resume_id = ANY($1) ORDER BY position, id");
    let rows = sqlx::query_as::<_, T>(&sql).bind(ids).fetch_all(pool).await?;
    Ok(rows)
}

/// Groups rows by résumé id, preserving their order.
fn by_resume<T>(rows: Vec<T>, key: impl Fn(&T) -> Uuid) -> HashMap<Uuid, Vec<T>> {
    let mut grouped: HashMap<Uuid, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(key(&row)).or_default().push(row);
    }
    grouped
}
