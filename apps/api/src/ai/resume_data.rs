//! Structured résumé data exchanged with the text-generation provider and API callers.
//!
//! Field names are camelCase on the wire; snake_case spellings are accepted on input.
//! Missing or `null` fields deserialize to empty values so partial provider output is usable.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    #[serde(alias = "full_name", deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact: ContactInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<SkillData>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<ExperienceData>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<EducationData>,
    #[serde(deserialize_with = "null_as_default")]
    pub hobbies: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<LanguageData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillData {
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Proficiency 1..=5. Providers sometimes answer `4.0` or `"4"`.
    #[serde(deserialize_with = "lenient_level")]
    pub level: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceData {
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub location: Option<String>,
    #[serde(alias = "start_date", deserialize_with = "null_as_default")]
    pub start_date: String,
    /// `None` for the current position.
    #[serde(alias = "end_date")]
    pub end_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationData {
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(alias = "field_of_study", deserialize_with = "null_as_default")]
    pub field_of_study: String,
    #[serde(alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(alias = "end_date")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageData {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub level: String,
}

/// Result of comparing a résumé with the strongest candidates for a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BenchmarkReport {
    #[serde(deserialize_with = "null_as_default")]
    pub benchmark_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ideal_resume: ResumeData,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn lenient_level<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let level = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(level
        .filter(|l| l.is_finite())
        .map(|l| l.round().clamp(0.0, u8::MAX as f64) as u8))
}

impl ResumeData {
    /// True when nothing a résumé could be rendered from is present.
    pub fn is_blank(&self) -> bool {
        self.full_name.trim().is_empty()
            && self.title.trim().is_empty()
            && self.summary.trim().is_empty()
            && self.experience.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
    }
}

/// JSON schema handed to the provider in JSON mode.
pub fn resume_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "fullName": {"type": "string", "description": "Full name and surname."},
            "title": {"type": "string", "description": "Desired or current job title."},
            "summary": {"type": "string", "description": "Brief professional summary, 2-3 sentences."},
            "contact": {
                "type": "object",
                "properties": {
                    "phone": {"type": "string", "description": "Phone number in international format."},
                    "email": {"type": "string", "description": "Professional email address."},
                    "github": {"type": "string", "description": "GitHub profile link."},
                    "linkedin": {"type": "string", "description": "LinkedIn profile link."},
                    "location": {"type": "string", "description": "City/country of residence."}
                },
                "required": ["email"]
            },
            "skills": {
                "type": "array",
                "description": "Key skills grouped by category with proficiency level (1-5).",
                "items": {
                    "type": "object",
                    "properties": {
                        "category": {"type": "string"},
                        "name": {"type": "string"},
                        "level": {"type": "integer", "minimum": 1, "maximum": 5}
                    },
                    "required": ["category", "name", "level"]
                }
            },
            "experience": {
                "type": "array",
                "description": "Work experience, most recent first.",
                "items": {
                    "type": "object",
                    "properties": {
                        "company": {"type": "string"},
                        "title": {"type": "string"},
                        "location": {"type": "string"},
                        "startDate": {"type": "string", "description": "e.g. 2020-09-01"},
                        "endDate": {"type": ["string", "null"], "description": "null for the current position"},
                        "description": {
                            "type": "array",
                            "description": "3-5 achievements with action verbs and measurable results.",
                            "items": {"type": "string"}
                        }
                    },
                    "required": ["company", "title", "startDate", "description"]
                }
            },
            "education": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "institution": {"type": "string"},
                        "degree": {"type": "string"},
                        "fieldOfStudy": {"type": "string"},
                        "startDate": {"type": "string"},
                        "endDate": {"type": "string"}
                    },
                    "required": ["institution", "degree", "fieldOfStudy"]
                }
            },
            "hobbies": {"type": "array", "items": {"type": "string"}},
            "languages": {
                "type": "array",
                "description": "Languages with proficiency level (e.g. A1, B2, C1, Native).",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "level": {"type": "string"}
                    },
                    "required": ["name", "level"]
                }
            }
        },
        "required": ["fullName", "title", "contact", "skills", "experience", "summary"]
    })
}

/// Schema for `BenchmarkReport`: free-text analysis plus an ideal résumé.
pub fn benchmark_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "benchmarkSummary": {
                "type": "string",
                "description": "Fit assessment as a percentage, strengths, weaknesses and concrete recommendations."
            },
            "idealResume": resume_schema()
        },
        "required": ["benchmarkSummary", "idealResume"]
    })
}
