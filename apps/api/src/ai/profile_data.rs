//! User profile extracted from free text. Separate from `ResumeData`: a profile
//! describes the person (about, goals, social links), not one application.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::ai::resume_data::{null_as_default, LanguageData, SkillData};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileData {
    #[serde(alias = "full_name", deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "lenient_gender", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(deserialize_with = "null_as_default")]
    pub about: String,
    #[serde(deserialize_with = "null_as_default")]
    pub contact: ProfileContact,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<SkillData>,
    #[serde(deserialize_with = "null_as_default")]
    pub hobbies: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<LanguageData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<String>,
    #[serde(alias = "social_presence", deserialize_with = "null_as_default")]
    pub social_presence: Vec<SocialLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLink {
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

/// Unknown or missing values are dropped instead of failing the whole profile.
fn lenient_gender<'de, D>(deserializer: D) -> Result<Option<Gender>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        },
        _ => None,
    })
}

impl ProfileData {
    /// The fields every profile answer must carry.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("fullName");
        }
        if self.about.trim().is_empty() {
            missing.push("about");
        }
        missing
    }
}

/// JSON schema handed to the provider for profile extraction.
pub fn profile_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "fullName": {"type": "string", "description": "First and last name. If not given, invent a realistic one."},
            "gender": {"type": "string", "enum": ["male", "female", "other"], "description": "Only if it can be inferred from context."},
            "about": {"type": "string", "description": "2-3 sentences about the user's work, interests and goals."},
            "contact": {
                "type": "object",
                "properties": {
                    "email": {"type": "string"},
                    "phone": {"type": "string", "description": "International format, if given."},
                    "location": {"type": "string", "description": "City or country of residence."},
                    "linkedin": {"type": "string"},
                    "github": {"type": "string", "description": "Only for developers."},
                    "website": {"type": "string", "description": "Personal site or portfolio."}
                }
            },
            "skills": {
                "type": "array",
                "description": "Key skills with proficiency level (1-5).",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "level": {"type": "number", "minimum": 1, "maximum": 5},
                        "category": {"type": "string", "description": "e.g. Technical, Communication."}
                    },
                    "required": ["name", "level"]
                }
            },
            "hobbies": {"type": "array", "items": {"type": "string"}},
            "languages": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "level": {"type": "string", "description": "e.g. A2, B1, C1."}
                    },
                    "required": ["name"]
                }
            },
            "goals": {"type": "string", "description": "Professional or personal goals (optional)."},
            "socialPresence": {
                "type": "array",
                "description": "Social network links (Instagram, Twitter, Telegram, ...).",
                "items": {
                    "type": "object",
                    "properties": {
                        "platform": {"type": "string"},
                        "url": {"type": "string"}
                    }
                }
            }
        },
        "required": ["fullName", "about", "skills"]
    })
}
