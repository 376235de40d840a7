// All LLM prompt constants for the résumé AI operations.
// The output language is named by the provider from the request; prompts here
// only describe the task.

use crate::render::contacts::ContactKind;
use crate::render::Vocabulary;

pub const PARSE_SYSTEM: &str = "You are a career growth expert and high-precision resume parser. \
    Extract all data from the user's text and present it as JSON, strictly following the schema. \
    If the summary, hobbies or languages are missing, infer realistic values from the rest of the text.";

/// Replace `{raw_text}` before sending.
pub const PARSE_PROMPT_TEMPLATE: &str = "Extract and complete resume data from the following text.\n\n---\n\n{raw_text}";

pub const PROFILE_SYSTEM: &str = "You are a career assistant and self-presentation expert. \
    Extract or complete the user's profile from their text or conversation and present it as JSON, \
    strictly following the schema. If some data is missing, carefully invent realistic values \
    (name, short bio, city, skills, interests).";

/// Replace `{raw_text}` before sending.
pub const PROFILE_PROMPT_TEMPLATE: &str = "Create a user profile from this text.\n\n---\n\n{raw_text}";

pub const MARKDOWN_SYSTEM: &str = "You are a professional recruiter and resume writer with 10 years of experience, \
    specializing in results-oriented resumes. Create a high-quality, structured resume in Markdown \
    from the provided JSON data.\n\n\
    RULES:\n\
    1. If achievements look sparse, strengthen them with measurable, results-oriented wording typical for the role.\n\
    2. Start each achievement bullet with a strong action verb.\n\
    3. Use only standard Markdown. Do not wrap the answer in code fences.";

pub const OPTIMIZE_SYSTEM: &str = "You are a career strategist specializing in ATS optimization. \
    Rewrite and strengthen the provided JSON resume to maximize alignment with the job posting.\n\n\
    OPTIMIZATION RULES:\n\
    1. Preserve facts: do not change workplaces, dates or names. Change only wording.\n\
    2. Incorporate key terms, skills and requirements from the posting into the summary, experience descriptions and skills.\n\
    3. Achievements use action verbs and metrics that address the job requirements.\n\
    4. Rewrite the summary to address the core requirements immediately.";

/// Replace `{resume_json}` and `{job_description}` before sending.
pub const OPTIMIZE_PROMPT_TEMPLATE: &str = "--- CURRENT USER RESUME ---\n{resume_json}\n\n\
    --- JOB REQUIREMENTS ---\n{job_description}\n\n\
    Rewrite the summary, the experience descriptions and the skills for maximum fit with this posting.";

pub const ATS_SYSTEM: &str = "You are an ATS (Applicant Tracking System) simulator and career consultant. \
    Evaluate the resume against the job posting, assign an estimated ATS score (0-100) and give three \
    specific, concise improvement tips.\n\n\
    OUTPUT FORMAT (Markdown, strict): start with an H2 header. Then an H3 line with the score in bold \
    (e.g. **73/100**). Then the improvement tips as a numbered list. Output only the Markdown.";

/// Replace `{job_description}` and `{resume_json}` before sending.
pub const ATS_PROMPT_TEMPLATE: &str = "Analyze how well the following resume matches the job requirements.\n\n\
    --- JOB POSTING ---\n{job_description}\n\n--- RESUME ---\n{resume_json}";

/// Replace `{target_role}` before sending.
pub const BENCHMARK_SYSTEM_TEMPLATE: &str = "You are a professional career analyst and resume expert. \
    Compare the provided resume with the most successful resumes for the \"{target_role}\" position.\n\n\
    In benchmarkSummary give: the overall fit as a percentage, concrete improvement recommendations, \
    and the skills or sections to add to approach top candidates. In idealResume give an example of an \
    ideal resume for this position.";

/// Replace `{resume_json}` before sending.
pub const BENCHMARK_PROMPT_TEMPLATE: &str = "Here is the candidate's current resume:\n\n{resume_json}";

/// Describes the exact markdown layout the section router understands.
pub fn markdown_structure(vocabulary: &Vocabulary) -> String {
    let labels = vocabulary
        .contact_labels
        .iter()
        .filter(|(kind, _)| *kind != ContactKind::Unrecognized)
        .map(|(_, label)| format!("{label} <value>"))
        .collect::<Vec<_>>()
        .join("\n");
    let (contacts, sections) = vocabulary
        .outline
        .split_first()
        .map(|(first, rest)| (*first, rest))
        .unwrap_or((vocabulary.contacts_heading, &[]));
    let sections = sections
        .iter()
        .map(|heading| format!("## {heading}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "MARKDOWN STRUCTURE (MANDATORY, headings verbatim):\n\
         1. First line: `# <Full Name> — <Title>` (H1).\n\
         2. Then `## {contacts}` followed by one contact per line, only for known values, \
         each line ending with two spaces:\n{labels}\n\
         3. Then these H2 sections in this order, omitting ones without data:\n{sections}\n\
         4. Each work experience is a block with role, company and dates followed by a bulleted list of achievements.\n\
         5. Skills are a bulleted list grouped by category.\n\
         Start immediately with the H1 line."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::vocabulary::{ENGLISH, RUSSIAN};

    #[test]
    fn test_structure_lists_localized_headings_and_labels() {
        let english = markdown_structure(&ENGLISH);
        assert!(english.contains("## Contacts"));
        assert!(english.contains("## Work Experience"));
        assert!(english.contains("Email: <value>"));

        let russian = markdown_structure(&RUSSIAN);
        assert!(russian.contains("## Контакты"));
        assert!(russian.contains("## Опыт работы"));
        assert!(russian.contains("Телефон: <value>"));
    }

    #[test]
    fn test_structure_headings_route_back() {
        // Every prescribed heading must be recognized by the router.
        for vocabulary in [&ENGLISH, &RUSSIAN] {
            for heading in vocabulary.outline {
                assert!(
                    vocabulary
                        .classify_heading(&heading.to_lowercase())
                        .is_some(),
                    "{heading} is not routable"
                );
            }
        }
    }
}
