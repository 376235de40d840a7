// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Languages the assistant is asked to write in, keyed by ISO 639-1 code.
const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("ru", "Russian"),
    ("az", "Azerbaijani"),
    ("en", "English"),
    ("tr", "Turkish"),
    ("de", "German"),
    ("fr", "French"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ar", "Arabic"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
];

/// English name of a language code, for use inside prompts. Unknown codes → English.
pub fn language_name_english(code: &str) -> &'static str {
    let code = code.trim().to_ascii_lowercase();
    LANGUAGE_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or("English")
}

/// Instruction naming the output language, appended to every résumé prompt.
pub fn language_instruction(code: &str) -> String {
    format!(
        "Write all human-readable text in {}. Keep JSON keys in English.",
        language_name_english(code)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_codes() {
        assert_eq!(language_name_english("ru"), "Russian");
        assert_eq!(language_name_english("AZ"), "Azerbaijani");
        assert_eq!(language_name_english(" ko "), "Korean");
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(language_name_english("xx"), "English");
        assert_eq!(language_name_english(""), "English");
    }

    #[test]
    fn test_language_instruction_names_language() {
        assert!(language_instruction("de").contains("German"));
    }
}
