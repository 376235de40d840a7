/// LLM client: the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// All LLM interactions MUST go through `TextGenerationProvider`.
///
/// Model: gpt-4o-mini over the OpenAI-compatible chat completions API.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// The model used for all LLM calls.
pub const MODEL: &str = "gpt-4o-mini";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One text-generation call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    /// When present the provider must answer with a single JSON object matching it.
    pub schema: Option<&'a serde_json::Value>,
    /// ISO 639-1 code of the language all human-readable output must be written in.
    pub language: &'a str,
    pub temperature: f32,
}

/// Anything that turns a prompt into text. `LlmClient` in production, fakes in tests.
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, LlmError>;
}

/// Calls the provider in JSON mode and deserializes the answer.
/// Empty or malformed output is an error; nothing is substituted.
pub async fn generate_json<T: DeserializeOwned>(
    provider: &dyn TextGenerationProvider,
    request: GenerationRequest<'_>,
) -> Result<T, LlmError> {
    let text = provider.generate(request).await?;
    let text = strip_json_fences(&text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    serde_json::from_str(text).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the non-empty text of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The single LLM client used by all services.
/// Wraps the chat completions API with retry logic for transport-level failures.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Makes a raw chat completions call, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, request: GenerationRequest<'_>) -> Result<ChatResponse, LlmError> {
        let system = compose_system(&request)?;
        let request_body = ChatRequest {
            model: MODEL,
            temperature: request.temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            response_format: request.schema.map(|_| ResponseFormat {
                format_type: "json_object",
            }),
        };
        let url = format!("{}/chat/completions", self.base_url);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(chat_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextGenerationProvider for LlmClient {
    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Names the output language and, in JSON mode, appends the JSON-only instruction and schema.
fn compose_system(request: &GenerationRequest<'_>) -> Result<String, LlmError> {
    let mut system = format!(
        "{}\n\n{}",
        request.system,
        prompts::language_instruction(request.language)
    );
    if let Some(schema) = request.schema {
        system.push_str("\n\n");
        system.push_str(prompts::JSON_ONLY_SYSTEM);
        system.push_str("\n\nJSON schema:\n");
        system.push_str(&serde_json::to_string_pretty(schema)?);
    }
    Ok(system)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedPrompt {
        pub system: String,
        pub prompt: String,
        pub json_mode: bool,
        pub language: String,
    }

    /// Provider double that replays canned answers and records prompts.
    #[derive(Default)]
    pub(crate) struct ScriptedProvider {
        answers: Mutex<VecDeque<Result<String, LlmError>>>,
        pub prompts: Mutex<Vec<RecordedPrompt>>,
    }

    impl ScriptedProvider {
        pub(crate) fn new(answers: Vec<Result<String, LlmError>>) -> Self {
            Self {
                answers: Mutex::new(answers.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn answering(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }
    }

    #[async_trait]
    impl TextGenerationProvider for ScriptedProvider {
        async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(RecordedPrompt {
                system: request.system.to_string(),
                prompt: request.prompt.to_string(),
                json_mode: request.schema.is_some(),
                language: request.language.to_string(),
            });
            self.answers
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }

    fn json_request(schema: &serde_json::Value) -> GenerationRequest<'_> {
        GenerationRequest {
            system: "system",
            prompt: "prompt",
            schema: Some(schema),
            language: "en",
            temperature: 0.3,
        }
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[tokio::test]
    async fn test_generate_json_parses_fenced_answer() {
        let provider = ScriptedProvider::answering("```json\n{\"key\": \"value\"}\n```");
        let schema = serde_json::json!({"type": "object"});
        let value: serde_json::Value = generate_json(&provider, json_request(&schema))
            .await
            .unwrap();
        assert_eq!(value["key"], "value");
    }

    #[tokio::test]
    async fn test_generate_json_rejects_malformed_output() {
        let provider = ScriptedProvider::answering("Sure! Here is your resume: {");
        let schema = serde_json::json!({"type": "object"});
        let result: Result<serde_json::Value, _> =
            generate_json(&provider, json_request(&schema)).await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }

    #[tokio::test]
    async fn test_generate_json_rejects_empty_output() {
        let provider = ScriptedProvider::answering("  ``` ```  ");
        let schema = serde_json::json!({"type": "object"});
        let result: Result<serde_json::Value, _> =
            generate_json(&provider, json_request(&schema)).await;
        assert!(matches!(result, Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_chat_response_text_skips_blank_content() {
        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(blank.text().is_none());

        let missing: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(missing.text().is_none());

        let ok: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"hi"}}],"usage":{"prompt_tokens":1,"completion_tokens":2}}"#,
        )
        .unwrap();
        assert_eq!(ok.text(), Some("hi"));
    }

    #[test]
    fn test_json_mode_request_carries_response_format_and_schema() {
        let schema = serde_json::json!({"type": "object", "required": ["fullName"]});
        let request = GenerationRequest {
            system: "Parse it.",
            prompt: "text",
            schema: Some(&schema),
            language: "az",
            temperature: 0.3,
        };
        let system = compose_system(&request).unwrap();
        assert!(system.starts_with("Parse it."));
        assert!(system.contains("Azerbaijani"));
        assert!(system.contains("\"fullName\""));

        let plain = compose_system(&GenerationRequest {
            system: "Plain.",
            schema: None,
            ..request
        })
        .unwrap();
        assert!(plain.starts_with("Plain."));
        assert!(!plain.contains("JSON schema"));

        let body = ChatRequest {
            model: MODEL,
            temperature: 0.3,
            messages: vec![],
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");

        let text_body = ChatRequest {
            response_format: None,
            ..body
        };
        let json = serde_json::to_value(&text_body).unwrap();
        assert!(json.get("response_format").is_none());
    }
}
