//! Gemini chat-model adapter.
//!
//! Talks to the `generateContent` REST endpoint. The API is stateless, so
//! the full turn history is resent on every call; the local history is
//! mutated only after a successful reply, which means a failed or cancelled
//! request leaves the conversation exactly as it was.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::{Role, Turn};
use crate::ports::{ChatModel, Conversation, ProviderError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for the Gemini adapter.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_output_tokens: u32,
}

impl GeminiConfig {
    /// Creates a configuration with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_output_tokens: 1024,
        }
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL (mainly for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps the tokens generated per reply.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat model backed by the Gemini REST API.
pub struct GeminiModel {
    config: GeminiConfig,
    client: Client,
}

impl GeminiModel {
    /// Creates a new model with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }
}

impl ChatModel for GeminiModel {
    fn start_chat(&self, instruction: &str) -> Box<dyn Conversation> {
        Box::new(GeminiChat {
            client: self.client.clone(),
            config: self.config.clone(),
            instruction: instruction.to_string(),
            history: Vec::new(),
        })
    }
}

/// One conversation against the Gemini API.
pub struct GeminiChat {
    client: Client,
    config: GeminiConfig,
    instruction: String,
    history: Vec<Turn>,
}

impl GeminiChat {
    fn generate_url(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    /// Builds the request from history plus the pending message, without
    /// touching the history itself.
    fn request_body(&self, pending: &str) -> GenerateContentRequest {
        let mut contents: Vec<Content> = self.history.iter().map(Content::from).collect();
        contents.push(Content {
            role: "user",
            parts: vec![Part {
                text: pending.to_string(),
            }],
        });

        GenerateContentRequest {
            contents,
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: self.instruction.clone(),
                }],
            }),
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl Conversation for GeminiChat {
    async fn send(&mut self, text: &str) -> Result<String, ProviderError> {
        let body = self.request_body(text);

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    ProviderError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &error_body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::parse(e.to_string()))?;
        let reply = extract_text(parsed)?;

        // The provider answered; only now does the turn pair become history.
        self.history.push(Turn::user(text));
        self.history.push(Turn::model(reply.clone()));
        Ok(reply)
    }

    fn history_len(&self) -> usize {
        self.history.len()
    }

    fn reset(&mut self) {
        self.history.clear();
    }

    fn export(&self) -> Vec<Turn> {
        self.history.clone()
    }
}

fn map_http_error(status: StatusCode, body: &str) -> ProviderError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationFailed,
        _ => ProviderError::api(status.as_u16(), message),
    }
}

fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| ProviderError::parse("no text in response candidates"))
}

// ── Wire types ──────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

impl From<&Turn> for Content {
    fn from(turn: &Turn) -> Self {
        Self {
            role: match turn.role {
                Role::User => "user",
                Role::Model => "model",
            },
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat_with_history() -> GeminiChat {
        let config = GeminiConfig::new("test-key");
        let client = Client::new();
        GeminiChat {
            client,
            config,
            instruction: "be helpful".to_string(),
            history: vec![Turn::user("hola"), Turn::model("hola, como estas?")],
        }
    }

    #[test]
    fn request_body_carries_history_and_pending_message() {
        let chat = chat_with_history();
        let body = chat.request_body("bien");

        assert_eq!(body.contents.len(), 3);
        assert_eq!(body.contents[0].role, "user");
        assert_eq!(body.contents[1].role, "model");
        assert_eq!(body.contents[2].role, "user");
        assert_eq!(body.contents[2].parts[0].text, "bien");
        // Building the request must not mutate history.
        assert_eq!(chat.history.len(), 2);
    }

    #[test]
    fn request_serializes_with_camel_case_keys() {
        let chat = chat_with_history();
        let json = serde_json::to_value(chat.request_body("hi")).unwrap();

        assert!(json.get("systemInstruction").is_some());
        assert_eq!(
            json["generationConfig"]["maxOutputTokens"],
            serde_json::json!(1024)
        );
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            serde_json::json!("be helpful")
        );
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"hello there"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "hello there");
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(ProviderError::Parse(_))
        ));
    }

    #[test]
    fn http_errors_map_to_provider_error_kinds() {
        assert_eq!(
            map_http_error(StatusCode::TOO_MANY_REQUESTS, "{}"),
            ProviderError::RateLimited
        );
        assert_eq!(
            map_http_error(StatusCode::FORBIDDEN, "{}"),
            ProviderError::AuthenticationFailed
        );
        let err = map_http_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"bad payload"}}"#,
        );
        assert_eq!(err, ProviderError::api(400, "bad payload"));
    }

    #[test]
    fn generate_url_joins_base_and_model() {
        let chat = chat_with_history();
        assert_eq!(
            chat.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
