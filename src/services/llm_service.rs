use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default token limit per plan request.
pub const DEFAULT_MAX_TOKENS: u32 = 900;

/// Model served through the Hugging Face router.
const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct";

/// Base URL of the OpenAI-compatible chat completions API.
const API_BASE_URL: &str = "https://router.huggingface.co/v1";

const TEMPERATURE: f32 = 0.7;

/// Instruction block appended to every prompt so responses arrive complete
/// and carry the END sentinel.
const COMPLETION_RULES: &str = "\n\nPlease follow these rules strictly:\n\
- Complete all sections fully.\n\
- Do NOT stop mid-sentence.\n\
- End the response with the word: END\n";

/// External text-generation collaborator: prompt in, text or failure out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Hugging Face router client. The credential is resolved at startup; a
/// missing token never reaches this type.
pub struct HfTextGenerator {
    client: Client,
    base_url: String,
    model: String,
    token: String,
}

impl HfTextGenerator {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, API_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            model: DEFAULT_MODEL.to_string(),
            token,
        }
    }
}

#[async_trait]
impl TextGenerator for HfTextGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: format!("{prompt}{COMPLETION_RULES}"),
            }],
            max_tokens,
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, max_tokens, "requesting plan text");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow!("text generation request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            bail!("text generation service error ({status}): {snippet}");
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("text generation returned malformed response: {e}"))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("text generation returned an empty response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn generate_returns_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_partial_json(json!({ "model": DEFAULT_MODEL, "max_tokens": 900 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "Day 1: rest\nEND" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generator = HfTextGenerator::with_base_url("test-token".to_string(), server.uri());
        let text = generator.generate("Make a plan", DEFAULT_MAX_TOKENS).await.unwrap();

        assert_eq!(text, "Day 1: rest\nEND");
    }

    #[tokio::test]
    async fn generate_appends_completion_rules_to_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [{
                    "role": "user",
                    "content": format!("Make a plan{COMPLETION_RULES}")
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "ok END" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let generator = HfTextGenerator::with_base_url("t".to_string(), server.uri());
        generator.generate("Make a plan", DEFAULT_MAX_TOKENS).await.unwrap();
    }

    #[tokio::test]
    async fn generate_surfaces_service_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let generator = HfTextGenerator::with_base_url("t".to_string(), server.uri());
        let err = generator.generate("p", DEFAULT_MAX_TOKENS).await.unwrap_err();

        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn generate_rejects_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let generator = HfTextGenerator::with_base_url("t".to_string(), server.uri());
        let err = generator.generate("p", DEFAULT_MAX_TOKENS).await.unwrap_err();

        assert!(err.to_string().contains("empty response"));
    }
}
