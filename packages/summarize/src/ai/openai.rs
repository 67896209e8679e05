//! OpenAI-compatible chat-completions client.
//!
//! Works against any backend speaking the OpenAI chat-completions wire
//! format; point it at a different provider with [`OpenAi::with_base_url`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Summarizer;
use crate::error::{SummarizeError, SummarizeResult};

/// Instruction sent as the system message on every request.
const SUMMARIZE_INSTRUCTION: &str = "Summarize the following text";

/// Request timeout for a single summarization attempt.
pub const SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(20);

/// Client for an OpenAI-compatible chat-completions backend.
#[derive(Clone)]
pub struct OpenAi {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAi {
    /// Create a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Set the chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (self-hosted backends, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl Summarizer for OpenAi {
    async fn summarize(&self, text: &str) -> SummarizeResult<String> {
        debug!(text_len = text.len(), model = %self.model, "starting summarization");

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SUMMARIZE_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(SUMMARIZE_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(SummarizeError::Backend)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(SummarizeError::MalformedResponse)?;

        // Missing or empty content is an empty summary, not an error.
        let summary = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        debug!(summary_len = summary.len(), "summarization completed");

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_model_and_base_url() {
        let client = OpenAi::new("sk-test")
            .with_model("local-model")
            .with_base_url("http://localhost:8000/v1");

        assert_eq!(client.model(), "local-model");
        assert_eq!(client.base_url, "http://localhost:8000/v1");
    }

    #[test]
    fn empty_choices_deserialize_to_no_content() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn null_content_deserializes_as_none() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        )
        .unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
