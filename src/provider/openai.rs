use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::generation::prompt::SYSTEM_PROMPT;
use crate::generation::{FailureKind, GenerationFailure};
use crate::provider::TextProvider;

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// Base URL up to and including the version segment, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub model: String,
    /// Sent as a bearer token when not empty
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for any OpenAI compatible `chat/completions` endpoint.
pub struct OpenAiProvider {
    http_client: reqwest::Client,
    settings: OpenAiSettings,
}

impl OpenAiProvider {
    pub fn new(settings: OpenAiSettings) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().build()?;
        Ok(OpenAiProvider {
            http_client,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl TextProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.settings.model
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn generate(
        &self,
        prompt: &str,
        timeout: Option<Duration>,
    ) -> Result<String, GenerationFailure> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let mut request = self.http_client.post(self.endpoint()).json(&body);
        if !self.settings.api_key.is_empty() {
            request = request.bearer_auth(&self.settings.api_key);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_transport_error(e, timeout))?;

        let status = response.status();
        trace!("Provider response status: {}", status);
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Provider returned {}: {}", status, error_text);
            return Err(GenerationFailure::provider(format!(
                "provider returned status {}",
                status
            )));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                return classify_transport_error(e, timeout);
            }
            error!("Failed to decode provider response: {}", e);
            GenerationFailure::provider("malformed provider response")
        })?;

        let choice = chat_response.choices.into_iter().next().ok_or_else(|| {
            error!("Provider response contained no choices");
            GenerationFailure::provider("provider response contained no choices")
        })?;

        debug!("Provider call to {} completed", self.settings.model);
        Ok(choice.message.content.unwrap_or_default())
    }
}

fn classify_transport_error(err: reqwest::Error, timeout: Option<Duration>) -> GenerationFailure {
    if err.is_timeout() {
        error!("Provider call timed out: {}", err);
        return match timeout {
            Some(bound) => GenerationFailure::timeout(bound),
            None => GenerationFailure::new(FailureKind::Timeout, err.to_string()),
        };
    }
    error!("Provider unreachable: {}", err);
    GenerationFailure::unavailable(err.to_string())
}
