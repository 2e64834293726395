use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Single "generate text from prompt" call against a generative model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Talks to any OpenAI-compatible chat completions endpoint. Gemini exposes
/// one under `/v1beta/openai`.
pub struct ChatModelService {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ChatModelService {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.model_base_url.trim_end_matches('/'))
            .with_api_key(config.model_api_key.expose_secret());

        // A failed model call is terminal for its request; 429 and 5xx included.
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(openai_config).with_backoff(no_retry),
            model: config.model_name.clone(),
        }
    }
}

fn first_text(completion: ChatCompletion) -> Option<String> {
    completion
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.content)
        .find(|text| !text.trim().is_empty())
}

#[async_trait]
impl TextGenerator for ChatModelService {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        log::debug!("Calling model '{}' ({} prompt chars)", self.model, prompt.len());

        let request = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let completion: ChatCompletion = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|err| AppError::ModelCallFailed(err.to_string()))?;

        first_text(completion).ok_or_else(|| {
            AppError::EmptyModelResponse(format!("model '{}' returned no text", self.model))
        })
    }
}
