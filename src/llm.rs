use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 256;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("failed to reach completion api: {0}")]
    Request(#[from] reqwest::Error),
    #[error("completion api answered with status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("completion api returned no choices")]
    NoChoices,
}

/// A text-in/text-out language model.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Serialize, Debug)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct CompletionChoice {
    text: String,
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

/// Client for the OpenAI text completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionModel {
    http: Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiCompletionModel {
    pub fn new(config: &Config) -> OpenAiCompletionModel {
        OpenAiCompletionModel {
            http: Client::new(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            url: format!("{}/completions", config.api_base),
        }
    }
}

#[async_trait]
impl CompletionModel for OpenAiCompletionModel {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        log::debug!("Requesting completion from {} with {}", self.url, self.model);
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                prompt,
                temperature: TEMPERATURE,
                max_tokens: MAX_TOKENS,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or(CompletionError::NoChoices)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}
