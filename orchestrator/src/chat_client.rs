use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ApiError;

/// Sampling temperature used by every report-generation prompt.
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

const API_VERSION: &str = "2024-02-15-preview";
const MAX_COMPLETION_TOKENS: u32 = 2000;
const COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
    ) -> Result<String, ApiError>;
}

/// Chat-completion client for an Azure-OpenAI-style deployment endpoint.
pub struct ChatClient {
    http: Client,
    endpoint: String,
    deployment: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(COMPLETION_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint: config.openai_endpoint.clone(),
            deployment: config.openai_deployment.clone(),
            api_key: config.openai_api_key.clone(),
        })
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl ChatCompletion for ChatClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f64,
    ) -> Result<String, ApiError> {
        let url = format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint, self.deployment, API_VERSION
        );
        let payload = ChatRequest {
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
            max_tokens: MAX_COMPLETION_TOKENS,
        };

        let response = self
            .http
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response.json().await?;
        let first = completion.choices.into_iter().next().ok_or_else(|| {
            ApiError::Internal("chat completion returned no choices".to_string())
        })?;
        Ok(first.message.content)
    }
}
