//! Chat-completions client for vocabulary generation.
//!
//! Two endpoint flavours share one request shape:
//! - OpenAI-compatible: `{base_url}/chat/completions`, bearer auth
//! - Azure OpenAI: `{endpoint}/openai/deployments/{deployment}/chat/completions?api-version=...`,
//!   `api-key` header
//!
//! Environment variables (explicit builder settings take precedence):
//! - `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_API_KEY`, `AZURE_OPENAI_API_VERSION`,
//!   `AZURE_OPENAI_DEPLOYMENT_NAME`
//! - `OPENAI_API_KEY`, `OPENAI_BASE_URL`, `VOCAB_MODEL`
//! - `VOCAB_HTTP_TIMEOUT_SECS`: request timeout (default 30)

use super::prompt::{vocab_info_prompt, SYSTEM_PROMPT};
use super::Generator;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEndpoint {
    OpenAi {
        base_url: String,
        model: String,
    },
    Azure {
        endpoint: String,
        deployment: String,
        api_version: String,
    },
}

impl GenerationEndpoint {
    fn url(&self) -> String {
        match self {
            GenerationEndpoint::OpenAi { base_url, .. } => {
                format!("{}/chat/completions", base_url.trim_end_matches('/'))
            }
            GenerationEndpoint::Azure {
                endpoint,
                deployment,
                api_version,
            } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint.trim_end_matches('/'),
                deployment,
                api_version
            ),
        }
    }

    fn model(&self) -> &str {
        match self {
            GenerationEndpoint::OpenAi { model, .. } => model,
            GenerationEndpoint::Azure { deployment, .. } => deployment,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
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

/// HTTP generation client.
pub struct GenerationClient {
    http_client: reqwest::Client,
    endpoint: GenerationEndpoint,
    api_key: String,
}

impl GenerationClient {
    pub fn builder() -> GenerationClientBuilder {
        GenerationClientBuilder::new()
    }

    pub fn endpoint(&self) -> &GenerationEndpoint {
        &self.endpoint
    }

    /// Send one chat completion and return the assistant text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint.url();
        let body = serde_json::json!({
            "model": self.endpoint.model(),
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
        });

        let request = self.http_client.post(&url).json(&body);
        let request = match &self.endpoint {
            GenerationEndpoint::OpenAi { .. } => request.bearer_auth(&self.api_key),
            GenerationEndpoint::Azure { .. } => request.header("api-key", &self.api_key),
        };

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            Error::generation_with_context(
                format!("generation request failed: {}", e),
                ErrorContext::new().with_source("generation"),
            )
        })?;

        let status = response.status();
        let body_str = response.text().await.map_err(|e| {
            Error::generation_with_context(
                format!("failed to read generation response: {}", e),
                ErrorContext::new().with_source("generation"),
            )
        })?;

        if !status.is_success() {
            let excerpt: String = body_str.chars().take(ERROR_BODY_CHARS).collect();
            return Err(Error::generation_status(
                status.as_u16(),
                format!("generation service returned {}", status),
                ErrorContext::new()
                    .with_details(excerpt)
                    .with_source("generation"),
            ));
        }

        let parsed: ChatResponse = serde_json::from_str(&body_str).map_err(|e| {
            Error::generation_with_context(
                format!("invalid chat completion payload: {}", e),
                ErrorContext::new().with_source("generation"),
            )
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                Error::generation_with_context(
                    "generation response has no content",
                    ErrorContext::new().with_source("generation"),
                )
            })?;

        info!(
            model = self.endpoint.model(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = content.len(),
            "generation completed"
        );
        Ok(content)
    }
}

#[async_trait]
impl Generator for GenerationClient {
    async fn generate(&self, vocab: &str, language: &str) -> Result<String> {
        debug!(vocab, language, "requesting vocabulary info");
        self.complete(&vocab_info_prompt(vocab, language)).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerationClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    azure_endpoint: Option<String>,
    azure_deployment: Option<String>,
    api_version: Option<String>,
    timeout_secs: Option<u64>,
}

impl GenerationClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// OpenAI-compatible base URL, e.g. `https://api.openai.com/v1`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Target an Azure OpenAI resource instead of an OpenAI-compatible endpoint.
    pub fn azure(mut self, endpoint: impl Into<String>, deployment: impl Into<String>) -> Self {
        self.azure_endpoint = Some(endpoint.into());
        self.azure_deployment = Some(deployment.into());
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub async fn build(self) -> Result<GenerationClient> {
        self.build_with(|name| std::env::var(name).ok())
    }

    fn build_with<F>(self, lookup: F) -> Result<GenerationClient>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let explicit_openai = self.base_url.is_some() || self.model.is_some();

        let azure_endpoint = match self.azure_endpoint {
            Some(endpoint) => Some(endpoint),
            None if explicit_openai => None,
            None => env("AZURE_OPENAI_ENDPOINT"),
        };

        let (endpoint, api_key) = match azure_endpoint {
            Some(endpoint) => {
                let api_key = self
                    .api_key
                    .or_else(|| env("AZURE_OPENAI_API_KEY"))
                    .ok_or_else(|| missing_credential("AZURE_OPENAI_API_KEY"))?;
                let deployment = self
                    .azure_deployment
                    .or_else(|| env("AZURE_OPENAI_DEPLOYMENT_NAME"))
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string());
                let api_version = self
                    .api_version
                    .or_else(|| env("AZURE_OPENAI_API_VERSION"))
                    .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string());
                (
                    GenerationEndpoint::Azure {
                        endpoint,
                        deployment,
                        api_version,
                    },
                    api_key,
                )
            }
            None => {
                let api_key = self
                    .api_key
                    .or_else(|| env("OPENAI_API_KEY"))
                    .ok_or_else(|| missing_credential("OPENAI_API_KEY"))?;
                let base_url = self
                    .base_url
                    .or_else(|| env("OPENAI_BASE_URL"))
                    .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());
                let model = self
                    .model
                    .or_else(|| env("VOCAB_MODEL"))
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string());
                (GenerationEndpoint::OpenAi { base_url, model }, api_key)
            }
        };

        let timeout_secs = match self.timeout_secs {
            Some(secs) => secs,
            None => match env("VOCAB_HTTP_TIMEOUT_SECS") {
                Some(v) => v.trim().parse::<u64>().map_err(|_| {
                    Error::configuration_with_context(
                        format!("invalid timeout '{}'", v),
                        ErrorContext::new().with_field_path("VOCAB_HTTP_TIMEOUT_SECS"),
                    )
                })?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(GenerationClient {
            http_client,
            endpoint,
            api_key,
        })
    }
}

fn missing_credential(var: &str) -> Error {
    Error::configuration_with_context(
        format!("API key required ({})", var),
        ErrorContext::new().with_field_path(var),
    )
}
