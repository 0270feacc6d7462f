//! Recipe text generators.
//!
//! The hybrid system treats generation as an opaque `prompt -> text` call.
//! `InferenceApiGenerator` forwards prompts to a hosted text-generation
//! inference endpoint serving the recipe model.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::error::{HybridError, Result};

/// Environment variable consulted when no API token is configured.
pub const API_TOKEN_ENV: &str = "HF_API_TOKEN";

/// Trait for recipe text generators.
///
/// `HybridRecipeSystem` checks `is_available` before each call and turns a
/// panic inside `generate` into `HybridError::GeneratorPanicked`.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Get the name of this generator.
    fn name(&self) -> &str;

    /// Generate raw recipe text for a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the generator can be called (API token set, etc.).
    fn is_available(&self) -> bool {
        true
    }
}

/// Generator backed by a hosted inference API.
pub struct InferenceApiGenerator {
    /// API token.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model and sampling parameters.
    config: GenerationConfig,
}

impl InferenceApiGenerator {
    /// Create a generator from the generation config.
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            api_key: config
                .api_key
                .clone()
                .or_else(|| std::env::var(API_TOKEN_ENV).ok()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            config,
        })
    }

    /// Set the API token.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.config.model)
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        let c = &self.config;
        serde_json::json!({
            "inputs": prompt,
            "parameters": {
                "max_length": c.max_length,
                "min_length": c.min_length,
                "no_repeat_ngram_size": c.no_repeat_ngram_size,
                "do_sample": c.do_sample,
                "top_k": c.top_k,
                "top_p": c.top_p,
                "temperature": c.temperature
            },
            "options": {
                "wait_for_model": true
            }
        })
    }
}

#[async_trait]
impl RecipeGenerator for InferenceApiGenerator {
    fn name(&self) -> &str {
        "inference-api"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            HybridError::GeneratorNotConfigured(format!("{API_TOKEN_ENV} not set"))
        })?;

        debug!("Generating recipe with model: {}", self.config.model);

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(HybridError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(HybridError::ApiRequest(format!(
                "API error ({status}): {error_text}"
            )));
        }

        let outputs: Vec<GeneratedText> = response.json().await?;
        let text = outputs
            .into_iter()
            .next()
            .map(|output| output.generated_text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| HybridError::InvalidResponse("No generated text in response".to_string()))?;

        info!("Generated {} characters of recipe text", text.len());
        Ok(text)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Inference API response item.
#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}
