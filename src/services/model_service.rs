use std::sync::Arc;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::{Config, GenerationCredentials},
    errors::GenerationError,
};

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 1500;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub user_payload: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(system_instruction: impl Into<String>, user_payload: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            user_payload: user_payload.into(),
            temperature: TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the completion text for a single system + user exchange.
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError>;
}

/// Chat-completions backend for any OpenAI-compatible endpoint.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(credentials: &GenerationCredentials) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(credentials.api_key.expose_secret())
            .with_api_base(&credentials.api_base);

        Self {
            client: Client::with_config(config),
            model: credentials.model.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionBody {
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

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_instruction },
                { "role": "user", "content": request.user_payload },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_output_tokens,
        });

        let response: ChatCompletionBody = self
            .client
            .chat()
            .create_byot(body)
            .await
            .map_err(|e| GenerationError::ProviderError(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                GenerationError::ProviderError("response contained no message content".to_string())
            })
    }
}

/// Generation backend resolved once from configuration.
#[derive(Clone)]
pub enum GenerationBackend {
    Available(Arc<dyn TextGenerator>),
    Unavailable,
}

impl GenerationBackend {
    pub fn from_config(config: &Config) -> Self {
        match &config.generation {
            Some(credentials) => {
                log::info!(
                    "OpenAI client configured for model '{}' at {}",
                    credentials.model,
                    credentials.api_base
                );
                GenerationBackend::Available(Arc::new(OpenAiGenerator::new(credentials)))
            }
            None => {
                log::warn!("OpenAI API Key not configured. AI features will be disabled.");
                GenerationBackend::Unavailable
            }
        }
    }
}

pub struct ModelService {
    backend: GenerationBackend,
}

impl ModelService {
    pub fn new(backend: GenerationBackend) -> Self {
        Self { backend }
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, GenerationBackend::Available(_))
    }

    /// Runs one completion and returns the trimmed text.
    ///
    /// Short-circuits with `ClientNotConfigured` before any network call when
    /// no backend is configured. Blank completions count as provider errors.
    pub async fn complete(
        &self,
        system_instruction: &str,
        user_payload: &str,
    ) -> Result<String, GenerationError> {
        let GenerationBackend::Available(generator) = &self.backend else {
            log::error!("OpenAI client is not initialized. Cannot call API.");
            return Err(GenerationError::ClientNotConfigured);
        };

        let request = GenerationRequest::new(system_instruction, user_payload);
        let text = generator.generate(request).await.map_err(|e| {
            log::error!("Text generation failed: {}", e);
            e
        })?;

        let text = text.trim();
        if text.is_empty() {
            log::error!("Text generation returned an empty completion");
            return Err(GenerationError::ProviderError(
                "empty completion".to_string(),
            ));
        }

        Ok(text.to_string())
    }
}
