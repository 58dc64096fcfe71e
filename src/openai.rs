use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY not set")]
    MissingApiKey,
    #[error("no choices in completion response")]
    NoChoices,
    #[error(transparent)]
    OpenAI(#[from] OpenAIError),
}

/// Black-box text completion. Callers treat every call as fallible and never retry.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String, GenerationError>;
}

/// Chat-completions client for any OpenAI-compatible endpoint (Gemini by default).
pub struct OpenAiGenerator {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(app_config: &AppConfig) -> Self {
        let client = app_config.llm_api_key.as_ref().map(|api_key| {
            Client::with_config(
                OpenAIConfig::new()
                    .with_api_key(api_key)
                    .with_api_base(&app_config.llm_api_base),
            )
        });
        OpenAiGenerator {
            client,
            model: app_config.llm_model.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String, GenerationError> {
        let client = self.client.as_ref().ok_or(GenerationError::MissingApiKey)?;

        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(2);
        if !system_instruction.is_empty() {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_instruction)
                    .build()?
                    .into(),
            );
        }
        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()?
                .into(),
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()?;

        info!("Generating with model: {}", self.model);
        let response = client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .ok_or(GenerationError::NoChoices)?
            .message
            .content
            .clone()
            .unwrap_or_default();

        debug!("Generated {} chars", content.len());
        Ok(content.trim().to_string())
    }
}
