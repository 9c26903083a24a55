//! Transcript summarization via chat completion.

use crate::config::{LlmSettings, Prompts};
use crate::error::{QuizzleError, Result};
use crate::llm::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// LLM-backed transcript summarizer.
pub struct Summarizer {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    prompts: Prompts,
}

impl Summarizer {
    /// Create a summarizer from settings.
    pub fn new(llm: &LlmSettings) -> Self {
        Self {
            client: create_client(llm.api_base.as_deref()),
            model: llm.model.clone(),
            temperature: llm.temperature,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Generate a bullet-point summary of the transcript.
    #[instrument(skip_all, fields(chars = transcript.len()))]
    pub async fn summarize(&self, transcript: &str) -> Result<String> {
        info!("Generating summary");

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());

        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.summary.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.summary.system.clone())
                .build()
                .map_err(|e| QuizzleError::Summarization(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| QuizzleError::Summarization(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| QuizzleError::Summarization(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| QuizzleError::Llm(format!("Failed to generate summary: {}", e)))?;

        let summary = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| QuizzleError::Summarization("Empty response from LLM".to_string()))?
            .trim()
            .to_string();

        debug!("Summary length: {} chars", summary.len());

        Ok(summary)
    }
}
