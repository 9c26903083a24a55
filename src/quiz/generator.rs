//! Quiz generation via chat completion.

use super::{parser, Quiz};
use crate::config::{LlmSettings, Prompts, QuizFormat, QuizSettings};
use crate::error::{QuizzleError, Result};
use crate::llm::create_client;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// LLM-backed quiz generator.
pub struct QuizGenerator {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    question_count: usize,
    option_count: usize,
    format: QuizFormat,
    prompts: Prompts,
}

impl QuizGenerator {
    /// Create a generator from settings.
    pub fn new(llm: &LlmSettings, quiz: &QuizSettings) -> Self {
        Self {
            client: create_client(llm.api_base.as_deref()),
            model: llm.model.clone(),
            temperature: llm.temperature,
            question_count: quiz.question_count,
            option_count: quiz.option_count,
            format: quiz.format,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Generate a quiz from the transcript and summary.
    ///
    /// The raw model response is parsed leniently; a malformed response
    /// yields an empty or shorter quiz rather than an error.
    #[instrument(skip_all, fields(difficulty = %difficulty, format = %self.format))]
    pub async fn generate(
        &self,
        transcript: &str,
        summary: &str,
        difficulty: &str,
    ) -> Result<Quiz> {
        let raw = self.generate_raw(transcript, summary, difficulty).await?;
        Ok(parser::parse_expecting(&raw, Some(self.option_count)))
    }

    /// Call the model and return its raw text response.
    pub async fn generate_raw(
        &self,
        transcript: &str,
        summary: &str,
        difficulty: &str,
    ) -> Result<String> {
        info!("Generating quiz ({} questions)", self.question_count);

        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        vars.insert("summary".to_string(), summary.to_string());
        vars.insert("difficulty".to_string(), difficulty.to_string());
        vars.insert("question_count".to_string(), self.question_count.to_string());
        vars.insert("option_count".to_string(), self.option_count.to_string());

        let template = match self.format {
            QuizFormat::Json => &self.prompts.quiz.user_json,
            QuizFormat::Text => &self.prompts.quiz.user_text,
        };
        let user_prompt = self.prompts.render_with_custom(template, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.quiz.system.clone())
                .build()
                .map_err(|e| QuizzleError::QuizGeneration(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| QuizzleError::QuizGeneration(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| QuizzleError::QuizGeneration(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| QuizzleError::Llm(format!("Failed to generate quiz: {}", e)))?;

        let raw = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| QuizzleError::QuizGeneration("Empty response from LLM".to_string()))?
            .trim()
            .to_string();

        debug!(
            "Raw quiz response: {}",
            raw.chars().take(500).collect::<String>()
        );

        Ok(raw)
    }
}
