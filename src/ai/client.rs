use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use serde::Serialize;

use crate::error::ContentError;

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
    language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Build the user prompt asking for `count` animal questions.
pub fn quiz_prompt(count: usize, language: &str) -> String {
    format!(
        r#"Generate a list of {count} distinct animal vocabulary questions for a children's game.
Each question has an English animal name, its {language} translation, and a list of options.
The options list MUST include the correct English name exactly once and 3 other distinct, incorrect animal names as distractors, randomly shuffled.
Use common animals suitable for children (e.g. Cat, Dog, Elephant, Lion, Bird, Ant).

IMPORTANT:

- Respond ONLY with this exact JSON structure (no markdown, no extra text):
{{
    "questions": [
        {{
            "word": "English animal name",
            "translation": "{language} translation",
            "options": ["option1", "option2", "option3", "option4"]
        }}
    ]
}}
"#
    )
}

impl OpenRouterClient {
    /// Reads the API key from `OPENROUTER_API_KEY`.
    pub fn new(config: ModelConfig, language: &str) -> Result<Self, ContentError> {
        let client = openrouter_api::OpenRouterClient::quick()
            .map_err(|e| ContentError::Client(e.to_string()))?;

        Ok(Self {
            client,
            config,
            language: language.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Ask the model for a batch of questions and return its raw text.
    pub async fn request_quiz(&self, count: usize) -> Result<String, ContentError> {
        let prompt = quiz_prompt(count, &self.language);

        let messages = vec![
            Message::text(
                "system",
                "You write vocabulary quizzes for young children. Answer with JSON only.",
            ),
            Message::text("user", &prompt),
        ];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()
            .map_err(|e| ContentError::Request(e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| ContentError::Request(e.to_string()))?;

        let Some(choice) = response.choices.first() else {
            return Err(ContentError::EmptyResponse);
        };

        let text = match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => text.clone(),
            openrouter_api::MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| {
                    if let openrouter_api::ContentPart::Text(tc) = p {
                        Some(tc.text.clone())
                    } else {
                        None
                    }
                })
                .collect::<Vec<String>>()
                .join("\n"),
        };

        if text.trim().is_empty() {
            return Err(ContentError::EmptyResponse);
        }
        Ok(text)
    }
}
