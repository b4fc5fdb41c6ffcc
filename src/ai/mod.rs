pub mod client;
pub mod generator;

// Public API exports
pub use client::{
    ModelConfig, OpenRouterClient, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};
pub use generator::{parse_quiz_response, validate_question, ContentProvider, OPTION_COUNT};
