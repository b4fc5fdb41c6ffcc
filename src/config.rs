//! Runtime configuration read from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::ai::{ModelConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const MODEL_VAR: &str = "ZOO_QUEST_MODEL";
pub const LANGUAGE_VAR: &str = "ZOO_QUEST_LANGUAGE";
pub const ILLUSTRATIONS_VAR: &str = "ZOO_QUEST_ILLUSTRATIONS";
pub const SPEECH_VAR: &str = "ZOO_QUEST_SPEECH";
pub const SOUND_VAR: &str = "ZOO_QUEST_SOUND";
pub const ADVANCE_MS_VAR: &str = "ZOO_QUEST_ADVANCE_MS";
pub const LOG_VAR: &str = "ZOO_QUEST_LOG";

pub const DEFAULT_LANGUAGE: &str = "Thai";
pub const DEFAULT_LOG_FILE: &str = "zoo_spell_quest.log";
pub const DEFAULT_AUTO_ADVANCE: Duration = Duration::from_millis(1500);
pub const DEFAULT_SHAKE_DURATION: Duration = Duration::from_millis(500);
pub const DEFAULT_CONTENT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_MEDIA_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: ModelConfig,
    /// Language the generated translations are written in.
    pub language: String,
    pub illustrations: bool,
    pub speech: bool,
    pub sound: bool,
    pub auto_advance_delay: Duration,
    pub shake_duration: Duration,
    pub content_timeout: Duration,
    pub media_timeout: Duration,
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                model: DEFAULT_MODEL.to_string(),
                temperature: Some(DEFAULT_TEMPERATURE),
                max_tokens: Some(DEFAULT_MAX_TOKENS),
            },
            language: DEFAULT_LANGUAGE.to_string(),
            illustrations: true,
            speech: true,
            sound: true,
            auto_advance_delay: DEFAULT_AUTO_ADVANCE,
            shake_duration: DEFAULT_SHAKE_DURATION,
            content_timeout: DEFAULT_CONTENT_TIMEOUT,
            media_timeout: DEFAULT_MEDIA_TIMEOUT,
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Fails before anything else happens when the OpenRouter credential is
    /// missing, so no request is ever attempted without it.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(API_KEY_VAR) {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingCredential(API_KEY_VAR)),
        }

        let mut config = Self::default();

        if let Some(model) = non_empty(lookup(MODEL_VAR)) {
            config.model.model = model;
        }
        if let Some(language) = non_empty(lookup(LANGUAGE_VAR)) {
            config.language = language;
        }
        if let Some(value) = lookup(ILLUSTRATIONS_VAR) {
            config.illustrations = parse_flag(ILLUSTRATIONS_VAR, &value)?;
        }
        if let Some(value) = lookup(SPEECH_VAR) {
            config.speech = parse_flag(SPEECH_VAR, &value)?;
        }
        if let Some(value) = lookup(SOUND_VAR) {
            config.sound = parse_flag(SOUND_VAR, &value)?;
        }
        if let Some(value) = lookup(ADVANCE_MS_VAR) {
            let millis = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ADVANCE_MS_VAR,
                    value: value.clone(),
                })?;
            config.auto_advance_delay = Duration::from_millis(millis);
        }
        if let Some(path) = non_empty(lookup(LOG_VAR)) {
            config.log_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
