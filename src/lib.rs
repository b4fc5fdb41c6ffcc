pub mod ai;
pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod logger;
pub mod media;
pub mod models;
pub mod play;
pub mod scoring;
pub mod session;
pub mod setup;
pub mod timer;
pub mod ui;
pub mod utils;
pub mod worker;

#[cfg(test)]
mod flow_tests;

// Re-exports for convenience
pub use ai::{ContentProvider, ModelConfig, OpenRouterClient, DEFAULT_MODEL};
pub use app::App;
pub use audio::{AudioOutput, SoundCue, TerminalAudio};
pub use config::AppConfig;
pub use error::{ConfigError, ContentError, MediaError, SessionError, ValidationError};
pub use media::{HttpIllustrations, IllustrationSource};
pub use models::{FinalScore, Question, QuestionKey, Screen, WorkerRequest, WorkerResponse};
pub use play::PlayState;
pub use session::Session;
pub use worker::{spawn_worker, WorkerTimeouts};
