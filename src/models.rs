use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// One quiz item: the English word to find, its translation and the options shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub word: String,
    #[serde(alias = "thai")]
    pub translation: String,
    pub options: Vec<String>,
}

impl Question {
    pub fn new(word: &str, translation: &str, options: &[&str]) -> Self {
        Self {
            word: word.to_string(),
            translation: translation.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    pub fn is_correct(&self, option: &str) -> bool {
        option == self.word
    }
}

/// Top-level screens. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Setup,
    Loading,
    Playing,
    Finished,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinalScore {
    pub score: usize,
    pub total: usize,
}

/// Identity of the question currently on screen.
///
/// `round` changes with every content request, `index` with every advance.
/// Deferred callbacks carry the key they were issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuestionKey {
    pub round: u64,
    pub index: usize,
}

#[derive(Debug)]
pub enum WorkerRequest {
    GenerateQuiz {
        request_id: u64,
        count: usize,
    },
    LoadIllustration {
        key: QuestionKey,
        url: String,
    },
}

#[derive(Debug)]
pub enum WorkerResponse {
    QuizReady {
        request_id: u64,
        questions: Vec<Question>,
    },
    QuizFailed {
        request_id: u64,
        error: ContentError,
    },
    IllustrationLoaded {
        key: QuestionKey,
    },
    IllustrationFailed {
        key: QuestionKey,
        error: String,
    },
}
