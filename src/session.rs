//! Top-level screen flow: setup → loading → playing → finished, with an error branch.

use std::sync::Arc;

use crate::error::{ContentError, SessionError};
use crate::logger;
use crate::models::{FinalScore, Question, Screen};

pub const LOAD_ERROR_MESSAGE: &str =
    "เกิดข้อผิดพลาดในการโหลดข้อมูล (Error loading quiz). กรุณาลองใหม่";

#[derive(Debug)]
pub struct Session {
    screen: Screen,
    questions: Arc<[Question]>,
    final_score: FinalScore,
    error_message: String,
    request_id: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            screen: Screen::Setup,
            questions: Arc::from(Vec::new()),
            final_score: FinalScore::default(),
            error_message: String::new(),
            request_id: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn questions(&self) -> &Arc<[Question]> {
        &self.questions
    }

    pub fn final_score(&self) -> FinalScore {
        self.final_score
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Id of the most recent content request.
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    fn require_screen(&self, screen: Screen, event: &'static str) -> Result<(), SessionError> {
        if self.screen == screen {
            Ok(())
        } else {
            logger::log(&format!(
                "Rejected {} while on {:?} screen",
                event, self.screen
            ));
            Err(SessionError::InvalidTransition {
                from: self.screen,
                event,
            })
        }
    }

    /// setup → loading. Returns the id the content response must carry.
    pub fn start_requested(&mut self, count: usize) -> Result<u64, SessionError> {
        self.require_screen(Screen::Setup, "start_requested")?;
        self.error_message.clear();
        self.request_id += 1;
        self.screen = Screen::Loading;
        logger::log(&format!(
            "Requested {} questions (request {})",
            count, self.request_id
        ));
        Ok(self.request_id)
    }

    /// loading → playing, or → error when the batch is empty.
    ///
    /// Returns `Ok(false)` when the response belongs to an older request.
    pub fn content_ready(
        &mut self,
        request_id: u64,
        questions: Vec<Question>,
    ) -> Result<bool, SessionError> {
        self.require_screen(Screen::Loading, "content_ready")?;
        if request_id != self.request_id {
            logger::log(&format!("Discarding content for stale request {}", request_id));
            return Ok(false);
        }
        if questions.is_empty() {
            return self.content_failed(request_id, &ContentError::NoQuestions);
        }

        logger::log(&format!("Loaded {} questions", questions.len()));
        self.questions = Arc::from(questions);
        self.screen = Screen::Playing;
        Ok(true)
    }

    /// loading → error.
    pub fn content_failed(
        &mut self,
        request_id: u64,
        error: &ContentError,
    ) -> Result<bool, SessionError> {
        self.require_screen(Screen::Loading, "content_failed")?;
        if request_id != self.request_id {
            logger::log(&format!("Discarding failure for stale request {}", request_id));
            return Ok(false);
        }

        logger::log(&format!("Content generation failed: {}", error));
        self.questions = Arc::from(Vec::new());
        self.error_message = LOAD_ERROR_MESSAGE.to_string();
        self.screen = Screen::Error;
        Ok(true)
    }

    /// playing → finished.
    pub fn finished(&mut self, result: FinalScore) -> Result<(), SessionError> {
        self.require_screen(Screen::Playing, "finished")?;
        logger::log(&format!("Finished with {}/{}", result.score, result.total));
        self.final_score = result;
        self.screen = Screen::Finished;
        Ok(())
    }

    /// finished | error → setup.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if !matches!(self.screen, Screen::Finished | Screen::Error) {
            return self.require_screen(Screen::Finished, "restart");
        }
        self.questions = Arc::from(Vec::new());
        self.final_score = FinalScore::default();
        self.screen = Screen::Setup;
        Ok(())
    }
}
