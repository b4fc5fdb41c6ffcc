//! Per-question answer and scoring state machine.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::models::{FinalScore, Question, QuestionKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerState {
    Unanswered,
    Correct,
    /// Last submission was wrong. Persists until the next submission.
    Incorrect,
}

/// Illustration gate for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaState {
    Loading,
    Ready,
    /// Failed to load; a placeholder is shown and answers are accepted.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Ignored,
    Correct { first_attempt: bool },
    Incorrect { attempts: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextQuestion(QuestionKey),
    Finished(FinalScore),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    MoveHighlight(Direction),
    SubmitHighlighted,
    SubmitOption(usize),
    Continue,
    Speak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Options are laid out as a grid this many columns wide.
pub const OPTION_COLUMNS: usize = 2;

#[derive(Debug, Clone)]
pub struct PlayState {
    questions: Arc<[Question]>,
    round: u64,
    pub current_index: usize,
    pub score: usize,
    pub selected_option: Option<String>,
    pub answer: AnswerState,
    pub attempts: u32,
    pub shaking: bool,
    pub media: MediaState,
    pub seed: u32,
    pub highlighted: usize,
}

impl PlayState {
    /// `questions` must not be empty.
    pub fn new(questions: Arc<[Question]>, round: u64) -> Self {
        Self {
            questions,
            round,
            current_index: 0,
            score: 0,
            selected_option: None,
            answer: AnswerState::Unanswered,
            attempts: 0,
            shaking: false,
            media: MediaState::Loading,
            seed: rand::random::<u32>(),
            highlighted: 0,
        }
    }

    pub fn key(&self) -> QuestionKey {
        QuestionKey {
            round: self.round,
            index: self.current_index,
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// `Some(true)` after a correct answer, `Some(false)` after a wrong one.
    pub fn answered_correctly(&self) -> Option<bool> {
        match self.answer {
            AnswerState::Unanswered => None,
            AnswerState::Correct => Some(true),
            AnswerState::Incorrect => Some(false),
        }
    }

    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.current_index as f64 / self.questions.len() as f64
    }

    pub fn accepts_answers(&self) -> bool {
        self.answer != AnswerState::Correct && self.media != MediaState::Loading
    }

    pub fn submit_answer(&mut self, option: &str) -> SubmitOutcome {
        if !self.accepts_answers() {
            return SubmitOutcome::Ignored;
        }

        self.selected_option = Some(option.to_string());

        if self.current().is_correct(option) {
            let first_attempt = self.attempts == 0;
            self.answer = AnswerState::Correct;
            self.shaking = false;
            if first_attempt {
                self.score += 1;
            }
            SubmitOutcome::Correct { first_attempt }
        } else {
            self.answer = AnswerState::Incorrect;
            self.attempts += 1;
            self.shaking = true;
            SubmitOutcome::Incorrect {
                attempts: self.attempts,
            }
        }
    }

    pub fn submit_option(&mut self, index: usize) -> SubmitOutcome {
        let Some(option) = self.current().options.get(index).cloned() else {
            return SubmitOutcome::Ignored;
        };
        self.highlighted = index;
        self.submit_answer(&option)
    }

    /// Move to the next question, or report the final result after the last one.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.is_last() {
            return AdvanceOutcome::Finished(FinalScore {
                score: self.score,
                total: self.questions.len(),
            });
        }

        self.current_index += 1;
        self.selected_option = None;
        self.answer = AnswerState::Unanswered;
        self.attempts = 0;
        self.shaking = false;
        self.media = MediaState::Loading;
        self.seed = rand::random::<u32>();
        self.highlighted = 0;
        AdvanceOutcome::NextQuestion(self.key())
    }

    /// Record the illustration result. Ignored for any other question.
    pub fn media_resolved(&mut self, key: QuestionKey, loaded: bool) -> bool {
        if key != self.key() || self.media != MediaState::Loading {
            return false;
        }
        self.media = if loaded {
            MediaState::Ready
        } else {
            MediaState::Unavailable
        };
        true
    }

    /// Stop the shake started by wrong attempt `attempt`, unless a newer one replaced it.
    pub fn end_shake(&mut self, key: QuestionKey, attempt: u32) -> bool {
        if key != self.key() || attempt != self.attempts || !self.shaking {
            return false;
        }
        self.shaking = false;
        true
    }

    pub fn move_highlight(&mut self, direction: Direction) {
        let count = self.current().options.len();
        if count == 0 {
            return;
        }
        let current = self.highlighted.min(count - 1);
        let next = match direction {
            Direction::Left => current.saturating_sub(1),
            Direction::Right => (current + 1).min(count - 1),
            Direction::Up => current.checked_sub(OPTION_COLUMNS).unwrap_or(current),
            Direction::Down => {
                if current + OPTION_COLUMNS < count {
                    current + OPTION_COLUMNS
                } else {
                    current
                }
            }
        };
        self.highlighted = next;
    }
}

pub fn play_command(key: KeyEvent) -> Option<PlayCommand> {
    match key.code {
        KeyCode::Up => Some(PlayCommand::MoveHighlight(Direction::Up)),
        KeyCode::Down => Some(PlayCommand::MoveHighlight(Direction::Down)),
        KeyCode::Left => Some(PlayCommand::MoveHighlight(Direction::Left)),
        KeyCode::Right => Some(PlayCommand::MoveHighlight(Direction::Right)),
        KeyCode::Enter => Some(PlayCommand::Continue),
        KeyCode::Char(' ') => Some(PlayCommand::SubmitHighlighted),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(PlayCommand::Speak),
        KeyCode::Char(c @ '1'..='9') => Some(PlayCommand::SubmitOption(
            c as usize - '1' as usize,
        )),
        _ => None,
    }
}
