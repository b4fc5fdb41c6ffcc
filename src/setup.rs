use std::num::IntErrorKind;

use crossterm::event::{KeyCode, KeyEvent};

use crate::error::ValidationError;

pub const PRESET_COUNTS: [usize; 3] = [10, 20, 30];
pub const MAX_QUESTION_COUNT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupFocus {
    Preset(usize),
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupAction {
    None,
    /// A preset was chosen or the custom count passed validation.
    Start(usize),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupState {
    pub focus: SetupFocus,
    pub input_buffer: String,
    pub error: Option<ValidationError>,
}

impl Default for SetupState {
    fn default() -> Self {
        Self {
            focus: SetupFocus::Preset(0),
            input_buffer: String::new(),
            error: None,
        }
    }
}

/// Validate a free-form question count.
pub fn validate_count(input: &str) -> Result<usize, ValidationError> {
    let count = match input.trim().parse::<i64>() {
        Ok(n) => n,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            return Err(ValidationError::CountTooLarge {
                max: MAX_QUESTION_COUNT,
            });
        }
        Err(_) => return Err(ValidationError::InvalidCount),
    };

    if count <= 0 {
        return Err(ValidationError::InvalidCount);
    }
    if count > MAX_QUESTION_COUNT as i64 {
        return Err(ValidationError::CountTooLarge {
            max: MAX_QUESTION_COUNT,
        });
    }
    Ok(count as usize)
}

impl SetupState {
    fn focus_order() -> Vec<SetupFocus> {
        let mut order: Vec<SetupFocus> = (0..PRESET_COUNTS.len()).map(SetupFocus::Preset).collect();
        order.push(SetupFocus::Custom);
        order
    }

    fn move_focus(&mut self, forward: bool) {
        let order = Self::focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % order.len()
        } else {
            (pos + order.len() - 1) % order.len()
        };
        self.focus = order[next];
    }

    /// Start from the focused preset, or validate the custom entry.
    pub fn confirm(&mut self) -> SetupAction {
        match self.focus {
            SetupFocus::Preset(i) => SetupAction::Start(PRESET_COUNTS[i]),
            SetupFocus::Custom => match validate_count(&self.input_buffer) {
                Ok(count) => {
                    self.error = None;
                    SetupAction::Start(count)
                }
                Err(e) => {
                    self.error = Some(e);
                    SetupAction::None
                }
            },
        }
    }
}

pub fn handle_setup_input(state: &mut SetupState, key: KeyEvent) -> SetupAction {
    match key.code {
        KeyCode::Esc => SetupAction::Quit,
        KeyCode::Left | KeyCode::Up | KeyCode::BackTab => {
            state.move_focus(false);
            SetupAction::None
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Tab => {
            state.move_focus(true);
            SetupAction::None
        }
        KeyCode::Enter => state.confirm(),
        KeyCode::Backspace => {
            if state.focus == SetupFocus::Custom {
                state.input_buffer.pop();
                state.error = None;
            }
            SetupAction::None
        }
        KeyCode::Char(c) => {
            state.focus = SetupFocus::Custom;
            state.input_buffer.push(c);
            state.error = None;
            SetupAction::None
        }
        _ => SetupAction::None,
    }
}
