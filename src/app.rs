//! Application state shared by the event loop, the renderer and the tests.

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::audio::{AudioOutput, SoundCue};
use crate::config::AppConfig;
use crate::error::ContentError;
use crate::logger;
use crate::media::illustration_url;
use crate::models::{QuestionKey, Screen, WorkerRequest, WorkerResponse};
use crate::play::{play_command, AdvanceOutcome, AnswerState, PlayCommand, PlayState, SubmitOutcome};
use crate::session::Session;
use crate::setup::{handle_setup_input, SetupAction, SetupState};
use crate::timer::{Scheduler, TimerKind};
use crate::ui::celebration::Celebration;

/// Upper bound on how long the loop blocks waiting for input.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

pub struct App {
    config: AppConfig,
    session: Session,
    pub setup: SetupState,
    play: Option<PlayState>,
    celebration: Option<Celebration>,
    scheduler: Scheduler,
    audio: Box<dyn AudioOutput>,
    worker_tx: Sender<WorkerRequest>,
    should_quit: bool,
    tick: u64,
}

impl App {
    pub fn new(
        config: AppConfig,
        audio: Box<dyn AudioOutput>,
        worker_tx: Sender<WorkerRequest>,
    ) -> Self {
        Self {
            config,
            session: Session::new(),
            setup: SetupState::default(),
            play: None,
            celebration: None,
            scheduler: Scheduler::new(),
            audio,
            worker_tx,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn play(&self) -> Option<&PlayState> {
        self.play.as_ref()
    }

    pub fn celebration(&self) -> Option<&Celebration> {
        self.celebration.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Earliest pending timer, so the loop can wake up in time for it.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.next_deadline() {
            Some(due) => due.saturating_duration_since(now).min(FRAME_INTERVAL),
            None => FRAME_INTERVAL,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.session.screen() {
            Screen::Setup => match handle_setup_input(&mut self.setup, key) {
                SetupAction::Start(count) => {
                    self.audio.play(SoundCue::Click);
                    self.start_quiz(count);
                }
                SetupAction::Quit => self.should_quit = true,
                SetupAction::None => {}
            },
            Screen::Loading => {}
            Screen::Playing => {
                if let Some(command) = play_command(key) {
                    self.handle_play_command(command, now);
                }
            }
            Screen::Finished | Screen::Error => match key.code {
                KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.audio.play(SoundCue::Click);
                    self.restart();
                }
                _ => {}
            },
        }
    }

    fn start_quiz(&mut self, count: usize) {
        let request_id = match self.session.start_requested(count) {
            Ok(id) => id,
            Err(e) => {
                logger::log(&format!("Cannot start quiz: {}", e));
                return;
            }
        };

        if self
            .worker_tx
            .send(WorkerRequest::GenerateQuiz { request_id, count })
            .is_err()
        {
            logger::log("Worker is gone, cannot request questions");
            if let Err(e) = self
                .session
                .content_failed(request_id, &ContentError::WorkerUnavailable)
            {
                logger::log(&format!("Session error: {}", e));
            }
        }
    }

    fn handle_play_command(&mut self, command: PlayCommand, now: Instant) {
        let Some(play) = self.play.as_mut() else {
            return;
        };

        match command {
            PlayCommand::MoveHighlight(direction) => play.move_highlight(direction),
            PlayCommand::SubmitOption(index) => {
                let outcome = play.submit_option(index);
                self.after_submit(outcome, now);
            }
            PlayCommand::SubmitHighlighted => {
                let index = play.highlighted;
                let outcome = play.submit_option(index);
                self.after_submit(outcome, now);
            }
            PlayCommand::Continue => {
                if play.answer == AnswerState::Correct {
                    self.advance(now);
                } else {
                    let index = play.highlighted;
                    let outcome = play.submit_option(index);
                    self.after_submit(outcome, now);
                }
            }
            PlayCommand::Speak => {
                if play.accepts_answers() || play.answer == AnswerState::Correct {
                    let word = play.current().word.clone();
                    self.audio.play(SoundCue::Click);
                    self.audio.speak(&word);
                }
            }
        }
    }

    fn after_submit(&mut self, outcome: SubmitOutcome, now: Instant) {
        let Some(play) = self.play.as_ref() else {
            return;
        };
        let key = play.key();

        match outcome {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Correct { first_attempt } => {
                logger::log(&format!(
                    "Question {} answered correctly (first attempt: {})",
                    key.index + 1,
                    first_attempt
                ));
                let word = play.current().word.clone();
                self.audio.play(SoundCue::Correct);
                self.audio.speak(&word);
                self.scheduler.schedule(
                    now,
                    self.config.auto_advance_delay,
                    key,
                    TimerKind::AutoAdvance,
                );
            }
            SubmitOutcome::Incorrect { attempts } => {
                self.audio.play(SoundCue::Wrong);
                self.scheduler.schedule(
                    now,
                    self.config.shake_duration,
                    key,
                    TimerKind::EndShake { attempt: attempts },
                );
            }
        }
    }

    fn advance(&mut self, now: Instant) {
        let Some(play) = self.play.as_mut() else {
            return;
        };

        match play.advance() {
            AdvanceOutcome::NextQuestion(_) => self.request_illustration(),
            AdvanceOutcome::Finished(result) => {
                self.scheduler.clear();
                match self.session.finished(result) {
                    Ok(()) => {
                        self.celebration = Some(Celebration::start(now));
                        self.audio.play(SoundCue::Win);
                    }
                    Err(e) => logger::log(&format!("Session error: {}", e)),
                }
            }
        }
    }

    fn request_illustration(&mut self) {
        let Some(play) = self.play.as_mut() else {
            return;
        };
        let key = play.key();

        if !self.config.illustrations {
            play.media_resolved(key, false);
            return;
        }

        let url = match illustration_url(&play.current().word, play.seed) {
            Ok(url) => url,
            Err(e) => {
                logger::log(&format!("Cannot build illustration URL: {}", e));
                play.media_resolved(key, false);
                return;
            }
        };

        if self
            .worker_tx
            .send(WorkerRequest::LoadIllustration { key, url })
            .is_err()
        {
            logger::log("Worker is gone, showing placeholder illustration");
            play.media_resolved(key, false);
        }
    }

    pub fn handle_worker_response(&mut self, response: WorkerResponse) {
        match response {
            WorkerResponse::QuizReady {
                request_id,
                questions,
            } => {
                if self.session.screen() != Screen::Loading {
                    logger::log(&format!("Ignoring questions for request {}", request_id));
                    return;
                }
                match self.session.content_ready(request_id, questions) {
                    Ok(true) if self.session.screen() == Screen::Playing => self.enter_playing(),
                    Ok(_) => {}
                    Err(e) => logger::log(&format!("Session error: {}", e)),
                }
            }
            WorkerResponse::QuizFailed { request_id, error } => {
                if self.session.screen() != Screen::Loading {
                    logger::log(&format!("Ignoring failure for request {}", request_id));
                    return;
                }
                if let Err(e) = self.session.content_failed(request_id, &error) {
                    logger::log(&format!("Session error: {}", e));
                }
            }
            WorkerResponse::IllustrationLoaded { key } => self.resolve_media(key, true),
            WorkerResponse::IllustrationFailed { key, error } => {
                logger::log(&format!("Illustration failed: {}", error));
                self.resolve_media(key, false);
            }
        }
    }

    fn resolve_media(&mut self, key: QuestionKey, loaded: bool) {
        let resolved = self
            .play
            .as_mut()
            .is_some_and(|play| play.media_resolved(key, loaded));
        if !resolved {
            logger::log(&format!("Discarding stale illustration for {:?}", key));
        }
    }

    fn enter_playing(&mut self) {
        self.scheduler.clear();
        self.play = Some(PlayState::new(
            self.session.questions().clone(),
            self.session.request_id(),
        ));
        self.request_illustration();
    }

    /// Run every timer whose deadline has passed.
    pub fn fire_due_timers(&mut self, now: Instant) {
        for timer in self.scheduler.take_due(now) {
            let current = self.play.as_ref().map(|p| p.key());
            if self.session.screen() != Screen::Playing || current != Some(timer.key) {
                logger::log(&format!("Discarding stale {:?} timer", timer.kind));
                continue;
            }

            match timer.kind {
                TimerKind::AutoAdvance => {
                    let correct = self
                        .play
                        .as_ref()
                        .is_some_and(|p| p.answer == AnswerState::Correct);
                    if correct {
                        self.advance(now);
                    }
                }
                TimerKind::EndShake { attempt } => {
                    if let Some(play) = self.play.as_mut() {
                        play.end_shake(timer.key, attempt);
                    }
                }
            }
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        self.audio.poll();
        if let Some(celebration) = self.celebration.as_mut() {
            celebration.update(now);
            if !celebration.is_active(now) {
                self.celebration = None;
            }
        }
    }

    fn restart(&mut self) {
        if let Err(e) = self.session.restart() {
            logger::log(&format!("Session error: {}", e));
            return;
        }
        self.play = None;
        self.celebration = None;
        self.scheduler.clear();
        self.setup = SetupState::default();
    }
}
