//! End-to-end tests driving `App` with synthetic keys, worker responses and clock instants.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ai::generator::MockContentProvider;
use crate::app::App;
use crate::audio::{AudioEvent, RecordingAudio, SoundCue};
use crate::config::AppConfig;
use crate::error::{ContentError, ValidationError};
use crate::media::StaticIllustrations;
use crate::models::{FinalScore, Question, QuestionKey, Screen, WorkerRequest, WorkerResponse};
use crate::play::{AnswerState, MediaState};
use crate::scoring::{message_tier, MessageTier};
use crate::worker::{spawn_worker, WorkerTimeouts};

struct Harness {
    app: App,
    audio: RecordingAudio,
    requests: Receiver<WorkerRequest>,
    now: Instant,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    fn with_config(config: AppConfig) -> Self {
        let (tx, requests) = mpsc::channel();
        let audio = RecordingAudio::default();
        let app = App::new(config, Box::new(audio.clone()), tx);
        Self {
            app,
            audio,
            requests,
            now: Instant::now(),
        }
    }

    fn press(&mut self, code: KeyCode) {
        self.app
            .handle_key(KeyEvent::new(code, KeyModifiers::empty()), self.now);
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Let `ms` milliseconds pass and fire whatever became due.
    fn wait(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
        self.app.fire_due_timers(self.now);
        self.app.on_tick(self.now);
    }

    fn expect_quiz_request(&self) -> (u64, usize) {
        match self.requests.try_recv() {
            Ok(WorkerRequest::GenerateQuiz { request_id, count }) => (request_id, count),
            other => panic!("expected a quiz request, got {:?}", other),
        }
    }

    fn expect_illustration_request(&self) -> QuestionKey {
        match self.requests.try_recv() {
            Ok(WorkerRequest::LoadIllustration { key, url }) => {
                assert!(url.starts_with("https://image.pollinations.ai/prompt/"));
                key
            }
            other => panic!("expected an illustration request, got {:?}", other),
        }
    }

    /// Start a quiz of `questions.len()` questions and deliver them.
    fn start_with(&mut self, questions: Vec<Question>) {
        self.type_text(&questions.len().to_string());
        self.press(KeyCode::Enter);
        let (request_id, count) = self.expect_quiz_request();
        assert_eq!(count, questions.len());
        self.app.handle_worker_response(WorkerResponse::QuizReady {
            request_id,
            questions,
        });
        assert_eq!(self.app.session().screen(), Screen::Playing);
    }

    fn load_illustration(&mut self) {
        let key = self.expect_illustration_request();
        self.app
            .handle_worker_response(WorkerResponse::IllustrationLoaded { key });
    }

    fn current_index(&self) -> usize {
        self.app.play().map(|p| p.current_index).unwrap_or(usize::MAX)
    }

    fn score(&self) -> usize {
        self.app.play().map(|p| p.score).unwrap_or(0)
    }
}

fn zoo() -> Vec<Question> {
    vec![
        Question::new("Cat", "แมว", &["Dog", "Cat", "Ant", "Lion"]),
        Question::new("Dog", "สุนัข", &["Dog", "Bird", "Fish", "Cow"]),
        Question::new("Lion", "สิงโต", &["Tiger", "Bear", "Lion", "Owl"]),
    ]
}

#[test]
fn test_cat_dog_lion_playthrough() {
    let mut h = Harness::new();
    h.start_with(zoo());

    // Cat, first try.
    h.load_illustration();
    h.press(KeyCode::Char('2'));
    assert_eq!(h.score(), 1);
    h.wait(1500);
    assert_eq!(h.current_index(), 1);

    // Dog, second try.
    h.load_illustration();
    h.press(KeyCode::Char('2'));
    assert_eq!(h.app.play().map(|p| p.answer), Some(AnswerState::Incorrect));
    h.press(KeyCode::Char('1'));
    assert_eq!(h.score(), 1);
    h.wait(1500);

    // Lion, first try.
    h.load_illustration();
    h.press(KeyCode::Char('3'));
    h.wait(1500);

    assert_eq!(h.app.session().screen(), Screen::Finished);
    let result = h.app.session().final_score();
    assert_eq!(result, FinalScore { score: 2, total: 3 });
    assert_eq!(message_tier(result), MessageTier::Good);

    assert_eq!(
        h.audio.take(),
        vec![
            AudioEvent::Cue(SoundCue::Click),
            AudioEvent::Cue(SoundCue::Correct),
            AudioEvent::Speak("Cat".to_string()),
            AudioEvent::Cue(SoundCue::Wrong),
            AudioEvent::Cue(SoundCue::Correct),
            AudioEvent::Speak("Dog".to_string()),
            AudioEvent::Cue(SoundCue::Correct),
            AudioEvent::Speak("Lion".to_string()),
            AudioEvent::Cue(SoundCue::Win),
        ]
    );
}

#[test]
fn test_win_cue_plays_once() {
    let mut h = Harness::new();
    h.start_with(vec![Question::new("Cat", "แมว", &["Cat", "Dog"])]);
    h.load_illustration();
    h.press(KeyCode::Char('1'));
    h.wait(1500);
    assert_eq!(h.app.session().screen(), Screen::Finished);
    assert!(h.app.celebration().is_some());

    for _ in 0..100 {
        h.wait(100);
    }
    let wins = h
        .audio
        .take()
        .into_iter()
        .filter(|e| *e == AudioEvent::Cue(SoundCue::Win))
        .count();
    assert_eq!(wins, 1);
    assert!(h.app.celebration().is_none());
}

#[test]
fn test_enter_advances_and_old_timer_is_ignored() {
    let mut h = Harness::new();
    h.start_with(zoo());
    h.load_illustration();

    h.press(KeyCode::Char('2'));
    h.press(KeyCode::Enter);
    assert_eq!(h.current_index(), 1);

    // The auto-advance scheduled for question 1 must not skip question 2.
    h.wait(2000);
    assert_eq!(h.current_index(), 1);
    assert_eq!(h.app.play().map(|p| p.answer), Some(AnswerState::Unanswered));
}

#[test]
fn test_shake_ends_only_for_latest_attempt() {
    let mut h = Harness::new();
    h.start_with(zoo());
    h.load_illustration();

    h.press(KeyCode::Char('1'));
    h.wait(300);
    h.press(KeyCode::Char('3'));
    assert_eq!(h.app.play().map(|p| p.attempts), Some(2));

    // First shake timer is due now but belongs to attempt 1.
    h.wait(250);
    assert_eq!(h.app.play().map(|p| p.shaking), Some(true));
    h.wait(250);
    assert_eq!(h.app.play().map(|p| p.shaking), Some(false));
    assert_eq!(h.app.play().map(|p| p.answer), Some(AnswerState::Incorrect));
}

#[test]
fn test_answers_wait_for_illustration() {
    let mut h = Harness::new();
    h.start_with(zoo());
    let key = h.expect_illustration_request();
    h.audio.take();

    h.press(KeyCode::Char('2'));
    assert_eq!(h.score(), 0);
    assert!(h.audio.take().is_empty());

    // A response for another round changes nothing.
    h.app
        .handle_worker_response(WorkerResponse::IllustrationLoaded {
            key: QuestionKey {
                round: key.round + 1,
                index: key.index,
            },
        });
    assert_eq!(h.app.play().map(|p| p.media), Some(MediaState::Loading));

    h.app
        .handle_worker_response(WorkerResponse::IllustrationFailed {
            key,
            error: "502".to_string(),
        });
    assert_eq!(h.app.play().map(|p| p.media), Some(MediaState::Unavailable));
    h.press(KeyCode::Char('2'));
    assert_eq!(h.score(), 1);
}

#[test]
fn test_illustrations_disabled_skip_the_worker() {
    let config = AppConfig {
        illustrations: false,
        ..AppConfig::default()
    };
    let mut h = Harness::with_config(config);
    h.start_with(zoo());

    assert!(h.requests.try_recv().is_err());
    assert_eq!(h.app.play().map(|p| p.media), Some(MediaState::Unavailable));
    h.press(KeyCode::Char('2'));
    assert_eq!(h.score(), 1);
}

#[test]
fn test_keyboard_highlight_and_space_submit() {
    let mut h = Harness::new();
    h.start_with(zoo());
    h.load_illustration();

    h.press(KeyCode::Right);
    h.press(KeyCode::Char(' '));
    assert_eq!(h.app.play().map(|p| p.answer), Some(AnswerState::Correct));
    assert_eq!(h.score(), 1);
}

#[test]
fn test_speak_replays_without_scoring() {
    let mut h = Harness::new();
    h.start_with(zoo());
    h.load_illustration();
    h.audio.take();

    h.press(KeyCode::Char('s'));
    assert_eq!(
        h.audio.take(),
        vec![
            AudioEvent::Cue(SoundCue::Click),
            AudioEvent::Speak("Cat".to_string())
        ]
    );
    assert_eq!(h.score(), 0);
    assert_eq!(h.app.play().map(|p| p.attempts), Some(0));
}

#[test]
fn test_failure_then_restart() {
    let mut h = Harness::new();
    h.press(KeyCode::Enter);
    let (request_id, count) = h.expect_quiz_request();
    assert_eq!(count, 10);

    h.app.handle_worker_response(WorkerResponse::QuizFailed {
        request_id,
        error: ContentError::Malformed("expected value".to_string()),
    });
    assert_eq!(h.app.session().screen(), Screen::Error);
    assert!(h.app.play().is_none());

    h.audio.take();
    h.press(KeyCode::Char('r'));
    assert_eq!(h.app.session().screen(), Screen::Setup);
    assert!(h.app.session().questions().is_empty());
    assert_eq!(h.audio.take(), vec![AudioEvent::Cue(SoundCue::Click)]);
}

#[test]
fn test_empty_batch_never_reaches_play() {
    let mut h = Harness::new();
    h.press(KeyCode::Enter);
    let (request_id, _) = h.expect_quiz_request();
    h.app.handle_worker_response(WorkerResponse::QuizReady {
        request_id,
        questions: Vec::new(),
    });
    assert_eq!(h.app.session().screen(), Screen::Error);
    assert!(h.app.play().is_none());
}

#[test]
fn test_restart_after_finish_resets_everything() {
    let mut h = Harness::new();
    h.start_with(vec![Question::new("Cat", "แมว", &["Cat", "Dog"])]);
    h.load_illustration();
    h.press(KeyCode::Char('1'));
    h.press(KeyCode::Enter);
    assert_eq!(h.app.session().screen(), Screen::Finished);

    h.press(KeyCode::Enter);
    assert_eq!(h.app.session().screen(), Screen::Setup);
    assert_eq!(h.app.session().final_score(), FinalScore::default());
    assert!(h.app.play().is_none());
    assert!(h.app.celebration().is_none());
    assert!(h.app.next_deadline().is_none());
}

#[test]
fn test_outdated_content_response_is_ignored() {
    let mut h = Harness::new();
    h.press(KeyCode::Enter);
    let (request_id, _) = h.expect_quiz_request();

    h.app.handle_worker_response(WorkerResponse::QuizReady {
        request_id: request_id + 7,
        questions: zoo(),
    });
    assert_eq!(h.app.session().screen(), Screen::Loading);

    h.app.handle_worker_response(WorkerResponse::QuizReady {
        request_id,
        questions: zoo(),
    });
    assert_eq!(h.app.session().screen(), Screen::Playing);

    // A late failure for the same request no longer matters.
    h.app.handle_worker_response(WorkerResponse::QuizFailed {
        request_id,
        error: ContentError::EmptyResponse,
    });
    assert_eq!(h.app.session().screen(), Screen::Playing);
}

#[test]
fn test_invalid_counts_stay_on_setup() {
    let mut h = Harness::new();

    h.type_text("0");
    h.press(KeyCode::Enter);
    assert_eq!(h.app.session().screen(), Screen::Setup);
    assert_eq!(h.app.setup.error, Some(ValidationError::InvalidCount));

    h.press(KeyCode::Backspace);
    h.type_text("51");
    h.press(KeyCode::Enter);
    assert_eq!(h.app.session().screen(), Screen::Setup);
    assert_eq!(
        h.app.setup.error,
        Some(ValidationError::CountTooLarge { max: 50 })
    );

    h.type_text("abc");
    h.press(KeyCode::Enter);
    assert_eq!(h.app.setup.error, Some(ValidationError::InvalidCount));
    assert!(h.requests.try_recv().is_err());
}

#[test]
fn test_missing_worker_shows_error() {
    let (tx, requests) = mpsc::channel();
    drop(requests);
    let mut app = App::new(
        AppConfig::default(),
        Box::new(RecordingAudio::default()),
        tx,
    );
    app.handle_key(
        KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()),
        Instant::now(),
    );
    assert_eq!(app.session().screen(), Screen::Error);
}

#[test]
fn test_each_tick_polls_audio() {
    let mut h = Harness::new();
    h.wait(50);
    h.wait(50);
    assert_eq!(h.audio.polls.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[test]
fn test_ctrl_c_quits_from_any_screen() {
    let mut h = Harness::new();
    h.start_with(zoo());
    assert!(!h.app.should_quit());
    h.app.handle_key(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        h.now,
    );
    assert!(h.app.should_quit());
}

#[test]
fn test_with_background_worker() {
    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let provider = MockContentProvider::new(vec![Ok(zoo())]);
    let _worker = spawn_worker(
        Arc::new(provider),
        Arc::new(StaticIllustrations { fail: false }),
        WorkerTimeouts {
            content: Duration::from_secs(5),
            media: Duration::from_secs(5),
        },
        response_tx,
        request_rx,
    )
    .unwrap();

    let audio = RecordingAudio::default();
    let mut app = App::new(AppConfig::default(), Box::new(audio), request_tx);
    let now = Instant::now();
    let press = |app: &mut App, code| app.handle_key(KeyEvent::new(code, KeyModifiers::empty()), now);

    press(&mut app, KeyCode::Char('3'));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.session().screen(), Screen::Loading);

    let response = response_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    app.handle_worker_response(response);
    assert_eq!(app.session().screen(), Screen::Playing);
    assert_eq!(app.session().questions().len(), 3);

    let response = response_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    app.handle_worker_response(response);
    assert_eq!(app.play().map(|p| p.media), Some(MediaState::Ready));
}
