//! Sound cues and word pronunciation.
//!
//! Cues go to the terminal bell. Speech is handed to the first TTS command
//! found on `PATH`; without one, speaking does nothing.

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use crate::logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Click,
    Correct,
    Wrong,
    Win,
}

impl SoundCue {
    /// Number of terminal bells rung for the cue.
    pub fn bells(self) -> usize {
        match self {
            SoundCue::Click | SoundCue::Correct | SoundCue::Wrong => 1,
            SoundCue::Win => 2,
        }
    }
}

pub trait AudioOutput {
    /// Never fails; problems are logged.
    fn play(&mut self, cue: SoundCue);
    /// Pronounce `word`, cutting off whatever is still being spoken.
    fn speak(&mut self, word: &str);
    /// Housekeeping run once per frame.
    fn poll(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoiceConfig {
    pub language: String,
    /// Relative to the engine's normal speed.
    pub rate: f32,
    /// Relative to the engine's normal pitch.
    pub pitch: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: "en-us".to_string(),
            rate: 0.9,
            pitch: 1.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpeechKind {
    Espeak,
    Say,
}

#[derive(Debug, Clone, PartialEq)]
struct SpeechEngine {
    program: PathBuf,
    kind: SpeechKind,
}

const ESPEAK_WORDS_PER_MINUTE: f32 = 175.0;
const ESPEAK_PITCH: f32 = 50.0;
const SAY_WORDS_PER_MINUTE: f32 = 175.0;

impl SpeechEngine {
    fn detect() -> Option<Self> {
        let candidates = [
            ("espeak-ng", SpeechKind::Espeak),
            ("espeak", SpeechKind::Espeak),
            ("say", SpeechKind::Say),
        ];
        let path = env::var_os("PATH")?;
        for dir in env::split_paths(&path) {
            for (name, kind) in candidates {
                let program = dir.join(name);
                if program.is_file() {
                    return Some(Self { program, kind });
                }
            }
        }
        None
    }

    fn args(&self, word: &str, voice: &VoiceConfig) -> Vec<String> {
        match self.kind {
            SpeechKind::Espeak => vec![
                "-v".to_string(),
                voice.language.clone(),
                "-s".to_string(),
                ((ESPEAK_WORDS_PER_MINUTE * voice.rate).round() as u32).to_string(),
                "-p".to_string(),
                ((ESPEAK_PITCH * voice.pitch).min(99.0).round() as u32).to_string(),
                word.to_string(),
            ],
            SpeechKind::Say => vec![
                "-r".to_string(),
                ((SAY_WORDS_PER_MINUTE * voice.rate).round() as u32).to_string(),
                word.to_string(),
            ],
        }
    }
}

/// Audio and speech for the running game.
///
/// The speech engine is looked up the first time a word is spoken and the
/// result is kept for the rest of the process.
#[derive(Debug)]
pub struct TerminalAudio {
    sound: bool,
    speech: bool,
    voice: VoiceConfig,
    engine: Option<Option<SpeechEngine>>,
    utterance: Option<Child>,
}

impl TerminalAudio {
    pub fn new(sound: bool, speech: bool) -> Self {
        Self {
            sound,
            speech,
            voice: VoiceConfig::default(),
            engine: None,
            utterance: None,
        }
    }

    fn engine(&mut self) -> Option<&SpeechEngine> {
        self.engine
            .get_or_insert_with(|| {
                let engine = SpeechEngine::detect();
                match &engine {
                    Some(e) => logger::log(&format!("Speech engine: {}", e.program.display())),
                    None => logger::log("No speech engine found, pronunciation disabled"),
                }
                engine
            })
            .as_ref()
    }

    /// Reap an utterance that finished on its own.
    fn reap_utterance(&mut self) {
        let finished = match self.utterance.as_mut() {
            Some(child) => !matches!(child.try_wait(), Ok(None)),
            None => false,
        };
        if finished {
            self.utterance = None;
        }
    }

    fn cancel_utterance(&mut self) {
        if let Some(mut child) = self.utterance.take() {
            if let Ok(None) = child.try_wait() {
                let _ = child.kill();
            }
            let _ = child.wait();
        }
    }

    fn ring(count: usize) -> io::Result<()> {
        let mut stdout = io::stdout();
        for _ in 0..count {
            stdout.write_all(b"\x07")?;
        }
        stdout.flush()
    }
}

impl AudioOutput for TerminalAudio {
    fn poll(&mut self) {
        self.reap_utterance();
    }

    fn play(&mut self, cue: SoundCue) {
        if !self.sound || cue.bells() == 0 {
            return;
        }
        if let Err(e) = Self::ring(cue.bells()) {
            logger::log(&format!("Audio error ({:?}): {}", cue, e));
        }
    }

    fn speak(&mut self, word: &str) {
        if !self.speech {
            return;
        }
        self.cancel_utterance();

        let voice = self.voice.clone();
        let Some(engine) = self.engine() else {
            return;
        };
        let program = engine.program.clone();
        let args = engine.args(word, &voice);

        match Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => self.utterance = Some(child),
            Err(e) => logger::log(&format!("Speech error for {:?}: {}", word, e)),
        }
    }
}

impl Drop for TerminalAudio {
    fn drop(&mut self) {
        self.cancel_utterance();
    }
}

/// What an `AudioOutput` was asked to do, for tests.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    Cue(SoundCue),
    Speak(String),
}

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub events: std::sync::Arc<std::sync::Mutex<Vec<AudioEvent>>>,
    pub polls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl RecordingAudio {
    pub fn take(&self) -> Vec<AudioEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }
}

#[cfg(test)]
impl AudioOutput for RecordingAudio {
    fn play(&mut self, cue: SoundCue) {
        self.events.lock().unwrap().push(AudioEvent::Cue(cue));
    }

    fn speak(&mut self, word: &str) {
        self.events
            .lock()
            .unwrap()
            .push(AudioEvent::Speak(word.to_string()));
    }

    fn poll(&mut self) {
        self.polls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_espeak_arguments_follow_voice() {
        let engine = SpeechEngine {
            program: PathBuf::from("/usr/bin/espeak-ng"),
            kind: SpeechKind::Espeak,
        };
        let args = engine.args("Elephant", &VoiceConfig::default());
        assert_eq!(args, vec!["-v", "en-us", "-s", "158", "-p", "55", "Elephant"]);
    }

    #[test]
    fn test_say_arguments() {
        let engine = SpeechEngine {
            program: PathBuf::from("/usr/bin/say"),
            kind: SpeechKind::Say,
        };
        let args = engine.args("Owl", &VoiceConfig::default());
        assert_eq!(args, vec!["-r", "158", "Owl"]);
    }

    #[test]
    fn test_disabled_audio_is_silent() {
        let mut audio = TerminalAudio::new(false, false);
        audio.play(SoundCue::Win);
        audio.speak("Cat");
        assert!(audio.engine.is_none());
        assert!(audio.utterance.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_poll_reaps_finished_utterance() {
        let mut audio = TerminalAudio::new(false, true);
        let mut child = Command::new("true").spawn().unwrap();
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        while matches!(child.try_wait(), Ok(None)) && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        audio.utterance = Some(child);

        audio.poll();
        assert!(audio.utterance.is_none());
    }

    #[test]
    fn test_cue_bells() {
        assert_eq!(SoundCue::Click.bells(), 1);
        assert_eq!(SoundCue::Correct.bells(), 1);
        assert_eq!(SoundCue::Win.bells(), 2);
    }

    #[test]
    fn test_recording_audio_collects_events() {
        let mut audio = RecordingAudio::default();
        audio.play(SoundCue::Correct);
        audio.speak("Cat");
        assert_eq!(
            audio.take(),
            vec![AudioEvent::Cue(SoundCue::Correct), AudioEvent::Speak("Cat".to_string())]
        );
        assert!(audio.take().is_empty());
    }
}
