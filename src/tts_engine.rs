// src/tts_engine.rs

use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};
use tts::Tts;

use crate::error::EngineError;
use crate::settings::{Settings, DEFAULT_RATE, MAX_RATE, MIN_RATE};
use crate::voice::{select_best_voice, Gender, VoiceInfo};

/// What the menu needs from a speech synthesizer.
pub trait SpeechBackend: Send {
    fn voices(&self) -> Result<Vec<VoiceInfo>, EngineError>;
    fn set_rate(&mut self, wpm: u32) -> Result<(), EngineError>;
    fn set_volume(&mut self, volume: f32) -> Result<(), EngineError>;
    fn set_voice(&mut self, id: &str) -> Result<(), EngineError>;
    /// Returns once playback has finished.
    fn speak_blocking(&mut self, text: &str) -> Result<(), EngineError>;
    fn stop(&mut self) -> Result<(), EngineError>;
}

pub type Connector<B> = Box<dyn Fn() -> Result<B, EngineError>>;

// --- tts crate backend ---

const SPEAKING_POLL: Duration = Duration::from_millis(50);
const SPEAKING_GRACE: Duration = Duration::from_millis(150);

pub struct TtsBackend {
    tts: Tts,
    voices: Vec<tts::Voice>,
}

impl TtsBackend {
    pub fn connect() -> Result<Self, EngineError> {
        let tts = Tts::default()?;
        let voices = tts.voices()?;
        info!("tts backend connected, {} voices reported", voices.len());
        Ok(TtsBackend { tts, voices })
    }
}

impl SpeechBackend for TtsBackend {
    fn voices(&self) -> Result<Vec<VoiceInfo>, EngineError> {
        Ok(self.voices.iter().map(voice_info_from_tts).collect())
    }

    fn set_rate(&mut self, wpm: u32) -> Result<(), EngineError> {
        if !self.tts.supported_features().rate {
            debug!("backend has no rate control, ignoring {} WPM", wpm);
            return Ok(());
        }
        let rate = wpm_to_backend_rate(
            wpm,
            self.tts.min_rate(),
            self.tts.normal_rate(),
            self.tts.max_rate(),
        );
        self.tts.set_rate(rate)?;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), EngineError> {
        if !self.tts.supported_features().volume {
            debug!("backend has no volume control, ignoring {}", volume);
            return Ok(());
        }
        let min = self.tts.min_volume();
        let max = self.tts.max_volume();
        self.tts.set_volume(min + volume * (max - min))?;
        Ok(())
    }

    fn set_voice(&mut self, id: &str) -> Result<(), EngineError> {
        let voice = self
            .voices
            .iter()
            .find(|v| v.id() == id)
            .ok_or_else(|| EngineError::VoiceNotFound(id.to_string()))?;
        if self.tts.supported_features().voice {
            self.tts.set_voice(voice)?;
        }
        Ok(())
    }

    fn speak_blocking(&mut self, text: &str) -> Result<(), EngineError> {
        self.tts.speak(text, true)?;
        if !self.tts.supported_features().is_speaking {
            warn!("backend cannot report playback state, not waiting for speech to end");
            return Ok(());
        }
        thread::sleep(SPEAKING_GRACE);
        while self.tts.is_speaking()? {
            thread::sleep(SPEAKING_POLL);
        }
        debug!("playback finished");
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        if self.tts.supported_features().stop {
            self.tts.stop()?;
        }
        Ok(())
    }
}

fn voice_info_from_tts(voice: &tts::Voice) -> VoiceInfo {
    VoiceInfo {
        name: voice.name(),
        id: voice.id(),
        languages: Some(vec![voice.language().as_str().to_owned()]),
        age: None,
        gender: voice.gender().map(|g| match g {
            tts::Gender::Male => Gender::Male,
            tts::Gender::Female => Gender::Female,
        }),
    }
}

/// Maps words per minute onto the backend's native scale, piecewise linear
/// through (MIN_RATE, min), (DEFAULT_RATE, normal), (MAX_RATE, max).
pub fn wpm_to_backend_rate(wpm: u32, min: f32, normal: f32, max: f32) -> f32 {
    let wpm = wpm.clamp(MIN_RATE, MAX_RATE) as f32;
    let default = DEFAULT_RATE as f32;
    if wpm <= default {
        let t = (wpm - MIN_RATE as f32) / (default - MIN_RATE as f32);
        min + t * (normal - min)
    } else {
        let t = (wpm - default) / (MAX_RATE as f32 - default);
        normal + t * (max - normal)
    }
}

// --- engine ---

pub struct SpeechEngine<B: SpeechBackend> {
    connect: Connector<B>,
    backend: Option<B>,
    voices: Vec<VoiceInfo>,
    current_voice_id: Option<String>,
    settings: Settings,
    preferred_voice: Option<String>,
}

impl<B: SpeechBackend> SpeechEngine<B> {
    pub fn new(connect: Connector<B>, settings: Settings, preferred_voice: Option<String>) -> Self {
        Self {
            connect,
            backend: None,
            voices: Vec::new(),
            current_voice_id: None,
            settings,
            preferred_voice,
        }
    }

    pub fn initialize(&mut self) -> Result<(), EngineError> {
        self.backend = None;
        self.voices.clear();
        self.current_voice_id = None;

        let mut backend = (self.connect)().map_err(|e| {
            error!("Failed to initialize speech engine: {}", e);
            e
        })?;
        let voices = backend.voices()?;

        if let Some(index) = self.choose_voice(&voices) {
            let voice = &voices[index];
            backend.set_voice(&voice.id)?;
            self.current_voice_id = Some(voice.id.clone());
            self.settings = self.settings.with_voice(&voice.name);
            info!("Selected voice '{}' ({})", voice.name, voice.id);
        } else {
            warn!("Backend reported no voices, keeping its default");
        }
        backend.set_rate(self.settings.rate)?;
        backend.set_volume(self.settings.volume)?;

        self.voices = voices;
        self.backend = Some(backend);
        info!(
            "Speech engine ready: {} voices, rate {} WPM, volume {}",
            self.voices.len(),
            self.settings.rate,
            self.settings.volume
        );
        Ok(())
    }

    fn choose_voice(&self, voices: &[VoiceInfo]) -> Option<usize> {
        if voices.is_empty() {
            return None;
        }
        if let Some(name) = &self.preferred_voice {
            if let Some(index) = voices.iter().position(|v| &v.name == name) {
                info!("Using configured voice '{}'", name);
                return Some(index);
            }
            warn!("Configured voice '{}' not found, using automatic selection", name);
        }
        Some(select_best_voice(voices).unwrap_or(0))
    }

    pub fn reinitialize(&mut self) -> Result<(), EngineError> {
        if let Some(mut backend) = self.backend.take() {
            if let Err(e) = backend.stop() {
                debug!("Ignoring stop error during reinitialize: {}", e);
            }
        }
        self.initialize()
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn voices(&self) -> &[VoiceInfo] {
        &self.voices
    }

    pub fn current_voice_id(&self) -> Option<&str> {
        self.current_voice_id.as_deref()
    }

    /// Speaks on a worker thread and waits for it, so the caller never
    /// returns before playback ends.
    pub fn speak(&mut self, text: &str) -> Result<(), EngineError> {
        let settings = self.settings.clone();
        let voice_id = self.current_voice_id.clone();
        let backend = self.backend.as_mut().ok_or(EngineError::Unavailable)?;

        backend.set_rate(settings.rate)?;
        backend.set_volume(settings.volume)?;
        if let Some(id) = &voice_id {
            backend.set_voice(id)?;
        }

        info!("Speaking: '{}'", text);
        let result = thread::scope(|scope| {
            scope
                .spawn(|| backend.speak_blocking(text))
                .join()
                .map_err(|_| EngineError::Worker)
        })?;
        if let Err(e) = &result {
            error!("Speech failed: {}", e);
        }
        result
    }

    pub fn change_voice(&mut self, index: usize) -> Result<&VoiceInfo, EngineError> {
        let count = self.voices.len();
        let voice = self
            .voices
            .get(index)
            .ok_or(EngineError::VoiceIndexOutOfRange { index, count })?;
        if let Some(backend) = self.backend.as_mut() {
            backend.set_voice(&voice.id)?;
        }
        self.current_voice_id = Some(voice.id.clone());
        self.settings = self.settings.with_voice(&voice.name);
        info!("Voice changed to '{}' ({})", voice.name, voice.id);
        Ok(voice)
    }

    pub fn set_rate(&mut self, rate: i64) -> Result<&Settings, EngineError> {
        let backend = self.backend.as_mut().ok_or(EngineError::Unavailable)?;
        let updated = self.settings.with_rate(rate);
        backend.set_rate(updated.rate)?;
        self.settings = updated;
        info!("Rate set to {} WPM", self.settings.rate);
        Ok(&self.settings)
    }

    pub fn set_volume(&mut self, volume: f32) -> Result<&Settings, EngineError> {
        let backend = self.backend.as_mut().ok_or(EngineError::Unavailable)?;
        let updated = self.settings.with_volume(volume);
        backend.set_volume(updated.volume)?;
        self.settings = updated;
        info!("Volume set to {}", self.settings.volume);
        Ok(&self.settings)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Rate(u32),
        Volume(f32),
        Voice(String),
        Speak(String),
        Stop,
    }

    #[derive(Clone, Default)]
    pub struct FakeBackend {
        pub voices: Vec<VoiceInfo>,
        pub calls: Arc<Mutex<Vec<Call>>>,
        /// While set, every property change and speak call fails.
        pub failing: Arc<AtomicBool>,
    }

    impl FakeBackend {
        pub fn with_voices(voices: Vec<VoiceInfo>) -> Self {
            Self {
                voices,
                ..Self::default()
            }
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check(&self) -> Result<(), EngineError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(EngineError::Worker);
            }
            Ok(())
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl SpeechBackend for FakeBackend {
        fn voices(&self) -> Result<Vec<VoiceInfo>, EngineError> {
            Ok(self.voices.clone())
        }

        fn set_rate(&mut self, wpm: u32) -> Result<(), EngineError> {
            self.check()?;
            self.record(Call::Rate(wpm));
            Ok(())
        }

        fn set_volume(&mut self, volume: f32) -> Result<(), EngineError> {
            self.check()?;
            self.record(Call::Volume(volume));
            Ok(())
        }

        fn set_voice(&mut self, id: &str) -> Result<(), EngineError> {
            self.check()?;
            if !self.voices.iter().any(|v| v.id == id) {
                return Err(EngineError::VoiceNotFound(id.to_string()));
            }
            self.record(Call::Voice(id.to_string()));
            Ok(())
        }

        fn speak_blocking(&mut self, text: &str) -> Result<(), EngineError> {
            self.check()?;
            self.record(Call::Speak(text.to_string()));
            Ok(())
        }

        fn stop(&mut self) -> Result<(), EngineError> {
            self.record(Call::Stop);
            Ok(())
        }
    }

    pub fn sample_voices() -> Vec<VoiceInfo> {
        vec![
            VoiceInfo::new("English (America)", "espeak-ng/en-us"),
            VoiceInfo::new("German", "espeak-ng/german"),
            VoiceInfo::new("Kal", "festival/de_kal_diphone"),
        ]
    }

    pub fn engine_with(backend: &FakeBackend) -> SpeechEngine<FakeBackend> {
        let backend = backend.clone();
        SpeechEngine::new(Box::new(move || Ok(backend.clone())), Settings::default(), None)
    }

    pub fn unavailable_engine() -> SpeechEngine<FakeBackend> {
        SpeechEngine::new(Box::new(|| Err(EngineError::Unavailable)), Settings::default(), None)
    }
}
