// src/app.rs

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use log::{error, info, warn};
use rand::Rng;

use crate::console::{Color, Console};
use crate::error::{EngineError, InputError, TextSourceError};
use crate::i18n::I18nManager;
use crate::menu::Command;
use crate::text_source::{pick_line, TextSource};
use crate::tts_engine::{SpeechBackend, SpeechEngine};

type Handler<A> = fn(&mut A) -> io::Result<()>;

/// Blank input means "keep the current value".
pub fn parse_optional_number<T: FromStr>(input: &str) -> Result<Option<T>, InputError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse()
        .map(Some)
        .map_err(|_| InputError::NotANumber(input.to_string()))
}

pub struct App<B: SpeechBackend, R, W, G> {
    console: Console<R, W>,
    engine: SpeechEngine<B>,
    text_source: TextSource,
    i18n: I18nManager,
    rng: G,
}

impl<B, R, W, G> App<B, R, W, G>
where
    B: SpeechBackend,
    R: BufRead,
    W: Write,
    G: Rng,
{
    pub fn new(
        console: Console<R, W>,
        engine: SpeechEngine<B>,
        text_source: TextSource,
        i18n: I18nManager,
        rng: G,
    ) -> Self {
        Self {
            console,
            engine,
            text_source,
            i18n,
            rng,
        }
    }

    pub fn engine(&self) -> &SpeechEngine<B> {
        &self.engine
    }

    pub fn initialize_engine(&mut self) -> io::Result<()> {
        if let Err(e) = self.engine.initialize() {
            let text = self
                .i18n
                .get_text_with_param("engine_init_failed", "error", &e.to_string());
            self.console.line(&text)?;
            let hint = self.i18n.get_text("engine_init_hint");
            self.console.line(&hint)?;
        }
        Ok(())
    }

    /// Runs until the exit command or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.display_menu()?;
            let prompt = self.i18n.get_text("prompt_choice");
            let Some(input) = self.console.input_prompt(&prompt)? else {
                info!("Input closed, leaving menu loop");
                break;
            };

            let command = Command::parse(&input);
            info!("Menu command: {:?}", command);
            match Self::handler_for(command) {
                Some(handler) => handler(self)?,
                None => break,
            }
        }
        let farewell = self.i18n.get_text("farewell");
        self.console.line(&farewell)
    }

    fn handler_for(command: Command) -> Option<Handler<Self>> {
        let handler: Handler<Self> = match command {
            Command::Exit => return None,
            Command::SpeakRandomLine => Self::speak_random_line,
            Command::ChangeSettings => Self::change_settings,
            Command::ShowStatus => Self::show_status,
            Command::ListVoices => Self::show_voices,
            Command::ChangeVoice => Self::change_voice,
            Command::SpeakCustomText => Self::speak_custom_text,
            Command::Reinitialize => Self::reinitialize,
            Command::Invalid => Self::invalid_command,
        };
        Some(handler)
    }

    // --- screen helpers ---

    fn banner(&mut self) -> io::Result<()> {
        if self.engine.is_initialized() {
            let status = self
                .i18n
                .get_text_with_param("banner_tts_loaded", "voice", &self.engine.settings().voice);
            self.console.print_banner(&status, Color::Tts)
        } else {
            let status = self.i18n.get_text("banner_tts_missing");
            self.console.print_banner(&status, Color::Error)
        }
    }

    fn display_menu(&mut self) -> io::Result<()> {
        self.banner()?;
        self.console.top_border()?;
        for command in Command::ALL {
            let label = self.i18n.get_text(command.label_key());
            self.console.menu_option(command.key().unwrap_or("?"), &label)?;
        }
        self.console.bottom_border()
    }

    fn task_header(&mut self, title_key: Option<&str>) -> io::Result<()> {
        self.banner()?;
        self.console.top_border()?;
        if let Some(key) = title_key {
            let title = self.i18n.get_text(key);
            self.console.print_centered(&title, Color::Accent)?;
        }
        Ok(())
    }

    fn say(&mut self, color: Color, key: &str) -> io::Result<()> {
        let text = self.i18n.get_text(key);
        self.console.message(color, &text)
    }

    fn say_with(&mut self, color: Color, key: &str, params: &[(&str, &str)]) -> io::Result<()> {
        let text = self.i18n.get_text_with_params(key, params);
        self.console.message(color, &text)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        Ok(self.console.input_prompt(prompt)?.unwrap_or_default())
    }

    fn ask_key(&mut self, key: &str) -> io::Result<String> {
        let prompt = self.i18n.get_text(key);
        self.ask(&prompt)
    }

    fn confirmed(&mut self, key: &str) -> io::Result<bool> {
        let answer = self.ask_key(key)?;
        Ok(answer
            .trim()
            .eq_ignore_ascii_case(&self.i18n.get_text("yes_answer")))
    }

    fn finish(&mut self) -> io::Result<()> {
        self.console.bottom_border()?;
        self.wait_for_return()
    }

    fn wait_for_return(&mut self) -> io::Result<()> {
        self.ask_key("prompt_return").map(|_| ())
    }

    fn unavailable(&mut self, key: &str) -> io::Result<()> {
        self.say(Color::Error, key)?;
        self.finish()
    }

    fn invalid_input(&mut self, e: InputError) -> io::Result<()> {
        warn!("Invalid input: {}", e);
        self.say(Color::Error, "invalid_input")?;
        self.finish()
    }

    fn speak(&mut self, text: &str) -> io::Result<()> {
        match self.engine.speak(text) {
            Ok(()) => Ok(()),
            Err(EngineError::Unavailable) => self.say(Color::Error, "tts_unavailable"),
            Err(e) => self.say_with(Color::Error, "speech_error", &[("error", &e.to_string())]),
        }
    }

    // --- handlers ---

    fn speak_random_line(&mut self) -> io::Result<()> {
        self.task_header(None)?;

        match self.text_source.load() {
            Ok(loaded) => {
                if loaded.created {
                    let file = self.text_source.path().display().to_string();
                    self.say_with(Color::Warning, "file_created", &[("file", &file)])?;
                }
                match pick_line(&loaded.lines, &mut self.rng).map(str::to_owned) {
                    Some(line) => {
                        self.console
                            .print_centered(&format!("\"{}\"", line), Color::Success)?;
                        if self.engine.is_initialized() {
                            self.speak(&line)?;
                        } else {
                            self.say(Color::Error, "tts_unavailable_hint")?;
                        }
                    }
                    None => {
                        let e = TextSourceError::Empty {
                            path: self.text_source.path().to_path_buf(),
                        };
                        warn!("{}", e);
                        self.say(Color::Error, "file_empty")?;
                    }
                }
            }
            Err(e) => {
                error!("{}", e);
                self.say_with(Color::Error, "file_error", &[("error", &e.to_string())])?;
            }
        }

        self.finish()
    }

    fn change_settings(&mut self) -> io::Result<()> {
        self.task_header(Some("settings_title"))?;
        if !self.engine.is_initialized() {
            return self.unavailable("tts_unavailable");
        }

        let settings = self.engine.settings().clone();
        let rate = settings.rate.to_string();
        let volume = settings.volume_percent().to_string();
        for line in [
            self.i18n.get_text("settings_current"),
            self.i18n.get_text_with_param("settings_rate_line", "rate", &rate),
            self.i18n.get_text_with_param("settings_volume_line", "volume", &volume),
            self.i18n.get_text_with_param("settings_voice_line", "voice", &settings.voice),
            String::new(),
        ] {
            self.console.line(&line)?;
        }

        let prompt = self.i18n.get_text_with_param("prompt_rate", "rate", &rate);
        let input = self.ask(&prompt)?;
        match parse_optional_number::<i64>(&input) {
            Ok(Some(rate)) => match self.engine.set_rate(rate) {
                Ok(updated) => {
                    let rate = updated.rate.to_string();
                    self.say_with(Color::Success, "rate_set", &[("rate", &rate)])?;
                }
                Err(e) => {
                    self.say_with(Color::Error, "settings_error", &[("error", &e.to_string())])?
                }
            },
            Ok(None) => {}
            Err(e) => return self.invalid_input(e),
        }

        let prompt = self.i18n.get_text_with_param("prompt_volume", "volume", &volume);
        let input = self.ask(&prompt)?;
        match parse_optional_number::<i64>(&input) {
            Ok(Some(percent)) => match self.engine.set_volume(percent as f32 / 100.0) {
                Ok(updated) => {
                    let volume = updated.volume_percent().to_string();
                    self.say_with(Color::Success, "volume_set", &[("volume", &volume)])?;
                }
                Err(e) => {
                    self.say_with(Color::Error, "settings_error", &[("error", &e.to_string())])?
                }
            },
            Ok(None) => {}
            Err(e) => return self.invalid_input(e),
        }

        if self.confirmed("prompt_test_settings")? {
            let text = self.i18n.get_text("test_settings_text");
            self.speak(&text)?;
        }
        self.finish()
    }

    fn status_lines(&self) -> Vec<String> {
        if !self.engine.is_initialized() {
            return vec![self.i18n.get_text("status_not_initialized")];
        }
        let settings = self.engine.settings();
        vec![
            self.i18n.get_text("status_active"),
            self.i18n.get_text_with_param("status_voice", "voice", &settings.voice),
            self.i18n
                .get_text_with_param("status_rate", "rate", &settings.rate.to_string()),
            self.i18n.get_text_with_param(
                "status_volume",
                "volume",
                &settings.volume_percent().to_string(),
            ),
            self.i18n.get_text_with_param(
                "status_voice_count",
                "count",
                &self.engine.voices().len().to_string(),
            ),
        ]
    }

    fn show_status(&mut self) -> io::Result<()> {
        self.task_header(Some("status_title"))?;
        for line in self.status_lines() {
            self.console.line(&line)?;
        }
        self.console.line("")?;

        self.console.bottom_border()?;
        if self.engine.is_initialized() && self.confirmed("prompt_status_test")? {
            let text = self.i18n.get_text("status_test_text");
            self.speak(&text)?;
        }
        self.wait_for_return()
    }

    fn voice_lines(&self) -> Vec<String> {
        let voices = self.engine.voices();
        if voices.is_empty() {
            return vec![self.i18n.get_text("voices_none")];
        }

        let mut lines = vec![self.i18n.get_text("voices_header"), "=".repeat(50)];
        let active = self.i18n.get_text("voices_active");
        for (index, voice) in voices.iter().enumerate() {
            let marker = if Some(voice.id.as_str()) == self.engine.current_voice_id() {
                active.as_str()
            } else {
                " "
            };
            let label = voice
                .backend_label()
                .map(|l| format!(" [{}]", l))
                .unwrap_or_default();
            let languages = match &voice.languages {
                Some(langs) if !langs.is_empty() => format!(" [{}]", langs.join(", ")),
                _ => String::new(),
            };
            lines.push(format!("  {} {}: {}{}{}", marker, index, voice.name, label, languages));
            lines.push(format!(
                "      {}",
                self.i18n.get_text_with_param("voice_id", "id", &voice.id)
            ));
            if let Some(age) = voice.age {
                lines.push(format!(
                    "      {}",
                    self.i18n.get_text_with_param("voice_age", "age", &age.to_string())
                ));
            }
            if let Some(gender) = voice.gender {
                lines.push(format!(
                    "      {}",
                    self.i18n
                        .get_text_with_param("voice_gender", "gender", &gender.to_string())
                ));
            }
            lines.push(String::new());
        }
        lines
    }

    fn list_voices(&mut self) -> io::Result<()> {
        for line in self.voice_lines() {
            self.console.line(&line)?;
        }
        Ok(())
    }

    fn show_voices(&mut self) -> io::Result<()> {
        self.task_header(Some("voices_title"))?;
        self.list_voices()?;
        self.finish()
    }

    fn change_voice(&mut self) -> io::Result<()> {
        self.task_header(Some("change_voice_title"))?;
        if !self.engine.is_initialized() {
            return self.unavailable("tts_unavailable");
        }
        self.list_voices()?;
        self.console.bottom_border()?;

        let input = self.ask_key("prompt_voice_index")?;
        let index = match parse_optional_number::<i64>(&input) {
            Ok(Some(index)) => index,
            Ok(None) => return self.wait_for_return(),
            Err(e) => {
                warn!("Invalid voice index: {}", e);
                self.say(Color::Error, "invalid_input")?;
                return self.wait_for_return();
            }
        };

        let Ok(index) = usize::try_from(index) else {
            warn!("Rejected negative voice index {}", index);
            self.say(Color::Error, "invalid_voice_index")?;
            return self.wait_for_return();
        };
        match self.engine.change_voice(index).map(|v| v.name.clone()) {
            Ok(name) => {
                self.say_with(Color::Success, "voice_changed", &[("voice", &name)])?;
                if self.confirmed("prompt_test_voice")? {
                    let text = self.i18n.get_text("test_voice_text");
                    self.speak(&text)?;
                }
            }
            Err(EngineError::VoiceIndexOutOfRange { .. }) => {
                warn!("Rejected voice index {}", index);
                self.say(Color::Error, "invalid_voice_index")?;
            }
            Err(e) => {
                error!("Voice change failed: {}", e);
                self.say_with(Color::Error, "voice_change_error", &[("error", &e.to_string())])?;
            }
        }
        self.wait_for_return()
    }

    fn speak_custom_text(&mut self) -> io::Result<()> {
        self.task_header(Some("custom_title"))?;
        if !self.engine.is_initialized() {
            return self.unavailable("tts_unavailable");
        }
        self.console.bottom_border()?;

        let input = self.ask_key("prompt_custom")?;
        let text = input.trim().to_string();
        if !text.is_empty() {
            self.speak(&text)?;
        }

        self.task_header(Some("custom_title"))?;
        if text.is_empty() {
            self.say(Color::Warning, "custom_empty")?;
        } else {
            self.console.print_centered(&text, Color::Accent)?;
        }
        self.finish()
    }

    fn reinitialize(&mut self) -> io::Result<()> {
        self.task_header(Some("reinit_title"))?;
        self.say(Color::Warning, "reinit_running")?;

        match self.engine.reinitialize() {
            Ok(()) => self.say(Color::Success, "reinit_ok")?,
            Err(e) => {
                error!("Reinitialize failed: {}", e);
                self.say(Color::Error, "reinit_failed")?;
            }
        }
        self.finish()
    }

    fn invalid_command(&mut self) -> io::Result<()> {
        self.task_header(None)?;
        self.say(Color::Error, "invalid_command")?;
        self.finish()
    }
}
