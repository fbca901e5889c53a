// src/menu.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    SpeakRandomLine,
    ChangeSettings,
    ShowStatus,
    ListVoices,
    ChangeVoice,
    SpeakCustomText,
    Reinitialize,
    Invalid,
}

impl Command {
    /// Menu order, as displayed.
    pub const ALL: [Command; 8] = [
        Command::Exit,
        Command::SpeakRandomLine,
        Command::ChangeSettings,
        Command::ShowStatus,
        Command::ListVoices,
        Command::ChangeVoice,
        Command::SpeakCustomText,
        Command::Reinitialize,
    ];

    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "0" => Command::Exit,
            "1" => Command::SpeakRandomLine,
            "2" => Command::ChangeSettings,
            "3" => Command::ShowStatus,
            "4" => Command::ListVoices,
            "5" => Command::ChangeVoice,
            "6" => Command::SpeakCustomText,
            "7" => Command::Reinitialize,
            _ => Command::Invalid,
        }
    }

    pub fn key(self) -> Option<&'static str> {
        match self {
            Command::Exit => Some("0"),
            Command::SpeakRandomLine => Some("1"),
            Command::ChangeSettings => Some("2"),
            Command::ShowStatus => Some("3"),
            Command::ListVoices => Some("4"),
            Command::ChangeVoice => Some("5"),
            Command::SpeakCustomText => Some("6"),
            Command::Reinitialize => Some("7"),
            Command::Invalid => None,
        }
    }

    pub fn label_key(self) -> &'static str {
        match self {
            Command::Exit => "menu_exit",
            Command::SpeakRandomLine => "menu_random",
            Command::ChangeSettings => "menu_settings",
            Command::ShowStatus => "menu_status",
            Command::ListVoices => "menu_voices",
            Command::ChangeVoice => "menu_change_voice",
            Command::SpeakCustomText => "menu_custom",
            Command::Reinitialize => "menu_reinit",
            Command::Invalid => "invalid_command",
        }
    }
}
