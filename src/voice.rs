// src/voice.rs

use std::fmt;

const GERMAN_KEYWORDS: [&str; 6] = ["german", "deutsch", "de-de", "de_de", "de", "festival_de"];
const ENGLISH_KEYWORDS: [&str; 4] = ["english", "en-us", "en_us", "en-gb"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => f.write_str("male"),
            Gender::Female => f.write_str("female"),
        }
    }
}

/// A voice as enumerated by the backend. Metadata the backend does not
/// report stays `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceInfo {
    pub name: String,
    pub id: String,
    pub languages: Option<Vec<String>>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
}

impl VoiceInfo {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            languages: None,
            age: None,
            gender: None,
        }
    }

    fn matches_any(&self, keywords: &[&str]) -> bool {
        let name = self.name.to_lowercase();
        let id = self.id.to_lowercase();
        keywords
            .iter()
            .any(|keyword| name.contains(keyword) || id.contains(keyword))
    }

    fn is_festival_german(&self) -> bool {
        let id = self.id.to_lowercase();
        id.contains("festival") && id.contains("de")
    }

    pub fn backend_label(&self) -> Option<&'static str> {
        let id = self.id.to_lowercase();
        if id.contains("festival") && id.contains("de") {
            Some("festival-de - DEUTSCH")
        } else if id.contains("festival") {
            Some("festival")
        } else if id.contains("espeak") {
            Some("espeak")
        } else {
            None
        }
    }
}

/// Picks the default voice: festival German, then any German, then English.
/// Returns `None` when nothing matches; callers fall back to the first voice.
pub fn select_best_voice(voices: &[VoiceInfo]) -> Option<usize> {
    voices
        .iter()
        .position(|v| v.matches_any(&GERMAN_KEYWORDS) && v.is_festival_german())
        .or_else(|| voices.iter().position(|v| v.matches_any(&GERMAN_KEYWORDS)))
        .or_else(|| voices.iter().position(|v| v.matches_any(&ENGLISH_KEYWORDS)))
}
