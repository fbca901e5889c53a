// src/text_source.rs

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand::Rng;

use crate::error::TextSourceError;

pub const DEFAULT_LINES: [&str; 2] = ["Hallo!", "I use Arch btw"];

#[derive(Debug)]
pub struct LoadedText {
    pub lines: Vec<String>,
    pub created: bool,
}

#[derive(Debug, Clone)]
pub struct TextSource {
    path: PathBuf,
}

impl TextSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every candidate line, writing the default content first if the
    /// file does not exist yet.
    pub fn load(&self) -> Result<LoadedText, TextSourceError> {
        let created = if self.path.exists() {
            false
        } else {
            fs::write(&self.path, DEFAULT_LINES.join("\n"))
                .map_err(|e| TextSourceError::io(&self.path, e))?;
            warn!("Text file {} did not exist, wrote default content", self.path.display());
            true
        };

        let content =
            fs::read_to_string(&self.path).map_err(|e| TextSourceError::io(&self.path, e))?;
        let lines = candidate_lines(&content);
        info!("Loaded {} candidate lines from {}", lines.len(), self.path.display());

        Ok(LoadedText { lines, created })
    }
}

pub fn candidate_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn pick_line<'a, R: Rng + ?Sized>(lines: &'a [String], rng: &mut R) -> Option<&'a str> {
    if lines.is_empty() {
        return None;
    }
    Some(&lines[rng.gen_range(0..lines.len())])
}
