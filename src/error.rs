// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("speech engine is not initialized")]
    Unavailable,
    #[error("speech backend error: {0}")]
    Backend(#[from] tts::Error),
    #[error("no voice with id {0}")]
    VoiceNotFound(String),
    #[error("voice index {index} is out of range (0..{count})")]
    VoiceIndexOutOfRange { index: usize, count: usize },
    #[error("speech worker thread panicked")]
    Worker,
}

#[derive(Debug, Error)]
pub enum TextSourceError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} contains no lines", .path.display())]
    Empty { path: PathBuf },
}

impl TextSourceError {
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        TextSourceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
}
