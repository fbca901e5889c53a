// src/lib.rs

pub mod app;
pub mod config;
pub mod console;
pub mod error;
pub mod event_monitor;
pub mod i18n;
pub mod menu;
pub mod settings;
pub mod startup;
pub mod text_source;
pub mod tts_engine;
pub mod voice;
