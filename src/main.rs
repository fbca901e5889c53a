// src/main.rs

use std::io;

use log::{error, info};

use tt_tool::app::App;
use tt_tool::config::Config;
use tt_tool::console::{terminal_width, Console};
use tt_tool::event_monitor::start_interrupt_monitor;
use tt_tool::i18n::{resolve_locale, I18nManager};
use tt_tool::startup;
use tt_tool::text_source::TextSource;
use tt_tool::tts_engine::{SpeechEngine, TtsBackend};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simple_logging::log_to_file("tt_tool.log", log::LevelFilter::Info)?;
    info!("-----------------------------------------");
    info!("tt_tool starting");
    info!("-----------------------------------------");

    let config = Config::load();
    info!("Configuration loaded: {:?}", config);

    let system_locale = sys_locale::get_locale();
    let locale = resolve_locale(config.language.as_deref(), system_locale.as_deref());
    info!("UI language: {} (system locale {:?})", locale, system_locale);
    let i18n = I18nManager::new(locale)?;

    start_interrupt_monitor(i18n.get_text("interrupted"));

    if startup::installed_backends().is_empty() {
        for key in ["backend_missing", "backend_install", "backend_recommend", "backend_optional"] {
            println!("{}", i18n.get_text(key));
        }
        println!();
    }

    let engine = SpeechEngine::new(
        Box::new(TtsBackend::connect),
        config.initial_settings(),
        config.custom_voice.clone(),
    );
    let console = Console::new(io::stdin().lock(), io::stdout(), terminal_width());
    let unexpected = i18n.get_text("unexpected_error");
    let mut app = App::new(
        console,
        engine,
        TextSource::new(&config.text_file),
        i18n,
        rand::thread_rng(),
    );

    if let Err(e) = app.initialize_engine().and_then(|()| app.run()) {
        error!("Menu loop aborted: {}", e);
        println!("{}", unexpected.replace("{error}", &e.to_string()));
    }

    info!("tt_tool exiting");
    Ok(())
}
