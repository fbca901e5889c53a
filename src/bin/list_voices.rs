// src/bin/list_voices.rs
use tt_tool::tts_engine::{SpeechBackend, TtsBackend};
use tt_tool::voice::select_best_voice;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let backend = TtsBackend::connect()?;
    let voices = backend.voices()?;
    let preferred = select_best_voice(&voices).or_else(|| (!voices.is_empty()).then_some(0));

    println!("=============================================");
    println!("        All TTS voices on this system        ");
    println!("=============================================");

    for (index, voice) in voices.iter().enumerate() {
        let marker = if Some(index) == preferred { " (default)" } else { "" };
        println!("  {}: {}{}", index, voice.name, marker);
        println!("  id: {}", voice.id);
        if let Some(languages) = &voice.languages {
            println!("  languages: {}", languages.join(", "));
        }
        if let Some(gender) = voice.gender {
            println!("  gender: {}", gender);
        }
        println!("---------------------------------------------");
    }

    Ok(())
}
