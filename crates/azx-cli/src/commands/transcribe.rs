use std::path::PathBuf;

use anyhow::{Result, bail};

use azx_config::Settings;
use azx_services::SpeechClient;

pub async fn handle(settings: &Settings, file: Option<PathBuf>, language: String) -> Result<()> {
    let Some(file) = file.or_else(|| settings.speech_audio_path().map(PathBuf::from)) else {
        bail!("No audio file given: pass --file or set SPEECH_AUDIO_PATH");
    };
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let client = SpeechClient::new(settings.speech()?)?;
    println!("Transcribing {} ({})", file.display(), language);
    let result = client.transcribe(&file, &language).await?;

    match result.transcript() {
        Some(text) => {
            println!("✓ Recognized speech");
            println!("  Transcript: {}", text);
        }
        None => println!(
            "No speech recognized (status: {})",
            result.recognition_status
        ),
    }
    Ok(())
}
