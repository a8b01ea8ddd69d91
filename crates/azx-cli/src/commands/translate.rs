use anyhow::Result;

use azx_config::Settings;
use azx_services::{TranslatorClient, confidence_band};

pub async fn handle(settings: &Settings, text: Option<String>, to: Option<String>) -> Result<()> {
    let text = text.unwrap_or_else(|| settings.translate_text());
    let to = to.unwrap_or_else(|| settings.translate_to());

    let client = TranslatorClient::new(settings.translator()?)?;
    let items = client.translate(&text, &to).await?;

    println!("{}", serde_json::to_string_pretty(&items)?);
    for item in &items {
        if let Some(detected) = &item.detected_language {
            println!(
                "Detected language: {} (score {:.2}, {} confidence)",
                detected.language,
                detected.score,
                confidence_band(detected.score)
            );
        }
        for translation in &item.translations {
            println!("[{}] {}", translation.to, translation.text);
        }
    }
    Ok(())
}
