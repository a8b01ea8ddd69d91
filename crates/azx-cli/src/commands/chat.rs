use anyhow::Result;

use azx_config::Settings;
use azx_services::{ChatClient, ChatMessage, ChatRequest};

pub async fn handle(
    settings: &Settings,
    prompt: String,
    system: String,
    temperature: f64,
) -> Result<()> {
    let client = ChatClient::new(settings.openai()?)?;
    let request = ChatRequest {
        messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
        temperature,
        max_tokens: None,
    };

    let response = client.complete(&request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    if let Ok(content) = response.first_content() {
        println!();
        println!("Assistant: {}", content);
    }
    Ok(())
}
