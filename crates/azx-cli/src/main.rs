mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use azx_config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let settings = Settings::load(cli.env_file.as_deref());
    tracing::debug!(env_file = ?settings.env_file().path(), "configuration resolved");

    match cli.command {
        cli::Commands::Chat { prompt, system, temperature } => {
            commands::chat::handle(&settings, prompt, system, temperature).await
        }
        cli::Commands::Analyze { file, model, summarize, output } => {
            commands::analyze::handle(&settings, file, model, summarize, output).await
        }
        cli::Commands::Transcribe { file, language } => {
            commands::transcribe::handle(&settings, file, language).await
        }
        cli::Commands::Translate { text, to } => {
            commands::translate::handle(&settings, text, to).await
        }
        cli::Commands::Redact { file, output, report } => {
            commands::redact::handle(&settings, file, output, report).await
        }
        cli::Commands::Check => commands::check::handle(&settings),
        cli::Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
