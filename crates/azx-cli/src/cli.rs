use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "azx")]
#[command(about = "Azure AI workshop demos with PII redaction", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Env file with the Azure credentials (default: config/.env, then .env)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a prompt to the Azure OpenAI chat deployment
    Chat {
        /// User prompt
        #[arg(long, default_value = "Hello from Azure AI Foundry - what can you do?")]
        prompt: String,

        /// System message
        #[arg(long, default_value = "You are a concise assistant.")]
        system: String,

        /// Sampling temperature
        #[arg(long, default_value = "0.2")]
        temperature: f64,
    },

    /// Analyze a document with Document Intelligence
    Analyze {
        /// Document to analyze (default: DOCINTEL_FILE from the env)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Analysis model (default: DOCINTEL_MODEL, then prebuilt-layout)
        #[arg(long)]
        model: Option<String>,

        /// Follow up with a business-stakeholder summary from Azure OpenAI
        #[arg(long)]
        summarize: bool,

        /// Write the JSON result to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Transcribe a WAV file with Speech-to-Text
    Transcribe {
        /// Audio file (default: SPEECH_AUDIO_PATH from the env)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Recognition language
        #[arg(long, default_value = azx_services::speech::DEFAULT_LANGUAGE)]
        language: String,
    },

    /// Translate text with the Translator service
    Translate {
        /// Text to translate (default: TRANSLATE_TEXT from the env)
        #[arg(long)]
        text: Option<String>,

        /// Target language code (default: TRANSLATE_TO, then fr)
        #[arg(long)]
        to: Option<String>,
    },

    /// Detect and redact PII from a document
    Redact {
        /// Document to redact
        #[arg(long, short)]
        file: PathBuf,

        /// Destination for the redacted text (default: <stem>_redacted.txt)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Destination for the JSON report (default: <stem>_pii_report.json)
        #[arg(long, short)]
        report: Option<PathBuf>,
    },

    /// Verify the workshop setup
    Check,

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_redact_args() {
        let cli = Cli::try_parse_from([
            "azx", "redact", "--file", "doc.pdf", "--output", "clean.txt",
        ])
        .unwrap();

        match cli.command {
            Commands::Redact { file, output, report } => {
                assert_eq!(file, PathBuf::from("doc.pdf"));
                assert_eq!(output, Some(PathBuf::from("clean.txt")));
                assert_eq!(report, None);
            }
            _ => panic!("expected redact subcommand"),
        }
    }

    #[test]
    fn test_redact_requires_file() {
        assert!(Cli::try_parse_from(["azx", "redact"]).is_err());
    }

    #[test]
    fn test_env_file_is_global() {
        let cli = Cli::try_parse_from(["azx", "check", "--env-file", "local.env"]).unwrap();
        assert_eq!(cli.env_file, Some(PathBuf::from("local.env")));
    }

    #[test]
    fn test_chat_defaults() {
        let cli = Cli::try_parse_from(["azx", "chat"]).unwrap();
        match cli.command {
            Commands::Chat { prompt, system, temperature } => {
                assert!(prompt.contains("Azure AI Foundry"));
                assert!(system.contains("concise"));
                assert_eq!(temperature, 0.2);
            }
            _ => panic!("expected chat subcommand"),
        }
    }
}
