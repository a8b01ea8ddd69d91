use std::path::PathBuf;

use anyhow::{Result, bail};

use azx_config::Settings;
use azx_engine::RedactionPipeline;

pub async fn handle(
    settings: &Settings,
    file: PathBuf,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
) -> Result<()> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let pipeline = RedactionPipeline::new(settings)?;
    let outcome = pipeline
        .run(&file, output.as_deref(), report.as_deref())
        .await?;

    println!();
    println!("{}", "=".repeat(60));
    println!("REDACTION SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Original file: {}", outcome.original_file.display());
    println!("Redacted file: {}", outcome.redacted_file.display());
    println!("Report file: {}", outcome.report_file.display());
    println!("Document hash: {}", outcome.document_hash);
    println!("Completed at: {} UTC", outcome.timestamp);
    println!("Total redactions: {}", outcome.report.total_redactions);
    println!("Average confidence: {}", outcome.report.average_confidence);
    if !outcome.report.by_type.is_empty() {
        println!();
        println!("Redactions by type:");
        for (name, count) in &outcome.report.by_type {
            println!("  - {}: {}", name, count);
        }
    }
    println!();
    println!("✓ PII redaction complete");
    Ok(())
}
