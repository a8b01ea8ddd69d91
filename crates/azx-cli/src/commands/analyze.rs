use std::path::PathBuf;

use anyhow::{Result, bail};

use azx_config::Settings;
use azx_engine::SummarizePipeline;
use azx_services::DocIntelClient;

pub async fn handle(
    settings: &Settings,
    file: Option<PathBuf>,
    model: Option<String>,
    summarize: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let Some(file) = file.or_else(|| settings.docintel_file().map(PathBuf::from)) else {
        bail!("No document given: pass --file or set DOCINTEL_FILE");
    };
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }
    let model = model.unwrap_or_else(|| settings.docintel_model());

    let json = if summarize {
        let pipeline = SummarizePipeline::new(settings)?.with_model(model);
        let outcome = pipeline.run(&file).await?;
        serde_json::to_string_pretty(&outcome)?
    } else {
        let client = DocIntelClient::new(settings.docintel()?)?;
        let operation = client.analyze(&file, &model).await?;
        serde_json::to_string_pretty(&operation)?
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &json)?;
            println!("✓ Analysis written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
