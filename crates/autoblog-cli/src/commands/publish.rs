//! Publish command handler

use std::path::Path;

use anyhow::{Context, Result};

use autoblog_core::{Config, NewArticle};

use crate::client::StoreClient;
use crate::output::{Output, OutputFormat};

/// Read an article JSON file and store it
///
/// The file is validated locally with the same rules the store applies, so
/// a bad file fails before any request is sent.
pub async fn publish(config: &Config, file: &Path, output: &Output) -> Result<()> {
    let body = std::fs::read(file)
        .with_context(|| format!("Failed to read article file: {}", file.display()))?;
    let article = NewArticle::from_json(&body)
        .with_context(|| format!("Invalid article file: {}", file.display()))?;

    let id = StoreClient::from_config(config).publish(&article).await?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "success": true,
                    "id": id,
                    "title": article.title
                })
            );
        }
        OutputFormat::Quiet => println!("{}", id),
        OutputFormat::Human => {
            output.success(&format!("Published '{}' ({})", article.title, id));
        }
    }

    Ok(())
}
