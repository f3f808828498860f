//! Generate command handler

use anyhow::Result;

use autoblog_core::Config;

use crate::client::{self, ClientError};
use crate::output::Output;

/// Ask the webhook to generate an article for `keyword`
///
/// The article appears in the store once the automation finishes; use
/// `autoblog fetch` or the viewer to read it.
pub async fn generate(config: &Config, keyword: String, output: &Output) -> Result<()> {
    let webhook_url = config
        .webhook_url
        .as_deref()
        .ok_or(ClientError::WebhookNotConfigured)?;

    client::request_generation(webhook_url, &keyword).await?;

    output.success(&format!("Requested article for '{}'", keyword.trim()));
    Ok(())
}
