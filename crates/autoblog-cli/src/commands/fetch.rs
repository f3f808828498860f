//! Fetch command handler

use anyhow::Result;

use autoblog_core::Config;

use crate::client::StoreClient;
use crate::output::Output;

/// Print the latest article from the store
pub async fn fetch(config: &Config, output: &Output) -> Result<()> {
    let client = StoreClient::from_config(config);

    match client.latest().await? {
        Some(article) => output.print_article(&article),
        None if output.is_json() => println!("null"),
        None => output.message("No articles found."),
    }

    Ok(())
}
