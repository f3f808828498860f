//! Config command handlers

use anyhow::{Context, Result};

use autoblog_core::Config;

use crate::output::{Output, OutputFormat};

const NOT_SET: &str = "(not set)";

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "bind_addr": config.bind_addr,
                    "store_url": config.store_url,
                    "access_key": config.access_key.as_ref().map(|_| "********"),
                    "webhook_url": config.webhook_url,
                    "reveal_tick_ms": config.reveal_tick_ms,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  data_dir:       {}", config.data_dir.display());
            println!("  bind_addr:      {}", config.bind_addr);
            println!("  store_url:      {}", config.store_url);
            println!(
                "  access_key:     {}",
                if config.access_key.is_some() {
                    "********"
                } else {
                    NOT_SET
                }
            );
            println!(
                "  webhook_url:    {}",
                config.webhook_url.as_deref().unwrap_or(NOT_SET)
            );
            println!("  reveal_tick_ms: {}", config.reveal_tick_ms);
            println!(
                "  log_file:       {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| NOT_SET.to_string())
            );
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    config.set_value(&key, &value)?;
    config.save().context("Failed to save configuration")?;

    let shown = if key == "access_key" && !value.is_empty() && value != "none" {
        "********"
    } else {
        value.as_str()
    };
    output.success(&format!("Set {} = {}", key, shown));

    Ok(())
}
