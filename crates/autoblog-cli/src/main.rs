//! autoblog CLI
//!
//! Command-line client and terminal viewer for autoblog - generate articles
//! from a keyword and read them back with a typewriter reveal.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use autoblog_core::Config;

mod client;
mod commands;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "autoblog")]
#[command(about = "autoblog - AI-generated articles, typed out in your terminal")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal viewer (default)
    View,
    /// Ask the automation webhook to generate an article
    Generate {
        /// Topic keyword
        keyword: String,
    },
    /// Print the latest article
    Fetch,
    /// Store an article from a JSON file ({title, subtitle, content})
    Publish {
        /// Path to the article JSON
        file: PathBuf,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, bind_addr, store_url, access_key,
        /// webhook_url, reveal_tick_ms, log_file)
        key: String,
        /// Configuration value ("none" clears optional keys)
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands manage the file themselves
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let config = Config::load()?;

    match cli.command {
        None | Some(Commands::View) => tui::run(config).await,
        Some(Commands::Generate { keyword }) => {
            commands::generate::generate(&config, keyword, &output).await
        }
        Some(Commands::Fetch) => commands::fetch::fetch(&config, &output).await,
        Some(Commands::Publish { file }) => {
            commands::publish::publish(&config, &file, &output).await
        }
        Some(Commands::Config { .. }) => unreachable!(), // Handled above
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
