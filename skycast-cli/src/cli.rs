use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use skycast_core::{Config, provider_from_config};
use tracing::info;

use crate::app::App;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Look up current weather by city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for cities until cancelled (default).
    Interactive,

    /// Show current weather for a city.
    Show {
        /// City name.
        city: String,
    },

    /// Enter a route directly, e.g. `/weather --city Paris`.
    Open {
        /// Route path: `/` or `/weather`.
        path: String,

        /// City handed to the weather view as navigation state.
        #[arg(long)]
        city: Option<String>,
    },

    /// Store the weatherapi.com API key in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Interactive => build_app()?.interactive().await,
            Command::Show { city } => build_app()?.show(&city).await,
            Command::Open { path, city } => build_app()?.open(&path, city).await,
        }
    }
}

fn build_app() -> anyhow::Result<App> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(App::new(provider))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;

    info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());
    Ok(())
}
