use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, FilePreferenceStore, LocationCandidate, ScreenController, WeatherApi,
};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};

use crate::render::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "City weather and 7-day forecast")]
pub struct Cli {
    /// WeatherAPI.com key; overrides the configured one.
    #[arg(long, global = true, env = "WEATHERAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com key.
    Configure,

    /// Show current conditions and the forecast.
    Show {
        /// City to switch to; defaults to the last selected city.
        #[arg(long)]
        city: Option<String>,
    },

    /// List locations matching a query.
    Search {
        /// At least three characters of a city name.
        query: String,
    },

    /// Browse and search cities interactively (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let screen = screen(self.api_key.as_deref())?;
                match city {
                    Some(city) => screen.on_select_candidate(&LocationCandidate::named(city)).await,
                    None => screen.on_mount().await,
                }
                print!("{}", render(&screen.state()));
                Ok(())
            }
            Command::Search { query } => {
                let screen = screen(self.api_key.as_deref())?;
                screen.on_search_text_changed(query);
                screen.settle().await;

                let candidates = screen.state().candidates;
                if candidates.is_empty() {
                    println!("No matching locations.");
                }
                for candidate in candidates {
                    println!("{}", candidate.label());
                }
                Ok(())
            }
            Command::Interactive => interactive(screen(self.api_key.as_deref())?).await,
        }
    }
}

fn screen(api_key: Option<&str>) -> anyhow::Result<ScreenController> {
    let config = Config::load()?;
    let api = WeatherApi::new(config.api_config(api_key)?);
    let prefs = FilePreferenceStore::open_default()?;
    tracing::debug!(preferences = %prefs.path().display(), "screen ready");
    Ok(ScreenController::new(Arc::new(api), Arc::new(prefs)))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn interactive(screen: ScreenController) -> anyhow::Result<()> {
    screen.on_mount().await;
    print!("{}", render(&screen.state()));

    loop {
        screen.toggle_search();

        let query = match Text::new("Search City:").with_help_message("Esc to quit").prompt() {
            Ok(query) => query,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read search text"),
        };

        screen.on_search_text_changed(query.trim());
        screen.settle().await;

        let candidates = screen.state().candidates;
        if candidates.is_empty() {
            println!("No matching locations.");
            screen.toggle_search();
            continue;
        }

        let labels: Vec<String> = candidates.iter().map(LocationCandidate::label).collect();
        let picked = match Select::new("Location:", labels).raw_prompt() {
            Ok(picked) => picked.index,
            Err(InquireError::OperationCanceled) => {
                screen.toggle_search();
                continue;
            }
            Err(InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read location choice"),
        };

        screen.on_select_candidate(&candidates[picked]).await;
        print!("{}", render(&screen.state()));
    }

    Ok(())
}
