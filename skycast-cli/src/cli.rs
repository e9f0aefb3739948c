use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use inquire::{Confirm, Text};
use skycast_core::{Config, GeoLocator, IpLocator, OpenWeatherProvider, WeatherSnapshot};

use crate::{
    dashboard,
    render::{Renderer, Theme},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive dashboard session. Runs by default.
    Dashboard,

    /// Show weather for a city once and exit.
    Show {
        /// City name, e.g. "Kigali" or "London,GB".
        city: String,
    },

    /// Show weather for your current location (IP-based lookup).
    Here,

    /// Interactively set the API key and preferences.
    Configure,

    /// Set and persist the colour theme.
    Theme {
        #[arg(value_enum)]
        mode: ThemeMode,
    },

    /// Render a canned snapshot without touching the network.
    Demo,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            None | Some(Command::Dashboard) => dashboard::run(config).await,
            Some(Command::Show { city }) => show(&config, &city).await,
            Some(Command::Here) => here(&config).await,
            Some(Command::Configure) => configure(config),
            Some(Command::Theme { mode }) => set_theme(config, mode),
            Some(Command::Demo) => {
                let renderer = Renderer::new(Theme::from_config(&config));
                println!("{}", renderer.snapshot(&WeatherSnapshot::sample()));
                Ok(())
            }
        }
    }
}

async fn show(config: &Config, city: &str) -> anyhow::Result<()> {
    let city = city.trim();
    if city.is_empty() {
        bail!("City name must not be empty");
    }

    let provider = OpenWeatherProvider::from_config(config)?;
    let snapshot = provider.fetch_by_name(city).await?;

    println!("{}", Renderer::new(Theme::from_config(config)).snapshot(&snapshot));
    Ok(())
}

async fn here(config: &Config) -> anyhow::Result<()> {
    let locator = IpLocator::from_config(config)?;
    let (lat, lon) = locator.current_position().await?;
    tracing::info!(lat, lon, "resolved current position");

    let provider = OpenWeatherProvider::from_config(config)?;
    let snapshot = provider.fetch_by_coordinates(lat, lon).await?;

    println!("{}", Renderer::new(Theme::from_config(config)).snapshot(&snapshot));
    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Text::new("OpenWeather API key:").with_default(&config.api_key).prompt()?;
    let default_city = Text::new("Default city:").with_default(&config.default_city).prompt()?;
    let dark_mode = Confirm::new("Use the dark theme?").with_default(config.dark_mode).prompt()?;

    config.api_key = api_key.trim().to_owned();
    config.default_city = default_city.trim().to_owned();
    config.dark_mode = dark_mode;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn set_theme(mut config: Config, mode: ThemeMode) -> anyhow::Result<()> {
    config.dark_mode = matches!(mode, ThemeMode::Dark);
    config.save()?;

    println!("Theme set to {}.", if config.dark_mode { "dark" } else { "light" });
    Ok(())
}
