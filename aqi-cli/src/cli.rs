use anyhow::Context;
use aqi_core::{CityTable, Config, fetch_report, provider_from_config};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "aqi", version, about = "Pakistan air quality dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current air quality and temperature for a city.
    Show {
        /// City name; prompts for one when omitted.
        city: Option<String>,

        /// Also print every sample returned by the API.
        #[arg(long)]
        series: bool,
    },

    /// List the available cities.
    Cities,

    /// Explain the AQI scale.
    Scale,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let cities = CityTable::default();

        match self.command {
            Command::Configure => configure()?,
            Command::Show { city, series } => {
                let name = match city {
                    Some(name) => name,
                    None => Select::new("Select City", cities.names())
                        .prompt()
                        .context("City selection cancelled")?
                        .to_string(),
                };
                let city = cities.lookup(&name)?;

                let config = Config::load()?;
                debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "loaded configuration");
                let provider = provider_from_config(&config)?;

                let report = fetch_report(provider.as_ref(), city).await;
                print!("{}", render::ReportView { report: &report, with_series: series });
            }
            Command::Cities => print!("{}", render::CityList(&cities)),
            Command::Scale => print!("{}", render::ScaleInfo),
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("API key prompt cancelled")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
