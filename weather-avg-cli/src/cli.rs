use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use weather_avg_core::{Config, Query, WeatherAverager};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-avg", version, about = "Daily weather averages from the Open-Meteo archive")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the archive endpoint and HTTP timeout.
    Configure,

    /// Show average temperature, humidity and wind speed for one day.
    Show {
        /// Latitude in degrees.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees.
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Calendar date, YYYY-MM-DD.
        #[arg(long)]
        date: NaiveDate,

        /// Print the averages as a JSON object.
        #[arg(long)]
        json: bool,
    },

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { lat, lon, date, json } => {
                let config = Config::load()?;
                let averager = WeatherAverager::from_config(config)?;
                let query = Query::new(lat, lon, date);

                let average = averager
                    .daily_average(&query)
                    .await
                    .with_context(|| format!("No daily average for {query}"))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&average)?);
                } else {
                    print!("{}", output::render(&query, &average));
                }
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
            }
        }

        Ok(())
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let url = Text::new("Archive URL:").with_default(&config.archive_url).prompt()?;
    config.set_archive_url(url.trim())?;

    let timeout = CustomType::<u64>::new("HTTP timeout in seconds (0 for client default):")
        .with_default(config.timeout_secs.unwrap_or(0))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;
    config.set_timeout_secs(timeout);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
