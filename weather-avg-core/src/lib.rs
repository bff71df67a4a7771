//! Daily weather averages from the Open-Meteo historical archive.
//!
//! This crate defines:
//! - Configuration of the archive endpoint and HTTP client
//! - A transport abstraction over the single archive GET
//! - The averager that turns one day of hourly samples into daily means
//!
//! It is used by `weather-avg-cli`, but can also be reused by other binaries or services.

pub mod averager;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use averager::WeatherAverager;
pub use config::Config;
pub use error::AverageError;
pub use model::{DailyAverage, HourlySeries, Quantity, Query};
pub use provider::{HttpTransport, Transport};
