use log::{debug, warn};
use std::error::Error;

use crate::{
    config::Config,
    error::AverageError,
    model::{DailyAverage, Quantity, Query},
    provider::{HttpTransport, Transport, open_meteo},
};

/// Fetches one day of hourly archive data and reduces it to daily means.
///
/// Holds no mutable state: every call issues a fresh request.
#[derive(Debug)]
pub struct WeatherAverager<T = HttpTransport> {
    transport: T,
    config: Config,
}

impl WeatherAverager<HttpTransport> {
    /// Averager talking to the configured archive over HTTP.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self { transport, config })
    }
}

impl<T: Transport> WeatherAverager<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Daily averages for `query`, or the reason there are none.
    ///
    /// Failures are logged once here, naming the location and date.
    pub async fn daily_average(&self, query: &Query) -> Result<DailyAverage, AverageError> {
        let result = self.fetch(query).await;

        if let Err(e) = &result {
            warn!("Failed to fetch weather for {query}: {}", error_chain(e));
        }

        result
    }

    /// Collapsed form of [`daily_average`](Self::daily_average): any failure is `None`.
    ///
    /// `date` is an ISO `YYYY-MM-DD` string.
    pub async fn fetch_daily_average(
        &self,
        latitude: f64,
        longitude: f64,
        date: &str,
    ) -> Option<DailyAverage> {
        let query = match Query::parse(latitude, longitude, date) {
            Ok(query) => query,
            Err(e) => {
                warn!("Failed to fetch weather for {latitude},{longitude} on {date}: {e}");
                return None;
            }
        };

        self.daily_average(&query).await.ok()
    }

    async fn fetch(&self, query: &Query) -> Result<DailyAverage, AverageError> {
        let request = open_meteo::build_request(&self.config, query);
        debug!("Requesting hourly archive for {query} from {}", request.url);

        let response = self
            .transport
            .get(&request)
            .await
            .map_err(|source| AverageError::Transport { url: request.url.clone(), source })?;

        let series = open_meteo::parse_response(&response)?;
        debug!(
            "Archive returned {} temperature, {} humidity, {} wind speed samples for {query}",
            series.recorded(Quantity::Temperature),
            series.recorded(Quantity::Humidity),
            series.recorded(Quantity::WindSpeed),
        );

        series.daily_average()
    }
}

fn error_chain(err: &dyn Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
