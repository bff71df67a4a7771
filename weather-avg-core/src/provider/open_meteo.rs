//! Request and response format of the Open-Meteo historical archive.

use serde::Deserialize;

use crate::{
    config::Config,
    error::AverageError,
    model::{HourlySeries, Quantity, Query},
};

use super::{ArchiveRequest, RawResponse};

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    hourly: ArchiveHourly,
}

#[derive(Debug, Deserialize)]
struct ArchiveHourly {
    temperature_2m: Vec<Option<f64>>,
    relative_humidity_2m: Vec<Option<f64>>,
    windspeed_10m: Vec<Option<f64>>,
}

/// Request covering exactly `query.date`, localized by the configured timezone mode.
pub fn build_request(config: &Config, query: &Query) -> ArchiveRequest {
    let date = query.date.format("%Y-%m-%d").to_string();
    let hourly = Quantity::all().iter().map(Quantity::field).collect::<Vec<_>>().join(",");

    ArchiveRequest {
        url: config.archive_url.clone(),
        params: vec![
            ("latitude", query.latitude.to_string()),
            ("longitude", query.longitude.to_string()),
            ("start_date", date.clone()),
            ("end_date", date),
            ("hourly", hourly),
            ("timezone", config.timezone.clone()),
        ],
    }
}

/// Check the status and pull the three hourly series out of the body.
pub fn parse_response(response: &RawResponse) -> Result<HourlySeries, AverageError> {
    if !response.is_success() {
        return Err(AverageError::Status {
            status: response.status,
            body: truncate_body(&response.body),
        });
    }

    let parsed: ArchiveResponse =
        serde_json::from_str(&response.body).map_err(AverageError::Malformed)?;

    Ok(HourlySeries {
        temperature: parsed.hourly.temperature_2m,
        humidity: parsed.hourly.relative_humidity_2m,
        wind_speed: parsed.hourly.windspeed_10m,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
