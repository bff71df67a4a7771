use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AverageError;

/// One location and calendar day to average over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
}

impl Query {
    pub fn new(latitude: f64, longitude: f64, date: NaiveDate) -> Self {
        Self { latitude, longitude, date }
    }

    /// Build a query from an ISO `YYYY-MM-DD` date string.
    pub fn parse(latitude: f64, longitude: f64, date: &str) -> Result<Self, AverageError> {
        let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| AverageError::InvalidDate(date.to_string(), e))?;

        Ok(Self::new(latitude, longitude, parsed))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} on {}", self.latitude, self.longitude, self.date.format("%Y-%m-%d"))
    }
}

/// The measured quantities requested from the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Temperature,
    Humidity,
    WindSpeed,
}

impl Quantity {
    /// Hourly field name used by the archive API.
    pub fn field(&self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature_2m",
            Quantity::Humidity => "relative_humidity_2m",
            Quantity::WindSpeed => "windspeed_10m",
        }
    }

    pub const fn all() -> &'static [Quantity] {
        &[Quantity::Temperature, Quantity::Humidity, Quantity::WindSpeed]
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Quantity::Temperature => "temperature",
            Quantity::Humidity => "humidity",
            Quantity::WindSpeed => "wind speed",
        })
    }
}

/// Hour-by-hour samples for a single day. `None` marks a gap in the upstream record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    pub temperature: Vec<Option<f64>>,
    pub humidity: Vec<Option<f64>>,
    pub wind_speed: Vec<Option<f64>>,
}

impl HourlySeries {
    pub fn samples(&self, quantity: Quantity) -> &[Option<f64>] {
        match quantity {
            Quantity::Temperature => &self.temperature,
            Quantity::Humidity => &self.humidity,
            Quantity::WindSpeed => &self.wind_speed,
        }
    }

    /// Number of non-null samples recorded for `quantity`.
    pub fn recorded(&self, quantity: Quantity) -> usize {
        self.samples(quantity).iter().flatten().count()
    }

    /// Mean of each series with gaps dropped.
    ///
    /// Fails on the first quantity that has no recorded samples at all, so a
    /// result is either complete or absent.
    pub fn daily_average(&self) -> Result<DailyAverage, AverageError> {
        let mean_of = |quantity| {
            mean(self.samples(quantity)).ok_or(AverageError::InsufficientData(quantity))
        };

        Ok(DailyAverage {
            temperature: mean_of(Quantity::Temperature)?,
            humidity: mean_of(Quantity::Humidity)?,
            wind_speed: mean_of(Quantity::WindSpeed)?,
        })
    }
}

fn mean(samples: &[Option<f64>]) -> Option<f64> {
    let (sum, count) =
        samples.iter().flatten().fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    (count > 0).then(|| sum / count as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(t: &[Option<f64>], h: &[Option<f64>], w: &[Option<f64>]) -> HourlySeries {
        HourlySeries { temperature: t.to_vec(), humidity: h.to_vec(), wind_speed: w.to_vec() }
    }

    #[test]
    fn averages_skip_gaps() {
        let s = series(
            &[Some(10.0), None, Some(12.0)],
            &[Some(50.0), Some(60.0), Some(70.0)],
            &[Some(5.0), None, None],
        );

        let avg = s.daily_average().expect("every quantity has samples");
        assert!((avg.temperature - 11.0).abs() < 1e-9);
        assert!((avg.humidity - 60.0).abs() < 1e-9);
        assert!((avg.wind_speed - 5.0).abs() < 1e-9);
    }

    #[test]
    fn all_null_quantity_yields_no_average() {
        let s = series(
            &[Some(10.0), Some(11.0), Some(12.0)],
            &[Some(50.0), Some(60.0), Some(70.0)],
            &[None, None, None],
        );

        let err = s.daily_average().unwrap_err();
        assert!(matches!(err, AverageError::InsufficientData(Quantity::WindSpeed)));
    }

    #[test]
    fn empty_series_is_insufficient() {
        let err = HourlySeries::default().daily_average().unwrap_err();
        assert!(matches!(err, AverageError::InsufficientData(Quantity::Temperature)));
    }

    #[test]
    fn recorded_counts_non_null_samples() {
        let s = series(&[Some(1.0), None], &[None, None], &[Some(2.0), Some(3.0)]);

        assert_eq!(s.recorded(Quantity::Temperature), 1);
        assert_eq!(s.recorded(Quantity::Humidity), 0);
        assert_eq!(s.recorded(Quantity::WindSpeed), 2);
    }

    #[test]
    fn query_parse_accepts_iso_date() {
        let q = Query::parse(52.52, 13.41, "2024-03-01").expect("valid date");
        assert_eq!(q.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(q.to_string(), "52.52,13.41 on 2024-03-01");
    }

    #[test]
    fn query_parse_rejects_garbage() {
        let err = Query::parse(0.0, 0.0, "01/03/2024").unwrap_err();
        assert!(err.to_string().contains("01/03/2024"));
    }

    #[test]
    fn daily_average_serializes_with_contract_keys() {
        let avg = DailyAverage { temperature: 1.5, humidity: 40.0, wind_speed: 3.25 };
        let json = serde_json::to_value(avg).unwrap();

        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["humidity", "temperature", "wind_speed"]);
    }
}
