use weather_avg_core::{DailyAverage, Query};

/// Human-readable summary. Values are shown in the archive's default units.
pub fn render(query: &Query, average: &DailyAverage) -> String {
    format!(
        "Daily averages for {query}\n\
         \x20 temperature: {:>7.1} °C\n\
         \x20 humidity:    {:>7.1} %\n\
         \x20 wind speed:  {:>7.1} km/h\n",
        average.temperature, average.humidity, average.wind_speed,
    )
}
