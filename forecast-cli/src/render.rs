//! Text rendering of the screen state.
//!
//! Pure: the output depends only on the [`ScreenState`] passed in. Missing
//! upstream fields render as blanks.

use std::fmt;

use chrono::NaiveDate;
use forecast_core::{
    ScreenState,
    model::{Condition, ForecastDay, WeatherPayload},
};

/// Bundled artwork for the condition texts WeatherAPI.com reports most often.
const CONDITION_IMAGES: &[(&str, &str)] = &[
    ("Partly cloudy", "partlycloudy"),
    ("Moderate rain", "moderaterain"),
    ("Patchy rain possible", "moderaterain"),
    ("Patchy rain nearby", "moderaterain"),
    ("Sunny", "sun"),
    ("Clear", "sun"),
    ("Overcast", "cloud"),
    ("Cloudy", "cloud"),
    ("Light rain", "moderaterain"),
    ("Moderate rain at times", "moderaterain"),
    ("Heavy rain", "heavyrain"),
    ("Heavy rain at times", "heavyrain"),
    ("Moderate or heavy freezing rain", "heavyrain"),
    ("Moderate or heavy rain shower", "heavyrain"),
    ("Moderate or heavy rain with thunder", "heavyrain"),
    ("Mist", "mist"),
    ("Fog", "mist"),
    ("Other", "moderaterain"),
];

pub fn render(state: &ScreenState) -> String {
    Screen(state).to_string()
}

/// Text view of one state snapshot.
pub struct Screen<'a>(pub &'a ScreenState);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        if state.loading {
            return writeln!(f, "⠋ Loading weather...");
        }

        if state.search_visible {
            writeln!(f, "[ Search City ]")?;
            for candidate in &state.candidates {
                writeln!(f, "  📍 {}", candidate.label())?;
            }
            writeln!(f)?;
        }

        let empty = WeatherPayload::default();
        let weather = state.weather.as_ref().unwrap_or(&empty);
        write_current(f, weather)?;
        writeln!(f)?;
        write_daily(f, weather.forecast_days())
    }
}

fn write_current(f: &mut fmt::Formatter<'_>, weather: &WeatherPayload) -> fmt::Result {
    let location = weather.location.clone().unwrap_or_default();
    let current = weather.current.clone().unwrap_or_default();
    let condition = current.condition.clone().unwrap_or_default();
    let sunrise = weather
        .forecast_days()
        .first()
        .and_then(|d| d.astro.as_ref())
        .and_then(|a| a.sunrise.clone());

    writeln!(f, "{}, {}", text(&location.name), text(&location.country))?;
    writeln!(f, "  {}", image_ref(&condition))?;
    writeln!(f, "  {}°", current.temp_c.map(whole_degrees).unwrap_or_default())?;
    writeln!(f, "  {}", text(&condition.text))?;
    writeln!(
        f,
        "  wind {}km/h   humidity {}%   sunrise {}",
        number(current.wind_kph),
        current.humidity.map(|h| h.to_string()).unwrap_or_default(),
        text(&sunrise),
    )
}

fn write_daily(f: &mut fmt::Formatter<'_>, days: &[ForecastDay]) -> fmt::Result {
    writeln!(f, "📅 Daily Forecast")?;
    for day in days {
        let summary = day.day.clone().unwrap_or_default();
        let condition = summary.condition.unwrap_or_default();
        writeln!(
            f,
            "  {:<10} {:>6}°  {}",
            day.date.map(weekday_name).unwrap_or_default(),
            number(summary.avgtemp_c),
            image_ref(&condition),
        )?;
    }
    Ok(())
}

/// Bundled asset name for known conditions, otherwise the vendor icon URL.
pub fn image_ref(condition: &Condition) -> String {
    let bundled = condition.text.as_deref().and_then(|text| {
        CONDITION_IMAGES.iter().find(|(known, _)| *known == text).map(|(_, asset)| *asset)
    });

    match bundled {
        Some(asset) => asset.to_string(),
        None => format!("https:{}", condition.icon.as_deref().unwrap_or_default()),
    }
}

/// Long English weekday name, e.g. `Monday`.
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Drops the fraction toward zero.
fn whole_degrees(temp: f64) -> String {
    format!("{}", temp.trunc() as i64)
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
