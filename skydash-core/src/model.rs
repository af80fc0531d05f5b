use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

/// A single dashboard request: the user-entered location plus the unit
/// system the page should be rendered in.
#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: String,
    pub units: UnitGroup,
}

/// Unit system for provider queries and display suffixes.
///
/// The provider accepts `unitGroup=metric` or `unitGroup=us`; everything
/// downstream (renderer labels) follows the same choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitGroup {
    #[default]
    Metric,
    Us,
}

impl UnitGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitGroup::Metric => "metric",
            UnitGroup::Us => "us",
        }
    }

    pub fn temperature(&self) -> &'static str {
        match self {
            UnitGroup::Metric => "°C",
            UnitGroup::Us => "°F",
        }
    }

    pub fn speed(&self) -> &'static str {
        match self {
            UnitGroup::Metric => "km/h",
            UnitGroup::Us => "mph",
        }
    }

    pub fn distance(&self) -> &'static str {
        match self {
            UnitGroup::Metric => "km",
            UnitGroup::Us => "mi",
        }
    }

    pub fn pressure(&self) -> &'static str {
        match self {
            UnitGroup::Metric => "hPa",
            UnitGroup::Us => "mb",
        }
    }
}

impl std::fmt::Display for UnitGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitGroup {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "metric" => Ok(UnitGroup::Metric),
            "us" | "imperial" => Ok(UnitGroup::Us),
            _ => Err(anyhow::anyhow!(
                "Unknown unit group '{value}'. Supported unit groups: metric, us."
            )),
        }
    }
}

/// Everything the provider returns for one request.
///
/// Received whole, never mutated; the dashboard drops it when the next
/// request lands.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    pub address: String,
    #[serde(rename = "resolvedAddress")]
    pub resolved_address: Option<String>,
    #[serde(rename = "currentConditions")]
    pub current_conditions: CurrentConditions,
    pub days: Vec<DailyRecord>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl WeatherReport {
    /// Preferred display label: the provider's resolved address when
    /// present, the raw request echo otherwise.
    pub fn location_label(&self) -> &str {
        self.resolved_address.as_deref().unwrap_or(&self.address)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub temp: f64,
    #[serde(rename = "feelslike")]
    pub feels_like: f64,
    pub conditions: String,
    pub icon: String,
    pub humidity: f64,
    #[serde(rename = "windspeed")]
    pub wind_speed: f64,
    pub pressure: f64,
    #[serde(rename = "uvindex")]
    pub uv_index: Option<f64>,
    pub visibility: Option<f64>,
    #[serde(rename = "cloudcover")]
    pub cloud_cover: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyRecord {
    pub datetime: NaiveDate,
    pub temp: f64,
    #[serde(rename = "tempmax")]
    pub temp_max: f64,
    #[serde(rename = "tempmin")]
    pub temp_min: f64,
    pub conditions: String,
    pub icon: String,
    /// Populated for today only; later days come without hourly detail.
    #[serde(default)]
    pub hours: Vec<HourlyRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyRecord {
    pub datetime: NaiveTime,
    pub temp: f64,
    pub icon: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    pub event: String,
    pub description: String,
    pub link: Option<String>,
}
