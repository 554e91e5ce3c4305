//! Decoded TAF forecast

use serde::{Deserialize, Serialize};

use super::conditions::{CloudLayer, Visibility, WeatherPhenomenon, Wind};
use super::metar::ReportModifier;
use crate::error::ParseError;
use crate::types::{DayHour, DayTime, ValidPeriod};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureExtreme {
    Max,
    Min,
}

/// `TX25/2620Z` / `TN15/2710Z`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastTemperature {
    pub extreme: TemperatureExtreme,
    pub celsius: i32,
    pub at: DayHour,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Conditions of one forecast segment. Only groups present in the segment's
/// own text are filled in; nothing is inherited from the base forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ForecastConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weather: Vec<WeatherPhenomenon>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clouds: Vec<CloudLayer>,
    /// `NSW`: previously forecast weather ends
    #[serde(default, skip_serializing_if = "is_false")]
    pub no_significant_weather: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub temperatures: Vec<ForecastTemperature>,
}

impl ForecastConditions {
    pub fn is_empty(&self) -> bool {
        self.wind.is_none()
            && self.visibility.is_none()
            && self.weather.is_empty()
            && self.clouds.is_empty()
            && !self.no_significant_weather
            && self.temperatures.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// `FM`: conditions replace the base from the given time
    From,
    /// `BECMG`: gradual change over the window
    Becoming,
    /// `TEMPO`: intermittent conditions within the window
    Temporary,
    /// `PROBnn`
    Probability,
}

impl ChangeKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::From => "From",
            ChangeKind::Becoming => "Becoming",
            ChangeKind::Temporary => "Temporary",
            ChangeKind::Probability => "Probability",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeWindow {
    Starting(DayTime),
    Period(ValidPeriod),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeGroup {
    pub kind: ChangeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    /// `PROB30 TEMPO`
    #[serde(default, skip_serializing_if = "is_false")]
    pub temporary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<ChangeWindow>,
    pub conditions: ForecastConditions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DecodedTaf {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<ReportModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DayTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_period: Option<ValidPeriod>,
    pub base_forecast: ForecastConditions,
    pub change_groups: Vec<ChangeGroup>,
    pub parse_errors: Vec<ParseError>,
}

impl DecodedTaf {
    pub fn is_usable(&self) -> bool {
        self.station.is_some()
    }
}
