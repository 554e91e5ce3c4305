//! Decoded METAR observation

use serde::{Deserialize, Serialize};

use super::conditions::{
    lowest_ceiling, Altimeter, CloudLayer, Temperature, Visibility, WeatherPhenomenon, Wind,
};
use super::taf::ChangeGroup;
use crate::error::ParseError;
use crate::types::DayTime;

/// Report modifiers that may follow the station or precede it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportModifier {
    Auto,
    Corrected,
    Amended,
    Nil,
}

impl ReportModifier {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "AUTO" => Some(ReportModifier::Auto),
            "COR" | "CCA" => Some(ReportModifier::Corrected),
            "AMD" => Some(ReportModifier::Amended),
            "NIL" => Some(ReportModifier::Nil),
            _ => None,
        }
    }
}

/// Landing forecast appended to a METAR (`NOSIG`, `BECMG ...`, `TEMPO ...`).
/// It describes the next two hours, not the observation itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MetarTrend {
    pub raw: String,
    #[serde(default)]
    pub no_significant_change: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ChangeGroup>,
}

/// Structured METAR/SPECI observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DecodedMetar {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<ReportModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_at: Option<DayTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<Wind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    pub weather: Vec<WeatherPhenomenon>,
    pub clouds: Vec<CloudLayer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altimeter: Option<Altimeter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<MetarTrend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub parse_errors: Vec<ParseError>,
}

impl DecodedMetar {
    pub fn is_cavok(&self) -> bool {
        self.visibility.as_ref().is_some_and(|v| v.unlimited)
    }

    /// Lowest broken/overcast/obscured layer
    pub fn ceiling(&self) -> Option<&CloudLayer> {
        lowest_ceiling(&self.clouds)
    }

    /// A METAR is usable for briefing once its station is known
    pub fn is_usable(&self) -> bool {
        self.station.is_some()
    }
}
