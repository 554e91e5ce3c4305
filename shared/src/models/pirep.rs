//! Decoded pilot reports

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    #[default]
    Routine,
    Urgent,
}

/// Five-point severity scale shared by turbulence and icing
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    None,
    Light,
    Moderate,
    Severe,
    Extreme,
}

impl Severity {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "NEG" | "SMTH" | "SMOOTH" | "NIL" | "NONE" => Some(Severity::None),
            "TRC" | "LGT" | "LIGHT" => Some(Severity::Light),
            "MOD" | "MODERATE" => Some(Severity::Moderate),
            "SEV" | "SEVERE" | "HVY" => Some(Severity::Severe),
            "EXTRM" | "EXTREME" | "XTRM" => Some(Severity::Extreme),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Light => "Light",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::Extreme => "Extreme",
        }
    }
}

/// Altitude band attached to a turbulence or icing observation, in feet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AltitudeBand {
    pub lower_ft: u32,
    pub upper_ft: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HazardObservation {
    pub severity: Severity,
    /// Qualifier such as `CHOP`, `CAT`, `RIME` or `MXD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<AltitudeBand>,
    pub raw: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PirepWind {
    pub direction_degrees: u16,
    pub speed_kt: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PirepTime {
    pub hour: u8,
    pub minute: u8,
}

impl std::fmt::Display for PirepTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}{:02}Z", self.hour, self.minute)
    }
}

/// Reported conditions. Keys the pilot did not report stay absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PirepConditions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turbulence: Option<HazardObservation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icing: Option<HazardObservation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<PirepWind>,
    /// Flight visibility and weather, verbatim from `/WX`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    /// Sky condition, verbatim from `/SK`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sky: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_celsius: Option<i32>,
}

impl PirepConditions {
    pub fn is_empty(&self) -> bool {
        *self == PirepConditions::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DecodedPirep {
    pub raw: String,
    pub urgency: Urgency,
    /// Reporting station that prefixed the report, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<PirepTime>,
    /// Flight level converted to feet; `None` for `UNKN`/`DURC`/`DURD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_ft: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_type: Option<String>,
    pub conditions: PirepConditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub parse_errors: Vec<ParseError>,
}

impl DecodedPirep {
    /// Worst of the reported turbulence and icing
    pub fn worst_severity(&self) -> Severity {
        [&self.conditions.turbulence, &self.conditions.icing]
            .into_iter()
            .flatten()
            .map(|h| h.severity)
            .max()
            .unwrap_or_default()
    }
}
