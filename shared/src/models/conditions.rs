//! Observed and forecast condition groups shared by METAR and TAF

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Wind
// ============================================================================

/// Unit a wind group was reported in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    #[default]
    Knots,
    MetersPerSecond,
    KilometersPerHour,
}

impl SpeedUnit {
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "KT" => Some(SpeedUnit::Knots),
            "MPS" => Some(SpeedUnit::MetersPerSecond),
            "KMH" => Some(SpeedUnit::KilometersPerHour),
            _ => None,
        }
    }

    /// Convert a speed in this unit to whole knots (rounded)
    pub fn to_knots(&self, value: u32) -> u32 {
        match self {
            SpeedUnit::Knots => value,
            SpeedUnit::MetersPerSecond => (value as f64 * 1.943_844).round() as u32,
            SpeedUnit::KilometersPerHour => (value as f64 * 0.539_957).round() as u32,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedUnit::Knots => "knots",
            SpeedUnit::MetersPerSecond => "meters per second",
            SpeedUnit::KilometersPerHour => "kilometers per hour",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WindDirection {
    Degrees(u16),
    Variable,
}

/// Variable direction range reported as `dddVddd`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindVariation {
    pub from_degrees: u16,
    pub to_degrees: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wind {
    pub direction: WindDirection,
    pub speed: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gust: Option<u32>,
    pub unit: SpeedUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation: Option<WindVariation>,
}

impl Wind {
    pub fn speed_knots(&self) -> u32 {
        self.unit.to_knots(self.speed)
    }

    pub fn gust_knots(&self) -> Option<u32> {
        self.gust.map(|g| self.unit.to_knots(g))
    }

    /// Highest of sustained speed and gust, in knots
    pub fn peak_knots(&self) -> u32 {
        self.gust_knots()
            .map_or(self.speed_knots(), |g| g.max(self.speed_knots()))
    }

    pub fn is_calm(&self) -> bool {
        self.speed == 0 && self.gust.is_none()
    }

    pub fn description(&self) -> String {
        if self.is_calm() {
            return "Calm".to_string();
        }
        let mut desc = match self.direction {
            WindDirection::Degrees(deg) => {
                format!("From {:03}° at {} {}", deg, self.speed, self.unit.label())
            }
            WindDirection::Variable => {
                format!("Variable direction at {} {}", self.speed, self.unit.label())
            }
        };
        if let Some(gust) = self.gust {
            desc.push_str(&format!(", gusting to {} {}", gust, self.unit.label()));
        }
        desc
    }
}

// ============================================================================
// Visibility
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    StatuteMiles,
    Meters,
}

/// `P6SM`/`9999` report a lower bound, `M1/4SM` an upper bound
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityQualifier {
    GreaterThan,
    LessThan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Visibility {
    pub distance: Decimal,
    pub unit: DistanceUnit,
    /// Set by CAVOK
    pub unlimited: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<VisibilityQualifier>,
}

/// Meters per statute mile
const METERS_PER_SM: Decimal = Decimal::from_parts(1_609_344, 0, 0, false, 3);

impl Visibility {
    pub fn statute_miles(distance: Decimal) -> Self {
        Self {
            distance,
            unit: DistanceUnit::StatuteMiles,
            unlimited: false,
            qualifier: None,
        }
    }

    pub fn meters(distance: u32) -> Self {
        Self {
            distance: Decimal::from(distance),
            unit: DistanceUnit::Meters,
            unlimited: false,
            qualifier: None,
        }
    }

    /// CAVOK implies at least 10 km
    pub fn cavok() -> Self {
        Self {
            distance: Decimal::from(10_000),
            unit: DistanceUnit::Meters,
            unlimited: true,
            qualifier: Some(VisibilityQualifier::GreaterThan),
        }
    }

    pub fn with_qualifier(mut self, qualifier: VisibilityQualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    /// Distance normalized to statute miles
    pub fn in_statute_miles(&self) -> Decimal {
        match self.unit {
            DistanceUnit::StatuteMiles => self.distance,
            DistanceUnit::Meters => (self.distance / METERS_PER_SM).round_dp(2),
        }
    }

    pub fn description(&self) -> String {
        if self.unlimited {
            return "Unlimited (CAVOK)".to_string();
        }
        let prefix = match self.qualifier {
            Some(VisibilityQualifier::GreaterThan) => "Greater than ",
            Some(VisibilityQualifier::LessThan) => "Less than ",
            None => "",
        };
        match self.unit {
            DistanceUnit::StatuteMiles => {
                format!("{}{} statute miles", prefix, self.distance.normalize())
            }
            DistanceUnit::Meters => format!("{}{} meters", prefix, self.distance),
        }
    }
}

// ============================================================================
// Present weather
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Light,
    #[default]
    Moderate,
    Heavy,
}

impl Intensity {
    pub fn prefix(&self) -> &'static str {
        match self {
            Intensity::Light => "-",
            Intensity::Moderate => "",
            Intensity::Heavy => "+",
        }
    }
}

/// One present-weather group such as `-FZRA` or `VCTS`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeatherPhenomenon {
    pub raw: String,
    pub intensity: Intensity,
    pub in_vicinity: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    /// Phenomenon codes in report order, e.g. `["RA", "SN"]`
    pub phenomena: Vec<String>,
    pub description: String,
}

impl WeatherPhenomenon {
    pub fn has_descriptor(&self, code: &str) -> bool {
        self.descriptor.as_deref() == Some(code)
    }

    pub fn has_phenomenon(&self, code: &str) -> bool {
        self.phenomena.iter().any(|p| p == code)
    }

    /// Thunderstorm on the field; `VCTS` is not
    pub fn is_thunderstorm(&self) -> bool {
        self.has_descriptor("TS") && !self.in_vicinity
    }

    pub fn is_freezing_precipitation(&self) -> bool {
        self.has_descriptor("FZ") && ["DZ", "RA", "UP"].iter().any(|c| self.has_phenomenon(c))
    }

    /// Fog that restricts the field, not shallow/patchy/partial fog banks
    pub fn is_dense_fog(&self) -> bool {
        self.has_phenomenon("FG")
            && !self.in_vicinity
            && !matches!(self.descriptor.as_deref(), Some("MI") | Some("BC") | Some("PR"))
    }
}

// ============================================================================
// Clouds
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CloudCoverage {
    #[serde(rename = "FEW")]
    Few,
    #[serde(rename = "SCT")]
    Scattered,
    #[serde(rename = "BKN")]
    Broken,
    #[serde(rename = "OVC")]
    Overcast,
    #[serde(rename = "VV")]
    VerticalVisibility,
}

impl CloudCoverage {
    pub fn code(&self) -> &'static str {
        match self {
            CloudCoverage::Few => "FEW",
            CloudCoverage::Scattered => "SCT",
            CloudCoverage::Broken => "BKN",
            CloudCoverage::Overcast => "OVC",
            CloudCoverage::VerticalVisibility => "VV",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CloudCoverage::Few => "Few",
            CloudCoverage::Scattered => "Scattered",
            CloudCoverage::Broken => "Broken",
            CloudCoverage::Overcast => "Overcast",
            CloudCoverage::VerticalVisibility => "Vertical visibility",
        }
    }

    /// Broken, overcast and obscured layers constitute a ceiling
    pub fn is_ceiling(&self) -> bool {
        matches!(
            self,
            CloudCoverage::Broken | CloudCoverage::Overcast | CloudCoverage::VerticalVisibility
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConvectiveType {
    #[serde(rename = "CB")]
    Cumulonimbus,
    #[serde(rename = "TCU")]
    ToweringCumulus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloudLayer {
    pub coverage: CloudCoverage,
    /// Height above ground in hundreds of feet
    pub height_hundreds_ft: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convective: Option<ConvectiveType>,
}

impl CloudLayer {
    pub fn height_feet(&self) -> u32 {
        self.height_hundreds_ft * 100
    }

    pub fn description(&self) -> String {
        let mut desc = format!("{} at {} feet", self.coverage.description(), self.height_feet());
        match self.convective {
            Some(ConvectiveType::Cumulonimbus) => desc.push_str(" (cumulonimbus)"),
            Some(ConvectiveType::ToweringCumulus) => desc.push_str(" (towering cumulus)"),
            None => {}
        }
        desc
    }
}

/// Lowest layer that forms a ceiling
pub fn lowest_ceiling(layers: &[CloudLayer]) -> Option<&CloudLayer> {
    layers
        .iter()
        .filter(|l| l.coverage.is_ceiling())
        .min_by_key(|l| l.height_hundreds_ft)
}

// ============================================================================
// Temperature and pressure
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Temperature {
    pub celsius: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dewpoint_celsius: Option<i32>,
}

fn celsius_to_fahrenheit(celsius: i32) -> i32 {
    (celsius as f64 * 9.0 / 5.0 + 32.0).round() as i32
}

impl Temperature {
    pub fn fahrenheit(&self) -> i32 {
        celsius_to_fahrenheit(self.celsius)
    }

    pub fn dewpoint_fahrenheit(&self) -> Option<i32> {
        self.dewpoint_celsius.map(celsius_to_fahrenheit)
    }

    /// Temperature/dewpoint spread in °C
    pub fn spread(&self) -> Option<i32> {
        self.dewpoint_celsius.map(|d| self.celsius - d)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PressureUnit {
    InchesOfMercury,
    Hectopascals,
}

/// hPa per inHg
const HPA_PER_INHG: Decimal = Decimal::from_parts(338_639, 0, 0, false, 4);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Altimeter {
    pub inhg: Decimal,
    pub hpa: Decimal,
    pub reported_in: PressureUnit,
}

impl Altimeter {
    /// `A2992` carries hundredths of inHg
    pub fn from_inhg_hundredths(hundredths: u32) -> Self {
        let inhg = Decimal::new(hundredths as i64, 2);
        Self {
            inhg,
            hpa: (inhg * HPA_PER_INHG).round_dp(1),
            reported_in: PressureUnit::InchesOfMercury,
        }
    }

    pub fn from_hpa(hpa: u32) -> Self {
        let hpa = Decimal::from(hpa);
        Self {
            inhg: (hpa / HPA_PER_INHG).round_dp(2),
            hpa,
            reported_in: PressureUnit::Hectopascals,
        }
    }
}
