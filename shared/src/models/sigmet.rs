//! Decoded SIGMET / AIRMET advisories

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::DayTime;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    #[default]
    Sigmet,
    Airmet,
}

/// Hazard classes an advisory can describe
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SigmetHazard {
    VolcanicAsh,
    TropicalCyclone,
    SevereTurbulence,
    SevereIcing,
    DustSandstorm,
    Thunderstorms,
    MountainWave,
    MountainObscuration,
    IfrConditions,
    LowLevelWindShear,
    Turbulence,
    Icing,
    StrongSurfaceWind,
    #[default]
    Unknown,
}

impl SigmetHazard {
    pub fn description(&self) -> &'static str {
        match self {
            SigmetHazard::VolcanicAsh => "Volcanic ash",
            SigmetHazard::TropicalCyclone => "Tropical cyclone",
            SigmetHazard::SevereTurbulence => "Severe turbulence",
            SigmetHazard::SevereIcing => "Severe icing",
            SigmetHazard::DustSandstorm => "Dust/sandstorm",
            SigmetHazard::Thunderstorms => "Thunderstorms",
            SigmetHazard::MountainWave => "Mountain wave",
            SigmetHazard::MountainObscuration => "Mountain obscuration",
            SigmetHazard::IfrConditions => "IFR conditions",
            SigmetHazard::LowLevelWindShear => "Low-level wind shear",
            SigmetHazard::Turbulence => "Turbulence",
            SigmetHazard::Icing => "Icing",
            SigmetHazard::StrongSurfaceWind => "Strong surface wind",
            SigmetHazard::Unknown => "Unknown hazard",
        }
    }

    /// Hazards that warrant avoidance rather than caution
    pub fn is_severe(&self) -> bool {
        matches!(
            self,
            SigmetHazard::VolcanicAsh
                | SigmetHazard::TropicalCyclone
                | SigmetHazard::SevereTurbulence
                | SigmetHazard::SevereIcing
                | SigmetHazard::DustSandstorm
                | SigmetHazard::Thunderstorms
                | SigmetHazard::MountainWave
        )
    }
}

impl std::fmt::Display for SigmetHazard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Vertical extent of an advisory, in feet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AltitudeRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_ft: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling_ft: Option<u32>,
    pub floor_is_surface: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Moving {
        direction: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        speed_kt: Option<u32>,
    },
    Stationary,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IntensityTrend {
    Intensifying,
    Weakening,
    NoChange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DecodedSigmet {
    pub raw: String,
    pub kind: AdvisoryKind,
    pub hazard: SigmetHazard,
    /// Affected area, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<AltitudeRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DayTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DayTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement: Option<Movement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<IntensityTrend>,
    pub parse_errors: Vec<ParseError>,
}

impl DecodedSigmet {
    /// Whether the validity window covers `at`. Missing bounds are open; a
    /// window whose end precedes its start wraps over a month boundary, as
    /// does a single bound on day 1 or 2 read against the end of a month.
    pub fn is_active_at(&self, at: &DayTime) -> bool {
        let t = at.minutes_of_month();
        match (self.valid_from, self.valid_to) {
            (Some(from), Some(to)) => {
                let (from, to) = (from.minutes_of_month(), to.minutes_of_month());
                if from <= to {
                    (from..=to).contains(&t)
                } else {
                    t >= from || t <= to
                }
            }
            (Some(from), None) => {
                next_month(&from, at) || (t >= from.minutes_of_month() && !next_month(at, &from))
            }
            (None, Some(to)) => {
                next_month(at, &to) || (t <= to.minutes_of_month() && !next_month(&to, at))
            }
            (None, None) => true,
        }
    }
}

/// `later` falls early in the month after `earlier`
fn next_month(earlier: &DayTime, later: &DayTime) -> bool {
    later.day < earlier.day && later.day <= 2 && earlier.day >= 27
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_sigmet;

    fn sigmet(from: Option<DayTime>, to: Option<DayTime>) -> DecodedSigmet {
        DecodedSigmet {
            valid_from: from,
            valid_to: to,
            ..Default::default()
        }
    }

    #[test]
    fn test_active_window() {
        let s = sigmet(Some(DayTime::new(15, 18, 0)), Some(DayTime::new(15, 22, 0)));
        assert!(s.is_active_at(&DayTime::new(15, 19, 55)));
        assert!(!s.is_active_at(&DayTime::new(15, 23, 0)));
        assert!(!s.is_active_at(&DayTime::new(14, 19, 0)));
    }

    #[test]
    fn test_active_window_wraps_month() {
        let s = sigmet(Some(DayTime::new(31, 22, 0)), Some(DayTime::new(1, 2, 0)));
        assert!(s.is_active_at(&DayTime::new(31, 23, 0)));
        assert!(s.is_active_at(&DayTime::new(1, 1, 0)));
        assert!(!s.is_active_at(&DayTime::new(1, 3, 0)));
    }

    #[test]
    fn test_valid_until_wraps_month() {
        let s = decode_sigmet("SIGMET 1 VALID UNTIL 010200 SEV TURB FL250/370");
        assert!(s.is_active_at(&DayTime::new(31, 23, 0)));
        assert!(s.is_active_at(&DayTime::new(1, 1, 0)));
        assert!(!s.is_active_at(&DayTime::new(1, 3, 0)));

        let expired = sigmet(None, Some(DayTime::new(31, 22, 0)));
        assert!(!expired.is_active_at(&DayTime::new(1, 1, 0)));
        assert!(expired.is_active_at(&DayTime::new(31, 21, 0)));
    }

    #[test]
    fn test_open_start_wraps_month() {
        let s = sigmet(Some(DayTime::new(30, 22, 0)), None);
        assert!(s.is_active_at(&DayTime::new(1, 1, 0)));
        assert!(!s.is_active_at(&DayTime::new(30, 21, 0)));

        let upcoming = sigmet(Some(DayTime::new(1, 2, 0)), None);
        assert!(!upcoming.is_active_at(&DayTime::new(31, 23, 0)));
    }

    #[test]
    fn test_open_window_is_active() {
        assert!(sigmet(None, None).is_active_at(&DayTime::new(10, 0, 0)));
    }
}
