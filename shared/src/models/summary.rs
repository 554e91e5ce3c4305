//! Briefing-level summaries over the decoded reports. None of these feed the
//! risk score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::pirep::Severity;
use super::sigmet::SigmetHazard;
use super::taf::ChangeKind;

/// Pilot reports grouped by urgency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PirepSummary {
    pub total: usize,
    pub urgent: usize,
    pub routine: usize,
    pub has_turbulence: bool,
    pub has_icing: bool,
    /// Some report carried flight visibility or sky condition
    pub has_weather: bool,
    pub worst_severity: Severity,
    pub lines: Vec<String>,
}

/// Active in-scope advisories, counted per hazard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SigmetAnalysis {
    pub active: usize,
    pub hazards: BTreeMap<SigmetHazard, usize>,
    pub impacts: Vec<String>,
    pub recommendations: Vec<String>,
}

impl SigmetAnalysis {
    pub fn count(&self, hazard: SigmetHazard) -> usize {
        self.hazards.get(&hazard).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendConcern {
    LowVisibility,
    SevereWeather,
    LowCeiling,
}

/// One worsening condition forecast by a TAF change group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastTrend {
    pub change: ChangeKind,
    pub concern: TrendConcern,
    pub message: String,
}

/// Worsening TAF trends and temperature extremes for one airport
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ForecastOutlook {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trends: Vec<ForecastTrend>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub temperature_extremes: Vec<String>,
}

impl ForecastOutlook {
    pub fn is_empty(&self) -> bool {
        self.trends.is_empty() && self.temperature_extremes.is_empty()
    }

    pub fn has(&self, concern: TrendConcern) -> bool {
        self.trends.iter().any(|t| t.concern == concern)
    }
}
