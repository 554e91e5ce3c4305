//! Flight risk scoring over a decoded METAR and the SIGMETs in scope
//!
//! Each factor scores 0, 1 or 2 points from [`RiskThresholds`]. The total is
//! mapped to a category with two cut points:
//!
//! | factor                 | 0 points        | 1 point         | 2 points        |
//! |------------------------|-----------------|-----------------|-----------------|
//! | wind (peak kt)         | < 15            | 15 to 25        | > 25            |
//! | visibility (SM)        | > 5             | 3 to 5          | < 3             |
//! | ceiling (ft AGL)       | > 3000 or none  | 1000 to 3000    | < 1000          |
//! | thunderstorm           | absent          |                 | present         |
//! | freezing precipitation | absent          | light           | moderate, heavy |
//! | fog                    | absent          | present         |                 |
//! | active SIGMET          | none            | moderate hazard | severe hazard   |
//!
//! A total of 0 is clear, below `severe_at` significant, otherwise severe.
//! Measurements missing from the METAR score 0, and so does weather reported
//! in the vicinity (`VCTS`, `VCFG`).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    DecodedMetar, DecodedSigmet, FactorScore, Intensity, RiskAssessment, RiskCategory, RiskFactor,
};

/// Threshold table, overridable from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Peak wind at or above this scores 1
    pub wind_moderate_kt: u32,
    /// Peak wind above this scores 2
    pub wind_severe_kt: u32,
    /// Visibility at or below this scores 1
    pub visibility_moderate_sm: Decimal,
    /// Visibility below this scores 2
    pub visibility_severe_sm: Decimal,
    /// Ceiling at or below this scores 1
    pub ceiling_moderate_ft: u32,
    /// Ceiling below this scores 2
    pub ceiling_severe_ft: u32,
    pub significant_at: u32,
    pub severe_at: u32,
    /// Temperatures at or above this are listed in the outlook, not scored
    pub temperature_hot_c: i32,
    /// Temperatures at or below this are listed in the outlook, not scored
    pub temperature_cold_c: i32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            wind_moderate_kt: 15,
            wind_severe_kt: 25,
            visibility_moderate_sm: Decimal::from(5),
            visibility_severe_sm: Decimal::from(3),
            ceiling_moderate_ft: 3000,
            ceiling_severe_ft: 1000,
            significant_at: 1,
            severe_at: 4,
            temperature_hot_c: 40,
            temperature_cold_c: -20,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    thresholds: RiskThresholds,
}

impl RiskEngine {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RiskThresholds {
        &self.thresholds
    }

    /// Map a total score to its category
    pub fn categorize(&self, total: u32) -> RiskCategory {
        if total >= self.thresholds.severe_at {
            RiskCategory::Severe
        } else if total >= self.thresholds.significant_at {
            RiskCategory::Significant
        } else {
            RiskCategory::Clear
        }
    }

    /// Score a METAR. SIGMETs count only while active at the observation
    /// time; with no observation time every SIGMET given counts.
    pub fn assess(&self, metar: &DecodedMetar, sigmets: &[DecodedSigmet]) -> RiskAssessment {
        let mut factors = BTreeMap::new();
        let mut reasoning = Vec::new();

        for factor in RiskFactor::ALL {
            let (points, reason) = match factor {
                RiskFactor::Wind => self.score_wind(metar),
                RiskFactor::Visibility => self.score_visibility(metar),
                RiskFactor::Ceiling => self.score_ceiling(metar),
                RiskFactor::Thunderstorm => score_thunderstorm(metar),
                RiskFactor::FreezingPrecipitation => score_freezing_precipitation(metar),
                RiskFactor::Fog => score_fog(metar),
                RiskFactor::Sigmet => score_sigmets(metar, sigmets),
            };
            if points > 0 {
                if let Some(reason) = reason {
                    reasoning.push(reason);
                }
            }
            factors.insert(factor, FactorScore::new(points));
        }

        let total_score = factors.values().map(|s| s.points).sum();
        RiskAssessment {
            category: self.categorize(total_score),
            total_score,
            factors,
            reasoning,
        }
    }

    fn score_wind(&self, metar: &DecodedMetar) -> (u32, Option<String>) {
        let Some(peak) = metar.wind.as_ref().map(|w| w.peak_knots()) else {
            return (0, None);
        };
        if peak > self.thresholds.wind_severe_kt {
            (2, Some(format!("Strong wind of {} kt", peak)))
        } else if peak >= self.thresholds.wind_moderate_kt {
            (1, Some(format!("Moderate wind of {} kt", peak)))
        } else {
            (0, None)
        }
    }

    fn score_visibility(&self, metar: &DecodedMetar) -> (u32, Option<String>) {
        let Some(miles) = metar.visibility.as_ref().map(|v| v.in_statute_miles()) else {
            return (0, None);
        };
        if miles < self.thresholds.visibility_severe_sm {
            (2, Some(format!("Low visibility of {} SM", miles.normalize())))
        } else if miles <= self.thresholds.visibility_moderate_sm {
            (1, Some(format!("Reduced visibility of {} SM", miles.normalize())))
        } else {
            (0, None)
        }
    }

    fn score_ceiling(&self, metar: &DecodedMetar) -> (u32, Option<String>) {
        let Some(layer) = metar.ceiling() else {
            return (0, None);
        };
        let feet = layer.height_feet();
        let label = layer.coverage.description().to_lowercase();
        if feet < self.thresholds.ceiling_severe_ft {
            (2, Some(format!("Low ceiling, {} at {} ft", label, feet)))
        } else if feet <= self.thresholds.ceiling_moderate_ft {
            (1, Some(format!("Ceiling {} at {} ft", label, feet)))
        } else {
            (0, None)
        }
    }
}

fn score_thunderstorm(metar: &DecodedMetar) -> (u32, Option<String>) {
    match metar.weather.iter().find(|w| w.is_thunderstorm()) {
        Some(w) => (2, Some(format!("Thunderstorm reported ({})", w.raw))),
        None => (0, None),
    }
}

fn score_freezing_precipitation(metar: &DecodedMetar) -> (u32, Option<String>) {
    let worst = metar
        .weather
        .iter()
        .filter(|w| w.is_freezing_precipitation())
        .max_by_key(|w| match w.intensity {
            Intensity::Light => 0,
            Intensity::Moderate => 1,
            Intensity::Heavy => 2,
        });
    match worst {
        Some(w) if w.intensity == Intensity::Light => {
            (1, Some(format!("Light freezing precipitation ({})", w.raw)))
        }
        Some(w) => (2, Some(format!("Freezing precipitation ({})", w.raw))),
        None => (0, None),
    }
}

fn score_fog(metar: &DecodedMetar) -> (u32, Option<String>) {
    match metar.weather.iter().find(|w| w.is_dense_fog()) {
        Some(w) => (1, Some(format!("Fog reported ({})", w.raw))),
        None => (0, None),
    }
}

fn score_sigmets(metar: &DecodedMetar, sigmets: &[DecodedSigmet]) -> (u32, Option<String>) {
    let active = sigmets
        .iter()
        .filter(|s| metar.observed_at.map_or(true, |at| s.is_active_at(&at)));
    let worst = active.max_by_key(|s| s.hazard.is_severe());
    match worst {
        Some(s) if s.hazard.is_severe() => {
            (2, Some(format!("Active SIGMET for {}", s.hazard.description().to_lowercase())))
        }
        Some(s) => (1, Some(format!("Active advisory for {}", s.hazard.description().to_lowercase()))),
        None => (0, None),
    }
}
