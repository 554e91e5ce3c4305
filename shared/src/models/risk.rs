//! Risk assessment records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Overall flight category, presented as a traffic light
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    #[default]
    Clear,
    Significant,
    Severe,
}

impl RiskCategory {
    pub fn color(&self) -> &'static str {
        match self {
            RiskCategory::Clear => "green",
            RiskCategory::Significant => "yellow",
            RiskCategory::Severe => "red",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Clear => "Clear",
            RiskCategory::Significant => "Significant",
            RiskCategory::Severe => "Severe",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Wind,
    Visibility,
    Ceiling,
    Thunderstorm,
    FreezingPrecipitation,
    Fog,
    Sigmet,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 7] = [
        RiskFactor::Wind,
        RiskFactor::Visibility,
        RiskFactor::Ceiling,
        RiskFactor::Thunderstorm,
        RiskFactor::FreezingPrecipitation,
        RiskFactor::Fog,
        RiskFactor::Sigmet,
    ];
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    #[default]
    None,
    Moderate,
    Severe,
}

impl Impact {
    pub fn from_points(points: u32) -> Self {
        match points {
            0 => Impact::None,
            1 => Impact::Moderate,
            _ => Impact::Severe,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FactorScore {
    pub points: u32,
    pub impact: Impact,
}

impl FactorScore {
    pub fn new(points: u32) -> Self {
        Self {
            points,
            impact: Impact::from_points(points),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RiskAssessment {
    pub category: RiskCategory,
    pub total_score: u32,
    /// Every factor, including those that scored zero
    pub factors: BTreeMap<RiskFactor, FactorScore>,
    /// One sentence per nonzero factor, in factor order
    pub reasoning: Vec<String>,
}

impl RiskAssessment {
    pub fn points_for(&self, factor: RiskFactor) -> u32 {
        self.factors.get(&factor).map_or(0, |s| s.points)
    }
}
