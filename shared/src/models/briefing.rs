//! Per-airport and per-route briefing records

use serde::{Deserialize, Serialize};

use super::metar::DecodedMetar;
use super::notam::NotamSummary;
use super::pirep::DecodedPirep;
use super::risk::RiskAssessment;
use super::sigmet::DecodedSigmet;
use super::summary::{ForecastOutlook, PirepSummary, SigmetAnalysis};
use super::taf::DecodedTaf;
use crate::types::ReportKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Fetch,
    Timeout,
    Decode,
}

/// One failed source of a briefing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceError {
    pub source: ReportKind,
    pub kind: FailureKind,
    pub message: String,
}

impl SourceError {
    pub fn new(source: ReportKind, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            source,
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BriefingRecord {
    pub station: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metar: Option<DecodedMetar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taf: Option<DecodedTaf>,
    /// Every advisory the feed returned
    pub sigmets: Vec<DecodedSigmet>,
    /// Indices into `sigmets` of the advisories that name this station or
    /// one of its areas. Only these are scored and analyzed.
    #[serde(default)]
    pub sigmets_in_scope: Vec<usize>,
    pub pireps: Vec<DecodedPirep>,
    pub notams: Vec<NotamSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskAssessment>,
    #[serde(default)]
    pub pirep_summary: PirepSummary,
    #[serde(default)]
    pub sigmet_analysis: SigmetAnalysis,
    #[serde(default, skip_serializing_if = "ForecastOutlook::is_empty")]
    pub outlook: ForecastOutlook,
    pub errors: Vec<SourceError>,
}

impl BriefingRecord {
    pub fn errors_for(&self, source: ReportKind) -> impl Iterator<Item = &SourceError> {
        self.errors.iter().filter(move |e| e.source == source)
    }

    pub fn scoped_sigmets(&self) -> impl Iterator<Item = &DecodedSigmet> {
        self.sigmets_in_scope
            .iter()
            .filter_map(|&i| self.sigmets.get(i))
    }
}

/// Departure and arrival briefings, built independently
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteBriefing {
    pub departure: BriefingRecord,
    pub arrival: BriefingRecord,
}

impl RouteBriefing {
    pub fn error_count(&self) -> usize {
        self.departure.errors.len() + self.arrival.errors.len()
    }
}
