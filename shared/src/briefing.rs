//! Briefing assembly from already-fetched raw reports
//!
//! Each source is decoded on its own. A source that failed to fetch, or whose
//! text cannot be decoded, adds one entry to the record's `errors` and leaves
//! every other source untouched.
//!
//! The SIGMET feed is regional, so the record lists every advisory but only
//! those naming the station (or an area configured for it) are scored.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::decode::{
    decode_metar, decode_pirep, decode_sigmet, decode_taf, summarize_notams, words,
};
use crate::models::{BriefingRecord, DecodedSigmet, FailureKind, SourceError};
use crate::risk::RiskEngine;
use crate::summary::{analyze_sigmets, forecast_outlook, summarize_pireps};
use crate::types::ReportKind;

/// Why a source produced no text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchFailure {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Fetch,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Timeout,
            message: message.into(),
        }
    }
}

pub type SourceResult<T> = Result<T, FetchFailure>;

/// Raw texts (or failures) for one airport
#[derive(Debug, Clone)]
pub struct SourceReports {
    pub metar: SourceResult<String>,
    pub taf: SourceResult<String>,
    pub pireps: SourceResult<Vec<String>>,
    pub sigmets: SourceResult<Vec<String>>,
    pub notams: SourceResult<Vec<String>>,
}

/// Identifiers that put an advisory in scope for one station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationScope {
    pub station: String,
    /// FIR, ARTCC or VOR ids that cover the station, e.g. `KZNY`
    #[serde(default)]
    pub areas: Vec<String>,
}

impl StationScope {
    pub fn new(station: impl Into<String>) -> Self {
        Self {
            station: station.into().trim().to_ascii_uppercase(),
            areas: Vec::new(),
        }
    }

    pub fn with_areas(mut self, areas: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.areas = areas
            .into_iter()
            .map(|a| a.into().trim().to_ascii_uppercase())
            .filter(|a| !a.is_empty())
            .collect();
        self
    }

    /// The station id, its three-letter form for `K`/`P` stations
    /// (`KBOS` is `BOS` in US advisories), and the configured areas
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids = vec![self.station.clone()];
        if self.station.len() == 4 && self.station.starts_with(['K', 'P']) {
            ids.push(self.station[1..].to_string());
        }
        ids.extend(self.areas.iter().cloned());
        ids
    }

    /// Whether the advisory text names one of the identifiers as a whole word
    pub fn covers(&self, sigmet: &DecodedSigmet) -> bool {
        let text: HashSet<String> = words(&sigmet.raw).collect();
        self.identifiers().iter().any(|id| text.contains(id))
    }
}

impl From<&str> for StationScope {
    fn from(station: &str) -> Self {
        StationScope::new(station)
    }
}

fn source_error(source: ReportKind, failure: FetchFailure) -> SourceError {
    SourceError::new(source, failure.kind, failure.message)
}

fn decode_failure(source: ReportKind, message: impl Into<String>) -> SourceError {
    SourceError::new(source, FailureKind::Decode, message)
}

pub fn assemble_briefing(
    scope: impl Into<StationScope>,
    reports: SourceReports,
    engine: &RiskEngine,
) -> BriefingRecord {
    let scope = scope.into();
    let mut record = BriefingRecord {
        station: scope.station.clone(),
        ..Default::default()
    };

    match reports.metar {
        Ok(text) if text.trim().is_empty() => record
            .errors
            .push(decode_failure(ReportKind::Metar, "No METAR text returned")),
        Ok(text) => {
            let metar = decode_metar(&text);
            if metar.is_usable() {
                record.metar = Some(metar);
            } else {
                record
                    .errors
                    .push(decode_failure(ReportKind::Metar, "METAR has no station identifier"));
            }
        }
        Err(failure) => record.errors.push(source_error(ReportKind::Metar, failure)),
    }

    match reports.taf {
        Ok(text) if text.trim().is_empty() => record
            .errors
            .push(decode_failure(ReportKind::Taf, "No TAF text returned")),
        Ok(text) => {
            let taf = decode_taf(&text);
            if taf.is_usable() {
                record.taf = Some(taf);
            } else {
                record
                    .errors
                    .push(decode_failure(ReportKind::Taf, "TAF has no station identifier"));
            }
        }
        Err(failure) => record.errors.push(source_error(ReportKind::Taf, failure)),
    }

    match reports.pireps {
        Ok(texts) => {
            record.pireps = texts
                .iter()
                .filter(|t| !t.trim().is_empty())
                .map(|t| decode_pirep(t))
                .collect()
        }
        Err(failure) => record.errors.push(source_error(ReportKind::Pirep, failure)),
    }

    match reports.sigmets {
        Ok(texts) => {
            record.sigmets = texts
                .iter()
                .filter(|t| !t.trim().is_empty())
                .map(|t| decode_sigmet(t))
                .collect()
        }
        Err(failure) => record.errors.push(source_error(ReportKind::Sigmet, failure)),
    }

    match reports.notams {
        Ok(texts) => record.notams = summarize_notams(texts.as_slice()),
        Err(failure) => record.errors.push(source_error(ReportKind::Notam, failure)),
    }

    record.sigmets_in_scope = record
        .sigmets
        .iter()
        .enumerate()
        .filter(|(_, sigmet)| scope.covers(sigmet))
        .map(|(i, _)| i)
        .collect();
    let scoped: Vec<DecodedSigmet> = record.scoped_sigmets().cloned().collect();

    record.risk = record
        .metar
        .as_ref()
        .map(|metar| engine.assess(metar, &scoped));

    let observed_at = record.metar.as_ref().and_then(|m| m.observed_at);
    record.pirep_summary = summarize_pireps(&record.pireps);
    record.sigmet_analysis = analyze_sigmets(&scoped, observed_at.as_ref());
    record.outlook = forecast_outlook(
        record.taf.as_ref(),
        record.metar.as_ref(),
        engine.thresholds(),
    );

    record
}
