//! Briefing service: concurrent fetch of every source, then assembly
//!
//! The five fetches for an airport run together, each under its own deadline.
//! A slow or failing source only costs its own section of the briefing.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use shared::{
    assemble_briefing, BriefingRecord, FetchFailure, RiskEngine, RouteBriefing, SourceReports,
    SourceResult, StationScope,
};
use tracing::{info, warn};

use crate::external::ReportSource;

/// Briefing service for airports and routes
#[derive(Clone)]
pub struct BriefingService {
    source: Arc<dyn ReportSource>,
    engine: RiskEngine,
    deadline: Duration,
    /// Station id to the FIR/ARTCC ids whose SIGMETs concern it
    sigmet_areas: HashMap<String, Vec<String>>,
}

impl BriefingService {
    /// Create a new BriefingService instance
    pub fn new(source: Arc<dyn ReportSource>, engine: RiskEngine, deadline: Duration) -> Self {
        Self {
            source,
            engine,
            deadline,
            sigmet_areas: HashMap::new(),
        }
    }

    pub fn with_sigmet_areas(mut self, areas: HashMap<String, Vec<String>>) -> Self {
        self.sigmet_areas = areas
            .into_iter()
            .map(|(station, ids)| (station.trim().to_ascii_uppercase(), ids))
            .collect();
        self
    }

    fn scope(&self, station: &str) -> StationScope {
        let areas = self.sigmet_areas.get(station).cloned().unwrap_or_default();
        StationScope::new(station).with_areas(areas)
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Build the briefing for one station
    pub async fn airport_briefing(&self, station: &str) -> BriefingRecord {
        let source = self.source.as_ref();
        let (metar, taf, pireps, sigmets, notams) = tokio::join!(
            within(self.deadline, "METAR", source.fetch_metar(station)),
            within(self.deadline, "TAF", source.fetch_taf(station)),
            within(self.deadline, "PIREP", source.fetch_pireps(station)),
            within(self.deadline, "SIGMET", source.fetch_sigmets(station)),
            within(self.deadline, "NOTAM", source.fetch_notams(station)),
        );

        let reports = SourceReports {
            metar,
            taf,
            pireps,
            sigmets,
            notams,
        };
        let record = assemble_briefing(self.scope(station), reports, &self.engine);

        for error in &record.errors {
            warn!(
                station = %station,
                source = %error.source,
                kind = ?error.kind,
                "Briefing source failed: {}",
                error.message
            );
        }
        info!(
            station = %station,
            category = ?record.risk.as_ref().map(|r| r.category),
            sigmets = record.sigmets.len(),
            sigmets_in_scope = record.sigmets_in_scope.len(),
            errors = record.errors.len(),
            "Briefing assembled"
        );

        record
    }

    /// Build departure and arrival briefings concurrently
    pub async fn route_briefing(&self, departure: &str, arrival: &str) -> RouteBriefing {
        let (departure, arrival) = tokio::join!(
            self.airport_briefing(departure),
            self.airport_briefing(arrival)
        );
        RouteBriefing { departure, arrival }
    }
}

/// Run a fetch under a deadline; an elapsed deadline becomes a timeout failure
async fn within<T>(
    deadline: Duration,
    label: &str,
    fetch: impl Future<Output = SourceResult<T>>,
) -> SourceResult<T> {
    match tokio::time::timeout(deadline, fetch).await {
        Ok(result) => result,
        Err(_) => Err(FetchFailure::timeout(format!(
            "{} request timed out after {} ms",
            label,
            deadline.as_millis()
        ))),
    }
}
