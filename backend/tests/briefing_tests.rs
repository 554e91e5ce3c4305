//! Briefing assembly tests
//!
//! Verifies that one failing source never hides the others, per airport and
//! per route.

use shared::{
    assemble_briefing, FailureKind, FetchFailure, ReportKind, RiskEngine, RouteBriefing,
    SourceReports,
};

fn reports(station: &str) -> SourceReports {
    SourceReports {
        metar: Ok(format!("{} 261951Z 27010KT 10SM FEW050 24/18 A2995", station)),
        taf: Ok(format!("TAF {} 261730Z 2618/2724 26010KT P6SM FEW250", station)),
        pireps: Ok(vec![format!("UA /OV {} /TM 1930 /FL080 /TB LGT", station)]),
        sigmets: Ok(vec![format!(
            "CONVECTIVE SIGMET 4E VALID UNTIL 262155 AREA EMBD TS 20 NM AROUND {} TOPS FL400 MOV E 15KT",
            &station[1..]
        )]),
        notams: Ok(vec!["TWY B CLSD".to_string(), "ILS RWY 22L U/S".to_string()]),
    }
}

// ============================================================================
// Scenario E: route with a failing arrival TAF
// ============================================================================

mod route_briefing {
    use super::*;

    #[test]
    fn arrival_taf_failure_is_the_only_error() {
        let engine = RiskEngine::default();
        let mut arrival = reports("KBOS");
        arrival.taf = Err(FetchFailure::fetch("taf returned HTTP 503"));

        let route = RouteBriefing {
            departure: assemble_briefing("KJFK", reports("KJFK"), &engine),
            arrival: assemble_briefing("KBOS", arrival, &engine),
        };

        for record in [&route.departure, &route.arrival] {
            assert!(record.metar.is_some());
            assert_eq!(record.pireps.len(), 1);
            assert_eq!(record.sigmets.len(), 1);
            assert_eq!(record.notams.len(), 2);
            assert!(record.risk.is_some());
        }
        assert!(route.departure.taf.is_some());
        assert!(route.arrival.taf.is_none());
        assert_eq!(route.error_count(), 1);

        let errors: Vec<_> = route.arrival.errors_for(ReportKind::Taf).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, FailureKind::Fetch);
    }

    #[test]
    fn active_convective_sigmet_scores_severe_factor() {
        let record = assemble_briefing("KJFK", reports("KJFK"), &RiskEngine::default());
        assert_eq!(record.sigmets_in_scope, vec![0]);
        let risk = record.risk.unwrap();
        assert_eq!(risk.points_for(shared::RiskFactor::Sigmet), 2);
        assert_eq!(record.sigmet_analysis.count(shared::SigmetHazard::Thunderstorms), 1);
    }

    #[test]
    fn departure_sigmet_does_not_score_at_arrival() {
        let engine = RiskEngine::default();
        let mut arrival = reports("KBOS");
        arrival.sigmets = reports("KJFK").sigmets;

        let record = assemble_briefing("KBOS", arrival, &engine);
        assert_eq!(record.sigmets.len(), 1);
        assert!(record.sigmets_in_scope.is_empty());
        assert_eq!(record.risk.unwrap().points_for(shared::RiskFactor::Sigmet), 0);
        assert_eq!(record.sigmet_analysis.active, 0);
    }
}

mod airport_briefing {
    use super::*;

    #[test]
    fn metar_without_station_is_a_decode_error() {
        let mut reports = reports("KJFK");
        reports.metar = Ok("27010KT 10SM".to_string());
        let record = assemble_briefing("KJFK", reports, &RiskEngine::default());
        assert!(record.metar.is_none());
        assert!(record.risk.is_none());
        assert_eq!(record.errors.len(), 1);
        assert_eq!(record.errors[0].source, ReportKind::Metar);
        assert_eq!(record.errors[0].kind, FailureKind::Decode);
        assert!(record.taf.is_some());
    }

    #[test]
    fn notam_timeout_keeps_everything_else() {
        let mut reports = reports("KJFK");
        reports.notams = Err(FetchFailure::timeout("NOTAM request timed out"));
        let record = assemble_briefing("KJFK", reports, &RiskEngine::default());
        assert!(record.notams.is_empty());
        assert!(record.metar.is_some());
        assert_eq!(record.errors[0].kind, FailureKind::Timeout);
    }
}
