//! Risk scoring tests
//!
//! Verifies the reference scenarios and that the score never drops as wind
//! increases.

use proptest::prelude::*;
use shared::{decode_metar, decode_sigmet, RiskCategory, RiskEngine, RiskFactor};

fn assess(raw: &str) -> shared::RiskAssessment {
    RiskEngine::default().assess(&decode_metar(raw), &[])
}

fn metar_with_wind(knots: u32) -> String {
    format!("KJFK 261951Z 270{:02}KT 10SM FEW050 24/18 A2995", knots)
}

// ============================================================================
// Reference scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn scenario_a_clear() {
        let risk = assess("KJFK 261951Z 27010KT 10SM FEW050 24/18 A2995");
        assert_eq!(risk.category, RiskCategory::Clear);
        assert_eq!(risk.total_score, 0);
    }

    #[test]
    fn scenario_b_significant() {
        let risk = assess("KJFK 261951Z 27020KT 4SM FEW050 24/18 A2995");
        assert_eq!(risk.points_for(RiskFactor::Wind), 1);
        assert_eq!(risk.points_for(RiskFactor::Visibility), 1);
        assert_eq!(risk.total_score, 2);
        assert_eq!(risk.category, RiskCategory::Significant);
        assert_eq!(risk.category.color(), "yellow");
    }

    #[test]
    fn scenario_c_severe() {
        let risk = assess("KJFK 261951Z 27030KT 10SM TS FEW050 24/18 A2995");
        assert_eq!(risk.points_for(RiskFactor::Wind), 2);
        assert_eq!(risk.points_for(RiskFactor::Thunderstorm), 2);
        assert_eq!(risk.total_score, 4);
        assert_eq!(risk.category, RiskCategory::Severe);
    }

    #[test]
    fn reasoning_names_each_contributing_factor() {
        let risk = assess("KJFK 261951Z 27030KT 10SM TS FEW050 24/18 A2995");
        assert_eq!(risk.reasoning.len(), 2);
        assert!(risk.reasoning.iter().any(|r| r.contains("30 kt")));
        assert!(risk.reasoning.iter().any(|r| r.contains("Thunderstorm")));
    }

    #[test]
    fn trend_forecast_is_not_scored_as_current_weather() {
        let risk = assess("EGLL 261950Z 24010KT 9999 FEW040 18/12 Q1015 TEMPO 4000 TSRA");
        assert_eq!(risk.points_for(RiskFactor::Thunderstorm), 0);
        assert_eq!(risk.points_for(RiskFactor::Visibility), 0);
        assert_eq!(risk.category, RiskCategory::Clear);
    }

    #[test]
    fn lowercase_report_scores_like_uppercase() {
        let lower = assess("kjfk 261951z 27030kt 10sm ts few050 24/18 a2995");
        let upper = assess("KJFK 261951Z 27030KT 10SM TS FEW050 24/18 A2995");
        assert_eq!(lower, upper);
        assert_eq!(lower.category, RiskCategory::Severe);
    }

    #[test]
    fn us_airmet_state_list_is_not_volcanic_ash() {
        let metar = decode_metar("KJFK 261951Z 27010KT 10SM FEW050 24/18 A2995");
        let airmet = decode_sigmet(
            "AIRMET SIERRA UPDT 2 FOR IFR VALID UNTIL 262100 AIRMET IFR...NY PA WV MD DC DE VA NJ \
             FROM 20SW ALB TO 30E ACK TO 20SW RIC TO 20SW ALB CIG BLW 010/VIS BLW 3SM BR",
        );
        let risk = RiskEngine::default().assess(&metar, &[airmet]);
        assert_eq!(risk.points_for(RiskFactor::Sigmet), 1);
        assert!(risk.reasoning.iter().all(|r| !r.contains("volcanic")));
    }

    #[test]
    fn active_sigmet_adds_points() {
        let metar = decode_metar("KJFK 151955Z 27010KT 10SM FEW050 24/18 A2995");
        let sigmet = decode_sigmet("SIGMET 1 VALID 151800/152200 SEV ICE FL080/160");
        let risk = RiskEngine::default().assess(&metar, &[sigmet]);
        assert_eq!(risk.points_for(RiskFactor::Sigmet), 2);
        assert_eq!(risk.category, RiskCategory::Significant);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// More wind never lowers the total score
    #[test]
    fn prop_score_monotonic_in_wind(a in 0u32..100, b in 0u32..100) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_risk = assess(&metar_with_wind(low));
        let high_risk = assess(&metar_with_wind(high));
        prop_assert!(low_risk.total_score <= high_risk.total_score);
        prop_assert!(low_risk.points_for(RiskFactor::Wind) <= high_risk.points_for(RiskFactor::Wind));
    }

    /// Total equals the sum of factor points and the category follows it
    #[test]
    fn prop_total_is_sum_of_factors(knots in 0u32..100, miles in 1u32..11) {
        let raw = format!("KJFK 261951Z 270{:02}KT {}SM BKN030 24/18 A2995", knots, miles);
        let risk = assess(&raw);
        let sum: u32 = risk.factors.values().map(|f| f.points).sum();
        prop_assert_eq!(risk.total_score, sum);
        prop_assert_eq!(risk.category, RiskEngine::default().categorize(sum));
    }
}
