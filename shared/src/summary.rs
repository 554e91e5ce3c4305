//! Briefing summaries: PIREP categorization, SIGMET flight analysis and the
//! TAF trend outlook
//!
//! These are advisory text for the briefing page. The risk score comes only
//! from [`RiskEngine::assess`](crate::risk::RiskEngine::assess).

use crate::models::{
    lowest_ceiling, ChangeGroup, DecodedMetar, DecodedPirep, DecodedSigmet, DecodedTaf,
    ForecastConditions, ForecastOutlook, ForecastTrend, HazardObservation, Intensity,
    PirepSummary, Severity, SigmetAnalysis, SigmetHazard, TemperatureExtreme, TrendConcern,
    Urgency,
};
use crate::risk::RiskThresholds;
use crate::types::DayTime;

/// Hazard groups called out individually, with the advice each one gets
static HIGH_IMPACT: &[(&str, &[SigmetHazard], &str)] = &[
    (
        "turbulence",
        &[SigmetHazard::SevereTurbulence, SigmetHazard::Turbulence],
        "Consider turbulence avoidance and secure the cabin",
    ),
    (
        "icing",
        &[SigmetHazard::SevereIcing, SigmetHazard::Icing],
        "Verify anti-ice and de-ice systems are operational",
    ),
    (
        "thunderstorm",
        &[SigmetHazard::Thunderstorms],
        "Plan for weather deviations and delays",
    ),
    (
        "volcanic ash",
        &[SigmetHazard::VolcanicAsh],
        "Avoid the area, volcanic ash can cause engine failure",
    ),
];

pub fn summarize_pireps(pireps: &[DecodedPirep]) -> PirepSummary {
    let mut summary = PirepSummary {
        total: pireps.len(),
        ..Default::default()
    };

    for pirep in pireps {
        match pirep.urgency {
            Urgency::Urgent => summary.urgent += 1,
            Urgency::Routine => summary.routine += 1,
        }
        let conditions = &pirep.conditions;
        summary.has_turbulence |= reported(&conditions.turbulence);
        summary.has_icing |= reported(&conditions.icing);
        summary.has_weather |= conditions.visibility.is_some() || conditions.sky.is_some();
        summary.worst_severity = summary.worst_severity.max(pirep.worst_severity());
    }

    if summary.urgent > 0 {
        summary.lines.push(format!("{} urgent pilot report(s)", summary.urgent));
    }
    if summary.routine > 0 {
        summary.lines.push(format!("{} routine pilot report(s)", summary.routine));
    }
    if summary.has_turbulence {
        summary.lines.push("Turbulence reported".to_string());
    }
    if summary.has_icing {
        summary.lines.push("Icing conditions reported".to_string());
    }
    summary
}

/// `/TB NEG` and `/IC NEG` are reports of no hazard
fn reported(observation: &Option<HazardObservation>) -> bool {
    observation
        .as_ref()
        .is_some_and(|o| o.severity > Severity::None)
}

/// Count the advisories active at `at` (all of them when `at` is unknown)
/// and derive flight impacts and recommendations.
pub fn analyze_sigmets<'a>(
    sigmets: impl IntoIterator<Item = &'a DecodedSigmet>,
    at: Option<&DayTime>,
) -> SigmetAnalysis {
    let mut analysis = SigmetAnalysis::default();
    for sigmet in sigmets {
        if at.map_or(true, |at| sigmet.is_active_at(at)) {
            analysis.active += 1;
            *analysis.hazards.entry(sigmet.hazard).or_insert(0) += 1;
        }
    }

    if analysis.active == 0 {
        analysis
            .recommendations
            .push("No active SIGMETs, monitor for updates".to_string());
        return analysis;
    }

    analysis
        .impacts
        .push(format!("{} active SIGMET(s)", analysis.active));
    for (name, hazards, advice) in HIGH_IMPACT {
        let count: usize = hazards.iter().map(|h| analysis.count(*h)).sum();
        if count > 0 {
            analysis
                .impacts
                .push(format!("{} {} SIGMET(s) active", count, name));
            analysis.recommendations.push(advice.to_string());
        }
    }
    analysis
}

/// Worsening conditions in each TAF change group, plus observed or forecast
/// temperatures beyond the configured extremes.
pub fn forecast_outlook(
    taf: Option<&DecodedTaf>,
    metar: Option<&DecodedMetar>,
    thresholds: &RiskThresholds,
) -> ForecastOutlook {
    let mut outlook = ForecastOutlook::default();

    if let Some(taf) = taf {
        for change in &taf.change_groups {
            outlook.trends.extend(change_trends(change, thresholds));
        }
        let forecast = std::iter::once(&taf.base_forecast)
            .chain(taf.change_groups.iter().map(|c| &c.conditions));
        for conditions in forecast {
            forecast_extremes(conditions, thresholds, &mut outlook.temperature_extremes);
        }
    }

    if let Some(celsius) = metar.and_then(|m| m.temperature.as_ref()).map(|t| t.celsius) {
        if celsius >= thresholds.temperature_hot_c {
            outlook
                .temperature_extremes
                .insert(0, format!("Very high temperature of {}°C observed", celsius));
        } else if celsius <= thresholds.temperature_cold_c {
            outlook
                .temperature_extremes
                .insert(0, format!("Very low temperature of {}°C observed", celsius));
        }
    }

    outlook
}

fn change_trends(change: &ChangeGroup, thresholds: &RiskThresholds) -> Vec<ForecastTrend> {
    let conditions = &change.conditions;
    let label = change.kind.label().to_lowercase();
    let mut trends = Vec::new();
    let mut push = |concern: TrendConcern, what: &str| {
        trends.push(ForecastTrend {
            change: change.kind,
            concern,
            message: format!("Forecast shows {} ({})", what, label),
        })
    };

    if conditions
        .visibility
        .as_ref()
        .is_some_and(|v| !v.unlimited && v.in_statute_miles() <= thresholds.visibility_severe_sm)
    {
        push(TrendConcern::LowVisibility, "deteriorating visibility");
    }
    if conditions.weather.iter().any(|w| {
        w.is_thunderstorm()
            || w.intensity == Intensity::Heavy
            || w.has_phenomenon("GR")
            || w.has_phenomenon("FC")
    }) {
        push(TrendConcern::SevereWeather, "severe weather");
    }
    if lowest_ceiling(&conditions.clouds)
        .is_some_and(|layer| layer.height_feet() <= thresholds.ceiling_severe_ft)
    {
        push(TrendConcern::LowCeiling, "low ceiling");
    }
    trends
}

fn forecast_extremes(
    conditions: &ForecastConditions,
    thresholds: &RiskThresholds,
    out: &mut Vec<String>,
) {
    for forecast in &conditions.temperatures {
        let line = match forecast.extreme {
            TemperatureExtreme::Max if forecast.celsius >= thresholds.temperature_hot_c => {
                format!("Forecast maximum of {}°C at {}Z", forecast.celsius, forecast.at)
            }
            TemperatureExtreme::Min if forecast.celsius <= thresholds.temperature_cold_c => {
                format!("Forecast minimum of {}°C at {}Z", forecast.celsius, forecast.at)
            }
            _ => continue,
        };
        out.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_metar, decode_pirep, decode_sigmet, decode_taf};
    use crate::models::ChangeKind;

    #[test]
    fn test_pirep_summary_counts_and_flags() {
        let pireps = vec![
            decode_pirep("JFK UUA /OV JFK090020 /TM 1930 /FL250 /TP B738 /TB SEV 240-260"),
            decode_pirep("JFK UA /OV JFK /TM 1935 /FL080 /TP C172 /IC LGT RIME /SK BKN070"),
            decode_pirep("BOS UA /OV BOS /TM 1940 /FL120 /TP E170 /TB NEG"),
        ];
        let summary = summarize_pireps(&pireps);
        assert_eq!(summary.total, 3);
        assert_eq!((summary.urgent, summary.routine), (1, 2));
        assert!(summary.has_turbulence);
        assert!(summary.has_icing);
        assert!(summary.has_weather);
        assert_eq!(summary.worst_severity, Severity::Severe);
        assert_eq!(
            summary.lines,
            vec![
                "1 urgent pilot report(s)",
                "2 routine pilot report(s)",
                "Turbulence reported",
                "Icing conditions reported"
            ]
        );
    }

    #[test]
    fn test_smooth_ride_is_not_turbulence() {
        let summary = summarize_pireps(&[decode_pirep("UA /OV BOS /FL120 /TB NEG")]);
        assert!(!summary.has_turbulence);
        assert_eq!(summary.lines, vec!["1 routine pilot report(s)"]);
    }

    #[test]
    fn test_sigmet_analysis_groups_hazards() {
        let sigmets = vec![
            decode_sigmet("SIGMET 1 VALID 261800/262200 SEV TURB FL250/370"),
            decode_sigmet("AIRMET TANGO FOR TURB VALID UNTIL 262100 BTN FL180 AND FL300"),
            decode_sigmet("CONVECTIVE SIGMET 45E VALID UNTIL 262055 EMBD TS TOPS ABV FL450"),
            decode_sigmet("SIGMET 4 VALID 261000/261400 SEV ICE FL100/200"),
        ];
        let analysis = analyze_sigmets(&sigmets, Some(&DayTime::new(26, 19, 55)));
        assert_eq!(analysis.active, 3);
        assert_eq!(analysis.count(SigmetHazard::SevereTurbulence), 1);
        assert_eq!(analysis.count(SigmetHazard::Turbulence), 1);
        assert_eq!(analysis.count(SigmetHazard::SevereIcing), 0);
        assert_eq!(
            analysis.impacts,
            vec![
                "3 active SIGMET(s)",
                "2 turbulence SIGMET(s) active",
                "1 thunderstorm SIGMET(s) active"
            ]
        );
        assert_eq!(analysis.recommendations.len(), 2);
        assert!(analysis.recommendations[1].contains("deviations"));
    }

    #[test]
    fn test_no_active_sigmets() {
        let none: Vec<DecodedSigmet> = Vec::new();
        let analysis = analyze_sigmets(&none, None);
        assert_eq!(analysis.active, 0);
        assert!(analysis.impacts.is_empty());
        assert_eq!(
            analysis.recommendations,
            vec!["No active SIGMETs, monitor for updates"]
        );
    }

    #[test]
    fn test_volcanic_ash_recommends_avoidance() {
        let ash = decode_sigmet("SIGMET 2 VALID 261800/262200 VA ERUPTION MT ETNA VA CLD FL100/200");
        let analysis = analyze_sigmets([&ash], None);
        assert_eq!(analysis.count(SigmetHazard::VolcanicAsh), 1);
        assert!(analysis.recommendations[0].starts_with("Avoid"));
    }

    #[test]
    fn test_outlook_flags_each_change_group() {
        let taf = decode_taf(
            "TAF KJFK 261730Z 2618/2724 26010KT P6SM FEW250 \
             TEMPO 2706/2710 2SM -RA BKN008 \
             PROB30 2712/2716 VRB05KT 4SM TSRA OVC030CB \
             BECMG 2718/2720 31015G25KT",
        );
        let outlook = forecast_outlook(Some(&taf), None, &RiskThresholds::default());
        let flagged: Vec<(ChangeKind, TrendConcern)> =
            outlook.trends.iter().map(|t| (t.change, t.concern)).collect();
        assert_eq!(
            flagged,
            vec![
                (ChangeKind::Temporary, TrendConcern::LowVisibility),
                (ChangeKind::Temporary, TrendConcern::LowCeiling),
                (ChangeKind::Probability, TrendConcern::SevereWeather),
            ]
        );
        assert_eq!(
            outlook.trends[0].message,
            "Forecast shows deteriorating visibility (temporary)"
        );
        assert!(outlook.temperature_extremes.is_empty());
    }

    #[test]
    fn test_outlook_lists_temperature_extremes() {
        let metar = decode_metar("OKBK 261200Z 32015KT 9999 NSC 47/05 Q0998");
        let taf = decode_taf("TAF OKBK 261100Z 2612/2718 32012KT CAVOK TX48/2612Z TN31/2703Z");
        let outlook = forecast_outlook(Some(&taf), Some(&metar), &RiskThresholds::default());
        assert!(outlook.trends.is_empty());
        assert_eq!(
            outlook.temperature_extremes,
            vec![
                "Very high temperature of 47°C observed",
                "Forecast maximum of 48°C at 2612Z"
            ]
        );
    }

    #[test]
    fn test_empty_outlook_without_reports() {
        assert!(forecast_outlook(None, None, &RiskThresholds::default()).is_empty());
    }
}
