//! NOTAM keyword summarizer

use std::collections::HashSet;

use crate::models::{NotamCategory, NotamSummary};

const CLOSED: &[&str] = &["CLSD", "CLOSED"];
const OUT_OF_SERVICE: &[&str] = &["U/S", "UNSERVICEABLE", "OTS"];

/// Ordered category table. Every clause needs one of its words present;
/// the first entry whose clauses are all satisfied wins.
static CATEGORY_RULES: &[(NotamCategory, &[&[&str]])] = &[
    (NotamCategory::RunwayClosure, &[&["RWY", "RUNWAY"], CLOSED]),
    (NotamCategory::TaxiwayClosure, &[&["TWY", "TAXIWAY"], CLOSED]),
    (NotamCategory::AerodromeClosure, &[&["AD", "AERODROME", "AIRPORT"], CLOSED]),
    (
        NotamCategory::NavaidOutage,
        &[
            &["VOR", "DME", "NDB", "ILS", "LOC", "GS", "GP", "TACAN", "VORTAC", "NAVAID"],
            OUT_OF_SERVICE,
        ],
    ),
    (NotamCategory::EquipmentUnserviceable, &[OUT_OF_SERVICE]),
    (NotamCategory::Obstruction, &[&["OBST", "OBSTACLE", "OBSTN", "CRANE"]]),
    (
        NotamCategory::Lighting,
        &[&["LGT", "LGTD", "LIGHTING", "LIGHTS", "ALS", "PAPI", "VASI", "REIL", "HIRL", "MIRL"]],
    ),
    (
        NotamCategory::AirspaceRestriction,
        &[&["TFR", "AIRSPACE", "RESTRICTED", "PROHIBITED", "DANGER"]],
    ),
    (NotamCategory::Construction, &[&["WIP", "CONST", "CONSTRUCTION", "WORK"]]),
    (NotamCategory::Wildlife, &[&["BIRD", "BIRDS", "WILDLIFE", "DEER", "ANIMALS"]]),
];

/// Whole words of a notice, keeping `/` so `U/S` survives
fn notice_words(text: &str) -> HashSet<String> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '/'))
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_uppercase)
        .collect()
}

pub fn classify_notam(text: &str) -> NotamCategory {
    let words = notice_words(text);
    CATEGORY_RULES
        .iter()
        .find(|(_, clauses)| {
            clauses
                .iter()
                .all(|alternatives| alternatives.iter().any(|w| words.contains(*w)))
        })
        .map_or(NotamCategory::General, |(category, _)| *category)
}

/// Tag each notice with its category, keeping input order. Blank notices are dropped.
pub fn summarize_notams<S: AsRef<str>>(notams: &[S]) -> Vec<NotamSummary> {
    notams
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .map(|raw| NotamSummary {
            raw: raw.to_string(),
            category: classify_notam(raw),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closures() {
        assert_eq!(
            classify_notam("!JFK 06/123 JFK RWY 04L/22R CLSD 2406261200-2406262000"),
            NotamCategory::RunwayClosure
        );
        assert_eq!(classify_notam("TWY B CLSD"), NotamCategory::TaxiwayClosure);
        assert_eq!(classify_notam("AD CLSD TO NON-SKED"), NotamCategory::AerodromeClosure);
    }

    #[test]
    fn test_outages() {
        assert_eq!(classify_notam("ILS RWY 22L U/S"), NotamCategory::NavaidOutage);
        assert_eq!(classify_notam("ATIS U/S"), NotamCategory::EquipmentUnserviceable);
    }

    #[test]
    fn test_first_match_wins() {
        // Runway closure outranks the lighting mention
        assert_eq!(
            classify_notam("RWY 13/31 CLSD DUE TO LGT WIP"),
            NotamCategory::RunwayClosure
        );
        assert_eq!(classify_notam("OBST CRANE 450FT AGL LGTD"), NotamCategory::Obstruction);
    }

    #[test]
    fn test_whole_words_only() {
        // "CLOSED" inside another word, "AD" inside "ROAD"
        assert_eq!(classify_notam("ROAD WORKS NEAR FIELD"), NotamCategory::General);
        assert_eq!(classify_notam("BIRD ACTIVITY VCY AD"), NotamCategory::Wildlife);
        assert_eq!(classify_notam("FREQ CHANGE"), NotamCategory::General);
    }

    #[test]
    fn test_summarize_keeps_order() {
        let summaries = summarize_notams(&["TWY A CLSD", "  ", "PAPI RWY 27 U/S", "FREQ 118.7"]);
        let categories: Vec<_> = summaries.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                NotamCategory::TaxiwayClosure,
                NotamCategory::EquipmentUnserviceable,
                NotamCategory::General
            ]
        );
    }
}
