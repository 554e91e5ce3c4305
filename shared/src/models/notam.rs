//! NOTAM keyword categories

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotamCategory {
    RunwayClosure,
    TaxiwayClosure,
    AerodromeClosure,
    NavaidOutage,
    EquipmentUnserviceable,
    Obstruction,
    Lighting,
    AirspaceRestriction,
    Construction,
    Wildlife,
    #[default]
    General,
}

impl NotamCategory {
    pub fn label(&self) -> &'static str {
        match self {
            NotamCategory::RunwayClosure => "Runway Closure",
            NotamCategory::TaxiwayClosure => "Taxiway Closure",
            NotamCategory::AerodromeClosure => "Aerodrome Closure",
            NotamCategory::NavaidOutage => "Navaid Outage",
            NotamCategory::EquipmentUnserviceable => "Equipment Unserviceable",
            NotamCategory::Obstruction => "Obstruction",
            NotamCategory::Lighting => "Lighting",
            NotamCategory::AirspaceRestriction => "Airspace Restriction",
            NotamCategory::Construction => "Construction",
            NotamCategory::Wildlife => "Wildlife",
            NotamCategory::General => "General",
        }
    }
}

impl std::fmt::Display for NotamCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotamSummary {
    pub raw: String,
    pub category: NotamCategory,
}
