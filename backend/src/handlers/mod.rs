//! HTTP handlers

pub mod briefing;
pub mod decode;
pub mod health;

pub use briefing::{get_airport_briefing, get_route_briefing};
pub use decode::{
    assess_risk, classify_notams, decode_metar_report, decode_pirep_report, decode_sigmet_report,
    decode_taf_report,
};
pub use health::health_check;
