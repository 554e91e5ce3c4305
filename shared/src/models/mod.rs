//! Domain models for decoded aviation reports

mod briefing;
mod conditions;
mod metar;
mod notam;
mod pirep;
mod risk;
mod sigmet;
mod summary;
mod taf;

pub use briefing::*;
pub use conditions::*;
pub use metar::*;
pub use notam::*;
pub use pirep::*;
pub use risk::*;
pub use sigmet::*;
pub use summary::*;
pub use taf::*;
