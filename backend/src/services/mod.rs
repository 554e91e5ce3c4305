//! Business logic services for the Aerolytics briefing server

pub mod briefing;

pub use briefing::BriefingService;
