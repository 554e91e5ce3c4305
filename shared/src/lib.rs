//! Shared types, decoders and scoring for the Aerolytics platform
//!
//! This crate contains everything that runs identically on the server and in
//! the browser (via WASM): report models, the grammar matcher, the per-kind
//! decoders, the risk engine, briefing summaries and assembly. It performs no I/O.

pub mod briefing;
pub mod decode;
pub mod error;
pub mod models;
pub mod risk;
pub mod summary;
pub mod types;
pub mod validation;

pub use briefing::*;
pub use decode::*;
pub use error::*;
pub use models::*;
pub use risk::*;
pub use summary::*;
pub use types::*;
pub use validation::*;
