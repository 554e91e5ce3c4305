//! External API integrations

pub mod aviation_weather;

pub use aviation_weather::{AviationWeatherClient, ReportSource};
