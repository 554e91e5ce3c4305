//! WebAssembly module for Aerolytics
//!
//! Runs the report decoders and the risk engine in the browser. Every export
//! takes raw text and returns the decoded record as a JSON string.

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{DecodedSigmet, RiskEngine};

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize result: {}", e))
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Decode a METAR into JSON
#[wasm_bindgen]
pub fn decode_metar(raw: &str) -> Result<String, JsValue> {
    to_json(&shared::decode_metar(raw)).map_err(js_error)
}

/// Decode a TAF into JSON
#[wasm_bindgen]
pub fn decode_taf(raw: &str) -> Result<String, JsValue> {
    to_json(&shared::decode_taf(raw)).map_err(js_error)
}

/// Decode a SIGMET or AIRMET into JSON
#[wasm_bindgen]
pub fn decode_sigmet(raw: &str) -> Result<String, JsValue> {
    to_json(&shared::decode_sigmet(raw)).map_err(js_error)
}

/// Decode a PIREP into JSON
#[wasm_bindgen]
pub fn decode_pirep(raw: &str) -> Result<String, JsValue> {
    to_json(&shared::decode_pirep(raw)).map_err(js_error)
}

/// Score a METAR with the default thresholds.
///
/// `sigmets_json` is an optional JSON array of raw SIGMET texts.
#[wasm_bindgen]
pub fn assess_metar(metar: &str, sigmets_json: Option<String>) -> Result<String, JsValue> {
    assess(metar, sigmets_json.as_deref()).map_err(js_error)
}

fn assess(metar: &str, sigmets_json: Option<&str>) -> Result<String, String> {
    let sigmets: Vec<String> = match sigmets_json {
        Some(json) if !json.trim().is_empty() => serde_json::from_str(json)
            .map_err(|e| format!("Invalid SIGMET list JSON: {}", e))?,
        _ => Vec::new(),
    };
    let sigmets: Vec<DecodedSigmet> = sigmets
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| shared::decode_sigmet(s))
        .collect();

    let assessment = RiskEngine::default().assess(&shared::decode_metar(metar), &sigmets);
    to_json(&assessment)
}

/// Classify one NOTAM into `{ raw, category }` JSON
#[wasm_bindgen]
pub fn classify_notam(text: &str) -> Result<String, JsValue> {
    let summary = NotamSummary {
        raw: text.trim().to_string(),
        category: shared::classify_notam(text),
    };
    to_json(&summary).map_err(js_error)
}

/// Check a station id (case-insensitive)
#[wasm_bindgen]
pub fn is_valid_station(code: &str) -> bool {
    validate_station_id(code).is_ok()
}
