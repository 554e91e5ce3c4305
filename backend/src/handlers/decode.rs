//! HTTP handlers for decoding raw reports, scoring and NOTAM classification
//!
//! These run the pure decoders directly on submitted text, no upstream fetch.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::{
    decode_metar, decode_pirep, decode_sigmet, decode_taf, summarize_notams, validate_report_text,
    DecodedMetar, DecodedPirep, DecodedSigmet, DecodedTaf, NotamSummary, RiskAssessment,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Raw report text submitted for decoding
#[derive(Debug, Deserialize, Validate)]
pub struct DecodeRequest {
    #[validate(length(min = 1, max = 8192, message = "Report text must be 1 to 8192 characters"))]
    pub raw: String,
}

impl DecodeRequest {
    fn checked(self) -> AppResult<String> {
        self.validate()?;
        validate_report_text(&self.raw).map_err(|message| AppError::validation("raw", message))?;
        Ok(self.raw)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RiskRequest {
    #[validate(length(min = 1, max = 8192, message = "METAR text must be 1 to 8192 characters"))]
    pub metar: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "At most 200 SIGMETs per request"))]
    pub sigmets: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RiskResponse {
    pub metar: DecodedMetar,
    pub assessment: RiskAssessment,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NotamRequest {
    #[validate(length(max = 500, message = "At most 500 NOTAMs per request"))]
    pub notams: Vec<String>,
}

/// Decode a METAR
pub async fn decode_metar_report(
    Json(input): Json<DecodeRequest>,
) -> AppResult<Json<DecodedMetar>> {
    let raw = input.checked()?;
    Ok(Json(decode_metar(&raw)))
}

/// Decode a TAF
pub async fn decode_taf_report(
    Json(input): Json<DecodeRequest>,
) -> AppResult<Json<DecodedTaf>> {
    let raw = input.checked()?;
    Ok(Json(decode_taf(&raw)))
}

/// Decode a SIGMET or AIRMET
pub async fn decode_sigmet_report(
    Json(input): Json<DecodeRequest>,
) -> AppResult<Json<DecodedSigmet>> {
    let raw = input.checked()?;
    Ok(Json(decode_sigmet(&raw)))
}

/// Decode a PIREP
pub async fn decode_pirep_report(
    Json(input): Json<DecodeRequest>,
) -> AppResult<Json<DecodedPirep>> {
    let raw = input.checked()?;
    Ok(Json(decode_pirep(&raw)))
}

/// Score a METAR, with any SIGMETs in scope
pub async fn assess_risk(
    State(state): State<AppState>,
    Json(input): Json<RiskRequest>,
) -> AppResult<Json<RiskResponse>> {
    input.validate()?;
    validate_report_text(&input.metar).map_err(|message| AppError::validation("metar", message))?;

    let metar = decode_metar(&input.metar);
    let sigmets: Vec<DecodedSigmet> = input
        .sigmets
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| decode_sigmet(s))
        .collect();
    let assessment = state.briefings.engine().assess(&metar, &sigmets);

    Ok(Json(RiskResponse { metar, assessment }))
}

/// Classify NOTAM texts into categories
pub async fn classify_notams(
    Json(input): Json<NotamRequest>,
) -> AppResult<Json<Vec<NotamSummary>>> {
    input.validate()?;
    Ok(Json(summarize_notams(input.notams.as_slice())))
}
