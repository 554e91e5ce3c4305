//! Aviation weather data client
//!
//! Reads raw report text from the aviationweather.gov data API and, when
//! configured, a NOTAM feed that returns one notice per line.

use async_trait::async_trait;
use reqwest::Client;
use shared::{FetchFailure, SourceResult};

use crate::config::{NotamConfig, UpstreamConfig};

/// One fetch per report kind for a single station.
///
/// Failures come back as [`FetchFailure`] values; a source never fails the
/// whole briefing.
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn fetch_metar(&self, station: &str) -> SourceResult<String>;

    async fn fetch_taf(&self, station: &str) -> SourceResult<String>;

    async fn fetch_pireps(&self, station: &str) -> SourceResult<Vec<String>>;

    async fn fetch_sigmets(&self, station: &str) -> SourceResult<Vec<String>>;

    async fn fetch_notams(&self, station: &str) -> SourceResult<Vec<String>>;
}

/// aviationweather.gov client
#[derive(Clone)]
pub struct AviationWeatherClient {
    client: Client,
    base_url: String,
    pirep_radius_nm: u32,
    notam: NotamConfig,
}

impl AviationWeatherClient {
    pub fn new(upstream: &UpstreamConfig, notam: NotamConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
            pirep_radius_nm: upstream.pirep_radius_nm,
            notam,
        }
    }

    /// GET `{base_url}/{endpoint}` with `format=raw` and return the body text
    async fn get_raw(&self, endpoint: &str, query: &[(&str, String)]) -> SourceResult<String> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("format", "raw")])
            .send()
            .await
            .map_err(|e| FetchFailure::fetch(format!("{} request failed: {}", endpoint, e)))?;

        if !response.status().is_success() {
            return Err(FetchFailure::fetch(format!(
                "{} returned HTTP {}",
                endpoint,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| FetchFailure::fetch(format!("Failed to read {} response: {}", endpoint, e)))
    }
}

#[async_trait]
impl ReportSource for AviationWeatherClient {
    async fn fetch_metar(&self, station: &str) -> SourceResult<String> {
        let body = self.get_raw("metar", &[("ids", station.to_string())]).await?;
        // Most recent observation first
        Ok(body
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    async fn fetch_taf(&self, station: &str) -> SourceResult<String> {
        let body = self.get_raw("taf", &[("ids", station.to_string())]).await?;
        Ok(first_block(&body))
    }

    async fn fetch_pireps(&self, station: &str) -> SourceResult<Vec<String>> {
        let body = self
            .get_raw(
                "pirep",
                &[
                    ("id", station.to_string()),
                    ("distance", self.pirep_radius_nm.to_string()),
                ],
            )
            .await?;
        Ok(non_empty_lines(&body))
    }

    /// The whole US advisory feed; scoping to the station happens at assembly
    async fn fetch_sigmets(&self, _station: &str) -> SourceResult<Vec<String>> {
        let body = self.get_raw("airsigmet", &[]).await?;
        Ok(blocks(&body))
    }

    async fn fetch_notams(&self, station: &str) -> SourceResult<Vec<String>> {
        let Some(endpoint) = self.notam.api_endpoint.as_deref() else {
            tracing::debug!("No NOTAM endpoint configured, skipping NOTAMs for {}", station);
            return Ok(Vec::new());
        };

        let mut request = self.client.get(endpoint).query(&[("icao", station)]);
        if let Some(key) = self.notam.api_key.as_deref() {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchFailure::fetch(format!("NOTAM request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FetchFailure::fetch(format!(
                "NOTAM feed returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::fetch(format!("Failed to read NOTAM response: {}", e)))?;
        Ok(non_empty_lines(&body))
    }
}

fn non_empty_lines(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split on blank lines, joining the lines of each block with a space
fn blocks(body: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join(" "));
    }
    blocks
}

/// A TAF spans several indented lines; the first block is the current one
fn first_block(body: &str) -> String {
    blocks(body).into_iter().next().unwrap_or_default()
}
