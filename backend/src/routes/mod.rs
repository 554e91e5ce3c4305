//! Route definitions for the Aerolytics briefing server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Briefings (fetch upstream)
        .route("/briefing/:station", get(handlers::get_airport_briefing))
        .route("/route/:departure/:arrival", get(handlers::get_route_briefing))
        // Pure decoding and scoring on submitted text
        .nest("/decode", decode_routes())
        .route("/risk", post(handlers::assess_risk))
        .route("/notams/classify", post(handlers::classify_notams))
}

/// Decoder routes
fn decode_routes() -> Router<AppState> {
    Router::new()
        .route("/metar", post(handlers::decode_metar_report))
        .route("/taf", post(handlers::decode_taf_report))
        .route("/sigmet", post(handlers::decode_sigmet_report))
        .route("/pirep", post(handlers::decode_pirep_report))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::Value;
    use shared::{RiskEngine, RiskThresholds};
    use tower::ServiceExt;

    use crate::config::{Config, NotamConfig, ServerConfig, SigmetConfig, UpstreamConfig};
    use crate::external::AviationWeatherClient;
    use crate::services::BriefingService;
    use crate::{create_app, AppState};

    fn state() -> AppState {
        let config = Config {
            environment: "test".into(),
            server: ServerConfig::default(),
            upstream: UpstreamConfig {
                base_url: "http://127.0.0.1:9".into(),
                timeout_secs: 1,
                pirep_radius_nm: 50,
            },
            notam: NotamConfig::default(),
            risk: RiskThresholds::default(),
            sigmet: SigmetConfig::default(),
        };
        let client = AviationWeatherClient::new(&config.upstream, config.notam.clone());
        let briefings = BriefingService::new(
            Arc::new(client),
            RiskEngine::new(config.risk.clone()),
            Duration::from_secs(config.upstream.timeout_secs),
        );
        AppState {
            config: Arc::new(config),
            briefings: Arc::new(briefings),
        }
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = create_app(state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_station_is_bad_request() {
        let request = Request::builder()
            .uri("/api/v1/briefing/JFK!")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "station");
    }

    #[tokio::test]
    async fn test_invalid_arrival_is_bad_request() {
        let request = Request::builder()
            .uri("/api/v1/route/KJFK/BOSTON")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "arrival");
    }

    #[tokio::test]
    async fn test_decode_metar_endpoint() {
        let request = post_json(
            "/api/v1/decode/metar",
            serde_json::json!({ "raw": "KJFK 261951Z 27020KT 4SM BR FEW050 24/18 A2995" }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["station"], "KJFK");
        assert_eq!(body["parse_errors"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_blank_report_is_rejected() {
        let request = post_json("/api/v1/decode/taf", serde_json::json!({ "raw": "   " }));
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "raw");
    }

    #[tokio::test]
    async fn test_risk_endpoint() {
        let request = post_json(
            "/api/v1/risk",
            serde_json::json!({ "metar": "KJFK 261951Z 27030KT 10SM TS FEW050CB 24/18 A2995" }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assessment"]["category"], "severe");
        assert_eq!(body["assessment"]["total_score"], 4);
    }

    #[tokio::test]
    async fn test_risk_endpoint_accepts_lowercase_metar() {
        let request = post_json(
            "/api/v1/risk",
            serde_json::json!({ "metar": "kjfk 261951z 27030kt 10sm ts few050 24/18 a2995" }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["metar"]["station"], "KJFK");
        assert_eq!(body["assessment"]["total_score"], 4);
        assert_eq!(body["assessment"]["category"], "severe");
    }

    #[tokio::test]
    async fn test_classify_notams_endpoint() {
        let request = post_json(
            "/api/v1/notams/classify",
            serde_json::json!({ "notams": ["RWY 04L/22R CLSD", ""] }),
        );
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["category"], "runway_closure");
    }
}
