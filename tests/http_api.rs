use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::watch;
use tower::ServiceExt;

use where_ip::{
    http_api::{router, CLEARED_MESSAGE, NO_DATA_MESSAGE},
    stats::StatsManager,
    upstream::Fetch,
    EnrichmentPipeline, ServiceConfig, UpstreamError, UpstreamService,
};

#[derive(Default)]
struct FakeUpstream {
    bodies: HashMap<String, String>,
    down: Vec<String>,
}

impl FakeUpstream {
    fn body(mut self, url: &str, body: Value) -> Self {
        self.bodies.insert(url.to_string(), body.to_string());
        self
    }

    fn down(mut self, url: &str) -> Self {
        self.down.push(url.to_string());
        self
    }
}

impl Fetch for FakeUpstream {
    async fn get(&self, service: UpstreamService, url: &str) -> Result<String, UpstreamError> {
        if self.down.iter().any(|down| down == url) {
            return Err(UpstreamError::status(service, url, 503));
        }
        Ok(self
            .bodies
            .get(url)
            .cloned()
            .unwrap_or_else(|| json!({ "status": 404, "message": "Not Found" }).to_string()))
    }
}

fn upstream() -> FakeUpstream {
    FakeUpstream::default()
        .body(
            "https://api.ip2country.info/ip?181.1.1.1",
            json!({ "countryCode": "AR", "countryName": "Argentina" }),
        )
        .body(
            "https://api.ip2country.info/ip?195.53.69.132",
            json!({ "countryCode": "ES", "countryName": "Spain" }),
        )
        .body(
            "https://api.ip2country.info/ip?2606:4700:4700::1111",
            json!({ "countryCode": "", "countryName": "" }),
        )
        .down("https://api.ip2country.info/ip?8.8.8.8")
        .body(
            "https://restcountries.com/v2/alpha/AR",
            json!({
                "latlng": [-34.0, -64.0],
                "timezones": ["UTC-03:00"],
                "languages": [{ "name": "Spanish" }, { "name": "Guaraní" }],
                "currencies": [{ "code": "ARS" }],
                "translations": { "es": "Argentina" }
            }),
        )
        .body(
            "https://restcountries.com/v2/alpha/ES",
            json!({
                "latlng": [40.0, -4.0],
                "timezones": ["UTC", "UTC+01:00"],
                "languages": [{ "name": "Spanish" }],
                "currencies": [{ "code": "EUR" }],
                "translations": { "es": "España" }
            }),
        )
        .body(
            "http://data.fixer.io/api/latest?access_key=&symbols=USD,ARS",
            json!({ "success": true, "rates": { "USD": 1.0832, "ARS": 895.12 } }),
        )
        .body(
            "http://data.fixer.io/api/latest?access_key=&symbols=USD,EUR",
            json!({ "success": true, "rates": { "USD": 1.0832, "EUR": 1.0 } }),
        )
}

fn app() -> (Router, watch::Sender<bool>) {
    let config = ServiceConfig::default();
    let (mut manager, stats) = StatsManager::new(&config.stats);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move { manager.run(shutdown_rx).await });

    let pipeline = EnrichmentPipeline::new(&config, Arc::new(upstream()), stats).unwrap();
    (router(Arc::new(pipeline)), shutdown_tx)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_empty_stats_report_no_data() {
    let (app, _shutdown) = app();
    let no_data = json!({ "message": NO_DATA_MESSAGE });

    assert_eq!(get_json(&app, "/stats").await, (StatusCode::OK, no_data.clone()));
    assert_eq!(get_json(&app, "/fullstats").await, (StatusCode::OK, no_data.clone()));
    assert_eq!(get_json(&app, "/stats/").await, (StatusCode::OK, no_data));
}

#[tokio::test]
async fn test_where_ip() {
    let (app, _shutdown) = app();

    let (status, body) = get_json(&app, "/whereip/181.1.1.1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["from"], "181.1.1.1");
    assert_eq!(body["countryCode"], "AR");
    assert_eq!(body["countryName"], "Argentina");
    assert_eq!(body["languages"], json!(["Spanish", "Guaraní"]));
    assert_eq!(body["timezones"].as_array().unwrap().len(), 1);
    assert!(body["timezones"][0].as_str().unwrap().ends_with("-0300"));
    assert_eq!(body["distance"], 521);
    assert_eq!(body["currency"], "ARS");
    assert_eq!(body["exRate"], 1.0832);
    assert_eq!(body["when"].as_str().unwrap().len(), "2024-01-15T09:30:00+0200".len());
}

#[tokio::test]
async fn test_unknown_country_ipv6() {
    let (app, _shutdown) = app();

    let (status, body) = get_json(&app, "/whereip/2606:4700:4700::1111").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["countryCode"], "XX");
    assert_eq!(body["languages"], json!([]));
    assert_eq!(body["timezones"], json!([]));
    assert_eq!(body["distance"], 0);
    assert_eq!(body["currency"], "");
    assert_eq!(body["exRate"], 0.0);
}

#[tokio::test]
async fn test_stats_track_queries() {
    let (app, _shutdown) = app();

    for uri in [
        "/whereip/181.1.1.1",
        "/whereip/195.53.69.132",
        "/whereip/181.1.1.1/",
    ] {
        assert_eq!(get_json(&app, uri).await.0, StatusCode::OK);
    }

    let (status, summary) = get_json(&app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        summary,
        json!({
            "furthestDistance": 10005,
            "closestDistance": 521,
            // (2 * 521 + 10005) / 3
            "averageDistance": 3682
        })
    );

    let (status, full) = get_json(&app, "/fullstats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        full,
        json!([
            { "countryCode": "AR", "countryName": "Argentina", "distance": 521, "queries": 2 },
            { "countryCode": "ES", "countryName": "España", "distance": 10005, "queries": 1 }
        ])
    );

    let (_, health) = get_json(&app, "/health").await;
    assert_eq!(health, json!({ "status": "ok", "countries": 2 }));
}

#[tokio::test]
async fn test_clear_stats() {
    let (app, _shutdown) = app();

    get_json(&app, "/whereip/195.53.69.132").await;

    assert_eq!(
        get_json(&app, "/clearstats").await,
        (StatusCode::OK, json!({ "message": CLEARED_MESSAGE }))
    );
    assert_eq!(
        get_json(&app, "/clearstats/").await,
        (StatusCode::OK, json!({ "message": CLEARED_MESSAGE }))
    );
    assert_eq!(
        get_json(&app, "/stats").await,
        (StatusCode::OK, json!({ "message": NO_DATA_MESSAGE }))
    );
    assert_eq!(
        get_json(&app, "/fullstats").await,
        (StatusCode::OK, json!({ "message": NO_DATA_MESSAGE }))
    );
}

#[tokio::test]
async fn test_upstream_outage_is_bad_gateway() {
    let (app, _shutdown) = app();

    let (status, body) = get_json(&app, "/whereip/8.8.8.8").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["message"].as_str().unwrap().contains("geolocation"));

    // nothing was counted and the service keeps answering
    assert_eq!(
        get_json(&app, "/fullstats").await,
        (StatusCode::OK, json!({ "message": NO_DATA_MESSAGE }))
    );
    assert_eq!(get_json(&app, "/whereip/181.1.1.1").await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_rejects_non_ip() {
    let (app, _shutdown) = app();

    let (status, body) = get_json(&app, "/whereip/not-an-ip").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("not-an-ip"));
}
