//! End-to-end tests driving the router in memory

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use callboard_api::build_router;
use callboard_core::{Config, Dataset};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

fn app() -> Router {
    build_router(Config::default(), Dataset::sample().unwrap())
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(rows: &Value) -> Vec<String> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_ok_and_record_counts() {
    let (status, body) = get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["records"]["calls"], 6);
    assert_eq!(body["records"]["templates"], 5);
}

#[tokio::test]
async fn calls_list_everything_by_default() {
    let (status, body) = get("/api/calls").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 6);
    assert_eq!(body["count"], 6);
    assert_eq!(body["columns"][0], "Call ID");
    assert_eq!(body["pagination"]["has_next"], false);

    let first = &body["calls"][0];
    assert_eq!(first["time"], "02:32 PM");
    assert_eq!(first["duration"], "4:32");
    assert_eq!(first["call_status"]["tone"], "success");
}

#[tokio::test]
async fn calls_filtered_by_missed_status() {
    let (status, body) = get("/api/calls?status=missed").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["calls"]), vec!["CL-004"]);
    assert_eq!(body["calls"][0]["channel"], "-");
    assert_eq!(body["filters"]["facets"][0]["value"], "missed");
}

#[tokio::test]
async fn calls_ignore_sentinel_filter_values() {
    let (status, body) = get("/api/calls?status=all&message_status=all-messages&channel=all-channels").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 6);
    assert_eq!(body["filters"]["facets"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn calls_search_by_phone_digits() {
    let (_, body) = get("/api/calls?q=5556789012").await;
    assert_eq!(ids(&body["calls"]), vec!["CL-005"]);
}

#[tokio::test]
async fn calls_paginate_after_filtering() {
    let (_, body) = get("/api/calls?status=completed&limit=2&offset=2").await;

    assert_eq!(body["total"], 5);
    assert_eq!(ids(&body["calls"]), vec!["CL-003", "CL-005"]);
    assert_eq!(body["pagination"]["has_next"], true);
    assert_eq!(body["pagination"]["next_offset"], 4);
    assert_eq!(body["pagination"]["prev_offset"], 0);
}

#[tokio::test]
async fn calls_reject_out_of_range_limit() {
    let (status, body) = get("/api/calls?limit=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PARAMETERS");

    let (status, _) = get("/api/calls?limit=501").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_paging_values_get_json_errors() {
    for uri in [
        "/api/calls?limit=-1",
        "/api/calls?limit=abc",
        "/api/calls?offset=-5",
        "/api/messages?limit=abc",
        "/api/messages?offset=1.5",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "INVALID_PARAMETERS", "{uri}");
        assert_eq!(body["error"], "Invalid query parameters", "{uri}");
        assert!(body["details"]["reason"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn calls_reject_overlong_query() {
    let q = "a".repeat(101);
    let (status, body) = get(&format!("/api/calls?q={q}")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["q"].is_array());
}

#[tokio::test]
async fn call_lookup_by_id() {
    let (status, body) = get("/api/calls/CL-003").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["call"]["id"], "CL-003");
    assert_eq!(body["call"]["message_status"]["icon"], "x-circle");

    let (status, body) = get("/api/calls/CL-999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn messages_include_summary_and_placeholders() {
    let (status, body) = get("/api/messages").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["delivered"], 4);
    assert_eq!(body["summary"]["failed"], 1);
    assert_eq!(body["summary"]["pending"], 1);
    assert_eq!(body["summary"]["total"], 6);

    let pending = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == "MSG-006")
        .unwrap();
    assert_eq!(pending["delivered_at"], "-");
    assert_eq!(pending["status"]["icon"], "clock");
}

#[tokio::test]
async fn messages_filter_by_channel_and_status() {
    let (_, body) = get("/api/messages?channel=SMS&status=failed").await;

    assert_eq!(ids(&body["messages"]), vec!["MSG-003"]);
    // The summary always covers the whole log
    assert_eq!(body["summary"]["total"], 6);
}

#[tokio::test]
async fn billing_reports_usage_and_invoices() {
    let (status, body) = get("/api/billing").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usage"]["display_percent"], 62);
    assert_eq!(body["usage"]["label"], "1,247 of 2,000 messages used");
    assert!(body["usage"].get("warning").is_none());
    assert_eq!(body["plan"]["price"], "$149/month");
    assert_eq!(body["invoices"]["rows"].as_array().unwrap().len(), 4);

    let (_, body) = get("/api/billing?q=inv-2023").await;
    assert_eq!(
        ids(&body["invoices"]["rows"]),
        vec!["INV-2023-012", "INV-2023-011", "INV-2023-010"]
    );
}

#[tokio::test]
async fn billing_warning_follows_configured_threshold() {
    let mut config = Config::default();
    config.billing.warning_threshold_percent = 50.0;
    let app = build_router(config, Dataset::sample().unwrap());

    let response = app
        .oneshot(Request::builder().uri("/api/billing").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert!(body["usage"]["warning"].is_string());
}

#[tokio::test]
async fn templates_filter_by_status() {
    let (status, body) = get("/api/templates?status=draft").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["templates"][0]["name"], "Service Complete");
    assert_eq!(body["templates"][0]["usage"], "Used 0 times");
}

#[tokio::test]
async fn dashboard_presents_cards_chart_and_activity() {
    let (status, body) = get("/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stat_cards"][0]["change_label"], "+12% from yesterday");
    assert_eq!(body["stat_cards"][3]["trend"], "down");
    assert_eq!(body["hourly_activity"].as_array().unwrap().len(), 8);
    assert_eq!(
        body["recent_activity"]["rows"][1]["detail"],
        "Call duration: 4:32"
    );
    assert_eq!(body["recent_activity"]["rows"][2]["status"]["icon"], "alert-circle");
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let (status, body) = get("/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
}

#[tokio::test]
async fn request_id_is_echoed() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req_test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req_test");
}
