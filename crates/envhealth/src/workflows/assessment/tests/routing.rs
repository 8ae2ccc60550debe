use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::assessment::domain::Location;
use crate::workflows::assessment::report_router;

#[tokio::test]
async fn report_handler_returns_report() {
    let service = Arc::new(assembler(StubSources::scenario()));

    let response = crate::workflows::assessment::router::report_handler::<StubSources>(
        State(service),
        axum::Json(location()),
    )
    .await;

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overallScore"]["grade"], "B+");
    assert_eq!(body["overallScore"]["score"], 83);
}

#[tokio::test]
async fn report_handler_rejects_missing_zip() {
    let stub = StubSources::scenario();
    let service = Arc::new(assembler(stub.clone()));

    let response = crate::workflows::assessment::router::report_handler::<StubSources>(
        State(service),
        axum::Json(Location::default()),
    )
    .await;

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "ZIP code is required." }));
    assert_eq!(stub.call_count(), 0);
}

#[tokio::test]
async fn report_handler_hides_total_outage_details() {
    let service = Arc::new(assembler(StubSources::failing()));

    let response = crate::workflows::assessment::router::report_handler::<StubSources>(
        State(service),
        axum::Json(location()),
    )
    .await;

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to generate report" }));
}

#[tokio::test]
async fn router_accepts_partial_location_json() {
    let router = report_router(Arc::new(assembler(StubSources::scenario())));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/health-report")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({ "zip": "23219" })).expect("serialize"),
                ))
                .expect("request"),
        )
        .await
        .expect("router response");

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["zip"], "23219");
    assert_eq!(body["location"]["county"], "");
}

#[tokio::test]
async fn router_rejects_malformed_json() {
    let router = report_router(Arc::new(assembler(StubSources::scenario())));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/health-report")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from("{\"zip\":"))
                .expect("request"),
        )
        .await
        .expect("router response");

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn router_treats_null_location_fields_as_absent() {
    let router = report_router(Arc::new(assembler(StubSources::scenario())));

    let response = router
        .oneshot(
            axum::http::Request::post("/api/v1/health-report")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    r#"{"zip":"23220","lat":null,"lng":null,"county":null,"stateCode":"VA"}"#,
                ))
                .expect("request"),
        )
        .await
        .expect("router response");

    let (status, body) = response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"]["zip"], "23220");
    assert_eq!(body["location"]["county"], "");
    assert_eq!(body["location"]["lat"], 0.0);
}

#[test]
fn null_zip_reads_as_missing() {
    let location: Location =
        serde_json::from_value(json!({ "zip": null, "city": "Richmond" })).expect("location");
    assert!(!location.has_zip());
    assert_eq!(location.city, "Richmond");
}
