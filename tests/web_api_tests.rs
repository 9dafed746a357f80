//! Integration tests for the HousePaint web server.
//!
//! These tests require the `web` feature to be enabled:
//! ```bash
//! cargo test --features web web_api
//! ```

#![cfg(feature = "web")]

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use housepaint::config::Config;
use housepaint::contact::{LeadKind, OutboundMessage};
use housepaint::relay::{EmailRelay, RelayError};
use housepaint::web::{create_router, AppState};

/// Relay that records messages instead of sending them.
#[derive(Default)]
struct MockRelay {
    sent: Mutex<Vec<OutboundMessage>>,
    fail: bool,
}

impl EmailRelay for MockRelay {
    fn send(&self, message: &OutboundMessage) -> Result<(), RelayError> {
        if self.fail {
            return Err(RelayError::Rejected {
                status: 400,
                body: "The user ID is invalid".to_string(),
            });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Creates a router backed by a recording relay.
fn create_test_app() -> (axum::Router, Arc<MockRelay>) {
    let relay = Arc::new(MockRelay::default());
    let state = AppState::with_relay(Config::default(), relay.clone())
        .expect("Failed to create app state");
    (create_router(state), relay)
}

/// Creates a router whose relay always fails.
fn create_failing_app() -> axum::Router {
    let relay = Arc::new(MockRelay {
        fail: true,
        ..MockRelay::default()
    });
    let state =
        AppState::with_relay(Config::default(), relay).expect("Failed to create app state");
    create_router(state)
}

/// Helper to make a GET request and get the response body as text.
async fn get_text(app: &axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Helper to make a GET request and get the response body as JSON.
async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get_text(app, uri).await;
    (status, serde_json::from_str(&body).unwrap_or(Value::Null))
}

/// Helper to make a POST request with JSON body.
async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

/// Helper to make a POST request with a urlencoded form body.
async fn post_form(app: &axum::Router, uri: &str, body: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let (app, _relay) = create_test_app();

    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

// ============================================================================
// Page Tests
// ============================================================================

#[tokio::test]
async fn test_landing_page() {
    let (app, _relay) = create_test_app();

    let (status, html) = get_text(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Gomez Quality Painting"));
    assert!(html.contains("tel:+15053390021"));
    assert!(html.contains("action=\"/quote#quote\""));
}

#[tokio::test]
async fn test_landing_testimonial_wraps() {
    let (app, _relay) = create_test_app();

    let (_, first) = get_text(&app, "/?testimonial=0").await;
    let (_, wrapped) = get_text(&app, "/?testimonial=3").await;
    let (_, second) = get_text(&app, "/?testimonial=1").await;

    assert_eq!(first, wrapped);
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_gallery_default_state() {
    let (app, _relay) = create_test_app();

    let (status, html) = get_text(&app, "/gallery").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<svg"));
    assert!(!html.contains("<?xml"));
    assert!(html.contains("#e5ddd0"));
    assert!(html.contains("/api/visualizer/cottage/house.svg?preset=Garden%20Sage"));
}

#[tokio::test]
async fn test_gallery_query_state() {
    let (app, _relay) = create_test_app();

    let (status, html) = get_text(&app, "/gallery?variant=cottage&active=door&door=3d5a45").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("#3d5a45"));
    assert!(!html.contains("data-section=\"garage\""));
}

#[tokio::test]
async fn test_gallery_custom_action() {
    let (app, _relay) = create_test_app();

    let (status, html) = get_text(&app, "/gallery?active=roof&custom=%23123456").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("#123456"));
}

#[tokio::test]
async fn test_gallery_bad_query() {
    let (app, _relay) = create_test_app();

    let (status, _) = get_text(&app, "/gallery?wall=notacolor").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_text(&app, "/gallery?variant=igloo").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_page_is_404() {
    let (app, _relay) = create_test_app();

    let (status, html) = get_text(&app, "/services/roofing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Not Found"));
}

#[tokio::test]
async fn test_stylesheet_asset() {
    let (app, _relay) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/assets/styles.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=3600");
    let etag = response.headers()[header::ETAG].clone();

    let cached = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/assets/styles.css")
                .header(header::IF_NONE_MATCH, etag)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(cached.status(), StatusCode::NOT_MODIFIED);

    let (status, _) = get_text(&app, "/assets/missing.css").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Content Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_content() {
    let (app, _relay) = create_test_app();

    let (status, json) = get_json(&app, "/api/content").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["business"]["years_of_experience"], 28);
    assert_eq!(json["nav"].as_array().unwrap().len(), 3);
    assert_eq!(json["services"].as_array().unwrap().len(), 4);
    assert_eq!(json["testimonials"].as_array().unwrap().len(), 3);
}

// ============================================================================
// Visualizer Endpoint Tests
// ============================================================================

#[tokio::test]
async fn test_list_variants() {
    let (app, _relay) = create_test_app();

    let (status, json) = get_json(&app, "/api/visualizer").await;

    assert_eq!(status, StatusCode::OK);
    let variants = json["variants"].as_array().unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0]["id"], "southwest");
    assert_eq!(variants[0]["sections"].as_array().unwrap().len(), 7);
    assert_eq!(variants[1]["id"], "cottage");
    assert_eq!(variants[1]["sections"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_get_catalog() {
    let (app, _relay) = create_test_app();

    let (status, json) = get_json(&app, "/api/visualizer/southwest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["defaults"]["wall"], "#e5ddd0");
    assert_eq!(json["sections"][0]["options"][0]["name"], "Desert Sand");

    let (status, json) = get_json(&app, "/api/visualizer/igloo").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("igloo"));
}

#[tokio::test]
async fn test_house_svg() {
    let (app, _relay) = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/visualizer/southwest/house.svg?active=roof&roof=3d3d3d")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    let etag = response.headers()[header::ETAG].to_str().unwrap().to_string();

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let svg = String::from_utf8(body.to_vec()).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("viewBox=\"0 0 900 500\""));
    assert!(svg.contains("#3d3d3d"));
    assert!(svg.contains("#AF9D5E"));

    let cached = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/visualizer/southwest/house.svg?active=roof&roof=3d3d3d")
                .header(header::IF_NONE_MATCH, etag)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(cached.status(), StatusCode::NOT_MODIFIED);
}

#[tokio::test]
async fn test_house_svg_without_outline() {
    let (app, _relay) = create_test_app();

    let (status, svg) =
        get_text(&app, "/api/visualizer/cottage/house.svg?preset=Garden%20Sage&outline=none").await;

    assert_eq!(status, StatusCode::OK);
    assert!(svg.contains("viewBox=\"0 0 800 500\""));
    assert!(svg.contains("#3d5a45"));
    assert!(!svg.contains("#AF9D5E"));
}

#[tokio::test]
async fn test_house_svg_errors() {
    let (app, _relay) = create_test_app();

    let (status, _) = get_json(&app, "/api/visualizer/southwest/house.svg?door=12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/api/visualizer/cottage/house.svg?garage=ffffff").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/api/visualizer/cottage/house.svg?preset=Nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_action_from_default_state() {
    let (app, _relay) = create_test_app();

    let (status, json) = post_json(
        &app,
        "/api/visualizer/southwest/actions",
        json!({ "action": { "type": "select_section", "section": "door" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["state"]["active_section"], "door");
    assert_eq!(json["selected_swatch"], "Navy Blue");
    assert!(json["svg"].as_str().unwrap().contains("<svg"));
}

#[tokio::test]
async fn test_action_chain() {
    let (app, _relay) = create_test_app();

    let (_, first) = post_json(
        &app,
        "/api/visualizer/southwest/actions",
        json!({ "action": { "type": "apply_preset", "name": "Desert Modern" } }),
    )
    .await;
    assert_eq!(first["matching_preset"], "Desert Modern");

    let (status, second) = post_json(
        &app,
        "/api/visualizer/southwest/actions",
        json!({
            "state": first["state"],
            "action": { "type": "apply_color", "color": "#8b5a3c" }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["state"]["colors"]["wall"], "#8b5a3c");
    assert!(second["matching_preset"].is_null());

    let (_, reset) = post_json(
        &app,
        "/api/visualizer/southwest/actions",
        json!({ "state": second["state"], "action": { "type": "reset" } }),
    )
    .await;
    assert_eq!(reset["state"]["colors"]["wall"], "#e5ddd0");
}

#[tokio::test]
async fn test_action_errors() {
    let (app, _relay) = create_test_app();

    let (status, _) = post_json(
        &app,
        "/api/visualizer/cottage/actions",
        json!({ "action": { "type": "select_section", "section": "garage" } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/visualizer/cottage/actions",
        json!({ "action": { "type": "apply_preset", "name": "Desert Modern" } }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(
        &app,
        "/api/visualizer/cottage/actions",
        json!({
            "state": { "variant": "southwest", "active_section": "wall" },
            "action": { "type": "reset" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// Lead Form Tests
// ============================================================================

#[tokio::test]
async fn test_contact_sent() {
    let (app, relay) = create_test_app();

    let (status, json) = post_json(
        &app,
        "/api/contact",
        json!({
            "name": "  Maria  ",
            "email": "maria@example.com",
            "subject": "",
            "message": "Please quote my stucco repair."
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "sent");
    assert_eq!(json["message"], "Message sent successfully! We'll get back to you soon.");
    assert!(json["id"].is_string());

    let sent = relay.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, LeadKind::Contact);
    assert_eq!(sent[0].from_name, "Maria");
    assert_eq!(sent[0].subject, "Contact Form Submission");
}

#[tokio::test]
async fn test_contact_validation() {
    let (app, relay) = create_test_app();

    let (status, json) = post_json(
        &app,
        "/api/contact",
        json!({ "name": "", "email": "not-an-email", "message": "Hi" }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["fields"]["name"], "Name is required");
    assert_eq!(json["fields"]["email"], "Please enter a valid email address");
    assert!(json["fields"]["message"].is_null());
    assert!(relay.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_quote_sent() {
    let (app, relay) = create_test_app();

    let (status, json) = post_json(
        &app,
        "/api/quote",
        json!({ "name": "Ray", "email": "ray@example.com", "message": "Two-story exterior" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Quote request sent! We'll get back to you soon.");
    let sent = relay.sent.lock().unwrap();
    assert_eq!(sent[0].kind, LeadKind::Quote);
    assert_eq!(sent[0].subject, "Free Quote Request");
}

#[tokio::test]
async fn test_relay_failure_is_502() {
    let app = create_failing_app();

    let (status, json) = post_json(
        &app,
        "/api/quote",
        json!({ "name": "Ray", "email": "ray@example.com", "message": "Two-story exterior" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        json["error"],
        "Failed to send request. Please try again or call us directly."
    );
}

#[tokio::test]
async fn test_contact_page_form() {
    let (app, relay) = create_test_app();

    let (status, html) = post_form(
        &app,
        "/contact",
        "name=Maria&email=maria%40example.com&subject=Fence&message=Paint+my+fence",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Message sent successfully!"));
    assert_eq!(relay.sent.lock().unwrap()[0].subject, "Fence");
}

#[tokio::test]
async fn test_contact_page_form_keeps_values() {
    let (app, relay) = create_test_app();

    let (status, html) = post_form(&app, "/contact", "name=Maria&email=bad&message=Hello").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains("Please enter a valid email address"));
    assert!(html.contains("value=\"Maria\""));
    assert!(relay.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_quote_page_form_failure() {
    let app = create_failing_app();

    let (status, html) =
        post_form(&app, "/quote", "name=Ray&email=ray%40example.com&message=Garage+door").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("Failed to send request."));
    assert!(html.contains("Garage door"));
}
