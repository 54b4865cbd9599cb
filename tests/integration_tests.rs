// Integration tests for Inclusiv Audit

use actix_web::{http::StatusCode, test, web, App};
use inclusiv_audit::core::{Auditor, ContrastLevel, ScoringPolicy};
use inclusiv_audit::routes::{self, AppState};
use inclusiv_audit::services::{CacheManager, PageFetcher};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const TEST_JSON_LIMIT: usize = 64 * 1024;

fn test_state() -> AppState {
    AppState {
        auditor: Auditor::new(ScoringPolicy::default(), ContrastLevel::AaNormal),
        fetcher: Arc::new(
            PageFetcher::new(Duration::from_secs(5), 64 * 1024, "inclusiv-audit-test")
                .expect("Failed to build fetcher"),
        ),
        cache: Arc::new(CacheManager::in_memory(100, 60)),
    }
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .app_data(routes::json_config(TEST_JSON_LIMIT))
                .configure(routes::configure_routes),
        )
        .await
    };
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr $(,)?) => {{
        let req = test::TestRequest::post().uri($uri).set_json($body).to_request();
        let resp = test::call_service($app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_health() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["cache"], "memory");
}

#[actix_web::test]
async fn test_contrast_endpoint() {
    let app = app!();
    let (status, body) = post_json!(
        &app,
        "/api/v1/contrast",
        json!({ "foreground": "#767676", "background": "ffffff" }),
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["foreground"], "#767676");
    assert_eq!(body["background"], "#FFFFFF");
    assert_eq!(body["displayRatio"], 4.54);
    assert_eq!(body["compliance"]["aaNormal"], true);
    assert_eq!(body["compliance"]["aaaNormal"], false);
}

#[actix_web::test]
async fn test_contrast_invalid_color() {
    let app = app!();
    let (status, body) = post_json!(
        &app,
        "/api/v1/contrast",
        json!({ "foreground": "#GGG000", "background": "#FFFFFF" }),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_color_format");
    assert_eq!(body["statusCode"], 400);
}

#[actix_web::test]
async fn test_suggest_endpoint() {
    let app = app!();
    let (status, body) = post_json!(
        &app,
        "/api/v1/contrast/suggest",
        json!({ "fg": "#AAAAAA", "bg": "#FFFFFF", "level": "aaa-normal" }),
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["achievable"], true);
    assert_eq!(body["unchanged"], false);
    assert_eq!(body["level"], "aaa-normal");
    assert!(body["ratio"].as_f64().unwrap() >= 7.0);
}

#[actix_web::test]
async fn test_suggest_rejects_unknown_level() {
    let app = app!();
    let (status, body) = post_json!(
        &app,
        "/api/v1/contrast/suggest",
        json!({ "foreground": "#AAAAAA", "background": "#FFFFFF", "level": "gold" }),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_level");
}

#[actix_web::test]
async fn test_palette_endpoint() {
    let app = app!();
    let (status, body) = post_json!(
        &app,
        "/api/v1/contrast/palette",
        json!({ "colors": ["#000000", "#FFFFFF", "#777777"] }),
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalPairs"], 3);
    // black/white and black/#777777 pass; white/#777777 is 4.48
    assert_eq!(body["aaNormalPairs"], 2);
}

#[actix_web::test]
async fn test_palette_needs_two_colors() {
    let app = app!();
    let (status, body) = post_json!(&app, "/api/v1/contrast/palette", json!({ "colors": ["#000000"] }));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[actix_web::test]
async fn test_palette_rejects_more_than_sixteen_colors() {
    let app = app!();
    let colors: Vec<String> = (0..17u32).map(|i| format!("#{:06X}", i * 0x0F0F0F)).collect();
    let (status, body) = post_json!(&app, "/api/v1/contrast/palette", json!({ "colors": colors }));

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
}

#[actix_web::test]
async fn test_oversized_body_is_rejected() {
    let app = app!();
    let html = "<p>filler</p>".repeat(TEST_JSON_LIMIT / 8);
    let (status, body) = post_json!(&app, "/api/v1/headings", json!({ "html": html }));

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"], "invalid_json");
    assert_eq!(body["statusCode"], 413);
}

#[actix_web::test]
async fn test_malformed_json_is_rejected() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/contrast")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"foreground\": \"#000000\",")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
    assert_eq!(body["statusCode"], 400);
}

#[actix_web::test]
async fn test_headings_with_unclosed_tags_return_quickly() {
    let app = app!();
    let started = std::time::Instant::now();
    let html = format!("{}<h1>Found</h1>", "<h2>".repeat(8 * 1024));
    let (status, body) = post_json!(&app, "/api/v1/headings", json!({ "html": html }));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["headings"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["score"], 100);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[actix_web::test]
async fn test_headings_endpoint() {
    let app = app!();
    let (status, body) = post_json!(
        &app,
        "/api/v1/headings",
        json!({ "html": "<h1>Title</h1><h3>Skipped</h3>" }),
    );

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 80);
    assert_eq!(body["status"], "has_issues");
    assert_eq!(body["issues"][0]["code"], "skipped_level");
    assert_eq!(body["issues"][0]["detail"]["kind"], "skipped_level");
    assert_eq!(body["headings"][1]["level"], 3);
    assert_eq!(body["outline"], "H1 Title\n    H3 Skipped");
    assert_eq!(body["cached"], false);
    assert!(body["url"].is_null());
}

#[actix_web::test]
async fn test_headings_empty_document() {
    let app = app!();
    let (status, body) = post_json!(&app, "/api/v1/headings", json!({ "html": "" }));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 0);
    assert_eq!(body["status"], "no_headings_found");
    assert_eq!(body["issues"][0]["code"], "no_headings_found");
}

#[actix_web::test]
async fn test_page_headings_are_cached() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/landing")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<h2>Welcome</h2><h1>Shop</h1>")
        .expect(1)
        .create_async()
        .await;

    let app = app!();
    let url = format!("{}/landing", server.url());

    let (status, first) = post_json!(&app, "/api/v1/headings/page", json!({ "url": url }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["cached"], false);
    assert_eq!(first["score"], 80);

    let (status, second) = post_json!(&app, "/api/v1/headings/page", json!({ "url": url }));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["cached"], true);
    assert_eq!(second["score"], 80);
    assert_eq!(second["checkedAt"], first["checkedAt"]);

    mock.assert_async().await;
}

#[actix_web::test]
async fn test_page_force_refresh_bypasses_cache() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<h1>Home</h1>")
        .expect(2)
        .create_async()
        .await;

    let app = app!();
    let url = format!("{}/", server.url());

    post_json!(&app, "/api/v1/headings/page", json!({ "url": url }));
    let (_, body) = post_json!(
        &app,
        "/api/v1/headings/page",
        json!({ "url": url, "forceRefresh": true }),
    );

    assert_eq!(body["cached"], false);
    mock.assert_async().await;
}

#[actix_web::test]
async fn test_failed_force_refresh_drops_cached_report() {
    let mut server = mockito::Server::new_async().await;
    let healthy = server
        .mock("GET", "/promo")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<h1>Promo</h1>")
        .create_async()
        .await;

    let app = app!();
    let url = format!("{}/promo", server.url());

    let (status, _) = post_json!(&app, "/api/v1/headings/page", json!({ "url": url }));
    assert_eq!(status, StatusCode::OK);

    healthy.remove_async().await;
    server.mock("GET", "/promo").with_status(500).create_async().await;

    let (status, _) = post_json!(
        &app,
        "/api/v1/headings/page",
        json!({ "url": url, "forceRefresh": true }),
    );
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (status, body) = post_json!(&app, "/api/v1/headings/page", json!({ "url": url }));
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "fetch_failed");
}

#[actix_web::test]
async fn test_page_upstream_failure() {
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/missing").with_status(404).create_async().await;

    let app = app!();
    let (status, body) = post_json!(
        &app,
        "/api/v1/headings/page",
        json!({ "url": format!("{}/missing", server.url()) }),
    );

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "fetch_failed");
}

#[actix_web::test]
async fn test_page_rejects_non_http_scheme() {
    let app = app!();
    let (status, body) = post_json!(
        &app,
        "/api/v1/headings/page",
        json!({ "url": "ftp://files.example.com/index.html" }),
    );

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_url");
}
