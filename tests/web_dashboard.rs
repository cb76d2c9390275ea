mod common;

use axum::http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;

fn form(url: &str, code: &str) -> HashMap<&'static str, String> {
    HashMap::from([("url", url.to_string()), ("code", code.to_string())])
}

// ─── DASHBOARD ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_dashboard_empty() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/").await;

    response.assert_status_ok();
    assert!(response.text().contains("No links to show"));
}

#[tokio::test]
async fn test_dashboard_lists_links() {
    let (server, _repo) = common::create_test_server();
    common::create_link(&server, "https://docs.rs", Some("docs12")).await;
    common::create_link(&server, "https://crates.io", Some("crates1")).await;

    let text = server.get("/").await.text();

    assert!(text.contains("docs12"));
    assert!(text.contains("crates1"));
    assert!(text.contains("2 links"));
    // Each row shows its short link under the public base URL.
    assert!(text.contains("tiny.link"));
}

#[tokio::test]
async fn test_dashboard_search_and_filter() {
    let (server, _repo) = common::create_test_server();
    common::create_link(&server, "https://docs.rs", Some("docs12")).await;
    common::create_link(&server, "https://crates.io", Some("crates1")).await;
    server.get("/crates1").await;

    let text = server.get("/").add_query_param("q", "DOCS").await.text();
    assert!(text.contains("docs12"));
    assert!(!text.contains("/code/crates1"));

    let text = server.get("/").add_query_param("filter", "recent").await.text();
    assert!(text.contains("/code/crates1"));
    assert!(!text.contains("/code/docs12"));

    let text = server.get("/").add_query_param("filter", "never").await.text();
    assert!(text.contains("/code/docs12"));
    assert!(!text.contains("/code/crates1"));
}

#[tokio::test]
async fn test_dashboard_ignores_unknown_options() {
    let (server, _repo) = common::create_test_server();
    common::create_link(&server, "https://docs.rs", Some("docs12")).await;

    let response = server
        .get("/")
        .add_query_param("filter", "bogus")
        .add_query_param("sort", "bogus")
        .add_query_param("dir", "sideways")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("/code/docs12"));
}

#[tokio::test]
async fn test_dashboard_does_not_link_script_urls() {
    let (server, _repo) = common::create_test_server();
    common::create_link(&server, "javascript:alert(1)", Some("sneaky1")).await;

    let text = server.get("/").await.text();

    assert!(text.contains("sneaky1"));
    assert!(!text.contains("href=\"javascript:"));
}

// ─── CREATE FORM ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_form_create_redirects_to_dashboard() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/dashboard/links")
        .form(&form("https://docs.rs", "form12"))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/?created=form12");
    assert_eq!(repo.len().await, 1);

    let text = server.get("/").add_query_param("created", "form12").await.text();
    assert!(text.contains("Your short link is ready"));
    assert!(text.contains("form12"));
}

#[tokio::test]
async fn test_form_create_generates_code_when_blank() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/dashboard/links")
        .form(&form("https://docs.rs", ""))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_form_create_invalid_code_shows_error() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/dashboard/links")
        .form(&form("https://docs.rs", "no"))
        .await;

    response.assert_status_bad_request();
    assert!(response.text().contains("Code must be alphanumeric"));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_form_create_missing_url_shows_error() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/dashboard/links")
        .form(&form("", "abc123"))
        .await;

    response.assert_status_bad_request();
    assert!(response.text().contains("URL is required"));
    // Submitted code is kept in the form.
    assert!(response.text().contains("value=\"abc123\""));
}

#[tokio::test]
async fn test_form_create_conflict_shows_error() {
    let (server, repo) = common::create_test_server();
    common::create_link(&server, "https://docs.rs", Some("taken1")).await;

    let response = server
        .post("/dashboard/links")
        .form(&form("https://crates.io", "taken1"))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert!(response.text().contains("Code already exists"));
    assert_eq!(repo.len().await, 1);
}

// ─── DELETE FORM ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_form_delete() {
    let (server, repo) = common::create_test_server();
    common::create_link(&server, "https://docs.rs", Some("gone12")).await;

    let response = server.post("/dashboard/links/gone12/delete").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_form_delete_unknown_code() {
    let (server, _repo) = common::create_test_server();

    let response = server.post("/dashboard/links/nope12/delete").await;

    response.assert_status_not_found();
    assert!(response.text().contains("Link not found"));
}

// ─── STATS PAGE ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_stats_page() {
    let (server, _repo) = common::create_test_server();
    common::create_link(&server, "https://docs.rs", Some("stat12")).await;
    server.get("/stat12").await;

    let response = server.get("/code/stat12").await;

    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("Statistics for stat12"));
    assert!(text.contains("docs.rs"));
    assert!(text.contains("Just now"));

    // Viewing statistics is not a visit.
    let link = server.get("/api/links/stat12").await.json::<Value>();
    assert_eq!(link["clicks"], 1);
}

#[tokio::test]
async fn test_stats_page_never_clicked() {
    let (server, _repo) = common::create_test_server();
    common::create_link(&server, "https://docs.rs", Some("idle12")).await;

    let text = server.get("/code/idle12").await.text();

    assert!(text.contains("Never"));
}

#[tokio::test]
async fn test_stats_page_not_found() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/code/nope12").await;

    response.assert_status_not_found();
    assert!(response.text().contains("nope12"));
}

#[tokio::test]
async fn test_unknown_path_is_404_page() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/some/deep/path").await;

    response.assert_status_not_found();
    assert!(response.text().contains("does not exist"));
}
