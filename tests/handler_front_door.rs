mod common;

use axum::http::StatusCode;
use common::{PRIMARY_HOST, SECONDARY_HOST};

#[tokio::test]
async fn test_primary_front_page_english_browser() {
    let server = common::test_server(common::create_test_state());

    let (host, path) = common::resolve_final(&server, PRIMARY_HOST, "/", "en-US").await;

    assert_eq!(host, PRIMARY_HOST);
    assert_eq!(path, "/en-us");
}

#[tokio::test]
async fn test_primary_generic_english_prefix() {
    let server = common::test_server(common::create_test_state());

    let (host, path) = common::resolve_final(&server, PRIMARY_HOST, "/en", "en-US").await;

    assert_eq!(host, PRIMARY_HOST);
    assert_eq!(path, "/en-us");
}

#[tokio::test]
async fn test_primary_generic_french_prefix_crosses_domain() {
    let server = common::test_server(common::create_test_state());

    let (host, path) = common::resolve_final(&server, PRIMARY_HOST, "/fr", "en-US").await;

    assert_eq!(host, "www.example.ca");
    assert_eq!(path, "/fr-ca");
}

#[tokio::test]
async fn test_secondary_front_page_english_browser() {
    let server = common::test_server(common::create_test_state());

    let (host, path) = common::resolve_final(&server, SECONDARY_HOST, "/", "en-US").await;

    assert_eq!(host, SECONDARY_HOST);
    assert_eq!(path, "/en-ca");
}

#[tokio::test]
async fn test_secondary_front_page_french_browser() {
    let server = common::test_server(common::create_test_state());

    let (host, path) = common::resolve_final(&server, SECONDARY_HOST, "/", "fr-CA").await;

    assert_eq!(host, SECONDARY_HOST);
    assert_eq!(path, "/fr-ca");
}

#[tokio::test]
async fn test_secondary_explicit_primary_langcode() {
    let server = common::test_server(common::create_test_state());

    for browser in ["en-US", "fr-CA", "de-DE"] {
        let response = server
            .get("/en-us")
            .add_header("Host", SECONDARY_HOST)
            .add_header("Accept-Language", browser)
            .await;

        assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.header("location"), "https://www.example.com/en-us");
    }
}

#[tokio::test]
async fn test_french_prefix_with_content_path() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/fr/solutions")
        .add_header("Host", PRIMARY_HOST)
        .await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "https://www.example.ca/fr-ca/solutions"
    );
}

#[tokio::test]
async fn test_unprefixed_path_gets_fallback_langcode() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/ideas")
        .add_header("Host", SECONDARY_HOST)
        .add_header("Accept-Language", "en-US")
        .await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/en-ca/ideas");
}

#[tokio::test]
async fn test_redirect_preserves_query() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/en/solutions?utm_source=mail")
        .add_header("Host", PRIMARY_HOST)
        .await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location"),
        "/en-us/solutions?utm_source=mail"
    );
}

#[tokio::test]
async fn test_served_page_lists_switcher_links() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/en-ca/solutions")
        .add_header("Host", SECONDARY_HOST)
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-language"), "en-ca");

    let html = response.text();
    assert!(html.contains("<title>Solutions</title>"));
    assert!(html.contains(r#"hreflang="en-us""#));
    assert!(html.contains(r#"href="https://www.example.com/en-us/node/1""#));
    assert!(html.contains(r#"href="/en-ca/solutions""#));
    assert!(html.contains(r#"href="/fr-ca/solutions""#));
}

#[tokio::test]
async fn test_switcher_omits_untranslated_language() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/en-ca/recipes")
        .add_header("Host", SECONDARY_HOST)
        .await;

    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains(r#"hreflang="en-us""#));
    assert!(html.contains(r#"hreflang="en-ca""#));
    assert!(!html.contains(r#"hreflang="fr-ca""#));
    assert!(!html.contains(r#"hreflang="und""#));
}

#[tokio::test]
async fn test_unknown_content_is_not_found() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/en-us/no-such-page")
        .add_header("Host", PRIMARY_HOST)
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_admin_route_is_served_without_redirect() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/admin/config")
        .add_header("Host", SECONDARY_HOST)
        .add_header("Accept-Language", "fr-CA")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-language"), "fr-ca");
}

#[tokio::test]
async fn test_missing_host_header() {
    let server = common::test_server(common::create_test_state());

    let response = server.get("/en-us").await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_unknown_host_uses_default_domain() {
    let server = common::test_server(common::create_test_state());

    let response = server
        .get("/")
        .add_header("Host", "preview.internal:8080")
        .add_header("Accept-Language", "en-US")
        .await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "/en-us");
}
