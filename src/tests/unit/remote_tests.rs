//! Remote Compendium Unit Tests
//!
//! Uses wiremock for HTTP mocking to test:
//! - Record and listing parsing
//! - 404 mapping to `NotFound`
//! - Server errors mapping to retryable `Transport`
//! - Facet catalogue degradation when a listing is unavailable

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::browser::{BrowseError, Browser};
use crate::core::classifier::VariantTag;
use crate::core::compendium::{CachedCompendium, CompendiumError, CompendiumSource, RemoteCompendium};
use crate::core::search::{CategoryKind, FacetCatalogue, ANY};

async fn remote(server: &MockServer) -> RemoteCompendium {
    RemoteCompendium::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

async fn mount_json(server: &MockServer, at: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_invalid_base_url() {
    let result = RemoteCompendium::new("not a url", Duration::from_secs(1));
    assert!(matches!(result, Err(CompendiumError::Transport(_))));
}

#[test]
fn test_public_defaults() {
    let source = RemoteCompendium::public().unwrap();
    assert_eq!(source.base_url(), "https://www.dnd5eapi.co/");
    assert_eq!(source.id(), "remote");
}

// =============================================================================
// Resolution
// =============================================================================

#[tokio::test]
async fn test_resolve_record() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/monsters/aboleth",
        json!({"index": "aboleth", "name": "Aboleth", "url": "/api/monsters/aboleth", "challenge_rating": 10}),
    )
    .await;

    let record = remote(&server).await.resolve("/api/monsters/aboleth").await.unwrap();
    assert_eq!(record.name(), Some("Aboleth"));
    assert_eq!(record.number("challenge_rating"), Some(10.0));
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/mirror/api/monsters/aboleth",
        json!({"index": "aboleth", "name": "Aboleth", "url": "/api/monsters/aboleth"}),
    )
    .await;

    for base in [format!("{}/mirror", server.uri()), format!("{}/mirror/", server.uri())] {
        let source = RemoteCompendium::new(&base, Duration::from_secs(5)).unwrap();
        let record = source.resolve("/api/monsters/aboleth").await.unwrap();
        assert_eq!(record.name(), Some("Aboleth"), "base {base}");
    }
}

#[tokio::test]
async fn test_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Not found"})))
        .mount(&server)
        .await;

    let err = remote(&server).await.resolve("/api/spells/wish").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_error_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = remote(&server).await.resolve("/api/spells/wish").await.unwrap_err();
    assert!(matches!(err, CompendiumError::Transport(ref msg) if msg.contains("503")));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_host_is_transport() {
    let source = RemoteCompendium::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = source.resolve("/api/spells/wish").await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_non_json_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let err = remote(&server).await.resolve("/api/spells/wish").await.unwrap_err();
    assert!(matches!(err, CompendiumError::Serialization(_)));
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn test_listing_reads_results() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/spells",
        json!({
            "count": 2,
            "results": [
                {"index": "fireball", "name": "Fireball", "url": "/api/spells/fireball"},
                {"index": "shield", "name": "Shield", "url": "/api/spells/shield"}
            ]
        }),
    )
    .await;

    let entries = remote(&server).await.list_category("/api/spells").await.unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Fireball", "Shield"]);
    assert!(entries.iter().all(|e| e.visible));
}

#[tokio::test]
async fn test_catalogue_degrades_missing_listing() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/magic-schools",
        json!({"results": [{"index": "evocation", "name": "Evocation", "url": "/api/magic-schools/evocation"}]}),
    )
    .await;
    // Every other reference listing 404s.

    let source = remote(&server).await;
    let catalogue = FacetCatalogue::load(&source).await;

    let spells = catalogue.get(CategoryKind::Spells).unwrap();
    assert_eq!(spells.choices[0].options(), &[ANY.to_string(), "Evocation".to_string()]);
    assert_eq!(spells.choices[2].options(), &[ANY.to_string()]);
    assert_eq!(catalogue.categories().len(), 6);
}

// =============================================================================
// Browser over HTTP
// =============================================================================

#[tokio::test]
async fn test_browser_open_over_http_uses_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/spells/fireball"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "index": "fireball", "name": "Fireball", "url": "/api/spells/fireball",
            "components": ["V", "S", "M"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let source: Arc<dyn CompendiumSource> = Arc::new(CachedCompendium::new(remote(&server).await));
    let browser = Browser::new(source).await;

    assert_eq!(browser.open("/api/spells/fireball").await.unwrap().tag, VariantTag::Spell);
    assert_eq!(browser.open("/api/spells/fireball").await.unwrap().tag, VariantTag::Spell);
    assert!(matches!(
        browser.open("/api/spells/wish").await,
        Err(BrowseError::Compendium(CompendiumError::NotFound { .. }))
    ));
}
