mod common;

use std::sync::Arc;

use trimmrr::errors::TrimmrrError;
use trimmrr::services::{CreateLinkRequest, LinkService, MemoryAssetStore};
use trimmrr::storage::memory::MemoryLinkStore;
use trimmrr::storage::LinkStore;

use common::FlakyStore;

const BASE: &str = "https://trimmrr.in";

fn service_with(store: Arc<dyn LinkStore>) -> (LinkService, Arc<MemoryAssetStore>) {
    let assets = Arc::new(MemoryAssetStore::new());
    (LinkService::new(store, assets.clone(), BASE), assets)
}

fn request(long_url: &str, custom_code: Option<&str>) -> CreateLinkRequest {
    CreateLinkRequest {
        long_url: long_url.to_string(),
        custom_code: custom_code.map(String::from),
    }
}

#[tokio::test]
async fn test_create_generates_code_and_normalizes_url() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryLinkStore::new());
    let (service, _) = service_with(store.clone());

    let link = service
        .create_link(request("example.com/page?q=1", None), "alice")
        .await
        .unwrap();

    assert_eq!(link.long_url, "https://example.com/page?q=1");
    assert_eq!(link.short_code.len(), 8);
    assert!(link.short_code.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(link.custom_code, None);
    assert_eq!(
        link.full_short_url,
        format!("{}/{}", BASE, link.short_code)
    );
    assert_eq!(link.owner_id, "alice");
    assert!(link.clicks.is_empty());

    let stored = store.find_by_code(&link.short_code).await.unwrap().unwrap();
    assert_eq!(stored.id, link.id);
}

#[tokio::test]
async fn test_create_stores_qr_asset() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryLinkStore::new());
    let (service, assets) = service_with(store);

    let link = service
        .create_link(request("https://example.com", None), "alice")
        .await
        .unwrap();

    let asset_ref = link.qr_code.expect("QR reference missing");
    assert_eq!(assets.len(), 1);

    let asset = assets.get(&asset_ref).unwrap();
    assert_eq!(asset.content_type, "image/svg+xml");
    assert!(String::from_utf8(asset.bytes).unwrap().contains("<svg"));
}

#[tokio::test]
async fn test_create_rejects_invalid_destinations() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryLinkStore::new());
    let (service, _) = service_with(store.clone());

    let err = service
        .create_link(request("javascript:alert(1)", None), "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, TrimmrrError::Validation(_)));

    let err = service
        .create_link(request("", None), "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, TrimmrrError::Validation(_)));

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_custom_code_used_verbatim() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryLinkStore::new());
    let (service, _) = service_with(store);

    let link = service
        .create_link(request("https://example.com", Some("docs")), "alice")
        .await
        .unwrap();

    assert_eq!(link.short_code, "docs");
    assert_eq!(link.custom_code.as_deref(), Some("docs"));
    assert_eq!(link.full_short_url, format!("{}/docs", BASE));
}

#[tokio::test]
async fn test_custom_code_conflict_surfaces_immediately() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryLinkStore::new());
    let (service, _) = service_with(store.clone());

    service
        .create_link(request("https://example.com/a", Some("docs")), "alice")
        .await
        .unwrap();

    let err = service
        .create_link(request("https://example.com/b", Some("docs")), "bob")
        .await
        .unwrap_err();
    assert!(matches!(err, TrimmrrError::Conflict(_)));

    // The first link is untouched
    let stored = store.find_by_code("docs").await.unwrap().unwrap();
    assert_eq!(stored.owner_id, "alice");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_custom_code_rejected() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryLinkStore::new());
    let (service, _) = service_with(store);

    let err = service
        .create_link(request("https://example.com", Some("bad code")), "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, TrimmrrError::Validation(_)));
}

#[tokio::test]
async fn test_generated_code_conflict_is_retried() {
    let store = Arc::new(FlakyStore::new(2));
    let (service, _) = service_with(store.clone());

    let link = service
        .create_link(request("https://example.com", None), "alice")
        .await
        .unwrap();

    assert_eq!(store.conflicts_left(), 0);
    assert!(store.find_by_code(&link.short_code).await.unwrap().is_some());
}

#[tokio::test]
async fn test_generated_code_retry_budget_exhausts() {
    // Three conflicts consume the whole attempt budget
    let store = Arc::new(FlakyStore::new(3));
    let (service, _) = service_with(store.clone());

    let err = service
        .create_link(request("https://example.com", None), "alice")
        .await
        .unwrap_err();

    assert!(matches!(err, TrimmrrError::Conflict(_)));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_by_owner_newest_first() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryLinkStore::new());
    let (service, _) = service_with(store);

    let first = service
        .create_link(request("https://example.com/1", None), "alice")
        .await
        .unwrap();
    let second = service
        .create_link(request("https://example.com/2", None), "alice")
        .await
        .unwrap();
    service
        .create_link(request("https://example.com/3", None), "bob")
        .await
        .unwrap();

    let links = service.list_by_owner("alice").await.unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].id, second.id);
    assert_eq!(links[1].id, first.id);
}

#[tokio::test]
async fn test_find_for_owner_hides_foreign_links() {
    let store: Arc<dyn LinkStore> = Arc::new(MemoryLinkStore::new());
    let (service, _) = service_with(store);

    let link = service
        .create_link(request("https://example.com", None), "alice")
        .await
        .unwrap();

    let found = service.find_for_owner(&link.id, "alice").await.unwrap();
    assert_eq!(found.id, link.id);

    // A foreign owner and a missing id are indistinguishable
    let foreign = service.find_for_owner(&link.id, "bob").await.unwrap_err();
    let missing = service
        .find_for_owner("no-such-id", "alice")
        .await
        .unwrap_err();
    assert!(matches!(foreign, TrimmrrError::NotFound(_)));
    assert_eq!(foreign.message(), missing.message());
}
