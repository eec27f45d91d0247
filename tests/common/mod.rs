#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use trimmrr::errors::{Result, TrimmrrError};
use trimmrr::storage::memory::MemoryLinkStore;
use trimmrr::storage::{ClickEvent, Link, LinkStore};

pub fn make_link(code: &str, owner_id: &str, long_url: &str) -> Link {
    Link {
        id: Uuid::new_v4().to_string(),
        long_url: long_url.to_string(),
        short_code: code.to_string(),
        custom_code: None,
        full_short_url: format!("https://trimmrr.in/{}", code),
        qr_code: None,
        owner_id: owner_id.to_string(),
        clicks: Vec::new(),
        created_at: Utc::now(),
    }
}

/// Store that reports a short-code conflict for the first `n` inserts, then
/// behaves like the in-memory backend.
pub struct FlakyStore {
    inner: MemoryLinkStore,
    conflicts_left: AtomicUsize,
}

impl FlakyStore {
    pub fn new(conflicts: usize) -> Self {
        Self {
            inner: MemoryLinkStore::new(),
            conflicts_left: AtomicUsize::new(conflicts),
        }
    }

    pub fn conflicts_left(&self) -> usize {
        self.conflicts_left.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LinkStore for FlakyStore {
    async fn insert(&self, link: Link) -> Result<()> {
        if self
            .conflicts_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(TrimmrrError::conflict(format!(
                "Short code '{}' already exists",
                link.short_code
            )));
        }
        self.inner.insert(link).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>> {
        self.inner.find_by_code(code).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>> {
        self.inner.find_by_id(id).await
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn append_click(&self, code: &str, event: ClickEvent) -> Result<()> {
        self.inner.append_click(code, event).await
    }

    async fn count(&self) -> Result<usize> {
        self.inner.count().await
    }

    fn backend_name(&self) -> &'static str {
        "flaky"
    }
}

/// Store that serves reads normally but fails every click append, for
/// exercising the best-effort recording path.
pub struct AppendFailStore {
    inner: MemoryLinkStore,
}

impl AppendFailStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryLinkStore::new(),
        }
    }
}

#[async_trait]
impl LinkStore for AppendFailStore {
    async fn insert(&self, link: Link) -> Result<()> {
        self.inner.insert(link).await
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>> {
        self.inner.find_by_code(code).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>> {
        self.inner.find_by_id(id).await
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn append_click(&self, _code: &str, _event: ClickEvent) -> Result<()> {
        Err(TrimmrrError::storage_operation("append disabled"))
    }

    async fn count(&self) -> Result<usize> {
        self.inner.count().await
    }

    fn backend_name(&self) -> &'static str {
        "append-fail"
    }
}
