//! Link document store
//!
//! The store owns per-document atomicity and the short-code uniqueness
//! constraint; it is the only concurrency-safety mechanism the core relies
//! on. Backends are selected at startup through [`StoreFactory`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::errors::Result;

mod models;
pub use models::{ClickEvent, Link};

pub mod file;
pub mod memory;

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Persist a new link. Fails with `Conflict` when the short code is
    /// already taken; this is the sole guard against concurrent creates
    /// claiming the same code.
    async fn insert(&self, link: Link) -> Result<()>;

    /// Exact-match lookup by short code. No normalization, no case folding.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>>;

    /// All links owned by `owner_id`, in no particular order.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>>;

    /// Append one click event to the link's history. The append must not
    /// mutate or drop prior events.
    async fn append_click(&self, code: &str, event: ClickEvent) -> Result<()>;

    async fn count(&self) -> Result<usize>;

    fn backend_name(&self) -> &'static str;
}

pub struct StoreFactory;

impl StoreFactory {
    pub async fn create(config: &Config) -> Result<Arc<dyn LinkStore>> {
        let boxed: Box<dyn LinkStore> = match config.storage_backend.as_str() {
            "file" => Box::new(file::FileLinkStore::new_async(&config.storage_file_path).await?),
            _ => Box::new(memory::MemoryLinkStore::new()),
        };

        Ok(Arc::from(boxed))
    }
}
