//! In-memory store backend
//!
//! Documents live in a `DashMap` keyed by short code, with a secondary
//! id -> code index for analytics lookups. Entry-level locking gives the
//! per-document atomicity the contract requires; click appends mutate the
//! document in place.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use super::{ClickEvent, Link, LinkStore};
use crate::errors::{Result, TrimmrrError};

#[derive(Default)]
pub struct MemoryLinkStore {
    links: DashMap<String, Link>,
    ids: DashMap<String, String>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn insert(&self, link: Link) -> Result<()> {
        match self.links.entry(link.short_code.clone()) {
            Entry::Occupied(_) => Err(TrimmrrError::conflict(format!(
                "Short code '{}' already exists",
                link.short_code
            ))),
            Entry::Vacant(vacant) => {
                self.ids.insert(link.id.clone(), link.short_code.clone());
                debug!("MemoryLinkStore: inserted '{}'", link.short_code);
                vacant.insert(link);
                Ok(())
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>> {
        let code = match self.ids.get(id) {
            Some(entry) => entry.value().clone(),
            None => return Ok(None),
        };
        Ok(self.links.get(&code).map(|entry| entry.value().clone()))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>> {
        Ok(self
            .links
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn append_click(&self, code: &str, event: ClickEvent) -> Result<()> {
        match self.links.get_mut(code) {
            Some(mut entry) => {
                entry.clicks.push(event);
                Ok(())
            }
            None => Err(TrimmrrError::not_found(format!(
                "Link '{}' not found",
                code
            ))),
        }
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.links.len())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
