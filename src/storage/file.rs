//! File store backend
//!
//! Keeps the full document set in memory behind a `RwLock` and rewrites a
//! single JSON file on every mutation. Suited to the small link counts this
//! service targets; concurrent writers serialize on the lock, so the stored
//! file always reflects one complete mutation (last writer wins).

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::{ClickEvent, Link, LinkStore};
use crate::errors::{Result, TrimmrrError};

#[derive(Debug)]
pub struct FileLinkStore {
    path: PathBuf,
    links: RwLock<HashMap<String, Link>>,
}

impl FileLinkStore {
    pub async fn new_async(path: &str) -> Result<Self> {
        let path = PathBuf::from(path);
        let links = match tokio::fs::read_to_string(&path).await {
            Ok(content) if !content.trim().is_empty() => {
                let list: Vec<Link> = serde_json::from_str(&content)
                    .map_err(|e| TrimmrrError::serialization(e.to_string()))?;
                list.into_iter()
                    .map(|link| (link.short_code.clone(), link))
                    .collect()
            }
            Ok(_) => HashMap::new(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(TrimmrrError::file_operation(e.to_string())),
        };

        info!(
            "FileLinkStore: loaded {} links from {}",
            links.len(),
            path.display()
        );

        Ok(Self {
            path,
            links: RwLock::new(links),
        })
    }

    async fn persist(&self, links: &HashMap<String, Link>) -> Result<()> {
        let mut list: Vec<&Link> = links.values().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let json = serde_json::to_string_pretty(&list)
            .map_err(|e| TrimmrrError::serialization(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| TrimmrrError::file_operation(e.to_string()))
    }
}

#[async_trait]
impl LinkStore for FileLinkStore {
    async fn insert(&self, link: Link) -> Result<()> {
        let mut links = self.links.write().await;
        if links.contains_key(&link.short_code) {
            return Err(TrimmrrError::conflict(format!(
                "Short code '{}' already exists",
                link.short_code
            )));
        }

        let code = link.short_code.clone();
        links.insert(code.clone(), link);
        if let Err(e) = self.persist(&links).await {
            links.remove(&code);
            return Err(e);
        }

        debug!("FileLinkStore: inserted '{}'", code);
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>> {
        Ok(self.links.read().await.get(code).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>> {
        Ok(self
            .links
            .read()
            .await
            .values()
            .find(|link| link.id == id)
            .cloned())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>> {
        Ok(self
            .links
            .read()
            .await
            .values()
            .filter(|link| link.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn append_click(&self, code: &str, event: ClickEvent) -> Result<()> {
        let mut links = self.links.write().await;
        match links.get_mut(code) {
            Some(link) => link.clicks.push(event),
            None => {
                return Err(TrimmrrError::not_found(format!(
                    "Link '{}' not found",
                    code
                )));
            }
        }
        if let Err(e) = self.persist(&links).await {
            // Keep the map consistent with the file, as insert does
            if let Some(link) = links.get_mut(code) {
                link.clicks.pop();
            }
            return Err(e);
        }
        Ok(())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.links.read().await.len())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
