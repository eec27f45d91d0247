//! Link registry service
//!
//! Owns the mapping from short code to destination: creation with code
//! allocation, exact lookup, owner-scoped listing and the ownership check
//! that guards analytics access.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{Result, TrimmrrError};
use crate::services::assets::{AssetStore, render_qr_svg};
use crate::storage::{Link, LinkStore};
use crate::utils::url_validator::{ensure_scheme, validate_url};
use crate::utils::{generate_short_code, validate_custom_code};

/// Attempts at persisting a link under a freshly generated code before the
/// conflict is surfaced to the caller. Custom codes get a single attempt.
const GENERATED_CODE_ATTEMPTS: usize = 3;

/// Request to create a new link
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    /// Destination URL, with or without scheme
    pub long_url: String,
    /// User-chosen short code (optional, generated if not provided)
    pub custom_code: Option<String>,
}

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    assets: Arc<dyn AssetStore>,
    base_domain: String,
}

impl LinkService {
    pub fn new(
        store: Arc<dyn LinkStore>,
        assets: Arc<dyn AssetStore>,
        base_domain: impl Into<String>,
    ) -> Self {
        Self {
            store,
            assets,
            base_domain: base_domain.into(),
        }
    }

    /// Create a new short link for `owner_id`.
    ///
    /// The destination is normalized to carry a scheme, then validated. A
    /// custom-code conflict is surfaced immediately; a generated-code
    /// conflict is retried with a fresh code up to the attempt budget.
    pub async fn create_link(&self, req: CreateLinkRequest, owner_id: &str) -> Result<Link> {
        let long_url = ensure_scheme(&req.long_url).into_owned();
        validate_url(&long_url).map_err(|e| TrimmrrError::validation(e.to_string()))?;

        let custom_code = req.custom_code.filter(|c| !c.is_empty());

        match custom_code {
            Some(code) => {
                validate_custom_code(&code)?;
                let link = self
                    .build_link(&code, Some(code.clone()), &long_url, owner_id)
                    .await;
                self.persist(link).await
            }
            None => {
                let mut attempt = 1;
                loop {
                    let code = generate_short_code();
                    let link = self.build_link(&code, None, &long_url, owner_id).await;
                    match self.persist(link).await {
                        Err(TrimmrrError::Conflict(_)) if attempt < GENERATED_CODE_ATTEMPTS => {
                            warn!(
                                "Generated code '{}' collided (attempt {}/{}), retrying",
                                code, attempt, GENERATED_CODE_ATTEMPTS
                            );
                            attempt += 1;
                        }
                        other => return other,
                    }
                }
            }
        }
    }

    /// Exact-match lookup by short code.
    pub async fn find_by_code(&self, code: &str) -> Result<Link> {
        self.store
            .find_by_code(code)
            .await?
            .ok_or_else(|| TrimmrrError::not_found(format!("Short URL '{}' does not exist", code)))
    }

    /// All links owned by `owner_id`, newest first.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>> {
        let mut links = self.store.list_by_owner(owner_id).await?;
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    /// Ownership-scoped lookup by link id.
    ///
    /// A link belonging to a different owner yields the same `NotFound` as a
    /// missing link, so existence is never revealed to non-owners.
    pub async fn find_for_owner(&self, link_id: &str, owner_id: &str) -> Result<Link> {
        match self.store.find_by_id(link_id).await? {
            Some(link) if link.owner_id == owner_id => Ok(link),
            _ => Err(TrimmrrError::not_found("URL not found")),
        }
    }

    async fn build_link(
        &self,
        code: &str,
        custom_code: Option<String>,
        long_url: &str,
        owner_id: &str,
    ) -> Link {
        let full_short_url = format!("{}/{}", self.base_domain, code);
        let qr_code = self.store_qr_asset(&full_short_url).await;

        Link {
            id: Uuid::new_v4().to_string(),
            long_url: long_url.to_string(),
            short_code: code.to_string(),
            custom_code,
            full_short_url,
            qr_code,
            owner_id: owner_id.to_string(),
            clicks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Render and store the QR asset for a short URL.
    ///
    /// A failure here degrades the link (no QR reference) but never fails
    /// creation.
    async fn store_qr_asset(&self, full_short_url: &str) -> Option<String> {
        let svg = match render_qr_svg(full_short_url) {
            Ok(svg) => svg,
            Err(e) => {
                warn!("QR rendering failed for '{}': {}", full_short_url, e);
                return None;
            }
        };
        match self.assets.store(svg, "image/svg+xml").await {
            Ok(asset_ref) => Some(asset_ref),
            Err(e) => {
                warn!("QR asset store failed for '{}': {}", full_short_url, e);
                None
            }
        }
    }

    async fn persist(&self, link: Link) -> Result<Link> {
        match self.store.insert(link.clone()).await {
            Ok(()) => {
                info!(
                    "LinkService: created '{}' -> '{}'",
                    link.short_code, link.long_url
                );
                Ok(link)
            }
            Err(e) => {
                // The QR asset was created before persistence; on failure it
                // stays behind as an orphan, which is accepted and logged.
                if let Some(ref asset_ref) = link.qr_code {
                    warn!(
                        "Persisting '{}' failed, QR asset '{}' orphaned: {}",
                        link.short_code, asset_ref, e
                    );
                }
                Err(e)
            }
        }
    }
}
