//! Redirect resolver
//!
//! Resolves a short code to its destination: lookup, defensive
//! normalization, validation, best-effort click telemetry. The destination
//! is returned to the HTTP layer for a temporary (302) redirect so future
//! destination edits take effect without client-side caching.

use std::sync::Arc;

use tracing::warn;

use crate::errors::{Result, TrimmrrError};
use crate::services::click_recorder::{ClickContext, ClickRecorder};
use crate::storage::LinkStore;
use crate::utils::url_validator::{ensure_scheme, validate_url};

pub struct RedirectService {
    store: Arc<dyn LinkStore>,
    recorder: Arc<ClickRecorder>,
}

impl RedirectService {
    pub fn new(store: Arc<dyn LinkStore>, recorder: Arc<ClickRecorder>) -> Self {
        Self { store, recorder }
    }

    /// Resolve a short code to its redirect target.
    ///
    /// Stored destinations are normalized again before validation; rows
    /// written before normalization existed, or modified outside the
    /// service, may lack a scheme. A malformed destination is a validation
    /// failure, never a redirect.
    pub async fn resolve(&self, code: &str, ctx: &ClickContext) -> Result<String> {
        let link = self
            .store
            .find_by_code(code)
            .await?
            .ok_or_else(|| {
                TrimmrrError::not_found(format!("Short URL '{}' does not exist", code))
            })?;

        let target = ensure_scheme(&link.long_url).into_owned();
        validate_url(&target).map_err(|e| TrimmrrError::validation(e.to_string()))?;

        // Telemetry must never break the redirect; a failure is logged and
        // dropped here rather than returned.
        if let Err(e) = self.recorder.record(&link.short_code, ctx).await {
            warn!(
                "Click recording failed for '{}' ({}): {}",
                link.short_code,
                e.code(),
                e
            );
        }

        Ok(target)
    }
}
