//! Click recorder
//!
//! Appends one click event to a link's history per resolution. Recording is
//! a best-effort side effect: the caller logs a failure and carries on, it
//! never travels up the redirect's error channel.

use std::sync::Arc;

use actix_web::HttpRequest;
use chrono::Utc;
use tracing::debug;

use crate::errors::{Result, TrimmrrError};
use crate::storage::{ClickEvent, LinkStore};
use crate::utils::ip::extract_client_ip;

/// Referrer recorded when the requester supplied none.
pub const DIRECT_REFERRER: &str = "Direct";
/// Country recorded when the origin country is not resolvable.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Request metadata captured for one resolution.
#[derive(Debug, Clone, Default)]
pub struct ClickContext {
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
    /// Trusted edge-provided country code, when the edge supplies one
    pub country: Option<String>,
}

impl ClickContext {
    pub fn from_request(req: &HttpRequest) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(String::from)
                .filter(|v| !v.is_empty())
        };

        Self {
            referrer: header("referer"),
            user_agent: header("user-agent"),
            ip: extract_client_ip(req),
            country: header("cf-ipcountry"),
        }
    }
}

pub struct ClickRecorder {
    store: Arc<dyn LinkStore>,
}

impl ClickRecorder {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Build a click event from the request context and append it to the
    /// link's history.
    pub async fn record(&self, code: &str, ctx: &ClickContext) -> Result<()> {
        let event = ClickEvent {
            timestamp: Utc::now(),
            referrer: ctx
                .referrer
                .clone()
                .unwrap_or_else(|| DIRECT_REFERRER.to_string()),
            user_agent: ctx.user_agent.clone(),
            ip: ctx.ip.clone(),
            country: ctx
                .country
                .clone()
                .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        };

        self.store
            .append_click(code, event)
            .await
            .map_err(|e| TrimmrrError::recording(e.to_string()))?;

        debug!("ClickRecorder: recorded click for '{}'", code);
        Ok(())
    }
}
