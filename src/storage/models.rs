use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded resolution of a short code.
///
/// Click events are created exclusively by the click recorder, appended to a
/// link's history and never mutated or removed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    /// `"Direct"` when the requester supplied no referrer
    #[serde(default)]
    pub referrer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// `"Unknown"` when the origin country is not resolvable
    #[serde(default)]
    pub country: String,
}

/// The core link document. Field names follow the public JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(rename = "_id")]
    pub id: String,
    pub long_url: String,
    /// Unique and immutable, assigned at creation
    #[serde(rename = "shortUrl")]
    pub short_code: String,
    /// The user-requested code, if any; equals `short_code` when present
    #[serde(rename = "customUrl", skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
    pub full_short_url: String,
    /// Asset store reference for the QR code rendered from `full_short_url`
    #[serde(rename = "qrCode", skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<String>,
    #[serde(rename = "userId")]
    pub owner_id: String,
    #[serde(default)]
    pub clicks: Vec<ClickEvent>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_link() -> Link {
        Link {
            id: "abc123".to_string(),
            long_url: "https://example.com".to_string(),
            short_code: "x1y2z3".to_string(),
            custom_code: None,
            full_short_url: "https://trimmrr.in/x1y2z3".to_string(),
            qr_code: None,
            owner_id: "user-1".to_string(),
            clicks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_link_json_shape() {
        let json = serde_json::to_value(sample_link()).unwrap();
        assert_eq!(json["_id"], "abc123");
        assert_eq!(json["longUrl"], "https://example.com");
        assert_eq!(json["shortUrl"], "x1y2z3");
        assert_eq!(json["fullShortUrl"], "https://trimmrr.in/x1y2z3");
        assert_eq!(json["userId"], "user-1");
        // absent optionals are omitted, not null
        assert!(json.get("customUrl").is_none());
        assert!(json.get("qrCode").is_none());
    }

    #[test]
    fn test_click_event_defaults_on_legacy_rows() {
        // Rows written before a field existed deserialize with empty strings
        let event: ClickEvent =
            serde_json::from_str(r#"{"timestamp":"2024-03-01T10:00:00Z"}"#).unwrap();
        assert_eq!(event.referrer, "");
        assert_eq!(event.country, "");
        assert!(event.user_agent.is_none());
        assert!(event.ip.is_none());
    }
}
