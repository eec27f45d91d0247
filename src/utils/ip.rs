//! Client IP extraction
//!
//! Resolves the requester's address for click telemetry. When the connection
//! comes from a private or loopback address the service is assumed to sit
//! behind a reverse proxy and the forwarded headers are consulted.

use std::net::IpAddr;

use actix_web::HttpRequest;

/// Whether an IP is a private-range or loopback address.
pub fn is_private_or_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback(),
        IpAddr::V6(v6) => {
            // fc00::/7 (ULA), fe80::/10 (link-local), ::1
            v6.is_loopback()
                || (v6.segments()[0] & 0xfe00) == 0xfc00
                || (v6.segments()[0] & 0xffc0) == 0xfe80
        }
    }
}

/// Extract the forwarded client IP from `X-Forwarded-For` (first hop) or
/// `X-Real-IP`.
pub fn extract_forwarded_ip_from_headers(
    headers: &actix_web::http::header::HeaderMap,
) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(String::from)
        })
}

/// Resolve the real client IP for a request.
///
/// Public peer addresses are trusted as-is; private/loopback peers fall back
/// to the forwarded headers when present.
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    match req.peer_addr() {
        Some(peer) => {
            let ip = peer.ip();
            if is_private_or_local(&ip) {
                if let Some(forwarded) = extract_forwarded_ip_from_headers(req.headers()) {
                    return Some(forwarded);
                }
            }
            Some(ip.to_string())
        }
        None => extract_forwarded_ip_from_headers(req.headers()),
    }
}
