//! trimmrr - URL shortening service core
//!
//! Shortens long URLs into compact codes, serves 302 redirects for them
//! and records per-click analytics (date, browser, country, referrer) for
//! the link owner.

pub mod api;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
