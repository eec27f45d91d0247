//! Application configuration
//!
//! Configuration is read once from the environment at startup (a `.env` file
//! is honored via dotenvy) and held in a process-wide `OnceCell`. Components
//! receive what they need through constructors; nothing reads the environment
//! after startup.

use std::env;

use once_cell::sync::OnceCell;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Base domain used to synthesize `fullShortUrl`, without trailing slash
    pub base_domain: String,
    /// Storage backend: "memory" or "file"
    pub storage_backend: String,
    pub storage_file_path: String,
    pub jwt_secret: String,
    pub log_level: String,
    /// Optional log file; empty or unset means stdout
    pub log_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_domain: env::var("BASE_DOMAIN")
                .unwrap_or_else(|_| "https://trimmrr.in".to_string())
                .trim_end_matches('/')
                .to_string(),
            storage_backend: env::var("STORAGE_BACKEND").unwrap_or_else(|_| "memory".to_string()),
            storage_file_path: env::var("STORAGE_FILE_PATH")
                .unwrap_or_else(|_| "trimmrr.links.json".to_string()),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "trimmrr-dev-secret".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_file: env::var("LOG_FILE").ok().filter(|f| !f.is_empty()),
        }
    }
}

/// Initialize the global configuration from the environment.
///
/// Safe to call more than once; later calls return the existing instance.
pub fn init_config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Get the global configuration.
///
/// # Panics
/// Panics if `init_config` has not been called.
pub fn get_config() -> &'static Config {
    CONFIG.get().expect("config not initialized")
}
