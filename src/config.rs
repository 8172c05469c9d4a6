use std::{env, path::PathBuf, str::FromStr};

use tracing::warn;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
    pub log_dir: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_protected_per_min: u32,
    pub rate_tools_per_min: u32,

    // Payload limits
    pub max_attachment_bytes: usize,
    pub max_json_bytes: usize,
}

/// Reads `key`, falling back to `default` when unset or unparsable.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Invalid value in environment, using default");
            default
        }),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Self {
        let data_file = env::var("DATA_FILE").unwrap_or_else(|_| "data/attendance.json".to_string());

        Self {
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            data_file: (!data_file.trim().is_empty()).then(|| PathBuf::from(data_file.trim())),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api".to_string()),

            rate_protected_per_min: env_or("RATE_PROTECTED_PER_MIN", 1000),
            rate_tools_per_min: env_or("RATE_TOOLS_PER_MIN", 120),

            max_attachment_bytes: env_or("MAX_ATTACHMENT_BYTES", 5 * 1024 * 1024),
            // backups and base64 attachments travel as JSON bodies
            max_json_bytes: env_or("MAX_JSON_BYTES", 32 * 1024 * 1024),
        }
    }
}
