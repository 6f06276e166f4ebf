use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::export::ExportSettings;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub rust_log: String,
    /// Key-value file backing the template store.
    pub store_path: PathBuf,
    pub export_settle_ms: u64,
    pub export_min_width_px: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            rust_log: "info".to_string(),
            store_path: PathBuf::from("./data/cv-studio.json"),
            export_settle_ms: 500,
            export_min_width_px: 850,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            bind_addr: parse_env("BIND_ADDR", defaults.bind_addr)
                .context("BIND_ADDR must be an IP address")?,
            port: parse_env("PORT", defaults.port).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            store_path: std::env::var("CV_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            export_settle_ms: parse_env("EXPORT_SETTLE_MS", defaults.export_settle_ms)
                .context("EXPORT_SETTLE_MS must be a whole number of milliseconds")?,
            export_min_width_px: parse_env("EXPORT_MIN_WIDTH_PX", defaults.export_min_width_px)
                .context("EXPORT_MIN_WIDTH_PX must be a whole number of pixels")?,
        })
    }

    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            settle_delay: Duration::from_millis(self.export_settle_ms),
            min_width_px: self.export_min_width_px as f32,
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value '{raw}' for environment variable '{key}'")),
        Err(_) => Ok(default),
    }
}
