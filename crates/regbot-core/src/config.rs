use std::{
    env,
    path::{Path, PathBuf},
};

use crate::{errors::Error, Result};

/// Default SQLite file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "bot_data.db";

/// Typed configuration, built once at startup and passed to the components
/// that need it.
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_env_file(Path::new(".env"));
        Self::from_lookup(env_str)
    }

    /// Build the config from an arbitrary key lookup (the process environment
    /// in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .and_then(non_empty)
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        let database_path = lookup("DATABASE_PATH")
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        Ok(Self {
            telegram_bot_token: telegram_bot_token.trim().to_string(),
            database_path,
        })
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Load `KEY=value` pairs from `path` into the process environment.
/// Variables that are already set win over the file.
fn load_env_file(path: &Path) {
    match dotenvy::from_path(path) {
        Ok(()) => tracing::debug!("loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("failed to read {}: {e}", path.display()),
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
