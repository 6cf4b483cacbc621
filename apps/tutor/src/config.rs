//! Runtime configuration from environment variables.

use anyhow::{bail, Context};
use quest_core::DEFAULT_MISTAKE_LIMIT;
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "LINUX_QUEST_DB_PATH";
pub const STORAGE_QUOTA_VAR: &str = "LINUX_QUEST_STORAGE_QUOTA_BYTES";
pub const MISTAKE_LIMIT_VAR: &str = "LINUX_QUEST_MISTAKE_LIMIT";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

/// Roughly what a browser grants one origin's local storage.
pub const DEFAULT_STORAGE_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorConfig {
    pub db_path: PathBuf,
    /// `None` means unlimited.
    pub storage_quota_bytes: Option<u64>,
    pub mistake_limit: usize,
    pub log_filter: String,
}

impl Default for TutorConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            storage_quota_bytes: Some(DEFAULT_STORAGE_QUOTA_BYTES),
            mistake_limit: DEFAULT_MISTAKE_LIMIT,
            log_filter: "info".to_string(),
        }
    }
}

impl TutorConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_PATH_VAR).filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(STORAGE_QUOTA_VAR) {
            let quota: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a byte count, got {:?}", STORAGE_QUOTA_VAR, raw))?;
            config.storage_quota_bytes = (quota > 0).then_some(quota);
        }

        if let Some(raw) = lookup(MISTAKE_LIMIT_VAR) {
            let limit: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer, got {:?}", MISTAKE_LIMIT_VAR, raw))?;
            if limit == 0 {
                bail!("{} must be at least 1", MISTAKE_LIMIT_VAR);
            }
            config.mistake_limit = limit;
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}

/// Use app data directory for production, fallback to current dir.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linux-quest")
        .join("progress.db")
}
