//! Application configuration from environment variables.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::identity::{AnonymousIdentity, IdentityProvider, LocalIdentity};
use crate::store::{JsonFileScoreStore, MemoryScoreStore, NullScoreStore, ScoreStore};
use crate::types::{clamp_duration_ms, DEFAULT_DURATION_MS};

/// Which [`ScoreStore`] to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Null,
    Memory,
    JsonFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Session length, already clamped and snapped
    pub duration_ms: u32,
    pub seed: u64,
    /// Display name of the local player; `None` plays anonymously
    pub user: Option<String>,
    pub store: StoreBackend,
    /// Log file; logging is off without one since the terminal owns stderr
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            seed: 1,
            user: None,
            store: StoreBackend::Memory,
            log_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let duration_ms = var("MATHRUSH_DURATION_SECS")
            .and_then(|s| s.parse::<u32>().ok())
            .map(|secs| clamp_duration_ms(secs.saturating_mul(1000)))
            .unwrap_or(DEFAULT_DURATION_MS);

        let seed = var("MATHRUSH_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(seed_from_clock);

        let persist_disabled = var("MATHRUSH_PERSIST_DISABLED")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let store = if persist_disabled {
            StoreBackend::Null
        } else if let Some(path) = var("MATHRUSH_SCORES_PATH") {
            StoreBackend::JsonFile(PathBuf::from(path))
        } else if let Some(home) = var("HOME") {
            StoreBackend::JsonFile(
                PathBuf::from(home)
                    .join(".local")
                    .join("share")
                    .join("tui-mathrush")
                    .join("scores.json"),
            )
        } else {
            StoreBackend::Memory
        };

        Self {
            duration_ms,
            seed,
            user: var("MATHRUSH_USER"),
            store,
            log_path: var("MATHRUSH_LOG_PATH").map(PathBuf::from),
        }
    }

    pub fn build_store(&self) -> Arc<dyn ScoreStore> {
        match &self.store {
            StoreBackend::Null => Arc::new(NullScoreStore),
            StoreBackend::Memory => Arc::new(MemoryScoreStore::new()),
            StoreBackend::JsonFile(path) => Arc::new(JsonFileScoreStore::new(path.clone())),
        }
    }

    pub fn build_identity(&self) -> Box<dyn IdentityProvider> {
        match &self.user {
            Some(name) => Box::new(LocalIdentity::with_user(name)),
            None => Box::new(AnonymousIdentity),
        }
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
