//! High-score stores.
//!
//! A store assigns `created_at` when a result is saved and answers top-N
//! queries per (user, mode), highest score first. Equal scores keep the
//! earlier entry first.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::{GameMode, HighScoreEntry, SessionResult};

/// On-disk format version of [`JsonFileScoreStore`].
pub const SCORE_FILE_VERSION: u32 = 1;

/// Persistence for finished sessions.
pub trait ScoreStore: Send + Sync {
    fn save_result(
        &self,
        user_id: &str,
        result: &SessionResult,
    ) -> Result<HighScoreEntry, StoreError>;

    fn top_scores(
        &self,
        user_id: &str,
        mode: GameMode,
        limit: usize,
    ) -> Result<Vec<HighScoreEntry>, StoreError>;
}

fn new_entry(user_id: &str, result: &SessionResult) -> Result<HighScoreEntry, StoreError> {
    if user_id.is_empty() {
        return Err(StoreError::InvalidUser(user_id.to_string()));
    }
    Ok(HighScoreEntry {
        mode: result.mode,
        score: result.score,
        accuracy: result.accuracy,
        level: result.level,
        created_at: Utc::now(),
    })
}

/// Highest scores first; the stable sort keeps insertion order on ties.
fn rank<'a>(
    entries: impl Iterator<Item = &'a HighScoreEntry>,
    mode: GameMode,
    limit: usize,
) -> Vec<HighScoreEntry> {
    let mut ranked: Vec<HighScoreEntry> = entries.filter(|e| e.mode == mode).cloned().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

/// Acknowledges saves without keeping anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScoreStore;

impl ScoreStore for NullScoreStore {
    fn save_result(
        &self,
        user_id: &str,
        result: &SessionResult,
    ) -> Result<HighScoreEntry, StoreError> {
        new_entry(user_id, result)
    }

    fn top_scores(
        &self,
        _user_id: &str,
        _mode: GameMode,
        _limit: usize,
    ) -> Result<Vec<HighScoreEntry>, StoreError> {
        Ok(Vec::new())
    }
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    entries: Mutex<HashMap<String, Vec<HighScoreEntry>>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn save_result(
        &self,
        user_id: &str,
        result: &SessionResult,
    ) -> Result<HighScoreEntry, StoreError> {
        let entry = new_entry(user_id, result)?;
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries
            .entry(user_id.to_string())
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    fn top_scores(
        &self,
        user_id: &str,
        mode: GameMode,
        limit: usize,
    ) -> Result<Vec<HighScoreEntry>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries
            .get(user_id)
            .map(|list| rank(list.iter(), mode, limit))
            .unwrap_or_default())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ScoreFile {
    version: u32,
    #[serde(default)]
    entries: Vec<StoredEntry>,
}

impl Default for ScoreFile {
    fn default() -> Self {
        Self {
            version: SCORE_FILE_VERSION,
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    user_id: String,
    #[serde(flatten)]
    entry: HighScoreEntry,
}

/// Versioned JSON document on disk.
///
/// Every save rewrites the whole document through a temp file in the same
/// directory followed by a rename, so readers never see a partial file.
#[derive(Debug)]
pub struct JsonFileScoreStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<ScoreFile, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ScoreFile::default()),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let file: ScoreFile = serde_json::from_str(&text)?;
        if file.version != SCORE_FILE_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: file.version,
                expected: SCORE_FILE_VERSION,
            });
        }
        Ok(file)
    }

    fn write(&self, file: &ScoreFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(file)?;

        let tmp_path = self.path.with_extension("json.tmp");
        replace_via(&tmp_path, &self.path, json.as_bytes()).inspect_err(|_| {
            let _ = fs::remove_file(&tmp_path);
        })
    }
}

/// Write `bytes` to `tmp_path`, sync, then rename over `path`.
fn replace_via(tmp_path: &Path, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut tmp_file = File::create(tmp_path).map_err(|e| StoreError::io(tmp_path, e))?;
    tmp_file
        .write_all(bytes)
        .and_then(|()| tmp_file.sync_all())
        .map_err(|e| StoreError::io(tmp_path, e))?;
    drop(tmp_file);

    fs::rename(tmp_path, path).map_err(|e| StoreError::io(path, e))
}

impl ScoreStore for JsonFileScoreStore {
    fn save_result(
        &self,
        user_id: &str,
        result: &SessionResult,
    ) -> Result<HighScoreEntry, StoreError> {
        let entry = new_entry(user_id, result)?;
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;

        let mut file = self.load()?;
        file.entries.push(StoredEntry {
            user_id: user_id.to_string(),
            entry: entry.clone(),
        });
        self.write(&file)?;
        Ok(entry)
    }

    fn top_scores(
        &self,
        user_id: &str,
        mode: GameMode,
        limit: usize,
    ) -> Result<Vec<HighScoreEntry>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let file = self.load()?;
        Ok(rank(
            file.entries
                .iter()
                .filter(|s| s.user_id == user_id)
                .map(|s| &s.entry),
            mode,
            limit,
        ))
    }
}
