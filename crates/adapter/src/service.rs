//! Score service runtime integration.
//!
//! Bridges the sync game loop with blocking store calls. Work runs on a
//! private tokio runtime and results come back over a channel that the loop
//! polls with [`ScoreService::try_recv`]; nothing here ever blocks a frame.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::store::ScoreStore;
use crate::types::{GameMode, HighScoreEntry, SessionResult, TOP_SCORES_LIMIT};

/// Completed store call delivered to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreUpdate {
    Saved(HighScoreEntry),
    TopScores {
        mode: GameMode,
        entries: Vec<HighScoreEntry>,
    },
}

/// Running score service instance.
pub struct ScoreService {
    rt: Runtime,
    store: Arc<dyn ScoreStore>,
    update_tx: mpsc::UnboundedSender<ScoreUpdate>,
    update_rx: mpsc::UnboundedReceiver<ScoreUpdate>,
    /// Saves not yet known to have finished
    saves: Vec<JoinHandle<()>>,
}

impl ScoreService {
    pub fn new(store: Arc<dyn ScoreStore>) -> anyhow::Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("mathrush-scores")
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        Ok(Self {
            rt,
            store,
            update_tx,
            update_rx,
            saves: Vec::new(),
        })
    }

    /// Save a finished session for `user_id`, then refresh that mode's top scores.
    pub fn submit(&mut self, user_id: &str, result: SessionResult) {
        let store = Arc::clone(&self.store);
        let tx = self.update_tx.clone();
        let user_id = user_id.to_string();

        self.saves.retain(|handle| !handle.is_finished());
        let handle = self.rt.spawn_blocking(move || {
            match store.save_result(&user_id, &result) {
                Ok(entry) => {
                    log::info!(
                        "saved {} score {} for {}",
                        entry.mode.as_str(),
                        entry.score,
                        user_id
                    );
                    let _ = tx.send(ScoreUpdate::Saved(entry));
                }
                Err(err) => {
                    log::warn!("failed to save result for {}: {}", user_id, err);
                    return;
                }
            }
            send_top_scores(store.as_ref(), &tx, &user_id, result.mode);
        });
        self.saves.push(handle);
    }

    /// Fetch the top scores of `user_id` in `mode`.
    pub fn request_top_scores(&self, user_id: &str, mode: GameMode) {
        let store = Arc::clone(&self.store);
        let tx = self.update_tx.clone();
        let user_id = user_id.to_string();

        self.rt.spawn_blocking(move || {
            send_top_scores(store.as_ref(), &tx, &user_id, mode);
        });
    }

    /// Stop the runtime, giving in-flight saves up to `timeout` to land.
    pub fn shutdown(self, timeout: Duration) {
        let saves = self.saves;
        let waited = self.rt.block_on(async move {
            tokio::time::timeout(timeout, async move {
                for handle in saves {
                    let _ = handle.await;
                }
            })
            .await
        });
        if waited.is_err() {
            log::warn!("gave up waiting for pending score saves");
        }
        self.rt.shutdown_background();
    }

    pub fn try_recv(&mut self) -> Option<ScoreUpdate> {
        self.update_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next update (shutdown and tests).
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<ScoreUpdate> {
        let rx = &mut self.update_rx;
        self.rt
            .block_on(async { tokio::time::timeout(timeout, rx.recv()).await })
            .ok()
            .flatten()
    }
}

fn send_top_scores(
    store: &dyn ScoreStore,
    tx: &mpsc::UnboundedSender<ScoreUpdate>,
    user_id: &str,
    mode: GameMode,
) {
    match store.top_scores(user_id, mode, TOP_SCORES_LIMIT) {
        Ok(entries) => {
            let _ = tx.send(ScoreUpdate::TopScores { mode, entries });
        }
        Err(err) => log::warn!(
            "failed to load {} top scores for {}: {}",
            mode.as_str(),
            user_id,
            err
        ),
    }
}
