//! Adapter module - identity, score persistence and configuration
//!
//! Everything that talks to the world outside the quiz lives here, behind
//! small traits so the game can run with any combination of them:
//!
//! - [`identity`]: who is playing ([`AnonymousIdentity`], [`LocalIdentity`])
//! - [`store`]: where finished sessions go ([`NullScoreStore`],
//!   [`MemoryScoreStore`], [`JsonFileScoreStore`])
//! - [`service`]: runs store calls off the game loop and reports back
//! - [`config`]: environment-driven [`AppConfig`]
//!
//! Adapter failures are typed ([`StoreError`], [`IdentityError`]) but never
//! reach gameplay: the service logs them and moves on.
//!
//! # Environment Variables
//!
//! - `MATHRUSH_DURATION_SECS`: session length, 30-180 in steps of 10 (default: 60)
//! - `MATHRUSH_SEED`: question seed (default: derived from the clock)
//! - `MATHRUSH_USER`: local display name; unset plays anonymously
//! - `MATHRUSH_SCORES_PATH`: JSON score file
//!   (default: `$HOME/.local/share/tui-mathrush/scores.json`)
//! - `MATHRUSH_PERSIST_DISABLED`: `1`/`true` keeps nothing
//! - `MATHRUSH_LOG_PATH`: log file (default: no logging)

pub mod config;
pub mod error;
pub mod identity;
pub mod service;
pub mod store;

pub use tui_mathrush_types as types;

pub use config::{AppConfig, StoreBackend};
pub use error::{IdentityError, StoreError};
pub use identity::{AnonymousIdentity, IdentityProvider, LocalIdentity};
pub use service::{ScoreService, ScoreUpdate};
pub use store::{JsonFileScoreStore, MemoryScoreStore, NullScoreStore, ScoreStore};
