//! Session layer - everything between the setup screen and the round engine.
//!
//! - [`config`]: environment-driven [`GameConfig`]
//! - [`feed`]: question feeds and the skill catalog, read from a data directory
//! - [`session`]: game start, rematch and return to setup
//!
//! # Environment Variables
//!
//! - `SPEED_DUEL_DATA_DIR`: data root (default: "data")
//! - `SPEED_DUEL_FEEDBACK_MS` / `SPEED_DUEL_FAILED_MS`: feedback windows
//! - `SPEED_DUEL_THREE_WRONG_RULE`: set to "0" or "false" to allow unlimited retries
//! - `SPEED_DUEL_TIE_BREAK`: "sudden-death" or "draw"
//! - `SPEED_DUEL_SHORTFALL`: "abort" or "take-available"
//! - `SPEED_DUEL_SEED`: reproducible question draws

pub mod config;
pub mod feed;
pub mod session;

pub use speed_duel_core as core;
pub use speed_duel_types as types;

pub use config::GameConfig;
pub use feed::{parse_catalog, parse_feed, DirectorySource, QuestionSource, SkillCatalog};
pub use session::{GameSetup, Session};
