//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework beyond the
//! key event type. It maps `crossterm` key events from the two fixed key
//! groups into [`crate::types::Submission`]s. It does not debounce: repeated
//! presses are forwarded as-is and the round engine decides what counts.

pub mod map;

pub use speed_duel_types as types;

pub use map::{is_back_key, is_rematch_key, route_char, route_key, should_quit};
