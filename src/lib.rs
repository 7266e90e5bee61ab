//! Speed Duel (workspace facade crate).
//!
//! Re-exports the `speed_duel::{core,engine,input,term,types}` public API;
//! the implementation lives in dedicated crates under `crates/`.

pub use speed_duel_core as core;
pub use speed_duel_engine as engine;
pub use speed_duel_input as input;
pub use speed_duel_term as term;
pub use speed_duel_types as types;
