//! Terminal presentation for the duel.
//!
//! Renders [`RoundSnapshot`](crate::core::RoundSnapshot)s into a simple
//! framebuffer that is then flushed to the terminal. No widget toolkit; the
//! round engine stays unaware of how it is drawn.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use speed_duel_core as core;
pub use speed_duel_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb, Weight};
pub use game_view::{key_label, GameView, Viewport, FAILED_MESSAGE, SUDDEN_DEATH_LABEL};
pub use renderer::{changed_rows, encode_rows_into, TerminalRenderer};
