//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the quiz rules: picking a round's questions and
//! resolving two players' answers against them. It has **zero dependencies**
//! on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the same round
//! - **Testable**: Time only moves when [`RoundEngine::tick`] is called
//! - **Portable**: Can run behind any presentation (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`question`]: validated questions and feed documents
//! - [`selector`]: wave-based sampling of a 10-question round
//! - [`round`]: the answer-resolution and round-progression state machine
//! - [`snapshot`]: read-only state for renderers
//! - [`rng`]: seeded Fisher-Yates shuffling
//! - [`error`]: feed and selection errors
//!
//! # Game Rules
//!
//! - **Scoring**: `+points` for a correct answer, `-points` for a wrong one
//! - **Retry**: a wrong option is disabled; the player may try again after the feedback window
//! - **Three wrong**: the third distinct wrong option fails the question for both players
//! - **Sudden death**: a level score after the last question adds one extra question
//!
//! # Example
//!
//! ```
//! use speed_duel_core::{Player, Question, Round, RoundEngine, RoundRules, SubmitOutcome};
//! use speed_duel_types::{GameStatus, PlayerId, FEEDBACK_WINDOW_MS};
//!
//! let q = Question::new("6 x 7", ["42", "36", "48", "49"], "42", 10).unwrap();
//! let round = Round::new(vec![q], None);
//! let players = [Player::new("Ada", "blue"), Player::new("Bo", "green")];
//! let mut engine = RoundEngine::new(players, round, RoundRules::default());
//!
//! assert_eq!(engine.submit(PlayerId::Two, 0), SubmitOutcome::Correct { points: 10 });
//! engine.tick(FEEDBACK_WINDOW_MS);
//!
//! assert_eq!(engine.status(), GameStatus::Finished);
//! assert_eq!(engine.scores(), [0, 10]);
//! ```

pub mod error;
pub mod question;
pub mod rng;
pub mod round;
pub mod selector;
pub mod snapshot;

pub use speed_duel_types as types;

pub use error::{DuelError, QuestionError};
pub use question::{FeedDocument, Question, QuestionFeed, QuestionRecord};
pub use rng::GameRng;
pub use round::{
    AnswerResult, IgnoreReason, Player, Resolution, RoundEngine, RoundEvent, RoundRules,
    SubmitOutcome,
};
pub use selector::{select_round, DifficultyProfile, Round, ShortfallPolicy};
pub use snapshot::{OptionState, PlayerSnapshot, QuestionSnapshot, RoundSnapshot, TimersSnapshot};
