//! Error types for question loading and round selection.
//!
//! Late or invalid answer submissions are not errors; the round engine
//! reports them as [`crate::round::SubmitOutcome::Ignored`].

use thiserror::Error;

/// Why a single feed record could not become a [`crate::Question`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,
    #[error("expected {expected} choices, found {found}")]
    WrongChoiceCount { expected: usize, found: usize },
    #[error("choice {0:?} appears more than once")]
    DuplicateChoice(String),
    #[error("answer {0:?} is not one of the choices")]
    AnswerNotAmongChoices(String),
    #[error("points must be positive")]
    ZeroPoints,
}

#[derive(Debug, Error)]
pub enum DuelError {
    /// The skill's question document could not be read or parsed.
    #[error("questions for skill {skill:?} are unavailable: {reason}")]
    FeedUnavailable { skill: String, reason: String },

    /// The skill catalog could not be read or parsed.
    #[error("skill catalog is unavailable: {reason}")]
    CatalogUnavailable { reason: String },

    /// A question in an otherwise readable feed is malformed.
    #[error("question #{index} is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },

    /// A wave holds fewer questions than the difficulty profile asks for.
    #[error("wave {wave} has {available} question(s), {requested} requested")]
    InsufficientQuestions {
        wave: u8,
        requested: usize,
        available: usize,
    },

    #[error("unknown difficulty {0:?}")]
    UnknownDifficulty(String),

    #[error("no previous game to rematch")]
    NoPreviousGame,
}
