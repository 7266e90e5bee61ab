//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (round engine, question selection, terminal rendering).
//!
//! # Round Shape
//!
//! - **Players**: exactly 2, identified by seat ([`PlayerId::One`], [`PlayerId::Two`])
//! - **Choices**: 4 per question
//! - **Round length**: 10 questions, plus 1 sudden-death question on a tie
//! - **Waves**: questions are tiered into waves 1-5
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FEEDBACK_WINDOW_MS` | 2500 | Feedback shown after an answer |
//! | `FAILED_WINDOW_MS` | 2500 | Feedback shown when every wrong option is used up |
//!
//! # Difficulty Profiles
//!
//! Draw counts per wave (1-5):
//!
//! | Difficulty | Waves |
//! |------------|-------|
//! | Easy | 3-3-3-1-0 |
//! | Medium | 2-2-2-2-2 |
//! | Hard | 1-1-2-3-3 |
//!
//! # Examples
//!
//! ```
//! use speed_duel_types::{Difficulty, PlayerId, CHOICE_COUNT};
//!
//! let difficulty = Difficulty::from_str("HARD").unwrap();
//! assert_eq!(difficulty.wave_counts(), [1, 1, 2, 3, 3]);
//!
//! assert_eq!(PlayerId::One.other(), PlayerId::Two);
//! assert_eq!(PlayerId::Two.index(), 1);
//! assert_eq!(CHOICE_COUNT, 4);
//! ```

/// Number of answer choices per question
pub const CHOICE_COUNT: usize = 4;

/// Number of regular questions in a round
pub const ROUND_LENGTH: usize = 10;

/// Number of difficulty waves (numbered 1..=WAVE_COUNT)
pub const WAVE_COUNT: usize = 5;

/// Wrong options that may be disabled before the question fails
pub const MAX_DISABLED_OPTIONS: usize = CHOICE_COUNT - 2;

/// Points a question is worth when the feed does not say
pub const DEFAULT_POINTS: u32 = 1;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Feedback window after an individual answer
pub const FEEDBACK_WINDOW_MS: u32 = 2500;

/// Feedback window after a question fails (all wrong options exhausted)
pub const FAILED_WINDOW_MS: u32 = 2500;

/// Default display names when setup leaves a name blank
pub const DEFAULT_PLAYER_NAMES: [&str; 2] = ["Player 1", "Player 2"];

/// Default color tags
pub const DEFAULT_PLAYER_COLORS: [&str; 2] = ["blue", "green"];

/// Player one answer keys, in option order
pub const PLAYER_ONE_KEYS: [char; CHOICE_COUNT] = ['q', 'w', 'e', 'r'];

/// Player two answer keys, in option order
pub const PLAYER_TWO_KEYS: [char; CHOICE_COUNT] = ['u', 'i', 'o', 'p'];

/// Positional player identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Seat index (0 or 1)
    pub fn index(&self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerId::One),
            1 => Some(PlayerId::Two),
            _ => None,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Answer keys bound to this seat
    pub fn keys(&self) -> &'static [char; CHOICE_COUNT] {
        match self {
            PlayerId::One => &PLAYER_ONE_KEYS,
            PlayerId::Two => &PLAYER_TWO_KEYS,
        }
    }
}

/// A routed answer attempt: which player pressed which option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Submission {
    pub player: PlayerId,
    pub option: usize,
}

impl Submission {
    pub fn new(player: PlayerId, option: usize) -> Self {
        Self { player, option }
    }
}

/// Difficulty levels offered at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Questions drawn from each wave, wave 1 first
    pub fn wave_counts(&self) -> [usize; WAVE_COUNT] {
        match self {
            Difficulty::Easy => [3, 3, 3, 1, 0],
            Difficulty::Medium => [2, 2, 2, 2, 2],
            Difficulty::Hard => [1, 1, 2, 3, 3],
        }
    }
}

/// Round progression state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    SuddenDeath,
    Finished,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::SuddenDeath => "sudden-death",
            GameStatus::Finished => "finished",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Finished)
    }
}

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(PlayerId),
    Tie,
}

impl Outcome {
    /// Compare two final scores
    pub fn from_scores(scores: [i32; 2]) -> Self {
        match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => Outcome::Winner(PlayerId::One),
            std::cmp::Ordering::Less => Outcome::Winner(PlayerId::Two),
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            Outcome::Winner(p) => Some(*p),
            Outcome::Tie => None,
        }
    }
}

/// What happens when the regular round ends level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TieBreak {
    /// Play one extra question; any result after it ends the game.
    #[default]
    SuddenDeath,
    /// End immediately as a tie.
    Draw,
}

impl TieBreak {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sudden-death" | "suddendeath" | "sudden_death" => Some(TieBreak::SuddenDeath),
            "draw" | "tie" => Some(TieBreak::Draw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::SuddenDeath => "sudden-death",
            TieBreak::Draw => "draw",
        }
    }
}
