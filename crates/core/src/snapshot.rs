//! Read-only view of a round for renderers.

use crate::question::Question;
use crate::round::{AnswerResult, Resolution};
use crate::types::{GameStatus, Outcome, PlayerId, CHOICE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptionState {
    #[default]
    Open,
    /// Confirmed wrong for this question.
    Disabled,
    /// Question failed; nothing can be picked.
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionSnapshot {
    pub text: String,
    pub choices: [String; CHOICE_COUNT],
    pub points: u32,
    pub wave: Option<u8>,
}

impl QuestionSnapshot {
    pub(crate) fn update_from(&mut self, q: &Question) {
        self.text.clear();
        self.text.push_str(q.text());
        for (dst, src) in self.choices.iter_mut().zip(q.choices()) {
            dst.clone_from(src);
        }
        self.points = q.points();
        self.wave = q.wave();
    }
}

impl From<&Question> for QuestionSnapshot {
    fn from(q: &Question) -> Self {
        let mut s = Self::default();
        s.update_from(q);
        s
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerSnapshot {
    pub name: String,
    pub color: String,
    pub score: i32,
    /// Option picked for the current question, while it is on display
    pub selection: Option<usize>,
    pub last_result: Option<AnswerResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    pub resolution_ms: u32,
    pub retry_ms: [u32; 2],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub index: usize,
    pub total: usize,
    /// `None` once the game is finished
    pub question: Option<QuestionSnapshot>,
    pub players: [PlayerSnapshot; 2],
    pub options: [OptionState; CHOICE_COUNT],
    /// Correct option, shown while an answered question is on display
    pub revealed: Option<usize>,
    pub resolution: Option<Resolution>,
    pub status: GameStatus,
    pub outcome: Option<Outcome>,
    pub timers: TimersSnapshot,
}

impl RoundSnapshot {
    pub fn playable(&self) -> bool {
        !self.status.is_finished() && self.resolution.is_none()
    }

    pub fn failed(&self) -> bool {
        self.resolution == Some(Resolution::Failed)
    }

    pub fn player(&self, player: PlayerId) -> &PlayerSnapshot {
        &self.players[player.index()]
    }

    /// Which players have `option` selected right now
    pub fn selected_by(&self, option: usize) -> [bool; 2] {
        [
            self.players[0].selection == Some(option),
            self.players[1].selection == Some(option),
        ]
    }
}

impl Default for RoundSnapshot {
    fn default() -> Self {
        Self {
            index: 0,
            total: 0,
            question: None,
            players: Default::default(),
            options: [OptionState::Open; CHOICE_COUNT],
            revealed: None,
            resolution: None,
            status: GameStatus::Playing,
            outcome: None,
            timers: TimersSnapshot::default(),
        }
    }
}
