//! Round engine - answer resolution and round progression
//!
//! Owns the scores, the current question and every feedback window. All
//! mutation goes through [`RoundEngine::submit`] (a player pressed an answer
//! key) and [`RoundEngine::tick`] (time passed).
//!
//! Per question:
//!
//! - **Correct**: `+points`, then the question-level resolution window opens
//!   and the question advances when it closes.
//! - **Incorrect**: `-points`, the option is disabled and only that player
//!   waits out a retry window before answering again.
//! - **Third wrong option** (when the three-wrong rule is on): no score change,
//!   every option locks, and the question advances after the failed window.
//!
//! While a resolution window is open, submissions are ignored. The one
//! exception is the batch in which the window opened: until any time has
//! elapsed, the other player's answer still counts, so two players pressing
//! in the same instant are both scored.

use arrayvec::ArrayVec;
use log::{debug, info, warn};

use crate::question::Question;
use crate::selector::Round;
use crate::snapshot::{OptionState, PlayerSnapshot, QuestionSnapshot, RoundSnapshot, TimersSnapshot};
use crate::types::{
    GameStatus, Outcome, PlayerId, TieBreak, CHOICE_COUNT, FAILED_WINDOW_MS, FEEDBACK_WINDOW_MS,
    MAX_DISABLED_OPTIONS,
};

/// A contestant. Identity is the seat, not the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    color: String,
    score: i32,
}

impl Player {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            score: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque color tag for presentation
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn score(&self) -> i32 {
        self.score
    }
}

/// Tunable round rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRules {
    /// Window after an individual answer
    pub feedback_ms: u32,
    /// Window after every wrong option has been used up
    pub failed_ms: u32,
    /// Fail the question on its third distinct wrong option
    pub three_wrong_rule: bool,
    pub tie_break: TieBreak,
}

impl Default for RoundRules {
    fn default() -> Self {
        Self {
            feedback_ms: FEEDBACK_WINDOW_MS,
            failed_ms: FAILED_WINDOW_MS,
            three_wrong_rule: true,
            tie_break: TieBreak::SuddenDeath,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerResult {
    Correct,
    Incorrect,
}

/// Why a submission was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    Finished,
    Resolving,
    OptionOutOfRange,
    OptionDisabled,
    AlreadySelected,
    /// Timers were cancelled; the round is being torn down.
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitOutcome {
    Correct { points: u32 },
    Incorrect { points: u32 },
    /// Third wrong option: question fails, nobody scores.
    Failed,
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    pub fn accepted(&self) -> bool {
        !matches!(self, SubmitOutcome::Ignored(_))
    }
}

/// Transitions fired by [`RoundEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundEvent {
    /// A player's retry window closed; they may answer again.
    RetryUnlocked(PlayerId),
    Advanced { index: usize },
    /// The round ended level and the extra question is now current.
    SuddenDeath { index: usize },
    Finished(Outcome),
}

/// How the current question was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Answered,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ResolutionWindow {
    kind: Resolution,
    remaining_ms: u32,
    elapsed_ms: u32,
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct RoundEngine {
    players: [Player; 2],
    questions: Vec<Question>,
    reserve: Option<Question>,
    rules: RoundRules,
    current: usize,
    selections: [Option<usize>; 2],
    last_result: [Option<AnswerResult>; 2],
    disabled: [bool; CHOICE_COUNT],
    locked: bool,
    status: GameStatus,
    outcome: Option<Outcome>,
    retry_ms: [Option<u32>; 2],
    resolution: Option<ResolutionWindow>,
    abandoned: bool,
}

impl RoundEngine {
    pub fn new(players: [Player; 2], round: Round, rules: RoundRules) -> Self {
        let mut engine = Self {
            players,
            questions: round.questions,
            reserve: round.reserve,
            rules,
            current: 0,
            selections: [None; 2],
            last_result: [None; 2],
            disabled: [false; CHOICE_COUNT],
            locked: false,
            status: GameStatus::Playing,
            outcome: None,
            retry_ms: [None; 2],
            resolution: None,
            abandoned: false,
        };
        if engine.questions.is_empty() {
            warn!("round started without questions");
            engine.finish(Outcome::from_scores(engine.scores()));
        } else {
            info!(
                "round started: {} vs {}, {} question(s)",
                engine.players[0].name,
                engine.players[1].name,
                engine.questions.len()
            );
        }
        engine
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// `None` once the game is finished.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player.index()]
    }

    pub fn scores(&self) -> [i32; 2] {
        [self.players[0].score, self.players[1].score]
    }

    pub fn selection(&self, player: PlayerId) -> Option<usize> {
        self.selections[player.index()]
    }

    pub fn is_disabled(&self, option: usize) -> bool {
        self.locked || self.disabled.get(option).copied().unwrap_or(true)
    }

    /// Options confirmed wrong for the current question (never the correct one)
    pub fn disabled_options(&self) -> impl Iterator<Item = usize> + '_ {
        self.disabled
            .iter()
            .enumerate()
            .filter_map(|(i, &d)| d.then_some(i))
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution.map(|w| w.kind)
    }

    /// True once [`cancel_timers`](Self::cancel_timers) has run.
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    pub fn has_pending_timers(&self) -> bool {
        self.resolution.is_some() || self.retry_ms.iter().any(Option::is_some)
    }

    fn disabled_count(&self) -> usize {
        self.disabled.iter().filter(|&&d| d).count()
    }

    fn ignore_reason(&self, player: PlayerId, option: usize) -> Option<IgnoreReason> {
        if self.status.is_finished() {
            return Some(IgnoreReason::Finished);
        }
        if self.abandoned {
            return Some(IgnoreReason::Abandoned);
        }
        if let Some(window) = self.resolution {
            if window.kind == Resolution::Failed || window.elapsed_ms > 0 {
                return Some(IgnoreReason::Resolving);
            }
        }
        if option >= CHOICE_COUNT {
            return Some(IgnoreReason::OptionOutOfRange);
        }
        if self.locked || self.disabled[option] {
            return Some(IgnoreReason::OptionDisabled);
        }
        if self.selections[player.index()].is_some() {
            return Some(IgnoreReason::AlreadySelected);
        }
        None
    }

    /// A player pressed the key for `option`.
    ///
    /// Submissions that break a precondition change nothing and come back as
    /// [`SubmitOutcome::Ignored`].
    pub fn submit(&mut self, player: PlayerId, option: usize) -> SubmitOutcome {
        if let Some(reason) = self.ignore_reason(player, option) {
            debug!("ignored {:?} option {}: {:?}", player, option, reason);
            return SubmitOutcome::Ignored(reason);
        }
        let Some(question) = self.questions.get(self.current) else {
            return SubmitOutcome::Ignored(IgnoreReason::Finished);
        };

        let points = question.points();
        let correct = question.is_correct(option);
        let same_instant = self.resolution.is_some();
        let p = player.index();

        if correct {
            self.selections[p] = Some(option);
            self.last_result[p] = Some(AnswerResult::Correct);
            self.players[p].score = self.players[p].score.saturating_add_unsigned(points);
            self.retry_ms[p] = None;
            if !same_instant {
                self.open_resolution(Resolution::Answered, self.rules.feedback_ms);
            }
            debug!("{:?} answered correctly (+{})", player, points);
            return SubmitOutcome::Correct { points };
        }

        if self.rules.three_wrong_rule
            && !same_instant
            && self.disabled_count() >= MAX_DISABLED_OPTIONS
        {
            self.locked = true;
            self.retry_ms = [None; 2];
            self.open_resolution(Resolution::Failed, self.rules.failed_ms);
            info!("question {} failed, no points awarded", self.current + 1);
            return SubmitOutcome::Failed;
        }

        self.selections[p] = Some(option);
        self.last_result[p] = Some(AnswerResult::Incorrect);
        self.players[p].score = self.players[p].score.saturating_sub_unsigned(points);
        self.disabled[option] = true;
        if !same_instant {
            self.retry_ms[p] = Some(self.rules.feedback_ms);
        }
        debug!("{:?} answered incorrectly (-{})", player, points);
        SubmitOutcome::Incorrect { points }
    }

    fn open_resolution(&mut self, kind: Resolution, duration_ms: u32) {
        self.resolution = Some(ResolutionWindow {
            kind,
            remaining_ms: duration_ms,
            elapsed_ms: 0,
        });
    }

    /// Advance the feedback windows by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) -> ArrayVec<RoundEvent, 4> {
        let mut events = ArrayVec::<RoundEvent, 4>::new();
        if self.status.is_finished() || self.abandoned {
            return events;
        }

        if let Some(mut window) = self.resolution {
            window.elapsed_ms = window.elapsed_ms.saturating_add(elapsed_ms);
            window.remaining_ms = window.remaining_ms.saturating_sub(elapsed_ms);
            if window.remaining_ms == 0 {
                self.resolution = None;
                self.advance(&mut events);
            } else {
                self.resolution = Some(window);
            }
            return events;
        }

        for player in PlayerId::ALL {
            let p = player.index();
            let Some(ms) = self.retry_ms[p] else {
                continue;
            };
            let left = ms.saturating_sub(elapsed_ms);
            if left == 0 {
                self.retry_ms[p] = None;
                self.selections[p] = None;
                self.last_result[p] = None;
                let _ = events.try_push(RoundEvent::RetryUnlocked(player));
            } else {
                self.retry_ms[p] = Some(left);
            }
        }

        events
    }

    /// Drop every pending window without firing it.
    ///
    /// Used when the round is abandoned: afterwards every submission is
    /// ignored and `tick` is a no-op, so the engine will not advance again.
    pub fn cancel_timers(&mut self) {
        if self.has_pending_timers() {
            debug!("cancelling pending feedback windows");
        }
        self.resolution = None;
        self.retry_ms = [None; 2];
        self.abandoned = true;
    }

    fn clear_question_state(&mut self) {
        self.selections = [None; 2];
        self.last_result = [None; 2];
        self.disabled = [false; CHOICE_COUNT];
        self.locked = false;
        self.retry_ms = [None; 2];
    }

    fn advance(&mut self, events: &mut ArrayVec<RoundEvent, 4>) {
        self.clear_question_state();
        let next = self.current + 1;

        if next < self.questions.len() {
            self.current = next;
            debug!("advanced to question {}", next + 1);
            let _ = events.try_push(RoundEvent::Advanced { index: next });
            return;
        }

        let outcome = Outcome::from_scores(self.scores());
        if outcome == Outcome::Tie
            && self.status == GameStatus::Playing
            && self.rules.tie_break == TieBreak::SuddenDeath
        {
            if let Some(extra) = self.reserve.take() {
                self.questions.push(extra);
                self.current = next;
                self.status = GameStatus::SuddenDeath;
                info!("scores level at {}, sudden death", self.players[0].score);
                let _ = events.try_push(RoundEvent::SuddenDeath { index: next });
                return;
            }
            warn!("scores level but no question left for sudden death");
        }

        self.current = next;
        self.finish(outcome);
        let _ = events.try_push(RoundEvent::Finished(outcome));
    }

    fn finish(&mut self, outcome: Outcome) {
        self.current = self.questions.len();
        self.status = GameStatus::Finished;
        self.outcome = Some(outcome);
        self.resolution = None;
        self.retry_ms = [None; 2];
        match outcome {
            Outcome::Winner(p) => info!(
                "game finished: {} wins {} to {}",
                self.players[p.index()].name,
                self.players[p.index()].score,
                self.players[p.other().index()].score
            ),
            Outcome::Tie => info!("game finished level at {}", self.players[0].score),
        }
    }

    /// Fill `out` with the current state, reusing its allocations.
    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.index = self.current;
        out.total = self.questions.len();
        out.status = self.status;
        out.outcome = self.outcome;
        out.resolution = self.resolution.map(|w| w.kind);

        match (self.current_question(), out.question.as_mut()) {
            (Some(q), Some(snap)) => snap.update_from(q),
            (Some(q), None) => out.question = Some(QuestionSnapshot::from(q)),
            (None, _) => out.question = None,
        }

        let revealed = match self.resolution {
            Some(ResolutionWindow {
                kind: Resolution::Answered,
                ..
            }) => self.current_question().map(Question::correct_index),
            _ => None,
        };
        out.revealed = revealed;

        for (i, state) in out.options.iter_mut().enumerate() {
            *state = if self.locked {
                OptionState::Locked
            } else if self.disabled[i] {
                OptionState::Disabled
            } else {
                OptionState::Open
            };
        }

        for player in PlayerId::ALL {
            let p = player.index();
            let src = &self.players[p];
            let dst: &mut PlayerSnapshot = &mut out.players[p];
            dst.name.clone_from(&src.name);
            dst.color.clone_from(&src.color);
            dst.score = src.score;
            dst.selection = self.selections[p];
            dst.last_result = self.last_result[p];
        }

        out.timers = TimersSnapshot {
            resolution_ms: self.resolution.map_or(0, |w| w.remaining_ms),
            retry_ms: [
                self.retry_ms[0].unwrap_or(0),
                self.retry_ms[1].unwrap_or(0),
            ],
        };
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
