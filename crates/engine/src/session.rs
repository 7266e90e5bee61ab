//! Game session - setup, start, rematch and return to setup.
//!
//! A session owns at most one live [`RoundEngine`]. Starting, rematching and
//! leaving all drop the previous engine after cancelling its timers, so a
//! stale feedback window can never fire into a new game.

use log::{info, warn};

use crate::config::GameConfig;
use crate::core::{select_round, DifficultyProfile, DuelError, GameRng, Player, RoundEngine};
use crate::feed::QuestionSource;
use crate::types::{Difficulty, Outcome, PlayerId, DEFAULT_PLAYER_COLORS, DEFAULT_PLAYER_NAMES};

/// Everything the setup screen collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub names: [String; 2],
    pub colors: [String; 2],
    pub skill: String,
    pub difficulty: Difficulty,
}

impl GameSetup {
    pub fn new(skill: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            names: DEFAULT_PLAYER_NAMES.map(String::from),
            colors: DEFAULT_PLAYER_COLORS.map(String::from),
            skill: skill.into(),
            difficulty,
        }
    }

    pub fn with_names(mut self, one: impl Into<String>, two: impl Into<String>) -> Self {
        self.names = [one.into(), two.into()];
        self
    }

    pub fn with_colors(mut self, one: impl Into<String>, two: impl Into<String>) -> Self {
        self.colors = [one.into(), two.into()];
        self
    }

    /// Fresh players; blank names fall back to "Player 1" / "Player 2".
    pub fn players(&self) -> [Player; 2] {
        PlayerId::ALL.map(|p| {
            let i = p.index();
            let name = self.names[i].trim();
            let name = if name.is_empty() {
                DEFAULT_PLAYER_NAMES[i]
            } else {
                name
            };
            Player::new(name, self.colors[i].as_str())
        })
    }
}

/// Log line for a round being dropped. Only an unfinished round is abandoned.
fn exit_summary(round: &RoundEngine) -> String {
    match round.outcome() {
        Some(Outcome::Winner(p)) => {
            format!("left finished round won by {}", round.player(p).name())
        }
        Some(Outcome::Tie) => "left finished round (tie)".to_string(),
        None => format!(
            "round abandoned at question {} of {}",
            round.current_index() + 1,
            round.question_count()
        ),
    }
}

pub struct Session<S> {
    source: S,
    config: GameConfig,
    rng: GameRng,
    last_setup: Option<GameSetup>,
    title: Option<String>,
    round: Option<RoundEngine>,
}

impl<S: QuestionSource> Session<S> {
    pub fn new(source: S, config: GameConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        info!("session seed {}", rng.seed());
        Self {
            source,
            config,
            rng,
            last_setup: None,
            title: None,
            round: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Start a game. On failure the session is back at setup with no round.
    pub fn start(&mut self, setup: GameSetup) -> Result<&mut RoundEngine, DuelError> {
        self.back_to_setup();

        let feed = self.source.load_feed(&setup.skill).inspect_err(|e| {
            warn!("could not start {}: {}", setup.skill, e);
        })?;
        let profile = DifficultyProfile::from(setup.difficulty);
        let round = select_round(
            feed.questions(),
            &profile,
            self.config.shortfall,
            &mut self.rng,
        )?;

        info!(
            "starting {} ({}) on {}",
            feed.title(),
            setup.difficulty.as_str(),
            setup.skill
        );
        let engine = RoundEngine::new(setup.players(), round, self.config.rules);
        self.title = Some(feed.title().to_string());
        self.last_setup = Some(setup);
        Ok(self.round.insert(engine))
    }

    /// Replay the last setup with freshly drawn questions and zeroed scores.
    pub fn rematch(&mut self) -> Result<&mut RoundEngine, DuelError> {
        let setup = self.last_setup.clone().ok_or(DuelError::NoPreviousGame)?;
        self.start(setup)
    }

    /// Abandon the current round, cancelling its pending windows.
    pub fn back_to_setup(&mut self) {
        if let Some(mut round) = self.round.take() {
            round.cancel_timers();
            info!("{}", exit_summary(&round));
        }
        self.title = None;
    }

    pub fn round(&self) -> Option<&RoundEngine> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut RoundEngine> {
        self.round.as_mut()
    }

    /// Title of the skill being played
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn last_setup(&self) -> Option<&GameSetup> {
        self.last_setup.as_ref()
    }
}
