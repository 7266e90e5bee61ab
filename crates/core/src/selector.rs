//! Question bank selector - builds a round from a skill's question pool
//!
//! Questions are grouped by wave and drawn per the difficulty profile:
//! each wave is Fisher-Yates shuffled and the first N questions taken.
//! Output keeps wave order (all wave-1 picks, then wave-2, ...), and every
//! picked question gets its own choice shuffle.
//!
//! One extra question is set aside as the sudden-death reserve, drawn from
//! the highest wave that still has unused questions.

use log::{info, warn};

use crate::error::DuelError;
use crate::question::Question;
use crate::rng::GameRng;
use crate::types::{Difficulty, WAVE_COUNT};

/// Questions to draw from each wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DifficultyProfile {
    waves: [usize; WAVE_COUNT],
}

impl DifficultyProfile {
    pub fn new(waves: [usize; WAVE_COUNT]) -> Self {
        Self { waves }
    }

    /// Draw count for a wave (1-based)
    pub fn count(&self, wave: u8) -> usize {
        wave_slot(wave).map_or(0, |i| self.waves[i])
    }

    pub fn counts(&self) -> &[usize; WAVE_COUNT] {
        &self.waves
    }

    pub fn total(&self) -> usize {
        self.waves.iter().sum()
    }
}

impl From<Difficulty> for DifficultyProfile {
    fn from(difficulty: Difficulty) -> Self {
        Self::new(difficulty.wave_counts())
    }
}

/// What to do when a wave cannot supply its share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShortfallPolicy {
    /// Refuse to build the round.
    #[default]
    Abort,
    /// Take whatever the wave has and play a shorter round.
    TakeAvailable,
}

impl ShortfallPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "abort" | "strict" => Some(ShortfallPolicy::Abort),
            "take-available" | "take_available" | "lenient" => {
                Some(ShortfallPolicy::TakeAvailable)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShortfallPolicy::Abort => "abort",
            ShortfallPolicy::TakeAvailable => "take-available",
        }
    }
}

/// Questions for one game, in play order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub questions: Vec<Question>,
    /// Extra question played if the regular round ends level.
    pub reserve: Option<Question>,
}

impl Round {
    pub fn new(questions: Vec<Question>, reserve: Option<Question>) -> Self {
        Self { questions, reserve }
    }
}

fn wave_slot(wave: u8) -> Option<usize> {
    let slot = usize::from(wave).checked_sub(1)?;
    (slot < WAVE_COUNT).then_some(slot)
}

/// Sample a round from `pool`.
///
/// Questions without a wave, or with a wave outside 1-5, are never drawn.
pub fn select_round(
    pool: &[Question],
    profile: &DifficultyProfile,
    policy: ShortfallPolicy,
    rng: &mut GameRng,
) -> Result<Round, DuelError> {
    let mut waves: [Vec<&Question>; WAVE_COUNT] = Default::default();
    for question in pool {
        if let Some(slot) = question.wave().and_then(wave_slot) {
            waves[slot].push(question);
        }
    }

    // Check every wave before drawing anything.
    for (slot, bucket) in waves.iter().enumerate() {
        let requested = profile.waves[slot];
        if bucket.len() >= requested {
            continue;
        }
        let wave = (slot + 1) as u8;
        match policy {
            ShortfallPolicy::Abort => {
                return Err(DuelError::InsufficientQuestions {
                    wave,
                    requested,
                    available: bucket.len(),
                });
            }
            ShortfallPolicy::TakeAvailable => {
                warn!(
                    "wave {} has {} question(s), {} requested; playing short",
                    wave,
                    bucket.len(),
                    requested
                );
            }
        }
    }

    let mut questions = Vec::with_capacity(profile.total());
    for (slot, bucket) in waves.iter_mut().enumerate() {
        let take = profile.waves[slot].min(bucket.len());
        if take == 0 {
            continue;
        }
        rng.shuffle(bucket);
        for question in bucket.drain(..take) {
            questions.push(question.shuffled(rng));
        }
    }

    let reserve = waves
        .iter()
        .rev()
        .find(|bucket| !bucket.is_empty())
        .map(|bucket| bucket[rng.next_range(bucket.len())].shuffled(rng));

    info!(
        "selected {} question(s) from {} in pool (reserve: {})",
        questions.len(),
        pool.len(),
        if reserve.is_some() { "yes" } else { "none" }
    );

    Ok(Round { questions, reserve })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(per_wave: usize) -> Vec<Question> {
        let mut out = Vec::new();
        for wave in 1..=WAVE_COUNT as u8 {
            for n in 0..per_wave {
                let text = format!("w{} q{}", wave, n);
                let q = Question::new(text, ["a", "b", "c", "d"], "c", wave as u32)
                    .unwrap()
                    .with_wave(wave);
                out.push(q);
            }
        }
        out
    }

    #[test]
    fn test_profile_counts() {
        let p = DifficultyProfile::from(Difficulty::Hard);
        assert_eq!(p.count(1), 1);
        assert_eq!(p.count(5), 3);
        assert_eq!(p.count(0), 0);
        assert_eq!(p.count(6), 0);
        assert_eq!(p.total(), 10);
    }

    #[test]
    fn test_output_is_wave_ascending() {
        let mut rng = GameRng::new(11);
        let round = select_round(
            &pool(4),
            &Difficulty::Hard.into(),
            ShortfallPolicy::Abort,
            &mut rng,
        )
        .unwrap();

        let waves: Vec<u8> = round.questions.iter().filter_map(|q| q.wave()).collect();
        assert_eq!(waves, vec![1, 2, 3, 3, 4, 4, 4, 5, 5, 5]);
    }

    #[test]
    fn test_no_question_drawn_twice() {
        let mut rng = GameRng::new(5);
        let round = select_round(
            &pool(3),
            &Difficulty::Medium.into(),
            ShortfallPolicy::Abort,
            &mut rng,
        )
        .unwrap();
        let mut texts: Vec<&str> = round.questions.iter().map(|q| q.text()).collect();
        if let Some(r) = &round.reserve {
            texts.push(r.text());
        }
        let total = texts.len();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), total);
    }

    #[test]
    fn test_abort_on_shortfall() {
        let mut rng = GameRng::new(5);
        let err = select_round(
            &pool(2),
            &Difficulty::Easy.into(),
            ShortfallPolicy::Abort,
            &mut rng,
        )
        .unwrap_err();
        match err {
            DuelError::InsufficientQuestions {
                wave,
                requested,
                available,
            } => {
                assert_eq!((wave, requested, available), (1, 3, 2));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_take_available_plays_short() {
        let mut rng = GameRng::new(5);
        let round = select_round(
            &pool(2),
            &Difficulty::Easy.into(),
            ShortfallPolicy::TakeAvailable,
            &mut rng,
        )
        .unwrap();
        // 2 + 2 + 2 + 1 + 0
        assert_eq!(round.questions.len(), 7);
    }

    #[test]
    fn test_reserve_comes_from_highest_wave_with_leftovers() {
        let mut rng = GameRng::new(8);
        // Hard uses every wave-5 question when the pool has exactly 3 per wave.
        let round = select_round(
            &pool(3),
            &Difficulty::Hard.into(),
            ShortfallPolicy::Abort,
            &mut rng,
        )
        .unwrap();
        assert_eq!(round.reserve.as_ref().and_then(|q| q.wave()), Some(3));
    }

    #[test]
    fn test_no_reserve_when_pool_exhausted() {
        let mut rng = GameRng::new(8);
        let profile = DifficultyProfile::new([2, 2, 2, 2, 2]);
        let round =
            select_round(&pool(2), &profile, ShortfallPolicy::Abort, &mut rng).unwrap();
        assert_eq!(round.questions.len(), 10);
        assert!(round.reserve.is_none());
    }

    #[test]
    fn test_unwaved_questions_are_ignored() {
        let mut questions = pool(2);
        questions.push(Question::new("loose", ["a", "b", "c", "d"], "a", 1).unwrap());
        questions.push(
            Question::new("wave 9", ["a", "b", "c", "d"], "a", 1)
                .unwrap()
                .with_wave(9),
        );
        let mut rng = GameRng::new(1);
        let round = select_round(
            &questions,
            &Difficulty::Medium.into(),
            ShortfallPolicy::Abort,
            &mut rng,
        )
        .unwrap();
        assert!(round.questions.iter().all(|q| q.wave().is_some()));
        assert!(round.reserve.is_none());
    }

    #[test]
    fn test_same_seed_same_round() {
        let questions = pool(5);
        let a = select_round(
            &questions,
            &Difficulty::Medium.into(),
            ShortfallPolicy::Abort,
            &mut GameRng::new(77),
        )
        .unwrap();
        let b = select_round(
            &questions,
            &Difficulty::Medium.into(),
            ShortfallPolicy::Abort,
            &mut GameRng::new(77),
        )
        .unwrap();
        assert_eq!(a, b);
    }
}
