//! Game configuration, read from environment variables.

use std::path::PathBuf;

use crate::core::{RoundRules, ShortfallPolicy};
use crate::types::TieBreak;

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Directory holding `skills.json` and `questions/<skill>.json`
    pub data_dir: PathBuf,
    pub rules: RoundRules,
    pub shortfall: ShortfallPolicy,
    /// Fixed seed for reproducible rounds; entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            rules: RoundRules::default(),
            shortfall: ShortfallPolicy::default(),
            seed: None,
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl GameConfig {
    /// Build from the process environment.
    ///
    /// - `SPEED_DUEL_DATA_DIR`: question data root (default: "data")
    /// - `SPEED_DUEL_FEEDBACK_MS`: answer feedback window (default: 2500)
    /// - `SPEED_DUEL_FAILED_MS`: failed-question window (default: 2500)
    /// - `SPEED_DUEL_THREE_WRONG_RULE`: "0"/"false" disables the rule
    /// - `SPEED_DUEL_TIE_BREAK`: "sudden-death" (default) or "draw"
    /// - `SPEED_DUEL_SHORTFALL`: "abort" (default) or "take-available"
    /// - `SPEED_DUEL_SEED`: fixed RNG seed
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_dir = lookup("SPEED_DUEL_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let feedback_ms = lookup("SPEED_DUEL_FEEDBACK_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.rules.feedback_ms);
        let failed_ms = lookup("SPEED_DUEL_FAILED_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.rules.failed_ms);
        let three_wrong_rule = lookup("SPEED_DUEL_THREE_WRONG_RULE")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.rules.three_wrong_rule);
        let tie_break = lookup("SPEED_DUEL_TIE_BREAK")
            .and_then(|v| TieBreak::from_str(&v))
            .unwrap_or(defaults.rules.tie_break);
        let shortfall = lookup("SPEED_DUEL_SHORTFALL")
            .and_then(|v| ShortfallPolicy::from_str(&v))
            .unwrap_or(defaults.shortfall);
        let seed = lookup("SPEED_DUEL_SEED").and_then(|v| v.trim().parse().ok());

        Self {
            data_dir,
            rules: RoundRules {
                feedback_ms,
                failed_ms,
                three_wrong_rule,
                tie_break,
            },
            shortfall,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = GameConfig::from_lookup(|_| None);
        assert_eq!(config, GameConfig::default());
        assert!(config.rules.three_wrong_rule);
        assert_eq!(config.rules.tie_break, TieBreak::SuddenDeath);
    }

    #[test]
    fn test_overrides() {
        let config = GameConfig::from_lookup(lookup_from(&[
            ("SPEED_DUEL_DATA_DIR", "/srv/quiz"),
            ("SPEED_DUEL_FEEDBACK_MS", "400"),
            ("SPEED_DUEL_FAILED_MS", "900"),
            ("SPEED_DUEL_THREE_WRONG_RULE", "false"),
            ("SPEED_DUEL_TIE_BREAK", "draw"),
            ("SPEED_DUEL_SHORTFALL", "take-available"),
            ("SPEED_DUEL_SEED", "42"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/quiz"));
        assert_eq!(config.rules.feedback_ms, 400);
        assert_eq!(config.rules.failed_ms, 900);
        assert!(!config.rules.three_wrong_rule);
        assert_eq!(config.rules.tie_break, TieBreak::Draw);
        assert_eq!(config.shortfall, ShortfallPolicy::TakeAvailable);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_garbage_falls_back() {
        let config = GameConfig::from_lookup(lookup_from(&[
            ("SPEED_DUEL_FEEDBACK_MS", "soon"),
            ("SPEED_DUEL_THREE_WRONG_RULE", "maybe"),
            ("SPEED_DUEL_SEED", "-1"),
        ]));
        assert_eq!(config.rules.feedback_ms, RoundRules::default().feedback_ms);
        assert!(config.rules.three_wrong_rule);
        assert_eq!(config.seed, None);
    }
}
