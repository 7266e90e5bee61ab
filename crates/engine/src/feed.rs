//! Question feed and skill catalog loading.
//!
//! Layout under the data directory:
//!
//! ```text
//! data/
//!   skills.json              {"<group>": ["<skill>", ...]}
//!   questions/<skill>.json   {"title": "...", "questions": [...]}
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::core::{DuelError, FeedDocument, QuestionFeed};

/// Anything that can hand over a skill's question pool.
pub trait QuestionSource {
    fn load_feed(&self, skill: &str) -> Result<QuestionFeed, DuelError>;
}

impl<F> QuestionSource for F
where
    F: Fn(&str) -> Result<QuestionFeed, DuelError>,
{
    fn load_feed(&self, skill: &str) -> Result<QuestionFeed, DuelError> {
        self(skill)
    }
}

/// Parse a feed document and validate its questions.
pub fn parse_feed(skill: &str, json: &str) -> Result<QuestionFeed, DuelError> {
    let doc: FeedDocument =
        serde_json::from_str(json).map_err(|e| DuelError::FeedUnavailable {
            skill: skill.to_string(),
            reason: e.to_string(),
        })?;
    QuestionFeed::from_document(doc)
}

/// Skill groups and their skill ids, in feed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SkillCatalog {
    groups: BTreeMap<String, Vec<String>>,
}

impl SkillCatalog {
    pub fn skills(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn contains_skill(&self, skill: &str) -> bool {
        self.groups.values().any(|skills| skills.iter().any(|s| s == skill))
    }
}

pub fn parse_catalog(json: &str) -> Result<SkillCatalog, DuelError> {
    serde_json::from_str(json).map_err(|e| DuelError::CatalogUnavailable {
        reason: e.to_string(),
    })
}

fn valid_skill_id(skill: &str) -> bool {
    !skill.is_empty()
        && skill
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Reads feeds from a data directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn feed_path(&self, skill: &str) -> PathBuf {
        self.root.join("questions").join(format!("{}.json", skill))
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join("skills.json")
    }

    pub fn load_catalog(&self) -> Result<SkillCatalog, DuelError> {
        let path = self.catalog_path();
        let json = fs::read_to_string(&path).map_err(|e| DuelError::CatalogUnavailable {
            reason: format!("{}: {}", path.display(), e),
        })?;
        parse_catalog(&json)
    }
}

impl QuestionSource for DirectorySource {
    fn load_feed(&self, skill: &str) -> Result<QuestionFeed, DuelError> {
        if !valid_skill_id(skill) {
            return Err(DuelError::FeedUnavailable {
                skill: skill.to_string(),
                reason: "invalid skill id".to_string(),
            });
        }
        let path = self.feed_path(skill);
        debug!("loading questions from {}", path.display());
        let json = fs::read_to_string(&path).map_err(|e| DuelError::FeedUnavailable {
            skill: skill.to_string(),
            reason: format!("{}: {}", path.display(), e),
        })?;
        parse_feed(skill, &json)
    }
}
