//! Question data model.
//!
//! Feed documents deserialize into [`QuestionRecord`]s, which are validated
//! into immutable [`Question`]s. The correct choice is stored by value, so
//! reordering the choices never loses track of it.

use serde::{Deserialize, Serialize};

use crate::error::{DuelError, QuestionError};
use crate::rng::GameRng;
use crate::types::{CHOICE_COUNT, DEFAULT_POINTS};

/// One question as it appears in a feed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wave: Option<u8>,
    pub question: String,
    pub choices: Vec<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

/// A skill's question document: a title and a flat list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub title: String,
    pub questions: Vec<QuestionRecord>,
}

/// Validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    id: Option<u32>,
    wave: Option<u8>,
    text: String,
    choices: [String; CHOICE_COUNT],
    answer: String,
    correct: usize,
    points: u32,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        choices: [&str; CHOICE_COUNT],
        answer: impl Into<String>,
        points: u32,
    ) -> Result<Self, QuestionError> {
        Self::validate(
            None,
            None,
            text.into(),
            choices.iter().map(|c| c.to_string()).collect(),
            answer.into(),
            points,
        )
    }

    pub fn with_wave(mut self, wave: u8) -> Self {
        self.wave = Some(wave);
        self
    }

    fn validate(
        id: Option<u32>,
        wave: Option<u8>,
        text: String,
        choices: Vec<String>,
        answer: String,
        points: u32,
    ) -> Result<Self, QuestionError> {
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if points == 0 {
            return Err(QuestionError::ZeroPoints);
        }
        let choices: [String; CHOICE_COUNT] =
            choices
                .try_into()
                .map_err(|v: Vec<String>| QuestionError::WrongChoiceCount {
                    expected: CHOICE_COUNT,
                    found: v.len(),
                })?;
        for (i, choice) in choices.iter().enumerate() {
            if choices[..i].contains(choice) {
                return Err(QuestionError::DuplicateChoice(choice.clone()));
            }
        }
        let correct = choices
            .iter()
            .position(|c| *c == answer)
            .ok_or_else(|| QuestionError::AnswerNotAmongChoices(answer.clone()))?;

        Ok(Self {
            id,
            wave,
            text,
            choices,
            answer,
            correct,
            points,
        })
    }

    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub fn wave(&self) -> Option<u8> {
        self.wave
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn choices(&self) -> &[String; CHOICE_COUNT] {
        &self.choices
    }

    /// Literal text of the correct choice
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Position of the correct choice in the current ordering
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Copy of this question with its choices in a fresh random order.
    pub fn shuffled(&self, rng: &mut GameRng) -> Self {
        let mut choices = self.choices.clone();
        rng.shuffle(&mut choices);
        let correct = choices
            .iter()
            .position(|c| *c == self.answer)
            .unwrap_or(self.correct);
        Self {
            choices,
            correct,
            ..self.clone()
        }
    }
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        Self::validate(
            record.id,
            record.wave,
            record.question,
            record.choices,
            record.answer,
            record.points.unwrap_or(DEFAULT_POINTS),
        )
    }
}

/// A skill's validated question pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionFeed {
    title: String,
    questions: Vec<Question>,
}

impl QuestionFeed {
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            title: title.into(),
            questions,
        }
    }

    /// Validate every record; the first malformed one rejects the feed.
    pub fn from_document(doc: FeedDocument) -> Result<Self, DuelError> {
        let questions = doc
            .questions
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Question::try_from(record)
                    .map_err(|source| DuelError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            title: doc.title,
            questions,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
