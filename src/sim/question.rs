//! Question records and the question bank
//!
//! Raw JSON is validated record by record; a bad record is dropped with a
//! warning and the rest of the bank survives.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::SLOT_COUNT;
use crate::error::{DataLoadError, QuestionError};
use crate::settings::DrawPolicy;

/// A validated multiple-choice question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    /// Prompt text, may contain `$...$` formulas
    pub prompt: String,
    pub answers: [String; SLOT_COUNT],
    pub correct_index: usize,
    pub explanation: String,
}

/// Question record as it arrives on the wire
#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(alias = "question")]
    prompt: String,
    answers: Vec<String>,
    #[serde(alias = "correctAnswer", alias = "correct")]
    correct_index: i64,
    #[serde(default)]
    explanation: String,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        answers: [&str; SLOT_COUNT],
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            answers: answers.map(String::from),
            correct_index,
            explanation: explanation.into(),
        }
    }

    /// Validate one JSON record
    pub fn from_value(index: usize, value: serde_json::Value) -> Result<Self, QuestionError> {
        let raw: RawQuestion =
            serde_json::from_value(value).map_err(|e| QuestionError::Shape {
                index,
                reason: e.to_string(),
            })?;

        let found = raw.answers.len();
        let answers: [String; SLOT_COUNT] =
            raw.answers
                .try_into()
                .map_err(|_| QuestionError::AnswerCount {
                    index,
                    expected: SLOT_COUNT,
                    found,
                })?;

        let correct_index = usize::try_from(raw.correct_index)
            .ok()
            .filter(|&i| i < SLOT_COUNT)
            .ok_or(QuestionError::CorrectIndex {
                index,
                correct: raw.correct_index,
            })?;

        Ok(Self {
            prompt: raw.prompt,
            answers,
            correct_index,
            explanation: raw.explanation,
        })
    }
}

/// The loaded question set plus draw bookkeeping
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    policy: DrawPolicy,
    cap: Option<u32>,
    /// Shuffled draw order (Shuffled policy only)
    order: Vec<usize>,
    /// Questions handed out so far
    drawn: u32,
    /// Records dropped during load
    rejected: usize,
}

impl QuestionBank {
    /// Build a bank from already-validated questions
    pub fn new(
        questions: Vec<Question>,
        policy: DrawPolicy,
        cap: Option<u32>,
        rng: &mut impl Rng,
    ) -> Result<Self, DataLoadError> {
        if questions.is_empty() {
            return Err(DataLoadError::Empty { rejected: 0 });
        }
        let mut order: Vec<usize> = (0..questions.len()).collect();
        if policy == DrawPolicy::Shuffled {
            order.shuffle(rng);
        }
        Ok(Self {
            questions,
            policy,
            cap,
            order,
            drawn: 0,
            rejected: 0,
        })
    }

    /// Parse and validate a JSON array of question records
    pub fn load(
        raw: &str,
        policy: DrawPolicy,
        cap: Option<u32>,
        rng: &mut impl Rng,
    ) -> Result<Self, DataLoadError> {
        let records: Vec<serde_json::Value> =
            serde_json::from_str(raw).map_err(|e| DataLoadError::Parse(e.to_string()))?;

        let mut rejected = 0;
        let questions: Vec<Question> = records
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match Question::from_value(i, value) {
                Ok(q) => Some(q),
                Err(e) => {
                    log::warn!("Skipping malformed question: {}", e);
                    rejected += 1;
                    None
                }
            })
            .collect();

        if questions.is_empty() {
            return Err(DataLoadError::Empty { rejected });
        }

        let mut bank = Self::new(questions, policy, cap, rng)?;
        bank.rejected = rejected;
        log::info!(
            "Loaded {} questions ({} skipped), policy {}, session length {:?}",
            bank.size(),
            rejected,
            policy.as_str(),
            bank.session_length()
        );
        Ok(bank)
    }

    /// Number of playable questions
    pub fn size(&self) -> usize {
        self.questions.len()
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn drawn(&self) -> u32 {
        self.drawn
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Questions this session will ask, `None` if endless
    pub fn session_length(&self) -> Option<u32> {
        let size = self.questions.len() as u32;
        match self.policy {
            DrawPolicy::Random => self.cap,
            DrawPolicy::Shuffled => Some(self.cap.map_or(size, |cap| cap.min(size))),
        }
    }

    /// Whether another question may be drawn
    pub fn has_more(&self) -> bool {
        self.session_length().is_none_or(|len| self.drawn < len)
    }

    /// Draw the next question's index, or `None` once the session is used up
    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<usize> {
        if !self.has_more() {
            return None;
        }
        let index = match self.policy {
            DrawPolicy::Random => rng.random_range(0..self.questions.len()),
            DrawPolicy::Shuffled => self.order[self.drawn as usize],
        };
        self.drawn += 1;
        Some(index)
    }

    /// Draw the next question
    pub fn next(&mut self, rng: &mut impl Rng) -> Option<&Question> {
        let index = self.draw(rng)?;
        self.questions.get(index)
    }
}
