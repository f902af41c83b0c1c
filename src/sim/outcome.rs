//! Answer evaluation and scoring

use rand::Rng;
use serde::Serialize;

use super::question::Question;

/// Result of comparing the aimed slot with the correct answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

/// Crew member shown delivering the feedback (resolved to art by the host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CrewMember {
    Man,
    Woman,
    Person,
}

impl CrewMember {
    pub const ALL: [CrewMember; 3] = [CrewMember::Man, CrewMember::Woman, CrewMember::Person];

    pub fn pick(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Feedback panel content for one resolved question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub verdict: Verdict,
    pub explanation: String,
    pub crew: CrewMember,
}

/// Running score for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionScore {
    pub points_earned: u32,
    pub questions_asked: u32,
    /// Points per correct answer
    pub reward: u32,
}

impl SessionScore {
    pub fn new(reward: u32) -> Self {
        Self {
            points_earned: 0,
            questions_asked: 0,
            reward,
        }
    }

    /// Best possible score for the questions asked so far
    pub fn total_possible(&self) -> u32 {
        self.questions_asked.saturating_mul(self.reward)
    }

    /// Rounded percentage, 0 when nothing was asked
    pub fn percent(&self) -> u32 {
        let total = self.total_possible();
        if total == 0 {
            return 0;
        }
        (self.points_earned as f64 / total as f64 * 100.0).round() as u32
    }
}

/// Judges arrivals and keeps the score.
///
/// Each question is resolved at most once: a second evaluation before the
/// next question is armed returns `None` and leaves the score untouched.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeEvaluator {
    score: SessionScore,
    /// True between arming a question and resolving it
    pending: bool,
}

impl OutcomeEvaluator {
    pub fn new(reward: u32) -> Self {
        Self {
            score: SessionScore::new(reward),
            pending: false,
        }
    }

    pub fn score(&self) -> SessionScore {
        self.score
    }

    /// A new question is on screen and may be resolved once
    pub fn arm(&mut self) {
        self.pending = true;
    }

    /// Resolve the current question
    pub fn evaluate(&mut self, selected: usize, question: &Question) -> Option<Verdict> {
        if !self.pending {
            log::warn!("Ignoring repeated evaluation of an already resolved question");
            return None;
        }
        self.pending = false;

        let verdict = if selected == question.correct_index {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };

        self.score.questions_asked = self.score.questions_asked.saturating_add(1);
        if verdict.is_correct() {
            self.score.points_earned = self.score.points_earned.saturating_add(self.score.reward);
        }
        log::info!(
            "Answer {} is {:?}: {}/{} points after {} questions",
            selected,
            verdict,
            self.score.points_earned,
            self.score.total_possible(),
            self.score.questions_asked
        );
        Some(verdict)
    }
}
