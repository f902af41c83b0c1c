//! Score reporting
//!
//! The core computes the numbers; delivering them to an LMS or any other
//! host service is the reporter's job.

use serde::{Deserialize, Serialize};

use crate::sim::SessionScore;

/// Final result of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    pub final_score: u32,
    pub total_possible: u32,
    /// Rounded, 0-100
    pub percent: u32,
    pub passed: bool,
}

impl SessionReport {
    /// Build the report; `pass_threshold` is the minimum passing percentage
    pub fn new(score: &SessionScore, pass_threshold: u32) -> Self {
        let percent = score.percent();
        Self {
            final_score: score.points_earned,
            total_possible: score.total_possible(),
            percent,
            passed: percent >= pass_threshold,
        }
    }
}

/// Receives progress from the host loop
pub trait ProgressReporter {
    /// Called after every resolved question with the running score
    fn record_progress(&mut self, _score: &SessionScore) {}

    /// Called exactly once when the session finishes
    fn finish(&mut self, report: &SessionReport);
}

/// Reporter that writes to the log
#[derive(Debug, Default)]
pub struct LogReporter {
    pub last: Option<SessionReport>,
}

impl ProgressReporter for LogReporter {
    fn record_progress(&mut self, score: &SessionScore) {
        log::info!(
            "Progress: {} points after {} questions",
            score.points_earned,
            score.questions_asked
        );
    }

    fn finish(&mut self, report: &SessionReport) {
        log::info!(
            "Session finished: {}/{} ({}%) {}",
            report.final_score,
            report.total_possible,
            report.percent,
            if report.passed { "passed" } else { "failed" }
        );
        self.last = Some(*report);
    }
}
