//! Session phase, events, timers and the render snapshot

use serde::Serialize;

use super::effects::{Particle, Star};
use super::outcome::{Feedback, SessionScore, Verdict};
use super::rocket::RocketState;
use super::selection::{AnswerSlot, Viewport};
use crate::markup::Segment;
use crate::report::SessionReport;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Waiting for question data (or stuck here after a load failure)
    Loading,
    /// Aiming, rocket hovering on the pad
    Playing,
    /// Rocket in flight toward the chosen answer
    Flying,
    /// Verdict and explanation on screen
    Feedback,
    /// Session over, no further input accepted
    Finished,
}

/// Notable things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionEvent {
    QuestionPresented { index: usize, number: u32 },
    Launched { slot: usize },
    Arrived { verdict: Verdict, score: SessionScore },
    Finished(SessionReport),
    LoadFailed(String),
}

/// Single-shot, cancellable deadline on the host's millisecond clock
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScheduledTask {
    due_ms: Option<f64>,
}

impl ScheduledTask {
    pub fn schedule(&mut self, due_ms: f64) {
        self.due_ms = Some(due_ms);
    }

    pub fn cancel(&mut self) {
        self.due_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due_ms.is_some()
    }

    /// Fire at most once: true the first time `now_ms` reaches the deadline
    pub fn take_due(&mut self, now_ms: f64) -> bool {
        match self.due_ms {
            Some(due) if now_ms >= due => {
                self.due_ms = None;
                true
            }
            _ => false,
        }
    }
}

/// Read-only view of everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub viewport: Viewport,
    pub rocket: &'a RocketState,
    pub slots: &'a [AnswerSlot],
    pub selected: usize,
    pub particles: &'a [Particle],
    pub stars: &'a [Star],
    pub score: SessionScore,
    pub prompt: Option<&'a str>,
    /// Prompt split into plain text and formulas
    pub prompt_segments: Vec<Segment<'a>>,
    pub feedback: Option<&'a Feedback>,
    /// Feedback explanation split the same way
    pub explanation_segments: Vec<Segment<'a>>,
    pub load_error: Option<String>,
    pub report: Option<SessionReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_fires_once() {
        let mut task = ScheduledTask::default();
        assert!(!task.take_due(1e9));

        task.schedule(1000.0);
        assert!(task.is_pending());
        assert!(!task.take_due(999.0));
        assert!(task.take_due(1000.0));
        assert!(!task.take_due(2000.0));
        assert!(!task.is_pending());
    }

    #[test]
    fn test_cancelled_task_never_fires() {
        let mut task = ScheduledTask::default();
        task.schedule(10.0);
        task.cancel();
        assert!(!task.take_due(100.0));
    }
}
