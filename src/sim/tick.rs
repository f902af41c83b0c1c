//! Per-frame tick
//!
//! The host calls `tick` once per display refresh with a monotonic clock.

use super::session::SessionController;
use super::state::GamePhase;

/// Input commands collected since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim left (-1) or right (+1)
    pub steer: Option<i32>,
    /// Fire the rocket (up/enter/tap)
    pub launch: bool,
    /// Continue from the feedback screen (space/tap)
    pub advance: bool,
}

impl SessionController {
    /// Advance the session by one frame
    pub fn tick(&mut self, input: &TickInput, now_ms: f64) {
        // Background keeps moving in every phase, including Loading/Finished
        self.stars.advance();
        self.effects.advance();

        if let Some(direction) = input.steer {
            self.move_selection(direction);
        }
        if input.launch {
            self.launch();
        }
        if input.advance {
            self.advance_after_feedback();
        }

        if self.auto_advance.take_due(now_ms) && self.phase == GamePhase::Feedback {
            log::debug!("Feedback timed out, advancing");
            self.leave_feedback();
        }

        match self.phase {
            GamePhase::Flying => {
                if self.rocket.advance_flight() {
                    self.on_arrival(now_ms);
                }
            }
            GamePhase::Playing => {
                self.rocket.hover(now_ms);
                self.aim_rocket();
            }
            _ => {}
        }
    }
}
