//! Rocket Quiz - steer a rocket into the right answer
//!
//! Core modules:
//! - `sim`: Game loop and state machine (questions, aiming, flight, scoring, effects)
//! - `settings`: Session configuration
//! - `report`: Final score reporting for LMS/host collaborators
//! - `source`: Question data providers
//! - `markup`: Math-markup span splitting for the typesetting collaborator

pub mod error;
pub mod markup;
pub mod report;
pub mod settings;
pub mod sim;
pub mod source;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{DataLoadError, QuestionError, SettingsError};
pub use report::{LogReporter, ProgressReporter, SessionReport};
pub use settings::{DrawPolicy, Settings};

use glam::Vec2;

/// Layout and motion constants
pub mod consts {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    /// Number of answer slots (left, center, right)
    pub const SLOT_COUNT: usize = 3;
    /// Slot the selection resets to for every question
    pub const CENTER_SLOT: usize = 1;

    /// Answer slot box size
    pub const SLOT_WIDTH: f32 = 130.0;
    pub const SLOT_HEIGHT: f32 = 50.0;
    /// Slot row top edge as a fraction of viewport height
    pub const SLOT_ROW_FRACTION: f32 = 0.35;

    /// Rocket glyph size (square)
    pub const ROCKET_SIZE: f32 = 50.0;
    /// Distance from the bottom edge to the rocket center when idle
    pub const LAUNCH_PAD_OFFSET: f32 = 140.0 - ROCKET_SIZE / 2.0;

    /// The rocket glyph is drawn pointing 45° clockwise of "up"
    pub const GLYPH_ROTATION: f32 = -FRAC_PI_4;
    /// Added to `atan2(dy, dx)` so that 0 rad means "nose up" for the glyph
    pub const HEADING_OFFSET: f32 = FRAC_PI_2 + GLYPH_ROTATION;

    /// Idle hover bob
    pub const HOVER_AMPLITUDE: f32 = 4.0;
    pub const HOVER_PERIOD_MS: f64 = 400.0;
}

/// Heading for a glyph travelling along `delta`
#[inline]
pub fn heading_toward(delta: Vec2) -> f32 {
    delta.y.atan2(delta.x) + consts::HEADING_OFFSET
}

/// Vertical hover offset at the given wall-clock time
#[inline]
pub fn hover_offset(now_ms: f64) -> f32 {
    ((now_ms / consts::HOVER_PERIOD_MS).sin() as f32) * consts::HOVER_AMPLITUDE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn test_heading_straight_up() {
        // Screen y grows downward, so "up" is -y
        let heading = heading_toward(Vec2::new(0.0, -10.0));
        // atan2(-10, 0) = -π/2, plus π/4
        assert!((heading + FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn test_hover_bounded() {
        for t in 0..1000 {
            let y = hover_offset(t as f64 * 16.7);
            assert!(y.abs() <= consts::HOVER_AMPLITUDE);
        }
        assert_eq!(hover_offset(0.0), 0.0);
    }
}
