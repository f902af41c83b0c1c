//! Session settings
//!
//! Every tunable that differed between deployments of the game (pass mark,
//! how questions are drawn, how many are asked) lives here rather than in code.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Largest accepted per-question reward
pub const MAX_REWARD: u32 = 1000;

/// How the next question is picked from the bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DrawPolicy {
    /// Uniform pick from the whole bank on every draw (repeats possible)
    Random,
    /// Bank shuffled once, then consumed in order without repeats
    #[default]
    Shuffled,
}

impl DrawPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawPolicy::Random => "Random",
            DrawPolicy::Shuffled => "Shuffled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "random" | "replace" => Some(DrawPolicy::Random),
            "shuffled" | "sequential" => Some(DrawPolicy::Shuffled),
            _ => None,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scoring ===
    /// Points for a correct answer
    pub reward: u32,
    /// Minimum percentage (0-100) that counts as passed
    pub pass_threshold: u32,

    // === Question progression ===
    pub draw_policy: DrawPolicy,
    /// Questions per session. `None` exhausts the bank (Shuffled) or runs
    /// forever (Random).
    pub question_cap: Option<u32>,
    /// Delay before feedback advances on its own
    pub feedback_delay_ms: f64,

    // === Rocket ===
    /// Units per tick
    pub rocket_speed: f32,
    /// Arrival distance
    pub arrival_tolerance: f32,

    // === Effects ===
    pub burst_size: usize,
    /// Max magnitude of each particle velocity component
    pub particle_spread: f32,
    /// Life lost per tick
    pub particle_decay: f32,
    pub star_count: usize,

    /// RNG seed (draws, particles, stars, mascot). `None` lets the host
    /// pick one.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reward: 10,
            pass_threshold: 50,

            draw_policy: DrawPolicy::Shuffled,
            question_cap: Some(20),
            feedback_delay_ms: 4000.0,

            rocket_speed: 15.0,
            arrival_tolerance: 5.0,

            burst_size: 12,
            particle_spread: 5.0,
            particle_decay: 0.02,
            star_count: 100,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values that would stall or break the session
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.reward == 0 || self.reward > MAX_REWARD {
            return Err(SettingsError::Invalid {
                field: "reward",
                reason: format!("{} is outside 1..={}", self.reward, MAX_REWARD),
            });
        }
        if self.pass_threshold > 100 {
            return Err(SettingsError::Invalid {
                field: "pass_threshold",
                reason: format!("{} is above 100", self.pass_threshold),
            });
        }
        // Convergence of the flight depends on a positive speed
        if !(self.rocket_speed > 0.0) {
            return Err(SettingsError::Invalid {
                field: "rocket_speed",
                reason: "must be positive".into(),
            });
        }
        if !(self.arrival_tolerance >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "arrival_tolerance",
                reason: "must not be negative".into(),
            });
        }
        if !(self.particle_decay > 0.0) {
            return Err(SettingsError::Invalid {
                field: "particle_decay",
                reason: "must be positive".into(),
            });
        }
        if !(self.particle_spread >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "particle_spread",
                reason: "must not be negative".into(),
            });
        }
        if !(self.feedback_delay_ms >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "feedback_delay_ms",
                reason: "must not be negative".into(),
            });
        }
        if self.question_cap == Some(0) {
            return Err(SettingsError::Invalid {
                field: "question_cap",
                reason: "must ask at least one question".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "pass_threshold": 66, "draw_policy": "Random" }"#)
            .unwrap();
        assert_eq!(settings.pass_threshold, 66);
        assert_eq!(settings.draw_policy, DrawPolicy::Random);
        assert_eq!(settings.reward, 10);
        assert_eq!(settings.question_cap, Some(20));
    }

    #[test]
    fn test_null_cap_means_unbounded() {
        let settings = Settings::from_json(r#"{ "question_cap": null }"#).unwrap();
        assert_eq!(settings.question_cap, None);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "pass_threshold": 150 }"#),
            Err(SettingsError::Invalid { field: "pass_threshold", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "rocket_speed": 0.0 }"#),
            Err(SettingsError::Invalid { field: "rocket_speed", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "reward": 4294967295 }"#),
            Err(SettingsError::Invalid { field: "reward", .. })
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "particle_spread": -1.0 }"#),
            Err(SettingsError::Invalid { field: "particle_spread", .. })
        ));
        assert!(Settings::from_json(r#"{ "reward": 1000 }"#).is_ok());
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_seed_zero_is_explicit() {
        assert_eq!(Settings::default().seed, None);
        assert_eq!(Settings::from_json(r#"{ "seed": 0 }"#).unwrap().seed, Some(0));
        assert_eq!(Settings::from_json(r#"{ "seed": null }"#).unwrap().seed, None);
    }

    #[test]
    fn test_draw_policy_names() {
        assert_eq!(DrawPolicy::from_str("RANDOM"), Some(DrawPolicy::Random));
        assert_eq!(DrawPolicy::from_str("sequential"), Some(DrawPolicy::Shuffled));
        assert_eq!(DrawPolicy::from_str("nope"), None);
        assert_eq!(DrawPolicy::Shuffled.as_str(), "Shuffled");
    }
}
