//! Rocket motion model
//!
//! Straight-line flight at constant speed toward a stationary target. The
//! step is capped at the remaining distance, so distance strictly decreases
//! and every launch reaches its target.

use glam::Vec2;
use serde::Serialize;

use crate::consts::GLYPH_ROTATION;
use crate::{heading_toward, hover_offset};

/// Rocket avatar state
#[derive(Debug, Clone, Serialize)]
pub struct RocketState {
    /// Glyph center
    pub pos: Vec2,
    pub target: Vec2,
    /// Rotation for the glyph (radians, see `HEADING_OFFSET`)
    pub heading: f32,
    /// Units per tick
    pub speed: f32,
    pub arrival_tolerance: f32,
    pub is_flying: bool,
    /// Rest position the hover oscillates around
    home: Vec2,
}

impl RocketState {
    pub fn new(home: Vec2, speed: f32, arrival_tolerance: f32) -> Self {
        Self {
            pos: home,
            target: home,
            heading: GLYPH_ROTATION,
            speed,
            arrival_tolerance,
            is_flying: false,
            home,
        }
    }

    pub fn home(&self) -> Vec2 {
        self.home
    }

    /// Park on the launch pad, idle
    pub fn reset(&mut self) {
        self.pos = self.home;
        self.target = self.home;
        self.is_flying = false;
    }

    /// Point the nose at `aim` without moving (idle only)
    pub fn aim_at(&mut self, aim: Vec2) {
        if self.is_flying {
            return;
        }
        let delta = aim - self.pos;
        if delta != Vec2::ZERO {
            self.heading = heading_toward(delta);
        }
    }

    /// Start flying toward `target`. Returns false if already in flight.
    pub fn launch(&mut self, target: Vec2) -> bool {
        if self.is_flying {
            return false;
        }
        self.target = target;
        self.is_flying = true;
        true
    }

    /// Advance one tick of flight. Returns true on the arrival tick.
    pub fn advance_flight(&mut self) -> bool {
        if !self.is_flying {
            return false;
        }

        let to_target = self.target - self.pos;
        let distance = to_target.length();
        if distance > self.arrival_tolerance {
            let step = self.speed.min(distance);
            self.pos += to_target / distance * step;
            self.heading = heading_toward(to_target);
        }

        if self.pos.distance(self.target) <= self.arrival_tolerance {
            self.pos = self.target;
            self.is_flying = false;
            return true;
        }
        false
    }

    /// Idle bob around the launch pad (cosmetic)
    pub fn hover(&mut self, now_ms: f64) {
        if self.is_flying {
            return;
        }
        self.pos = Vec2::new(self.home.x, self.home.y + hover_offset(now_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::HEADING_OFFSET;
    use proptest::prelude::*;

    fn rocket() -> RocketState {
        RocketState::new(Vec2::new(450.0, 885.0), 15.0, 5.0)
    }

    fn fly_to(rocket: &mut RocketState, target: Vec2) -> u32 {
        assert!(rocket.launch(target));
        let mut ticks = 0;
        loop {
            ticks += 1;
            if rocket.advance_flight() {
                return ticks;
            }
            assert!(ticks < 10_000, "flight did not converge");
        }
    }

    #[test]
    fn test_arrives_exactly_on_target() {
        let mut r = rocket();
        // 100 units straight up: six full steps, then a capped 10-unit step
        let target = r.pos - Vec2::new(0.0, 100.0);
        let ticks = fly_to(&mut r, target);

        assert_eq!(r.pos, target);
        assert!(!r.is_flying);
        assert_eq!(ticks, (100.0f32 / 15.0).ceil() as u32);

        let target = Vec2::new(150.0, 400.0);
        fly_to(&mut r, target);
        assert_eq!(r.pos, target);
    }

    #[test]
    fn test_heading_matches_formula() {
        let mut r = rocket();
        let start = r.pos;
        let target = Vec2::new(750.0, 400.0);
        r.launch(target);
        r.advance_flight();

        let d = target - start;
        assert_eq!(r.heading, d.y.atan2(d.x) + HEADING_OFFSET);
    }

    #[test]
    fn test_launch_while_flying_is_ignored() {
        let mut r = rocket();
        let first = Vec2::new(100.0, 100.0);
        assert!(r.launch(first));
        assert!(!r.launch(Vec2::new(800.0, 100.0)));
        assert_eq!(r.target, first);
    }

    #[test]
    fn test_target_within_tolerance_arrives_immediately() {
        let mut r = rocket();
        let target = r.pos + Vec2::new(3.0, 0.0);
        assert_eq!(fly_to(&mut r, target), 1);
        assert_eq!(r.pos, target);
    }

    #[test]
    fn test_no_overshoot_oscillation() {
        // A 6-unit hop with speed 15 would bounce forever without capping the step
        let mut r = rocket();
        let target = r.pos + Vec2::new(6.0, 0.0);
        assert_eq!(fly_to(&mut r, target), 1);
    }

    #[test]
    fn test_hover_only_when_idle() {
        let mut r = rocket();
        let home = r.home();
        r.hover(628.0);
        assert_eq!(r.pos.x, home.x);
        assert!((r.pos.y - home.y).abs() <= 4.0);

        r.launch(Vec2::new(0.0, 0.0));
        let before = r.pos;
        r.hover(1000.0);
        assert_eq!(r.pos, before);
    }

    #[test]
    fn test_aim_ignored_in_flight() {
        let mut r = rocket();
        r.launch(Vec2::new(0.0, 0.0));
        r.advance_flight();
        let heading = r.heading;
        r.aim_at(Vec2::new(900.0, 0.0));
        assert_eq!(r.heading, heading);
    }

    proptest! {
        #[test]
        fn prop_arrival_tick_count(
            tx in 0.0f32..1200.0,
            ty in 0.0f32..900.0,
            speed in 5.0f32..30.0,
        ) {
            let mut r = RocketState::new(Vec2::new(600.0, 860.0), speed, 5.0);
            let target = Vec2::new(tx, ty);
            let distance = r.pos.distance(target);
            let ticks = fly_to(&mut r, target);

            prop_assert_eq!(r.pos, target);
            let ideal = (distance / speed).ceil().max(1.0) as u32;
            prop_assert!(ticks <= ideal + 1);
            prop_assert!(ticks + 1 >= ideal);
        }
    }
}
