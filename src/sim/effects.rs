//! Cosmetic effects: answer bursts and the background starfield
//!
//! Nothing here feeds back into gameplay state.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::outcome::Verdict;
use super::selection::Viewport;

/// A burst particle
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Glyph category (sparkle for correct, alien for incorrect)
    pub kind: Verdict,
    pub life: f32, // 0-1, decreases every tick
}

/// Particle bursts spawned on arrival
#[derive(Debug, Clone, Serialize)]
pub struct EffectsSystem {
    particles: Vec<Particle>,
    /// Max magnitude of each velocity component
    spread: f32,
    /// Life lost per tick
    decay: f32,
}

impl EffectsSystem {
    pub fn new(spread: f32, decay: f32) -> Self {
        Self {
            particles: Vec::new(),
            spread,
            decay,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn spawn_burst(&mut self, origin: Vec2, verdict: Verdict, count: usize, rng: &mut impl Rng) {
        self.particles.reserve(count);
        for _ in 0..count {
            let vel = Vec2::new(
                rng.random_range(-self.spread..=self.spread),
                rng.random_range(-self.spread..=self.spread),
            );
            self.particles.push(Particle {
                pos: origin,
                vel,
                kind: verdict,
                life: 1.0,
            });
        }
    }

    /// One tick: drift and fade, drop dead particles
    pub fn advance(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.life -= self.decay;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

/// A background star
#[derive(Debug, Clone, Serialize)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Units per tick, downward
    pub speed: f32,
}

/// Endlessly falling background stars
#[derive(Debug, Clone, Serialize)]
pub struct Starfield {
    stars: Vec<Star>,
    height: f32,
}

impl Starfield {
    pub fn new(count: usize, viewport: Viewport, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(
                    rng.random_range(0.0..viewport.width.max(1.0)),
                    rng.random_range(0.0..viewport.height.max(1.0)),
                ),
                size: rng.random_range(1.0..3.0),
                speed: rng.random_range(1.0..3.0),
            })
            .collect();
        Self {
            stars,
            height: viewport.height,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Scroll down, wrapping to the top past the bottom edge
    pub fn advance(&mut self) {
        for star in &mut self.stars {
            star.pos.y += star.speed;
            if star.pos.y > self.height {
                star.pos.y = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_spawns_count() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut fx = EffectsSystem::new(5.0, 0.02);
        fx.spawn_burst(Vec2::new(10.0, 20.0), Verdict::Correct, 12, &mut rng);

        assert_eq!(fx.particles().len(), 12);
        for p in fx.particles() {
            assert_eq!(p.pos, Vec2::new(10.0, 20.0));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.kind, Verdict::Correct);
            assert!(p.vel.x.abs() <= 5.0 && p.vel.y.abs() <= 5.0);
        }
    }

    #[test]
    fn test_particles_decay_and_drop() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut fx = EffectsSystem::new(5.0, 0.02);
        fx.spawn_burst(Vec2::ZERO, Verdict::Incorrect, 8, &mut rng);

        let vel = fx.particles()[0].vel;
        fx.advance();
        assert_eq!(fx.particles()[0].pos, vel);
        assert!((fx.particles()[0].life - 0.98).abs() < 1e-6);

        // 1.0 / 0.02 = 50 ticks, float drift may need one more
        for _ in 0..50 {
            fx.advance();
        }
        assert!(fx.particles().is_empty());
    }

    #[test]
    fn test_starfield_wraps() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = Starfield::new(100, Viewport::new(800.0, 600.0), &mut rng);
        assert_eq!(field.stars().len(), 100);

        for _ in 0..1000 {
            field.advance();
            for star in field.stars() {
                assert!(star.pos.y >= 0.0 && star.pos.y <= 600.0);
                assert!(star.pos.x >= 0.0 && star.pos.x < 800.0);
            }
        }
    }
}
