//! Particle engine for answer feedback and the result burst
//!
//! Particles are purely cosmetic. Each one is spawned from a per-kind
//! [`Kinematics`] table, then integrated once per frame:
//! `vel += acc`, `pos += vel`, `life -= 4`, `size *= 0.98`.
//! A particle is drawn while `life > 0` and removed once `life < 0`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::*;
use crate::renderer::{Color, Surface};

/// What a batch of particles is celebrating (or consoling)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Correct answer: green/yellow, floats upward
    Praise,
    /// Wrong answer: blue/purple, drifts down
    Encourage,
    /// Result burst, ratio >= 0.8
    Success,
    /// Result burst, ratio >= 0.5
    Good,
    /// Result burst, anything lower
    TryAgain,
}

/// Uniform sampling range `[min, max)`, or exactly `min` when empty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.max <= self.min {
            self.min
        } else {
            rng.random_range(self.min..self.max)
        }
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Spawn parameters for one particle kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// Initial speed along a uniformly random direction
    pub speed: Span,
    /// Replaces the vertical velocity component when set
    pub vertical: Option<Span>,
    /// Constant per-frame acceleration (screen space, +y is down)
    pub accel: Vec2,
    /// RGB channel ranges (0-255)
    pub color: [Span; 3],
    /// Diameter range
    pub size: Span,
}

/// Spawn parameters for `kind`
pub fn initial_kinematics(kind: ParticleKind) -> Kinematics {
    match kind {
        ParticleKind::Praise => Kinematics {
            speed: Span::new(2.0, 5.0),
            vertical: Some(Span::new(-5.0, -1.0)),
            accel: Vec2::new(0.0, -0.05),
            color: [
                Span::new(100.0, 200.0),
                Span::new(255.0, 255.0),
                Span::new(100.0, 200.0),
            ],
            size: Span::new(5.0, 15.0),
        },
        ParticleKind::Encourage => Kinematics {
            speed: Span::new(2.0, 5.0),
            vertical: None,
            accel: Vec2::new(0.0, 0.1),
            color: [
                Span::new(100.0, 200.0),
                Span::new(100.0, 200.0),
                Span::new(255.0, 255.0),
            ],
            size: Span::new(5.0, 15.0),
        },
        ParticleKind::Success | ParticleKind::Good | ParticleKind::TryAgain => Kinematics {
            speed: Span::new(3.0, 8.0),
            vertical: None,
            accel: Vec2::new(0.0, 0.2),
            color: [
                Span::new(200.0, 255.0),
                Span::new(150.0, 255.0),
                Span::new(0.0, 50.0),
            ],
            size: Span::new(10.0, 30.0),
        },
    }
}

/// A single short-lived visual entity
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    /// Fade budget (0-255), doubling as draw alpha. Goes negative just before removal.
    pub life: i32,
    pub size: f32,
    pub color: Color,
    pub kind: ParticleKind,
}

impl Particle {
    /// Spawn a particle of `kind` at `origin` with randomized kinematics
    pub fn spawn<R: Rng>(kind: ParticleKind, origin: Vec2, rng: &mut R) -> Self {
        let k = initial_kinematics(kind);

        let direction = Vec2::from_angle(rng.random_range(0.0..TAU));
        let mut vel = direction * k.speed.sample(rng);
        if let Some(vertical) = k.vertical {
            vel.y = vertical.sample(rng);
        }

        let [r, g, b] = k.color.map(|span| span.sample(rng).round().clamp(0.0, 255.0) as u8);

        Self {
            pos: origin,
            vel,
            acc: k.accel,
            life: PARTICLE_LIFE,
            size: k.size.sample(rng),
            color: Color::rgba(r, g, b, PARTICLE_LIFE as u8),
            kind,
        }
    }

    /// One frame of integration and decay
    pub fn advance(&mut self) {
        self.vel += self.acc;
        self.pos += self.vel;
        self.life -= PARTICLE_LIFE_DECAY;
        self.size *= PARTICLE_SHRINK;
    }

    /// Still drawn this frame
    pub fn is_visible(&self) -> bool {
        self.life > 0
    }

    /// Ready for removal
    pub fn is_finished(&self) -> bool {
        self.life < 0
    }

    pub fn alpha(&self) -> u8 {
        self.life.clamp(0, 255) as u8
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        if self.is_visible() {
            surface.fill_ellipse(self.pos, self.size, self.color.with_alpha(self.alpha()));
        }
    }
}

/// Owns every live particle
#[derive(Debug, Clone)]
pub struct ParticleEngine {
    particles: Vec<Particle>,
    rng: Pcg32,
    enabled: bool,
}

impl ParticleEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            enabled: true,
        }
    }

    /// Turn emission on or off. Live particles keep animating either way.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Append `count` particles of `kind` at `origin`
    pub fn emit(&mut self, kind: ParticleKind, origin: Vec2, count: usize) {
        if !self.enabled || count == 0 {
            return;
        }
        log::debug!("Emitting {count} {kind:?} particles at {origin}");

        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::spawn(kind, origin, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Integrate every particle by one frame
    pub fn advance(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.advance();
        }
    }

    /// Draw every visible particle
    pub fn render(&self, surface: &mut dyn Surface) {
        for particle in &self.particles {
            particle.render(surface);
        }
    }

    /// Drop particles whose life has gone negative
    pub fn cull(&mut self) {
        self.particles.retain(|p| !p.is_finished());
    }

    /// One frame: advance, draw, then remove finished particles.
    /// A particle whose life lands in `1..=4` is drawn once more, nearly
    /// transparent, before the next run removes it.
    pub fn run(&mut self, surface: &mut dyn Surface) {
        self.advance();
        self.render(surface);
        self.cull();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::CommandList;

    const ALL_KINDS: [ParticleKind; 5] = [
        ParticleKind::Praise,
        ParticleKind::Encourage,
        ParticleKind::Success,
        ParticleKind::Good,
        ParticleKind::TryAgain,
    ];

    fn single(kind: ParticleKind) -> Particle {
        let mut rng = Pcg32::seed_from_u64(7);
        Particle::spawn(kind, Vec2::new(400.0, 300.0), &mut rng)
    }

    #[test]
    fn test_emit_count() {
        let mut engine = ParticleEngine::new(1);
        engine.emit(ParticleKind::Praise, Vec2::new(10.0, 20.0), DEFAULT_EMISSION);
        assert_eq!(engine.len(), 20);
        assert!(engine.particles().iter().all(|p| p.pos == Vec2::new(10.0, 20.0)));
        assert!(engine.particles().iter().all(|p| p.life == PARTICLE_LIFE));
    }

    #[test]
    fn test_emit_zero_is_noop() {
        let mut engine = ParticleEngine::new(1);
        engine.emit(ParticleKind::Good, Vec2::ZERO, 0);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_disabled_engine_ignores_emission() {
        let mut engine = ParticleEngine::new(1);
        engine.set_enabled(false);
        engine.emit(ParticleKind::Success, Vec2::ZERO, 100);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_praise_rises() {
        let mut engine = ParticleEngine::new(42);
        engine.emit(ParticleKind::Praise, Vec2::new(400.0, 300.0), 20);
        assert_eq!(engine.len(), 20);

        let mean_vy: f32 =
            engine.particles().iter().map(|p| p.vel.y).sum::<f32>() / engine.len() as f32;
        assert!(mean_vy < 0.0, "praise should move upward, mean vy = {mean_vy}");
        assert!(engine.particles().iter().all(|p| p.vel.y <= -1.0));
    }

    #[test]
    fn test_burst_falls_over_time() {
        let mut p = single(ParticleKind::Success);
        let vy0 = p.vel.y;
        for _ in 0..10 {
            p.advance();
        }
        assert!((p.vel.y - (vy0 + 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_spawn_within_kind_ranges() {
        let mut rng = Pcg32::seed_from_u64(3);
        for kind in ALL_KINDS {
            let k = initial_kinematics(kind);
            for _ in 0..50 {
                let p = Particle::spawn(kind, Vec2::ZERO, &mut rng);
                assert!(k.size.contains(p.size), "{kind:?} size {}", p.size);
                assert_eq!(p.acc, k.accel);
                assert!(k.color[0].contains(p.color.r as f32));
                assert!(k.color[1].contains(p.color.g as f32));
                assert!(k.color[2].contains(p.color.b as f32));
                if k.vertical.is_none() {
                    let speed = p.vel.length();
                    assert!(speed >= k.speed.min - 1e-3 && speed <= k.speed.max + 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_life_and_size_decay() {
        let mut p = single(ParticleKind::Encourage);
        let size0 = p.size;
        for n in 1..=10 {
            p.advance();
            assert_eq!(p.life, PARTICLE_LIFE - 4 * n);
            let expected = size0 * PARTICLE_SHRINK.powi(n);
            assert!((p.size - expected).abs() < 1e-4);
        }
    }

    #[test]
    fn test_visible_for_ceil_life_over_four_advances() {
        let mut p = single(ParticleKind::Praise);
        let frames = (PARTICLE_LIFE as f32 / PARTICLE_LIFE_DECAY as f32).ceil() as usize;
        for _ in 0..frames - 1 {
            p.advance();
            assert!(p.is_visible());
        }
        p.advance();
        assert!(!p.is_visible());
    }

    #[test]
    fn test_run_draws_last_faint_frame_before_removal() {
        let mut engine = ParticleEngine::new(5);
        engine.emit(ParticleKind::Encourage, Vec2::ZERO, 1);

        // 255 -> 3 after 63 runs, each one drawn
        for _ in 0..63 {
            let mut frame = CommandList::new();
            engine.run(&mut frame);
            assert_eq!(frame.ellipses().count(), 1);
        }
        assert_eq!(engine.particles()[0].life, 3);

        // Crossing frame: life -1, not drawn, removed
        let mut frame = CommandList::new();
        engine.run(&mut frame);
        assert_eq!(frame.ellipses().count(), 0);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_zero_life_kept_but_not_drawn() {
        let mut engine = ParticleEngine::new(5);
        engine.emit(ParticleKind::Good, Vec2::ZERO, 1);
        engine.particles[0].life = 4;

        let mut frame = CommandList::new();
        engine.run(&mut frame);
        assert_eq!(engine.particles()[0].life, 0);
        assert_eq!(frame.ellipses().count(), 0);
        assert_eq!(engine.len(), 1);

        engine.run(&mut frame);
        assert!(engine.is_empty());
    }

    #[test]
    fn test_alpha_tracks_life() {
        let mut engine = ParticleEngine::new(9);
        engine.emit(ParticleKind::TryAgain, Vec2::ZERO, 1);
        let mut frame = CommandList::new();
        engine.run(&mut frame);

        let (_, diameter, color) = frame.ellipses().next().unwrap();
        assert_eq!(color.a, 251);
        assert!((diameter - engine.particles()[0].size).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        let mut a = ParticleEngine::new(99);
        let mut b = ParticleEngine::new(99);
        a.emit(ParticleKind::Success, Vec2::ZERO, 30);
        b.emit(ParticleKind::Success, Vec2::ZERO, 30);
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.vel, pb.vel);
            assert_eq!(pa.color, pb.color);
        }
    }
}
