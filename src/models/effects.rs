//! Visual effect records
//!
//! Explosions, particles and the scrolling starfield. None of these take part
//! in collisions; they exist so the renderer has something to draw.

use std::f32::consts::TAU;

use rand::Rng;

use super::constants::{ExplosionSize, EXPLOSION_FRAMES, EXPLOSION_FRAME_MS};
use super::geometry::Vec2;

/// Frame-based expanding fireball.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub center: Vec2,
    pub size: ExplosionSize,
    pub frame: u32,
    elapsed_ms: u32,
}

impl Explosion {
    pub fn new(center: Vec2, size: ExplosionSize) -> Self {
        Explosion {
            center,
            size,
            frame: 0,
            elapsed_ms: 0,
        }
    }

    pub fn update(&mut self, dt: u32) {
        self.elapsed_ms += dt;
        while self.elapsed_ms >= EXPLOSION_FRAME_MS && !self.is_finished() {
            self.elapsed_ms -= EXPLOSION_FRAME_MS;
            self.frame += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= EXPLOSION_FRAMES
    }

    /// 0.0 on the first frame, approaching 1.0 on the last.
    pub fn progress(&self) -> f32 {
        self.frame as f32 / EXPLOSION_FRAMES as f32
    }

    /// Current diameter in world pixels; grows 30% per frame.
    pub fn diameter(&self) -> f32 {
        self.size.base_diameter() * (1.0 + self.frame as f32 * 0.3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Spark,
    Explosion,
    Debris,
    Thruster,
    Collision,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub gravity: f32,
    pub life_ms: u32,
    pub max_life_ms: u32,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.life_ms > 0
    }

    /// Remaining life as a fraction, used for fading.
    pub fn intensity(&self) -> f32 {
        self.life_ms as f32 / self.max_life_ms.max(1) as f32
    }

    fn update(&mut self, dt: u32) {
        self.pos.x += self.velocity.x * dt as f32 * 0.1;
        self.pos.y += self.velocity.y * dt as f32 * 0.1;
        if matches!(self.kind, ParticleKind::Explosion | ParticleKind::Debris) {
            self.velocity.y += self.gravity * dt as f32 * 0.001;
        }
        self.life_ms = self.life_ms.saturating_sub(dt);
    }
}

/// Which way the ship is thrusting, for exhaust particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrustDirection {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Debug, Default, Clone)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[allow(clippy::too_many_arguments)]
    fn burst(
        &mut self,
        rng: &mut impl Rng,
        at: Vec2,
        kind: ParticleKind,
        count: usize,
        speed: (f32, f32),
        life: (u32, u32),
        gravity: f32,
    ) {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let s = rng.gen_range(speed.0..=speed.1);
            let life_ms = rng.gen_range(life.0..=life.1);
            self.particles.push(Particle {
                kind,
                pos: at,
                velocity: Vec2::new(angle.cos() * s, angle.sin() * s),
                gravity,
                life_ms,
                max_life_ms: life_ms,
            });
        }
    }

    pub fn add_explosion(&mut self, rng: &mut impl Rng, at: Vec2, size: ExplosionSize) {
        let (count, max_speed, life) = match size {
            ExplosionSize::Small => (8, 3.0, (200, 400)),
            ExplosionSize::Normal => (15, 4.0, (300, 600)),
            ExplosionSize::Large => (25, 6.0, (400, 800)),
        };
        self.burst(rng, at, ParticleKind::Explosion, count, (1.0, max_speed), life, 0.2);
    }

    pub fn add_hit(&mut self, rng: &mut impl Rng, at: Vec2) {
        self.burst(rng, at, ParticleKind::Spark, 5, (1.0, 3.0), (100, 300), 0.0);
    }

    pub fn add_collision_impact(&mut self, rng: &mut impl Rng, at: Vec2) {
        self.burst(rng, at, ParticleKind::Collision, 15, (2.0, 8.0), (300, 600), 0.0);
        self.burst(rng, at, ParticleKind::Debris, 8, (1.0, 4.0), (500, 1000), 0.5);
    }

    /// Exhaust puffs opposite to the direction of travel.
    pub fn add_thruster(&mut self, rng: &mut impl Rng, at: Vec2, direction: ThrustDirection, intensity: f32) {
        let count = (intensity.clamp(0.0, 4.0) * 2.0).round() as usize;
        let (dx, dy) = match direction {
            ThrustDirection::Forward => (0.0, 1.0),
            ThrustDirection::Backward => (0.0, -1.0),
            ThrustDirection::Left => (1.0, 0.0),
            ThrustDirection::Right => (-1.0, 0.0),
        };
        for _ in 0..count {
            let spread = rng.gen_range(-0.5..=0.5);
            let speed = rng.gen_range(1.0..=3.0);
            let life_ms = rng.gen_range(80..=200);
            self.particles.push(Particle {
                kind: ParticleKind::Thruster,
                pos: at,
                velocity: Vec2::new((dx + spread * dy) * speed, (dy + spread * dx) * speed),
                gravity: 0.0,
                life_ms,
                max_life_ms: life_ms,
            });
        }
    }

    pub fn update(&mut self, dt: u32) {
        for p in self.particles.iter_mut() {
            p.update(dt);
        }
        self.particles.retain(Particle::is_alive);
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Star {
    pub pos: Vec2,
    pub speed: f32,
    /// 50..=255
    pub brightness: u8,
}

/// Parallax star background that wraps vertically.
#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
    width: f32,
    height: f32,
}

impl Starfield {
    pub fn new(rng: &mut impl Rng, count: usize, width: f32, height: f32) -> Self {
        let stars = (0..count)
            .map(|_| {
                let brightness: u8 = rng.gen_range(50..=255);
                Star {
                    pos: Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height)),
                    speed: 0.5 + brightness as f32 / 255.0 * 2.5,
                    brightness,
                }
            })
            .collect();
        Starfield { stars, width, height }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for star in self.stars.iter_mut() {
            star.pos.y += star.speed;
            if star.pos.y > self.height {
                star.pos.y = 0.0;
                star.pos.x = rng.gen_range(0.0..self.width);
            }
        }
    }
}
