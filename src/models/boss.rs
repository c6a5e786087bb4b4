use std::f32::consts::PI;

use rand::Rng;

use super::constants::{
    BOSS_AIMED_SHOT_SPEED, BOSS_FIRE_INTERVAL_MS, BOSS_HEIGHT, BOSS_PATTERN_INTERVAL_MS,
    BOSS_POINTS, BOSS_SPAWN_Y, BOSS_SPECIAL_INTERVAL_MS, BOSS_SWEEP_CYCLE_MS, BOSS_SWEEP_MARGIN,
    BOSS_TARGET_Y, BOSS_WIDTH,
};
use super::geometry::{Rect, Vec2};
use super::projectile::{Projectile, ProjectileKind};
use super::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    /// Descending onto the screen.
    Enter,
    /// Sweeping side to side while firing.
    Combat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPattern {
    Spread,
    Aimed,
    Spiral,
}

impl AttackPattern {
    pub const ALL: [AttackPattern; 3] =
        [AttackPattern::Spread, AttackPattern::Aimed, AttackPattern::Spiral];
}

/// The mothership that appears when the score passes a level threshold.
#[derive(Debug, Clone)]
pub struct Boss {
    pub pos: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub speed: f32,
    pub alive: bool,
    pub phase: BossPhase,
    pub pattern: AttackPattern,
    pub target_x: f32,
    pub movement_timer: u64,
    pub pattern_timer: u64,
    pub special_timer: u64,
    pub last_shot: u64,
    screen_width: f32,
}

impl Boss {
    pub fn new(now: u64, settings: &Settings) -> Self {
        let x = settings.screen_width / 2.0 - BOSS_WIDTH / 2.0;
        Boss {
            pos: Vec2::new(x, BOSS_SPAWN_Y),
            health: settings.boss_health,
            max_health: settings.boss_health,
            speed: settings.boss_speed,
            alive: true,
            phase: BossPhase::Enter,
            pattern: AttackPattern::Spread,
            target_x: x,
            movement_timer: 0,
            pattern_timer: 0,
            special_timer: 0,
            last_shot: now,
            screen_width: settings.screen_width,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BOSS_WIDTH, BOSS_HEIGHT)
    }

    pub fn points(&self) -> u64 {
        BOSS_POINTS
    }

    /// Advance movement and pattern timers by one frame.
    pub fn update(&mut self, dt: u32, rng: &mut impl Rng) {
        if !self.alive {
            return;
        }
        let dt = dt as u64;
        self.movement_timer += dt;
        self.pattern_timer += dt;
        self.special_timer += dt;

        match self.phase {
            BossPhase::Enter => {
                if self.pos.y < BOSS_TARGET_Y {
                    self.pos.y += self.speed;
                } else {
                    self.phase = BossPhase::Combat;
                }
            }
            BossPhase::Combat => {
                self.target_x = if self.movement_timer % BOSS_SWEEP_CYCLE_MS < BOSS_SWEEP_CYCLE_MS / 2 {
                    BOSS_SWEEP_MARGIN
                } else {
                    self.screen_width - BOSS_WIDTH - BOSS_SWEEP_MARGIN
                };
                if (self.pos.x - self.target_x).abs() > 5.0 {
                    if self.pos.x < self.target_x {
                        self.pos.x += self.speed;
                    } else {
                        self.pos.x -= self.speed;
                    }
                }
            }
        }

        if self.pattern_timer > BOSS_PATTERN_INTERVAL_MS {
            self.pattern = AttackPattern::ALL[rng.gen_range(0..AttackPattern::ALL.len())];
            self.pattern_timer = 0;
        }
    }

    fn muzzle(&self) -> Vec2 {
        Vec2::new((self.pos.x + BOSS_WIDTH / 2.0).floor(), self.pos.y + BOSS_HEIGHT)
    }

    /// Fire the current attack pattern once the fire interval has elapsed.
    pub fn shoot(&mut self, now: u64, target: Vec2, settings: &Settings) -> Vec<Projectile> {
        if !self.alive || now.saturating_sub(self.last_shot) < BOSS_FIRE_INTERVAL_MS {
            return Vec::new();
        }
        self.last_shot = now;
        let muzzle = self.muzzle();
        let bullet = |pos: Vec2, velocity: Vec2| {
            Projectile::hostile(ProjectileKind::BossBullet, pos, settings).with_velocity(velocity)
        };

        match self.pattern {
            AttackPattern::Spread => (-2..=2)
                .map(|i| {
                    let angle = i as f32 * 0.3;
                    bullet(
                        Vec2::new(muzzle.x + i as f32 * 20.0, muzzle.y),
                        Vec2::new(angle.sin() * 5.0, 8.0),
                    )
                })
                .collect(),
            AttackPattern::Spiral => (0..6)
                .map(|i| {
                    let angle = self.movement_timer as f32 * 0.01 + i as f32 * PI / 3.0;
                    bullet(muzzle, Vec2::new(angle.cos() * 4.0, angle.sin() * 4.0 + 6.0))
                })
                .collect(),
            AttackPattern::Aimed => {
                let dx = target.x - muzzle.x;
                let dy = target.y - muzzle.y;
                let dist = (dx * dx + dy * dy).sqrt();
                let velocity = if dist > f32::EPSILON {
                    Vec2::new(dx / dist * BOSS_AIMED_SHOT_SPEED, dy / dist * BOSS_AIMED_SHOT_SPEED)
                } else {
                    Vec2::new(0.0, BOSS_AIMED_SHOT_SPEED)
                };
                vec![bullet(muzzle, velocity)]
            }
        }
    }

    /// Missile barrage on its own, longer cooldown.
    pub fn special_attack(&mut self, settings: &Settings) -> Vec<Projectile> {
        if !self.alive || self.special_timer < BOSS_SPECIAL_INTERVAL_MS {
            return Vec::new();
        }
        self.special_timer = 0;
        let muzzle = self.muzzle();
        let mut missiles = Vec::with_capacity(27);
        for i in -4..=4 {
            for j in 0..3 {
                let pos = Vec2::new(muzzle.x + i as f32 * 30.0, muzzle.y + j as f32 * 20.0);
                missiles.push(Projectile::hostile(ProjectileKind::BossMissile, pos, settings));
            }
        }
        missiles
    }

    /// Returns true when this hit destroyed the boss.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.alive;
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
        }
        was_alive && !self.alive
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn boss_enters_then_fights() {
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut boss = Boss::new(0, &settings);
        assert_eq!(boss.phase, BossPhase::Enter);
        for _ in 0..200 {
            boss.update(16, &mut rng);
        }
        assert_eq!(boss.phase, BossPhase::Combat);
        assert!(boss.pos.y >= BOSS_TARGET_Y);
    }

    #[test]
    fn spread_pattern_fires_five() {
        let settings = Settings::default();
        let mut boss = Boss::new(0, &settings);
        boss.pattern = AttackPattern::Spread;
        assert!(boss.shoot(500, Vec2::ZERO, &settings).is_empty());
        let shots = boss.shoot(1000, Vec2::ZERO, &settings);
        assert_eq!(shots.len(), 5);
        assert!(shots.iter().all(|s| s.velocity.y == 8.0));
    }

    #[test]
    fn spiral_pattern_fires_six() {
        let settings = Settings::default();
        let mut boss = Boss::new(0, &settings);
        boss.pattern = AttackPattern::Spiral;
        assert_eq!(boss.shoot(1000, Vec2::ZERO, &settings).len(), 6);
    }

    #[test]
    fn aimed_shot_heads_for_target() {
        let settings = Settings::default();
        let mut boss = Boss::new(0, &settings);
        boss.pattern = AttackPattern::Aimed;
        boss.pos = Vec2::new(400.0, 100.0);
        let target = Vec2::new(0.0, 700.0);
        let shots = boss.shoot(1000, target, &settings);
        assert_eq!(shots.len(), 1);
        assert!(shots[0].velocity.x < 0.0);
        assert!(shots[0].velocity.y > 0.0);
        assert!((shots[0].velocity.length() - BOSS_AIMED_SHOT_SPEED).abs() < 1e-3);
    }

    #[test]
    fn special_attack_has_cooldown() {
        let settings = Settings::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut boss = Boss::new(0, &settings);
        assert!(boss.special_attack(&settings).is_empty());
        for _ in 0..320 {
            boss.update(16, &mut rng);
        }
        let barrage = boss.special_attack(&settings);
        assert_eq!(barrage.len(), 27);
        assert!(barrage.iter().all(|p| p.kind == ProjectileKind::BossMissile));
        assert!(boss.special_attack(&settings).is_empty());
    }

    #[test]
    fn damage_drains_health_bar() {
        let settings = Settings::default();
        let mut boss = Boss::new(0, &settings);
        assert!(!boss.take_damage(250));
        assert!((boss.health_fraction() - 0.5).abs() < 1e-6);
        assert!(boss.take_damage(250));
        assert_eq!(boss.health_fraction(), 0.0);
    }
}
