use rand::Rng;

use super::constants::{EnemyKind, ENEMY_CONTACT_DAMAGE};
use super::geometry::{Rect, Vec2};
use super::projectile::{Projectile, ProjectileKind};
use super::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementPattern {
    Straight,
    Zigzag,
    Sine,
}

/// A hostile fighter descending the screen.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub pattern: MovementPattern,
    /// Horizontal direction for zigzag movement: -1 or 1.
    pub direction: f32,
    /// Milliseconds this enemy has been alive, drives its movement pattern.
    pub movement_timer: u64,
    /// Milliseconds between shots (only used by kinds that shoot).
    pub fire_interval: u64,
    pub last_shot: u64,
}

impl Enemy {
    /// Create an enemy with randomised speed, pattern and fire interval.
    pub fn spawn(kind: EnemyKind, pos: Vec2, now: u64, rng: &mut impl Rng) -> Self {
        let (lo, hi) = kind.speed_range();
        let pattern = match rng.gen_range(0..3) {
            0 => MovementPattern::Straight,
            1 => MovementPattern::Zigzag,
            _ => MovementPattern::Sine,
        };
        Enemy {
            kind,
            pos,
            speed: rng.gen_range(lo..=hi) as f32,
            health: kind.max_health(),
            max_health: kind.max_health(),
            alive: true,
            pattern,
            direction: if rng.gen_bool(0.5) { -1.0 } else { 1.0 },
            movement_timer: 0,
            fire_interval: rng.gen_range(2000..=5000),
            last_shot: now,
        }
    }

    pub fn size(&self) -> (f32, f32) {
        self.kind.size()
    }

    pub fn rect(&self) -> Rect {
        let (w, h) = self.size();
        Rect::new(self.pos.x, self.pos.y, w, h)
    }

    pub fn points(&self) -> u64 {
        self.kind.points()
    }

    pub fn contact_damage(&self) -> i32 {
        ENEMY_CONTACT_DAMAGE
    }

    /// Advance one frame along the movement pattern.
    pub fn update(&mut self, dt: u32, screen_width: f32) {
        if !self.alive {
            return;
        }
        self.movement_timer += dt as u64;
        self.pos.y += self.speed;

        match self.pattern {
            MovementPattern::Straight => {}
            MovementPattern::Zigzag => {
                if self.movement_timer % 1000 < 500 {
                    self.pos.x += self.direction * 2.0;
                } else {
                    self.pos.x -= self.direction * 2.0;
                }
            }
            MovementPattern::Sine => {
                self.pos.x += (2.0 * (self.movement_timer as f32 * 0.005).sin()).trunc();
            }
        }

        let (w, _) = self.size();
        self.pos.x = self.pos.x.clamp(0.0, (screen_width - w).max(0.0));
    }

    /// Fire a bullet if this kind shoots and its interval has elapsed.
    pub fn try_shoot(&mut self, now: u64, settings: &Settings) -> Option<Projectile> {
        if !self.alive || !self.kind.can_shoot() {
            return None;
        }
        if now.saturating_sub(self.last_shot) <= self.fire_interval {
            return None;
        }
        self.last_shot = now;
        let (w, h) = self.size();
        let muzzle = Vec2::new((self.pos.x + w / 2.0).floor(), self.pos.y + h);
        Some(Projectile::hostile(ProjectileKind::EnemyBullet, muzzle, settings))
    }

    /// Returns true when this hit destroyed the enemy.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.alive;
        self.health -= amount;
        if self.health <= 0 {
            self.alive = false;
        }
        was_alive && !self.alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn enemy(kind: EnemyKind) -> Enemy {
        let mut rng = StdRng::seed_from_u64(7);
        Enemy::spawn(kind, Vec2::new(100.0, 0.0), 0, &mut rng)
    }

    #[test]
    fn spawned_stats_follow_kind() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let e = Enemy::spawn(EnemyKind::Fast, Vec2::ZERO, 0, &mut rng);
            assert!(e.speed >= 4.0 && e.speed <= 6.0);
            assert_eq!(e.health, 20);
            assert!(e.fire_interval >= 2000 && e.fire_interval <= 5000);
        }
    }

    #[test]
    fn enemies_descend_each_frame() {
        let mut e = enemy(EnemyKind::Basic);
        let y = e.pos.y;
        e.update(16, 1024.0);
        assert_eq!(e.pos.y, y + e.speed);
    }

    #[test]
    fn zigzag_changes_direction_every_half_second() {
        let mut e = enemy(EnemyKind::Basic);
        e.pattern = MovementPattern::Zigzag;
        e.direction = 1.0;
        e.update(100, 1024.0);
        assert_eq!(e.pos.x, 102.0);
        e.update(500, 1024.0);
        assert_eq!(e.pos.x, 100.0);
    }

    #[test]
    fn x_is_clamped_to_screen() {
        let mut e = enemy(EnemyKind::Heavy);
        e.pattern = MovementPattern::Zigzag;
        e.direction = 1.0;
        e.pos.x = 1024.0;
        e.update(16, 1024.0);
        assert_eq!(e.pos.x, 1024.0 - 56.0);
    }

    #[test]
    fn only_heavy_enemies_shoot() {
        let settings = Settings::default();
        let mut basic = enemy(EnemyKind::Basic);
        assert!(basic.try_shoot(100_000, &settings).is_none());

        let mut heavy = enemy(EnemyKind::Heavy);
        assert!(heavy.try_shoot(heavy.fire_interval, &settings).is_none());
        let shot = heavy.try_shoot(heavy.fire_interval + 1, &settings);
        assert!(shot.is_some());
        assert_eq!(shot.map(|s| s.kind), Some(ProjectileKind::EnemyBullet));
    }

    #[test]
    fn damage_kills_at_zero() {
        let mut e = enemy(EnemyKind::Basic);
        assert!(!e.take_damage(20));
        assert_eq!(e.health, 10);
        assert!(e.take_damage(10));
        assert!(!e.alive);
        assert!(!e.take_damage(10), "already dead enemies are not killed twice");
    }
}
