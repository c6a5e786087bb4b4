use super::constants::HOSTILE_PROJECTILE_DAMAGE;
use super::geometry::{Rect, Vec2};
use super::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    Basic,
    Enhanced,
    Missile,
    Laser,
    EnemyBullet,
    BossBullet,
    BossMissile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Hostile,
}

impl ProjectileKind {
    pub fn owner(&self) -> Owner {
        match self {
            ProjectileKind::Basic
            | ProjectileKind::Enhanced
            | ProjectileKind::Missile
            | ProjectileKind::Laser => Owner::Player,
            ProjectileKind::EnemyBullet
            | ProjectileKind::BossBullet
            | ProjectileKind::BossMissile => Owner::Hostile,
        }
    }

    pub fn size(&self) -> (f32, f32) {
        match self {
            ProjectileKind::Basic => (4.0, 12.0),
            ProjectileKind::Enhanced => (6.0, 15.0),
            ProjectileKind::Missile => (8.0, 20.0),
            ProjectileKind::Laser => (6.0, 30.0),
            ProjectileKind::EnemyBullet => (4.0, 8.0),
            ProjectileKind::BossBullet => (6.0, 12.0),
            ProjectileKind::BossMissile => (8.0, 16.0),
        }
    }

    /// Launch velocity in pixels per frame for a shot fired at `angle` radians
    /// off the vertical.
    pub fn velocity(&self, angle: f32, settings: &Settings) -> Vec2 {
        let (s, c) = angle.sin_cos();
        match self {
            ProjectileKind::Basic => Vec2::new(s * 3.0, -settings.bullet_speed + c * 3.0),
            ProjectileKind::Enhanced => {
                Vec2::new(s * 3.0, -settings.bullet_speed * 1.2 + c * 3.0)
            }
            ProjectileKind::Missile => Vec2::new(s * 2.0, -settings.missile_speed + c * 2.0),
            ProjectileKind::Laser => Vec2::new(0.0, -settings.bullet_speed * 2.0),
            ProjectileKind::EnemyBullet => {
                Vec2::new(s * 2.0, (settings.bullet_speed / 2.0).floor() + c * 2.0)
            }
            ProjectileKind::BossBullet => {
                Vec2::new(s * 4.0, (settings.bullet_speed / 2.0).floor() + c * 4.0)
            }
            ProjectileKind::BossMissile => Vec2::new(s * 3.0, settings.missile_speed + c * 3.0),
        }
    }
}

/// A bullet, missile or beam in flight.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub damage: i32,
    pub alive: bool,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, pos: Vec2, angle: f32, damage: i32, settings: &Settings) -> Self {
        Projectile {
            kind,
            pos,
            velocity: kind.velocity(angle, settings),
            damage,
            alive: true,
        }
    }

    /// Hostile shot with the default damage.
    pub fn hostile(kind: ProjectileKind, pos: Vec2, settings: &Settings) -> Self {
        Projectile::new(kind, pos, 0.0, HOSTILE_PROJECTILE_DAMAGE, settings)
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn owner(&self) -> Owner {
        self.kind.owner()
    }

    pub fn rect(&self) -> Rect {
        let (w, h) = self.kind.size();
        Rect::new(self.pos.x, self.pos.y, w, h)
    }

    pub fn update(&mut self) {
        if !self.alive {
            return;
        }
        self.pos.x += self.velocity.x;
        self.pos.y += self.velocity.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_shots_travel_up_and_hostile_shots_down() {
        let settings = Settings::default();
        for kind in [
            ProjectileKind::Basic,
            ProjectileKind::Enhanced,
            ProjectileKind::Missile,
            ProjectileKind::Laser,
        ] {
            assert_eq!(kind.owner(), Owner::Player);
            assert!(kind.velocity(0.0, &settings).y < 0.0, "{:?} should rise", kind);
        }
        for kind in [
            ProjectileKind::EnemyBullet,
            ProjectileKind::BossBullet,
            ProjectileKind::BossMissile,
        ] {
            assert_eq!(kind.owner(), Owner::Hostile);
            assert!(kind.velocity(0.0, &settings).y > 0.0, "{:?} should fall", kind);
        }
    }

    #[test]
    fn basic_bullet_velocity_matches_formula() {
        let settings = Settings::default();
        let v = ProjectileKind::Basic.velocity(0.0, &settings);
        assert_eq!(v.x, 0.0);
        assert_eq!(v.y, -9.0);
    }

    #[test]
    fn laser_is_fastest() {
        let settings = Settings::default();
        let laser = ProjectileKind::Laser.velocity(0.0, &settings);
        let basic = ProjectileKind::Basic.velocity(0.0, &settings);
        assert!(laser.y < basic.y);
    }

    #[test]
    fn angled_shots_drift_sideways() {
        let settings = Settings::default();
        assert!(ProjectileKind::Missile.velocity(0.3, &settings).x > 0.0);
        assert!(ProjectileKind::Missile.velocity(-0.3, &settings).x < 0.0);
    }

    #[test]
    fn update_moves_by_velocity() {
        let settings = Settings::default();
        let mut p = Projectile::hostile(ProjectileKind::EnemyBullet, Vec2::new(10.0, 10.0), &settings);
        p.update();
        assert_eq!(p.pos, Vec2::new(10.0, 18.0));
        assert_eq!(p.damage, HOSTILE_PROJECTILE_DAMAGE);
    }
}
