use super::constants::{
    PowerUpKind, HEALTH_POWERUP_AMOUNT, PLAYER_ACCELERATION, PLAYER_BULLET_DAMAGE,
    PLAYER_DECELERATION, PLAYER_HEIGHT, PLAYER_HIT_FLASH_MS, PLAYER_WIDTH, SPREAD_ANGLES,
};
use super::geometry::{Rect, Vec2};
use super::projectile::{Projectile, ProjectileKind};
use super::settings::Settings;
use super::ship::ShipClass;

/// Requested thrust on each axis: -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Thrust {
    pub x: i8,
    pub y: i8,
}

/// Everything the pilot asks of the ship for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Controls {
    pub thrust: Thrust,
    pub fire: bool,
}

/// Game-time expiry (ms) of each timed power-up. `None` = inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActiveEffects {
    pub rapid_fire_until: Option<u64>,
    pub shield_until: Option<u64>,
    pub spread_shot_until: Option<u64>,
    pub laser_until: Option<u64>,
}

impl ActiveEffects {
    fn slot_mut(&mut self, kind: PowerUpKind) -> Option<&mut Option<u64>> {
        match kind {
            PowerUpKind::RapidFire => Some(&mut self.rapid_fire_until),
            PowerUpKind::Shield => Some(&mut self.shield_until),
            PowerUpKind::Missile => Some(&mut self.spread_shot_until),
            PowerUpKind::Laser => Some(&mut self.laser_until),
            PowerUpKind::Health => None,
        }
    }

    pub fn until(&self, kind: PowerUpKind) -> Option<u64> {
        match kind {
            PowerUpKind::RapidFire => self.rapid_fire_until,
            PowerUpKind::Shield => self.shield_until,
            PowerUpKind::Missile => self.spread_shot_until,
            PowerUpKind::Laser => self.laser_until,
            PowerUpKind::Health => None,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.until(kind).is_some()
    }

    /// Drop effects whose time has passed. Returns the kinds that expired.
    pub fn expire(&mut self, now: u64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            if let Some(slot) = self.slot_mut(kind) {
                if matches!(*slot, Some(end) if now > end) {
                    *slot = None;
                    expired.push(kind);
                }
            }
        }
        expired
    }
}

/// What the guns produce for one trigger pull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loadout {
    Basic,
    RapidFire,
    Laser,
    Spread,
}

/// The player's starfighter.
#[derive(Debug, Clone)]
pub struct Player {
    pub ship: ShipClass,
    pub pos: Vec2,
    pub velocity: Vec2,
    pub max_speed: f32,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    /// Milliseconds between shots without rapid fire.
    pub base_fire_interval: u64,
    /// Game time of the last shot, `None` before the first one.
    pub last_shot: Option<u64>,
    pub effects: ActiveEffects,
    pub hit_flash_ms: u32,
    /// Game time of the last boss ram, for the contact cooldown.
    pub last_boss_contact: Option<u64>,
    bounds: Vec2,
}

impl Player {
    /// Launch a ship centred horizontally near the bottom of the screen.
    pub fn new(ship: ShipClass, settings: &Settings) -> Self {
        let stats = ship.stats();
        let max_health = (settings.player_health as f32 * stats.health_mult) as i32;
        let base_fire_interval =
            (settings.base_fire_interval_ms as f32 / stats.fire_rate_mult) as u64;
        Player {
            ship,
            pos: Vec2::new(
                settings.screen_width / 2.0 - PLAYER_WIDTH / 2.0,
                settings.screen_height - PLAYER_HEIGHT - 50.0,
            ),
            velocity: Vec2::ZERO,
            max_speed: settings.player_speed * stats.speed_mult,
            health: max_health,
            max_health,
            alive: true,
            base_fire_interval,
            last_shot: None,
            effects: ActiveEffects::default(),
            hit_flash_ms: 0,
            last_boss_contact: None,
            bounds: Vec2::new(
                settings.screen_width - PLAYER_WIDTH,
                settings.screen_height - PLAYER_HEIGHT,
            ),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    /// Apply one frame of steering and movement, keeping the ship on screen.
    pub fn steer(&mut self, thrust: Thrust) {
        self.velocity.x = Self::axis(self.velocity.x, thrust.x, self.max_speed);
        self.velocity.y = Self::axis(self.velocity.y, thrust.y, self.max_speed);

        self.pos.x += self.velocity.x;
        self.pos.y += self.velocity.y;

        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.velocity.x = 0.0;
        } else if self.pos.x > self.bounds.x {
            self.pos.x = self.bounds.x;
            self.velocity.x = 0.0;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity.y = 0.0;
        } else if self.pos.y > self.bounds.y {
            self.pos.y = self.bounds.y;
            self.velocity.y = 0.0;
        }
    }

    fn axis(velocity: f32, thrust: i8, max_speed: f32) -> f32 {
        match thrust.signum() {
            -1 => (velocity - PLAYER_ACCELERATION).max(-max_speed),
            1 => (velocity + PLAYER_ACCELERATION).min(max_speed),
            _ => velocity * PLAYER_DECELERATION,
        }
    }

    /// Advance timers. Returns power-ups that ran out this frame.
    pub fn update(&mut self, dt: u32, now: u64) -> Vec<PowerUpKind> {
        self.hit_flash_ms = self.hit_flash_ms.saturating_sub(dt);
        self.effects.expire(now)
    }

    pub fn loadout(&self) -> Loadout {
        if self.effects.is_active(PowerUpKind::Missile) {
            Loadout::Spread
        } else if self.effects.is_active(PowerUpKind::Laser) {
            Loadout::Laser
        } else if self.effects.is_active(PowerUpKind::RapidFire) {
            Loadout::RapidFire
        } else {
            Loadout::Basic
        }
    }

    pub fn fire_interval(&self) -> u64 {
        if self.effects.is_active(PowerUpKind::RapidFire) {
            self.base_fire_interval / 4
        } else {
            self.base_fire_interval
        }
    }

    pub fn can_shoot(&self, now: u64) -> bool {
        match self.last_shot {
            None => true,
            Some(last) => now.saturating_sub(last) > self.fire_interval(),
        }
    }

    /// Pull the trigger. Returns no projectiles while the guns are cycling.
    pub fn try_fire(&mut self, now: u64, settings: &Settings) -> Vec<Projectile> {
        if !self.alive || !self.can_shoot(now) {
            return Vec::new();
        }
        self.last_shot = Some(now);

        let center_x = (self.pos.x + PLAYER_WIDTH / 2.0).floor();
        let y = self.pos.y.floor();
        let shot = |kind, dx: f32, angle, damage| {
            Projectile::new(kind, Vec2::new(center_x + dx, y), angle, damage, settings)
        };

        match self.loadout() {
            Loadout::Spread => SPREAD_ANGLES
                .iter()
                .map(|&angle| shot(ProjectileKind::Missile, -2.0, angle, 40))
                .collect(),
            Loadout::Laser => vec![shot(ProjectileKind::Laser, -4.0, 0.0, PLAYER_BULLET_DAMAGE * 2)],
            Loadout::RapidFire => vec![
                shot(ProjectileKind::Enhanced, -8.0, 0.0, 30),
                shot(ProjectileKind::Enhanced, 4.0, 0.0, 30),
            ],
            Loadout::Basic => vec![shot(ProjectileKind::Basic, -2.0, 0.0, PLAYER_BULLET_DAMAGE)],
        }
    }

    /// Returns true when the hit was absorbed by the shield.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.effects.is_active(PowerUpKind::Shield) {
            return true;
        }
        self.health -= amount;
        self.hit_flash_ms = PLAYER_HIT_FLASH_MS;
        if self.health <= 0 {
            self.health = 0;
            self.alive = false;
        }
        false
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn apply_powerup(&mut self, kind: PowerUpKind, now: u64, settings: &Settings) {
        let until = now + settings.powerup_duration_ms;
        match kind {
            PowerUpKind::Health => self.heal(HEALTH_POWERUP_AMOUNT),
            PowerUpKind::RapidFire => self.effects.rapid_fire_until = Some(until),
            PowerUpKind::Shield => self.effects.shield_until = Some(until),
            PowerUpKind::Missile => self.effects.spread_shot_until = Some(until),
            PowerUpKind::Laser => self.effects.laser_until = Some(until),
        }
    }

    /// Milliseconds left on a timed power-up, if active.
    pub fn remaining(&self, kind: PowerUpKind, now: u64) -> Option<u64> {
        self.effects
            .until(kind)
            .map(|end| end.saturating_sub(now))
            .filter(|left| *left > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(ShipClass::Fighter, &Settings::default())
    }

    #[test]
    fn ship_class_scales_stats() {
        let settings = Settings::default();
        let destroyer = Player::new(ShipClass::Destroyer, &settings);
        assert_eq!(destroyer.max_health, 150);
        assert_eq!(destroyer.base_fire_interval, 100);
        assert!((destroyer.max_speed - 6.4).abs() < 1e-4);
    }

    #[test]
    fn thrust_accelerates_up_to_max_speed() {
        let mut p = player();
        for _ in 0..100 {
            p.steer(Thrust { x: -1, y: 0 });
        }
        assert_eq!(p.pos.x, 0.0);
        assert_eq!(p.velocity.x, 0.0, "velocity zeroed against the wall");

        let mut p = player();
        p.steer(Thrust { x: 1, y: 0 });
        assert!((p.velocity.x - PLAYER_ACCELERATION).abs() < 1e-6);
        for _ in 0..5 {
            p.steer(Thrust { x: 1, y: 0 });
        }
        assert!(p.velocity.x <= p.max_speed);
    }

    #[test]
    fn releasing_thrust_decelerates() {
        let mut p = player();
        p.velocity.x = 4.0;
        p.steer(Thrust::default());
        assert!((p.velocity.x - 4.0 * PLAYER_DECELERATION).abs() < 1e-6);
    }

    #[test]
    fn player_stays_on_screen() {
        let settings = Settings::default();
        let mut p = player();
        for _ in 0..500 {
            p.steer(Thrust { x: 1, y: 1 });
        }
        assert!(p.rect().right() <= settings.screen_width);
        assert!(p.rect().bottom() <= settings.screen_height);
    }

    #[test]
    fn fire_interval_gates_shots() {
        let settings = Settings::default();
        let mut p = player();
        assert_eq!(p.try_fire(1000, &settings).len(), 1);
        assert!(p.try_fire(1000 + p.base_fire_interval, &settings).is_empty());
        assert_eq!(p.try_fire(1001 + p.base_fire_interval, &settings).len(), 1);
    }

    #[test]
    fn loadout_priority() {
        let settings = Settings::default();
        let mut p = player();
        p.apply_powerup(PowerUpKind::RapidFire, 0, &settings);
        assert_eq!(p.loadout(), Loadout::RapidFire);
        assert_eq!(p.try_fire(0, &settings).len(), 2);

        p.apply_powerup(PowerUpKind::Laser, 0, &settings);
        assert_eq!(p.loadout(), Loadout::Laser);

        p.apply_powerup(PowerUpKind::Missile, 0, &settings);
        assert_eq!(p.loadout(), Loadout::Spread);
        let shots = p.try_fire(1000, &settings);
        assert_eq!(shots.len(), 5);
        assert!(shots.iter().all(|s| s.damage == 40 && s.kind == ProjectileKind::Missile));
    }

    #[test]
    fn rapid_fire_quarters_interval() {
        let settings = Settings::default();
        let mut p = player();
        p.apply_powerup(PowerUpKind::RapidFire, 0, &settings);
        assert_eq!(p.fire_interval(), p.base_fire_interval / 4);
    }

    #[test]
    fn effects_expire_after_duration() {
        let settings = Settings::default();
        let mut p = player();
        p.apply_powerup(PowerUpKind::Shield, 1000, &settings);
        assert!(p.update(16, 6000).is_empty());
        assert_eq!(p.update(16, 6001), vec![PowerUpKind::Shield]);
        assert!(!p.effects.is_active(PowerUpKind::Shield));
    }

    #[test]
    fn shield_blocks_damage() {
        let settings = Settings::default();
        let mut p = player();
        p.apply_powerup(PowerUpKind::Shield, 0, &settings);
        assert!(p.take_damage(50));
        assert_eq!(p.health, p.max_health);
    }

    #[test]
    fn lethal_damage_clamps_to_zero() {
        let mut p = player();
        assert!(!p.take_damage(1000));
        assert_eq!(p.health, 0);
        assert!(!p.alive);
        assert_eq!(p.hit_flash_ms, PLAYER_HIT_FLASH_MS);
    }

    #[test]
    fn heal_is_capped() {
        let settings = Settings::default();
        let mut p = player();
        p.take_damage(10);
        p.apply_powerup(PowerUpKind::Health, 0, &settings);
        assert_eq!(p.health, p.max_health);
    }

    #[test]
    fn remaining_time_reported() {
        let settings = Settings::default();
        let mut p = player();
        p.apply_powerup(PowerUpKind::Laser, 1000, &settings);
        assert_eq!(p.remaining(PowerUpKind::Laser, 2000), Some(4000));
        assert_eq!(p.remaining(PowerUpKind::Shield, 2000), None);
    }
}
