//! World model
//!
//! The aggregate for one run: the player's ship, every hostile, every shot in
//! flight, score, level and the pause-aware game clock. Services mutate it one
//! frame at a time.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::boss::Boss;
use super::constants::{ExplosionSize, STAR_COUNT};
use super::effects::{Explosion, ParticleSystem, Starfield};
use super::enemy::Enemy;
use super::events::GameEvent;
use super::geometry::{Rect, Vec2};
use super::player::Player;
use super::powerup::PowerUp;
use super::projectile::Projectile;
use super::settings::Settings;
use super::ship::ShipClass;

pub struct World {
    pub settings: Settings,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bosses: Vec<Boss>,
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<PowerUp>,
    pub explosions: Vec<Explosion>,
    pub particles: ParticleSystem,
    pub starfield: Starfield,
    pub score: u64,
    pub level: u32,
    pub enemies_destroyed: u32,
    pub bosses_defeated: u32,
    /// Milliseconds of unpaused play.
    pub game_time: u64,
    pub last_enemy_spawn: u64,
    pub last_powerup_spawn: u64,
    pub rng: StdRng,
    events: Vec<GameEvent>,
}

impl World {
    /// Start a fresh run. The same seed and inputs reproduce the same run.
    pub fn new(settings: Settings, ship: ShipClass, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let starfield = Starfield::new(
            &mut rng,
            STAR_COUNT,
            settings.screen_width,
            settings.screen_height,
        );
        let player = Player::new(ship, &settings);
        World {
            settings,
            player,
            enemies: Vec::new(),
            bosses: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            explosions: Vec::new(),
            particles: ParticleSystem::new(),
            starfield,
            score: 0,
            level: 1,
            enemies_destroyed: 0,
            bosses_defeated: 0,
            game_time: 0,
            last_enemy_spawn: 0,
            last_powerup_spawn: 0,
            rng,
            events: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.settings.screen_width, self.settings.screen_height)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Add points scaled by the current level.
    pub fn add_score(&mut self, points: u64) {
        let gained = points * self.level as u64;
        log::debug!("score {} -> {} (+{})", self.score, self.score + gained, gained);
        self.score += gained;
    }

    pub fn add_explosion(&mut self, center: Vec2, size: ExplosionSize) {
        self.explosions.push(Explosion::new(center, size));
        self.particles.add_explosion(&mut self.rng, center, size);
        self.emit(GameEvent::Explosion(size));
    }

    pub fn boss_active(&self) -> bool {
        self.bosses.iter().any(|b| b.alive)
    }

    pub fn is_player_alive(&self) -> bool {
        self.player.alive
    }
}
