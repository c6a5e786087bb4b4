//! Enemy, power-up and boss spawning on game-time schedules.

use rand::Rng;

use crate::models::boss::Boss;
use crate::models::constants::{
    EnemyKind, PowerUpKind, ENEMY_SPAWN_MARGIN, ENEMY_SPAWN_SPEEDUP_PER_LEVEL_MS,
    MIN_ENEMY_SPAWN_INTERVAL_MS, POWERUP_SIZE,
};
use crate::models::enemy::Enemy;
use crate::models::events::GameEvent;
use crate::models::geometry::Vec2;
use crate::models::powerup::PowerUp;
use crate::models::world::World;

/// Milliseconds between enemy spawns at `level`; shrinks by 100 ms per level
/// down to 500 ms.
pub fn enemy_spawn_interval(base_ms: u64, level: u32) -> u64 {
    base_ms
        .saturating_sub(level as u64 * ENEMY_SPAWN_SPEEDUP_PER_LEVEL_MS)
        .max(MIN_ENEMY_SPAWN_INTERVAL_MS)
}

/// Pick an enemy kind; tougher kinds become likelier as the level rises.
pub fn choose_enemy_kind(level: u32, rng: &mut impl Rng) -> EnemyKind {
    let table = if level <= 2 {
        [EnemyKind::Basic, EnemyKind::Basic, EnemyKind::Fast]
    } else if level <= 5 {
        [EnemyKind::Basic, EnemyKind::Fast, EnemyKind::Heavy]
    } else {
        [EnemyKind::Fast, EnemyKind::Heavy, EnemyKind::Heavy]
    };
    table[rng.gen_range(0..table.len())]
}

pub fn spawn_enemy(world: &mut World) {
    let max_x = (world.settings.screen_width - ENEMY_SPAWN_MARGIN).max(0.0) as i32;
    let x = world.rng.gen_range(0..=max_x) as f32;
    let kind = choose_enemy_kind(world.level, &mut world.rng);
    let enemy = Enemy::spawn(kind, Vec2::new(x, -ENEMY_SPAWN_MARGIN), world.game_time, &mut world.rng);
    log::trace!("spawned {} enemy at x={}", kind.name(), x);
    world.enemies.push(enemy);
}

pub fn spawn_powerup(world: &mut World) {
    let lo = ENEMY_SPAWN_MARGIN as i32;
    let hi = (world.settings.screen_width - ENEMY_SPAWN_MARGIN - POWERUP_SIZE).max(ENEMY_SPAWN_MARGIN) as i32;
    let x = world.rng.gen_range(lo..=hi) as f32;
    let kind = PowerUpKind::ALL[world.rng.gen_range(0..PowerUpKind::ALL.len())];
    log::debug!("spawned {} power-up at x={}", kind.label(), x);
    world.powerups.push(PowerUp::new(kind, Vec2::new(x, -ENEMY_SPAWN_MARGIN)));
}

pub fn spawn_boss(world: &mut World) {
    log::info!("boss incoming at level {} (score {})", world.level, world.score);
    let boss = Boss::new(world.game_time, &world.settings);
    world.bosses.push(boss);
    world.emit(GameEvent::BossSpawned);
}

/// A boss appears once the score reaches `level * boss_spawn_score` and no
/// boss is on screen.
pub fn boss_due(world: &World) -> bool {
    world.score >= world.level as u64 * world.settings.boss_spawn_score && !world.boss_active()
}

/// Run all spawn schedules for the current game time.
pub fn run_spawners(world: &mut World) {
    let now = world.game_time;

    let interval = enemy_spawn_interval(world.settings.enemy_spawn_interval_ms, world.level);
    if now.saturating_sub(world.last_enemy_spawn) > interval {
        spawn_enemy(world);
        world.last_enemy_spawn = now;
    }

    if now.saturating_sub(world.last_powerup_spawn) > world.settings.powerup_spawn_interval_ms {
        spawn_powerup(world);
        world.last_powerup_spawn = now;
    }

    if boss_due(world) {
        spawn_boss(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::Settings;
    use crate::models::ship::ShipClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn world() -> World {
        World::new(Settings::default(), ShipClass::Fighter, 11)
    }

    #[test]
    fn spawn_interval_shrinks_with_level_but_has_floor() {
        assert_eq!(enemy_spawn_interval(1500, 1), 1400);
        assert_eq!(enemy_spawn_interval(1500, 5), 1000);
        assert_eq!(enemy_spawn_interval(1500, 10), 500);
        assert_eq!(enemy_spawn_interval(1500, 50), 500);
    }

    #[test]
    fn early_levels_never_spawn_heavies() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            assert_ne!(choose_enemy_kind(1, &mut rng), EnemyKind::Heavy);
        }
    }

    #[test]
    fn late_levels_never_spawn_basics() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..200 {
            assert_ne!(choose_enemy_kind(6, &mut rng), EnemyKind::Basic);
        }
    }

    #[test]
    fn enemy_spawns_after_interval() {
        let mut w = world();
        w.game_time = 1400;
        run_spawners(&mut w);
        assert!(w.enemies.is_empty());
        w.game_time = 1401;
        run_spawners(&mut w);
        assert_eq!(w.enemies.len(), 1);
        assert_eq!(w.last_enemy_spawn, 1401);
        let e = &w.enemies[0];
        assert!(e.pos.x >= 0.0 && e.pos.x <= w.settings.screen_width - ENEMY_SPAWN_MARGIN);
        assert_eq!(e.pos.y, -ENEMY_SPAWN_MARGIN);
    }

    #[test]
    fn powerup_spawns_after_interval() {
        let mut w = world();
        w.last_enemy_spawn = 20_000;
        w.game_time = 10_001;
        run_spawners(&mut w);
        assert_eq!(w.powerups.len(), 1);
    }

    #[test]
    fn boss_spawns_once_per_threshold() {
        let mut w = world();
        w.last_enemy_spawn = 1_000_000;
        w.last_powerup_spawn = 1_000_000;
        w.score = 4999;
        run_spawners(&mut w);
        assert!(w.bosses.is_empty());

        w.score = 5000;
        run_spawners(&mut w);
        assert_eq!(w.bosses.len(), 1);
        assert!(w.drain_events().contains(&GameEvent::BossSpawned));

        run_spawners(&mut w);
        assert_eq!(w.bosses.len(), 1, "no second boss while one is alive");
    }
}
