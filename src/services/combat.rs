//! Weapons fire for the player, enemies and bosses.

use crate::models::events::GameEvent;
use crate::models::world::World;

/// Fire the player's guns if the trigger is held and the guns have cycled.
/// Returns the number of projectiles launched.
pub fn player_fire(world: &mut World, trigger: bool) -> usize {
    if !trigger || !world.player.alive {
        return 0;
    }
    let shots = world.player.try_fire(world.game_time, &world.settings);
    let count = shots.len();
    if count > 0 {
        world.projectiles.extend(shots);
        world.emit(GameEvent::ShotFired);
    }
    count
}

/// Let every armed enemy and boss take its shot.
pub fn hostile_fire(world: &mut World) {
    let now = world.game_time;
    let target = world.player.center();

    let mut volley = Vec::new();
    for enemy in world.enemies.iter_mut() {
        if let Some(bullet) = enemy.try_shoot(now, &world.settings) {
            volley.push(bullet);
        }
    }
    for boss in world.bosses.iter_mut() {
        volley.extend(boss.shoot(now, target, &world.settings));
        volley.extend(boss.special_attack(&world.settings));
    }
    world.projectiles.extend(volley);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::boss::Boss;
    use crate::models::constants::EnemyKind;
    use crate::models::enemy::Enemy;
    use crate::models::geometry::Vec2;
    use crate::models::projectile::Owner;
    use crate::models::settings::Settings;
    use crate::models::ship::ShipClass;

    fn world() -> World {
        World::new(Settings::default(), ShipClass::Fighter, 8)
    }

    #[test]
    fn holding_fire_launches_shots() {
        let mut w = world();
        assert_eq!(player_fire(&mut w, false), 0);
        assert_eq!(player_fire(&mut w, true), 1);
        assert_eq!(w.projectiles.len(), 1);
        assert_eq!(w.projectiles[0].owner(), Owner::Player);
        assert_eq!(w.drain_events(), vec![GameEvent::ShotFired]);
    }

    #[test]
    fn guns_cycle_between_shots() {
        let mut w = world();
        player_fire(&mut w, true);
        w.game_time += 16;
        assert_eq!(player_fire(&mut w, true), 0);
        w.game_time += w.player.base_fire_interval;
        assert_eq!(player_fire(&mut w, true), 1);
    }

    #[test]
    fn dead_player_cannot_fire() {
        let mut w = world();
        w.player.alive = false;
        assert_eq!(player_fire(&mut w, true), 0);
    }

    #[test]
    fn heavy_enemy_fires_hostile_bullet() {
        let mut w = world();
        let mut heavy = Enemy::spawn(EnemyKind::Heavy, Vec2::new(100.0, 100.0), 0, &mut w.rng);
        heavy.fire_interval = 2000;
        w.enemies.push(heavy);
        w.game_time = 2001;
        hostile_fire(&mut w);
        assert_eq!(w.projectiles.len(), 1);
        assert_eq!(w.projectiles[0].owner(), Owner::Hostile);
    }

    #[test]
    fn boss_fires_on_its_interval() {
        let mut w = world();
        let boss = Boss::new(0, &w.settings);
        w.bosses.push(boss);
        w.game_time = 999;
        hostile_fire(&mut w);
        assert!(w.projectiles.is_empty());
        w.game_time = 1000;
        hostile_fire(&mut w);
        assert!(!w.projectiles.is_empty());
        assert!(w.projectiles.iter().all(|p| p.owner() == Owner::Hostile));
    }
}
