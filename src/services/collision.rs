//! Rectangle collision checks and their consequences.
//!
//! Checks run in a fixed order each frame: ship against enemies, bosses and
//! power-ups, then player shots against enemies and bosses, then hostile
//! shots against the ship. A projectile is spent on the first thing it hits.

use crate::models::constants::{
    ExplosionSize, BOSS_CONTACT_COOLDOWN_MS, BOSS_CONTACT_DAMAGE,
};
use crate::models::events::GameEvent;
use crate::models::geometry::Vec2;
use crate::models::projectile::Owner;
use crate::models::world::World;

pub fn check_collisions(world: &mut World) {
    player_enemy(world);
    player_boss(world);
    player_powerup(world);
    player_shots_enemies(world);
    player_shots_bosses(world);
    hostile_shots_player(world);
}

fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Damage the ship and report what happened.
fn hurt_player(world: &mut World, damage: i32) {
    let was_alive = world.player.alive;
    if world.player.take_damage(damage) {
        world.emit(GameEvent::ShieldAbsorbed);
        return;
    }
    world.emit(GameEvent::PlayerHit { damage });
    if was_alive && !world.player.alive {
        log::info!("player destroyed with score {}", world.score);
        let center = world.player.center();
        world.add_explosion(center, ExplosionSize::Large);
        world.emit(GameEvent::PlayerDestroyed);
    }
}

/// Ramming an enemy destroys it and costs the ship its contact damage.
/// No points are awarded for rams.
fn player_enemy(world: &mut World) {
    if !world.player.alive {
        return;
    }
    let ship = world.player.rect();
    let mut rams = Vec::new();
    for enemy in world.enemies.iter_mut() {
        if enemy.alive && ship.intersects(&enemy.rect()) {
            enemy.alive = false;
            rams.push((enemy.rect().center(), enemy.contact_damage()));
        }
    }
    for (center, damage) in rams {
        let impact = midpoint(ship.center(), center);
        world.particles.add_collision_impact(&mut world.rng, impact);
        hurt_player(world, damage);
        world.add_explosion(center, ExplosionSize::Normal);
    }
}

fn player_boss(world: &mut World) {
    if !world.player.alive {
        return;
    }
    let ship = world.player.rect();
    let now = world.game_time;
    let touching = world
        .bosses
        .iter()
        .find(|b| b.alive && ship.intersects(&b.rect()))
        .map(|b| b.rect().center());

    if let Some(boss_center) = touching {
        let cooled_down = world
            .player
            .last_boss_contact
            .map_or(true, |t| now.saturating_sub(t) >= BOSS_CONTACT_COOLDOWN_MS);
        if !cooled_down {
            return;
        }
        world.player.last_boss_contact = Some(now);
        let impact = midpoint(ship.center(), boss_center);
        world.particles.add_collision_impact(&mut world.rng, impact);
        hurt_player(world, BOSS_CONTACT_DAMAGE);
        world.add_explosion(impact, ExplosionSize::Large);
    }
}

fn player_powerup(world: &mut World) {
    if !world.player.alive {
        return;
    }
    let ship = world.player.rect();
    let now = world.game_time;
    let mut collected = Vec::new();
    for powerup in world.powerups.iter_mut() {
        if powerup.alive && ship.intersects(&powerup.rect()) {
            powerup.alive = false;
            collected.push(powerup.kind);
        }
    }
    for kind in collected {
        log::debug!("collected {}", kind.label());
        world.player.apply_powerup(kind, now, &world.settings);
        world.emit(GameEvent::PowerUpCollected(kind));
    }
}

fn player_shots_enemies(world: &mut World) {
    let mut hits = Vec::new();
    let mut kills = Vec::new();
    for projectile in world.projectiles.iter_mut() {
        if !projectile.alive || projectile.owner() != Owner::Player {
            continue;
        }
        let shot = projectile.rect();
        if let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|e| e.alive && shot.intersects(&e.rect()))
        {
            projectile.alive = false;
            hits.push(shot.center());
            if enemy.take_damage(projectile.damage) {
                kills.push((enemy.rect().center(), enemy.kind, enemy.points()));
            }
        }
    }

    for at in hits {
        world.particles.add_hit(&mut world.rng, at);
        world.emit(GameEvent::EnemyHit);
    }
    for (center, kind, points) in kills {
        world.enemies_destroyed += 1;
        world.add_explosion(center, ExplosionSize::Small);
        world.add_score(points);
        world.emit(GameEvent::EnemyDestroyed { kind, points });
    }
}

fn player_shots_bosses(world: &mut World) {
    let mut hits = Vec::new();
    let mut kills = Vec::new();
    for projectile in world.projectiles.iter_mut() {
        if !projectile.alive || projectile.owner() != Owner::Player {
            continue;
        }
        let shot = projectile.rect();
        if let Some(boss) = world
            .bosses
            .iter_mut()
            .find(|b| b.alive && shot.intersects(&b.rect()))
        {
            projectile.alive = false;
            hits.push(shot.center());
            if boss.take_damage(projectile.damage) {
                kills.push((boss.rect().center(), boss.points()));
            }
        }
    }

    for at in hits {
        world.particles.add_hit(&mut world.rng, at);
        world.emit(GameEvent::BossHit);
    }
    for (center, points) in kills {
        world.bosses_defeated += 1;
        log::info!("boss {} destroyed", world.bosses_defeated);
        world.add_explosion(center, ExplosionSize::Large);
        world.add_score(points);
        world.emit(GameEvent::BossDestroyed { points });
    }
}

fn hostile_shots_player(world: &mut World) {
    if !world.player.alive {
        return;
    }
    let ship = world.player.rect();
    let mut impacts = Vec::new();
    for projectile in world.projectiles.iter_mut() {
        if projectile.alive && projectile.owner() == Owner::Hostile && projectile.rect().intersects(&ship) {
            projectile.alive = false;
            impacts.push((projectile.pos, projectile.damage));
        }
    }
    for (at, damage) in impacts {
        if !world.player.alive {
            break;
        }
        world.particles.add_hit(&mut world.rng, ship.center());
        hurt_player(world, damage);
        world.add_explosion(at, ExplosionSize::Small);
    }
}
