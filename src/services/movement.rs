//! Per-frame movement and off-screen culling.

use crate::models::constants::CULL_MARGIN;
use crate::models::effects::ThrustDirection;
use crate::models::events::GameEvent;
use crate::models::player::Thrust;
use crate::models::world::World;

/// Speeds below this do not leave an exhaust trail.
const THRUSTER_THRESHOLD: f32 = 0.5;

/// Steer the player, tick its timers and emit exhaust particles.
pub fn move_player(world: &mut World, thrust: Thrust, dt: u32) {
    if !world.player.alive {
        return;
    }
    world.player.steer(thrust);

    let expired = world.player.update(dt, world.game_time);
    for kind in expired {
        log::debug!("{} expired", kind.label());
        world.emit(GameEvent::PowerUpExpired(kind));
    }

    let v = world.player.velocity;
    let center = world.player.center();
    let intensity = v.x.abs() + v.y.abs();
    if v.y.abs() > THRUSTER_THRESHOLD {
        let dir = if v.y < 0.0 { ThrustDirection::Forward } else { ThrustDirection::Backward };
        world.particles.add_thruster(&mut world.rng, center, dir, intensity * 0.3);
    }
    if v.x.abs() > THRUSTER_THRESHOLD {
        let dir = if v.x < 0.0 { ThrustDirection::Left } else { ThrustDirection::Right };
        world.particles.add_thruster(&mut world.rng, center, dir, intensity * 0.2);
    }
}

/// Advance enemies, bosses, projectiles and power-ups by one frame.
pub fn move_entities(world: &mut World, dt: u32) {
    let width = world.settings.screen_width;
    for enemy in world.enemies.iter_mut() {
        enemy.update(dt, width);
    }
    for boss in world.bosses.iter_mut() {
        boss.update(dt, &mut world.rng);
    }
    for projectile in world.projectiles.iter_mut() {
        projectile.update();
    }
    for powerup in world.powerups.iter_mut() {
        powerup.update(dt);
    }
}

/// Remove entities that have left the playfield.
pub fn cull_offscreen(world: &mut World) {
    let bounds = world.bounds();
    let floor = bounds.bottom() + CULL_MARGIN;
    world.enemies.retain(|e| e.pos.y <= floor);
    world.powerups.retain(|p| p.pos.y <= floor);
    world.projectiles.retain(|p| !p.rect().is_outside(&bounds, CULL_MARGIN));
}

/// Remove everything that died this frame.
pub fn cleanup_dead(world: &mut World) {
    world.enemies.retain(|e| e.alive);
    world.bosses.retain(|b| b.alive);
    world.projectiles.retain(|p| p.alive);
    world.powerups.retain(|p| p.alive);
}
