//! Cosmetic updates: explosions, particles, starfield.

use crate::models::world::World;

pub fn update_effects(world: &mut World, dt: u32) {
    for explosion in world.explosions.iter_mut() {
        explosion.update(dt);
    }
    world.explosions.retain(|e| !e.is_finished());
    world.particles.update(dt);
    world.starfield.update(&mut world.rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::constants::ExplosionSize;
    use crate::models::geometry::Vec2;
    use crate::models::settings::Settings;
    use crate::models::ship::ShipClass;

    #[test]
    fn finished_explosions_are_dropped() {
        let mut w = World::new(Settings::default(), ShipClass::Fighter, 9);
        w.add_explosion(Vec2::new(50.0, 50.0), ExplosionSize::Normal);
        update_effects(&mut w, 16);
        assert_eq!(w.explosions.len(), 1);
        for _ in 0..60 {
            update_effects(&mut w, 16);
        }
        assert!(w.explosions.is_empty());
    }

    #[test]
    fn stars_scroll_down() {
        let mut w = World::new(Settings::default(), ShipClass::Fighter, 9);
        let before: Vec<f32> = w.starfield.stars.iter().map(|s| s.pos.y).collect();
        update_effects(&mut w, 16);
        let moved = w
            .starfield
            .stars
            .iter()
            .zip(before)
            .filter(|(s, y)| s.pos.y > *y)
            .count();
        assert!(moved > 0);
    }
}
