//! Level progression and end-of-run checks.

use crate::models::events::GameEvent;
use crate::models::world::World;

/// Score needed to leave `level`.
pub fn level_threshold(level: u32, per_level: u64) -> u64 {
    level as u64 * per_level
}

/// Raise the level by at most one per frame once the score passes the
/// current threshold. Returns the new level when it changed.
pub fn update_level(world: &mut World) -> Option<u32> {
    if world.score < level_threshold(world.level, world.settings.level_score_threshold) {
        return None;
    }
    world.level += 1;
    log::info!("level up: {} at score {}", world.level, world.score);
    world.emit(GameEvent::LevelUp(world.level));
    Some(world.level)
}

/// How a run ends, if it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Defeat,
    Victory,
}

pub fn check_outcome(world: &World) -> Option<Outcome> {
    if !world.player.alive {
        Some(Outcome::Defeat)
    } else if world.bosses_defeated >= world.settings.bosses_to_win {
        Some(Outcome::Victory)
    } else {
        None
    }
}
