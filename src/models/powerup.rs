use super::constants::{PowerUpKind, POWERUP_FALL_SPEED, POWERUP_FLOAT_AMPLITUDE, POWERUP_SIZE};
use super::geometry::{Rect, Vec2};

/// A collectible drifting down the screen with a gentle bob.
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Centre line of the bob; falls at a constant speed.
    pub base_y: f32,
    pub float_timer: f32,
    pub alive: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        PowerUp {
            kind,
            pos,
            base_y: pos.y,
            float_timer: 0.0,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWERUP_SIZE, POWERUP_SIZE)
    }

    pub fn update(&mut self, dt: u32) {
        if !self.alive {
            return;
        }
        self.float_timer += dt as f32 * 0.003;
        self.pos.y = self.base_y + self.float_timer.sin() * POWERUP_FLOAT_AMPLITUDE;
        self.base_y += POWERUP_FALL_SPEED;
    }
}
