//! Game settings
//!
//! Tuning values for a run. Defaults match the classic arcade balance;
//! the command line can override the presentation and audio knobs.

use super::errors::{GameError, GameResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,
    pub title: String,

    pub player_speed: f32,
    pub player_health: i32,
    /// Milliseconds between player shots before ship and power-up modifiers.
    pub base_fire_interval_ms: u64,

    pub enemy_spawn_interval_ms: u64,

    pub boss_health: i32,
    pub boss_speed: f32,

    pub bullet_speed: f32,
    pub missile_speed: f32,

    pub powerup_spawn_interval_ms: u64,
    pub powerup_duration_ms: u64,

    pub master_volume: f32,
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub muted: bool,

    pub level_score_threshold: u64,
    pub boss_spawn_score: u64,
    /// Bosses that must be destroyed to win the run.
    pub bosses_to_win: u32,

    /// How long a key counts as held after its last press when the terminal
    /// does not report key releases.
    pub key_hold_ms: u64,
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            screen_width: 1024.0,
            screen_height: 768.0,
            fps: 60,
            title: "Space Shooter Enhanced".to_string(),
            player_speed: 8.0,
            player_health: 100,
            base_fire_interval_ms: 150,
            enemy_spawn_interval_ms: 1500,
            boss_health: 500,
            boss_speed: 3.0,
            bullet_speed: 12.0,
            missile_speed: 8.0,
            powerup_spawn_interval_ms: 10_000,
            powerup_duration_ms: 5_000,
            master_volume: 0.7,
            music_volume: 0.5,
            sfx_volume: 0.8,
            muted: false,
            level_score_threshold: 1000,
            boss_spawn_score: 5000,
            bosses_to_win: 3,
            key_hold_ms: 180,
            debug: false,
        }
    }
}

impl Settings {
    /// Check every value is usable. Called once at startup.
    pub fn validate(&self) -> GameResult<()> {
        if !self.screen_width.is_finite() || !self.screen_height.is_finite() {
            return Err(GameError::InvalidSetting(format!(
                "screen size must be finite, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.screen_width < 200.0 || self.screen_height < 200.0 {
            return Err(GameError::InvalidSetting(format!(
                "screen must be at least 200x200, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.fps == 0 || self.fps > 240 {
            return Err(GameError::InvalidSetting(format!(
                "fps must be between 1 and 240, got {}",
                self.fps
            )));
        }
        for (name, value) in [
            ("master volume", self.master_volume),
            ("music volume", self.music_volume),
            ("sfx volume", self.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GameError::InvalidSetting(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, value
                )));
            }
        }
        if self.level_score_threshold == 0 || self.boss_spawn_score == 0 {
            return Err(GameError::InvalidSetting(
                "score thresholds must be positive".to_string(),
            ));
        }
        if self.bosses_to_win == 0 {
            return Err(GameError::InvalidSetting(
                "at least one boss must be required to win".to_string(),
            ));
        }
        if self.player_health <= 0 || self.boss_health <= 0 {
            return Err(GameError::InvalidSetting(
                "health values must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Debug mode is also switched on by `DEBUG=1|true|yes|on`.
    pub fn debug_from_env() -> bool {
        std::env::var("DEBUG")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false)
    }

    /// Frame duration in milliseconds for the configured fps.
    pub fn frame_ms(&self) -> u64 {
        1000 / self.fps as u64
    }
}
