/// Fixed simulation step in milliseconds. Per-frame speeds below assume this step.
pub const FIXED_STEP_MS: u32 = 16;

pub const PLAYER_WIDTH: f32 = 48.0;
pub const PLAYER_HEIGHT: f32 = 48.0;
pub const PLAYER_ACCELERATION: f32 = 0.8;
pub const PLAYER_DECELERATION: f32 = 0.85;
pub const PLAYER_HIT_FLASH_MS: u32 = 200;
pub const PLAYER_BULLET_DAMAGE: i32 = 20;
pub const HEALTH_POWERUP_AMOUNT: i32 = 25;

pub const ENEMY_SPAWN_MARGIN: f32 = 50.0;
pub const ENEMY_CONTACT_DAMAGE: i32 = 25;
pub const MIN_ENEMY_SPAWN_INTERVAL_MS: u64 = 500;
pub const ENEMY_SPAWN_SPEEDUP_PER_LEVEL_MS: u64 = 100;

pub const BOSS_WIDTH: f32 = 120.0;
pub const BOSS_HEIGHT: f32 = 80.0;
pub const BOSS_POINTS: u64 = 1000;
pub const BOSS_TARGET_Y: f32 = 100.0;
pub const BOSS_SPAWN_Y: f32 = -200.0;
pub const BOSS_FIRE_INTERVAL_MS: u64 = 1000;
pub const BOSS_PATTERN_INTERVAL_MS: u64 = 4000;
pub const BOSS_SPECIAL_INTERVAL_MS: u64 = 5000;
pub const BOSS_SWEEP_CYCLE_MS: u64 = 3000;
pub const BOSS_SWEEP_MARGIN: f32 = 100.0;
pub const BOSS_CONTACT_DAMAGE: i32 = 50;
pub const BOSS_CONTACT_COOLDOWN_MS: u64 = 500;
pub const BOSS_AIMED_SHOT_SPEED: f32 = 8.0;

pub const POWERUP_SIZE: f32 = 30.0;
pub const POWERUP_FALL_SPEED: f32 = 2.0;
pub const POWERUP_FLOAT_AMPLITUDE: f32 = 10.0;

pub const HOSTILE_PROJECTILE_DAMAGE: i32 = 10;
/// Entities further than this outside the screen are removed.
pub const CULL_MARGIN: f32 = 50.0;

pub const EXPLOSION_FRAMES: u32 = 8;
pub const EXPLOSION_FRAME_MS: u32 = 100;

pub const STAR_COUNT: usize = 120;

pub const SPLASH_DURATION_MS: u32 = 3000;
pub const NOTIFICATION_DURATION_MS: u32 = 2000;

/// Angles (radians) of the five-way spread shot.
pub const SPREAD_ANGLES: [f32; 5] = [-0.3, -0.15, 0.0, 0.15, 0.3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Basic,
    Fast,
    Heavy,
}

impl EnemyKind {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Basic => "BASIC",
            EnemyKind::Fast => "FAST",
            EnemyKind::Heavy => "HEAVY",
        }
    }

    pub fn max_health(&self) -> i32 {
        match self {
            EnemyKind::Basic => 30,
            EnemyKind::Fast => 20,
            EnemyKind::Heavy => 60,
        }
    }

    /// Inclusive range of downward speed in pixels per frame.
    pub fn speed_range(&self) -> (i32, i32) {
        match self {
            EnemyKind::Basic => (2, 4),
            EnemyKind::Fast => (4, 6),
            EnemyKind::Heavy => (1, 3),
        }
    }

    pub fn points(&self) -> u64 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Fast => 15,
            EnemyKind::Heavy => 25,
        }
    }

    pub fn can_shoot(&self) -> bool {
        matches!(self, EnemyKind::Heavy)
    }

    pub fn size(&self) -> (f32, f32) {
        match self {
            EnemyKind::Basic => (40.0, 40.0),
            EnemyKind::Fast => (32.0, 32.0),
            EnemyKind::Heavy => (56.0, 56.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Health,
    RapidFire,
    Shield,
    Missile,
    Laser,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Health,
        PowerUpKind::RapidFire,
        PowerUpKind::Shield,
        PowerUpKind::Missile,
        PowerUpKind::Laser,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Health => "Health",
            PowerUpKind::RapidFire => "Rapid Fire",
            PowerUpKind::Shield => "Shield",
            PowerUpKind::Missile => "Spread Shot",
            PowerUpKind::Laser => "Laser",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            PowerUpKind::Health => '+',
            PowerUpKind::RapidFire => 'R',
            PowerUpKind::Shield => 'S',
            PowerUpKind::Missile => 'M',
            PowerUpKind::Laser => 'L',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionSize {
    Small,
    Normal,
    Large,
}

impl ExplosionSize {
    /// Diameter in world pixels of the first frame.
    pub fn base_diameter(&self) -> f32 {
        match self {
            ExplosionSize::Small => 32.0,
            ExplosionSize::Normal => 64.0,
            ExplosionSize::Large => 128.0,
        }
    }
}
