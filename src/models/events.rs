use super::constants::{EnemyKind, ExplosionSize, PowerUpKind};

/// Something noteworthy that happened during a frame.
///
/// The simulation never talks to audio or logging directly; the outer loop
/// drains these after every frame and reacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired,
    EnemyHit,
    EnemyDestroyed { kind: EnemyKind, points: u64 },
    BossSpawned,
    BossHit,
    BossDestroyed { points: u64 },
    PlayerHit { damage: i32 },
    ShieldAbsorbed,
    PlayerDestroyed,
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    Explosion(ExplosionSize),
    LevelUp(u32),
    MenuNavigate,
    MenuSelect,
    MenuBack,
    GameStarted,
    MuteToggled,
    GameOver { score: u64 },
    Victory { score: u64 },
}
