//! Sound effects and music
//!
//! The [`AudioManager`] decides what should be heard and how loud. Volume is
//! always `master * category * request`. Actual output goes through an
//! [`AudioSink`], so the game runs the same with a silent sink, the terminal
//! bell, or a recording sink in tests.

use std::io::Write;

use crate::game_engine::GameState;
use crate::models::constants::ExplosionSize;
use crate::models::events::GameEvent;
use crate::models::settings::Settings;

/// Crossfade length when the music changes with the game state.
pub const MUSIC_CROSSFADE_MS: u32 = 2000;
pub const MUSIC_FADE_OUT_MS: u32 = 1500;

/// Request volume for menu cues.
const MENU_VOLUME: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Shoot,
    Explosion,
    PowerUp,
    EnemyHit,
    PlayerHit,
    MenuMove,
    MenuConfirm,
    MenuBack,
    BossSpawn,
    LevelUp,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explosion => "explosion",
            SoundEffect::PowerUp => "powerup",
            SoundEffect::EnemyHit => "enemy_hit",
            SoundEffect::PlayerHit => "player_hit",
            SoundEffect::MenuMove => "menu_move",
            SoundEffect::MenuConfirm => "menu_confirm",
            SoundEffect::MenuBack => "menu_back",
            SoundEffect::BossSpawn => "boss_spawn",
            SoundEffect::LevelUp => "level_up",
        }
    }

    /// Cues worth interrupting the player for.
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            SoundEffect::PlayerHit | SoundEffect::BossSpawn | SoundEffect::LevelUp
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Splash,
    Menu,
    Game,
}

impl MusicTrack {
    /// Track level relative to the music volume.
    pub fn level(&self) -> f32 {
        match self {
            MusicTrack::Splash => 0.8,
            MusicTrack::Menu => 0.8,
            MusicTrack::Game => 1.0,
        }
    }

    /// Which track belongs to a state. `None` means silence.
    pub fn for_state(state: &GameState) -> Option<MusicTrack> {
        match state {
            GameState::Splash => Some(MusicTrack::Splash),
            GameState::Menu | GameState::ShipSelect => Some(MusicTrack::Menu),
            GameState::Playing | GameState::Paused => Some(MusicTrack::Game),
            GameState::GameOver | GameState::Victory => None,
        }
    }
}

/// Where sound ends up.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    /// Set the playing track and its current volume. `None` stops music.
    fn music(&mut self, track: Option<MusicTrack>, volume: f32);
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct SilentSink;

impl AudioSink for SilentSink {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
    fn music(&mut self, _track: Option<MusicTrack>, _volume: f32) {}
}

/// Rings the terminal bell for alert cues. Music is ignored.
pub struct TerminalBell<W: Write> {
    out: W,
    /// Quietest mixed volume that still rings.
    threshold: f32,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out, threshold: 0.2 }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        if effect.is_alert() && volume >= self.threshold {
            let _ = self.out.write_all(b"\x07");
            let _ = self.out.flush();
        }
    }

    fn music(&mut self, _track: Option<MusicTrack>, _volume: f32) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    elapsed_ms: u32,
    duration_ms: u32,
    /// Track to start once a fade-out completes.
    then: Option<MusicTrack>,
    then_fade_ms: u32,
}

pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master: f32,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
    track: Option<MusicTrack>,
    level: f32,
    fade: Option<Fade>,
}

impl AudioManager {
    pub fn new(settings: &Settings, sink: Box<dyn AudioSink>) -> Self {
        AudioManager {
            sink,
            master: settings.master_volume,
            music_volume: settings.music_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.muted,
            track: None,
            level: 0.0,
            fade: None,
        }
    }

    pub fn silent(settings: &Settings) -> Self {
        Self::new(settings, Box::new(SilentSink))
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        log::debug!("audio {}", if muted { "muted" } else { "unmuted" });
        self.push_music();
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.muted);
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.track
    }

    /// Current music volume after mixing, 0.0 when muted.
    pub fn music_level(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn target_level(&self, track: MusicTrack) -> f32 {
        self.master * self.music_volume * track.level()
    }

    fn push_music(&mut self) {
        let level = self.music_level();
        self.sink.music(self.track, level);
    }

    pub fn play(&mut self, effect: SoundEffect, request: f32) {
        if self.muted {
            return;
        }
        let volume = (self.master * self.sfx_volume * request).clamp(0.0, 1.0);
        log::trace!("sound {} at {:.2}", effect.name(), volume);
        self.sink.play(effect, volume);
    }

    /// Start `track` from silence, fading in over `fade_ms`.
    pub fn play_music(&mut self, track: MusicTrack, fade_ms: u32) {
        log::debug!("music {:?} fading in over {} ms", track, fade_ms);
        self.track = Some(track);
        let target = self.target_level(track);
        if fade_ms == 0 {
            self.level = target;
            self.fade = None;
        } else {
            self.level = 0.0;
            self.fade = Some(Fade {
                from: 0.0,
                to: target,
                elapsed_ms: 0,
                duration_ms: fade_ms,
                then: None,
                then_fade_ms: 0,
            });
        }
        self.push_music();
    }

    pub fn fade_out(&mut self, fade_ms: u32) {
        self.fade_to(None, fade_ms, 0);
    }

    /// Track that will be playing once any fade-out finishes.
    fn heading_to(&self) -> Option<MusicTrack> {
        match self.fade {
            Some(f) if f.to == 0.0 => f.then,
            _ => self.track,
        }
    }

    /// Fade the current track out over half of `duration_ms`, then fade the
    /// new one in over the other half. Does nothing if `track` is already
    /// playing or queued.
    pub fn crossfade_to(&mut self, track: Option<MusicTrack>, duration_ms: u32) {
        if self.heading_to() == track {
            return;
        }
        self.fade_to(track, duration_ms / 2, duration_ms / 2);
    }

    fn fade_to(&mut self, next: Option<MusicTrack>, out_ms: u32, in_ms: u32) {
        if self.track.is_none() {
            match next {
                Some(track) => self.play_music(track, in_ms),
                None => self.fade = None,
            }
            return;
        }
        self.fade = Some(Fade {
            from: self.level,
            to: 0.0,
            elapsed_ms: 0,
            duration_ms: out_ms.max(1),
            then: next,
            then_fade_ms: in_ms,
        });
    }

    /// Advance any fade in progress.
    pub fn update(&mut self, dt: u32) {
        let Some(mut fade) = self.fade else {
            return;
        };
        fade.elapsed_ms = (fade.elapsed_ms + dt).min(fade.duration_ms);
        let t = fade.elapsed_ms as f32 / fade.duration_ms as f32;
        self.level = fade.from + (fade.to - fade.from) * t;

        if fade.elapsed_ms < fade.duration_ms {
            self.fade = Some(fade);
            self.push_music();
            return;
        }

        self.fade = None;
        if fade.to == 0.0 {
            self.track = None;
            self.level = 0.0;
            match fade.then {
                Some(next) => self.play_music(next, fade.then_fade_ms),
                None => self.push_music(),
            }
        } else {
            self.push_music();
        }
    }

    /// React to a simulation event.
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShotFired => self.play(SoundEffect::Shoot, 0.5),
            GameEvent::EnemyHit | GameEvent::BossHit => self.play(SoundEffect::EnemyHit, 0.6),
            GameEvent::Explosion(size) => {
                let request = match size {
                    ExplosionSize::Small => 0.5,
                    ExplosionSize::Normal => 0.8,
                    ExplosionSize::Large => 1.0,
                };
                self.play(SoundEffect::Explosion, request);
            }
            GameEvent::PlayerHit { .. } => self.play(SoundEffect::PlayerHit, 1.0),
            GameEvent::ShieldAbsorbed => self.play(SoundEffect::EnemyHit, 0.4),
            GameEvent::PowerUpCollected(_) => self.play(SoundEffect::PowerUp, 1.0),
            GameEvent::BossSpawned => self.play(SoundEffect::BossSpawn, 1.0),
            GameEvent::LevelUp(_) | GameEvent::Victory { .. } => {
                self.play(SoundEffect::LevelUp, 1.0)
            }
            GameEvent::MenuNavigate => self.play(SoundEffect::MenuMove, MENU_VOLUME),
            GameEvent::MenuSelect => self.play(SoundEffect::MenuConfirm, MENU_VOLUME),
            GameEvent::MenuBack => self.play(SoundEffect::MenuBack, MENU_VOLUME),
            GameEvent::MuteToggled => self.toggle_mute(),
            GameEvent::EnemyDestroyed { .. }
            | GameEvent::BossDestroyed { .. }
            | GameEvent::PlayerDestroyed
            | GameEvent::PowerUpExpired(_)
            | GameEvent::GameStarted
            | GameEvent::GameOver { .. } => {}
        }
    }

    /// Switch music to whatever `state` calls for.
    pub fn follow_state(&mut self, state: &GameState) {
        match MusicTrack::for_state(state) {
            Some(track) => self.crossfade_to(Some(track), MUSIC_CROSSFADE_MS),
            None if self.heading_to().is_some() => self.fade_out(MUSIC_FADE_OUT_MS),
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        sounds: Vec<(SoundEffect, f32)>,
        music: Vec<(Option<MusicTrack>, f32)>,
    }

    struct Recording(Rc<RefCell<Log>>);

    impl AudioSink for Recording {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().sounds.push((effect, volume));
        }
        fn music(&mut self, track: Option<MusicTrack>, volume: f32) {
            self.0.borrow_mut().music.push((track, volume));
        }
    }

    fn manager() -> (AudioManager, Rc<RefCell<Log>>) {
        let log = Rc::new(RefCell::new(Log::default()));
        let audio = AudioManager::new(&Settings::default(), Box::new(Recording(log.clone())));
        (audio, log)
    }

    #[test]
    fn volume_is_master_times_category_times_request() {
        let (mut audio, log) = manager();
        audio.play(SoundEffect::Shoot, 0.5);
        let (effect, volume) = log.borrow().sounds[0];
        assert_eq!(effect, SoundEffect::Shoot);
        assert!((volume - 0.7 * 0.8 * 0.5).abs() < 1e-6);
    }

    #[test]
    fn muted_manager_plays_nothing() {
        let (mut audio, log) = manager();
        audio.set_muted(true);
        audio.handle_event(&GameEvent::ShotFired);
        assert!(log.borrow().sounds.is_empty());
        assert_eq!(audio.music_level(), 0.0);
    }

    #[test]
    fn mute_toggle_event_flips_mute() {
        let (mut audio, log) = manager();
        audio.handle_event(&GameEvent::MuteToggled);
        assert!(audio.is_muted());
        audio.handle_event(&GameEvent::ShotFired);
        assert!(log.borrow().sounds.is_empty());

        audio.handle_event(&GameEvent::MuteToggled);
        assert!(!audio.is_muted());
        audio.handle_event(&GameEvent::ShotFired);
        assert_eq!(log.borrow().sounds.len(), 1);
    }

    #[test]
    fn events_map_to_cues() {
        let (mut audio, log) = manager();
        audio.handle_event(&GameEvent::MenuNavigate);
        audio.handle_event(&GameEvent::Explosion(ExplosionSize::Large));
        audio.handle_event(&GameEvent::EnemyDestroyed {
            kind: crate::models::constants::EnemyKind::Basic,
            points: 10,
        });
        let played: Vec<SoundEffect> = log.borrow().sounds.iter().map(|s| s.0).collect();
        assert_eq!(played, vec![SoundEffect::MenuMove, SoundEffect::Explosion]);
    }

    #[test]
    fn music_fades_in() {
        let (mut audio, _log) = manager();
        audio.play_music(MusicTrack::Game, 1000);
        assert_eq!(audio.music_level(), 0.0);
        audio.update(500);
        let half = audio.music_level();
        audio.update(500);
        let full = audio.music_level();
        assert!(half > 0.0 && half < full);
        assert!((full - 0.7 * 0.5).abs() < 1e-6);
        assert!(!audio.is_fading());
    }

    #[test]
    fn crossfade_switches_tracks_after_fade_out() {
        let (mut audio, _log) = manager();
        audio.play_music(MusicTrack::Menu, 0);
        audio.crossfade_to(Some(MusicTrack::Game), 2000);
        assert_eq!(audio.current_track(), Some(MusicTrack::Menu));
        audio.update(1000);
        assert_eq!(audio.current_track(), Some(MusicTrack::Game));
        assert_eq!(audio.music_level(), 0.0);
        audio.update(1000);
        assert!(audio.music_level() > 0.0);
        assert!(!audio.is_fading());
    }

    #[test]
    fn crossfade_to_same_track_is_ignored() {
        let (mut audio, _log) = manager();
        audio.play_music(MusicTrack::Menu, 0);
        audio.crossfade_to(Some(MusicTrack::Menu), 2000);
        assert!(!audio.is_fading());
    }

    #[test]
    fn fade_out_stops_music() {
        let (mut audio, log) = manager();
        audio.play_music(MusicTrack::Game, 0);
        audio.fade_out(1500);
        audio.update(1500);
        assert_eq!(audio.current_track(), None);
        assert_eq!(log.borrow().music.last(), Some(&(None, 0.0)));
    }

    #[test]
    fn bell_rings_for_alerts_only() {
        let mut out = Vec::new();
        {
            let mut bell = TerminalBell::new(&mut out);
            bell.play(SoundEffect::Shoot, 1.0);
            bell.play(SoundEffect::PlayerHit, 1.0);
            bell.play(SoundEffect::BossSpawn, 0.1);
        }
        assert_eq!(out, b"\x07");
    }

    #[test]
    fn music_follows_state() {
        assert_eq!(MusicTrack::for_state(&GameState::Menu), Some(MusicTrack::Menu));
        assert_eq!(MusicTrack::for_state(&GameState::Paused), Some(MusicTrack::Game));
        assert_eq!(MusicTrack::for_state(&GameState::GameOver), None);
    }
}
