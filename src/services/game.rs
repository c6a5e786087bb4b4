//! The frame loop
//!
//! Polls input, advances the engine in fixed steps, routes events to audio
//! and the log, renders, and sleeps off the rest of the frame.

use std::thread;
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::game_engine::{Flow, GameEngine, GameState};
use crate::io::{Display, InputSource};
use crate::models::constants::FIXED_STEP_MS;
use crate::models::errors::GameResult;
use crate::models::events::GameEvent;
use crate::ui::{self, FrameBuffer};

/// Steps run per frame at most, so a stall does not snowball.
const MAX_STEPS_PER_FRAME: u32 = 5;
const STEP: u64 = FIXED_STEP_MS as u64;

/// Frames per second over a rolling one-second window.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: u64,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(initial: f32) -> Self {
        FpsCounter {
            fps: initial,
            ..Self::default()
        }
    }

    pub fn frame(&mut self, now: u64) {
        self.frames += 1;
        let elapsed = now.saturating_sub(self.window_start);
        if elapsed >= 1000 {
            self.fps = self.frames as f32 * 1000.0 / elapsed as f32;
            self.frames = 0;
            self.window_start = now;
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

pub struct Game<T: InputSource + Display> {
    pub engine: GameEngine,
    terminal: T,
    audio: AudioManager,
    frame: FrameBuffer,
    fps: FpsCounter,
    accumulator: u64,
    last_frame: u64,
    last_state: Option<GameState>,
}

impl<T: InputSource + Display> Game<T> {
    pub fn new(engine: GameEngine, terminal: T, audio: AudioManager) -> Self {
        let (cols, rows) = terminal.size();
        let fps = FpsCounter::new(engine.settings().fps as f32);
        Game {
            engine,
            terminal,
            audio,
            frame: FrameBuffer::new(cols, rows),
            fps,
            accumulator: 0,
            last_frame: 0,
            last_state: None,
        }
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Run until the player exits.
    pub fn run(&mut self) -> GameResult<()> {
        let start = Instant::now();
        let frame_time = Duration::from_millis(self.engine.settings().frame_ms());
        log::info!("frame loop started at {} fps", self.engine.settings().fps);

        loop {
            let frame_start = Instant::now();
            let now = start.elapsed().as_millis() as u64;
            if self.frame(now)? == Flow::Exit {
                break;
            }
            if let Some(rest) = frame_time.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }

        let world = self.engine.world();
        log::info!(
            "exiting: score {} level {} enemies {} bosses {}",
            world.score,
            world.level,
            world.enemies_destroyed,
            world.bosses_defeated
        );
        Ok(())
    }

    /// One pass of the loop at wall-clock time `now` (ms since start).
    pub fn frame(&mut self, now: u64) -> GameResult<Flow> {
        let elapsed = now.saturating_sub(self.last_frame);
        self.last_frame = now;

        let input = self.terminal.poll(now)?;
        if self.engine.handle_input(&input) == Flow::Exit {
            return Ok(Flow::Exit);
        }

        let controls = input.controls();
        self.accumulator += elapsed;
        let mut steps = 0;
        while self.accumulator >= STEP && steps < MAX_STEPS_PER_FRAME {
            self.engine.tick(FIXED_STEP_MS, controls);
            self.accumulator -= STEP;
            steps += 1;
        }
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= STEP {
            log::debug!("dropping {} ms of backlog", self.accumulator);
            self.accumulator = 0;
        }

        self.route_events();
        self.audio.update(elapsed as u32);

        self.fps.frame(now);
        self.render()?;
        Ok(Flow::Continue)
    }

    fn route_events(&mut self) {
        let state = self.engine.state();
        if self.last_state != Some(state) {
            self.audio.follow_state(&state);
            self.last_state = Some(state);
        }
        for event in self.engine.drain_events() {
            match event {
                GameEvent::BossSpawned => log::info!("boss spawned"),
                GameEvent::PowerUpCollected(kind) => log::debug!("power-up {}", kind.label()),
                _ => log::trace!("event {:?}", event),
            }
            self.audio.handle_event(&event);
        }
    }

    fn render(&mut self) -> GameResult<()> {
        let (cols, rows) = self.terminal.size();
        if self.frame.width() != cols || self.frame.height() != rows {
            self.frame = FrameBuffer::new(cols, rows);
        }
        ui::compose(&self.engine, self.fps.fps(), &mut self.frame);
        self.terminal.present(&self.frame)
    }
}
