//! Input/output abstractions
//!
//! Keyboard input arrives as an [`InputFrame`] per frame and finished frames
//! leave through a [`Display`]. Both sit behind traits so the engine and the
//! frame loop can be driven by scripted input in tests.

use std::collections::{HashMap, HashSet};
use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};

use crate::models::errors::{GameError, GameResult};
use crate::models::player::{Controls, Thrust};
use crate::ui::framebuffer::FrameBuffer;
use crate::ui::renderer::TerminalRenderer;

/// Smallest terminal the HUD and overlays fit in.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 20;

/// Logical keys the game understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Space
    Fire,
    /// Enter
    Confirm,
    /// Escape
    Back,
    /// Any other printable key, lowercased.
    Char(char),
}

impl Key {
    /// Map a terminal key code. Arrow keys and WASD both steer.
    pub fn from_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Enter => Some(Key::Confirm),
            KeyCode::Esc => Some(Key::Back),
            KeyCode::Char(' ') => Some(Key::Fire),
            KeyCode::Char(c) => Some(match c.to_ascii_lowercase() {
                'w' => Key::Up,
                's' => Key::Down,
                'a' => Key::Left,
                'd' => Key::Right,
                other => Key::Char(other),
            }),
            _ => None,
        }
    }
}

/// Keyboard state for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    /// Keys that went down this frame, in arrival order.
    pub pressed: Vec<Key>,
    /// Keys currently held.
    pub held: HashSet<Key>,
    /// Ctrl+C or the terminal going away.
    pub quit: bool,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame where `keys` were just pressed and are held.
    pub fn pressing(keys: &[Key]) -> Self {
        InputFrame {
            pressed: keys.to_vec(),
            held: keys.iter().copied().collect(),
            quit: false,
        }
    }

    /// A frame where `keys` are held down without a fresh press.
    pub fn holding(keys: &[Key]) -> Self {
        InputFrame {
            pressed: Vec::new(),
            held: keys.iter().copied().collect(),
            quit: false,
        }
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Flight controls from held keys. Opposite directions cancel.
    pub fn controls(&self) -> Controls {
        let axis = |neg: Key, pos: Key| -> i8 {
            (self.is_held(pos) as i8) - (self.is_held(neg) as i8)
        };
        Controls {
            thrust: Thrust {
                x: axis(Key::Left, Key::Right),
                y: axis(Key::Up, Key::Down),
            },
            fire: self.is_held(Key::Fire),
        }
    }
}

/// Turns press/repeat/release events into held-key state.
///
/// Terminals without release reporting only send presses and auto-repeats,
/// so a key is considered released once `hold_ms` passes without one.
#[derive(Debug, Clone)]
pub struct KeyTracker {
    hold_ms: u64,
    reports_release: bool,
    last_seen: HashMap<Key, u64>,
    pressed: Vec<Key>,
}

impl KeyTracker {
    pub fn new(hold_ms: u64, reports_release: bool) -> Self {
        KeyTracker {
            hold_ms,
            reports_release,
            last_seen: HashMap::new(),
            pressed: Vec::new(),
        }
    }

    pub fn press(&mut self, key: Key, now: u64) {
        if self.last_seen.insert(key, now).is_none() {
            self.pressed.push(key);
        }
    }

    /// Auto-repeat of a key already down. Counts as a press if we had
    /// already timed it out.
    pub fn repeat(&mut self, key: Key, now: u64) {
        self.press(key, now);
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.last_seen.clear();
    }

    /// Close out the frame: expire stale keys and return the frame state.
    pub fn frame(&mut self, now: u64) -> InputFrame {
        if !self.reports_release {
            let hold = self.hold_ms;
            self.last_seen.retain(|_, seen| now.saturating_sub(*seen) <= hold);
        }
        InputFrame {
            pressed: std::mem::take(&mut self.pressed),
            held: self.last_seen.keys().copied().collect(),
            quit: false,
        }
    }
}

/// Source of per-frame keyboard state.
pub trait InputSource {
    /// Gather everything that happened since the last call. `now` is the
    /// wall-clock time in milliseconds since the loop started.
    fn poll(&mut self, now: u64) -> GameResult<InputFrame>;
}

/// Sink for finished frames.
pub trait Display {
    /// Current size in cells.
    fn size(&self) -> (u16, u16);
    fn present(&mut self, frame: &FrameBuffer) -> GameResult<()>;
}

/// Crossterm terminal. Enters raw mode and the alternate screen on
/// construction and restores the terminal on drop.
pub struct TerminalIO {
    out: Stdout,
    tracker: KeyTracker,
    renderer: TerminalRenderer,
    size: (u16, u16),
    enhanced: bool,
}

impl TerminalIO {
    pub fn new(hold_ms: u64) -> GameResult<Self> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            return Err(GameError::TerminalTooSmall { cols, rows });
        }

        enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }

        let enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
            && execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        log::info!(
            "terminal {}x{}, key release events {}",
            cols,
            rows,
            if enhanced { "on" } else { "off" }
        );

        Ok(TerminalIO {
            out,
            tracker: KeyTracker::new(hold_ms, enhanced),
            renderer: TerminalRenderer::new(),
            size: (cols, rows),
            enhanced,
        })
    }

    fn handle_key(&mut self, key: KeyEvent, now: u64) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            return true;
        }
        if let Some(k) = Key::from_code(key.code) {
            match key.kind {
                KeyEventKind::Press => self.tracker.press(k, now),
                KeyEventKind::Repeat => self.tracker.repeat(k, now),
                KeyEventKind::Release => self.tracker.release(k),
            }
        }
        false
    }
}

impl InputSource for TerminalIO {
    fn poll(&mut self, now: u64) -> GameResult<InputFrame> {
        let mut quit = false;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => quit |= self.handle_key(key, now),
                Event::Resize(cols, rows) => {
                    log::debug!("terminal resized to {}x{}", cols, rows);
                    self.size = (cols, rows);
                    self.renderer.invalidate();
                    execute!(self.out, Clear(ClearType::All))?;
                }
                Event::FocusLost => self.tracker.release_all(),
                _ => {}
            }
        }
        let mut frame = self.tracker.frame(now);
        frame.quit = quit;
        Ok(frame)
    }
}

impl Display for TerminalIO {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn present(&mut self, frame: &FrameBuffer) -> GameResult<()> {
        self.renderer.draw(&mut self.out, frame)?;
        Ok(())
    }
}

impl Drop for TerminalIO {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(self.out, PopKeyboardEnhancementFlags);
        }
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        let _ = self.out.flush();
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_and_arrows_steer() {
        assert_eq!(Key::from_code(KeyCode::Char('W')), Some(Key::Up));
        assert_eq!(Key::from_code(KeyCode::Left), Some(Key::Left));
        assert_eq!(Key::from_code(KeyCode::Char(' ')), Some(Key::Fire));
        assert_eq!(Key::from_code(KeyCode::Char('R')), Some(Key::Char('r')));
        assert_eq!(Key::from_code(KeyCode::F(1)), None);
    }

    #[test]
    fn controls_from_held_keys() {
        let frame = InputFrame::holding(&[Key::Left, Key::Up, Key::Fire]);
        let c = frame.controls();
        assert_eq!(c.thrust, Thrust { x: -1, y: -1 });
        assert!(c.fire);

        let frame = InputFrame::holding(&[Key::Left, Key::Right]);
        assert_eq!(frame.controls().thrust.x, 0);
    }

    #[test]
    fn tracker_reports_press_once() {
        let mut t = KeyTracker::new(180, false);
        t.press(Key::Fire, 0);
        let f = t.frame(0);
        assert!(f.was_pressed(Key::Fire));
        assert!(f.is_held(Key::Fire));

        t.repeat(Key::Fire, 30);
        let f = t.frame(30);
        assert!(!f.was_pressed(Key::Fire));
        assert!(f.is_held(Key::Fire));
    }

    #[test]
    fn tracker_times_out_without_release_events() {
        let mut t = KeyTracker::new(180, false);
        t.press(Key::Left, 100);
        assert!(t.frame(280).is_held(Key::Left));
        assert!(!t.frame(281).is_held(Key::Left));
    }

    #[test]
    fn tracker_waits_for_release_when_reported() {
        let mut t = KeyTracker::new(180, true);
        t.press(Key::Left, 0);
        assert!(t.frame(10_000).is_held(Key::Left));
        t.release(Key::Left);
        assert!(!t.frame(10_001).is_held(Key::Left));
    }

    #[test]
    fn scripted_input_ends_with_quit() {
        use test_utils::ScriptedInput;
        let mut input = ScriptedInput::new(vec![InputFrame::pressing(&[Key::Confirm])]);
        assert!(input.poll(0).unwrap().was_pressed(Key::Confirm));
        assert!(input.poll(16).unwrap().quit);
    }
}
