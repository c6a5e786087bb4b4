//! Game state machine
//!
//! Owns the current [`World`] and moves between the splash screen, menus,
//! play, pause and the end screens. Input is applied once per frame through
//! [`GameEngine::handle_input`]; simulation advances through
//! [`GameEngine::tick`], which only moves the game clock while playing.

use crate::io::{InputFrame, Key};
use crate::models::constants::{NOTIFICATION_DURATION_MS, SPLASH_DURATION_MS};
use crate::models::events::GameEvent;
use crate::models::player::Controls;
use crate::models::settings::Settings;
use crate::models::ship::ShipClass;
use crate::models::world::World;
use crate::services::{collision, combat, effects, movement, progression, spawning};
use crate::services::progression::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Splash,
    Menu,
    ShipSelect,
    Playing,
    Paused,
    GameOver,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    StartGame,
    Settings,
    Credits,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::StartGame,
        MenuOption::Settings,
        MenuOption::Credits,
        MenuOption::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::StartGame => "Start Game",
            MenuOption::Settings => "Settings",
            MenuOption::Credits => "Credits",
            MenuOption::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOption {
    Resume,
    MainMenu,
    Exit,
}

impl PauseOption {
    pub const ALL: [PauseOption; 3] = [PauseOption::Resume, PauseOption::MainMenu, PauseOption::Exit];

    pub fn label(&self) -> &'static str {
        match self {
            PauseOption::Resume => "Resume",
            PauseOption::MainMenu => "Main Menu",
            PauseOption::Exit => "Exit",
        }
    }
}

/// Whether the frame loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A short message shown over the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub remaining_ms: u32,
}

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}

pub struct GameEngine {
    settings: Settings,
    state: GameState,
    world: World,
    ship: ShipClass,
    seed: u64,
    runs: u64,
    menu_index: usize,
    pause_index: usize,
    splash_ms: u32,
    notification: Option<Notification>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Creates an engine on the splash screen.
    ///
    /// # Arguments
    ///
    /// * `settings` - Validated settings for every run
    /// * `ship` - Ship preselected on the ship select screen
    /// * `seed` - Seed of the first run; each restart uses the next seed
    pub fn new(settings: Settings, ship: ShipClass, seed: u64) -> Self {
        let world = World::new(settings.clone(), ship, seed);
        GameEngine {
            settings,
            state: GameState::Splash,
            world,
            ship,
            seed,
            runs: 0,
            menu_index: 0,
            pause_index: 0,
            splash_ms: 0,
            notification: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ship(&self) -> ShipClass {
        self.ship
    }

    pub fn menu_selection(&self) -> MenuOption {
        MenuOption::ALL[self.menu_index]
    }

    pub fn pause_selection(&self) -> PauseOption {
        PauseOption::ALL[self.pause_index]
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// 0.0 when the splash screen appears, 1.0 when it times out.
    pub fn splash_progress(&self) -> f32 {
        (self.splash_ms as f32 / SPLASH_DURATION_MS as f32).min(1.0)
    }

    /// Engine and world events since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        let mut events = std::mem::take(&mut self.events);
        events.extend(self.world.drain_events());
        events
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            log::debug!("state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn notify(&mut self, text: &str) {
        self.notification = Some(Notification {
            text: text.to_string(),
            remaining_ms: NOTIFICATION_DURATION_MS,
        });
    }

    /// Begin a fresh run with the selected ship.
    pub fn start_game(&mut self) {
        let seed = self.seed.wrapping_add(self.runs);
        self.runs += 1;
        log::info!("starting run {} as {} (seed {})", self.runs, self.ship, seed);
        self.world = World::new(self.settings.clone(), self.ship, seed);
        self.pause_index = 0;
        self.set_state(GameState::Playing);
        self.events.push(GameEvent::GameStarted);
    }

    fn return_to_menu(&mut self) {
        self.menu_index = 0;
        self.set_state(GameState::Menu);
    }

    /// Apply one frame of keyboard input.
    pub fn handle_input(&mut self, input: &InputFrame) -> Flow {
        if input.quit {
            return Flow::Exit;
        }
        for &key in &input.pressed {
            if self.handle_key(key) == Flow::Exit {
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    fn handle_key(&mut self, key: Key) -> Flow {
        if key == Key::Char('v') && self.state != GameState::Splash {
            self.events.push(GameEvent::MuteToggled);
            return Flow::Continue;
        }
        match self.state {
            GameState::Splash => {
                self.return_to_menu();
                Flow::Continue
            }
            GameState::Menu => self.menu_key(key),
            GameState::ShipSelect => {
                self.ship_select_key(key);
                Flow::Continue
            }
            GameState::Playing => {
                if key == Key::Back {
                    log::debug!("paused at game time {}", self.world.game_time);
                    self.pause_index = 0;
                    self.set_state(GameState::Paused);
                }
                Flow::Continue
            }
            GameState::Paused => self.pause_key(key),
            GameState::GameOver | GameState::Victory => self.end_screen_key(key),
        }
    }

    fn menu_key(&mut self, key: Key) -> Flow {
        match key {
            Key::Up => {
                self.menu_index = wrap(self.menu_index, -1, MenuOption::ALL.len());
                self.events.push(GameEvent::MenuNavigate);
            }
            Key::Down => {
                self.menu_index = wrap(self.menu_index, 1, MenuOption::ALL.len());
                self.events.push(GameEvent::MenuNavigate);
            }
            Key::Confirm | Key::Fire => {
                self.events.push(GameEvent::MenuSelect);
                match self.menu_selection() {
                    MenuOption::StartGame => self.set_state(GameState::ShipSelect),
                    MenuOption::Settings => self.notify("Settings menu coming soon!"),
                    MenuOption::Credits => self.notify("Credits coming soon!"),
                    MenuOption::Exit => return Flow::Exit,
                }
            }
            Key::Back => return Flow::Exit,
            _ => {}
        }
        Flow::Continue
    }

    fn ship_select_key(&mut self, key: Key) {
        match key {
            Key::Left | Key::Up => {
                self.ship = self.ship.prev();
                self.events.push(GameEvent::MenuNavigate);
            }
            Key::Right | Key::Down => {
                self.ship = self.ship.next();
                self.events.push(GameEvent::MenuNavigate);
            }
            Key::Confirm | Key::Fire => {
                self.events.push(GameEvent::MenuSelect);
                self.start_game();
            }
            Key::Back => {
                self.events.push(GameEvent::MenuBack);
                self.return_to_menu();
            }
            _ => {}
        }
    }

    fn pause_key(&mut self, key: Key) -> Flow {
        match key {
            Key::Up => {
                self.pause_index = wrap(self.pause_index, -1, PauseOption::ALL.len());
                self.events.push(GameEvent::MenuNavigate);
            }
            Key::Down => {
                self.pause_index = wrap(self.pause_index, 1, PauseOption::ALL.len());
                self.events.push(GameEvent::MenuNavigate);
            }
            Key::Back => self.set_state(GameState::Playing),
            Key::Confirm | Key::Fire => {
                self.events.push(GameEvent::MenuSelect);
                match self.pause_selection() {
                    PauseOption::Resume => self.set_state(GameState::Playing),
                    PauseOption::MainMenu => self.return_to_menu(),
                    PauseOption::Exit => return Flow::Exit,
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn end_screen_key(&mut self, key: Key) -> Flow {
        match key {
            Key::Char('r') | Key::Confirm | Key::Fire => self.start_game(),
            Key::Char('m') => self.return_to_menu(),
            Key::Back => return Flow::Exit,
            _ => {}
        }
        Flow::Continue
    }

    /// Advance the engine by `dt` milliseconds.
    pub fn tick(&mut self, dt: u32, controls: Controls) {
        if let Some(n) = self.notification.as_mut() {
            n.remaining_ms = n.remaining_ms.saturating_sub(dt);
            if n.remaining_ms == 0 {
                self.notification = None;
            }
        }

        match self.state {
            GameState::Splash => {
                self.splash_ms += dt;
                if self.splash_ms >= SPLASH_DURATION_MS {
                    self.return_to_menu();
                }
            }
            GameState::Playing => self.step(dt, controls),
            GameState::GameOver | GameState::Victory => effects::update_effects(&mut self.world, dt),
            GameState::Menu | GameState::ShipSelect | GameState::Paused => {}
        }
    }

    fn step(&mut self, dt: u32, controls: Controls) {
        let world = &mut self.world;
        world.game_time += dt as u64;

        spawning::run_spawners(world);
        movement::move_player(world, controls.thrust, dt);
        combat::player_fire(world, controls.fire);
        movement::move_entities(world, dt);
        combat::hostile_fire(world);
        collision::check_collisions(world);
        effects::update_effects(world, dt);
        movement::cull_offscreen(world);
        movement::cleanup_dead(world);
        progression::update_level(world);

        self.check_game_over();
    }

    /// Checks for game over conditions and updates the game state
    ///
    /// # Returns
    ///
    /// * `Some(GameState)` if the run has ended (GameOver or Victory)
    /// * `None` if the run is still in progress or not playing
    pub fn check_game_over(&mut self) -> Option<GameState> {
        match self.state {
            GameState::GameOver | GameState::Victory => return Some(self.state),
            GameState::Playing => {}
            _ => return None,
        }

        let score = self.world.score;
        match progression::check_outcome(&self.world)? {
            Outcome::Defeat => {
                log::info!(
                    "game over: score {} level {} enemies {}",
                    score,
                    self.world.level,
                    self.world.enemies_destroyed
                );
                self.set_state(GameState::GameOver);
                self.events.push(GameEvent::GameOver { score });
            }
            Outcome::Victory => {
                log::info!("victory: score {} bosses {}", score, self.world.bosses_defeated);
                self.set_state(GameState::Victory);
                self.events.push(GameEvent::Victory { score });
            }
        }
        Some(self.state)
    }
}
