//! User interface and presentation
//!
//! Presenters draw game state into a [`FrameBuffer`] of coloured cells;
//! the [`TerminalRenderer`] flushes only the cells that changed. Nothing
//! here mutates the game.

pub mod framebuffer;
pub mod presenters;
pub mod renderer;

pub use framebuffer::{Cell, FrameBuffer, Rgb, Viewport};
pub use renderer::TerminalRenderer;

use crate::game_engine::{GameEngine, GameState};
use presenters::{HudPresenter, MenuPresenter, WorldPresenter, HUD_ROWS};

/// Viewport for the playfield below the HUD on a `cols` x `rows` screen.
pub fn playfield(engine: &GameEngine, cols: u16, rows: u16) -> Viewport {
    let settings = engine.settings();
    Viewport::new(
        settings.screen_width,
        settings.screen_height,
        cols,
        rows.saturating_sub(HUD_ROWS),
        HUD_ROWS,
    )
}

/// Draw the whole screen for the engine's current state.
pub fn compose(engine: &GameEngine, fps: f32, fb: &mut FrameBuffer) {
    fb.clear();
    let title = engine.settings().title.as_str();
    let world = engine.world();

    match engine.state() {
        GameState::Splash => MenuPresenter::draw_splash(title, engine.splash_progress(), fb),
        GameState::Menu => MenuPresenter::draw_menu(title, engine.menu_selection(), fb),
        GameState::ShipSelect => MenuPresenter::draw_ship_select(engine.ship(), fb),
        GameState::Playing | GameState::Paused | GameState::GameOver | GameState::Victory => {
            let vp = playfield(engine, fb.width(), fb.height());
            WorldPresenter::draw(world, &vp, fb);
            HudPresenter::draw(world, fps, fb);
            match engine.state() {
                GameState::Paused => MenuPresenter::draw_pause(engine.pause_selection(), fb),
                GameState::GameOver => MenuPresenter::draw_game_over(world, fb),
                GameState::Victory => MenuPresenter::draw_victory(world, fb),
                _ => {}
            }
        }
    }

    if let Some(n) = engine.notification() {
        MenuPresenter::draw_notification(n, fb);
    }
}
