use crate::game_engine::{MenuOption, Notification, PauseOption};
use crate::models::constants::{EnemyKind, PowerUpKind};
use crate::models::effects::ParticleKind;
use crate::models::geometry::Rect;
use crate::models::projectile::ProjectileKind;
use crate::models::ship::ShipClass;
use crate::models::world::World;

use super::framebuffer::{Cell, FrameBuffer, Rgb, Viewport};

/// Rows at the top of the screen reserved for the HUD.
pub const HUD_ROWS: u16 = 2;

/// `1234567` -> `1,234,567`.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn fps_color(fps: f32) -> Rgb {
    if fps >= 50.0 {
        Rgb::GREEN
    } else if fps >= 30.0 {
        Rgb::YELLOW
    } else {
        Rgb::RED
    }
}

pub fn health_color(fraction: f32) -> Rgb {
    if fraction > 0.6 {
        Rgb::GREEN
    } else if fraction > 0.3 {
        Rgb::YELLOW
    } else {
        Rgb::RED
    }
}

fn powerup_color(kind: PowerUpKind) -> Rgb {
    match kind {
        PowerUpKind::Health => Rgb::GREEN,
        PowerUpKind::RapidFire => Rgb::YELLOW,
        PowerUpKind::Shield => Rgb::CYAN,
        PowerUpKind::Missile => Rgb::ORANGE,
        PowerUpKind::Laser => Rgb::MAGENTA,
    }
}

/// `[#####-----]` with `width` inner cells.
fn bar(fraction: f32, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn fill_rect(fb: &mut FrameBuffer, vp: &Viewport, rect: &Rect, cell: Cell) {
    let (x, y, w, h) = vp.rect_to_cells(rect);
    for row in y..y + h {
        for col in x..x + w {
            if vp.is_visible(col, row) {
                fb.set(col, row, cell);
            }
        }
    }
}

pub struct WorldPresenter;

impl WorldPresenter {
    pub fn draw(world: &World, vp: &Viewport, fb: &mut FrameBuffer) {
        Self::draw_stars(world, vp, fb);
        Self::draw_powerups(world, vp, fb);
        Self::draw_enemies(world, vp, fb);
        Self::draw_bosses(world, vp, fb);
        Self::draw_projectiles(world, vp, fb);
        Self::draw_particles(world, vp, fb);
        Self::draw_explosions(world, vp, fb);
        Self::draw_player(world, vp, fb);
    }

    fn draw_stars(world: &World, vp: &Viewport, fb: &mut FrameBuffer) {
        for star in &world.starfield.stars {
            let (x, y) = vp.to_cell(star.pos);
            if vp.is_visible(x, y) {
                let ch = if star.brightness > 200 { '*' } else { '.' };
                let b = star.brightness;
                fb.put_char(x, y, ch, Rgb(b, b, b));
            }
        }
    }

    fn draw_powerups(world: &World, vp: &Viewport, fb: &mut FrameBuffer) {
        for p in world.powerups.iter().filter(|p| p.alive) {
            let (x, y) = vp.to_cell(p.rect().center());
            if vp.is_visible(x, y) {
                fb.set(x, y, Cell::new(p.kind.symbol(), powerup_color(p.kind)).bold());
            }
        }
    }

    fn draw_enemies(world: &World, vp: &Viewport, fb: &mut FrameBuffer) {
        for enemy in world.enemies.iter().filter(|e| e.alive) {
            let (ch, color) = match enemy.kind {
                EnemyKind::Basic => ('V', Rgb::RED),
                EnemyKind::Fast => ('v', Rgb::ORANGE),
                EnemyKind::Heavy => ('W', Rgb::MAGENTA),
            };
            let rect = enemy.rect();
            fill_rect(fb, vp, &rect, Cell::new(ch, color));

            if enemy.health < enemy.max_health {
                let (x, y, w, _) = vp.rect_to_cells(&rect);
                let fraction = enemy.health.max(0) as f32 / enemy.max_health as f32;
                let filled = (fraction * w as f32).ceil() as i32;
                for i in 0..w {
                    let (ch, c) = if i < filled { ('=', Rgb::GREEN) } else { ('-', Rgb::RED) };
                    if vp.is_visible(x + i, y - 1) {
                        fb.put_char(x + i, y - 1, ch, c);
                    }
                }
            }
        }
    }

    fn draw_bosses(world: &World, vp: &Viewport, fb: &mut FrameBuffer) {
        for boss in world.bosses.iter().filter(|b| b.alive) {
            let rect = boss.rect();
            fill_rect(fb, vp, &rect, Cell::new('#', Rgb(200, 50, 200)).bold());

            let (x, y, w, _) = vp.rect_to_cells(&rect);
            let fraction = boss.health_fraction();
            let filled = (fraction * w as f32).round() as i32;
            let color = health_color(fraction);
            for i in 0..w {
                let ch = if i < filled { '=' } else { '-' };
                if vp.is_visible(x + i, y - 1) {
                    fb.put_char(x + i, y - 1, ch, color);
                }
            }
        }
    }

    fn draw_projectiles(world: &World, vp: &Viewport, fb: &mut FrameBuffer) {
        for p in world.projectiles.iter().filter(|p| p.alive) {
            let (ch, color) = match p.kind {
                ProjectileKind::Basic => ('|', Rgb::YELLOW),
                ProjectileKind::Enhanced => ('|', Rgb::WHITE),
                ProjectileKind::Missile => ('!', Rgb::ORANGE),
                ProjectileKind::Laser => ('|', Rgb::CYAN),
                ProjectileKind::EnemyBullet => ('o', Rgb::RED),
                ProjectileKind::BossBullet => ('*', Rgb::MAGENTA),
                ProjectileKind::BossMissile => ('v', Rgb::ORANGE),
            };
            let (x, y) = vp.to_cell(p.rect().center());
            if vp.is_visible(x, y) {
                fb.put_char(x, y, ch, color);
            }
        }
    }

    fn draw_particles(world: &World, vp: &Viewport, fb: &mut FrameBuffer) {
        for p in &world.particles.particles {
            let (x, y) = vp.to_cell(p.pos);
            if !vp.is_visible(x, y) {
                continue;
            }
            let (ch, color) = match p.kind {
                ParticleKind::Spark => ('\'', Rgb::YELLOW),
                ParticleKind::Explosion => ('.', Rgb::ORANGE),
                ParticleKind::Debris => (',', Rgb::GRAY),
                ParticleKind::Thruster => ('.', Rgb(100, 150, 255)),
                ParticleKind::Collision => ('`', Rgb::WHITE),
            };
            fb.put_char(x, y, ch, color.dim(0.3 + 0.7 * p.intensity()));
        }
    }

    fn draw_explosions(world: &World, vp: &Viewport, fb: &mut FrameBuffer) {
        for e in &world.explosions {
            let progress = e.progress();
            let (ch, color) = if progress < 0.3 {
                ('@', Rgb::YELLOW)
            } else if progress < 0.7 {
                ('*', Rgb::ORANGE)
            } else {
                ('.', Rgb::RED)
            };
            let d = e.diameter();
            let rect = Rect::from_center(e.center, d, d);
            let (x, y, w, h) = vp.rect_to_cells(&rect);
            let (cx, cy) = (x as f32 + w as f32 / 2.0, y as f32 + h as f32 / 2.0);
            let (rx, ry) = (w as f32 / 2.0, h as f32 / 2.0);
            for row in y..y + h {
                for col in x..x + w {
                    let dx = (col as f32 + 0.5 - cx) / rx;
                    let dy = (row as f32 + 0.5 - cy) / ry;
                    if dx * dx + dy * dy <= 1.0 && vp.is_visible(col, row) {
                        fb.put_char(col, row, ch, color);
                    }
                }
            }
        }
    }

    fn draw_player(world: &World, vp: &Viewport, fb: &mut FrameBuffer) {
        let player = &world.player;
        if !player.alive {
            return;
        }
        let color = if player.hit_flash_ms > 0 { Rgb::RED } else { Rgb::CYAN };
        let mut cell = Cell::new('A', color).bold();
        if player.effects.is_active(PowerUpKind::Shield) {
            cell.bg = Rgb(0, 40, 120);
        }
        fill_rect(fb, vp, &player.rect(), cell);
    }
}

pub struct HudPresenter;

impl HudPresenter {
    pub fn draw(world: &World, fps: f32, fb: &mut FrameBuffer) {
        fb.fill(0, 0, fb.width() as i32, HUD_ROWS as i32, Cell::new(' ', Rgb::WHITE));

        let player = &world.player;
        let fraction = player.health.max(0) as f32 / player.max_health.max(1) as f32;
        let health = format!(
            "HP {} {}/{}",
            bar(fraction, 10),
            player.health.max(0),
            player.max_health
        );
        fb.put_str(0, 0, &health, health_color(fraction));

        let mut x = health.chars().count() as i32 + 2;
        let score = format!("SCORE {}", format_thousands(world.score));
        fb.put_str_bold(x, 0, &score, Rgb::WHITE);
        x += score.chars().count() as i32 + 2;
        let level = format!("LVL {}", world.level);
        fb.put_str(x, 0, &level, Rgb::YELLOW);

        let fps_text = format!("FPS {:>3}", fps.round() as i32);
        let fps_x = fb.width() as i32 - fps_text.chars().count() as i32;
        fb.put_str(fps_x, 0, &fps_text, fps_color(fps));

        let mut x = 0;
        let now = world.game_time;
        for kind in PowerUpKind::ALL {
            if let Some(left) = player.remaining(kind, now) {
                let text = format!("{} {}s", kind.label(), left.div_ceil(1000));
                fb.put_str(x, 1, &text, powerup_color(kind));
                x += text.chars().count() as i32 + 2;
            }
        }
        if world.boss_active() {
            let text = "!! BOSS !!";
            let bx = fb.width() as i32 - text.len() as i32;
            fb.put_str_bold(bx, 1, text, Rgb::MAGENTA);
        }
    }
}

pub struct MenuPresenter;

impl MenuPresenter {
    fn title(fb: &mut FrameBuffer, y: i32, text: &str, color: Rgb) {
        let len = text.chars().count() as i32;
        let x = (fb.width() as i32 - len) / 2;
        fb.put_str_bold(x, y, text, color);
    }

    pub fn draw_splash(title: &str, progress: f32, fb: &mut FrameBuffer) {
        let mid = fb.height() as i32 / 2;
        let fade = (progress * 3.0).min(1.0);
        Self::title(fb, mid - 2, &title.to_uppercase(), Rgb::CYAN.dim(fade));
        fb.put_centered(mid, "Defend the sector. Survive the bosses.", Rgb::GRAY);
        fb.put_centered(mid + 2, "Press any key", Rgb::WHITE.dim(fade));
    }

    pub fn draw_menu(title: &str, selected: MenuOption, fb: &mut FrameBuffer) {
        let top = fb.height() as i32 / 2 - 4;
        Self::title(fb, top, &title.to_uppercase(), Rgb::CYAN);
        for (i, option) in MenuOption::ALL.iter().enumerate() {
            let y = top + 3 + i as i32 * 2;
            if *option == selected {
                Self::title(fb, y, &format!("> {} <", option.label()), Rgb::YELLOW);
            } else {
                fb.put_centered(y, option.label(), Rgb::WHITE);
            }
        }
        fb.put_centered(fb.height() as i32 - 2, "Up/Down select   Enter confirm   Esc quit", Rgb::GRAY);
    }

    pub fn draw_ship_select(ship: ShipClass, fb: &mut FrameBuffer) {
        let top = fb.height() as i32 / 2 - 5;
        Self::title(fb, top, "SELECT YOUR STARFIGHTER", Rgb::CYAN);
        Self::title(fb, top + 2, &format!("<  {}  >", ship.name()), Rgb::YELLOW);
        fb.put_centered(top + 3, ship.description(), Rgb::GRAY);

        let stats = ship.stats();
        let rows = [
            ("Speed ", stats.speed_mult),
            ("Firing", stats.fire_rate_mult),
            ("Armor ", stats.health_mult),
        ];
        for (i, (label, mult)) in rows.iter().enumerate() {
            let line = format!("{} {} x{:.1}", label, bar(mult / 1.5, 15), mult);
            fb.put_centered(top + 5 + i as i32, &line, health_color(mult / 1.5));
        }
        fb.put_centered(fb.height() as i32 - 2, "Left/Right choose   Enter launch   Esc back", Rgb::GRAY);
    }

    pub fn draw_pause(selected: PauseOption, fb: &mut FrameBuffer) {
        let top = fb.height() as i32 / 2 - 3;
        Self::title(fb, top, "PAUSED", Rgb::YELLOW);
        for (i, option) in PauseOption::ALL.iter().enumerate() {
            let y = top + 2 + i as i32;
            if *option == selected {
                Self::title(fb, y, &format!("> {} <", option.label()), Rgb::YELLOW);
            } else {
                fb.put_centered(y, option.label(), Rgb::WHITE);
            }
        }
        fb.put_centered(top + 3 + PauseOption::ALL.len() as i32, "V toggle sound", Rgb::GRAY);
    }

    fn draw_summary(world: &World, top: i32, fb: &mut FrameBuffer) {
        fb.put_centered(top, &format!("Final Score: {}", format_thousands(world.score)), Rgb::WHITE);
        fb.put_centered(top + 1, &format!("Level Reached: {}", world.level), Rgb::WHITE);
        fb.put_centered(
            top + 2,
            &format!("Enemies Destroyed: {}", world.enemies_destroyed),
            Rgb::WHITE,
        );
        fb.put_centered(
            top + 4,
            "R/Enter restart   M main menu   Esc exit",
            Rgb::GRAY,
        );
    }

    pub fn draw_game_over(world: &World, fb: &mut FrameBuffer) {
        let top = fb.height() as i32 / 2 - 3;
        Self::title(fb, top, "GAME OVER", Rgb::RED);
        Self::draw_summary(world, top + 2, fb);
    }

    pub fn draw_victory(world: &World, fb: &mut FrameBuffer) {
        let top = fb.height() as i32 / 2 - 3;
        Self::title(fb, top, "VICTORY!", Rgb::GREEN);
        fb.put_centered(
            top + 1,
            &format!("Bosses Defeated: {}", world.bosses_defeated),
            Rgb::YELLOW,
        );
        Self::draw_summary(world, top + 2, fb);
    }

    pub fn draw_notification(notification: &Notification, fb: &mut FrameBuffer) {
        let text = format!(" {} ", notification.text);
        let y = fb.height() as i32 - 4;
        let len = text.chars().count() as i32;
        let x = (fb.width() as i32 - len) / 2;
        for (i, ch) in text.chars().enumerate() {
            fb.set(
                x + i as i32,
                y,
                Cell {
                    ch,
                    fg: Rgb::BLACK,
                    bg: Rgb::YELLOW,
                    bold: true,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::Settings;

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn fps_color_thresholds() {
        assert_eq!(fps_color(60.0), Rgb::GREEN);
        assert_eq!(fps_color(50.0), Rgb::GREEN);
        assert_eq!(fps_color(49.9), Rgb::YELLOW);
        assert_eq!(fps_color(30.0), Rgb::YELLOW);
        assert_eq!(fps_color(29.0), Rgb::RED);
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.5, 4), "[##--]");
        assert_eq!(bar(2.0, 3), "[###]");
    }

    #[test]
    fn hud_shows_score_and_level() {
        let mut world = World::new(Settings::default(), ShipClass::Fighter, 1);
        world.score = 12_345;
        world.level = 3;
        let mut fb = FrameBuffer::new(80, 24);
        HudPresenter::draw(&world, 60.0, &mut fb);
        let row = fb.row_text(0);
        assert!(row.contains("SCORE 12,345"));
        assert!(row.contains("LVL 3"));
        assert!(row.contains("FPS  60"));
    }

    #[test]
    fn hud_lists_active_powerups() {
        let mut world = World::new(Settings::default(), ShipClass::Fighter, 1);
        let settings = world.settings.clone();
        world.player.apply_powerup(PowerUpKind::Shield, 0, &settings);
        world.game_time = 1500;
        let mut fb = FrameBuffer::new(80, 24);
        HudPresenter::draw(&world, 60.0, &mut fb);
        assert!(fb.row_text(1).contains("Shield 4s"));
    }

    #[test]
    fn world_draws_player() {
        let world = World::new(Settings::default(), ShipClass::Fighter, 1);
        let mut fb = FrameBuffer::new(80, 24);
        let vp = Viewport::new(1024.0, 768.0, 80, 22, HUD_ROWS);
        WorldPresenter::draw(&world, &vp, &mut fb);
        assert!(fb.contains_text("A"));
    }

    #[test]
    fn game_over_shows_final_score() {
        let mut world = World::new(Settings::default(), ShipClass::Fighter, 1);
        world.score = 4200;
        let mut fb = FrameBuffer::new(80, 24);
        MenuPresenter::draw_game_over(&world, &mut fb);
        assert!(fb.contains_text("GAME OVER"));
        assert!(fb.contains_text("Final Score: 4,200"));
    }

    #[test]
    fn menu_marks_selection() {
        let mut fb = FrameBuffer::new(80, 24);
        MenuPresenter::draw_menu("Space Shooter", MenuOption::Credits, &mut fb);
        assert!(fb.contains_text("> Credits <"));
        assert!(fb.contains_text("Start Game"));
    }
}
