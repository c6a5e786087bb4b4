use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use env_logger::{Builder, Env, Target};

use space_shooter::audio::{AudioManager, AudioSink, SilentSink, TerminalBell};
use space_shooter::cli::Args;
use space_shooter::io::TerminalIO;
use space_shooter::services::game::Game;
use space_shooter::{GameEngine, GameResult};

/// Log to a file; the terminal belongs to the game while it runs.
fn init_logging(path: &Path, debug: bool) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let file = File::create(path)?;
    let level = if debug { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(level))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn run(args: Args) -> GameResult<()> {
    let settings = args.settings()?;
    init_logging(&args.log_file, settings.debug)?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!(
        "{} starting: seed {}, ship {}, {}x{} at {} fps",
        settings.title,
        seed,
        args.ship,
        settings.screen_width,
        settings.screen_height,
        settings.fps
    );

    let sink: Box<dyn AudioSink> = if args.bell {
        Box::new(TerminalBell::new(std::io::stdout()))
    } else {
        Box::new(SilentSink)
    };
    let audio = AudioManager::new(&settings, sink);

    let terminal = TerminalIO::new(settings.key_hold_ms)?;
    let engine = GameEngine::new(settings, args.ship, seed);
    let mut game = Game::new(engine, terminal, audio);
    let result = game.run();
    if let Err(e) = &result {
        log::error!("frame loop failed: {}", e);
    }
    result
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("space-shooter: {}", e);
            ExitCode::FAILURE
        }
    }
}
