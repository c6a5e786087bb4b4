use std::path::PathBuf;

use clap::Parser;

use crate::models::errors::GameResult;
use crate::models::settings::Settings;
use crate::models::ship::ShipClass;

pub const DEFAULT_LOG_FILE: &str = "logs/space_shooter.log";

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "space-shooter")]
#[command(version, about = "Arcade space shooter for the terminal", long_about = None)]
pub struct Args {
    /// Seed for the random number generator (defaults to the clock)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Width of the playfield in world pixels
    #[arg(long)]
    pub width: Option<f32>,

    /// Height of the playfield in world pixels
    #[arg(long)]
    pub height: Option<f32>,

    /// Ship preselected on the ship select screen
    #[arg(long, default_value = "fighter")]
    pub ship: ShipClass,

    /// Start with all audio muted
    #[arg(long)]
    pub mute: bool,

    /// Ring the terminal bell for alert sounds
    #[arg(long)]
    pub bell: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub debug: bool,

    /// Where the log is written
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
}

impl Args {
    /// Defaults overridden by the command line, validated.
    pub fn settings(&self) -> GameResult<Settings> {
        let mut settings = Settings {
            fps: self.fps,
            muted: self.mute,
            debug: self.debug || Settings::debug_from_env(),
            ..Settings::default()
        };
        if let Some(w) = self.width {
            settings.screen_width = w;
        }
        if let Some(h) = self.height {
            settings.screen_height = h;
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::GameError;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["space-shooter"]);
        assert_eq!(args.seed, None);
        assert_eq!(args.fps, 60);
        assert_eq!(args.ship, ShipClass::Fighter);
        assert_eq!(args.log_file, PathBuf::from(DEFAULT_LOG_FILE));
        assert_eq!(args.settings().unwrap().screen_width, Settings::default().screen_width);
    }

    #[test]
    fn overrides_apply() {
        let args = Args::parse_from([
            "space-shooter",
            "--seed",
            "7",
            "--ship",
            "Destroyer",
            "--width",
            "640",
            "--height",
            "480",
            "--mute",
        ]);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.ship, ShipClass::Destroyer);
        let settings = args.settings().unwrap();
        assert_eq!(settings.screen_width, 640.0);
        assert_eq!(settings.screen_height, 480.0);
        assert!(settings.muted);
    }

    #[test]
    fn unknown_ship_is_rejected() {
        assert!(Args::try_parse_from(["space-shooter", "--ship", "zeppelin"]).is_err());
    }

    #[test]
    fn non_finite_size_is_reported() {
        for value in ["NaN", "inf"] {
            let args = Args::parse_from(["space-shooter", "--width", value]);
            assert!(matches!(args.settings(), Err(GameError::InvalidSetting(_))), "{}", value);
        }
    }

    #[test]
    fn invalid_settings_are_reported() {
        let args = Args::parse_from(["space-shooter", "--fps", "0"]);
        assert!(matches!(args.settings(), Err(GameError::InvalidSetting(_))));
    }
}
