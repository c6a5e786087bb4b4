use std::fmt;

/// Game-specific error types
#[derive(Debug)]
pub enum GameError {
    /// A setting failed validation
    InvalidSetting(String),
    /// Ship class name not recognised
    UnknownShip(String),
    /// Terminal too small to draw the playfield
    TerminalTooSmall { cols: u16, rows: u16 },
    /// I/O error occurred
    IoError(std::io::Error),
}

/// Type alias for Results using GameError
pub type GameResult<T> = Result<T, GameError>;

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameError::InvalidSetting(msg) => write!(f, "Invalid setting: {}", msg),
            GameError::UnknownShip(name) => write!(f, "Unknown ship class: {}", name),
            GameError::TerminalTooSmall { cols, rows } => write!(
                f,
                "Terminal too small: {}x{} (need at least 40x20)",
                cols, rows
            ),
            GameError::IoError(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::IoError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_errors_keep_their_source() {
        let err: GameError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "I/O error: boom");
    }

    #[test]
    fn setting_errors_have_no_source() {
        let err = GameError::InvalidSetting("fps must be positive".into());
        assert!(err.source().is_none());
        assert_eq!(err.to_string(), "Invalid setting: fps must be positive");
    }
}
