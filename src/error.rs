use std::path::PathBuf;

use thiserror::Error;

/// Rejected gauge or ladder configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a scale needs at least 2 ticks, got {0}")]
    TooFewTicks(u32),

    #[error("major tick interval must be at least 1")]
    ZeroMajorTickEvery,

    #[error("drawing area is empty ({width}x{height})")]
    EmptyArea { width: i32, height: i32 },

    #[error("a round scale with a needle needs a square area, got {width}x{height}")]
    NonSquareRoundArea { width: i32, height: i32 },

    #[error("value range [{min}, {max}) is empty")]
    EmptyRange { min: f64, max: f64 },

    #[error("tick spacing must be a positive number, got {0}")]
    InvalidTickSpacing(f64),

    #[error("tick window reaches {reach} from the value, wider than the {width} range")]
    WindowExceedsRange { reach: f64, width: f64 },

    #[error("rung spacing must be positive, got {0} px")]
    InvalidRungSpacing(i32),
}

/// Errors surfaced by the display host
#[derive(Debug, Error)]
pub enum HudError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read font {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a usable TrueType/OpenType font", .0.display())]
    FontParse(PathBuf),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel surface error: {0}")]
    Surface(#[from] pixels::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_values() {
        let err = ConfigError::NonSquareRoundArea {
            width: 120,
            height: 100,
        };
        assert_eq!(
            err.to_string(),
            "a round scale with a needle needs a square area, got 120x100"
        );

        let hud: HudError = ConfigError::TooFewTicks(1).into();
        assert_eq!(hud.to_string(), "a scale needs at least 2 ticks, got 1");
    }

    #[test]
    fn font_parse_names_path() {
        let err = HudError::FontParse(PathBuf::from("/tmp/nope.ttf"));
        assert_eq!(
            err.to_string(),
            "/tmp/nope.ttf is not a usable TrueType/OpenType font"
        );
    }
}
