//! Runtime configuration.
//!
//! Only the starting line positions, the frame geometry and the choice of
//! collaborators are configurable; sensitivity and cooldowns are fixed in
//! [`nose_gesture`].  Nothing here is read from or written to disk.

use serde::{Deserialize, Serialize};

use nose_gesture::{FrameSize, LineRole, ThresholdLineStore};

use crate::error::{AppError, AppResult};

/// Largest accepted frame width or height, in pixels.
pub const MAX_FRAME_DIM: u32 = 16384;

/// Where the nose position comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkSourceKind {
    /// Keyboard-driven simulated nose (W/A/S/D, H to hide).
    Sim,
    /// Newline-delimited JSON on stdin from an external pose estimator.
    Feed,
}

/// Where key presses go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmitterKind {
    /// Log presses only.
    Log,
    /// Press real keys (needs the `keys` feature).
    Keys,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level filter (e.g. "info", "nose_gesture=debug,warn").
    pub level: String,
    /// Emit structured JSON lines instead of human-readable output.
    pub json:  bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: "info".to_string(), json: false }
    }
}

/// Configuration for the full application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Starting jump line, fraction of frame height.
    pub jump_line:  f32,
    /// Starting slide line, fraction of frame height.
    pub slide_line: f32,
    pub width:      u32,
    pub height:     u32,
    pub source:     LandmarkSourceKind,
    /// Flip incoming landmarks horizontally.
    pub mirror:     bool,
    pub emitter:    EmitterKind,
    pub logging:    LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let lines = ThresholdLineStore::default();
        AppConfig {
            jump_line:  lines.get(LineRole::Jump),
            slide_line: lines.get(LineRole::Slide),
            width:      640,
            height:     480,
            source:     LandmarkSourceKind::Sim,
            mirror:     false,
            emitter:    EmitterKind::Log,
            logging:    LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn frame_size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    /// Initial lines, clamped to the legal range.
    pub fn lines(&self) -> ThresholdLineStore {
        ThresholdLineStore::new(self.jump_line, self.slide_line)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AppError::config(format!(
                "frame size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > MAX_FRAME_DIM || self.height > MAX_FRAME_DIM {
            return Err(AppError::config(format!(
                "frame size {}x{} exceeds the {MAX_FRAME_DIM}px limit",
                self.width, self.height
            )));
        }
        if !self.jump_line.is_finite() || !self.slide_line.is_finite() {
            return Err(AppError::config("line positions must be finite numbers"));
        }
        Ok(())
    }
}
