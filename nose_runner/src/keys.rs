//! Key-press backends.
//!
//! The frame loop talks to a `Box<dyn KeySink>`; which one it gets is decided
//! once at startup.

use nose_gesture::{Action, EmitError, KeySink};
use tracing::info;

use crate::config::EmitterKind;
use crate::error::AppResult;

// ── log-only backend (default; nothing reaches the OS) ────────────────────

/// Logs every press.  Used in simulation and whenever real key injection is
/// not wanted.
#[derive(Debug, Default)]
pub struct LogKeys {
    presses: u64,
}

impl LogKeys {
    pub fn presses(&self) -> u64 {
        self.presses
    }
}

impl KeySink for LogKeys {
    fn press(&mut self, action: Action) -> Result<(), EmitError> {
        self.presses += 1;
        info!(key = action.key(), total = self.presses, "key press");
        Ok(())
    }
}

// ── enigo backend (feature = "keys") ──────────────────────────────────────

/// Presses real arrow keys through the OS input layer.
#[cfg(feature = "keys")]
pub struct EnigoKeys {
    enigo: enigo::Enigo,
}

#[cfg(feature = "keys")]
impl EnigoKeys {
    pub fn new() -> AppResult<Self> {
        let enigo = enigo::Enigo::new(&enigo::Settings::default())
            .map_err(|e| crate::error::AppError::config(format!("cannot open input device: {e}")))?;
        Ok(EnigoKeys { enigo })
    }
}

#[cfg(feature = "keys")]
impl KeySink for EnigoKeys {
    fn press(&mut self, action: Action) -> Result<(), EmitError> {
        use enigo::{Direction, Key, Keyboard};

        let key = match action {
            Action::Jump  => Key::UpArrow,
            Action::Slide => Key::DownArrow,
            Action::Left  => Key::LeftArrow,
            Action::Right => Key::RightArrow,
        };
        self.enigo
            .key(key, Direction::Click)
            .map_err(|e| EmitError::backend(action, e.to_string()))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// open_key_sink
// ════════════════════════════════════════════════════════════════════════════

/// Build the sink selected by the configuration.
pub fn open_key_sink(kind: EmitterKind) -> AppResult<Box<dyn KeySink>> {
    match kind {
        EmitterKind::Log => Ok(Box::new(LogKeys::default())),
        #[cfg(feature = "keys")]
        EmitterKind::Keys => Ok(Box::new(EnigoKeys::new()?)),
        #[cfg(not(feature = "keys"))]
        EmitterKind::Keys => Err(crate::error::AppError::config(
            "`--emit keys` needs a build with `--features keys`",
        )),
    }
}
