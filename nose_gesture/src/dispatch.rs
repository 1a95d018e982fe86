//! Turning intents into key presses.
//!
//! The OS-level emission mechanism sits behind [`KeySink`]; this module only
//! decides what to press and in which order.  Presses are fire-and-forget:
//! nothing is queued or retried, and a failing sink aborts the frame.

use tracing::debug;

use crate::evaluator::{Action, FrameIntents};

// ════════════════════════════════════════════════════════════════════════════
// KeySink
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("key emission failed for `{key}`: {message}")]
    Backend { key: &'static str, message: String },
}

impl EmitError {
    pub fn backend(action: Action, msg: impl Into<String>) -> Self {
        EmitError::Backend { key: action.key(), message: msg.into() }
    }
}

/// Anything that can press a key for an [`Action`].
pub trait KeySink {
    /// Press and release the key bound to `action`.
    fn press(&mut self, action: Action) -> Result<(), EmitError>;
}

impl<S: KeySink + ?Sized> KeySink for Box<S> {
    fn press(&mut self, action: Action) -> Result<(), EmitError> {
        (**self).press(action)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ActionDispatcher
// ════════════════════════════════════════════════════════════════════════════

pub struct ActionDispatcher<S: KeySink> {
    sink: S,
}

impl<S: KeySink> ActionDispatcher<S> {
    pub fn new(sink: S) -> Self {
        ActionDispatcher { sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Press one key per intent, vertical first.
    ///
    /// Returns the actions that were pressed, in order, so the caller can
    /// draw their labels.  The first sink error is returned as-is and the
    /// remaining intents are dropped.
    pub fn dispatch(&mut self, intents: &FrameIntents) -> Result<Vec<Action>, EmitError> {
        let mut fired = Vec::with_capacity(2);
        for action in intents.iter() {
            self.sink.press(action)?;
            debug!(key = action.key(), "pressed");
            fired.push(action);
        }
        Ok(fired)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
