//! Error types for the controller application.

use nose_gesture::EmitError;

/// Everything that can stop the frame loop.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("frame acquisition failed: the frame source yielded no frame")]
    Acquisition,

    #[error("window error: {message}")]
    Window { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Emit(#[from] EmitError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window { message: msg.into() }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config { message: msg.into() }
    }
}
