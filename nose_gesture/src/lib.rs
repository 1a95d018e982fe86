//! # nose_gesture
//!
//! Turns a single tracked landmark (the nose) into discrete runner-game
//! actions by comparing it against two horizontal threshold lines and a
//! vertical midline.
//!
//! ## Position → Action mapping
//!
//! | Condition | Action | Key | Cooldown |
//! |---|---|---|---|
//! | Nose above the jump line | Jump | `up` | 0.5 s |
//! | Nose below the slide line | Slide | `down` | 0.5 s |
//! | Nose left of midline − 50 px | Left | `left` | none |
//! | Nose right of midline + 50 px | Right | `right` | none |
//!
//! Jump and Slide are mutually exclusive within a frame (Jump wins).
//! Steering is independent of the vertical decision.
//!
//! ## Editing the lines
//!
//! Pressing the pointer within 20 px of a line starts a drag session for that
//! line; moving repositions it (clamped to 10 %–90 % of frame height);
//! releasing ends it.  While a session is active no actions are produced.
//!
//! ## Quick start
//!
//! ```rust
//! use std::time::Instant;
//! use nose_gesture::{
//!     Action, FrameSize, GestureEvaluator, PixelPoint, PointerDragController,
//! };
//!
//! let drag = PointerDragController::default();
//! let mut eval = GestureEvaluator::default();
//! let frame = FrameSize::new(640, 480);
//!
//! let intents = eval.evaluate(
//!     drag.lines(),
//!     Some(PixelPoint::new(320, 100)),
//!     frame,
//!     Instant::now(),
//! );
//! assert_eq!(intents.vertical, Some(Action::Jump));
//! assert_eq!(intents.lateral, None);
//! ```

pub mod lines;
pub mod drag;
pub mod evaluator;
pub mod dispatch;

pub use lines::{LineRole, ThresholdLineStore, LINE_MIN, LINE_MAX};
pub use drag::{PointerDragController, PointerEvent, DRAG_TOLERANCE_PX};
pub use evaluator::{
    Action, CooldownTimer, FrameIntents, FrameSize, GestureEvaluator,
    NormalizedPoint, PixelPoint, JUMP_DELAY, SLIDE_DELAY, SENSITIVITY,
};
pub use dispatch::{ActionDispatcher, EmitError, KeySink};
