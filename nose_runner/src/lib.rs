//! # nose_runner
//!
//! Windowed front end for [`nose_gesture`]: lean to steer, raise your nose
//! above the yellow line to jump, drop it below the red line to slide.
//!
//! ## Sources
//!
//! * `--source sim` (default) — **Simulation mode**: the nose is a marker you
//!   move with the keyboard; no camera or pose model needed.
//! * `--source feed` — an external pose estimator writes one JSON record per
//!   frame to stdin: `{"x":0.42,"y":0.31}` (normalized) or `null`.
//!
//! ## Key emission
//!
//! * `--emit log` (default) — presses are logged only.
//! * `--emit keys` — real arrow keys via `enigo` (build with `--features keys`).
//!
//! ### Window controls
//!
//! | Input | Effect |
//! |---|---|
//! | Drag a line (left mouse) | Move the jump/slide threshold |
//! | `W` `A` `S` `D` (hold) | Move the simulated nose (faster with Shift) |
//! | `H` | Hide/show the simulated face |
//! | `Q` | Quit |

pub mod error;
pub mod config;
pub mod logging;
pub mod landmark;
pub mod keys;
pub mod window;
pub mod app;
