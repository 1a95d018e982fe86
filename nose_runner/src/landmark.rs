//! Frame acquisition and nose estimation — simulated or fed from outside.
//!
//! The frame loop only sees the [`FrameSource`] and [`PoseEstimator`] traits;
//! it doesn't know whether the nose came from a keyboard simulation or from an
//! external estimator process writing to stdin.

use std::io::{BufRead, BufReader};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use serde::Deserialize;
use tracing::{info, warn};

use nose_gesture::{FrameSize, NormalizedPoint};

// ════════════════════════════════════════════════════════════════════════════
// Frames
// ════════════════════════════════════════════════════════════════════════════

/// One acquired image, ARGB pixels in row-major order.
#[derive(Clone, Debug)]
pub struct Frame {
    pub size:   FrameSize,
    pub pixels: Vec<u32>,
}

impl Frame {
    pub fn filled(size: FrameSize, color: u32) -> Self {
        Frame { size, pixels: vec![color; size.width as usize * size.height as usize] }
    }
}

/// Anything that produces frames.  `None` means the source has failed and
/// the loop must stop.
pub trait FrameSource {
    fn acquire(&mut self) -> Option<Frame>;
}

const BACKDROP: u32 = 0xFF202428;

/// Stand-in camera that yields a plain backdrop forever.
pub struct SyntheticCamera {
    size: FrameSize,
}

impl SyntheticCamera {
    pub fn new(size: FrameSize) -> Self {
        SyntheticCamera { size }
    }
}

impl FrameSource for SyntheticCamera {
    fn acquire(&mut self) -> Option<Frame> {
        Some(Frame::filled(self.size, BACKDROP))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PoseEstimator trait
// ════════════════════════════════════════════════════════════════════════════

/// Frame → optional normalized nose position.
pub trait PoseEstimator {
    fn nose(&mut self, frame: &Frame) -> Option<NormalizedPoint>;
}

impl<E: PoseEstimator + ?Sized> PoseEstimator for Box<E> {
    fn nose(&mut self, frame: &Frame) -> Option<NormalizedPoint> {
        (**self).nose(frame)
    }
}

/// Flips the wrapped estimator's output horizontally, so leaning left in
/// front of an unflipped camera still steers left.
pub struct Mirrored<E>(pub E);

impl<E: PoseEstimator> PoseEstimator for Mirrored<E> {
    fn nose(&mut self, frame: &Frame) -> Option<NormalizedPoint> {
        self.0.nose(frame).map(NormalizedPoint::mirrored)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimEstimator — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Move the simulated nose by a fraction of the frame.
    Nudge { dx: f32, dy: f32 },
    /// Toggle face visibility (exercises the no-landmark path).
    ToggleFace,
}

/// Simulated nose steered by [`SimInput`]s from the window.
pub struct SimEstimator {
    rx:      Receiver<SimInput>,
    nose:    NormalizedPoint,
    visible: bool,
}

impl SimEstimator {
    /// Starts centred between the default lines, inside the dead zone.
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimEstimator { rx, nose: NormalizedPoint::new(0.5, 0.5), visible: true }
    }

    /// Paired sender/estimator.
    pub fn channel() -> (Sender<SimInput>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, SimEstimator::new(rx))
    }
}

impl PoseEstimator for SimEstimator {
    fn nose(&mut self, _frame: &Frame) -> Option<NormalizedPoint> {
        while let Ok(input) = self.rx.try_recv() {
            match input {
                SimInput::Nudge { dx, dy } => {
                    self.nose.x = (self.nose.x + dx).clamp(0.0, 1.0);
                    self.nose.y = (self.nose.y + dy).clamp(0.0, 1.0);
                }
                SimInput::ToggleFace => self.visible = !self.visible,
            }
        }
        self.visible.then_some(self.nose)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FeedEstimator — external estimator over newline-delimited JSON
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
struct FeedPoint {
    x: f32,
    y: f32,
}

/// Parse one feed line.  `Ok(None)` is an explicit "no face" record.
fn parse_feed_line(line: &str) -> Result<Option<NormalizedPoint>, serde_json::Error> {
    let rec: Option<FeedPoint> = serde_json::from_str(line)?;
    Ok(rec.map(|p| NormalizedPoint::new(p.x, p.y)))
}

/// Read feed records from `reader` on a background thread.
pub fn spawn_feed_reader<R>(reader: R) -> Receiver<Option<NormalizedPoint>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for (n, line) in reader.lines().enumerate() {
            let line = match line {
                Ok(l)  => l,
                Err(e) => {
                    warn!(error = %e, "landmark feed read failed");
                    return;
                }
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_feed_line(line) {
                Ok(rec) => {
                    if tx.send(rec).is_err() { return; }
                }
                Err(e) => warn!(line = n + 1, error = %e, "skipping malformed landmark record"),
            }
        }
    });
    rx
}

/// Uses the most recent record from an external estimator.  A record stays
/// current until a newer one arrives; once the feed closes there is no nose.
pub struct FeedEstimator {
    rx:     Receiver<Option<NormalizedPoint>>,
    latest: Option<NormalizedPoint>,
    closed: bool,
}

impl FeedEstimator {
    pub fn new(rx: Receiver<Option<NormalizedPoint>>) -> Self {
        FeedEstimator { rx, latest: None, closed: false }
    }

    /// Feed from this process's stdin.
    pub fn stdin() -> Self {
        FeedEstimator::new(spawn_feed_reader(BufReader::new(std::io::stdin())))
    }
}

impl PoseEstimator for FeedEstimator {
    fn nose(&mut self, _frame: &Frame) -> Option<NormalizedPoint> {
        loop {
            match self.rx.try_recv() {
                Ok(rec) => self.latest = rec,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        info!("landmark feed closed");
                        self.closed = true;
                    }
                    self.latest = None;
                    break;
                }
            }
        }
        self.latest
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
