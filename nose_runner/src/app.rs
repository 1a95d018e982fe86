//! Top-level frame loop.
//!
//! `ControllerState` owns the drag controller, the gesture evaluator and the
//! action dispatcher.  [`run_loop`] drives it once per frame:
//! acquire → poll window (quit key, pointer events) → estimate → evaluate →
//! dispatch → render.  Everything runs on one thread; pointer events are applied before
//! the frame is evaluated, so the line store is never shared.

use std::time::Instant;

use tracing::{debug, error, info};

use nose_gesture::{
    Action, ActionDispatcher, FrameSize, GestureEvaluator, KeySink, NormalizedPoint,
    PixelPoint, PointerDragController, PointerEvent, ThresholdLineStore,
};

use crate::config::{AppConfig, LandmarkSourceKind};
use crate::error::{AppError, AppResult};
use crate::keys::open_key_sink;
use crate::landmark::{
    FeedEstimator, Frame, FrameSource, Mirrored, PoseEstimator, SimEstimator, SyntheticCamera,
};
use crate::window::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// Surface — what the loop needs from a window
// ════════════════════════════════════════════════════════════════════════════

/// Input gathered from the window since the last frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindowInput {
    pub pointer: Vec<PointerEvent>,
    pub quit:    bool,
}

pub trait Surface {
    fn poll(&mut self) -> WindowInput;
    fn present(
        &mut self,
        frame:  &Frame,
        lines:  &ThresholdLineStore,
        report: &FrameReport,
    ) -> AppResult<()>;
}

// ════════════════════════════════════════════════════════════════════════════
// FrameReport
// ════════════════════════════════════════════════════════════════════════════

/// What one frame did, for the overlay.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Nose in frame pixels, if found.
    pub nose:    Option<PixelPoint>,
    /// Keys pressed this frame, vertical first.
    pub fired:   Vec<Action>,
    /// A line was being dragged, so gameplay was suppressed.
    pub editing: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// ControllerState
// ════════════════════════════════════════════════════════════════════════════

pub struct ControllerState<S: KeySink> {
    drag:       PointerDragController,
    evaluator:  GestureEvaluator,
    dispatcher: ActionDispatcher<S>,
}

impl<S: KeySink> ControllerState<S> {
    pub fn new(lines: ThresholdLineStore, sink: S) -> Self {
        ControllerState {
            drag:       PointerDragController::new(lines),
            evaluator:  GestureEvaluator::new(),
            dispatcher: ActionDispatcher::new(sink),
        }
    }

    pub fn lines(&self) -> &ThresholdLineStore {
        self.drag.lines()
    }

    pub fn sink(&self) -> &S {
        self.dispatcher.sink()
    }

    /// Process one frame.
    ///
    /// Pointer events are applied first with this frame's height; a sink
    /// failure is returned and ends the loop.
    pub fn step(
        &mut self,
        frame:   FrameSize,
        pointer: &[PointerEvent],
        nose:    Option<NormalizedPoint>,
        now:     Instant,
    ) -> AppResult<FrameReport> {
        for &event in pointer {
            self.drag.handle(event, frame.height);
        }

        let nose = nose.map(|p| p.to_pixels(frame));
        let intents = self.evaluator.evaluate(self.drag.lines(), nose, frame, now);
        let fired = self.dispatcher.dispatch(&intents)?;

        Ok(FrameReport { nose, fired, editing: self.drag.is_editing() })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run_loop — generic over collaborators
// ════════════════════════════════════════════════════════════════════════════

/// Drive frames until the surface asks to quit (Ok) or something fails.
///
/// Returns the number of frames processed.
pub fn run_loop<F, E, K, D>(
    source:    &mut F,
    estimator: &mut E,
    state:     &mut ControllerState<K>,
    surface:   &mut D,
) -> AppResult<u64>
where
    F: FrameSource + ?Sized,
    E: PoseEstimator + ?Sized,
    K: KeySink,
    D: Surface + ?Sized,
{
    let mut frames = 0u64;
    loop {
        let frame = source.acquire().ok_or(AppError::Acquisition)?;

        let input = surface.poll();
        if input.quit {
            info!(frames, "quit requested");
            return Ok(frames);
        }

        let nose = estimator.nose(&frame);
        let report = state.step(frame.size, &input.pointer, nose, Instant::now())?;
        if !report.fired.is_empty() {
            debug!(frame = frames, fired = ?report.fired, "actions");
        }

        surface.present(&frame, state.lines(), &report)?;
        frames += 1;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the application entry point
// ════════════════════════════════════════════════════════════════════════════

/// Build the configured collaborators, open the window and run until quit.
pub fn run(cfg: AppConfig) -> AppResult<()> {
    cfg.validate()?;

    let size = cfg.frame_size();
    let mut camera = SyntheticCamera::new(size);

    let (sim_tx, estimator) = match cfg.source {
        LandmarkSourceKind::Sim => {
            let (tx, sim) = SimEstimator::channel();
            (Some(tx), Box::new(sim) as Box<dyn PoseEstimator>)
        }
        LandmarkSourceKind::Feed => (None, Box::new(FeedEstimator::stdin()) as Box<dyn PoseEstimator>),
    };
    let mut estimator = if cfg.mirror {
        Box::new(Mirrored(estimator)) as Box<dyn PoseEstimator>
    } else {
        estimator
    };

    let sink = open_key_sink(cfg.emitter)?;
    let mut state = ControllerState::new(cfg.lines(), sink);
    let mut vis = Visualizer::new(size, sim_tx)?;

    info!(
        width = size.width,
        height = size.height,
        source = ?cfg.source,
        emitter = ?cfg.emitter,
        "controller started"
    );

    match run_loop(&mut camera, &mut estimator, &mut state, &mut vis) {
        Ok(frames) => {
            info!(frames, "controller stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "controller stopped");
            Err(e)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
