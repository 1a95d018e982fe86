//! Per-frame gesture decision.
//!
//! [`GestureEvaluator::evaluate`] is called once per frame with the current
//! lines, the nose position and the frame geometry.  It produces at most one
//! vertical action (Jump or Slide, debounced) and at most one lateral action
//! (Left or Right, every frame the lean holds).

use std::time::{Duration, Instant};

use tracing::debug;

use crate::lines::{LineRole, ThresholdLineStore};

// ════════════════════════════════════════════════════════════════════════════
// Tuning constants
// ════════════════════════════════════════════════════════════════════════════

/// Minimum spacing between two jumps.
pub const JUMP_DELAY:  Duration = Duration::from_millis(500);
/// Minimum spacing between two slides.
pub const SLIDE_DELAY: Duration = Duration::from_millis(500);
/// Half-width of the steering dead zone around the midline, in pixels.
pub const SENSITIVITY: i32 = 50;

// ════════════════════════════════════════════════════════════════════════════
// Geometry
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSize {
    pub width:  u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        FrameSize { width, height }
    }
}

/// A point in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        PixelPoint { x, y }
    }
}

/// A point as reported by a pose estimator, 0.0–1.0 on both axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        NormalizedPoint { x, y }
    }

    /// Scale into pixels of `frame`, truncating toward zero.  Points off
    /// the frame (and NaN) land on its nearest edge.
    pub fn to_pixels(self, frame: FrameSize) -> PixelPoint {
        PixelPoint {
            x: scale_onto(self.x, frame.width),
            y: scale_onto(self.y, frame.height),
        }
    }

    /// Horizontal mirror, for estimators that see an unflipped camera.
    pub fn mirrored(self) -> Self {
        NormalizedPoint { x: 1.0 - self.x, y: self.y }
    }
}

fn scale_onto(v: f32, extent: u32) -> i32 {
    let last = extent.saturating_sub(1).min(i32::MAX as u32) as i32;
    let v = if v.is_nan() { 0.0 } else { v };
    ((v * extent as f32) as i32).clamp(0, last)
}

// ════════════════════════════════════════════════════════════════════════════
// Action
// ════════════════════════════════════════════════════════════════════════════

/// A discrete game control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Slide,
    Left,
    Right,
}

impl Action {
    /// Name of the keyboard key this action presses.
    pub fn key(self) -> &'static str {
        match self {
            Action::Jump  => "up",
            Action::Slide => "down",
            Action::Left  => "left",
            Action::Right => "right",
        }
    }

    /// Overlay caption shown on the frame the action fires.
    pub fn label(self) -> &'static str {
        match self {
            Action::Jump  => "JUMP!",
            Action::Slide => "SLIDE!",
            Action::Left  => "<-- LEFT",
            Action::Right => "RIGHT -->",
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Action::Jump | Action::Slide)
    }
}

/// Everything one frame decided to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameIntents {
    /// Jump or Slide.
    pub vertical: Option<Action>,
    /// Left or Right.
    pub lateral:  Option<Action>,
}

impl FrameIntents {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.lateral.is_none()
    }

    /// Vertical first, then lateral.
    pub fn iter(&self) -> impl Iterator<Item = Action> {
        self.vertical.into_iter().chain(self.lateral)
    }

    pub fn contains(&self, action: Action) -> bool {
        self.iter().any(|a| a == action)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CooldownTimer
// ════════════════════════════════════════════════════════════════════════════

/// Debounce for one action kind.  A timer that never fired is always ready.
#[derive(Clone, Copy, Debug)]
pub struct CooldownTimer {
    last_fired: Option<Instant>,
    delay:      Duration,
}

impl CooldownTimer {
    pub fn new(delay: Duration) -> Self {
        CooldownTimer { last_fired: None, delay }
    }

    /// Strictly more than `delay` must have passed since the last firing.
    pub fn ready(&self, now: Instant) -> bool {
        match self.last_fired {
            None       => true,
            Some(last) => now.saturating_duration_since(last) > self.delay,
        }
    }

    pub fn fire(&mut self, now: Instant) {
        self.last_fired = Some(now);
    }

    pub fn last_fired(&self) -> Option<Instant> {
        self.last_fired
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureEvaluator
// ════════════════════════════════════════════════════════════════════════════

/// Owns the cooldown state; everything else is passed in per call.
#[derive(Clone, Debug)]
pub struct GestureEvaluator {
    jump:        CooldownTimer,
    slide:       CooldownTimer,
    sensitivity: i32,
}

impl Default for GestureEvaluator {
    fn default() -> Self {
        GestureEvaluator {
            jump:        CooldownTimer::new(JUMP_DELAY),
            slide:       CooldownTimer::new(SLIDE_DELAY),
            sensitivity: SENSITIVITY,
        }
    }
}

impl GestureEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jump_timer(&self) -> &CooldownTimer {
        &self.jump
    }

    pub fn slide_timer(&self) -> &CooldownTimer {
        &self.slide
    }

    /// Decide this frame's actions.
    ///
    /// Produces nothing while a line is being dragged or when no landmark was
    /// found.  Cooldown timers are only advanced for actions actually
    /// produced.
    pub fn evaluate(
        &mut self,
        lines:    &ThresholdLineStore,
        landmark: Option<PixelPoint>,
        frame:    FrameSize,
        now:      Instant,
    ) -> FrameIntents {
        if lines.any_dragging() {
            return FrameIntents::default();
        }
        let Some(nose) = landmark else {
            return FrameIntents::default();
        };

        let jump_y  = lines.pixel_y(LineRole::Jump,  frame.height);
        let slide_y = lines.pixel_y(LineRole::Slide, frame.height);

        // Jump is checked first so it wins if the lines have been crossed.
        let vertical = if nose.y < jump_y && self.jump.ready(now) {
            self.jump.fire(now);
            Some(Action::Jump)
        } else if nose.y > slide_y && self.slide.ready(now) {
            self.slide.fire(now);
            Some(Action::Slide)
        } else {
            None
        };

        let mid = (frame.width / 2) as i32;
        let lateral = if nose.x < mid - self.sensitivity {
            Some(Action::Left)
        } else if nose.x > mid + self.sensitivity {
            Some(Action::Right)
        } else {
            None
        };

        let intents = FrameIntents { vertical, lateral };
        if !intents.is_empty() {
            debug!(x = nose.x, y = nose.y, ?intents, "gesture");
        }
        intents
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: FrameSize = FrameSize::new(640, 480);

    fn eval_at(
        ev: &mut GestureEvaluator,
        lines: &ThresholdLineStore,
        x: i32,
        y: i32,
        now: Instant,
    ) -> FrameIntents {
        ev.evaluate(lines, Some(PixelPoint::new(x, y)), FRAME, now)
    }

    #[test]
    fn nose_above_jump_line_jumps() {
        let mut ev = GestureEvaluator::new();
        let lines = ThresholdLineStore::default();
        let i = eval_at(&mut ev, &lines, 320, 100, Instant::now());
        assert_eq!(i, FrameIntents { vertical: Some(Action::Jump), lateral: None });
    }

    #[test]
    fn nose_on_jump_line_does_not_jump() {
        let mut ev = GestureEvaluator::new();
        let lines = ThresholdLineStore::default();
        let i = eval_at(&mut ev, &lines, 320, 192, Instant::now());
        assert!(i.is_empty());
    }

    #[test]
    fn nose_below_slide_line_slides() {
        let mut ev = GestureEvaluator::new();
        let lines = ThresholdLineStore::default();
        let i = eval_at(&mut ev, &lines, 320, 400, Instant::now());
        assert_eq!(i.vertical, Some(Action::Slide));
        assert_eq!(i.lateral, None);
    }

    #[test]
    fn dead_zone_is_inclusive() {
        let mut ev = GestureEvaluator::new();
        let lines = ThresholdLineStore::default();
        let now = Instant::now();
        assert_eq!(eval_at(&mut ev, &lines, 270, 240, now).lateral, None);
        assert_eq!(eval_at(&mut ev, &lines, 370, 240, now).lateral, None);
        assert_eq!(eval_at(&mut ev, &lines, 269, 240, now).lateral, Some(Action::Left));
        assert_eq!(eval_at(&mut ev, &lines, 371, 240, now).lateral, Some(Action::Right));
    }

    #[test]
    fn lateral_has_no_cooldown() {
        let mut ev = GestureEvaluator::new();
        let lines = ThresholdLineStore::default();
        let now = Instant::now();
        for _ in 0..5 {
            assert_eq!(eval_at(&mut ev, &lines, 50, 240, now).lateral, Some(Action::Left));
        }
    }

    #[test]
    fn jump_is_debounced() {
        let mut ev = GestureEvaluator::new();
        let lines = ThresholdLineStore::default();
        let t0 = Instant::now();
        assert_eq!(eval_at(&mut ev, &lines, 320, 50, t0).vertical, Some(Action::Jump));
        let t1 = t0 + Duration::from_millis(100);
        assert_eq!(eval_at(&mut ev, &lines, 320, 50, t1).vertical, None);
        // Exactly the delay is not enough.
        let t2 = t0 + JUMP_DELAY;
        assert_eq!(eval_at(&mut ev, &lines, 320, 50, t2).vertical, None);
        let t3 = t0 + JUMP_DELAY + Duration::from_millis(1);
        assert_eq!(eval_at(&mut ev, &lines, 320, 50, t3).vertical, Some(Action::Jump));
    }

    #[test]
    fn suppressed_jump_does_not_restart_cooldown() {
        let mut ev = GestureEvaluator::new();
        let lines = ThresholdLineStore::default();
        let t0 = Instant::now();
        eval_at(&mut ev, &lines, 320, 50, t0);
        eval_at(&mut ev, &lines, 320, 50, t0 + Duration::from_millis(400));
        assert_eq!(ev.jump_timer().last_fired(), Some(t0));
    }

    #[test]
    fn jump_and_slide_cooldowns_are_separate() {
        let mut ev = GestureEvaluator::new();
        let lines = ThresholdLineStore::default();
        let t0 = Instant::now();
        assert_eq!(eval_at(&mut ev, &lines, 320, 50, t0).vertical, Some(Action::Jump));
        let t1 = t0 + Duration::from_millis(10);
        assert_eq!(eval_at(&mut ev, &lines, 320, 450, t1).vertical, Some(Action::Slide));
    }

    #[test]
    fn cooling_jump_falls_through_to_slide_when_lines_crossed() {
        // Jump line dragged below slide line: 0.7 → 336, 0.3 → 144.
        let lines = ThresholdLineStore::new(0.7, 0.3);
        let mut ev = GestureEvaluator::new();
        let t0 = Instant::now();
        assert_eq!(eval_at(&mut ev, &lines, 320, 200, t0).vertical, Some(Action::Jump));
        let t1 = t0 + Duration::from_millis(50);
        assert_eq!(eval_at(&mut ev, &lines, 320, 200, t1).vertical, Some(Action::Slide));
    }

    #[test]
    fn jump_priority_when_lines_crossed() {
        let lines = ThresholdLineStore::new(0.7, 0.3);
        let mut ev = GestureEvaluator::new();
        let i = eval_at(&mut ev, &lines, 320, 240, Instant::now());
        assert_eq!(i.vertical, Some(Action::Jump));
        assert!(!i.contains(Action::Slide));
        assert!(ev.slide_timer().last_fired().is_none());
    }

    #[test]
    fn dragging_suppresses_everything() {
        let mut lines = ThresholdLineStore::default();
        lines.set_dragging(LineRole::Slide, true);
        let mut ev = GestureEvaluator::new();
        let i = eval_at(&mut ev, &lines, 10, 10, Instant::now());
        assert!(i.is_empty());
        assert!(ev.jump_timer().last_fired().is_none());
    }

    #[test]
    fn missing_landmark_yields_nothing() {
        let mut ev = GestureEvaluator::new();
        let lines = ThresholdLineStore::default();
        assert!(ev.evaluate(&lines, None, FRAME, Instant::now()).is_empty());
    }

    #[test]
    fn intents_iterate_vertical_first() {
        let i = FrameIntents { vertical: Some(Action::Slide), lateral: Some(Action::Right) };
        assert_eq!(i.iter().collect::<Vec<_>>(), vec![Action::Slide, Action::Right]);
    }

    #[test]
    fn normalized_to_pixels_truncates() {
        let p = NormalizedPoint::new(0.5, 0.2083).to_pixels(FRAME);
        assert_eq!(p, PixelPoint::new(320, 99));
        assert_eq!(NormalizedPoint::new(0.25, 0.5).mirrored(), NormalizedPoint::new(0.75, 0.5));
    }

    #[test]
    fn off_frame_landmarks_clamp_to_edges() {
        assert_eq!(NormalizedPoint::new(1e12, -5.0).to_pixels(FRAME), PixelPoint::new(639, 0));
        assert_eq!(NormalizedPoint::new(1.0, 1.0).to_pixels(FRAME), PixelPoint::new(639, 479));
        assert_eq!(NormalizedPoint::new(f32::NAN, -1e30).to_pixels(FRAME), PixelPoint::new(0, 0));
        assert_eq!(NormalizedPoint::new(0.5, 0.5).to_pixels(FrameSize::new(0, 0)), PixelPoint::new(0, 0));
    }

    #[test]
    fn action_keys_and_labels() {
        assert_eq!(Action::Jump.key(), "up");
        assert_eq!(Action::Slide.key(), "down");
        assert_eq!(Action::Left.key(), "left");
        assert_eq!(Action::Right.key(), "right");
        assert_eq!(Action::Jump.label(), "JUMP!");
        assert!(Action::Slide.is_vertical());
        assert!(!Action::Right.is_vertical());
    }
}
