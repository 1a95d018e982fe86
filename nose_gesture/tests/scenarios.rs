//! End-to-end frames through drag controller, evaluator and dispatcher.

use std::time::{Duration, Instant};

use nose_gesture::{
    Action, ActionDispatcher, EmitError, FrameSize, GestureEvaluator, KeySink,
    LineRole, PixelPoint, PointerDragController, PointerEvent, JUMP_DELAY,
};

const FRAME: FrameSize = FrameSize::new(640, 480);

#[derive(Default)]
struct Keys(Vec<&'static str>);

impl KeySink for Keys {
    fn press(&mut self, action: Action) -> Result<(), EmitError> {
        self.0.push(action.key());
        Ok(())
    }
}

struct Rig {
    drag:  PointerDragController,
    eval:  GestureEvaluator,
    keys:  ActionDispatcher<Keys>,
}

impl Rig {
    fn new() -> Self {
        Rig {
            drag: PointerDragController::default(),
            eval: GestureEvaluator::new(),
            keys: ActionDispatcher::new(Keys::default()),
        }
    }

    fn frame(&mut self, nose: Option<(i32, i32)>, now: Instant) -> Vec<Action> {
        let nose = nose.map(|(x, y)| PixelPoint::new(x, y));
        let intents = self.eval.evaluate(self.drag.lines(), nose, FRAME, now);
        self.keys.dispatch(&intents).unwrap()
    }
}

#[test]
fn reference_frames() {
    let t0 = Instant::now();

    let mut rig = Rig::new();
    assert_eq!(rig.drag.lines().pixel_y(LineRole::Jump, 480), 192);
    assert_eq!(rig.drag.lines().pixel_y(LineRole::Slide, 480), 288);

    assert_eq!(rig.frame(Some((320, 100)), t0), vec![Action::Jump]);
    assert_eq!(rig.frame(Some((320, 400)), t0), vec![Action::Slide]);
    assert_eq!(rig.frame(Some((50, 240)), t0), vec![Action::Left]);
    assert_eq!(rig.frame(Some((600, 240)), t0), vec![Action::Right]);
    assert!(rig.frame(Some((320, 240)), t0).is_empty());

    assert_eq!(rig.keys.sink().0, vec!["up", "down", "left", "right"]);
}

#[test]
fn held_jump_fires_once_per_cooldown() {
    let mut rig = Rig::new();
    let t0 = Instant::now();
    let mut jumps = 0;
    // 30 fps for just under the cooldown.
    for i in 0..15 {
        let now = t0 + Duration::from_millis(33 * i);
        jumps += rig.frame(Some((320, 60)), now).iter().filter(|a| **a == Action::Jump).count();
    }
    assert_eq!(jumps, 1);
    let later = t0 + JUMP_DELAY + Duration::from_millis(20);
    assert_eq!(rig.frame(Some((320, 60)), later), vec![Action::Jump]);
}

#[test]
fn lean_and_jump_in_same_frame() {
    let mut rig = Rig::new();
    let fired = rig.frame(Some((10, 10)), Instant::now());
    assert_eq!(fired, vec![Action::Jump, Action::Left]);
}

#[test]
fn drag_session_blocks_control_until_release() {
    let mut rig = Rig::new();
    let t0 = Instant::now();

    rig.drag.handle(PointerEvent::Press { x: 30, y: 195 }, FRAME.height);
    assert!(rig.frame(Some((5, 5)), t0).is_empty());

    rig.drag.handle(PointerEvent::Move { x: 30, y: 120 }, FRAME.height);
    assert!(rig.frame(Some((600, 470)), t0).is_empty());
    assert_eq!(rig.drag.lines().get(LineRole::Jump), 0.25);

    rig.drag.handle(PointerEvent::Release { x: 30, y: 120 }, FRAME.height);
    // Jump line now sits at row 120: row 150 no longer jumps.
    assert!(rig.frame(Some((320, 150)), t0).is_empty());
    assert_eq!(rig.frame(Some((320, 110)), t0), vec![Action::Jump]);
}

#[test]
fn dragging_jump_line_to_floor_reads_back_clamped() {
    let mut rig = Rig::new();
    rig.drag.handle(PointerEvent::Press { x: 0, y: 192 }, FRAME.height);
    rig.drag.handle(PointerEvent::Move { x: 0, y: 24 }, FRAME.height); // 0.05
    rig.drag.handle(PointerEvent::Release { x: 0, y: 24 }, FRAME.height);
    assert_eq!(rig.drag.lines().get(LineRole::Jump), 0.1);
}

#[test]
fn crossed_lines_prefer_jump() {
    let mut rig = Rig::new();
    // Drag jump below the slide line.
    rig.drag.handle(PointerEvent::Press { x: 0, y: 192 }, FRAME.height);
    rig.drag.handle(PointerEvent::Move { x: 0, y: 384 }, FRAME.height); // 0.8
    rig.drag.handle(PointerEvent::Release { x: 0, y: 384 }, FRAME.height);

    // Between slide (288) and jump (384): both conditions hold.
    assert_eq!(rig.frame(Some((320, 330)), Instant::now()), vec![Action::Jump]);
}
