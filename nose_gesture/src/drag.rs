//! Pointer-driven line editing.
//!
//! [`PointerDragController`] owns the [`ThresholdLineStore`] and is the only
//! thing that mutates it.  Frame height is passed with every event, so the
//! controller never holds stale geometry.

use tracing::debug;

use crate::lines::{LineRole, ThresholdLineStore};

/// A press must land within this many pixels of a line to grab it.
pub const DRAG_TOLERANCE_PX: i32 = 20;

// ════════════════════════════════════════════════════════════════════════════
// PointerEvent
// ════════════════════════════════════════════════════════════════════════════

/// Raw primary-button pointer event, in frame pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Press   { x: i32, y: i32 },
    Move    { x: i32, y: i32 },
    Release { x: i32, y: i32 },
}

// ════════════════════════════════════════════════════════════════════════════
// PointerDragController
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct PointerDragController {
    lines: ThresholdLineStore,
}

impl PointerDragController {
    pub fn new(lines: ThresholdLineStore) -> Self {
        PointerDragController { lines }
    }

    pub fn lines(&self) -> &ThresholdLineStore {
        &self.lines
    }

    /// True while a drag session is active; gameplay must be suppressed.
    pub fn is_editing(&self) -> bool {
        self.lines.any_dragging()
    }

    /// Apply one pointer event.  Out-of-range coordinates are clamped, never
    /// rejected.
    pub fn handle(&mut self, event: PointerEvent, frame_height: u32) {
        match event {
            PointerEvent::Press { y, .. } => self.press(y, frame_height),

            PointerEvent::Move { y, .. } => {
                let Some(role) = self.lines.dragged() else { return };
                if frame_height == 0 {
                    return;
                }
                self.lines.set(role, y as f32 / frame_height as f32);
            }

            PointerEvent::Release { .. } => {
                if let Some(role) = self.lines.dragged() {
                    debug!(line = role.name(), position = self.lines.get(role), "drag ended");
                }
                for role in LineRole::ALL {
                    self.lines.set_dragging(role, false);
                }
            }
        }
    }

    fn press(&mut self, y: i32, frame_height: u32) {
        // One session at a time.
        if self.lines.any_dragging() {
            return;
        }
        let hit = LineRole::ALL.into_iter().find(|&role| {
            let line_y = self.lines.pixel_y(role, frame_height);
            (y - line_y).abs() < DRAG_TOLERANCE_PX
        });
        if let Some(role) = hit {
            self.lines.set_dragging(role, true);
            debug!(line = role.name(), y, "drag started");
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
