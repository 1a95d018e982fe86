//! The two user-adjustable threshold lines.
//!
//! Positions are stored as fractions of frame height so they survive a
//! change in frame geometry.  Conversion to pixels happens on demand.

// ════════════════════════════════════════════════════════════════════════════
// Limits and defaults
// ════════════════════════════════════════════════════════════════════════════

/// Lowest fraction of frame height a line may occupy.
pub const LINE_MIN: f32 = 0.1;
/// Highest fraction of frame height a line may occupy.
pub const LINE_MAX: f32 = 0.9;

const DEFAULT_JUMP:  f32 = 0.4;
const DEFAULT_SLIDE: f32 = 0.6;

// ════════════════════════════════════════════════════════════════════════════
// LineRole
// ════════════════════════════════════════════════════════════════════════════

/// Which of the two lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// Upper line; a nose above it triggers a jump.
    Jump,
    /// Lower line; a nose below it triggers a slide.
    Slide,
}

impl LineRole {
    /// Click-priority order: Jump is always considered before Slide.
    pub const ALL: [LineRole; 2] = [LineRole::Jump, LineRole::Slide];

    pub fn name(self) -> &'static str {
        match self {
            LineRole::Jump  => "jump",
            LineRole::Slide => "slide",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ThresholdLineStore
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
struct ThresholdLine {
    position: f32,
    dragging: bool,
}

impl ThresholdLine {
    fn at(position: f32) -> Self {
        ThresholdLine { position: clamp_fraction(position), dragging: false }
    }
}

/// Holds both line positions and their drag flags.
///
/// Single-owner, no interior mutability: callers that deliver pointer events
/// from another thread must route them through the owning thread.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdLineStore {
    jump:  ThresholdLine,
    slide: ThresholdLine,
}

impl Default for ThresholdLineStore {
    fn default() -> Self {
        ThresholdLineStore::new(DEFAULT_JUMP, DEFAULT_SLIDE)
    }
}

impl ThresholdLineStore {
    /// Create a store with the given initial fractions (clamped).
    pub fn new(jump: f32, slide: f32) -> Self {
        ThresholdLineStore {
            jump:  ThresholdLine::at(jump),
            slide: ThresholdLine::at(slide),
        }
    }

    fn line(&self, role: LineRole) -> &ThresholdLine {
        match role {
            LineRole::Jump  => &self.jump,
            LineRole::Slide => &self.slide,
        }
    }

    fn line_mut(&mut self, role: LineRole) -> &mut ThresholdLine {
        match role {
            LineRole::Jump  => &mut self.jump,
            LineRole::Slide => &mut self.slide,
        }
    }

    /// Current position as a fraction of frame height.
    pub fn get(&self, role: LineRole) -> f32 {
        self.line(role).position
    }

    /// Store a new position, clamped to [`LINE_MIN`]..=[`LINE_MAX`].
    pub fn set(&mut self, role: LineRole, fraction: f32) {
        self.line_mut(role).position = clamp_fraction(fraction);
    }

    pub fn is_dragging(&self, role: LineRole) -> bool {
        self.line(role).dragging
    }

    pub fn set_dragging(&mut self, role: LineRole, dragging: bool) {
        self.line_mut(role).dragging = dragging;
    }

    /// True while either line is being dragged.
    pub fn any_dragging(&self) -> bool {
        self.jump.dragging || self.slide.dragging
    }

    /// The role currently being dragged, Jump first.
    pub fn dragged(&self) -> Option<LineRole> {
        LineRole::ALL.into_iter().find(|&r| self.is_dragging(r))
    }

    /// Line position in whole pixels for a frame of `frame_height` rows.
    ///
    /// Truncates toward zero, so a 0.4 line on a 480-row frame sits on row 192.
    pub fn pixel_y(&self, role: LineRole, frame_height: u32) -> i32 {
        (frame_height as f32 * self.get(role)) as i32
    }
}

/// Clamp to the legal line range.  NaN collapses to the floor.
fn clamp_fraction(f: f32) -> f32 {
    if f.is_nan() {
        return LINE_MIN;
    }
    f.clamp(LINE_MIN, LINE_MAX)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
