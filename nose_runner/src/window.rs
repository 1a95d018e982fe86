//! Software-rendered controller window using `minifb`.
//!
//! Layout (frame-sized, drawn over the camera image):
//!
//! ```text
//! ┌───────────────────────────┬───────────────────────────┐
//! │ instructions              │                           │
//! │                       JUMP!                           │
//! │ ●━━━━━━━━━━━━━━━━━━━━━ yellow jump line ━━━━━━━━━━━━━● │
//! │ <-- LEFT              (nose)               RIGHT -->  │
//! │ ●━━━━━━━━━━━━━━━━━━━━━ red slide line ━━━━━━━━━━━━━━━● │
//! │                      SLIDE!                           │
//! └───────────────────────────┴───────────────────────────┘
//!                    green midline
//! ```

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use nose_gesture::{Action, FrameSize, LineRole, PixelPoint, PointerEvent, ThresholdLineStore};

use crate::app::{FrameReport, Surface, WindowInput};
use crate::error::{AppError, AppResult};
use crate::landmark::{Frame, SimInput};

// ════════════════════════════════════════════════════════════════════════════
// Colors and layout
// ════════════════════════════════════════════════════════════════════════════

const YELLOW:  u32 = 0xFFFFFF00;
const RED:     u32 = 0xFFFF0000;
const GREEN:   u32 = 0xFF00FF00;
const MAGENTA: u32 = 0xFFFF00FF;
const WHITE:   u32 = 0xFFFFFFFF;

const LINE_W:         i32 = 3;
const LINE_W_DRAGGED: i32 = 5;
const HANDLE_R:       i32 = 8;
const HANDLE_INSET:   i32 = 50;
const NOSE_R:         i32 = 15;

/// Simulated nose step per frame, as a fraction of the frame.
const NUDGE:      f32 = 0.01;
const NUDGE_FAST: f32 = 0.03;

const INSTRUCTIONS: [(&str, u32); 4] = [
    ("JUMP: Nose above yellow", YELLOW),
    ("SLIDE: Nose below red",   RED),
    ("MOVE: Lean left/right",   GREEN),
    ("ADJUST: Drag the lines",  WHITE),
];

// ════════════════════════════════════════════════════════════════════════════
// Canvas — pure drawing, no window
// ════════════════════════════════════════════════════════════════════════════

/// ARGB drawing surface with clipped primitives.
pub struct Canvas {
    pub buf: Vec<u32>,
    w:       i32,
    h:       i32,
}

impl Canvas {
    pub fn from_frame(frame: &Frame) -> Self {
        Canvas {
            buf: frame.pixels.clone(),
            w:   frame.size.width as i32,
            h:   frame.size.height as i32,
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.w || y >= self.h {
            return None;
        }
        Some(self.buf[(y * self.w + x) as usize])
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && x < self.w && y < self.h {
            self.buf[(y * self.w + x) as usize] = color;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for row in y.max(0)..y.saturating_add(h).min(self.h) {
            for col in x.max(0)..x.saturating_add(w).min(self.w) {
                self.buf[(row * self.w + col) as usize] = color;
            }
        }
    }

    fn hline(&mut self, y: i32, thickness: i32, color: u32) {
        self.fill_rect(0, y - thickness / 2, self.w, thickness, color);
    }

    fn vline(&mut self, x: i32, thickness: i32, color: u32) {
        self.fill_rect(x - thickness / 2, 0, thickness, self.h, color);
    }

    fn disc(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx.saturating_add(dx), cy.saturating_add(dy), color);
                }
            }
        }
    }

    /// Bitmap text, 3×5 glyphs scaled by `scale`.
    fn label(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        let (px, py) = (cx.saturating_add(col * scale), y.saturating_add(row as i32 * scale));
                        self.fill_rect(px, py, scale, scale, color);
                    }
                }
            }
            cx = cx.saturating_add(4 * scale); // 3 wide + 1 gap
            if cx >= self.w { break; }
        }
    }

    /// Draw the whole controller overlay for one frame.
    pub fn draw_overlay(&mut self, lines: &ThresholdLineStore, report: &FrameReport) {
        let (w, h) = (self.w, self.h);
        let jump_y  = lines.pixel_y(LineRole::Jump,  h as u32);
        let slide_y = lines.pixel_y(LineRole::Slide, h as u32);

        let width_for = |role| if lines.is_dragging(role) { LINE_W_DRAGGED } else { LINE_W };
        self.hline(jump_y,  width_for(LineRole::Jump),  YELLOW);
        self.hline(slide_y, width_for(LineRole::Slide), RED);
        self.vline(w / 2, 2, GREEN);

        for (y, color) in [(jump_y, YELLOW), (slide_y, RED)] {
            self.disc(HANDLE_INSET, y, HANDLE_R, color);
            self.disc(w - HANDLE_INSET, y, HANDLE_R, color);
        }

        if let Some(PixelPoint { x, y }) = report.nose {
            self.disc(x, y, NOSE_R, MAGENTA);
        }

        for &action in &report.fired {
            match action {
                Action::Jump  => self.label(action.label(), w / 2 - 100, 100, 6, GREEN),
                Action::Slide => self.label(action.label(), w / 2 - 100, slide_y + 50, 6, RED),
                Action::Left  => self.label(action.label(), 100, h / 2, 3, GREEN),
                Action::Right => self.label(action.label(), w - 300, h / 2, 3, GREEN),
            }
        }

        for (i, (text, color)) in INSTRUCTIONS.iter().enumerate() {
            self.label(text, 50, 20 + 40 * i as i32, 3, *color);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer — the minifb window
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:     Window,
    sim_tx:     Option<Sender<SimInput>>,
    mouse_down: bool,
    last_mouse: Option<(i32, i32)>,
}

impl Visualizer {
    /// Open the window.  `sim_tx` receives nose-simulation keys when the
    /// simulated estimator is in use.
    pub fn new(size: FrameSize, sim_tx: Option<Sender<SimInput>>) -> AppResult<Self> {
        let mut window = Window::new(
            "Game Controller",
            size.width as usize,
            size.height as usize,
            WindowOptions { resize: false, ..WindowOptions::default() },
        )
        .map_err(|e| AppError::window(e.to_string()))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, sim_tx, mouse_down: false, last_mouse: None })
    }

    fn poll_pointer(&mut self, out: &mut Vec<PointerEvent>) {
        // Pass keeps reporting while the pointer is outside the window, so a
        // drag past the edge still clamps the line.
        let pos = self
            .window
            .get_mouse_pos(MouseMode::Pass)
            .map(|(x, y)| (x as i32, y as i32));
        let down = self.window.get_mouse_down(MouseButton::Left);

        if let Some((x, y)) = pos {
            if down && !self.mouse_down {
                out.push(PointerEvent::Press { x, y });
            }
            if self.last_mouse != Some((x, y)) {
                out.push(PointerEvent::Move { x, y });
            }
        }
        if !down && self.mouse_down {
            let (x, y) = pos.or(self.last_mouse).unwrap_or((0, 0));
            out.push(PointerEvent::Release { x, y });
        }

        self.mouse_down = down;
        if pos.is_some() {
            self.last_mouse = pos;
        }
    }

    fn poll_sim_keys(&self) {
        let Some(tx) = &self.sim_tx else { return };

        let shift = self.window.is_key_down(Key::LeftShift)
                 || self.window.is_key_down(Key::RightShift);
        let step = if shift { NUDGE_FAST } else { NUDGE };

        let held = |k: Key| self.window.is_key_down(k);
        let mut dx = 0.0;
        let mut dy = 0.0;
        if held(Key::A) { dx -= step; }
        if held(Key::D) { dx += step; }
        if held(Key::W) { dy -= step; }
        if held(Key::S) { dy += step; }
        // The estimator outlives the window, so a failed send only happens
        // during shutdown.
        if dx != 0.0 || dy != 0.0 {
            tx.send(SimInput::Nudge { dx, dy }).ok();
        }
        if self.window.is_key_pressed(Key::H, KeyRepeat::No) {
            tx.send(SimInput::ToggleFace).ok();
        }
    }
}

impl Surface for Visualizer {
    fn poll(&mut self) -> WindowInput {
        let mut input = WindowInput::default();
        if !self.window.is_open() || self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            input.quit = true;
            return input;
        }
        self.poll_pointer(&mut input.pointer);
        self.poll_sim_keys();
        input
    }

    fn present(
        &mut self,
        frame:  &Frame,
        lines:  &ThresholdLineStore,
        report: &FrameReport,
    ) -> AppResult<()> {
        let mut canvas = Canvas::from_frame(frame);
        canvas.draw_overlay(lines, report);
        self.window
            .update_with_buffer(&canvas.buf, frame.size.width as usize, frame.size.height as usize)
            .map_err(|e| AppError::window(e.to_string()))?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '<' => [0b001, 0b010, 0b100, 0b010, 0b001],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
