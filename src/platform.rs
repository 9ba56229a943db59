//! The three collaborators the game loop talks to. The crossterm versions live
//! in `display`; tests supply their own.

use crate::entities::{Rect, Rgb};
use crate::error::Result;

/// Held state of every logical action for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub restart: bool,
    pub quit: bool,
}

pub trait InputSource {
    /// Snapshot of the actions held this frame. Must not block.
    fn poll(&mut self) -> Result<Controls>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Large,
}

/// Immediate-mode drawing in world coordinates (800x600, y down).
pub trait Renderer {
    fn clear(&mut self, color: Rgb);
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgb);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    fn stroke_rect(&mut self, rect: Rect, color: Rgb);
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgb);
    fn stroke_circle(&mut self, center: (f32, f32), radius: f32, color: Rgb);
    /// `pos` is the top-left corner of the text.
    fn draw_text(&mut self, text: &str, pos: (f32, f32), color: Rgb, size: TextSize);
    /// Push the finished frame to the screen.
    fn present(&mut self) -> Result<()>;
}

pub trait Clock {
    /// Block until the next frame boundary.
    fn wait_for_next_frame(&mut self);
    /// Milliseconds since the clock started.
    fn ticks_ms(&self) -> u64;
}
