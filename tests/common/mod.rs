//! Test doubles for the loop's collaborators.
#![allow(dead_code)]

use std::collections::VecDeque;

use space_defender::entities::{Rect, Rgb};
use space_defender::platform::{Clock, Controls, InputSource, Renderer, TextSize};
use space_defender::Result;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Rgb),
    Polygon(Vec<(f32, f32)>, Rgb),
    FillRect(Rect, Rgb),
    StrokeRect(Rect, Rgb),
    FillCircle((f32, f32), f32, Rgb),
    StrokeCircle((f32, f32), f32, Rgb),
    Text(String, Rgb, TextSize),
}

/// Keeps every call of the current frame; `present` archives the frame.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
    pub frames: Vec<Vec<DrawCall>>,
}

impl RecordingRenderer {
    pub fn texts(&self) -> Vec<String> {
        self.last_frame()
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(t, _, _) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    pub fn last_frame(&self) -> &[DrawCall] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self, color: Rgb) {
        self.calls.push(DrawCall::Clear(color));
    }
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgb) {
        self.calls.push(DrawCall::Polygon(points.to_vec(), color));
    }
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.calls.push(DrawCall::FillRect(rect, color));
    }
    fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        self.calls.push(DrawCall::StrokeRect(rect, color));
    }
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, color: Rgb) {
        self.calls.push(DrawCall::FillCircle(center, radius, color));
    }
    fn stroke_circle(&mut self, center: (f32, f32), radius: f32, color: Rgb) {
        self.calls.push(DrawCall::StrokeCircle(center, radius, color));
    }
    fn draw_text(&mut self, text: &str, _pos: (f32, f32), color: Rgb, size: TextSize) {
        self.calls.push(DrawCall::Text(text.to_string(), color, size));
    }
    fn present(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.calls));
        Ok(())
    }
}

/// Plays back a fixed list of frames, then holds quit.
pub struct ScriptedInput {
    frames: VecDeque<Controls>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Controls>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<Controls> {
        Ok(self.frames.pop_front().unwrap_or(Controls {
            quit: true,
            ..Controls::default()
        }))
    }
}

/// Advances 16 ms per frame without sleeping.
#[derive(Default)]
pub struct ManualClock {
    pub ticks: u64,
    pub waits: u32,
}

impl Clock for ManualClock {
    fn wait_for_next_frame(&mut self) {
        self.waits += 1;
        self.ticks += 16;
    }
    fn ticks_ms(&self) -> u64 {
        self.ticks
    }
}
