//! Drawing seam between the game core and whatever presents it.
//!
//! Coordinates are world units on the fixed 320x480 canvas, origin top-left,
//! y growing downwards.

use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WorldRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        WorldRect { x, y, width, height }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Paint {
    Yellow,
    Green,
    Red,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Font {
    pub size_px: u16,
}

pub trait Surface {
    fn clear(&mut self, region: WorldRect);

    fn fill_rect(&mut self, rect: WorldRect, paint: Paint);

    /// `y` is the text baseline.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: Font, paint: Paint);

    /// Fixed top-left score line, outside the drawing area proper.
    fn set_score_overlay(&mut self, text: &str);
}
