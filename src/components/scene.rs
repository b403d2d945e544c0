//! Terminal rendition of a [`Surface`].
//!
//! Draw calls are retained until the next full clear and rasterised on
//! render, two world samples per cell using upper half blocks.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::{
    constants::SKY,
    game::{
        surface::{Font, Paint, Surface, WorldRect},
        Bounds,
    },
};

const UPPER_HALF: &str = "▀";

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(WorldRect),
    Rect(WorldRect, Paint),
    Text { text: String, x: f32, y: f32, font: Font, paint: Paint },
}

#[derive(Debug, Clone)]
pub struct Scene {
    bounds: Bounds,
    commands: Vec<DrawCommand>,
    overlay: String,
}

impl Scene {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds, commands: Vec::new(), overlay: String::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn overlay(&self) -> &str {
        &self.overlay
    }

    /// Colour at a world point, latest draw call on top.
    fn sample(&self, x: f32, y: f32) -> Color {
        self.commands
            .iter()
            .rev()
            .find_map(|command| match command {
                DrawCommand::Clear(rect) if rect.contains(x, y) => Some(SKY),
                DrawCommand::Rect(rect, paint) if rect.contains(x, y) => Some(color(*paint)),
                _ => None,
            })
            .unwrap_or(SKY)
    }

    fn render_text(&self, area: Rect, buf: &mut Buffer) {
        for command in &self.commands {
            let DrawCommand::Text { text, x, y, font, paint } = command else {
                continue;
            };
            // Centre the glyph box on the cell row the text occupies.
            let top = y - font.size_px as f32 / 2.0;
            let col = (x / self.bounds.width * area.width as f32).floor();
            let row = (top / self.bounds.height * area.height as f32).floor();
            if col < 0.0 || row < 0.0 || col >= area.width as f32 || row >= area.height as f32 {
                continue;
            }
            let (col, row) = (col as u16, row as u16);
            let style = Style::default().fg(color(*paint)).add_modifier(Modifier::BOLD);
            buf.set_stringn(area.x + col, area.y + row, text, (area.width - col) as usize, style);
        }
    }
}

fn color(paint: Paint) -> Color {
    match paint {
        Paint::Yellow => Color::Rgb(0xff, 0xff, 0x00),
        Paint::Green => Color::Rgb(0x00, 0x80, 0x00),
        Paint::Red => Color::Rgb(0xff, 0x00, 0x00),
        Paint::Black => Color::Rgb(0x00, 0x00, 0x00),
    }
}

impl Surface for Scene {
    fn clear(&mut self, region: WorldRect) {
        if region == self.bounds.rect() {
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear(region));
    }

    fn fill_rect(&mut self, rect: WorldRect, paint: Paint) {
        self.commands.push(DrawCommand::Rect(rect, paint));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: Font, paint: Paint) {
        self.commands.push(DrawCommand::Text { text: text.to_string(), x, y, font, paint });
    }

    fn set_score_overlay(&mut self, text: &str) {
        self.overlay = text.to_string();
    }
}

impl Widget for &Scene {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let scale_x = self.bounds.width / area.width as f32;
        let scale_y = self.bounds.height / (area.height as f32 * 2.0);

        for row in 0..area.height {
            for col in 0..area.width {
                let x = (col as f32 + 0.5) * scale_x;
                let top = self.sample(x, (row as f32 * 2.0 + 0.5) * scale_y);
                let bottom = self.sample(x, (row as f32 * 2.0 + 1.5) * scale_y);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF).set_fg(top).set_bg(bottom);
                }
            }
        }

        self.render_text(area, buf);
    }
}
