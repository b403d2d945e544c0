pub mod game;

use ratatui::style::Color;

/// Terminal footprint of the playfield, border included. 40x30 cells inside
/// the border keeps the 2:3 world aspect with half-block rows.
pub const WIDTH: u16 = 42;
pub const HEIGHT: u16 = 32;

pub const SKY: Color = Color::Rgb(0x70, 0xc5, 0xce);
pub const BORDER: Color = Color::Black;
