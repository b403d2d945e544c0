pub const CANVAS_WIDTH: f32 = 320.0;
pub const CANVAS_HEIGHT: f32 = 480.0;

pub const GRAVITY: f32 = 0.6;
pub const LIFT: f32 = -15.0;

pub const BIRD_X: f32 = 50.0;
pub const BIRD_INITIAL_Y: f32 = 150.0;
pub const BIRD_SIZE: f32 = 20.0;

pub const PIPE_WIDTH: f32 = 20.0;
pub const PIPE_GAP: f32 = 100.0;
pub const PIPE_SPEED: f32 = 2.0;

/// Spawn interval in milliseconds at the start of a session.
pub const INITIAL_DIFFICULTY: u32 = 75;
pub const DIFFICULTY_STEP: u32 = 5;
pub const INITIAL_GAME_SPEED: f32 = 2.0;
pub const GAME_SPEED_STEP: f32 = 0.2;
/// Difficulty rises every time the score reaches a multiple of this.
pub const POINTS_PER_LEVEL: u32 = 10;

pub const GAME_OVER_FONT_PX: u16 = 30;
