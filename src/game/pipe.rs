use rand::Rng;

use crate::{
    constants::game,
    game::{
        surface::{Paint, Surface, WorldRect},
        Bounds,
    },
};

/// A top bar and a bottom bar with a fixed gap between them.
#[derive(Debug, Clone)]
pub struct Pipe {
    pub x: f32,
    pub width: f32,
    /// Height of the top bar.
    pub top: f32,
    /// Height of the bottom bar.
    pub bottom: f32,
    pub speed: f32,
    pub highlight: bool,
    pub color: Paint,
    canvas_height: f32,
}

impl Pipe {
    pub fn new<R: Rng>(rng: &mut R, bounds: Bounds) -> Self {
        let top = rng.gen_range(0.0..bounds.height - game::PIPE_GAP);
        Self::with_top(top, bounds)
    }

    pub fn with_top(top: f32, bounds: Bounds) -> Self {
        Pipe {
            x: bounds.width,
            width: game::PIPE_WIDTH,
            top,
            bottom: bounds.height - top - game::PIPE_GAP,
            speed: game::PIPE_SPEED,
            highlight: false,
            color: Paint::Green,
            canvas_height: bounds.height,
        }
    }

    /// World y where the bottom bar starts.
    pub fn gap_bottom(&self) -> f32 {
        self.canvas_height - self.bottom
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    pub fn offscreen(&self) -> bool {
        self.x < -self.width
    }

    pub fn highlight_pipe(&mut self) {
        self.highlight = true;
        self.color = Paint::Red;
    }

    pub fn bars(&self) -> [WorldRect; 2] {
        [
            WorldRect::new(self.x, 0.0, self.width, self.top),
            WorldRect::new(self.x, self.gap_bottom(), self.width, self.bottom),
        ]
    }

    pub fn show<S: Surface>(&self, surface: &mut S) {
        for bar in self.bars() {
            surface.fill_rect(bar, self.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn test_bars_fill_canvas_height() {
        let bounds = Bounds::default();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pipe = Pipe::new(&mut rng, bounds);
            assert!(pipe.top >= 0.0 && pipe.top < bounds.height - game::PIPE_GAP);
            assert!(
                (pipe.top + game::PIPE_GAP + pipe.bottom - bounds.height).abs() < 1e-3,
                "seed {seed}: top {} bottom {}",
                pipe.top,
                pipe.bottom
            );
        }
    }

    #[test]
    fn test_new_pipe_starts_at_right_edge() {
        let bounds = Bounds::default();
        let pipe = Pipe::with_top(120.0, bounds);
        assert_eq!(pipe.x, 320.0);
        assert_eq!(pipe.width, 20.0);
        assert_eq!(pipe.speed, 2.0);
        assert_eq!(pipe.bottom, 260.0);
        assert_eq!(pipe.gap_bottom(), 220.0);
        assert!(!pipe.highlight);
        assert_eq!(pipe.color, Paint::Green);
    }

    #[test]
    fn test_update_scrolls_left() {
        let mut pipe = Pipe::with_top(120.0, Bounds::default());
        pipe.update();
        pipe.update();
        assert_eq!(pipe.x, 316.0);
    }

    #[test]
    fn test_offscreen_after_passing_left_edge() {
        let mut pipe = Pipe::with_top(120.0, Bounds::default());
        pipe.x = -20.0;
        assert!(!pipe.offscreen());
        pipe.update();
        assert!(pipe.offscreen());
    }

    #[test]
    fn test_highlight_pipe() {
        let mut pipe = Pipe::with_top(120.0, Bounds::default());
        pipe.highlight_pipe();
        assert!(pipe.highlight);
        assert_eq!(pipe.color, Paint::Red);
    }

    #[test]
    fn test_bars() {
        let mut pipe = Pipe::with_top(120.0, Bounds::default());
        pipe.x = 100.0;
        let [top, bottom] = pipe.bars();
        assert_eq!(top, WorldRect::new(100.0, 0.0, 20.0, 120.0));
        assert_eq!(bottom, WorldRect::new(100.0, 220.0, 20.0, 260.0));
    }
}
