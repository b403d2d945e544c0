use crate::{
    constants::game,
    game::{
        event::GameEvent,
        pipe::Pipe,
        surface::{Paint, Surface, WorldRect},
        Bounds,
    },
};

#[derive(Debug, Clone)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: f32,
    pub score: u32,
    gravity: f32,
    lift: f32,
    canvas_height: f32,
    color: Paint,
}

impl Bird {
    pub fn new(bounds: Bounds) -> Self {
        Bird {
            x: game::BIRD_X,
            y: game::BIRD_INITIAL_Y,
            width: game::BIRD_SIZE,
            height: game::BIRD_SIZE,
            velocity: 0.0,
            score: 0,
            gravity: game::GRAVITY,
            lift: game::LIFT,
            canvas_height: bounds.height,
            color: Paint::Yellow,
        }
    }

    /// Lowest y the bird may occupy.
    pub fn floor(&self) -> f32 {
        self.canvas_height - self.height
    }

    pub fn update(&mut self) {
        self.velocity += self.gravity;
        self.y += self.velocity;

        if self.y > self.floor() {
            self.y = self.floor();
            self.velocity = 0.0;
        }
        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
    }

    /// Additive, so rapid presses compound.
    pub fn up(&mut self) -> GameEvent {
        self.velocity += self.lift;
        GameEvent::Flapped
    }

    pub fn hits(&self, pipe: &Pipe) -> bool {
        let outside_gap = self.y < pipe.top || self.y + self.height > pipe.gap_bottom();
        let overlaps = self.x + self.width > pipe.x && self.x < pipe.x + pipe.width;
        outside_gap && overlaps
    }

    pub fn score_point(&mut self) -> GameEvent {
        self.score += 1;
        GameEvent::Scored { score: self.score }
    }

    pub fn game_over(&self) -> GameEvent {
        GameEvent::Collided { score: self.score }
    }

    pub fn rect(&self) -> WorldRect {
        WorldRect::new(self.x, self.y, self.width, self.height)
    }

    pub fn show<S: Surface>(&self, surface: &mut S) {
        surface.fill_rect(self.rect(), self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bird() -> Bird {
        Bird::new(Bounds::default())
    }

    #[test]
    fn test_new_bird() {
        let bird = bird();
        assert_eq!(bird.x, 50.0);
        assert_eq!(bird.y, 150.0);
        assert_eq!(bird.velocity, 0.0);
        assert_eq!(bird.score, 0);
        assert_eq!(bird.floor(), 460.0);
    }

    #[test]
    fn test_update_applies_gravity() {
        let mut bird = bird();
        bird.update();
        assert!((bird.velocity - 0.6).abs() < 1e-6);
        assert!((bird.y - 150.6).abs() < 1e-4);
        bird.update();
        assert!((bird.velocity - 1.2).abs() < 1e-6);
        assert!((bird.y - 151.8).abs() < 1e-4);
    }

    #[test]
    fn test_update_clamps_to_floor() {
        let mut bird = bird();
        bird.y = 459.0;
        bird.velocity = 5.0;
        bird.update();
        assert_eq!(bird.y, 460.0);
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_update_clamps_to_ceiling() {
        let mut bird = bird();
        bird.y = 3.0;
        bird.velocity = -20.0;
        bird.update();
        assert_eq!(bird.y, 0.0);
        assert_eq!(bird.velocity, 0.0);
    }

    #[test]
    fn test_y_stays_in_bounds() {
        let mut bird = bird();
        for frame in 0..500 {
            if frame % 7 == 0 {
                bird.up();
            }
            bird.update();
            assert!(bird.y >= 0.0 && bird.y <= bird.floor(), "frame {frame}: y = {}", bird.y);
        }
    }

    #[test]
    fn test_up_is_additive() {
        let mut bird = bird();
        for velocity in [0.0, 3.3, -7.5, 42.0] {
            bird.velocity = velocity;
            assert_eq!(bird.up(), GameEvent::Flapped);
            assert!((bird.velocity - (velocity - 15.0)).abs() < 1e-5);
        }

        bird.velocity = 0.0;
        bird.up();
        bird.up();
        assert_eq!(bird.velocity, -30.0);
    }

    #[test]
    fn test_hits_outside_gap() {
        let bounds = Bounds::default();
        let mut bird = bird();
        let mut pipe = Pipe::with_top(200.0, bounds);
        pipe.x = 45.0;

        // Above the gap
        bird.y = 150.0;
        assert!(bird.hits(&pipe));

        // Inside the gap
        bird.y = 240.0;
        assert!(!bird.hits(&pipe));

        // Below the gap
        bird.y = 290.0;
        assert!(bird.hits(&pipe));
    }

    #[test]
    fn test_hits_gap_edges_are_safe() {
        let bounds = Bounds::default();
        let mut bird = bird();
        let mut pipe = Pipe::with_top(200.0, bounds);
        pipe.x = bird.x;

        bird.y = pipe.top;
        assert!(!bird.hits(&pipe));

        bird.y = pipe.gap_bottom() - bird.height;
        assert!(!bird.hits(&pipe));

        bird.y = pipe.top - 0.5;
        assert!(bird.hits(&pipe));

        bird.y = pipe.gap_bottom() - bird.height + 0.5;
        assert!(bird.hits(&pipe));
    }

    #[test]
    fn test_hits_requires_horizontal_overlap() {
        let bounds = Bounds::default();
        let mut bird = bird();
        bird.y = 0.0;
        let mut pipe = Pipe::with_top(200.0, bounds);

        // Touching edges do not overlap
        pipe.x = bird.x + bird.width;
        assert!(!bird.hits(&pipe));
        pipe.x = bird.x - pipe.width;
        assert!(!bird.hits(&pipe));

        pipe.x = bird.x + bird.width - 1.0;
        assert!(bird.hits(&pipe));
        pipe.x = bird.x - pipe.width + 1.0;
        assert!(bird.hits(&pipe));
    }

    #[test]
    fn test_score_point() {
        let mut bird = bird();
        assert_eq!(bird.score_point(), GameEvent::Scored { score: 1 });
        assert_eq!(bird.score_point(), GameEvent::Scored { score: 2 });
        assert_eq!(bird.score, 2);
    }

    #[test]
    fn test_game_over_does_not_mutate() {
        let mut bird = bird();
        bird.score = 7;
        bird.y = 321.0;
        assert_eq!(bird.game_over(), GameEvent::Collided { score: 7 });
        assert_eq!(bird.score, 7);
        assert_eq!(bird.y, 321.0);
    }
}
