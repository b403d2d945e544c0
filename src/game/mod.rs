//! Game core: physics, collisions, spawning and scoring.
//!
//! Nothing in here performs I/O. Frames are drawn through [`Surface`] and
//! everything audible or loggable comes back out as [`GameEvent`]s.

pub mod bird;
pub mod event;
pub mod pipe;
pub mod spawner;
pub mod surface;

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use strum::Display;
use tracing::{debug, info};

use crate::{
    constants::game,
    game::{
        bird::Bird,
        event::GameEvent,
        pipe::Pipe,
        spawner::SpawnTimer,
        surface::{Font, Paint, Surface, WorldRect},
    },
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn rect(&self) -> WorldRect {
        WorldRect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds { width: game::CANVAS_WIDTH, height: game::CANVAS_HEIGHT }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    Running,
    Ended,
}

pub struct Game {
    bounds: Bounds,
    bird: Bird,
    pipes: Vec<Pipe>,
    phase: Phase,
    /// Spawn interval in milliseconds.
    difficulty: u32,
    /// Tracked but never applied to pipe motion; every pipe keeps its own speed.
    game_speed: f32,
    frame_count: u64,
    spawner: SpawnTimer,
    rng: StdRng,
}

impl Game {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let bounds = Bounds::default();
        Game {
            bounds,
            bird: Bird::new(bounds),
            pipes: Vec::new(),
            phase: Phase::Running,
            difficulty: game::INITIAL_DIFFICULTY,
            game_speed: game::INITIAL_GAME_SPEED,
            frame_count: 0,
            spawner: SpawnTimer::new(),
            rng,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.bird.score
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn game_speed(&self) -> f32 {
        self.game_speed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn spawner(&self) -> &SpawnTimer {
        &self.spawner
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.difficulty as u64)
    }

    /// Player input. Ignored once the game has ended.
    pub fn flap(&mut self) -> Option<GameEvent> {
        if !self.is_running() {
            return None;
        }
        Some(self.bird.up())
    }

    /// Advances the spawn timer, appending a pipe for every period that
    /// elapsed. Returns how many pipes were spawned.
    pub fn elapse(&mut self, elapsed: Duration) -> u32 {
        if !self.is_running() {
            return 0;
        }

        let fired = self.spawner.advance(elapsed, self.spawn_interval());
        for _ in 0..fired {
            let pipe = Pipe::new(&mut self.rng, self.bounds);
            self.pipes.push(pipe);
        }
        fired
    }

    /// One frame: physics, drawing, collisions and scoring.
    pub fn draw<S: Surface>(&mut self, surface: &mut S) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.is_running() {
            return events;
        }
        self.frame_count += 1;

        surface.clear(self.bounds.rect());

        self.bird.update();
        self.bird.show(surface);

        let mut collided = false;
        // Reverse order keeps indices valid across removals.
        for i in (0..self.pipes.len()).rev() {
            self.pipes[i].update();
            self.pipes[i].show(surface);

            if self.pipes[i].offscreen() {
                self.pipes.remove(i);
                events.push(self.bird.score_point());
                if let Some(event) = self.increase_difficulty() {
                    events.push(event);
                }
                continue;
            }

            if self.bird.hits(&self.pipes[i]) {
                self.pipes[i].highlight_pipe();
                collided = true;
            }
        }

        // Older pipes can still leave the screen after a hit in the same pass.
        if collided {
            self.end();
            events.push(self.bird.game_over());
        }

        surface.set_score_overlay(&format!("Score: {}", self.bird.score));

        if !self.is_running() {
            self.end_game(surface);
        }

        events
    }

    fn increase_difficulty(&mut self) -> Option<GameEvent> {
        let score = self.bird.score;
        if score == 0 || score % game::POINTS_PER_LEVEL != 0 {
            return None;
        }

        self.difficulty = self.difficulty.saturating_sub(game::DIFFICULTY_STEP);
        self.game_speed += game::GAME_SPEED_STEP;
        debug!(score, difficulty = self.difficulty, game_speed = self.game_speed, "difficulty increased");
        Some(GameEvent::DifficultyIncreased { difficulty: self.difficulty })
    }

    fn end(&mut self) {
        self.phase = Phase::Ended;
        self.spawner.cancel();
        info!(score = self.bird.score, frames = self.frame_count, "game over");
    }

    fn end_game<S: Surface>(&self, surface: &mut S) {
        for pipe in self.pipes.iter().filter(|pipe| pipe.highlight) {
            pipe.show(surface);
        }

        let font = Font { size_px: game::GAME_OVER_FONT_PX };
        let (cx, cy) = (self.bounds.width / 2.0, self.bounds.height / 2.0);
        surface.fill_text("Game Over", cx - 70.0, cy, font, Paint::Black);
        surface.fill_text(&format!("Final Score: {}", self.bird.score), cx - 90.0, cy + 40.0, font, Paint::Black);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
