use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::{debug, info};

use super::Page;
use crate::{
    action::{Action, GameAction},
    audio::{AudioSink, Cue},
    components::scene::Scene,
    game::{event::GameEvent, Game},
    tui::Frame,
};

const HINT: &str = "Press space to flap";

pub struct GamePage {
    game: Game,
    scene: Scene,
    audio: Box<dyn AudioSink>,
    /// Game time covered by one tick.
    step: Duration,
    flapped: bool,
}

impl GamePage {
    pub fn new(game: Game, audio: Box<dyn AudioSink>, tick_rate: f64) -> Self {
        let scene = Scene::new(game.bounds());
        GamePage { game, scene, audio, step: Duration::from_secs_f64(1.0 / tick_rate), flapped: false }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    fn handle_events(&mut self, events: Vec<GameEvent>) {
        for event in events {
            let cue = match event {
                GameEvent::Flapped => Some(Cue::Flap),
                GameEvent::Scored { score } => {
                    debug!(score, "scored");
                    Some(Cue::Score)
                },
                GameEvent::Collided { score } => {
                    info!(score, "collided");
                    Some(Cue::Hit)
                },
                GameEvent::DifficultyIncreased { difficulty } => {
                    info!(difficulty, "spawn interval shortened");
                    None
                },
            };
            if let Some(cue) = cue {
                self.audio.play(cue);
            }
        }
    }
}

impl Page for GamePage {
    fn init(&mut self) -> Result<()> {
        info!(step = ?self.step, spawn_interval = ?self.game.spawn_interval(), "game started");
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.game.elapse(self.step);
                let events = self.game.draw(&mut self.scene);
                self.handle_events(events);
            },
            Action::Game(GameAction::Flap) => {
                if let Some(event) = self.game.flap() {
                    self.flapped = true;
                    self.handle_events(vec![event]);
                }
            },
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        f.render_widget(&self.scene, area);

        let [score_area, _, hint_area, _] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(2), Constraint::Length(1), Constraint::Fill(1)])
                .areas(area);

        // Styled per span so the sky behind the text keeps its half blocks.
        let score_style = Style::default().fg(Color::Black).add_modifier(Modifier::BOLD);
        let score = Paragraph::new(Line::from(Span::styled(self.scene.overlay(), score_style))).alignment(Alignment::Left);
        f.render_widget(score, score_area);

        if !self.flapped && self.game.is_running() {
            let hint_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
            let hint = Paragraph::new(Line::from(Span::styled(HINT, hint_style))).alignment(Alignment::Center);
            f.render_widget(hint, hint_area);
        }

        Ok(())
    }
}
