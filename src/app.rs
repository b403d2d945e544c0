use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::Style,
    widgets::{Block, BorderType, Borders},
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, error, info};

use crate::{
    action::Action,
    audio,
    components::help::Help,
    config::Config,
    constants::{BORDER, HEIGHT, WIDTH},
    game::Game,
    pages::{game::GamePage, Page},
    tui::{self, Frame},
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    page: Box<dyn Page>,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::new()?;
        let audio = audio::open(&config.audio);
        let page = GamePage::new(Game::new(), audio, config.tick_rate);

        Ok(Self {
            tick_rate: config.tick_rate,
            frame_rate: config.frame_rate,
            should_quit: false,
            should_suspend: false,
            show_help: false,
            config,
            page: Box::new(page),
        })
    }

    fn key_action(&self, key: &KeyEvent) -> Option<Action> {
        self.config.keybindings.lookup(key).cloned()
    }

    /// Updates the app-level flags an action controls.
    fn apply(&mut self, action: &Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resume => self.should_suspend = false,
            Action::ToggleShowHelp => self.show_help = !self.show_help,
            Action::Error(e) => error!(error = %e, "action failed"),
            _ => {},
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?;
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        tui.enter()?;

        self.page.init()?;

        loop {
            match tui.next().await? {
                tui::Event::Tick => action_tx.send(Action::Tick)?,
                tui::Event::Render => action_tx.send(Action::Render)?,
                tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                tui::Event::Closed => action_tx.send(Action::Quit)?,
                tui::Event::Error => action_tx.send(Action::Error("terminal event stream failed".to_string()))?,
                tui::Event::Key(key) => {
                    if let Some(action) = self.key_action(&key) {
                        info!(?action, "key bound");
                        action_tx.send(action)?;
                    }
                },
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!(?action, "dispatching");
                }
                self.apply(&action);
                match &action {
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.render(&mut tui, &action_tx)?;
                    },
                    Action::Render => {
                        self.render(&mut tui, &action_tx)?;
                    },
                    _ => {},
                }
                // The help overlay pauses the game.
                if !self.show_help {
                    if let Some(action) = self.page.update(action)? {
                        action_tx.send(action)?
                    }
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                tui.resume()?;
                tui.clear()?;
                action_tx.send(Action::Resume)?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        tui.draw(|f| {
            let area = playfield(f.area());

            let border = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" flappy-rs ")
                .style(Style::default().bg(BORDER));
            f.render_widget(border, area);

            let area = area.inner(Margin { horizontal: 1, vertical: 1 });

            if let Err(e) = self.page.draw(f, area) {
                let _ = action_tx.send(Action::Error(format!("failed to draw: {e:?}")));
            }

            if self.show_help {
                draw_help(&self.config, f, area);
            }
        })?;

        Ok(())
    }
}

fn draw_help(config: &Config, f: &mut Frame<'_>, rect: Rect) {
    let help = Help::new(vec![
        ("System".to_string(), &config.keybindings.global),
        ("Game".to_string(), &config.keybindings.game),
    ]);

    f.render_widget(help, rect);
}

/// Centres the bordered playfield in the terminal.
fn playfield(area: Rect) -> Rect {
    let [_, area, _] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(HEIGHT), Constraint::Fill(1)]).areas(area);
    let [_, area, _] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(WIDTH), Constraint::Fill(1)]).areas(area);
    area
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_suspend_then_resume() {
        let mut app = App::new().unwrap();
        app.apply(&Action::Suspend);
        assert!(app.should_suspend);
        app.apply(&Action::Resume);
        assert!(!app.should_suspend);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_toggle_and_quit() {
        let mut app = App::new().unwrap();
        app.apply(&Action::ToggleShowHelp);
        assert!(app.show_help);
        app.apply(&Action::ToggleShowHelp);
        assert!(!app.show_help);
        app.apply(&Action::Tick);
        assert!(!app.should_quit);
        app.apply(&Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_playfield_is_centred() {
        let area = playfield(Rect::new(0, 0, 82, 40));
        assert_eq!(area, Rect::new(20, 4, WIDTH, HEIGHT));
    }
}
