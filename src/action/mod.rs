mod game;

use serde::{Deserialize, Serialize};
use strum::Display;

pub use crate::action::game::GameAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    ToggleShowHelp,
    // Page actions
    Game(GameAction),
}

impl Action {
    /// Label shown in the key help overlay.
    pub fn name(&self) -> String {
        match self {
            Action::Game(action) => action.to_string(),
            Action::ToggleShowHelp => "Toggle help".to_string(),
            action => action.to_string(),
        }
    }
}
