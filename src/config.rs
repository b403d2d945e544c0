use std::{collections::HashMap, path::PathBuf};

use color_eyre::eyre::{eyre, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{
    de::{self, Deserializer},
    Deserialize,
};
use tracing::{info, warn};

use crate::action::Action;

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_audio_enabled")]
    pub enabled: bool,
    /// Directory holding flap.mp3, score.mp3 and hit.mp3.
    #[serde(default)]
    pub asset_dir: PathBuf,
}

fn default_audio_enabled() -> bool {
    true
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig { enabled: default_audio_enabled(), asset_dir: PathBuf::from(".") }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Game steps per second.
    pub tick_rate: f64,
    /// Redraws per second.
    pub frame_rate: f64,
    #[serde(default)]
    pub audio: AudioConfig,
    /// Compiled in; a user config file cannot remap keys.
    #[serde(skip)]
    pub keybindings: KeyBindings,
}

/// The part of the embedded defaults that is never overridden.
#[derive(Deserialize)]
struct Defaults {
    keybindings: KeyBindings,
}

impl Config {
    pub fn new() -> Result<Self> {
        let defaults: Defaults = serde_yaml::from_str(CONFIG)?;
        let config_dir = crate::utils::get_config_dir();
        let mut builder =
            config::Config::builder().add_source(config::File::from_str(CONFIG, config::FileFormat::Yaml));

        let config_files = [("config.yaml", config::FileFormat::Yaml)];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if found_config {
            info!(config_dir = %config_dir.display(), "loaded user configuration");
        } else {
            info!("no user configuration file found, using defaults");
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.keybindings = defaults.keybindings;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(eyre!("tick_rate must be a positive number, got {}", self.tick_rate));
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(eyre!("frame_rate must be a positive number, got {}", self.frame_rate));
        }
        if !self.audio.asset_dir.as_os_str().is_empty() && !self.audio.asset_dir.is_dir() {
            warn!(asset_dir = %self.audio.asset_dir.display(), "audio asset directory does not exist");
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawPageKeyBindings {
    pub click: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawKeyBindings {
    pub global: RawPageKeyBindings,
    pub game: RawPageKeyBindings,
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct PageKeyBindings(pub HashMap<KeyEvent, Action>);

#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    pub global: PageKeyBindings,
    pub game: PageKeyBindings,
}

impl KeyBindings {
    /// Global bindings win over page bindings.
    pub fn lookup(&self, key: &KeyEvent) -> Option<&Action> {
        self.global.get(key).or_else(|| self.game.get(key))
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawKeyBindings::deserialize(deserializer)?;

        let global = parse_binding_pairs(&raw.global, |action: Action| action).map_err(de::Error::custom)?;
        let game = parse_binding_pairs(&raw.game, Action::Game).map_err(de::Error::custom)?;

        Ok(KeyBindings { global: PageKeyBindings(global), game: PageKeyBindings(game) })
    }
}

fn parse_binding_pairs<T, F>(raw: &RawPageKeyBindings, wrap: F) -> Result<HashMap<KeyEvent, Action>, String>
where
    T: for<'a> Deserialize<'a>,
    F: Fn(T) -> Action,
{
    let Some(map) = &raw.click else {
        return Ok(HashMap::new());
    };
    map.iter()
        .map(|(key_str, action_str)| {
            let action: T =
                serde_yaml::from_str(action_str).map_err(|e| format!("Unable to parse action `{action_str}`: {e}"))?;
            Ok((parse_key_event(key_str)?, wrap(action)))
        })
        .collect()
}

pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    if raw.chars().filter(|c| *c == '>').count() != raw.chars().filter(|c| *c == '<').count() {
        return Err(format!("Unable to parse `{}`", raw));
    }
    let raw = raw.trim_start_matches('<').trim_end_matches('>');

    let raw_lower = raw.to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&raw_lower);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        match current {
            rest if rest.starts_with("ctrl-") => {
                modifiers.insert(KeyModifiers::CONTROL);
                current = &rest[5..];
            },
            rest if rest.starts_with("alt-") => {
                modifiers.insert(KeyModifiers::ALT);
                current = &rest[4..];
            },
            rest if rest.starts_with("shift-") => {
                modifiers.insert(KeyModifiers::SHIFT);
                current = &rest[6..];
            },
            _ => break,
        };
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let c = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        c if c.chars().count() == 1 => {
            let mut c = c.chars().next().unwrap_or_default();
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        },
        _ => return Err(format!("Unable to parse {raw}")),
    };
    Ok(KeyEvent::new(c, modifiers))
}

/// Inverse of [`parse_key_event`], used for the help overlay.
pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let char;
    let key_code = match key_event.code {
        KeyCode::Backspace => "backspace",
        KeyCode::Enter => "enter",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Tab => "tab",
        KeyCode::BackTab => "backtab",
        KeyCode::Esc => "esc",
        KeyCode::Char(' ') => "space",
        KeyCode::Char(c) => {
            char = c.to_ascii_lowercase().to_string();
            &char
        },
        _ => "",
    };

    let mut modifiers = Vec::with_capacity(3);

    if key_event.modifiers.intersects(KeyModifiers::CONTROL) {
        modifiers.push("ctrl");
    }

    if key_event.modifiers.intersects(KeyModifiers::ALT) {
        modifiers.push("alt");
    }

    if key_event.modifiers.intersects(KeyModifiers::SHIFT) {
        modifiers.push("shift");
    }

    let mut key = modifiers.join("-");

    if !key.is_empty() {
        key.push('-');
    }
    key.push_str(key_code);

    key
}
