use strum::Display;

/// Something the presentation layer may want to react to. The core never
/// plays sounds or touches the terminal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum GameEvent {
    Flapped,
    Scored { score: u32 },
    Collided { score: u32 },
    DifficultyIncreased { difficulty: u32 },
}
