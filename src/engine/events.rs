use super::direction::Direction;
use serde::Serialize;
use std::fmt;

/// Something that happened inside the engine that collaborators (sound,
/// high scores, statistics) may want to react to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameEvent {
    FoodEaten { score: u32, level: u32 },
    GameOver { score: u32, cause: GameOverCause },
    DirectionChanged { direction: Direction, steering: Steering },
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum GameOverCause {
    /// The head left the grid in walled mode
    Wall,

    /// The head ran into the snake's own body
    SelfCollision,

    /// The snake covers every cell, so no food can be placed
    BoardFull,
}

impl fmt::Display for GameOverCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameOverCause::Wall => "hit the wall",
            GameOverCause::SelfCollision => "hit itself",
            GameOverCause::BoardFull => "filled the board",
        };
        f.pad(s)
    }
}

/// Who currently owns the snake's direction
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Steering {
    #[default]
    Manual,
    Autopilot,
}

/// A collaborator that reacts to engine events
pub(crate) trait EventSink {
    fn handle(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn handle(&mut self, event: &GameEvent) {
        self(event);
    }
}
