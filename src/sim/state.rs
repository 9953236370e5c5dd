//! Session-facing types: screens, player intents, events and snapshots

use serde::{Deserialize, Serialize};

use super::ingredient::Ingredient;
use crate::narrative::{FailureReason, NarrativeRequest};

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    #[default]
    Menu,
    /// Countdown running, stack editable
    Playing,
    /// Order served correctly, waiting for "next order"
    LevelEnd,
    /// Run ended (wrong order or out of time)
    GameOver,
}

/// Discrete player intents forwarded by a presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Start,
    Append(Ingredient),
    Undo,
    Redo,
    Reset,
    Submit,
    NextLevel,
    ReturnToMenu,
}

/// Things that happened during a mutation, drained by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted {
        level: u32,
        order_len: usize,
        time_left: u32,
    },
    LevelCleared {
        level: u32,
        bonus: u64,
    },
    GameOver {
        level: u32,
        score: u64,
        reason: FailureReason,
        /// Leaderboard rank achieved, 1-indexed
        rank: Option<usize>,
    },
    /// Host should fetch text and hand it back with the same ticket
    NarrativeRequested(NarrativeRequest),
    ReturnedToMenu,
}

/// Read-only copy of everything a presentation layer draws
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub screen: Screen,
    pub level: u32,
    pub score: u64,
    pub badges: u32,
    pub time_left: u32,
    pub order: Vec<Ingredient>,
    pub stack: Vec<Ingredient>,
    pub redo: Vec<Ingredient>,
    pub feedback: String,
    pub high_scores: Vec<u64>,
    pub awaiting_narrative: bool,
    pub last_failure: Option<FailureReason>,
    /// Bumped on every state change
    pub revision: u64,
}

impl Snapshot {
    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Countdown is in its last few seconds
    pub fn time_critical(&self) -> bool {
        self.screen == Screen::Playing && self.time_left < 5
    }
}
