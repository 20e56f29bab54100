use std::time::SystemTime;

use super::{Board, Settings};

/// A named snapshot of the board and the settings it was taken under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedState {
    pub name: String,
    pub board: Board,
    pub created_at: SystemTime,
    pub settings: Settings,
}

impl SavedState {
    /// Snapshot taken now
    pub fn capture(name: impl Into<String>, board: Board, settings: Settings) -> Self {
        Self {
            name: name.into(),
            board,
            created_at: SystemTime::now(),
            settings,
        }
    }
}
