// Domain layer - Core business logic
pub mod domain;

// Application layer - Engine and playback coordination
pub mod application;

// Infrastructure layer - terminal rendering and command input
pub mod rendering;
pub mod input;

pub mod error;

// Re-exports for convenience
pub use domain::{Board, Cell, Pattern, Placement, SavedState, Settings, MAX_CELLS, presets};
pub use application::{Engine, Playback, SubscriptionId, Ticker};
pub use error::LifeError;
