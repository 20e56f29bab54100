mod cell;
mod board;
mod settings;
mod patterns;
mod saved_state;

pub use cell::Cell;
pub use board::Board;
pub use settings::{MAX_CELLS, Settings};
pub use patterns::{Pattern, Placement, presets};
pub use saved_state::SavedState;
