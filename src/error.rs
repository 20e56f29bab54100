//! Error types for the simulation engine.

use thiserror::Error;

/// Validation failures raised by the engine and the domain constructors.
///
/// Boundary policies that are silent by contract (out-of-range toggles,
/// clipped pattern cells, unknown save names) never produce one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Board dimensions must be at least 1×1.
    #[error("invalid board dimensions {rows}x{cols}: rows and cols must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Board cell count must fit under the size cap.
    #[error("board {rows}x{cols} is too large: at most {max} cells")]
    BoardTooLarge { rows: usize, cols: usize, max: usize },

    /// Tick interval must be at least one millisecond.
    #[error("invalid speed {0}ms: must be at least 1ms")]
    InvalidSpeed(u64),

    /// A board was installed whose shape differs from the current settings.
    #[error("board is {}x{} but settings require {}x{}", .found.0, .found.1, .expected.0, .expected.1)]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Pattern rows must all have the same width.
    #[error("pattern '{name}' row {row} has {found} cells, expected {expected}")]
    RaggedPattern {
        name: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Board rows must all have the same width.
    #[error("board row {row} has {found} cells, expected {expected}")]
    RaggedBoard {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Plaintext pattern contained something other than a cell marker.
    #[error("unexpected character '{ch}' on pattern line {line}")]
    InvalidPatternChar { line: usize, ch: char },

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

impl LifeError {
    /// Creates a dimension mismatch error from `(rows, cols)` pairs.
    pub fn mismatch(expected: (usize, usize), found: (usize, usize)) -> Self {
        Self::DimensionMismatch { expected, found }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_message_names_both_shapes() {
        let err = LifeError::mismatch((10, 20), (3, 4));
        assert_eq!(err.to_string(), "board is 3x4 but settings require 10x20");
    }

    #[test]
    fn test_invalid_speed_message() {
        assert_eq!(LifeError::InvalidSpeed(0).to_string(), "invalid speed 0ms: must be at least 1ms");
    }
}
