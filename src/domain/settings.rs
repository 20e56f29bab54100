use std::time::Duration;

use crate::error::LifeError;

/// Largest board accepted, in cells
pub const MAX_CELLS: usize = 1 << 24;

/// Board size and playback speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    /// Tick interval in milliseconds
    pub speed: u64,
}

impl Settings {
    pub const fn new(rows: usize, cols: usize, speed: u64) -> Self {
        Self { rows, cols, speed }
    }

    /// Reject boards smaller than 1×1 or larger than [`MAX_CELLS`], and a
    /// zero tick interval.
    pub fn validate(&self) -> Result<(), LifeError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LifeError::InvalidDimensions { rows: self.rows, cols: self.cols });
        }
        if self.rows.checked_mul(self.cols).is_none_or(|cells| cells > MAX_CELLS) {
            return Err(LifeError::BoardTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_CELLS,
            });
        }
        if self.speed == 0 {
            return Err(LifeError::InvalidSpeed(self.speed));
        }
        Ok(())
    }

    /// Same speed, new dimensions (builder pattern)
    pub const fn with_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Same dimensions, new speed (builder pattern)
    pub const fn with_speed(mut self, speed: u64) -> Self {
        self.speed = speed;
        self
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.speed)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(40, 40, 200)
    }
}
