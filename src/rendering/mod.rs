//! Plain-text rendering of boards and engine listings for the terminal.
//!
//! Boards are drawn in the same `#`/`.` alphabet that
//! [`Pattern::from_plaintext`](crate::Pattern::from_plaintext) reads, so a
//! printed board can be pasted back in as a pattern file.

use std::fmt::Write;

use crate::domain::{Board, Pattern, SavedState, Settings};

pub const ALIVE_GLYPH: char = '#';
pub const DEAD_GLYPH: char = '.';

/// ANSI sequence that clears the screen and homes the cursor
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Format large numbers with K/M suffixes
fn format_number(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Draw the board, one text line per row
pub fn draw_board(board: &Board) -> String {
    let mut out = String::with_capacity(board.rows() * (board.cols() + 1));
    for row in board.iter_rows() {
        out.extend(row.iter().map(|cell| if cell.is_alive() { ALIVE_GLYPH } else { DEAD_GLYPH }));
        out.push('\n');
    }
    out
}

/// One-line summary of size, speed and population
pub fn draw_summary(board: &Board, settings: &Settings) -> String {
    format!(
        "{}x{} @ {}ms | population {}",
        settings.rows,
        settings.cols,
        settings.speed,
        format_number(board.population())
    )
}

/// Board followed by its summary line
pub fn draw_frame(board: &Board, settings: &Settings) -> String {
    let mut frame = draw_board(board);
    frame.push_str(&draw_summary(board, settings));
    frame
}

/// Numbered catalog listing
pub fn draw_patterns(patterns: &[Pattern]) -> String {
    let mut out = String::new();
    for (idx, pattern) in patterns.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>2}. {:<18} {:>2}x{:<2} {}",
            idx + 1,
            pattern.name,
            pattern.height(),
            pattern.width(),
            pattern.description
        );
    }
    out
}

/// Saved slots with their shape and age
pub fn draw_saved_states(states: &[SavedState]) -> String {
    if states.is_empty() {
        return "no saved states\n".to_string();
    }
    let mut out = String::new();
    for state in states {
        let age = state.created_at.elapsed().map_or(0, |elapsed| elapsed.as_secs());
        let _ = writeln!(
            out,
            "{:<16} {}x{} @ {}ms, population {}, saved {}s ago",
            state.name,
            state.settings.rows,
            state.settings.cols,
            state.settings.speed,
            state.board.population(),
            age
        );
    }
    out
}
