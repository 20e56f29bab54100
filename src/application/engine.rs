use rand::Rng;
use tracing::{debug, info, warn};

use crate::domain::{Board, Cell, Pattern, Placement, SavedState, Settings};
use crate::error::LifeError;

/// Probability that a cell comes up alive when randomizing
pub const RANDOM_ALIVE_PROBABILITY: f64 = 0.3;

/// Engine owns the simulation: the board, its settings, the pattern
/// catalog and the named save slots.
///
/// Every accessor hands out a copy; nothing outside the engine can reach
/// its board or save slots by reference.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    settings: Settings,
    patterns: Vec<Pattern>,
    saved_states: Vec<SavedState>,
    generation: u64,
}

impl Engine {
    /// Create an engine with an all-dead board sized by `settings`
    pub fn new(settings: Settings, patterns: Vec<Pattern>) -> Result<Self, LifeError> {
        settings.validate()?;
        Ok(Self {
            board: Board::new(settings.rows, settings.cols),
            settings,
            patterns,
            saved_states: Vec::new(),
            generation: 0,
        })
    }

    pub fn board(&self) -> Board {
        self.board.clone()
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Generations stepped since the board was last reset
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the board with a copy of `board`. Its shape must match the
    /// current settings.
    pub fn set_board(&mut self, board: &Board) -> Result<(), LifeError> {
        let expected = self.settings.dimensions();
        if board.dimensions() != expected {
            warn!(?expected, found = ?board.dimensions(), "rejected board with wrong shape");
            return Err(LifeError::mismatch(expected, board.dimensions()));
        }
        self.board = board.clone();
        Ok(())
    }

    /// Replace the settings. A change of rows or cols discards the board
    /// for a fresh all-dead one; a speed-only change keeps it.
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), LifeError> {
        settings.validate()?;
        let resized = settings.dimensions() != self.settings.dimensions();
        self.settings = settings;
        if resized {
            info!(rows = settings.rows, cols = settings.cols, "board resized");
            self.board = Board::new(settings.rows, settings.cols);
            self.generation = 0;
        }
        Ok(())
    }

    /// Each cell alive with probability 0.3, from the thread-local RNG
    pub fn randomize_board(&mut self) {
        self.randomize_board_with(&mut rand::rng());
    }

    /// Each cell alive with probability 0.3, from the given RNG
    pub fn randomize_board_with<R: Rng>(&mut self, rng: &mut R) {
        self.board
            .fill_with(|| Cell::from(rng.random_bool(RANDOM_ALIVE_PROBABILITY)));
        self.generation = 0;
        debug!(population = self.board.population(), "board randomized");
    }

    pub fn clear_board(&mut self) {
        self.board.clear();
        self.generation = 0;
    }

    /// Flip one cell. Out-of-range coordinates are ignored.
    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        if self.board.toggle(row, col) {
            debug!(row, col, "cell toggled");
        }
    }

    /// Advance one generation
    pub fn step(&mut self) {
        self.board = self.board.next_generation();
        self.generation += 1;
    }

    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        self.board.count_neighbors(row, col)
    }

    /// Stamp a pattern onto the board, clipping at the edges.
    pub fn apply_pattern(&mut self, pattern: &Pattern, placement: Placement) {
        let (top, left) = placement.origin(self.settings.rows, self.settings.cols, pattern);
        let written = self.board.stamp(pattern, top, left);
        debug!(pattern = %pattern.name, top, left, written, "pattern applied");
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Case-insensitive catalog lookup
    pub fn find_pattern(&self, name: &str) -> Option<&Pattern> {
        self.patterns
            .iter()
            .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
    }

    /// Snapshot the board and settings under `name`. An existing entry with
    /// the same name is dropped and the new one goes to the end.
    pub fn save_state(&mut self, name: &str) {
        let saved = SavedState::capture(name, self.board(), self.settings());
        self.saved_states.retain(|state| state.name != name);
        self.saved_states.push(saved);
        info!(name, slots = self.saved_states.len(), "state saved");
    }

    pub fn saved_states(&self) -> Vec<SavedState> {
        self.saved_states.clone()
    }

    /// Restore the named snapshot. Returns false, changing nothing, when
    /// no such snapshot exists.
    pub fn load_state(&mut self, name: &str) -> bool {
        let Some(found) = self.saved_states.iter().find(|state| state.name == name) else {
            debug!(name, "no saved state to load");
            return false;
        };
        // Captured together, so the board already matches the settings.
        let (settings, board) = (found.settings, found.board.clone());
        self.settings = settings;
        self.board = board;
        self.generation = 0;
        info!(name, rows = settings.rows, cols = settings.cols, "state loaded");
        true
    }

    /// Remove the named snapshot if present. Returns whether one was removed.
    pub fn delete_state(&mut self, name: &str) -> bool {
        let before = self.saved_states.len();
        self.saved_states.retain(|state| state.name != name);
        let removed = self.saved_states.len() != before;
        if removed {
            info!(name, "state deleted");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::presets;
    use rand::{SeedableRng, rngs::StdRng};

    fn engine(rows: usize, cols: usize) -> Engine {
        Engine::new(Settings::new(rows, cols, 100), presets::all_patterns()).unwrap()
    }

    fn alive(engine: &Engine) -> Vec<(usize, usize)> {
        engine
            .board()
            .iter_cells()
            .filter(|(_, _, cell)| cell.is_alive())
            .map(|(r, c, _)| (r, c))
            .collect()
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        assert!(Engine::new(Settings::new(0, 3, 100), Vec::new()).is_err());
        assert_eq!(
            Engine::new(Settings::new(3, 3, 0), Vec::new()).unwrap_err(),
            LifeError::InvalidSpeed(0)
        );
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut engine = engine(3, 3);
        engine.toggle_cell(1, 1);
        engine.step();
        assert_eq!(engine.board(), Board::new(3, 3));
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn test_blinker_period_two() {
        let mut engine = engine(5, 5);
        for col in 1..=3 {
            engine.toggle_cell(2, col);
        }
        let horizontal = engine.board();
        engine.step();
        assert_eq!(alive(&engine), vec![(1, 2), (2, 2), (3, 2)]);
        engine.step();
        assert_eq!(engine.board(), horizontal);
    }

    #[test]
    fn test_toggle_out_of_range_is_ignored() {
        let mut engine = engine(4, 4);
        engine.toggle_cell(4, 0);
        engine.toggle_cell(0, 100);
        assert_eq!(engine.board(), Board::new(4, 4));
    }

    #[test]
    fn test_resize_reallocates_dead_board() {
        let mut engine = engine(4, 4);
        engine.randomize_board_with(&mut StdRng::seed_from_u64(7));
        engine.set_settings(Settings::new(6, 9, 100)).unwrap();
        let board = engine.board();
        assert_eq!(board.dimensions(), (6, 9));
        assert_eq!(board.population(), 0);
    }

    #[test]
    fn test_speed_change_keeps_board() {
        let mut engine = engine(4, 4);
        engine.toggle_cell(1, 2);
        let before = engine.board();
        engine.set_settings(engine.settings().with_speed(999)).unwrap();
        assert_eq!(engine.board(), before);
        assert_eq!(engine.settings().speed, 999);
    }

    #[test]
    fn test_invalid_settings_leave_state_untouched() {
        let mut engine = engine(4, 4);
        engine.toggle_cell(0, 0);
        assert!(engine.set_settings(Settings::new(0, 0, 100)).is_err());
        assert_eq!(engine.settings(), Settings::new(4, 4, 100));
        assert_eq!(engine.board().population(), 1);
    }

    #[test]
    fn test_oversized_settings_leave_state_untouched() {
        let mut engine = engine(4, 4);
        engine.toggle_cell(1, 2);
        let before = engine.board();
        assert!(matches!(
            engine.set_settings(Settings::new(1 << 32, 1 << 32, 100)),
            Err(LifeError::BoardTooLarge { .. })
        ));
        assert_eq!(engine.settings(), Settings::new(4, 4, 100));
        assert_eq!(engine.board(), before);
        engine.toggle_cell(3, 3);
        assert_eq!(engine.board().population(), 2);
    }

    #[test]
    fn test_set_board_requires_matching_shape() {
        let mut engine = engine(3, 3);
        let mut board = Board::new(3, 3);
        board.set(0, 0, Cell::Alive);
        engine.set_board(&board).unwrap();
        assert_eq!(engine.board(), board);
        assert_eq!(
            engine.set_board(&Board::new(2, 3)),
            Err(LifeError::mismatch((3, 3), (2, 3)))
        );
    }

    #[test]
    fn test_returned_board_is_a_copy() {
        let engine = engine(3, 3);
        let mut copy = engine.board();
        copy.set(1, 1, Cell::Alive);
        assert_eq!(engine.board().population(), 0);
    }

    #[test]
    fn test_seeded_randomize_is_reproducible() {
        let mut a = engine(20, 20);
        let mut b = engine(20, 20);
        a.randomize_board_with(&mut StdRng::seed_from_u64(42));
        b.randomize_board_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_randomize_density_is_near_thirty_percent() {
        let mut engine = engine(100, 100);
        engine.randomize_board_with(&mut StdRng::seed_from_u64(1));
        let density = engine.board().population() as f64 / 10_000.0;
        assert!((0.25..0.35).contains(&density), "density {density}");
    }

    #[test]
    fn test_clear_keeps_dimensions() {
        let mut engine = engine(5, 8);
        engine.randomize_board();
        engine.clear_board();
        assert_eq!(engine.board(), Board::new(5, 8));
    }

    #[test]
    fn test_centered_pattern_placement() {
        let mut engine = engine(5, 5);
        engine.apply_pattern(&presets::blinker(), Placement::Centered);
        assert_eq!(alive(&engine), vec![(2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_anchored_pattern_placement() {
        let mut engine = engine(6, 6);
        engine.apply_pattern(&presets::block(), Placement::At { top: 0, left: 4 });
        assert_eq!(alive(&engine), vec![(0, 4), (0, 5), (1, 4), (1, 5)]);
    }

    #[test]
    fn test_oversized_pattern_is_clipped() {
        let mut engine = engine(4, 4);
        engine.apply_pattern(&presets::glider_gun(), Placement::Centered);
        let board = engine.board();
        assert_eq!(board.dimensions(), (4, 4));
        assert!(board.population() <= 16);
    }

    #[test]
    fn test_pattern_overwrites_live_cells_with_dead() {
        let mut engine = engine(5, 5);
        engine.toggle_cell(1, 2);
        // Glider's top-left cell is dead and lands on (1, 1); (1, 2) is alive in it.
        engine.toggle_cell(1, 1);
        engine.apply_pattern(&presets::glider(), Placement::Centered);
        assert_eq!(engine.board().get(1, 1), Some(Cell::Dead));
        assert_eq!(engine.board().get(1, 2), Some(Cell::Alive));
    }

    #[test]
    fn test_find_pattern_ignores_case() {
        let engine = engine(3, 3);
        assert_eq!(engine.find_pattern("glider").map(|p| p.name.as_str()), Some("Glider"));
        assert!(engine.find_pattern("nope").is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut engine = engine(6, 6);
        engine.apply_pattern(&presets::glider(), Placement::Centered);
        let saved_board = engine.board();
        let saved_settings = engine.settings();
        engine.save_state("x");

        engine.step();
        engine.set_settings(Settings::new(10, 12, 50)).unwrap();
        engine.toggle_cell(3, 3);

        assert!(engine.load_state("x"));
        assert_eq!(engine.board(), saved_board);
        assert_eq!(engine.settings(), saved_settings);
    }

    #[test]
    fn test_load_unknown_changes_nothing() {
        let mut engine = engine(4, 4);
        engine.toggle_cell(2, 2);
        let before = (engine.board(), engine.settings());
        assert!(!engine.load_state("missing"));
        assert_eq!((engine.board(), engine.settings()), before);
    }

    #[test]
    fn test_save_replaces_and_moves_to_end() {
        let mut engine = engine(4, 4);
        engine.save_state("a");
        engine.save_state("b");
        engine.toggle_cell(0, 0);
        engine.save_state("a");

        let states = engine.saved_states();
        let names: Vec<_> = states.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(states[1].board.population(), 1);
    }

    #[test]
    fn test_delete_state() {
        let mut engine = engine(4, 4);
        engine.save_state("a");
        assert!(engine.delete_state("a"));
        assert!(!engine.delete_state("a"));
        assert!(engine.saved_states().is_empty());
    }

    #[test]
    fn test_saved_states_are_copies() {
        let mut engine = engine(4, 4);
        engine.save_state("a");
        let mut states = engine.saved_states();
        states[0].board.set(0, 0, Cell::Alive);
        states.clear();
        assert_eq!(engine.saved_states().len(), 1);
        assert_eq!(engine.saved_states()[0].board.population(), 0);
    }
}
