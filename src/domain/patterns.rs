use super::Cell;
use crate::error::LifeError;

/// A named, fixed binary matrix that can be stamped onto the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    pub description: String,
    cells: Vec<Vec<Cell>>,
}

impl Pattern {
    /// Create a pattern from a cell matrix. Every row must have the same width.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        cells: Vec<Vec<Cell>>,
    ) -> Result<Self, LifeError> {
        let name = name.into();
        let width = cells.first().map_or(0, Vec::len);
        if let Some((row, found)) = cells
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(LifeError::RaggedPattern { name, row, expected: width, found });
        }
        Ok(Self { name, description: description.into(), cells })
    }

    /// Create a pattern from the `(x, y)` offsets of its alive cells.
    /// The bounding box starts at `(0, 0)` and ends at the largest offset.
    pub fn from_coords(
        name: impl Into<String>,
        description: impl Into<String>,
        alive: &[(usize, usize)],
    ) -> Self {
        let (width, height) = alive
            .iter()
            .fold((0, 0), |(w, h), &(x, y)| (w.max(x + 1), h.max(y + 1)));
        let mut cells = vec![vec![Cell::Dead; width]; height];
        for &(x, y) in alive {
            cells[y][x] = Cell::Alive;
        }
        Self {
            name: name.into(),
            description: description.into(),
            cells,
        }
    }

    /// Parse the plaintext `.cells` layout: `O`, `#` or `*` alive, `.` dead.
    /// Lines starting with `!` are comments; `!Name: ...` sets the description.
    /// Short lines are padded with dead cells.
    pub fn from_plaintext(name: impl Into<String>, text: &str) -> Result<Self, LifeError> {
        let mut description = String::new();
        let mut rows: Vec<Vec<Cell>> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            if let Some(comment) = line.strip_prefix('!') {
                if let Some(title) = comment.trim().strip_prefix("Name:") {
                    description = title.trim().to_string();
                }
                continue;
            }
            let row = line
                .trim_end()
                .chars()
                .map(|ch| match ch {
                    'O' | '#' | '*' => Ok(Cell::Alive),
                    '.' => Ok(Cell::Dead),
                    _ => Err(LifeError::InvalidPatternChar { line: line_no + 1, ch }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        rows.iter_mut().for_each(|row| row.resize(width, Cell::Dead));

        Self::new(name, description, rows)
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    pub fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// True when the pattern has no cells at all
    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Number of alive cells in the matrix
    pub fn population(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_alive()).count()
    }
}

/// Where a pattern lands when applied to a board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Pattern center on board center, both by floor division.
    #[default]
    Centered,
    /// Pattern top-left corner at the given board position. May be negative
    /// or past the edge; whatever falls outside is clipped.
    At { top: isize, left: isize },
}

impl Placement {
    /// Top-left board coordinate for `pattern` on a `rows × cols` board
    pub fn origin(self, rows: usize, cols: usize, pattern: &Pattern) -> (isize, isize) {
        match self {
            Placement::Centered => (
                (rows / 2) as isize - (pattern.height() / 2) as isize,
                (cols / 2) as isize - (pattern.width() / 2) as isize,
            ),
            Placement::At { top, left } => (top, left),
        }
    }
}

/// Classic Game of Life patterns library
pub mod presets {
    use super::*;

    /// Pattern a fresh front-end starts from
    pub const DEFAULT_PATTERN: &str = "Glider";

    /// Blinker - period 2 oscillator
    pub fn blinker() -> Pattern {
        Pattern::from_coords(
            "Blinker",
            "Oscillator (period 2)",
            &[(0, 0), (1, 0), (2, 0)],
        )
    }

    /// Toad - period 2 oscillator
    pub fn toad() -> Pattern {
        Pattern::from_coords(
            "Toad",
            "Oscillator (period 2)",
            &[
                (1, 0), (2, 0), (3, 0),
                (0, 1), (1, 1), (2, 1),
            ],
        )
    }

    /// Beacon - period 2 oscillator
    pub fn beacon() -> Pattern {
        Pattern::from_coords(
            "Beacon",
            "Oscillator (period 2)",
            &[
                (0, 0), (1, 0),
                (0, 1),
                (3, 2),
                (2, 3), (3, 3),
            ],
        )
    }

    /// Pulsar - period 3 oscillator
    pub fn pulsar() -> Pattern {
        Pattern::from_coords(
            "Pulsar",
            "Oscillator (period 3)",
            &[
                // Top
                (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
                // Upper middle
                (0, 2), (5, 2), (7, 2), (12, 2),
                (0, 3), (5, 3), (7, 3), (12, 3),
                (0, 4), (5, 4), (7, 4), (12, 4),
                // Center
                (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
                (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
                // Lower middle
                (0, 8), (5, 8), (7, 8), (12, 8),
                (0, 9), (5, 9), (7, 9), (12, 9),
                (0, 10), (5, 10), (7, 10), (12, 10),
                // Bottom
                (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
            ],
        )
    }

    /// Glider - simplest spaceship, moves diagonally
    pub fn glider() -> Pattern {
        Pattern::from_coords(
            "Glider",
            "Moves diagonally (period 4)",
            &[
                (1, 0),
                (2, 1),
                (0, 2), (1, 2), (2, 2),
            ],
        )
    }

    /// Lightweight Spaceship (LWSS)
    pub fn lwss() -> Pattern {
        Pattern::from_coords(
            "LWSS",
            "Lightweight Spaceship (period 4)",
            &[
                (1, 0), (4, 0),
                (0, 1),
                (0, 2), (4, 2),
                (0, 3), (1, 3), (2, 3), (3, 3),
            ],
        )
    }

    /// Gosper Glider Gun - produces gliders indefinitely
    pub fn glider_gun() -> Pattern {
        Pattern::from_coords(
            "Gosper Glider Gun",
            "Produces gliders (period 30)",
            &[
                // Left square
                (0, 4), (0, 5),
                (1, 4), (1, 5),

                // Left circle
                (10, 4), (10, 5), (10, 6),
                (11, 3), (11, 7),
                (12, 2), (12, 8),
                (13, 2), (13, 8),
                (14, 5),
                (15, 3), (15, 7),
                (16, 4), (16, 5), (16, 6),
                (17, 5),

                // Middle pieces
                (20, 2), (20, 3), (20, 4),
                (21, 2), (21, 3), (21, 4),
                (22, 1), (22, 5),
                (24, 0), (24, 1), (24, 5), (24, 6),

                // Right square
                (34, 2), (34, 3),
                (35, 2), (35, 3),
            ],
        )
    }

    /// R-pentomino - classic methuselah (stabilizes after 1103 generations)
    pub fn r_pentomino() -> Pattern {
        Pattern::from_coords(
            "R-pentomino",
            "Methuselah - stabilizes at gen 1103",
            &[
                (1, 0), (2, 0),
                (0, 1), (1, 1),
                (1, 2),
            ],
        )
    }

    /// Acorn - small methuselah that stabilizes after 5206 generations
    pub fn acorn() -> Pattern {
        Pattern::from_coords(
            "Acorn",
            "Methuselah - stabilizes at gen 5206",
            &[
                (1, 0),
                (3, 1),
                (0, 2), (1, 2), (4, 2), (5, 2), (6, 2),
            ],
        )
    }

    /// Block - simple still life
    pub fn block() -> Pattern {
        Pattern::from_coords(
            "Block",
            "Still life",
            &[
                (0, 0), (1, 0),
                (0, 1), (1, 1),
            ],
        )
    }

    /// Default catalog, in menu order
    pub fn all_patterns() -> Vec<Pattern> {
        vec![
            blinker(),
            toad(),
            beacon(),
            pulsar(),
            glider(),
            lwss(),
            glider_gun(),
            r_pentomino(),
            acorn(),
            block(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coords_bounding_box() {
        let glider = presets::glider();
        assert_eq!((glider.height(), glider.width()), (3, 3));
        assert_eq!(glider.population(), 5);
        assert_eq!(glider.get(0, 1), Some(Cell::Alive));
        assert_eq!(glider.get(0, 0), Some(Cell::Dead));
    }

    #[test]
    fn test_ragged_pattern_rejected() {
        let err = Pattern::new("Bad", "", vec![vec![Cell::Alive; 3], vec![Cell::Alive; 2]])
            .unwrap_err();
        assert_eq!(
            err,
            LifeError::RaggedPattern { name: "Bad".into(), row: 1, expected: 3, found: 2 }
        );
    }

    #[test]
    fn test_empty_pattern_is_allowed() {
        let empty = Pattern::from_coords("Empty", "", &[]);
        assert!(empty.is_empty());
        assert_eq!(Pattern::new("Empty", "", Vec::new()).unwrap(), empty);
    }

    #[test]
    fn test_plaintext_parsing() {
        let text = "!Name: Glider\n!\n.O.\n..O\nOOO\n";
        let parsed = Pattern::from_plaintext("glider", text).unwrap();
        assert_eq!(parsed.description, "Glider");
        assert_eq!(parsed.cells, presets::glider().cells);
    }

    #[test]
    fn test_plaintext_pads_short_lines() {
        let parsed = Pattern::from_plaintext("ell", "#\n##\n\n").unwrap();
        assert_eq!((parsed.height(), parsed.width()), (2, 2));
        assert_eq!(parsed.get(0, 1), Some(Cell::Dead));
    }

    #[test]
    fn test_plaintext_rejects_unknown_characters() {
        assert_eq!(
            Pattern::from_plaintext("bad", "..\n.x"),
            Err(LifeError::InvalidPatternChar { line: 2, ch: 'x' })
        );
    }

    #[test]
    fn test_centered_origin_uses_floor_division() {
        let blinker = presets::blinker();
        assert_eq!(Placement::Centered.origin(5, 5, &blinker), (2, 1));
        // Pattern larger than the board starts above/left of it.
        let gun = presets::glider_gun();
        assert_eq!(Placement::Centered.origin(4, 4, &gun), (-2, -16));
        assert_eq!(Placement::At { top: 1, left: -3 }.origin(4, 4, &gun), (1, -3));
    }

    #[test]
    fn test_catalog_names_are_unique() {
        let names: Vec<_> = presets::all_patterns().into_iter().map(|p| p.name).collect();
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(names.len(), unique.len());
    }

    #[test]
    fn test_default_pattern_is_fifth_catalog_entry() {
        let catalog = presets::all_patterns();
        assert_eq!(catalog[4].name, presets::DEFAULT_PATTERN);
        assert_eq!(catalog[4], presets::glider());
    }
}
