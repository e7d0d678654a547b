use crate::error::{BoardError, IllegalMove};
use arrayvec::ArrayVec;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;
pub const BLANK: u8 = 0;

/// A direction the blank moves in. Equivalently, the neighbouring tile on that
/// side slides into the blank's old cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// Canonical expansion order. Depth-limited search tie-breaks depend on it.
pub const ALL_MOVES: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

impl Move {
    fn delta(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }

    /// Parse a single-letter move (`U`, `D`, `L`, `R`, case-insensitive).
    pub fn from_char(ch: char) -> Option<Move> {
        match ch.to_ascii_uppercase() {
            'U' => Some(Move::Up),
            'D' => Some(Move::Down),
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Up => write!(f, "Up"),
            Move::Down => write!(f, "Down"),
            Move::Left => write!(f, "Left"),
            Move::Right => write!(f, "Right"),
        }
    }
}

/// A 3x3 sliding-tile board. Tiles are stored row-major with `0` for the blank.
///
/// Boards are values: every transition returns a new board and leaves the
/// original untouched, so search nodes never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [u8; CELLS],
    // Index of the blank in `cells`, always consistent with it
    blank: u8,
}

/// The canonical goal configuration `1 2 3 / 4 5 6 / 7 8 0`.
pub const GOAL: Board = Board {
    cells: [1, 2, 3, 4, 5, 6, 7, 8, 0],
    blank: 8,
};

impl Board {
    /// Build a board from row-major cells, validating that they form a
    /// permutation of `0..=8`.
    pub fn from_cells(cells: [u8; CELLS]) -> Result<Self, BoardError> {
        let mut seen = [false; CELLS];
        let mut blank = 0;
        for (index, &tile) in cells.iter().enumerate() {
            if tile as usize >= CELLS {
                return Err(BoardError::TileOutOfRange(tile));
            }
            if seen[tile as usize] {
                return Err(BoardError::DuplicateTile(tile));
            }
            seen[tile as usize] = true;
            if tile == BLANK {
                blank = index as u8;
            }
        }
        Ok(Board { cells, blank })
    }

    pub fn from_rows(rows: [[u8; SIZE]; SIZE]) -> Result<Self, BoardError> {
        let mut cells = [0u8; CELLS];
        for (row, values) in rows.iter().enumerate() {
            cells[row * SIZE..(row + 1) * SIZE].copy_from_slice(values);
        }
        Self::from_cells(cells)
    }

    /// Parse a board from text.
    ///
    /// Characters:
    /// - `1`..`8` = tile
    /// - `0`, `_`, `.` or ` ` = blank
    /// - newlines and `/` separate rows and are otherwise ignored
    ///
    /// So `"283164705"`, `"283/164/7 5"` and the `Display` output all parse.
    pub fn from_text(text: &str) -> Result<Self, BoardError> {
        // Lines written by `Display` separate cells with single spaces, which
        // would otherwise read as blanks.
        let separated = text.lines().count() > 1
            && text
                .lines()
                .filter(|line| !line.trim().is_empty())
                .all(|line| line.trim_end().chars().count() == 2 * SIZE - 1);

        let mut cells = ArrayVec::<u8, CELLS>::new();
        for line in text.lines() {
            let chars: Vec<char> = if separated {
                line.trim_end().chars().step_by(2).collect()
            } else {
                line.chars().collect()
            };
            for ch in chars {
                let tile = match ch {
                    '/' | '\r' => continue,
                    '0' | '_' | '.' | ' ' => BLANK,
                    '1'..='8' => ch as u8 - b'0',
                    '9' => return Err(BoardError::TileOutOfRange(9)),
                    _ => return Err(BoardError::InvalidChar(ch)),
                };
                if cells.try_push(tile).is_err() {
                    return Err(BoardError::CellCount(
                        text.chars().filter(|c| !matches!(c, '/' | '\n' | '\r')).count(),
                    ));
                }
            }
        }

        let cells = cells
            .into_inner()
            .map_err(|partial| BoardError::CellCount(partial.len()))?;
        Self::from_cells(cells)
    }

    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIZE + col]
    }

    /// Position of the blank as `(row, col)`.
    pub fn blank_position(&self) -> (usize, usize) {
        let index = self.blank as usize;
        (index / SIZE, index % SIZE)
    }

    pub fn is_goal(&self) -> bool {
        *self == GOAL
    }

    pub fn is_legal(&self, direction: Move) -> bool {
        self.target(direction).is_some()
    }

    /// Legal moves in canonical `Up, Down, Left, Right` order.
    pub fn legal_moves(&self) -> ArrayVec<Move, 4> {
        ALL_MOVES
            .iter()
            .copied()
            .filter(|&direction| self.is_legal(direction))
            .collect()
    }

    fn target(&self, direction: Move) -> Option<usize> {
        let (row, col) = self.blank_position();
        let (dr, dc) = direction.delta();
        let new_row = row.checked_add_signed(dr)?;
        let new_col = col.checked_add_signed(dc)?;
        if new_row < SIZE && new_col < SIZE {
            Some(new_row * SIZE + new_col)
        } else {
            None
        }
    }

    /// Return the board reached by moving the blank in `direction`.
    pub fn apply_move(&self, direction: Move) -> Result<Board, IllegalMove> {
        let target = self.target(direction).ok_or(IllegalMove {
            direction,
            blank: self.blank_position(),
        })?;

        let mut cells = self.cells;
        cells.swap(self.blank as usize, target);
        Ok(Board {
            cells,
            blank: target as u8,
        })
    }

    /// Replay a sequence of moves, stopping at the first illegal one.
    pub fn apply_moves(&self, moves: &[Move]) -> Result<Board, IllegalMove> {
        moves
            .iter()
            .try_fold(*self, |board, &direction| board.apply_move(direction))
    }

    /// Random walk of `moves` legal blank moves starting from this board.
    ///
    /// Every step is a legal move, so scrambling the goal always yields a
    /// solvable board.
    pub fn scramble<R: Rng + ?Sized>(&self, rng: &mut R, moves: usize) -> Board {
        let mut board = *self;
        for _ in 0..moves {
            let legal = board.legal_moves();
            if let Some(&direction) = legal.choose(rng) {
                if let Ok(next) = board.apply_move(direction) {
                    board = next;
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        GOAL
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_text(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIZE) {
            let line: Vec<String> = row
                .iter()
                .map(|&tile| {
                    if tile == BLANK {
                        ".".to_string()
                    } else {
                        tile.to_string()
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
