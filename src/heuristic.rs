use crate::board::{BLANK, Board, SIZE};

/// Trait for estimating the number of moves needed to reach the goal.
///
/// Implementations must be admissible (never overestimate) for A* to return
/// optimal solutions.
pub trait Heuristic {
    fn estimate(&self, board: &Board) -> u32;
}

/// Always estimates zero. Turns A* into uniform-cost search.
pub struct NullHeuristic;

impl NullHeuristic {
    pub fn new() -> Self {
        NullHeuristic
    }
}

impl Default for NullHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for NullHeuristic {
    fn estimate(&self, _board: &Board) -> u32 {
        0
    }
}

/// Sum over non-blank tiles of the grid distance to the tile's goal cell.
/// Admissible and consistent, since each move shifts exactly one tile by one.
pub struct ManhattanHeuristic;

impl ManhattanHeuristic {
    pub fn new() -> Self {
        ManhattanHeuristic
    }
}

impl Default for ManhattanHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for ManhattanHeuristic {
    fn estimate(&self, board: &Board) -> u32 {
        board
            .cells()
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(index, &tile)| {
                let (row, col) = (index / SIZE, index % SIZE);
                let target = tile as usize - 1;
                let (target_row, target_col) = (target / SIZE, target % SIZE);
                (row.abs_diff(target_row) + col.abs_diff(target_col)) as u32
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ALL_MOVES, GOAL};

    #[test]
    fn test_manhattan_solved() {
        assert_eq!(ManhattanHeuristic::new().estimate(&GOAL), 0);
    }

    #[test]
    fn test_manhattan_one_move() {
        let board = Board::from_text("123456708").unwrap();
        assert_eq!(ManhattanHeuristic::new().estimate(&board), 1);
    }

    #[test]
    fn test_manhattan_scrambled() {
        // 2:1 8:2 3:0 1:1 6:1 4:2 7:0 5:2
        let board = Board::from_text("283164705").unwrap();
        assert_eq!(ManhattanHeuristic::new().estimate(&board), 9);

        // One of the two 31-move instances
        let board = Board::from_text("867254301").unwrap();
        assert_eq!(ManhattanHeuristic::new().estimate(&board), 21);
    }

    #[test]
    fn test_manhattan_consistent() {
        let heuristic = ManhattanHeuristic::new();
        let board = Board::from_text("413726580").unwrap();
        let h = heuristic.estimate(&board);
        for direction in ALL_MOVES {
            if let Ok(next) = board.apply_move(direction) {
                assert_eq!(h.abs_diff(heuristic.estimate(&next)), 1);
            }
        }
    }

    #[test]
    fn test_null_heuristic() {
        let board = Board::from_text("867254301").unwrap();
        assert_eq!(NullHeuristic::new().estimate(&board), 0);
    }
}
