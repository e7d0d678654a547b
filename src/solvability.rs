use crate::board::{BLANK, Board, SIZE};

/// Number of pairs `i < j` of non-blank tiles, read row-major, with
/// `tile[i] > tile[j]`.
pub fn count_inversions(board: &Board) -> usize {
    let tiles = board.cells();
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &tile)| tile != BLANK)
        .map(|(i, &tile)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&next| next != BLANK && next < tile)
                .count()
        })
        .sum()
}

/// Whether `board` can reach the goal.
///
/// On odd widths every move preserves inversion parity and the goal has none,
/// so a board is solvable iff its inversion count is even. On even widths a
/// vertical move also changes the blank's row, and the rule becomes:
/// inversions plus the blank's row counted from the bottom (starting at 1)
/// must be odd.
pub fn is_solvable(board: &Board) -> bool {
    let inversions = count_inversions(board);
    if SIZE % 2 == 1 {
        inversions % 2 == 0
    } else {
        let (row, _) = board.blank_position();
        (inversions + (SIZE - row)) % 2 == 1
    }
}
