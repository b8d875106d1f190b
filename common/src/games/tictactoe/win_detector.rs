use super::board::Board;
use super::types::{Mark, Position, WinCombination};

pub const WIN_COMBINATIONS: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn combinations_containing(position: Position) -> impl Iterator<Item = WinCombination> {
    WIN_COMBINATIONS
        .iter()
        .filter(move |combination| combination.contains(&position.index()))
        .map(|&combination| WinCombination::from_indices(combination))
}

fn is_complete(board: &Board, combination: &WinCombination, mark: Mark) -> bool {
    combination.cells().iter().all(|&cell| board.get_cell(cell) == mark)
}

/// Only the combinations through `position` can have been completed by a move there.
pub fn winning_combination_at(board: &Board, position: Position, mark: Mark) -> Option<WinCombination> {
    if mark == Mark::Empty {
        return None;
    }

    combinations_containing(position).find(|combination| is_complete(board, combination, mark))
}

pub fn find_winning_combinations(board: &Board, mark: Mark) -> Vec<WinCombination> {
    if mark == Mark::Empty {
        return Vec::new();
    }

    WIN_COMBINATIONS
        .iter()
        .map(|&combination| WinCombination::from_indices(combination))
        .filter(|combination| is_complete(board, combination, mark))
        .collect()
}

/// Union of the cells of every complete line, ascending.
pub fn winning_cells(board: &Board, mark: Mark) -> Vec<Position> {
    let mut cells: Vec<Position> = find_winning_combinations(board, mark)
        .iter()
        .flat_map(|combination| combination.cells().iter().copied())
        .collect();
    cells.sort();
    cells.dedup();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use Mark::{Empty as E, O, X};

    fn pos(index: usize) -> Position {
        Position::new(index).unwrap()
    }

    #[test]
    fn test_every_cell_belongs_to_expected_number_of_combinations() {
        let counts: Vec<usize> = Position::all()
            .map(|p| combinations_containing(p).count())
            .collect();
        assert_eq!(counts, vec![3, 2, 3, 2, 4, 2, 3, 2, 3]);
    }

    #[test]
    fn test_top_row_win_is_detected() {
        let board = Board::from_marks([X, X, X, E, E, E, E, E, E]);
        let combination = winning_combination_at(&board, pos(2), X).unwrap();
        assert_eq!(combination.indices(), [0, 1, 2]);
    }

    #[test]
    fn test_anti_diagonal_win_is_detected() {
        let board = Board::from_marks([X, X, O, E, O, E, O, E, X]);
        let combination = winning_combination_at(&board, pos(4), O).unwrap();
        assert_eq!(combination.indices(), [2, 4, 6]);
    }

    #[test]
    fn test_win_elsewhere_is_ignored_for_unrelated_position() {
        let board = Board::from_marks([X, X, X, E, E, E, E, E, E]);
        assert_eq!(winning_combination_at(&board, pos(8), X), None);
        assert_eq!(find_winning_combinations(&board, X).len(), 1);
    }

    #[test]
    fn test_no_win_for_other_mark() {
        let board = Board::from_marks([X, X, X, O, O, E, E, E, E]);
        assert!(find_winning_combinations(&board, O).is_empty());
        assert!(winning_cells(&board, E).is_empty());
    }

    #[test]
    fn test_double_completion_reports_first_in_table_order() {
        let board = Board::from_marks([X, X, X, E, E, X, E, E, X]);
        let combination = winning_combination_at(&board, pos(2), X).unwrap();
        assert_eq!(combination.indices(), [0, 1, 2]);
    }

    #[test]
    fn test_double_completion_lists_both_lines_and_their_cells() {
        let board = Board::from_marks([X, X, X, O, O, X, O, O, X]);

        let lines: Vec<[usize; 3]> = find_winning_combinations(&board, X)
            .iter()
            .map(|c| c.indices())
            .collect();
        assert_eq!(lines, vec![[0, 1, 2], [2, 5, 8]]);

        let cells: Vec<usize> = winning_cells(&board, X).iter().map(|p| p.index()).collect();
        assert_eq!(cells, vec![0, 1, 2, 5, 8]);
    }
}
