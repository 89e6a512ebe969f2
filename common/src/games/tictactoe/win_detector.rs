use super::board::Board;
use super::lines::LineSet;
use super::types::{Mark, WinningLine};

pub fn check_win(board: &Board, lines: &LineSet) -> Option<WinningLine> {
    for line in lines.iter() {
        let Some(&first) = line.first() else {
            continue;
        };
        let mark = board.get(first)?;
        if mark == Mark::Empty {
            continue;
        }

        if line.iter().all(|&cell| board.get(cell) == Some(mark)) {
            return Some(WinningLine::new(mark, line.clone()));
        }
    }

    None
}

/// Empty cell of the first line where `mark` holds every other cell.
pub fn find_completing_cell(board: &Board, lines: &LineSet, mark: Mark) -> Option<usize> {
    if mark == Mark::Empty {
        return None;
    }

    for line in lines.iter() {
        let mut own_count = 0;
        let mut empty_cell = None;
        let mut empty_count = 0;

        for &cell in line {
            match board.get(cell) {
                Some(m) if m == mark => own_count += 1,
                Some(Mark::Empty) => {
                    empty_count += 1;
                    empty_cell = Some(cell);
                }
                _ => {}
            }
        }

        if own_count == line.len() - 1 && empty_count == 1 {
            return empty_cell;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &str) -> Board {
        let cells = marks
            .chars()
            .map(|c| match c {
                'X' => Mark::X,
                'O' => Mark::O,
                _ => Mark::Empty,
            })
            .collect();
        Board::from_cells(cells).unwrap()
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let lines = LineSet::new(3);
        assert_eq!(check_win(&Board::new(3), &lines), None);
    }

    #[test]
    fn test_row_column_and_diagonals() {
        let lines = LineSet::new(3);

        let win = check_win(&board_from("...OOO.X."), &lines).unwrap();
        assert_eq!(win, WinningLine::new(Mark::O, vec![3, 4, 5]));

        let win = check_win(&board_from(".X..X..X."), &lines).unwrap();
        assert_eq!(win, WinningLine::new(Mark::X, vec![1, 4, 7]));

        let win = check_win(&board_from("X...X...X"), &lines).unwrap();
        assert_eq!(win, WinningLine::new(Mark::X, vec![0, 4, 8]));

        let win = check_win(&board_from("..O.O.O.."), &lines).unwrap();
        assert_eq!(win, WinningLine::new(Mark::O, vec![2, 4, 6]));
    }

    #[test]
    fn test_larger_boards() {
        let lines = LineSet::new(5);
        let board = board_from("....X...X...X...X...X....");
        assert_eq!(check_win(&board, &lines), Some(WinningLine::new(Mark::X, vec![4, 8, 12, 16, 20])));

        let lines = LineSet::new(4);
        let board = board_from("XXX.OOO.........");
        assert_eq!(check_win(&board, &lines), None);
    }

    #[test]
    fn test_first_line_in_order_is_reported() {
        let lines = LineSet::new(3);
        let board = board_from("XXXX..X..");
        let win = check_win(&board, &lines).unwrap();
        assert_eq!(win.cells, vec![0, 1, 2]);
    }

    #[test]
    fn test_full_board_without_line() {
        let lines = LineSet::new(3);
        let board = board_from("XOXXOOOXX");
        assert!(board.is_full());
        assert_eq!(check_win(&board, &lines), None);
    }

    #[test]
    fn test_check_win_is_idempotent() {
        let lines = LineSet::new(3);
        let board = board_from("OOO.X.X..");
        assert_eq!(check_win(&board, &lines), check_win(&board, &lines));
    }

    #[test]
    fn test_find_completing_cell() {
        let lines = LineSet::new(3);
        let board = board_from("XX.......");
        assert_eq!(find_completing_cell(&board, &lines, Mark::X), Some(2));
        assert_eq!(find_completing_cell(&board, &lines, Mark::O), None);

        let blocked = board_from("XXO......");
        assert_eq!(find_completing_cell(&blocked, &lines, Mark::X), None);
        assert_eq!(find_completing_cell(&blocked, &lines, Mark::Empty), None);
    }
}
