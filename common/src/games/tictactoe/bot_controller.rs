use crate::games::SessionRng;
use super::board::Board;
use super::game_state::TicTacToeGameState;
use super::lines::LineSet;
use super::types::Mark;
use super::win_detector::find_completing_cell;

pub struct BotInput {
    pub board: Board,
    pub own_mark: Mark,
    pub other_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: state.current_board().clone(),
            own_mark: state.opponent_mark,
            other_mark: state.human_mark,
        }
    }
}

/// Picks the opponent's cell: win, block, center, random corner, random cell.
/// Looks one ply ahead only. `None` means the board is full.
pub fn calculate_move(input: &BotInput, lines: &LineSet, rng: &mut SessionRng) -> Option<usize> {
    let board = &input.board;

    if let Some(cell) = find_completing_cell(board, lines, input.own_mark) {
        return Some(cell);
    }

    if let Some(cell) = find_completing_cell(board, lines, input.other_mark) {
        return Some(cell);
    }

    let center = board.center();
    if board.is_empty(center) {
        return Some(center);
    }

    let available_corners: Vec<usize> = board
        .corners()
        .into_iter()
        .filter(|&corner| board.is_empty(corner))
        .collect();
    if let Some(corner) = rng.choose(&available_corners) {
        return Some(corner);
    }

    rng.choose(&board.empty_cells())
}
