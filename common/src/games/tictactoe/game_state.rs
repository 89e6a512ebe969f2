use crate::games::SessionRng;
use super::board::Board;
use super::bot_controller::{BotInput, calculate_move};
use super::lines::LineSet;
use super::types::{GameStatus, Mark, WinningLine};
use super::win_detector::check_win;

/// One game from an empty board to a win or draw.
///
/// `history[0]` is the empty board and `history[k]` the board after ply `k`.
/// X always moves first, so the opponent opens whenever the human plays O.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub session_id: u64,
    pub grid_size: usize,
    pub human_mark: Mark,
    pub opponent_mark: Mark,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub winning_line: Option<WinningLine>,
    pub last_move: Option<usize>,
    lines: LineSet,
    history: Vec<Board>,
    current_move: usize,
}

impl TicTacToeGameState {
    pub fn new(session_id: u64, grid_size: usize, human_mark: Mark) -> Result<Self, String> {
        let opponent_mark = human_mark
            .opponent()
            .ok_or_else(|| "Human mark must be X or O".to_string())?;

        Ok(Self {
            session_id,
            grid_size,
            human_mark,
            opponent_mark,
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            winning_line: None,
            last_move: None,
            lines: LineSet::new(grid_size),
            history: vec![Board::new(grid_size)],
            current_move: 0,
        })
    }

    pub fn current_board(&self) -> &Board {
        &self.history[self.current_move]
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn current_move(&self) -> usize {
        self.current_move
    }

    pub fn is_human_turn(&self) -> bool {
        self.status == GameStatus::InProgress && self.current_mark == self.human_mark
    }

    /// True while the opponent owes a move: its turn, no result yet, a free cell left.
    pub fn is_opponent_turn(&self) -> bool {
        self.status == GameStatus::InProgress
            && self.current_mark == self.opponent_mark
            && !self.current_board().is_full()
    }

    pub fn human_play(&mut self, cell: usize) -> Result<(), String> {
        if self.current_mark != self.human_mark {
            return Err("Not your turn".to_string());
        }
        self.place_mark(self.human_mark, cell)
    }

    /// Lets the heuristic opponent choose and play a cell. Returns the cell played.
    pub fn opponent_play(&mut self, rng: &mut SessionRng) -> Result<usize, String> {
        if self.status.is_over() {
            return Err("Game is already over".to_string());
        }
        if self.current_mark != self.opponent_mark {
            return Err("Not the opponent's turn".to_string());
        }
        if self.current_board().is_full() {
            return Err("Board is full".to_string());
        }

        let input = BotInput::from_game_state(self);
        let cell = calculate_move(&input, &self.lines, rng)
            .ok_or_else(|| "No legal move".to_string())?;

        self.place_mark(self.opponent_mark, cell)?;
        Ok(cell)
    }

    fn place_mark(&mut self, mark: Mark, cell: usize) -> Result<(), String> {
        if self.status.is_over() {
            return Err("Game is already over".to_string());
        }
        if mark != self.current_mark {
            return Err(format!("It is {}'s turn, not {}'s", self.current_mark, mark));
        }

        let board = self.current_board();
        if cell >= board.cells().len() {
            return Err(format!("Cell {} is out of bounds", cell));
        }
        if !board.is_valid_move(cell) {
            return Err(format!("Cell {} is already marked", cell));
        }

        let next = board.with_mark(cell, mark);
        self.history.truncate(self.current_move + 1);
        self.history.push(next);
        self.current_move = self.history.len() - 1;
        self.last_move = Some(cell);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    fn switch_turn(&mut self) {
        if self.current_mark == self.human_mark {
            self.current_mark = self.opponent_mark;
        } else {
            self.current_mark = self.human_mark;
        }
    }

    fn check_game_over(&mut self) {
        if let Some(line) = check_win(self.current_board(), &self.lines) {
            self.status = GameStatus::Won(line.mark);
            self.winning_line = Some(line);
            return;
        }

        if self.current_board().is_full() {
            self.status = GameStatus::Draw;
        }
    }

    pub fn status_text(&self) -> String {
        match self.status {
            GameStatus::Won(mark) => format!("Winner: {}", mark),
            GameStatus::Draw => "It's a draw!".to_string(),
            GameStatus::InProgress if self.is_opponent_turn() => "Opponent is thinking...".to_string(),
            GameStatus::InProgress => format!("Next player: {}", self.current_mark),
        }
    }
}
