mod board;
mod bot_controller;
mod controller;
mod game_state;
mod lines;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotInput, calculate_move};
pub use controller::{ControllerSnapshot, GameController, GameView, OpponentMoveKey};
pub use game_state::TicTacToeGameState;
pub use lines::{Line, LineSet, lines};
pub use session::{ControllerCommand, OpponentScheduler, TicTacToeSession};
pub use settings::{
    DEFAULT_GRID_SIZE, DEFAULT_OPPONENT_DELAY_MS, MAX_GRID_SIZE, MAX_OPPONENT_DELAY_MS, MIN_GRID_SIZE,
    TicTacToeSessionSettings, validate_grid_size,
};
pub use types::{GameStatus, Mark, WinningLine};
pub use win_detector::{check_win, find_completing_cell};
