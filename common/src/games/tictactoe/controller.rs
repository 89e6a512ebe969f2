use crate::games::SessionRng;
use crate::log;
use super::game_state::TicTacToeGameState;
use super::settings::validate_grid_size;
use super::types::{Mark, WinningLine};

#[derive(Debug, Clone)]
enum Screen {
    Setup { grid_size: usize },
    Playing(TicTacToeGameState),
}

/// Identifies the one opponent move a session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentMoveKey {
    pub session_id: u64,
    pub move_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub session_id: u64,
    pub grid_size: usize,
    pub cells: Vec<Mark>,
    pub human_mark: Mark,
    pub opponent_mark: Mark,
    pub status: String,
    pub winning_line: Option<WinningLine>,
    pub accepting_input: bool,
    pub move_count: usize,
    pub last_move: Option<(Mark, usize)>,
}

impl GameView {
    fn from_game_state(state: &TicTacToeGameState) -> Self {
        let board = state.current_board();
        Self {
            session_id: state.session_id,
            grid_size: board.size(),
            cells: board.cells().to_vec(),
            human_mark: state.human_mark,
            opponent_mark: state.opponent_mark,
            status: state.status_text(),
            winning_line: state.winning_line.clone(),
            accepting_input: state.is_human_turn(),
            move_count: state.current_move(),
            last_move: state
                .last_move
                .and_then(|cell| board.get(cell).map(|mark| (mark, cell))),
        }
    }
}

/// What the presentation layer renders. Published after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerSnapshot {
    Setup { grid_size: usize },
    InGame(GameView),
}

/// Setup screen plus the live session. Owns the random source the opponent draws from.
pub struct GameController {
    screen: Screen,
    last_human_mark: Option<Mark>,
    next_session_id: u64,
    rng: SessionRng,
}

impl GameController {
    pub fn new(grid_size: usize, rng: SessionRng) -> Self {
        Self {
            screen: Screen::Setup { grid_size },
            last_human_mark: None,
            next_session_id: 1,
            rng,
        }
    }

    pub fn game(&self) -> Option<&TicTacToeGameState> {
        match &self.screen {
            Screen::Playing(game) => Some(game),
            Screen::Setup { .. } => None,
        }
    }

    pub fn grid_size(&self) -> usize {
        match &self.screen {
            Screen::Setup { grid_size } => *grid_size,
            Screen::Playing(game) => game.grid_size,
        }
    }

    /// Moves the setup slider. Ignored once a game is running.
    pub fn select_grid_size(&mut self, grid_size: usize) -> Result<(), String> {
        validate_grid_size(grid_size)?;
        match &mut self.screen {
            Screen::Setup { grid_size: selected } => {
                *selected = grid_size;
                Ok(())
            }
            Screen::Playing(_) => Err("Grid size can only change on the setup screen".to_string()),
        }
    }

    pub fn start(&mut self, grid_size: usize) -> Result<(), String> {
        validate_grid_size(grid_size)?;
        self.begin_session(grid_size)
    }

    pub fn new_game(&mut self) -> Result<(), String> {
        let Screen::Playing(game) = &self.screen else {
            return Err("No game to restart".to_string());
        };
        let grid_size = game.grid_size;
        self.begin_session(grid_size)
    }

    pub fn change_settings(&mut self) {
        let grid_size = self.grid_size();
        if let Screen::Playing(game) = &self.screen {
            log!("Session {} discarded, back to setup", game.session_id);
        }
        self.screen = Screen::Setup { grid_size };
    }

    pub fn human_play(&mut self, cell: usize) -> Result<(), String> {
        let Screen::Playing(game) = &mut self.screen else {
            return Err("No game in progress".to_string());
        };
        game.human_play(cell)
    }

    pub fn opponent_play(&mut self) -> Result<usize, String> {
        let Screen::Playing(game) = &mut self.screen else {
            return Err("No game in progress".to_string());
        };
        game.opponent_play(&mut self.rng)
    }

    pub fn pending_opponent_move(&self) -> Option<OpponentMoveKey> {
        let game = self.game()?;
        if !game.is_opponent_turn() {
            return None;
        }
        Some(OpponentMoveKey {
            session_id: game.session_id,
            move_index: game.current_move(),
        })
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        match &self.screen {
            Screen::Setup { grid_size } => ControllerSnapshot::Setup { grid_size: *grid_size },
            Screen::Playing(game) => ControllerSnapshot::InGame(GameView::from_game_state(game)),
        }
    }

    fn begin_session(&mut self, grid_size: usize) -> Result<(), String> {
        let human_mark = match self.last_human_mark {
            Some(previous) => previous.opponent().unwrap_or(Mark::X),
            None => Mark::X,
        };

        let session_id = self.next_session_id;
        let game = TicTacToeGameState::new(session_id, grid_size, human_mark)?;
        self.next_session_id += 1;
        self.last_human_mark = Some(human_mark);
        self.screen = Screen::Playing(game);

        let opener = if human_mark == Mark::X { "human" } else { "opponent" };
        log!(
            "Session {} started on {}x{}, human plays {}, {} opens",
            session_id, grid_size, grid_size, human_mark, opener
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::GameStatus;

    fn controller() -> GameController {
        GameController::new(3, SessionRng::new(7))
    }

    fn view(controller: &GameController) -> GameView {
        match controller.snapshot() {
            ControllerSnapshot::InGame(view) => view,
            other => panic!("expected a game, got {:?}", other),
        }
    }

    fn view_accepts(controller: &GameController) -> bool {
        view(controller).accepting_input
    }

    #[test]
    fn test_starts_on_setup_screen() {
        let controller = controller();
        assert_eq!(controller.snapshot(), ControllerSnapshot::Setup { grid_size: 3 });
        assert!(controller.game().is_none());
        assert_eq!(controller.pending_opponent_move(), None);
    }

    #[test]
    fn test_start_rejects_out_of_range_size() {
        let mut controller = controller();
        assert!(controller.start(2).is_err());
        assert!(controller.start(6).is_err());
        assert_eq!(controller.snapshot(), ControllerSnapshot::Setup { grid_size: 3 });
    }

    #[test]
    fn test_start_creates_empty_session_with_human_to_move() {
        let mut controller = controller();
        controller.start(4).unwrap();

        let view = view(&controller);
        assert_eq!(view.grid_size, 4);
        assert_eq!(view.cells, vec![Mark::Empty; 16]);
        assert_eq!(view.human_mark, Mark::X);
        assert_eq!(view.opponent_mark, Mark::O);
        assert_eq!(view.status, "Next player: X");
        assert!(view.accepting_input);
        assert_eq!(view.move_count, 0);
        assert_eq!(view.last_move, None);
    }

    #[test]
    fn test_human_play_schedules_one_opponent_move() {
        let mut controller = controller();
        controller.start(3).unwrap();
        controller.human_play(0).unwrap();

        let key = controller.pending_opponent_move().unwrap();
        assert_eq!(key, OpponentMoveKey { session_id: 1, move_index: 1 });

        let view = view(&controller);
        assert_eq!(view.status, "Opponent is thinking...");
        assert!(!view.accepting_input);
        assert_eq!(view.last_move, Some((Mark::X, 0)));

        assert_eq!(controller.opponent_play(), Ok(4));
        assert_eq!(controller.pending_opponent_move(), None);
        assert!(view_accepts(&controller));
    }

    #[test]
    fn test_human_play_on_opponent_turn_is_a_no_op() {
        let mut controller = controller();
        controller.start(3).unwrap();
        controller.human_play(0).unwrap();
        let before = controller.snapshot();

        assert!(controller.human_play(1).is_err());
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn test_play_without_game_is_rejected() {
        let mut controller = controller();
        assert!(controller.human_play(0).is_err());
        assert!(controller.opponent_play().is_err());
        assert!(controller.new_game().is_err());
    }

    #[test]
    fn test_reset_after_finished_game_swaps_first_mark() {
        let mut controller = controller();
        controller.start(3).unwrap();

        controller.human_play(0).unwrap();
        assert_eq!(controller.opponent_play(), Ok(4));
        controller.human_play(1).unwrap();
        assert_eq!(controller.opponent_play(), Ok(2));
        controller.human_play(3).unwrap();
        assert_eq!(controller.opponent_play(), Ok(6));
        assert_eq!(controller.game().unwrap().status, GameStatus::Won(Mark::O));
        assert!(view(&controller).winning_line.is_some());

        controller.new_game().unwrap();
        let game = controller.game().unwrap();
        assert_eq!(game.session_id, 2);
        assert_eq!(game.status, GameStatus::InProgress);
        assert_eq!(game.winning_line, None);
        assert_eq!(game.history().len(), 1);
        assert!(game.current_board().empty_cells().len() == 9);
        assert_eq!(game.human_mark, Mark::O);
        assert_eq!(game.current_mark, Mark::X);
        assert_eq!(view(&controller).status, "Opponent is thinking...");
        assert!(!view_accepts(&controller));
        assert_eq!(
            controller.pending_opponent_move(),
            Some(OpponentMoveKey { session_id: 2, move_index: 0 })
        );

        controller.new_game().unwrap();
        let game = controller.game().unwrap();
        assert_eq!(game.human_mark, Mark::X);
        assert!(game.is_human_turn());
        assert_eq!(controller.pending_opponent_move(), None);
    }

    #[test]
    fn test_opener_alternates_between_human_and_opponent() {
        let mut controller = controller();
        controller.start(3).unwrap();

        let mut openers = Vec::new();
        for _ in 0..4 {
            if controller.pending_opponent_move().is_some() {
                let cell = controller.opponent_play().unwrap();
                assert_eq!(cell, 4);
                let view = view(&controller);
                assert_eq!(view.cells[4], Mark::X);
                assert_eq!(view.last_move, Some((Mark::X, 4)));
                assert!(view.accepting_input);
                openers.push("opponent");
            } else {
                assert!(view_accepts(&controller));
                openers.push("human");
            }
            controller.new_game().unwrap();
        }

        assert_eq!(openers, vec!["human", "opponent", "human", "opponent"]);
    }

    #[test]
    fn test_change_settings_discards_session_and_keeps_size() {
        let mut controller = controller();
        controller.start(5).unwrap();
        controller.human_play(12).unwrap();
        assert!(controller.pending_opponent_move().is_some());

        controller.change_settings();
        assert_eq!(controller.snapshot(), ControllerSnapshot::Setup { grid_size: 5 });
        assert_eq!(controller.pending_opponent_move(), None);
        assert!(controller.opponent_play().is_err());

        controller.select_grid_size(4).unwrap();
        assert!(controller.select_grid_size(7).is_err());
        controller.start(controller.grid_size()).unwrap();
        let game = controller.game().unwrap();
        assert_eq!(game.grid_size, 4);
        assert_eq!(game.human_mark, Mark::O);
    }

    #[test]
    fn test_grid_size_is_fixed_during_play() {
        let mut controller = controller();
        controller.start(3).unwrap();
        assert!(controller.select_grid_size(4).is_err());
        assert_eq!(controller.grid_size(), 3);
    }
}
