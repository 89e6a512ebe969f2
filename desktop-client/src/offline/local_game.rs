use std::time::Duration;
use tokio::sync::mpsc;
use common::games::tictactoe::{ControllerCommand, GameController, TicTacToeSession};
use common::log;
use crate::state::SharedState;

use super::LocalBroadcaster;

/// Runs the controller against the UI's shared state until the window closes.
pub async fn local_game_task(
    controller: GameController,
    opponent_delay: Duration,
    shared_state: SharedState,
    command_rx: mpsc::UnboundedReceiver<ControllerCommand>,
) {
    log!(
        "Local game started, opponent delay {}ms",
        opponent_delay.as_millis()
    );

    let broadcaster = LocalBroadcaster::new(shared_state);
    let controller = TicTacToeSession::run(controller, opponent_delay, command_rx, broadcaster).await;

    match controller.game() {
        Some(game) => log!("Local game stopped during session {}", game.session_id),
        None => log!("Local game stopped on the setup screen"),
    }
}
