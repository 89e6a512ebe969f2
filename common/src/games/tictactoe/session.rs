use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::games::GameBroadcaster;
use crate::log;
use super::controller::{GameController, OpponentMoveKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerCommand {
    SelectGridSize { grid_size: usize },
    Start { grid_size: usize },
    Play { cell: usize },
    NewGame,
    ChangeSettings,
    Shutdown,
}

/// Holds at most one delayed opponent move. Scheduling aborts the previous task
/// first, so moves never stack.
pub struct OpponentScheduler {
    delay: Duration,
    due_tx: mpsc::UnboundedSender<OpponentMoveKey>,
    pending: Option<(OpponentMoveKey, JoinHandle<()>)>,
}

impl OpponentScheduler {
    pub fn new(delay: Duration, due_tx: mpsc::UnboundedSender<OpponentMoveKey>) -> Self {
        Self {
            delay,
            due_tx,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<OpponentMoveKey> {
        self.pending.as_ref().map(|(key, _)| *key)
    }

    pub fn schedule(&mut self, key: OpponentMoveKey) {
        self.cancel();

        let due_tx = self.due_tx.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = due_tx.send(key);
        });
        self.pending = Some((key, handle));
    }

    pub fn cancel(&mut self) -> Option<OpponentMoveKey> {
        let (key, handle) = self.pending.take()?;
        handle.abort();
        Some(key)
    }

    /// Clears the pending entry if `key` is the one it holds. Returns false for stale keys.
    pub fn complete(&mut self, key: OpponentMoveKey) -> bool {
        if self.pending() != Some(key) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Makes the pending task match what the controller is waiting for.
    pub fn sync_with(&mut self, wanted: Option<OpponentMoveKey>) {
        match wanted {
            Some(key) if self.pending() == Some(key) => {}
            Some(key) => self.schedule(key),
            None => {
                if let Some(key) = self.cancel() {
                    log!(
                        "Cancelled opponent move {} of session {}",
                        key.move_index, key.session_id
                    );
                }
            }
        }
    }
}

impl Drop for OpponentScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

pub struct TicTacToeSession;

impl TicTacToeSession {
    /// Drives the controller until `Shutdown` or until every sender is dropped.
    /// Returns the controller in its final state.
    pub async fn run(
        mut controller: GameController,
        opponent_delay: Duration,
        mut command_rx: mpsc::UnboundedReceiver<ControllerCommand>,
        broadcaster: impl GameBroadcaster,
    ) -> GameController {
        let (due_tx, mut due_rx) = mpsc::unbounded_channel();
        let mut scheduler = OpponentScheduler::new(opponent_delay, due_tx);

        broadcaster.broadcast_state(controller.snapshot()).await;

        loop {
            tokio::select! {
                command = command_rx.recv() => {
                    match command {
                        None | Some(ControllerCommand::Shutdown) => break,
                        Some(command) => handle_command(&mut controller, command),
                    }
                }
                Some(key) = due_rx.recv() => {
                    play_opponent_turn(&mut controller, &mut scheduler, key);
                }
            }

            scheduler.sync_with(controller.pending_opponent_move());
            broadcaster.broadcast_state(controller.snapshot()).await;
        }

        scheduler.cancel();
        log!("Game controller stopped");
        controller
    }
}

fn handle_command(controller: &mut GameController, command: ControllerCommand) {
    let result = match command {
        ControllerCommand::SelectGridSize { grid_size } => controller.select_grid_size(grid_size),
        ControllerCommand::Start { grid_size } => controller.start(grid_size),
        ControllerCommand::Play { cell } => controller.human_play(cell),
        ControllerCommand::NewGame => controller.new_game(),
        ControllerCommand::ChangeSettings => {
            controller.change_settings();
            Ok(())
        }
        ControllerCommand::Shutdown => Ok(()),
    };

    if let Err(e) = result {
        log!("Ignored {:?}: {}", command, e);
    }
}

fn play_opponent_turn(
    controller: &mut GameController,
    scheduler: &mut OpponentScheduler,
    key: OpponentMoveKey,
) {
    if !scheduler.complete(key) || controller.pending_opponent_move() != Some(key) {
        log!(
            "Dropped stale opponent move {} of session {}",
            key.move_index, key.session_id
        );
        return;
    }

    match controller.opponent_play() {
        Ok(cell) => log!("[session:{}] Opponent played cell {}", key.session_id, cell),
        Err(e) => log!("[session:{}] Opponent could not move: {}", key.session_id, e),
    }
}
