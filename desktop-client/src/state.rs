use common::games::tictactoe::{ControllerCommand, ControllerSnapshot};
use eframe::egui;
use ringbuffer::{AllocRingBuffer, RingBuffer};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub const MOVE_LOG_SIZE: usize = 8;

#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<ControllerCommand>,
}

impl CommandSender {
    pub fn new(tx: mpsc::UnboundedSender<ControllerCommand>) -> Self {
        Self { tx }
    }

    pub fn send(&self, cmd: ControllerCommand) {
        let _ = self.tx.send(cmd);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub snapshot: ControllerSnapshot,
    pub move_log: AllocRingBuffer<String>,
    /// Session the log entries belong to. A new session clears the log.
    pub log_session_id: Option<u64>,
    pub logged_moves: usize,
}

impl AppState {
    fn new(grid_size: usize) -> Self {
        Self {
            snapshot: ControllerSnapshot::Setup { grid_size },
            move_log: AllocRingBuffer::new(MOVE_LOG_SIZE),
            log_session_id: None,
            logged_moves: 0,
        }
    }
}

pub struct SharedState {
    state: Arc<Mutex<AppState>>,
    ctx: Arc<Mutex<Option<egui::Context>>>,
}

impl SharedState {
    pub fn new(grid_size: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::new(grid_size))),
            ctx: Arc::new(Mutex::new(None)),
        }
    }

    pub fn has_context(&self) -> bool {
        self.ctx.lock().map(|ctx| ctx.is_some()).unwrap_or(false)
    }

    pub fn set_context(&self, ctx: egui::Context) {
        if let Ok(mut slot) = self.ctx.lock() {
            *slot = Some(ctx);
        }
    }

    pub fn get_state(&self) -> AppState {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update_snapshot(&self, snapshot: ControllerSnapshot) {
        {
            let mut state = match self.state.lock() {
                Ok(state) => state,
                Err(poisoned) => poisoned.into_inner(),
            };
            record_moves(&mut state, &snapshot);
            state.snapshot = snapshot;
        }
        self.request_repaint();
    }

    fn request_repaint(&self) {
        if let Ok(ctx) = self.ctx.lock()
            && let Some(ctx) = ctx.as_ref()
        {
            ctx.request_repaint();
        }
    }
}

impl Clone for SharedState {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            ctx: Arc::clone(&self.ctx),
        }
    }
}

fn record_moves(state: &mut AppState, snapshot: &ControllerSnapshot) {
    let ControllerSnapshot::InGame(view) = snapshot else {
        return;
    };

    if state.log_session_id != Some(view.session_id) {
        state.move_log.clear();
        state.log_session_id = Some(view.session_id);
        state.logged_moves = 0;
        state.move_log.push(format!(
            "Game {} on {}x{}: you play {}",
            view.session_id, view.grid_size, view.grid_size, view.human_mark
        ));
    }

    if view.move_count > state.logged_moves {
        if let Some((mark, cell)) = view.last_move {
            let who = if mark == view.human_mark { "You" } else { "Opponent" };
            state.move_log.push(format!(
                "{}. {} played {} at row {}, col {}",
                view.move_count,
                who,
                mark,
                cell / view.grid_size + 1,
                cell % view.grid_size + 1
            ));
        }
        state.logged_moves = view.move_count;

        let board_full = view.cells.iter().all(|cell| !cell.is_empty());
        if view.winning_line.is_some() || board_full {
            state.move_log.push(view.status.clone());
        }
    }
}
