use super::game::TicTacToeGameUi;
use crate::state::{CommandSender, SharedState};
use common::games::tictactoe::{ControllerCommand, ControllerSnapshot, MAX_GRID_SIZE, MIN_GRID_SIZE};
use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenType {
    Setup,
    InGame,
}

impl ScreenType {
    fn from(snapshot: &ControllerSnapshot) -> Self {
        match snapshot {
            ControllerSnapshot::Setup { .. } => Self::Setup,
            ControllerSnapshot::InGame(_) => Self::InGame,
        }
    }
}

pub struct TicTacToeApp {
    shared_state: SharedState,
    command_sender: CommandSender,
    game_ui: TicTacToeGameUi,
    grid_size_input: usize,
    previous_screen: Option<ScreenType>,
    closing: bool,
}

impl TicTacToeApp {
    pub fn new(shared_state: SharedState, command_sender: CommandSender, grid_size: usize) -> Self {
        Self {
            shared_state,
            command_sender,
            game_ui: TicTacToeGameUi::new(),
            grid_size_input: grid_size,
            previous_screen: None,
            closing: false,
        }
    }

    fn handle_screen_transition(&mut self, snapshot: &ControllerSnapshot) {
        let current = ScreenType::from(snapshot);
        if self.previous_screen == Some(current) {
            return;
        }

        if let ControllerSnapshot::Setup { grid_size } = snapshot {
            self.grid_size_input = *grid_size;
        }
        self.previous_screen = Some(current);
    }

    fn render_setup(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Tic-Tac-Toe");
            ui.add_space(20.0);

            ui.label(grid_size_label(self.grid_size_input));
            let slider = egui::Slider::new(&mut self.grid_size_input, MIN_GRID_SIZE..=MAX_GRID_SIZE)
                .integer()
                .show_value(false);
            if ui.add(slider).changed() {
                self.command_sender.send(ControllerCommand::SelectGridSize {
                    grid_size: self.grid_size_input,
                });
            }
            ui.horizontal(|ui| {
                for caption in tick_captions() {
                    ui.small(caption);
                }
            });

            ui.add_space(20.0);
            if ui.button(egui::RichText::new("Start Game").size(18.0)).clicked() {
                self.command_sender.send(ControllerCommand::Start {
                    grid_size: self.grid_size_input,
                });
            }
        });
    }
}

fn grid_size_label(grid_size: usize) -> String {
    format!("Grid Size: {}x{}", grid_size, grid_size)
}

fn tick_captions() -> Vec<String> {
    (MIN_GRID_SIZE..=MAX_GRID_SIZE)
        .map(|n| format!("{}x{}", n, n))
        .collect()
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if ctx.input(|i| i.viewport().close_requested()) && !self.closing {
            self.command_sender.send(ControllerCommand::Shutdown);
            self.closing = true;
        }

        let state = self.shared_state.get_state();
        self.handle_screen_transition(&state.snapshot);

        egui::CentralPanel::default().show(ctx, |ui| match &state.snapshot {
            ControllerSnapshot::Setup { .. } => self.render_setup(ui),
            ControllerSnapshot::InGame(view) => {
                self.game_ui
                    .render_game(ui, view, &state.move_log, &self.command_sender)
            }
        });
    }
}
