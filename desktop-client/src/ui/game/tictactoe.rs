use crate::state::CommandSender;
use common::games::tictactoe::{ControllerCommand, GameView, Mark};
use eframe::egui;
use ringbuffer::{AllocRingBuffer, RingBuffer};

pub struct TicTacToeGameUi {
    last_hover: Option<usize>,
}

impl TicTacToeGameUi {
    const BOARD_PADDING: f32 = 20.0;
    const INFO_PANEL_WIDTH: f32 = 220.0;
    const MIN_CELL_SIZE: f32 = 40.0;
    const MAX_CELL_SIZE: f32 = 120.0;
    const LINE_WIDTH: f32 = 2.0;

    pub fn new() -> Self {
        Self { last_hover: None }
    }

    fn calculate_cell_size(available_width: f32, available_height: f32, grid_size: usize) -> f32 {
        let available_board_width = available_width - Self::INFO_PANEL_WIDTH - (Self::BOARD_PADDING * 2.0);
        let available_board_height = available_height - (Self::BOARD_PADDING * 2.0);

        let cell_size = available_board_width.min(available_board_height) / grid_size as f32;
        cell_size.clamp(Self::MIN_CELL_SIZE, Self::MAX_CELL_SIZE)
    }

    pub fn render_game(
        &mut self,
        ui: &mut egui::Ui,
        view: &GameView,
        move_log: &AllocRingBuffer<String>,
        command_sender: &CommandSender,
    ) {
        let cell_size = Self::calculate_cell_size(ui.available_width(), ui.available_height(), view.grid_size);
        let board_size = cell_size * view.grid_size as f32;

        ui.horizontal(|ui| {
            ui.add_space(Self::BOARD_PADDING);
            ui.allocate_ui(egui::vec2(board_size, board_size), |ui| {
                self.render_board(ui, view, cell_size, command_sender);
            });
            ui.add_space(Self::BOARD_PADDING);

            ui.separator();

            ui.vertical(|ui| {
                ui.set_width(Self::INFO_PANEL_WIDTH);
                self.render_info_panel(ui, view, move_log, command_sender);
            });
        });
    }

    fn render_board(
        &mut self,
        ui: &mut egui::Ui,
        view: &GameView,
        cell_size: f32,
        command_sender: &CommandSender,
    ) {
        let n = view.grid_size;
        let board_size = cell_size * n as f32;
        let (rect, response) = ui.allocate_exact_size(egui::vec2(board_size, board_size), egui::Sense::click());
        let painter = ui.painter();

        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(240, 240, 240));

        let cell_rect = |cell: usize| {
            egui::Rect::from_min_size(
                egui::pos2(
                    rect.left() + (cell % n) as f32 * cell_size,
                    rect.top() + (cell / n) as f32 * cell_size,
                ),
                egui::vec2(cell_size, cell_size),
            )
        };

        if let Some(line) = &view.winning_line {
            for cell in (0..n * n).filter(|&cell| line.contains(cell)) {
                painter.rect_filled(
                    cell_rect(cell),
                    0.0,
                    egui::Color32::from_rgba_unmultiplied(50, 200, 50, 90),
                );
            }
        }

        self.last_hover = None;
        if view.accepting_input
            && let Some(hover_pos) = response.hover_pos()
        {
            let col = ((hover_pos.x - rect.left()) / cell_size) as usize;
            let row = ((hover_pos.y - rect.top()) / cell_size) as usize;
            let cell = row * n + col;

            if col < n && row < n && view.cells.get(cell) == Some(&Mark::Empty) {
                painter.rect_filled(
                    cell_rect(cell),
                    0.0,
                    egui::Color32::from_rgba_unmultiplied(100, 150, 255, 50),
                );
                self.last_hover = Some(cell);
            }
        }

        for i in 0..=n {
            let offset = i as f32 * cell_size;
            let stroke = egui::Stroke::new(Self::LINE_WIDTH, egui::Color32::BLACK);
            painter.line_segment(
                [egui::pos2(rect.left() + offset, rect.top()), egui::pos2(rect.left() + offset, rect.bottom())],
                stroke,
            );
            painter.line_segment(
                [egui::pos2(rect.left(), rect.top() + offset), egui::pos2(rect.right(), rect.top() + offset)],
                stroke,
            );
        }

        for (cell, mark) in view.cells.iter().enumerate() {
            match mark {
                Mark::X => draw_x(painter, cell_rect(cell)),
                Mark::O => draw_o(painter, cell_rect(cell)),
                Mark::Empty => {}
            }
        }

        if let Some((_, cell)) = view.last_move {
            painter.rect_stroke(
                cell_rect(cell).shrink(3.0),
                0.0,
                egui::Stroke::new(1.5, egui::Color32::from_rgb(120, 120, 120)),
                egui::StrokeKind::Inside,
            );
        }

        if response.clicked()
            && let Some(cell) = self.last_hover
        {
            command_sender.send(ControllerCommand::Play { cell });
        }
    }

    fn render_info_panel(
        &self,
        ui: &mut egui::Ui,
        view: &GameView,
        move_log: &AllocRingBuffer<String>,
        command_sender: &CommandSender,
    ) {
        ui.heading(format!("Tic-Tac-Toe {}x{}", view.grid_size, view.grid_size));
        ui.label(format!("Game #{}", view.session_id));
        ui.separator();

        ui.label(format!("You: {}", view.human_mark));
        ui.label(format!("Opponent: {}", view.opponent_mark));
        ui.separator();

        let winner = view.winning_line.as_ref().map(|line| line.mark);
        let status = egui::RichText::new(&view.status).size(18.0);
        match winner {
            Some(mark) if mark == view.human_mark => ui.colored_label(egui::Color32::GREEN, status),
            Some(_) => ui.colored_label(egui::Color32::from_rgb(220, 50, 50), status),
            None => ui.label(status),
        };

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("New Game").clicked() {
                command_sender.send(ControllerCommand::NewGame);
            }
            if ui.button("Change Settings").clicked() {
                command_sender.send(ControllerCommand::ChangeSettings);
            }
        });

        ui.separator();
        ui.label(egui::RichText::new("Recent moves").strong());
        egui::ScrollArea::vertical()
            .max_height(200.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in move_log.iter() {
                    ui.label(entry);
                }
            });
    }
}

fn draw_x(painter: &egui::Painter, rect: egui::Rect) {
    let padding = rect.width() * 0.2;
    let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(220, 50, 50));

    painter.line_segment(
        [
            egui::pos2(rect.left() + padding, rect.top() + padding),
            egui::pos2(rect.right() - padding, rect.bottom() - padding),
        ],
        stroke,
    );
    painter.line_segment(
        [
            egui::pos2(rect.right() - padding, rect.top() + padding),
            egui::pos2(rect.left() + padding, rect.bottom() - padding),
        ],
        stroke,
    );
}

fn draw_o(painter: &egui::Painter, rect: egui::Rect) {
    let padding = rect.width() * 0.2;
    let radius = (rect.width() / 2.0) - padding;
    let stroke = egui::Stroke::new(4.0, egui::Color32::from_rgb(50, 50, 220));

    painter.circle_stroke(rect.center(), radius, stroke);
}
