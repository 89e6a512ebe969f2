mod config;
mod offline;
mod state;
mod ui;

use clap::Parser;
use common::games::SessionRng;
use common::games::tictactoe::{GameController, TicTacToeSessionSettings};
use common::config::Validate;
use common::{log, logger};
use eframe::egui;
use std::path::PathBuf;
use tokio::sync::mpsc;

use config::{Config, get_config_manager};
use offline::local_game_task;
use state::{CommandSender, SharedState};
use ui::TicTacToeApp;

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Tic-tac-toe against a heuristic opponent")]
struct Args {
    /// YAML config file. Defaults to one next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial grid size on the setup screen (3 to 5).
    #[arg(long)]
    grid_size: Option<usize>,

    /// Seed for the opponent's random choices.
    #[arg(long)]
    seed: Option<u64>,

    /// Write the default config file and exit.
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config_manager = get_config_manager(args.config.as_deref());

    if args.init_config {
        config_manager.set_config(&Config::default())?;
        println!("Default config written");
        return Ok(());
    }

    let config = config_manager.get_config()?;
    config.validate()?;
    logger::init_logger(config.log.prefix.clone());

    let grid_size = args.grid_size.unwrap_or(config.tictactoe.grid_size as usize);
    let settings = TicTacToeSessionSettings::new(grid_size, config.tictactoe.opponent_delay_ms)?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Opponent seed: {}", rng.seed());

    let controller = GameController::new(settings.grid_size, rng);
    let shared_state = SharedState::new(settings.grid_size);
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let shared_state_clone = shared_state.clone();
    let runtime_thread = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log!("Failed to start runtime: {}", e);
                return;
            }
        };
        rt.block_on(local_game_task(
            controller,
            settings.opponent_delay,
            shared_state_clone,
            command_rx,
        ));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 560.0])
            .with_min_inner_size([520.0, 360.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(TicTacToeApp::new(
                shared_state,
                CommandSender::new(command_tx),
                settings.grid_size,
            )))
        }),
    )?;

    if runtime_thread.join().is_err() {
        log!("Game thread panicked");
    }

    Ok(())
}
