mod log_config;
mod main_config;
mod tictactoe_config;

pub use log_config::LogConfig;
pub use main_config::{Config, get_config_manager};
pub use tictactoe_config::TicTacToeConfig;
