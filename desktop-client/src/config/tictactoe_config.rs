use common::config::{Validate, validate_range};
use common::games::tictactoe::{
    DEFAULT_GRID_SIZE, DEFAULT_OPPONENT_DELAY_MS, MAX_GRID_SIZE, MAX_OPPONENT_DELAY_MS, MIN_GRID_SIZE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct TicTacToeConfig {
    pub grid_size: u32,
    pub opponent_delay_ms: u64,
}

impl Validate for TicTacToeConfig {
    fn validate(&self) -> Result<(), String> {
        validate_range("grid_size", self.grid_size, MIN_GRID_SIZE as u32, MAX_GRID_SIZE as u32)?;
        validate_range("opponent_delay_ms", self.opponent_delay_ms, 0, MAX_OPPONENT_DELAY_MS)?;
        Ok(())
    }
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE as u32,
            opponent_delay_ms: DEFAULT_OPPONENT_DELAY_MS,
        }
    }
}
