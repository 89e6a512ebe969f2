use std::time::Duration;

pub const MIN_GRID_SIZE: usize = 3;
pub const MAX_GRID_SIZE: usize = 5;
pub const DEFAULT_GRID_SIZE: usize = 3;
pub const DEFAULT_OPPONENT_DELAY_MS: u64 = 600;
pub const MAX_OPPONENT_DELAY_MS: u64 = 5000;

pub fn validate_grid_size(grid_size: usize) -> Result<(), String> {
    if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&grid_size) {
        return Err(format!(
            "Grid size must be between {} and {}, got {}",
            MIN_GRID_SIZE, MAX_GRID_SIZE, grid_size
        ));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TicTacToeSessionSettings {
    pub grid_size: usize,
    pub opponent_delay: Duration,
}

impl TicTacToeSessionSettings {
    pub fn new(grid_size: usize, opponent_delay_ms: u64) -> Result<Self, String> {
        validate_grid_size(grid_size)?;
        if opponent_delay_ms > MAX_OPPONENT_DELAY_MS {
            return Err(format!(
                "Opponent delay must not exceed {} ms, got {}",
                MAX_OPPONENT_DELAY_MS, opponent_delay_ms
            ));
        }
        Ok(Self {
            grid_size,
            opponent_delay: Duration::from_millis(opponent_delay_ms),
        })
    }
}

impl Default for TicTacToeSessionSettings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            opponent_delay: Duration::from_millis(DEFAULT_OPPONENT_DELAY_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_bounds() {
        assert!(validate_grid_size(2).is_err());
        assert!(validate_grid_size(3).is_ok());
        assert!(validate_grid_size(5).is_ok());
        assert!(validate_grid_size(6).is_err());
    }

    #[test]
    fn test_settings_reject_long_delay() {
        assert!(TicTacToeSessionSettings::new(3, 5001).is_err());
        let settings = TicTacToeSessionSettings::new(4, 0).unwrap();
        assert_eq!(settings.opponent_delay, Duration::ZERO);
        assert_eq!(TicTacToeSessionSettings::default().opponent_delay, Duration::from_millis(600));
    }
}
