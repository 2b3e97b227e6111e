use std::path::PathBuf;
use std::time::Duration;

use life_core::game::GameState;
use life_core::root::RootState;
use life_core::Pattern;

/// Where the engine keeps its files and how the simulation is paced.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub favorites_path: PathBuf,
    pub patterns_dir: PathBuf,
    pub timer_interval: Duration,
    /// Points per cell edge when converting the viewport to a board size.
    pub cell_length: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            favorites_path: PathBuf::from("favorites.json"),
            patterns_dir: PathBuf::from("patterns"),
            timer_interval: GameState::DEFAULT_TIMER_INTERVAL,
            cell_length: GameState::DEFAULT_CELL_LENGTH,
        }
    }
}

impl EngineConfig {
    /// Root state before anything has been loaded: the glider on an empty
    /// board, paced by this config.
    pub fn initial_state(&self) -> RootState {
        let mut game = GameState::with_cell_length(Pattern::glider(), self.cell_length);
        game.timer_interval = self.timer_interval;
        RootState::with_game(game)
    }
}
