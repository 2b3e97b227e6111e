use crate::{Point, Size};

/// Render-ready snapshot of the game, detached from the machine state.
#[derive(Debug, Clone, PartialEq)]
pub struct GameViewModel {
    pub title: String,
    pub board_size: Size,
    pub cell_length: f64,
    /// Row-major order.
    pub live_cells: Vec<Point>,
    pub generation: u64,
    pub is_running: bool,
}

impl GameViewModel {
    pub fn live_count(&self) -> usize {
        self.live_cells.len()
    }
}
