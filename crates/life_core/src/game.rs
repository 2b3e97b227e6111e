//! Conway's Game of Life simulation machine.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;

use crate::view_model::GameViewModel;
use crate::{Board, Effect, Mapping, Pattern, Point, Size, Timer, Transition};

#[derive(Debug, Clone, PartialEq)]
pub enum GameInput {
    StartTimer,
    StopTimer,
    /// One timer period elapsed: advance the board by a generation.
    Tick,
    Tap { x: i64, y: i64 },
    Drag { x: i64, y: i64 },
    DragEnd,
    ResetBoard,
    /// Viewport size in points; the board gets one cell per `cell_length`.
    UpdateBoardSize { width: f64, height: f64 },
    UpdatePattern(Pattern),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// The first dragged cell decided which value the whole gesture paints.
    Dragging { is_first_alive: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEffectId {
    Timer,
}

#[derive(Clone)]
pub struct GameWorld {
    pub timer: Arc<dyn Timer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub cell_length: f64,
    pub timer_interval: Duration,
    board_size: Size,
    board: Board,
    selected_pattern: Pattern,
    drag_state: DragState,
    is_running_timer: bool,
    generation: u64,
}

impl GameState {
    pub const DEFAULT_CELL_LENGTH: f64 = 5.0;
    pub const DEFAULT_TIMER_INTERVAL: Duration = Duration::from_millis(100);

    pub fn new(pattern: Pattern) -> Self {
        Self::with_cell_length(pattern, Self::DEFAULT_CELL_LENGTH)
    }

    pub fn with_cell_length(pattern: Pattern, cell_length: f64) -> Self {
        let board_size = Size::ZERO;
        Self {
            cell_length,
            timer_interval: Self::DEFAULT_TIMER_INTERVAL,
            board_size,
            board: pattern.make_board(board_size),
            selected_pattern: pattern,
            drag_state: DragState::Idle,
            is_running_timer: false,
            generation: 0,
        }
    }

    pub fn board_size(&self) -> Size {
        self.board_size
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selected_pattern(&self) -> &Pattern {
        &self.selected_pattern
    }

    pub fn drag_state(&self) -> DragState {
        self.drag_state
    }

    pub fn is_running_timer(&self) -> bool {
        self.is_running_timer
    }

    /// Generations stepped since the board was last rebuilt from its pattern.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> GameViewModel {
        GameViewModel {
            title: self.selected_pattern.title().to_string(),
            board_size: self.board_size,
            cell_length: self.cell_length,
            live_cells: self.board.live_cells().collect(),
            generation: self.generation,
            is_running: self.is_running_timer,
        }
    }

    fn rebuild_board(&mut self) {
        self.board = self.selected_pattern.make_board(self.board_size);
        self.generation = 0;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Pattern::glider())
    }
}

pub fn mapping() -> Mapping<GameInput, GameState, GameWorld, GameEffectId> {
    Mapping::new(update)
}

/// Pure update function for the simulation.
pub fn update(
    input: GameInput,
    mut state: GameState,
    world: &GameWorld,
) -> Transition<GameState, GameInput, GameEffectId> {
    let effect = match input {
        GameInput::UpdateBoardSize { width, height } => {
            state.board_size = cells_for_viewport(width, height, state.cell_length);
            state.rebuild_board();
            Effect::none()
        }
        GameInput::StartTimer => {
            state.is_running_timer = true;
            timer_effect(state.timer_interval, world)
        }
        GameInput::StopTimer => {
            state.is_running_timer = false;
            Effect::cancel(GameEffectId::Timer)
        }
        GameInput::Tick => {
            let next = state.board.step();
            let is_same_board = next == state.board;
            state.board = next;
            state.generation += 1;

            // A dead or frozen board stops the loop. Only the previous frame
            // is compared, so oscillators keep running.
            if state.board.is_empty() || is_same_board {
                Effect::just(GameInput::StopTimer)
            } else {
                Effect::none()
            }
        }
        GameInput::Tap { x, y } => {
            state.board.toggle(Point::new(x, y));
            Effect::none()
        }
        GameInput::Drag { x, y } => {
            let point = Point::new(x, y);
            let alive = match state.drag_state {
                DragState::Dragging { is_first_alive } => is_first_alive,
                DragState::Idle => !state.board.is_alive(point),
            };
            state.drag_state = DragState::Dragging {
                is_first_alive: alive,
            };
            state.board.set(point, alive);
            Effect::none()
        }
        GameInput::DragEnd => {
            state.drag_state = DragState::Idle;
            Effect::none()
        }
        GameInput::ResetBoard => {
            state.rebuild_board();
            Effect::none()
        }
        GameInput::UpdatePattern(pattern) => {
            state.selected_pattern = pattern;
            state.rebuild_board();
            Effect::none()
        }
    };

    Transition::handled(state, effect)
}

fn cells_for_viewport(width: f64, height: f64, cell_length: f64) -> Size {
    if !(cell_length > 0.0) {
        return Size::ZERO;
    }
    let cells = |points: f64| (points / cell_length).floor().max(0.0) as usize;
    Size::new(cells(width), cells(height))
}

fn timer_effect(interval: Duration, world: &GameWorld) -> Effect<GameInput, GameEffectId> {
    Effect::from_stream(world.timer.ticks(interval).map(|()| GameInput::Tick))
        .with_id(GameEffectId::Timer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_is_divided_into_whole_cells() {
        assert_eq!(cells_for_viewport(103.0, 51.0, 5.0), Size::new(20, 10));
        assert_eq!(cells_for_viewport(-10.0, 4.0, 5.0), Size::ZERO);
        assert_eq!(cells_for_viewport(100.0, 100.0, 0.0), Size::ZERO);
    }
}
