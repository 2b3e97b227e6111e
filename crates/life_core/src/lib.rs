//! Life core: effect descriptions, composable state machines and the
//! cellular automaton they drive. Nothing here performs I/O directly.
mod board;
mod effect;
mod mapping;
mod optics;
mod pattern;
mod transition;
mod view_model;
mod world;

pub mod favorite;
pub mod game;
pub mod pattern_select;
pub mod root;

pub use board::{Board, Point, Size};
pub use effect::{absurd, Effect, EffectQueue, FlattenStrategy, Task};
pub use mapping::Mapping;
pub use optics::{Lens, OptionalLens, Prism};
pub use pattern::{Pattern, PatternError};
pub use transition::Transition;
pub use view_model::GameViewModel;
pub use world::{
    blocking_effect, CatalogError, FavoritesStore, FileScheduler, ImmediateScheduler,
    PatternCatalog, StoreError, Timer,
};
