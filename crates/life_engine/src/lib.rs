//! Life engine: runs the core state machines on tokio and provides the
//! filesystem-backed world they depend on.
mod catalog;
mod config;
mod favorites_store;
mod harvester;
mod persist;
mod runtime;
mod scheduler;

use std::sync::Arc;

use engine_logging::engine_info;
use life_core::favorite::FavoriteInput;
use life_core::root::{self, RootEffectId, RootInput, RootState, RootWorld};
use tokio::runtime::Handle;

pub use catalog::DirectoryPatternCatalog;
pub use config::EngineConfig;
pub use favorites_store::JsonFavoritesStore;
pub use harvester::Harvester;
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use runtime::{TokioFileScheduler, TokioTimer};
pub use scheduler::{Deliveries, Delivery, EffectScheduler, InputSender};

pub type RootHarvester =
    Harvester<RootInput, RootState, RootWorld<TokioFileScheduler>, RootEffectId>;

/// World backed by the filesystem locations in `config`.
pub fn build_world(config: &EngineConfig, handle: Handle) -> RootWorld<TokioFileScheduler> {
    RootWorld {
        file_scheduler: TokioFileScheduler::new(handle),
        timer: Arc::new(TokioTimer),
        favorites: Arc::new(JsonFavoritesStore::new(config.favorites_path.clone())),
        catalog: Arc::new(DirectoryPatternCatalog::new(config.patterns_dir.clone())),
    }
}

/// Starts the root machine and requests the persisted favorites.
pub fn launch(config: &EngineConfig, handle: Handle) -> RootHarvester {
    engine_info!(
        "launching with favorites {:?} and patterns {:?}",
        config.favorites_path,
        config.patterns_dir
    );
    let world = build_world(config, handle.clone());
    let mut harvester = Harvester::new(root::mapping(), config.initial_state(), world, handle);
    harvester.dispatch(RootInput::Favorite(FavoriteInput::LoadFavorites));
    harvester
}
