//! Favorite pattern names, persisted on every change.

use std::convert::Infallible;
use std::sync::Arc;

use crate::world::blocking_effect;
use crate::{Effect, FavoritesStore, FileScheduler, Mapping, Transition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteInput {
    AddFavorite(String),
    RemoveFavorite(String),
    LoadFavorites,
    /// `None` when loading failed.
    DidLoadFavorites(Option<Vec<String>>),
    SaveFavorites,
    DidSaveFavorites,
}

/// Ordered without duplicates; the front is the most recently favorited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FavoriteState {
    pattern_names: Vec<String>,
}

impl FavoriteState {
    pub fn new(pattern_names: Vec<String>) -> Self {
        let mut state = Self::default();
        for name in pattern_names.into_iter().rev() {
            state.add(name);
        }
        state
    }

    pub fn pattern_names(&self) -> &[String] {
        &self.pattern_names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pattern_names.iter().any(|n| n == name)
    }

    /// Moves `name` to the front, inserting it if absent.
    pub fn add(&mut self, name: String) {
        self.pattern_names.retain(|n| *n != name);
        self.pattern_names.insert(0, name);
    }

    pub fn remove(&mut self, name: &str) {
        self.pattern_names.retain(|n| n != name);
    }
}

pub struct FavoriteWorld<S> {
    pub store: Arc<dyn FavoritesStore>,
    pub file_scheduler: S,
}

impl<S: Clone> Clone for FavoriteWorld<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            file_scheduler: self.file_scheduler.clone(),
        }
    }
}

pub fn mapping<S: FileScheduler>(
) -> Mapping<FavoriteInput, FavoriteState, FavoriteWorld<S>, Infallible> {
    Mapping::new(update::<S>)
}

pub fn update<S: FileScheduler>(
    input: FavoriteInput,
    mut state: FavoriteState,
    world: &FavoriteWorld<S>,
) -> Transition<FavoriteState, FavoriteInput, Infallible> {
    let effect = match input {
        FavoriteInput::AddFavorite(name) => {
            state.add(name);
            save_effect(&state, world)
        }
        FavoriteInput::RemoveFavorite(name) => {
            // Saved even when `name` was not a favorite.
            state.remove(&name);
            save_effect(&state, world)
        }
        FavoriteInput::LoadFavorites => {
            let store = Arc::clone(&world.store);
            blocking_effect(
                &world.file_scheduler,
                "loading favorites",
                move || store.load(),
                FavoriteInput::DidLoadFavorites,
            )
        }
        FavoriteInput::DidLoadFavorites(Some(names)) => {
            state = FavoriteState::new(names);
            Effect::none()
        }
        // A failed load keeps whatever names are already held.
        FavoriteInput::DidLoadFavorites(None) => Effect::none(),
        FavoriteInput::SaveFavorites => save_effect(&state, world),
        FavoriteInput::DidSaveFavorites => Effect::none(),
    };

    Transition::handled(state, effect)
}

fn save_effect<S: FileScheduler>(
    state: &FavoriteState,
    world: &FavoriteWorld<S>,
) -> Effect<FavoriteInput, Infallible> {
    let store = Arc::clone(&world.store);
    let names = state.pattern_names.clone();
    // TODO: report failed saves to the user instead of only logging them.
    blocking_effect(
        &world.file_scheduler,
        "saving favorites",
        move || store.save(&names),
        |_| FavoriteInput::DidSaveFavorites,
    )
}
