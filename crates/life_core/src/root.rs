//! Root machine: the game, the favorites and the optional pattern picker
//! composed into one state machine.

use std::sync::Arc;

use crate::effect::absurd;
use crate::favorite::{self, FavoriteInput, FavoriteState, FavoriteWorld};
use crate::game::{self, GameEffectId, GameInput, GameState, GameWorld};
use crate::pattern_select::{self, PatternSelectInput, PatternSelectState, PatternSelectWorld};
use crate::{
    Effect, FavoritesStore, FileScheduler, Lens, Mapping, OptionalLens, Pattern, PatternCatalog,
    Prism, Timer, Transition,
};

#[derive(Debug, Clone, PartialEq)]
pub enum RootInput {
    PresentPatternSelect,
    DismissPatternSelect,
    Game(GameInput),
    Favorite(FavoriteInput),
    PatternSelect(PatternSelectInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootEffectId {
    Game(GameEffectId),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RootState {
    pub game: GameState,
    pub favorite: FavoriteState,
    /// Present only while the picker is shown.
    pub pattern_select: Option<PatternSelectState>,
}

impl RootState {
    pub fn new(pattern: Pattern) -> Self {
        Self::with_game(GameState::new(pattern))
    }

    pub fn with_game(game: GameState) -> Self {
        Self {
            game,
            favorite: FavoriteState::default(),
            pattern_select: None,
        }
    }

    pub fn is_favorite_pattern(&self) -> bool {
        self.favorite.contains(self.game.selected_pattern().title())
    }
}

/// Everything the root machine may touch outside of its state.
pub struct RootWorld<S> {
    pub file_scheduler: S,
    pub timer: Arc<dyn Timer>,
    pub favorites: Arc<dyn FavoritesStore>,
    pub catalog: Arc<dyn PatternCatalog>,
}

impl<S: Clone> Clone for RootWorld<S> {
    fn clone(&self) -> Self {
        Self {
            file_scheduler: self.file_scheduler.clone(),
            timer: Arc::clone(&self.timer),
            favorites: Arc::clone(&self.favorites),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<S: FileScheduler> RootWorld<S> {
    pub fn game(&self) -> GameWorld {
        GameWorld {
            timer: Arc::clone(&self.timer),
        }
    }

    pub fn favorite(&self) -> FavoriteWorld<S> {
        FavoriteWorld {
            store: Arc::clone(&self.favorites),
            file_scheduler: self.file_scheduler.clone(),
        }
    }

    pub fn pattern_select(&self) -> PatternSelectWorld<S> {
        PatternSelectWorld {
            catalog: Arc::clone(&self.catalog),
            favorites: Arc::clone(&self.favorites),
            file_scheduler: self.file_scheduler.clone(),
        }
    }
}

/// The composed root mapping. The root's own transitions run first; the
/// game, favorite and picker children only see inputs the root left
/// unhandled.
pub fn mapping<S: FileScheduler>() -> Mapping<RootInput, RootState, RootWorld<S>, RootEffectId> {
    Mapping::reduce(vec![
        Mapping::new(update::<S>),
        game_mapping::<S>(),
        favorite::mapping::<S>()
            .contramap_world(RootWorld::<S>::favorite)
            .transform_state(Lens::new(favorite_of, set_favorite))
            .transform_input(Prism::new(
                |input| match input {
                    RootInput::Favorite(favorite) => Ok(favorite),
                    other => Err(other),
                },
                RootInput::Favorite,
            ))
            .transform_id(absurd::<RootEffectId>),
        pattern_select::mapping::<S>()
            .contramap_world(RootWorld::<S>::pattern_select)
            .transform_optional_state(OptionalLens::new(pattern_select_of, set_pattern_select))
            .transform_input(Prism::new(
                |input| match input {
                    RootInput::PatternSelect(picker) => Ok(picker),
                    other => Err(other),
                },
                RootInput::PatternSelect,
            ))
            .transform_id(absurd::<RootEffectId>),
    ])
}

fn game_mapping<S: FileScheduler>() -> Mapping<RootInput, RootState, RootWorld<S>, RootEffectId> {
    game::mapping()
        .contramap_world(RootWorld::<S>::game)
        .transform_state(Lens::new(game_of, set_game))
        .transform_input(Prism::new(
            |input| match input {
                RootInput::Game(game) => Ok(game),
                other => Err(other),
            },
            RootInput::Game,
        ))
        .transform_id(RootEffectId::Game)
}

fn game_of(state: &RootState) -> &GameState {
    &state.game
}

fn set_game(state: &mut RootState, game: GameState) {
    state.game = game;
}

fn favorite_of(state: &RootState) -> &FavoriteState {
    &state.favorite
}

fn set_favorite(state: &mut RootState, favorite: FavoriteState) {
    state.favorite = favorite;
}

fn pattern_select_of(state: &RootState) -> Option<&PatternSelectState> {
    state.pattern_select.as_ref()
}

fn set_pattern_select(state: &mut RootState, picker: PatternSelectState) {
    state.pattern_select = Some(picker);
}

/// Root-level overrides, tried before any child. Picker inputs are only
/// intercepted while the picker is shown.
pub fn update<S: FileScheduler>(
    input: RootInput,
    mut state: RootState,
    world: &RootWorld<S>,
) -> Transition<RootState, RootInput, RootEffectId> {
    let effect = match input {
        RootInput::PresentPatternSelect => {
            state.pattern_select = Some(PatternSelectState::new(state.favorite.clone()));
            Effect::none()
        }
        RootInput::DismissPatternSelect => {
            state.pattern_select = None;
            Effect::none()
        }
        // A parse that lands after the picker was dismissed is stale.
        RootInput::PatternSelect(PatternSelectInput::DidParsePatternFile(pattern))
            if state.pattern_select.is_some() =>
        {
            // The picker closes and the parsed pattern is applied to the
            // current game state within this same transition, so the swap and
            // its effect land together with the dismissal.
            state.pattern_select = None;
            match pattern {
                Some(pattern) => {
                    let (game, effect) = apply_game_input(
                        GameInput::UpdatePattern(pattern),
                        state.game,
                        world,
                    );
                    state.game = game;
                    effect
                }
                // TODO: surface parse failures to the user; for now the picker
                // just closes and the current pattern stays.
                None => Effect::none(),
            }
        }
        RootInput::PatternSelect(PatternSelectInput::Favorite(
            input @ (FavoriteInput::AddFavorite(_) | FavoriteInput::RemoveFavorite(_)),
        )) if state.pattern_select.is_some() => {
            // Favorites toggled in the picker belong to the root; the picker
            // only shows a copy.
            let (favorite, effect) =
                favorite::update(input, state.favorite, &world.favorite()).into_parts();
            state.favorite = favorite;
            if let Some(picker) = state.pattern_select.as_mut() {
                picker.favorite = state.favorite.clone();
            }
            effect
                .unwrap_or_default()
                .map_input(RootInput::Favorite)
                .map_id(absurd)
        }
        _ => return Transition::Unhandled(state),
    };

    Transition::handled(state, effect)
}

/// Runs one game input against `game`. An unhandled input leaves the game
/// state as it was.
fn apply_game_input<S: FileScheduler>(
    input: GameInput,
    game: GameState,
    world: &RootWorld<S>,
) -> (GameState, Effect<RootInput, RootEffectId>) {
    let (game, effect) = game::update(input, game, &world.game()).into_parts();
    let effect = effect
        .unwrap_or_default()
        .map_input(RootInput::Game)
        .map_id(RootEffectId::Game);
    (game, effect)
}
