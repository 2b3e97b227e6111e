//! Pattern picker: catalog loading, search and favorite toggling.

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use crate::favorite::{self, FavoriteInput, FavoriteState, FavoriteWorld};
use crate::world::blocking_effect;
use crate::{
    Effect, FavoritesStore, FileScheduler, Lens, Mapping, Pattern, PatternCatalog, Prism,
    Transition,
};

/// Title of the synthetic section listing favorited rows.
pub const FAVORITES_SECTION_TITLE: &str = "Favorites";

#[derive(Debug, Clone, PartialEq)]
pub enum PatternSelectInput {
    LoadPatternFiles,
    DidLoadPatternFiles(Vec<Section>),
    DidSelectPattern(PathBuf),
    /// `None` when the file could not be read or parsed.
    DidParsePatternFile(Option<Pattern>),
    UpdateSearchText(String),
    Favorite(FavoriteInput),
}

/// Named group of catalog rows. `F` is `()` as loaded and `bool`
/// (is-favorite) once decorated for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<F = ()> {
    pub title: String,
    pub rows: Vec<Row<F>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<F = ()> {
    pub title: String,
    pub locator: PathBuf,
    pub is_favorite: F,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Loading,
    Loaded(Vec<Section>),
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading)
    }

    pub fn loaded(&self) -> Option<&[Section]> {
        match self {
            Status::Loading => None,
            Status::Loaded(sections) => Some(sections),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PatternSelectState {
    pub status: Status,
    pub search_text: String,
    pub favorite: FavoriteState,
}

impl PatternSelectState {
    pub fn new(favorite: FavoriteState) -> Self {
        Self {
            favorite,
            ..Self::default()
        }
    }

    /// Sections for display: empty groups dropped, rows filtered by a
    /// case-insensitive match on the search text, and a leading
    /// [`FAVORITES_SECTION_TITLE`] section holding every favorited row that
    /// survived the filter.
    pub fn filtered_sections(&self) -> Vec<Section<bool>> {
        let needle = self.search_text.to_lowercase();
        let mut sections: Vec<Section<bool>> = self
            .status
            .loaded()
            .unwrap_or_default()
            .iter()
            .filter(|section| !section.rows.is_empty())
            .map(|section| Section {
                title: section.title.clone(),
                rows: section
                    .rows
                    .iter()
                    .filter(|row| needle.is_empty() || row.title.to_lowercase().contains(&needle))
                    .map(|row| Row {
                        title: row.title.clone(),
                        locator: row.locator.clone(),
                        is_favorite: self.favorite.contains(&row.title),
                    })
                    .collect(),
            })
            .collect();

        let favorites = sections
            .iter()
            .flat_map(|section| section.rows.iter())
            .filter(|row| row.is_favorite)
            .cloned()
            .collect();
        sections.insert(
            0,
            Section {
                title: FAVORITES_SECTION_TITLE.to_string(),
                rows: favorites,
            },
        );
        sections
    }
}

pub struct PatternSelectWorld<S> {
    pub catalog: Arc<dyn PatternCatalog>,
    pub favorites: Arc<dyn FavoritesStore>,
    pub file_scheduler: S,
}

impl<S: Clone> Clone for PatternSelectWorld<S> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            favorites: Arc::clone(&self.favorites),
            file_scheduler: self.file_scheduler.clone(),
        }
    }
}

pub fn mapping<S: FileScheduler>(
) -> Mapping<PatternSelectInput, PatternSelectState, PatternSelectWorld<S>, Infallible> {
    Mapping::reduce(vec![
        Mapping::new(update::<S>),
        favorite::mapping::<S>()
            .contramap_world(|world: &PatternSelectWorld<S>| FavoriteWorld {
                store: Arc::clone(&world.favorites),
                file_scheduler: world.file_scheduler.clone(),
            })
            .transform_state(favorite_lens())
            .transform_input(favorite_prism()),
    ])
}

/// Picker-local transitions. Favorite inputs fall through to the embedded
/// favorite machine; parsed patterns are left for the parent to apply.
pub fn update<S: FileScheduler>(
    input: PatternSelectInput,
    mut state: PatternSelectState,
    world: &PatternSelectWorld<S>,
) -> Transition<PatternSelectState, PatternSelectInput, Infallible> {
    let effect = match input {
        PatternSelectInput::LoadPatternFiles => {
            let catalog = Arc::clone(&world.catalog);
            blocking_effect(
                &world.file_scheduler,
                "loading pattern catalog",
                move || catalog.enumerate(),
                |sections| PatternSelectInput::DidLoadPatternFiles(sections.unwrap_or_default()),
            )
        }
        PatternSelectInput::DidLoadPatternFiles(sections) => {
            state.status = Status::Loaded(sections);
            Effect::none()
        }
        PatternSelectInput::DidSelectPattern(locator) => {
            state.status = Status::Loading;
            let catalog = Arc::clone(&world.catalog);
            blocking_effect(
                &world.file_scheduler,
                "parsing pattern file",
                move || catalog.parse(&locator),
                PatternSelectInput::DidParsePatternFile,
            )
        }
        PatternSelectInput::UpdateSearchText(text) => {
            state.search_text = text;
            Effect::none()
        }
        PatternSelectInput::DidParsePatternFile(_) | PatternSelectInput::Favorite(_) => {
            return Transition::Unhandled(state);
        }
    };

    Transition::handled(state, effect)
}

fn favorite_lens() -> Lens<PatternSelectState, FavoriteState> {
    fn get(state: &PatternSelectState) -> &FavoriteState {
        &state.favorite
    }
    fn set(state: &mut PatternSelectState, favorite: FavoriteState) {
        state.favorite = favorite;
    }
    Lens::new(get, set)
}

fn favorite_prism() -> Prism<PatternSelectInput, FavoriteInput> {
    Prism::new(
        |input| match input {
            PatternSelectInput::Favorite(favorite) => Ok(favorite),
            other => Err(other),
        },
        PatternSelectInput::Favorite,
    )
}
