#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::stream::{self, BoxStream, StreamExt};
use life_core::pattern_select::{Row, Section};
use life_core::root::{RootState, RootWorld};
use life_core::{
    CatalogError, Effect, FavoritesStore, ImmediateScheduler, Mapping, Pattern, PatternCatalog,
    StoreError, Timer,
};

/// Timer that yields a fixed number of ticks immediately, then ends.
#[derive(Default)]
pub struct FakeTimer {
    pub ticks: usize,
    pub requested: Mutex<Vec<Duration>>,
}

impl FakeTimer {
    pub fn with_ticks(ticks: usize) -> Self {
        Self {
            ticks,
            requested: Mutex::new(Vec::new()),
        }
    }
}

impl Timer for FakeTimer {
    fn ticks(&self, interval: Duration) -> BoxStream<'static, ()> {
        self.requested.lock().unwrap().push(interval);
        stream::iter(std::iter::repeat(()).take(self.ticks)).boxed()
    }
}

/// In-memory favorites store recording every save.
#[derive(Default)]
pub struct MemoryStore {
    pub persisted: Mutex<Option<Vec<String>>>,
    pub malformed: bool,
    pub saves: Mutex<Vec<Vec<String>>>,
}

impl MemoryStore {
    pub fn with_names(names: &[&str]) -> Self {
        Self {
            persisted: Mutex::new(Some(names.iter().map(|n| n.to_string()).collect())),
            ..Self::default()
        }
    }

    pub fn malformed() -> Self {
        Self {
            malformed: true,
            ..Self::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }
}

impl FavoritesStore for MemoryStore {
    fn load(&self) -> Result<Vec<String>, StoreError> {
        if self.malformed {
            return Err(StoreError::Malformed("not a JSON array".to_string()));
        }
        Ok(self
            .persisted
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(Pattern::default_favorite_names))
    }

    fn save(&self, names: &[String]) -> Result<(), StoreError> {
        *self.persisted.lock().unwrap() = Some(names.to_vec());
        self.saves.lock().unwrap().push(names.to_vec());
        Ok(())
    }
}

/// Catalog backed by a fixed section list and a locator → pattern table.
#[derive(Default)]
pub struct FakeCatalog {
    pub sections: Vec<Section>,
    pub patterns: HashMap<PathBuf, Pattern>,
}

impl FakeCatalog {
    pub fn standard() -> Self {
        let mut patterns = HashMap::new();
        patterns.insert(PathBuf::from("Oscillators/Blinker.rle"), Pattern::blinker());
        patterns.insert(PathBuf::from("Still lifes/Block.rle"), Pattern::block());
        patterns.insert(PathBuf::from("Spaceships/Glider.rle"), Pattern::glider());
        Self {
            sections: vec![
                section("Empty", &[]),
                section("Oscillators", &["Blinker"]),
                section("Spaceships", &["Glider"]),
                section("Still lifes", &["Block"]),
            ],
            patterns,
        }
    }
}

pub fn section(title: &str, rows: &[&str]) -> Section {
    Section {
        title: title.to_string(),
        rows: rows
            .iter()
            .map(|row| Row {
                title: row.to_string(),
                locator: PathBuf::from(format!("{title}/{row}.rle")),
                is_favorite: (),
            })
            .collect(),
    }
}

impl PatternCatalog for FakeCatalog {
    fn enumerate(&self) -> Result<Vec<Section>, CatalogError> {
        Ok(self.sections.clone())
    }

    fn parse(&self, locator: &Path) -> Result<Pattern, CatalogError> {
        self.patterns
            .get(locator)
            .cloned()
            .ok_or_else(|| CatalogError::Io(io::Error::new(io::ErrorKind::NotFound, "no file")))
    }
}

pub struct Fakes {
    pub timer: Arc<FakeTimer>,
    pub store: Arc<MemoryStore>,
    pub catalog: Arc<FakeCatalog>,
}

impl Fakes {
    pub fn new(store: MemoryStore) -> Self {
        Self {
            timer: Arc::new(FakeTimer::with_ticks(0)),
            store: Arc::new(store),
            catalog: Arc::new(FakeCatalog::standard()),
        }
    }

    pub fn root_world(&self) -> RootWorld<ImmediateScheduler> {
        RootWorld {
            file_scheduler: ImmediateScheduler,
            timer: self.timer.clone(),
            favorites: self.store.clone(),
            catalog: self.catalog.clone(),
        }
    }
}

pub fn root_state() -> RootState {
    RootState::default()
}

/// Runs every task of `effect` to completion and returns the inputs produced,
/// task by task. Recurring tasks must be finite.
pub async fn drain<I: Send + 'static, Id>(effect: Effect<I, Id>) -> Vec<I> {
    let (_, tasks) = effect.into_parts();
    let mut inputs = Vec::new();
    for task in tasks {
        inputs.extend(task.body.collect::<Vec<_>>().await);
    }
    inputs
}

/// Dispatches `input` and then every input its effects feed back, in order,
/// until nothing is left. Returns the final state and every input applied.
pub async fn run_to_idle<I, S, W, Id>(
    mapping: &Mapping<I, S, W, Id>,
    mut state: S,
    world: &W,
    input: I,
) -> (S, Vec<I>)
where
    I: Clone + Send + 'static,
    S: 'static,
    W: 'static,
    Id: 'static,
{
    let mut pending = VecDeque::from([input]);
    let mut applied = Vec::new();
    while let Some(input) = pending.pop_front() {
        applied.push(input.clone());
        let (next, effect) = mapping.run(input, state, world).into_parts();
        state = next;
        if let Some(effect) = effect {
            pending.extend(drain(effect).await);
        }
    }
    (state, applied)
}
