//! Dependency-injection seams. Every machine receives its I/O through a world
//! value built from these traits; nothing in the core touches the filesystem
//! or a clock directly.

use std::fmt::Display;
use std::io;
use std::path::Path;
use std::time::Duration;

use engine_logging::engine_warn;
use futures_util::future::{self, BoxFuture};
use futures_util::stream::BoxStream;
use thiserror::Error;

use crate::pattern_select::Section;
use crate::{Effect, Pattern, PatternError};

/// Background execution context for blocking work such as file I/O.
pub trait FileScheduler: Clone + Send + Sync + 'static {
    /// Runs `job` off the dispatch path. Resolves to `None` if the job could
    /// not run to completion (for instance, it panicked).
    fn schedule<T, F>(&self, job: F) -> BoxFuture<'static, Option<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static;
}

/// Runs the job on whichever thread polls the effect. Suits tests and
/// single-threaded drivers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl FileScheduler for ImmediateScheduler {
    fn schedule<T, F>(&self, job: F) -> BoxFuture<'static, Option<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        Box::pin(future::lazy(move |_| Some(job())))
    }
}

/// Source of periodic ticks for the simulation loop.
pub trait Timer: Send + Sync {
    fn ticks(&self, interval: Duration) -> BoxStream<'static, ()>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("favorites store io error: {0}")]
    Io(#[from] io::Error),
    #[error("favorites store is malformed: {0}")]
    Malformed(String),
}

/// Persisted favorite pattern names, most recent first.
pub trait FavoritesStore: Send + Sync {
    /// Returns the default name list when nothing has been persisted yet.
    /// Unreadable or undecodable data is an error, never an empty list.
    fn load(&self) -> Result<Vec<String>, StoreError>;

    /// Overwrites the persisted list.
    fn save(&self, names: &[String]) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("pattern catalog io error: {0}")]
    Io(#[from] io::Error),
    #[error("pattern file is invalid: {0}")]
    Pattern(#[from] PatternError),
}

/// Enumerates and parses bundled pattern files.
pub trait PatternCatalog: Send + Sync {
    /// Groups sorted by title, each with rows sorted by title.
    fn enumerate(&self) -> Result<Vec<Section>, CatalogError>;

    fn parse(&self, locator: &Path) -> Result<Pattern, CatalogError>;
}

/// Builds a one-shot effect that runs `run` on `scheduler` and feeds its
/// outcome to `inject`. Failures are logged and arrive as `None`.
pub fn blocking_effect<S, T, E, I, Id>(
    scheduler: &S,
    what: &'static str,
    run: impl FnOnce() -> Result<T, E> + Send + 'static,
    inject: impl FnOnce(Option<T>) -> I + Send + 'static,
) -> Effect<I, Id>
where
    S: FileScheduler,
    T: Send + 'static,
    E: Display + Send + 'static,
    I: Send + 'static,
{
    let job = scheduler.schedule(run);
    Effect::from_future(async move {
        let value = match job.await {
            Some(Ok(value)) => Some(value),
            Some(Err(err)) => {
                engine_warn!("{} failed: {}", what, err);
                None
            }
            None => {
                engine_warn!("{} did not complete", what);
                None
            }
        };
        Some(inject(value))
    })
}
