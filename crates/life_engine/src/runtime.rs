//! Tokio-backed implementations of the core's scheduling seams.

use std::time::Duration;

use engine_logging::engine_warn;
use futures_util::future::BoxFuture;
use futures_util::stream::{self, BoxStream, StreamExt};
use life_core::{FileScheduler, Timer};
use tokio::runtime::Handle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Runs file jobs on the runtime's blocking pool. Nothing is spawned until
/// the returned future is first polled.
#[derive(Debug, Clone)]
pub struct TokioFileScheduler {
    handle: Handle,
}

impl TokioFileScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }
}

impl FileScheduler for TokioFileScheduler {
    fn schedule<T, F>(&self, job: F) -> BoxFuture<'static, Option<T>>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = self.handle.clone();
        Box::pin(async move {
            match handle.spawn_blocking(job).await {
                Ok(value) => Some(value),
                Err(err) => {
                    engine_warn!("file job did not complete: {}", err);
                    None
                }
            }
        })
    }
}

/// Ticks on the tokio clock. The first tick arrives one interval after the
/// stream is first polled; late ticks are delayed rather than bunched up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl TokioTimer {
    const MIN_INTERVAL: Duration = Duration::from_millis(1);
}

impl Timer for TokioTimer {
    fn ticks(&self, interval: Duration) -> BoxStream<'static, ()> {
        let period = interval.max(Self::MIN_INTERVAL);
        stream::unfold(None, move |interval: Option<Interval>| async move {
            let mut interval = interval.unwrap_or_else(|| {
                let mut interval = time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                interval
            });
            interval.tick().await;
            Some(((), Some(interval)))
        })
        .boxed()
    }
}
