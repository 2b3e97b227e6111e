//! Effect queue scheduler: runs effect tasks on a tokio runtime, tracks them
//! by cancellation id and queue, and hands their inputs back through a
//! channel.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use engine_logging::{engine_debug, engine_trace};
use futures_util::StreamExt;
use life_core::{Effect, EffectQueue, FlattenStrategy, Task};
use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

/// An input produced by a task, still tagged with that task's token.
///
/// The token is checked again when the input is taken out of the channel, so
/// an input that was already queued when its task got cancelled is dropped.
pub struct Delivery<I> {
    input: I,
    token: Option<CancellationToken>,
}

impl<I> Delivery<I> {
    /// Input from outside any task; never cancelled.
    pub fn external(input: I) -> Self {
        Self { input, token: None }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// The input, unless its task was cancelled in the meantime.
    pub fn into_input(self) -> Option<I> {
        if self.is_cancelled() {
            None
        } else {
            Some(self.input)
        }
    }
}

/// Receiving end of the delivery channel.
pub struct Deliveries<I> {
    rx: mpsc::UnboundedReceiver<Delivery<I>>,
}

impl<I> Deliveries<I> {
    /// Waits for the next input of a live task. `None` once every sender,
    /// the scheduler included, is gone.
    pub async fn recv(&mut self) -> Option<I> {
        while let Some(delivery) = self.rx.recv().await {
            if let Some(input) = delivery.into_input() {
                return Some(input);
            }
            engine_trace!("dropped input of a cancelled task");
        }
        None
    }

    /// Next input already waiting, without blocking.
    pub fn try_recv(&mut self) -> Option<I> {
        while let Ok(delivery) = self.rx.try_recv() {
            if let Some(input) = delivery.into_input() {
                return Some(input);
            }
            engine_trace!("dropped input of a cancelled task");
        }
        None
    }
}

/// Feeds inputs from outside the runtime, e.g. a UI thread.
pub struct InputSender<I> {
    tx: mpsc::UnboundedSender<Delivery<I>>,
}

impl<I> Clone for InputSender<I> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<I> InputSender<I> {
    /// Returns `false` once the receiving side is gone.
    pub fn send(&self, input: I) -> bool {
        self.tx.send(Delivery::external(input)).is_ok()
    }
}

struct TaskHandle {
    token: CancellationToken,
    finished: Arc<AtomicBool>,
}

impl TaskHandle {
    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

pub struct EffectScheduler<I, Id> {
    handle: Handle,
    tx: mpsc::UnboundedSender<Delivery<I>>,
    /// Parent of every task token; cancelled when the scheduler is dropped.
    root: CancellationToken,
    keyed: HashMap<Id, Vec<TaskHandle>>,
    latest: HashMap<&'static str, CancellationToken>,
    /// Completion signal of the last task issued on each concat queue.
    concat_tails: HashMap<&'static str, oneshot::Receiver<()>>,
}

impl<I, Id> EffectScheduler<I, Id>
where
    I: Send + 'static,
    Id: Eq + Hash + Debug,
{
    pub fn new(handle: Handle) -> (Self, Deliveries<I>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            handle,
            tx,
            root: CancellationToken::new(),
            keyed: HashMap::new(),
            latest: HashMap::new(),
            concat_tails: HashMap::new(),
        };
        (scheduler, Deliveries { rx })
    }

    pub fn sender(&self) -> InputSender<I> {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Applies the effect's cancellations, then starts its tasks.
    pub fn run(&mut self, effect: Effect<I, Id>) {
        let (cancellations, tasks) = effect.into_parts();
        for id in &cancellations {
            self.cancel(id);
        }
        for task in tasks {
            self.spawn(task);
        }
    }

    /// Cancels every task registered under `id`. Returns how many of them
    /// were still running.
    pub fn cancel(&mut self, id: &Id) -> usize {
        let Some(handles) = self.keyed.remove(id) else {
            return 0;
        };
        let running = handles.iter().filter(|h| !h.is_finished()).count();
        for handle in handles {
            handle.token.cancel();
        }
        engine_debug!("cancelled {} running task(s) under {:?}", running, id);
        running
    }

    /// Number of tasks under `id` that have not finished yet.
    pub fn in_flight(&mut self, id: &Id) -> usize {
        match self.keyed.get_mut(id) {
            Some(handles) => {
                handles.retain(|h| !h.is_finished());
                handles.len()
            }
            None => 0,
        }
    }

    fn spawn(&mut self, task: Task<I, Id>) {
        let Task { queue, id, body } = task;
        let token = self.root.child_token();
        let finished = Arc::new(AtomicBool::new(false));

        let mut predecessor = None;
        let mut done = None;
        if let EffectQueue::Named { name, strategy } = queue {
            match strategy {
                FlattenStrategy::Merge => {}
                FlattenStrategy::Latest => {
                    if let Some(previous) = self.latest.insert(name, token.clone()) {
                        previous.cancel();
                    }
                }
                FlattenStrategy::Concat => {
                    let (tx, rx) = oneshot::channel::<()>();
                    predecessor = self.concat_tails.insert(name, rx);
                    done = Some(tx);
                }
            }
        }

        if let Some(id) = id {
            engine_trace!("starting task under {:?} on {:?}", id, queue);
            // Earlier tasks under the same id keep running until cancelled.
            let handles = self.keyed.entry(id).or_default();
            handles.retain(|h| !h.is_finished());
            handles.push(TaskHandle {
                token: token.clone(),
                finished: Arc::clone(&finished),
            });
        }

        let tx = self.tx.clone();
        self.handle.spawn(async move {
            // Dropped when this task ends, releasing the next concat task.
            let _done = done;
            if let Some(previous) = predecessor {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        finished.store(true, Ordering::Release);
                        return;
                    }
                    _ = previous => {}
                }
            }

            let mut body = body;
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    next = body.next() => match next {
                        Some(input) => {
                            let delivery = Delivery {
                                input,
                                token: Some(token.clone()),
                            };
                            if tx.send(delivery).is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                }
            }
            finished.store(true, Ordering::Release);
        });
    }
}

impl<I, Id> Drop for EffectScheduler<I, Id> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_deliveries_are_never_cancelled() {
        let delivery = Delivery::external(5);
        assert!(!delivery.is_cancelled());
        assert_eq!(delivery.into_input(), Some(5));
    }

    #[test]
    fn cancelled_deliveries_yield_nothing() {
        let token = CancellationToken::new();
        let delivery = Delivery {
            input: 5,
            token: Some(token.clone()),
        };
        token.cancel();
        assert_eq!(delivery.into_input(), None);
    }
}
