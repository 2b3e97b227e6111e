use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::ops::Add;

use futures_util::future;
use futures_util::stream::{self, BoxStream, Stream, StreamExt};

/// How tasks sharing a named queue run relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlattenStrategy {
    /// Every task runs independently.
    Merge,
    /// Starting a task cancels the one previously started on the same queue.
    Latest,
    /// Tasks run one after another, in the order they were issued.
    Concat,
}

/// Queue tag carried by every task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EffectQueue {
    /// Unconstrained: the task runs independently of all others.
    #[default]
    Default,
    Named {
        name: &'static str,
        strategy: FlattenStrategy,
    },
}

impl EffectQueue {
    pub const fn named(name: &'static str, strategy: FlattenStrategy) -> Self {
        Self::Named { name, strategy }
    }

    pub fn strategy(&self) -> FlattenStrategy {
        match self {
            Self::Default => FlattenStrategy::Merge,
            Self::Named { strategy, .. } => *strategy,
        }
    }
}

/// One unit of deferred work. Nothing runs until a scheduler polls `body`.
///
/// A one-shot task yields at most one input; a recurring one (the game timer)
/// keeps yielding until it is cancelled through its `id`.
pub struct Task<I, Id> {
    pub queue: EffectQueue,
    pub id: Option<Id>,
    pub body: BoxStream<'static, I>,
}

/// Side effects returned by a transition, executed later by a scheduler.
///
/// Effects form a monoid under [`Effect::merge`] (also `+`) with
/// [`Effect::none`] as identity. Cancellations are applied before the tasks of
/// the same effect start.
pub struct Effect<I, Id> {
    cancellations: Vec<Id>,
    tasks: Vec<Task<I, Id>>,
}

impl<I, Id> Effect<I, Id> {
    pub fn none() -> Self {
        Self {
            cancellations: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Effect that aborts every in-flight task registered under `id`.
    pub fn cancel(id: Id) -> Self {
        Self {
            cancellations: vec![id],
            tasks: Vec::new(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.cancellations.is_empty() && self.tasks.is_empty()
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.cancellations.extend(other.cancellations);
        self.tasks.extend(other.tasks);
        self
    }

    pub fn cancellations(&self) -> &[Id] {
        &self.cancellations
    }

    pub fn tasks(&self) -> &[Task<I, Id>] {
        &self.tasks
    }

    pub fn into_parts(self) -> (Vec<Id>, Vec<Task<I, Id>>) {
        (self.cancellations, self.tasks)
    }

    /// Registers every task of this effect under `id`.
    pub fn with_id(mut self, id: Id) -> Self
    where
        Id: Clone,
    {
        for task in &mut self.tasks {
            task.id = Some(id.clone());
        }
        self
    }

    pub fn on_queue(mut self, queue: EffectQueue) -> Self {
        for task in &mut self.tasks {
            task.queue = queue;
        }
        self
    }

    pub fn map_id<Id2>(self, f: impl Fn(Id) -> Id2) -> Effect<I, Id2> {
        Effect {
            cancellations: self.cancellations.into_iter().map(&f).collect(),
            tasks: self
                .tasks
                .into_iter()
                .map(|task| Task {
                    queue: task.queue,
                    id: task.id.map(&f),
                    body: task.body,
                })
                .collect(),
        }
    }
}

impl<I: Send + 'static, Id> Effect<I, Id> {
    pub fn from_stream(body: impl Stream<Item = I> + Send + 'static) -> Self {
        Self {
            cancellations: Vec::new(),
            tasks: vec![Task {
                queue: EffectQueue::Default,
                id: None,
                body: body.boxed(),
            }],
        }
    }

    /// One-shot effect; a `None` output delivers nothing.
    pub fn from_future(body: impl Future<Output = Option<I>> + Send + 'static) -> Self {
        Self::from_stream(stream::once(body).filter_map(future::ready))
    }

    /// Feeds `input` straight back into the machine.
    pub fn just(input: I) -> Self {
        Self::from_stream(stream::once(future::ready(input)))
    }

    /// Re-wraps every input the tasks produce, e.g. into a parent input case.
    pub fn map_input<J: Send + 'static>(
        self,
        f: impl Fn(I) -> J + Clone + Send + Sync + 'static,
    ) -> Effect<J, Id> {
        Effect {
            cancellations: self.cancellations,
            tasks: self
                .tasks
                .into_iter()
                .map(|task| Task {
                    queue: task.queue,
                    id: task.id,
                    body: task.body.map(f.clone()).boxed(),
                })
                .collect(),
        }
    }
}

/// Id mapping for machines whose effects are never cancelled.
pub fn absurd<T>(never: Infallible) -> T {
    match never {}
}

impl<I, Id> Default for Effect<I, Id> {
    fn default() -> Self {
        Self::none()
    }
}

impl<I, Id> Add for Effect<I, Id> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.merge(other)
    }
}

impl<I, Id: fmt::Debug> fmt::Debug for Task<I, Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("queue", &self.queue)
            .field("id", &self.id)
            .field("body", &"<stream>")
            .finish()
    }
}

impl<I, Id: fmt::Debug> fmt::Debug for Effect<I, Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("cancellations", &self.cancellations)
            .field("tasks", &self.tasks)
            .finish()
    }
}
