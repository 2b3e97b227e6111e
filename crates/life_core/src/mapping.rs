use std::sync::Arc;

use crate::{Lens, OptionalLens, Prism, Transition};

type TransitionFn<I, S, W, Id> = dyn Fn(I, S, &W) -> Transition<S, I, Id> + Send + Sync;

/// A transition function `Input × State × World → Transition` as a value.
///
/// Mappings are built per machine and then lifted into the root through
/// [`Mapping::transform_state`], [`Mapping::transform_input`],
/// [`Mapping::contramap_world`] and [`Mapping::transform_id`], and finally
/// combined with [`Mapping::reduce`].
pub struct Mapping<I, S, W, Id> {
    run: Arc<TransitionFn<I, S, W, Id>>,
}

impl<I, S, W, Id> Clone for Mapping<I, S, W, Id> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<I, S, W, Id> Mapping<I, S, W, Id>
where
    I: 'static,
    S: 'static,
    W: 'static,
    Id: 'static,
{
    pub fn new(run: impl Fn(I, S, &W) -> Transition<S, I, Id> + Send + Sync + 'static) -> Self {
        Self { run: Arc::new(run) }
    }

    pub fn run(&self, input: I, state: S, world: &W) -> Transition<S, I, Id> {
        (self.run)(input, state, world)
    }

    /// Narrows the world a parent passes in down to the one this mapping needs.
    pub fn contramap_world<W2: 'static>(
        self,
        narrow: impl Fn(&W2) -> W + Send + Sync + 'static,
    ) -> Mapping<I, S, W2, Id> {
        Mapping::new(move |input, state, world: &W2| self.run(input, state, &narrow(world)))
    }

    /// Lifts onto a parent state through a field that always exists.
    pub fn transform_state<S2: 'static>(self, lens: Lens<S2, S>) -> Mapping<I, S2, W, Id>
    where
        S: Clone,
    {
        Mapping::new(move |input, whole: S2, world: &W| {
            let part = lens.get(&whole).clone();
            match self.run(input, part, world) {
                Transition::Unhandled(_) => Transition::Unhandled(whole),
                handled => handled.map_state(|part| lens.set(whole, part)),
            }
        })
    }

    /// Lifts onto a parent state through a field that may be absent; an absent
    /// field makes every input unhandled.
    pub fn transform_optional_state<S2: 'static>(
        self,
        lens: OptionalLens<S2, S>,
    ) -> Mapping<I, S2, W, Id>
    where
        S: Clone,
    {
        Mapping::new(move |input, whole: S2, world: &W| {
            let Some(part) = lens.get(&whole).cloned() else {
                return Transition::Unhandled(whole);
            };
            match self.run(input, part, world) {
                Transition::Unhandled(_) => Transition::Unhandled(whole),
                handled => handled.map_state(|part| lens.set(whole, part)),
            }
        })
    }

    /// Lifts onto a parent input: only the `prism` case reaches this mapping,
    /// and inputs its effects produce are wrapped back into that case.
    pub fn transform_input<I2>(self, prism: Prism<I2, I>) -> Mapping<I2, S, W, Id>
    where
        I: Send,
        I2: Send + 'static,
    {
        Mapping::new(move |input: I2, state, world: &W| match prism.extract(input) {
            Ok(input) => self
                .run(input, state, world)
                .map_effect(|effect| effect.map_input(prism.embedder())),
            Err(_) => Transition::Unhandled(state),
        })
    }

    /// Re-tags the cancellation ids of every effect this mapping emits.
    pub fn transform_id<Id2: 'static>(
        self,
        wrap: impl Fn(Id) -> Id2 + Send + Sync + 'static,
    ) -> Mapping<I, S, W, Id2> {
        Mapping::new(move |input, state, world: &W| {
            self.run(input, state, world)
                .map_effect(|effect| effect.map_id(&wrap))
        })
    }

    /// Tries `mappings` in order against the same input and state; the first
    /// one that handles the input wins and the rest are skipped.
    ///
    /// Put a parent's own override first: it sees every input before the
    /// children and falls through to them by returning `Unhandled`.
    pub fn reduce(mappings: Vec<Mapping<I, S, W, Id>>) -> Self
    where
        I: Clone,
    {
        Mapping::new(move |input: I, state: S, world: &W| {
            let mut state = state;
            for mapping in &mappings {
                match mapping.run(input.clone(), state, world) {
                    Transition::Unhandled(unchanged) => state = unchanged,
                    handled => return handled,
                }
            }
            Transition::Unhandled(state)
        })
    }
}
