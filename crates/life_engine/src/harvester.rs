use std::fmt::Debug;
use std::hash::Hash;
use std::mem;

use engine_logging::engine_trace;
use life_core::{Mapping, Transition};
use tokio::runtime::Handle;

use crate::scheduler::{Deliveries, EffectScheduler, InputSender};

/// Runs a state machine: owns its state, applies one input at a time and
/// sends the resulting effects to the scheduler.
///
/// Only `dispatch` writes the state, and it takes `&mut self`, so inputs are
/// applied strictly one after another in the order they are handed over.
pub struct Harvester<I, S, W, Id> {
    mapping: Mapping<I, S, W, Id>,
    state: S,
    world: W,
    scheduler: EffectScheduler<I, Id>,
    deliveries: Deliveries<I>,
}

impl<I, S, W, Id> Harvester<I, S, W, Id>
where
    I: Debug + Send + 'static,
    S: Default + 'static,
    W: 'static,
    Id: Eq + Hash + Debug + 'static,
{
    pub fn new(mapping: Mapping<I, S, W, Id>, state: S, world: W, handle: Handle) -> Self {
        let (scheduler, deliveries) = EffectScheduler::new(handle);
        Self {
            mapping,
            state,
            world,
            scheduler,
            deliveries,
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn scheduler(&mut self) -> &mut EffectScheduler<I, Id> {
        &mut self.scheduler
    }

    /// Handle for feeding inputs from other threads; they are applied by
    /// [`Harvester::process_next`] in arrival order.
    pub fn sender(&self) -> InputSender<I> {
        self.scheduler.sender()
    }

    /// Applies `input` and starts its effect. Returns whether any machine
    /// handled it.
    pub fn dispatch(&mut self, input: I) -> bool {
        engine_trace!("dispatch {:?}", input);
        let state = mem::take(&mut self.state);
        match self.mapping.run(input, state, &self.world) {
            Transition::Unhandled(state) => {
                self.state = state;
                engine_trace!("input was not handled");
                false
            }
            Transition::Handled(state) => {
                self.state = state;
                true
            }
            Transition::HandledWithEffect(state, effect) => {
                self.state = state;
                self.scheduler.run(effect);
                true
            }
        }
    }

    /// Applies every input already delivered, without waiting. Returns how
    /// many were applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(input) = self.deliveries.try_recv() {
            self.dispatch(input);
            applied += 1;
        }
        applied
    }

    /// Waits for the next delivered input and applies it. Returns `false`
    /// only if the delivery channel has closed.
    pub async fn process_next(&mut self) -> bool {
        match self.deliveries.recv().await {
            Some(input) => {
                self.dispatch(input);
                true
            }
            None => false,
        }
    }
}
