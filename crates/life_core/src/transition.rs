use crate::Effect;

/// Result of applying one input to a state.
///
/// `Unhandled` hands the state back untouched so a composed parent can offer
/// the same input to its next child.
#[derive(Debug)]
pub enum Transition<S, I, Id> {
    Unhandled(S),
    Handled(S),
    HandledWithEffect(S, Effect<I, Id>),
}

impl<S, I, Id> Transition<S, I, Id> {
    /// Handled result; collapses to `Handled` when `effect` is empty.
    pub fn handled(state: S, effect: Effect<I, Id>) -> Self {
        if effect.is_none() {
            Self::Handled(state)
        } else {
            Self::HandledWithEffect(state, effect)
        }
    }

    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Unhandled(_))
    }

    pub fn state(&self) -> &S {
        match self {
            Self::Unhandled(state) | Self::Handled(state) | Self::HandledWithEffect(state, _) => {
                state
            }
        }
    }

    pub fn into_state(self) -> S {
        match self {
            Self::Unhandled(state) | Self::Handled(state) | Self::HandledWithEffect(state, _) => {
                state
            }
        }
    }

    /// `None` when unhandled, otherwise the new state and its (maybe empty) effect.
    pub fn into_handled(self) -> Option<(S, Effect<I, Id>)> {
        match self {
            Self::Unhandled(_) => None,
            Self::Handled(state) => Some((state, Effect::none())),
            Self::HandledWithEffect(state, effect) => Some((state, effect)),
        }
    }

    /// Splits into the state and the effect, with `None` meaning unhandled.
    pub fn into_parts(self) -> (S, Option<Effect<I, Id>>) {
        match self {
            Self::Unhandled(state) => (state, None),
            Self::Handled(state) => (state, Some(Effect::none())),
            Self::HandledWithEffect(state, effect) => (state, Some(effect)),
        }
    }

    pub(crate) fn map_state<S2>(self, f: impl FnOnce(S) -> S2) -> Transition<S2, I, Id> {
        match self {
            Self::Unhandled(state) => Transition::Unhandled(f(state)),
            Self::Handled(state) => Transition::Handled(f(state)),
            Self::HandledWithEffect(state, effect) => Transition::HandledWithEffect(f(state), effect),
        }
    }

    pub(crate) fn map_effect<I2, Id2>(
        self,
        f: impl FnOnce(Effect<I, Id>) -> Effect<I2, Id2>,
    ) -> Transition<S, I2, Id2> {
        match self {
            Self::Unhandled(state) => Transition::Unhandled(state),
            Self::Handled(state) => Transition::Handled(state),
            Self::HandledWithEffect(state, effect) => Transition::HandledWithEffect(state, f(effect)),
        }
    }
}
