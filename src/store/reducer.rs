//! Reducer trait for the reference store.

use crate::props::Action;

/// Reducer transforms state based on actions.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Action) -> State
pub trait Reducer: Send + Sync + 'static {
    /// The state type this reducer operates on.
    type State: Send + Sync + 'static;

    /// Process an action and return the new state.
    ///
    /// Actions the reducer does not recognize should return `state` unchanged.
    fn reduce(state: &Self::State, action: &Action) -> Self::State;
}
