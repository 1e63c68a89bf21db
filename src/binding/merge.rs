//! Props merge policy.

use crate::binding::selectors::{DispatchSelector, StateSelector};
use crate::props::{Dispatch, Props};

/// Combine owner props with state- and dispatch-derived props.
///
/// Layers, lowest precedence first: `own`, then `map_state(state, merged)`,
/// then `map_dispatch(dispatch, merged)`. Each selector sees the props
/// merged so far, not the original `own`.
pub fn merge_props<S>(
    own: &Props,
    state: &S,
    dispatch: &Dispatch,
    map_state: &StateSelector<S>,
    map_dispatch: &DispatchSelector,
) -> Props {
    let mut merged = own.clone();

    let state_props = map_state.select(state, &merged);
    merged.overlay(state_props);

    let dispatch_props = map_dispatch.select(dispatch, &merged);
    merged.overlay(dispatch_props);

    merged
}
