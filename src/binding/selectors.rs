//! State and dispatch selectors.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::props::{Action, Callback, Dispatch, Props, DISPATCH_PROP};

/// Derives props from store state and the props merged so far.
pub struct StateSelector<S> {
    inner: Arc<dyn Fn(&S, &Props) -> Props + Send + Sync>,
}

impl<S> StateSelector<S> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&S, &Props) -> Props + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Selector contributing no props.
    pub fn empty() -> Self {
        Self::new(|_, _| Props::new())
    }

    pub fn select(&self, state: &S, props: &Props) -> Props {
        (self.inner)(state, props)
    }
}

impl<S> Clone for StateSelector<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Default for StateSelector<S> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S> fmt::Debug for StateSelector<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateSelector")
    }
}

/// Derives props from the store's dispatcher and the props merged so far.
#[derive(Clone)]
pub struct DispatchSelector {
    inner: Arc<dyn Fn(&Dispatch, &Props) -> Props + Send + Sync>,
}

impl DispatchSelector {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Dispatch, &Props) -> Props + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Default selector: exposes the raw dispatcher as the `dispatch` prop.
    pub fn raw_dispatch() -> Self {
        Self::new(|dispatch, _| Props::new().with(DISPATCH_PROP, dispatch.clone()))
    }

    pub fn select(&self, dispatch: &Dispatch, props: &Props) -> Props {
        (self.inner)(dispatch, props)
    }
}

impl Default for DispatchSelector {
    fn default() -> Self {
        Self::raw_dispatch()
    }
}

impl fmt::Debug for DispatchSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DispatchSelector")
    }
}

/// Builds an action from positional arguments.
pub type ActionCreator = Arc<dyn Fn(&[Value]) -> Action + Send + Sync>;

/// Named action creators to be bound to a store's dispatcher.
#[derive(Clone, Default)]
pub struct ActionCreators {
    creators: BTreeMap<String, ActionCreator>,
}

impl ActionCreators {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F>(mut self, name: impl Into<String>, creator: F) -> Self
    where
        F: Fn(&[Value]) -> Action + Send + Sync + 'static,
    {
        self.creators.insert(name.into(), Arc::new(creator));
        self
    }

    pub fn len(&self) -> usize {
        self.creators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creators.is_empty()
    }

    /// One callback prop per creator. Invoking it dispatches the creator's
    /// return value, passing the callback's arguments through.
    pub fn bind(&self, dispatch: &Dispatch) -> Props {
        self.creators
            .iter()
            .map(|(name, creator)| {
                let creator = Arc::clone(creator);
                let dispatch = dispatch.clone();
                let bound = Callback::new(move |args| dispatch.call(creator(args)));
                (name.clone(), bound)
            })
            .collect()
    }
}

impl fmt::Debug for ActionCreators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.creators.keys()).finish()
    }
}

/// How a connected component derives its dispatch props.
#[derive(Clone, Debug)]
pub enum MapDispatch {
    /// A selector over `(dispatch, props)`.
    Selector(DispatchSelector),
    /// Action creators, bound to the dispatcher on every render.
    ActionCreators(ActionCreators),
}

impl MapDispatch {
    /// Resolve either configuration into a uniform selector.
    pub fn into_selector(self) -> DispatchSelector {
        match self {
            MapDispatch::Selector(selector) => selector,
            MapDispatch::ActionCreators(creators) => {
                DispatchSelector::new(move |dispatch, _| creators.bind(dispatch))
            }
        }
    }
}

impl From<DispatchSelector> for MapDispatch {
    fn from(selector: DispatchSelector) -> Self {
        MapDispatch::Selector(selector)
    }
}

impl From<ActionCreators> for MapDispatch {
    fn from(creators: ActionCreators) -> Self {
        MapDispatch::ActionCreators(creators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    fn recording_dispatch() -> (Dispatch, Arc<Mutex<Vec<Action>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        (Dispatch::new(move |action| sink.lock().push(action)), log)
    }

    #[test]
    fn test_raw_dispatch_exposes_same_dispatcher() {
        let (dispatch, _) = recording_dispatch();
        let props = DispatchSelector::raw_dispatch().select(&dispatch, &Props::new());

        assert_eq!(props.len(), 1);
        assert!(props.dispatch().unwrap().ptr_eq(&dispatch));
    }

    #[test]
    fn test_bound_creator_dispatches_its_result_once() {
        let (dispatch, log) = recording_dispatch();
        let creators = ActionCreators::new()
            .with("add", |args| json!({"type": "add", "amount": args[0]}));
        let props = MapDispatch::from(creators)
            .into_selector()
            .select(&dispatch, &Props::new());

        props.callback("add").unwrap().invoke(&[json!(5)]);
        assert_eq!(*log.lock(), vec![json!({"type": "add", "amount": 5})]);
    }

    #[test]
    fn test_selector_variant_passes_through() {
        let (dispatch, _) = recording_dispatch();
        let selector = DispatchSelector::new(|_, props| {
            Props::new().with("seen", props.len() as i64)
        });
        let props = MapDispatch::Selector(selector)
            .into_selector()
            .select(&dispatch, &Props::new().with("a", 1).with("b", 2));

        assert_eq!(props.value("seen"), Some(&json!(2)));
    }

    #[test]
    fn test_empty_state_selector() {
        let selector = StateSelector::<i64>::default();
        assert!(selector.select(&3, &Props::new().with("a", 1)).is_empty());
    }
}
