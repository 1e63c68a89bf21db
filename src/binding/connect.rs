//! `connect`: components that receive store-derived props.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::binding::merge::merge_props;
use crate::binding::provider::STORE_CONTEXT_KEY;
use crate::binding::selectors::{ActionCreators, DispatchSelector, MapDispatch, StateSelector};
use crate::binding::subscription::Subscription;
use crate::error::Error;
use crate::host::{Component, ComponentType, Element, InstanceId, NodeRef, Scope};
use crate::props::{Dispatch, Props};
use crate::store::StoreHandle;

/// Wrap `component` so each instance receives merged props and re-renders
/// when the store notifies.
///
/// `map_state` defaults to contributing nothing; `map_dispatch` defaults to
/// exposing the store's dispatcher as the `dispatch` prop.
pub fn connect<S>(
    component: &ComponentType,
    map_state: Option<StateSelector<S>>,
    map_dispatch: Option<MapDispatch>,
) -> ComponentType
where
    S: Send + Sync + 'static,
{
    let mut builder = Connect::new(component);
    builder.map_state = map_state.unwrap_or_default();
    if let Some(map_dispatch) = map_dispatch {
        builder.map_dispatch = map_dispatch.into_selector();
    }
    builder.build()
}

/// Builder for connected component types.
///
/// ```ignore
/// let counter = Connect::<AppState>::new(&counter_view)
///     .map_state(|state, _| Props::new().with("count", state.count))
///     .action_creators(ActionCreators::new().with("increment", |_| json!({"type": "inc"})))
///     .build();
/// ```
pub struct Connect<S> {
    component: ComponentType,
    map_state: StateSelector<S>,
    map_dispatch: DispatchSelector,
}

impl<S> Connect<S>
where
    S: Send + Sync + 'static,
{
    pub fn new(component: &ComponentType) -> Self {
        Self {
            component: component.clone(),
            map_state: StateSelector::empty(),
            map_dispatch: DispatchSelector::raw_dispatch(),
        }
    }

    pub fn map_state<F>(mut self, f: F) -> Self
    where
        F: Fn(&S, &Props) -> Props + Send + Sync + 'static,
    {
        self.map_state = StateSelector::new(f);
        self
    }

    pub fn map_dispatch<F>(mut self, f: F) -> Self
    where
        F: Fn(&Dispatch, &Props) -> Props + Send + Sync + 'static,
    {
        self.map_dispatch = DispatchSelector::new(f);
        self
    }

    /// Use either dispatch configuration, resolved here, once.
    pub fn dispatch_config(mut self, config: impl Into<MapDispatch>) -> Self {
        self.map_dispatch = config.into().into_selector();
        self
    }

    pub fn action_creators(self, creators: ActionCreators) -> Self {
        self.dispatch_config(creators)
    }

    pub fn build(self) -> ComponentType {
        let binding = Arc::new(Binding {
            wrapped: self.component,
            map_state: self.map_state,
            map_dispatch: self.map_dispatch,
        });
        let name = format!("Connect({})", binding.wrapped.name());
        ComponentType::new(name, move || Connector::new(Arc::clone(&binding)))
    }
}

struct Binding<S> {
    wrapped: ComponentType,
    map_state: StateSelector<S>,
    map_dispatch: DispatchSelector,
}

/// Mounted connected component.
///
/// Transparent to references: a reference callback attached to the
/// connected element resolves to the wrapped instance.
pub struct Connector<S> {
    binding: Arc<Binding<S>>,
    store: Option<StoreHandle<S>>,
    subscription: Option<Subscription>,
    wrapped_instance: Arc<Mutex<Option<InstanceId>>>,
    wrapped_ref: NodeRef,
}

impl<S> Connector<S>
where
    S: Send + Sync + 'static,
{
    fn new(binding: Arc<Binding<S>>) -> Self {
        let wrapped_instance = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&wrapped_instance);
        Self {
            binding,
            store: None,
            subscription: None,
            wrapped_instance,
            wrapped_ref: NodeRef::new(move |instance| *slot.lock() = instance),
        }
    }

    fn missing_provider(&self) -> Error {
        Error::MissingProvider {
            component: self.binding.wrapped.name().to_string(),
        }
    }

    /// Whether this instance currently holds a live store subscription.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// The wrapped instance, once mounted.
    pub fn wrapped_instance(&self) -> Option<InstanceId> {
        *self.wrapped_instance.lock()
    }
}

impl<S> Component for Connector<S>
where
    S: Send + Sync + 'static,
{
    fn will_mount(&mut self, _props: &Props, scope: &mut Scope<'_>) -> Result<(), Error> {
        let store = scope
            .context()
            .get_as::<StoreHandle<S>>(STORE_CONTEXT_KEY)
            .cloned()
            .ok_or_else(|| self.missing_provider())?;

        self.subscription = Some(Subscription::new(&store, scope.scheduler(), scope.id()));
        self.store = Some(store);
        tracing::debug!(
            component = self.binding.wrapped.name(),
            instance = %scope.id(),
            "Connected component subscribed"
        );
        Ok(())
    }

    fn render(&mut self, props: &Props, _scope: &mut Scope<'_>) -> Result<Vec<Element>, Error> {
        let store = self.store.as_ref().ok_or_else(|| self.missing_provider())?;
        let state = store.state();
        let merged = merge_props(
            props,
            &*state,
            &store.dispatcher(),
            &self.binding.map_state,
            &self.binding.map_dispatch,
        );

        Ok(vec![
            Element::new(&self.binding.wrapped, merged).with_ref(self.wrapped_ref.clone())
        ])
    }

    fn will_unmount(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
            tracing::debug!(
                component = self.binding.wrapped.name(),
                "Connected component unsubscribed"
            );
        }
    }

    fn forward_ref(&self) -> Option<InstanceId> {
        self.wrapped_instance()
    }
}
