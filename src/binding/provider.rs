//! `provider`: makes a store reachable from a subtree.

use crate::error::Error;
use crate::host::{Component, ComponentType, Element, Scope};
use crate::props::Props;
use crate::store::StoreHandle;

/// Context key under which the store handle is provided.
pub const STORE_CONTEXT_KEY: &str = "store";

/// Wrap `component` so that its whole subtree can reach `store`.
///
/// The provider passes its own props through untouched and holds no
/// subscription.
pub fn provider<S>(store: StoreHandle<S>, component: &ComponentType) -> ComponentType
where
    S: Send + Sync + 'static,
{
    let wrapped = component.clone();
    let name = format!("Provider({})", wrapped.name());
    ComponentType::new(name, move || Provider {
        store: store.clone(),
        wrapped: wrapped.clone(),
    })
}

struct Provider<S> {
    store: StoreHandle<S>,
    wrapped: ComponentType,
}

impl<S> Component for Provider<S>
where
    S: Send + Sync + 'static,
{
    fn render(&mut self, props: &Props, scope: &mut Scope<'_>) -> Result<Vec<Element>, Error> {
        scope.provide_context(STORE_CONTEXT_KEY, self.store.clone());
        Ok(vec![Element::new(&self.wrapped, props.clone())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Host;
    use crate::props::{Action, Dispatch};
    use crate::store::{Listener, StateStore, Unsubscribe};
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::Arc;

    struct FixedStore;

    impl StateStore<u8> for FixedStore {
        fn state(&self) -> Arc<u8> {
            Arc::new(9)
        }

        fn dispatch(&self, _action: Action) {}

        fn dispatcher(&self) -> Dispatch {
            Dispatch::new(|_| {})
        }

        fn subscribe(&self, _listener: Listener) -> Unsubscribe {
            Unsubscribe::noop()
        }
    }

    type Seen = Arc<Mutex<Option<(Props, Option<u8>)>>>;

    struct Probe {
        seen: Seen,
    }

    impl Component for Probe {
        fn will_mount(&mut self, props: &Props, scope: &mut Scope<'_>) -> Result<(), Error> {
            let state = scope
                .context()
                .get_as::<StoreHandle<u8>>(STORE_CONTEXT_KEY)
                .map(|store| *store.state());
            *self.seen.lock() = Some((props.clone(), state));
            Ok(())
        }
    }

    #[test]
    fn test_store_visible_and_props_untouched() {
        let seen: Seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let probe = ComponentType::new("Probe", move || Probe {
            seen: Arc::clone(&sink),
        });
        let root = provider::<u8>(Arc::new(FixedStore), &probe);
        assert_eq!(root.name(), "Provider(Probe)");

        let mut host = Host::new();
        host.render(Element::new(&root, Props::new().with("prop", "value")))
            .unwrap();

        let (props, state) = seen.lock().clone().expect("probe mounted");
        assert_eq!(props.value("prop"), Some(&json!("value")));
        assert_eq!(props.len(), 1);
        assert_eq!(state, Some(9));
    }
}
