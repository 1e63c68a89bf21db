//! Shared test utilities: spy components, forwarding parents and fake stores.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use storebind::config::LoggingConfig;
use storebind::host::{Component, ComponentType, Element, InstanceId, NodeRef, Scope};
use storebind::props::{Action, Dispatch, Props};
use storebind::store::{Listener, Reducer, StateStore, Unsubscribe};
use storebind::Error;

/// Install a subscriber once per test binary; later calls are no-ops.
pub fn init_test_tracing() {
    let config = LoggingConfig {
        level: "storebind=debug".to_string(),
        with_target: true,
    };
    let _ = storebind::logging::init_tracing(&config);
}

/// Replaces the whole state with `action.newState` when present.
pub struct SetReducer;

impl Reducer for SetReducer {
    type State = Value;

    fn reduce(state: &Value, action: &Action) -> Value {
        action
            .get("newState")
            .cloned()
            .unwrap_or_else(|| state.clone())
    }
}

/// Every top-level field of an object state as a prop.
pub fn state_fields(state: &Value) -> Props {
    state
        .as_object()
        .map(|fields| fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Spy component
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Mount(Props),
    Update(Props),
    Render,
    Unmount,
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;
pub type MountHook = Arc<dyn Fn(&Props) + Send + Sync>;

pub fn event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn mounts(log: &EventLog) -> Vec<Props> {
    log.lock()
        .iter()
        .filter_map(|event| match event {
            Event::Mount(props) => Some(props.clone()),
            _ => None,
        })
        .collect()
}

pub fn updates(log: &EventLog) -> Vec<Props> {
    log.lock()
        .iter()
        .filter_map(|event| match event {
            Event::Update(props) => Some(props.clone()),
            _ => None,
        })
        .collect()
}

pub fn renders(log: &EventLog) -> usize {
    log.lock().iter().filter(|event| **event == Event::Render).count()
}

/// Records every lifecycle hook into a shared log.
pub struct Spy {
    log: EventLog,
    child: Option<ComponentType>,
    on_mount: Option<MountHook>,
    pub marker: bool,
}

impl Component for Spy {
    fn will_mount(&mut self, props: &Props, _scope: &mut Scope<'_>) -> Result<(), Error> {
        self.marker = true;
        self.log.lock().push(Event::Mount(props.clone()));
        if let Some(hook) = &self.on_mount {
            hook(props);
        }
        Ok(())
    }

    fn render(&mut self, _props: &Props, _scope: &mut Scope<'_>) -> Result<Vec<Element>, Error> {
        self.log.lock().push(Event::Render);
        Ok(self
            .child
            .iter()
            .map(|child| Element::new(child, Props::new()))
            .collect())
    }

    fn will_update(&mut self, next: &Props) {
        self.log.lock().push(Event::Update(next.clone()));
    }

    fn will_unmount(&mut self) {
        self.log.lock().push(Event::Unmount);
    }
}

fn spy_type(name: &str, log: &EventLog, child: Option<ComponentType>, on_mount: Option<MountHook>) -> ComponentType {
    let log = Arc::clone(log);
    ComponentType::new(name, move || Spy {
        log: Arc::clone(&log),
        child: child.clone(),
        on_mount: on_mount.clone(),
        marker: false,
    })
}

pub fn spy(name: &str, log: &EventLog) -> ComponentType {
    spy_type(name, log, None, None)
}

/// Spy that renders one `child` with empty props.
pub fn spy_rendering(name: &str, log: &EventLog, child: &ComponentType) -> ComponentType {
    spy_type(name, log, Some(child.clone()), None)
}

pub fn spy_on_mount<F>(name: &str, log: &EventLog, hook: F) -> ComponentType
where
    F: Fn(&Props) + Send + Sync + 'static,
{
    spy_type(name, log, None, Some(Arc::new(hook)))
}

// ---------------------------------------------------------------------------
// Forwarding parents
// ---------------------------------------------------------------------------

/// Renders a single child, optionally passing its own props through.
pub struct Forward {
    child: ComponentType,
    pass_props: bool,
    frozen: bool,
    visible: Arc<AtomicBool>,
    node_ref: Option<NodeRef>,
}

impl Component for Forward {
    fn render(&mut self, props: &Props, _scope: &mut Scope<'_>) -> Result<Vec<Element>, Error> {
        if !self.visible.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        let props = if self.pass_props { props.clone() } else { Props::new() };
        let mut element = Element::new(&self.child, props);
        if let Some(node_ref) = &self.node_ref {
            element = element.with_ref(node_ref.clone());
        }
        Ok(vec![element])
    }

    fn should_update(&self, _next: &Props) -> bool {
        !self.frozen
    }
}

pub struct ForwardBuilder {
    name: String,
    child: ComponentType,
    pass_props: bool,
    frozen: bool,
    visible: Arc<AtomicBool>,
    node_ref: Option<NodeRef>,
}

pub fn forward(name: &str, child: &ComponentType) -> ForwardBuilder {
    ForwardBuilder {
        name: name.to_string(),
        child: child.clone(),
        pass_props: true,
        frozen: false,
        visible: Arc::new(AtomicBool::new(true)),
        node_ref: None,
    }
}

impl ForwardBuilder {
    pub fn without_props(mut self) -> Self {
        self.pass_props = false;
        self
    }

    /// Refuse every owner-driven update.
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    pub fn visible(mut self, visible: &Arc<AtomicBool>) -> Self {
        self.visible = Arc::clone(visible);
        self
    }

    pub fn with_ref(mut self, node_ref: NodeRef) -> Self {
        self.node_ref = Some(node_ref);
        self
    }

    pub fn build(self) -> ComponentType {
        let ForwardBuilder {
            name,
            child,
            pass_props,
            frozen,
            visible,
            node_ref,
        } = self;
        ComponentType::new(name, move || Forward {
            child: child.clone(),
            pass_props,
            frozen,
            visible: Arc::clone(&visible),
            node_ref: node_ref.clone(),
        })
    }
}

/// Renders every child type, in order, with empty props.
pub struct Fan {
    children: Vec<ComponentType>,
}

impl Component for Fan {
    fn render(&mut self, _props: &Props, _scope: &mut Scope<'_>) -> Result<Vec<Element>, Error> {
        Ok(self
            .children
            .iter()
            .map(|child| Element::new(child, Props::new()))
            .collect())
    }
}

pub fn fan(name: &str, children: &[ComponentType]) -> ComponentType {
    let children = children.to_vec();
    ComponentType::new(name, move || Fan {
        children: children.clone(),
    })
}

/// Reference callback that stores the latest instance it was given.
pub fn capture_ref() -> (NodeRef, Arc<Mutex<Option<InstanceId>>>) {
    let slot = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&slot);
    (NodeRef::new(move |instance| *sink.lock() = instance), slot)
}

// ---------------------------------------------------------------------------
// Fake store
// ---------------------------------------------------------------------------

/// Store with a fixed state that records dispatched actions instead of
/// reducing them.
pub struct SpyStore {
    state: Arc<Value>,
    dispatched: Arc<Mutex<Vec<Action>>>,
    dispatcher: Dispatch,
    listeners: Mutex<Vec<Listener>>,
    releases: Arc<AtomicUsize>,
}

impl SpyStore {
    pub fn new(state: Value) -> Arc<Self> {
        let dispatched = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&dispatched);
        Arc::new(Self {
            state: Arc::new(state),
            dispatched,
            dispatcher: Dispatch::new(move |action| sink.lock().push(action)),
            listeners: Mutex::new(Vec::new()),
            releases: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn dispatched(&self) -> Vec<Action> {
        self.dispatched.lock().clone()
    }

    pub fn subscriptions(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

impl StateStore<Value> for SpyStore {
    fn state(&self) -> Arc<Value> {
        Arc::clone(&self.state)
    }

    fn dispatch(&self, action: Action) {
        self.dispatcher.call(action);
    }

    fn dispatcher(&self) -> Dispatch {
        self.dispatcher.clone()
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        self.listeners.lock().push(listener);
        let releases = Arc::clone(&self.releases);
        Unsubscribe::new(move || {
            releases.fetch_add(1, Ordering::SeqCst);
        })
    }
}
