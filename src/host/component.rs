//! Component capability set and component types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::host::context::{Context, ContextEntry};
use crate::host::element::Element;
use crate::host::scheduler::{InstanceId, Scheduler};
use crate::props::Props;

/// Downcasting support for mounted instances.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A stateful node in the component tree.
///
/// The host drives the lifecycle: `will_mount` then `render` on mount;
/// `should_update`, `will_update` and `render` when the owner re-renders;
/// `will_update` and `render` for scheduled updates; `will_unmount` last.
pub trait Component: AsAny + Send {
    /// Called once before the first render. An error aborts the mount.
    fn will_mount(&mut self, _props: &Props, _scope: &mut Scope<'_>) -> Result<(), Error> {
        Ok(())
    }

    /// Describe this component's children for the given props.
    fn render(&mut self, _props: &Props, _scope: &mut Scope<'_>) -> Result<Vec<Element>, Error> {
        Ok(Vec::new())
    }

    /// Whether an owner-driven update should re-render. Scheduled updates
    /// bypass this check.
    fn should_update(&self, _next: &Props) -> bool {
        true
    }

    fn will_update(&mut self, _next: &Props) {}

    fn will_unmount(&mut self) {}

    /// Instance that reference callbacks attached to this component resolve to.
    fn forward_ref(&self) -> Option<InstanceId> {
        None
    }
}

/// Per-call view of the host handed to lifecycle hooks.
///
/// Reads see the context inherited from ancestors; values passed to
/// [`Scope::provide_context`] become visible to this node's whole subtree.
pub struct Scope<'a> {
    id: InstanceId,
    context: &'a Context,
    scheduler: Arc<dyn Scheduler>,
    provided: Vec<ContextEntry>,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(id: InstanceId, context: &'a Context, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            id,
            context,
            scheduler,
            provided: Vec::new(),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn context(&self) -> &Context {
        self.context
    }

    pub fn provide_context<T>(&mut self, key: impl Into<String>, value: T)
    where
        T: Any + Send + Sync,
    {
        self.provided.push((key.into(), Arc::new(value)));
    }

    /// Scheduler for requesting deferred re-renders of this or other instances.
    pub fn scheduler(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.scheduler)
    }

    pub(crate) fn into_provided(self) -> Vec<ContextEntry> {
        self.provided
    }
}

/// A named component factory.
///
/// Two types are the same exactly when they share the factory, which is what
/// the host compares to decide between updating and remounting a child.
#[derive(Clone)]
pub struct ComponentType {
    name: Arc<str>,
    factory: Arc<dyn Fn() -> Box<dyn Component> + Send + Sync>,
}

impl ComponentType {
    pub fn new<C, F>(name: impl Into<String>, factory: F) -> Self
    where
        C: Component,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            factory: Arc::new(move || Box::new(factory()) as Box<dyn Component>),
        }
    }

    /// Component type built from `C::default()`.
    pub fn of<C>(name: impl Into<String>) -> Self
    where
        C: Component + Default,
    {
        Self::new(name, C::default)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn same_type(&self, other: &ComponentType) -> bool {
        Arc::ptr_eq(&self.factory, &other.factory)
    }

    pub(crate) fn instantiate(&self) -> Box<dyn Component> {
        (self.factory)()
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentType").field(&self.name).finish()
    }
}
