//! Child descriptions produced by `render`.

use std::fmt;
use std::sync::Arc;

use crate::host::component::ComponentType;
use crate::host::scheduler::InstanceId;
use crate::props::Props;

/// Reference callback attached to an [`Element`].
///
/// The host calls it with `Some(instance)` once the element is mounted and
/// with `None` when it is unmounted. Instances that forward their reference
/// (see [`crate::host::Component::forward_ref`]) resolve to the forwarded
/// instance.
#[derive(Clone)]
pub struct NodeRef {
    inner: Arc<dyn Fn(Option<InstanceId>) + Send + Sync>,
}

impl NodeRef {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Option<InstanceId>) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    pub fn call(&self, instance: Option<InstanceId>) {
        (self.inner)(instance)
    }

    pub fn ptr_eq(&self, other: &NodeRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({:p})", Arc::as_ptr(&self.inner))
    }
}

/// Description of a component to mount or update.
#[derive(Clone, Debug)]
pub struct Element {
    pub(crate) component: ComponentType,
    pub(crate) props: Props,
    pub(crate) node_ref: Option<NodeRef>,
}

impl Element {
    pub fn new(component: &ComponentType, props: Props) -> Self {
        Self {
            component: component.clone(),
            props,
            node_ref: None,
        }
    }

    pub fn with_ref(mut self, node_ref: NodeRef) -> Self {
        self.node_ref = Some(node_ref);
        self
    }

    pub fn component(&self) -> &ComponentType {
        &self.component
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn node_ref(&self) -> Option<&NodeRef> {
        self.node_ref.as_ref()
    }
}
