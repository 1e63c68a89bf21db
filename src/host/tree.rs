//! The component tree: mounting, reconciliation, unmounting and flushing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::HostConfig;
use crate::error::Error;
use crate::host::component::{Component, ComponentType, Scope};
use crate::host::context::{Context, ContextEntry};
use crate::host::element::{Element, NodeRef};
use crate::host::scheduler::{InstanceId, Scheduler, UpdateQueue};
use crate::props::Props;

struct Node {
    component_type: ComponentType,
    /// `None` only while the instance is inside one of its own hooks.
    component: Option<Box<dyn Component>>,
    props: Props,
    /// Context inherited from the parent.
    context: Context,
    /// Entries provided during `will_mount`; kept for every later render.
    mount_entries: Vec<ContextEntry>,
    children: Vec<InstanceId>,
    node_ref: Option<NodeRef>,
    depth: usize,
}

/// Owns mounted instances and drives their lifecycle.
///
/// Children are matched positionally: a child element whose type matches the
/// instance at the same position updates it, anything else remounts.
/// Scheduled updates are deferred until [`Host::flush`].
pub struct Host {
    nodes: HashMap<InstanceId, Node>,
    roots: Vec<InstanceId>,
    queue: Arc<UpdateQueue>,
    next_id: u64,
    max_flush_passes: u32,
    /// Instances rendered during the current flush pass.
    rendered_in_pass: Option<HashSet<InstanceId>>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    pub fn new() -> Self {
        Self::with_config(&HostConfig::default())
    }

    pub fn with_config(config: &HostConfig) -> Self {
        Self::with_queue(config, Arc::new(UpdateQueue::new()))
    }

    /// Host draining an externally owned queue.
    pub fn with_queue(config: &HostConfig, queue: Arc<UpdateQueue>) -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            queue,
            next_id: 0,
            max_flush_passes: config.max_flush_passes,
            rendered_in_pass: None,
        }
    }

    /// Mount `element` as the root, or update the current root in place when
    /// it has the same component type.
    ///
    /// # Errors
    /// Any error raised by a lifecycle hook. The failed subtree is unmounted.
    pub fn render(&mut self, element: Element) -> Result<(), Error> {
        let old_roots = std::mem::take(&mut self.roots);
        self.roots = self.reconcile(&Context::new(), 0, old_roots, vec![element])?;
        Ok(())
    }

    /// Unmount every instance.
    pub fn unmount_all(&mut self) {
        for root in std::mem::take(&mut self.roots) {
            self.unmount_node(root);
        }
    }

    /// Run every pending scheduled update.
    ///
    /// Each pending instance re-renders at most once per pass, shallowest
    /// first; an instance already re-rendered by an ancestor in the same pass
    /// is skipped. Updates scheduled during a pass run in the next one.
    /// Returns the number of scheduled updates performed.
    ///
    /// # Errors
    /// A lifecycle error, or [`Error::UpdateLoop`] once the configured number
    /// of passes is exhausted with work still pending.
    pub fn flush(&mut self) -> Result<usize, Error> {
        let mut passes = 0u32;
        let mut updated = 0usize;

        loop {
            let mut pending = self.queue.drain();
            if pending.is_empty() {
                break;
            }
            if passes >= self.max_flush_passes {
                tracing::warn!(passes, pending = pending.len(), "Update queue did not settle");
                return Err(Error::UpdateLoop { passes });
            }
            passes += 1;

            pending.sort_by_key(|id| self.nodes.get(id).map_or(usize::MAX, |node| node.depth));
            self.rendered_in_pass = Some(HashSet::new());
            let result = self.run_pass(pending);
            self.rendered_in_pass = None;
            updated += result?;
        }

        if passes > 0 {
            tracing::trace!(passes, updated, "Flushed update queue");
        }
        Ok(updated)
    }

    pub fn queue(&self) -> &Arc<UpdateQueue> {
        &self.queue
    }

    pub fn roots(&self) -> &[InstanceId] {
        &self.roots
    }

    pub fn is_mounted(&self, id: InstanceId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of mounted instances.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: InstanceId) -> Option<&[InstanceId]> {
        self.nodes.get(&id).map(|node| node.children.as_slice())
    }

    pub fn props(&self, id: InstanceId) -> Option<&Props> {
        self.nodes.get(&id).map(|node| &node.props)
    }

    pub fn component_type(&self, id: InstanceId) -> Option<&ComponentType> {
        self.nodes.get(&id).map(|node| &node.component_type)
    }

    /// Borrow a mounted instance as its concrete type.
    pub fn instance<T: Component>(&self, id: InstanceId) -> Option<&T> {
        let component = self.nodes.get(&id)?.component.as_deref()?;
        component.as_any().downcast_ref::<T>()
    }

    pub fn instance_mut<T: Component>(&mut self, id: InstanceId) -> Option<&mut T> {
        let component = self.nodes.get_mut(&id)?.component.as_deref_mut()?;
        component.as_any_mut().downcast_mut::<T>()
    }

    /// Follow `forward_ref` links from `id` to the instance a reference
    /// callback should receive.
    pub fn resolve_ref(&self, id: InstanceId) -> InstanceId {
        let mut current = id;
        loop {
            let forwarded = self
                .nodes
                .get(&current)
                .and_then(|node| node.component.as_deref())
                .and_then(|component| component.forward_ref());
            match forwarded {
                Some(next) if next != current && self.nodes.contains_key(&next) => current = next,
                _ => return current,
            }
        }
    }

    fn run_pass(&mut self, pending: Vec<InstanceId>) -> Result<usize, Error> {
        let mut updated = 0;
        for id in pending {
            if !self.nodes.contains_key(&id) {
                tracing::debug!(instance = %id, "Skipping update for unmounted instance");
                continue;
            }
            let already_rendered = self
                .rendered_in_pass
                .as_ref()
                .is_some_and(|rendered| rendered.contains(&id));
            if already_rendered {
                continue;
            }
            self.update_scheduled(id)?;
            updated += 1;
        }
        Ok(updated)
    }

    fn scheduler(&self) -> Arc<dyn Scheduler> {
        self.queue.clone()
    }

    fn allocate_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        id
    }

    fn reconcile(
        &mut self,
        context: &Context,
        depth: usize,
        old: Vec<InstanceId>,
        elements: Vec<Element>,
    ) -> Result<Vec<InstanceId>, Error> {
        let mut old = old.into_iter();
        let mut kept = Vec::with_capacity(elements.len());

        for element in elements {
            let result = match old.next() {
                Some(old_id) if self.has_type(old_id, &element.component) => self
                    .update_node(old_id, element, context.clone())
                    .map(|()| old_id)
                    .map_err(|err| {
                        self.unmount_node(old_id);
                        err
                    }),
                Some(old_id) => {
                    self.unmount_node(old_id);
                    self.mount(element, context.clone(), depth)
                }
                None => self.mount(element, context.clone(), depth),
            };

            match result {
                Ok(id) => kept.push(id),
                Err(err) => {
                    for id in kept.into_iter().chain(old) {
                        self.unmount_node(id);
                    }
                    return Err(err);
                }
            }
        }

        for stale in old {
            self.unmount_node(stale);
        }
        Ok(kept)
    }

    fn has_type(&self, id: InstanceId, component_type: &ComponentType) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|node| node.component_type.same_type(component_type))
    }

    fn mount(&mut self, element: Element, context: Context, depth: usize) -> Result<InstanceId, Error> {
        let Element {
            component: component_type,
            props,
            node_ref,
        } = element;
        let id = self.allocate_id();
        let mut component = component_type.instantiate();

        let mut scope = Scope::new(id, &context, self.scheduler());
        component.will_mount(&props, &mut scope)?;
        let mount_entries = scope.into_provided();

        tracing::trace!(instance = %id, component = component_type.name(), "Mounting");
        self.nodes.insert(
            id,
            Node {
                component_type,
                component: Some(component),
                props,
                context,
                mount_entries,
                children: Vec::new(),
                node_ref: None,
                depth,
            },
        );

        if let Err(err) = self.render_node(id) {
            self.unmount_node(id);
            return Err(err);
        }
        self.swap_ref(id, node_ref);
        Ok(id)
    }

    fn update_node(&mut self, id: InstanceId, element: Element, context: Context) -> Result<(), Error> {
        let Element { props, node_ref, .. } = element;
        let Some(node) = self.nodes.get_mut(&id) else {
            return Ok(());
        };

        node.context = context;
        let should_update = match node.component.as_mut() {
            Some(component) if component.should_update(&props) => {
                component.will_update(&props);
                true
            }
            _ => false,
        };
        node.props = props;

        if should_update {
            self.render_node(id)?;
        }
        self.swap_ref(id, node_ref);
        Ok(())
    }

    fn update_scheduled(&mut self, id: InstanceId) -> Result<(), Error> {
        if let Some(node) = self.nodes.get_mut(&id) {
            if let Some(component) = node.component.as_mut() {
                component.will_update(&node.props);
            }
        }
        self.render_node(id)
    }

    fn render_node(&mut self, id: InstanceId) -> Result<(), Error> {
        let scheduler = self.scheduler();
        let Some(node) = self.nodes.get_mut(&id) else {
            return Ok(());
        };
        let Some(mut component) = node.component.take() else {
            return Ok(());
        };
        let props = node.props.clone();
        let context = node.context.clone();
        let child_base = node.context.extend(&node.mount_entries);
        let depth = node.depth;
        let old_children = std::mem::take(&mut node.children);

        self.queue.cancel(id);
        if let Some(rendered) = self.rendered_in_pass.as_mut() {
            rendered.insert(id);
        }

        let mut scope = Scope::new(id, &context, scheduler);
        let result = component.render(&props, &mut scope);
        let render_entries = scope.into_provided();
        if let Some(node) = self.nodes.get_mut(&id) {
            node.component = Some(component);
        }

        let elements = match result {
            Ok(elements) => elements,
            Err(err) => {
                for child in old_children {
                    self.unmount_node(child);
                }
                return Err(err);
            }
        };

        let child_context = child_base.extend(&render_entries);
        let children = self.reconcile(&child_context, depth + 1, old_children, elements)?;
        if let Some(node) = self.nodes.get_mut(&id) {
            node.children = children;
        }
        Ok(())
    }

    /// Install `next` as the node's reference callback, notifying whichever
    /// callbacks changed.
    fn swap_ref(&mut self, id: InstanceId, next: Option<NodeRef>) {
        let previous = self.nodes.get_mut(&id).and_then(|node| node.node_ref.take());
        let unchanged = matches!((&previous, &next), (Some(a), Some(b)) if a.ptr_eq(b));

        if !unchanged {
            if let Some(previous) = &previous {
                previous.call(None);
            }
            if let Some(next) = &next {
                next.call(Some(self.resolve_ref(id)));
            }
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.node_ref = next;
        }
    }

    fn unmount_node(&mut self, id: InstanceId) {
        let Some(mut node) = self.nodes.remove(&id) else {
            return;
        };
        tracing::trace!(instance = %id, component = node.component_type.name(), "Unmounting");

        if let Some(component) = node.component.as_mut() {
            component.will_unmount();
        }
        for child in std::mem::take(&mut node.children) {
            self.unmount_node(child);
        }
        self.queue.cancel(id);
        if let Some(node_ref) = node.node_ref.take() {
            node_ref.call(None);
        }
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.unmount_all();
    }
}
