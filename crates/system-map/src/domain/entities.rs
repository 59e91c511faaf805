//! Core entities: the dependency graph, registered values, and the
//! resolved-dependency bag handed to components.

use crate::domain::value_objects::{ComponentState, DependencySpec};
use crate::ports::component::{Component, DynComponent, SharedComponent};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Directed dependency edge: `from` must be running before `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    /// The system key supplying the dependency.
    pub from: String,
    /// The system key of the dependent.
    pub to: String,
}

/// Dependency graph over system keys.
///
/// Adjacency is keyed by system key, never by object identity. Node and
/// edge insertion order is preserved so ordering stays deterministic.
#[derive(Debug, Clone, Default)]
pub struct SystemGraph {
    /// Node keys in declaration order.
    pub nodes: Vec<String>,
    /// All edges in declaration order.
    pub edges: Vec<DependencyEdge>,
    /// Adjacency list: from -> [to, ...]
    pub adjacency: HashMap<String, Vec<String>>,
    /// In-degree count per node (edges pointing into it).
    pub in_degree: HashMap<String, usize>,
}

impl SystemGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Re-adding an existing key is a no-op.
    pub fn add_node(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.adjacency.contains_key(&key) {
            return;
        }
        self.adjacency.insert(key.clone(), Vec::new());
        self.in_degree.insert(key.clone(), 0);
        self.nodes.push(key);
    }

    /// Add a dependency edge `from -> to`. Both nodes must already exist.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        if let Some(neighbors) = self.adjacency.get_mut(from) {
            neighbors.push(to.to_string());
        }
        if let Some(degree) = self.in_degree.get_mut(to) {
            *degree += 1;
        }
        self.edges.push(DependencyEdge {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    pub fn contains_node(&self, key: &str) -> bool {
        self.adjacency.contains_key(key)
    }

    /// Check if an edge exists from -> to.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.adjacency
            .get(from)
            .map(|neighbors| neighbors.iter().any(|n| n == to))
            .unwrap_or(false)
    }

    /// All zero in-degree nodes, in declaration order.
    pub fn zero_degree_nodes(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|key| self.in_degree.get(key.as_str()) == Some(&0))
            .cloned()
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// A value registered under a system key.
///
/// Either a lifecycle-capable component behind a shared handle, or opaque
/// data (configuration, constants) usable only as a dependency target.
/// Cloning clones the handle, not the underlying value, so identity is
/// preserved through binding.
#[derive(Clone)]
pub enum SystemValue {
    /// A lifecycle component; driven through start/stop transitions.
    Component(SharedComponent),
    /// Plain data; never transitioned and never bound itself.
    Value(Arc<dyn Any + Send + Sync>),
}

impl SystemValue {
    pub fn is_component(&self) -> bool {
        matches!(self, Self::Component(_))
    }

    /// The shared component handle, if this is a lifecycle component.
    pub fn as_component(&self) -> Option<&SharedComponent> {
        match self {
            Self::Component(handle) => Some(handle),
            Self::Value(_) => None,
        }
    }

    /// Downcast an opaque data value to its concrete type.
    pub fn downcast_value<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        match self {
            Self::Value(data) => Arc::clone(data).downcast::<T>().ok(),
            Self::Component(_) => None,
        }
    }

    /// Identity comparison: true when both handles refer to the same
    /// registered allocation.
    pub fn same_value(&self, other: &SystemValue) -> bool {
        match (self, other) {
            (Self::Component(a), Self::Component(b)) => Arc::ptr_eq(a, b),
            (Self::Value(a), Self::Value(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for SystemValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(_) => f.write_str("SystemValue::Component(..)"),
            Self::Value(_) => f.write_str("SystemValue::Value(..)"),
        }
    }
}

/// A value plus its dependency declaration, ready for insertion into a
/// [`SystemMap`](crate::application::system_map::SystemMap).
#[derive(Debug, Clone)]
pub struct Registration {
    pub(crate) value: SystemValue,
    pub(crate) dependencies: DependencySpec,
}

impl Registration {
    /// Attach a dependency declaration and return the registration for
    /// composition. Re-declaring overwrites any earlier declaration.
    pub fn using(mut self, dependencies: DependencySpec) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn value(&self) -> &SystemValue {
        &self.value
    }

    pub fn dependencies(&self) -> &DependencySpec {
        &self.dependencies
    }
}

/// Register a lifecycle component.
pub fn component<C: Component>(component: C) -> Registration {
    let boxed: DynComponent = Box::new(component);
    Registration {
        value: SystemValue::Component(Arc::new(RwLock::new(boxed))),
        dependencies: DependencySpec::empty(),
    }
}

/// Register plain data: usable as a dependency target, never transitioned.
pub fn value<T: Send + Sync + 'static>(data: T) -> Registration {
    Registration {
        value: SystemValue::Value(Arc::new(data)),
        dependencies: DependencySpec::empty(),
    }
}

/// A named slot in the system: the registered value, its declaration, and
/// its lifecycle state.
#[derive(Debug, Clone)]
pub struct SystemEntry {
    pub value: SystemValue,
    pub dependencies: DependencySpec,
    pub state: ComponentState,
}

impl SystemEntry {
    pub fn new(registration: Registration) -> Self {
        Self {
            value: registration.value,
            dependencies: registration.dependencies,
            state: ComponentState::Stopped,
        }
    }
}

/// The dependencies resolved for one component, keyed by the local field
/// names of its declaration.
#[derive(Debug, Clone, Default)]
pub struct ResolvedDependencies {
    values: HashMap<String, SystemValue>,
}

impl ResolvedDependencies {
    pub(crate) fn insert(&mut self, local_field: String, value: SystemValue) {
        self.values.insert(local_field, value);
    }

    /// The resolved value for a local field, if declared.
    pub fn get(&self, local_field: &str) -> Option<&SystemValue> {
        self.values.get(local_field)
    }

    /// A cloned component handle for a local field, if the dependency is a
    /// lifecycle component.
    pub fn component(&self, local_field: &str) -> Option<SharedComponent> {
        self.get(local_field)
            .and_then(SystemValue::as_component)
            .cloned()
    }

    /// Downcast a plain-data dependency to its concrete type.
    pub fn downcast<T: Send + Sync + 'static>(&self, local_field: &str) -> Option<Arc<T>> {
        self.get(local_field).and_then(SystemValue::downcast_value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
