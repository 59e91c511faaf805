//! # system-map: Dependency-Ordered Component Lifecycle Management
//!
//! Given a named collection of components, each optionally declaring which
//! other components it needs, this crate computes a valid start order,
//! wires the declared dependencies into each component, and drives every
//! component through start/stop transitions in correct order — including
//! safe, minimal-disruption replacement of a subset of components at
//! runtime.
//!
//! ## Architecture
//!
//! - **Domain**: core entities (SystemGraph, SystemValue, Registration)
//!   and the error taxonomy
//! - **Algorithms**: graph derivation and Kahn's topological sort with
//!   cycle detection
//! - **Ports**: the [`Component`] lifecycle contract collaborators
//!   implement
//! - **Application**: the [`SystemMap`] orchestrator and the dependency
//!   binder
//!
//! ## Usage
//!
//! ```rust,ignore
//! use system_map::{component, value, DependencySpec, RestartPolicy, SystemMap};
//!
//! let mut system = SystemMap::from_entries(vec![
//!     ("config", value(AppConfig::default())),
//!     ("database", component(Database::new())),
//!     (
//!         "webapp",
//!         component(Webapp::new()).using(DependencySpec::names(["config", "database"])),
//!     ),
//! ]);
//!
//! system.start().await?;          // config and database before webapp
//! // ... later: swap the config without touching running components
//! system
//!     .replace(vec![("config".into(), value(AppConfig::reloaded()))], RestartPolicy::None)
//!     .await?;
//! system.stop().await?;           // exact reverse of the start order
//! ```
//!
//! ## Guarantees
//!
//! - Dependencies always start before their dependents and stop after them
//! - Cycles and missing dependencies fail eagerly, never silently
//! - Transitions are idempotent and strictly sequential
//! - Replacement never touches components outside the requested restart
//!   scope

pub mod algorithms;
pub mod application;
pub mod domain;
pub mod ports;

pub use algorithms::{build_system_graph, kahns_build_order};
pub use application::system_map::SystemMap;
pub use domain::entities::{
    component, value, DependencyEdge, Registration, ResolvedDependencies, SystemGraph, SystemValue,
};
pub use domain::errors::SystemError;
pub use domain::value_objects::{ComponentState, DependencySpec, LifecycleOp, RestartPolicy};
pub use ports::component::{Component, DynComponent, SharedComponent};
