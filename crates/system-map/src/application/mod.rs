//! Application layer: the dependency binder and the system orchestrator.

pub mod binder;
pub mod system_map;
