//! Graph algorithms: dependency graph derivation and Kahn's sort.

pub mod dependency_builder;
pub mod kahns;

pub use dependency_builder::build_system_graph;
pub use kahns::kahns_build_order;
