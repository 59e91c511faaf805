//! Error types for system composition and lifecycle orchestration.
//!
//! Configuration errors (invalid declaration, missing component, missing
//! dependency, cycle) are detected eagerly at graph-build or bind time and
//! always surface to the caller. Lifecycle errors wrap a component's own
//! failure with the failing key and the attempted operation. Idempotent
//! no-op transitions are never errors.

use crate::domain::value_objects::LifecycleOp;
use thiserror::Error;

/// All errors that can occur while composing or driving a system.
#[derive(Debug, Error)]
pub enum SystemError {
    /// A key was referenced but is absent from the system. Always a
    /// configuration bug: a component's own start/stop can never
    /// legitimately produce an empty slot.
    #[error("missing component '{key}' from system")]
    MissingComponent { key: String },

    /// A declared dependency target is not registered in the system.
    #[error("missing dependency '{key}' of component '{component}' (local field '{field}')")]
    MissingDependency {
        /// The component whose declaration could not be satisfied.
        component: String,
        /// The local field name the component expects the dependency under.
        field: String,
        /// The absent system key.
        key: String,
    },

    /// A dependency declaration is malformed.
    #[error("invalid dependency declaration on '{component}': {reason}")]
    InvalidDeclaration { component: String, reason: String },

    /// The dependency graph contains a cycle. Carries the full node and
    /// edge sets for diagnostics; never silently broken.
    #[error("cycle detected in dependency graph over nodes {nodes:?}")]
    CycleDetected {
        nodes: Vec<String>,
        edges: Vec<(String, String)>,
    },

    /// A component's own start or stop failed. The orchestrator halts the
    /// traversal at this key and performs no rollback.
    #[error("component '{key}' failed during {op}: {cause}")]
    Lifecycle {
        key: String,
        op: LifecycleOp,
        cause: anyhow::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_component_display() {
        let err = SystemError::MissingComponent {
            key: "database".to_string(),
        };
        assert_eq!(err.to_string(), "missing component 'database' from system");
    }

    #[test]
    fn test_missing_dependency_display() {
        let err = SystemError::MissingDependency {
            component: "webapp".to_string(),
            field: "db".to_string(),
            key: "database".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing dependency 'database' of component 'webapp' (local field 'db')"
        );
    }

    #[test]
    fn test_cycle_display_lists_nodes() {
        let err = SystemError::CycleDetected {
            nodes: vec!["a".to_string(), "b".to_string()],
            edges: vec![
                ("a".to_string(), "b".to_string()),
                ("b".to_string(), "a".to_string()),
            ],
        };
        let display = err.to_string();
        assert!(display.contains("cycle detected"));
        assert!(display.contains("\"a\""));
        assert!(display.contains("\"b\""));
    }

    #[test]
    fn test_lifecycle_display_names_key_and_op() {
        let err = SystemError::Lifecycle {
            key: "database".to_string(),
            op: LifecycleOp::Start,
            cause: anyhow::anyhow!("connection refused"),
        };
        assert_eq!(
            err.to_string(),
            "component 'database' failed during start: connection refused"
        );
    }
}
