//! Derives the dependency graph from an ordered set of declarations.

use crate::domain::entities::SystemGraph;
use crate::domain::errors::SystemError;
use crate::domain::value_objects::DependencySpec;

/// Build the system graph from `(system key, declaration)` pairs in
/// declaration order.
///
/// Every system key becomes a node, plain-data entries included. Each
/// declared `(local field, system key)` pair contributes one directed edge
/// dependency -> dependent. Declarations are validated here, and a target
/// absent from the system fails eagerly with
/// [`SystemError::MissingDependency`].
pub fn build_system_graph(entries: &[(&str, &DependencySpec)]) -> Result<SystemGraph, SystemError> {
    let mut graph = SystemGraph::new();

    for (key, _) in entries {
        graph.add_node(*key);
    }

    for (key, spec) in entries {
        spec.validate(key)?;
        for (field, target) in spec.iter() {
            if !graph.contains_node(target) {
                return Err(SystemError::MissingDependency {
                    component: (*key).to_string(),
                    field: field.to_string(),
                    key: target.to_string(),
                });
            }
            graph.add_edge(target, key);
        }
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_graph_nodes_in_declaration_order() {
        let empty = DependencySpec::empty();
        let entries = vec![
            ("database", &empty),
            ("scheduler", &empty),
            ("webapp", &empty),
        ];

        let graph = build_system_graph(&entries).unwrap();

        assert_eq!(graph.nodes, vec!["database", "scheduler", "webapp"]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_build_graph_edges_point_dependency_to_dependent() {
        let empty = DependencySpec::empty();
        let webapp_deps = DependencySpec::names(["database", "scheduler"]);
        let entries = vec![
            ("database", &empty),
            ("scheduler", &empty),
            ("webapp", &webapp_deps),
        ];

        let graph = build_system_graph(&entries).unwrap();

        assert!(graph.has_edge("database", "webapp"));
        assert!(graph.has_edge("scheduler", "webapp"));
        assert_eq!(graph.in_degree.get("webapp"), Some(&2));
    }

    #[test]
    fn test_build_graph_mapping_form_uses_system_key_side() {
        let empty = DependencySpec::empty();
        let deps = DependencySpec::mapping([("db", "database")]);
        let entries = vec![("database", &empty), ("webapp", &deps)];

        let graph = build_system_graph(&entries).unwrap();

        assert!(graph.has_edge("database", "webapp"));
        assert!(!graph.contains_node("db"));
    }

    #[test]
    fn test_build_graph_missing_target_fails_eagerly() {
        let deps = DependencySpec::names(["database"]);
        let entries = vec![("webapp", &deps)];

        let err = build_system_graph(&entries).unwrap_err();

        match err {
            SystemError::MissingDependency {
                component,
                field,
                key,
            } => {
                assert_eq!(component, "webapp");
                assert_eq!(field, "database");
                assert_eq!(key, "database");
            }
            other => panic!("expected MissingDependency, got {other}"),
        }
    }

    #[test]
    fn test_build_graph_rejects_invalid_declaration() {
        let empty = DependencySpec::empty();
        let deps = DependencySpec::mapping([("db", "database"), ("db", "database")]);
        let entries = vec![("database", &empty), ("webapp", &deps)];

        assert!(matches!(
            build_system_graph(&entries),
            Err(SystemError::InvalidDeclaration { .. })
        ));
    }
}
