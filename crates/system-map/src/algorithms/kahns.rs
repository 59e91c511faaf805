//! Kahn's Topological Sort Algorithm
//!
//! O(V + E) complexity, detects cycles. The worklist is a stack (LIFO):
//! among nodes that become ready at the same processing step, the most
//! recently freed one runs first. The stack is seeded with the
//! zero-in-degree nodes in declaration order. This is a deterministic
//! tie-break only; callers must not rely on any particular ordering among
//! mutually independent nodes beyond dependencies-before-dependents.

use crate::domain::entities::SystemGraph;
use crate::domain::errors::SystemError;
use std::collections::HashMap;

/// Compute the build order of the graph: a permutation of the node keys in
/// which every dependency precedes every one of its dependents.
///
/// Fails with [`SystemError::CycleDetected`] (carrying the full node and
/// edge sets) if not all nodes can be ordered; a partial order is never
/// returned silently.
pub fn kahns_build_order(graph: &SystemGraph) -> Result<Vec<String>, SystemError> {
    if graph.nodes.is_empty() {
        return Ok(Vec::new());
    }

    // 1. Working copy of the in-degree map
    let mut in_degree: HashMap<String, usize> = graph.in_degree.clone();

    // 2. Seed the stack with zero in-degree nodes, in declaration order
    let mut stack: Vec<String> = graph.zero_degree_nodes();

    // 3. Pop the most recently added ready node, decrement its successors,
    //    push any successor reaching zero
    let mut order: Vec<String> = Vec::with_capacity(graph.node_count());

    while let Some(key) = stack.pop() {
        if let Some(neighbors) = graph.adjacency.get(&key) {
            for next in neighbors {
                let Some(degree) = in_degree.get_mut(next) else {
                    continue;
                };
                *degree = degree.saturating_sub(1);
                if *degree == 0 {
                    stack.push(next.clone());
                }
            }
        }
        order.push(key);
    }

    // 4. Anything left unordered sits on a cycle
    if order.len() < graph.node_count() {
        return Err(SystemError::CycleDetected {
            nodes: graph.nodes.clone(),
            edges: graph
                .edges
                .iter()
                .map(|edge| (edge.from.clone(), edge.to.clone()))
                .collect(),
        });
    }

    Ok(order)
}
