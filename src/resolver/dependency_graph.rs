//! Dependency graph with combined cycle detection and topological ordering.
//!
//! The graph holds only plugins that exist in the input: a dependency on an
//! unknown ID has no node to visit and never becomes an edge (the validator
//! reports it instead), so a missing dependency cannot by itself break
//! sorting. Nodes are indexed by plugin ID; the graph reads descriptors, it
//! does not own them.
//!
//! Sorting and cycle detection are one depth-first traversal with the usual
//! three-color marking: a back-edge to a gray node is a cycle, and post-order
//! append yields an order in which every plugin follows its dependencies.
//! The outer loop walks nodes in insertion order, which is input order, so
//! independent subgraphs keep a deterministic relative order driven by first
//! appearance.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use tracing::debug;

/// Color states for the DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is on the current recursion path.
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Outcome of one traversal: either a dependencies-first order, or a cycle.
#[derive(Debug)]
pub(crate) struct SortOutcome {
    /// Plugin IDs, dependencies before dependents. Empty when cyclic.
    pub sorted: Vec<String>,
    /// Whether a cycle was found.
    pub cyclic: bool,
}

/// Directed dependency graph over plugin IDs.
pub(crate) struct DependencyGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub(crate) fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Add a plugin node. Call in input order; node order is sort order for
    /// independent subgraphs.
    pub(crate) fn add_plugin(&mut self, plugin_id: &str) {
        if !self.node_map.contains_key(plugin_id) {
            let index = self.graph.add_node(plugin_id.to_string());
            self.node_map.insert(plugin_id.to_string(), index);
        }
    }

    /// Add an edge meaning `from` depends on `to`.
    ///
    /// Both endpoints must already be known plugins; edges to unknown IDs are
    /// ignored. Duplicate edges are collapsed.
    pub(crate) fn add_dependency(&mut self, from: &str, to: &str) {
        let (Some(&from_idx), Some(&to_idx)) = (self.node_map.get(from), self.node_map.get(to))
        else {
            return;
        };
        if !self.graph.contains_edge(from_idx, to_idx) {
            self.graph.add_edge(from_idx, to_idx, ());
        }
    }

    /// Run the combined cycle-detection / topological-sort traversal.
    ///
    /// On a cycle the traversal aborts and the order is left empty - an
    /// ordering over a cyclic graph carries no meaning.
    pub(crate) fn sort(&self) -> SortOutcome {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|node| (node, Color::White)).collect();
        let mut path: Vec<NodeIndex> = Vec::new();
        let mut order: Vec<String> = Vec::with_capacity(self.graph.node_count());

        for node in self.graph.node_indices() {
            if matches!(colors.get(&node), Some(Color::White))
                && let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path, &mut order)
            {
                debug!(cycle = %cycle.join(" -> "), "dependency cycle detected");
                return SortOutcome {
                    sorted: Vec::new(),
                    cyclic: true,
                };
            }
        }

        SortOutcome {
            sorted: order,
            cyclic: false,
        }
    }

    /// DFS visit. Returns the cycle chain if one is found, appending to
    /// `order` in post-order otherwise.
    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
        order: &mut Vec<String>,
    ) -> Option<Vec<String>> {
        colors.insert(node, Color::Gray);
        path.push(node);

        // petgraph yields neighbors most-recently-added first; reverse to
        // traverse dependencies in declaration order.
        let mut neighbors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        neighbors.reverse();

        for neighbor in neighbors {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    // Back-edge: the cycle is the path suffix from the gray
                    // node, closed by repeating it.
                    let start = path.iter().position(|n| *n == neighbor).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|n| self.graph[*n].clone()).collect();
                    cycle.push(self.graph[neighbor].clone());
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path, order) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        order.push(self.graph[node].clone());
        None
    }

    #[cfg(test)]
    fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
