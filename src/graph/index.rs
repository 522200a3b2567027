//! In-memory connection graph.
//!
//! Uses `petgraph` for the graph structure and a `HashMap` for node lookups
//! by record id. Nodes exist only for ids that have at least one edge.

use std::collections::HashMap;

use petgraph::dot::Dot;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use crate::connection::Labeled;
use crate::record::RecordId;

use super::{ConnectionEdge, EdgeLabelPolicy, EdgeLabels};

/// Undirected graph over record ids with labeled edges.
#[derive(Clone)]
pub struct ConnectionGraph {
    graph: UnGraph<RecordId, EdgeLabels>,
    node_index: HashMap<RecordId, NodeIndex>,
    policy: EdgeLabelPolicy,
}

impl ConnectionGraph {
    /// Create a new empty graph.
    pub fn new(policy: EdgeLabelPolicy) -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            node_index: HashMap::new(),
            policy,
        }
    }

    /// Fold `connections` into a fresh graph, in iteration order.
    pub fn fold<'c, C, I>(connections: I, policy: EdgeLabelPolicy) -> Self
    where
        C: Labeled + 'c,
        I: IntoIterator<Item = &'c C>,
    {
        let mut graph = Self::new(policy);
        for connection in connections {
            graph.add_connection(connection);
        }
        graph
    }

    fn ensure_node(&mut self, id: &RecordId) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.clone());
        self.node_index.insert(id.clone(), idx);
        idx
    }

    /// Add or update the edge for one connection.
    pub fn add_connection<C: Labeled + ?Sized>(&mut self, connection: &C) {
        let (a, b) = connection.endpoints();
        self.add_edge(a, b, connection.label());
    }

    /// Add an edge between `a` and `b`, or update its label per the policy.
    pub fn add_edge(&mut self, a: &RecordId, b: &RecordId, label: String) {
        let ia = self.ensure_node(a);
        let ib = self.ensure_node(b);
        match self.graph.find_edge(ia, ib) {
            Some(edge) => {
                let labels = &mut self.graph[edge].0;
                if self.policy == EdgeLabelPolicy::LastWriteWins {
                    labels.clear();
                }
                labels.push(label);
            }
            None => {
                self.graph.add_edge(ia, ib, EdgeLabels(vec![label]));
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn has_node(&self, id: &RecordId) -> bool {
        self.node_index.contains_key(id)
    }

    /// Node ids in the order they first appeared.
    pub fn nodes(&self) -> Vec<RecordId> {
        self.graph.node_weights().cloned().collect()
    }

    /// Edges in creation order, endpoints as first inserted.
    pub fn edges(&self) -> Vec<ConnectionEdge> {
        self.graph
            .edge_references()
            .map(|e| ConnectionEdge {
                a: self.graph[e.source()].clone(),
                b: self.graph[e.target()].clone(),
                labels: e.weight().0.clone(),
            })
            .collect()
    }

    /// Labels on the edge between `a` and `b`, in either orientation.
    pub fn labels(&self, a: &RecordId, b: &RecordId) -> Option<&EdgeLabels> {
        let ia = *self.node_index.get(a)?;
        let ib = *self.node_index.get(b)?;
        let edge = self.graph.find_edge(ia, ib)?;
        self.graph.edge_weight(edge)
    }

    /// Current label on the edge between `a` and `b`.
    pub fn label(&self, a: &RecordId, b: &RecordId) -> Option<&str> {
        self.labels(a, b)?.current()
    }

    /// Ids directly connected to `id`.
    pub fn neighbors(&self, id: &RecordId) -> Vec<RecordId> {
        let Some(&idx) = self.node_index.get(id) else {
            return vec![];
        };
        self.graph
            .neighbors(idx)
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Graphviz DOT rendering with edge labels.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.graph))
    }
}

impl Default for ConnectionGraph {
    fn default() -> Self {
        Self::new(EdgeLabelPolicy::default())
    }
}

impl std::fmt::Debug for ConnectionGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .field("policy", &self.policy)
            .finish()
    }
}
