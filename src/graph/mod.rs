//! Connection graphs: undirected, labeled, one edge per record pair.
//!
//! - [`ConnectionGraph`] ([`index`]): petgraph `UnGraph` with an id → node map
//! - [`EdgeLabelPolicy`]: what happens when a pair is connected twice
//!
//! Strong and fuzzy connections are folded into separate graphs.

pub mod index;

pub use index::ConnectionGraph;

use serde::{Deserialize, Serialize};

use crate::record::RecordId;

/// How an edge label is updated when the same pair is connected again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeLabelPolicy {
    /// The most recent connection's label replaces the previous one.
    #[default]
    LastWriteWins,
    /// Every label is kept, in fold order.
    Accumulate,
}

/// Labels carried by one edge.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeLabels(pub Vec<String>);

impl EdgeLabels {
    /// The label to show for this edge: the latest one recorded.
    pub fn current(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn all(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for EdgeLabels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

/// An edge as seen from outside the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEdge {
    /// First endpoint, as in the connection that created the edge.
    pub a: RecordId,
    /// Second endpoint.
    pub b: RecordId,
    /// Labels in fold order; one entry under last-write-wins.
    pub labels: Vec<String>,
}

impl ConnectionEdge {
    /// All labels joined with `"; "`.
    pub fn label(&self) -> String {
        self.labels.join("; ")
    }
}
