//! Export types for serializing link results.
//!
//! These give a plain, serde-friendly view of the graphs and connection
//! lists for JSON output, plus DOT documents for Graphviz.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::connection::{FuzzyConnection, StrongConnection};
use crate::error::{ExportError, ExportResult};
use crate::graph::{ConnectionEdge, ConnectionGraph};
use crate::linker::LinkRun;
use crate::record::RecordId;

/// Exported graph: connected ids and labeled edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    /// Ids with at least one edge, in first-seen order.
    pub nodes: Vec<RecordId>,
    /// Edges in creation order.
    pub edges: Vec<ConnectionEdge>,
}

impl From<&ConnectionGraph> for GraphExport {
    fn from(graph: &ConnectionGraph) -> Self {
        Self {
            nodes: graph.nodes(),
            edges: graph.edges(),
        }
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkReport {
    /// Number of input records.
    pub records: usize,
    /// Number of pairs both engines ran on.
    pub pairs_evaluated: usize,
    /// Every strong connection, in pair order.
    pub strong: Vec<StrongConnection>,
    /// Every fuzzy connection, in pair order.
    pub fuzzy: Vec<FuzzyConnection>,
    /// Graph folded from `strong`.
    pub strong_graph: GraphExport,
    /// Graph folded from `fuzzy`.
    pub fuzzy_graph: GraphExport,
}

impl LinkReport {
    pub fn new(records: usize, run: &LinkRun) -> Self {
        Self {
            records,
            pairs_evaluated: run.connections.pairs_evaluated,
            strong: run.connections.strong.clone(),
            fuzzy: run.connections.fuzzy.clone(),
            strong_graph: GraphExport::from(&run.graphs.strong),
            fuzzy_graph: GraphExport::from(&run.graphs.fuzzy),
        }
    }

    pub fn to_json(&self) -> ExportResult<String> {
        to_json_pretty(self)
    }
}

/// Pretty-printed JSON for any serializable export value.
pub fn to_json_pretty<T: Serialize>(value: &T) -> ExportResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ExportError::Serialize {
        message: e.to_string(),
    })
}

/// Both graphs as one DOT text, strong first.
pub fn graphs_to_dot(run: &LinkRun) -> String {
    format!(
        "// strong connections\n{}\n// fuzzy connections\n{}",
        run.graphs.strong.to_dot(),
        run.graphs.fuzzy.to_dot()
    )
}

/// Write export text to `path`.
pub fn write_export(path: &Path, content: &str) -> ExportResult<()> {
    std::fs::write(path, content).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "wrote export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linker::Linker;
    use crate::record::{Field, RecordSet, UserRecord};

    fn sample_run() -> (RecordSet, LinkRun) {
        let records = RecordSet::new(vec![
            UserRecord::new(1).with(Field::Email, "a@x.com"),
            UserRecord::new(2).with(Field::Email, "a@x.com"),
            UserRecord::new(3),
        ])
        .unwrap();
        let run = Linker::default().run(&records);
        (records, run)
    }

    #[test]
    fn report_json_has_graphs_and_lists() {
        let (records, run) = sample_run();
        let report = LinkReport::new(records.len(), &run);
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["records"], 3);
        assert_eq!(value["pairs_evaluated"], 3);
        assert_eq!(value["strong"][0]["field"], "email");
        assert_eq!(value["strong_graph"]["nodes"], serde_json::json!([1, 2]));
        assert_eq!(
            value["strong_graph"]["edges"][0]["labels"],
            serde_json::json!(["email: a@x.com"])
        );
        assert_eq!(value["fuzzy_graph"]["edges"], serde_json::json!([]));
    }

    #[test]
    fn report_round_trips() {
        let (records, run) = sample_run();
        let report = LinkReport::new(records.len(), &run);
        let back: LinkReport = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn dot_contains_both_graphs() {
        let (_, run) = sample_run();
        let dot = graphs_to_dot(&run);
        assert_eq!(dot.matches("graph {").count(), 2);
        assert!(dot.contains("email: a@x.com"));
    }

    #[test]
    fn write_reports_bad_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = write_export(&path, "{}").unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
