//! Pairwise linking: every unordered record pair through both rule engines.
//!
//! Each run builds and returns fresh [`Connections`]; nothing is shared
//! between runs. In parallel mode the outer rows are split into contiguous
//! ranges, evaluated on rayon workers and concatenated in row order, so the
//! output is identical to a sequential run.

use std::ops::Range;

use rayon::prelude::*;

use crate::config::LinkerConfig;
use crate::connection::{Connection, FuzzyConnection, StrongConnection};
use crate::error::{ConfigError, ConfigResult};
use crate::graph::{ConnectionGraph, EdgeLabelPolicy};
use crate::pairs::{PairIndices, balanced_row_ranges};
use crate::record::{RecordSet, UserRecord};
use crate::rules::{fuzzy, strong};

/// Ranges handed to each worker; extra ranges smooth out uneven rows.
const RANGES_PER_THREAD: usize = 4;

/// Connections found by one run, in pair enumeration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connections {
    pub strong: Vec<StrongConnection>,
    pub fuzzy: Vec<FuzzyConnection>,
    /// Number of pairs both engines ran on.
    pub pairs_evaluated: usize,
}

impl Connections {
    fn append(&mut self, mut other: Connections) {
        self.strong.append(&mut other.strong);
        self.fuzzy.append(&mut other.fuzzy);
        self.pairs_evaluated += other.pairs_evaluated;
    }

    pub fn is_empty(&self) -> bool {
        self.strong.is_empty() && self.fuzzy.is_empty()
    }

    /// Strong connections followed by fuzzy ones, as tagged values.
    pub fn iter(&self) -> impl Iterator<Item = Connection> + '_ {
        self.strong
            .iter()
            .cloned()
            .map(Connection::Strong)
            .chain(self.fuzzy.iter().cloned().map(Connection::Fuzzy))
    }

    /// Fold both lists into their graphs.
    pub fn graphs(&self, policy: EdgeLabelPolicy) -> LinkGraphs {
        LinkGraphs {
            strong: ConnectionGraph::fold(&self.strong, policy),
            fuzzy: ConnectionGraph::fold(&self.fuzzy, policy),
        }
    }
}

/// The two relationship graphs of a run.
#[derive(Debug, Clone, Default)]
pub struct LinkGraphs {
    pub strong: ConnectionGraph,
    pub fuzzy: ConnectionGraph,
}

/// Connections plus the graphs folded from them.
#[derive(Debug, Clone)]
pub struct LinkRun {
    pub connections: Connections,
    pub graphs: LinkGraphs,
}

/// Run both engines on the ordered pair `(a, b)`, appending to `out`.
pub fn evaluate_pair(a: &UserRecord, b: &UserRecord, out: &mut Connections) {
    out.strong.extend(strong::evaluate(a, b));
    if let Some(found) = fuzzy::evaluate(a, b) {
        out.fuzzy.push(found);
    }
    out.pairs_evaluated += 1;
}

fn evaluate_rows(records: &[UserRecord], rows: Range<usize>) -> Connections {
    let mut out = Connections::default();
    for (i, j) in PairIndices::rows(records.len(), rows) {
        evaluate_pair(&records[i], &records[j], &mut out);
    }
    out
}

/// Link on the calling thread.
pub fn link_sequential(records: &[UserRecord]) -> Connections {
    evaluate_rows(records, 0..records.len())
}

/// Link on the current rayon pool.
pub fn link_parallel(records: &[UserRecord]) -> Connections {
    let parts = rayon::current_num_threads() * RANGES_PER_THREAD;
    let ranges = balanced_row_ranges(records.len(), parts);
    tracing::debug!(
        ranges = ranges.len(),
        threads = rayon::current_num_threads(),
        "partitioned pair rows"
    );

    let partials: Vec<Connections> = ranges
        .into_par_iter()
        .map(|rows| evaluate_rows(records, rows))
        .collect();

    let mut out = Connections::default();
    for partial in partials {
        out.append(partial);
    }
    out
}

/// Configured linker. Owns a dedicated worker pool when `threads` is set.
pub struct Linker {
    config: LinkerConfig,
    pool: Option<rayon::ThreadPool>,
}

impl Linker {
    pub fn new(config: LinkerConfig) -> ConfigResult<Self> {
        config.validate()?;
        let pool = match config.threads {
            Some(threads) if config.parallel => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("kinlink-{i}"))
                    .build()
                    .map_err(|e| ConfigError::ThreadPool {
                        message: e.to_string(),
                    })?,
            ),
            _ => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    /// Evaluate every pair in `records`.
    pub fn link(&self, records: &RecordSet) -> Connections {
        let n = records.len();
        let parallel = self.config.parallel && n >= self.config.min_parallel_records;
        let slice = records.as_slice();

        let out = match (&self.pool, parallel) {
            (_, false) => link_sequential(slice),
            (Some(pool), true) => pool.install(|| link_parallel(slice)),
            (None, true) => link_parallel(slice),
        };

        tracing::info!(
            records = n,
            pairs = out.pairs_evaluated,
            strong = out.strong.len(),
            fuzzy = out.fuzzy.len(),
            parallel,
            "linked records"
        );
        out
    }

    /// Link and fold the results into graphs using the configured policy.
    pub fn run(&self, records: &RecordSet) -> LinkRun {
        let connections = self.link(records);
        let graphs = connections.graphs(self.config.edge_labels);
        LinkRun {
            connections,
            graphs,
        }
    }
}

impl Default for Linker {
    fn default() -> Self {
        Self {
            config: LinkerConfig::default(),
            pool: None,
        }
    }
}

impl std::fmt::Debug for Linker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linker")
            .field("config", &self.config)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::StrongField;
    use crate::pairs::pair_count;
    use crate::record::Field;

    fn set(records: Vec<UserRecord>) -> RecordSet {
        RecordSet::new(records).unwrap()
    }

    fn crowd(n: i64) -> Vec<UserRecord> {
        let firsts = ["Jon", "John", "Jonathan", "Jonathon", "Kate", "Cate"];
        let lasts = ["Smith", "Smyth", "Anderson", "Andersen"];
        let jobs = ["Software Engineer", "Software Engineering", "Nurse", "Nursing"];
        (0..n)
            .map(|i| {
                let k = i as usize;
                UserRecord::new(i)
                    .with(Field::FirstName, firsts[k % firsts.len()])
                    .with(Field::LastName, lasts[k % lasts.len()])
                    .with(Field::Employment, jobs[(k / 2) % jobs.len()])
                    .with(Field::Email, format!("user{}@x.com", k % 7))
            })
            .collect()
    }

    #[test]
    fn empty_input_yields_empty_graphs() {
        let run = Linker::default().run(&RecordSet::default());
        assert!(run.connections.is_empty());
        assert_eq!(run.connections.pairs_evaluated, 0);
        assert_eq!(run.graphs.strong.node_count(), 0);
        assert_eq!(run.graphs.fuzzy.edge_count(), 0);
    }

    #[test]
    fn evaluates_each_pair_once() {
        for n in [1, 2, 5, 13] {
            let records = set(crowd(n));
            let out = link_sequential(records.as_slice());
            assert_eq!(out.pairs_evaluated, pair_count(n as usize));
        }
    }

    #[test]
    fn pair_orientation_follows_input_order() {
        let records = set(vec![
            UserRecord::new(9).with(Field::Email, "a@x.com"),
            UserRecord::new(3).with(Field::Email, "a@x.com"),
        ]);
        let out = link_sequential(records.as_slice());
        assert_eq!(out.strong.len(), 1);
        assert_eq!(out.strong[0].a, 9.into());
        assert_eq!(out.strong[0].b, 3.into());
        assert_eq!(out.strong[0].field, StrongField::Email);
    }

    #[test]
    fn parallel_matches_sequential() {
        let records = set(crowd(60));
        let sequential = link_sequential(records.as_slice());
        let parallel = link_parallel(records.as_slice());
        assert!(!sequential.strong.is_empty());
        assert!(!sequential.fuzzy.is_empty());
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn dedicated_pool_matches_sequential() {
        let records = set(crowd(40));
        let linker = Linker::new(LinkerConfig {
            threads: Some(3),
            min_parallel_records: 0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(linker.link(&records), link_sequential(records.as_slice()));
    }

    #[test]
    fn zero_threads_is_rejected() {
        let err = Linker::new(LinkerConfig {
            threads: Some(0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroThreads));
    }

    #[test]
    fn tagged_stream_lists_strong_then_fuzzy() {
        let records = set(vec![
            UserRecord::new(1)
                .with(Field::Email, "a@x.com")
                .with(Field::FirstName, "Jonathan")
                .with(Field::LastName, "Anderson"),
            UserRecord::new(2)
                .with(Field::Email, "a@x.com")
                .with(Field::FirstName, "Jonathon")
                .with(Field::LastName, "Andersen"),
        ]);
        let out = link_sequential(records.as_slice());
        let kinds: Vec<_> = out.iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                crate::connection::ConnectionKind::Strong,
                crate::connection::ConnectionKind::Fuzzy
            ]
        );
    }
}
