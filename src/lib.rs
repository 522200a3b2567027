// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # kinlink
//!
//! Detects which user records likely describe the same or related people.
//!
//! ## Architecture
//!
//! - **Records** (`record`, `ingest`): normalized user records, JSON/CSV loading
//! - **Similarity** (`similarity`): contiguous-matching-block ratio
//! - **Rules** (`rules`): strong (exact identifiers) and fuzzy (near names/employment)
//! - **Linker** (`linker`, `pairs`): all-pairs evaluation, sequential or rayon-parallel
//! - **Graphs** (`graph`): petgraph-backed undirected connection graphs
//! - **Reports** (`export`, `profile`): JSON/DOT output and field frequencies
//!
//! ## Library usage
//!
//! ```
//! use kinlink::linker::Linker;
//! use kinlink::record::{Field, RecordSet, UserRecord};
//!
//! let records = RecordSet::new(vec![
//!     UserRecord::new(1).with(Field::Email, "a@x.com").with(Field::FirstName, "Jon"),
//!     UserRecord::new(2).with(Field::Email, "a@x.com").with(Field::FirstName, "John"),
//! ])
//! .unwrap();
//!
//! let run = Linker::default().run(&records);
//! assert_eq!(run.connections.strong.len(), 1);
//! assert!(run.connections.fuzzy.is_empty());
//! assert_eq!(run.graphs.strong.edge_count(), 1);
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod export;
pub mod graph;
pub mod ingest;
pub mod linker;
pub mod pairs;
pub mod profile;
pub mod record;
pub mod rules;
pub mod similarity;
