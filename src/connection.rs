//! Detected relationships between two user records.
//!
//! [`StrongConnection`] is a deterministic exact-field match,
//! [`FuzzyConnection`] an aggregate of near matches. [`Connection`] tags
//! either one so a single stream can feed the graph builder.

use serde::{Deserialize, Serialize};

use crate::record::{Field, RecordId};

/// Which deterministic rule produced a strong connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrongField {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone_number")]
    PhoneNumber,
    #[serde(rename = "national_id")]
    NationalId,
    #[serde(rename = "name+dob")]
    NameDob,
}

impl StrongField {
    pub fn as_str(self) -> &'static str {
        match self {
            StrongField::Email => "email",
            StrongField::PhoneNumber => "phone_number",
            StrongField::NationalId => "national_id",
            StrongField::NameDob => "name+dob",
        }
    }
}

impl std::fmt::Display for StrongField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields compared by the fuzzy engine, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyField {
    FirstName,
    LastName,
    Employment,
}

impl FuzzyField {
    pub const ALL: [FuzzyField; 3] = [
        FuzzyField::FirstName,
        FuzzyField::LastName,
        FuzzyField::Employment,
    ];

    /// Minimum similarity ratio (inclusive) for the field to score.
    pub fn threshold(self) -> f64 {
        match self {
            FuzzyField::FirstName => 0.85,
            FuzzyField::LastName => 0.85,
            FuzzyField::Employment => 0.75,
        }
    }

    /// The record field this fuzzy field reads.
    pub fn record_field(self) -> Field {
        match self {
            FuzzyField::FirstName => Field::FirstName,
            FuzzyField::LastName => Field::LastName,
            FuzzyField::Employment => Field::Employment,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.record_field().as_str()
    }
}

impl std::fmt::Display for FuzzyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An exact match on one identifying field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrongConnection {
    /// Earlier record of the pair in input order.
    pub a: RecordId,
    /// Later record of the pair.
    pub b: RecordId,
    /// Rule that matched.
    pub field: StrongField,
    /// The shared value; `"<first> <last> <dob>"` for name+dob.
    pub value: String,
}

/// One field's contribution to a fuzzy score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuzzyReason {
    /// Field that cleared its threshold.
    pub field: FuzzyField,
    /// Similarity of the lower-cased values.
    pub ratio: f64,
}

impl std::fmt::Display for FuzzyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:.2}", self.field, self.ratio)
    }
}

/// A near match on several fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyConnection {
    /// Earlier record of the pair in input order.
    pub a: RecordId,
    /// Later record of the pair.
    pub b: RecordId,
    /// Number of fields that scored.
    pub score: u32,
    /// One entry per scoring field, in field order.
    pub reasons: Vec<FuzzyReason>,
}

impl FuzzyConnection {
    /// Reasons rendered as `"<field> <ratio>"` strings, in field order.
    pub fn reason_strings(&self) -> Vec<String> {
        self.reasons.iter().map(ToString::to_string).collect()
    }
}

/// Anything that can become a labeled edge between two records.
pub trait Labeled {
    fn endpoints(&self) -> (&RecordId, &RecordId);
    fn label(&self) -> String;
}

impl Labeled for StrongConnection {
    fn endpoints(&self) -> (&RecordId, &RecordId) {
        (&self.a, &self.b)
    }

    fn label(&self) -> String {
        format!("{}: {}", self.field, self.value)
    }
}

impl Labeled for FuzzyConnection {
    fn endpoints(&self) -> (&RecordId, &RecordId) {
        (&self.a, &self.b)
    }

    fn label(&self) -> String {
        format!("score: {} ({})", self.score, self.reason_strings().join(", "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    Strong,
    Fuzzy,
}

/// Either kind of connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Connection {
    Strong(StrongConnection),
    Fuzzy(FuzzyConnection),
}

impl Connection {
    pub fn kind(&self) -> ConnectionKind {
        match self {
            Connection::Strong(_) => ConnectionKind::Strong,
            Connection::Fuzzy(_) => ConnectionKind::Fuzzy,
        }
    }
}

impl Labeled for Connection {
    fn endpoints(&self) -> (&RecordId, &RecordId) {
        match self {
            Connection::Strong(c) => c.endpoints(),
            Connection::Fuzzy(c) => c.endpoints(),
        }
    }

    fn label(&self) -> String {
        match self {
            Connection::Strong(c) => c.label(),
            Connection::Fuzzy(c) => c.label(),
        }
    }
}

impl From<StrongConnection> for Connection {
    fn from(c: StrongConnection) -> Self {
        Connection::Strong(c)
    }
}

impl From<FuzzyConnection> for Connection {
    fn from(c: FuzzyConnection) -> Self {
        Connection::Fuzzy(c)
    }
}
