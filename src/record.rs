//! User record model.
//!
//! A [`UserRecord`] is one normalized person entry handed over by the
//! ingestion side. Every field except the id is optional, and an empty string
//! is treated exactly like a missing value: [`UserRecord::field`] returns
//! `None` for both. A [`RecordSet`] is the validated collection the linker
//! runs over; it guarantees ids are unique.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RecordError, RecordResult};

/// Stable identifier of a user record: integer or text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Parse an id from raw text, preferring the integer form.
    ///
    /// Only text that is the canonical rendering of an integer becomes
    /// `Int`; `"007"` or `"+5"` stay text so distinct inputs stay distinct.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => RecordId::Int(n),
            _ => RecordId::Text(raw.to_string()),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, RecordId::Text(s) if s.is_empty())
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// The optional text fields of a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    NationalId,
    DateOfBirth,
    Employment,
    Gender,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::PhoneNumber,
        Field::NationalId,
        Field::DateOfBirth,
        Field::Employment,
        Field::Gender,
    ];

    /// Column name used in input files and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::PhoneNumber => "phone_number",
            Field::NationalId => "national_id",
            Field::DateOfBirth => "date_of_birth",
            Field::Employment => "employment",
            Field::Gender => "gender",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name == "social_insurance_number" {
            return Ok(Field::NationalId);
        }
        Field::ALL
            .into_iter()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| {
                let known: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
                format!("unknown field `{name}` (expected one of: {})", known.join(", "))
            })
    }
}

/// One person entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: RecordId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub national_id: Option<String>,
    pub date_of_birth: Option<String>,
    pub employment: Option<String>,
    pub gender: Option<String>,
}

impl UserRecord {
    /// Create a record with the given id and every other field absent.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
            email: None,
            phone_number: None,
            national_id: None,
            date_of_birth: None,
            employment: None,
            gender: None,
        }
    }

    /// Set a field value.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// The value of `field`, or `None` when it is missing or empty.
    pub fn field(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref().filter(|v| !v.is_empty())
    }

    /// Whether `field` carries a non-empty value.
    pub fn has(&self, field: Field) -> bool {
        self.field(field).is_some()
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::PhoneNumber => &self.phone_number,
            Field::NationalId => &self.national_id,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Employment => &self.employment,
            Field::Gender => &self.gender,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::PhoneNumber => &mut self.phone_number,
            Field::NationalId => &mut self.national_id,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::Employment => &mut self.employment,
            Field::Gender => &mut self.gender,
        }
    }
}

/// Validated, ordered collection of user records with unique ids.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<UserRecord>,
}

impl RecordSet {
    /// Validate `records` and wrap them.
    ///
    /// Fails on the first empty text id or repeated id; input order is kept
    /// because it defines pair orientation.
    pub fn new(records: Vec<UserRecord>) -> RecordResult<Self> {
        let mut seen: HashMap<&RecordId, usize> = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.id.is_empty() {
                return Err(RecordError::EmptyId { index });
            }
            if let Some(&first) = seen.get(&record.id) {
                return Err(RecordError::DuplicateId {
                    id: record.id.to_string(),
                    first,
                    second: index,
                });
            }
            seen.insert(&record.id, index);
        }
        drop(seen);
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&UserRecord> {
        self.records.get(index)
    }

    pub fn as_slice(&self) -> &[UserRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, UserRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a UserRecord;
    type IntoIter = std::slice::Iter<'a, UserRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
