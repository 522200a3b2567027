//! Loading user records from JSON and CSV files.
//!
//! Ingestion is where malformed input is rejected: a row without an id, an
//! empty id, or a repeated id stops the load before any matching runs.
//!
//! JSON input is an array of objects. Unknown keys are ignored, so raw dumps
//! from the upstream user API load as-is. `employment` may be plain text or
//! the upstream `{"title": ..., "key_skill": ...}` object.

use std::path::Path;

use serde::Deserialize;

use crate::error::{RecordError, RecordResult};
use crate::record::{RecordId, RecordSet, UserRecord};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmploymentValue {
    Text(String),
    Detail {
        title: Option<String>,
        key_skill: Option<String>,
    },
}

impl EmploymentValue {
    fn into_text(self) -> Option<String> {
        match self {
            EmploymentValue::Text(s) => Some(s),
            EmploymentValue::Detail { title, key_skill } => {
                let parts: Vec<String> = [title, key_skill]
                    .into_iter()
                    .flatten()
                    .filter(|s| !s.is_empty())
                    .collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonRow {
    id: Option<RecordId>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    #[serde(alias = "social_insurance_number")]
    national_id: Option<String>,
    date_of_birth: Option<String>,
    employment: Option<EmploymentValue>,
    gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    id: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    #[serde(alias = "social_insurance_number")]
    national_id: Option<String>,
    date_of_birth: Option<String>,
    employment: Option<String>,
    gender: Option<String>,
}

fn require_id(id: Option<RecordId>, index: usize) -> RecordResult<RecordId> {
    match id {
        None => Err(RecordError::MissingId { index }),
        Some(id) if id == RecordId::Text(String::new()) => Err(RecordError::EmptyId { index }),
        Some(id) => Ok(id),
    }
}

impl JsonRow {
    fn into_record(self, index: usize) -> RecordResult<UserRecord> {
        Ok(UserRecord {
            id: require_id(self.id, index)?,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            national_id: self.national_id,
            date_of_birth: self.date_of_birth,
            employment: self.employment.and_then(EmploymentValue::into_text),
            gender: self.gender,
        })
    }
}

impl CsvRow {
    fn into_record(self, index: usize) -> RecordResult<UserRecord> {
        let id = self.id.map(|raw| RecordId::parse(&raw));
        Ok(UserRecord {
            id: require_id(id, index)?,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            national_id: self.national_id,
            date_of_birth: self.date_of_birth,
            employment: self.employment,
            gender: self.gender,
        })
    }
}

/// Parse a JSON array of user objects. `origin` names the source in errors.
pub fn records_from_json(content: &str, origin: &str) -> RecordResult<RecordSet> {
    let rows: Vec<JsonRow> = serde_json::from_str(content).map_err(|e| RecordError::Parse {
        path: origin.to_string(),
        message: e.to_string(),
    })?;
    let records = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| row.into_record(index))
        .collect::<RecordResult<Vec<_>>>()?;
    RecordSet::new(records)
}

/// Parse CSV text with a header row. `origin` names the source in errors.
pub fn records_from_csv(content: &str, origin: &str) -> RecordResult<RecordSet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|e| RecordError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        records.push(row.into_record(index)?);
    }
    RecordSet::new(records)
}

/// Load records from a `.json` or `.csv` file, chosen by extension.
pub fn load_records(path: &Path) -> RecordResult<RecordSet> {
    let origin = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let content = std::fs::read_to_string(path).map_err(|source| RecordError::Read {
        path: origin.clone(),
        source,
    })?;

    let records = match extension.as_deref() {
        Some("json") => records_from_json(&content, &origin)?,
        Some("csv") => records_from_csv(&content, &origin)?,
        _ => return Err(RecordError::UnsupportedFormat { path: origin }),
    };

    tracing::info!(path = %origin, records = records.len(), "loaded user records");
    Ok(records)
}
