//! Most-common value per field across a record set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::record::{Field, RecordSet};

/// Fields profiled when the caller does not choose.
pub const DEFAULT_PROFILE_FIELDS: [Field; 5] = [
    Field::FirstName,
    Field::LastName,
    Field::Gender,
    Field::DateOfBirth,
    Field::Employment,
];

/// The most frequent value of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFrequency {
    /// Field that was counted.
    pub property: Field,
    /// Its most frequent present value.
    pub value: String,
    /// How many records carry that value.
    pub frequency: usize,
}

/// Most frequent present value of each field in `fields`.
///
/// Absent values are not counted; a field with no present value is left
/// out. Ties go to the lexicographically smallest value.
pub fn most_common_values(records: &RecordSet, fields: &[Field]) -> Vec<FieldFrequency> {
    fields
        .iter()
        .filter_map(|&field| {
            let mut counts: HashMap<&str, usize> = HashMap::new();
            for value in records.iter().filter_map(|r| r.field(field)) {
                *counts.entry(value).or_default() += 1;
            }
            counts
                .into_iter()
                .max_by(|(va, ca), (vb, cb)| ca.cmp(cb).then_with(|| vb.cmp(va)))
                .map(|(value, frequency)| FieldFrequency {
                    property: field,
                    value: value.to_string(),
                    frequency,
                })
        })
        .collect()
}
