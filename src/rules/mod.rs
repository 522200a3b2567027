//! Per-pair matching rules.
//!
//! - [`strong`]: exact, case-sensitive equality on identifying fields
//! - [`fuzzy`]: case-insensitive near matches aggregated into a score
//!
//! Both engines read only the two records they are given, so a pair can be
//! evaluated on any thread.

pub mod fuzzy;
pub mod strong;

use crate::record::{Field, UserRecord};

/// Both sides' values of `field`, when both are present.
pub(crate) fn both<'r>(
    a: &'r UserRecord,
    b: &'r UserRecord,
    field: Field,
) -> Option<(&'r str, &'r str)> {
    Some((a.field(field)?, b.field(field)?))
}
