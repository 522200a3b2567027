//! Fuzzy-match rules: near matches on names and employment.
//!
//! Each of [`FuzzyField::ALL`] scores one point when the lower-cased values
//! are similar enough but not identical. Identical values are left to the
//! strong engine. A pair needs [`QUALIFICATION_FLOOR`] points to produce a
//! [`FuzzyConnection`].

use crate::connection::{FuzzyConnection, FuzzyField, FuzzyReason};
use crate::record::UserRecord;
use crate::similarity::similarity;

use super::both;

/// Minimum aggregate score for a fuzzy connection.
pub const QUALIFICATION_FLOOR: u32 = 2;

/// Per-pair fuzzy evaluation before the qualification floor is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuzzyScore {
    pub score: u32,
    pub reasons: Vec<FuzzyReason>,
}

impl FuzzyScore {
    pub fn qualifies(&self) -> bool {
        self.score >= QUALIFICATION_FLOOR
    }
}

/// Whether `ratio` clears `field`'s threshold. The bound is inclusive.
pub fn meets_threshold(field: FuzzyField, ratio: f64) -> bool {
    ratio >= field.threshold()
}

/// Ratio for one field, or `None` when the field is skipped.
fn field_ratio(a: &UserRecord, b: &UserRecord, field: FuzzyField) -> Option<f64> {
    let (va, vb) = both(a, b, field.record_field())?;
    if va == vb {
        return None;
    }
    Some(similarity(&va.to_lowercase(), &vb.to_lowercase()))
}

/// Score the ordered pair `(a, b)` across all fuzzy fields.
pub fn score(a: &UserRecord, b: &UserRecord) -> FuzzyScore {
    let mut result = FuzzyScore::default();
    for field in FuzzyField::ALL {
        let Some(ratio) = field_ratio(a, b, field) else {
            continue;
        };
        if meets_threshold(field, ratio) {
            result.score += 1;
            result.reasons.push(FuzzyReason { field, ratio });
        }
    }
    result
}

/// Evaluate the ordered pair `(a, b)`, emitting a connection if it qualifies.
pub fn evaluate(a: &UserRecord, b: &UserRecord) -> Option<FuzzyConnection> {
    let FuzzyScore { score, reasons } = score(a, b);
    (score >= QUALIFICATION_FLOOR).then(|| FuzzyConnection {
        a: a.id.clone(),
        b: b.id.clone(),
        score,
        reasons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    fn named(id: i64, first: &str, last: &str) -> UserRecord {
        UserRecord::new(id)
            .with(Field::FirstName, first)
            .with(Field::LastName, last)
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(meets_threshold(FuzzyField::FirstName, 0.85));
        assert!(meets_threshold(FuzzyField::FirstName, 0.850000));
        assert!(!meets_threshold(FuzzyField::FirstName, 0.849999));
        assert!(meets_threshold(FuzzyField::Employment, 0.75));
        assert!(!meets_threshold(FuzzyField::Employment, 0.749999));
    }

    #[test]
    fn exact_boundary_ratio_scores() {
        // 17 shared characters out of 20 + 20: ratio is exactly 0.85.
        let a = UserRecord::new(1).with(Field::FirstName, "abcdefghijklmnopqrst");
        let b = UserRecord::new(2).with(Field::FirstName, "abcdefghijklmnopqxyz");
        let s = score(&a, &b);
        assert_eq!(s.score, 1);
        assert_eq!(s.reasons[0].field, FuzzyField::FirstName);
        assert_eq!(s.reasons[0].ratio, 0.85);
    }

    #[test]
    fn two_fields_qualify() {
        let a = named(1, "Jonathan", "Anderson");
        let b = named(2, "Jonathon", "Andersen");
        let c = evaluate(&a, &b).expect("pair should qualify");
        assert_eq!(c.score, 2);
        assert_eq!(c.reason_strings(), vec!["first_name 0.88", "last_name 0.88"]);
        assert_eq!(c.a, 1.into());
        assert_eq!(c.b, 2.into());
    }

    #[test]
    fn single_field_is_below_floor() {
        let a = UserRecord::new(1).with(Field::Employment, "Software Engineer");
        let b = UserRecord::new(2).with(Field::Employment, "Software Engineering");
        let s = score(&a, &b);
        assert_eq!(s.score, 1);
        assert!(!s.qualifies());
        assert!(evaluate(&a, &b).is_none());
    }

    #[test]
    fn exact_equality_is_skipped() {
        let a = named(1, "Catherine", "Smith");
        let b = named(2, "Katherine", "Smith");
        let s = score(&a, &b);
        assert_eq!(s.score, 1);
        assert_eq!(s.reasons.len(), 1);
        assert_eq!(s.reasons[0].field, FuzzyField::FirstName);
        assert!(evaluate(&a, &b).is_none());
    }

    #[test]
    fn comparison_ignores_case() {
        // Differ only by case: not exactly equal, lower-cased ratio is 1.0.
        let a = named(1, "JANE", "DOE");
        let b = named(2, "jane", "doe");
        let c = evaluate(&a, &b).expect("case variants should qualify");
        assert_eq!(c.reason_strings(), vec!["first_name 1.00", "last_name 1.00"]);
    }

    #[test]
    fn absent_fields_do_not_score() {
        let a = named(1, "Jonathan", "");
        let b = named(2, "Jonathon", "Andersen");
        assert_eq!(score(&a, &b).score, 1);
    }

    #[test]
    fn all_three_fields_in_order() {
        let a = named(1, "Jonathan", "Anderson").with(Field::Employment, "Software Engineer");
        let b = named(2, "Jonathon", "Andersen").with(Field::Employment, "software engineering");
        let c = evaluate(&a, &b).unwrap();
        assert_eq!(c.score, 3);
        let fields: Vec<FuzzyField> = c.reasons.iter().map(|r| r.field).collect();
        assert_eq!(fields, FuzzyField::ALL.to_vec());
    }
}
