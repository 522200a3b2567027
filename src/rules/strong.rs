//! Strong-match rules: deterministic equality on identifying fields.
//!
//! Rules are independent; a pair matching on email and phone yields two
//! connections. Values are compared verbatim.

use crate::connection::{StrongConnection, StrongField};
use crate::record::{Field, UserRecord};

use super::both;

/// Single-field identifier rules, in emission order.
const IDENTIFIER_RULES: [(StrongField, Field); 3] = [
    (StrongField::Email, Field::Email),
    (StrongField::PhoneNumber, Field::PhoneNumber),
    (StrongField::NationalId, Field::NationalId),
];

/// `"<first> <last> <dob>"` when all three are present and equal on both sides.
fn name_and_dob(a: &UserRecord, b: &UserRecord) -> Option<String> {
    let (first, first_b) = both(a, b, Field::FirstName)?;
    let (last, last_b) = both(a, b, Field::LastName)?;
    let (dob, dob_b) = both(a, b, Field::DateOfBirth)?;
    (first == first_b && last == last_b && dob == dob_b).then(|| format!("{first} {last} {dob}"))
}

/// Evaluate every strong rule for the ordered pair `(a, b)`.
pub fn evaluate(a: &UserRecord, b: &UserRecord) -> Vec<StrongConnection> {
    let connection = |field: StrongField, value: String| StrongConnection {
        a: a.id.clone(),
        b: b.id.clone(),
        field,
        value,
    };

    let mut found: Vec<StrongConnection> = IDENTIFIER_RULES
        .iter()
        .filter_map(|&(strong, field)| {
            let (va, vb) = both(a, b, field)?;
            (va == vb).then(|| connection(strong, va.to_string()))
        })
        .collect();

    if let Some(combined) = name_and_dob(a, b) {
        found.push(connection(StrongField::NameDob, combined));
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: i64) -> UserRecord {
        UserRecord::new(id)
    }

    #[test]
    fn equal_email_only() {
        let a = person(1).with(Field::Email, "a@x.com");
        let b = person(2).with(Field::Email, "a@x.com");
        let found = evaluate(&a, &b);
        assert_eq!(
            found,
            vec![StrongConnection {
                a: 1.into(),
                b: 2.into(),
                field: StrongField::Email,
                value: "a@x.com".into(),
            }]
        );
    }

    #[test]
    fn rules_are_non_exclusive() {
        let a = person(1)
            .with(Field::Email, "a@x.com")
            .with(Field::PhoneNumber, "555-0100")
            .with(Field::NationalId, "123");
        let b = person(2)
            .with(Field::Email, "a@x.com")
            .with(Field::PhoneNumber, "555-0100")
            .with(Field::NationalId, "123");
        let fields: Vec<StrongField> = evaluate(&a, &b).iter().map(|c| c.field).collect();
        assert_eq!(
            fields,
            vec![StrongField::Email, StrongField::PhoneNumber, StrongField::NationalId]
        );
    }

    #[test]
    fn identifiers_are_case_sensitive() {
        let a = person(1).with(Field::Email, "A@x.com");
        let b = person(2).with(Field::Email, "a@x.com");
        assert!(evaluate(&a, &b).is_empty());
    }

    #[test]
    fn absent_on_one_side_never_matches() {
        let a = person(1).with(Field::PhoneNumber, "");
        let b = person(2).with(Field::PhoneNumber, "");
        assert!(evaluate(&a, &b).is_empty());
    }

    #[test]
    fn name_and_dob_requires_all_three() {
        let base = |id| {
            person(id)
                .with(Field::FirstName, "Jane")
                .with(Field::LastName, "Doe")
        };
        let a = base(1).with(Field::DateOfBirth, "1990-01-01");
        let b = base(2).with(Field::DateOfBirth, "1990-01-01");
        let found = evaluate(&a, &b);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field, StrongField::NameDob);
        assert_eq!(found[0].value, "Jane Doe 1990-01-01");

        let no_dob = base(3);
        assert!(evaluate(&a, &no_dob).is_empty());

        let other_dob = base(4).with(Field::DateOfBirth, "1990-01-02");
        assert!(evaluate(&a, &other_dob).is_empty());
    }

    #[test]
    fn name_and_dob_is_case_sensitive() {
        let a = person(1)
            .with(Field::FirstName, "Jane")
            .with(Field::LastName, "Doe")
            .with(Field::DateOfBirth, "1990-01-01");
        let b = person(2)
            .with(Field::FirstName, "jane")
            .with(Field::LastName, "Doe")
            .with(Field::DateOfBirth, "1990-01-01");
        assert!(evaluate(&a, &b).is_empty());
    }
}
