use std::cmp::Ordering;

use lablens_types::{FieldValue, FilterCondition, FilterValue, Operator, Record};

/// Evaluate one condition against one record.
///
/// Never fails. A value that does not read as the field's kind (an age of
/// "abc", a sex of "X", an unparseable date) matches nothing under any
/// operator, `ne` included. Past that check, `ne` is the negation of `eq`,
/// and a comparison whose sides do not both coerce is false.
pub fn evaluate(record: &Record, condition: &FilterCondition) -> bool {
    let rhs = &condition.value;
    if !condition.field.kind().accepts(rhs) {
        return false;
    }
    let lhs = record.get(condition.field);

    match condition.operator {
        Operator::Eq => equals(lhs, rhs),
        Operator::Ne => !equals(lhs, rhs),
        Operator::Gt => compare(lhs, rhs).is_some_and(Ordering::is_gt),
        Operator::Lt => compare(lhs, rhs).is_some_and(Ordering::is_lt),
        Operator::Gte => compare(lhs, rhs).is_some_and(Ordering::is_ge),
        Operator::Lte => compare(lhs, rhs).is_some_and(Ordering::is_le),
        Operator::Contains => contains(lhs, rhs),
    }
}

fn equals(lhs: FieldValue<'_>, rhs: &FilterValue) -> bool {
    match lhs {
        FieldValue::Null => false,
        FieldValue::Date(date) => rhs.as_date() == Some(date),
        _ => match (field_number(lhs), rhs.as_number()) {
            (Some(a), Some(b)) => a == b,
            _ => lhs.to_string() == rhs.to_string(),
        },
    }
}

/// Ordering of field against value, or `None` on coercion mismatch
fn compare(lhs: FieldValue<'_>, rhs: &FilterValue) -> Option<Ordering> {
    match lhs {
        FieldValue::Date(date) => rhs.as_date().map(|value| date.cmp(&value)),
        _ => {
            let a = field_number(lhs)?;
            let b = rhs.as_number()?;
            a.partial_cmp(&b)
        }
    }
}

fn contains(lhs: FieldValue<'_>, rhs: &FilterValue) -> bool {
    if matches!(lhs, FieldValue::Null) {
        return false;
    }
    lhs.to_string()
        .to_lowercase()
        .contains(&rhs.to_string().to_lowercase())
}

fn field_number(value: FieldValue<'_>) -> Option<f64> {
    match value {
        FieldValue::Number(n) => Some(n),
        FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        FieldValue::Date(_) | FieldValue::Null => None,
    }
}
