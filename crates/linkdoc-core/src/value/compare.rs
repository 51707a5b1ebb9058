use serde_json::{Map, Number, Value};
use std::{borrow::Cow, cmp::Ordering};

// Canonical variant rank used for mixed-type ordering.
const fn canonical_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total canonical comparator used by sorting.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
///
/// Mixed-variant comparisons are rank-only and must remain deterministic.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = canonical_rank(left).cmp(&canonical_rank(right));
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => cmp_number(a, b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(a), Value::Array(b)) => cmp_list(a, b),
        (Value::Object(a), Value::Object(b)) => cmp_map(a, b),
        _ => Ordering::Equal,
    }
}

/// Compare optional values with missing values ordered first.
#[must_use]
pub fn compare_optional(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => canonical_cmp(a, b),
    }
}

fn cmp_number(left: &Number, right: &Number) -> Ordering {
    // integers compare exactly; mixed forms fall back to f64 total order
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        return a.cmp(&b);
    }
    if let (Some(a), Some(b)) = (left.as_u64(), right.as_u64()) {
        return a.cmp(&b);
    }

    let a = left.as_f64().unwrap_or(f64::NAN);
    let b = right.as_f64().unwrap_or(f64::NAN);

    a.total_cmp(&b)
}

fn cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (a, b) in left.iter().zip(right) {
        let ord = canonical_cmp(a, b);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len())
}

fn cmp_map(left: &Map<String, Value>, right: &Map<String, Value>) -> Ordering {
    let mut left_entries: Vec<_> = left.iter().collect();
    let mut right_entries: Vec<_> = right.iter().collect();
    left_entries.sort_by(|a, b| a.0.cmp(b.0));
    right_entries.sort_by(|a, b| a.0.cmp(b.0));

    for ((ka, va), (kb, vb)) in left_entries.iter().zip(&right_entries) {
        let ord = ka.cmp(kb).then_with(|| canonical_cmp(va, vb));
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left_entries.len().cmp(&right_entries.len())
}

/// Case-fold text for case-insensitive comparisons.
#[must_use]
pub fn fold_ci(s: &str) -> Cow<'_, str> {
    if s.is_ascii() {
        if s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Owned(s.to_ascii_lowercase());
        }
        return Cow::Borrowed(s);
    }

    // NOTE: Unicode fallback uses simple lowercasing, not full casefolding.
    Cow::Owned(s.to_lowercase())
}

/// Case-insensitive substring containment.
#[must_use]
pub fn text_contains_ci(haystack: &str, needle: &str) -> bool {
    fold_ci(haystack).contains(fold_ci(needle).as_ref())
}
