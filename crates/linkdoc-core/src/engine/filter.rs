//! Filter evaluation over raw rows.
//!
//! An item passes when every node holds. A node whose field is missing on
//! the item is vacuously true.

use crate::{
    query::{FilterNode, FilterOp},
    value::{FieldPresence, Row, canonical_cmp, text_contains_ci},
};
use serde_json::{Number, Value};
use std::{borrow::Cow, cmp::Ordering};

/// Evaluate every node against `row`.
#[must_use]
pub fn matches(row: &dyn Row, filters: &[FilterNode]) -> bool {
    filters.iter().all(|node| eval_node(row, node))
}

/// Keep the rows that satisfy every filter, preserving order.
#[must_use]
pub fn filter_rows<R: Row>(mut rows: Vec<R>, filters: &[FilterNode]) -> Vec<R> {
    if !filters.is_empty() {
        rows.retain(|row| matches(row, filters));
    }

    rows
}

fn eval_node(row: &dyn Row, node: &FilterNode) -> bool {
    let FieldPresence::Present(actual) = row.field(&node.field) else {
        return true;
    };

    match node.op {
        FilterOp::Eq => eq_matches(actual, &node.operand),
        FilterOp::Ne => !eq_matches(actual, &node.operand),

        FilterOp::Gt => compare_order(actual, &node.operand).is_some_and(Ordering::is_gt),
        FilterOp::Gte => compare_order(actual, &node.operand).is_some_and(Ordering::is_ge),
        FilterOp::Lt => compare_order(actual, &node.operand).is_some_and(Ordering::is_lt),
        FilterOp::Lte => compare_order(actual, &node.operand).is_some_and(Ordering::is_le),

        FilterOp::In => in_set(actual, node.operand_list()),
        FilterOp::NotIn => !in_set(actual, node.operand_list()),

        FilterOp::Like => like_matches(actual, &node.operand),
    }
}

// Strings compare by case-insensitive containment; everything else exactly.
fn eq_matches(actual: &Value, operand: &Value) -> bool {
    match (actual, operand) {
        (Value::String(actual), Value::String(needle)) => text_contains_ci(actual, needle),
        _ => coerce_operand(actual, operand).is_some_and(|operand| values_equal(actual, &operand)),
    }
}

fn like_matches(actual: &Value, operand: &Value) -> bool {
    match (actual, operand) {
        (Value::String(actual), Value::String(needle)) => text_contains_ci(actual, needle),
        (Value::String(actual), Value::Number(needle)) => {
            text_contains_ci(actual, &needle.to_string())
        }
        _ => false,
    }
}

// Exact membership; list-valued fields match when any element is a member.
fn in_set(actual: &Value, members: &[Value]) -> bool {
    let contains = |value: &Value| {
        members.iter().any(|member| {
            coerce_operand(value, member).is_some_and(|member| values_equal(value, &member))
        })
    };

    match actual {
        Value::Array(items) => items.iter().any(contains),
        scalar => contains(scalar),
    }
}

fn compare_order(actual: &Value, operand: &Value) -> Option<Ordering> {
    let operand = coerce_operand(actual, operand)?;

    match (actual, operand.as_ref()) {
        (Value::Number(_), Value::Number(_))
        | (Value::String(_), Value::String(_))
        | (Value::Bool(_), Value::Bool(_)) => Some(canonical_cmp(actual, &operand)),
        _ => None,
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(_), Value::Number(_)) => canonical_cmp(left, right) == Ordering::Equal,
        _ => left == right,
    }
}

/// Coerce a textual operand into the family of the field value.
///
/// Query-string operands are always text. Returns `None` when text cannot be
/// read as the field's type, which makes the comparison fail.
fn coerce_operand<'a>(actual: &Value, operand: &'a Value) -> Option<Cow<'a, Value>> {
    let Value::String(raw) = operand else {
        return Some(Cow::Borrowed(operand));
    };
    let raw = raw.trim();

    match actual {
        Value::Number(_) => parse_number(raw).map(|n| Cow::Owned(Value::Number(n))),
        Value::Bool(_) => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Some(Cow::Owned(Value::Bool(true))),
            "false" | "0" => Some(Cow::Owned(Value::Bool(false))),
            _ => None,
        },
        Value::Null => raw
            .eq_ignore_ascii_case("null")
            .then_some(Cow::Owned(Value::Null)),
        _ => Some(Cow::Borrowed(operand)),
    }
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n.into());
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n.into());
    }

    raw.parse::<f64>().ok().and_then(Number::from_f64)
}
