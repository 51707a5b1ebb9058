use crate::query::params::split_list;
use serde_json::Value;

///
/// FilterOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Like,
}

impl FilterOp {
    /// Parse a query-string operator name (`eq`, `gte`, `nin`, ...).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "in" => Some(Self::In),
            "nin" => Some(Self::NotIn),
            "like" => Some(Self::Like),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
            Self::NotIn => "nin",
            Self::Like => "like",
        }
    }

    /// Set-membership operators take list operands.
    #[must_use]
    pub const fn is_membership(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }
}

///
/// FilterNode
///
/// One filter condition. Operands parsed from a query string are JSON
/// strings (or arrays of strings for membership operators); they are coerced
/// against the field value at evaluation time.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FilterNode {
    pub field: String,
    pub op: FilterOp,
    pub operand: Value,
}

impl FilterNode {
    #[must_use]
    pub fn new(field: impl Into<String>, op: FilterOp, operand: impl Into<Value>) -> Self {
        let operand = operand.into();
        let operand = if op.is_membership() {
            membership_operand(operand)
        } else {
            operand
        };

        Self {
            field: field.into(),
            op,
            operand,
        }
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Eq, operand)
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Ne, operand)
    }

    #[must_use]
    pub fn gt(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Gt, operand)
    }

    #[must_use]
    pub fn gte(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Gte, operand)
    }

    #[must_use]
    pub fn lt(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Lt, operand)
    }

    #[must_use]
    pub fn lte(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Lte, operand)
    }

    #[must_use]
    pub fn like(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::Like, operand)
    }

    #[must_use]
    pub fn in_(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::In, operand)
    }

    #[must_use]
    pub fn not_in(field: impl Into<String>, operand: impl Into<Value>) -> Self {
        Self::new(field, FilterOp::NotIn, operand)
    }

    /// Membership set for `in` / `nin`; a single-element slice otherwise.
    #[must_use]
    pub fn operand_list(&self) -> &[Value] {
        match &self.operand {
            Value::Array(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

// Comma-split string operands; lists pass through unchanged.
fn membership_operand(operand: Value) -> Value {
    match operand {
        Value::String(raw) => Value::Array(
            split_list(&raw)
                .map(|item| Value::String(item.to_string()))
                .collect(),
        ),
        other => other,
    }
}
