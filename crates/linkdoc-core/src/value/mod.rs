//! Raw-object access for projection and the collection engine.
//!
//! Raw objects are `serde_json` values. Anything `Serialize` can be lowered
//! with `serde_json::to_value` before it reaches the engine.

mod compare;


use serde_json::{Map, Value};

// re-exports
pub use compare::{canonical_cmp, compare_optional, fold_ci, text_contains_ci};

///
/// FieldPresence
///
/// Result of reading a field from a row. This distinguishes a missing field
/// from a present field whose value may be `null`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldPresence<'a> {
    /// Field exists (including `Value::Null`).
    Present(&'a Value),
    /// Field is not present on the row.
    Missing,
}

impl<'a> FieldPresence<'a> {
    #[must_use]
    pub const fn value(self) -> Option<&'a Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// Present and non-null.
    #[must_use]
    pub const fn non_null(self) -> Option<&'a Value> {
        match self {
            Self::Present(Value::Null) | Self::Missing => None,
            Self::Present(value) => Some(value),
        }
    }
}

///
/// Row
///
/// Abstraction over a raw object that can expose fields by name.
/// Names may be dotted paths (`author.name`) that walk nested objects.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence<'_>;

    /// Read a discriminator field as text (used for polymorphic targets).
    fn discriminator(&self, field: &str) -> Option<&str> {
        self.field(field).value().and_then(Value::as_str)
    }
}

impl Row for Value {
    fn field(&self, name: &str) -> FieldPresence<'_> {
        match self {
            Self::Object(map) => map.field(name),
            _ => FieldPresence::Missing,
        }
    }
}

impl Row for Map<String, Value> {
    fn field(&self, name: &str) -> FieldPresence<'_> {
        // exact keys win over path traversal so dotted keys stay addressable
        if let Some(value) = self.get(name) {
            return FieldPresence::Present(value);
        }

        let Some((head, rest)) = name.split_once('.') else {
            return FieldPresence::Missing;
        };

        match self.get(head) {
            Some(Value::Object(inner)) => inner.field(rest),
            _ => FieldPresence::Missing,
        }
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn field(&self, name: &str) -> FieldPresence<'_> {
        (**self).field(name)
    }
}

/// Render a scalar as a resource identifier.
///
/// Strings must be non-empty; numbers use their JSON text form.
/// Anything else has no identifier form.
#[must_use]
pub fn identifier_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
