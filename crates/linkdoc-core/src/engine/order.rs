use crate::{
    query::{SortDirection, SortKey},
    value::{Row, compare_optional},
};
use std::cmp::Ordering;

/// Stable multi-key sort: the first non-equal key decides.
///
/// Missing fields order before present ones (after them when descending).
pub fn sort_rows<R: Row>(rows: &mut [R], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }

    rows.sort_by(|left, right| compare_rows(left, right, keys));
}

/// Compare two rows under `keys`.
#[must_use]
pub fn compare_rows(left: &dyn Row, right: &dyn Row, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ord = compare_optional(
            left.field(&key.field).value(),
            right.field(&key.field).value(),
        );
        let ord = match key.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };

        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}
