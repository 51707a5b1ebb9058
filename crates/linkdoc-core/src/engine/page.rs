//! Offset and cursor pagination over an already filtered and sorted
//! collection.

use crate::query::{Cursor, PageParam};
use serde::Serialize;
use std::ops::Range;

///
/// PageMeta
///
/// Pagination metadata. Offset pages fill the page-number keys; cursor pages
/// fill `per_page`, `count` and `total`.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PageMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

///
/// PageLinks
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

///
/// OffsetWindow
///
/// Slice bounds for one 1-based page. `last_page` is at least 1.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OffsetWindow {
    pub number: u32,
    pub size: u32,
    pub range: Range<usize>,
    pub last_page: u32,
    pub total: usize,
}

impl OffsetWindow {
    #[must_use]
    pub fn new(total: usize, number: u32, size: u32) -> Self {
        let number = number.max(1);
        let size = size.max(1);
        let per_page = size as usize;

        let start = (number as usize - 1).saturating_mul(per_page).min(total);
        let end = start.saturating_add(per_page).min(total);
        let last_page = u32::try_from(total.div_ceil(per_page))
            .unwrap_or(u32::MAX)
            .max(1);

        Self {
            number,
            size,
            range: start..end,
            last_page,
            total,
        }
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.last_page
    }

    #[must_use]
    pub fn meta(&self) -> PageMeta {
        let non_empty = !self.range.is_empty();

        PageMeta {
            current_page: Some(u64::from(self.number)),
            from: non_empty.then(|| self.range.start as u64 + 1),
            last_page: Some(u64::from(self.last_page)),
            per_page: Some(u64::from(self.size)),
            to: non_empty.then_some(self.range.end as u64),
            total: Some(self.total as u64),
            count: None,
        }
    }

    /// Page-number replacements for each navigation link.
    pub(crate) fn link_targets(&self, with_last: bool) -> OffsetTargets {
        OffsetTargets {
            current: self.number,
            first: 1,
            last: with_last.then_some(self.last_page),
            prev: self.has_prev().then(|| self.number - 1),
            next: self.has_next().then(|| self.number + 1),
        }
    }
}

///
/// OffsetTargets
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OffsetTargets {
    pub(crate) current: u32,
    pub(crate) first: u32,
    pub(crate) last: Option<u32>,
    pub(crate) prev: Option<u32>,
    pub(crate) next: Option<u32>,
}

///
/// CursorWindow
///
/// Slice bounds for one cursor page.
///
/// `after` starts right after the cursor item (at 0 when the cursor is not
/// found). `before` ends right before the cursor item and returns up to
/// `size` preceding items in forward order (the first page when the cursor
/// is not found).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CursorWindow {
    pub size: u32,
    pub range: Range<usize>,
    pub total: usize,
}

impl CursorWindow {
    /// Locate the window given the identifiers of the ordered collection.
    #[must_use]
    pub fn new(ids: &[Option<String>], cursor: Option<&Cursor>, size: u32) -> Self {
        let total = ids.len();
        let per_page = size.max(1) as usize;
        let position = |id: &str| {
            ids.iter()
                .position(|candidate| candidate.as_deref() == Some(id))
        };

        let range = match cursor {
            Some(Cursor::After(id)) => {
                let start = position(id.as_str()).map_or(0, |index| index + 1);
                start..start.saturating_add(per_page).min(total)
            }
            Some(Cursor::Before(id)) => match position(id.as_str()) {
                Some(end) => end.saturating_sub(per_page)..end,
                None => 0..per_page.min(total),
            },
            None => 0..per_page.min(total),
        };

        Self {
            size: size.max(1),
            range,
            total,
        }
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.range.is_empty() && self.range.end < self.total
    }

    #[must_use]
    pub fn has_prev(&self) -> bool {
        !self.range.is_empty() && self.range.start > 0
    }

    #[must_use]
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            per_page: Some(u64::from(self.size)),
            count: Some(self.range.len() as u64),
            total: Some(self.total as u64),
            ..PageMeta::default()
        }
    }
}

// Replacement pairs for an offset link targeting `number`.
pub(crate) fn number_replacement(number: u32) -> [(PageParam, Option<String>); 1] {
    [(PageParam::Number, Some(number.to_string()))]
}

// Replacement pairs for a cursor link; the opposite cursor key is removed.
pub(crate) fn cursor_replacement(
    after: bool,
    token: String,
) -> [(PageParam, Option<String>); 2] {
    if after {
        [(PageParam::After, Some(token)), (PageParam::Before, None)]
    } else {
        [(PageParam::Before, Some(token)), (PageParam::After, None)]
    }
}
