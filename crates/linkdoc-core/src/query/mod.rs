//! Query-plan parser.
//!
//! Turns a flat, multi-valued parameter list into a [`QueryPlan`]. Parsing
//! never fails: malformed or unrecognised parameters are dropped, and
//! allow-list rejections are silent.

mod allow;
mod filter;
mod page;
mod params;


use crate::query::{
    page::{PageDraft, parse_flag},
    params::{ParamKey, classify, split_list},
};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

// re-exports
pub use allow::{AllowList, is_segment_prefix};
pub use filter::{FilterNode, FilterOp};
pub use page::{Cursor, PageRequest};
pub(crate) use params::PageParam;

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

///
/// SortKey
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse one `sort` entry; a leading `-` means descending.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (field, direction) = match raw.strip_prefix('-') {
            Some(field) => (field, SortDirection::Desc),
            None => (raw, SortDirection::Asc),
        };

        (!field.is_empty()).then(|| Self {
            field: field.to_string(),
            direction,
        })
    }
}

///
/// QueryPlan
///
/// Normalized client query intent. Built once per request and only read
/// afterwards; the raw parameters are retained for link reconstruction.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryPlan {
    fields: BTreeMap<String, BTreeSet<String>>,
    includes: Vec<String>,
    filters: Vec<FilterNode>,
    sort: Vec<SortKey>,
    page: Option<PageRequest>,
    count: Option<bool>,
    params: Vec<(String, String)>,
}

impl QueryPlan {
    ///
    /// PARSING
    ///

    /// Parse decoded parameters with no allow-lists.
    #[must_use]
    pub fn parse<K, V>(params: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::parse_with(params, &AllowList::default())
    }

    /// Parse decoded parameters, applying `allow` to filters, sorts and includes.
    #[must_use]
    pub fn parse_with<K, V>(params: &[(K, V)], allow: &AllowList) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut plan = Self {
            params: params
                .iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
                .collect(),
            ..Self::default()
        };
        let mut page = PageDraft::default();

        for (key, value) in params {
            let (key, value) = (key.as_ref(), value.as_ref());

            match classify(key) {
                Some(ParamKey::Include) => plan.push_includes(value, allow),
                Some(ParamKey::Sort) => plan.push_sort(value, allow),
                Some(ParamKey::Fields { resource }) => {
                    plan.fields
                        .entry(resource.to_string())
                        .or_default()
                        .extend(split_list(value).map(str::to_string));
                }
                Some(ParamKey::Filter { field, op }) => plan.push_filter(field, op, value, allow),
                Some(ParamKey::Page(param)) => push_page(&mut page, param, value),
                None => debug!(param = key, "ignoring unrecognised query parameter"),
            }
        }

        plan.count = page.count;
        plan.page = page.finish();
        plan
    }

    /// Decode a raw URL query string (with or without the leading `?`).
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        Self::from_query_str_with(query, &AllowList::default())
    }

    #[must_use]
    pub fn from_query_str_with(query: &str, allow: &AllowList) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        Self::parse_with(&params, allow)
    }

    fn push_includes(&mut self, raw: &str, allow: &AllowList) {
        for path in split_list(raw) {
            match allow.clip_include(path) {
                Some(kept) => {
                    if kept != path {
                        debug!(include = path, kept = %kept, "include path clipped by allow-list");
                    }
                    if !self.includes.contains(&kept) {
                        self.includes.push(kept);
                    }
                }
                None => debug!(include = path, "include path rejected by allow-list"),
            }
        }
    }

    fn push_sort(&mut self, raw: &str, allow: &AllowList) {
        for key in split_list(raw).filter_map(SortKey::parse) {
            if !allow.permits_sort(&key.field) {
                debug!(sort = %key.field, "sort field rejected by allow-list");
                continue;
            }
            self.sort.retain(|existing| existing.field != key.field);
            self.sort.push(key);
        }
    }

    fn push_filter(&mut self, field: &str, op: Option<&str>, raw: &str, allow: &AllowList) {
        let op = match op {
            None => FilterOp::Eq,
            Some(name) => match FilterOp::parse(name) {
                Some(op) => op,
                None => {
                    debug!(field, op = name, "ignoring unknown filter operator");
                    return;
                }
            },
        };

        if !allow.permits_filter(field) {
            debug!(field, "filter field rejected by allow-list");
            return;
        }

        // last value wins for a repeated (field, op) pair
        self.filters
            .retain(|node| !(node.field == field && node.op == op));
        self.filters
            .push(FilterNode::new(field, op, Value::String(raw.to_string())));
    }

    ///
    /// CONSTRUCTION
    ///

    #[must_use]
    pub fn with_fields<I, S>(mut self, resource: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .entry(resource.into())
            .or_default()
            .extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_include(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if !self.includes.contains(&path) {
            self.includes.push(path);
        }
        self
    }

    #[must_use]
    pub fn with_filter(mut self, node: FilterNode) -> Self {
        self.filters.push(node);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    ///
    /// ACCESSORS
    ///

    /// Sparse fieldset for `resource`, if the request named one.
    #[must_use]
    pub fn fields_for(&self, resource: &str) -> Option<&BTreeSet<String>> {
        self.fields.get(resource)
    }

    #[must_use]
    pub const fn fields(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.fields
    }

    #[must_use]
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    #[must_use]
    pub fn filters(&self) -> &[FilterNode] {
        &self.filters
    }

    #[must_use]
    pub fn sort(&self) -> &[SortKey] {
        &self.sort
    }

    #[must_use]
    pub const fn page(&self) -> Option<&PageRequest> {
        self.page.as_ref()
    }

    /// Whether totals should be computed, given the configured default.
    #[must_use]
    pub fn count(&self, default: bool) -> bool {
        self.count.unwrap_or(default)
    }

    /// Raw parameters in request order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

// Record one `page[...]` value; unparsable numbers are kept as "seen".
fn push_page(page: &mut PageDraft, param: PageParam, raw: &str) {
    let raw = raw.trim();

    match param {
        PageParam::Number => page.number = Some(raw.parse().ok()),
        PageParam::Size => page.size = Some(raw.parse().ok()),
        PageParam::After if !raw.is_empty() => page.after = Some(raw.to_string()),
        PageParam::Before if !raw.is_empty() => page.before = Some(raw.to_string()),
        PageParam::Count => match parse_flag(raw) {
            Some(flag) => page.count = Some(flag),
            None => debug!(value = raw, "ignoring unparsable page[count]"),
        },
        PageParam::After | PageParam::Before => {
            debug!(param = param.key(), "ignoring empty cursor token");
        }
    }
}
