//! Operation-specific allow-lists.
//!
//! Policy, per list: absent → everything passes; present → only listed
//! entries pass (an empty list drops everything). Rejections are silent.

use serde::Deserialize;

///
/// AllowList
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AllowList {
    pub filters: Option<Vec<String>>,
    pub includes: Option<Vec<String>>,
    pub sorts: Option<Vec<String>>,
}

impl AllowList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filters<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn includes<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn sorts<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sorts = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn permits_filter(&self, field: &str) -> bool {
        permits_exact(self.filters.as_deref(), field)
    }

    #[must_use]
    pub fn permits_sort(&self, field: &str) -> bool {
        permits_exact(self.sorts.as_deref(), field)
    }

    /// Map a requested include path onto the portion the allow-list covers.
    ///
    /// Kept as requested when it equals an allowed path or is a segment
    /// prefix of one; otherwise clipped to the longest allowed path that is a
    /// segment prefix of it (this covers an allowed first segment); otherwise
    /// dropped.
    #[must_use]
    pub fn clip_include(&self, path: &str) -> Option<String> {
        let Some(allowed) = self.includes.as_deref() else {
            return Some(path.to_string());
        };

        if allowed
            .iter()
            .any(|allowed| allowed == path || is_segment_prefix(path, allowed))
        {
            return Some(path.to_string());
        }

        allowed
            .iter()
            .filter(|allowed| is_segment_prefix(allowed, path))
            .max_by_key(|allowed| allowed.len())
            .cloned()
    }
}

fn permits_exact(allowed: Option<&[String]>, value: &str) -> bool {
    allowed.is_none_or(|allowed| allowed.iter().any(|entry| entry == value))
}

/// True when `prefix` names a strict ancestor of `path` (`a` of `a.b`).
#[must_use]
pub fn is_segment_prefix(prefix: &str, path: &str) -> bool {
    path.len() > prefix.len()
        && path.starts_with(prefix)
        && path.as_bytes()[prefix.len()] == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_list_permits_everything() {
        let allow = AllowList::new();

        assert!(allow.permits_filter("anything"));
        assert!(allow.permits_sort("anything"));
        assert_eq!(allow.clip_include("a.b.c").as_deref(), Some("a.b.c"));
    }

    #[test]
    fn empty_list_permits_nothing() {
        let allow = AllowList::new()
            .filters(Vec::<String>::new())
            .includes(Vec::<String>::new());

        assert!(!allow.permits_filter("status"));
        assert_eq!(allow.clip_include("author"), None);
    }

    #[test]
    fn include_prefix_rules() {
        let allow = AllowList::new().includes(["author", "comments.user"]);

        // exact
        assert_eq!(allow.clip_include("author").as_deref(), Some("author"));
        // prefix of a deeper allowed path
        assert_eq!(allow.clip_include("comments").as_deref(), Some("comments"));
        // deeper than allowed: clipped to the allowed ancestor
        assert_eq!(allow.clip_include("author.profile").as_deref(), Some("author"));
        assert_eq!(
            allow.clip_include("comments.user.avatar").as_deref(),
            Some("comments.user")
        );
        // unrelated
        assert_eq!(allow.clip_include("tags"), None);
        // textual prefix is not a segment prefix
        assert_eq!(allow.clip_include("authors"), None);
    }

    #[test]
    fn segment_prefix_requires_a_dot_boundary() {
        assert!(is_segment_prefix("a", "a.b"));
        assert!(!is_segment_prefix("a", "ab"));
        assert!(!is_segment_prefix("a.b", "a.b"));
    }

    #[test]
    fn allow_list_loads_from_toml() {
        let allow: AllowList = toml::from_str(
            r#"
            filters = ["status"]
            includes = []
            "#,
        )
        .expect("allow-list should parse");

        assert!(allow.permits_filter("status"));
        assert!(!allow.permits_filter("price"));
        assert_eq!(allow.includes, Some(vec![]));
        assert_eq!(allow.sorts, None);
    }
}
