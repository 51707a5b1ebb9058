//! Bracketed parameter-key grammar.
//!
//! `head[seg1][seg2]...` keys are split into their head and segments.
//! Malformed keys yield `None` so the caller can drop them.

///
/// ParamKey
///
/// One recognised parameter key.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum ParamKey<'a> {
    Include,
    Sort,
    Fields { resource: &'a str },
    Filter { field: &'a str, op: Option<&'a str> },
    Page(PageParam),
}

///
/// PageParam
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PageParam {
    Number,
    Size,
    After,
    Before,
    Count,
}

impl PageParam {
    fn parse(segment: &str) -> Option<Self> {
        match segment {
            "number" => Some(Self::Number),
            "size" => Some(Self::Size),
            "after" => Some(Self::After),
            "before" => Some(Self::Before),
            "count" => Some(Self::Count),
            _ => None,
        }
    }

    /// Raw parameter key for link reconstruction.
    pub(crate) const fn key(self) -> &'static str {
        match self {
            Self::Number => "page[number]",
            Self::Size => "page[size]",
            Self::After => "page[after]",
            Self::Before => "page[before]",
            Self::Count => "page[count]",
        }
    }
}

/// Split `head[a][b]` into `("head", ["a", "b"])`.
///
/// Empty segments, nested or unbalanced brackets, and trailing text after a
/// closing bracket are malformed.
pub(crate) fn split_key(raw: &str) -> Option<(&str, Vec<&str>)> {
    let Some(open) = raw.find('[') else {
        return (!raw.is_empty() && !raw.contains(']')).then_some((raw, Vec::new()));
    };

    let (head, mut rest) = raw.split_at(open);
    if head.is_empty() || head.contains(']') {
        return None;
    }

    let mut segments = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[')?;
        let close = inner.find(']')?;
        let segment = &inner[..close];
        if segment.is_empty() || segment.contains('[') {
            return None;
        }

        segments.push(segment);
        rest = &inner[close + 1..];
    }

    Some((head, segments))
}

/// Classify a raw key; unrecognised or malformed keys yield `None`.
pub(crate) fn classify(raw: &str) -> Option<ParamKey<'_>> {
    let (head, segments) = split_key(raw)?;

    match (head, segments.as_slice()) {
        ("include", &[]) => Some(ParamKey::Include),
        ("sort", &[]) => Some(ParamKey::Sort),
        ("fields", &[resource]) => Some(ParamKey::Fields { resource }),
        ("filter", &[field]) => Some(ParamKey::Filter { field, op: None }),
        ("filter", &[field, op]) => Some(ParamKey::Filter {
            field,
            op: Some(op),
        }),
        ("page", &[param]) => PageParam::parse(param).map(ParamKey::Page),
        _ => None,
    }
}

/// Split a comma-joined list, trimming entries and dropping empties.
pub(crate) fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_key_handles_plain_and_bracketed_keys() {
        assert_eq!(split_key("include"), Some(("include", vec![])));
        assert_eq!(split_key("fields[articles]"), Some(("fields", vec!["articles"])));
        assert_eq!(
            split_key("filter[price][gte]"),
            Some(("filter", vec!["price", "gte"]))
        );
    }

    #[test]
    fn split_key_rejects_malformed_brackets() {
        for raw in [
            "",
            "[x]",
            "filter[",
            "filter[]",
            "filter[a",
            "filter[a]b",
            "filter[a[b]]",
            "filter]a[",
            "filter[a]]",
        ] {
            assert_eq!(split_key(raw), None, "{raw} should be malformed");
        }
    }

    #[test]
    fn classify_recognises_the_parameter_surface() {
        assert_eq!(classify("include"), Some(ParamKey::Include));
        assert_eq!(classify("sort"), Some(ParamKey::Sort));
        assert_eq!(
            classify("fields[people]"),
            Some(ParamKey::Fields { resource: "people" })
        );
        assert_eq!(
            classify("filter[status]"),
            Some(ParamKey::Filter {
                field: "status",
                op: None
            })
        );
        assert_eq!(
            classify("filter[status][in]"),
            Some(ParamKey::Filter {
                field: "status",
                op: Some("in")
            })
        );
        assert_eq!(classify("page[after]"), Some(ParamKey::Page(PageParam::After)));
    }

    #[test]
    fn classify_drops_unknown_shapes() {
        assert_eq!(classify("page[offset]"), None);
        assert_eq!(classify("fields"), None);
        assert_eq!(classify("fields[a][b]"), None);
        assert_eq!(classify("filter[a][b][c]"), None);
        assert_eq!(classify("include[x]"), None);
        assert_eq!(classify("q"), None);
    }

    #[test]
    fn split_list_trims_and_drops_empties() {
        let items: Vec<_> = split_list(" a, ,b.c,,").collect();

        assert_eq!(items, ["a", "b.c"]);
    }
}
