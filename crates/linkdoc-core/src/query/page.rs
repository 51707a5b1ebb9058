///
/// Cursor
///
/// Cursor position carried by `page[after]` / `page[before]`. Only the
/// identifier portion of a `<type>:<id>` token is kept.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Cursor {
    After(String),
    Before(String),
}

impl Cursor {
    /// Extract the identifier from a `<type>:<id>` token.
    /// Tokens without a separator are used verbatim.
    #[must_use]
    pub fn token_id(token: &str) -> &str {
        token.split_once(':').map_or(token, |(_, id)| id)
    }

    #[must_use]
    pub fn after(token: &str) -> Self {
        Self::After(Self::token_id(token).to_string())
    }

    #[must_use]
    pub fn before(token: &str) -> Self {
        Self::Before(Self::token_id(token).to_string())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::After(id) | Self::Before(id) => id,
        }
    }

    /// Render a token for link reconstruction.
    #[must_use]
    pub fn token(type_name: &str, id: &str) -> String {
        format!("{type_name}:{id}")
    }
}

///
/// PageRequest
///
/// Offset and cursor strategies are mutually exclusive; `size` is resolved
/// against the engine config at execution time.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PageRequest {
    Offset { number: u32, size: Option<u32> },
    Cursor { cursor: Cursor, size: Option<u32> },
}

impl PageRequest {
    #[must_use]
    pub const fn offset(number: u32, size: u32) -> Self {
        Self::Offset {
            number,
            size: Some(size),
        }
    }

    #[must_use]
    pub const fn cursor(cursor: Cursor, size: u32) -> Self {
        Self::Cursor {
            cursor,
            size: Some(size),
        }
    }

    #[must_use]
    pub const fn size(&self) -> Option<u32> {
        match self {
            Self::Offset { size, .. } | Self::Cursor { size, .. } => *size,
        }
    }
}

///
/// PageDraft
///
/// Accumulates raw `page[...]` values before the strategy is chosen.
///

#[derive(Debug, Default)]
pub(crate) struct PageDraft {
    pub(crate) number: Option<Option<u32>>,
    pub(crate) size: Option<Option<u32>>,
    pub(crate) after: Option<String>,
    pub(crate) before: Option<String>,
    pub(crate) count: Option<bool>,
}

impl PageDraft {
    // Cursor parameters win over offset parameters; `after` wins over `before`.
    pub(crate) fn finish(self) -> Option<PageRequest> {
        let size = self.size.flatten();

        if let Some(token) = self.after {
            return Some(PageRequest::Cursor {
                cursor: Cursor::after(&token),
                size,
            });
        }
        if let Some(token) = self.before {
            return Some(PageRequest::Cursor {
                cursor: Cursor::before(&token),
                size,
            });
        }
        if self.number.is_some() || self.size.is_some() {
            let number = self.number.flatten().unwrap_or(1).max(1);
            return Some(PageRequest::Offset { number, size });
        }

        None
    }
}

/// Parse a `page[count]` flag; unrecognised values yield `None`.
pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
