//! Navigation-link reconstruction.
//!
//! Links reuse the request's base URL and its query parameters, replacing
//! only the page parameters named by the caller.

use crate::query::PageParam;
use url::Url;

///
/// LinkBuilder
///

#[derive(Clone, Debug)]
pub struct LinkBuilder {
    base: Url,
    params: Vec<(String, String)>,
}

impl LinkBuilder {
    #[must_use]
    pub fn new(mut base: Url, params: &[(String, String)]) -> Self {
        base.set_query(None);
        base.set_fragment(None);

        Self {
            base,
            params: params.to_vec(),
        }
    }

    /// Parse `base_url` and append the segments of `path` below it; invalid
    /// input yields `None`.
    #[must_use]
    pub fn parse(base_url: &str, path: Option<&str>, params: &[(String, String)]) -> Option<Self> {
        let mut base = Url::parse(base_url).ok()?;
        if let Some(path) = path.filter(|path| !path.is_empty()) {
            base.path_segments_mut()
                .ok()?
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }

        Some(Self::new(base, params))
    }

    /// The request URL with its parameters unchanged.
    #[must_use]
    pub fn current(&self) -> String {
        self.build(&[])
    }

    /// The request URL with `replace` applied. `None` removes a parameter.
    ///
    /// Replaced parameters keep their original position; new ones are
    /// appended.
    #[must_use]
    pub(crate) fn build(&self, replace: &[(PageParam, Option<String>)]) -> String {
        let mut url = self.base.clone();
        let mut emitted = vec![false; replace.len()];

        {
            let mut query = url.query_pairs_mut();

            for (key, value) in &self.params {
                let Some(slot) = replace.iter().position(|(param, _)| param.key() == key.as_str()) else {
                    query.append_pair(key, value);
                    continue;
                };

                if !emitted[slot] {
                    emitted[slot] = true;
                    if let Some(value) = &replace[slot].1 {
                        query.append_pair(key, value);
                    }
                }
            }

            for ((param, value), done) in replace.iter().zip(&emitted) {
                if let (false, Some(value)) = (*done, value) {
                    query.append_pair(param.key(), value);
                }
            }
        }

        // no parameters at all: drop the dangling `?`
        if url.query() == Some("") {
            url.set_query(None);
        }

        url.into()
    }
}
