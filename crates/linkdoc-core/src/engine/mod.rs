//! Collection query engine.
//!
//! Filters, orders and slices an in-memory collection before projection:
//! - filters are applied first (all must hold)
//! - ordering is applied after filtering
//! - pagination is applied after ordering; offset and cursor strategies are
//!   mutually exclusive

mod filter;
mod links;
mod order;
mod page;


use crate::{
    config::EngineConfig,
    model::ResourceDescriptor,
    project::ProjectionError,
    query::{Cursor, PageRequest, QueryPlan},
    value::Row,
};
use tracing::trace;

// re-exports
pub use filter::{filter_rows, matches};
pub use links::LinkBuilder;
pub use order::{compare_rows, sort_rows};
pub use page::{CursorWindow, OffsetWindow, PageLinks, PageMeta};

///
/// QueryOutcome
///
/// The reduced, ordered and sliced collection plus pagination output.
///

#[derive(Debug)]
pub struct QueryOutcome<R> {
    pub items: Vec<R>,
    pub meta: Option<PageMeta>,
    pub links: Option<PageLinks>,
}

///
/// CollectionQuery
///

pub struct CollectionQuery<'a> {
    descriptor: &'a ResourceDescriptor,
    plan: &'a QueryPlan,
    config: &'a EngineConfig,
    links: Option<&'a LinkBuilder>,
}

impl<'a> CollectionQuery<'a> {
    #[must_use]
    pub const fn new(
        descriptor: &'a ResourceDescriptor,
        plan: &'a QueryPlan,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            descriptor,
            plan,
            config,
            links: None,
        }
    }

    #[must_use]
    pub const fn with_links(mut self, links: Option<&'a LinkBuilder>) -> Self {
        self.links = links;
        self
    }

    /// Run filter → sort → paginate over `items`.
    pub fn execute<R: Row>(&self, items: Vec<R>) -> Result<QueryOutcome<R>, ProjectionError> {
        let input = items.len();
        let mut items = filter_rows(items, self.plan.filters());
        sort_rows(&mut items, self.plan.sort());

        trace!(
            resource = self.descriptor.type_name(),
            input,
            kept = items.len(),
            "collection filtered and ordered"
        );

        match self.plan.page() {
            Some(PageRequest::Offset { number, size }) => {
                let size = self.config.page_size(*size);
                Ok(self.offset(items, *number, size))
            }
            Some(PageRequest::Cursor { cursor, size }) => {
                let size = self.config.page_size(*size);
                self.cursor(items, Some(cursor), size)
            }
            None => Ok(QueryOutcome {
                items,
                meta: None,
                links: self.links.map(|links| PageLinks {
                    self_link: links.current(),
                    ..PageLinks::default()
                }),
            }),
        }
    }

    fn counting(&self) -> bool {
        self.plan.count(self.config.count_by_default)
    }

    fn offset<R>(&self, items: Vec<R>, number: u32, size: u32) -> QueryOutcome<R> {
        let window = OffsetWindow::new(items.len(), number, size);
        let counting = self.counting();

        let links = self.links.map(|links| {
            let targets = window.link_targets(counting);
            let to = |n: u32| links.build(&page::number_replacement(n));

            PageLinks {
                self_link: to(targets.current),
                first: Some(to(targets.first)),
                last: targets.last.map(to),
                prev: targets.prev.map(to),
                next: targets.next.map(to),
            }
        });

        QueryOutcome {
            meta: counting.then(|| window.meta()),
            items: slice(items, window.range),
            links,
        }
    }

    fn cursor<R: Row>(
        &self,
        items: Vec<R>,
        cursor: Option<&Cursor>,
        size: u32,
    ) -> Result<QueryOutcome<R>, ProjectionError> {
        let identity = self.descriptor.identity();
        let ids: Vec<Option<String>> = items.iter().map(|item| identity.resolve(item)).collect();
        let window = CursorWindow::new(&ids, cursor, size);

        let links = match self.links {
            Some(links) => {
                let token = |index: usize| -> Result<String, ProjectionError> {
                    let id = ids[index].as_deref().ok_or_else(|| {
                        ProjectionError::IdentityResolution {
                            resource: self.descriptor.type_name().to_string(),
                        }
                    })?;

                    Ok(Cursor::token(self.descriptor.type_name(), id))
                };

                let next = if window.has_next() {
                    let token = token(window.range.end - 1)?;
                    Some(links.build(&page::cursor_replacement(true, token)))
                } else {
                    None
                };
                let prev = if window.has_prev() {
                    let token = token(window.range.start)?;
                    Some(links.build(&page::cursor_replacement(false, token)))
                } else {
                    None
                };

                Some(PageLinks {
                    self_link: links.current(),
                    next,
                    prev,
                    ..PageLinks::default()
                })
            }
            None => None,
        };

        let meta = window.meta();
        let meta = if self.counting() {
            meta
        } else {
            PageMeta {
                total: None,
                ..meta
            }
        };

        Ok(QueryOutcome {
            meta: Some(meta),
            items: slice(items, window.range),
            links,
        })
    }
}

fn slice<R>(items: Vec<R>, range: std::ops::Range<usize>) -> Vec<R> {
    items
        .into_iter()
        .skip(range.start)
        .take(range.len())
        .collect()
}
