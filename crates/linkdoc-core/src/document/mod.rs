//! Document assembly.
//!
//! [`Serializer`] is the entry point: it resolves the descriptor, runs the
//! collection engine, projects primary data, side-loads includes and
//! composes the envelope. Any failure aborts the whole document.

mod context;
mod wire;


use crate::{
    Error,
    config::EngineConfig,
    engine::{CollectionQuery, LinkBuilder, PageLinks, PageMeta},
    include::{IncludeResolver, IncludedSet},
    model::ResourceDescriptor,
    project::{Projector, ResourceObject},
    query::QueryPlan,
    registry::Registry,
    value::Row,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

// re-exports
pub use context::RequestContext;
pub use wire::{Document, JsonApi, PrimaryData};

///
/// Serializer
///

#[derive(Clone, Copy, Debug)]
pub struct Serializer<'a> {
    registry: &'a Registry,
    config: &'a EngineConfig,
}

impl<'a> Serializer<'a> {
    #[must_use]
    pub const fn new(registry: &'a Registry, config: &'a EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Serializer over the process-wide registry.
    #[must_use]
    pub fn global(config: &'a EngineConfig) -> Self {
        Self::new(Registry::global(), config)
    }

    /// Serialize one object (or `null`) addressed by type name or shape.
    pub fn serialize_resource<R: Row>(
        &self,
        resource: &str,
        object: Option<&R>,
        plan: &QueryPlan,
        ctx: &RequestContext,
    ) -> Result<Document, Error> {
        let descriptor = self.registry.resolve(resource)?;
        let urls = self.urls(plan, ctx);
        let projector = self.projector(plan, &urls);

        let data = object
            .map(|object| projector.project(&descriptor, object))
            .transpose()?;
        let included = match (&data, object) {
            (Some(primary), Some(object)) => {
                side_load(projector, &descriptor, std::slice::from_ref(object), [primary], plan)?
            }
            _ => None,
        };

        let links = urls.links.map(|links| PageLinks {
            self_link: links.current(),
            ..PageLinks::default()
        });

        self.assemble(PrimaryData::One(data), included, None, links, ctx)
    }

    /// Filter, sort, paginate and serialize a collection.
    pub fn serialize_collection<R: Row>(
        &self,
        resource: &str,
        items: Vec<R>,
        plan: &QueryPlan,
        ctx: &RequestContext,
    ) -> Result<Document, Error> {
        let descriptor = self.registry.resolve(resource)?;
        let urls = self.urls(plan, ctx);
        let projector = self.projector(plan, &urls);

        let outcome = CollectionQuery::new(&descriptor, plan, self.config)
            .with_links(urls.links.as_ref())
            .execute(items)?;

        let data = outcome
            .items
            .iter()
            .map(|item| projector.project(&descriptor, item))
            .collect::<Result<Vec<_>, _>>()?;
        let included = side_load(projector, &descriptor, &outcome.items, &data, plan)?;

        self.assemble(
            PrimaryData::Many(data),
            included,
            outcome.meta,
            outcome.links,
            ctx,
        )
    }

    /// Lower `Serialize` records to raw objects, then serialize them as a
    /// collection.
    pub fn serialize_records<T: Serialize>(
        &self,
        resource: &str,
        records: &[T],
        plan: &QueryPlan,
        ctx: &RequestContext,
    ) -> Result<Document, Error> {
        let items = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        self.serialize_collection(resource, items, plan, ctx)
    }

    fn urls(&self, plan: &QueryPlan, ctx: &RequestContext) -> RequestUrls {
        let Some(base) = ctx.base_url.as_deref().or(self.config.base_url.as_deref()) else {
            return RequestUrls::default();
        };

        let links = LinkBuilder::parse(base, ctx.path.as_deref(), plan.params());
        if links.is_none() {
            debug!(base, path = ?ctx.path, "ignoring unparsable base URL; links omitted");
        }
        let resources = self
            .config
            .resource_links
            .then(|| Url::parse(base).ok())
            .flatten();

        RequestUrls { links, resources }
    }

    fn projector<'p>(&self, plan: &'p QueryPlan, urls: &'p RequestUrls) -> Projector<'p>
    where
        'a: 'p,
    {
        Projector::new(self.registry, plan).with_resource_links(urls.resources.as_ref())
    }

    fn assemble(
        &self,
        data: PrimaryData,
        included: Option<Vec<ResourceObject>>,
        page: Option<PageMeta>,
        links: Option<PageLinks>,
        ctx: &RequestContext,
    ) -> Result<Document, Error> {
        let meta = merge_meta(&ctx.meta, page)?;
        let jsonapi = self
            .config
            .jsonapi_version
            .clone()
            .map(|version| JsonApi { version });

        let document = Document {
            data,
            included,
            meta,
            links,
            jsonapi,
        };
        debug!(
            primary = document.resources().len(),
            included = document.included.as_ref().map_or(0, Vec::len),
            "document assembled"
        );

        Ok(document)
    }
}

// Side-load everything the plan asks for; primary keys are claimed first.
fn side_load<'r, R: Row>(
    projector: Projector<'_>,
    descriptor: &ResourceDescriptor,
    roots: &[R],
    primary: impl IntoIterator<Item = &'r ResourceObject>,
    plan: &QueryPlan,
) -> Result<Option<Vec<ResourceObject>>, Error> {
    if plan.includes().is_empty() {
        return Ok(None);
    }

    let mut included = IncludedSet::new();
    for resource in primary {
        included.claim(resource.identifier());
    }
    IncludeResolver::new(projector).resolve(descriptor, roots, plan.includes(), &mut included)?;

    Ok((!included.is_empty()).then(|| included.into_vec()))
}

///
/// RequestUrls
///

#[derive(Debug, Default)]
struct RequestUrls {
    links: Option<LinkBuilder>,
    resources: Option<Url>,
}

// Caller meta first; pagination keys overwrite on collision.
fn merge_meta(
    custom: &Map<String, Value>,
    page: Option<PageMeta>,
) -> Result<Option<Map<String, Value>>, Error> {
    let mut meta = custom.clone();

    if let Some(page) = page
        && let Value::Object(page) = serde_json::to_value(page)?
    {
        meta.extend(page);
    }

    Ok((!meta.is_empty()).then_some(meta))
}
