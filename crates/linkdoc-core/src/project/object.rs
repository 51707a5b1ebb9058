use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use url::Url;

///
/// ResourceObject
///
/// One serialized instance. `id` and `type` are always present; empty
/// attribute and relationship maps are omitted from the wire form.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceObject {
    pub id: String,

    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, RelationshipObject>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ResourceLinks>,
}

impl ResourceObject {
    #[must_use]
    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(self.type_name.clone(), self.id.clone())
    }

    /// Linkage of the named relationship, if projected.
    #[must_use]
    pub fn linkage(&self, name: &str) -> Option<&RelationshipData> {
        self.relationships.get(name).map(|rel| &rel.data)
    }
}

///
/// ResourceIdentifier
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub type_name: String,
    pub id: String,
}

impl ResourceIdentifier {
    #[must_use]
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: id.into(),
        }
    }
}

///
/// RelationshipObject
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RelationshipObject {
    pub data: RelationshipData,
}

///
/// RelationshipData
///
/// Linkage only: `null` or one identifier for to-one, a list for to-many.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelationshipData {
    ToOne(Option<ResourceIdentifier>),
    ToMany(Vec<ResourceIdentifier>),
}

impl RelationshipData {
    #[must_use]
    pub fn identifiers(&self) -> &[ResourceIdentifier] {
        match self {
            Self::ToOne(Some(id)) => std::slice::from_ref(id),
            Self::ToOne(None) => &[],
            Self::ToMany(ids) => ids,
        }
    }
}

///
/// ResourceLinks
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}

impl ResourceLinks {
    // `None` when the base cannot carry path segments (e.g. `mailto:`).
    pub(crate) fn under(base: &Url, type_name: &str, id: &str) -> Option<Self> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(type_name)
            .push(id);

        Some(Self {
            self_link: url.into(),
        })
    }
}
