use crate::{Error, engine::PageLinks, project::ResourceObject};
use serde::Serialize;
use serde_json::{Map, Value};

///
/// Document
///
/// Top-level envelope. Optional members are omitted when absent.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Document {
    pub data: PrimaryData,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<ResourceObject>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsonapi: Option<JsonApi>,
}

impl Document {
    /// Encode to a JSON value.
    pub fn to_value(&self) -> Result<Value, Error> {
        Ok(serde_json::to_value(self)?)
    }

    /// Encode to a compact JSON string.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Primary resources as a slice (empty for `null` data).
    #[must_use]
    pub fn resources(&self) -> &[ResourceObject] {
        match &self.data {
            PrimaryData::One(Some(resource)) => std::slice::from_ref(resource),
            PrimaryData::One(None) => &[],
            PrimaryData::Many(resources) => resources,
        }
    }
}

///
/// PrimaryData
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(Option<ResourceObject>),
    Many(Vec<ResourceObject>),
}

///
/// JsonApi
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct JsonApi {
    pub version: String,
}
