//! The JSON:API document types every response is shaped into.
//!
//! A document carries one primary resource (or a list), the related resource
//! objects its relationship identifiers resolve to, and an optional `meta`
//! side-channel. Attribute keys are camelCase.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RelationshipData {
    One(Option<ResourceIdentifier>),
    Many(Vec<ResourceIdentifier>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    pub data: RelationshipData,
}

#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub attributes: BTreeMap<&'static str, Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<&'static str, Relationship>,
}

impl Resource {
    pub fn new(kind: &'static str, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            attributes: BTreeMap::new(),
            relationships: BTreeMap::new(),
        }
    }

    pub fn attribute(
        mut self,
        key: &'static str,
        value: impl Serialize,
    ) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.attributes.insert(key, value);
        self
    }

    pub fn to_one(
        mut self,
        key: &'static str,
        identifier: Option<ResourceIdentifier>,
    ) -> Self {
        self.relationships.insert(
            key,
            Relationship {
                data: RelationshipData::One(identifier),
            },
        );
        self
    }

    pub fn to_many(
        mut self,
        key: &'static str,
        identifiers: Vec<ResourceIdentifier>,
    ) -> Self {
        self.relationships.insert(
            key,
            Relationship {
                data: RelationshipData::Many(identifiers),
            },
        );
        self
    }

    pub fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier {
            kind: self.kind,
            id: self.id.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(Resource),
    Many(Vec<Resource>),
}

#[derive(Debug, Serialize)]
pub struct Document {
    pub data: PrimaryData,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Document {
    pub fn one(resource: Resource) -> Self {
        Self {
            data: PrimaryData::One(resource),
            included: Vec::new(),
            meta: None,
        }
    }

    pub fn many(resources: Vec<Resource>) -> Self {
        Self {
            data: PrimaryData::Many(resources),
            included: Vec::new(),
            meta: None,
        }
    }

    pub fn with_included(mut self, included: Vec<Resource>) -> Self {
        self.included = included;
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}
