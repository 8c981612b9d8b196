#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for OSM extract traversal.
//!
//! One [`Primitive`] per top-level OSM element, holding everything the
//! audit and munge paths consume: XML attributes, tag key/value pairs,
//! way node references, and relation members.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Kind of a top-level OSM element.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    /// A point feature with `lat`/`lon` attributes.
    Node,
    /// An ordered list of node references, usually a road or area.
    Way,
    /// A grouping of members with roles.
    Relation,
}

/// Attribute map of one relation `member` child element
/// (`type`/`ref`/`role`).
pub type Member = BTreeMap<String, String>;

/// One OSM node, way, or relation with its children flattened into maps
/// and lists.
///
/// Tag keys are unique per primitive in the source data; the reader keeps
/// the first value when that assumption is violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primitive {
    /// Element kind.
    pub kind: ElementKind,
    /// XML attributes of the element itself (`id`, `lat`, `lon`,
    /// `version`, ...), all kept as strings.
    pub attrib: BTreeMap<String, String>,
    /// `tag` children as key/value pairs.
    pub tags: BTreeMap<String, String>,
    /// `nd` child `ref` values, in document order (ways only).
    pub nd_refs: Vec<String>,
    /// `member` children (relations only).
    pub members: Vec<Member>,
}

impl Primitive {
    /// Creates an empty primitive of the given kind.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attrib: BTreeMap::new(),
            tags: BTreeMap::new(),
            nd_refs: Vec::new(),
            members: Vec::new(),
        }
    }

    /// The value of one tag, if present.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// The element's `id` attribute, if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrib.get("id").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn element_kind_renders_lowercase() {
        assert_eq!(ElementKind::Node.to_string(), "node");
        assert_eq!(ElementKind::Relation.as_ref(), "relation");
        assert_eq!(ElementKind::from_str("way").unwrap(), ElementKind::Way);
    }

    #[test]
    fn tag_lookup() {
        let mut primitive = Primitive::new(ElementKind::Way);
        primitive
            .tags
            .insert("addr:street".to_string(), "Main St".to_string());
        assert_eq!(primitive.tag("addr:street"), Some("Main St"));
        assert_eq!(primitive.tag("name"), None);
    }
}
