//! Streaming OSM XML reader.
//!
//! Yields one [`Primitive`] per top-level `node`/`way`/`relation` element,
//! with `tag`/`nd`/`member` children folded in. The reader holds a single
//! primitive in memory at a time, so arbitrarily large extracts stream in
//! constant space. All other elements (`bounds`, the `osm` root, ...) are
//! skipped.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use osm_wrangle_extract_models::{ElementKind, Primitive};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Errors from reading an OSM XML extract.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// Extract file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// Path to the extract file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Malformed XML.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed element attribute.
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Malformed escape sequence in an attribute value.
    #[error("XML escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// Attribute name is not valid UTF-8.
    #[error("invalid UTF-8 in attribute name: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Streaming iterator over the primitives of an OSM XML document.
pub struct OsmReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    current: Option<Primitive>,
    finished: bool,
}

impl OsmReader<BufReader<File>> {
    /// Opens an extract file for streaming.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ExtractError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> OsmReader<R> {
    /// Wraps an already-open reader.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: Reader::from_reader(reader),
            buf: Vec::new(),
            current: None,
            finished: false,
        }
    }

    fn advance(&mut self) -> Result<Option<Primitive>, ExtractError> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(ref start) => {
                    if let Some(kind) = element_kind(start) {
                        self.current = Some(open_primitive(kind, start)?);
                    } else if let Some(current) = self.current.as_mut() {
                        // Non-empty child form, e.g. <tag k=".." v=".."></tag>.
                        add_child(current, start)?;
                    }
                }
                Event::Empty(ref start) => {
                    if let Some(kind) = element_kind(start) {
                        // Self-closing primitive, e.g. a node with no tags.
                        return Ok(Some(open_primitive(kind, start)?));
                    }
                    if let Some(current) = self.current.as_mut() {
                        add_child(current, start)?;
                    }
                }
                Event::End(ref end) => {
                    let closes_primitive = matches!(
                        end.name().as_ref(),
                        b"node" | b"way" | b"relation"
                    );
                    if closes_primitive {
                        if let Some(primitive) = self.current.take() {
                            return Ok(Some(primitive));
                        }
                    }
                }
                Event::Eof => {
                    self.finished = true;
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for OsmReader<R> {
    type Item = Result<Primitive, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(Some(primitive)) => Some(Ok(primitive)),
            Ok(None) => None,
            Err(e) => {
                // A malformed document is not recoverable mid-stream.
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

fn element_kind(start: &BytesStart<'_>) -> Option<ElementKind> {
    match start.name().as_ref() {
        b"node" => Some(ElementKind::Node),
        b"way" => Some(ElementKind::Way),
        b"relation" => Some(ElementKind::Relation),
        _ => None,
    }
}

fn open_primitive(kind: ElementKind, start: &BytesStart<'_>) -> Result<Primitive, ExtractError> {
    let mut primitive = Primitive::new(kind);
    primitive.attrib = attributes(start)?;
    Ok(primitive)
}

fn add_child(current: &mut Primitive, start: &BytesStart<'_>) -> Result<(), ExtractError> {
    match start.name().as_ref() {
        b"tag" => {
            let attrs = attributes(start)?;
            let key = attrs.get("k").cloned().unwrap_or_default();
            let value = attrs.get("v").cloned().unwrap_or_default();
            if let Some(existing) = current.tags.get(&key) {
                log::warn!(
                    "duplicate tag key {key:?} on {} {}: keeping {existing:?}, dropping {value:?}",
                    current.kind,
                    current.id().unwrap_or("?"),
                );
            } else {
                current.tags.insert(key, value);
            }
        }
        b"nd" => {
            let attrs = attributes(start)?;
            if let Some(node_ref) = attrs.get("ref") {
                current.nd_refs.push(node_ref.clone());
            }
        }
        b"member" => {
            current.members.push(attributes(start)?);
        }
        _ => {}
    }
    Ok(())
}

fn attributes(start: &BytesStart<'_>) -> Result<BTreeMap<String, String>, ExtractError> {
    let mut map = BTreeMap::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        map.insert(key, value);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="test">
  <bounds minlat="28.0" minlon="-81.0" maxlat="28.5" maxlon="-80.4"/>
  <node id="101" lat="28.0836" lon="-80.6081">
    <tag k="addr:street" v="N Banana River Dr"/>
    <tag k="addr:city" v="Melbourne"/>
  </node>
  <node id="102" lat="28.1" lon="-80.61"/>
  <way id="201">
    <nd ref="101"/>
    <nd ref="102"/>
    <tag k="name" v="Main St"/>
    <tag k="tiger:name_base" v="Main"/>
    <tag k="tiger:name_type" v="St"/>
  </way>
  <relation id="301">
    <member type="way" ref="201" role="outer"/>
    <tag k="type" v="multipolygon"/>
  </relation>
</osm>
"#;

    fn read_all(xml: &str) -> Vec<Primitive> {
        OsmReader::from_reader(xml.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn streams_all_primitives_in_order() {
        let primitives = read_all(SAMPLE);
        assert_eq!(primitives.len(), 4);
        assert_eq!(primitives[0].kind, ElementKind::Node);
        assert_eq!(primitives[1].kind, ElementKind::Node);
        assert_eq!(primitives[2].kind, ElementKind::Way);
        assert_eq!(primitives[3].kind, ElementKind::Relation);
    }

    #[test]
    fn node_attributes_and_tags() {
        let primitives = read_all(SAMPLE);
        let node = &primitives[0];
        assert_eq!(node.id(), Some("101"));
        assert_eq!(node.attrib.get("lat").map(String::as_str), Some("28.0836"));
        assert_eq!(node.tag("addr:street"), Some("N Banana River Dr"));
        assert_eq!(node.tag("addr:city"), Some("Melbourne"));
    }

    #[test]
    fn self_closing_node_has_no_tags() {
        let primitives = read_all(SAMPLE);
        assert_eq!(primitives[1].id(), Some("102"));
        assert!(primitives[1].tags.is_empty());
    }

    #[test]
    fn way_collects_nd_refs() {
        let primitives = read_all(SAMPLE);
        let way = &primitives[2];
        assert_eq!(way.nd_refs, vec!["101".to_string(), "102".to_string()]);
        assert_eq!(way.tag("tiger:name_base"), Some("Main"));
    }

    #[test]
    fn relation_collects_members() {
        let primitives = read_all(SAMPLE);
        let relation = &primitives[3];
        assert_eq!(relation.members.len(), 1);
        assert_eq!(
            relation.members[0].get("role").map(String::as_str),
            Some("outer")
        );
    }

    #[test]
    fn skips_non_primitive_elements() {
        let primitives = read_all(SAMPLE);
        assert!(primitives.iter().all(|p| p.attrib.get("minlat").is_none()));
    }

    #[test]
    fn unescapes_attribute_values() {
        let xml = r#"<osm><node id="1"><tag k="name" v="Fish &amp; Chips"/></node></osm>"#;
        let primitives = read_all(xml);
        assert_eq!(primitives[0].tag("name"), Some("Fish & Chips"));
    }

    #[test]
    fn duplicate_tag_key_keeps_first_value() {
        let xml = r#"<osm><node id="1"><tag k="name" v="First"/><tag k="name" v="Second"/></node></osm>"#;
        let primitives = read_all(xml);
        assert_eq!(primitives[0].tag("name"), Some("First"));
    }

    #[test]
    fn malformed_xml_surfaces_as_error() {
        let mut reader = OsmReader::from_reader("<osm><node id=".as_bytes());
        assert!(reader.any(|item| item.is_err()));
    }

    #[test]
    fn empty_document_yields_nothing() {
        let mut reader = OsmReader::from_reader("<osm></osm>".as_bytes());
        assert!(reader.next().is_none());
    }
}
