// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;

use super::{
    AId, Attribute, Document, EId, Element, Namespace, NodeData, NodeId, NodeKind, QName, SVG_NS,
    XML_NAMESPACE_NS,
};
use crate::Error;

impl Document {
    /// Parses a [`Document`] from a string.
    pub fn parse_str(text: &str) -> Result<Document, Error> {
        let xml_opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };

        let xml = roxmltree::Document::parse_with_options(text, xml_opt)?;
        parse(&xml)
    }

    /// Parses a [`Document`] from SVG data.
    ///
    /// Can contain an SVG string or a gzip compressed data.
    pub fn from_data(data: &[u8]) -> Result<Document, Error> {
        if data.starts_with(&[0x1f, 0x8b]) {
            let data = decompress_svgz(data)?;
            let text = std::str::from_utf8(&data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::parse_str(text)
        } else {
            let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
            Self::parse_str(text)
        }
    }

    /// Parses a [`Document`] from a [`roxmltree::Document`].
    pub fn parse_tree(xml: &roxmltree::Document) -> Result<Document, Error> {
        parse(xml)
    }

    pub(crate) fn append(&mut self, parent_id: NodeId, kind: NodeKind) -> NodeId {
        let new_child_id = NodeId::from(self.nodes.len());
        self.nodes.push(NodeData {
            parent: Some(parent_id),
            next_sibling: None,
            children: None,
            kind,
        });

        let last_child_id = self.nodes[parent_id.get_usize()].children.map(|(_, id)| id);

        if let Some(id) = last_child_id {
            self.nodes[id.get_usize()].next_sibling = Some(new_child_id);
        }

        self.nodes[parent_id.get_usize()].children = Some(
            if let Some((first_child_id, _)) = self.nodes[parent_id.get_usize()].children {
                (first_child_id, new_child_id)
            } else {
                (new_child_id, new_child_id)
            },
        );

        new_child_id
    }
}

/// Decompresses an SVGZ file.
pub fn decompress_svgz(data: &[u8]) -> Result<Vec<u8>, Error> {
    use std::io::Read;

    let mut decoder = flate2::read::GzDecoder::new(data);
    let mut decoded = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut decoded)
        .map_err(|_| Error::MalformedGZip)?;
    Ok(decoded)
}

fn parse(xml: &roxmltree::Document) -> Result<Document, Error> {
    let mut doc = Document {
        nodes: Vec::new(),
        links: HashMap::new(),
    };

    // Add a root node.
    doc.nodes.push(NodeData {
        parent: None,
        next_sibling: None,
        children: None,
        kind: NodeKind::Root,
    });

    parse_xml_node_children(xml.root(), doc.root().id, 0, &mut doc)?;

    // Check that the root element is `svg`.
    match doc.root().first_element_child() {
        Some(child) => {
            let is_svg = child
                .tag_name()
                .map(|name| name.is(SVG_NS, EId::Svg.to_str()))
                .unwrap_or(false);

            if !is_svg {
                return Err(Error::NoRootSvg);
            }
        }
        None => return Err(Error::NoRootSvg),
    }

    // Collect all elements with `id` attribute.
    let mut links = HashMap::new();
    for node in doc.descendants() {
        if let Some(id) = node.attribute(AId::Id) {
            links.insert(id.to_string(), node.id);
        }
    }
    doc.links = links;

    Ok(doc)
}

fn parse_xml_node_children(
    parent: roxmltree::Node,
    parent_id: NodeId,
    depth: u32,
    doc: &mut Document,
) -> Result<(), Error> {
    for node in parent.children() {
        parse_xml_node(node, parent_id, depth, doc)?;
    }

    Ok(())
}

fn parse_xml_node(
    node: roxmltree::Node,
    parent_id: NodeId,
    depth: u32,
    doc: &mut Document,
) -> Result<(), Error> {
    if depth > 1024 {
        return Err(Error::ElementsLimitReached);
    }

    if doc.nodes.len() > 1_000_000 {
        return Err(Error::ElementsLimitReached);
    }

    if node.is_element() {
        let element = parse_svg_element(node);
        let node_id = doc.append(parent_id, NodeKind::Element(element));
        parse_xml_node_children(node, node_id, depth + 1, doc)?;
    } else if node.is_text() {
        let text = node.text().unwrap_or_default();

        // Whitespaces between elements are meaningless,
        // unless we are inside a text element.
        if !text.trim().is_empty() || is_text_content(doc, parent_id) {
            doc.append(parent_id, NodeKind::Text(text.to_string()));
        }
    } else if node.is_comment() {
        doc.append(
            parent_id,
            NodeKind::Comment(node.text().unwrap_or_default().to_string()),
        );
    }

    Ok(())
}

fn is_text_content(doc: &Document, node_id: NodeId) -> bool {
    matches!(
        doc.get(node_id).tag_id(),
        Some(EId::Text) | Some(EId::Tspan) | Some(EId::TextPath)
    )
}

fn parse_svg_element(xml_node: roxmltree::Node) -> Element {
    let tag_name = xml_node.tag_name();
    let name = QName {
        namespace: tag_name.namespace().map(str::to_string),
        prefix: tag_name
            .namespace()
            .and_then(|uri| resolve_prefix(xml_node, uri, true)),
        local: tag_name.name().to_string(),
    };

    // Only namespaces that are not already declared by a parent element.
    let parent = xml_node.parent_element();
    let mut namespaces = Vec::new();
    for ns in xml_node.namespaces() {
        if ns.name() == Some("xml") {
            continue;
        }

        let is_inherited = parent
            .map(|p| {
                p.namespaces()
                    .any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri())
            })
            .unwrap_or(false);

        if !is_inherited {
            namespaces.push(Namespace {
                prefix: ns.name().map(str::to_string),
                uri: ns.uri().to_string(),
            });
        }
    }

    let mut attributes = Vec::new();
    for attr in xml_node.attributes() {
        let prefix = match attr.namespace() {
            Some(uri) => match resolve_prefix(xml_node, uri, false) {
                Some(prefix) => Some(prefix),
                None => {
                    log::warn!(
                        "Attribute '{}' has an undeclared namespace. Skipped.",
                        attr.name()
                    );
                    continue;
                }
            },
            None => None,
        };

        attributes.push(Attribute {
            name: QName {
                namespace: attr.namespace().map(str::to_string),
                prefix,
                local: attr.name().to_string(),
            },
            value: attr.value().to_string(),
        });
    }

    Element {
        name,
        namespaces,
        attributes,
    }
}

fn resolve_prefix(node: roxmltree::Node, uri: &str, allow_default: bool) -> Option<String> {
    if uri == XML_NAMESPACE_NS {
        return Some("xml".to_string());
    }

    // Attributes cannot be in the default namespace.
    if allow_default && node.namespaces().any(|ns| ns.name().is_none() && ns.uri() == uri) {
        return None;
    }

    node.namespaces()
        .find(|ns| ns.name().is_some() && ns.uri() == uri)
        .and_then(|ns| ns.name())
        .map(str::to_string)
}
