// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::num::NonZeroU32;

mod names;
mod parse;

pub use names::{AId, EId};
pub use parse::decompress_svgz;

pub(crate) const SVG_NS: &str = "http://www.w3.org/2000/svg";
pub(crate) const XML_NAMESPACE_NS: &str = "http://www.w3.org/XML/1998/namespace";
pub(crate) const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";
pub(crate) const SODIPODI_NS: &str = "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd";

/// A mutable SVG tree container.
///
/// Unlike a rendering tree, it keeps the document as is:
/// unknown elements, foreign attributes and namespace declarations are preserved,
/// so it can be written back without losing editor data.
pub struct Document {
    nodes: Vec<NodeData>,
    links: HashMap<String, NodeId>,
}

impl Document {
    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> Node<'_> {
        self.get(NodeId::new(0))
    }

    /// Returns the root element.
    #[inline]
    pub fn root_element(&self) -> Node<'_> {
        // `unwrap` is safe, because `Document` is guarantee to have at least one element.
        self.root().first_element_child().unwrap()
    }

    /// Returns an iterator over document's descendant nodes.
    ///
    /// Shorthand for `doc.root().descendants()`.
    #[inline]
    pub fn descendants(&self) -> Descendants<'_> {
        self.root().descendants()
    }

    /// Returns an element by ID.
    ///
    /// Unlike the [`Descendants`] iterator, this is just a HashMap lookup.
    #[inline]
    pub fn element_by_id(&self, id: &str) -> Option<Node<'_>> {
        let node_id = self.links.get(id)?;
        Some(self.get(*node_id))
    }

    /// Returns a node by its ID.
    ///
    /// # Panics
    ///
    /// Panics when `id` belongs to another document.
    #[inline]
    pub fn get(&self, id: NodeId) -> Node<'_> {
        Node {
            id,
            d: &self.nodes[id.get_usize()],
            doc: self,
        }
    }

    /// Returns a mutable handle to a node.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> NodeMut<'_> {
        NodeMut { id, doc: self }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        if !self.root().has_children() {
            return write!(f, "Document []");
        }

        macro_rules! writeln_indented {
            ($depth:expr, $f:expr, $fmt:expr) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt)?;
            };
            ($depth:expr, $f:expr, $fmt:expr, $($arg:tt)*) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt, $($arg)*)?;
            };
        }

        fn print_children(
            parent: Node,
            depth: usize,
            f: &mut std::fmt::Formatter,
        ) -> Result<(), std::fmt::Error> {
            for child in parent.children() {
                if let Some(tag_name) = child.tag_name() {
                    writeln_indented!(depth, f, "Element {{");
                    writeln_indented!(depth, f, "    tag_name: {}", tag_name);

                    if !child.attributes().is_empty() {
                        writeln_indented!(depth + 1, f, "attributes: [");
                        for attr in child.attributes() {
                            writeln_indented!(depth + 2, f, "{:?}", attr);
                        }
                        writeln_indented!(depth + 1, f, "]");
                    }

                    if child.has_children() {
                        writeln_indented!(depth, f, "    children: [");
                        print_children(child, depth + 2, f)?;
                        writeln_indented!(depth, f, "    ]");
                    }

                    writeln_indented!(depth, f, "}}");
                } else {
                    writeln_indented!(depth, f, "{:?}", child);
                }
            }

            Ok(())
        }

        writeln!(f, "Document [")?;
        print_children(self.root(), 1, f)?;
        writeln!(f, "]")?;

        Ok(())
    }
}

/// A node handle inside a [`Document`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    #[inline]
    fn new(id: u32) -> Self {
        debug_assert!(id < u32::MAX);

        // We are using `NonZeroU32` to reduce overhead of `Option<NodeId>`.
        NodeId(NonZeroU32::new(id + 1).unwrap())
    }

    #[inline]
    fn get(self) -> u32 {
        self.0.get() - 1
    }

    #[inline]
    fn get_usize(self) -> usize {
        self.get() as usize
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(id: usize) -> Self {
        // We already checked that `id` is limited by u32::MAX.
        debug_assert!(id <= u32::MAX as usize);
        NodeId::new(id as u32)
    }
}

/// A qualified XML name.
#[derive(Clone, PartialEq, Debug)]
pub struct QName {
    /// Namespace URI.
    pub namespace: Option<String>,
    /// Namespace prefix as it was written in the source document.
    pub prefix: Option<String>,
    /// Local name.
    pub local: String,
}

impl QName {
    /// Creates a name without a namespace.
    pub fn new(local: &str) -> Self {
        QName {
            namespace: None,
            prefix: None,
            local: local.to_string(),
        }
    }

    /// Checks that the name belongs to the specified namespace and has the specified local name.
    #[inline]
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.local == local
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.prefix {
            Some(ref prefix) => write!(f, "{}:{}", prefix, self.local),
            None => write!(f, "{}", self.local),
        }
    }
}

/// A namespace declaration.
#[derive(Clone, PartialEq, Debug)]
pub struct Namespace {
    /// `None` for the default namespace.
    pub prefix: Option<String>,
    /// Namespace URI.
    pub uri: String,
}

/// An attribute.
#[derive(Clone, PartialEq)]
pub struct Attribute {
    /// Attribute's name.
    pub name: QName,
    /// Attribute's value.
    pub value: String,
}

impl Attribute {
    #[inline]
    fn is(&self, aid: AId) -> bool {
        self.name.namespace.is_none() && self.name.local == aid.to_str()
    }
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(
            f,
            "Attribute {{ name: {}, value: {} }}",
            self.name, self.value
        )
    }
}

pub(crate) struct Element {
    name: QName,
    namespaces: Vec<Namespace>,
    attributes: Vec<Attribute>,
}

pub(crate) enum NodeKind {
    Root,
    Element(Element),
    Text(String),
    Comment(String),
}

struct NodeData {
    parent: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Option<(NodeId, NodeId)>,
    kind: NodeKind,
}

/// An SVG node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    id: NodeId,
    doc: &'a Document,
    d: &'a NodeData,
}

impl Eq for Node<'_> {}

impl PartialEq for Node<'_> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.doc, other.doc) && std::ptr::eq(self.d, other.d)
    }
}

impl<'a> Node<'a> {
    /// Returns node's ID.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Checks if the current node is an element.
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.d.kind, NodeKind::Element(_))
    }

    /// Checks if the current node is a text.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.d.kind, NodeKind::Text(_))
    }

    /// Checks if the current node is a comment.
    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self.d.kind, NodeKind::Comment(_))
    }

    /// Returns node's document.
    #[inline]
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Returns element's tag name, unless the current node is not an element.
    #[inline]
    pub fn tag_name(&self) -> Option<&'a QName> {
        match self.d.kind {
            NodeKind::Element(ref e) => Some(&e.name),
            _ => None,
        }
    }

    /// Returns element's SVG name.
    ///
    /// Elements without a namespace are treated as SVG ones.
    #[inline]
    pub fn tag_id(&self) -> Option<EId> {
        let name = self.tag_name()?;
        match name.namespace.as_deref() {
            None | Some(SVG_NS) => EId::from_str(&name.local),
            _ => None,
        }
    }

    /// Returns element's `id` attribute value.
    ///
    /// Returns an empty string otherwise.
    #[inline]
    pub fn element_id(&self) -> &'a str {
        self.attribute(AId::Id).unwrap_or("")
    }

    /// Returns an attribute value.
    #[inline]
    pub fn attribute(&self, aid: AId) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| a.is(aid))
            .map(|a| a.value.as_str())
    }

    /// Returns a namespaced attribute value.
    #[inline]
    pub fn attribute_ns(&self, namespace: &str, local: &str) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| a.name.is(namespace, local))
            .map(|a| a.value.as_str())
    }

    /// Checks if an attribute is present.
    #[inline]
    pub fn has_attribute(&self, aid: AId) -> bool {
        self.attributes().iter().any(|a| a.is(aid))
    }

    /// Returns a list of all element's attributes.
    #[inline]
    pub fn attributes(&self) -> &'a [Attribute] {
        match self.d.kind {
            NodeKind::Element(ref e) => &e.attributes,
            _ => &[],
        }
    }

    /// Returns a list of namespaces declared on this element.
    #[inline]
    pub fn namespaces(&self) -> &'a [Namespace] {
        match self.d.kind {
            NodeKind::Element(ref e) => &e.namespaces,
            _ => &[],
        }
    }

    /// Returns node's text data.
    ///
    /// For text and comment nodes returns its content.
    /// For elements returns the first child node text.
    #[inline]
    pub fn text(&self) -> &'a str {
        match self.d.kind {
            NodeKind::Element(_) => match self.first_child() {
                Some(child) if child.is_text() => child.text(),
                _ => "",
            },
            NodeKind::Text(ref text) => text,
            NodeKind::Comment(ref text) => text,
            _ => "",
        }
    }

    /// Returns a parent node.
    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.d.parent.map(|id| self.doc.get(id))
    }

    /// Returns the parent element.
    #[inline]
    pub fn parent_element(&self) -> Option<Self> {
        self.ancestors().skip(1).find(|n| n.is_element())
    }

    /// Returns the next sibling.
    #[inline]
    pub fn next_sibling(&self) -> Option<Self> {
        self.d.next_sibling.map(|id| self.doc.get(id))
    }

    /// Returns the first child.
    #[inline]
    pub fn first_child(&self) -> Option<Self> {
        self.d.children.map(|(id, _)| self.doc.get(id))
    }

    /// Returns the first child element.
    #[inline]
    pub fn first_element_child(&self) -> Option<Self> {
        self.children().find(|n| n.is_element())
    }

    /// Returns the last child.
    #[inline]
    pub fn last_child(&self) -> Option<Self> {
        self.d.children.map(|(_, id)| self.doc.get(id))
    }

    /// Checks if the node has child nodes.
    #[inline]
    pub fn has_children(&self) -> bool {
        self.d.children.is_some()
    }

    /// Returns an iterator over ancestor nodes starting at this node.
    #[inline]
    pub fn ancestors(&self) -> Ancestors<'a> {
        Ancestors(Some(*self))
    }

    /// Returns an iterator over children nodes.
    #[inline]
    pub fn children(&self) -> Children<'a> {
        Children {
            front: self.first_child(),
            back: self.last_child(),
        }
    }

    /// Returns an iterator which traverses the subtree starting at this node.
    #[inline]
    fn traverse(&self) -> Traverse<'a> {
        Traverse {
            root: *self,
            edge: None,
        }
    }

    /// Returns an iterator over this node and its descendants.
    #[inline]
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants(self.traverse())
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self.d.kind {
            NodeKind::Root => write!(f, "Root"),
            NodeKind::Element(ref e) => {
                write!(
                    f,
                    "Element {{ tag_name: {}, attributes: {:?} }}",
                    e.name, e.attributes
                )
            }
            NodeKind::Text(ref text) => write!(f, "Text({:?})", text),
            NodeKind::Comment(ref text) => write!(f, "Comment({:?})", text),
        }
    }
}

/// A mutable node handle.
///
/// Only element data can be changed. The tree structure itself is fixed after parsing.
#[derive(Debug)]
pub struct NodeMut<'a> {
    id: NodeId,
    doc: &'a mut Document,
}

impl NodeMut<'_> {
    /// Returns a read-only view of the node.
    #[inline]
    pub fn as_node(&self) -> Node<'_> {
        self.doc.get(self.id)
    }

    fn element_mut(&mut self) -> Option<&mut Element> {
        match self.doc.nodes[self.id.get_usize()].kind {
            NodeKind::Element(ref mut e) => Some(e),
            _ => None,
        }
    }

    /// Sets an attribute value.
    ///
    /// An existing attribute keeps its position. A new one is appended.
    pub fn set_attribute(&mut self, aid: AId, value: impl Into<String>) {
        let value = value.into();
        if let Some(e) = self.element_mut() {
            match e.attributes.iter_mut().find(|a| a.is(aid)) {
                Some(attr) => attr.value = value,
                None => e.attributes.push(Attribute {
                    name: QName::new(aid.to_str()),
                    value,
                }),
            }
        }
    }

    /// Removes an attribute and returns its value.
    pub fn remove_attribute(&mut self, aid: AId) -> Option<String> {
        let e = self.element_mut()?;
        let idx = e.attributes.iter().position(|a| a.is(aid))?;
        Some(e.attributes.remove(idx).value)
    }

    /// Removes all attributes for which `f` returns `false`.
    pub fn retain_attributes<F: FnMut(&Attribute) -> bool>(&mut self, f: F) {
        if let Some(e) = self.element_mut() {
            e.attributes.retain(f);
        }
    }

    /// Renames the element while keeping its namespace and prefix.
    pub fn set_tag_name(&mut self, eid: EId) {
        if let Some(e) = self.element_mut() {
            e.name.local = eid.to_str().to_string();
        }
    }
}

/// An iterator over ancestor nodes.
#[derive(Clone, Debug)]
pub struct Ancestors<'a>(Option<Node<'a>>);

impl<'a> Iterator for Ancestors<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.0.take();
        self.0 = node.as_ref().and_then(Node::parent);
        node
    }
}

/// An iterator over children nodes.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    front: Option<Node<'a>>,
    back: Option<Node<'a>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.front.take();
        if self.front == self.back {
            self.back = None;
        } else {
            self.front = node.as_ref().and_then(Node::next_sibling);
        }
        node
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Edge<'a> {
    Open(Node<'a>),
    Close(Node<'a>),
}

#[derive(Clone, Debug)]
struct Traverse<'a> {
    root: Node<'a>,
    edge: Option<Edge<'a>>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = Edge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.edge {
            Some(Edge::Open(node)) => {
                self.edge = Some(match node.first_child() {
                    Some(first_child) => Edge::Open(first_child),
                    None => Edge::Close(node),
                });
            }
            Some(Edge::Close(node)) => {
                if node == self.root {
                    self.edge = None;
                } else if let Some(next_sibling) = node.next_sibling() {
                    self.edge = Some(Edge::Open(next_sibling));
                } else {
                    self.edge = node.parent().map(Edge::Close);
                }
            }
            None => {
                self.edge = Some(Edge::Open(self.root));
            }
        }

        self.edge
    }
}

/// A descendants iterator.
#[derive(Clone, Debug)]
pub struct Descendants<'a>(Traverse<'a>);

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for edge in &mut self.0 {
            if let Edge::Open(node) = edge {
                return Some(node);
            }
        }

        None
    }
}
