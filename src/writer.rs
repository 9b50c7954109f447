// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Write;

use xmlwriter::XmlWriter;

use crate::svgtree::{Document, EId, Node};

pub use xmlwriter::Indent;

impl Document {
    /// Writes the document back to SVG.
    pub fn to_string(&self, opt: &WriteOptions) -> String {
        let xml_opt = xmlwriter::Options {
            use_single_quote: opt.use_single_quote,
            indent: opt.indent,
            attributes_indent: opt.attributes_indent,
        };

        let mut xml = XmlWriter::new(xml_opt);
        xml.write_declaration();
        write_children(self.root(), false, &mut xml);
        xml.end_document()
    }
}

/// XML writing options.
#[derive(Clone, Copy, Debug)]
pub struct WriteOptions {
    /// Use single quote marks instead of double quote.
    ///
    /// # Examples
    ///
    /// Before:
    ///
    /// ```text
    /// <rect fill="red"/>
    /// ```
    ///
    /// After:
    ///
    /// ```text
    /// <rect fill='red'/>
    /// ```
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// Elements with text content are never indented.
    ///
    /// Default: 4 spaces
    pub indent: Indent,

    /// Set XML attributes indention.
    ///
    /// Default: `None`
    pub attributes_indent: Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            use_single_quote: false,
            indent: Indent::Spaces(4),
            attributes_indent: Indent::None,
        }
    }
}

/// Compresses an SVG data into SVGZ.
pub fn compress_svgz(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn write_children(parent: Node<'_>, preserve_whitespaces: bool, xml: &mut XmlWriter) {
    for node in parent.children() {
        let tag_name = match node.tag_name() {
            Some(v) => v,
            None => {
                if node.is_comment() {
                    xml.write_comment(node.text());
                } else if !node.text().is_empty() {
                    xml.write_text(&escape_text(node.text()));
                }

                continue;
            }
        };

        xml.start_element(&tag_name.to_string());

        for ns in node.namespaces() {
            match ns.prefix {
                Some(ref prefix) => xml.write_attribute(&format!("xmlns:{}", prefix), &ns.uri),
                None => xml.write_attribute("xmlns", &ns.uri),
            }
        }

        for attr in node.attributes() {
            xml.write_attribute(&attr.name.to_string(), &escape_text(&attr.value));
        }

        // Indention inside a text content would change the rendered text.
        let preserve = !preserve_whitespaces && has_text_content(node);
        if preserve {
            xml.set_preserve_whitespaces(true);
        }

        if node.has_children() {
            write_children(node, preserve_whitespaces || preserve, xml);
        }

        xml.end_element();

        if preserve {
            xml.set_preserve_whitespaces(false);
        }
    }
}

fn has_text_content(node: Node<'_>) -> bool {
    matches!(
        node.tag_id(),
        Some(EId::Text) | Some(EId::Tspan) | Some(EId::TextPath)
    ) || node.children().any(|n| n.is_text())
}

// Quotes in attributes are escaped by the writer itself.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape() {
        assert_eq!(escape_text("a < b && c"), "a &lt; b &amp;&amp; c");
    }

    #[test]
    fn svgz() {
        let data = compress_svgz(b"<svg/>").unwrap();
        assert!(data.starts_with(&[0x1f, 0x8b]));
        assert_eq!(crate::decompress_svgz(&data).unwrap(), b"<svg/>");
    }
}
