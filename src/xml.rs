//! A small owned XML tree between the quick-xml tokenizer and the binder.
//!
//! Text is kept as separate child nodes so mixed content (`<text>` and
//! `<span>`) keeps its leading text and span tails in position. The reader
//! keeps every text node, blank or not; the binder knows which kinds are
//! element-only and ignores their formatting whitespace. The writer
//! indents element-only content and writes mixed content on one line.
use quick_xml::Reader;
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::{BytesStart, Event};

use crate::error::{LiftError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlChild {
    Element(XmlNode),
    Text(String),
}

#[derive(Debug, Clone, Eq, Default)]
pub struct XmlNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlChild>,
    /// Mixed content: always written inline, even when it holds only elements.
    pub mixed: bool,
}

// `mixed` is a writing hint, the reader never sets it
impl PartialEq for XmlNode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && self.children == other.children
    }
}

impl XmlNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let position = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(position).1)
    }
    pub fn elements(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter_map(|child| match child {
            XmlChild::Element(node) => Some(node),
            XmlChild::Text(_) => None,
        })
    }
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut XmlNode> {
        self.children.iter_mut().filter_map(|child| match child {
            XmlChild::Element(node) => Some(node),
            XmlChild::Text(_) => None,
        })
    }
    pub fn element(&self, name: &str) -> Option<&XmlNode> {
        self.elements().find(|node| node.name == name)
    }
    pub fn element_mut(&mut self, name: &str) -> Option<&mut XmlNode> {
        self.elements_mut().find(|node| node.name == name)
    }
    fn push_text(&mut self, text: &str) {
        if let Some(XmlChild::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlChild::Text(text.to_string()));
        }
    }
    fn is_inline(&self) -> bool {
        self.mixed
            || self
                .children
                .iter()
                .any(|child| matches!(child, XmlChild::Text(_)))
    }

    // ------------- Writing -------------
    /// The node as a complete document with an XML declaration.
    pub fn to_document(&self, indent: usize) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.write_pretty(&mut out, 0, indent);
        out
    }
    fn write_pretty(&self, out: &mut String, depth: usize, indent: usize) {
        out.push_str(&" ".repeat(depth * indent));
        if self.is_inline() {
            self.write_inline(out);
            out.push('\n');
            return;
        }
        self.write_open(out);
        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");
        for child in self.elements() {
            child.write_pretty(out, depth + 1, indent);
        }
        out.push_str(&" ".repeat(depth * indent));
        self.write_close(out);
        out.push('\n');
    }
    fn write_inline(&self, out: &mut String) {
        self.write_open(out);
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                XmlChild::Element(node) => node.write_inline(out),
                XmlChild::Text(text) => out.push_str(&partial_escape(text.as_str())),
            }
        }
        self.write_close(out);
    }
    fn write_open(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
    }
    fn write_close(&self, out: &mut String) {
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn malformed(message: impl std::fmt::Display, position: u64) -> LiftError {
    LiftError::MalformedXml {
        path: None,
        message: format!("{message} (at byte {position})"),
    }
}

fn node_from_start(start: &BytesStart, position: u64) -> Result<XmlNode> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| malformed(e, position))?
        .to_string();
    let mut node = XmlNode::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| malformed(e, position))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|e| malformed(e, position))?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(|e| malformed(e, position))?
            .into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(XmlChild::Element(node)),
        None => *root = Some(node),
    }
}

/// Reads a whole document into a tree, returning its root element.
pub fn parse_document(input: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;
    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(node_from_start(&start, position)?),
            Ok(Event::Empty(start)) => {
                let node = node_from_start(&start, position)?;
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected end tag", position))?;
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::Text(text)) => {
                if let Some(parent) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| malformed(e, position))?;
                    parent.push_text(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            // declaration, comments, processing instructions and doctype
            Ok(_) => {}
            Err(e) => return Err(malformed(e, position)),
        }
    }
    if let Some(open) = stack.last() {
        return Err(malformed(
            format!("unclosed element <{}>", open.name),
            input.len() as u64,
        ));
    }
    root.ok_or_else(|| malformed("document has no root element", 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_content_keeps_position() {
        let root = parse_document(
            "<text>Hello <span lang=\"fr\">mon</span> ami\n  <span>!</span></text>",
        )
        .unwrap();
        assert_eq!(root.children.len(), 4);
        assert_eq!(root.children[0], XmlChild::Text("Hello ".into()));
        assert_eq!(root.children[2], XmlChild::Text(" ami\n  ".into()));
    }

    #[test]
    fn blank_text_is_kept() {
        let root = parse_document("<a>\n  <b x=\"1 &amp; 2\"/>\n  <c>t</c>\n</a>").unwrap();
        assert_eq!(root.children.len(), 5);
        assert_eq!(root.elements().count(), 2);
        assert_eq!(root.element("b").and_then(|b| b.attribute("x")), Some("1 & 2"));

        let root = parse_document("<text><span>a</span> <span>b</span></text>").unwrap();
        assert_eq!(root.children[1], XmlChild::Text(" ".into()));
    }

    #[test]
    fn mixed_nodes_are_written_inline() {
        let mut text = parse_document("<text><span lang=\"fr\">mot</span></text>").unwrap();
        let mut form = XmlNode::new("form");
        form.children.push(XmlChild::Element(text.clone()));
        assert_eq!(
            form.to_document(2),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<form>\n  <text>\n    <span lang=\"fr\">mot</span>\n  </text>\n</form>\n"
        );
        text.mixed = true;
        form.children[0] = XmlChild::Element(text);
        assert_eq!(
            form.to_document(2),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<form>\n  <text><span lang=\"fr\">mot</span></text>\n</form>\n"
        );
    }

    #[test]
    fn pretty_output() {
        let root = parse_document("<a><b/><c>x &lt; y<d>z</d></c></a>").unwrap();
        assert_eq!(
            root.to_document(2),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a>\n  <b/>\n  <c>x &lt; y<d>z</d></c>\n</a>\n"
        );
    }

    #[test]
    fn malformed_input() {
        assert!(matches!(
            parse_document("<a><b></a>"),
            Err(LiftError::MalformedXml { .. })
        ));
        assert!(parse_document("<a>").is_err());
        assert!(parse_document("").is_err());
    }
}
