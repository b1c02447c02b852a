//! Structural model of a `.resx` document.
//!
//! The document is kept as a generic tree of elements and opaque events so
//! that it can be written back without reformatting. Only the `data`
//! children of the root element are ever interpreted, and only through their
//! `name` attribute.

use anyhow::{Context, Result, anyhow, bail};
use log::{trace, warn};
use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, Event},
};
use std::collections::HashSet;

use crate::constants::UTF8_BOM;

const DATA_TAG: &[u8] = b"data";
const NAME_ATTR: &str = "name";

#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    /// Text, comments, CDATA, declarations, processing instructions, doctype
    Other(Event<'static>),
}

#[derive(Debug, Clone)]
pub struct Element {
    start: BytesStart<'static>,
    children: Vec<Node>,
    /// `None` for self-closing elements
    end: Option<BytesEnd<'static>>,
}

impl Element {
    pub fn tag(&self) -> &[u8] {
        self.start.name().into_inner()
    }

    pub fn attribute(&self, name: &str) -> Result<Option<String>> {
        match self.start.try_get_attribute(name)? {
            Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
            None => Ok(None),
        }
    }

    fn is_item(&self) -> bool {
        self.tag() == DATA_TAG
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match &self.end {
            None => writer.write_event(Event::Empty(self.start.borrow()))?,
            Some(end) => {
                writer.write_event(Event::Start(self.start.borrow()))?;
                for child in &self.children {
                    child.write(writer)?;
                }
                writer.write_event(Event::End(end.borrow()))?;
            }
        }
        Ok(())
    }
}

impl Node {
    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        match self {
            Node::Element(el) => el.write(writer),
            Node::Other(event) => {
                writer.write_event(event.borrow())?;
                Ok(())
            }
        }
    }

    fn is_whitespace(&self) -> bool {
        match self {
            Node::Other(Event::Text(t)) => t.iter().all(|b| b.is_ascii_whitespace()),
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResxDocument {
    nodes: Vec<Node>,
    root: usize,
    bom: bool,
}

impl ResxDocument {
    /// Parses a resource document. Mismatched or unclosed tags are errors.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let (bom, body) = match bytes.strip_prefix(UTF8_BOM) {
            Some(rest) => (true, rest),
            None => (false, bytes),
        };

        let mut reader = Reader::from_reader(body);
        let mut stack: Vec<Element> = Vec::new();
        let mut nodes: Vec<Node> = Vec::new();

        loop {
            let pos = reader.buffer_position();
            let event = reader
                .read_event()
                .with_context(|| format!("Malformed XML near byte {}", pos))?;
            match event {
                Event::Start(e) => {
                    stack.push(Element { start: e.into_owned(), children: Vec::new(), end: None });
                }
                Event::End(e) => {
                    let mut el = stack.pop().ok_or_else(|| anyhow!("Unexpected closing tag"))?;
                    el.end = Some(e.into_owned());
                    attach(&mut stack, &mut nodes, Node::Element(el));
                }
                Event::Empty(e) => {
                    let el = Element { start: e.into_owned(), children: Vec::new(), end: None };
                    attach(&mut stack, &mut nodes, Node::Element(el));
                }
                Event::Eof => break,
                other => attach(&mut stack, &mut nodes, Node::Other(other.into_owned())),
            }
        }

        if let Some(open) = stack.last() {
            bail!("Unclosed element <{}>", String::from_utf8_lossy(open.tag()));
        }

        let root = nodes
            .iter()
            .position(|n| matches!(n, Node::Element(_)))
            .ok_or_else(|| anyhow!("Document has no root element"))?;

        trace!("Parsed document with {} top-level nodes", nodes.len());
        Ok(Self { nodes, root, bom })
    }

    pub fn root(&self) -> &Element {
        match &self.nodes[self.root] {
            Node::Element(el) => el,
            Node::Other(_) => unreachable!("root index always points at an element"),
        }
    }

    fn root_mut(&mut self) -> &mut Element {
        match &mut self.nodes[self.root] {
            Node::Element(el) => el,
            Node::Other(_) => unreachable!("root index always points at an element"),
        }
    }

    /// Whether the root element has a `data` collection
    pub fn has_items(&self) -> bool {
        self.items().next().is_some()
    }

    fn items(&self) -> impl Iterator<Item = &Element> {
        self.root().children.iter().filter_map(|n| match n {
            Node::Element(el) if el.is_item() => Some(el),
            _ => None,
        })
    }

    /// Names of the `data` items in document order.
    pub fn item_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for item in self.items() {
            match item.attribute(NAME_ATTR)? {
                Some(name) => names.push(name),
                None => warn!("Skipping <data> item without a name attribute"),
            }
        }
        Ok(names)
    }

    /// Drops every `data` item whose name is in `names`, together with the
    /// whitespace that indents it. Returns the number of items removed.
    pub fn remove_items<S: AsRef<str>>(&mut self, names: &[S]) -> Result<usize> {
        let targets: HashSet<&str> = names.iter().map(|n| n.as_ref()).collect();
        if targets.is_empty() {
            return Ok(0);
        }

        let root = self.root_mut();
        let children = std::mem::take(&mut root.children);
        let mut kept: Vec<Node> = Vec::with_capacity(children.len());
        let mut removed = 0;

        for node in children {
            if let Node::Element(el) = &node
                && el.is_item()
                && let Some(name) = el.attribute(NAME_ATTR)?
                && targets.contains(name.as_str())
            {
                trace!("Removing item '{}'", name);
                if kept.last().is_some_and(Node::is_whitespace) {
                    kept.pop();
                }
                removed += 1;
                continue;
            }
            kept.push(node);
        }

        root.children = kept;
        Ok(removed)
    }

    /// Serializes the document. Untouched nodes are written back verbatim.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        if self.bom {
            out.extend_from_slice(UTF8_BOM);
        }
        let mut writer = Writer::new(out);
        for node in &self.nodes {
            node.write(&mut writer)?;
        }
        Ok(writer.into_inner())
    }
}

fn attach(stack: &mut [Element], nodes: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => nodes.push(node),
    }
}
