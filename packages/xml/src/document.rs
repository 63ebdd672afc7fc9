//! Arena-backed XML document.

use std::fmt;

use quick_xml::escape::partial_escape;

use crate::error::ParseError;

/// Stable index of a node within its `Document`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
    /// Exact source of the start tag, `<name ...>` or `<name .../>`.
    pub(crate) start_tag: String,
    /// Exact source of the end tag; `None` for a self-closing element.
    pub(crate) end_tag: Option<String>,
}

#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    Element(Element),
    /// Character data, either plain text or a CDATA section.
    Text {
        raw: String,
        value: String,
    },
    /// Comments, declarations, processing instructions, doctypes.
    Other {
        raw: String,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// A parsed XML document.
///
/// Nodes live in an arena and never move, so a `NodeId` stays valid for the
/// lifetime of the document, including after `set_text`.
#[derive(Clone, Debug)]
pub struct Document {
    pub(crate) nodes: Vec<Node>,
    /// Nodes outside the root element (prolog, trailing whitespace) and the
    /// root itself, in document order.
    pub(crate) top_level: Vec<NodeId>,
    pub(crate) root: NodeId,
}

impl Document {
    /// Parse XML text into a document.
    ///
    /// Fails if the text is not well-formed: mismatched or unclosed tags,
    /// bad attributes, undefined entities, no root element, or content
    /// outside the root element.
    pub fn parse(xml: &str) -> Result<Self, ParseError> {
        crate::parse::parse(xml)
    }

    /// Serialize the document.
    ///
    /// Nodes that were not touched since parsing are written from their
    /// original source text.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        for &id in &self.top_level {
            self.write_node(id, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Element(element) => {
                out.push_str(&element.start_tag);
                for &child in &node.children {
                    self.write_node(child, out);
                }
                if let Some(end_tag) = &element.end_tag {
                    out.push_str(end_tag);
                }
            }
            NodeKind::Text { raw, .. } => out.push_str(raw),
            NodeKind::Other { raw } => out.push_str(raw),
        }
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element(_))
    }

    /// Tag name of an element; `None` for text and other nodes.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.name.as_str())
    }

    /// Decoded attributes of an element, in source order.
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        self.element(id)
            .map(|element| element.attributes.as_slice())
            .unwrap_or(&[])
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All child nodes, including text and comments.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Child elements only, in document order.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(move |&child| self.is_element(child))
    }

    pub fn first_child_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements(id)
            .find(|&child| self.name(child) == Some(name))
    }

    /// Follow element names down from the root, taking the first match at
    /// each step. An empty path resolves to the root.
    pub fn find_path(&self, path: &[&str]) -> Option<NodeId> {
        self.find_path_from(self.root, path)
    }

    /// Like `find_path`, starting at an arbitrary element.
    pub fn find_path_from(&self, from: NodeId, path: &[&str]) -> Option<NodeId> {
        path.iter()
            .try_fold(from, |current, name| self.first_child_element(current, name))
    }

    /// Find the first element, in document order, carrying the attribute
    /// `name="value"`.
    pub fn find_element_with_attribute(&self, name: &str, value: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if self.attribute(id, name) == Some(value) {
                return Some(id);
            }
            stack.extend(self.child_elements(id).collect::<Vec<_>>().into_iter().rev());
        }
        None
    }

    /// Decoded text content of an element: its text and CDATA children
    /// concatenated. Text inside nested elements is not included.
    pub fn text(&self, id: NodeId) -> String {
        self.nodes[id.0]
            .children
            .iter()
            .filter_map(|&child| match &self.nodes[child.0].kind {
                NodeKind::Text { value, .. } => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Replace the content of an element with a single text node.
    ///
    /// Only the element's content changes: its start tag, attributes and
    /// every node outside it keep their original source text. A
    /// self-closing element is reopened as `<name ...>value</name>`.
    ///
    /// Returns `false`, leaving the document untouched, if `id` is not an
    /// element.
    pub fn set_text(&mut self, id: NodeId, value: &str) -> bool {
        let text_id = NodeId(self.nodes.len());
        let node = &mut self.nodes[id.0];
        let NodeKind::Element(element) = &mut node.kind else {
            return false;
        };

        if element.end_tag.is_none() {
            let open = element
                .start_tag
                .strip_suffix("/>")
                .unwrap_or(&element.start_tag)
                .trim_end();
            element.start_tag = format!("{}>", open);
            element.end_tag = Some(format!("</{}>", element.name));
        }

        let detached = std::mem::replace(&mut node.children, vec![text_id]);
        for child in detached {
            self.nodes[child.0].parent = None;
        }

        self.nodes.push(Node {
            kind: NodeKind::Text {
                raw: partial_escape(value).into_owned(),
                value: value.to_string(),
            },
            parent: Some(id),
            children: Vec::new(),
        });
        log::debug!("replaced text of element {}", id);
        true
    }

    fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl std::str::FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Document::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACE: &str = "<place id=\"1\">\n  <pid>alvin-place:22</pid>\n  <regions id=\"16\"/>\n  <defaultPlaceName id=\"17\">\n    <deleted>false</deleted>\n    <name>Link&amp;ping</name>\n  </defaultPlaceName>\n</place>";

    #[test]
    fn navigation_by_path() {
        let doc = Document::parse(PLACE).unwrap();
        assert_eq!(doc.name(doc.root()), Some("place"));
        assert_eq!(doc.attribute(doc.root(), "id"), Some("1"));

        let pid = doc.find_path(&["pid"]).unwrap();
        assert_eq!(doc.text(pid), "alvin-place:22");
        assert_eq!(doc.parent(pid), Some(doc.root()));

        let name = doc.find_path(&["defaultPlaceName", "name"]).unwrap();
        assert_eq!(doc.text(name), "Link&ping");

        assert!(doc.find_path(&["defaultPlaceName", "missing"]).is_none());
        assert_eq!(doc.find_path(&[]), Some(doc.root()));
    }

    #[test]
    fn child_elements_skip_text() {
        let doc = Document::parse(PLACE).unwrap();
        let names: Vec<&str> = doc
            .child_elements(doc.root())
            .filter_map(|id| doc.name(id))
            .collect();
        assert_eq!(names, vec!["pid", "regions", "defaultPlaceName"]);
        assert!(doc.children(doc.root()).len() > names.len());
    }

    #[test]
    fn find_element_with_attribute_searches_in_document_order() {
        let doc = Document::parse(PLACE).unwrap();
        let regions = doc.find_element_with_attribute("id", "16").unwrap();
        assert_eq!(doc.name(regions), Some("regions"));
        assert_eq!(doc.find_element_with_attribute("id", "1"), Some(doc.root()));
        assert!(doc.find_element_with_attribute("id", "99").is_none());
    }

    #[test]
    fn set_text_escapes_and_touches_only_the_element() {
        let mut doc = Document::parse(PLACE).unwrap();
        let name = doc.find_path(&["defaultPlaceName", "name"]).unwrap();

        assert!(doc.set_text(name, "Uppsala & <Gamla>"));
        assert_eq!(doc.text(name), "Uppsala & <Gamla>");
        assert_eq!(
            doc.to_xml(),
            PLACE.replace("Link&amp;ping", "Uppsala &amp; &lt;Gamla&gt;")
        );
    }

    #[test]
    fn set_text_reopens_self_closing_element() {
        let mut doc = Document::parse(PLACE).unwrap();
        let regions = doc.find_path(&["regions"]).unwrap();

        doc.set_text(regions, "Uppland");
        assert_eq!(
            doc.to_xml(),
            PLACE.replace("<regions id=\"16\"/>", "<regions id=\"16\">Uppland</regions>")
        );
    }

    #[test]
    fn set_text_replaces_nested_content() {
        let mut doc = Document::parse(PLACE).unwrap();
        let default_name = doc.find_path(&["defaultPlaceName"]).unwrap();
        let old_name = doc.find_path(&["defaultPlaceName", "name"]).unwrap();

        doc.set_text(default_name, "flat");
        assert_eq!(doc.text(default_name), "flat");
        assert_eq!(doc.parent(old_name), None);
        assert!(doc.find_path(&["defaultPlaceName", "name"]).is_none());
    }

    #[test]
    fn set_text_on_text_node_is_refused() {
        let mut doc = Document::parse(PLACE).unwrap();
        let pid = doc.find_path(&["pid"]).unwrap();
        let text_node = doc.children(pid)[0];

        assert!(!doc.set_text(text_node, "x"));
        assert_eq!(doc.to_xml(), PLACE);
    }

    #[test]
    fn from_str_parses() {
        let doc: Document = "<a/>".parse().unwrap();
        assert_eq!(doc.name(doc.root()), Some("a"));
    }
}
