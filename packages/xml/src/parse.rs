//! Parser building the node arena.
//!
//! `quick-xml` checks well-formedness and reports the structure. Each event's
//! exact source text is sliced from the input between the reader positions
//! before and after it, so the document serializes back to the same bytes.

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::document::{Document, Element, Node, NodeId, NodeKind};
use crate::error::ParseError;

const BOM: char = '\u{feff}';

pub(crate) fn parse(xml: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(xml);
    let mut builder = Builder::default();

    // The reader drops a leading byte order mark without counting it.
    let base = if xml.starts_with(BOM) {
        builder.other(&xml[..BOM.len_utf8()]);
        BOM.len_utf8()
    } else {
        0
    };

    let mut prev = 0;
    loop {
        let event = reader.read_event()?;
        let pos = reader.buffer_position() as usize;
        let raw = &xml[base + prev..base + pos];
        prev = pos;

        match event {
            Event::Start(e) => builder.element(element(&e, raw, false)?)?,
            Event::Empty(e) => builder.element(element(&e, raw, true)?)?,
            Event::End(_) => builder.close(raw),
            Event::Text(_) => builder.text(raw)?,
            Event::CData(e) => {
                let value = String::from_utf8_lossy(&e).into_owned();
                builder.cdata(raw, value)?;
            }
            Event::Eof => break,
            _ => builder.other(raw),
        }
    }

    let doc = builder.finish()?;
    log::debug!("parsed XML document with {} nodes", doc.nodes.len());
    Ok(doc)
}

fn element(start: &BytesStart<'_>, raw: &str, self_closing: bool) -> Result<Element, ParseError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = unescape(&String::from_utf8_lossy(&attr.value))?.into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        start_tag: raw.to_string(),
        end_tag: if self_closing {
            None
        } else {
            Some(String::new())
        },
    })
}

#[derive(Default)]
struct Builder {
    nodes: Vec<Node>,
    top_level: Vec<NodeId>,
    open: Vec<NodeId>,
    root: Option<NodeId>,
}

impl Builder {
    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.open.last().copied();
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.top_level.push(id),
        }
        id
    }

    /// Character data between markup. Outside the root only whitespace is
    /// allowed, and it is kept verbatim.
    fn text(&mut self, raw: &str) -> Result<(), ParseError> {
        if raw.is_empty() {
            return Ok(());
        }
        if self.open.is_empty() {
            let content = raw.trim_matches(|c: char| c.is_whitespace() || c == BOM);
            if !content.is_empty() {
                return Err(ParseError::Structure {
                    message: format!("text outside of the root element: {:?}", content),
                });
            }
            self.other(raw);
        } else {
            let value = unescape(raw)?.into_owned();
            self.push(NodeKind::Text {
                raw: raw.to_string(),
                value,
            });
        }
        Ok(())
    }

    fn element(&mut self, element: Element) -> Result<(), ParseError> {
        let at_top = self.open.is_empty();
        if at_top && self.root.is_some() {
            return Err(ParseError::Structure {
                message: format!("more than one root element: <{}>", element.name),
            });
        }

        let self_closing = element.end_tag.is_none();
        let id = self.push(NodeKind::Element(element));
        if at_top {
            self.root = Some(id);
        }
        if !self_closing {
            self.open.push(id);
        }
        Ok(())
    }

    /// End tags are matched against their start tags by the reader.
    fn close(&mut self, raw: &str) {
        if let Some(id) = self.open.pop() {
            if let NodeKind::Element(element) = &mut self.nodes[id.0].kind {
                element.end_tag = Some(raw.to_string());
            }
        }
    }

    fn cdata(&mut self, raw: &str, value: String) -> Result<(), ParseError> {
        if self.open.is_empty() {
            return Err(ParseError::Structure {
                message: "CDATA outside of the root element".to_string(),
            });
        }
        self.push(NodeKind::Text {
            raw: raw.to_string(),
            value,
        });
        Ok(())
    }

    fn other(&mut self, raw: &str) {
        self.push(NodeKind::Other {
            raw: raw.to_string(),
        });
    }

    fn finish(self) -> Result<Document, ParseError> {
        if let Some(&id) = self.open.last() {
            let name = match &self.nodes[id.0].kind {
                NodeKind::Element(element) => element.name.clone(),
                _ => String::new(),
            };
            return Err(ParseError::UnclosedElement { name });
        }
        let root = self.root.ok_or(ParseError::NoRootElement)?;
        Ok(Document {
            nodes: self.nodes,
            top_level: self.top_level,
            root,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(xml: &str) {
        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.to_xml(), xml);
    }

    #[test]
    fn round_trip_keeps_prolog_and_comments() {
        round_trip(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- exported -->\n<place><pid>x</pid></place>\n",
        );
    }

    #[test]
    fn round_trip_keeps_tag_whitespace_and_quotes() {
        round_trip("<a  x='1'   y=\"2\" ><b\n  z=\"&gt;\"\t/><c /></a>");
    }

    #[test]
    fn round_trip_keeps_entities_and_cdata() {
        round_trip("<a>&lt;tag&gt; &amp; &#229;<![CDATA[<raw> & ]]></a>");
    }

    #[test]
    fn round_trip_keeps_doctype_with_internal_subset() {
        round_trip("<!DOCTYPE place [<!ELEMENT place ANY>]>\n<place/>");
    }

    #[test]
    fn round_trip_keeps_processing_instructions_inside_root() {
        round_trip("<place><?render fast?><name>Uppsala</name></place>");
    }

    #[test]
    fn text_is_decoded() {
        let doc = Document::parse("<a>&lt;b&gt; &amp; c<![CDATA[ <d> ]]></a>").unwrap();
        assert_eq!(doc.text(doc.root()), "<b> & c <d> ");
    }

    #[test]
    fn attributes_are_decoded_in_order() {
        let doc = Document::parse("<a z=\"1\" b=\"x &amp; y\"/>").unwrap();
        assert_eq!(
            doc.attributes(doc.root()),
            &[
                ("z".to_string(), "1".to_string()),
                ("b".to_string(), "x & y".to_string()),
            ]
        );
    }

    #[test]
    fn mismatched_end_tag_is_reported() {
        let err = Document::parse("<pid></notPid>").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("pid"), "{}", message);
        assert!(message.contains("notPid"), "{}", message);
    }

    #[test]
    fn unclosed_element_is_reported() {
        let err = Document::parse("<place><pid>x</pid>").unwrap_err();
        assert!(err.to_string().contains("place"), "{}", err);
    }

    #[test]
    fn empty_input_has_no_root() {
        assert!(matches!(
            Document::parse("").unwrap_err(),
            ParseError::NoRootElement
        ));
        assert!(matches!(
            Document::parse("  \n<!-- nothing -->\n").unwrap_err(),
            ParseError::NoRootElement
        ));
    }

    #[test]
    fn content_outside_root_is_rejected() {
        assert!(Document::parse("<a/><b/>").is_err());
        assert!(Document::parse("<a/>trailing").is_err());
    }

    #[test]
    fn undefined_entity_is_rejected() {
        assert!(Document::parse("<a>&nbsp;</a>").is_err());
    }

    #[test]
    fn duplicate_attribute_is_rejected() {
        assert!(Document::parse("<a x=\"1\" x=\"2\"/>").is_err());
    }

    #[test]
    fn round_trip_keeps_quoted_gt_in_attribute() {
        round_trip("<a href=\"x>y\" title=']>'><b/></a>");
    }

    #[test]
    fn round_trip_keeps_doctype_comment_with_apostrophe() {
        round_trip("<!DOCTYPE a [<!-- it's -->]><a/>");
    }

    #[test]
    fn round_trip_keeps_byte_order_mark() {
        round_trip("\u{feff}<?xml version=\"1.0\"?>\r\n<a>x</a>\r\n");
        round_trip("\u{feff}<a>x</a>");
    }

    #[test]
    fn round_trip_keeps_end_tag_whitespace() {
        let xml = "<a><b>x</b ></a>";
        round_trip(xml);
        let doc = Document::parse(xml).unwrap();
        let b = doc.find_path(&["b"]).unwrap();
        assert_eq!(doc.text(b), "x");
    }

    #[test]
    fn stray_end_tag_is_rejected() {
        assert!(matches!(
            Document::parse("<a/></b>").unwrap_err(),
            ParseError::Xml(_)
        ));
    }
}
