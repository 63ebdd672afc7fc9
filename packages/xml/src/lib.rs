//! # alvincora-xml
//!
//! Lossless XML element tree for the legacy record dialect.
//!
//! The tree is an arena of nodes addressed by `NodeId`. Every node keeps the
//! exact source text it was parsed from, so serializing an untouched
//! `Document` reproduces the input byte for byte. Mutation is limited to
//! replacing the text content of one element; everything outside that
//! element is written back unchanged.
//!
//! ```rust
//! use alvincora_xml::Document;
//!
//! let xml = "<place id=\"1\">\n  <defaultPlaceName><name>Uppsala</name></defaultPlaceName>\n</place>";
//! let mut doc = Document::parse(xml).unwrap();
//! assert_eq!(doc.to_xml(), xml);
//!
//! let name = doc.find_path(&["defaultPlaceName", "name"]).unwrap();
//! assert_eq!(doc.text(name), "Uppsala");
//!
//! doc.set_text(name, "Upsala");
//! assert_eq!(
//!     doc.to_xml(),
//!     "<place id=\"1\">\n  <defaultPlaceName><name>Upsala</name></defaultPlaceName>\n</place>"
//! );
//! ```

mod document;
mod error;
mod parse;

pub use document::{Document, NodeId};
pub use error::ParseError;
