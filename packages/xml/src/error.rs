/// Errors raised while parsing legacy XML.
///
/// Diagnostics from `quick-xml` are carried verbatim so that callers can
/// surface them to users unchanged.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("{0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("element <{name}> is not closed before end of input")]
    UnclosedElement { name: String },

    #[error("document has no root element")]
    NoRootElement,

    #[error("malformed document: {message}")]
    Structure { message: String },
}
