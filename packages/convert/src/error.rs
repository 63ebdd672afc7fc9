//! Error types for the conversion engine.

use alvincora_data::DataError;
use alvincora_xml::ParseError;

use crate::EntityType;

/// Errors raised by a converter.
#[derive(thiserror::Error, Debug)]
pub enum ConversionError {
    /// The legacy input is not well-formed XML.
    ///
    /// `context` names the conversion, e.g. "Error converting place to Cora
    /// place"; the parser's diagnostic follows it verbatim.
    #[error("{context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: ParseError,
    },

    /// The input is well-formed but lacks data the mapping requires.
    #[error("{entity} is missing mandatory field: {path}")]
    MissingField { entity: EntityType, path: String },

    /// The stored legacy document fetched for an update could not be parsed.
    #[error("stored document for {id} could not be parsed: {source}")]
    StoredDocument {
        id: String,
        #[source]
        source: ParseError,
    },

    /// The stored legacy document could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Failure to retrieve an existing legacy document.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (connection refused, timeout...).
    #[error("failed to fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: alvincora_http::Error,
    },

    /// The repository answered with a non-success status.
    #[error("failed to fetch {url}: HTTP {status} {status_text}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
    },
}

/// No converter is registered for the requested entity type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("no converter registered for entity type: {entity_type}")]
pub struct UnsupportedTypeError {
    pub entity_type: String,
}

impl UnsupportedTypeError {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
        }
    }
}

/// Invalid deployment configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({message})")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn parse_error_keeps_context_and_diagnostic() {
        let source = alvincora_xml::Document::parse("<pid></notPid>").unwrap_err();
        let diagnostic = source.to_string();
        let e = ConversionError::Parse {
            context: "Error converting place to Cora place".to_string(),
            source,
        };

        assert_eq!(
            e.to_string(),
            format!("Error converting place to Cora place: {}", diagnostic)
        );
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn missing_field_display() {
        let e = ConversionError::MissingField {
            entity: EntityType::Place,
            path: "pid".to_string(),
        };
        assert_eq!(e.to_string(), "place is missing mandatory field: pid");
    }

    #[test]
    fn fetch_status_display() {
        let e = FetchError::Status {
            url: "http://fedora/objects/x".to_string(),
            status: 404,
            status_text: "Not Found".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "failed to fetch http://fedora/objects/x: HTTP 404 Not Found"
        );
    }

    #[test]
    fn fetch_error_is_transparent_in_conversion_error() {
        let e: ConversionError = FetchError::Status {
            url: "u".to_string(),
            status: 500,
            status_text: "Internal Server Error".to_string(),
        }
        .into();
        assert_eq!(e.to_string(), "failed to fetch u: HTTP 500 Internal Server Error");
    }

    #[test]
    fn unsupported_type_names_the_type() {
        let e = UnsupportedTypeError::new("person");
        assert_eq!(
            e.to_string(),
            "no converter registered for entity type: person"
        );
    }
}
