use alvincora_convert::{ConversionError, UnsupportedTypeError};

/// Errors raised by the storage facade and its row source.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// The operation is not available for this record type.
    #[error("{operation} is not implemented for type: {record_type}")]
    NotSupported {
        operation: &'static str,
        record_type: String,
    },

    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),

    /// A row was found but could not be converted.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("no {record_type} record with id {id}")]
    RecordNotFound { record_type: String, id: String },

    #[error("row source error: {message}")]
    RowSource { message: String },

    #[error("invalid row data: {0}")]
    Json(#[from] serde_json::Error),
}

impl StorageError {
    pub fn not_supported(operation: &'static str, record_type: impl Into<String>) -> Self {
        StorageError::NotSupported {
            operation,
            record_type: record_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_supported_names_operation_and_type() {
        let e = StorageError::not_supported("read", "person");
        assert_eq!(e.to_string(), "read is not implemented for type: person");
    }

    #[test]
    fn record_not_found_display() {
        let e = StorageError::RecordNotFound {
            record_type: "country".to_string(),
            id: "XX".to_string(),
        };
        assert_eq!(e.to_string(), "no country record with id XX");
    }

    #[test]
    fn unsupported_type_converts() {
        let e: StorageError = UnsupportedTypeError::new("person").into();
        assert!(matches!(e, StorageError::UnsupportedType(_)));
    }
}
