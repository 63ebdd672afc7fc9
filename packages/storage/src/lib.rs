//! # alvincora-storage
//!
//! A record storage facade over the legacy Alvin database.
//!
//! `DbRecordStorage` answers the record platform's storage calls by reading
//! rows through a `RecordReader` and converting them with the converters from
//! `alvincora-convert`. Only reads of country records are served.
//!
//! ```rust
//! use alvincora_storage::{DbRecordStorage, InMemoryRecordReader, RecordStorage};
//!
//! let reader = InMemoryRecordReader::from_json(r#"{"country": [{"alpha2code": "SE"}]}"#).unwrap();
//! let storage = DbRecordStorage::new(reader);
//! let sweden = storage.read("country", "SE").unwrap();
//! assert_eq!(sweden.name_in_data(), "country");
//! ```

mod error;
mod reader;
mod storage;

pub use error::StorageError;
pub use reader::{InMemoryRecordReader, RecordReader};
pub use storage::{DbRecordStorage, ReadResult, RecordStorage};
