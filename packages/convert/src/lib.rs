//! # alvincora-convert
//!
//! Conversion between legacy Alvin records and the generic data model.
//!
//! Inbound converters turn a legacy XML document (`FromXmlConverter`) or a
//! database row (`FromMapConverter`) into a `DataGroup`. The outbound
//! converter (`ToFedoraConverter`) goes the other way: it fetches the stored
//! legacy document and rewrites only the fields the record maps onto.
//! `ConverterFactory` picks the converter for an entity type name.
//!
//! ```rust
//! use alvincora_convert::{ConverterFactory, FromXmlConverter};
//!
//! let converter = ConverterFactory::new().factor_from_xml("place").unwrap();
//! let place = converter
//!     .from_xml("<place><pid>alvin-place:1</pid><defaultPlaceName><name>Uppsala</name></defaultPlaceName></place>")
//!     .unwrap();
//! assert_eq!(place.name_in_data(), "authority");
//! ```

pub mod config;
mod converter;
pub mod country;
mod entity;
pub mod error;
mod factory;
pub mod fedora;
pub mod place;
mod record_info;

pub use config::FedoraConfig;
pub use converter::{FromMapConverter, FromXmlConverter, RowMap, ToFedoraConverter};
pub use country::AlvinDbToCoraCountryConverter;
pub use entity::EntityType;
pub use error::{ConfigError, ConversionError, FetchError, UnsupportedTypeError};
pub use factory::ConverterFactory;
pub use fedora::AlvinCoraToFedoraPlaceConverter;
pub use place::AlvinToCoraPlaceConverter;

/// System that owns converted records unless configured otherwise.
pub const DEFAULT_DATA_DIVIDER: &str = "alvin";
