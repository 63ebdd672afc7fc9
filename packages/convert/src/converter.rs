use std::collections::BTreeMap;

use alvincora_data::DataGroup;

use crate::ConversionError;

/// One legacy database row: column name to column value.
pub type RowMap = BTreeMap<String, String>;

/// Converts a legacy XML document into a record.
pub trait FromXmlConverter: Send + Sync {
    fn from_xml(&self, xml: &str) -> Result<DataGroup, ConversionError>;
}

/// Converts a legacy database row into a record.
pub trait FromMapConverter: Send + Sync {
    fn from_map(&self, row: &RowMap) -> Result<DataGroup, ConversionError>;
}

/// Produces the updated legacy XML for a record.
///
/// Implementations fetch the stored legacy document and rewrite only the
/// fields the record maps onto; everything else is returned as stored.
pub trait ToFedoraConverter: Send + Sync {
    fn to_xml(&self, record: &DataGroup) -> Result<String, ConversionError>;
}
