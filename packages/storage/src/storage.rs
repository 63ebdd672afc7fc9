//! The record storage facade.

use alvincora_convert::country::ID_COLUMN;
use alvincora_convert::{ConverterFactory, EntityType, RowMap};
use alvincora_data::DataGroup;

use crate::{RecordReader, StorageError};

/// Records returned by a list read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadResult {
    pub list_of_data_groups: Vec<DataGroup>,
    pub total_number_of_matches: usize,
}

impl ReadResult {
    /// Wrap a complete, unpaged list.
    pub fn from_groups(list_of_data_groups: Vec<DataGroup>) -> Self {
        Self {
            total_number_of_matches: list_of_data_groups.len(),
            list_of_data_groups,
        }
    }
}

/// The operations the record platform expects from a storage backend.
pub trait RecordStorage: Send + Sync {
    fn read(&self, record_type: &str, id: &str) -> Result<DataGroup, StorageError>;

    fn read_list(&self, record_type: &str, filter: &DataGroup)
        -> Result<ReadResult, StorageError>;

    fn create(
        &mut self,
        record_type: &str,
        id: &str,
        record: &DataGroup,
        collected_terms: &DataGroup,
        link_list: &DataGroup,
        data_divider: &str,
    ) -> Result<(), StorageError>;

    fn update(
        &mut self,
        record_type: &str,
        id: &str,
        record: &DataGroup,
        collected_terms: &DataGroup,
        link_list: &DataGroup,
        data_divider: &str,
    ) -> Result<(), StorageError>;

    fn delete_by_type_and_id(&mut self, record_type: &str, id: &str) -> Result<(), StorageError>;

    fn links_exist_for_record(&self, record_type: &str, id: &str) -> Result<bool, StorageError>;

    fn read_abstract_list(
        &self,
        record_type: &str,
        filter: &DataGroup,
    ) -> Result<ReadResult, StorageError>;

    fn read_link_list(&self, record_type: &str, id: &str) -> Result<DataGroup, StorageError>;

    fn generate_link_collection_pointing_to_record(
        &self,
        record_type: &str,
        id: &str,
    ) -> Result<Vec<DataGroup>, StorageError>;

    fn records_exist_for_record_type(&self, record_type: &str) -> Result<bool, StorageError>;

    fn record_exists_for_abstract_or_implementing_record_type_and_record_id(
        &self,
        record_type: &str,
        id: &str,
    ) -> Result<bool, StorageError>;
}

/// Read-only storage over the legacy database.
///
/// Only country records can be read, one at a time or as a full list.
/// Every other operation, and reads of any other type, fail with
/// `StorageError::NotSupported`.
pub struct DbRecordStorage<R> {
    reader: R,
    converters: ConverterFactory,
}

impl<R: RecordReader> DbRecordStorage<R> {
    pub fn new(reader: R) -> Self {
        Self::using_record_reader_and_converter_factory(reader, ConverterFactory::new())
    }

    pub fn using_record_reader_and_converter_factory(
        reader: R,
        converters: ConverterFactory,
    ) -> Self {
        Self { reader, converters }
    }

    fn is_country(record_type: &str) -> bool {
        matches!(record_type.parse(), Ok(EntityType::Country))
    }

    fn convert(&self, record_type: &str, row: &RowMap) -> Result<DataGroup, StorageError> {
        let converter = self.converters.factor_from_map(record_type)?;
        Ok(converter.from_map(row)?)
    }
}

impl<R: RecordReader> RecordStorage for DbRecordStorage<R> {
    fn read(&self, record_type: &str, id: &str) -> Result<DataGroup, StorageError> {
        if !Self::is_country(record_type) {
            return Err(StorageError::not_supported("read", record_type));
        }

        let conditions = RowMap::from([(ID_COLUMN.to_string(), id.to_string())]);
        let row = self
            .reader
            .read_one_row(record_type, &conditions)?
            .ok_or_else(|| StorageError::RecordNotFound {
                record_type: record_type.to_string(),
                id: id.to_string(),
            })?;

        log::debug!("read {} {}", record_type, id);
        self.convert(record_type, &row)
    }

    fn read_list(
        &self,
        record_type: &str,
        _filter: &DataGroup,
    ) -> Result<ReadResult, StorageError> {
        if !Self::is_country(record_type) {
            return Err(StorageError::not_supported("read_list", record_type));
        }

        let groups = self
            .reader
            .read_all_rows(record_type)?
            .iter()
            .map(|row| self.convert(record_type, row))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("read {} {} record(s)", groups.len(), record_type);
        Ok(ReadResult::from_groups(groups))
    }

    fn create(
        &mut self,
        record_type: &str,
        _id: &str,
        _record: &DataGroup,
        _collected_terms: &DataGroup,
        _link_list: &DataGroup,
        _data_divider: &str,
    ) -> Result<(), StorageError> {
        Err(StorageError::not_supported("create", record_type))
    }

    fn update(
        &mut self,
        record_type: &str,
        _id: &str,
        _record: &DataGroup,
        _collected_terms: &DataGroup,
        _link_list: &DataGroup,
        _data_divider: &str,
    ) -> Result<(), StorageError> {
        Err(StorageError::not_supported("update", record_type))
    }

    fn delete_by_type_and_id(&mut self, record_type: &str, _id: &str) -> Result<(), StorageError> {
        Err(StorageError::not_supported("delete_by_type_and_id", record_type))
    }

    fn links_exist_for_record(&self, record_type: &str, _id: &str) -> Result<bool, StorageError> {
        Err(StorageError::not_supported("links_exist_for_record", record_type))
    }

    fn read_abstract_list(
        &self,
        record_type: &str,
        _filter: &DataGroup,
    ) -> Result<ReadResult, StorageError> {
        Err(StorageError::not_supported("read_abstract_list", record_type))
    }

    fn read_link_list(&self, record_type: &str, _id: &str) -> Result<DataGroup, StorageError> {
        Err(StorageError::not_supported("read_link_list", record_type))
    }

    fn generate_link_collection_pointing_to_record(
        &self,
        record_type: &str,
        _id: &str,
    ) -> Result<Vec<DataGroup>, StorageError> {
        Err(StorageError::not_supported(
            "generate_link_collection_pointing_to_record",
            record_type,
        ))
    }

    fn records_exist_for_record_type(&self, record_type: &str) -> Result<bool, StorageError> {
        Err(StorageError::not_supported(
            "records_exist_for_record_type",
            record_type,
        ))
    }

    fn record_exists_for_abstract_or_implementing_record_type_and_record_id(
        &self,
        record_type: &str,
        _id: &str,
    ) -> Result<bool, StorageError> {
        Err(StorageError::not_supported(
            "record_exists_for_abstract_or_implementing_record_type_and_record_id",
            record_type,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryRecordReader;
    use collection_literals::btree;

    fn storage() -> DbRecordStorage<InMemoryRecordReader> {
        DbRecordStorage::new(InMemoryRecordReader::new().with_table(
            "country",
            vec![
                btree! { "alpha2code".into() => "SE".into(), "marccode".into() => "sw".into() },
                btree! { "alpha2code".into() => "NO".into(), "marccode".into() => "no".into() },
            ],
        ))
    }

    #[test]
    fn reads_country_by_id() {
        let country = storage().read("country", "NO").unwrap();
        assert_eq!(country.name_in_data(), "country");
        assert_eq!(
            country
                .first_group_with_name_in_data("recordInfo")
                .and_then(|info| info.first_atomic_value_with_name_in_data("id")),
            Some("NO")
        );
        assert_eq!(
            country.first_atomic_value_with_name_in_data("marccode"),
            Some("no")
        );
    }

    #[test]
    fn unknown_country_is_not_found() {
        let err = storage().read("country", "XX").unwrap_err();
        assert!(matches!(
            err,
            StorageError::RecordNotFound { ref record_type, ref id } if record_type == "country" && id == "XX"
        ));
    }

    #[test]
    fn read_of_other_type_is_not_supported() {
        let err = storage().read("place", "alvin-place:22").unwrap_err();
        assert!(matches!(
            err,
            StorageError::NotSupported { operation: "read", ref record_type } if record_type == "place"
        ));
    }

    #[test]
    fn lists_countries() {
        let result = storage()
            .read_list("country", &DataGroup::with_name_in_data("filter"))
            .unwrap();
        assert_eq!(result.total_number_of_matches, 2);
        assert_eq!(result.list_of_data_groups.len(), 2);
    }

    #[test]
    fn list_of_other_type_is_not_supported() {
        let err = storage()
            .read_list("person", &DataGroup::with_name_in_data("filter"))
            .unwrap_err();
        assert_eq!(err.to_string(), "read_list is not implemented for type: person");
    }

    #[test]
    fn unconvertible_row_is_a_conversion_error() {
        let storage = DbRecordStorage::new(
            InMemoryRecordReader::new()
                .with_table("country", vec![btree! { "marccode".into() => "sw".into() }]),
        );
        let err = storage
            .read_list("country", &DataGroup::with_name_in_data("filter"))
            .unwrap_err();
        assert!(matches!(err, StorageError::Conversion(_)));
    }
}
