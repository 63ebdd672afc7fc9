use alvincora_data::{DataAtomic, DataGroup};

use crate::record_info::record_info;
use crate::{ConversionError, EntityType, FromMapConverter, RowMap, DEFAULT_DATA_DIVIDER};

/// Column holding the record id of a country row.
pub const ID_COLUMN: &str = "alpha2code";

/// Builds `country` records from rows of the legacy country table.
///
/// Every non-empty column becomes an atomic child of the same name, in column
/// name order. Empty columns are left out.
#[derive(Debug, Clone)]
pub struct AlvinDbToCoraCountryConverter {
    data_divider: String,
}

impl Default for AlvinDbToCoraCountryConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl AlvinDbToCoraCountryConverter {
    pub fn new() -> Self {
        Self::with_data_divider(DEFAULT_DATA_DIVIDER)
    }

    pub fn with_data_divider(data_divider: impl Into<String>) -> Self {
        Self {
            data_divider: data_divider.into(),
        }
    }
}

impl FromMapConverter for AlvinDbToCoraCountryConverter {
    fn from_map(&self, row: &RowMap) -> Result<DataGroup, ConversionError> {
        let id = row
            .get(ID_COLUMN)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConversionError::MissingField {
                entity: EntityType::Country,
                path: ID_COLUMN.to_string(),
            })?;

        let mut country = DataGroup::with_name_in_data("country");
        country.add_child(record_info(id, EntityType::Country, &self.data_divider));
        for (column, value) in row.iter().filter(|(_, value)| !value.is_empty()) {
            country.add_child(DataAtomic::with_name_in_data_and_value(column, value));
        }

        log::debug!("converted country {}", id);
        Ok(country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    fn row(entries: RowMap) -> Result<DataGroup, ConversionError> {
        AlvinDbToCoraCountryConverter::new().from_map(&entries)
    }

    #[test]
    fn converts_row() {
        let country = row(btree! {
            "alpha2code".into() => "SE".into(),
            "alpha3code".into() => "SWE".into(),
            "numericalcode".into() => "752".into(),
            "marccode".into() => "sw".into(),
        })
        .unwrap();

        assert_eq!(country.name_in_data(), "country");
        let info = country.first_group_with_name_in_data("recordInfo").unwrap();
        assert_eq!(info.first_atomic_value_with_name_in_data("id"), Some("SE"));

        let names: Vec<_> = country
            .children()
            .iter()
            .map(|child| child.name_in_data())
            .collect();
        assert_eq!(
            names,
            ["recordInfo", "alpha2code", "alpha3code", "marccode", "numericalcode"]
        );
        assert_eq!(
            country.first_atomic_value_with_name_in_data("numericalcode"),
            Some("752")
        );
    }

    #[test]
    fn empty_columns_are_left_out() {
        let country = row(btree! {
            "alpha2code".into() => "NO".into(),
            "marccode".into() => "".into(),
        })
        .unwrap();
        assert!(!country.contains_child_with_name_in_data("marccode"));
    }

    #[test]
    fn empty_row_is_missing_id() {
        let err = row(RowMap::new()).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::MissingField { entity: EntityType::Country, ref path } if path == "alpha2code"
        ));
    }

    #[test]
    fn blank_id_is_missing_id() {
        let err = row(btree! { "alpha2code".into() => "".into() }).unwrap_err();
        assert!(matches!(err, ConversionError::MissingField { .. }));
    }
}
