use alvincora_data::{DataAtomic, DataGroup};

use crate::EntityType;

/// The `recordInfo` group every converted record starts with.
pub(crate) fn record_info(id: &str, entity: EntityType, data_divider: &str) -> DataGroup {
    let mut record_info = DataGroup::with_name_in_data("recordInfo");
    record_info.add_child(DataAtomic::with_name_in_data_and_value("id", id));
    record_info.add_child(DataGroup::as_link("type", "recordType", entity.as_str()));
    record_info.add_child(DataGroup::as_link("dataDivider", "system", data_divider));
    record_info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_info_has_id_type_and_data_divider() {
        let info = record_info("SE", EntityType::Country, "alvin");

        assert_eq!(info.name_in_data(), "recordInfo");
        assert_eq!(info.first_atomic_value_with_name_in_data("id"), Some("SE"));

        let kind = info.first_group_with_name_in_data("type").unwrap();
        assert_eq!(
            kind.first_atomic_value_with_name_in_data("linkedRecordType"),
            Some("recordType")
        );
        assert_eq!(
            kind.first_atomic_value_with_name_in_data("linkedRecordId"),
            Some("country")
        );

        let divider = info.first_group_with_name_in_data("dataDivider").unwrap();
        assert_eq!(
            divider.first_atomic_value_with_name_in_data("linkedRecordType"),
            Some("system")
        );
        assert_eq!(
            divider.first_atomic_value_with_name_in_data("linkedRecordId"),
            Some("alvin")
        );
    }
}
