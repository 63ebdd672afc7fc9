use alvincora_http::HttpExecutor;

use crate::{
    AlvinCoraToFedoraPlaceConverter, AlvinDbToCoraCountryConverter, AlvinToCoraPlaceConverter,
    EntityType, FromMapConverter, FromXmlConverter, ToFedoraConverter, UnsupportedTypeError,
    DEFAULT_DATA_DIVIDER,
};

/// Picks the converter for an entity type name.
///
/// Country records come from database rows, place records from Fedora XML.
/// Asking for any other combination fails with `UnsupportedTypeError`.
#[derive(Debug, Clone)]
pub struct ConverterFactory {
    data_divider: String,
}

impl Default for ConverterFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterFactory {
    pub fn new() -> Self {
        Self::with_data_divider(DEFAULT_DATA_DIVIDER)
    }

    /// Converters built by this factory stamp records with `data_divider`.
    pub fn with_data_divider(data_divider: impl Into<String>) -> Self {
        Self {
            data_divider: data_divider.into(),
        }
    }

    pub fn factor_from_map(
        &self,
        entity_type: &str,
    ) -> Result<Box<dyn FromMapConverter>, UnsupportedTypeError> {
        match entity_type.parse::<EntityType>()? {
            EntityType::Country => Ok(Box::new(AlvinDbToCoraCountryConverter::with_data_divider(
                &self.data_divider,
            ))),
            other => Err(UnsupportedTypeError::new(other.as_str())),
        }
    }

    pub fn factor_from_xml(
        &self,
        entity_type: &str,
    ) -> Result<Box<dyn FromXmlConverter>, UnsupportedTypeError> {
        match entity_type.parse::<EntityType>()? {
            EntityType::Place => Ok(Box::new(AlvinToCoraPlaceConverter::with_data_divider(
                &self.data_divider,
            ))),
            other => Err(UnsupportedTypeError::new(other.as_str())),
        }
    }

    pub fn factor_to_fedora(
        &self,
        entity_type: &str,
        executor: impl HttpExecutor + 'static,
        fedora_url: impl Into<String>,
    ) -> Result<Box<dyn ToFedoraConverter>, UnsupportedTypeError> {
        match entity_type.parse::<EntityType>()? {
            EntityType::Place => Ok(Box::new(
                AlvinCoraToFedoraPlaceConverter::using_http_executor_and_fedora_url(
                    executor, fedora_url,
                ),
            )),
            other => Err(UnsupportedTypeError::new(other.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alvincora_http::mock::MockExecutor;

    #[test]
    fn country_rows() {
        assert!(ConverterFactory::new().factor_from_map("country").is_ok());
    }

    #[test]
    fn place_rows_are_unsupported() {
        let err = ConverterFactory::new().factor_from_map("place").err().unwrap();
        assert_eq!(err.entity_type, "place");
    }

    #[test]
    fn place_xml() {
        assert!(ConverterFactory::new().factor_from_xml("place").is_ok());
    }

    #[test]
    fn country_xml_is_unsupported() {
        let err = ConverterFactory::new().factor_from_xml("country").err().unwrap();
        assert_eq!(err.entity_type, "country");
    }

    #[test]
    fn unknown_type_is_unsupported_everywhere() {
        let factory = ConverterFactory::new();
        assert_eq!(
            factory.factor_from_map("person").err().unwrap().entity_type,
            "person"
        );
        assert_eq!(
            factory.factor_from_xml("person").err().unwrap().entity_type,
            "person"
        );
        assert_eq!(
            factory
                .factor_to_fedora("person", MockExecutor::new(), "http://fedora/")
                .err()
                .unwrap()
                .entity_type,
            "person"
        );
    }

    #[test]
    fn to_fedora_only_for_places() {
        let factory = ConverterFactory::new();
        assert!(factory
            .factor_to_fedora("place", MockExecutor::new(), "http://fedora/")
            .is_ok());
        assert!(factory
            .factor_to_fedora("country", MockExecutor::new(), "http://fedora/")
            .is_err());
    }

    #[test]
    fn data_divider_reaches_converters() {
        let converter = ConverterFactory::with_data_divider("cora")
            .factor_from_map("country")
            .unwrap();
        let row: crate::RowMap = [("alpha2code".to_string(), "SE".to_string())].into();

        let country = converter.from_map(&row).unwrap();
        let divider = country
            .first_group_with_name_in_data("recordInfo")
            .and_then(|info| info.first_group_with_name_in_data("dataDivider"))
            .and_then(|link| link.first_atomic_value_with_name_in_data("linkedRecordId"));
        assert_eq!(divider, Some("cora"));
    }
}
