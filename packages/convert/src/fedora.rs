//! Records back into the legacy XML stored in Fedora.
//!
//! Updating a legacy record starts from the document Fedora currently holds:
//! the stored XML is fetched, the text of each mapped element is replaced
//! with the record's value, and the document is serialized again. Elements
//! the record does not map onto are returned byte for byte as stored.

use alvincora_data::{DataGroup, DataPath};
use alvincora_http::{HttpExecutor, HttpRequest};
use alvincora_xml::Document;

use crate::{ConversionError, EntityType, FetchError, ToFedoraConverter};

/// A record field and the legacy element holding the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Path in the record, e.g. `name[type=authorized]/namePart[type=defaultName]/value`.
    pub model_path: &'static str,
    /// Element names from the legacy root down to the target element.
    pub legacy_path: &'static [&'static str],
}

pub const PLACE_FIELDS: &[FieldMapping] = &[
    FieldMapping {
        model_path: "name[type=authorized]/namePart[type=defaultName]/value",
        legacy_path: &["defaultPlaceName", "name"],
    },
    FieldMapping {
        model_path: "longitude",
        legacy_path: &["longitude"],
    },
    FieldMapping {
        model_path: "latitude",
        legacy_path: &["latitude"],
    },
];

/// Location of a record's metadata datastream.
///
/// `fedora_url` is used as given, so it normally ends with a slash.
pub fn metadata_url(fedora_url: &str, id: &str) -> String {
    format!("{}objects/{}/datastreams/METADATA/content", fedora_url, id)
}

/// Writes `authority[type=place]` records onto their stored place documents.
pub struct AlvinCoraToFedoraPlaceConverter {
    executor: Box<dyn HttpExecutor>,
    fedora_url: String,
}

impl AlvinCoraToFedoraPlaceConverter {
    pub fn using_http_executor_and_fedora_url(
        executor: impl HttpExecutor + 'static,
        fedora_url: impl Into<String>,
    ) -> Self {
        Self {
            executor: Box::new(executor),
            fedora_url: fedora_url.into(),
        }
    }

    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        log::debug!("fetching stored document {}", url);
        let response = self
            .executor
            .execute(&HttpRequest::get(url))
            .map_err(|source| {
                if source.is_timeout() {
                    log::warn!("timed out fetching {}", url);
                }
                FetchError::Transport {
                    url: url.to_string(),
                    source,
                }
            })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(response.body_text)
    }
}

impl ToFedoraConverter for AlvinCoraToFedoraPlaceConverter {
    fn to_xml(&self, record: &DataGroup) -> Result<String, ConversionError> {
        let id = record
            .first_group_with_name_in_data("recordInfo")
            .and_then(|info| info.first_atomic_value_with_name_in_data("id"))
            .ok_or_else(|| ConversionError::MissingField {
                entity: EntityType::Place,
                path: "recordInfo/id".to_string(),
            })?;

        let stored = self.fetch(&metadata_url(&self.fedora_url, id))?;
        let mut doc = Document::parse(&stored).map_err(|source| ConversionError::StoredDocument {
            id: id.to_string(),
            source,
        })?;

        let changed = merge_fields(&mut doc, record, PLACE_FIELDS, EntityType::Place)?;
        log::debug!("updated {} field(s) of place {}", changed, id);
        Ok(doc.to_xml())
    }
}

/// Copy every mapped value present in `record` into `doc`.
///
/// Returns the number of elements whose text changed. An element already
/// holding the value is left untouched, keeping its original encoding.
pub fn merge_fields(
    doc: &mut Document,
    record: &DataGroup,
    mappings: &[FieldMapping],
    entity: EntityType,
) -> Result<usize, ConversionError> {
    let mut changed = 0;
    for mapping in mappings {
        let path = DataPath::parse(mapping.model_path)?;
        let Some(value) = record.atomic_value_at(&path) else {
            continue;
        };

        let target = doc
            .find_path(mapping.legacy_path)
            .ok_or_else(|| ConversionError::MissingField {
                entity,
                path: mapping.legacy_path.join("/"),
            })?;

        if doc.text(target) != value {
            doc.set_text(target, value);
            changed += 1;
        }
    }
    Ok(changed)
}
