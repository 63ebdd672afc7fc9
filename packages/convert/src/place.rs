//! Legacy place documents into the generic model.
//!
//! A place document is a `<place>` element holding a `pid`, bookkeeping under
//! `recordInfo`, the authorized name under `defaultPlaceName/name` and a few
//! optional descriptive fields. Unknown elements are ignored.

use alvincora_data::{DataAtomic, DataGroup};
use alvincora_xml::{Document, NodeId};

use crate::record_info::record_info;
use crate::{ConversionError, EntityType, FromXmlConverter, DEFAULT_DATA_DIVIDER};

const PARSE_CONTEXT: &str = "Error converting place to Cora place";

/// Builds `authority[type=place]` records from legacy place XML.
#[derive(Debug, Clone)]
pub struct AlvinToCoraPlaceConverter {
    data_divider: String,
}

impl Default for AlvinToCoraPlaceConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl AlvinToCoraPlaceConverter {
    pub fn new() -> Self {
        Self::with_data_divider(DEFAULT_DATA_DIVIDER)
    }

    /// Use `data_divider` as the owning system of converted records.
    pub fn with_data_divider(data_divider: impl Into<String>) -> Self {
        Self {
            data_divider: data_divider.into(),
        }
    }
}

impl FromXmlConverter for AlvinToCoraPlaceConverter {
    fn from_xml(&self, xml: &str) -> Result<DataGroup, ConversionError> {
        let doc = Document::parse(xml).map_err(|source| ConversionError::Parse {
            context: PARSE_CONTEXT.to_string(),
            source,
        })?;

        let id = required_text(&doc, &["pid"])?;
        let default_name = required_text(&doc, &["defaultPlaceName", "name"])?;

        let mut info = record_info(&id, EntityType::Place, &self.data_divider);
        add_created(&doc, &mut info);
        add_updates(&doc, &mut info);

        let mut place = DataGroup::with_name_in_data("authority");
        place.add_attribute_by_id_with_value("type", "place");
        place.add_child(info);
        place.add_child(authorized_name(&default_name));
        add_country(&doc, &mut place);
        add_coordinates(&doc, &mut place);
        add_local_identifiers(&doc, &mut place);

        log::debug!("converted place {}", id);
        Ok(place)
    }
}

fn required_text(doc: &Document, path: &[&str]) -> Result<String, ConversionError> {
    doc.find_path(path)
        .map(|node| doc.text(node))
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ConversionError::MissingField {
            entity: EntityType::Place,
            path: path.join("/"),
        })
}

fn optional_text(doc: &Document, from: NodeId, path: &[&str]) -> Option<String> {
    doc.find_path_from(from, path)
        .map(|node| doc.text(node))
        .filter(|text| !text.trim().is_empty())
}

fn authorized_name(default_name: &str) -> DataGroup {
    let mut name_part = DataGroup::with_name_in_data("namePart");
    name_part.add_attribute_by_id_with_value("type", "defaultName");
    name_part.add_child(DataAtomic::with_name_in_data_and_value(
        "value",
        default_name,
    ));

    let mut name = DataGroup::with_name_in_data("name");
    name.add_attribute_by_id_with_value("type", "authorized");
    name.add_child(name_part);
    name
}

fn add_created(doc: &Document, info: &mut DataGroup) {
    let Some(created) = doc.find_path(&["recordInfo", "created"]) else {
        return;
    };
    if let Some(user) = optional_text(doc, created, &["user", "userId"]) {
        info.add_child(DataGroup::as_link("createdBy", "user", user));
    }
    if let Some(date) = optional_text(doc, created, &["date"]) {
        info.add_child(DataAtomic::with_name_in_data_and_value("tsCreated", date));
    }
}

/// One `updated` group per user action, in document order. The creating
/// action is usually listed again here as a back-reference.
fn add_updates(doc: &Document, info: &mut DataGroup) {
    let Some(updated) = doc.find_path(&["recordInfo", "updated"]) else {
        return;
    };

    let actions = doc
        .child_elements(updated)
        .filter(|&node| doc.name(node) == Some("userAction"))
        .filter_map(|node| resolve_reference(doc, node));

    let mut repeat_id = 0;
    for action in actions {
        let mut update = DataGroup::with_name_in_data("updated");
        if let Some(user) = optional_text(doc, action, &["user", "userId"]) {
            update.add_child(DataGroup::as_link("updatedBy", "user", user));
        }
        if let Some(date) = optional_text(doc, action, &["date"]) {
            update.add_child(DataAtomic::with_name_in_data_and_value("tsUpdated", date));
        }
        if update.children().is_empty() {
            continue;
        }
        update.set_repeat_id(repeat_id.to_string());
        repeat_id += 1;
        info.add_child(update);
    }
}

/// Follow a `reference="N"` attribute to the element with `id="N"`.
fn resolve_reference(doc: &Document, node: NodeId) -> Option<NodeId> {
    let Some(reference) = doc.attribute(node, "reference") else {
        return Some(node);
    };
    let target = doc.find_element_with_attribute("id", reference);
    if target.is_none() {
        log::warn!("userAction references unknown id {}, skipping", reference);
    }
    target
}

fn add_country(doc: &Document, place: &mut DataGroup) {
    let country = doc
        .find_path(&["country"])
        .and_then(|node| optional_text(doc, node, &["alpha2Code"]));
    if let Some(alpha2_code) = country {
        place.add_child(DataGroup::as_link("country", "country", alpha2_code));
    }
}

fn add_coordinates(doc: &Document, place: &mut DataGroup) {
    for field in ["longitude", "latitude"] {
        if let Some(value) = optional_text(doc, doc.root(), &[field]) {
            place.add_child(DataAtomic::with_name_in_data_and_value(field, value));
        }
    }
}

fn add_local_identifiers(doc: &Document, place: &mut DataGroup) {
    let Some(list) = doc.find_path(&["localIdentifiers"]) else {
        return;
    };

    let mut repeat_id = 0;
    for node in doc.child_elements(list) {
        if doc.name(node) != Some("localIdentifier") {
            continue;
        }
        let kind = optional_text(doc, node, &["type", "code"]);
        let value = optional_text(doc, node, &["text"]);
        let (Some(kind), Some(value)) = (kind, value) else {
            log::debug!("skipping incomplete localIdentifier {}", node);
            continue;
        };

        let mut identifier = DataGroup::with_name_in_data("localIdentifier");
        identifier.add_child(DataAtomic::with_name_in_data_and_value(
            "localIdentifierType",
            kind,
        ));
        identifier.add_child(DataAtomic::with_name_in_data_and_value(
            "localIdentifierValue",
            value,
        ));
        identifier.set_repeat_id(repeat_id.to_string());
        repeat_id += 1;
        place.add_child(identifier);
    }
}
