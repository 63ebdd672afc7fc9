//! The data element tree - groups and atomics.
//!
//! A record in the generic model is a `DataGroup` whose children are either
//! nested groups or atomic values. Children keep their insertion order and
//! names are not unique among siblings: repeated entries (for example one
//! `updated` group per edit) share a name and are told apart by position or
//! by `repeat_id`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{DataError, DataPath};

/// One node of the data model.
///
/// The JSON form is untagged: a group is an object with `children`, an
/// atomic is an object with `value`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataElement {
    /// Composite node.
    Group(DataGroup),
    /// Leaf node holding a string.
    Atomic(DataAtomic),
}

impl DataElement {
    /// The name in data of the wrapped node.
    pub fn name_in_data(&self) -> &str {
        match self {
            DataElement::Group(group) => &group.name_in_data,
            DataElement::Atomic(atomic) => &atomic.name_in_data,
        }
    }

    /// Look up an attribute on the wrapped node.
    pub fn attribute(&self, id: &str) -> Option<&str> {
        match self {
            DataElement::Group(group) => group.attribute(id),
            DataElement::Atomic(atomic) => atomic.attribute(id),
        }
    }

    /// All attributes of the wrapped node.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        match self {
            DataElement::Group(group) => &group.attributes,
            DataElement::Atomic(atomic) => &atomic.attributes,
        }
    }

    /// Check whether the node carries every given attribute with its value.
    pub fn has_attributes(&self, wanted: &[(String, String)]) -> bool {
        let attributes = self.attributes();
        wanted
            .iter()
            .all(|(id, value)| attributes.get(id) == Some(value))
    }

    pub fn repeat_id(&self) -> Option<&str> {
        match self {
            DataElement::Group(group) => group.repeat_id.as_deref(),
            DataElement::Atomic(atomic) => atomic.repeat_id.as_deref(),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, DataElement::Group(_))
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, DataElement::Atomic(_))
    }

    pub fn as_group(&self) -> Option<&DataGroup> {
        match self {
            DataElement::Group(group) => Some(group),
            DataElement::Atomic(_) => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut DataGroup> {
        match self {
            DataElement::Group(group) => Some(group),
            DataElement::Atomic(_) => None,
        }
    }

    pub fn as_atomic(&self) -> Option<&DataAtomic> {
        match self {
            DataElement::Group(_) => None,
            DataElement::Atomic(atomic) => Some(atomic),
        }
    }
}

impl From<DataGroup> for DataElement {
    fn from(group: DataGroup) -> Self {
        DataElement::Group(group)
    }
}

impl From<DataAtomic> for DataElement {
    fn from(atomic: DataAtomic) -> Self {
        DataElement::Atomic(atomic)
    }
}

/// A composite node: name, attributes and an ordered list of children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataGroup {
    #[serde(rename = "name")]
    name_in_data: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repeat_id: Option<String>,
    children: Vec<DataElement>,
}

impl DataGroup {
    /// Create an empty group.
    pub fn with_name_in_data(name_in_data: impl Into<String>) -> Self {
        Self {
            name_in_data: name_in_data.into(),
            attributes: BTreeMap::new(),
            repeat_id: None,
            children: Vec::new(),
        }
    }

    /// Create a link pair group pointing at another record.
    ///
    /// ```rust
    /// use alvincora_data::DataGroup;
    ///
    /// let link = DataGroup::as_link("type", "recordType", "place");
    /// assert_eq!(link.first_atomic_value_with_name_in_data("linkedRecordType"), Some("recordType"));
    /// assert_eq!(link.first_atomic_value_with_name_in_data("linkedRecordId"), Some("place"));
    /// ```
    pub fn as_link(
        name_in_data: impl Into<String>,
        linked_record_type: impl Into<String>,
        linked_record_id: impl Into<String>,
    ) -> Self {
        let mut link = Self::with_name_in_data(name_in_data);
        link.add_child(DataAtomic::with_name_in_data_and_value(
            "linkedRecordType",
            linked_record_type,
        ));
        link.add_child(DataAtomic::with_name_in_data_and_value(
            "linkedRecordId",
            linked_record_id,
        ));
        link
    }

    pub fn name_in_data(&self) -> &str {
        &self.name_in_data
    }

    /// Set an attribute, replacing any previous value with the same id.
    pub fn add_attribute_by_id_with_value(
        &mut self,
        id: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.attributes.insert(id.into(), value.into());
    }

    pub fn attribute(&self, id: &str) -> Option<&str> {
        self.attributes.get(id).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn repeat_id(&self) -> Option<&str> {
        self.repeat_id.as_deref()
    }

    pub fn set_repeat_id(&mut self, repeat_id: impl Into<String>) {
        self.repeat_id = Some(repeat_id.into());
    }

    /// Append a child. Insertion order is preserved.
    pub fn add_child(&mut self, child: impl Into<DataElement>) {
        self.children.push(child.into());
    }

    pub fn children(&self) -> &[DataElement] {
        &self.children
    }

    pub fn contains_child_with_name_in_data(&self, name_in_data: &str) -> bool {
        self.children
            .iter()
            .any(|child| child.name_in_data() == name_in_data)
    }

    pub fn first_group_with_name_in_data(&self, name_in_data: &str) -> Option<&DataGroup> {
        self.children
            .iter()
            .filter_map(DataElement::as_group)
            .find(|group| group.name_in_data == name_in_data)
    }

    pub fn first_group_with_name_in_data_mut(
        &mut self,
        name_in_data: &str,
    ) -> Option<&mut DataGroup> {
        self.children
            .iter_mut()
            .filter_map(DataElement::as_group_mut)
            .find(|group| group.name_in_data == name_in_data)
    }

    pub fn first_atomic_value_with_name_in_data(&self, name_in_data: &str) -> Option<&str> {
        self.children
            .iter()
            .filter_map(DataElement::as_atomic)
            .find(|atomic| atomic.name_in_data == name_in_data)
            .map(DataAtomic::value)
    }

    /// Find the first group with the given name carrying all given attributes.
    ///
    /// This is how a group's semantic role is resolved: `name` with
    /// `type=authorized` is the authorized name, other `name` groups are not.
    pub fn first_group_with_name_and_attributes(
        &self,
        name_in_data: &str,
        attributes: &[(&str, &str)],
    ) -> Option<&DataGroup> {
        self.children
            .iter()
            .filter_map(DataElement::as_group)
            .filter(|group| group.name_in_data == name_in_data)
            .find(|group| {
                attributes
                    .iter()
                    .all(|(id, value)| group.attribute(id) == Some(*value))
            })
    }

    /// Iterate over every child group with the given name, in order.
    pub fn all_groups_with_name_in_data<'a>(
        &'a self,
        name_in_data: &'a str,
    ) -> impl Iterator<Item = &'a DataGroup> + 'a {
        self.children
            .iter()
            .filter_map(DataElement::as_group)
            .filter(move |group| group.name_in_data == name_in_data)
    }

    /// Remove the first child with the given name.
    ///
    /// Returns `true` if a child was removed.
    pub fn remove_first_child_with_name_in_data(&mut self, name_in_data: &str) -> bool {
        match self
            .children
            .iter()
            .position(|child| child.name_in_data() == name_in_data)
        {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }

    /// Like `first_group_with_name_in_data`, but a missing group is an error.
    pub fn try_first_group(&self, name_in_data: &str) -> Result<&DataGroup, DataError> {
        self.first_group_with_name_in_data(name_in_data)
            .ok_or_else(|| DataError::NotFound {
                name: name_in_data.to_string(),
            })
    }

    /// Like `first_atomic_value_with_name_in_data`, but a missing value is an error.
    pub fn try_first_atomic_value(&self, name_in_data: &str) -> Result<&str, DataError> {
        self.first_atomic_value_with_name_in_data(name_in_data)
            .ok_or_else(|| DataError::NotFound {
                name: name_in_data.to_string(),
            })
    }

    /// Resolve a path relative to this group.
    ///
    /// Every step but the last must resolve to a group; the last step may
    /// resolve to either kind of element. The first matching child is taken
    /// at each step.
    pub fn find(&self, path: &DataPath) -> Option<&DataElement> {
        let (last, parents) = path.steps().split_last()?;
        let mut current = self;
        for step in parents {
            current = current
                .children
                .iter()
                .filter(|child| step.matches(child))
                .find_map(DataElement::as_group)?;
        }
        current.children.iter().find(|child| last.matches(child))
    }

    /// Resolve a path that ends in an atomic and return its value.
    pub fn atomic_value_at(&self, path: &DataPath) -> Option<&str> {
        self.find(path)
            .and_then(DataElement::as_atomic)
            .map(DataAtomic::value)
    }

    /// Read a group from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write this group in its pretty-printed JSON form.
    pub fn to_json(&self) -> Result<String, DataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A leaf node: name, attributes and one string value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataAtomic {
    #[serde(rename = "name")]
    name_in_data: String,
    value: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    repeat_id: Option<String>,
}

impl DataAtomic {
    pub fn with_name_in_data_and_value(
        name_in_data: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name_in_data: name_in_data.into(),
            value: value.into(),
            attributes: BTreeMap::new(),
            repeat_id: None,
        }
    }

    pub fn name_in_data(&self) -> &str {
        &self.name_in_data
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn add_attribute_by_id_with_value(
        &mut self,
        id: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.attributes.insert(id.into(), value.into());
    }

    pub fn attribute(&self, id: &str) -> Option<&str> {
        self.attributes.get(id).map(String::as_str)
    }

    pub fn repeat_id(&self) -> Option<&str> {
        self.repeat_id.as_deref()
    }

    pub fn set_repeat_id(&mut self, repeat_id: impl Into<String>) {
        self.repeat_id = Some(repeat_id.into());
    }
}
