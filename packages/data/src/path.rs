//! Addressing nodes in the data model.
//!
//! A `DataPath` names a node by the chain of names leading to it, each step
//! optionally narrowed by attribute filters:
//!
//! ```text
//! name[type=authorized]/namePart[type=defaultName]/value
//! ```

use std::fmt;

use crate::{DataElement, DataError};

/// One step of a `DataPath`: a name in data plus required attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub name_in_data: String,
    pub attributes: Vec<(String, String)>,
}

impl PathStep {
    /// Check whether an element is selected by this step.
    pub fn matches(&self, element: &DataElement) -> bool {
        element.name_in_data() == self.name_in_data && element.has_attributes(&self.attributes)
    }

    fn parse(raw: &str, path: &str) -> Result<Self, DataError> {
        let invalid = |message: &str| DataError::InvalidPath {
            path: path.to_string(),
            message: message.to_string(),
        };

        let (name, filters) = match raw.find('[') {
            Some(open) => {
                let rest = &raw[open + 1..];
                let filters = rest
                    .strip_suffix(']')
                    .ok_or_else(|| invalid("unterminated attribute filter"))?;
                (&raw[..open], Some(filters))
            }
            None => (raw, None),
        };

        if name.is_empty() {
            return Err(invalid("empty name in data"));
        }

        let mut attributes = Vec::new();
        if let Some(filters) = filters {
            for filter in filters.split(',') {
                let (id, value) = filter
                    .split_once('=')
                    .ok_or_else(|| invalid("attribute filter must be id=value"))?;
                let id = id.trim();
                if id.is_empty() {
                    return Err(invalid("empty attribute id"));
                }
                attributes.push((id.to_string(), value.trim().to_string()));
            }
        }

        Ok(Self {
            name_in_data: name.to_string(),
            attributes,
        })
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name_in_data)?;
        if !self.attributes.is_empty() {
            let filters: Vec<String> = self
                .attributes
                .iter()
                .map(|(id, value)| format!("{}={}", id, value))
                .collect();
            write!(f, "[{}]", filters.join(","))?;
        }
        Ok(())
    }
}

/// A path from a group down to one of its descendants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataPath {
    steps: Vec<PathStep>,
}

impl DataPath {
    /// Parse a path string.
    ///
    /// Steps are separated by `/`; empty steps are ignored.
    ///
    /// ```rust
    /// use alvincora_data::DataPath;
    ///
    /// let path = DataPath::parse("name[type=authorized]/namePart/value").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert_eq!(path.to_string(), "name[type=authorized]/namePart/value");
    /// ```
    pub fn parse(s: &str) -> Result<Self, DataError> {
        let steps = s
            .split('/')
            .filter(|step| !step.is_empty())
            .map(|step| PathStep::parse(step, s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for DataPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<String> = self.steps.iter().map(ToString::to_string).collect();
        write!(f, "{}", steps.join("/"))
    }
}
