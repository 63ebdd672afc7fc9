//! Entity types known to the engine.

use std::fmt;
use std::str::FromStr;

use crate::UnsupportedTypeError;

/// The domain category of a legacy record.
///
/// Every variant is a type the legacy store holds; which conversions exist
/// for it is decided by `ConverterFactory`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    Place,
    Country,
}

impl EntityType {
    pub const ALL: [EntityType; 2] = [EntityType::Place, EntityType::Country];

    /// The type name used by both the legacy store and the record platform.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Place => "place",
            EntityType::Country => "country",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = UnsupportedTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .into_iter()
            .find(|entity| entity.as_str() == s)
            .ok_or_else(|| UnsupportedTypeError::new(s))
    }
}
