//! Generic hierarchical data model.
//!
//! This is the lingua franca between the legacy store and the record
//! platform:
//! - `DataGroup`: named, attributed node with ordered children
//! - `DataAtomic`: named, attributed leaf holding one string value
//! - `DataElement`: either of the two, as stored in a group's child list
//! - `DataPath`: address of a node by name and attribute filters
//!
//! # Example
//!
//! ```rust
//! use alvincora_data::{DataAtomic, DataGroup};
//!
//! let mut record_info = DataGroup::with_name_in_data("recordInfo");
//! record_info.add_child(DataAtomic::with_name_in_data_and_value("id", "alvin-place:22"));
//!
//! assert_eq!(
//!     record_info.first_atomic_value_with_name_in_data("id"),
//!     Some("alvin-place:22")
//! );
//! ```

mod element;
mod error;
mod path;

pub use element::{DataAtomic, DataElement, DataGroup};
pub use error::DataError;
pub use path::{DataPath, PathStep};
