//! # alvincora-cli
//!
//! Command-line driver for the conversion engine.
//!
//! ## Usage
//!
//! ```bash
//! # Legacy place XML to a record
//! alvincora place-to-cora place-22.xml
//!
//! # Record back into the stored legacy XML
//! ALVINCORA_FEDORA_URL=http://fedora:8080/fedora/ alvincora cora-to-fedora place-679.json
//!
//! # Storage facade over rows from a JSON file
//! alvincora read country SE --rows rows.json
//! alvincora list country --rows rows.json
//! ```
//!
//! Set `RUST_LOG=debug` to see what the converters are doing.

pub mod commands;
mod error;

pub use commands::{run, Cli, Command};
pub use error::CliError;
