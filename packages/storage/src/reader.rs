//! Row sources.
//!
//! The facade reads legacy rows through `RecordReader`. A relational
//! implementation runs SQL against the legacy database; `InMemoryRecordReader`
//! serves tables held in memory, loaded in code or from JSON.

use std::collections::BTreeMap;

use alvincora_convert::RowMap;

use crate::StorageError;

/// Read rows from named tables.
///
/// This trait is object-safe: you can use `Box<dyn RecordReader>`.
pub trait RecordReader: Send + Sync {
    /// Read the first row whose columns equal every condition.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - No row matches.
    /// * `Ok(Some(row))` - The first matching row.
    /// * `Err(StorageError)` - The row source failed.
    fn read_one_row(
        &self,
        table: &str,
        conditions: &RowMap,
    ) -> Result<Option<RowMap>, StorageError>;

    /// Read every row of a table, in stored order.
    fn read_all_rows(&self, table: &str) -> Result<Vec<RowMap>, StorageError>;
}

impl<T: RecordReader + ?Sized> RecordReader for Box<T> {
    fn read_one_row(
        &self,
        table: &str,
        conditions: &RowMap,
    ) -> Result<Option<RowMap>, StorageError> {
        self.as_ref().read_one_row(table, conditions)
    }

    fn read_all_rows(&self, table: &str) -> Result<Vec<RowMap>, StorageError> {
        self.as_ref().read_all_rows(table)
    }
}

/// Tables of rows kept in memory.
///
/// # Example
///
/// ```rust
/// use alvincora_storage::{InMemoryRecordReader, RecordReader};
///
/// let reader = InMemoryRecordReader::from_json(r#"{"country": [{"alpha2code": "SE"}]}"#).unwrap();
/// let rows = reader.read_all_rows("country").unwrap();
/// assert_eq!(rows[0]["alpha2code"], "SE");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordReader {
    tables: BTreeMap<String, Vec<RowMap>>,
}

impl InMemoryRecordReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a table.
    pub fn with_table(mut self, table: impl Into<String>, rows: Vec<RowMap>) -> Self {
        self.tables.insert(table.into(), rows);
        self
    }

    /// Load tables from a JSON object mapping table names to arrays of rows.
    /// Every column value must be a string.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let tables: BTreeMap<String, Vec<RowMap>> = serde_json::from_str(json)?;
        log::debug!("loaded {} table(s) of rows", tables.len());
        Ok(Self { tables })
    }

    fn table(&self, table: &str) -> Result<&[RowMap], StorageError> {
        self.tables
            .get(table)
            .map(Vec::as_slice)
            .ok_or_else(|| StorageError::RowSource {
                message: format!("no such table: {}", table),
            })
    }
}

impl RecordReader for InMemoryRecordReader {
    fn read_one_row(
        &self,
        table: &str,
        conditions: &RowMap,
    ) -> Result<Option<RowMap>, StorageError> {
        let row = self.table(table)?.iter().find(|row| {
            conditions
                .iter()
                .all(|(column, value)| row.get(column) == Some(value))
        });
        Ok(row.cloned())
    }

    fn read_all_rows(&self, table: &str) -> Result<Vec<RowMap>, StorageError> {
        Ok(self.table(table)?.to_vec())
    }
}
