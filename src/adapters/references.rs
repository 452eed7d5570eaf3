use crate::domain::model::Table;
use crate::domain::ports::ReferenceLookup;
use crate::utils::error::{FlotaError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

/// Live row IDs per table, held in memory. Stands in for the database when
/// validating request bodies offline.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferences {
    rows: HashMap<Table, HashSet<i64>>,
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    table: String,
    id: i64,
}

impl InMemoryReferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: Table, id: i64) {
        self.rows.entry(table).or_default().insert(id);
    }

    pub fn with(mut self, table: Table, ids: impl IntoIterator<Item = i64>) -> Self {
        self.rows.entry(table).or_default().extend(ids);
        self
    }

    pub fn contains(&self, table: Table, id: i64) -> bool {
        self.rows.get(&table).is_some_and(|ids| ids.contains(&id))
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads `table,id` rows (with header).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut references = Self::new();
        for record in csv_reader.deserialize::<ReferenceRow>() {
            let row = record?;
            let table = row
                .table
                .parse::<Table>()
                .map_err(|message| FlotaError::ReferenceError { message })?;
            references.insert(table, row.id);
        }

        Ok(references)
    }

    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(&path)?;
        let references = Self::from_csv_reader(file)?;
        tracing::debug!(
            "Loaded {} reference rows from {}",
            references.len(),
            path.as_ref().display()
        );
        Ok(references)
    }
}

#[async_trait]
impl ReferenceLookup for InMemoryReferences {
    async fn exists(&self, table: Table, id: i64) -> Result<bool> {
        Ok(self.contains(table, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_csv_reader() {
        let csv = "table,id\ncompania,1\n maquina , 7\nmaquina,8\ncompania,1\n";
        let references = InMemoryReferences::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(references.len(), 3);
        assert!(tokio_test::block_on(references.exists(Table::Maquina, 7)).unwrap());
        assert!(!tokio_test::block_on(references.exists(Table::Maquina, 9)).unwrap());
        assert!(!tokio_test::block_on(references.exists(Table::Clave, 1)).unwrap());
    }

    #[test]
    fn test_unknown_table_is_reference_error() {
        let csv = "table,id\nvehiculo,1\n";
        let err = InMemoryReferences::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FlotaError::ReferenceError { .. }));
    }

    #[test]
    fn test_bad_id_is_csv_error() {
        let csv = "table,id\ncompania,uno\n";
        let err = InMemoryReferences::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, FlotaError::CsvError(_)));
    }

    #[test]
    fn test_builder() {
        let references = InMemoryReferences::new()
            .with(Table::Bitacora, [1, 2])
            .with(Table::Clave, [10]);
        assert!(references.contains(Table::Bitacora, 2));
        assert!(!references.is_empty());
    }
}
