//! CSV export of a table, with an optional memo of encoded bytes.

use anyhow::{anyhow, Result};
use data_loader::{Record, Table};
use std::collections::HashMap;
use std::sync::Arc;
use xxhash_rust::xxh3::Xxh3;

/// File name offered for the filtered download
pub const EXPORT_FILE_NAME: &str = "insurance_filtered.csv";

/// MIME type of the export
pub const EXPORT_MIME_TYPE: &str = "text/csv";

/// Serialize `table` as UTF-8 CSV.
///
/// The header is the table's column order; there is one line per record and
/// no index column. An empty table still produces the header line.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;

    for record in table {
        let row: Vec<String> = table
            .columns()
            .iter()
            .map(|column| record.field_text(column).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV buffer: {}", e.error()))
}

/// XXH3 digest of a table's columns and records.
///
/// Two tables with equal columns and equal records hash equally.
pub fn content_hash(table: &Table) -> u64 {
    let mut hasher = Xxh3::new();
    hasher.update(&(table.columns().len() as u64).to_le_bytes());
    for column in table.columns() {
        hash_str(&mut hasher, column);
    }
    hasher.update(&(table.len() as u64).to_le_bytes());
    for record in table {
        hash_record(&mut hasher, record);
    }
    hasher.digest()
}

fn hash_str(hasher: &mut Xxh3, value: &str) {
    hasher.update(&(value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_record(hasher: &mut Xxh3, record: &Record) {
    hasher.update(&record.age.to_le_bytes());
    hasher.update(&record.bmi.to_bits().to_le_bytes());
    hasher.update(&record.children.to_le_bytes());
    hash_str(hasher, &record.sex);
    hash_str(hasher, &record.smoker);
    hash_str(hasher, &record.region);
    hasher.update(&record.charges.to_bits().to_le_bytes());
    hasher.update(&(record.extra.len() as u64).to_le_bytes());
    for (key, value) in &record.extra {
        hash_str(hasher, key);
        hash_str(hasher, value);
    }
}

/// Memo of CSV encodings keyed by [`content_hash`].
///
/// Owned by the caller; a hit returns the previously encoded buffer and is
/// otherwise indistinguishable from encoding again.
#[derive(Debug, Default)]
pub struct CsvCache {
    entries: HashMap<u64, Arc<[u8]>>,
}

impl CsvCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_encode(&mut self, table: &Table) -> Result<Arc<[u8]>> {
        let key = content_hash(table);
        if let Some(bytes) = self.entries.get(&key) {
            tracing::trace!("CSV cache hit for {:016x}", key);
            return Ok(Arc::clone(bytes));
        }

        tracing::debug!("CSV cache miss for {:016x} ({} records)", key, table.len());
        let bytes: Arc<[u8]> = to_csv_bytes(table)?.into();
        self.entries.insert(key, Arc::clone(&bytes));
        Ok(bytes)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
