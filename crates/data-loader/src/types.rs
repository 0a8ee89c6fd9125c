//! Core domain types for insurance charge tables.
//!
//! - [`RawTable`] is the CSV exactly as read: header labels and text cells
//! - [`Record`] is one typed row after normalization
//! - [`Table`] is an ordered sequence of records plus the source column order

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Column names
// =============================================================================

pub const AGE: &str = "age";
pub const SEX: &str = "sex";
pub const BMI: &str = "bmi";
pub const CHILDREN: &str = "children";
pub const SMOKER: &str = "smoker";
pub const REGION: &str = "region";
pub const CHARGES: &str = "charges";

/// The seven columns every input must carry, in the order of the reference
/// `insurance.csv` file.
pub const REQUIRED_COLUMNS: [&str; 7] = [AGE, SEX, BMI, CHILDREN, SMOKER, REGION, CHARGES];

/// Columns coerced to numbers during normalization.
pub const NUMERIC_COLUMNS: [&str; 4] = [AGE, BMI, CHILDREN, CHARGES];

/// The smoker value counted by the smoker rate.
pub const SMOKER_YES: &str = "yes";

/// Whether a categorical cell is missing (empty or only whitespace).
///
/// Missing categoricals are kept on the record but are never offered as a
/// filter choice and never form a group of their own.
pub fn is_missing(value: &str) -> bool {
    value.trim().is_empty()
}

// =============================================================================
// RawTable
// =============================================================================

/// A CSV table before any normalization.
///
/// Rows may be shorter than the header; missing trailing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows (header excluded)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Record
// =============================================================================

/// One insurance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub age: i64,
    pub bmi: f64,
    pub children: i64,
    pub sex: String,
    /// "yes" or "no" in well-formed inputs; other labels are kept as-is
    pub smoker: String,
    pub region: String,
    /// Always finite and non-negative
    pub charges: f64,
    /// Columns beyond the seven required ones, keyed by normalized label
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Record {
    pub fn new(
        age: i64,
        bmi: f64,
        children: i64,
        sex: &str,
        smoker: &str,
        region: &str,
        charges: f64,
    ) -> Self {
        Self {
            age,
            bmi,
            children,
            sex: sex.to_string(),
            smoker: smoker.to_string(),
            region: region.to_string(),
            charges,
            extra: BTreeMap::new(),
        }
    }

    /// Text rendering of the named column, as written on export.
    ///
    /// Floats use the shortest representation that parses back to the same
    /// value, so a written table re-reads losslessly.
    pub fn field_text(&self, column: &str) -> Option<String> {
        match column {
            AGE => Some(self.age.to_string()),
            BMI => Some(self.bmi.to_string()),
            CHILDREN => Some(self.children.to_string()),
            SEX => Some(self.sex.clone()),
            SMOKER => Some(self.smoker.clone()),
            REGION => Some(self.region.clone()),
            CHARGES => Some(self.charges.to_string()),
            other => self.extra.get(other).cloned(),
        }
    }

    pub fn is_smoker(&self) -> bool {
        self.smoker == SMOKER_YES
    }
}

// =============================================================================
// Table
// =============================================================================

/// An ordered sequence of records.
///
/// Tables are never edited in place: every derived table (for example the
/// output of a filter) is a new value sharing the source's column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl Table {
    /// Build a table with an explicit column order
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> Self {
        Self { columns, records }
    }

    /// Build a table with the standard seven-column layout
    pub fn from_records(records: Vec<Record>) -> Self {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        Self { columns, records }
    }

    /// A table with the same columns and different records
    pub fn derive(&self, records: Vec<Record>) -> Self {
        Self {
            columns: self.columns.clone(),
            records,
        }
    }

    /// Normalized column labels in source order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
