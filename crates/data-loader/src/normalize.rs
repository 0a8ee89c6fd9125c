//! Turning a [`RawTable`] into a typed [`Table`].
//!
//! Normalization:
//! 1. Lower-case and trim every header label
//! 2. Check that all required columns are present
//! 3. Coerce `age`, `bmi`, `children` and `charges` per row, applying the
//!    configured [`NumericCoercion`] policy to rows that fail
//! 4. Carry any other columns through as text

use crate::error::{DataLoadError, Result};
use crate::parser::{self, coerce_charges, coerce_float, coerce_integer, normalize_label};
use crate::types::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

/// What to do with a row whose required numeric cell does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumericCoercion {
    /// Lenient coercion: drop the row and keep going
    #[default]
    DropRow,
    /// Fail the whole load with [`DataLoadError::InvalidValue`]
    Strict,
}

impl NumericCoercion {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericCoercion::DropRow => "drop-row-on-failure",
            NumericCoercion::Strict => "strict",
        }
    }
}

impl fmt::Display for NumericCoercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positions of the required columns within a raw row
struct ColumnLayout {
    age: usize,
    sex: usize,
    bmi: usize,
    children: usize,
    smoker: usize,
    region: usize,
    charges: usize,
    /// Non-required columns: (normalized label, raw position)
    extra: Vec<(String, usize)>,
}

impl ColumnLayout {
    fn resolve(positions: &HashMap<&str, usize>, columns: &[String]) -> Result<Self> {
        let mut missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !positions.contains_key(*name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(DataLoadError::Schema { missing });
        }

        let extra = columns
            .iter()
            .filter(|label| !REQUIRED_COLUMNS.contains(&label.as_str()))
            .map(|label| (label.clone(), positions[label.as_str()]))
            .collect();

        Ok(Self {
            age: positions[AGE],
            sex: positions[SEX],
            bmi: positions[BMI],
            children: positions[CHILDREN],
            smoker: positions[SMOKER],
            region: positions[REGION],
            charges: positions[CHARGES],
            extra,
        })
    }
}

/// Normalize a raw table.
///
/// Fails with [`DataLoadError::Schema`] when a required column is missing.
/// Duplicate labels (after normalization) resolve to their first occurrence.
pub fn normalize(raw: &RawTable, coercion: NumericCoercion) -> Result<Table> {
    let labels: Vec<String> = raw.headers.iter().map(|h| normalize_label(h)).collect();

    // Column order is first-seen order of each distinct label
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut columns: Vec<String> = Vec::with_capacity(labels.len());
    for (pos, label) in labels.iter().enumerate() {
        if positions.contains_key(label.as_str()) {
            tracing::warn!("Duplicate column '{}' at position {}; keeping the first", label, pos);
            continue;
        }
        positions.insert(label.as_str(), pos);
        columns.push(label.clone());
    }

    let layout = ColumnLayout::resolve(&positions, &columns)?;

    let mut records = Vec::with_capacity(raw.rows.len());
    let mut dropped = 0usize;

    for (idx, row) in raw.rows.iter().enumerate() {
        let cell = |pos: usize| row.get(pos).map(String::as_str).unwrap_or("");

        let age = coerce_integer(cell(layout.age));
        let bmi = coerce_float(cell(layout.bmi));
        let children = coerce_integer(cell(layout.children));
        let charges = coerce_charges(cell(layout.charges));

        let (Some(age), Some(bmi), Some(children), Some(charges)) = (age, bmi, children, charges)
        else {
            match coercion {
                NumericCoercion::DropRow => {
                    dropped += 1;
                    continue;
                }
                NumericCoercion::Strict => {
                    let (field, pos) = [
                        (AGE, layout.age, age.is_none()),
                        (BMI, layout.bmi, bmi.is_none()),
                        (CHILDREN, layout.children, children.is_none()),
                        (CHARGES, layout.charges, charges.is_none()),
                    ]
                    .into_iter()
                    .find(|(_, _, failed)| *failed)
                    .map(|(field, pos, _)| (field, pos))
                    .unwrap_or((AGE, layout.age));
                    return Err(DataLoadError::InvalidValue {
                        field: field.to_string(),
                        row: idx + 1,
                        value: cell(pos).to_string(),
                    });
                }
            }
        };

        let extra: BTreeMap<String, String> = layout
            .extra
            .iter()
            .map(|(label, pos)| (label.clone(), cell(*pos).to_string()))
            .collect();

        records.push(Record {
            age,
            bmi,
            children,
            sex: cell(layout.sex).to_string(),
            smoker: cell(layout.smoker).to_string(),
            region: cell(layout.region).to_string(),
            charges,
            extra,
        });
    }

    if dropped > 0 {
        tracing::warn!(
            "Dropped {} of {} rows with unparsable numeric fields ({})",
            dropped,
            raw.rows.len(),
            coercion
        );
    }

    Ok(Table::new(columns, records))
}

impl Table {
    /// Read and normalize a CSV file
    pub fn load(path: &Path, coercion: NumericCoercion) -> Result<Self> {
        let raw = parser::read_csv_path(path)?;
        let table = normalize(&raw, coercion)?;
        tracing::info!("Loaded {} records from {}", table.len(), path.display());
        Ok(table)
    }

    /// Read and normalize CSV held in memory
    pub fn from_csv_bytes(bytes: &[u8], coercion: NumericCoercion) -> Result<Self> {
        let raw = parser::read_csv_bytes(bytes)?;
        normalize(&raw, coercion)
    }
}
