//! Filters keeping records whose numeric field lies in an inclusive range.

use crate::criteria::FilterCriteria;
use crate::traits::Filter;
use data_loader::Record;

/// The numeric fields that carry range bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Age,
    Bmi,
    Children,
}

/// Keeps records with `min <= field <= max` for the field's bounds in the
/// criteria. Bounds with `min > max` keep nothing.
#[derive(Debug, Clone, Copy)]
pub struct RangeFilter {
    field: NumericField,
}

impl RangeFilter {
    pub fn new(field: NumericField) -> Self {
        Self { field }
    }

    pub fn age() -> Self {
        Self::new(NumericField::Age)
    }

    pub fn bmi() -> Self {
        Self::new(NumericField::Bmi)
    }

    pub fn children() -> Self {
        Self::new(NumericField::Children)
    }

    fn accepts(&self, record: &Record, criteria: &FilterCriteria) -> bool {
        match self.field {
            NumericField::Age => criteria.age.contains(record.age),
            NumericField::Bmi => criteria.bmi.contains(record.bmi),
            NumericField::Children => criteria.children.contains(record.children),
        }
    }
}

impl Filter for RangeFilter {
    fn name(&self) -> &str {
        match self.field {
            NumericField::Age => "AgeRangeFilter",
            NumericField::Bmi => "BmiRangeFilter",
            NumericField::Children => "ChildrenRangeFilter",
        }
    }

    fn apply(&self, records: Vec<Record>, criteria: &FilterCriteria) -> Vec<Record> {
        records
            .into_iter()
            .filter(|record| self.accepts(record, criteria))
            .collect()
    }
}
