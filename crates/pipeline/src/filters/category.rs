//! Filters keeping records whose categorical field is in a selected set.

use crate::criteria::FilterCriteria;
use crate::traits::Filter;
use data_loader::Record;
use std::collections::BTreeSet;

/// The categorical fields that carry a selection set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalField {
    Sex,
    Smoker,
    Region,
}

/// Keeps records whose field value is in the criteria's selected set.
///
/// Matching is exact (case-sensitive). An empty set keeps nothing.
#[derive(Debug, Clone, Copy)]
pub struct CategoryFilter {
    field: CategoricalField,
}

impl CategoryFilter {
    pub fn new(field: CategoricalField) -> Self {
        Self { field }
    }

    pub fn sex() -> Self {
        Self::new(CategoricalField::Sex)
    }

    pub fn smoker() -> Self {
        Self::new(CategoricalField::Smoker)
    }

    pub fn region() -> Self {
        Self::new(CategoricalField::Region)
    }

    fn selection<'a>(&self, criteria: &'a FilterCriteria) -> &'a BTreeSet<String> {
        match self.field {
            CategoricalField::Sex => &criteria.sexes,
            CategoricalField::Smoker => &criteria.smokers,
            CategoricalField::Region => &criteria.regions,
        }
    }

    fn value<'r>(&self, record: &'r Record) -> &'r str {
        match self.field {
            CategoricalField::Sex => &record.sex,
            CategoricalField::Smoker => &record.smoker,
            CategoricalField::Region => &record.region,
        }
    }
}

impl Filter for CategoryFilter {
    fn name(&self) -> &str {
        match self.field {
            CategoricalField::Sex => "SexFilter",
            CategoricalField::Smoker => "SmokerFilter",
            CategoricalField::Region => "RegionFilter",
        }
    }

    fn apply(&self, records: Vec<Record>, criteria: &FilterCriteria) -> Vec<Record> {
        let selected = self.selection(criteria);
        if selected.is_empty() {
            return Vec::new();
        }
        records
            .into_iter()
            .filter(|record| selected.contains(self.value(record)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::FilterOptions;
    use data_loader::Table;

    fn records() -> Vec<Record> {
        vec![
            Record::new(19, 27.9, 0, "female", "yes", "southwest", 16884.92),
            Record::new(18, 33.77, 1, "male", "no", "southeast", 1725.55),
            Record::new(28, 33.0, 3, "male", "no", "southeast", 4449.46),
        ]
    }

    fn criteria() -> FilterCriteria {
        FilterCriteria::select_all(&FilterOptions::from_table(&Table::from_records(records())))
    }

    #[test]
    fn test_smoker_selection() {
        let filtered = CategoryFilter::smoker().apply(records(), &criteria().with_smokers(["yes"]));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].age, 19);
    }

    #[test]
    fn test_region_selection_preserves_order() {
        let filtered = CategoryFilter::region().apply(records(), &criteria().with_regions(["southeast"]));
        let ages: Vec<i64> = filtered.iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![18, 28]);
    }

    #[test]
    fn test_empty_selection_keeps_nothing() {
        let none: [&str; 0] = [];
        let filtered = CategoryFilter::sex().apply(records(), &criteria().with_sexes(none));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let filtered = CategoryFilter::sex().apply(records(), &criteria().with_sexes(["Female"]));
        assert!(filtered.is_empty());
    }
}
