//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern, and [`filter`],
//! the standard six-predicate filter over a table.

use crate::criteria::FilterCriteria;
use crate::filters::{CategoryFilter, RangeFilter};
use crate::traits::Filter;
use data_loader::Table;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(RangeFilter::age())
///     .add_filter(CategoryFilter::smoker());
///
/// let filtered = pipeline.apply(&table, &criteria);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The full conjunction: age, bmi and children ranges, then sex, smoker
    /// and region selections.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(RangeFilter::age())
            .add_filter(RangeFilter::bmi())
            .add_filter(RangeFilter::children())
            .add_filter(CategoryFilter::sex())
            .add_filter(CategoryFilter::smoker())
            .add_filter(CategoryFilter::region())
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any filter implementing the Filter trait
    ///
    /// # Returns
    /// * Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of stages
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence and return the derived table.
    ///
    /// # Arguments
    /// * `table` - The source table (left untouched)
    /// * `criteria` - Bounds and selections passed to every stage
    ///
    /// # Returns
    /// * A table with the source's columns and the surviving records
    ///
    /// ## Algorithm
    /// 1. Copy the source records once
    /// 2. Hand them to each filter in insertion order
    /// 3. Stop early once no record is left
    /// 4. Wrap the survivors with the source column order
    pub fn apply(&self, table: &Table, criteria: &FilterCriteria) -> Table {
        let mut current = table.records().to_vec();
        for filter in &self.filters {
            if current.is_empty() {
                break;
            }
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, criteria);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        table.derive(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep exactly the records of `table` that satisfy every predicate in
/// `criteria`.
///
/// Record order is preserved and the result is idempotent: filtering the
/// output again with the same criteria returns it unchanged.
///
/// ```
/// use data_loader::{Record, Table};
/// use pipeline::{filter, FilterCriteria, FilterOptions};
///
/// let table = Table::from_records(vec![
///     Record::new(19, 27.9, 0, "female", "yes", "southwest", 16884.92),
///     Record::new(18, 33.77, 1, "male", "no", "southeast", 1725.55),
/// ]);
/// let criteria = FilterCriteria::select_all(&FilterOptions::from_table(&table))
///     .with_smokers(["yes"]);
///
/// let filtered = filter(&table, &criteria);
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered.records()[0].charges, 16884.92);
/// ```
pub fn filter(table: &Table, criteria: &FilterCriteria) -> Table {
    FilterPipeline::standard().apply(table, criteria)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::FilterOptions;
    use data_loader::Record;

    fn table() -> Table {
        Table::from_records(vec![
            Record::new(19, 27.9, 0, "female", "yes", "southwest", 16884.92),
            Record::new(18, 33.77, 1, "male", "no", "southeast", 1725.55),
            Record::new(33, 22.7, 0, "male", "no", "northwest", 21984.47),
        ])
    }

    #[test]
    fn test_empty_pipeline() {
        let table = table();
        let criteria = FilterCriteria::select_all(&FilterOptions::from_table(&table));

        let filtered = FilterPipeline::new().apply(&table, &criteria);
        assert_eq!(filtered, table);
    }

    #[test]
    fn test_single_filter() {
        let table = table();
        let criteria = FilterCriteria::select_all(&FilterOptions::from_table(&table)).with_age(19, 40);

        let pipeline = FilterPipeline::new().add_filter(RangeFilter::age());
        let filtered = pipeline.apply(&table, &criteria);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.records()[0].age, 19);
        assert_eq!(filtered.records()[1].age, 33);
    }

    #[test]
    fn test_standard_pipeline_is_a_conjunction() {
        let table = table();
        let criteria = FilterCriteria::select_all(&FilterOptions::from_table(&table))
            .with_sexes(["male"])
            .with_children(0, 0);

        let filtered = filter(&table, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records()[0].region, "northwest");
        assert_eq!(FilterPipeline::standard().len(), 6);
    }

    #[test]
    fn test_select_all_keeps_everything() {
        let table = table();
        let criteria = FilterCriteria::select_all(&FilterOptions::from_table(&table));
        assert_eq!(filter(&table, &criteria), table);
    }
}
