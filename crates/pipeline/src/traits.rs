//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! single-predicate filters to be chained over a table's records.

use crate::criteria::FilterCriteria;
use data_loader::Record;

/// Core trait for filtering records.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - Filters take ownership of the Vec<Record> and return the kept subset
///   in the same order, so chaining never clones a record twice
/// - The criteria are shared, read-only context for every stage
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Keep the records this filter accepts under `criteria`.
    ///
    /// # Arguments
    /// * `records` - The records to filter (takes ownership)
    /// * `criteria` - Bounds and selections shared by every stage
    ///
    /// # Returns
    /// * The accepted records, in their input order
    fn apply(&self, records: Vec<Record>, criteria: &FilterCriteria) -> Vec<Record>;
}
