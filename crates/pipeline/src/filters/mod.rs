//! Filter implementations for the record pipeline.
//!
//! Each filter checks exactly one field against the criteria, so a
//! FilterPipeline of all six is the full conjunction.

pub mod category;
pub mod range;

// Re-export for convenience
pub use category::{CategoricalField, CategoryFilter};
pub use range::{NumericField, RangeFilter};
