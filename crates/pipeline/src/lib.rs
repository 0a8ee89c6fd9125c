//! Filtering, aggregation and export over insurance charge tables.
//!
//! This crate provides:
//! - FilterCriteria / FilterOptions describing what to keep
//! - Filter trait and implementations, composed by FilterPipeline
//! - Summary metrics, grouped aggregates and chart series
//! - CSV export with an optional content-keyed memo
//!
//! ## Architecture
//! Every run is a pure transform of (table, criteria):
//! 1. Filters remove records outside any range or selection
//! 2. Metrics and aggregates are computed over what remains
//! 3. The filtered table can be exported back to CSV
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{build_report, to_csv_bytes, FilterCriteria, FilterOptions};
//!
//! let options = FilterOptions::from_table(&table);
//! let criteria = FilterCriteria::select_all(&options).with_smokers(["yes"]);
//!
//! let report = build_report(&table, &criteria);
//! println!("{} records, mean {:.2}", report.metrics.count, report.metrics.mean_charges);
//! let csv = to_csv_bytes(&report.filtered)?;
//! ```

pub mod aggregate;
pub mod charts;
pub mod criteria;
pub mod export;
pub mod filter_pipeline;
pub mod filters;
pub mod report;
pub mod stats;
pub mod traits;

// Re-export main types
pub use aggregate::{aggregate_by_region, pivot_by_smoker_and_region, ChargesPivot, RegionCharges};
pub use charts::{charges_histogram, charges_trend_by_smoker, HistogramBin, LinearFit, HISTOGRAM_MAX_BINS};
pub use criteria::{Bounds, FilterCriteria, FilterOptions};
pub use export::{content_hash, to_csv_bytes, CsvCache, EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
pub use filter_pipeline::{filter, FilterPipeline};
pub use report::{build_report, DashboardReport};
pub use stats::{summarize, Metrics};
pub use traits::Filter;
