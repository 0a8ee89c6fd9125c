//! One full pipeline run: everything the dashboard shows for a criteria.

use crate::aggregate::{aggregate_by_region, pivot_by_smoker_and_region, ChargesPivot, RegionCharges};
use crate::charts::{charges_histogram, charges_trend_by_smoker, HistogramBin, LinearFit, HISTOGRAM_MAX_BINS};
use crate::criteria::FilterCriteria;
use crate::filter_pipeline::filter;
use crate::stats::{summarize, Metrics};
use data_loader::Table;
use serde::Serialize;
use std::collections::BTreeMap;

/// All values derived from one table and one criteria.
///
/// The filtered table itself is not serialized; export it with
/// [`crate::to_csv_bytes`].
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    #[serde(skip)]
    pub filtered: Table,
    pub metrics: Metrics,
    pub by_region: Vec<RegionCharges>,
    pub pivot: ChargesPivot,
    pub histogram: Vec<HistogramBin>,
    pub trend: BTreeMap<String, LinearFit>,
}

/// Run the whole pipeline from scratch.
///
/// Nothing is carried between calls; re-run on every criteria change.
pub fn build_report(table: &Table, criteria: &FilterCriteria) -> DashboardReport {
    let filtered = filter(table, criteria);
    tracing::debug!("Filtered {} of {} records", filtered.len(), table.len());

    DashboardReport {
        metrics: summarize(&filtered),
        by_region: aggregate_by_region(&filtered),
        pivot: pivot_by_smoker_and_region(&filtered),
        histogram: charges_histogram(&filtered, HISTOGRAM_MAX_BINS),
        trend: charges_trend_by_smoker(&filtered),
        filtered,
    }
}
