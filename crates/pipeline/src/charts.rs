//! Series behind the dashboard charts.
//!
//! - [`charges_histogram`]: distribution of charges in equal-width bins
//! - [`charges_trend_by_smoker`]: least-squares charges-vs-age line per
//!   smoker group

use crate::stats::mean;
use data_loader::{is_missing, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// Default bin cap of the charges distribution chart
pub const HISTOGRAM_MAX_BINS: usize = 40;

/// One histogram bar covering `[start, end)` (the last bin also includes
/// its `end`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// `charges = slope * age + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Number of records the line was fitted on
    pub count: usize,
}

impl LinearFit {
    pub fn predict(&self, age: f64) -> f64 {
        self.slope * age + self.intercept
    }
}

/// Equal-width histogram of charges spanning `[min, max]`.
///
/// Returns no bins for an empty table or `max_bins == 0`. When every record
/// has the same charge the result is a single zero-width bin.
pub fn charges_histogram(table: &Table, max_bins: usize) -> Vec<HistogramBin> {
    if table.is_empty() || max_bins == 0 {
        return Vec::new();
    }

    let (min, max) = table.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.charges), hi.max(r.charges))
    });

    if min == max {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: table.len(),
        }];
    }

    let width = (max - min) / max_bins as f64;
    let mut bins: Vec<HistogramBin> = (0..max_bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == max_bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for record in table {
        let slot = (((record.charges - min) / width).floor() as usize).min(max_bins - 1);
        bins[slot].count += 1;
    }
    bins
}

/// Least-squares fit of charges against age for each smoker group.
///
/// Groups with fewer than two records, or whose ages are all equal, have no
/// defined line and are left out. Blank smoker statuses form no group.
pub fn charges_trend_by_smoker(table: &Table) -> BTreeMap<String, LinearFit> {
    let mut groups: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for record in table.iter().filter(|r| !is_missing(&r.smoker)) {
        let (ages, charges) = groups.entry(record.smoker.as_str()).or_default();
        ages.push(record.age as f64);
        charges.push(record.charges);
    }

    groups
        .into_iter()
        .filter_map(|(smoker, (ages, charges))| {
            fit_line(&ages, &charges).map(|fit| (smoker.to_string(), fit))
        })
        .collect()
}

fn fit_line(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    if xs.len() < 2 {
        return None;
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let (sxx, sxy) = xs.iter().zip(ys).fold((0.0, 0.0), |(sxx, sxy), (x, y)| {
        let dx = x - mean_x;
        (sxx + dx * dx, sxy + dx * (y - mean_y))
    });
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    Some(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
        count: xs.len(),
    })
}
