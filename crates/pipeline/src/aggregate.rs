//! Grouped aggregates of charges.

use data_loader::{is_missing, Table};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Mean charges of one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCharges {
    pub region: String,
    pub mean_charges: f64,
    pub count: usize,
}

/// region → smoker status → mean charges.
///
/// Only (region, smoker) pairs that occur in the table are present.
pub type ChargesPivot = BTreeMap<String, BTreeMap<String, f64>>;

/// Mean charges per region, highest first.
///
/// Regions with equal means keep the order in which they first appear in
/// the table. Records with a blank region are left out.
pub fn aggregate_by_region(table: &Table) -> Vec<RegionCharges> {
    let mut order: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();

    for record in table.iter().filter(|r| !is_missing(&r.region)) {
        let slot = *order.entry(record.region.as_str()).or_insert_with(|| {
            groups.push((record.region.as_str(), 0.0, 0));
            groups.len() - 1
        });
        groups[slot].1 += record.charges;
        groups[slot].2 += 1;
    }

    let mut by_region: Vec<RegionCharges> = groups
        .into_iter()
        .map(|(region, total, count)| RegionCharges {
            region: region.to_string(),
            mean_charges: total / count as f64,
            count,
        })
        .collect();

    // sort_by is stable
    by_region.sort_by(|a, b| b.mean_charges.total_cmp(&a.mean_charges));
    by_region
}

/// Mean charges for each (region, smoker) pair present in the table.
///
/// Records with a blank region or smoker status are left out.
pub fn pivot_by_smoker_and_region(table: &Table) -> ChargesPivot {
    let mut sums: BTreeMap<(&str, &str), (f64, usize)> = BTreeMap::new();
    for record in table
        .iter()
        .filter(|r| !is_missing(&r.region) && !is_missing(&r.smoker))
    {
        let entry = sums
            .entry((record.region.as_str(), record.smoker.as_str()))
            .or_insert((0.0, 0));
        entry.0 += record.charges;
        entry.1 += 1;
    }

    let mut pivot = ChargesPivot::new();
    for ((region, smoker), (total, count)) in sums {
        pivot
            .entry(region.to_string())
            .or_default()
            .insert(smoker.to_string(), total / count as f64);
    }
    pivot
}
