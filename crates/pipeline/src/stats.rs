//! Headline metrics over a (filtered) table.

use data_loader::Table;
use serde::Serialize;

/// Summary metrics for a table.
///
/// Every field is defined for an empty table: counts and rates are zero and
/// the charge statistics are `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub count: usize,
    pub mean_charges: f64,
    pub median_charges: f64,
    /// Fraction of records with `smoker == "yes"`, in `[0, 1]`
    pub smoker_rate: f64,
}

pub fn summarize(table: &Table) -> Metrics {
    let charges: Vec<f64> = table.iter().map(|r| r.charges).collect();
    let smokers = table.iter().filter(|r| r.is_smoker()).count();

    Metrics {
        count: table.len(),
        mean_charges: mean(&charges).unwrap_or(0.0),
        median_charges: median(&charges).unwrap_or(0.0),
        smoker_rate: if table.is_empty() {
            0.0
        } else {
            smokers as f64 / table.len() as f64
        },
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median with the even-length midpoint averaged
pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::Record;

    #[test]
    fn test_summarize_empty_table() {
        let metrics = summarize(&Table::from_records(Vec::new()));
        assert_eq!(
            metrics,
            Metrics {
                count: 0,
                mean_charges: 0.0,
                median_charges: 0.0,
                smoker_rate: 0.0,
            }
        );
    }

    #[test]
    fn test_summarize_single_smoker() {
        let table = Table::from_records(vec![Record::new(
            19, 27.9, 0, "female", "yes", "southwest", 16884.92,
        )]);
        let metrics = summarize(&table);

        assert_eq!(metrics.count, 1);
        assert_eq!(metrics.mean_charges, 16884.92);
        assert_eq!(metrics.median_charges, 16884.92);
        assert_eq!(metrics.smoker_rate, 1.0);
    }

    #[test]
    fn test_summarize_mixed() {
        let table = Table::from_records(vec![
            Record::new(20, 25.0, 0, "male", "no", "northeast", 100.0),
            Record::new(30, 25.0, 0, "male", "yes", "northeast", 400.0),
            Record::new(40, 25.0, 0, "male", "no", "northeast", 200.0),
            Record::new(50, 25.0, 0, "male", "no", "northeast", 900.0),
        ]);
        let metrics = summarize(&table);

        assert_eq!(metrics.count, 4);
        assert_eq!(metrics.mean_charges, 400.0);
        assert_eq!(metrics.median_charges, 300.0);
        assert_eq!(metrics.smoker_rate, 0.25);
    }

    #[test]
    fn test_median_odd_length() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[]), None);
    }
}
