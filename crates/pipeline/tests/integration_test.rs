//! Integration tests for the pipeline.
//!
//! These tests go from CSV text through normalization, filtering,
//! aggregation and export, checking the properties the dashboard relies on.

use data_loader::{normalize, parser, NumericCoercion, Record, Table};
use pipeline::*;

const INSURANCE_CSV: &str = "\
Id,Age,Sex,BMI,Children,Smoker,Region,Charges
P001,19,female,27.9,0,yes,southwest,16884.924
P002,18,male,33.77,1,no,southeast,1725.5523
P003,28,male,33,3,no,southeast,4449.462
P004,33,male,22.705,0,no,northwest,21984.47061
P005,32,male,28.88,0,no,northwest,3866.8552
P006,31,female,25.74,0,no,southeast,3756.6216
P007,46,female,33.44,1,no,southeast,8240.5896
P008,37,female,27.74,3,no,northwest,7281.5056
P009,37,male,29.83,2,no,northeast,6406.4107
P010,60,female,25.84,0,no,northwest,28923.13692
P011,25,male,26.22,0,no,northeast,2721.3208
P012,62,female,26.29,0,yes,southeast,27808.7251
P013,23,male,34.4,0,no,southwest,1826.843
P014,56,female,39.82,0,no,southeast,11090.7178
P015,27,male,42.13,0,yes,southeast,39611.7577
P016,abc,male,30.0,0,no,southeast,1000.0
P017,30,female,,1,no,northeast,2000.0
";

fn load() -> Table {
    let raw = parser::read_csv_bytes(INSURANCE_CSV.as_bytes()).unwrap();
    normalize(&raw, NumericCoercion::DropRow).unwrap()
}

fn all_selected(table: &Table) -> FilterCriteria {
    FilterCriteria::select_all(&FilterOptions::from_table(table))
}

fn satisfies(record: &Record, criteria: &FilterCriteria) -> bool {
    criteria.age.contains(record.age)
        && criteria.bmi.contains(record.bmi)
        && criteria.children.contains(record.children)
        && criteria.sexes.contains(&record.sex)
        && criteria.smokers.contains(&record.smoker)
        && criteria.regions.contains(&record.region)
}

fn sample_criteria(table: &Table) -> Vec<FilterCriteria> {
    let base = all_selected(table);
    vec![
        base.clone(),
        base.clone().with_age(25, 40),
        base.clone().with_bmi(26.0, 30.0).with_sexes(["female"]),
        base.clone().with_children(0, 0).with_regions(["southeast", "northwest"]),
        base.clone().with_smokers(["yes"]).with_age(20, 70),
        base.clone().with_age(50, 18),
        base.with_regions(["nowhere"]),
    ]
}

#[test]
fn test_lenient_normalization_drops_bad_rows() {
    let table = load();
    assert_eq!(table.len(), 15);
    assert!(table.iter().all(|r| r.charges >= 0.0));
    assert_eq!(table.columns()[0], "id");
    assert_eq!(table.records()[0].extra["id"], "P001");
}

#[test]
fn test_filter_returns_subset_satisfying_all_predicates() {
    let table = load();
    for criteria in sample_criteria(&table) {
        let filtered = filter(&table, &criteria);

        assert!(filtered.len() <= table.len());
        for record in &filtered {
            assert!(table.records().contains(record));
            assert!(satisfies(record, &criteria));
        }
        let expected = table.iter().filter(|r| satisfies(r, &criteria)).count();
        assert_eq!(filtered.len(), expected);
    }
}

#[test]
fn test_filter_is_idempotent() {
    let table = load();
    for criteria in sample_criteria(&table) {
        let once = filter(&table, &criteria);
        let twice = filter(&once, &criteria);
        assert_eq!(once, twice);
    }
}

#[test]
fn test_filter_preserves_order() {
    let table = load();
    let criteria = all_selected(&table).with_regions(["southeast"]);
    let ages: Vec<i64> = filter(&table, &criteria).iter().map(|r| r.age).collect();
    assert_eq!(ages, vec![18, 28, 31, 46, 62, 56, 27]);
}

#[test]
fn test_documented_two_record_scenario() {
    let table = Table::from_records(vec![
        Record::new(19, 27.9, 0, "female", "yes", "southwest", 16884.92),
        Record::new(18, 33.77, 1, "male", "no", "southeast", 1725.55),
    ]);
    let criteria = all_selected(&table).with_smokers(["yes"]);

    let filtered = filter(&table, &criteria);
    assert_eq!(filtered.records(), &table.records()[..1]);

    let metrics = summarize(&filtered);
    assert_eq!(metrics.count, 1);
    assert_eq!(metrics.mean_charges, 16884.92);
    assert_eq!(metrics.smoker_rate, 1.0);
}

#[test]
fn test_inverted_age_bounds_flow_through_every_aggregate() {
    let table = load();
    let criteria = all_selected(&table).with_age(64, 18);

    let filtered = filter(&table, &criteria);
    assert!(filtered.is_empty());

    let metrics = summarize(&filtered);
    assert_eq!(metrics.count, 0);
    assert_eq!(metrics.mean_charges, 0.0);
    assert_eq!(metrics.median_charges, 0.0);
    assert_eq!(metrics.smoker_rate, 0.0);
    assert!(aggregate_by_region(&filtered).is_empty());
    assert!(pivot_by_smoker_and_region(&filtered).is_empty());
    assert!(charges_histogram(&filtered, HISTOGRAM_MAX_BINS).is_empty());
    assert!(charges_trend_by_smoker(&filtered).is_empty());

    let csv = String::from_utf8(to_csv_bytes(&filtered).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn test_region_aggregate_sorted_descending() {
    let by_region = aggregate_by_region(&load());
    assert_eq!(by_region.len(), 4);
    for pair in by_region.windows(2) {
        assert!(pair[0].mean_charges >= pair[1].mean_charges);
    }
    let total: usize = by_region.iter().map(|r| r.count).sum();
    assert_eq!(total, 15);
}

#[test]
fn test_pivot_matches_group_means() {
    let table = load();
    let pivot = pivot_by_smoker_and_region(&table);

    let southeast_yes = (27808.7251 + 39611.7577) / 2.0;
    assert!((pivot["southeast"]["yes"] - southeast_yes).abs() < 1e-9);
    assert!(!pivot["northeast"].contains_key("yes"));
}

#[test]
fn test_export_round_trip() {
    let table = load();
    let bytes = to_csv_bytes(&table).unwrap();
    let reread = Table::from_csv_bytes(&bytes, NumericCoercion::Strict).unwrap();

    assert_eq!(reread, table);
    let header = String::from_utf8(bytes).unwrap();
    assert!(header.starts_with("id,age,sex,bmi,children,smoker,region,charges\nP001,19,"));
    let ids: Vec<&str> = reread.iter().map(|r| r.extra["id"].as_str()).collect();
    assert_eq!(ids.len(), 15);
    assert_eq!(ids[14], "P015");
}

#[test]
fn test_filtered_export_round_trip() {
    let table = load();
    let criteria = all_selected(&table).with_sexes(["male"]).with_bmi(25.0, 35.0);
    let filtered = filter(&table, &criteria);

    let mut cache = CsvCache::new();
    let bytes = cache.get_or_encode(&filtered).unwrap();
    let reread = Table::from_csv_bytes(&bytes, NumericCoercion::DropRow).unwrap();

    assert_eq!(reread.records(), filtered.records());
}

#[test]
fn test_blank_categoricals_drop_out_of_default_view() {
    let csv = format!("{}P018,44,,30.0,1,no,,5000.0\n", INSURANCE_CSV);
    let table = Table::from_csv_bytes(csv.as_bytes(), NumericCoercion::DropRow).unwrap();
    assert_eq!(table.len(), 16);

    let options = FilterOptions::from_table(&table);
    assert_eq!(options.regions.len(), 4);
    assert!(!options.sexes.contains(""));

    let report = build_report(&table, &FilterCriteria::select_all(&options));
    assert_eq!(report.metrics.count, 15);
    assert!(report.by_region.iter().all(|r| !r.region.is_empty()));
    assert!(!report.pivot.contains_key(""));
}

#[test]
fn test_report_serializes_without_rows() {
    let table = load();
    let report = build_report(&table, &all_selected(&table));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["metrics"]["count"], 15);
    assert!(json.get("filtered").is_none());
    assert_eq!(json["by_region"].as_array().unwrap().len(), 4);
}
