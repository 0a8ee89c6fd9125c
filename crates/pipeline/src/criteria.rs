//! Filter criteria and the option domains they are chosen from.
//!
//! [`FilterOptions`] describes what a user can pick (the slider ranges and
//! multiselect choices of the dashboard); [`FilterCriteria`] is what they
//! picked. Criteria are rebuilt on every interaction and never mutated by
//! the pipeline.

use data_loader::{is_missing, Table};
use serde::Serialize;
use std::collections::BTreeSet;

/// An inclusive `[min, max]` interval.
///
/// `min > max` is allowed and contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }
}

impl Bounds<i64> {
    pub fn full() -> Self {
        Self::new(i64::MIN, i64::MAX)
    }
}

impl Bounds<f64> {
    pub fn full() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }
}

/// A conjunction of range and set-membership predicates.
///
/// A record matches only if it satisfies every one of the six constraints.
/// An empty set for a categorical field matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub age: Bounds<i64>,
    pub bmi: Bounds<f64>,
    pub children: Bounds<i64>,
    pub sexes: BTreeSet<String>,
    pub smokers: BTreeSet<String>,
    pub regions: BTreeSet<String>,
}

impl FilterCriteria {
    /// Everything in `options` selected: the dashboard's initial state
    pub fn select_all(options: &FilterOptions) -> Self {
        Self {
            age: options.age.unwrap_or_else(Bounds::<i64>::full),
            bmi: options.bmi.unwrap_or_else(Bounds::<f64>::full),
            children: options.children.unwrap_or_else(Bounds::<i64>::full),
            sexes: options.sexes.clone(),
            smokers: options.smokers.clone(),
            regions: options.regions.clone(),
        }
    }

    pub fn with_age(mut self, min: i64, max: i64) -> Self {
        self.age = Bounds::new(min, max);
        self
    }

    pub fn with_bmi(mut self, min: f64, max: f64) -> Self {
        self.bmi = Bounds::new(min, max);
        self
    }

    pub fn with_children(mut self, min: i64, max: i64) -> Self {
        self.children = Bounds::new(min, max);
        self
    }

    pub fn with_sexes<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sexes = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_smokers<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.smokers = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_regions<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = values.into_iter().map(Into::into).collect();
        self
    }
}

/// The selectable domain of every filter control for a given table.
///
/// Bounds are `None` for an empty table. BMI bounds are widened to whole
/// numbers (floor of the minimum, ceiling of the maximum). Blank categorical
/// cells are not offered, so records carrying them fall outside
/// [`FilterCriteria::select_all`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub age: Option<Bounds<i64>>,
    pub bmi: Option<Bounds<f64>>,
    pub children: Option<Bounds<i64>>,
    pub sexes: BTreeSet<String>,
    pub smokers: BTreeSet<String>,
    pub regions: BTreeSet<String>,
}

impl FilterOptions {
    pub fn from_table(table: &Table) -> Self {
        let age = int_bounds(table.iter().map(|r| r.age));
        let children = int_bounds(table.iter().map(|r| r.children));
        let bmi = table.iter().map(|r| r.bmi).fold(None, |acc: Option<Bounds<f64>>, v| {
            Some(match acc {
                Some(b) => Bounds::new(b.min.min(v), b.max.max(v)),
                None => Bounds::new(v, v),
            })
        });

        Self {
            age,
            bmi: bmi.map(|b| Bounds::new(b.min.floor(), b.max.ceil())),
            children,
            sexes: present_values(table.iter().map(|r| r.sex.as_str())),
            smokers: present_values(table.iter().map(|r| r.smoker.as_str())),
            regions: present_values(table.iter().map(|r| r.region.as_str())),
        }
    }
}

fn present_values<'a>(values: impl Iterator<Item = &'a str>) -> BTreeSet<String> {
    values
        .filter(|v| !is_missing(v))
        .map(str::to_string)
        .collect()
}

fn int_bounds(values: impl Iterator<Item = i64>) -> Option<Bounds<i64>> {
    values.fold(None, |acc, v| {
        Some(match acc {
            Some(b) => Bounds::new(b.min.min(v), b.max.max(v)),
            None => Bounds::new(v, v),
        })
    })
}
