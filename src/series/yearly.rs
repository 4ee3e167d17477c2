// src/series/yearly.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// First year covered by every generated series.
pub const FIRST_YEAR: i32 = 2002;
/// Last year covered by every generated series (inclusive).
pub const LAST_YEAR: i32 = 2025;

/// The inclusive year range 2002..=2025.
pub fn years() -> RangeInclusive<i32> {
    FIRST_YEAR..=LAST_YEAR
}

/// Number of points in a complete series.
pub fn year_count() -> usize {
    (LAST_YEAR - FIRST_YEAR + 1) as usize
}

/// Year → value mapping for one metric of one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearlySeries(BTreeMap<i32, f64>);

impl YearlySeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: i32, value: f64) {
        self.0.insert(year, value);
    }

    pub fn get(&self, year: i32) -> Option<f64> {
        self.0.get(&year).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(year, value)` pairs in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.0.iter().map(|(y, v)| (*y, *v))
    }

    /// Years of the 2002..=2025 range that have no value.
    pub fn missing_years(&self) -> Vec<i32> {
        years().filter(|y| !self.0.contains_key(y)).collect()
    }

    /// Build a series from values listed in year order starting at 2002.
    pub fn from_values(values: &[f64]) -> Self {
        Self(years().zip(values.iter().copied()).collect())
    }
}

impl FromIterator<(i32, f64)> for YearlySeries {
    fn from_iter<T: IntoIterator<Item = (i32, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
