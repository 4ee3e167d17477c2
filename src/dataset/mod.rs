// src/dataset/mod.rs

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

pub mod arrow;
pub mod assemble;

pub use assemble::{assemble, assemble_countries, Assembly};

use crate::reference::Region;
use crate::series::{year_count, years};

/// Column headers of the exported table, in order.
pub const COLUMNS: [&str; 8] = [
    "Country",
    "Region",
    "Year",
    "Duties Collected (M$)",
    "Trade Volume (M$)",
    "Effective Duty Rate (%)",
    "Main Exports",
    "Duties/Trade Ratio (%)",
];

/// One (country, year) observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Region")]
    region: Region,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Duties Collected (M$)")]
    duties_collected: f64,
    #[serde(rename = "Trade Volume (M$)")]
    trade_volume: f64,
    #[serde(rename = "Effective Duty Rate (%)")]
    effective_duty_rate: f64,
    #[serde(rename = "Main Exports")]
    main_exports: String,
    #[serde(rename = "Duties/Trade Ratio (%)")]
    duties_trade_ratio: f64,
}

impl DatasetRow {
    /// Build a row, deriving the duties/trade ratio from its inputs.
    pub fn new(
        country: impl Into<String>,
        region: Region,
        year: i32,
        duties_collected: f64,
        trade_volume: f64,
        effective_duty_rate: f64,
        main_exports: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            region,
            year,
            duties_collected,
            trade_volume,
            effective_duty_rate,
            main_exports: main_exports.into(),
            duties_trade_ratio: ratio(duties_collected, trade_volume),
        }
    }

    /// Rebuild a row read from an export, keeping the stored ratio so that
    /// `Dataset::validate` can check it.
    pub(crate) fn with_stored_ratio(mut self, stored: f64) -> Self {
        self.duties_trade_ratio = stored;
        self
    }

    pub fn country(&self) -> &str {
        &self.country
    }
    pub fn region(&self) -> Region {
        self.region
    }
    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn duties_collected(&self) -> f64 {
        self.duties_collected
    }
    pub fn trade_volume(&self) -> f64 {
        self.trade_volume
    }
    pub fn effective_duty_rate(&self) -> f64 {
        self.effective_duty_rate
    }
    pub fn main_exports(&self) -> &str {
        &self.main_exports
    }
    pub fn duties_trade_ratio(&self) -> f64 {
        self.duties_trade_ratio
    }
}

fn ratio(duties: f64, trade: f64) -> f64 {
    if trade > 0.0 {
        duties / trade * 100.0
    } else {
        0.0
    }
}

/// A broken dataset invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("{country}: expected {expected} rows, found {found}")]
    RowCount {
        country: String,
        expected: usize,
        found: usize,
    },
    #[error("{country}: missing years {years:?}")]
    MissingYears { country: String, years: Vec<i32> },
    #[error("{country}: duplicate year {year}")]
    DuplicateYear { country: String, year: i32 },
    #[error("{country} {year}: {column} = {value} out of range")]
    OutOfRange {
        country: String,
        year: i32,
        column: &'static str,
        value: f64,
    },
    #[error("{country} {year}: ratio {stored} != {expected}")]
    RatioMismatch {
        country: String,
        year: i32,
        stored: f64,
        expected: f64,
    },
}

/// The flat countries × years table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Country names in first-appearance order.
    pub fn countries(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.rows
            .iter()
            .map(DatasetRow::country)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Regions in first-appearance order.
    pub fn regions(&self) -> Vec<Region> {
        let mut seen = BTreeSet::new();
        self.rows
            .iter()
            .map(DatasetRow::region)
            .filter(|r| seen.insert(*r))
            .collect()
    }

    pub fn contains_country(&self, country: &str) -> bool {
        self.rows.iter().any(|r| r.country == country)
    }

    /// Rows of one country, ascending by year.
    pub fn for_country<'a>(
        &'a self,
        country: &'a str,
    ) -> impl Iterator<Item = &'a DatasetRow> + 'a {
        self.rows.iter().filter(move |r| r.country == country)
    }

    pub fn in_year(&self, year: i32) -> impl Iterator<Item = &DatasetRow> + '_ {
        self.rows.iter().filter(move |r| r.year == year)
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.rows.iter().map(DatasetRow::year).max()
    }

    /// Check row counts, year coverage, bounds and ratios.
    pub fn validate(&self) -> Vec<Violation> {
        let mut problems = Vec::new();
        let mut by_country: BTreeMap<&str, Vec<i32>> = BTreeMap::new();

        for row in &self.rows {
            by_country.entry(&row.country).or_default().push(row.year);

            let checks: [(&'static str, f64, bool); 3] = [
                (COLUMNS[3], row.duties_collected, row.duties_collected >= 10.0),
                (COLUMNS[4], row.trade_volume, row.trade_volume >= 100.0),
                (
                    COLUMNS[5],
                    row.effective_duty_rate,
                    (0.1..=25.0).contains(&row.effective_duty_rate),
                ),
            ];
            for (column, value, ok) in checks {
                if !ok {
                    problems.push(Violation::OutOfRange {
                        country: row.country.clone(),
                        year: row.year,
                        column,
                        value,
                    });
                }
            }

            let expected = ratio(row.duties_collected, row.trade_volume);
            if (row.duties_trade_ratio - expected).abs() > 1e-9 * expected.abs().max(1.0) {
                problems.push(Violation::RatioMismatch {
                    country: row.country.clone(),
                    year: row.year,
                    stored: row.duties_trade_ratio,
                    expected,
                });
            }
        }

        for (country, mut seen_years) in by_country {
            if seen_years.len() != year_count() {
                problems.push(Violation::RowCount {
                    country: country.to_string(),
                    expected: year_count(),
                    found: seen_years.len(),
                });
            }
            seen_years.sort_unstable();
            for pair in seen_years.windows(2) {
                if pair[0] == pair[1] {
                    problems.push(Violation::DuplicateYear {
                        country: country.to_string(),
                        year: pair[0],
                    });
                }
            }
            let missing: Vec<i32> = years()
                .filter(|y| seen_years.binary_search(y).is_err())
                .collect();
            if !missing.is_empty() {
                problems.push(Violation::MissingYears {
                    country: country.to_string(),
                    years: missing,
                });
            }
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn full_country(name: &str) -> Vec<DatasetRow> {
        years()
            .map(|y| DatasetRow::new(name, Region::Europe, y, 500.0, 50_000.0, 2.0, "Steel"))
            .collect()
    }

    #[test]
    fn test_ratio_is_derived() {
        let row = DatasetRow::new("X", Region::Asia, 2002, 2700.0, 90_000.0, 3.0, "a, b");
        assert_abs_diff_eq!(row.duties_trade_ratio(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_valid_dataset_has_no_violations() {
        let mut rows = full_country("A");
        rows.extend(full_country("B"));
        let ds = Dataset::from_rows(rows);
        assert!(ds.validate().is_empty());
        assert_eq!(ds.countries(), vec!["A", "B"]);
        assert_eq!(ds.regions(), vec![Region::Europe]);
        assert_eq!(ds.latest_year(), Some(2025));
        assert_eq!(ds.for_country("B").count(), 24);
        assert_eq!(ds.in_year(2010).count(), 2);
    }

    #[test]
    fn test_violations_detected() {
        let mut rows = full_country("A");
        rows.remove(3); // 2005
        rows.push(DatasetRow::new("A", Region::Europe, 2002, 5.0, 50_000.0, 30.0, "Steel"));
        rows.push(
            DatasetRow::new("A", Region::Europe, 2010, 500.0, 50_000.0, 2.0, "Steel")
                .with_stored_ratio(7.0),
        );
        let problems = Dataset::from_rows(rows).validate();

        assert!(problems.contains(&Violation::MissingYears {
            country: "A".into(),
            years: vec![2005]
        }));
        assert!(problems.contains(&Violation::DuplicateYear {
            country: "A".into(),
            year: 2002
        }));
        assert!(problems
            .iter()
            .any(|p| matches!(p, Violation::RowCount { found: 25, .. })));
        assert!(problems
            .iter()
            .any(|p| matches!(p, Violation::OutOfRange { column, .. } if *column == COLUMNS[5])));
        assert!(problems
            .iter()
            .any(|p| matches!(p, Violation::RatioMismatch { year: 2010, .. })));
    }
}
