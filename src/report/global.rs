// src/report/global.rs

use std::collections::BTreeMap;

use super::stats::{mean, Summary};
use crate::dataset::{Dataset, DatasetRow, COLUMNS};
use crate::reference::Region;

/// A country's standing in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub country: String,
    pub region: Region,
    pub duties_collected: f64,
    pub trade_volume: f64,
    pub effective_duty_rate: f64,
    pub duties_trade_ratio: f64,
}

impl From<&DatasetRow> for Ranked {
    fn from(row: &DatasetRow) -> Self {
        Self {
            country: row.country().to_string(),
            region: row.region(),
            duties_collected: row.duties_collected(),
            trade_volume: row.trade_volume(),
            effective_duty_rate: row.effective_duty_rate(),
            duties_trade_ratio: row.duties_trade_ratio(),
        }
    }
}

/// `rows` ordered by duties collected, largest first, at most `n`.
pub fn top_by_duties<'a>(rows: impl Iterator<Item = &'a DatasetRow>, n: usize) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = rows.map(Ranked::from).collect();
    ranked.sort_by(|a, b| b.duties_collected.total_cmp(&a.duties_collected));
    ranked.truncate(n);
    ranked
}

/// Whole-table view: distributions, regional trends and the latest ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalAnalysis {
    /// Column header → summary, for the four numeric columns.
    pub descriptive: Vec<(&'static str, Summary)>,
    /// Mean duties collected per region and year.
    pub region_duties: BTreeMap<Region, Vec<(i32, f64)>>,
    /// Mean effective duty rate per region and year.
    pub region_rates: BTreeMap<Region, Vec<(i32, f64)>>,
    /// Distribution of the duties/trade ratio per region.
    pub ratio_by_region: Vec<(Region, Summary)>,
    pub latest_year: i32,
    pub top_duties: Vec<Ranked>,
}

impl GlobalAnalysis {
    /// `None` for an empty dataset.
    pub fn build(dataset: &Dataset, top_n: usize) -> Option<Self> {
        let latest_year = dataset.latest_year()?;
        let rows = dataset.rows();

        let numeric: [(&'static str, fn(&DatasetRow) -> f64); 4] = [
            (COLUMNS[3], DatasetRow::duties_collected),
            (COLUMNS[4], DatasetRow::trade_volume),
            (COLUMNS[5], DatasetRow::effective_duty_rate),
            (COLUMNS[7], DatasetRow::duties_trade_ratio),
        ];
        let descriptive = numeric
            .iter()
            .filter_map(|(name, get)| Summary::of(rows.iter().map(get)).map(|s| (*name, s)))
            .collect();

        let ratio_by_region = dataset
            .regions()
            .into_iter()
            .filter_map(|region| {
                Summary::of(
                    rows.iter()
                        .filter(|r| r.region() == region)
                        .map(DatasetRow::duties_trade_ratio),
                )
                .map(|s| (region, s))
            })
            .collect();

        Some(Self {
            descriptive,
            region_duties: region_year_means(rows, DatasetRow::duties_collected),
            region_rates: region_year_means(rows, DatasetRow::effective_duty_rate),
            ratio_by_region,
            latest_year,
            top_duties: top_by_duties(dataset.in_year(latest_year), top_n),
        })
    }
}

/// Mean of `get` grouped by region then year, years ascending.
pub fn region_year_means(
    rows: &[DatasetRow],
    get: fn(&DatasetRow) -> f64,
) -> BTreeMap<Region, Vec<(i32, f64)>> {
    let mut groups: BTreeMap<Region, BTreeMap<i32, Vec<f64>>> = BTreeMap::new();
    for row in rows {
        groups
            .entry(row.region())
            .or_default()
            .entry(row.year())
            .or_default()
            .push(get(row));
    }
    groups
        .into_iter()
        .map(|(region, by_year)| {
            let means = by_year
                .into_iter()
                .filter_map(|(year, values)| mean(values).map(|m| (year, m)))
                .collect();
            (region, means)
        })
        .collect()
}
