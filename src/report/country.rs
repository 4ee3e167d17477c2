// src/report/country.rs

use super::global::{top_by_duties, Ranked};
use super::stats::mean;
use crate::dataset::{Dataset, DatasetRow};
use crate::error::DutyError;
use crate::reference::{PolicyEvent, PolicyTimeline, Region};
use crate::series::{FIRST_YEAR, LAST_YEAR};

/// Focused report on one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryReport {
    pub country: String,
    pub region: Region,
    pub main_exports: String,
    pub latest_year: i32,
    pub latest: Ranked,
    /// Regional means in the latest year.
    pub region_avg_ratio: f64,
    pub region_avg_rate: f64,
    /// Highest and lowest duties with the year they occurred.
    pub duty_max: (i32, f64),
    pub duty_min: (i32, f64),
    pub duty_mean: f64,
    /// (year, duty rate change, description) for events inside the range.
    pub policy_impacts: Vec<(i32, f64, String)>,
    /// Up to five countries of the same region by latest duties.
    pub regional_top: Vec<Ranked>,
    /// Yearly (year, duties, trade, rate, ratio) rows for the trend table.
    pub history: Vec<(i32, f64, f64, f64, f64)>,
}

impl CountryReport {
    /// Build the report; a country absent from `dataset` is `UnknownCountry`.
    pub fn build(
        dataset: &Dataset,
        country: &str,
        events: &[PolicyEvent],
    ) -> Result<Self, DutyError> {
        let rows: Vec<&DatasetRow> = dataset.for_country(country).collect();
        let unknown = || DutyError::UnknownCountry(country.to_string());

        let latest_row = rows.iter().max_by_key(|r| r.year()).ok_or_else(unknown)?;
        let latest_year = latest_row.year();
        let region = latest_row.region();

        let region_latest: Vec<&DatasetRow> = dataset
            .in_year(latest_year)
            .filter(|r| r.region() == region)
            .collect();
        let region_avg_ratio =
            mean(region_latest.iter().map(|r| r.duties_trade_ratio())).unwrap_or(0.0);
        let region_avg_rate =
            mean(region_latest.iter().map(|r| r.effective_duty_rate())).unwrap_or(0.0);

        let duty_max = rows
            .iter()
            .map(|r| (r.year(), r.duties_collected()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(unknown)?;
        let duty_min = rows
            .iter()
            .map(|r| (r.year(), r.duties_collected()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(unknown)?;
        let duty_mean = mean(rows.iter().map(|r| r.duties_collected())).unwrap_or(0.0);

        let policy_impacts = PolicyTimeline::new(events)
            .events_between(FIRST_YEAR, LAST_YEAR)
            .map(|e| (e.year, e.avg_duty_change, e.description.clone()))
            .collect();

        let mut history: Vec<(i32, f64, f64, f64, f64)> = rows
            .iter()
            .map(|r| {
                (
                    r.year(),
                    r.duties_collected(),
                    r.trade_volume(),
                    r.effective_duty_rate(),
                    r.duties_trade_ratio(),
                )
            })
            .collect();
        history.sort_by_key(|h| h.0);

        Ok(Self {
            country: country.to_string(),
            region,
            main_exports: latest_row.main_exports().to_string(),
            latest_year,
            latest: Ranked::from(*latest_row),
            region_avg_ratio,
            region_avg_rate,
            duty_max,
            duty_min,
            duty_mean,
            policy_impacts,
            regional_top: top_by_duties(region_latest.into_iter(), 5),
            history,
        })
    }
}
