// src/series/generator.rs

use std::fmt;
use tracing::{debug, instrument, trace};

use super::noise::NoiseSource;
use super::yearly::{years, YearlySeries, FIRST_YEAR};
use crate::error::DutyError;
use crate::reference::{PolicyTimeline, ReferenceData, TradingPartner};

/// The three yearly metrics produced for every country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    DutiesCollected,
    TradeVolume,
    EffectiveDutyRate,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::DutiesCollected,
        Metric::TradeVolume,
        Metric::EffectiveDutyRate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::DutiesCollected => "duties_collected",
            Metric::TradeVolume => "trade_volume",
            Metric::EffectiveDutyRate => "effective_duty_rate",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the values of one metric come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesSource<'a> {
    /// Hand-authored values, returned verbatim.
    Literal(&'a YearlySeries),
    /// Values drawn from the growth model.
    Synthesized,
}

/// Aligned yearly series for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountrySeries {
    pub country: String,
    pub duties_collected: YearlySeries,
    pub trade_volume: YearlySeries,
    pub effective_duty_rate: YearlySeries,
}

impl CountrySeries {
    pub fn metric(&self, metric: Metric) -> &YearlySeries {
        match metric {
            Metric::DutiesCollected => &self.duties_collected,
            Metric::TradeVolume => &self.trade_volume,
            Metric::EffectiveDutyRate => &self.effective_duty_rate,
        }
    }
}

/// Turns reference data into yearly series, one country at a time.
///
/// Holds no mutable state: randomness comes from the `NoiseSource` passed to
/// each call, so a generator can be shared across threads.
pub struct SeriesGenerator<'a> {
    reference: &'a ReferenceData,
    timeline: PolicyTimeline<'a>,
}

impl<'a> SeriesGenerator<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self {
            reference,
            timeline: reference.policy_timeline(),
        }
    }

    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    /// Cumulative policy delta (percentage points) in effect in `year`.
    pub fn policy_delta(&self, year: i32) -> f64 {
        self.timeline.cumulative_delta(year)
    }

    /// Resolve whether `metric` of `country` is literal or synthesized.
    pub fn source(&self, country: &str, metric: Metric) -> SeriesSource<'a> {
        let literal = self.reference.override_for(country).and_then(|o| match metric {
            Metric::DutiesCollected => o.duties_collected.as_ref(),
            Metric::TradeVolume => o.trade_volume.as_ref(),
            Metric::EffectiveDutyRate => o.effective_duty_rate.as_ref(),
        });
        match literal {
            Some(series) => SeriesSource::Literal(series),
            None => SeriesSource::Synthesized,
        }
    }

    /// Mean duty rate of the partner's export categories.
    ///
    /// Categories missing from the table add nothing but still count toward
    /// the divisor.
    pub fn weighted_duty_rate(&self, partner: &TradingPartner) -> Result<f64, DutyError> {
        if partner.main_exports.is_empty() {
            return Err(DutyError::invalid(&partner.name, "empty main exports list"));
        }
        let total: f64 = partner
            .main_exports
            .iter()
            .filter_map(|name| self.reference.category(name))
            .map(|c| c.avg_duty_rate)
            .sum();
        let rate = total / partner.main_exports.len() as f64;
        if !rate.is_finite() {
            return Err(DutyError::invalid(
                &partner.name,
                format!("average duty rate of main exports is {}", rate),
            ));
        }
        Ok(rate)
    }

    /// Produce the three series for `country`.
    #[instrument(level = "debug", skip(self, noise))]
    pub fn generate<N: NoiseSource>(
        &self,
        country: &str,
        mut noise: N,
    ) -> Result<CountrySeries, DutyError> {
        let partner = self.reference.partner(country)?;
        if !partner.region.is_known() {
            return Err(DutyError::invalid(country, "unknown region"));
        }
        let avg_rate = self.weighted_duty_rate(partner)?;

        let duties_collected = match self.source(country, Metric::DutiesCollected) {
            SeriesSource::Literal(s) => literal(country, Metric::DutiesCollected, s)?,
            SeriesSource::Synthesized => self.synthesize_duties(partner, avg_rate, &mut noise),
        };
        let trade_volume = match self.source(country, Metric::TradeVolume) {
            SeriesSource::Literal(s) => literal(country, Metric::TradeVolume, s)?,
            SeriesSource::Synthesized => self.synthesize_trade_volume(partner, &mut noise),
        };
        let effective_duty_rate = match self.source(country, Metric::EffectiveDutyRate) {
            SeriesSource::Literal(s) => literal(country, Metric::EffectiveDutyRate, s)?,
            SeriesSource::Synthesized => self.synthesize_duty_rate(partner, avg_rate, &mut noise),
        };

        Ok(CountrySeries {
            country: country.to_string(),
            duties_collected,
            trade_volume,
            effective_duty_rate,
        })
    }

    fn synthesize_duties<N: NoiseSource>(
        &self,
        partner: &TradingPartner,
        avg_rate: f64,
        noise: &mut N,
    ) -> YearlySeries {
        let params = &self.reference.model;
        let base = partner.trade_volume / params.usd_per_unit * (avg_rate / 100.0);
        debug!(country = %partner.name, avg_rate, base, "synthesizing duties");

        years()
            .map(|year| {
                let growth = noise.normal(params.duty_growth.mean, params.duty_growth.std_dev);
                let policy = self.policy_delta(year);
                let value = base * (1.0 + growth).powi(year - FIRST_YEAR) * (1.0 + policy / 100.0);
                let noisy = value + noise.normal(0.0, value * params.value_noise_fraction);
                trace!(year, growth, policy, value, noisy, "duties");
                (year, noisy.max(params.min_duties))
            })
            .collect()
    }

    fn synthesize_trade_volume<N: NoiseSource>(
        &self,
        partner: &TradingPartner,
        noise: &mut N,
    ) -> YearlySeries {
        let params = &self.reference.model;
        let base = partner.trade_volume / params.usd_per_unit;
        debug!(country = %partner.name, base, "synthesizing trade volume");

        years()
            .map(|year| {
                let mut growth =
                    noise.normal(params.trade_growth.mean, params.trade_growth.std_dev);
                if params.crisis.applies(year) {
                    growth -= params.crisis.penalty;
                }
                if params.trade_war.applies(&partner.name, year) {
                    growth -= params.trade_war.penalty;
                }
                let value = base * (1.0 + growth).powi(year - FIRST_YEAR);
                let noisy = value + noise.normal(0.0, value * params.value_noise_fraction);
                trace!(year, growth, value, noisy, "trade volume");
                (year, noisy.max(params.min_trade_volume))
            })
            .collect()
    }

    fn synthesize_duty_rate<N: NoiseSource>(
        &self,
        partner: &TradingPartner,
        avg_rate: f64,
        noise: &mut N,
    ) -> YearlySeries {
        let params = &self.reference.model;
        let rate = avg_rate
            + params
                .regional_adjustment
                .delta_for(&partner.name, partner.region);
        debug!(country = %partner.name, rate, "synthesizing effective duty rate");

        years()
            .map(|year| {
                let value = rate + self.policy_delta(year) + noise.normal(0.0, params.rate_noise);
                (year, value.clamp(params.min_rate, params.max_rate))
            })
            .collect()
    }
}

fn literal(
    country: &str,
    metric: Metric,
    series: &YearlySeries,
) -> Result<YearlySeries, DutyError> {
    let missing = series.missing_years();
    if !missing.is_empty() {
        return Err(DutyError::invalid(
            country,
            format!("literal {} series is missing years {:?}", metric, missing),
        ));
    }
    Ok(series.clone())
}
