// src/series/model.rs

use serde::{Deserialize, Serialize};

use crate::reference::Region;

/// Mean and standard deviation of a normally distributed yearly draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    pub mean: f64,
    pub std_dev: f64,
}

/// Growth penalty applied to trade volume for a set of years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shock {
    pub years: Vec<i32>,
    pub penalty: f64,
}

impl Shock {
    pub fn applies(&self, year: i32) -> bool {
        self.years.contains(&year)
    }
}

/// Shock restricted to a single targeted country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetedShock {
    pub target: String,
    pub years: Vec<i32>,
    pub penalty: f64,
}

impl TargetedShock {
    pub fn applies(&self, country: &str, year: i32) -> bool {
        self.target == country && self.years.contains(&year)
    }
}

/// Flat duty-rate surcharge for one region, minus exempted countries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalAdjustment {
    pub region: Region,
    pub exempt: Vec<String>,
    pub delta: f64,
}

impl RegionalAdjustment {
    pub fn delta_for(&self, country: &str, region: Region) -> f64 {
        if region == self.region && !self.exempt.iter().any(|c| c == country) {
            self.delta
        } else {
            0.0
        }
    }
}

/// Parameters of the synthetic series model.
///
/// Every field has a default matching the built-in model, so a YAML file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Yearly growth of duties collected.
    pub duty_growth: Growth,
    /// Yearly growth of trade volume.
    pub trade_growth: Growth,
    /// Financial-crisis penalty on trade growth.
    pub crisis: Shock,
    /// Trade-war penalty on trade growth for one country.
    pub trade_war: TargetedShock,
    pub regional_adjustment: RegionalAdjustment,
    /// Noise standard deviation as a fraction of the modelled value.
    pub value_noise_fraction: f64,
    /// Absolute noise standard deviation on the effective rate (pp).
    pub rate_noise: f64,
    pub min_duties: f64,
    pub min_trade_volume: f64,
    pub min_rate: f64,
    pub max_rate: f64,
    /// Divisor converting reference USD amounts into millions of USD.
    pub usd_per_unit: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            duty_growth: Growth {
                mean: 0.04,
                std_dev: 0.02,
            },
            trade_growth: Growth {
                mean: 0.05,
                std_dev: 0.03,
            },
            crisis: Shock {
                years: vec![2008, 2009],
                penalty: 0.15,
            },
            trade_war: TargetedShock {
                target: "China".to_string(),
                years: vec![2018, 2019],
                penalty: 0.08,
            },
            regional_adjustment: RegionalAdjustment {
                region: Region::Asia,
                exempt: vec!["Japan".to_string(), "South Korea".to_string()],
                delta: 1.0,
            },
            value_noise_fraction: 0.1,
            rate_noise: 0.5,
            min_duties: 10.0,
            min_trade_volume: 100.0,
            min_rate: 0.1,
            max_rate: 25.0,
            usd_per_unit: 1e6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let params: ModelParams = serde_yaml::from_str(
            "trade_war:\n  target: Vietnam\n  years: [2019]\n  penalty: 0.05\n",
        )
        .unwrap();
        assert_eq!(params.trade_war.target, "Vietnam");
        assert_eq!(params.duty_growth, ModelParams::default().duty_growth);
        assert_eq!(params.max_rate, 25.0);
    }

    #[test]
    fn test_regional_adjustment_exemptions() {
        let adj = ModelParams::default().regional_adjustment;
        assert_eq!(adj.delta_for("India", Region::Asia), 1.0);
        assert_eq!(adj.delta_for("Japan", Region::Asia), 0.0);
        assert_eq!(adj.delta_for("South Korea", Region::Asia), 0.0);
        assert_eq!(adj.delta_for("France", Region::Europe), 0.0);
    }

    #[test]
    fn test_shocks() {
        let params = ModelParams::default();
        assert!(params.crisis.applies(2008));
        assert!(!params.crisis.applies(2010));
        assert!(params.trade_war.applies("China", 2019));
        assert!(!params.trade_war.applies("China", 2020));
        assert!(!params.trade_war.applies("Vietnam", 2018));
    }
}
