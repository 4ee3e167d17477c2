// src/reference/types.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DutyError;
use crate::series::YearlySeries;

/// Geographic grouping of trading partners.
///
/// Names outside the four known regions deserialize as `Unknown`, so one bad
/// entry does not reject a whole reference file; generation refuses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Asia,
    #[serde(rename = "North America")]
    NorthAmerica,
    Europe,
    #[serde(rename = "South America")]
    SouthAmerica,
    #[serde(other)]
    Unknown,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Asia => "Asia",
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::SouthAmerica => "South America",
            Region::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Region::Unknown
    }
}

impl FromStr for Region {
    type Err = DutyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asia" => Ok(Region::Asia),
            "north america" => Ok(Region::NorthAmerica),
            "europe" => Ok(Region::Europe),
            "south america" => Ok(Region::SouthAmerica),
            _ => Err(DutyError::invalid(s, "unknown region")),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A country with a trade relationship profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPartner {
    pub name: String,
    pub region: Region,
    /// Base-year bilateral trade volume in USD.
    pub trade_volume: f64,
    /// Export category names, most important first.
    pub main_exports: Vec<String>,
}

impl TradingPartner {
    pub fn exports_label(&self) -> String {
        self.main_exports.join(", ")
    }
}

/// A product category with its average U.S. duty rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub name: String,
    /// Average duty rate in percent.
    pub avg_duty_rate: f64,
    /// Category trade volume in USD; descriptive only.
    pub trade_volume: f64,
}

/// A dated trade-policy shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEvent {
    pub year: i32,
    pub description: String,
    /// Percentage-point change applied from `year` onward.
    pub avg_duty_change: f64,
}

/// Hand-authored yearly values for a country, in millions of USD / percent.
///
/// Each metric is optional; metrics left out are synthesized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duties_collected: Option<YearlySeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_volume: Option<YearlySeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_duty_rate: Option<YearlySeries>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_serde_names() {
        let yaml = serde_yaml::to_string(&Region::NorthAmerica).unwrap();
        assert_eq!(yaml.trim(), "North America");
        let back: Region = serde_yaml::from_str("South America").unwrap();
        assert_eq!(back, Region::SouthAmerica);
        assert_eq!(" europe ".parse::<Region>(), Ok(Region::Europe));
        assert_eq!(
            "Oceania".parse::<Region>(),
            Err(DutyError::invalid("Oceania", "unknown region"))
        );
        assert!("Unknown".parse::<Region>().is_err());

        let other: Region = serde_yaml::from_str("Oceania").unwrap();
        assert_eq!(other, Region::Unknown);
        assert!(!other.is_known());
    }

    #[test]
    fn test_exports_label() {
        let p = TradingPartner {
            name: "India".into(),
            region: Region::Asia,
            trade_volume: 90e9,
            main_exports: vec!["Pharmaceuticals".into(), "Textiles".into(), "IT Services".into()],
        };
        assert_eq!(p.exports_label(), "Pharmaceuticals, Textiles, IT Services");
    }
}
