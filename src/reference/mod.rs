// src/reference/mod.rs

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashSet},
    fs,
    io::Write,
    path::Path,
};
use tracing::{info, warn};

mod defaults;
pub mod policy;
pub mod types;

pub use policy::PolicyTimeline;
pub use types::{HistoricalOverride, PolicyEvent, ProductCategory, Region, TradingPartner};

use crate::error::DutyError;
use crate::series::ModelParams;

/// Built-in reference tables, constructed on first use and never mutated.
pub static DEFAULT_REFERENCE: Lazy<ReferenceData> = Lazy::new(defaults::builtin);

/// All static inputs of the series model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Trading partners in report order.
    pub partners: Vec<TradingPartner>,
    pub categories: Vec<ProductCategory>,
    pub policy_events: Vec<PolicyEvent>,
    /// Literal historical series keyed by country name.
    #[serde(default)]
    pub overrides: BTreeMap<String, HistoricalOverride>,
    #[serde(default)]
    pub model: ModelParams,
}

impl ReferenceData {
    /// Parse reference data from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("parsing reference YAML")
    }

    /// Load reference data from a YAML file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading reference file {}", path.display()))?;
        let data = Self::from_yaml_str(&text)
            .with_context(|| format!("loading reference file {}", path.display()))?;
        info!(
            path = %path.display(),
            partners = data.partners.len(),
            categories = data.categories.len(),
            events = data.policy_events.len(),
            "loaded reference data"
        );
        Ok(data)
    }

    /// Write this reference data as YAML, through a temp file renamed into place.
    pub fn write_yaml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("yaml.tmp");
        let text = serde_yaml::to_string(self).context("serializing reference data")?;
        let mut tmp = fs::File::create(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;
        tmp.write_all(text.as_bytes())?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;
        Ok(())
    }

    pub fn partner(&self, country: &str) -> Result<&TradingPartner, DutyError> {
        self.partner_entry(country).map(|(_, partner)| partner)
    }

    /// The partner together with its position in `partners`.
    pub fn partner_entry(&self, country: &str) -> Result<(usize, &TradingPartner), DutyError> {
        self.partners
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == country)
            .ok_or_else(|| DutyError::UnknownCountry(country.to_string()))
    }

    pub fn category(&self, name: &str) -> Option<&ProductCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn override_for(&self, country: &str) -> Option<&HistoricalOverride> {
        self.overrides.get(country)
    }

    pub fn policy_timeline(&self) -> PolicyTimeline<'_> {
        PolicyTimeline::new(&self.policy_events)
    }

    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.partners.iter().map(|p| p.name.as_str())
    }

    /// Check the tables for entries generation would reject or misreport.
    ///
    /// Problems are logged and returned; none of them stop other entries
    /// from being generated.
    pub fn validate(&self) -> Vec<DutyError> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for partner in &self.partners {
            if !seen.insert(partner.name.as_str()) {
                problems.push(DutyError::invalid(&partner.name, "duplicate trading partner"));
            }
            if !partner.region.is_known() {
                problems.push(DutyError::invalid(&partner.name, "unknown region"));
            }
            if partner.main_exports.is_empty() {
                problems.push(DutyError::invalid(&partner.name, "empty main exports list"));
            }
            if !(partner.trade_volume.is_finite() && partner.trade_volume > 0.0) {
                problems.push(DutyError::invalid(
                    &partner.name,
                    format!("trade volume must be positive, got {}", partner.trade_volume),
                ));
            }
            for export in &partner.main_exports {
                if self.category(export).is_none() {
                    // counted in the divisor but contributes no rate
                    warn!(
                        country = %partner.name,
                        category = %export,
                        "export category not in category table"
                    );
                }
            }
        }

        for category in &self.categories {
            if !(category.avg_duty_rate.is_finite() && category.avg_duty_rate >= 0.0) {
                problems.push(DutyError::invalid(
                    &category.name,
                    format!(
                        "average duty rate must be finite and non-negative, got {}",
                        category.avg_duty_rate
                    ),
                ));
            }
        }

        for country in self.overrides.keys() {
            if !seen.contains(country.as_str()) {
                problems.push(DutyError::UnknownCountry(country.clone()));
            }
        }

        for problem in &problems {
            warn!(entry = problem.entry(), "{}", problem);
        }
        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_tables() {
        let data = &*DEFAULT_REFERENCE;
        assert_eq!(data.partners.len(), 15);
        assert_eq!(data.categories.len(), 15);
        assert_eq!(data.policy_events.len(), 11);
        assert_eq!(data.partners[0].name, "China");
        assert_eq!(data.partners[14].name, "Switzerland");
        assert!(data.validate().is_empty());
    }

    #[test]
    fn test_lookups() {
        let data = &*DEFAULT_REFERENCE;
        assert_eq!(data.partner("India").unwrap().trade_volume, 90e9);
        assert_eq!(
            data.partner("Atlantis"),
            Err(DutyError::UnknownCountry("Atlantis".into()))
        );
        assert_eq!(data.category("Steel").unwrap().avg_duty_rate, 15.0);
        assert!(data.category("IT Services").is_none());

        let mexico = data.override_for("Mexico").unwrap();
        assert!(mexico.duties_collected.is_some());
        assert!(mexico.trade_volume.is_none());
        assert!(data.override_for("India").is_none());
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("reference.yaml");
        DEFAULT_REFERENCE.write_yaml(&path).unwrap();
        let loaded = ReferenceData::from_path(&path).unwrap();
        assert_eq!(&loaded, &*DEFAULT_REFERENCE);
        assert!(!tmp.path().join("reference.yaml.tmp").exists());
    }

    #[test]
    fn test_minimal_yaml_uses_default_model() {
        let yaml = r#"
partners:
  - name: Atlantis
    region: Europe
    trade_volume: 1.0e9
    main_exports: [Steel]
categories:
  - name: Steel
    avg_duty_rate: 15.0
    trade_volume: 3.0e10
policy_events: []
"#;
        let data = ReferenceData::from_yaml_str(yaml).unwrap();
        assert_eq!(data.partners[0].region, Region::Europe);
        assert!(data.overrides.is_empty());
        assert_eq!(data.model, ModelParams::default());
    }

    #[test]
    fn test_validate_flags_bad_entries() {
        let mut data = DEFAULT_REFERENCE.clone();
        data.partners[1].main_exports.clear();
        data.partners.push(data.partners[0].clone());
        data.overrides
            .insert("Atlantis".into(), HistoricalOverride::default());

        let problems = data.validate();
        assert!(problems.contains(&DutyError::invalid("Canada", "empty main exports list")));
        assert!(problems.contains(&DutyError::invalid("China", "duplicate trading partner")));
        assert!(problems.contains(&DutyError::UnknownCountry("Atlantis".into())));
    }

    #[test]
    fn test_validate_flags_bad_category_rates() {
        let mut data = DEFAULT_REFERENCE.clone();
        data.categories[12].avg_duty_rate = f64::NAN; // Steel
        data.categories[13].avg_duty_rate = -1.0; // Aluminum

        let problems = data.validate();
        let entries: Vec<&str> = problems.iter().map(DutyError::entry).collect();
        assert_eq!(entries, vec!["Steel", "Aluminum"]);
    }

    #[test]
    fn test_unknown_region_is_confined_to_its_entry() {
        let yaml = r#"
partners:
  - name: Atlantis
    region: Oceania
    trade_volume: 1.0e9
    main_exports: [Steel]
  - name: Brazil
    region: South America
    trade_volume: 7.0e10
    main_exports: [Agriculture]
categories:
  - name: Steel
    avg_duty_rate: 15.0
    trade_volume: 3.0e10
  - name: Agriculture
    avg_duty_rate: 5.0
    trade_volume: 8.0e10
policy_events: []
"#;
        let data = ReferenceData::from_yaml_str(yaml).unwrap();
        assert_eq!(data.partners[0].region, Region::Unknown);
        assert_eq!(
            data.validate(),
            vec![DutyError::invalid("Atlantis", "unknown region")]
        );
        assert_eq!(data.partner_entry("Brazil").unwrap().0, 1);
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = ReferenceData::from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(format!("{:#}", err).contains("reading reference file"));
    }
}
