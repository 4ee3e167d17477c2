// src/report/comparative.rs

use super::global::Ranked;
use crate::dataset::{Dataset, DatasetRow, COLUMNS};

/// Side-by-side view of several countries.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparativeReport {
    /// Requested countries present in the dataset, in request order.
    pub countries: Vec<String>,
    /// Requested countries absent from the dataset.
    pub missing: Vec<String>,
    pub latest_year: Option<i32>,
    /// Latest-year indicators, one entry per present country.
    pub latest: Vec<Ranked>,
    /// Share of latest-year duties per country, in percent.
    pub duty_shares: Vec<(String, f64)>,
    /// Column header → (country → yearly values), for the four indicators.
    pub indicators: Vec<(&'static str, Vec<(String, Vec<(i32, f64)>)>)>,
}

impl ComparativeReport {
    pub fn build(dataset: &Dataset, requested: &[String]) -> Self {
        let (countries, missing): (Vec<String>, Vec<String>) = requested
            .iter()
            .cloned()
            .partition(|c| dataset.contains_country(c));

        let latest_year = countries
            .iter()
            .flat_map(|c| dataset.for_country(c))
            .map(DatasetRow::year)
            .max();

        let latest: Vec<Ranked> = match latest_year {
            Some(year) => countries
                .iter()
                .filter_map(|c| dataset.for_country(c).find(|r| r.year() == year))
                .map(Ranked::from)
                .collect(),
            None => Vec::new(),
        };

        let indicators = [
            (COLUMNS[3], DatasetRow::duties_collected as fn(&DatasetRow) -> f64),
            (COLUMNS[4], DatasetRow::trade_volume),
            (COLUMNS[5], DatasetRow::effective_duty_rate),
            (COLUMNS[7], DatasetRow::duties_trade_ratio),
        ]
        .into_iter()
        .map(|(name, get)| {
            let per_country = countries
                .iter()
                .map(|c| {
                    let series = dataset.for_country(c).map(|r| (r.year(), get(r))).collect();
                    (c.clone(), series)
                })
                .collect();
            (name, per_country)
        })
        .collect();

        Self {
            duty_shares: duty_shares(&latest),
            countries,
            missing,
            latest_year,
            latest,
            indicators,
        }
    }
}

/// Percent share of total duties per entry; all zero when the total is not positive.
pub fn duty_shares(latest: &[Ranked]) -> Vec<(String, f64)> {
    let total: f64 = latest.iter().map(|r| r.duties_collected).sum();
    latest
        .iter()
        .map(|r| {
            let share = if total > 0.0 {
                r.duties_collected / total * 100.0
            } else {
                0.0
            };
            (r.country.clone(), share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Region;

    fn dataset() -> Dataset {
        Dataset::from_rows(vec![
            DatasetRow::new("Germany", Region::Europe, 2024, 100.0, 10_000.0, 2.0, "x"),
            DatasetRow::new("Germany", Region::Europe, 2025, 300.0, 10_000.0, 2.0, "x"),
            DatasetRow::new("Japan", Region::Asia, 2024, 200.0, 10_000.0, 2.5, "x"),
            DatasetRow::new("Japan", Region::Asia, 2025, 100.0, 10_000.0, 2.5, "x"),
        ])
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_comparative_with_missing_country() {
        let report =
            ComparativeReport::build(&dataset(), &names(&["Japan", "Atlantis", "Germany"]));
        assert_eq!(report.countries, names(&["Japan", "Germany"]));
        assert_eq!(report.missing, names(&["Atlantis"]));
        assert_eq!(report.latest_year, Some(2025));
        assert_eq!(
            report.duty_shares,
            vec![("Japan".to_string(), 25.0), ("Germany".to_string(), 75.0)]
        );
        assert_eq!(report.indicators.len(), 4);
        let (name, per_country) = &report.indicators[0];
        assert_eq!(*name, "Duties Collected (M$)");
        assert_eq!(per_country[0].1, vec![(2024, 200.0), (2025, 100.0)]);
    }

    #[test]
    fn test_empty_and_single_lists_do_not_divide_by_zero() {
        let empty = ComparativeReport::build(&dataset(), &[]);
        assert!(empty.latest.is_empty());
        assert!(empty.duty_shares.is_empty());
        assert_eq!(empty.latest_year, None);

        let single = ComparativeReport::build(&dataset(), &names(&["Japan"]));
        assert_eq!(single.duty_shares, vec![("Japan".to_string(), 100.0)]);

        let zero = vec![Ranked {
            country: "Nowhere".into(),
            region: Region::Europe,
            duties_collected: 0.0,
            trade_volume: 100.0,
            effective_duty_rate: 0.1,
            duties_trade_ratio: 0.0,
        }];
        assert_eq!(duty_shares(&zero), vec![("Nowhere".to_string(), 0.0)]);
    }
}
