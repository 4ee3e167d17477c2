// src/report/render.rs

use prettytable::{format, Cell, Row, Table};
use std::collections::BTreeMap;

use super::comparative::ComparativeReport;
use super::country::CountryReport;
use super::global::{GlobalAnalysis, Ranked};
use super::stats::Summary;
use crate::reference::Region;

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(Row::new(
        headers
            .iter()
            .map(|h| Cell::new(h).style_spec("bFg"))
            .collect(),
    ));
    table
}

fn num(value: f64, decimals: usize) -> Cell {
    Cell::new(&format!("{:.*}", decimals, value)).style_spec("r")
}

fn summary_cells(summary: &Summary) -> Vec<Cell> {
    let mut cells = vec![Cell::new(&summary.count.to_string()).style_spec("r")];
    cells.extend(
        [
            summary.mean,
            summary.std,
            summary.min,
            summary.q25,
            summary.median,
            summary.q75,
            summary.max,
        ]
        .into_iter()
        .map(|v| num(v, 2)),
    );
    cells
}

const SUMMARY_HEADERS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

pub fn descriptive_table(rows: &[(&'static str, Summary)]) -> Table {
    let mut headers = vec!["Column"];
    headers.extend(SUMMARY_HEADERS);
    let mut table = new_table(&headers);
    for (name, summary) in rows {
        let mut cells = vec![Cell::new(name)];
        cells.extend(summary_cells(summary));
        table.add_row(Row::new(cells));
    }
    table
}

pub fn ratio_by_region_table(rows: &[(Region, Summary)]) -> Table {
    let mut headers = vec!["Region"];
    headers.extend(SUMMARY_HEADERS);
    let mut table = new_table(&headers);
    for (region, summary) in rows {
        let mut cells = vec![Cell::new(region.as_str())];
        cells.extend(summary_cells(summary));
        table.add_row(Row::new(cells));
    }
    table
}

/// One row per year, one column per region.
pub fn region_year_table(means: &BTreeMap<Region, Vec<(i32, f64)>>, decimals: usize) -> Table {
    let regions: Vec<Region> = means.keys().copied().collect();
    let mut by_year: BTreeMap<i32, Vec<Option<f64>>> = BTreeMap::new();
    for (col, region) in regions.iter().enumerate() {
        for &(year, value) in &means[region] {
            by_year.entry(year).or_insert_with(|| vec![None; regions.len()])[col] = Some(value);
        }
    }

    let mut headers = vec!["Year"];
    headers.extend(regions.iter().map(Region::as_str));
    let mut table = new_table(&headers);
    for (year, values) in by_year {
        let mut cells = vec![Cell::new(&year.to_string())];
        cells.extend(values.into_iter().map(|v| match v {
            Some(v) => num(v, decimals),
            None => Cell::new("-"),
        }));
        table.add_row(Row::new(cells));
    }
    table
}

pub fn ranking_table(ranked: &[Ranked]) -> Table {
    let mut table = new_table(&[
        "#",
        "Country",
        "Region",
        "Duties (M$)",
        "Trade (M$)",
        "Rate (%)",
        "Ratio (%)",
    ]);
    for (i, r) in ranked.iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&(i + 1).to_string()).style_spec("r"),
            Cell::new(&r.country),
            Cell::new(r.region.as_str()),
            num(r.duties_collected, 1),
            num(r.trade_volume, 1),
            num(r.effective_duty_rate, 2),
            num(r.duties_trade_ratio, 3),
        ]));
    }
    table
}

pub fn country_history_table(report: &CountryReport) -> Table {
    let mut table = new_table(&["Year", "Duties (M$)", "Trade (M$)", "Rate (%)", "Ratio (%)"]);
    for &(year, duties, trade, rate, ratio) in &report.history {
        table.add_row(Row::new(vec![
            Cell::new(&year.to_string()),
            num(duties, 1),
            num(trade, 1),
            num(rate, 2),
            num(ratio, 3),
        ]));
    }
    table
}

pub fn policy_table(impacts: &[(i32, f64, String)]) -> Table {
    let mut table = new_table(&["Year", "Change (pts)", "Event"]);
    for (year, change, description) in impacts {
        table.add_row(Row::new(vec![
            Cell::new(&year.to_string()),
            Cell::new(&format!("{:+.1}", change)).style_spec("r"),
            Cell::new(description),
        ]));
    }
    table
}

pub fn shares_table(shares: &[(String, f64)]) -> Table {
    let mut table = new_table(&["Country", "Share of duties (%)"]);
    for (country, share) in shares {
        table.add_row(Row::new(vec![Cell::new(country), num(*share, 1)]));
    }
    table
}

/// Country columns for one indicator, one row per year.
pub fn indicator_table(per_country: &[(String, Vec<(i32, f64)>)]) -> Table {
    let mut by_year: BTreeMap<i32, Vec<Option<f64>>> = BTreeMap::new();
    for (col, (_, series)) in per_country.iter().enumerate() {
        for &(year, value) in series {
            by_year.entry(year).or_insert_with(|| vec![None; per_country.len()])[col] =
                Some(value);
        }
    }

    let mut headers = vec!["Year"];
    headers.extend(per_country.iter().map(|(c, _)| c.as_str()));
    let mut table = new_table(&headers);
    for (year, values) in by_year {
        let mut cells = vec![Cell::new(&year.to_string())];
        cells.extend(values.into_iter().map(|v| match v {
            Some(v) => num(v, 2),
            None => Cell::new("-"),
        }));
        table.add_row(Row::new(cells));
    }
    table
}

pub fn print_global(analysis: &GlobalAnalysis) {
    println!("\nDescriptive statistics");
    descriptive_table(&analysis.descriptive).printstd();
    println!("\nMean duties collected by region (M$)");
    region_year_table(&analysis.region_duties, 1).printstd();
    println!("\nMean effective duty rate by region (%)");
    region_year_table(&analysis.region_rates, 2).printstd();
    println!("\nDuties/trade ratio by region (%)");
    ratio_by_region_table(&analysis.ratio_by_region).printstd();
    println!(
        "\nTop {} countries by duties collected in {}",
        analysis.top_duties.len(),
        analysis.latest_year
    );
    ranking_table(&analysis.top_duties).printstd();
}

pub fn print_country(report: &CountryReport) {
    println!(
        "\n{} ({}), main exports: {}",
        report.country, report.region, report.main_exports
    );
    println!(
        "  {}: duties {:.1} M$, trade {:.1} M$, rate {:.2}%, ratio {:.3}%",
        report.latest_year,
        report.latest.duties_collected,
        report.latest.trade_volume,
        report.latest.effective_duty_rate,
        report.latest.duties_trade_ratio
    );
    println!(
        "  {} average: rate {:.2}%, ratio {:.3}%",
        report.region, report.region_avg_rate, report.region_avg_ratio
    );
    println!(
        "  duties max {:.1} M$ ({}), min {:.1} M$ ({}), mean {:.1} M$",
        report.duty_max.1, report.duty_max.0, report.duty_min.1, report.duty_min.0, report.duty_mean
    );
    country_history_table(report).printstd();
    println!("\nPolicy events");
    policy_table(&report.policy_impacts).printstd();
    println!("\nTop countries in {} ({})", report.region, report.latest_year);
    ranking_table(&report.regional_top).printstd();
}

pub fn print_comparative(report: &ComparativeReport) {
    if !report.missing.is_empty() {
        println!("\nNot in dataset: {}", report.missing.join(", "));
    }
    let Some(year) = report.latest_year else {
        println!("\nNo countries to compare");
        return;
    };
    println!("\nComparison for {}", year);
    ranking_table(&report.latest).printstd();
    shares_table(&report.duty_shares).printstd();
    for (name, per_country) in &report.indicators {
        println!("\n{}", name);
        indicator_table(per_country).printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(country: &str, duties: f64) -> Ranked {
        Ranked {
            country: country.into(),
            region: Region::Asia,
            duties_collected: duties,
            trade_volume: 1000.0,
            effective_duty_rate: 2.0,
            duties_trade_ratio: duties / 10.0,
        }
    }

    #[test]
    fn test_region_year_table_fills_gaps() {
        let mut means = BTreeMap::new();
        means.insert(Region::Asia, vec![(2024, 1.0), (2025, 2.0)]);
        means.insert(Region::Europe, vec![(2025, 3.0)]);
        let table = region_year_table(&means, 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_row(0).unwrap().len(), 3);
        assert_eq!(table.get_row(0).unwrap().get_cell(2).unwrap().get_content(), "-");
    }

    #[test]
    fn test_ranking_and_shares_tables() {
        let rows = vec![ranked("A", 30.0), ranked("B", 10.0)];
        let table = ranking_table(&rows);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_row(1).unwrap().get_cell(0).unwrap().get_content(), "2");
        assert_eq!(shares_table(&[("A".into(), 75.0)]).len(), 1);
    }

    #[test]
    fn test_descriptive_table() {
        let summary = Summary::of([1.0, 2.0, 3.0]).unwrap();
        let table = descriptive_table(&[("x", summary), ("y", summary)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_row(0).unwrap().len(), 9);
    }

    #[test]
    fn test_indicator_table() {
        let per_country = vec![
            ("A".to_string(), vec![(2024, 1.0), (2025, 2.0)]),
            ("B".to_string(), vec![(2023, 5.0)]),
        ];
        let table = indicator_table(&per_country);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get_row(0).unwrap().get_cell(1).unwrap().get_content(), "-");
        assert_eq!(table.get_row(0).unwrap().get_cell(2).unwrap().get_content(), "5.00");
    }
}
