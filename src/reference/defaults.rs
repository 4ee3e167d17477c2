// src/reference/defaults.rs

use std::collections::BTreeMap;

use super::types::{HistoricalOverride, PolicyEvent, ProductCategory, Region, TradingPartner};
use super::ReferenceData;
use crate::series::{ModelParams, YearlySeries};

/// (name, region, trade volume USD, main exports), largest partners first.
static PARTNERS: &[(&str, Region, f64, [&str; 3])] = &[
    ("China", Region::Asia, 650e9, ["Electronics", "Machinery", "Textiles"]),
    ("Canada", Region::NorthAmerica, 580e9, ["Energy", "Vehicles", "Machinery"]),
    ("Mexico", Region::NorthAmerica, 550e9, ["Vehicles", "Electronics", "Agriculture"]),
    ("Japan", Region::Asia, 200e9, ["Vehicles", "Machinery", "Electronics"]),
    ("Germany", Region::Europe, 170e9, ["Vehicles", "Machinery", "Chemicals"]),
    ("South Korea", Region::Asia, 120e9, ["Electronics", "Vehicles", "Machinery"]),
    ("United Kingdom", Region::Europe, 110e9, ["Machinery", "Chemicals", "Vehicles"]),
    ("India", Region::Asia, 90e9, ["Pharmaceuticals", "Textiles", "IT Services"]),
    ("France", Region::Europe, 80e9, ["Aerospace", "Chemicals", "Luxury Goods"]),
    ("Brazil", Region::SouthAmerica, 70e9, ["Agriculture", "Minerals", "Energy"]),
    ("Vietnam", Region::Asia, 65e9, ["Electronics", "Textiles", "Footwear"]),
    ("Italy", Region::Europe, 60e9, ["Machinery", "Fashion", "Automotive"]),
    ("Taiwan", Region::Asia, 55e9, ["Electronics", "Machinery", "Plastics"]),
    ("Ireland", Region::Europe, 50e9, ["Pharmaceuticals", "Software", "Medical Devices"]),
    ("Switzerland", Region::Europe, 45e9, ["Pharmaceuticals", "Watches", "Machinery"]),
];

/// (name, average duty rate %, trade volume USD)
static CATEGORIES: &[(&str, f64, f64)] = &[
    ("Electronics", 3.5, 350e9),
    ("Vehicles", 2.5, 250e9),
    ("Machinery", 2.0, 200e9),
    ("Textiles", 8.5, 120e9),
    ("Chemicals", 3.0, 100e9),
    ("Pharmaceuticals", 0.5, 90e9),
    ("Agriculture", 5.0, 80e9),
    ("Energy", 2.0, 70e9),
    ("Aerospace", 1.5, 60e9),
    ("Plastics", 4.0, 50e9),
    ("Footwear", 10.0, 40e9),
    ("Furniture", 4.5, 35e9),
    ("Steel", 15.0, 30e9),
    ("Aluminum", 10.0, 25e9),
    ("Luxury Goods", 3.5, 20e9),
];

static POLICY_EVENTS: &[(i32, &str, f64)] = &[
    (2002, "Normal Trade Relations", 0.0),
    (2009, "Obama Administration - Moderate", -0.2),
    (2016, "Trump Election - Protectionist Shift", 0.5),
    (2018, "Trade War with China Begins", 2.0),
    (2019, "Escalation of Trade War", 3.0),
    (2020, "Phase One Deal with China", -1.0),
    (2021, "Biden Administration - Review", 0.0),
    (2022, "Inflation Reduction Act", 0.5),
    (2023, "De-escalation with EU", -0.5),
    (2024, "Renewed Focus on Strategic Goods", 0.3),
    (2025, "Projected Policy Stability", 0.0),
];

// Literal series, 2002..=2025, M$ for amounts and % for rates.

const CHINA_DUTIES: [f64; 24] = [
    2500.0, 2700.0, 2900.0, 3200.0, 3500.0, 3800.0, 4000.0, 3500.0, 4200.0, 4500.0, 4800.0,
    5200.0, 5500.0, 5800.0, 6000.0, 6500.0, 12000.0, 18000.0, 15000.0, 14500.0, 16000.0, 15500.0,
    16500.0, 17000.0,
];
const CHINA_TRADE: [f64; 24] = [
    150000.0, 180000.0, 220000.0, 250000.0, 280000.0, 320000.0, 350000.0, 300000.0, 380000.0,
    420000.0, 480000.0, 520000.0, 550000.0, 580000.0, 600000.0, 650000.0, 700000.0, 650000.0,
    600000.0, 680000.0, 720000.0, 750000.0, 780000.0, 800000.0,
];
const CHINA_RATE: [f64; 24] = [
    2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 6.0, 9.0, 7.5,
    7.0, 7.5, 7.0, 7.2, 7.2,
];

const CANADA_DUTIES: [f64; 24] = [
    1800.0, 1900.0, 2000.0, 2100.0, 2200.0, 2300.0, 2400.0, 2200.0, 2500.0, 2600.0, 2700.0,
    2800.0, 2900.0, 3000.0, 3100.0, 3200.0, 3300.0, 3400.0, 3200.0, 3300.0, 3500.0, 3600.0,
    3700.0, 3800.0,
];
const CANADA_TRADE: [f64; 24] = [
    350000.0, 370000.0, 390000.0, 410000.0, 430000.0, 450000.0, 470000.0, 420000.0, 480000.0,
    500000.0, 520000.0, 540000.0, 560000.0, 580000.0, 600000.0, 620000.0, 640000.0, 660000.0,
    620000.0, 650000.0, 680000.0, 700000.0, 720000.0, 740000.0,
];
const CANADA_RATE: [f64; 24] = [0.5; 24];

const MEXICO_DUTIES: [f64; 24] = [
    1500.0, 1600.0, 1700.0, 1800.0, 1900.0, 2000.0, 2100.0, 1900.0, 2200.0, 2300.0, 2400.0,
    2500.0, 2600.0, 2700.0, 2800.0, 2900.0, 3000.0, 3100.0, 2900.0, 3000.0, 3200.0, 3300.0,
    3400.0, 3500.0,
];

fn literal(values: &[f64; 24]) -> Option<YearlySeries> {
    Some(YearlySeries::from_values(values))
}

pub(super) fn builtin() -> ReferenceData {
    let partners = PARTNERS
        .iter()
        .map(|(name, region, volume, exports)| TradingPartner {
            name: name.to_string(),
            region: *region,
            trade_volume: *volume,
            main_exports: exports.iter().map(|e| e.to_string()).collect(),
        })
        .collect();

    let categories = CATEGORIES
        .iter()
        .map(|(name, rate, volume)| ProductCategory {
            name: name.to_string(),
            avg_duty_rate: *rate,
            trade_volume: *volume,
        })
        .collect();

    let policy_events = POLICY_EVENTS
        .iter()
        .map(|(year, description, change)| PolicyEvent {
            year: *year,
            description: description.to_string(),
            avg_duty_change: *change,
        })
        .collect();

    let mut overrides = BTreeMap::new();
    overrides.insert(
        "China".to_string(),
        HistoricalOverride {
            duties_collected: literal(&CHINA_DUTIES),
            trade_volume: literal(&CHINA_TRADE),
            effective_duty_rate: literal(&CHINA_RATE),
        },
    );
    overrides.insert(
        "Canada".to_string(),
        HistoricalOverride {
            duties_collected: literal(&CANADA_DUTIES),
            trade_volume: literal(&CANADA_TRADE),
            effective_duty_rate: literal(&CANADA_RATE),
        },
    );
    overrides.insert(
        "Mexico".to_string(),
        HistoricalOverride {
            duties_collected: literal(&MEXICO_DUTIES),
            ..Default::default()
        },
    );

    ReferenceData {
        partners,
        categories,
        policy_events,
        overrides,
        model: ModelParams::default(),
    }
}
