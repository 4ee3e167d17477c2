// src/report/mod.rs

pub mod comparative;
pub mod country;
pub mod global;
pub mod render;
pub mod stats;

pub use comparative::ComparativeReport;
pub use country::CountryReport;
pub use global::{top_by_duties, GlobalAnalysis, Ranked};
pub use stats::Summary;
