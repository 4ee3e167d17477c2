pub mod dataset;
pub mod error;
pub mod export;
pub mod reference;
pub mod report;
pub mod series;

pub use dataset::{Dataset, DatasetRow};
pub use error::DutyError;
pub use reference::{ReferenceData, DEFAULT_REFERENCE};
pub use series::{CountrySeries, SeriesGenerator};
