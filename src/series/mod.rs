pub mod generator;
pub mod model;
pub mod noise;
pub mod yearly;

pub use generator::{CountrySeries, Metric, SeriesGenerator, SeriesSource};
pub use model::ModelParams;
pub use noise::{country_seed, MeanNoise, NoiseSource, RngNoise};
pub use yearly::{year_count, years, YearlySeries, FIRST_YEAR, LAST_YEAR};
