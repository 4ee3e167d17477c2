// src/export/mod.rs

use anyhow::{bail, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

pub mod csv;
pub mod manifest;
pub mod parquet;

pub use self::csv::{read_csv, write_csv};
pub use self::manifest::RunManifest;
pub use self::parquet::{read_parquet, write_parquet};

use crate::dataset::Dataset;

/// File stem shared by every export of the dataset.
pub const DATASET_STEM: &str = "us_customs_duty_data_2002_2025";
pub const MANIFEST_NAME: &str = "manifest.json";

/// Which table formats to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Parquet,
    All,
}

impl ExportFormat {
    fn csv(self) -> bool {
        matches!(self, ExportFormat::Csv | ExportFormat::All)
    }

    fn parquet(self) -> bool {
        matches!(self, ExportFormat::Parquet | ExportFormat::All)
    }
}

/// Write the dataset into `out_dir`, returning the paths written.
pub fn export_dataset<P: AsRef<Path>>(
    dataset: &Dataset,
    out_dir: P,
    format: ExportFormat,
) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    if format.csv() {
        let path = out_dir.join(format!("{}.csv", DATASET_STEM));
        write_csv(dataset, &path)?;
        info!(path = %path.display(), rows = dataset.len(), "wrote CSV");
        written.push(path);
    }
    if format.parquet() {
        let path = out_dir.join(format!("{}.parquet", DATASET_STEM));
        write_parquet(dataset, &path)?;
        info!(path = %path.display(), rows = dataset.len(), "wrote Parquet");
        written.push(path);
    }
    Ok(written)
}

/// Load an export, choosing the reader by file extension.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref() {
        Some("csv") => read_csv(path),
        Some("parquet") => read_parquet(path),
        _ => bail!("unsupported export file {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::DEFAULT_REFERENCE;
    use crate::series::{MeanNoise, SeriesGenerator};
    use tempfile::tempdir;

    #[test]
    fn test_export_all_formats() -> Result<()> {
        let generator = SeriesGenerator::new(&DEFAULT_REFERENCE);
        let ds = crate::dataset::assemble(&generator, |_| MeanNoise).dataset;

        let tmp = tempdir()?;
        let out = tmp.path().join("nested/out");
        let written = export_dataset(&ds, &out, ExportFormat::All)?;
        assert_eq!(
            written,
            vec![
                out.join("us_customs_duty_data_2002_2025.csv"),
                out.join("us_customs_duty_data_2002_2025.parquet"),
            ]
        );

        let from_csv = read_dataset(&written[0])?;
        let from_parquet = read_dataset(&written[1])?;
        assert_eq!(from_csv.len(), 360);
        assert_eq!(from_csv, from_parquet);
        assert!(from_csv.validate().is_empty());
        Ok(())
    }

    #[test]
    fn test_csv_only_and_bad_extension() -> Result<()> {
        let tmp = tempdir()?;
        let written = export_dataset(&Dataset::default(), tmp.path(), ExportFormat::Csv)?;
        assert_eq!(written.len(), 1);
        assert!(read_dataset(tmp.path().join("x.xlsx")).is_err());
        Ok(())
    }
}
