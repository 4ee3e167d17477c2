// src/export/parquet.rs

use anyhow::{Context, Result};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path,
};

use crate::dataset::arrow::{dataset_schema, rows_from_record_batch, to_record_batch};
use crate::dataset::Dataset;

/// Write the dataset as a single Snappy-compressed Parquet file.
pub fn write_parquet<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("parquet.tmp");

    let batch = to_record_batch(dataset)?;
    let file = File::create(&tmp_path)
        .with_context(|| format!("creating {}", tmp_path.display()))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(BufWriter::new(file), dataset_schema(), Some(props))
        .context("creating Arrow writer for dataset")?;
    writer.write(&batch).context("writing dataset batch")?;
    writer.close().context("closing dataset writer")?;

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;
    Ok(())
}

/// Read a Parquet export back into a dataset.
pub fn read_parquet<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let mut reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(1024)
        .build()?;

    let mut rows = Vec::new();
    while let Some(batch) = reader.next().transpose()? {
        rows.extend(rows_from_record_batch(&batch)?);
    }
    Ok(Dataset::from_rows(rows))
}
