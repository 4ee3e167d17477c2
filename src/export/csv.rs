// src/export/csv.rs

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::{fs, path::Path};

use crate::dataset::{Dataset, DatasetRow, COLUMNS};

/// Write the dataset as CSV: header row, then one row per (country, year).
pub fn write_csv<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("csv.tmp");

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(&tmp_path)
        .with_context(|| format!("creating {}", tmp_path.display()))?;
    wtr.write_record(COLUMNS).context("writing CSV header")?;
    for row in dataset.rows() {
        wtr.serialize(row)
            .with_context(|| format!("writing CSV row {} {}", row.country(), row.year()))?;
    }
    wtr.flush().context("flushing CSV writer")?;
    drop(wtr);

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;
    Ok(())
}

/// Read a CSV export back into a dataset, keeping the stored ratio column.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let rows = rdr
        .deserialize::<DatasetRow>()
        .enumerate()
        .map(|(idx, rec)| rec.with_context(|| format!("parsing {} record {}", path.display(), idx)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Dataset::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Region;
    use tempfile::tempdir;

    #[test]
    fn test_header_and_rows() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("out.csv");
        let ds = Dataset::from_rows(vec![DatasetRow::new(
            "South Korea",
            Region::Asia,
            2002,
            1000.0,
            120_000.0,
            3.5,
            "Electronics, Vehicles, Machinery",
        )]);
        write_csv(&ds, &path)?;

        let text = fs::read_to_string(&path)?;
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(COLUMNS.join(",").as_str()));
        let data = lines.next().unwrap();
        assert!(data.starts_with(
            "South Korea,Asia,2002,1000.0,120000.0,3.5,\"Electronics, Vehicles, Machinery\","
        ));
        assert!(lines.next().is_none());
        assert!(!tmp.path().join("out.csv.tmp").exists());

        let back = read_csv(&path)?;
        assert_eq!(back, ds);
        Ok(())
    }

    #[test]
    fn test_empty_dataset_still_has_header() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("empty.csv");
        write_csv(&Dataset::default(), &path)?;
        assert_eq!(fs::read_to_string(&path)?.lines().count(), 1);
        assert!(read_csv(&path)?.is_empty());
        Ok(())
    }
}
