// src/export/manifest.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::dataset::Assembly;

/// Summary of one generation run, written next to the exported data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub generated_at: DateTime<Utc>,
    /// Base seed; per-country seeds are derived from it.
    pub seed: u64,
    pub rows: usize,
    pub countries: Vec<String>,
    /// `entry: reason` for every country left out.
    pub skipped: Vec<String>,
    pub violations: usize,
    pub artifacts: Vec<PathBuf>,
}

impl RunManifest {
    pub fn new(assembly: &Assembly, seed: u64, violations: usize, artifacts: Vec<PathBuf>) -> Self {
        Self {
            generated_at: Utc::now(),
            seed,
            rows: assembly.dataset.len(),
            countries: assembly
                .dataset
                .countries()
                .into_iter()
                .map(str::to_string)
                .collect(),
            skipped: assembly.skipped.iter().map(|e| e.to_string()).collect(),
            violations,
            artifacts,
        }
    }

    /// Pretty-print to `path` through a temp file renamed into place.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("json.tmp");
        let mut tmp = fs::File::create(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;
        serde_json::to_writer_pretty(&mut tmp, self).context("serializing run manifest")?;
        tmp.write_all(b"\n")?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;
        Ok(())
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        serde_json::from_reader(f).with_context(|| format!("parsing {}", path.display()))
    }
}
