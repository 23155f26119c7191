// ============================================================
// Layer 2 — Prepare Use Case
// ============================================================
// Turns one review dump into the three files `load` expects:
//
//   Step 1: Read the input JSON-lines file      (Layer 4 - data)
//   Step 2: Seeded shuffle + three-way split    (Layer 4 - data)
//   Step 3: Write train.json / val.json / test.json
//
// Only the four review keys survive the rewrite.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::load_use_case::{TEST_FILE, TRAIN_FILE, VAL_FILE};
use crate::data::{
    loader::{write_json_lines, JsonLinesSource},
    splitter::split_dataset,
};
use crate::domain::traits::RecordSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub input:         PathBuf,
    pub out_dir:       PathBuf,
    pub val_fraction:  f64,
    pub test_fraction: f64,
    pub seed:          u64,
}

/// How many records went into each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitCounts {
    pub train: usize,
    pub val:   usize,
    pub test:  usize,
}

pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<SplitCounts> {
        let cfg = &self.config;

        tracing::info!("Reading reviews from '{}'", cfg.input.display());
        let records = JsonLinesSource::new(&cfg.input).load_all()?;

        let splits = split_dataset(records, cfg.val_fraction, cfg.test_fraction, cfg.seed)?;

        fs::create_dir_all(&cfg.out_dir)
            .with_context(|| format!("Cannot create '{}'", cfg.out_dir.display()))?;
        write_json_lines(&cfg.out_dir.join(TRAIN_FILE), &splits.train)?;
        write_json_lines(&cfg.out_dir.join(VAL_FILE),   &splits.val)?;
        write_json_lines(&cfg.out_dir.join(TEST_FILE),  &splits.test)?;

        let counts = SplitCounts {
            train: splits.train.len(),
            val:   splits.val.len(),
            test:  splits.test.len(),
        };
        tracing::info!(
            "Wrote {} train, {} val, {} test reviews to '{}'",
            counts.train,
            counts.val,
            counts.test,
            cfg.out_dir.display()
        );
        Ok(counts)
    }
}
