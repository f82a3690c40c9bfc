// ============================================================
// Layer 4 - CSV Loader
// ============================================================
// Loads the labelled crop dataset from a delimited file using
// the csv crate.
//
// Expected header (any column order, names must match):
//   N,P,K,temperature,humidity,ph,rainfall,label
//
// Columns are matched by name through serde, so a file whose
// columns are reordered still loads correctly. A missing
// column or an unparsable cell fails the whole load with the
// row number in the error chain.
//
// Reference: csv crate documentation (serde deserialisation)
//            Rust Book §9 (Error Handling)

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::sample::{LabeledSample, SoilSample};
use crate::domain::traits::SampleSource;

/// Raw row as it appears in the file. Kept private so the rest
/// of the crate only ever sees LabeledSample.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "N")]
    nitrogen:    f64,
    #[serde(rename = "P")]
    phosphorus:  f64,
    #[serde(rename = "K")]
    potassium:   f64,
    temperature: f64,
    humidity:    f64,
    ph:          f64,
    rainfall:    f64,
    label:       String,
}

impl From<CsvRow> for LabeledSample {
    fn from(r: CsvRow) -> Self {
        let sample = SoilSample {
            nitrogen:    r.nitrogen,
            phosphorus:  r.phosphorus,
            potassium:   r.potassium,
            temperature: r.temperature,
            humidity:    r.humidity,
            ph:          r.ph,
            rainfall:    r.rainfall,
        };
        LabeledSample::new(sample, r.label.trim())
    }
}

/// Reads labelled samples from one CSV file.
/// Implements the SampleSource trait from Layer 3.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl SampleSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<LabeledSample>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;

        let mut samples = Vec::new();

        for (i, record) in reader.deserialize::<CsvRow>().enumerate() {
            // +2: one for the header, one for 1-based line numbers
            let row = record.with_context(|| {
                format!("Invalid row at line {} of '{}'", i + 2, self.path.display())
            })?;
            samples.push(LabeledSample::from(row));
        }

        if samples.is_empty() {
            bail!("Dataset '{}' contains no rows", self.path.display());
        }

        tracing::info!("Loaded {} samples from '{}'", samples.len(), self.path.display());
        Ok(samples)
    }
}
