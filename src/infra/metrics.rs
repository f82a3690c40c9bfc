// ============================================================
// Layer 6 - Metrics Logger
// ============================================================
// Appends one row per training run to a CSV file so successive
// runs can be compared.
//
// Metrics recorded per run:
//   - timestamp_unix:   when training finished
//   - trees:            forest size
//   - train_rows:       rows the forest was grown on
//   - test_rows:        rows held out
//   - labels:           number of distinct crops
//   - holdout_accuracy: fraction of test rows predicted
//                       correctly (blank when test_rows = 0)
//
// Output file: <metrics-dir>/metrics.csv
//
// Example CSV output:
//   timestamp_unix,trees,train_rows,test_rows,labels,holdout_accuracy
//   1760890000,100,1760,440,22,0.993182
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

const HEADER: &str = "timestamp_unix,trees,train_rows,test_rows,labels,holdout_accuracy";

/// One row of metrics for a single training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingMetrics {
    pub timestamp_unix:   u64,
    pub trees:            usize,
    pub train_rows:       usize,
    pub test_rows:        usize,
    pub labels:           usize,
    pub holdout_accuracy: Option<f64>,
}

impl TrainingMetrics {
    /// Stamp a new record with the current time
    pub fn now(
        trees:            usize,
        train_rows:       usize,
        test_rows:        usize,
        labels:           usize,
        holdout_accuracy: Option<f64>,
    ) -> Self {
        let timestamp_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Self { timestamp_unix, trees, train_rows, test_rows, labels, holdout_accuracy }
    }

    fn to_csv_row(&self) -> String {
        let acc = self
            .holdout_accuracy
            .map(|a| format!("{a:.6}"))
            .unwrap_or_default();
        format!(
            "{},{},{},{},{},{}",
            self.timestamp_unix, self.trees, self.train_rows, self.test_rows, self.labels, acc
        )
    }
}

/// Logs run metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the directory and write the CSV header if the
    /// file doesn't exist yet. Existing files are appended to.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one run's metrics as a new row.
    pub fn log(&self, m: &TrainingMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;
        writeln!(f, "{}", m.to_csv_row())?;

        tracing::debug!("Logged training metrics to '{}'", self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}
