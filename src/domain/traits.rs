// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The application and HTTP layers talk to these traits rather
// than to the CSV loader or the forest directly:
//   - CsvLoader implements SampleSource
//   - PredictUseCase implements CropRecommender
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::sample::{LabeledSample, SoilSample};

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can produce labelled training rows.
pub trait SampleSource {
    /// Load every labelled sample available from this source.
    fn load_all(&self) -> Result<Vec<LabeledSample>>;
}

// ─── CropRecommender ──────────────────────────────────────────────────────────
/// Any component that can name a crop for a soil sample.
///
/// Shared across request handlers, so it must be thread safe
/// and must not mutate itself while answering.
pub trait CropRecommender: Send + Sync {
    /// Return the recommended crop label for `sample`.
    fn recommend(&self, sample: &SoilSample) -> Result<String>;

    /// Every label this recommender can return, in index order.
    fn labels(&self) -> &[String];

    /// Number of voting trees behind each recommendation.
    fn ensemble_size(&self) -> usize;
}
