// ============================================================
// Layer 2 - PredictUseCase
// ============================================================
// Loads the model artifact once and answers recommendations
// from memory for the rest of the process lifetime. Used by
// both the one-shot `predict` command and the HTTP service.

use anyhow::Result;
use std::path::Path;

use crate::domain::sample::SoilSample;
use crate::domain::traits::CropRecommender;
use crate::infra::artifact::ModelStore;
use crate::ml::inferencer::Inferencer;

pub struct PredictUseCase {
    inferencer: Inferencer,
}

impl PredictUseCase {
    /// Read the artifact from `model_path`. Fails if it is
    /// missing, corrupt, or built for a different feature schema.
    pub fn load(model_path: impl AsRef<Path>) -> Result<Self> {
        let store      = ModelStore::new(model_path);
        let inferencer = Inferencer::from_store(&store)?;
        Ok(Self { inferencer })
    }

    pub fn from_inferencer(inferencer: Inferencer) -> Self {
        Self { inferencer }
    }
}

impl CropRecommender for PredictUseCase {
    fn recommend(&self, sample: &SoilSample) -> Result<String> {
        let crop = self.inferencer.predict(sample)?;
        tracing::debug!(?sample, crop, "Prediction");
        Ok(crop.to_string())
    }

    fn labels(&self) -> &[String] {
        self.inferencer.labels()
    }

    fn ensemble_size(&self) -> usize {
        self.inferencer.n_trees()
    }
}
