// ============================================================
// Layer 5 - Inferencer
// ============================================================
use anyhow::{anyhow, Result};

use crate::domain::sample::SoilSample;
use crate::infra::artifact::{ModelArtifact, ModelStore};

/// A loaded model, ready to answer. Immutable once built, so it
/// can be shared across threads behind an Arc without locking.
#[derive(Debug)]
pub struct Inferencer {
    artifact: ModelArtifact,
}

impl Inferencer {
    pub fn from_store(store: &ModelStore) -> Result<Self> {
        Ok(Self::from_artifact(store.load()?))
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    /// Majority-vote crop label for one sample.
    pub fn predict(&self, sample: &SoilSample) -> Result<&str> {
        let x = sample.to_vector();
        if let Some(pos) = x.iter().position(|v| !v.is_finite()) {
            return Err(anyhow!("feature {} is not a finite number", pos));
        }
        let class = self.artifact.forest.predict(&x);
        self.artifact
            .label(class)
            .ok_or_else(|| anyhow!("forest voted for unknown class {}", class))
    }

    pub fn labels(&self) -> &[String] {
        &self.artifact.labels
    }

    pub fn n_trees(&self) -> usize {
        self.artifact.forest.n_trees()
    }
}
