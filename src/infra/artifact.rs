// ============================================================
// Layer 6 - Model Artifact Store
// ============================================================
// Saves and restores the trained forest as one binary file.
//
// File layout (bincode, fixed-width little-endian integers):
//   ArtifactHeader   magic b"CROP" + format version
//   ModelArtifact    feature names, label vocabulary, forest
//
// The header is decoded on its own first, so a file written by
// a different format version is rejected with a clear message
// instead of a confusing decode error halfway through the trees.
//
// The payload records the feature names the forest was trained
// on. Loading compares them with FEATURE_NAMES: a model built
// for a different column order fails at startup rather than
// silently predicting from shuffled inputs.
//
// Saving overwrites any existing file at the path.
//
// Reference: bincode crate documentation (Options)
//            Rust Book §9 (Error Handling)

use anyhow::{bail, ensure, Context, Result};
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::domain::sample::FEATURE_NAMES;
use crate::ml::forest::RandomForest;

pub const ARTIFACT_MAGIC: [u8; 4] = *b"CROP";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ArtifactHeader {
    magic:   [u8; 4],
    version: u32,
}

/// Everything the service needs to answer requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Column names in the order the forest consumes them
    pub feature_names: Vec<String>,
    /// Class index → crop label
    pub labels:        Vec<String>,
    pub forest:        RandomForest,
}

impl ModelArtifact {
    pub fn new(labels: Vec<String>, forest: RandomForest) -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            labels,
            forest,
        }
    }

    /// Label for a class index
    pub fn label(&self, class: usize) -> Option<&str> {
        self.labels.get(class).map(String::as_str)
    }

    /// Check the artifact is consistent and matches this build's
    /// feature schema.
    pub fn validate(&self) -> Result<()> {
        if self.feature_names != FEATURE_NAMES {
            bail!(
                "model was trained on features {:?}, expected {:?}",
                self.feature_names,
                FEATURE_NAMES
            );
        }
        ensure!(!self.labels.is_empty(), "model has an empty label vocabulary");
        ensure!(
            self.labels.len() == self.forest.num_classes(),
            "model has {} labels but the forest votes over {} classes",
            self.labels.len(),
            self.forest.num_classes()
        );
        self.forest.validate()
    }
}

/// Deterministic binary codec: same artifact, same bytes.
fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .allow_trailing_bytes()
}

/// Reads and writes the model artifact at one fixed path.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Write the artifact, creating parent directories as needed.
    pub fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Cannot create directory '{}'", parent.display())
                })?;
            }
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Cannot create model file '{}'", self.path.display()))?;
        let mut writer = BufWriter::new(file);

        let header = ArtifactHeader { magic: ARTIFACT_MAGIC, version: FORMAT_VERSION };
        codec()
            .serialize_into(&mut writer, &header)
            .context("Failed to encode model header")?;
        codec()
            .serialize_into(&mut writer, artifact)
            .context("Failed to encode model payload")?;
        writer
            .flush()
            .with_context(|| format!("Failed to write '{}'", self.path.display()))?;

        tracing::info!(
            "Saved model ({} trees, {} labels) to '{}'",
            artifact.forest.n_trees(),
            artifact.labels.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Read and validate the artifact.
    pub fn load(&self) -> Result<ModelArtifact> {
        let file = File::open(&self.path).with_context(|| {
            format!(
                "Cannot open model file '{}'. Have you run 'train' first?",
                self.path.display()
            )
        })?;
        let mut reader = BufReader::new(file);

        let header: ArtifactHeader = codec()
            .deserialize_from(&mut reader)
            .with_context(|| format!("'{}' is not a model file", self.path.display()))?;
        ensure!(
            header.magic == ARTIFACT_MAGIC,
            "'{}' is not a model file (bad magic)",
            self.path.display()
        );
        ensure!(
            header.version == FORMAT_VERSION,
            "'{}' has format version {}, this build reads version {}",
            self.path.display(),
            header.version,
            FORMAT_VERSION
        );

        let artifact: ModelArtifact = codec()
            .deserialize_from(&mut reader)
            .with_context(|| format!("Model file '{}' is corrupt", self.path.display()))?;
        artifact
            .validate()
            .with_context(|| format!("Model file '{}' failed validation", self.path.display()))?;

        tracing::info!(
            "Loaded model ({} trees, {} labels) from '{}'",
            artifact.forest.n_trees(),
            artifact.labels.len(),
            self.path.display()
        );
        Ok(artifact)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{dataset::CropDataset, fixtures};
    use crate::ml::forest::ForestConfig;

    fn artifact() -> ModelArtifact {
        let ds     = CropDataset::from_samples(&fixtures::samples(3, 10, 9)).unwrap();
        let cfg    = ForestConfig { n_trees: 5, ..ForestConfig::default() };
        let forest = RandomForest::fit(&ds, &cfg).unwrap();
        ModelArtifact::new(ds.labels().to_vec(), forest)
    }

    #[test]
    fn test_save_then_load() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ModelStore::new(dir.path().join("nested/crop_model.bin"));
        let a     = artifact();

        store.save(&a).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.labels, a.labels);
        assert_eq!(loaded.feature_names, FEATURE_NAMES);
        assert_eq!(
            codec().serialize(&loaded).unwrap(),
            codec().serialize(&a).unwrap()
        );
    }

    #[test]
    fn test_save_overwrites() {
        let dir   = tempfile::tempdir().unwrap();
        let path  = dir.path().join("crop_model.bin");
        fs::write(&path, b"stale contents that are not a model").unwrap();

        let store = ModelStore::new(&path);
        store.save(&artifact()).unwrap();
        assert!(store.load().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ModelStore::new(dir.path().join("absent.bin")).load().unwrap_err();
        assert!(format!("{err:#}").contains("train"));
    }

    #[test]
    fn test_rejects_garbage_and_wrong_version() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.bin");

        fs::write(&path, b"XXXXYYYYZZZZ").unwrap();
        assert!(ModelStore::new(&path).load().is_err());

        let header = ArtifactHeader { magic: ARTIFACT_MAGIC, version: FORMAT_VERSION + 1 };
        fs::write(&path, codec().serialize(&header).unwrap()).unwrap();
        let err = ModelStore::new(&path).load().unwrap_err();
        assert!(format!("{err:#}").contains("format version"), "got: {err:#}");
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let dir   = tempfile::tempdir().unwrap();
        let path  = dir.path().join("crop_model.bin");
        let store = ModelStore::new(&path);
        store.save(&artifact()).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
        assert!(store.load().is_err());
    }

    #[test]
    fn test_feature_schema_mismatch_fails_validation() {
        let mut a = artifact();
        a.feature_names.swap(0, 1);
        assert!(a.validate().is_err());
    }
}
