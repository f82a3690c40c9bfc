// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between the CSV file on disk and the numeric rows
// the forest is grown on:
//
//   Crop_recommendation.csv
//       │
//       ▼
//   CsvLoader      → parses rows into LabeledSamples
//       │
//       ▼
//   CropDataset    → feature vectors + dense class indices
//       │
//       ▼
//   splitter       → seeded 80/20 train/test partition
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Reads the labelled dataset from a CSV file
pub mod loader;

/// Numeric feature rows and label vocabulary
pub mod dataset;

/// Seeded shuffle and train/test split
pub mod splitter;

#[cfg(test)]
pub mod fixtures;
