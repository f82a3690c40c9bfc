// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by more than one business layer:
//
//   artifact.rs - Saving and loading the trained model
//                 One bincode file holding a versioned header,
//                 the feature schema, the label vocabulary,
//                 and the forest itself. Written by `train`,
//                 read once by `serve` and `predict`.
//
//   metrics.rs  - Training metrics logging
//                 Appends one row per training run (sizes and
//                 holdout accuracy) to a CSV file.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Model artifact saving and loading
pub mod artifact;

/// Training metrics CSV logger
pub mod metrics;
