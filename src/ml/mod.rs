// ============================================================
// Layer 5 - ML / Model Layer
// ============================================================
// All classifier code lives here. No other layer knows about
// trees, thresholds, or votes.
//
//   forest.rs     - Bootstrap-aggregated ensemble of linfa
//                   CART trees, grown in parallel, majority-vote
//                   prediction
//
//   trainer.rs    - One training run: fit on the train split,
//                   score on the test split
//
//   inferencer.rs - Wraps a loaded model artifact and maps a
//                   SoilSample to a crop label
//
// Reference: Breiman (2001) Random Forests

/// Random forest ensemble
pub mod forest;

/// Fit + holdout evaluation
pub mod trainer;

/// Loaded-model prediction
pub mod inferencer;
