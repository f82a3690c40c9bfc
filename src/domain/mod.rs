// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs and traits describing what a soil sample
// is and what it means to recommend a crop for one.
//
// Rules for this layer:
//   - NO file I/O, HTTP or CLI types
//   - NO model internals (trees, votes, thresholds)
//   - Only plain Rust structs, constants, and traits
//
// The feature order shared by training and inference lives
// here and nowhere else, so both sides read the same list.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A soil measurement and its optional crop label
pub mod sample;

// Core abstractions (traits) that other layers implement
pub mod traits;
