// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
// training a model, or answering with a trained one.
//
// Rules for this layer:
//   - No tree or vote logic here (that's Layer 5)
//   - No printing or HTTP here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// The load-once / predict-many workflow
pub mod predict_use_case;
