// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data and infra layers to accomplish one
// goal each:
//
//   load_use_case    → dataset directory → vocabularies +
//                      train/val/test batch loaders
//   prepare_use_case → one review dump → train/val/test files
//
// No tokenisation or tensor code lives here; this layer only
// wires the pieces together in the right order.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The dataset loading workflow
pub mod load_use_case;

// The dataset preparation (splitting) workflow
pub mod prepare_use_case;
