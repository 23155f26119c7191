// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence that no single pipeline step owns:
//
//   vocab_store.rs — Vocabulary and loader-config persistence
//                    Writes each field's vocabulary as JSON so
//                    a later run (evaluation, inference) can
//                    encode new reviews with the exact same
//                    indices, plus the LoaderConfig that built
//                    them.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Vocabulary and config saving and loading
pub mod vocab_store;
