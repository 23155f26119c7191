// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two capabilities the loader needs from the outside
// world, expressed as traits so they can be swapped:
//
//   RecordSource → where review records come from
//                  (JsonLinesSource reads .json files)
//   Tokenize     → how a string becomes tokens
//                  (WordTokenizer, WhitespaceTokenizer)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::review::ReviewRecord;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Any component that can produce review records.
pub trait RecordSource {
    /// Load every record, in source order.
    fn load_all(&self) -> Result<Vec<ReviewRecord>>;
}

// ─── Tokenize ─────────────────────────────────────────────────────────────────
/// Splits a string into tokens. Case is left untouched;
/// lowercasing is a field-level decision.
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}
