// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing what a review
// dataset IS, independent of how it is read or batched.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// One raw review as it appears in the JSON-lines files
pub mod review;

// Field specifications: how each column is tokenised and padded
pub mod field;

// Core abstractions (traits) that other layers implement
pub mod traits;
