// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a directory of .json review files and
// device-resident tensor batches.
//
// The pipeline flows in this order:
//
//   train.json / val.json / test.json
//       │
//       ▼
//   JsonLinesSource   → one ReviewRecord per line
//       │
//       ▼
//   Preprocessor      → tokenise + lowercase text and summary
//       │
//       ▼
//   VocabBuilder      → count training tokens, freeze a Vocab
//       │
//       ▼
//   ReviewDataset     → implements Burn's Dataset trait
//       │
//       ▼
//   ReviewBatcher     → pads, numericalises, stacks tensors
//       │
//       ▼
//   DataLoader        → yields batches to the caller
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads newline-delimited JSON review files
pub mod loader;

/// Word and whitespace tokenizers
pub mod tokenizer;

/// Turns raw records into tokenised examples
pub mod preprocessor;

/// Frequency-counted token → index vocabularies
pub mod vocab;

/// Implements Burn's Dataset trait for review examples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits a single record list into train/val/test
pub mod splitter;
