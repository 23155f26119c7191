//! Load Amazon-style review datasets into frozen vocabularies and
//! Burn batch loaders for training, validation and test.
//!
//! ```no_run
//! use burn::backend::NdArray;
//!
//! let device = Default::default();
//! let splits = review_loader::load::<NdArray>("data/amazon", &device, (32, 256, 256), true)?;
//! let (text_vocab, _tips_vocab, train, _val, _test) = splits.into_parts();
//!
//! println!("{} words", text_vocab.len());
//! for batch in train.iter() {
//!     let _ = (batch.item, batch.user, batch.text);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;

pub use application::load_use_case::{
    load, BatchSizes, DatasetLoader, LoaderConfig, ReviewLoader, ReviewSplits,
};
pub use data::batcher::ReviewBatch;
pub use data::vocab::{FieldVocabs, Vocab};
