// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `prepare` and `inspect`
// and all their configurable flags.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::load_use_case::{BatchSizes, LoaderConfig};
use crate::application::prepare_use_case::PrepareConfig;
use crate::data::tokenizer::TokenizerKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split one review file into train.json / val.json / test.json
    Prepare(PrepareArgs),

    /// Load a dataset directory and report vocabularies and batches
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// JSON-lines review file in Amazon format
    #[arg(long)]
    pub input: PathBuf,

    /// Directory to write the three split files into
    #[arg(long)]
    pub out_dir: PathBuf,

    /// Fraction of reviews for validation
    #[arg(long, default_value_t = 0.1)]
    pub val_fraction: f64,

    /// Fraction of reviews for testing
    #[arg(long, default_value_t = 0.1)]
    pub test_fraction: f64,

    /// Shuffle seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            input:         a.input,
            out_dir:       a.out_dir,
            val_fraction:  a.val_fraction,
            test_fraction: a.test_fraction,
            seed:          a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory containing train.json, val.json and test.json
    #[arg(long)]
    pub data_dir: PathBuf,

    #[arg(long, default_value_t = 32)]
    pub train_batch: usize,

    #[arg(long, default_value_t = 256)]
    pub val_batch: usize,

    #[arg(long, default_value_t = 256)]
    pub test_batch: usize,

    /// Summary tokens kept per review (padded length adds 2 markers)
    #[arg(long, default_value_t = 20)]
    pub max_summary_tokens: usize,

    /// Drop tokens seen fewer times than this in training
    #[arg(long, default_value_t = 1)]
    pub min_freq: usize,

    /// Split on whitespace only instead of separating punctuation
    #[arg(long)]
    pub whitespace_tokenizer: bool,

    /// Shuffle the training split
    #[arg(long)]
    pub shuffle_train: bool,

    /// Give text/tips and item/user their own vocabularies
    #[arg(long)]
    pub separate_vocabs: bool,

    /// Suppress progress lines
    #[arg(long)]
    pub quiet: bool,

    /// Export vocabularies and config to this directory
    #[arg(long)]
    pub vocab_out: Option<PathBuf>,
}

impl From<&InspectArgs> for LoaderConfig {
    fn from(a: &InspectArgs) -> Self {
        let mut cfg = LoaderConfig {
            batch_sizes:        BatchSizes { train: a.train_batch, val: a.val_batch, test: a.test_batch },
            verbose:            !a.quiet,
            max_summary_tokens: a.max_summary_tokens,
            share_text_vocab:   !a.separate_vocabs,
            share_id_vocab:     !a.separate_vocabs,
            shuffle_train:      a.shuffle_train,
            ..LoaderConfig::default()
        };
        cfg.vocab.min_freq = a.min_freq;
        if a.whitespace_tokenizer {
            cfg.tokenizer = TokenizerKind::Whitespace;
        }
        cfg
    }
}
