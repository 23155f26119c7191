// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with `clap` and delegates
// all work to Layer 2 (application).
//
//   1. `prepare` — split one review dump into three files
//   2. `inspect` — load a dataset directory on the CPU backend
//                  and print what the loader produced
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use burn::backend::NdArray;
use clap::Parser;
use commands::{Commands, InspectArgs, PrepareArgs};

use crate::application::load_use_case::{DatasetLoader, LoaderConfig, ReviewLoader};

type CpuBackend = NdArray;

#[derive(Parser, Debug)]
#[command(
    name = "review-loader",
    version,
    about = "Prepare and inspect Amazon-style review datasets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args) => run_prepare(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;

    let counts = PrepareUseCase::new(args.into()).execute()?;
    println!(
        "Split written: {} train, {} val, {} test",
        counts.train, counts.val, counts.test
    );
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::infra::vocab_store::VocabStore;

    let config = LoaderConfig::from(&args);
    let loader = DatasetLoader::new(config.clone());
    let device = Default::default();
    let splits = loader
        .load::<CpuBackend>(&args.data_dir, &device)
        .with_context(|| format!("Cannot load dataset from '{}'", args.data_dir.display()))?;

    println!("text vocab: {} entries", splits.text_vocab.len());
    println!("tips vocab: {} entries", splits.tips_vocab.len());
    println!("item vocab: {} entries", splits.item_vocab.len());
    println!("user vocab: {} entries", splits.user_vocab.len());

    for (name, split) in [("train", &splits.train), ("val", &splits.val), ("test", &splits.test)] {
        println!("{name}: {} batches", count_batches(split));
    }

    if let Some(batch) = splits.train.iter().next() {
        println!(
            "first train batch: item {:?}, user {:?}, text {:?}, tips {:?}",
            batch.item.dims(),
            batch.user.dims(),
            batch.text.dims(),
            batch.tips.dims(),
        );
    }

    if let Some(dir) = &args.vocab_out {
        let store = VocabStore::new(dir);
        store.save_vocabs(&splits.vocabs())?;
        store.save_config(&config)?;
        println!("Vocabularies written to '{}'", dir.display());
    }
    Ok(())
}

fn count_batches(loader: &ReviewLoader<CpuBackend>) -> usize {
    loader.iter().count()
}
