// ============================================================
// Layer 2 — Load Use Case
// ============================================================
// Orchestrates the full loading pipeline in order:
//
//   Step 1: Read train/val/test JSON-lines files   (Layer 4 - data)
//   Step 2: Tokenise records into examples         (Layer 4 - data)
//   Step 3: Build item/user/text/tips vocabularies (Layer 4 - data)
//           from the TRAINING split only
//   Step 4: Wrap each split in a Burn dataset      (Layer 4 - data)
//   Step 5: Build one Burn DataLoader per split    (Layer 4 - data)
//
// Vocabulary sharing is explicit:
//   share_text_vocab → text and tips index into one vocabulary
//                      counted over both training columns
//   share_id_vocab   → item and user index into one vocabulary
//
// Loaders never repeat: one call to `.iter()` is one pass.
// Unless shuffling is switched on for a split, batches are
// contiguous runs of records in file order.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{ensure, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::data::{
    batcher::{ReviewBatch, ReviewBatcher},
    dataset::{ReviewDataset, ReviewExample},
    loader::JsonLinesSource,
    preprocessor::Preprocessor,
    tokenizer::TokenizerKind,
    vocab::{FieldVocabs, Vocab, VocabBuilder, VocabOptions},
};
use crate::domain::field::{FieldSpec, ReviewFields};
use crate::domain::traits::RecordSource;

pub const TRAIN_FILE: &str = "train.json";
pub const VAL_FILE:   &str = "val.json";
pub const TEST_FILE:  &str = "test.json";

/// A non-repeating batch iterator over one split.
pub type ReviewLoader<B> = Arc<dyn DataLoader<ReviewBatch<B>>>;

// ─── BatchSizes ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSizes {
    pub train: usize,
    pub val:   usize,
    pub test:  usize,
}

impl Default for BatchSizes {
    fn default() -> Self {
        Self { train: 32, val: 256, test: 256 }
    }
}

impl From<(usize, usize, usize)> for BatchSizes {
    fn from((train, val, test): (usize, usize, usize)) -> Self {
        Self { train, val, test }
    }
}

impl BatchSizes {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.train > 0 && self.val > 0 && self.test > 0,
            "batch sizes must be positive (train={}, val={}, test={})",
            self.train,
            self.val,
            self.test
        );
        Ok(())
    }
}

// ─── Loader Configuration ────────────────────────────────────────────────────
// Everything that shapes a load. Serialisable so an exported
// vocabulary can be stored next to the settings that built it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub train_file:         String,
    pub val_file:           String,
    pub test_file:          String,
    pub batch_sizes:        BatchSizes,
    pub verbose:            bool,
    pub tokenizer:          TokenizerKind,
    pub lowercase:          bool,
    /// Summary tokens kept per example; the padded length adds two markers
    pub max_summary_tokens: usize,
    /// Review tokens kept per example; `None` pads to the longest in the batch
    pub max_text_tokens:    Option<usize>,
    pub vocab:              VocabOptions,
    pub share_text_vocab:   bool,
    pub share_id_vocab:     bool,
    pub shuffle_train:      bool,
    pub shuffle_eval:       bool,
    pub seed:               u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            train_file:         TRAIN_FILE.to_string(),
            val_file:           VAL_FILE.to_string(),
            test_file:          TEST_FILE.to_string(),
            batch_sizes:        BatchSizes::default(),
            verbose:            true,
            tokenizer:          TokenizerKind::Word,
            lowercase:          true,
            max_summary_tokens: 20,
            max_text_tokens:    None,
            vocab:              VocabOptions::default(),
            share_text_vocab:   true,
            share_id_vocab:     true,
            shuffle_train:      false,
            shuffle_eval:       false,
            seed:               42,
        }
    }
}

impl LoaderConfig {
    pub fn fields(&self) -> ReviewFields {
        ReviewFields::new(self.max_summary_tokens, self.max_text_tokens, self.lowercase)
    }
}

// ─── ReviewSplits ─────────────────────────────────────────────────────────────
/// Everything a load produces.
pub struct ReviewSplits<B: Backend> {
    pub text_vocab: Arc<Vocab>,
    pub tips_vocab: Arc<Vocab>,
    pub item_vocab: Arc<Vocab>,
    pub user_vocab: Arc<Vocab>,
    pub train:      ReviewLoader<B>,
    pub val:        ReviewLoader<B>,
    pub test:       ReviewLoader<B>,
}

impl<B: Backend> ReviewSplits<B> {
    /// `(text_vocab, tips_vocab, train, val, test)`
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (Arc<Vocab>, Arc<Vocab>, ReviewLoader<B>, ReviewLoader<B>, ReviewLoader<B>) {
        (self.text_vocab, self.tips_vocab, self.train, self.val, self.test)
    }

    pub fn vocabs(&self) -> FieldVocabs {
        FieldVocabs {
            item: self.item_vocab.clone(),
            user: self.user_vocab.clone(),
            text: self.text_vocab.clone(),
            tips: self.tips_vocab.clone(),
        }
    }
}

/// Tokenised examples of all three splits.
#[derive(Debug, Clone)]
pub struct SplitExamples {
    pub train: Vec<ReviewExample>,
    pub val:   Vec<ReviewExample>,
    pub test:  Vec<ReviewExample>,
}

// ─── Progress ─────────────────────────────────────────────────────────────────
// Progress lines go to a caller-supplied sink (stdout for `load`)
// and only when verbose. The tracing event is emitted either way.
struct Progress<'a> {
    verbose: bool,
    out:     &'a mut dyn Write,
}

impl Progress<'_> {
    fn step(&mut self, msg: &str) -> Result<()> {
        if self.verbose {
            writeln!(self.out, "{msg}")?;
        }
        tracing::debug!("{msg}");
        Ok(())
    }
}

// ─── DatasetLoader ────────────────────────────────────────────────────────────
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read `parent_path/{train,val,test}.json`, build vocabularies from
    /// the training split and return one loader per split.
    /// Progress lines (when verbose) are printed to stdout.
    pub fn load<B: Backend>(
        &self,
        parent_path: impl AsRef<Path>,
        device:      &B::Device,
    ) -> Result<ReviewSplits<B>> {
        self.load_reporting(parent_path, device, &mut io::stdout())
    }

    /// Same as `load`, writing progress lines to `out` instead of stdout.
    pub fn load_reporting<B: Backend>(
        &self,
        parent_path: impl AsRef<Path>,
        device:      &B::Device,
        out:         &mut dyn Write,
    ) -> Result<ReviewSplits<B>> {
        self.run(parent_path.as_ref(), device, None, out)
    }

    /// Same as `load`, but encodes with vocabularies built earlier
    /// (e.g. restored from a `VocabStore`) instead of counting the
    /// training split again.
    pub fn load_with_vocabs<B: Backend>(
        &self,
        parent_path: impl AsRef<Path>,
        device:      &B::Device,
        vocabs:      FieldVocabs,
    ) -> Result<ReviewSplits<B>> {
        self.run(parent_path.as_ref(), device, Some(vocabs), &mut io::stdout())
    }

    fn run<B: Backend>(
        &self,
        parent: &Path,
        device: &B::Device,
        vocabs: Option<FieldVocabs>,
        out:    &mut dyn Write,
    ) -> Result<ReviewSplits<B>> {
        // Reject bad batch sizes before touching the filesystem
        self.config.batch_sizes.validate()?;
        let mut progress = Progress { verbose: self.config.verbose, out };
        let fields       = self.config.fields();

        progress.step("Loading datasets...")?;
        let splits = self.read_splits(parent, &fields)?;
        progress.step("datasets loaded")?;

        // Vocabularies always come from the training split, never val/test
        let vocabs = match vocabs {
            Some(v) => v,
            None    => self.build_vocabs(&fields, &splits.train, &mut progress)?,
        };
        Ok(self.into_loaders(fields, vocabs, splits, device))
    }

    /// Parse and tokenise all three files.
    pub fn read_splits(&self, parent: &Path, fields: &ReviewFields) -> Result<SplitExamples> {
        let prep = Preprocessor::new(self.config.tokenizer.build());

        let read = |name: &str| -> Result<Vec<ReviewExample>> {
            let records = JsonLinesSource::new(parent.join(name)).load_all()?;
            Ok(prep.process_all(fields, &records))
        };

        let splits = SplitExamples {
            train: read(self.config.train_file.as_str())?,
            val:   read(self.config.val_file.as_str())?,
            test:  read(self.config.test_file.as_str())?,
        };

        tracing::info!(
            "Read {} train, {} val, {} test reviews from '{}'",
            splits.train.len(),
            splits.val.len(),
            splits.test.len(),
            parent.display()
        );
        Ok(splits)
    }

    /// Count the training examples and freeze the four vocabularies.
    fn build_vocabs(
        &self,
        fields:   &ReviewFields,
        train:    &[ReviewExample],
        progress: &mut Progress<'_>,
    ) -> Result<FieldVocabs> {
        let opts = self.config.vocab;

        let (item, user) = if self.config.share_id_vocab {
            let shared = Arc::new(build_vocab(
                &[&fields.item, &fields.user],
                train.iter().flat_map(|ex| [ex.item.as_str(), ex.user.as_str()]),
                opts,
            ));
            (shared.clone(), shared)
        } else {
            (
                Arc::new(build_vocab(&[&fields.item], train.iter().map(|ex| ex.item.as_str()), opts)),
                Arc::new(build_vocab(&[&fields.user], train.iter().map(|ex| ex.user.as_str()), opts)),
            )
        };
        progress.step("item vocab built")?;
        progress.step("user vocab built")?;

        let (text, tips) = if self.config.share_text_vocab {
            let shared = Arc::new(build_vocab(
                &[&fields.text, &fields.tips],
                train.iter().flat_map(|ex| ex.text.iter().chain(ex.tips.iter()).map(String::as_str)),
                opts,
            ));
            (shared.clone(), shared)
        } else {
            (
                Arc::new(build_vocab(
                    &[&fields.text],
                    train.iter().flat_map(|ex| ex.text.iter().map(String::as_str)),
                    opts,
                )),
                Arc::new(build_vocab(
                    &[&fields.tips],
                    train.iter().flat_map(|ex| ex.tips.iter().map(String::as_str)),
                    opts,
                )),
            )
        };
        progress.step("text vocab built")?;
        progress.step("tips vocab built")?;

        tracing::info!(
            "Vocabularies: item={}, user={}, text={}, tips={}",
            item.len(),
            user.len(),
            text.len(),
            tips.len()
        );

        Ok(FieldVocabs { item, user, text, tips })
    }

    fn into_loaders<B: Backend>(
        &self,
        fields: ReviewFields,
        vocabs: FieldVocabs,
        splits: SplitExamples,
        device: &B::Device,
    ) -> ReviewSplits<B> {
        let cfg     = &self.config;
        let batcher = ReviewBatcher::<B>::new(device.clone(), Arc::new(fields), vocabs.clone());

        let train = build_loader(batcher.clone(), splits.train, cfg.batch_sizes.train, cfg.shuffle_train.then_some(cfg.seed));
        let val   = build_loader(batcher.clone(), splits.val,   cfg.batch_sizes.val,   cfg.shuffle_eval.then_some(cfg.seed));
        let test  = build_loader(batcher,         splits.test,  cfg.batch_sizes.test,  cfg.shuffle_eval.then_some(cfg.seed));

        ReviewSplits {
            text_vocab: vocabs.text,
            tips_vocab: vocabs.tips,
            item_vocab: vocabs.item,
            user_vocab: vocabs.user,
            train,
            val,
            test,
        }
    }
}

/// Count `values` and build a vocabulary whose reserved tokens are the
/// union of the fields' specials, in field order.
fn build_vocab<'a>(
    fields: &[&FieldSpec],
    values: impl Iterator<Item = &'a str>,
    opts:   VocabOptions,
) -> Vocab {
    let mut builder = VocabBuilder::new();
    builder.add_tokens(values);

    let specials: Vec<String> = fields.iter().flat_map(|f| f.specials()).collect();
    builder.build(&specials, opts)
}

fn build_loader<B: Backend>(
    batcher:    ReviewBatcher<B>,
    examples:   Vec<ReviewExample>,
    batch_size: usize,
    shuffle:    Option<u64>,
) -> ReviewLoader<B> {
    let builder = DataLoaderBuilder::new(batcher).batch_size(batch_size);
    let builder = match shuffle {
        Some(seed) => builder.shuffle(seed),
        None       => builder,
    };
    builder.build(ReviewDataset::new(examples))
}

/// Load a review directory with default settings.
///
/// `parent_path` must contain `train.json`, `val.json` and `test.json`.
/// Text and tips share one vocabulary; item and user share another.
pub fn load<B: Backend>(
    parent_path: impl AsRef<Path>,
    device:      &B::Device,
    batch_sizes: impl Into<BatchSizes>,
    verbose:     bool,
) -> Result<ReviewSplits<B>> {
    let config = LoaderConfig {
        batch_sizes: batch_sizes.into(),
        verbose,
        ..LoaderConfig::default()
    };
    DatasetLoader::new(config).load(parent_path, device)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use std::fs;
    use std::path::Path;

    type TestBackend = NdArray;

    const TRAIN: &str = "\
{\"asin\":\"A1\",\"reviewerID\":\"U1\",\"reviewText\":\"good item\",\"summary\":\"nice\"}
{\"asin\":\"A2\",\"reviewerID\":\"U2\",\"reviewText\":\"bad item\",\"summary\":\"meh\"}
";
    const VAL:  &str = "{\"asin\":\"A1\",\"reviewerID\":\"U3\",\"reviewText\":\"great item\",\"summary\":\"nice\"}\n";
    const TEST: &str = "{\"asin\":\"A3\",\"reviewerID\":\"U1\",\"reviewText\":\"bad\",\"summary\":\"awful\"}\n";

    fn write_dir(dir: &Path, train: &str, val: &str, test: &str) {
        fs::write(dir.join(TRAIN_FILE), train).unwrap();
        fs::write(dir.join(VAL_FILE),   val).unwrap();
        fs::write(dir.join(TEST_FILE),  test).unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_dir(dir.path(), TRAIN, VAL, TEST);
        dir
    }

    fn quiet() -> LoaderConfig {
        LoaderConfig { verbose: false, batch_sizes: (1, 1, 1).into(), ..LoaderConfig::default() }
    }

    fn ids<const D: usize>(t: Tensor<TestBackend, D, Int>) -> Vec<i64> {
        t.into_data().convert::<i64>().to_vec::<i64>().unwrap()
    }

    #[test]
    fn test_end_to_end_two_records() {
        let dir    = fixture();
        let device = Default::default();
        let splits = load::<TestBackend>(dir.path(), &device, (1, 1, 1), false).unwrap();
        let (text_vocab, tips_vocab, train, _val, _test) = splits.into_parts();

        for tok in ["good", "bad", "item", "nice", "meh", "$start", "$end"] {
            assert!(text_vocab.contains(tok), "missing {tok}");
        }
        assert!(Arc::ptr_eq(&text_vocab, &tips_vocab));

        let batches: Vec<_> = train.iter().collect();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.batch_size() == 1));
    }

    #[test]
    fn test_vocab_size_is_distinct_tokens_plus_specials() {
        let dir    = fixture();
        let splits = DatasetLoader::new(quiet())
            .load::<TestBackend>(dir.path(), &Default::default())
            .unwrap();

        // good, bad, item, nice, meh + <unk> <pad> $start $end
        assert_eq!(splits.text_vocab.len(), 9);
        // <unk> + A1 A2 U1 U2
        assert_eq!(splits.item_vocab.len(), 5);
        assert!(Arc::ptr_eq(&splits.item_vocab, &splits.user_vocab));
    }

    #[test]
    fn test_reload_gives_same_indices() {
        let dir = fixture();
        let a = DatasetLoader::new(quiet()).load::<TestBackend>(dir.path(), &Default::default()).unwrap();
        let b = DatasetLoader::new(quiet()).load::<TestBackend>(dir.path(), &Default::default()).unwrap();
        assert_eq!(a.text_vocab.tokens(), b.text_vocab.tokens());
        assert_eq!(a.item_vocab.tokens(), b.item_vocab.tokens());
    }

    #[test]
    fn test_vocab_ignores_validation_and_test() {
        let dir    = fixture();
        let splits = DatasetLoader::new(quiet()).load::<TestBackend>(dir.path(), &Default::default()).unwrap();
        assert!(!splits.text_vocab.contains("great"));
        assert!(!splits.text_vocab.contains("awful"));
        assert!(!splits.user_vocab.contains("U3"));
    }

    #[test]
    fn test_unseen_tokens_map_to_unk() {
        let dir    = fixture();
        let splits = DatasetLoader::new(quiet()).load::<TestBackend>(dir.path(), &Default::default()).unwrap();
        let unk    = splits.text_vocab.unk_index() as i64;

        let batch = splits.val.iter().next().unwrap();
        // [$start, great, item, $end]
        let text = ids(batch.text);
        assert_eq!(text[1], unk);
        assert_ne!(text[2], unk);
        assert_eq!(ids(batch.user), vec![0]);

        let batch = splits.test.iter().next().unwrap();
        assert_eq!(ids(batch.item), vec![0]);
    }

    #[test]
    fn test_batch_shapes_and_partial_last_batch() {
        let dir   = tempfile::tempdir().unwrap();
        let train: String = (0..5)
            .map(|i| format!(
                "{{\"asin\":\"A{i}\",\"reviewerID\":\"U{i}\",\"reviewText\":\"word {i}\",\"summary\":\"tip\"}}\n"
            ))
            .collect();
        write_dir(dir.path(), &train, VAL, TEST);

        let config = LoaderConfig {
            batch_sizes:        (2, 4, 4).into(),
            max_summary_tokens: 3,
            ..quiet()
        };
        let splits = DatasetLoader::new(config).load::<TestBackend>(dir.path(), &Default::default()).unwrap();

        let sizes: Vec<usize> = splits.train.iter().map(|b| b.batch_size()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let first = splits.train.iter().next().unwrap();
        assert_eq!(first.item.dims(), [2]);
        assert_eq!(first.text.dims(), [4, 2]);
        assert_eq!(first.tips.dims(), [5, 2]);
    }

    #[test]
    fn test_order_preserved_without_shuffle() {
        let dir    = fixture();
        let splits = DatasetLoader::new(quiet()).load::<TestBackend>(dir.path(), &Default::default()).unwrap();
        let a1     = splits.item_vocab.stoi("A1") as i64;
        let a2     = splits.item_vocab.stoi("A2") as i64;

        let items: Vec<i64> = splits.train.iter().flat_map(|b| ids(b.item)).collect();
        assert_eq!(items, vec![a1, a2]);
    }

    #[test]
    fn test_shuffle_keeps_every_record() {
        let dir   = tempfile::tempdir().unwrap();
        let train: String = (0..20)
            .map(|i| format!(
                "{{\"asin\":\"A{i}\",\"reviewerID\":\"U\",\"reviewText\":\"t\",\"summary\":\"s\"}}\n"
            ))
            .collect();
        write_dir(dir.path(), &train, VAL, TEST);

        let config = LoaderConfig { shuffle_train: true, batch_sizes: (3, 1, 1).into(), ..quiet() };
        let splits = DatasetLoader::new(config).load::<TestBackend>(dir.path(), &Default::default()).unwrap();

        let mut items: Vec<i64> = splits.train.iter().flat_map(|b| ids(b.item)).collect();
        items.sort_unstable();
        let mut expected: Vec<i64> = (0..20)
            .map(|i| splits.item_vocab.stoi(&format!("A{i}")) as i64)
            .collect();
        expected.sort_unstable();
        assert_eq!(items, expected);
    }

    #[test]
    fn test_separate_vocabs() {
        let dir    = fixture();
        let config = LoaderConfig { share_text_vocab: false, share_id_vocab: false, ..quiet() };
        let splits = DatasetLoader::new(config).load::<TestBackend>(dir.path(), &Default::default()).unwrap();

        assert!(!Arc::ptr_eq(&splits.text_vocab, &splits.tips_vocab));
        assert!(splits.text_vocab.contains("good"));
        assert!(!splits.text_vocab.contains("nice"));
        assert!(splits.tips_vocab.contains("nice"));
        assert!(!splits.tips_vocab.contains("good"));

        assert!(splits.item_vocab.contains("A1"));
        assert!(!splits.item_vocab.contains("U1"));
        assert!(splits.user_vocab.contains("U1"));
    }

    #[test]
    fn test_load_with_existing_vocabs() {
        let dir    = fixture();
        let first  = DatasetLoader::new(quiet()).load::<TestBackend>(dir.path(), &Default::default()).unwrap();
        let vocabs = first.vocabs();

        let second = DatasetLoader::new(quiet())
            .load_with_vocabs::<TestBackend>(dir.path(), &Default::default(), vocabs)
            .unwrap();
        assert!(Arc::ptr_eq(&first.text_vocab, &second.text_vocab));
    }

    #[test]
    fn test_missing_split_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(TRAIN_FILE), TRAIN).unwrap();
        fs::write(dir.path().join(VAL_FILE),   VAL).unwrap();

        let err = DatasetLoader::new(quiet())
            .load::<TestBackend>(dir.path(), &Default::default())
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains(TEST_FILE));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let dir    = fixture();
        let config = LoaderConfig { batch_sizes: (0, 1, 1).into(), ..quiet() };
        assert!(DatasetLoader::new(config).load::<TestBackend>(dir.path(), &Default::default()).is_err());
    }

    #[test]
    fn test_config_json_uses_defaults_for_missing_keys() {
        let cfg: LoaderConfig = serde_json::from_str(r#"{"verbose": false}"#).unwrap();
        assert!(!cfg.verbose);
        assert_eq!(cfg.batch_sizes, BatchSizes { train: 32, val: 256, test: 256 });
        assert_eq!(cfg.fields().tips.fix_length, Some(22));
    }

    #[test]
    fn test_verbose_reports_six_progress_lines() {
        let dir    = fixture();
        let config = LoaderConfig { verbose: true, ..quiet() };
        let mut out: Vec<u8> = Vec::new();
        DatasetLoader::new(config)
            .load_reporting::<TestBackend>(dir.path(), &Default::default(), &mut out)
            .unwrap();

        let expected = "Loading datasets...\n\
                        datasets loaded\n\
                        item vocab built\n\
                        user vocab built\n\
                        text vocab built\n\
                        tips vocab built\n";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_quiet_reports_nothing() {
        let dir    = fixture();
        let loader = DatasetLoader::new(quiet());
        assert!(!loader.config().verbose);

        let mut out: Vec<u8> = Vec::new();
        loader
            .load_reporting::<TestBackend>(dir.path(), &Default::default(), &mut out)
            .unwrap();
        assert!(out.is_empty());
    }
}
