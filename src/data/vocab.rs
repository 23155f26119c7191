// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// A frozen token → index mapping built from training data.
//
// Construction (VocabBuilder::build):
//   1. reserved tokens first, in the order given
//      (<unk>, <pad>, $start, $end for text fields)
//   2. every counted token with freq >= min_freq, sorted by
//      descending frequency, ties in ascending string order
//   3. optionally keep only the first `max_size` of those
//
// Reserved tokens are never counted, even if they appear in
// the data. Lookups of unseen tokens return the <unk> index.
//
// Example (min_freq = 1):
//   counts:  item×2, good×1, bad×1
//   itos:    [<unk>, <pad>, $start, $end, item, bad, good]
//
// Reference: Rust Book §8 (Hash Maps)

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::domain::field::{PAD_TOKEN, UNK_TOKEN};

/// Vocabulary size limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabOptions {
    /// Tokens seen fewer times than this are dropped (values below 1 act as 1)
    pub min_freq: usize,
    /// Cap on non-reserved entries
    pub max_size: Option<usize>,
}

impl Default for VocabOptions {
    fn default() -> Self {
        Self { min_freq: 1, max_size: None }
    }
}

// ─── VocabBuilder ─────────────────────────────────────────────────────────────
#[derive(Debug, Default, Clone)]
pub struct VocabBuilder {
    counts: HashMap<String, usize>,
}

impl VocabBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_token(&mut self, token: &str) {
        *self.counts.entry(token.to_string()).or_insert(0) += 1;
    }

    pub fn add_tokens<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tok in tokens {
            self.add_token(tok.as_ref());
        }
    }

    /// Number of distinct tokens counted so far.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Freeze the counts into a vocabulary. The first reserved token is
    /// the unknown token; `<unk>` is prepended when `specials` is empty.
    pub fn build(self, specials: &[String], opts: VocabOptions) -> Vocab {
        // Step 1: reserved tokens, first occurrence wins
        // (shared vocabularies pass the specials of every field)
        let mut itos: Vec<String> = Vec::with_capacity(specials.len() + self.counts.len());
        for s in specials {
            if !itos.contains(s) {
                itos.push(s.clone());
            }
        }
        if itos.is_empty() {
            itos.push(UNK_TOKEN.to_string());
        }
        let unk_token = itos[0].clone();

        // Step 2: counted tokens above the cut-off, reserved ones skipped
        let min_freq = opts.min_freq.max(1);
        let mut ranked: Vec<(String, usize)> = self
            .counts
            .iter()
            .filter(|&(tok, &n)| n >= min_freq && !itos.contains(tok))
            .map(|(tok, &n)| (tok.clone(), n))
            .collect();

        // Step 3: highest frequency first; equal counts in string order
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(max) = opts.max_size {
            ranked.truncate(max);
        }

        // Step 4: only ranked tokens carry a frequency.
        // A reserved token found in the data still reports 0.
        let freqs: BTreeMap<String, usize> = ranked.iter().cloned().collect();
        itos.extend(ranked.into_iter().map(|(tok, _)| tok));

        Vocab::from_parts(itos, freqs, unk_token)
    }
}

// ─── Vocab ────────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocab {
    itos:      Vec<String>,
    stoi:      HashMap<String, usize>,
    freqs:     BTreeMap<String, usize>,
    unk_index: usize,
}

/// Serialisable form of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabRecord {
    pub unk_token: String,
    pub itos:      Vec<String>,
    pub freqs:     BTreeMap<String, usize>,
}

impl Vocab {
    fn from_parts(itos: Vec<String>, freqs: BTreeMap<String, usize>, unk_token: String) -> Self {
        let stoi: HashMap<String, usize> = itos
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        let unk_index = stoi.get(&unk_token).copied().unwrap_or(0);
        Self { itos, stoi, freqs, unk_index }
    }

    pub fn from_record(record: VocabRecord) -> Result<Self> {
        ensure!(
            record.itos.contains(&record.unk_token),
            "vocabulary does not contain its unknown token '{}'",
            record.unk_token
        );
        let vocab = Self::from_parts(record.itos, record.freqs, record.unk_token);
        ensure!(
            vocab.stoi.len() == vocab.itos.len(),
            "vocabulary contains duplicate tokens"
        );
        Ok(vocab)
    }

    pub fn to_record(&self) -> VocabRecord {
        VocabRecord {
            unk_token: self.itos[self.unk_index].clone(),
            itos:      self.itos.clone(),
            freqs:     self.freqs.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.itos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    /// Index of `token`, or the unknown index if it was never seen.
    pub fn stoi(&self, token: &str) -> usize {
        self.get(token).unwrap_or(self.unk_index)
    }

    /// Index of `token` if it is in the vocabulary.
    pub fn get(&self, token: &str) -> Option<usize> {
        self.stoi.get(token).copied()
    }

    pub fn itos(&self, index: usize) -> Option<&str> {
        self.itos.get(index).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.stoi.contains_key(token)
    }

    /// Training frequency of `token` (0 for reserved or unseen tokens).
    pub fn freq(&self, token: &str) -> usize {
        self.freqs.get(token).copied().unwrap_or(0)
    }

    pub fn unk_index(&self) -> usize {
        self.unk_index
    }

    /// Index of `<pad>`; `None` for vocabularies of categorical fields.
    pub fn pad_index(&self) -> Option<usize> {
        self.get(PAD_TOKEN)
    }

    pub fn tokens(&self) -> &[String] {
        &self.itos
    }

    pub fn encode<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<usize> {
        tokens.iter().map(|t| self.stoi(t.as_ref())).collect()
    }
}

/// The vocabulary each field encodes with. Shared fields hold
/// the same `Arc`.
#[derive(Debug, Clone)]
pub struct FieldVocabs {
    pub item: Arc<Vocab>,
    pub user: Arc<Vocab>,
    pub text: Arc<Vocab>,
    pub tips: Arc<Vocab>,
}
