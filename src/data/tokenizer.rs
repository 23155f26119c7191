// ============================================================
// Layer 4 — Tokenizers
// ============================================================
// Two interchangeable word splitters behind the Tokenize trait:
//
//   WordTokenizer       → HuggingFace `Whitespace` pre-tokenizer
//                         Splits on \w+|[^\w\s]+ so punctuation
//                         becomes its own token:
//                           "Nice item!" → ["Nice", "item", "!"]
//
//   WhitespaceTokenizer → plain Unicode whitespace split
//                           "Nice item!" → ["Nice", "item!"]
//
// Neither changes case; the field decides whether to lowercase.
//
// Reference: tokenizers crate documentation (pre_tokenizers)

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::domain::traits::Tokenize;

/// Word-level tokenizer that separates punctuation from words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenize for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut pre = PreTokenizedString::from(text);

        if let Err(e) = Whitespace::default().pre_tokenize(&mut pre) {
            tracing::warn!("Pre-tokenizer failed ({e}); falling back to whitespace split");
            return WhitespaceTokenizer.tokenize(text);
        }

        pre.get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(piece, _, _)| piece.to_string())
            .collect()
    }
}

/// Splits on whitespace only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenize for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Tokenizer choice as it appears in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerKind {
    #[default]
    Word,
    Whitespace,
}

impl TokenizerKind {
    pub fn build(self) -> Arc<dyn Tokenize> {
        match self {
            TokenizerKind::Word       => Arc::new(WordTokenizer::new()),
            TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer),
        }
    }
}
