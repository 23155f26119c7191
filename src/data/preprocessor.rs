// ============================================================
// Layer 4 — Review Preprocessor
// ============================================================
// Turns a ReviewRecord into a ReviewExample according to the
// field specifications.
//
//   Categorical fields (item, user):
//     the raw string is kept as one symbol
//     (lowercased only if the field asks for it)
//
//   Sequential fields (text, tips):
//     1. normalise stray characters (tabs, NBSP, zero-width
//        spaces, control characters) to plain spaces
//     2. tokenise with the configured Tokenize strategy
//     3. lowercase each token if the field asks for it
//
// Markers ($start/$end) and padding are NOT applied here;
// that happens per batch in ReviewBatcher.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

use std::sync::Arc;

use crate::data::dataset::ReviewExample;
use crate::domain::field::{FieldSpec, ReviewFields};
use crate::domain::review::ReviewRecord;
use crate::domain::traits::Tokenize;

pub struct Preprocessor {
    tokenizer: Arc<dyn Tokenize>,
}

impl Preprocessor {
    pub fn new(tokenizer: Arc<dyn Tokenize>) -> Self {
        Self { tokenizer }
    }

    /// Replace invisible or control characters with spaces so the
    /// tokenizer never sees them as part of a word.
    pub fn clean(&self, text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_control() => ' ',
                c => c,
            })
            .collect()
    }

    /// Tokens of a sequential field value.
    pub fn tokens(&self, field: &FieldSpec, raw: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(&self.clean(raw));
        if field.lower {
            tokens.into_iter().map(|t| t.to_lowercase()).collect()
        } else {
            tokens
        }
    }

    /// Symbol of a categorical field value.
    pub fn symbol(&self, field: &FieldSpec, raw: &str) -> String {
        if field.lower { raw.to_lowercase() } else { raw.to_string() }
    }

    pub fn process(&self, fields: &ReviewFields, record: &ReviewRecord) -> ReviewExample {
        ReviewExample {
            item: self.symbol(&fields.item, &record.asin),
            user: self.symbol(&fields.user, &record.reviewer_id),
            text: self.tokens(&fields.text, &record.review_text),
            tips: self.tokens(&fields.tips, &record.summary),
        }
    }

    pub fn process_all(&self, fields: &ReviewFields, records: &[ReviewRecord]) -> Vec<ReviewExample> {
        records.iter().map(|r| self.process(fields, r)).collect()
    }
}
