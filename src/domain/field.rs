// ============================================================
// Layer 3 — Field Specifications
// ============================================================
// A field describes how one column of a review record turns
// into numbers:
//
//   item, user  → Categorical: the whole string is one symbol
//   text, tips  → Sequential:  the string is tokenised, wrapped
//                 in $start ... $end and padded with <pad>
//
// Padding rule for sequential fields with a fixed length L
// and two markers:
//
//   tokens = tokens[..L - 2]
//   out    = [$start] + tokens + [$end] + [<pad>; L - len]
//
// Without a fixed length the batch is padded to its longest
// sequence (markers included).
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use serde::{Deserialize, Serialize};

/// Reserved token for out-of-vocabulary symbols. Always index 0.
pub const UNK_TOKEN: &str = "<unk>";

/// Reserved padding token for sequential fields.
pub const PAD_TOKEN: &str = "<pad>";

/// Start-of-sequence marker for review text and summaries.
pub const INIT_TOKEN: &str = "$start";

/// End-of-sequence marker for review text and summaries.
pub const EOS_TOKEN: &str = "$end";

/// Whether a field holds a token sequence or a single symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Sequential,
    Categorical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name:       String,
    pub kind:       FieldKind,
    /// Lowercase tokens after tokenisation
    pub lower:      bool,
    pub init_token: Option<String>,
    pub eos_token:  Option<String>,
    /// Total padded length including markers
    pub fix_length: Option<usize>,
    pub unk_token:  String,
    /// Categorical fields are never padded, so they carry no pad token
    pub pad_token:  Option<String>,
}

impl FieldSpec {
    /// A single-symbol field such as an item or user id.
    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name:       name.into(),
            kind:       FieldKind::Categorical,
            lower:      false,
            init_token: None,
            eos_token:  None,
            fix_length: None,
            unk_token:  UNK_TOKEN.to_string(),
            pad_token:  None,
        }
    }

    /// A tokenised field padded with `<pad>`.
    pub fn sequential(name: impl Into<String>) -> Self {
        Self {
            name:       name.into(),
            kind:       FieldKind::Sequential,
            lower:      false,
            init_token: None,
            eos_token:  None,
            fix_length: None,
            unk_token:  UNK_TOKEN.to_string(),
            pad_token:  Some(PAD_TOKEN.to_string()),
        }
    }

    pub fn lowercase(mut self, lower: bool) -> Self {
        self.lower = lower;
        self
    }

    pub fn with_markers(mut self, init: impl Into<String>, eos: impl Into<String>) -> Self {
        self.init_token = Some(init.into());
        self.eos_token  = Some(eos.into());
        self
    }

    pub fn with_fix_length(mut self, fix_length: Option<usize>) -> Self {
        self.fix_length = fix_length;
        self
    }

    pub fn is_sequential(&self) -> bool {
        self.kind == FieldKind::Sequential
    }

    /// Number of marker tokens wrapped around every sequence.
    pub fn marker_count(&self) -> usize {
        usize::from(self.init_token.is_some()) + usize::from(self.eos_token.is_some())
    }

    /// Reserved tokens in vocabulary order: unk, pad, init, eos.
    pub fn specials(&self) -> Vec<String> {
        let candidates = [
            Some(&self.unk_token),
            self.pad_token.as_ref(),
            self.init_token.as_ref(),
            self.eos_token.as_ref(),
        ];

        let mut out: Vec<String> = Vec::new();
        for tok in candidates.into_iter().flatten() {
            if !out.contains(tok) {
                out.push(tok.clone());
            }
        }
        out
    }

    /// Maximum number of content tokens kept before markers are added.
    /// `None` means sequences are never truncated.
    pub fn max_content_len(&self) -> Option<usize> {
        self.fix_length
            .map(|len| len.saturating_sub(self.marker_count()))
    }

    /// Padded length of a batch whose longest raw sequence has `longest` tokens.
    pub fn padded_length(&self, longest: usize) -> usize {
        match self.fix_length {
            Some(len) => len.max(self.marker_count()),
            None      => longest + self.marker_count(),
        }
    }
}

// ─── ReviewFields ─────────────────────────────────────────────────────────────
/// The four fields of a review dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFields {
    pub item: FieldSpec,
    pub user: FieldSpec,
    pub text: FieldSpec,
    pub tips: FieldSpec,
}

impl ReviewFields {
    /// Standard review layout: categorical ids, `$start`/`$end`-wrapped
    /// text, and summaries padded to `max_summary_tokens + 2`.
    pub fn new(max_summary_tokens: usize, max_text_tokens: Option<usize>, lower: bool) -> Self {
        let text = FieldSpec::sequential("text")
            .lowercase(lower)
            .with_markers(INIT_TOKEN, EOS_TOKEN);
        let text_len = max_text_tokens.map(|n| n + text.marker_count());

        let tips = FieldSpec::sequential("tips")
            .lowercase(lower)
            .with_markers(INIT_TOKEN, EOS_TOKEN);
        let tips_len = max_summary_tokens + tips.marker_count();

        Self {
            item: FieldSpec::categorical("item"),
            user: FieldSpec::categorical("user"),
            text: text.with_fix_length(text_len),
            tips: tips.with_fix_length(Some(tips_len)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tips() -> FieldSpec {
        FieldSpec::sequential("tips")
            .lowercase(true)
            .with_markers(INIT_TOKEN, EOS_TOKEN)
            .with_fix_length(Some(7))
    }

    #[test]
    fn test_categorical_specials_are_unk_only() {
        assert_eq!(FieldSpec::categorical("item").specials(), vec!["<unk>"]);
    }

    #[test]
    fn test_sequential_specials_order() {
        assert_eq!(tips().specials(), vec!["<unk>", "<pad>", "$start", "$end"]);
    }

    #[test]
    fn test_duplicate_specials_collapse() {
        let f = FieldSpec::sequential("x").with_markers("<pad>", "$end");
        assert_eq!(f.specials(), vec!["<unk>", "<pad>", "$end"]);
    }

    #[test]
    fn test_fixed_length_leaves_room_for_markers() {
        assert_eq!(tips().max_content_len(), Some(5));
        assert_eq!(tips().padded_length(100), 7);
    }

    #[test]
    fn test_review_fields_layout() {
        let fields = ReviewFields::new(20, None, true);
        assert_eq!(fields.tips.fix_length, Some(22));
        assert_eq!(fields.text.fix_length, None);
        assert!(fields.text.lower);
        assert!(!fields.item.lower);
        assert!(!fields.user.is_sequential());
    }

    #[test]
    fn test_dynamic_length_adds_markers() {
        let text = FieldSpec::sequential("text").with_markers(INIT_TOKEN, EOS_TOKEN);
        assert_eq!(text.max_content_len(), None);
        assert_eq!(text.padded_length(4), 6);
    }
}
