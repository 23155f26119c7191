// ============================================================
// Layer 4 — Review Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<ReviewExample>
// into integer tensors on the target device.
//
// Shapes (N = number of examples in the batch):
//
//   item  [N]            vocabulary index of each product id
//   user  [N]            vocabulary index of each reviewer id
//   text  [T, N]         T = longest review + 2 markers
//                        (or the fixed text length if set)
//   tips  [L, N]         L = fixed summary length
//
// Sequence tensors are time-major: column j is example j.
//
// Padding one sequence with fixed length 6:
//   ["nice", "and", "cheap", "but", "slow"]
//     → truncate to 4 → [$start nice and cheap but $end]
//   ["meh"]
//     → [$start meh $end <pad> <pad> <pad>]
//
// Reference: Burn Book §4 (Batcher)

use std::sync::Arc;

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::ReviewExample;
use crate::data::vocab::{FieldVocabs, Vocab};
use crate::domain::field::{FieldSpec, ReviewFields, PAD_TOKEN};

// ─── ReviewBatch ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct ReviewBatch<B: Backend> {
    pub item: Tensor<B, 1, Int>,
    pub user: Tensor<B, 1, Int>,
    pub text: Tensor<B, 2, Int>,
    pub tips: Tensor<B, 2, Int>,
}

impl<B: Backend> ReviewBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.item.dims()[0]
    }
}

// ─── ReviewBatcher ────────────────────────────────────────────────────────────
/// Holds the device, the field layout and the frozen vocabularies.
#[derive(Clone, Debug)]
pub struct ReviewBatcher<B: Backend> {
    device: B::Device,
    fields: Arc<ReviewFields>,
    vocabs: FieldVocabs,
}

impl<B: Backend> ReviewBatcher<B> {
    pub fn new(device: B::Device, fields: Arc<ReviewFields>, vocabs: FieldVocabs) -> Self {
        Self { device, fields, vocabs }
    }

    fn categorical(&self, vocab: &Vocab, values: Vec<&str>) -> Tensor<B, 1, Int> {
        let ids: Vec<i64> = values.iter().map(|v| vocab.stoi(v) as i64).collect();
        let n = ids.len();
        Tensor::from_data(TensorData::new(ids, [n]), &self.device)
    }

    fn sequential(
        &self,
        field: &FieldSpec,
        vocab: &Vocab,
        seqs:  Vec<&[String]>,
    ) -> Tensor<B, 2, Int> {
        let batch_size = seqs.len();
        let padded     = pad(field, &seqs);
        let (flat, seq_len) = time_major_ids(&padded, vocab);
        Tensor::from_data(TensorData::new(flat, [seq_len, batch_size]), &self.device)
    }
}

impl<B: Backend> Batcher<ReviewExample, ReviewBatch<B>> for ReviewBatcher<B> {
    fn batch(&self, items: Vec<ReviewExample>) -> ReviewBatch<B> {
        let item = self.categorical(
            &self.vocabs.item,
            items.iter().map(|ex| ex.item.as_str()).collect(),
        );
        let user = self.categorical(
            &self.vocabs.user,
            items.iter().map(|ex| ex.user.as_str()).collect(),
        );
        let text = self.sequential(
            &self.fields.text,
            &self.vocabs.text,
            items.iter().map(|ex| ex.text.as_slice()).collect(),
        );
        let tips = self.sequential(
            &self.fields.tips,
            &self.vocabs.tips,
            items.iter().map(|ex| ex.tips.as_slice()).collect(),
        );

        ReviewBatch { item, user, text, tips }
    }
}

/// Truncate, wrap in markers and pad every sequence to a common length.
///
/// Steps:
///   1. Find the longest sequence after truncation
///   2. Work out the padded length (fixed, or longest + markers)
///   3. Build each row: init marker, content, eos marker, padding
pub fn pad(field: &FieldSpec, seqs: &[&[String]]) -> Vec<Vec<String>> {
    // Step 1: content budget per row (None = unlimited)
    let keep    = field.max_content_len();
    let longest = seqs
        .iter()
        .map(|s| keep.map_or(s.len(), |k| s.len().min(k)))
        .max()
        .unwrap_or(0);

    // Step 2: a fixed length wins over the batch's longest row
    let target  = field.padded_length(longest);
    let pad_tok = field.pad_token.as_deref().unwrap_or(PAD_TOKEN);

    // Step 3: markers always survive truncation; only content is cut
    seqs.iter()
        .map(|seq| {
            let content = match keep {
                Some(k) => &seq[..seq.len().min(k)],
                None    => *seq,
            };

            let mut out = Vec::with_capacity(target);
            out.extend(field.init_token.iter().cloned());
            out.extend(content.iter().cloned());
            out.extend(field.eos_token.iter().cloned());
            out.resize(target, pad_tok.to_string());
            out
        })
        .collect()
}

/// Flatten padded sequences into time-major order `[t0 of every row, t1 ...]`.
/// Returns the ids and the sequence length.
//
// Why time-major?
//   The tensor is [seq_len, batch]. Row t holds token t of every
//   example, so position t of all rows must be adjacent in `flat`:
//
//   padded:  [a0 a1 a2]      flat: [a0 b0, a1 b1, a2 b2]
//            [b0 b1 b2]
fn time_major_ids(padded: &[Vec<String>], vocab: &Vocab) -> (Vec<i64>, usize) {
    // Every row has the same length after `pad`
    let seq_len = padded.first().map_or(0, Vec::len);
    let mut flat = Vec::with_capacity(seq_len * padded.len());

    // Outer loop over time, inner over examples
    for t in 0..seq_len {
        for row in padded {
            flat.push(vocab.stoi(&row[t]) as i64);
        }
    }
    (flat, seq_len)
}
