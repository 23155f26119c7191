use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One preprocessed review. Ids are kept verbatim; text and summary
/// are tokenised but not yet wrapped in markers or padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewExample {
    pub item: String,
    pub user: String,
    pub text: Vec<String>,
    pub tips: Vec<String>,
}

impl ReviewExample {
    pub fn new(
        item: impl Into<String>,
        user: impl Into<String>,
        text: Vec<String>,
        tips: Vec<String>,
    ) -> Self {
        Self { item: item.into(), user: user.into(), text, tips }
    }
}

pub struct ReviewDataset {
    examples: Vec<ReviewExample>,
}

impl ReviewDataset {
    pub fn new(examples: Vec<ReviewExample>) -> Self { Self { examples } }

    pub fn examples(&self) -> &[ReviewExample] { &self.examples }
}

impl Dataset<ReviewExample> for ReviewDataset {
    fn get(&self, index: usize) -> Option<ReviewExample> {
        self.examples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.examples.len()
    }
}
