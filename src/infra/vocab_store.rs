// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Saves and restores vocabularies as JSON files.
//
// File naming convention:
//   vocab_dir/
//     item_vocab.json      ← one VocabRecord per field
//     user_vocab.json
//     text_vocab.json
//     tips_vocab.json
//     loader_config.json   ← LoaderConfig used for the build
//
// Shared vocabularies are written once per field, so after a
// reload the fields hold equal but separate Vocab instances.
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf, sync::Arc};

use crate::application::load_use_case::LoaderConfig;
use crate::data::vocab::{FieldVocabs, Vocab, VocabRecord};

pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn vocab_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}_vocab.json"))
    }

    pub fn save_vocab(&self, name: &str, vocab: &Vocab) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.vocab_path(name);
        let json = serde_json::to_string_pretty(&vocab.to_record())?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;

        tracing::debug!("Saved {} vocabulary ({} entries) to '{}'", name, vocab.len(), path.display());
        Ok(())
    }

    pub fn load_vocab(&self, name: &str) -> Result<Vocab> {
        let path = self.vocab_path(name);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read vocabulary from '{}'", path.display()))?;

        let record: VocabRecord = serde_json::from_str(&json)
            .with_context(|| format!("Malformed vocabulary file '{}'", path.display()))?;
        Vocab::from_record(record)
            .with_context(|| format!("Invalid vocabulary in '{}'", path.display()))
    }

    pub fn save_vocabs(&self, vocabs: &FieldVocabs) -> Result<()> {
        self.save_vocab("item", &vocabs.item)?;
        self.save_vocab("user", &vocabs.user)?;
        self.save_vocab("text", &vocabs.text)?;
        self.save_vocab("tips", &vocabs.tips)?;
        tracing::info!("Vocabularies saved to '{}'", self.dir.display());
        Ok(())
    }

    pub fn load_vocabs(&self) -> Result<FieldVocabs> {
        Ok(FieldVocabs {
            item: Arc::new(self.load_vocab("item")?),
            user: Arc::new(self.load_vocab("user")?),
            text: Arc::new(self.load_vocab("text")?),
            tips: Arc::new(self.load_vocab("tips")?),
        })
    }

    pub fn save_config(&self, cfg: &LoaderConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.dir.join("loader_config.json");
        fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved loader config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<LoaderConfig> {
        let path = self.dir.join("loader_config.json");
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}
