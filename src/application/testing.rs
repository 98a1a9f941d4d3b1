// Test helpers shared by the use case tests.

use anyhow::{bail, Result};
use std::{fs, path::Path};

use crate::application::prepare_use_case::PrepareConfig;
use crate::domain::{
    token_sequence::TokenSequence, traits::SubwordTokenizer, train_params::TrainParams,
};
use crate::infra::vocab_store::{MERGES_FILE, VOCAB_FILE};

/// One id per byte, offset past the special tokens. Training only
/// records which files it was given and writes placeholder artifacts.
#[derive(Debug, Default)]
pub struct FakeTokenizer {
    pub trained_on: Vec<String>,
}

impl SubwordTokenizer for FakeTokenizer {
    fn train(files: &[String], params: &TrainParams, vocab_dir: &Path) -> Result<Self> {
        fs::create_dir_all(vocab_dir)?;
        fs::write(vocab_dir.join(VOCAB_FILE), format!("{{\"size\": {}}}", params.vocab_size))?;
        fs::write(vocab_dir.join(MERGES_FILE), "#version: 0.2\n")?;
        Ok(Self {
            trained_on: files.to_vec(),
        })
    }

    fn load(vocab_dir: &Path) -> Result<Self> {
        if !vocab_dir.join(VOCAB_FILE).is_file() || !vocab_dir.join(MERGES_FILE).is_file() {
            bail!("no vocabulary in '{}'", vocab_dir.display());
        }
        Ok(Self::default())
    }

    fn encode(&self, text: &str) -> Result<TokenSequence> {
        Ok(text.bytes().map(|b| b as u32 + 5).collect::<Vec<_>>().into())
    }
}

/// A config whose three directories live under `root`.
pub fn config_in(root: &Path) -> PrepareConfig {
    PrepareConfig {
        input_dir: root.join("raw"),
        output_dir: root.join("processed"),
        vocab_dir: root.join("tokenizer"),
        ..PrepareConfig::default()
    }
}

/// Write `contents` to `root/rel`, creating parents.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
