// ============================================================
// Layer 6: Vocabulary Store
// ============================================================
// Byte-level BPE vocabulary on top of the `tokenizers` crate.
//
// Pipeline layout (same as a GPT-2 style byte-level BPE):
//   pre-tokenizer   ByteLevel, no prefix space
//   model           BPE
//   post-processor  ByteLevel (adds no special tokens)
//   decoder         ByteLevel
//
// The trainer is seeded with the full 256-symbol byte alphabet,
// so any input byte can be encoded without an unknown token.
// Special tokens are registered first and take ids 0, 1, 2, ...
//
// Artifacts written to the vocabulary directory:
//   vocab.json   symbol → id table
//   merges.txt   ordered merge rules
//
// Loading rebuilds the same pipeline from that pair of files,
// so train-time and encode-time state never share memory.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tokenizers::{
    models::bpe::{BpeTrainerBuilder, BPE},
    normalizers::NormalizerWrapper,
    pre_tokenizers::byte_level::ByteLevel,
    AddedToken, Model, TokenizerBuilder, TokenizerImpl,
};

use crate::domain::{
    token_sequence::TokenSequence, traits::SubwordTokenizer, train_params::TrainParams,
};

/// Symbol table file name inside the vocabulary directory
pub const VOCAB_FILE: &str = "vocab.json";

/// Merge-rule file name inside the vocabulary directory
pub const MERGES_FILE: &str = "merges.txt";

type ByteLevelTokenizer = TokenizerImpl<BPE, NormalizerWrapper, ByteLevel, ByteLevel, ByteLevel>;

/// A trained (or reloaded) byte-level BPE vocabulary.
pub struct ByteLevelBpe {
    inner: ByteLevelTokenizer,
}

impl ByteLevelBpe {
    /// Paths of the two artifacts inside `vocab_dir`
    pub fn artifact_paths(vocab_dir: &Path) -> (PathBuf, PathBuf) {
        (vocab_dir.join(VOCAB_FILE), vocab_dir.join(MERGES_FILE))
    }

    /// True when both artifacts are present in `vocab_dir`
    pub fn exists_in(vocab_dir: &Path) -> bool {
        let (vocab, merges) = Self::artifact_paths(vocab_dir);
        vocab.is_file() && merges.is_file()
    }

    fn with_model(model: BPE) -> Result<ByteLevelTokenizer> {
        let byte_level = ByteLevel::default()
            .add_prefix_space(false)
            .trim_offsets(false);

        TokenizerBuilder::new()
            .with_model(model)
            .with_normalizer(None)
            .with_pre_tokenizer(Some(byte_level))
            .with_post_processor(Some(byte_level))
            .with_decoder(Some(byte_level))
            .build()
            .map_err(|e| anyhow::anyhow!("Cannot assemble byte-level tokenizer: {e}"))
    }
}

impl SubwordTokenizer for ByteLevelBpe {
    fn train(files: &[String], params: &TrainParams, vocab_dir: &Path) -> Result<Self> {
        tracing::info!(
            "Training byte-level BPE on {} files (vocab_size={}, min_frequency={})",
            files.len(),
            params.vocab_size,
            params.min_frequency
        );

        let special_tokens = params
            .special_tokens
            .iter()
            .map(|t| AddedToken::from(t.clone(), true))
            .collect::<Vec<_>>();

        let mut trainer = BpeTrainerBuilder::new()
            .show_progress(false)
            .vocab_size(params.vocab_size)
            .min_frequency(params.min_frequency)
            .special_tokens(special_tokens)
            .initial_alphabet(ByteLevel::alphabet())
            .build();

        let mut tokenizer = Self::with_model(BPE::default())?;
        tokenizer
            .train_from_files(&mut trainer, files.to_vec())
            .map_err(|e| anyhow::anyhow!("BPE training failed: {e}"))?;

        fs::create_dir_all(vocab_dir).with_context(|| {
            format!("Cannot create vocabulary directory '{}'", vocab_dir.display())
        })?;
        let written = tokenizer
            .get_model()
            .save(vocab_dir, None)
            .map_err(|e| {
                anyhow::anyhow!("Cannot save vocabulary to '{}': {e}", vocab_dir.display())
            })?;

        tracing::info!(
            "Vocabulary trained with {} symbols, saved {} artifacts to '{}'",
            tokenizer.get_vocab_size(false),
            written.len(),
            vocab_dir.display()
        );

        Ok(Self { inner: tokenizer })
    }

    fn load(vocab_dir: &Path) -> Result<Self> {
        let (vocab, merges) = Self::artifact_paths(vocab_dir);
        if !Self::exists_in(vocab_dir) {
            anyhow::bail!(
                "No vocabulary in '{}' (expected {} and {}). Have you run 'train' first?",
                vocab_dir.display(),
                VOCAB_FILE,
                MERGES_FILE
            );
        }

        let model = BPE::from_file(&vocab.to_string_lossy(), &merges.to_string_lossy())
            .build()
            .map_err(|e| {
                anyhow::anyhow!("Cannot load vocabulary from '{}': {e}", vocab_dir.display())
            })?;

        tracing::debug!("Loaded vocabulary from '{}'", vocab_dir.display());
        Ok(Self {
            inner: Self::with_model(model)?,
        })
    }

    fn encode(&self, text: &str) -> Result<TokenSequence> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;
        Ok(TokenSequence::new(encoding.get_ids().to_vec()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(dir: &Path) -> Vec<String> {
        let texts = [
            "def add(a, b):\n    return a + b\n",
            "def sub(a, b):\n    return a - b\n",
            "print(add(1, 2))\nprint(sub(3, 4))\n",
        ];
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let path = dir.join(format!("f{i}.py"));
                fs::write(&path, t).unwrap();
                path.to_string_lossy().into_owned()
            })
            .collect()
    }

    fn small_params() -> TrainParams {
        TrainParams {
            vocab_size: 400,
            ..TrainParams::default()
        }
    }

    #[test]
    fn test_train_writes_both_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let vocab_dir = dir.path().join("tokenizer");
        let files = corpus(dir.path());

        ByteLevelBpe::train(&files, &small_params(), &vocab_dir).unwrap();

        assert!(vocab_dir.join(VOCAB_FILE).is_file());
        assert!(vocab_dir.join(MERGES_FILE).is_file());
        assert!(ByteLevelBpe::exists_in(&vocab_dir));
    }

    #[test]
    fn test_special_tokens_take_lowest_ids() {
        let dir = tempfile::tempdir().unwrap();
        let vocab_dir = dir.path().join("tokenizer");
        let files = corpus(dir.path());
        ByteLevelBpe::train(&files, &small_params(), &vocab_dir).unwrap();

        let vocab = ByteLevelBpe::load(&vocab_dir).unwrap();
        for (id, token) in TrainParams::default().special_tokens.iter().enumerate() {
            assert_eq!(vocab.inner.token_to_id(token), Some(id as u32), "token {token}");
        }
    }

    #[test]
    fn test_reloaded_vocabulary_encodes_like_trained_one() {
        let dir = tempfile::tempdir().unwrap();
        let vocab_dir = dir.path().join("tokenizer");
        let files = corpus(dir.path());

        let trained = ByteLevelBpe::train(&files, &small_params(), &vocab_dir).unwrap();
        let loaded = ByteLevelBpe::load(&vocab_dir).unwrap();

        let text = "def mul(a, b):\n    return a * b\n";
        let a = trained.encode(text).unwrap();
        let b = loaded.encode(text).unwrap();
        assert!(!a.ids.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_unseen_bytes_still_encode() {
        let dir = tempfile::tempdir().unwrap();
        let vocab_dir = dir.path().join("tokenizer");
        let files = corpus(dir.path());
        let vocab = ByteLevelBpe::train(&files, &small_params(), &vocab_dir).unwrap();

        // None of these characters occur in the corpus
        let seq = vocab.encode("λ → ✓").unwrap();
        assert!(!seq.ids.is_empty());
    }

    #[test]
    fn test_load_without_artifacts_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ByteLevelBpe::load(dir.path()).is_err());
    }
}
