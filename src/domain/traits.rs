// ============================================================
// Layer 3: Core Traits (Abstractions)
// ============================================================
// The subword tokenizer is an external capability. The rest of
// the system only ever talks to it through this trait, so the
// library behind it is an implementation detail:
//
//   - ByteLevelBpe (infra/vocab_store.rs) wraps `tokenizers`
//   - tests plug in a fake that needs no training
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use anyhow::Result;

use crate::domain::{token_sequence::TokenSequence, train_params::TrainParams};

// ─── SubwordTokenizer ─────────────────────────────────────────────────────────
/// A trainable, persistable subword vocabulary.
pub trait SubwordTokenizer: Sized {
    /// Train on the given files and persist the vocabulary artifacts
    /// into `vocab_dir`. `files` has already been probed for readability
    /// and is never empty.
    fn train(files: &[String], params: &TrainParams, vocab_dir: &Path) -> Result<Self>;

    /// Rebuild a vocabulary from the artifacts in `vocab_dir`.
    fn load(vocab_dir: &Path) -> Result<Self>;

    /// Convert cleaned text into token ids.
    fn encode(&self, text: &str) -> Result<TokenSequence>;
}
