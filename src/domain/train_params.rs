// ============================================================
// Layer 3: Training Hyperparameters
// ============================================================
// The only knobs the pipeline turns on the subword trainer.
// Everything else about training belongs to the library.

use serde::{Deserialize, Serialize};

/// Reserved tokens, in id order: `<pad>` is 0, `<mask>` is 4.
pub const DEFAULT_SPECIAL_TOKENS: [&str; 5] = ["<pad>", "<s>", "</s>", "<unk>", "<mask>"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainParams {
    /// Target number of symbols, special tokens included
    pub vocab_size: usize,

    /// A pair must occur at least this often to be merged
    pub min_frequency: u64,

    /// Reserved tokens; they occupy the lowest ids in this order
    pub special_tokens: Vec<String>,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            vocab_size: 50_000,
            min_frequency: 2,
            special_tokens: DEFAULT_SPECIAL_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
