// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// Three subcommands share one set of flags:
//
//   run     train the vocabulary, then encode every file
//   train   train and persist the vocabulary only
//   encode  encode every file with an existing vocabulary
//
// Running with no subcommand is the same as `run` with the
// defaults below.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::prepare_use_case::PrepareConfig;
use crate::domain::{
    policy::{DecodePolicy, ReadErrorPolicy},
    train_params::TrainParams,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the vocabulary, then encode every source file
    Run(PrepareArgs),

    /// Train the vocabulary and save vocab.json / merges.txt
    Train(PrepareArgs),

    /// Encode every source file with a previously trained vocabulary
    Encode(PrepareArgs),
}

/// Paths, filter and hyperparameters for a run.
#[derive(Args, Debug, Clone)]
pub struct PrepareArgs {
    /// JSON config file; when given, all other flags are ignored
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Root directory of the raw source files
    #[arg(long, default_value = "data/raw")]
    pub input_dir: PathBuf,

    /// Root directory the .ids files are mirrored into
    #[arg(long, default_value = "data/processed")]
    pub output_dir: PathBuf,

    /// Directory holding vocab.json and merges.txt
    #[arg(long, default_value = "data/tokenizer")]
    pub vocab_dir: PathBuf,

    /// Only files whose name ends with this are used
    #[arg(long, default_value = ".py")]
    pub extension: String,

    /// Target vocabulary size, special tokens included
    #[arg(long, default_value_t = 50_000)]
    pub vocab_size: usize,

    /// Minimum pair frequency for a merge
    #[arg(long, default_value_t = 2)]
    pub min_frequency: u64,

    /// What to do when a file cannot be read while encoding (abort | skip)
    #[arg(long, default_value_t = ReadErrorPolicy::Abort)]
    pub on_read_error: ReadErrorPolicy,

    /// How invalid UTF-8 is handled while encoding (ignore | strict)
    #[arg(long, default_value_t = DecodePolicy::Ignore)]
    pub on_decode_error: DecodePolicy,
}

impl Default for PrepareArgs {
    fn default() -> Self {
        let cfg = PrepareConfig::default();
        Self {
            config: None,
            input_dir: cfg.input_dir,
            output_dir: cfg.output_dir,
            vocab_dir: cfg.vocab_dir,
            extension: cfg.extension,
            vocab_size: cfg.train.vocab_size,
            min_frequency: cfg.train.min_frequency,
            on_read_error: cfg.on_read_error,
            on_decode_error: cfg.on_decode_error,
        }
    }
}

/// Flags → application config. The application layer never
/// sees clap types. A `--config` file is read by the caller.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            input_dir: a.input_dir,
            output_dir: a.output_dir,
            vocab_dir: a.vocab_dir,
            extension: a.extension,
            train: TrainParams {
                vocab_size: a.vocab_size,
                min_frequency: a.min_frequency,
                ..TrainParams::default()
            },
            on_read_error: a.on_read_error,
            on_decode_error: a.on_decode_error,
            ..PrepareConfig::default()
        }
    }
}
