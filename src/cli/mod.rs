// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, builds a PrepareConfig and hands
// it to a use case. Printing the final summary happens here;
// progress during the run goes through tracing.

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PrepareArgs};

use crate::application::{
    encode_use_case::{EncodeReport, EncodeUseCase},
    prepare_use_case::{PrepareConfig, PrepareUseCase},
    train_use_case::{TrainReport, TrainUseCase},
};
use crate::infra::vocab_store::ByteLevelBpe;

#[derive(Parser, Debug)]
#[command(
    name = "corpus-prep",
    version,
    about = "Train a byte-level BPE vocabulary on a source tree, then encode every file into token ids."
)]
pub struct Cli {
    /// What to do; defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            None => run_prepare(PrepareArgs::default()),
            Some(Commands::Run(args)) => run_prepare(args),
            Some(Commands::Train(args)) => run_train(args),
            Some(Commands::Encode(args)) => run_encode(args),
        }
    }
}

/// Use the JSON file when `--config` is given, else the flags.
fn resolve_config(args: PrepareArgs) -> Result<PrepareConfig> {
    match &args.config {
        Some(path) => {
            tracing::info!("Using config file '{}'", path.display());
            PrepareConfig::load_json(path)
        }
        None => Ok(args.into()),
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    let cfg = resolve_config(args)?;
    let report = PrepareUseCase::new(cfg.clone()).execute()?;

    print_train(&report.train, &cfg);
    print_encode(&report.encode, &cfg);
    Ok(())
}

fn run_train(args: PrepareArgs) -> Result<()> {
    let cfg = resolve_config(args)?;
    let (_, report) = TrainUseCase::new(cfg.clone()).execute::<ByteLevelBpe>()?;

    print_train(&report, &cfg);
    Ok(())
}

fn run_encode(args: PrepareArgs) -> Result<()> {
    let cfg = resolve_config(args)?;
    let report = EncodeUseCase::new(cfg.clone()).execute::<ByteLevelBpe>()?;

    print_encode(&report, &cfg);
    Ok(())
}

fn print_train(report: &TrainReport, cfg: &PrepareConfig) {
    println!(
        "Vocabulary trained on {}/{} files, saved to '{}'.",
        report.trained_on,
        report.discovered,
        cfg.vocab_dir.display()
    );
    if !report.skipped.is_empty() {
        println!("Skipped during training: {}", report.skipped.len());
    }
}

fn print_encode(report: &EncodeReport, cfg: &PrepareConfig) {
    println!(
        "Encoded {} files ({} tokens) into '{}'.",
        report.encoded,
        report.total_tokens,
        cfg.output_dir.display()
    );
    if !report.skipped.is_empty() {
        println!("Not encoded (unreadable): {}", report.skipped.len());
    }
}
