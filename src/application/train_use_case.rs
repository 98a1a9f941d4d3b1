// ============================================================
// Layer 2: TrainUseCase
// ============================================================
// Produces the vocabulary artifacts:
//
//   Step 1: Scan the input root         (Layer 4 - data)
//   Step 2: Probe each file for reading (this module)
//   Step 3: Train + persist vocabulary  (Layer 6 - infra)
//   Step 4: Save the run config beside the vocabulary
//
// The probe opens each candidate and reads one byte. Files that
// fail are left out of training with a warning. If nothing is
// left, training stops with PipelineError::EmptyTrainingSet
// instead of asking the library for a vocabulary of nothing.

use anyhow::Result;
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use crate::application::prepare_use_case::{PrepareConfig, CONFIG_FILE};
use crate::domain::{error::PipelineError, source_file::SourceFile, traits::SubwordTokenizer};

// ─── Probe ────────────────────────────────────────────────────────────────────

/// Open `path` and read a single byte. An empty file passes.
pub fn probe_readable(path: &Path) -> io::Result<()> {
    let mut first = Vec::with_capacity(1);
    File::open(path)?.take(1).read_to_end(&mut first)?;
    Ok(())
}

/// The files that survived the probe, and the ones that did not.
#[derive(Debug, Clone, Default)]
pub struct ProbeOutcome {
    /// Readable paths, as the strings the trainer consumes
    pub valid: Vec<String>,
    /// Paths left out of training
    pub skipped: Vec<PathBuf>,
}

/// Probe every candidate, warning once per skipped file.
pub fn probe_training_set(files: &[SourceFile]) -> ProbeOutcome {
    let mut outcome = ProbeOutcome::default();

    for file in files {
        let checked = probe_readable(&file.path).and_then(|()| {
            file.path_str().ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidData, "path is not valid UTF-8")
            })
        });

        match checked {
            Ok(path) => outcome.valid.push(path.to_string()),
            Err(e) => {
                tracing::warn!("Skipping {} ({})", file.path.display(), e);
                outcome.skipped.push(file.path.clone());
            }
        }
    }

    outcome
}

// ─── Report ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct TrainReport {
    /// Files matching the extension filter
    pub discovered: usize,
    /// Files the vocabulary was trained on
    pub trained_on: usize,
    /// Files the probe excluded
    pub skipped: Vec<PathBuf>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: PrepareConfig,
}

impl TrainUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Scan the input root, then probe and train.
    pub fn execute<T: SubwordTokenizer>(&self) -> Result<(T, TrainReport)> {
        let files = self.config.scan_sources()?;
        self.train_on(&files)
    }

    /// Probe `files` and train a vocabulary on the readable ones.
    /// The artifacts are written to the configured vocabulary dir.
    pub fn train_on<T: SubwordTokenizer>(&self, files: &[SourceFile]) -> Result<(T, TrainReport)> {
        let cfg = &self.config;

        tracing::info!("Training tokenizer...");
        let probe = probe_training_set(files);

        if probe.valid.is_empty() {
            return Err(PipelineError::EmptyTrainingSet {
                root: cfg.input_dir.clone(),
                extension: cfg.extension.clone(),
            }
            .into());
        }

        let vocab = T::train(&probe.valid, &cfg.train, &cfg.vocab_dir)?;

        // Record how this vocabulary was produced, next to its artifacts
        cfg.save_json(&cfg.vocab_dir.join(CONFIG_FILE))?;

        let report = TrainReport {
            discovered: files.len(),
            trained_on: probe.valid.len(),
            skipped: probe.skipped,
        };
        Ok((vocab, report))
    }
}
