// ============================================================
// Layer 2: EncodeUseCase
// ============================================================
// Turns every discovered source file into an id artifact:
//
//   read (DecodePolicy) → clean → encode → write
//
// The vocabulary is always loaded from disk first, so encoding
// sees exactly what was persisted by training.
//
// Files the training probe already rejected are reported as
// skipped, never re-read. Other read failures follow the
// ReadErrorPolicy. Anything after a successful read
// (tokenisation, creating directories, writing the artifact)
// aborts the batch.

use anyhow::Result;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use crate::application::prepare_use_case::PrepareConfig;
use crate::data::{cleaner::TextCleaner, loader::read_source};
use crate::domain::{
    error::PipelineError,
    policy::{DecodePolicy, ReadErrorPolicy},
    source_file::SourceFile,
    token_sequence::TokenSequence,
    traits::SubwordTokenizer,
};
use crate::infra::id_writer::IdWriter;

// ─── FileEncoder ──────────────────────────────────────────────────────────────
/// Encodes single files against a fixed vocabulary.
pub struct FileEncoder<'v, T> {
    vocab: &'v T,
    cleaner: TextCleaner,
    writer: IdWriter,
    decode: DecodePolicy,
}

impl<'v, T: SubwordTokenizer> FileEncoder<'v, T> {
    pub fn new(vocab: &'v T, writer: IdWriter, decode: DecodePolicy) -> Self {
        Self {
            vocab,
            cleaner: TextCleaner::new(),
            writer,
            decode,
        }
    }

    /// Read, clean, encode and persist one file.
    pub fn encode(&self, source: &SourceFile) -> Result<TokenSequence> {
        let raw = read_source(&source.path, self.decode)?;
        self.encode_text(source, &raw)
    }

    /// Clean `raw`, encode it and write the artifact for `source`.
    pub fn encode_text(&self, source: &SourceFile, raw: &str) -> Result<TokenSequence> {
        let cleaned = self.cleaner.clean(raw);
        let seq = self.vocab.encode(&cleaned)?;
        self.writer.write(source, &seq)?;
        Ok(seq)
    }
}

// ─── Report ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct EncodeReport {
    /// Artifacts written
    pub encoded: usize,
    /// Files excluded by the training probe, or unreadable
    /// under ReadErrorPolicy::Skip
    pub skipped: Vec<PathBuf>,
    /// Sum of ids across all written artifacts
    pub total_tokens: usize,
}

// ─── EncodeUseCase ────────────────────────────────────────────────────────────
pub struct EncodeUseCase {
    config: PrepareConfig,
}

impl EncodeUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Scan the input root, load the persisted vocabulary and
    /// encode every file.
    pub fn execute<T: SubwordTokenizer>(&self) -> Result<EncodeReport> {
        let files = self.config.scan_sources()?;
        let vocab = T::load(&self.config.vocab_dir)?;
        self.encode_all(&vocab, &files, &[])
    }

    /// Encode `files` in order with an already-loaded vocabulary.
    ///
    /// Paths in `excluded` were already rejected (and warned about)
    /// by the training probe: they are reported as skipped without
    /// being read again.
    pub fn encode_all<T: SubwordTokenizer>(
        &self,
        vocab: &T,
        files: &[SourceFile],
        excluded: &[PathBuf],
    ) -> Result<EncodeReport> {
        let cfg = &self.config;
        tracing::info!("Encoding files...");

        let excluded: HashSet<&Path> = excluded.iter().map(PathBuf::as_path).collect();
        let writer = IdWriter::new(&cfg.output_dir, &cfg.id_suffix);
        let encoder = FileEncoder::new(vocab, writer, cfg.on_decode_error);
        let mut report = EncodeReport::default();

        for file in files {
            if excluded.contains(file.path.as_path()) {
                tracing::debug!("Not encoding '{}': excluded from training", file.path.display());
                report.skipped.push(file.path.clone());
                continue;
            }

            let seq = match encoder.encode(file) {
                Ok(seq) => seq,
                Err(e) if is_read_failure(&e) && cfg.on_read_error == ReadErrorPolicy::Skip => {
                    tracing::warn!("Not encoding {}: {:#}", file.path.display(), e);
                    report.skipped.push(file.path.clone());
                    continue;
                }
                Err(e) => return Err(e),
            };

            tracing::debug!("Encoded '{}' ({} ids)", file.relative.display(), seq.len());
            report.encoded += 1;
            report.total_tokens += seq.len();
        }

        tracing::info!(
            "Encoded {} files ({} tokens) into '{}'",
            report.encoded,
            report.total_tokens,
            cfg.output_dir.display()
        );
        Ok(report)
    }
}

fn is_read_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PipelineError>()
        .is_some_and(PipelineError::is_read_failure)
}
