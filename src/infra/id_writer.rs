// ============================================================
// Layer 6: Token Id Writer
// ============================================================
// Persists a TokenSequence next to its mirrored source path:
//
//   data/raw/a/x.py  →  data/processed/a/x.py.ids
//
// The file holds one line of space-separated ids and is
// overwritten on every run, so re-encoding is idempotent.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::{source_file::SourceFile, token_sequence::TokenSequence};

/// Writes id artifacts under an output root.
pub struct IdWriter {
    output_root: PathBuf,
    suffix: String,
}

impl IdWriter {
    pub fn new(output_root: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            output_root: output_root.into(),
            suffix: suffix.into(),
        }
    }

    /// Where the artifact for `source` lives
    pub fn target(&self, source: &SourceFile) -> PathBuf {
        source.artifact_path(&self.output_root, &self.suffix)
    }

    /// Write `seq` for `source`, creating parent directories.
    /// Returns the path written.
    pub fn write(&self, source: &SourceFile, seq: &TokenSequence) -> Result<PathBuf> {
        let out_path = self.target(source);
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        fs::write(&out_path, seq.to_line())
            .with_context(|| format!("Cannot write '{}'", out_path.display()))?;

        tracing::debug!("Wrote {} ids to '{}'", seq.len(), out_path.display());
        Ok(out_path)
    }
}

/// Parse an id artifact back into a TokenSequence.
#[cfg(test)]
pub fn read_ids(path: &std::path::Path) -> Result<TokenSequence> {
    let line = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    let ids = line
        .split(' ')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .with_context(|| format!("Bad token id {s:?} in '{}'", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TokenSequence::new(ids))
}
