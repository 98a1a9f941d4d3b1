// ============================================================
// Layer 3: Pipeline Errors
// ============================================================
// Most failures travel as anyhow::Error with context attached.
// The ones below are raised by our own checks, and callers
// (and tests) can recover them with `downcast_ref`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The readability probe left nothing to train on.
    #[error("no readable '{extension}' files to train on under '{}'", .root.display())]
    EmptyTrainingSet { root: PathBuf, extension: String },

    /// A path handed to the encoder does not live under the input root.
    #[error("'{}' is not under input root '{}'", .path.display(), .root.display())]
    OutsideInputRoot { path: PathBuf, root: PathBuf },

    /// A source file could not be opened or read.
    #[error("Cannot read '{}': {source}", .path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid UTF-8 in a source file while the decode policy is strict.
    #[error("'{}' is not valid UTF-8 (invalid byte at offset {offset})", .path.display())]
    UndecodableSource { path: PathBuf, offset: usize },
}

impl PipelineError {
    /// True for failures to get text out of a source file, the
    /// ones ReadErrorPolicy decides about.
    pub fn is_read_failure(&self) -> bool {
        matches!(
            self,
            Self::UnreadableSource { .. } | Self::UndecodableSource { .. }
        )
    }
}
