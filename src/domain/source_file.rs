// ============================================================
// Layer 3: SourceFile Domain Type
// ============================================================
// A file discovered under the input root. We keep both the
// full path (used to open the file) and the path relative to
// the root (used to mirror the file under the output root).

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::domain::error::PipelineError;

/// A raw source file found by the scanner.
/// Never mutated: the encoder only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path used to open the file, rooted at the input directory
    pub path: PathBuf,

    /// Path relative to the input root, e.g. `a/x.py`
    pub relative: PathBuf,
}

impl SourceFile {
    /// Build a SourceFile from a path that lives under `root`.
    /// Fails if the path is not actually inside the root.
    pub fn under_root(root: &Path, path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let path = path.into();
        let relative = path
            .strip_prefix(root)
            .map_err(|_| PipelineError::OutsideInputRoot {
                path: path.clone(),
                root: root.to_path_buf(),
            })?
            .to_path_buf();
        Ok(Self { path, relative })
    }

    /// Where the id artifact for this file goes: the relative path
    /// re-rooted at `output_root`, with `suffix` appended to the
    /// file name (`a/x.py` + `.ids` -> `out/a/x.py.ids`).
    pub fn artifact_path(&self, output_root: &Path, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.relative.as_os_str());
        name.push(suffix);
        output_root.join(name)
    }

    /// The path as a string for the training library, which only
    /// accepts UTF-8 file names.
    pub fn path_str(&self) -> Option<&str> {
        self.path.to_str()
    }
}
