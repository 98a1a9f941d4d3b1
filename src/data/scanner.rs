// ============================================================
// Layer 4: File Scanner
// ============================================================
// Walks the input root recursively and collects every file
// whose name ends with the configured extension (".py").
//
// Ordering: entries are sorted by name inside each directory
// and the walk is depth-first, so the same tree always yields
// the same list. Training and encoding both iterate this list.
//
// What counts as a file: anything that is not a directory.
// Symlinks to directories are not followed; symlinks to files
// (including dangling ones) are returned and left for the
// readability probe to judge.
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::source_file::SourceFile;

/// Finds source files under a root directory.
pub struct FileScanner {
    /// Directory to walk
    root: PathBuf,
    /// Suffix a file name must end with, e.g. ".py"
    extension: String,
}

impl FileScanner {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    /// Collect every matching file under the root.
    ///
    /// A root that is missing, is not a directory, or cannot be
    /// listed is not an error: it yields an empty list so the caller
    /// can decide (training reports an empty corpus).
    pub fn scan(&self) -> Result<Vec<SourceFile>> {
        if !self.root.is_dir() {
            tracing::warn!(
                "Input directory '{}' does not exist or is not a directory; nothing to scan",
                self.root.display()
            );
            return Ok(Vec::new());
        }

        let entries = match read_sorted(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot read directory '{}': {}", self.root.display(), e);
                return Ok(Vec::new());
            }
        };

        let mut found = Vec::new();
        self.walk(entries, &mut found)?;

        tracing::debug!(
            "Scanned '{}': {} '{}' files",
            self.root.display(),
            found.len(),
            self.extension
        );
        Ok(found)
    }

    fn walk(&self, entries: Vec<fs::DirEntry>, found: &mut Vec<SourceFile>) -> Result<()> {
        for entry in entries {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .with_context(|| format!("Cannot stat '{}'", path.display()))?;

            if file_type.is_dir() {
                // Unreadable subdirectories are skipped, not fatal
                match read_sorted(&path) {
                    Ok(children) => self.walk(children, found)?,
                    Err(e) => tracing::warn!("Skipping directory '{}': {}", path.display(), e),
                }
                continue;
            }

            if file_type.is_symlink() && path.is_dir() {
                continue;
            }

            if self.matches(&entry.file_name().to_string_lossy()) {
                found.push(SourceFile::under_root(&self.root, path)?);
            }
        }
        Ok(())
    }

    fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension)
    }
}

/// Read a directory's entries, sorted by file name.
fn read_sorted(dir: &Path) -> std::io::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}
