// ============================================================
// Layer 4: Source Loader
// ============================================================
// Reads one source file into a String.
//
// The bytes are decoded as UTF-8 under a DecodePolicy:
//   Ignore  invalid sequences are dropped, the rest is kept
//   Strict  invalid UTF-8 fails the file
//
// Line endings are normalised the way a text-mode read would:
// "\r\n" and a lone "\r" both become "\n".
//
// The file handle lives only inside `fs::read`, so it is closed
// before this function returns on every path.

use anyhow::Result;
use std::{fs, path::Path};

use crate::domain::{error::PipelineError, policy::DecodePolicy};

/// Read and decode a source file.
pub fn read_source(path: &Path, policy: DecodePolicy) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| PipelineError::UnreadableSource {
        path: path.to_path_buf(),
        source,
    })?;

    let text = match policy {
        DecodePolicy::Ignore => decode_ignoring_invalid(&bytes),
        DecodePolicy::Strict => String::from_utf8(bytes).map_err(|e| {
            PipelineError::UndecodableSource {
                path: path.to_path_buf(),
                offset: e.utf8_error().valid_up_to(),
            }
        })?,
    };

    Ok(normalize_newlines(text))
}

/// Decode UTF-8, silently dropping any invalid byte sequences.
/// Unlike `from_utf8_lossy` no U+FFFD replacement is inserted.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
