// ============================================================
// Layer 3: Failure Policies
// ============================================================
// Encoding tolerates undecodable bytes but aborts on an
// outright read failure. Both behaviours are configurable;
// the defaults keep that asymmetry.
//
// Parsed from strings with FromStr so both clap flags and
// JSON config files can name them ("abort", "skip", ...).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// What the encode phase does when a source file cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadErrorPolicy {
    /// Propagate the error and stop the batch.
    #[default]
    Abort,
    /// Warn, record the path, and move on to the next file.
    Skip,
}

impl FromStr for ReadErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            _ => Err(format!(
                "invalid read error policy: {s:?} (expected \"abort\" or \"skip\")"
            )),
        }
    }
}

impl fmt::Display for ReadErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Abort => f.write_str("abort"),
            Self::Skip => f.write_str("skip"),
        }
    }
}

/// How source bytes that are not valid UTF-8 are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodePolicy {
    /// Drop invalid sequences and keep the rest of the text.
    #[default]
    Ignore,
    /// Treat invalid UTF-8 as a read failure for that file.
    Strict,
}

impl FromStr for DecodePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "strict" => Ok(Self::Strict),
            _ => Err(format!(
                "invalid decode policy: {s:?} (expected \"ignore\" or \"strict\")"
            )),
        }
    }
}

impl fmt::Display for DecodePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => f.write_str("ignore"),
            Self::Strict => f.write_str("strict"),
        }
    }
}
