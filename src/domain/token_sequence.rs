// ============================================================
// Layer 3: TokenSequence Domain Type
// ============================================================
// The ordered token ids for one encoded file.
//
// On disk a TokenSequence is a single line of decimal ids
// separated by single spaces, with no trailing newline:
//
//   "31 7 1045 12"
//
// An empty sequence serialises to an empty string.

/// Token ids produced by encoding one cleaned source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    pub ids: Vec<u32>,
}

impl TokenSequence {
    pub fn new(ids: Vec<u32>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Serialise as space-separated decimal integers.
    pub fn to_line(&self) -> String {
        self.ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Vec<u32>> for TokenSequence {
    fn from(ids: Vec<u32>) -> Self {
        Self::new(ids)
    }
}
