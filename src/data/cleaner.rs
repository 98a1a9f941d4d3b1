// ============================================================
// Layer 4: Text Cleaner
// ============================================================
// Strips docstrings and line comments from source text before
// tokenisation, so the vocabulary is spent on code.
//
// Cleaning steps (applied in order):
//   1. Remove every `"""` ... `"""` block, non-greedy, across lines
//   2. Remove every run from `#` to the end of its line
//
// Known limitation: this is a lexical strip, not a parser. A `#`
// or `"""` inside a string literal is treated like the real thing,
// so `url = "http://x#frag"` loses `#frag"`. Kept as is; output
// for those inputs must stay stable.

use regex::Regex;

const DOCSTRING_PATTERN: &str = r#"(?s)""".*?""""#;
const LINE_COMMENT_PATTERN: &str = r"#.*";

/// Compiled patterns for stripping comments.
/// Build once and reuse for every file.
pub struct TextCleaner {
    docstring: Regex,
    line_comment: Regex,
}

impl TextCleaner {
    pub fn new() -> Self {
        Self {
            docstring: Regex::new(DOCSTRING_PATTERN).expect("docstring pattern is valid"),
            line_comment: Regex::new(LINE_COMMENT_PATTERN).expect("comment pattern is valid"),
        }
    }

    /// Return `text` with docstrings and `#` comments removed.
    pub fn clean(&self, text: &str) -> String {
        let without_docstrings = self.docstring.replace_all(text, "");
        self.line_comment
            .replace_all(&without_docstrings, "")
            .into_owned()
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}
