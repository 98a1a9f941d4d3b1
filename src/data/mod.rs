// ============================================================
// Layer 4: Data Pipeline
// ============================================================
// Everything between "a directory on disk" and "clean text
// ready for the tokenizer":
//
//   input root
//       │
//       ▼
//   FileScanner    → walks the tree, keeps files by extension
//       │
//       ▼
//   loader         → reads bytes, decodes per DecodePolicy
//       │
//       ▼
//   TextCleaner    → strips docstrings and # comments
//
// Each module does exactly one step and is tested on its own.

/// Recursive directory walk with an extension filter
pub mod scanner;

/// Reads a source file and decodes it to text
pub mod loader;

/// Regex-based docstring and comment stripping
pub mod cleaner;
