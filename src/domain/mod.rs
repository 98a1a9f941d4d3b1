// ============================================================
// Layer 3: Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that name the core
// concepts of the corpus pipeline:
//
//   SourceFile        a discovered file under the input root
//   TokenSequence     the encoded ids for one file
//   TrainParams       the trainer's fixed hyperparameters
//   ReadErrorPolicy,
//   DecodePolicy      how encoding reacts to bad files
//   PipelineError     failures callers may want to match on
//   SubwordTokenizer  the narrow train/load/encode seam
//
// Rules for this layer:
//   - NO tokenizers-crate types
//   - NO directory walking or artifact writing
//   - Only the vocabulary of the system
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A source file found by the scanner
pub mod source_file;

// Encoded token ids for one file
pub mod token_sequence;

// Typed pipeline failures
pub mod error;

// Core abstractions that other layers implement
pub mod traits;

// What to do when a file cannot be read or decoded
pub mod policy;

// Fixed hyperparameters handed to the tokenizer trainer
pub mod train_params;
