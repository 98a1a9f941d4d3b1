// ============================================================
// Layer 6: Infrastructure Layer
// ============================================================
// Everything that touches persisted artifacts:
//
//   vocab_store.rs  Byte-level BPE vocabulary backed by the
//                   `tokenizers` crate. Trains from files,
//                   saves vocab.json + merges.txt, reloads
//                   them, and encodes text to ids.
//
//   id_writer.rs    Writes one TokenSequence artifact per
//                   source file under the output root.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Vocabulary training, saving, loading and encoding
pub mod vocab_store;

/// Token id artifact writer
pub mod id_writer;
