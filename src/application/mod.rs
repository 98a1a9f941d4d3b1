// ============================================================
// Layer 2: Application / Use Cases
// ============================================================
// Workflow coordination only. Each use case owns a copy of the
// PrepareConfig and drives the data and infra layers:
//
//   TrainUseCase    scan → probe → train → persist vocabulary
//   EncodeUseCase   load vocabulary → read → clean → encode → write
//   PrepareUseCase  both of the above, in that order
//
// Use cases are generic over SubwordTokenizer, so tests can run
// the whole flow with a fake vocabulary.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Vocabulary training workflow
pub mod train_use_case;

// Per-file encoding workflow
pub mod encode_use_case;

// Full run: train then encode
pub mod prepare_use_case;

#[cfg(test)]
pub(crate) mod testing;
