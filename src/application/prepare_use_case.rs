// ============================================================
// Layer 2: PrepareUseCase
// ============================================================
// The full run, strictly in this order:
//
//   Step 1: Scan the input root                 (Layer 4 - data)
//   Step 2: Probe + train, persist vocabulary   (TrainUseCase)
//   Step 3: Reload vocabulary from disk         (Layer 6 - infra)
//   Step 4: Encode every scanned file           (EncodeUseCase)
//           except the ones the probe rejected
//
// The trained in-memory vocabulary is dropped after Step 2 and
// re-read from its artifacts in Step 3, so encoding depends only
// on what was persisted.
//
// There is no checkpointing. An interrupted run leaves the
// artifacts it already wrote; running again rewrites them all
// with the same content.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::application::{
    encode_use_case::{EncodeReport, EncodeUseCase},
    train_use_case::{TrainReport, TrainUseCase},
};
use crate::data::scanner::FileScanner;
use crate::domain::{
    policy::{DecodePolicy, ReadErrorPolicy},
    source_file::SourceFile,
    traits::SubwordTokenizer,
    train_params::TrainParams,
};
use crate::infra::vocab_store::ByteLevelBpe;

/// Name of the saved run config inside the vocabulary directory
pub const CONFIG_FILE: &str = "prepare_config.json";

// ─── Configuration ────────────────────────────────────────────────────────────
// Every path and knob of a run. Serialisable so a run can be
// described by a JSON file; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareConfig {
    /// Root of the raw source tree
    pub input_dir: PathBuf,
    /// Root the id artifacts are mirrored into
    pub output_dir: PathBuf,
    /// Where vocab.json and merges.txt are written and read
    pub vocab_dir: PathBuf,
    /// File name suffix that selects source files
    pub extension: String,
    /// Appended to each mirrored file name
    pub id_suffix: String,
    pub train: TrainParams,
    pub on_read_error: ReadErrorPolicy,
    pub on_decode_error: DecodePolicy,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/raw"),
            output_dir: PathBuf::from("data/processed"),
            vocab_dir: PathBuf::from("data/tokenizer"),
            extension: ".py".to_string(),
            id_suffix: ".ids".to_string(),
            train: TrainParams::default(),
            on_read_error: ReadErrorPolicy::default(),
            on_decode_error: DecodePolicy::default(),
        }
    }
}

impl PrepareConfig {
    /// Read a configuration from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))
    }

    /// Scan the input root for source files matching the extension.
    pub fn scan_sources(&self) -> Result<Vec<SourceFile>> {
        let files = FileScanner::new(&self.input_dir, &self.extension).scan()?;
        tracing::info!(
            "Found {} '{}' files under '{}'",
            files.len(),
            self.extension,
            self.input_dir.display()
        );
        Ok(files)
    }

    /// Write this configuration as pretty JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved config to '{}'", path.display());
        Ok(())
    }
}

// ─── Report ───────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default)]
pub struct PrepareReport {
    pub train: TrainReport,
    pub encode: EncodeReport,
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline with the byte-level BPE vocabulary.
    pub fn execute(&self) -> Result<PrepareReport> {
        self.execute_with::<ByteLevelBpe>()
    }

    /// Run the pipeline with any subword tokenizer.
    pub fn execute_with<T: SubwordTokenizer>(&self) -> Result<PrepareReport> {
        let cfg = &self.config;

        // ── Step 1: Scan ──────────────────────────────────────────────────────
        let files = cfg.scan_sources()?;

        // ── Step 2: Train and persist ─────────────────────────────────────────
        let (_, train) = TrainUseCase::new(cfg.clone()).train_on::<T>(&files)?;

        // ── Step 3: Reload from the artifacts ─────────────────────────────────
        let vocab = T::load(&cfg.vocab_dir)?;

        // ── Step 4: Encode everything that was scanned ────────────────────────
        // Files the probe rejected were already reported; skip them
        let encode =
            EncodeUseCase::new(cfg.clone()).encode_all(&vocab, &files, &train.skipped)?;

        Ok(PrepareReport { train, encode })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{config_in, write_file, FakeTokenizer};
    use crate::domain::error::PipelineError;
    use crate::infra::{
        id_writer::read_ids,
        vocab_store::{MERGES_FILE, VOCAB_FILE},
    };

    fn is_id_line(s: &str) -> bool {
        !s.contains('\n') && s.split(' ').all(|t| t.parse::<u32>().is_ok())
    }

    #[test]
    fn test_end_to_end_with_byte_level_bpe() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        cfg.train.vocab_size = 300;
        write_file(&cfg.input_dir, "a/x.py", "# hello\nprint(1)");
        write_file(&cfg.input_dir, "b/y.py", "\"\"\"doc\"\"\"\nprint(2)");

        let report = PrepareUseCase::new(cfg.clone()).execute().unwrap();

        assert_eq!(report.train.trained_on, 2);
        assert_eq!(report.encode.encoded, 2);
        assert!(cfg.vocab_dir.join(VOCAB_FILE).is_file());
        assert!(cfg.vocab_dir.join(MERGES_FILE).is_file());

        for rel in ["a/x.py.ids", "b/y.py.ids"] {
            let path = cfg.output_dir.join(rel);
            let line = fs::read_to_string(&path).unwrap();
            assert!(!line.is_empty(), "{rel} is empty");
            assert!(is_id_line(&line), "{rel}: {line:?}");
        }
    }

    #[test]
    fn test_rerun_produces_identical_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        cfg.train.vocab_size = 300;
        write_file(&cfg.input_dir, "pkg/mod.py", "def f(x):\n    return x * 2  # double\n");
        write_file(&cfg.input_dir, "main.py", "from pkg.mod import f\nprint(f(21))\n");

        let use_case = PrepareUseCase::new(cfg.clone());
        use_case.execute().unwrap();
        let first = read_ids(&cfg.output_dir.join("pkg/mod.py.ids")).unwrap();
        use_case.execute().unwrap();
        let second = read_ids(&cfg.output_dir.join("pkg/mod.py.ids")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_every_scanned_file_gets_one_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        write_file(&cfg.input_dir, "one.py", "1");
        write_file(&cfg.input_dir, "deep/two.py", "2");
        write_file(&cfg.input_dir, "deep/er/three.py", "");
        write_file(&cfg.input_dir, "deep/skip.md", "# not code");

        let report = PrepareUseCase::new(cfg.clone())
            .execute_with::<FakeTokenizer>()
            .unwrap();

        assert_eq!(report.encode.encoded, 3);
        assert!(cfg.output_dir.join("one.py.ids").is_file());
        assert!(cfg.output_dir.join("deep/two.py.ids").is_file());
        assert_eq!(
            fs::read_to_string(cfg.output_dir.join("deep/er/three.py.ids")).unwrap(),
            ""
        );
        assert!(!cfg.output_dir.join("deep/skip.md.ids").exists());
    }

    #[test]
    fn test_no_matching_files_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        write_file(&cfg.input_dir, "notes.txt", "nothing to see");

        let err = PrepareUseCase::new(cfg.clone())
            .execute_with::<FakeTokenizer>()
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::EmptyTrainingSet { .. })
        ));
        assert!(!cfg.output_dir.exists());
    }

    #[test]
    fn test_missing_input_root_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());

        assert!(PrepareUseCase::new(cfg).execute_with::<FakeTokenizer>().is_err());
    }

    #[cfg(unix)]
    fn dangling_symlink(cfg: &PrepareConfig, name: &str) -> PathBuf {
        let link = cfg.input_dir.join(name);
        std::os::unix::fs::symlink(cfg.input_dir.join("nowhere.txt"), &link).unwrap();
        link
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_candidate_does_not_abort_run_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(dir.path());
        assert_eq!(cfg.on_read_error, ReadErrorPolicy::Abort);
        write_file(&cfg.input_dir, "good.py", "print('ok')\n");
        let broken = dangling_symlink(&cfg, "broken.py");

        let report = PrepareUseCase::new(cfg.clone())
            .execute_with::<FakeTokenizer>()
            .unwrap();

        assert_eq!(report.train.discovered, 2);
        assert_eq!(report.train.trained_on, 1);
        assert_eq!(report.train.skipped, vec![broken.clone()]);
        assert_eq!(report.encode.encoded, 1);
        assert_eq!(report.encode.skipped, vec![broken]);
        assert!(cfg.output_dir.join("good.py.ids").is_file());
        assert!(!cfg.output_dir.join("broken.py.ids").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_candidate_is_skipped_under_skip_policy() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        cfg.on_read_error = ReadErrorPolicy::Skip;
        write_file(&cfg.input_dir, "good.py", "print('ok')\n");
        let broken = dangling_symlink(&cfg, "broken.py");

        let report = PrepareUseCase::new(cfg.clone())
            .execute_with::<FakeTokenizer>()
            .unwrap();

        assert_eq!(report.encode.encoded, 1);
        assert_eq!(report.encode.skipped, vec![broken]);
    }

    #[test]
    fn test_partial_json_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prep.json");
        fs::write(
            &path,
            r#"{ "input_dir": "corpus", "train": { "vocab_size": 8000 }, "on_read_error": "skip" }"#,
        )
        .unwrap();

        let cfg = PrepareConfig::load_json(&path).unwrap();

        assert_eq!(cfg.input_dir, PathBuf::from("corpus"));
        assert_eq!(cfg.output_dir, PathBuf::from("data/processed"));
        assert_eq!(cfg.train.vocab_size, 8000);
        assert_eq!(cfg.train.min_frequency, 2);
        assert_eq!(cfg.on_read_error, ReadErrorPolicy::Skip);
        assert_eq!(cfg.on_decode_error, DecodePolicy::Ignore);
    }

    #[test]
    fn test_saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prep.json");
        let mut cfg = config_in(dir.path());
        cfg.extension = ".rs".to_string();
        cfg.save_json(&path).unwrap();

        assert_eq!(PrepareConfig::load_json(&path).unwrap(), cfg);
    }
}
