//! Batch processing of many input files.
//!
//! Inputs are processed one after another; a failing file is recorded and
//! the batch moves on.
use crate::api;
use crate::common::{Error, FailureKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Prefix of every output file name.
pub const OUTPUT_PREFIX: &str = "unlocked_";

/// Which entry point a batch runs for each input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Remove protection and normalize headers/footers
    Unlock,
    /// Merge each input into the shell of `model`
    Merge { model: PathBuf },
    /// Rebuild each input in a blank document
    Rebuild,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSuccess {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub input: PathBuf,
    pub error: Error,
}

/// Per-file outcomes of [`process_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub successes: Vec<FileSuccess>,
    pub failures: Vec<FileFailure>,
    /// Inputs that are not `.docx` files
    pub skipped: Vec<PathBuf>,
    pub message: String,
}

impl BatchReport {
    /// True when there were inputs and none of them produced an output.
    pub fn all_failed(&self) -> bool {
        self.successes.is_empty() && !(self.failures.is_empty() && self.skipped.is_empty())
    }

    fn summarize(&mut self) {
        let problems = self.failures.len() + self.skipped.len();
        self.message = if self.successes.is_empty() && problems == 0 {
            "No files to process.".to_string()
        } else if self.successes.is_empty() {
            format!("Failed to process files. Errors: {}", self.problem_list())
        } else if problems == 0 {
            format!("Processed {} file(s).", self.successes.len())
        } else {
            format!(
                "Processed {} file(s) (some files failed: {}).",
                self.successes.len(),
                problems
            )
        };
    }

    fn problem_list(&self) -> String {
        let failures = self
            .failures
            .iter()
            .map(|f| format!("error in {}: {}", display_name(&f.input), f.error));
        let skipped = self
            .skipped
            .iter()
            .map(|p| format!("skipped (not .docx): {}", display_name(p)));
        failures.chain(skipped).collect::<Vec<_>>().join("; ")
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn is_docx(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

/// Output path for `input`: `unlocked_<file name>` inside `output_dir`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}{}", OUTPUT_PREFIX, display_name(input)))
}

fn process_one(input: &Path, output: &Path, mode: &Mode) -> crate::common::Result<()> {
    match mode {
        Mode::Unlock => api::strip_and_normalize(input, output).map(drop),
        Mode::Merge { model } => api::merge_into_model(input, model, output).map(drop),
        Mode::Rebuild => api::rebuild_simple(input, output).map(drop),
    }
}

/// Run `mode` for every input, writing outputs to `output_dir`.
///
/// Non-`.docx` inputs are skipped. The output directory is created when
/// missing; if that fails every input is reported as failed.
pub fn process_batch<P: AsRef<Path>>(inputs: &[P], output_dir: &Path, mode: &Mode) -> BatchReport {
    let mut report = BatchReport::default();
    let dir_error = std::fs::create_dir_all(output_dir).err().map(Error::from);

    for input in inputs {
        let input = input.as_ref();
        if !is_docx(input) {
            warn!(input = %input.display(), "skipping non-docx input");
            report.skipped.push(input.to_path_buf());
            continue;
        }

        let output = output_path(input, output_dir);
        let outcome = match &dir_error {
            Some(err) => Err(err.clone()),
            None => process_one(input, &output, mode),
        };
        match outcome {
            Ok(()) => report.successes.push(FileSuccess {
                input: input.to_path_buf(),
                output,
            }),
            Err(error) => {
                warn!(input = %input.display(), kind = %error.kind(), %error, "file failed");
                report.failures.push(FileFailure {
                    input: input.to_path_buf(),
                    error,
                });
            },
        }
    }

    report.summarize();
    info!(
        succeeded = report.successes.len(),
        failed = report.failures.len(),
        skipped = report.skipped.len(),
        "batch finished"
    );
    report
}

impl FileFailure {
    pub fn kind(&self) -> FailureKind {
        self.error.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::Package;
    use crate::ooxml::docx::testing::DocxBuilder;
    use tempfile::TempDir;

    fn fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    fn protected() -> Vec<u8> {
        DocxBuilder::new("<w:p><w:r><w:t>text</w:t></w:r></w:p><w:sectPr/>")
            .settings(r#"<w:documentProtection w:edit="readOnly" w:enforcement="1"/>"#)
            .build()
    }

    #[test]
    fn test_batch_mixed_inputs() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let good = fixture(input_dir.path(), "report.docx", &protected());
        let broken = fixture(input_dir.path(), "broken.docx", b"not a zip");
        let notes = fixture(input_dir.path(), "notes.txt", b"hello");

        let report = process_batch(&[&good, &broken, &notes], output_dir.path(), &Mode::Unlock);

        assert_eq!(report.successes.len(), 1);
        let out = &report.successes[0].output;
        assert_eq!(out, &output_dir.path().join("unlocked_report.docx"));
        assert!(!Package::open(out).unwrap().settings().unwrap().is_protected());

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind(), FailureKind::InvalidPackage);
        assert_eq!(report.skipped, vec![notes]);
        assert!(!report.all_failed());
        assert_eq!(report.message, "Processed 1 file(s) (some files failed: 2).");
        assert!(!output_dir.path().join("unlocked_broken.docx").exists());
    }

    #[test]
    fn test_batch_all_failed() {
        let input_dir = TempDir::new().unwrap();
        let output_dir = TempDir::new().unwrap();
        let broken = fixture(input_dir.path(), "broken.docx", b"not a zip");

        let report = process_batch(&[broken], output_dir.path(), &Mode::Rebuild);
        assert!(report.all_failed());
        assert!(report.message.starts_with("Failed to process files. Errors: error in broken.docx"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failures"][0]["error"]["kind"], "InvalidPackage");
    }

    #[test]
    fn test_batch_merge_mode_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let model = fixture(dir.path(), "model.docx", &protected());
        let content = fixture(dir.path(), "Content.DOCX", &DocxBuilder::new("<w:p><w:r><w:t>new</w:t></w:r></w:p>").build());
        let output_dir = dir.path().join("out").join("nested");

        let report = process_batch(&[content], &output_dir, &Mode::Merge { model });
        assert_eq!(report.successes.len(), 1);
        let merged = Package::open(output_dir.join("unlocked_Content.DOCX")).unwrap();
        assert_eq!(merged.body().unwrap().text(), "new");
    }

    #[test]
    fn test_empty_batch() {
        let dir = TempDir::new().unwrap();
        let report = process_batch::<PathBuf>(&[], dir.path(), &Mode::Unlock);
        assert!(!report.all_failed());
        assert_eq!(report.message, "No files to process.");
    }
}
