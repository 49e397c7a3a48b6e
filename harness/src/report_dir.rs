//! Persist and reload run reports as a two-file directory.
//!
//! Layout: `run_report.json` (canonical JSON) and `digest.txt` (the
//! report's content hash, no trailing newline). Reading is fail-closed:
//! missing files, extra files, non-canonical JSON, or a digest mismatch are
//! all errors. [`read_run_report`] additionally rebuilds the typed
//! [`RunReportV1`].

use std::collections::BTreeSet;
use std::path::Path;

use wayfinder_search::canon::canonical_json_bytes;
use wayfinder_search::hash::{canonical_hash, ContentHash, DOMAIN_RUN_REPORT};

use crate::runner::RunReportV1;

/// Report file name.
pub const REPORT_FILE: &str = "run_report.json";

/// Digest file name.
pub const DIGEST_FILE: &str = "digest.txt";

/// Error writing a report directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDirWriteError {
    /// Filesystem error.
    Io { detail: String },
    /// Report serialization failed.
    CanonError { detail: String },
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "report dir write I/O error: {detail}"),
            Self::CanonError { detail } => write!(f, "report serialization failed: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

/// Error reading or verifying a report directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDirReadError {
    /// Filesystem error.
    Io { detail: String },
    /// A required file is absent.
    MissingFile { name: String },
    /// A file other than the two report files is present.
    UnexpectedFile { name: String },
    /// The report is not valid JSON or not in canonical form.
    NotCanonical { detail: String },
    /// `digest.txt` is not an `algorithm:hex` string.
    MalformedDigest { content: String },
    /// The stored digest does not match the report bytes.
    DigestMismatch { stored: String, computed: String },
    /// The report verified but does not describe a `RunReportV1`.
    Malformed { detail: String },
}

impl std::fmt::Display for ReportDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "report dir read I/O error: {detail}"),
            Self::MissingFile { name } => write!(f, "missing file: {name}"),
            Self::UnexpectedFile { name } => write!(f, "unexpected file: {name}"),
            Self::NotCanonical { detail } => write!(f, "report is not canonical JSON: {detail}"),
            Self::MalformedDigest { content } => write!(f, "malformed digest: {content:?}"),
            Self::DigestMismatch { stored, computed } => {
                write!(f, "digest mismatch: stored {stored}, computed {computed}")
            }
            Self::Malformed { detail } => write!(f, "malformed run report: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirReadError {}

/// A report loaded back from disk, with its verified digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReportV1 {
    /// Parsed report JSON.
    pub json: serde_json::Value,
    /// Verified content hash.
    pub digest: ContentHash,
}

/// Write `report` into `dir`, creating the directory if needed.
///
/// Each file is written to a temporary name and renamed into place.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on serialization or I/O failure.
pub fn write_report_dir(report: &RunReportV1, dir: &Path) -> Result<(), ReportDirWriteError> {
    let bytes = report
        .to_canonical_json_bytes()
        .map_err(|e| ReportDirWriteError::CanonError {
            detail: e.to_string(),
        })?;
    let digest = canonical_hash(DOMAIN_RUN_REPORT, &bytes);

    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create {}: {e}", dir.display()),
    })?;
    write_atomic(dir.join(REPORT_FILE), &bytes)?;
    write_atomic(dir.join(DIGEST_FILE), digest.as_str().as_bytes())?;
    Ok(())
}

/// Read and verify a report directory.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] if the layout, the canonical form, or the
/// digest does not check out.
pub fn read_report_dir(dir: &Path) -> Result<StoredReportV1, ReportDirReadError> {
    let present = list_files(dir)?;
    for name in [REPORT_FILE, DIGEST_FILE] {
        if !present.contains(name) {
            return Err(ReportDirReadError::MissingFile { name: name.into() });
        }
    }
    if let Some(extra) = present
        .iter()
        .find(|n| *n != REPORT_FILE && *n != DIGEST_FILE)
    {
        return Err(ReportDirReadError::UnexpectedFile {
            name: extra.clone(),
        });
    }

    let bytes = read_file(dir, REPORT_FILE)?;
    let json: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ReportDirReadError::NotCanonical {
            detail: e.to_string(),
        })?;
    let recanonical =
        canonical_json_bytes(&json).map_err(|e| ReportDirReadError::NotCanonical {
            detail: e.to_string(),
        })?;
    if recanonical != bytes {
        return Err(ReportDirReadError::NotCanonical {
            detail: "bytes differ from canonical re-serialization".into(),
        });
    }

    let stored_raw = read_file(dir, DIGEST_FILE)?;
    let stored_text = String::from_utf8_lossy(&stored_raw).into_owned();
    let stored = ContentHash::parse(&stored_text).ok_or_else(|| {
        ReportDirReadError::MalformedDigest {
            content: stored_text.clone(),
        }
    })?;
    let computed = canonical_hash(DOMAIN_RUN_REPORT, &bytes);
    if stored != computed {
        return Err(ReportDirReadError::DigestMismatch {
            stored: stored.as_str().into(),
            computed: computed.as_str().into(),
        });
    }

    Ok(StoredReportV1 {
        json,
        digest: computed,
    })
}

/// Verify a report directory without keeping its contents.
///
/// # Errors
///
/// Same as [`read_report_dir`].
pub fn verify_report_dir(dir: &Path) -> Result<ContentHash, ReportDirReadError> {
    read_report_dir(dir).map(|stored| stored.digest)
}

/// Read, verify, and rebuild the typed report stored in `dir`.
///
/// # Errors
///
/// Same as [`read_report_dir`], plus [`ReportDirReadError::Malformed`] if
/// the verified JSON is not a run report.
pub fn read_run_report(dir: &Path) -> Result<RunReportV1, ReportDirReadError> {
    let stored = read_report_dir(dir)?;
    RunReportV1::from_json_value(&stored.json)
        .map_err(|detail| ReportDirReadError::Malformed { detail })
}

fn write_atomic(path: impl AsRef<Path>, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;

    let temp_path = dir.join(format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));
    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} to {}: {e}", temp_path.display(), path.display()),
    })?;
    Ok(())
}

fn read_file(dir: &Path, name: &str) -> Result<Vec<u8>, ReportDirReadError> {
    let path = dir.join(name);
    std::fs::read(&path).map_err(|e| ReportDirReadError::Io {
        detail: format!("read {}: {e}", path.display()),
    })
}

fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirReadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ReportDirReadError::Io {
        detail: format!("list {}: {e}", dir.display()),
    })?;
    let mut names = BTreeSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReportDirReadError::Io {
            detail: format!("list {}: {e}", dir.display()),
        })?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}
