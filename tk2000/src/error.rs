//! Error types surfaced to the host for asset-loading failures.
//!
//! Per spec: initialization errors (missing/truncated ROM or tape) abort
//! the triggering call and are reported to the host. Runtime errors (audio
//! loss) are confined to their owning device's status surface instead —
//! see `Sound::is_available`/`Sound::last_error`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("ROM image not found: {path}")]
    RomMissing { path: PathBuf },

    #[error("ROM image truncated: {path} is {actual} bytes, expected {expected}")]
    RomTruncated {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("tape file not found: {path}")]
    TapeMissing { path: PathBuf },

    #[error("tape file truncated: {path} ({reason})")]
    TapeTruncated { path: PathBuf, reason: String },

    #[error("tape file malformed: {path} ({reason})")]
    TapeMalformed { path: PathBuf, reason: String },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
