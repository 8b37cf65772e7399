//! Error types for the requisition-form library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ReqFormError`] — **Fatal**: the run cannot proceed at all (unreadable
//!   source file, missing required field, template download failed). Returned
//!   as `Err(ReqFormError)` from [`crate::fill`] before anything further is
//!   written.
//!
//! * [`ExportError`] — **Non-fatal**: converting one produced spreadsheet to
//!   PDF failed. Stored inside [`crate::output::FormResult`] so the remaining
//!   files are still converted and the caller can report each failure.

use std::path::PathBuf;
use template_fetch::TemplateFetchError;
use thiserror::Error;

/// All fatal errors returned by the requisition-form library.
#[derive(Debug, Error)]
pub enum ReqFormError {
    // ── Source errors ─────────────────────────────────────────────────────
    /// Source file was not found at the given path.
    #[error("Order file not found: '{path}'\nCheck the path exists and is readable.")]
    SourceNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading the source.
    #[error("Failed to read order file '{path}': {source}")]
    SourceReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML, has a value of the wrong shape, or repeats
    /// an item key.
    #[error("Order file '{path}' is invalid: {detail}")]
    InvalidSource { path: PathBuf, detail: String },

    /// A field the form cannot be filled without is absent.
    #[error("Required field '{field}' is missing from the order file")]
    MissingField { field: &'static str },

    // ── Template errors ───────────────────────────────────────────────────
    /// The blank form could not be fetched.
    #[error(transparent)]
    Template(#[from] TemplateFetchError),

    /// The fetched bytes are not a readable spreadsheet.
    #[error("Blank form is not a valid spreadsheet: {detail}")]
    TemplateDecode { detail: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// A populated form could not be serialised.
    #[error("Failed to encode form '{path}': {detail}")]
    FormEncode { path: PathBuf, detail: String },

    /// Could not create or write an output spreadsheet.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single PDF conversion.
///
/// The spreadsheet it refers to is left in place.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// The converter could not be started (usually: not on `PATH`).
    #[error("Failed to run '{program}' for '{path}': {detail}\nIs LibreOffice installed and available on PATH?")]
    SpawnFailed {
        program: String,
        path: PathBuf,
        detail: String,
    },

    /// The converter ran but reported failure.
    #[error("'{program}' failed to convert '{path}' ({status})")]
    ToolFailed {
        program: String,
        path: PathBuf,
        status: String,
    },

    /// The PDF was produced but the spreadsheet could not be removed.
    #[error("Converted '{path}' but could not remove it: {detail}")]
    RemoveFailed { path: PathBuf, detail: String },
}
