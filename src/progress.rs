//! Progress-callback trait for per-form events.
//!
//! Inject an [`Arc<dyn FillProgressCallback>`] via
//! [`crate::config::FillConfigBuilder::progress_callback`] to hear about the
//! template download, each form as it is written and each PDF conversion.
//!
//! # Example
//!
//! ```rust
//! use requisition_form::{FillConfig, FillProgressCallback};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! struct Printer;
//!
//! impl FillProgressCallback for Printer {
//!     fn on_form_written(&self, sheet: usize, total: usize, path: &Path) {
//!         eprintln!("sheet {sheet}/{total} -> {}", path.display());
//!     }
//! }
//!
//! let config = FillConfig::builder()
//!     .progress_callback(Arc::new(Printer) as Arc<dyn FillProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by [`crate::fill`] as it works through a requisition.
///
/// Events arrive in order on the calling thread. All methods have no-op
/// defaults so implementors only override what they care about.
pub trait FillProgressCallback: Send + Sync {
    /// Bytes of the blank form received so far, and the expected total when
    /// the server sent one. Only called for URL templates.
    fn on_template_download(&self, downloaded: u64, total: Option<u64>) {
        let _ = (downloaded, total);
    }

    /// Called once the order has been validated and paginated.
    ///
    /// # Arguments
    /// * `total_forms` — number of form copies that will be written
    fn on_fill_start(&self, total_forms: usize) {
        let _ = total_forms;
    }

    /// Called after each form copy has been saved.
    ///
    /// # Arguments
    /// * `sheet` — 1-based sheet number
    /// * `total` — total number of sheets
    /// * `path`  — where the spreadsheet was written
    fn on_form_written(&self, sheet: usize, total: usize, path: &Path) {
        let _ = (sheet, total, path);
    }

    /// Called when a spreadsheet was converted and removed.
    fn on_export_complete(&self, xlsx: &Path, pdf: &Path) {
        let _ = (xlsx, pdf);
    }

    /// Called when converting a spreadsheet failed; the spreadsheet is kept.
    fn on_export_error(&self, xlsx: &Path, error: &str) {
        let _ = (xlsx, error);
    }

    /// Called once at the end of a successful run.
    ///
    /// # Arguments
    /// * `forms_written`   — spreadsheets produced
    /// * `export_failures` — conversions that failed (0 when export is off)
    fn on_fill_complete(&self, forms_written: usize, export_failures: usize) {
        let _ = (forms_written, export_failures);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl FillProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::FillConfig`].
pub type ProgressCallback = Arc<dyn FillProgressCallback>;
