//! Result types returned by [`crate::fill`] and [`crate::inspect`].

use crate::error::ExportError;
use std::path::{Path, PathBuf};

/// One written form copy.
#[derive(Debug, Clone, PartialEq)]
pub struct FormResult {
    /// 1-based sheet number, as printed in the form's footer.
    pub sheet: usize,
    /// Where the spreadsheet was written.
    pub xlsx: PathBuf,
    /// Line items on this sheet.
    pub item_count: usize,
    /// The PDF, when conversion was requested and succeeded.
    pub pdf: Option<PathBuf>,
    /// Why conversion failed, when it was requested and failed.
    pub export_error: Option<ExportError>,
}

impl FormResult {
    /// The file that exists on disk after the run: the PDF if one was made,
    /// otherwise the spreadsheet.
    pub fn final_path(&self) -> &Path {
        self.pdf.as_deref().unwrap_or(&self.xlsx)
    }
}

/// Aggregate statistics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillStats {
    pub forms_written: usize,
    pub total_items: usize,
    pub pdfs_produced: usize,
    pub export_failures: usize,
    pub duration_ms: u64,
}

/// Everything a run produced, in sheet order.
#[derive(Debug, Clone, PartialEq)]
pub struct FillOutput {
    pub forms: Vec<FormResult>,
    pub stats: FillStats,
}

impl FillOutput {
    /// Spreadsheet names in sheet order (the output set).
    pub fn xlsx_paths(&self) -> Vec<&Path> {
        self.forms.iter().map(|f| f.xlsx.as_path()).collect()
    }

    /// Files left on disk after the run, in sheet order.
    pub fn final_paths(&self) -> Vec<&Path> {
        self.forms.iter().map(FormResult::final_path).collect()
    }
}

/// A form copy that [`crate::fill`] would write, as reported by [`crate::inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedForm {
    pub sheet: usize,
    pub xlsx: PathBuf,
    pub item_keys: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(sheet: usize, pdf: bool) -> FormResult {
        let xlsx = PathBuf::from(format!("order_{:02}.xlsx", sheet - 1));
        FormResult {
            sheet,
            pdf: pdf.then(|| xlsx.with_extension("pdf")),
            xlsx,
            item_count: 10,
            export_error: None,
        }
    }

    #[test]
    fn final_path_prefers_pdf() {
        assert_eq!(form(1, true).final_path(), Path::new("order_00.pdf"));
        assert_eq!(form(2, false).final_path(), Path::new("order_01.xlsx"));
    }

    #[test]
    fn output_lists_keep_sheet_order() {
        let out = FillOutput {
            forms: vec![form(1, true), form(2, false)],
            stats: FillStats::default(),
        };
        assert_eq!(
            out.xlsx_paths(),
            vec![Path::new("order_00.xlsx"), Path::new("order_01.xlsx")]
        );
        assert_eq!(
            out.final_paths(),
            vec![Path::new("order_00.pdf"), Path::new("order_01.xlsx")]
        );
    }
}
