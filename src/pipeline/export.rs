//! PDF export through an external office suite.
//!
//! Runs `<program> --headless --convert-to pdf --outdir <dir> <file>` once per
//! spreadsheet. A zero exit status means the PDF now sits next to the
//! spreadsheet, which is then deleted. Anything else leaves the spreadsheet
//! untouched and is reported as an [`ExportError`]; the caller moves on to
//! the next file.

use crate::error::ExportError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Program used when none is configured.
pub const DEFAULT_CONVERTER: &str = "libreoffice";

/// Convert `path` to PDF with `program`, returning the PDF path.
pub fn export_pdf(program: &str, path: &Path) -> Result<PathBuf, ExportError> {
    let out_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    info!("Converting {} to PDF", path.display());
    let output = Command::new(program)
        .arg("--headless")
        .arg("--convert-to")
        .arg("pdf")
        .arg("--outdir")
        .arg(out_dir)
        .arg(path)
        .output()
        .map_err(|e| ExportError::SpawnFailed {
            program: program.to_string(),
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

    if !output.stdout.is_empty() {
        debug!("{program}: {}", String::from_utf8_lossy(&output.stdout).trim_end());
    }
    if !output.stderr.is_empty() {
        debug!("{program} stderr: {}", String::from_utf8_lossy(&output.stderr).trim_end());
    }

    if !output.status.success() {
        return Err(ExportError::ToolFailed {
            program: program.to_string(),
            path: path.to_path_buf(),
            status: output.status.to_string(),
        });
    }

    std::fs::remove_file(path).map_err(|e| ExportError::RemoveFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    Ok(path.with_extension("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"xlsx").unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn success_removes_the_spreadsheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = scratch_file(dir.path(), "order.xlsx");
        let pdf = export_pdf("true", &path).unwrap();
        assert_eq!(pdf, dir.path().join("order.pdf"));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_keeps_the_spreadsheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = scratch_file(dir.path(), "order.xlsx");
        let err = export_pdf("false", &path).unwrap_err();
        assert!(matches!(err, ExportError::ToolFailed { .. }), "got: {err}");
        assert!(path.exists());
    }

    #[test]
    fn missing_program_keeps_the_spreadsheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = scratch_file(dir.path(), "order.xlsx");
        let err = export_pdf("no-such-office-suite-7f3a", &path).unwrap_err();
        assert!(matches!(err, ExportError::SpawnFailed { .. }), "got: {err}");
        assert!(path.exists());
    }
}
