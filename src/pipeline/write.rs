//! Output writing: name and persist each populated form.
//!
//! Outputs sit next to the source file: `orders.yml` becomes `orders.xlsx`,
//! or `orders_00.xlsx`, `orders_01.xlsx`, … when the items span several
//! pages. Existing files are overwritten without warning.

use crate::error::ReqFormError;
use crate::form::FormInstance;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The source path with its extension stripped.
pub fn output_base(source: &Path) -> PathBuf {
    source.with_extension("")
}

/// File names for `total` forms derived from `base`.
pub fn output_paths(base: &Path, total: usize) -> Vec<PathBuf> {
    if total <= 1 {
        return vec![suffixed(base, ".xlsx")];
    }
    (0..total)
        .map(|i| suffixed(base, &format!("_{i:02}.xlsx")))
        .collect()
}

fn suffixed(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Serialise `form` and write it to `path`.
pub fn save_form(form: &FormInstance, path: &Path) -> Result<(), ReqFormError> {
    let bytes = form.to_bytes().map_err(|detail| ReqFormError::FormEncode {
        path: path.to_path_buf(),
        detail,
    })?;
    write_bytes(path, &bytes)
}

/// Atomic write: write to a sibling temp file, then rename over `path`.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ReqFormError> {
    let write_err = |source: std::io::Error| ReqFormError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = path.with_extension("xlsx.tmp");
    std::fs::write(&tmp_path, bytes).map_err(write_err)?;
    if let Err(source) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }

    debug!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
