//! Source loading: read the YAML order file into a [`Requisition`].
//!
//! Files are checked the same way up front (exists, readable) so the user
//! gets a path-specific error instead of a bare `io::Error`. YAML syntax
//! errors, wrongly shaped values and duplicate item keys all surface as
//! [`ReqFormError::InvalidSource`] carrying serde_yaml's line/column detail.

use crate::error::ReqFormError;
use crate::record::Requisition;
use std::path::Path;
use tracing::debug;

/// Read and parse the order file at `path`.
pub fn load_requisition(path: &Path) -> Result<Requisition, ReqFormError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReqFormError::SourceNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => ReqFormError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ReqFormError::SourceReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let requisition = parse_requisition(&text, path)?;
    debug!(
        "Loaded order file {}: {} items",
        path.display(),
        requisition.items.as_ref().map_or(0, |items| items.len())
    );
    Ok(requisition)
}

/// Parse YAML text; `origin` only labels errors.
pub fn parse_requisition(text: &str, origin: &Path) -> Result<Requisition, ReqFormError> {
    serde_yaml::from_str(text).map_err(|e| ReqFormError::InvalidSource {
        path: origin.to_path_buf(),
        detail: e.to_string(),
    })
}
