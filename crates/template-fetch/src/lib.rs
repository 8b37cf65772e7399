//! # template-fetch
//!
//! Obtain the raw bytes of a blank spreadsheet form exactly once per run.
//!
//! ## How it works
//!
//! A [`TemplateCache`] is created once per run from a [`TemplateSource`]:
//!
//! 1. `REQFORM_TEMPLATE`, when set, overrides the default source. A value
//!    starting with `http://` or `https://` is fetched over HTTP; anything
//!    else is read as a local path.
//! 2. Otherwise the blank UNL Physics requisition form is downloaded from
//!    [`DEFAULT_TEMPLATE_URL`].
//! 3. The first call to [`TemplateCache::bytes`] fetches the blob; later
//!    calls return the cached bytes without touching the network again.
//!
//! There is no retry. A failed fetch is returned to the caller, which is
//! expected to abort the run.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use template_fetch::{TemplateCache, TemplateSource};
//!
//! let mut cache = TemplateCache::new(TemplateSource::from_env_or_default());
//! let first = cache.bytes(None)?.len();
//! let again = cache.bytes(None)?.len(); // served from memory
//! assert_eq!(first, again);
//! # Ok::<(), template_fetch::TemplateFetchError>(())
//! ```
//!
//! ## Environment variable overrides
//!
//! - `REQFORM_TEMPLATE` — path or URL of the blank form to use instead of
//!   the default URL.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

// ── Public constants ─────────────────────────────────────────────────────────

/// Location of the blank 2014 requisition form published by UNL Physics.
pub const DEFAULT_TEMPLATE_URL: &str = "http://www.unl.edu/physics/docs/Requisition2014.xlsx";

/// Environment variable that overrides [`DEFAULT_TEMPLATE_URL`].
pub const TEMPLATE_ENV: &str = "REQFORM_TEMPLATE";

// ── Error type ───────────────────────────────────────────────────────────────

/// Errors returned while fetching a template.
#[derive(Error, Debug)]
pub enum TemplateFetchError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("Failed to download template from '{url}': {reason}")]
    Download { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("Template download from '{url}' returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// A local template file could not be read.
    #[error("Failed to read template '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ── Template source ──────────────────────────────────────────────────────────

/// Where the blank form comes from.
#[derive(Clone)]
pub enum TemplateSource {
    /// Fetched with an unauthenticated HTTP GET.
    Url(String),
    /// Read from the local file system.
    Path(PathBuf),
    /// Already in memory.
    Bytes(Arc<[u8]>),
}

impl TemplateSource {
    /// Interpret a user-supplied string as a URL or a local path.
    pub fn parse(input: &str) -> Self {
        if is_url(input) {
            TemplateSource::Url(input.to_string())
        } else {
            TemplateSource::Path(PathBuf::from(input))
        }
    }

    /// The source named by `REQFORM_TEMPLATE`, if set and non-empty.
    pub fn from_env() -> Option<Self> {
        source_from_value(std::env::var(TEMPLATE_ENV).ok())
    }

    /// `REQFORM_TEMPLATE` if set, else [`DEFAULT_TEMPLATE_URL`].
    pub fn from_env_or_default() -> Self {
        Self::from_env().unwrap_or_default()
    }

    /// Wrap an in-memory template.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        TemplateSource::Bytes(bytes.into())
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        TemplateSource::Url(DEFAULT_TEMPLATE_URL.to_string())
    }
}

impl fmt::Debug for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            TemplateSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            TemplateSource::Bytes(bytes) => write!(f, "Bytes(<{} bytes>)", bytes.len()),
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::Url(url) => f.write_str(url),
            TemplateSource::Path(path) => write!(f, "{}", path.display()),
            TemplateSource::Bytes(bytes) => write!(f, "<in-memory template, {} bytes>", bytes.len()),
        }
    }
}

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn source_from_value(value: Option<String>) -> Option<TemplateSource> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(TemplateSource::parse(trimmed))
}

// ── Per-run cache ────────────────────────────────────────────────────────────

/// Holds the template bytes for the lifetime of one run.
///
/// The blob is fetched lazily on the first [`bytes`](Self::bytes) call and is
/// read-only afterwards. Each form page decodes its own copy from these bytes.
#[derive(Debug)]
pub struct TemplateCache {
    source: TemplateSource,
    timeout: Option<Duration>,
    bytes: Option<Arc<[u8]>>,
}

impl TemplateCache {
    pub fn new(source: TemplateSource) -> Self {
        Self {
            source,
            timeout: None,
            bytes: None,
        }
    }

    /// Abort HTTP downloads that take longer than `timeout`.
    ///
    /// Without this the download runs to completion, however long it takes.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Returns `true` once the template has been fetched.
    pub fn is_cached(&self) -> bool {
        self.bytes.is_some()
    }

    /// Returns the template bytes, fetching them on first use.
    ///
    /// `on_progress` receives `(bytes_downloaded, total_size_option)` while a
    /// URL source is downloading. It is never called for local or in-memory
    /// sources, nor once the bytes are cached.
    pub fn bytes(
        &mut self,
        on_progress: Option<&dyn Fn(u64, Option<u64>)>,
    ) -> Result<&[u8], TemplateFetchError> {
        if self.bytes.is_none() {
            let fetched = fetch(&self.source, self.timeout, on_progress)?;
            info!("Template ready: {} ({} bytes)", self.source, fetched.len());
            self.bytes = Some(fetched);
        } else {
            debug!("Template served from cache");
        }
        Ok(self.bytes.as_deref().unwrap_or_default())
    }
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn fetch(
    source: &TemplateSource,
    timeout: Option<Duration>,
    on_progress: Option<&dyn Fn(u64, Option<u64>)>,
) -> Result<Arc<[u8]>, TemplateFetchError> {
    match source {
        TemplateSource::Url(url) => download_bytes(url, timeout, on_progress).map(Arc::from),
        TemplateSource::Path(path) => {
            debug!("Reading template from {}", path.display());
            std::fs::read(path)
                .map(Arc::from)
                .map_err(|source| TemplateFetchError::Read {
                    path: path.clone(),
                    source,
                })
        }
        TemplateSource::Bytes(bytes) => Ok(Arc::clone(bytes)),
    }
}

/// Streams a URL into a `Vec<u8>`, calling `on_progress` every 64 KiB.
fn download_bytes(
    url: &str,
    timeout: Option<Duration>,
    on_progress: Option<&dyn Fn(u64, Option<u64>)>,
) -> Result<Vec<u8>, TemplateFetchError> {
    info!("Downloading template from: {}", url);

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("template-fetch/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(timeout)
        .build()
        .map_err(|e| TemplateFetchError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| TemplateFetchError::Download {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    if !response.status().is_success() {
        return Err(TemplateFetchError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let total = response.content_length();
    let mut buf = Vec::with_capacity(total.unwrap_or(64 * 1024) as usize);

    let mut stream = response;
    let mut chunk = vec![0u8; 64 * 1024];
    let mut downloaded: u64 = 0;

    loop {
        match stream.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                downloaded += n as u64;
                if let Some(cb) = on_progress {
                    cb(downloaded, total);
                }
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(TemplateFetchError::Download {
                    url: url.to_string(),
                    reason: format!("Read error: {e}"),
                });
            }
        }
    }

    if let Some(expected) = total {
        if expected != downloaded {
            warn!("Template download size mismatch: expected {expected}, got {downloaded}");
        }
    }

    Ok(buf)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
