//! Configuration for filling a requisition.
//!
//! All run behaviour is controlled through [`FillConfig`], built via its
//! [`FillConfigBuilder`]. The form layout itself is fixed (see
//! [`crate::layout`]); what varies between runs is where the blank form comes
//! from and whether the outputs are turned into PDFs.

use crate::error::ReqFormError;
use crate::pipeline::export::DEFAULT_CONVERTER;
use crate::progress::ProgressCallback;
use std::fmt;
use template_fetch::TemplateSource;

/// Environment variable naming the PDF converter program.
pub const CONVERTER_ENV: &str = "REQFORM_CONVERTER";

/// Configuration for one run of [`crate::fill`].
///
/// # Example
/// ```rust
/// use requisition_form::FillConfig;
///
/// let config = FillConfig::builder()
///     .export_pdf(true)
///     .converter("soffice")
///     .build()
///     .unwrap();
/// assert!(config.export_pdf);
/// ```
#[derive(Clone)]
pub struct FillConfig {
    /// Where the blank form comes from. Default: the UNL Physics URL.
    pub template: TemplateSource,

    /// Convert each written spreadsheet to PDF. Default: false.
    pub export_pdf: bool,

    /// Program invoked for PDF conversion. Default: `libreoffice`.
    ///
    /// It is called as `<program> --headless --convert-to pdf --outdir <dir> <file>`,
    /// which `soffice` accepts too.
    pub converter: String,

    /// Timeout for downloading the template, in seconds. Default: none.
    ///
    /// Without a timeout the download runs to completion.
    pub download_timeout_secs: Option<u64>,

    /// Optional progress callback for per-form events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            template: TemplateSource::default(),
            export_pdf: false,
            converter: DEFAULT_CONVERTER.to_string(),
            download_timeout_secs: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for FillConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FillConfig")
            .field("template", &self.template)
            .field("export_pdf", &self.export_pdf)
            .field("converter", &self.converter)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn FillProgressCallback>"),
            )
            .finish()
    }
}

impl FillConfig {
    /// Create a new builder for `FillConfig`.
    pub fn builder() -> FillConfigBuilder {
        FillConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`FillConfig`].
pub struct FillConfigBuilder {
    config: FillConfig,
}

impl fmt::Debug for FillConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FillConfigBuilder")
            .field("config", &self.config)
            .finish()
    }
}

impl FillConfigBuilder {
    pub fn template(mut self, source: TemplateSource) -> Self {
        self.config.template = source;
        self
    }

    pub fn export_pdf(mut self, v: bool) -> Self {
        self.config.export_pdf = v;
        self
    }

    pub fn converter(mut self, program: impl Into<String>) -> Self {
        self.config.converter = program.into();
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = Some(secs);
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Apply `REQFORM_TEMPLATE` and `REQFORM_CONVERTER` when they are set.
    pub fn apply_env(self) -> Self {
        self.apply_env_values(
            TemplateSource::from_env(),
            std::env::var(CONVERTER_ENV).ok(),
        )
    }

    fn apply_env_values(mut self, template: Option<TemplateSource>, converter: Option<String>) -> Self {
        if let Some(source) = template {
            self.config.template = source;
        }
        if let Some(program) = converter.filter(|p| !p.trim().is_empty()) {
            self.config.converter = program.trim().to_string();
        }
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<FillConfig, ReqFormError> {
        let c = &self.config;
        if c.converter.trim().is_empty() {
            return Err(ReqFormError::InvalidConfig(
                "Converter program must not be empty".into(),
            ));
        }
        if c.download_timeout_secs == Some(0) {
            return Err(ReqFormError::InvalidConfig(
                "Download timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
