//! Entry points: fill a requisition from an order file.
//!
//! The run is strictly sequential. Everything that can fail fatally (reading
//! the order, required fields, fetching the template) happens before the
//! first spreadsheet is written; only PDF conversion may fail per file.

use crate::config::FillConfig;
use crate::error::ReqFormError;
use crate::form::FormInstance;
use crate::layout::ITEMS_PER_FORM;
use crate::output::{FillOutput, FillStats, FormResult, PlannedForm};
use crate::pipeline::{export, load, paginate, populate, write};
use crate::record::{Items, Requisition};
use std::path::Path;
use std::time::{Duration, Instant};
use template_fetch::TemplateCache;
use tracing::{debug, info, warn};

/// Fill the requisition form from the order file at `source`.
///
/// Writes one spreadsheet per page next to the source file and, when
/// `config.export_pdf` is set, converts each to PDF.
///
/// # Errors
/// Returns `Err(ReqFormError)` only for fatal errors, before any output
/// is written for:
/// - Order file missing, unreadable or not valid YAML
/// - A required field missing
/// - Template download or decoding failed
///
/// PDF conversion failures are not errors: see
/// [`FormResult::export_error`](crate::output::FormResult::export_error).
pub fn fill(source: impl AsRef<Path>, config: &FillConfig) -> Result<FillOutput, ReqFormError> {
    let mut cache = TemplateCache::new(config.template.clone());
    if let Some(secs) = config.download_timeout_secs {
        cache = cache.with_timeout(Duration::from_secs(secs));
    }
    fill_with_cache(source, &mut cache, config)
}

/// Like [`fill`], but reuses a caller-owned template cache.
///
/// `config.template` is ignored; the cache's own source is used.
pub fn fill_with_cache(
    source: impl AsRef<Path>,
    cache: &mut TemplateCache,
    config: &FillConfig,
) -> Result<FillOutput, ReqFormError> {
    let total_start = Instant::now();
    let source = source.as_ref();
    info!("Filling requisition from {}", source.display());

    // ── Step 1: Load the order ───────────────────────────────────────────
    let requisition = load::load_requisition(source)?;

    // ── Step 2: Resolve scalar fields (fails fast on missing ones) ───────
    let today = chrono::Local::now().date_naive();
    let fields = populate::resolve_fields(&requisition, today)?;
    let items = required_items(&requisition)?;

    // ── Step 3: Paginate ─────────────────────────────────────────────────
    let pages = paginate::paginate(items.as_map(), ITEMS_PER_FORM);
    let total = pages.len();
    let paths = write::output_paths(&write::output_base(source), total);
    debug!("{} items over {} forms", items.len(), total);

    let callback = config.progress_callback.as_deref();
    if let Some(cb) = callback {
        cb.on_fill_start(total);
    }

    // ── Step 4: Fetch the blank form once ────────────────────────────────
    debug!("Template source: {}", cache.source());
    let on_download: &dyn Fn(u64, Option<u64>) = &|done, size| {
        if let Some(cb) = callback {
            cb.on_template_download(done, size);
        }
    };
    let template = cache.bytes(Some(on_download))?;

    // ── Step 5: One fresh copy per page ──────────────────────────────────
    let mut forms = Vec::with_capacity(total);
    for (i, (page, path)) in pages.iter().zip(&paths).enumerate() {
        let sheet = i + 1;
        let mut form = FormInstance::from_bytes(template)?;
        populate::populate_items(&mut form, page);
        populate::apply_fields(&mut form, &fields);
        populate::place_sheet_number(&mut form, sheet, total);
        write::save_form(&form, path)?;

        info!("Wrote sheet {}/{}: {}", sheet, total, path.display());
        if let Some(cb) = callback {
            cb.on_form_written(sheet, total, path);
        }

        forms.push(FormResult {
            sheet,
            xlsx: path.clone(),
            item_count: page.len(),
            pdf: None,
            export_error: None,
        });
    }

    // ── Step 6: Optional PDF conversion, best-effort per file ────────────
    if config.export_pdf {
        info!("Converting {} forms to PDF with '{}'", forms.len(), config.converter);
        for form in &mut forms {
            match export::export_pdf(&config.converter, &form.xlsx) {
                Ok(pdf) => {
                    if let Some(cb) = callback {
                        cb.on_export_complete(&form.xlsx, &pdf);
                    }
                    form.pdf = Some(pdf);
                }
                Err(e) => {
                    warn!("{}", e);
                    if let Some(cb) = callback {
                        cb.on_export_error(&form.xlsx, &e.to_string());
                    }
                    form.export_error = Some(e);
                }
            }
        }
    }

    let stats = FillStats {
        forms_written: forms.len(),
        total_items: items.len(),
        pdfs_produced: forms.iter().filter(|f| f.pdf.is_some()).count(),
        export_failures: forms.iter().filter(|f| f.export_error.is_some()).count(),
        duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Requisition complete: {} forms, {} items, {}ms",
        stats.forms_written, stats.total_items, stats.duration_ms
    );
    if let Some(cb) = callback {
        cb.on_fill_complete(stats.forms_written, stats.export_failures);
    }

    Ok(FillOutput { forms, stats })
}

/// Load and validate an order file and report the forms it would produce.
///
/// Needs no network access and writes nothing.
pub fn inspect(source: impl AsRef<Path>) -> Result<Vec<PlannedForm>, ReqFormError> {
    let source = source.as_ref();
    let requisition = load::load_requisition(source)?;
    populate::resolve_fields(&requisition, chrono::Local::now().date_naive())?;
    let items = required_items(&requisition)?;

    let pages = paginate::paginate(items.as_map(), ITEMS_PER_FORM);
    let paths = write::output_paths(&write::output_base(source), pages.len());
    Ok(pages
        .into_iter()
        .zip(paths)
        .enumerate()
        .map(|(i, (page, xlsx))| PlannedForm {
            sheet: i + 1,
            xlsx,
            item_keys: page.into_keys().collect(),
        })
        .collect())
}

// ── Internal helpers ─────────────────────────────────────────────────────

fn required_items(requisition: &Requisition) -> Result<&Items, ReqFormError> {
    requisition
        .items
        .as_ref()
        .ok_or(ReqFormError::MissingField { field: "items" })
}
