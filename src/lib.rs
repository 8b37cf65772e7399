//! # requisition-form
//!
//! Fill the UNL Physics Dept. purchase requisition spreadsheet from a YAML
//! order file.
//!
//! ## Why this crate?
//!
//! The requisition form is a fixed-layout `.xlsx` with room for ten line
//! items. Typing a long order into it by hand means copying the vendor block
//! onto every extra sheet and numbering the sheets yourself. This crate reads
//! the order once, splits the items ten per sheet, fills a fresh copy of the
//! blank form for each sheet and, if asked, turns each into a PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! order.yml
//!  │
//!  ├─ 1. Load      parse YAML into a Requisition
//!  ├─ 2. Resolve   apply the field table; missing required fields abort here
//!  ├─ 3. Paginate  ten items per sheet, file order preserved
//!  ├─ 4. Template  fetch the blank form once per run
//!  ├─ 5. Populate  fresh copy per sheet: items, fields, "Sheet i of n"
//!  ├─ 6. Write     order.xlsx, or order_00.xlsx, order_01.xlsx, …
//!  └─ 7. Export    optional: libreoffice --convert-to pdf, per file, best-effort
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use requisition_form::{fill, FillConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = FillConfig::builder().export_pdf(true).build()?;
//!     let output = fill("order.yml", &config)?;
//!     for path in output.final_paths() {
//!         println!("{}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Order file
//!
//! ```yaml
//! vendor:
//!   name: Thorlabs
//!   city: Newton
//!   state: NJ
//!   zip: "07860"
//! requestor_name: Ann Example
//! requestor_phone: 402-555-0101
//! supervisor_name: Dr. Sample
//! use_for_project: Optics lab refit
//! items:
//!   LA1131: {desc: Plano-convex lens, quantity: 4, unit_price: 25.75}
//!   KM100: {desc: Kinematic mount}
//! ```
//!
//! `requestor_name`, `requestor_phone`, `supervisor_name`, `use_for_project`
//! and `items` are required; see [`layout::MISC_FIELDS`] for every field.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `yml2xls` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod fill;
pub mod form;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod record;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{FillConfig, FillConfigBuilder};
pub use error::{ExportError, ReqFormError};
pub use fill::{fill, fill_with_cache, inspect};
pub use form::FormInstance;
pub use output::{FillOutput, FillStats, FormResult, PlannedForm};
pub use progress::{FillProgressCallback, NoopProgressCallback, ProgressCallback};
pub use record::{FieldValue, Item, Items, Requisition, Vendor};
pub use template_fetch::{TemplateCache, TemplateSource};
