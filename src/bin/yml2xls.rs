//! CLI binary for requisition-form.
//!
//! A thin shim over the library crate: one positional order file, one
//! `--pdf` switch. Everything else comes from the environment.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use requisition_form::{fill, FillConfig, FillProgressCallback, ProgressCallback};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Shows a byte bar while the blank form downloads, then one line per
/// written form and per conversion.
struct CliProgressCallback {
    download: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let download = ProgressBar::hidden();
        download.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {bytes}/{total_bytes}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  "),
        );
        download.set_prefix("Blank form");
        Arc::new(Self { download })
    }
}

impl FillProgressCallback for CliProgressCallback {
    fn on_template_download(&self, downloaded: u64, total: Option<u64>) {
        if self.download.is_hidden() {
            self.download.set_draw_target(indicatif::ProgressDrawTarget::stderr());
            self.download.enable_steady_tick(Duration::from_millis(80));
        }
        if let Some(t) = total {
            if self.download.length() != Some(t) {
                self.download.set_length(t);
            }
        }
        self.download.set_position(downloaded);
    }

    fn on_fill_start(&self, total_forms: usize) {
        eprintln!(
            "Filling {} {}",
            bold(&total_forms.to_string()),
            if total_forms == 1 { "form" } else { "forms" }
        );
    }

    fn on_form_written(&self, sheet: usize, total: usize, path: &Path) {
        if !self.download.is_finished() {
            self.download.finish_and_clear();
        }
        eprintln!(
            "  {} Sheet {:>2}/{:<2}  {}",
            green("✓"),
            sheet,
            total,
            path.display()
        );
    }

    fn on_export_complete(&self, _xlsx: &Path, pdf: &Path) {
        eprintln!("  {} {}", green("✓"), pdf.display());
    }

    fn on_export_error(&self, xlsx: &Path, error: &str) {
        let first_line = error.lines().next().unwrap_or(error);
        eprintln!("  {} {}  {}", red("✗"), xlsx.display(), red(first_line));
    }

    fn on_fill_complete(&self, forms_written: usize, export_failures: usize) {
        if export_failures > 0 {
            eprintln!(
                "{}",
                dim("Failed to convert the form to pdf. Is Libreoffice installed and available on PATH?")
            );
        }
        eprintln!(
            "{} {} written{}",
            if export_failures == 0 { green("✔") } else { red("⚠") },
            bold(&forms_written.to_string()),
            if export_failures > 0 {
                format!(", {} not converted", red(&export_failures.to_string()))
            } else {
                String::new()
            }
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Fill the form(s) next to the order file
  yml2xls order.yml

  # Also convert every form to PDF (needs LibreOffice on PATH)
  yml2xls --pdf order.yml

ORDER FILE (YAML):
  vendor:             name, address, city, state, zip,
                      contact_name, contact_phone, phone, fax, url
  delivery_date, cost_object, submission_date (default: today)
  requestor_name      required
  requestor_phone     required
  supervisor_name     required
  use_for_project     required
  items:              required; key -> {desc, quantity (1), unit_price (N/A)}

  Ten items fit on one form. Longer orders produce order_00.xlsx,
  order_01.xlsx, ... each marked "Sheet i of n".

ENVIRONMENT VARIABLES:
  REQFORM_TEMPLATE    Path or URL of the blank form
                      (default: http://www.unl.edu/physics/docs/Requisition2014.xlsx)
  REQFORM_CONVERTER   PDF converter program (default: libreoffice)
  RUST_LOG            Log filter, e.g. info or requisition_form=debug
"#;

/// Fill the UNL Physics requisition form from a YAML order file.
#[derive(Parser, Debug)]
#[command(
    name = "yml2xls",
    version,
    about = "Fill the UNL Physics requisition form from a YAML order file",
    long_about = "Uses the information in a YAML order file to fill out the UNL Physics Dept. \
requisition form. If the order has more items than fit on one form, more forms are added \
automatically.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// A YAML file specifying the order items.
    input_file: PathBuf,

    /// Convert each filled form to PDF with LibreOffice.
    #[arg(long)]
    pdf: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress lines cover normal feedback; RUST_LOG opens up the rest.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress: ProgressCallback = CliProgressCallback::new();
    let config = FillConfig::builder()
        .apply_env()
        .export_pdf(cli.pdf)
        .progress_callback(progress)
        .build()
        .context("Invalid configuration")?;

    if cli.pdf {
        eprintln!("{}", dim("Converting output to pdf"));
    }

    // ── Run ──────────────────────────────────────────────────────────────
    // Conversion failures are reported by the callback and leave the exit
    // status untouched.
    fill(&cli.input_file, &config)
        .with_context(|| format!("Failed to fill requisition from {}", cli.input_file.display()))?;

    Ok(())
}
