//! Pipeline stages for filling a requisition.
//!
//! Each submodule implements exactly one step, so each can be tested on its
//! own without a network or an office suite.
//!
//! ## Data Flow
//!
//! ```text
//! load ──▶ populate::resolve_fields ──▶ paginate ──▶ per page: populate + write ──▶ export
//! (YAML)   (required-field check)       (10/page)    (fresh template copy)          (PDF, optional)
//! ```
//!
//! 1. [`load`]     — read and parse the YAML order file
//! 2. [`populate`] — resolve scalar fields once, then write fields, item rows
//!    and the sheet number onto each page
//! 3. [`paginate`] — split the ordered items into pages of [`crate::layout::ITEMS_PER_FORM`]
//! 4. [`write`]    — derive output names and persist each page
//! 5. [`export`]   — optional PDF conversion via an external tool; the only
//!    stage whose failures are not fatal

pub mod export;
pub mod load;
pub mod paginate;
pub mod populate;
pub mod write;
