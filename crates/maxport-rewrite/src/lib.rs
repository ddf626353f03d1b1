//! Reference rewriter for Ableton device presets.
//!
//! Locates the `FileRef` reference nodes inside a decoded preset tree,
//! computes the relative path from the preset to its Max for Live device
//! file, and mutates the three path fields in place. The search is tiered:
//! the modern `MxPatchRef` container shape is tried first, with the older
//! `PatchSlot` shape as a fallback when no `MxPatchRef` exists anywhere in
//! the document.
//!
//! # Example
//!
//! ```no_run
//! use maxport_rewrite::{process, NullReport, ProcessOptions};
//!
//! let options = ProcessOptions::default();
//! let outcome = process(
//!     "Presets/Bass/Choker.adv".as_ref(),
//!     "Mono One.amxd".as_ref(),
//!     &options,
//!     &NullReport,
//! )?;
//! println!("changed: {}", outcome.changed);
//! # Ok::<(), maxport_rewrite::Error>(())
//! ```

mod error;
mod labels;
mod locate;
mod process;
mod relpath;
mod report;
mod rewrite;

pub use error::{Error, Result};
pub use labels::{builtin_label_sets, rewrite_label_set};
pub use locate::{locate_references, SearchTier};
pub use process::{
    backup_path_for, modified_path_for, process, CompressionPolicy, Outcome, ProcessOptions,
    WriteMode,
};
pub use relpath::relative_path_between;
pub use report::{NullReport, Report, ReportEvent};
pub use rewrite::apply_path_rewrite;
