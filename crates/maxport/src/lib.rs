//! Maxport - make Ableton device presets portable.
//!
//! This crate provides a unified interface to the maxport library ecosystem
//! for relinking `.adv`/`.adg` presets to the `.amxd` device they reference.
//!
//! # Crates
//!
//! - [`maxport_preset`] - preset container codec (gzip/plain XML to tree)
//! - [`maxport_rewrite`] - reference location and path rewriting
//!
//! # Example
//!
//! ```no_run
//! use maxport::prelude::*;
//!
//! let outcome = process(
//!     "Presets/Bass/Choker.adv".as_ref(),
//!     "Mono One.amxd".as_ref(),
//!     &ProcessOptions::default(),
//!     &NullReport,
//! )?;
//!
//! if outcome.changed {
//!     println!("wrote {:?}", outcome.output);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use maxport_preset as preset;
pub use maxport_rewrite as rewrite;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use maxport_preset::{Envelope, PresetDocument, PresetNode};
    pub use maxport_rewrite::{
        modified_path_for, process, CompressionPolicy, NullReport, Outcome, ProcessOptions,
        Report, ReportEvent, SearchTier, WriteMode,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
