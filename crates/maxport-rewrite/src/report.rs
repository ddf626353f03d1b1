//! Per-preset progress reporting seam.
//!
//! The core never prints; callers inject an observer and route events to
//! whatever output channel they own (stdout for the CLI, a progress bar for
//! batch runs, nothing at all for tests).

use std::path::Path;

use crate::SearchTier;

/// One step in processing a single preset.
#[derive(Debug, Clone, Copy)]
pub enum ReportEvent<'a> {
    /// Processing of a preset began.
    Started { preset: &'a Path },
    /// The relative path from preset directory to device was computed.
    RelativePath { value: &'a str },
    /// Reference nodes were located.
    ReferencesLocated { count: usize, tier: SearchTier },
    /// Neither container shape matched anywhere in the document.
    NoReferences,
    /// Processing finished; `output` is the written file when `changed`.
    Finished {
        changed: bool,
        output: Option<&'a Path>,
    },
}

/// Observer for per-preset outcomes.
///
/// `Sync` so a batch driver can share one reporter across worker threads.
pub trait Report: Sync {
    fn event(&self, event: ReportEvent<'_>);
}

/// Reporter that discards everything.
pub struct NullReport;

impl Report for NullReport {
    fn event(&self, _event: ReportEvent<'_>) {}
}
